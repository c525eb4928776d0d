//! Delimited dialogue entries and one-time gift dialogue overrides.
//!
//! NPC gift-taste entries are `/`-delimited strings whose fields alternate
//! between reaction text and item lists. A one-time override splices new
//! text into one field, and the engine restores the captured original on
//! the following tick.

use larder_types::NpcId;

/// Default field delimiter of gift-taste entries.
pub const ENTRY_DELIMITER: char = '/';

/// Field of a gift-taste entry holding the "loved gift" reaction.
pub const LOVED_GIFT_FIELD: usize = 2;

/// Errors raised while installing a gift-dialogue override.
#[derive(Debug, thiserror::Error)]
pub enum DialogueError {
    /// The content pack has no text for a required key.
    #[error("missing translation for required key {key}")]
    MissingText {
        /// The key that could not be translated.
        key: String,
    },

    /// An earlier override has not been reverted yet.
    #[error("gift dialogue for {pending} is still patched; refusing to patch {npc}")]
    PatchOutstanding {
        /// The NPC the rejected override was for.
        npc: NpcId,
        /// The NPC whose override is still outstanding.
        pending: NpcId,
    },
}

/// Translation key of the egg-gift reaction for `npc`.
pub fn egg_gift_key(npc: &NpcId) -> String {
    format!("talk.egg_gift.{}", npc.as_str().to_lowercase())
}

/// Rewrite fields of a delimited entry.
///
/// With `replace`, the whole entry becomes `fields` (missing fields are
/// left empty). Otherwise each `Some` field is written at
/// `start_index + i`, either replacing the old value or, with `append`,
/// joined to it with a space. `None` fields are left untouched. Entries
/// shorter than the target index are padded with empty fields.
pub fn update_entry(
    old: &str,
    fields: &[Option<&str>],
    append: bool,
    replace: bool,
    start_index: usize,
    delimiter: char,
) -> String {
    let mut parts: Vec<String> = if replace {
        fields.iter().map(|f| f.unwrap_or_default().to_owned()).collect()
    } else {
        old.split(delimiter).map(str::to_owned).collect()
    };

    if !replace {
        for (offset, field) in fields.iter().enumerate() {
            let Some(text) = field else { continue };
            let index = start_index.saturating_add(offset);
            if parts.len() <= index {
                parts.resize(index.saturating_add(1), String::new());
            }
            if let Some(slot) = parts.get_mut(index) {
                if append && !slot.is_empty() {
                    slot.push(' ');
                    slot.push_str(text);
                } else {
                    slot.clear();
                    slot.push_str(text);
                }
            }
        }
    }

    let mut delim = [0_u8; 4];
    parts.join(delimiter.encode_utf8(&mut delim))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY: &str = "Oh, I love this!/1 2 3/That's nice./4 5/Hmm.";

    #[test]
    fn overwrites_field_at_start_index() {
        let updated = update_entry(ENTRY, &[Some("An egg! For me?")], false, false, 2, '/');
        assert_eq!(updated, "Oh, I love this!/1 2 3/An egg! For me?/4 5/Hmm.");
    }

    #[test]
    fn append_joins_with_space() {
        let updated = update_entry(ENTRY, &[Some("Really.")], true, false, 2, '/');
        assert_eq!(updated, "Oh, I love this!/1 2 3/That's nice. Really./4 5/Hmm.");
    }

    #[test]
    fn none_fields_are_skipped() {
        let updated = update_entry(ENTRY, &[None, Some("6")], false, false, 2, '/');
        assert_eq!(updated, "Oh, I love this!/1 2 3/That's nice./6/Hmm.");
    }

    #[test]
    fn replace_discards_old_fields() {
        let updated = update_entry(ENTRY, &[Some("a"), None, Some("c")], false, true, 2, '/');
        assert_eq!(updated, "a//c");
    }

    #[test]
    fn short_entries_are_padded() {
        let updated = update_entry("only", &[Some("text")], false, false, 2, '/');
        assert_eq!(updated, "only//text");
    }

    #[test]
    fn other_delimiters_work() {
        let updated = update_entry("a^b^c", &[Some("x")], false, false, 1, '^');
        assert_eq!(updated, "a^x^c");
    }

    #[test]
    fn egg_key_is_lowercased() {
        assert_eq!(egg_gift_key(&NpcId::from("Abigail")), "talk.egg_gift.abigail");
    }
}
