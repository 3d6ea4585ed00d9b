//! Mention-token extraction from free text.

use super::UserId;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Extracts the distinct set of users referenced by `<@{userId}|{display}>`
/// tokens anywhere in `content`, excluding the author's self-mentions.
///
/// The user id must parse as a UUID; the display name is opaque and ends at
/// the first `>` after the separator. Malformed tokens are skipped silently.
/// The extraction is a single pass with no side effects; repeated tokens for
/// the same user collapse to one entry.
#[must_use]
pub fn extract_mentions(content: &str, author: UserId) -> BTreeSet<UserId> {
    let mut mentioned = BTreeSet::new();

    for candidate in content.split("<@").skip(1) {
        let Some((id_part, display_part)) = candidate.split_once('|') else {
            continue;
        };
        if !display_part.contains('>') {
            continue;
        }
        let Ok(raw_id) = Uuid::parse_str(id_part.trim()) else {
            continue;
        };
        let user = UserId::from_uuid(raw_id);
        if user != author {
            mentioned.insert(user);
        }
    }

    mentioned
}
