//! Short client-facing identifier generation.

use uuid::Uuid;

/// Length of generated identifiers, in characters.
const SHORT_ID_LEN: usize = 12;

/// Generate a short alphanumeric identifier.
///
/// Stateless and safe to call concurrently. Tokens are drawn from a v4 UUID,
/// so collisions are possible in principle; uniqueness is enforced by the
/// catalog's constraints, not here.
pub fn short_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(SHORT_ID_LEN);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_short_and_alphanumeric() {
        let id = short_id();
        assert_eq!(id.len(), SHORT_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn consecutive_ids_differ() {
        assert_ne!(short_id(), short_id());
    }
}
