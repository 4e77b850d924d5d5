//! User id generation.
//!
//! Ids are `user_` followed by a UUID v7: millisecond timestamp prefix plus
//! random bits, which is unique in practice for this client's volume.

use uuid::Uuid;

pub const USER_ID_PREFIX: &str = "user_";

/// Generate a fresh user id
pub fn generate_user_id() -> String {
    format!("{}{}", USER_ID_PREFIX, Uuid::now_v7().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_user_id_format() {
        let id = generate_user_id();
        assert!(id.starts_with(USER_ID_PREFIX));
        let suffix = &id[USER_ID_PREFIX.len()..];
        assert_eq!(suffix.len(), 32);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_user_ids_do_not_collide() {
        let ids: HashSet<String> = (0..1_000).map(|_| generate_user_id()).collect();
        assert_eq!(ids.len(), 1_000);
    }
}
