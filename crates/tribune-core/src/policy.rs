//! Authorization policy for post operations.

use crate::domain::{Identity, Post};
use crate::error::DomainError;

/// The operation a caller wants to perform on a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    List,
}

/// Decide whether `identity` may perform `action` on `target`.
///
/// Existence is checked before ownership and visibility: non-owners cannot
/// tell an inaccessible post from a missing one.
pub fn authorize(
    identity: &Identity,
    action: Action,
    target: Option<&Post>,
) -> Result<(), DomainError> {
    match action {
        // No target exists yet (Create), or the store filters the visible
        // set itself (List).
        Action::Create | Action::List => Ok(()),
        Action::Read => {
            let post = target.ok_or(DomainError::NotFound)?;
            if !post.is_private || post.creator_id == identity.id {
                Ok(())
            } else {
                Err(DomainError::Forbidden)
            }
        }
        Action::Update | Action::Delete => {
            let post = target.ok_or(DomainError::NotFound)?;
            if post.creator_id == identity.id {
                Ok(())
            } else {
                Err(DomainError::Forbidden)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostDraft;

    fn post(creator_id: i64, is_private: bool) -> Post {
        Post::new(
            creator_id,
            PostDraft {
                title: "hello".to_string(),
                is_private,
                ..Default::default()
            },
        )
    }

    fn caller(id: i64) -> Identity {
        Identity { id }
    }

    #[test]
    fn create_is_always_allowed() {
        assert!(authorize(&caller(1), Action::Create, None).is_ok());
    }

    #[test]
    fn list_is_always_allowed() {
        assert!(authorize(&caller(1), Action::List, None).is_ok());
    }

    #[test]
    fn anyone_may_read_a_public_post() {
        let target = post(1, false);
        assert!(authorize(&caller(2), Action::Read, Some(&target)).is_ok());
    }

    #[test]
    fn the_owner_may_read_their_private_post() {
        let target = post(1, true);
        assert!(authorize(&caller(1), Action::Read, Some(&target)).is_ok());
    }

    #[test]
    fn strangers_may_not_read_a_private_post() {
        let target = post(1, true);
        let result = authorize(&caller(2), Action::Read, Some(&target));
        assert!(matches!(result, Err(DomainError::Forbidden)));
    }

    #[test]
    fn only_the_owner_may_update() {
        let target = post(1, false);
        assert!(authorize(&caller(1), Action::Update, Some(&target)).is_ok());
        let result = authorize(&caller(2), Action::Update, Some(&target));
        assert!(matches!(result, Err(DomainError::Forbidden)));
    }

    #[test]
    fn only_the_owner_may_delete() {
        let target = post(1, false);
        assert!(authorize(&caller(1), Action::Delete, Some(&target)).is_ok());
        let result = authorize(&caller(2), Action::Delete, Some(&target));
        assert!(matches!(result, Err(DomainError::Forbidden)));
    }

    #[test]
    fn a_missing_target_is_not_found_before_any_ownership_check() {
        for action in [Action::Read, Action::Update, Action::Delete] {
            let result = authorize(&caller(2), action, None);
            assert!(matches!(result, Err(DomainError::NotFound)));
        }
    }

    #[test]
    fn not_found_and_forbidden_render_distinct_messages() {
        assert_eq!(DomainError::NotFound.to_string(), "Post not found");
        assert_eq!(DomainError::Forbidden.to_string(), "Unauthorized");
        assert_eq!(DomainError::Unauthorized.to_string(), "Unauthorized");
    }
}
