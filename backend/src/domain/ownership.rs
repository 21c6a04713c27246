//! Ownership checks shared by the campground and comment guards.
//!
//! A lookup result and the current principal go in; either the entity comes
//! back for the handler to use, or an [`AccessDenial`] says why not.

use super::{Campground, Comment, UserId};

/// Entities that record the user who created them.
pub trait Owned {
    /// Identifier of the owning user.
    fn owner_id(&self) -> &UserId;
}

impl Owned for Campground {
    fn owner_id(&self) -> &UserId {
        self.author().id()
    }
}

impl Owned for Comment {
    fn owner_id(&self) -> &UserId {
        self.author().id()
    }
}

/// Reason an ownership check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenial {
    /// The entity does not exist.
    NotFound,
    /// The entity exists but belongs to someone else.
    NotOwner,
}

/// Hand `entity` back when `principal` owns it.
///
/// # Examples
/// ```
/// use backend::domain::{authorize, AccessDenial, Comment};
/// use backend::domain::UserId;
///
/// let principal = UserId::random();
/// let missing: Option<Comment> = None;
/// assert_eq!(authorize(&principal, missing), Err(AccessDenial::NotFound));
/// ```
pub fn authorize<T: Owned>(principal: &UserId, entity: Option<T>) -> Result<T, AccessDenial> {
    let entity = entity.ok_or(AccessDenial::NotFound)?;
    if entity.owner_id() == principal {
        Ok(entity)
    } else {
        Err(AccessDenial::NotOwner)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{Author, CampgroundId, CommentId, CommentText, Username};
    use chrono::Utc;
    use rstest::{fixture, rstest};

    #[fixture]
    fn owner() -> UserId {
        UserId::random()
    }

    fn comment_by(author: &UserId) -> Comment {
        Comment::new(
            CommentId::random(),
            CampgroundId::random(),
            CommentText::new("Nice").expect("text"),
            Author::new(author.clone(), Username::new("colt").expect("username")),
            Utc::now(),
        )
    }

    #[rstest]
    fn owner_is_granted(owner: UserId) {
        let comment = comment_by(&owner);
        assert_eq!(authorize(&owner, Some(comment.clone())), Ok(comment));
    }

    #[rstest]
    fn other_user_is_denied(owner: UserId) {
        let stranger = UserId::random();
        assert_eq!(
            authorize(&stranger, Some(comment_by(&owner))),
            Err(AccessDenial::NotOwner)
        );
    }

    #[rstest]
    fn missing_entity_is_not_found(owner: UserId) {
        assert_eq!(
            authorize::<Comment>(&owner, None),
            Err(AccessDenial::NotFound)
        );
    }
}
