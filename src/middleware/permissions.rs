/// Ownership-based permission checks for posts and comments.
/// Only the author of an object may modify or delete it; reads are never
/// ownership-checked.
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Comment, Post};

/// Check if a user owns a post
pub fn check_post_ownership(user_id: Uuid, post: &Post) -> Result<()> {
    if post.author_id == user_id {
        Ok(())
    } else {
        Err(AppError::Authorization(
            "You don't have permission to modify this post".to_string(),
        ))
    }
}

/// Check if a user owns a comment
pub fn check_comment_ownership(user_id: Uuid, comment: &Comment) -> Result<()> {
    if comment.author_id == user_id {
        Ok(())
    } else {
        Err(AppError::Authorization(
            "You don't have permission to modify this comment".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post_by(author_id: Uuid) -> Post {
        Post {
            id: Uuid::new_v4(),
            author_id,
            group_id: None,
            text: "text".into(),
            image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn comment_by(author_id: Uuid) -> Comment {
        Comment {
            id: Uuid::new_v4(),
            post_id: Uuid::new_v4(),
            author_id,
            text: "text".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_author_can_modify_post() {
        let author = Uuid::new_v4();
        assert!(check_post_ownership(author, &post_by(author)).is_ok());
    }

    #[test]
    fn test_non_author_is_forbidden() {
        let post = post_by(Uuid::new_v4());
        let err = check_post_ownership(Uuid::new_v4(), &post).unwrap_err();
        assert!(matches!(err, AppError::Authorization(_)));
    }

    #[test]
    fn test_comment_ownership() {
        let author = Uuid::new_v4();
        let comment = comment_by(author);
        assert!(check_comment_ownership(author, &comment).is_ok());
        assert!(check_comment_ownership(Uuid::new_v4(), &comment).is_err());
    }
}
