/// Data models for the blog service
///
/// Row types map directly onto the database schema; the `*WithAuthor`
/// variants are join projections used by list/detail responses so callers
/// see usernames instead of bare author ids.
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A named category referenced by zero or more posts.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Group {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub group_id: Option<Uuid>,
    pub text: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post joined with its author's username
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PostWithAuthor {
    pub id: Uuid,
    #[serde(rename = "author")]
    pub author_username: String,
    #[serde(rename = "group")]
    pub group_id: Option<Uuid>,
    pub text: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment joined with its author's username
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommentWithAuthor {
    pub id: Uuid,
    #[serde(rename = "post")]
    pub post_id: Uuid,
    #[serde(rename = "author")]
    pub author_username: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Follow edge joined with both endpoint usernames.
/// `user` follows `following`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FollowEdge {
    #[serde(rename = "user")]
    pub user_username: String,
    #[serde(rename = "following")]
    pub following_username: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_with_author_serializes_usernames() {
        let post = PostWithAuthor {
            id: Uuid::new_v4(),
            author_username: "alice".into(),
            group_id: None,
            text: "hello".into(),
            image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["author"], "alice");
        assert!(json["group"].is_null());
        assert_eq!(json["text"], "hello");
    }

    #[test]
    fn test_follow_edge_serialization() {
        let edge = FollowEdge {
            user_username: "bob".into(),
            following_username: "alice".into(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&edge).unwrap();
        assert_eq!(json["user"], "bob");
        assert_eq!(json["following"], "alice");
    }
}
