use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

use crate::comment::model::Comment;
use crate::post::post_model::Post;
use crate::user::model::User;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid document id: {0}")]
    InvalidId(String),

    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("duplicate key: {0}")]
    Duplicate(String),
}

/// Parse a hex document id, as used in paths and token claims
pub fn parse_object_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, StoreError>;

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, StoreError>;

    async fn insert(&self, user: &User) -> Result<(), StoreError>;
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, in no particular order.
    async fn find_all(&self) -> Result<Vec<Post>, StoreError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Post>, StoreError>;

    async fn insert(&self, post: &Post) -> Result<(), StoreError>;

    /// Returns whether a document matched.
    async fn update(
        &self,
        id: &ObjectId,
        title: &str,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, StoreError>;

    /// Returns whether a document was removed.
    async fn delete(&self, id: &ObjectId) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comments attached to `post_id`, in no particular order.
    async fn find_by_post(&self, post_id: &str) -> Result<Vec<Comment>, StoreError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Comment>, StoreError>;

    async fn insert(&self, comment: &Comment) -> Result<(), StoreError>;

    async fn update(
        &self,
        id: &ObjectId,
        comment: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, StoreError>;

    async fn delete(&self, id: &ObjectId) -> Result<bool, StoreError>;
}
