use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::comment::model::Comment;
use crate::database::repository::{CommentRepository, PostRepository, StoreError, UserRepository};
use crate::post::post_model::Post;
use crate::user::model::User;

/// Process-local store with the same semantics as the MongoDB collections.
/// Used by the test suite and for running without a database.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    posts: RwLock<Vec<Post>>,
    comments: RwLock<Vec<Comment>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.nickname == nickname)
            .cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.nickname == user.nickname) {
            return Err(StoreError::Duplicate(user.nickname.clone()));
        }
        users.push(user.clone());
        Ok(())
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.posts.read().await.clone())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.read().await.iter().find(|p| p.id == *id).cloned())
    }

    async fn insert(&self, post: &Post) -> Result<(), StoreError> {
        self.posts.write().await.push(post.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: &ObjectId,
        title: &str,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let mut posts = self.posts.write().await;
        match posts.iter_mut().find(|p| p.id == *id) {
            Some(post) => {
                post.title = title.to_string();
                post.content = content.to_string();
                post.updated_at = updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, StoreError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != *id);
        Ok(posts.len() < before)
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_post(&self, post_id: &str) -> Result<Vec<Comment>, StoreError> {
        Ok(self
            .comments
            .read()
            .await
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Comment>, StoreError> {
        Ok(self
            .comments
            .read()
            .await
            .iter()
            .find(|c| c.id == *id)
            .cloned())
    }

    async fn insert(&self, comment: &Comment) -> Result<(), StoreError> {
        self.comments.write().await.push(comment.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: &ObjectId,
        comment: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let mut comments = self.comments.write().await;
        match comments.iter_mut().find(|c| c.id == *id) {
            Some(existing) => {
                existing.comment = comment.to_string();
                existing.updated_at = updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, StoreError> {
        let mut comments = self.comments.write().await;
        let before = comments.len();
        comments.retain(|c| c.id != *id);
        Ok(comments.len() < before)
    }
}
