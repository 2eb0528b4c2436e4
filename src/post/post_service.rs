use std::sync::Arc;

use chrono::Utc;
use mongodb::bson::oid::ObjectId;

use crate::database::repository::parse_object_id;
use crate::database::{PostRepository, StoreError};
use crate::middleware::auth::AuthUser;
use crate::post::post_model::{Post, PostRequest};

pub struct PostService {
    posts: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        PostService { posts }
    }

    /// All posts, newest first
    pub async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let mut posts = self.posts.find_all().await?;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    pub async fn get_post(&self, id: &str) -> Result<Option<Post>, StoreError> {
        let object_id = parse_object_id(id)?;
        self.posts.find_by_id(&object_id).await
    }

    pub async fn create_post(
        &self,
        author: &AuthUser,
        request: PostRequest,
    ) -> Result<Post, StoreError> {
        let now = Utc::now();
        let post = Post {
            id: ObjectId::new(),
            user_id: author.user_id.clone(),
            nickname: author.nickname.clone(),
            title: request.title,
            content: request.content,
            created_at: now,
            updated_at: now,
        };

        self.posts.insert(&post).await?;
        Ok(post)
    }

    /// Returns false if the post vanished before the write
    pub async fn update_post(&self, id: &ObjectId, request: PostRequest) -> Result<bool, StoreError> {
        self.posts
            .update(id, &request.title, &request.content, Utc::now())
            .await
    }

    pub async fn delete_post(&self, id: &ObjectId) -> Result<bool, StoreError> {
        self.posts.delete(id).await
    }
}
