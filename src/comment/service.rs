use std::sync::Arc;

use chrono::Utc;
use mongodb::bson::oid::ObjectId;

use crate::comment::model::Comment;
use crate::database::repository::parse_object_id;
use crate::database::{CommentRepository, StoreError};
use crate::middleware::auth::AuthUser;
use crate::post::post_model::Post;

pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>) -> Self {
        CommentService { comments }
    }

    /// Comments on a post, newest first
    pub async fn get_comments_for_post(&self, post: &Post) -> Result<Vec<Comment>, StoreError> {
        let mut comments = self.comments.find_by_post(&post.id.to_hex()).await?;
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }

    /// Look a comment up by id alone; the post in the path is not consulted
    pub async fn get_comment_by_id(&self, comment_id: &str) -> Result<Option<Comment>, StoreError> {
        let object_id = parse_object_id(comment_id)?;
        self.comments.find_by_id(&object_id).await
    }

    pub async fn add_comment(
        &self,
        post: &Post,
        author: &AuthUser,
        content: String,
    ) -> Result<Comment, StoreError> {
        let now = Utc::now();
        let comment = Comment {
            id: ObjectId::new(),
            post_id: post.id.to_hex(),
            user_id: author.user_id.clone(),
            nickname: author.nickname.clone(),
            comment: content,
            created_at: now,
            updated_at: now,
        };

        self.comments.insert(&comment).await?;
        Ok(comment)
    }

    pub async fn update_comment(&self, id: &ObjectId, content: &str) -> Result<bool, StoreError> {
        self.comments.update(id, content, Utc::now()).await
    }

    pub async fn delete_comment(&self, id: &ObjectId) -> Result<bool, StoreError> {
        self.comments.delete(id).await
    }
}
