use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use log::{info, warn};
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};

use crate::comment::model::Comment;
use crate::database::repository::{CommentRepository, PostRepository, StoreError, UserRepository};
use crate::database::timestamp;
use crate::post::post_model::Post;
use crate::user::model::User;

/// MongoDB-backed store holding the three board collections.
#[derive(Clone)]
pub struct MongoStore {
    users: Collection<User>,
    posts: Collection<Post>,
    comments: Collection<Comment>,
}

impl MongoStore {
    pub fn new(client: &Client, database: &str) -> Self {
        let db = client.database(database);
        MongoStore {
            users: db.collection::<User>("users"),
            posts: db.collection::<Post>("posts"),
            comments: db.collection::<Comment>("comments"),
        }
    }

    /// Create the unique nickname index. Failure is logged, not fatal.
    pub async fn ensure_indexes(&self) {
        let index = IndexModel::builder()
            .keys(doc! { "nickname": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match self.users.create_index(index).await {
            Ok(_) => info!("Ensured unique index on users.nickname"),
            Err(e) => warn!("Could not create users.nickname index: {}", e),
        }
    }
}

#[async_trait]
impl UserRepository for MongoStore {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, StoreError> {
        Ok(self.users.find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.find_one(doc! { "nickname": nickname }).await?)
    }

    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        match self.users.insert_one(user).await {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_key(&e) => Err(StoreError::Duplicate(user.nickname.clone())),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl PostRepository for MongoStore {
    async fn find_all(&self) -> Result<Vec<Post>, StoreError> {
        let cursor = self.posts.find(doc! {}).await?;
        let posts: Vec<Post> = cursor.try_collect().await?;
        Ok(posts)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.find_one(doc! { "_id": id }).await?)
    }

    async fn insert(&self, post: &Post) -> Result<(), StoreError> {
        self.posts.insert_one(post).await?;
        Ok(())
    }

    async fn update(
        &self,
        id: &ObjectId,
        title: &str,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let result = self
            .posts
            .update_one(
                doc! { "_id": id },
                doc! {
                    "$set": {
                        "title": title,
                        "content": content,
                        "updatedAt": timestamp::to_bson(&updated_at)
                    }
                },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, StoreError> {
        let result = self.posts.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl CommentRepository for MongoStore {
    async fn find_by_post(&self, post_id: &str) -> Result<Vec<Comment>, StoreError> {
        let cursor = self.comments.find(doc! { "postId": post_id }).await?;
        let comments: Vec<Comment> = cursor.try_collect().await?;
        Ok(comments)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Comment>, StoreError> {
        Ok(self.comments.find_one(doc! { "_id": id }).await?)
    }

    async fn insert(&self, comment: &Comment) -> Result<(), StoreError> {
        self.comments.insert_one(comment).await?;
        Ok(())
    }

    async fn update(
        &self,
        id: &ObjectId,
        comment: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let result = self
            .comments
            .update_one(
                doc! { "_id": id },
                doc! {
                    "$set": {
                        "comment": comment,
                        "updatedAt": timestamp::to_bson(&updated_at)
                    }
                },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, StoreError> {
        let result = self.comments.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

/// E11000, raised by the unique nickname index
fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        *error.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref e)) if e.code == 11000
    )
}
