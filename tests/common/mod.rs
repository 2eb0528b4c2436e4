#![allow(dead_code)]

use std::sync::Arc;

use actix_web::cookie::Cookie;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;

use community_board::AppState;
use community_board::comment::model::Comment;
use community_board::config::AuthConfig;
use community_board::database::{
    CommentRepository, MemoryStore, PostRepository, Repositories, StoreError, UserRepository,
};
use community_board::middleware::auth::{AUTH_COOKIE, create_token};
use community_board::post::post_model::Post;
use community_board::user::model::User;

pub struct TestUser {
    pub id: String,
    pub nickname: String,
    pub token: String,
}

impl TestUser {
    pub fn cookie(&self) -> Cookie<'static> {
        bearer_cookie(&self.token)
    }
}

pub fn bearer_cookie(token: &str) -> Cookie<'static> {
    Cookie::new(AUTH_COOKIE, format!("Bearer {token}"))
}

/// A board wired to the in-memory store, with helpers to seed documents directly.
pub struct TestBoard {
    pub state: AppState,
    pub auth: AuthConfig,
    pub repositories: Repositories,
}

impl TestBoard {
    pub fn new() -> Self {
        Self::with_repositories(Repositories::memory())
    }

    pub fn with_repositories(repositories: Repositories) -> Self {
        let auth = AuthConfig {
            jwt_secret: "integration-secret".into(),
            token_ttl_seconds: 3600,
        };
        TestBoard {
            state: AppState::new(repositories.clone(), auth.clone()),
            auth,
            repositories,
        }
    }

    pub async fn register(&self, nickname: &str, password: &str) -> TestUser {
        let user = User {
            id: ObjectId::new(),
            nickname: nickname.into(),
            password: password.into(),
        };
        self.repositories.users.insert(&user).await.unwrap();

        let id = user.user_id();
        TestUser {
            token: create_token(&id, &self.auth).unwrap(),
            id,
            nickname: nickname.into(),
        }
    }

    pub async fn seed_post(&self, author: &TestUser, title: &str) -> String {
        self.seed_post_at(author, title, Utc::now()).await
    }

    pub async fn seed_post_at(
        &self,
        author: &TestUser,
        title: &str,
        created_at: DateTime<Utc>,
    ) -> String {
        let post = Post {
            id: ObjectId::new(),
            user_id: author.id.clone(),
            nickname: author.nickname.clone(),
            title: title.into(),
            content: format!("{title} body"),
            created_at,
            updated_at: created_at,
        };
        self.repositories.posts.insert(&post).await.unwrap();
        post.id.to_hex()
    }

    pub async fn seed_comment_at(
        &self,
        post_id: &str,
        author: &TestUser,
        text: &str,
        created_at: DateTime<Utc>,
    ) -> String {
        let comment = Comment {
            id: ObjectId::new(),
            post_id: post_id.into(),
            user_id: author.id.clone(),
            nickname: author.nickname.clone(),
            comment: text.into(),
            created_at,
            updated_at: created_at,
        };
        self.repositories.comments.insert(&comment).await.unwrap();
        comment.id.to_hex()
    }

    pub async fn post_count(&self) -> usize {
        self.repositories.posts.find_all().await.unwrap().len()
    }

    pub async fn comment_count(&self, post_id: &str) -> usize {
        self.repositories
            .comments
            .find_by_post(post_id)
            .await
            .unwrap()
            .len()
    }
}

/// Post collection whose every call fails, for exercising the generic 400 path.
pub struct BrokenPosts;

#[async_trait]
impl PostRepository for BrokenPosts {
    async fn find_all(&self) -> Result<Vec<Post>, StoreError> {
        Err(StoreError::Unavailable("connection reset".into()))
    }

    async fn find_by_id(&self, _id: &ObjectId) -> Result<Option<Post>, StoreError> {
        Err(StoreError::Unavailable("connection reset".into()))
    }

    async fn insert(&self, _post: &Post) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection reset".into()))
    }

    async fn update(
        &self,
        _id: &ObjectId,
        _title: &str,
        _content: &str,
        _updated_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection reset".into()))
    }

    async fn delete(&self, _id: &ObjectId) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection reset".into()))
    }
}

pub fn broken_post_repositories() -> Repositories {
    let store = Arc::new(MemoryStore::new());
    Repositories {
        users: store.clone(),
        posts: Arc::new(BrokenPosts),
        comments: store,
    }
}
