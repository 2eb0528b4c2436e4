use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: String,
    pub nickname: String,
    pub title: String,
    pub content: String,
    #[serde(with = "crate::database::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::database::timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Body of both post creation and post update.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostRequest {
    pub title: String,
    pub content: String,
}

impl PostRequest {
    pub const FIELDS: &'static [&'static str] = &["title", "content"];
}

/// List entry; the body is left out.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub post_id: String,
    pub user_id: String,
    pub nickname: String,
    pub title: String,
    #[serde(rename = "createAt")]
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    pub post_id: String,
    pub user_id: String,
    pub nickname: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "createAt")]
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostSummary {
    fn from(post: Post) -> Self {
        Self {
            post_id: post.id.to_hex(),
            user_id: post.user_id,
            nickname: post.nickname,
            title: post.title,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl From<Post> for PostDetail {
    fn from(post: Post) -> Self {
        Self {
            post_id: post.id.to_hex(),
            user_id: post.user_id,
            nickname: post.nickname,
            title: post.title,
            content: post.content,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}
