use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub post_id: String,
    pub user_id: String,
    pub nickname: String,
    pub comment: String,
    #[serde(with = "crate::database::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::database::timestamp")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommentRequest {
    pub comment: String,
}

impl CommentRequest {
    pub const FIELDS: &'static [&'static str] = &["comment"];
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub comment_id: String,
    pub user_id: String,
    pub nickname: String,
    pub comment: String,
    #[serde(rename = "createAt")]
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        Self {
            comment_id: comment.id.to_hex(),
            user_id: comment.user_id,
            nickname: comment.nickname,
            comment: comment.comment,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}
