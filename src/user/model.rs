use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub nickname: String,
    // Stored exactly as submitted at signup.
    pub password: String,
}

impl User {
    /// Hex form of the document id, used as `userId` everywhere else
    pub fn user_id(&self) -> String {
        self.id.to_hex()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignupRequest {
    pub nickname: String,
    pub password: String,
    pub confirm: String,
}

impl SignupRequest {
    pub const FIELDS: &'static [&'static str] = &["nickname", "password", "confirm"];
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub nickname: String,
    pub password: String,
}

impl LoginRequest {
    pub const FIELDS: &'static [&'static str] = &["nickname", "password"];
}
