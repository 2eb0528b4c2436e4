use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::http::header::HeaderValue;
use actix_web::{FromRequest, HttpRequest, web};
use actix_web_httpauth::headers::authorization::{Bearer, Scheme};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::user::service::UserService;
use crate::utils::error::CustomError;

/// Name of the cookie carrying `Bearer <token>`.
pub const AUTH_COOKIE: &str = "Authorization";

const LOGIN_REQUIRED: &str = "로그인이 필요한 기능입니다.";
const COOKIE_ERROR: &str = "전달된 쿠키에서 오류가 발생하였습니다.";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub exp: usize,
}

/// Sign a token for `user_id` that expires after the configured lifetime
pub fn create_token(user_id: &str, config: &AuthConfig) -> Result<String, CustomError> {
    let expiration = chrono::Duration::try_seconds(config.token_ttl_seconds)
        .and_then(|ttl| chrono::Utc::now().checked_add_signed(ttl))
        .ok_or_else(|| {
            error!("Token lifetime of {}s is out of range", config.token_ttl_seconds);
            CustomError::InternalServerError("Token expiry out of range".into())
        })?
        .timestamp() as usize;

    let claims = Claims {
        user_id: user_id.to_owned(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| {
        error!("Token generation failed: {}", e);
        CustomError::InternalServerError("Token generation failed".into())
    })
}

/// Check signature and expiry, returning the embedded claims
pub fn decode_token(
    token: &str,
    config: &AuthConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}

/// Extract the token from a `Bearer <token>` credential.
///
/// `Bearer ` with an empty token is no credential at all, while a bare `Bearer`
/// yields an empty token that later fails verification.
pub fn bearer_token(credential: &str) -> Option<String> {
    if credential == "Bearer" {
        return Some(String::new());
    }

    let header = HeaderValue::from_str(credential).ok()?;
    let bearer = Bearer::parse(&header).ok()?;
    let token = bearer.token().trim();

    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

/// The authenticated caller, resolved from the `Authorization` cookie.
///
/// Taking this as the first handler argument rejects the request with 403
/// before any handler code runs.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub nickname: String,
}

impl AuthUser {
    pub fn owns(&self, owner_id: &str) -> bool {
        self.user_id == owner_id
    }
}

impl FromRequest for AuthUser {
    type Error = CustomError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let credential = req.cookie(AUTH_COOKIE).map(|c| c.value().to_string());
        let config = req.app_data::<web::Data<AuthConfig>>().cloned();
        let users = req.app_data::<web::Data<UserService>>().cloned();

        Box::pin(async move {
            let (Some(config), Some(users)) = (config, users) else {
                error!("Authentication gate is missing its app data");
                return Err(CustomError::InternalServerError(
                    "Authentication is not configured".into(),
                ));
            };

            let token = credential
                .as_deref()
                .and_then(bearer_token)
                .ok_or_else(|| CustomError::ForbiddenError(LOGIN_REQUIRED.into()))?;

            let claims = decode_token(&token, &config).map_err(|e| {
                debug!("Rejected token: {}", e);
                CustomError::ForbiddenError(COOKIE_ERROR.into())
            })?;

            let user = users
                .find_by_user_id(&claims.user_id)
                .await
                .map_err(|e| {
                    warn!("Could not resolve token user {}: {}", claims.user_id, e);
                    CustomError::ForbiddenError(COOKIE_ERROR.into())
                })?
                .ok_or_else(|| {
                    warn!("Token refers to unknown user {}", claims.user_id);
                    CustomError::ForbiddenError(COOKIE_ERROR.into())
                })?;

            Ok(AuthUser {
                user_id: user.user_id(),
                nickname: user.nickname,
            })
        })
    }
}
