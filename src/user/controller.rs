use actix_web::cookie::Cookie;
use actix_web::{HttpResponse, web};
use log::info;
use serde_json::json;

use crate::config::AuthConfig;
use crate::middleware::auth::{AUTH_COOKIE, create_token};
use crate::user::model::{LoginRequest, SignupRequest};
use crate::user::service::UserService;
use crate::utils::body::{BodyError, parse_body};
use crate::utils::error::CustomError;

const INVALID_REQUEST: &str = "요청한 데이터 형식이 올바르지 않습니다.";

/// POST /api/signup
pub async fn signup(
    user_service: web::Data<UserService>,
    body: web::Bytes,
) -> Result<HttpResponse, CustomError> {
    let request: SignupRequest = parse_body(&body, SignupRequest::FIELDS)
        .map_err(|_| CustomError::BadRequestError(INVALID_REQUEST.into()))?;

    user_service.create_user(request).await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "회원가입에 성공하였습니다.",
        "httpStatusCode": 201,
    })))
}

/// POST /api/login
pub async fn login(
    user_service: web::Data<UserService>,
    auth_config: web::Data<AuthConfig>,
    body: web::Bytes,
) -> Result<HttpResponse, CustomError> {
    let request: LoginRequest =
        parse_body(&body, LoginRequest::FIELDS).map_err(|e| match e {
            BodyError::Shape => CustomError::BadRequestError("로그인에 실패하였습니다.".into()),
            BodyError::Type(_) => CustomError::BadRequestError(INVALID_REQUEST.into()),
        })?;

    let user = user_service.authenticate_user(&request).await?;
    let token = create_token(&user.user_id(), &auth_config)?;

    info!("User {} logged in", user.nickname);

    let cookie = Cookie::build(AUTH_COOKIE, format!("Bearer {token}"))
        .path("/")
        .finish();

    Ok(HttpResponse::Ok().cookie(cookie).json(json!({
        "success": true,
        "httpStatusCode": 200,
        "token": token,
    })))
}
