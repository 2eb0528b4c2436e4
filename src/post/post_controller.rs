use actix_web::{HttpResponse, web};
use log::info;
use serde_json::json;

use crate::middleware::auth::AuthUser;
use crate::post::post_model::{PostDetail, PostRequest, PostSummary};
use crate::post::post_service::PostService;
use crate::utils::body::{BodyError, parse_body};
use crate::utils::error::CustomError;

const FETCH_FAILED: &str = "게시글 조회에 실패하였습니다.";
const UPDATE_FAILED: &str = "게시글 수정에 실패하였습니다.";
const DELETE_FAILED: &str = "게시글 삭제에 실패하였습니다.";
const CREATE_FAILED: &str = "게시글 작성에 실패하였습니다.";
const POST_MISSING: &str = "게시글이 존재하지 않습니다.";

/// Title is checked before content; both must be non-empty strings.
/// A missing or extra key is reported under `message`, field errors under `errorMessage`.
fn validate_post_body(body: &[u8]) -> Result<PostRequest, CustomError> {
    let title_error =
        || CustomError::PreconditionFailedError("게시글 제목의 형식이 일치하지 않습니다.".into());
    let content_error =
        || CustomError::PreconditionFailedError("게시글 내용의 형식이 일치하지 않습니다.".into());

    let request: PostRequest = parse_body(body, PostRequest::FIELDS).map_err(|e| match e {
        BodyError::Shape => {
            CustomError::PreconditionFailedError("데이터 형식이 올바르지 않습니다.".into())
                .notice()
        }
        BodyError::Type("title") => title_error(),
        BodyError::Type(_) => content_error(),
    })?;

    if request.title.is_empty() {
        return Err(title_error());
    }
    if request.content.is_empty() {
        return Err(content_error());
    }
    Ok(request)
}

/// GET /api/posts
pub async fn list_posts(post_service: web::Data<PostService>) -> Result<HttpResponse, CustomError> {
    let posts = post_service
        .list_posts()
        .await
        .map_err(CustomError::store_notice(FETCH_FAILED))?;

    // An empty board is reported as a failure, not as an empty list.
    if posts.is_empty() {
        return Err(CustomError::BadRequestError(FETCH_FAILED.into()).notice());
    }

    let posts: Vec<PostSummary> = posts.into_iter().map(PostSummary::from).collect();

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "httpStatusCode": 200,
        "posts": posts,
    })))
}

/// POST /api/posts
pub async fn create_post(
    user: AuthUser,
    post_service: web::Data<PostService>,
    body: web::Bytes,
) -> Result<HttpResponse, CustomError> {
    let request = validate_post_body(&body)?;

    let post = post_service
        .create_post(&user, request)
        .await
        .map_err(CustomError::store_notice(CREATE_FAILED))?;

    info!("User {} created post {}", user.nickname, post.id);

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "게시글 작성에 성공하였습니다.",
        "httpStatusCode": 201,
    })))
}

/// GET /api/posts/{post_id}
pub async fn get_post(
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, CustomError> {
    let post = post_service
        .get_post(&post_id)
        .await
        .map_err(CustomError::store_notice(FETCH_FAILED))?
        .ok_or_else(|| CustomError::BadRequestError(FETCH_FAILED.into()).notice())?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "httpStatusCode": 200,
        "post": PostDetail::from(post),
    })))
}

/// PUT /api/posts/{post_id}
pub async fn update_post(
    user: AuthUser,
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
    body: web::Bytes,
) -> Result<HttpResponse, CustomError> {
    let post = post_service
        .get_post(&post_id)
        .await
        .map_err(CustomError::store_notice(UPDATE_FAILED))?
        .ok_or_else(|| CustomError::NotFoundError(POST_MISSING.into()).notice())?;

    if !user.owns(&post.user_id) {
        return Err(CustomError::ForbiddenError(
            "게시글의 수정 권한이 존재하지 않습니다.".into(),
        ));
    }

    let request = validate_post_body(&body)?;

    let updated = post_service
        .update_post(&post.id, request)
        .await
        .map_err(CustomError::store_notice(UPDATE_FAILED))?;

    if !updated {
        return Err(CustomError::UnauthorizedError(
            "게시글이 정상적으로 수정되지 않았습니다.".into(),
        ));
    }

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "게시글을 수정하였습니다.",
        "httpStatusCode": 200,
    })))
}

/// DELETE /api/posts/{post_id}
pub async fn delete_post(
    user: AuthUser,
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, CustomError> {
    let post = post_service
        .get_post(&post_id)
        .await
        .map_err(CustomError::store_notice(DELETE_FAILED))?
        .ok_or_else(|| CustomError::NotFoundError(POST_MISSING.into()).notice())?;

    if !user.owns(&post.user_id) {
        return Err(CustomError::ForbiddenError(
            "게시글의 삭제 권한이 존재하지 않습니다.".into(),
        ));
    }

    let deleted = post_service
        .delete_post(&post.id)
        .await
        .map_err(CustomError::store_notice(DELETE_FAILED))?;

    if !deleted {
        return Err(CustomError::UnauthorizedError(
            "게시글이 정상적으로 삭제되지 않았습니다.".into(),
        ));
    }

    info!("User {} deleted post {}", user.nickname, post.id);

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "게시글을 삭제하였습니다.",
        "httpStatusCode": 200,
    })))
}
