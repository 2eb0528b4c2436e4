use actix_web::{HttpResponse, web};
use log::info;
use serde_json::json;

use crate::comment::model::{Comment, CommentRequest, CommentView};
use crate::comment::service::CommentService;
use crate::middleware::auth::AuthUser;
use crate::post::post_model::Post;
use crate::post::post_service::PostService;
use crate::utils::body::parse_body;
use crate::utils::error::CustomError;

const POST_FETCH_FAILED: &str = "게시글 조회에 실패하였습니다.";
const COMMENT_FETCH_FAILED: &str = "댓글 조회에 실패하였습니다.";
const COMMENT_MISSING: &str = "댓글이 존재하지 않습니다.";

/// Every comment route starts by resolving the parent post
async fn require_post(post_service: &PostService, post_id: &str) -> Result<Post, CustomError> {
    post_service
        .get_post(post_id)
        .await
        .map_err(CustomError::store(POST_FETCH_FAILED))?
        .ok_or_else(|| CustomError::NotFoundError("게시글이 존재하지 않습니다.".into()))
}

async fn require_comment(
    comment_service: &CommentService,
    comment_id: &str,
) -> Result<Comment, CustomError> {
    comment_service
        .get_comment_by_id(comment_id)
        .await
        .map_err(CustomError::store(COMMENT_FETCH_FAILED))?
        .ok_or_else(|| CustomError::NotFoundError(COMMENT_MISSING.into()))
}

fn validate_comment_body(body: &[u8]) -> Result<String, CustomError> {
    let request: CommentRequest = parse_body(body, CommentRequest::FIELDS).map_err(|_| {
        CustomError::PreconditionFailedError("데이터 형식이 올바르지 않습니다.".into())
    })?;

    if request.comment.is_empty() {
        return Err(CustomError::BadRequestError(
            "댓글 내용을 입력해주세요.".into(),
        ));
    }
    Ok(request.comment)
}

/// GET /api/posts/{post_id}/comments
pub async fn get_post_comments(
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
    comment_service: web::Data<CommentService>,
) -> Result<HttpResponse, CustomError> {
    let post = require_post(&post_service, &post_id).await?;

    let comments = comment_service
        .get_comments_for_post(&post)
        .await
        .map_err(CustomError::store(POST_FETCH_FAILED))?;

    if comments.is_empty() {
        return Err(CustomError::NotFoundError(COMMENT_MISSING.into()));
    }

    let comments: Vec<CommentView> = comments.into_iter().map(CommentView::from).collect();

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "httpStatusCode": 200,
        "comments": comments,
    })))
}

/// POST /api/posts/{post_id}/comments
pub async fn create_comment(
    user: AuthUser,
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
    comment_service: web::Data<CommentService>,
    body: web::Bytes,
) -> Result<HttpResponse, CustomError> {
    let post = require_post(&post_service, &post_id).await?;
    let content = validate_comment_body(&body)?;

    let comment = comment_service
        .add_comment(&post, &user, content)
        .await
        .map_err(CustomError::store(POST_FETCH_FAILED))?;

    info!("User {} commented {} on post {}", user.nickname, comment.id, post.id);

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "errorMessage": "댓글을 작성하였습니다.",
        "httpStatusCode": 201,
    })))
}

/// PUT /api/posts/{post_id}/comments/{comment_id}
pub async fn update_comment(
    user: AuthUser,
    path: web::Path<(String, String)>,
    post_service: web::Data<PostService>,
    comment_service: web::Data<CommentService>,
    body: web::Bytes,
) -> Result<HttpResponse, CustomError> {
    let (post_id, comment_id) = path.into_inner();
    require_post(&post_service, &post_id).await?;
    let target = require_comment(&comment_service, &comment_id).await?;

    if !user.owns(&target.user_id) {
        return Err(CustomError::ForbiddenError(
            "댓글의 수정 권한이 존재하지 않습니다.".into(),
        ));
    }

    let content = validate_comment_body(&body)?;

    let updated = comment_service
        .update_comment(&target.id, &content)
        .await
        .map_err(CustomError::store(COMMENT_FETCH_FAILED))?;

    if !updated {
        return Err(CustomError::BadRequestError(
            "댓글 수정이 정상적으로 처리되지 않았습니다.".into(),
        ));
    }

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "errorMessage": "댓글을 수정하였습니다.",
        "httpStatusCode": 200,
    })))
}

/// DELETE /api/posts/{post_id}/comments/{comment_id}
pub async fn delete_comment(
    user: AuthUser,
    path: web::Path<(String, String)>,
    post_service: web::Data<PostService>,
    comment_service: web::Data<CommentService>,
) -> Result<HttpResponse, CustomError> {
    let (post_id, comment_id) = path.into_inner();
    require_post(&post_service, &post_id).await?;
    let target = require_comment(&comment_service, &comment_id).await?;

    if !user.owns(&target.user_id) {
        return Err(CustomError::ForbiddenError(
            "댓글의 삭제 권한이 존재하지 않습니다.".into(),
        ));
    }

    let deleted = comment_service
        .delete_comment(&target.id)
        .await
        .map_err(CustomError::store(COMMENT_FETCH_FAILED))?;

    if !deleted {
        return Err(CustomError::BadRequestError(
            "댓글 삭제가 정상적으로 처리되지 않았습니다.".into(),
        ));
    }

    info!("User {} deleted comment {}", user.nickname, target.id);

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "errorMessage": "댓글을 삭제하였습니다.",
        "httpStatusCode": 200,
    })))
}
