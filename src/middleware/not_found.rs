use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde_json::json;

/// Fallback for requests that match no route.
pub async fn not_found() -> HttpResponse {
    HttpResponse::build(StatusCode::NOT_FOUND).json(json!({
        "success": false,
        "errorMessage": "Route does not exist",
        "httpStatusCode": StatusCode::NOT_FOUND.as_u16(),
    }))
}
