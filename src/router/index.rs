use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;

use crate::comment::index::comment_routes;
use crate::comment::service::CommentService;
use crate::config::AuthConfig;
use crate::database::Repositories;
use crate::middleware::not_found::not_found;
use crate::post::post_index::post_routes;
use crate::post::post_service::PostService;
use crate::user::index::user_routes;
use crate::user::service::UserService;

#[get("/")]
async fn default() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Welcome to the community board API",
        "httpStatusCode": StatusCode::OK.as_u16(),
        "service": std::env::var("SERVICE_NAME").unwrap_or_else(|_| "community-board".to_string()),
    }))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(default).service(
        web::scope("/api")
            .configure(user_routes)
            .configure(post_routes)
            .configure(comment_routes),
    );
}

/// Services built once and cloned into every worker's `App`.
#[derive(Clone)]
pub struct AppState {
    pub auth: web::Data<AuthConfig>,
    pub users: web::Data<UserService>,
    pub posts: web::Data<PostService>,
    pub comments: web::Data<CommentService>,
}

impl AppState {
    pub fn new(repositories: Repositories, auth: AuthConfig) -> Self {
        AppState {
            auth: web::Data::new(auth),
            users: web::Data::new(UserService::new(repositories.users)),
            posts: web::Data::new(PostService::new(repositories.posts)),
            comments: web::Data::new(CommentService::new(repositories.comments)),
        }
    }

    /// Register shared services, every route, and the JSON 404 fallback
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.auth.clone())
            .app_data(self.users.clone())
            .app_data(self.posts.clone())
            .app_data(self.comments.clone())
            .configure(routes)
            .default_service(web::to(not_found));
    }
}
