use super::controller::{create_comment, delete_comment, get_post_comments, update_comment};
use actix_web::web;

pub fn comment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/posts/{post_id}/comments")
            .route(web::get().to(get_post_comments))
            .route(web::post().to(create_comment)),
    )
    .service(
        web::resource("/posts/{post_id}/comments/{comment_id}")
            .route(web::put().to(update_comment))
            .route(web::delete().to(delete_comment)),
    );
}
