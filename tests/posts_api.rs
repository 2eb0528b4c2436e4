mod common;

use actix_web::http::StatusCode;
use actix_web::{App, test};
use chrono::{Duration, Utc};
use mongodb::bson::oid::ObjectId;
use serde_json::{Value, json};

use common::{TestBoard, broken_post_repositories};

#[actix_web::test]
async fn listing_an_empty_board_is_an_error() {
    let board = TestBoard::new();
    let app = test::init_service(App::new().configure(|cfg| board.state.configure(cfg))).await;

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "게시글 조회에 실패하였습니다.");
    assert!(body.get("errorMessage").is_none());
    assert!(body.get("posts").is_none());
}

#[actix_web::test]
async fn listing_is_newest_first_without_content() {
    let board = TestBoard::new();
    let writer = board.register("writer", "pass1").await;
    let now = Utc::now();
    board.seed_post_at(&writer, "old", now - Duration::hours(2)).await;
    board.seed_post_at(&writer, "new", now).await;
    board.seed_post_at(&writer, "mid", now - Duration::hours(1)).await;

    let app = test::init_service(App::new().configure(|cfg| board.state.configure(cfg))).await;
    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let posts = body["posts"].as_array().unwrap();
    let titles: Vec<&str> = posts.iter().map(|p| p["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["new", "mid", "old"]);

    let first = &posts[0];
    assert!(first.get("content").is_none());
    assert_eq!(first["nickname"], "writer");
    assert_eq!(first["userId"], writer.id.as_str());
    assert!(first["postId"].is_string());
    assert!(first["createAt"].is_string());
    assert!(first["updatedAt"].is_string());
}

#[actix_web::test]
async fn create_post_denormalizes_author() {
    let board = TestBoard::new();
    let writer = board.register("writer", "pass1").await;
    let app = test::init_service(App::new().configure(|cfg| board.state.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .cookie(writer.cookie())
        .set_json(json!({"title": "hello", "content": "world"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "게시글 작성에 성공하였습니다.");

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let post = &body["posts"][0];
    assert_eq!(post["title"], "hello");
    assert_eq!(post["userId"], writer.id.as_str());
    assert_eq!(post["nickname"], "writer");
}

#[actix_web::test]
async fn create_post_validation() {
    let board = TestBoard::new();
    let writer = board.register("writer", "pass1").await;
    let app = test::init_service(App::new().configure(|cfg| board.state.configure(cfg))).await;

    let cases = [
        (
            json!({"title": "hello"}),
            "message",
            "데이터 형식이 올바르지 않습니다.",
        ),
        (
            json!({"title": "", "content": "world"}),
            "errorMessage",
            "게시글 제목의 형식이 일치하지 않습니다.",
        ),
        (
            json!({"title": 42, "content": "world"}),
            "errorMessage",
            "게시글 제목의 형식이 일치하지 않습니다.",
        ),
        (
            json!({"title": "hello", "content": ""}),
            "errorMessage",
            "게시글 내용의 형식이 일치하지 않습니다.",
        ),
    ];

    for (payload, key, message) in cases {
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .cookie(writer.cookie())
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::PRECONDITION_FAILED, "payload {payload}");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body[key], message, "payload {payload}");
    }

    assert_eq!(board.post_count().await, 0);
}

#[actix_web::test]
async fn get_post_returns_full_projection() {
    let board = TestBoard::new();
    let writer = board.register("writer", "pass1").await;
    let post_id = board.seed_post(&writer, "hello").await;
    let app = test::init_service(App::new().configure(|cfg| board.state.configure(cfg))).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{post_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["post"]["postId"], post_id.as_str());
    assert_eq!(body["post"]["content"], "hello body");
}

#[actix_web::test]
async fn get_missing_or_malformed_post_is_400() {
    let board = TestBoard::new();
    let app = test::init_service(App::new().configure(|cfg| board.state.configure(cfg))).await;

    for id in [ObjectId::new().to_hex(), "not-an-id".to_string()] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "게시글 조회에 실패하였습니다.");
    }
}

#[actix_web::test]
async fn owner_updates_post() {
    let board = TestBoard::new();
    let writer = board.register("writer", "pass1").await;
    let post_id = board.seed_post(&writer, "hello").await;
    let app = test::init_service(App::new().configure(|cfg| board.state.configure(cfg))).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{post_id}"))
        .cookie(writer.cookie())
        .set_json(json!({"title": "edited", "content": "new body"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "게시글을 수정하였습니다.");

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{post_id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["post"]["title"], "edited");
    assert_eq!(body["post"]["content"], "new body");
    assert_ne!(body["post"]["updatedAt"], body["post"]["createAt"]);
}

#[actix_web::test]
async fn non_owner_cannot_update_or_delete_post() {
    let board = TestBoard::new();
    let writer = board.register("writer", "pass1").await;
    let intruder = board.register("intruder", "pass2").await;
    let post_id = board.seed_post(&writer, "hello").await;
    let app = test::init_service(App::new().configure(|cfg| board.state.configure(cfg))).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{post_id}"))
        .cookie(intruder.cookie())
        .set_json(json!({"title": "mine", "content": "now"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errorMessage"], "게시글의 수정 권한이 존재하지 않습니다.");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{post_id}"))
        .cookie(intruder.cookie())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errorMessage"], "게시글의 삭제 권한이 존재하지 않습니다.");

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{post_id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["post"]["title"], "hello");
}

#[actix_web::test]
async fn ownership_is_checked_before_body() {
    let board = TestBoard::new();
    let writer = board.register("writer", "pass1").await;
    let intruder = board.register("intruder", "pass2").await;
    let post_id = board.seed_post(&writer, "hello").await;
    let app = test::init_service(App::new().configure(|cfg| board.state.configure(cfg))).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{post_id}"))
        .cookie(intruder.cookie())
        .set_json(json!({"bogus": true}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{post_id}"))
        .cookie(writer.cookie())
        .set_json(json!({"bogus": true}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PRECONDITION_FAILED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "데이터 형식이 올바르지 않습니다.");
}

#[actix_web::test]
async fn update_or_delete_missing_post_is_404() {
    let board = TestBoard::new();
    let writer = board.register("writer", "pass1").await;
    let app = test::init_service(App::new().configure(|cfg| board.state.configure(cfg))).await;
    let missing = ObjectId::new().to_hex();

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{missing}"))
        .cookie(writer.cookie())
        .set_json(json!({"title": "t", "content": "c"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "게시글이 존재하지 않습니다.");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{missing}"))
        .cookie(writer.cookie())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "게시글이 존재하지 않습니다.");

    let req = test::TestRequest::delete()
        .uri("/api/posts/not-an-id")
        .cookie(writer.cookie())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "게시글 삭제에 실패하였습니다.");
}

#[actix_web::test]
async fn owner_deletes_post_and_comments_remain() {
    let board = TestBoard::new();
    let writer = board.register("writer", "pass1").await;
    let post_id = board.seed_post(&writer, "hello").await;
    board
        .seed_comment_at(&post_id, &writer, "first", Utc::now())
        .await;
    let app = test::init_service(App::new().configure(|cfg| board.state.configure(cfg))).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{post_id}"))
        .cookie(writer.cookie())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "게시글을 삭제하였습니다.");

    assert_eq!(board.post_count().await, 0);
    assert_eq!(board.comment_count(&post_id).await, 1);
}

#[actix_web::test]
async fn persistence_failures_become_generic_400() {
    let board = TestBoard::with_repositories(broken_post_repositories());
    let writer = board.register("writer", "pass1").await;
    let app = test::init_service(App::new().configure(|cfg| board.state.configure(cfg))).await;

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "게시글 조회에 실패하였습니다.");

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{}", ObjectId::new().to_hex()))
        .cookie(writer.cookie())
        .set_json(json!({"title": "t", "content": "c"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "게시글 수정에 실패하였습니다.");
}
