use axum::{
    body::HttpBody,
    extract::DefaultBodyLimit,
    routing::{get, post},
    BoxError, Router,
};
use bytes::Bytes;
use crate::catalog::controller::{create_book, delete_book, get_all_books, get_book, update_book};
use crate::catalog::factory::create_catalog_service;
use crate::core::controller::AppState;
use crate::core::domain::Configuration;
use crate::users::controller::sign_up;
use crate::users::factory::create_user_service;

// build_state creates the services once; every request shares them
pub async fn build_state(config: &Configuration) -> AppState {
    let catalog_service = create_catalog_service(config).await;
    let user_service = create_user_service(config).await;
    tracing::info!(store = ?config.store, storage = ?config.storage, "services ready");
    AppState::new(config.clone(), catalog_service, user_service)
}

// build_router is generic over the request body: hyper's locally, lambda_http's on lambda
pub fn build_router<B>(state: AppState) -> Router<(), B>
    where B: HttpBody + Send + 'static,
          B::Data: Into<Bytes> + Send,
          B::Error: Into<BoxError> {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/api/books", post(create_book).get(get_all_books))
        .route("/api/books/:id",
               get(get_book).patch(update_book).delete(delete_book))
        .route("/api/users/sign-up", post(sign_up))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use serde_json::Value;
    use tower::ServiceExt;
    use crate::core::domain::Configuration;
    use crate::server::{build_router, build_state};

    const BOUNDARY: &str = "bookstore-test-boundary";

    async fn app() -> Router {
        build_router(build_state(&Configuration::new("test")).await)
    }

    fn multipart_body(book: &str, images: &[(&str, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(format!(
            "--{}\r\nContent-Disposition: form-data; name=\"book\"\r\nContent-Type: application/json\r\n\r\n{}\r\n",
            BOUNDARY, book).as_bytes());
        for (name, bytes) in images {
            body.extend_from_slice(format!(
                "--{}\r\nContent-Disposition: form-data; name=\"images\"; filename=\"{}\"\r\nContent-Type: image/png\r\n\r\n",
                BOUNDARY, name).as_bytes());
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn multipart_request(method: Method, uri: &str, body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", format!("multipart/form-data; boundary={}", BOUNDARY))
            .body(Body::from(body))
            .expect("should build request")
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder().method(method).uri(uri).body(Body::empty()).expect("should build request")
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.clone().oneshot(req).await.expect("should respond");
        let status = res.status();
        let bytes = hyper::body::to_bytes(res.into_body()).await.expect("should read body");
        (status, serde_json::from_slice(&bytes).expect("should return json"))
    }

    const DUNE: &str = r#"{"title": "Dune", "author": "Herbert", "publisher": "Chilton", "price": 9900,
        "description": "desert planet", "releaseDate": "1965-08-01", "categoryList": ["NOVEL"]}"#;

    #[tokio::test]
    async fn test_should_create_then_reject_duplicate_book() {
        let app = app().await;
        let (status, json) = send(&app, multipart_request(
            Method::POST, "/api/books", multipart_body(DUNE, &[("a.png", b"png"), ("blank.png", b"")]))).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(true, json["success"]);
        assert_eq!("Book created successfully.", json["message"]);
        assert_eq!(1, json["data"]["id"]);
        assert_eq!("1965-08-01", json["data"]["release_date"]);
        assert_eq!(1, json["data"]["image_urls"].as_array().expect("urls").len());

        let (status, json) = send(&app, multipart_request(
            Method::POST, "/api/books", multipart_body(DUNE, &[]))).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!(false, json["success"]);
        assert_eq!("BOOK4001", json["code"]);
        assert_eq!(Value::Null, json["data"]);
    }

    #[tokio::test]
    async fn test_should_get_missing_book() {
        let app = app().await;
        let (status, json) = send(&app, empty_request(Method::GET, "/api/books/404")).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!("BOOK4040", json["code"]);

        let (status, json) = send(&app, empty_request(Method::DELETE, "/api/books/404")).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!("BOOK4040", json["code"]);
    }

    #[tokio::test]
    async fn test_should_serve_lambda_requests() {
        let app: Router<(), lambda_http::Body> = build_router(build_state(&Configuration::new("test")).await);
        let req = Request::builder()
            .method(Method::GET)
            .uri("/api/books/404")
            .body(lambda_http::Body::Empty)
            .expect("should build request");
        let res = app.oneshot(req).await.expect("should respond");
        assert_eq!(StatusCode::NOT_FOUND, res.status());
        let bytes = hyper::body::to_bytes(res.into_body()).await.expect("should read body");
        let json: Value = serde_json::from_slice(&bytes).expect("should return json");
        assert_eq!("BOOK4040", json["code"]);
    }

    #[tokio::test]
    async fn test_should_reject_non_numeric_id() {
        let app = app().await;
        let (status, json) = send(&app, empty_request(Method::GET, "/api/books/dune")).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("REQ4000", json["code"]);
    }

    #[tokio::test]
    async fn test_should_reject_missing_book_part() {
        let app = app().await;
        let body = format!("--{}--\r\n", BOUNDARY).into_bytes();
        let (status, json) = send(&app, multipart_request(Method::POST, "/api/books", body)).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("REQ4000", json["code"]);
    }

    #[tokio::test]
    async fn test_should_wrap_non_multipart_book_requests() {
        let app = app().await;
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/books")
            .header("content-type", "application/json")
            .body(Body::from(DUNE))
            .expect("should build request");
        let (status, json) = send(&app, req).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!(false, json["success"]);
        assert_eq!("REQ4000", json["code"]);

        let req = Request::builder()
            .method(Method::PATCH)
            .uri("/api/books/1")
            .header("content-type", "multipart/form-data")
            .body(Body::from(DUNE))
            .expect("should build request");
        let (status, json) = send(&app, req).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("REQ4000", json["code"]);
    }

    #[tokio::test]
    async fn test_should_list_update_and_delete_books() {
        let app = app().await;
        let (_, created) = send(&app, multipart_request(
            Method::POST, "/api/books", multipart_body(DUNE, &[("a.png", b"png")]))).await;
        let id = created["data"]["id"].as_i64().expect("id");

        let (status, json) = send(&app, empty_request(Method::GET, "/api/books")).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!("Books retrieved successfully.", json["message"]);
        assert_eq!(1, json["data"].as_array().expect("books").len());

        let (status, json) = send(&app, multipart_request(
            Method::PATCH, format!("/api/books/{}", id).as_str(),
            multipart_body(r#"{"price": 12000, "category_list": []}"#, &[]))).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!("Book updated successfully.", json["message"]);
        assert_eq!(12000, json["data"]["price"]);
        assert_eq!("Dune", json["data"]["title"]);
        assert_eq!(serde_json::json!(["NOVEL"]), json["data"]["category_list"]);
        assert_eq!(created["data"]["image_urls"], json["data"]["image_urls"]);

        let (status, json) = send(&app, multipart_request(
            Method::PATCH, format!("/api/books/{}", id).as_str(),
            multipart_body("{}", &[("b.png", b"new")]))).await;
        assert_eq!(StatusCode::OK, status);
        assert_ne!(created["data"]["image_urls"], json["data"]["image_urls"]);

        let (status, json) = send(&app, empty_request(Method::GET, format!("/api/books/{}", id).as_str())).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!("Book retrieved successfully.", json["message"]);

        let (status, json) = send(&app, empty_request(Method::DELETE, format!("/api/books/{}", id).as_str())).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!("Book deleted successfully.", json["message"]);
        assert_eq!(Value::Null, json["data"]);

        let (status, _) = send(&app, empty_request(Method::GET, format!("/api/books/{}", id).as_str())).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
    }

    #[tokio::test]
    async fn test_should_sign_up_without_leaking_secrets() {
        let app = app().await;
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/users/sign-up")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"username": "alice", "password": "s3cret!", "refresh_token": "leak"}"#))
            .expect("should build request");
        let (status, json) = send(&app, req).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!("Sign-up completed successfully.", json["message"]);
        assert_eq!("alice", json["data"]["username"]);
        assert_eq!("USER", json["data"]["role"]);
        let text = json.to_string();
        assert!(!text.contains("password"));
        assert!(!text.contains("refresh_token"));
        assert!(!text.contains("s3cret!"));
        assert!(!text.contains("leak"));
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_and_malformed_sign_up() {
        let app = app().await;
        let sign_up = |body: &'static str| Request::builder()
            .method(Method::POST)
            .uri("/api/users/sign-up")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .expect("should build request");
        let (status, _) = send(&app, sign_up(r#"{"username": "bob", "password": "pw"}"#)).await;
        assert_eq!(StatusCode::OK, status);
        let (status, json) = send(&app, sign_up(r#"{"username": "bob", "password": "pw"}"#)).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("USER4001", json["code"]);
        let (status, json) = send(&app, sign_up(r#"{"username": "bob""#)).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("REQ4000", json["code"]);
    }
}
