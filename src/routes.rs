use std::path::Path;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::{
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

/// Builds the static-file router shared by both servers.
///
/// `/` serves `doc_root/client_page`; everything else is looked up under
/// `doc_root` with MIME inference, range and conditional-request handling
/// delegated to tower-http. The three CORS headers are stamped onto every
/// response, error responses included, so the client page can be loaded from
/// one address while talking to another.
pub fn router(doc_root: &Path, client_page: &str) -> Router {
    Router::new()
        .route_service("/", ServeFile::new(doc_root.join(client_page)))
        .fallback_service(ServeDir::new(doc_root).append_index_html_on_directories(false))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("access-control-allow-origin"),
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("access-control-allow-methods"),
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("access-control-allow-headers"),
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, Response, StatusCode};
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    const PAGE: &str = "walkie-talkie-improved.html";
    const PAGE_HTML: &str = "<!DOCTYPE html><html><body>walkie</body></html>";

    fn doc_root() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PAGE), PAGE_HTML).unwrap();
        fs::write(dir.path().join("notes.txt"), "push to talk").unwrap();
        dir
    }

    async fn get(dir: &TempDir, uri: &str) -> Response<Body> {
        router(dir.path(), PAGE)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    fn assert_cors_headers(response: &Response<Body>) {
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-methods"], "GET, POST, OPTIONS");
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    }

    #[tokio::test]
    async fn root_serves_the_client_page() {
        let dir = doc_root();
        let response = get(&dir, "/").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert_cors_headers(&response);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body.as_ref(), PAGE_HTML.as_bytes());
    }

    #[tokio::test]
    async fn root_matches_an_explicit_page_request() {
        let dir = doc_root();
        let root = get(&dir, "/").await;
        let explicit = get(&dir, &format!("/{PAGE}")).await;

        assert_eq!(root.status(), StatusCode::OK);
        assert_eq!(explicit.status(), StatusCode::OK);
        let root_body = axum::body::to_bytes(root.into_body(), usize::MAX)
            .await
            .unwrap();
        let explicit_body = axum::body::to_bytes(explicit.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(root_body, explicit_body);
    }

    #[tokio::test]
    async fn existing_file_is_served_with_its_content_type() {
        let dir = doc_root();
        let response = get(&dir, "/notes.txt").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body.as_ref(), b"push to talk");
    }

    #[tokio::test]
    async fn not_found_still_carries_cors_headers() {
        let dir = doc_root();
        let response = get(&dir, "/no-such-file.js").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_cors_headers(&response);
    }
}
