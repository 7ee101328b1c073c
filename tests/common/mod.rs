//! Test utilities and helper functions for the pagebundle test suite

use mockito::{Mock, Server, ServerGuard};

/// Starts a mock HTTP server for one test
#[allow(dead_code)]
pub async fn setup_mock_server() -> ServerGuard {
    Server::new_async().await
}

/// Wraps `body` in a minimal HTML document with `head` in its `<head>`
#[allow(dead_code)]
pub fn create_test_html(head: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Test Page</title>
    {head}
</head>
<body>
    {body}
</body>
</html>"#
    )
}

/// Creates a mock endpoint that returns HTML content
#[allow(dead_code)]
pub async fn create_html_mock(server: &mut Server, path: &str, html: &str) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(html)
        .create_async()
        .await
}

/// Creates a mock endpoint that serves a resource with the given content type
#[allow(dead_code)]
pub async fn create_asset_mock(
    server: &mut Server,
    path: &str,
    content_type: &str,
    body: impl AsRef<[u8]>,
) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", content_type)
        .with_body(body)
        .create_async()
        .await
}

/// Creates a mock endpoint that returns a redirect
#[allow(dead_code)]
pub async fn create_redirect_mock(server: &mut Server, from: &str, to: &str) -> Mock {
    server
        .mock("GET", from)
        .with_status(301)
        .with_header("location", to)
        .create_async()
        .await
}

/// Creates a mock endpoint that returns an error
#[allow(dead_code)]
pub async fn create_error_mock(server: &mut Server, path: &str, status: usize) -> Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_body("error")
        .create_async()
        .await
}

/// Absolute URL for `path` on the mock server
#[allow(dead_code)]
pub fn test_url(server: &Server, path: &str) -> String {
    format!("{}{}", server.url(), path)
}

/// Installs a test logger once; repeated calls are harmless
#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
