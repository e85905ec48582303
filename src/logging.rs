use axum::{
    extract::Request,
    http::{header, Method, Uri},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::info;

/// One `access_log` line per request
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let user_agent = header_or_dash(&request, header::USER_AGENT.as_str());
    let remote_addr = request
        .headers()
        .get("x-forwarded-for")
        .or_else(|| request.headers().get("x-real-ip"))
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let response = next.run(request).await;

    let length = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-");

    info!(
        target: "access_log",
        "{} \"{}\" {} {} {}ms \"{}\"",
        remote_addr,
        format_request(&method, &uri),
        response.status().as_u16(),
        length,
        start.elapsed().as_millis(),
        user_agent,
    );

    response
}

fn header_or_dash(request: &Request, name: &str) -> String {
    request
        .headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-")
        .to_string()
}

fn format_request(method: &Method, uri: &Uri) -> String {
    format!("{} {} HTTP/1.1", method, uri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_logging_middleware_passes_response_through() {
        let app = Router::new()
            .route("/gallery", get(|| async { (StatusCode::ACCEPTED, "open") }))
            .layer(axum::middleware::from_fn(logging_middleware));

        let server = TestServer::new(app).unwrap();
        let response = server.get("/gallery").await;

        assert_eq!(response.status_code(), StatusCode::ACCEPTED);
        assert_eq!(response.text(), "open");
    }

    #[test]
    fn test_format_request() {
        let uri: Uri = "/exhibitions?type=artworks".parse().unwrap();
        assert_eq!(
            format_request(&Method::GET, &uri),
            "GET /exhibitions?type=artworks HTTP/1.1"
        );
    }
}
