use crate::config::LoggingConfig;
use axum::{
    extract::Request,
    http::{Method, Uri},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use std::str::FromStr;
use std::time::Instant;
use tracing::{info, Level};

/// Installs the global fmt subscriber. Does nothing if one is already installed.
pub fn init_logging(config: &LoggingConfig) {
    let level = parse_level(&config.level);
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

/// Max level named by `level`; unknown names fall back to INFO.
pub fn parse_level(level: &str) -> Level {
    Level::from_str(level.trim()).unwrap_or(Level::INFO)
}

pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let remote_addr = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .or_else(|| {
            request
                .headers()
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
        })
        .unwrap_or("-")
        .to_string();

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();
    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");

    info!(
        target: "access_log",
        "{} {} \"{}\" {} {}ms",
        timestamp,
        remote_addr,
        format_request(&method, &uri),
        status.as_u16(),
        duration.as_millis(),
    );

    response
}

fn format_request(method: &Method, uri: &Uri) -> String {
    format!("{} {} HTTP/1.1", method, uri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};
    use axum_test::TestServer;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("WARN"), Level::WARN);
        assert_eq!(parse_level(" trace "), Level::TRACE);
        assert_eq!(parse_level("verbose"), Level::INFO);
        assert_eq!(parse_level(""), Level::INFO);
    }

    #[test]
    fn test_init_logging_twice() {
        let config = LoggingConfig {
            level: "debug".to_string(),
        };
        init_logging(&config);
        init_logging(&config);
    }

    #[test]
    fn test_format_request() {
        let uri: Uri = "/entities/User/where?login=admin".parse().unwrap();
        assert_eq!(
            format_request(&Method::GET, &uri),
            "GET /entities/User/where?login=admin HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_logging_middleware() {
        let app = Router::new()
            .route("/test", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn(logging_middleware));

        let server = TestServer::new(app).unwrap();
        let response = server.get("/test").await;

        assert_eq!(response.status_code(), StatusCode::OK);
    }
}
