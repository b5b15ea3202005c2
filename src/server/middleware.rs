use axum::{
    extract::Request,
    http::{
        HeaderValue,
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN, HOST},
    },
    middleware::Next,
    response::Response,
};
use tracing::info;

/// Logs every request/response pair and stamps the CORS headers on the way out,
/// error responses included.
pub async fn response_policy(request: Request, next: Next) -> Response {
    info!("Request: {} {}", request.method(), request_url(&request));

    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );

    info!("Response Status: {}", response.status());
    response
}

fn request_url(request: &Request) -> String {
    let uri = request.uri();
    if uri.authority().is_some() {
        return uri.to_string();
    }

    let host = request
        .headers()
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");

    format!("http://{}{}", host, uri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http};

    #[test]
    fn test_request_url_uses_host_header() {
        let request = http::Request::builder()
            .uri("/predict?x=1")
            .header(HOST, "example.test:8000")
            .body(Body::empty())
            .unwrap();
        assert_eq!(request_url(&request), "http://example.test:8000/predict?x=1");
    }

    #[test]
    fn test_request_url_without_host() {
        let request = http::Request::builder().uri("/test").body(Body::empty()).unwrap();
        assert_eq!(request_url(&request), "http://localhost/test");
    }
}
