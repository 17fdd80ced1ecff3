//! HTTP response building module
//!
//! Applies negotiated headers to responses, decoupled from any server loop.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{self, HeaderValue};
use hyper::{Response, StatusCode};

use crate::action::Action;
use crate::error::Result;
use crate::http::format::content_type;

/// Merge the negotiated headers into an existing response
///
/// Headers already present with the same name are replaced.
pub fn apply_negotiation<B>(action: &Action<'_>, response: &mut Response<B>) -> Result<()> {
    let negotiated = action.response_headers()?;
    let headers = response.headers_mut();
    for (name, value) in &negotiated {
        headers.insert(name.clone(), value.clone());
    }
    Ok(())
}

/// Build a 200 response carrying the negotiated headers
pub fn build_negotiated_response(action: &Action<'_>, body: Bytes) -> Response<Full<Bytes>> {
    let content_length = body.len();
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = StatusCode::OK;
    response
        .headers_mut()
        .insert(header::CONTENT_LENGTH, HeaderValue::from(content_length));

    if let Err(e) = apply_negotiation(action, &mut response) {
        log_build_error("200", &e);
    }
    response
}

/// Build 406 Not Acceptable response
pub fn build_406_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_ACCEPTABLE)
        .header(header::CONTENT_TYPE, content_type("text/plain"))
        .body(Full::new(Bytes::from("406 Not Acceptable")))
        .unwrap_or_else(|e| {
            log_build_error("406", &e);
            Response::new(Full::new(Bytes::from("406 Not Acceptable")))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &dyn std::error::Error) {
    tracing::error!(status, %error, "failed to build response");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use hyper::HeaderMap;

    #[test]
    fn test_build_negotiated_response() {
        let settings = Settings::default();
        let mut request = HeaderMap::new();
        request.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        let mut action = Action::new(&settings, &request);
        action.cache_control(["private", "max_age_typo"]);

        let response = build_negotiated_response(&action, Bytes::from("{}"));
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json; charset=utf-8");
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "2");
        assert_eq!(response.headers()[header::CACHE_CONTROL], "private");
    }

    #[test]
    fn test_apply_negotiation_replaces_content_type() {
        let settings = Settings::default();
        let request = HeaderMap::new();
        let mut action = Action::new(&settings, &request);
        action.set_format(Some("html")).unwrap();

        let mut response = Response::builder()
            .header(header::CONTENT_TYPE, "text/plain")
            .header(header::ETAG, "\"abc\"")
            .body(())
            .unwrap();
        apply_negotiation(&action, &mut response).unwrap();

        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html; charset=utf-8");
        assert_eq!(response.headers()[header::ETAG], "\"abc\"");
        assert!(response.headers().get(header::CACHE_CONTROL).is_none());
    }

    #[test]
    fn test_build_406_response() {
        let response = build_406_response();
        assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain; charset=utf-8");
    }
}
