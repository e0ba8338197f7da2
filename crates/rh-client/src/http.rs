//! Shared HTTP response helpers.
//!
//! Centralizes status-code classification (429 with `Retry-After` parsing,
//! 401/403 → [`ClientError::Unauthorized`], 404 → [`ClientError::NotFound`],
//! other non-success → [`ClientError::Api`]) and JSON decoding so the store
//! methods stay focused on request construction and response mapping.

use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Longest body excerpt quoted in parse errors.
const BODY_EXCERPT_CHARS: usize = 200;

/// Check an HTTP response for error statuses.
///
/// Returns the response unchanged on success.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == 429 {
        return Err(ClientError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }

    let message = error_detail(&resp.text().await.unwrap_or_default());
    Err(match status.as_u16() {
        401 | 403 => ClientError::Unauthorized { message },
        404 => ClientError::NotFound { message },
        code => ClientError::Api {
            status: code,
            message,
        },
    })
}

/// Decode a successful response body as JSON.
pub async fn decode_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let body = resp.text().await?;
    parse_body(&body)
}

/// Parse a JSON body, quoting an excerpt of it on failure.
pub fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| {
        let excerpt: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
        ClientError::Parse(format!("{e} (body: {excerpt})"))
    })
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

/// Pull the `detail` field out of an error body.
///
/// FastAPI sends `{"detail": "..."}` for handled errors and
/// `{"detail": [{"msg": ...}, ...]}` for request validation failures.
/// Anything else is returned verbatim.
fn error_detail(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };
    match value.get("detail") {
        Some(serde_json::Value::String(detail)) => detail.clone(),
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
            .collect::<Vec<_>>()
            .join("; "),
        Some(other) => other.to_string(),
        None => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    fn mock_response_with_retry_after(status: u16, value: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .header("Retry-After", value)
                .body(String::new())
                .unwrap(),
        )
    }

    #[test]
    fn parse_retry_after_from_header() {
        let resp = mock_response_with_retry_after(429, "120");
        assert_eq!(parse_retry_after(&resp), 120);
    }

    #[test]
    fn parse_retry_after_non_numeric() {
        let resp = mock_response_with_retry_after(429, "soon");
        assert_eq!(parse_retry_after(&resp), 60);
    }

    #[tokio::test]
    async fn rate_limited_with_default() {
        let err = check_response(mock_response(429, "")).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::RateLimited {
                retry_after_secs: 60
            }
        ));
    }

    #[tokio::test]
    async fn unauthorized_carries_detail() {
        let resp = mock_response(401, r#"{"detail":"Incorrect email or password"}"#);
        let err = check_response(resp).await.unwrap_err();
        match err {
            ClientError::Unauthorized { message } => {
                assert_eq!(message, "Incorrect email or password");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn not_found_is_classified() {
        let resp = mock_response(404, r#"{"detail":"Workspace not found"}"#);
        let err = check_response(resp).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn validation_detail_list_is_joined() {
        let body = r#"{"detail":[{"msg":"field required"},{"msg":"value is not a valid email"}]}"#;
        let err = check_response(mock_response(422, body)).await.unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "field required; value is not a valid email");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn plain_text_body_is_kept() {
        let err = check_response(mock_response(500, "Internal Server Error\n"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Api { status: 500, ref message } if message == "Internal Server Error"
        ));
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(check_response(mock_response(200, "{}")).await.is_ok());
    }

    #[test]
    fn parse_error_quotes_body() {
        let err = parse_body::<serde_json::Value>("<html>oops</html>").unwrap_err();
        assert!(err.to_string().contains("<html>oops</html>"));
    }
}
