//! Classification of unsuccessful HTTP responses.

use reqwest::StatusCode;

/// A response that came back with a non-2xx status.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HttpStatusError {
    /// HTTP 404
    #[error("Not found: {url}")]
    NotFound { url: String },
    /// 401/403: the index or package host refused the request
    #[error("Access denied (HTTP {status}): {url}")]
    AccessDenied { status: u16, url: String },
    /// Any other 4xx
    #[error("Request error (HTTP {status}): {url}")]
    ClientError { status: u16, url: String },
    /// 5xx
    #[error("Server error (HTTP {status}): {url}")]
    ServerError { status: u16, url: String },
}

/// Maps a status code to an [`HttpStatusError`]. Successful and
/// informational statuses yield `None`.
pub fn classify_status(status: StatusCode, url: &str) -> Option<HttpStatusError> {
    let url = url.to_string();
    match status {
        StatusCode::NOT_FOUND => Some(HttpStatusError::NotFound { url }),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Some(HttpStatusError::AccessDenied {
            status: status.as_u16(),
            url,
        }),
        s if s.is_client_error() => Some(HttpStatusError::ClientError {
            status: s.as_u16(),
            url,
        }),
        s if s.is_server_error() => Some(HttpStatusError::ServerError {
            status: s.as_u16(),
            url,
        }),
        _ => None,
    }
}

/// Turns the error from `error_for_status()` into an [`HttpStatusError`]
/// when it carries a status; transport errors pass through unchanged.
pub fn check_status(error: reqwest::Error) -> anyhow::Error {
    let url = error
        .url()
        .map(|u| u.to_string())
        .unwrap_or_else(|| "<unknown url>".to_string());

    match error.status().and_then(|s| classify_status(s, &url)) {
        Some(status_error) => anyhow::Error::from(status_error),
        None => anyhow::Error::from(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_status() {
        let url = "https://example.com/index.json";

        assert_eq!(
            classify_status(StatusCode::NOT_FOUND, url),
            Some(HttpStatusError::NotFound {
                url: url.to_string()
            })
        );
        assert!(matches!(
            classify_status(StatusCode::FORBIDDEN, url),
            Some(HttpStatusError::AccessDenied { status: 403, .. })
        ));
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, url),
            Some(HttpStatusError::ClientError { status: 429, .. })
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_GATEWAY, url),
            Some(HttpStatusError::ServerError { status: 502, .. })
        ));
        assert_eq!(classify_status(StatusCode::OK, url), None);
    }

    #[test]
    fn test_status_error_display_includes_url() {
        let err = HttpStatusError::ServerError {
            status: 503,
            url: "https://example.com/a.argosmodel".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("a.argosmodel"));
    }

    #[tokio::test]
    async fn test_check_status_from_response() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/index.json")
            .with_status(404)
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/index.json", server.url()))
            .send()
            .await
            .unwrap();
        let err = response.error_for_status().unwrap_err();

        let result = check_status(err);
        assert!(matches!(
            result.downcast_ref::<HttpStatusError>(),
            Some(HttpStatusError::NotFound { .. })
        ));
    }
}
