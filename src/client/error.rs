use thiserror::Error;

/// The one failure kind a client request can end in.
///
/// `status` is `None` when no HTTP response was received (connection refused,
/// undecodable body) or the request was rejected before being sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RequestFailure {
    pub status: Option<u16>,
    pub message: String,
}

impl RequestFailure {
    pub fn local(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// Build a failure from an error response, preferring the problem body's
    /// `title`, then its `message`, then a generic status line.
    pub fn from_body(status: u16, body: &str) -> Self {
        let from_problem = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                ["title", "message"].iter().find_map(|key| {
                    value
                        .get(*key)
                        .and_then(|v| v.as_str())
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                })
            });

        Self {
            status: Some(status),
            message: from_problem
                .unwrap_or_else(|| format!("Request failed with status code {}", status)),
        }
    }
}

impl From<reqwest::Error> for RequestFailure {
    fn from(err: reqwest::Error) -> Self {
        Self {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_problem_title() {
        let failure = RequestFailure::from_body(
            400,
            r#"{"title":"A new recipe cannot already have an ID","message":"error.idexists"}"#,
        );
        assert_eq!(failure.status, Some(400));
        assert_eq!(failure.message, "A new recipe cannot already have an ID");
    }

    #[test]
    fn test_message_falls_back_to_status() {
        let failure = RequestFailure::from_body(502, "<html>Bad Gateway</html>");
        assert_eq!(failure.message, "Request failed with status code 502");

        let failure = RequestFailure::from_body(400, r#"{"message":"error.validation"}"#);
        assert_eq!(failure.message, "error.validation");
    }
}
