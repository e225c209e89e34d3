#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("account name must not be empty")]
    EmptyAccount,

    #[error("unexpected response shape: {0}")]
    MalformedResponseShape(String),

    #[error("GitHub API error: {status} -> {detail}")]
    RemoteHardError { status: u16, detail: String },

    #[error(
        "GitHub API rate limit exceeded{}. Wait or set GITHUB_TOKEN to increase limits",
        hint_suffix(.hint)
    )]
    RateLimitExceeded { hint: Option<String> },

    #[error("request failed: {0}")]
    Transport(String),
}

fn hint_suffix(hint: &Option<String>) -> String {
    hint.as_deref().map(|h| format!(" ({h})")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hard_error_message_includes_status_and_detail() {
        let e = Error::RemoteHardError {
            status: 404,
            detail: r#"{"message":"Not Found"}"#.to_string(),
        };
        assert_eq!(
            e.to_string(),
            r#"GitHub API error: 404 -> {"message":"Not Found"}"#
        );
    }

    #[test]
    fn rate_limit_message_with_hint() {
        let e = Error::RateLimitExceeded {
            hint: Some("resets in 5m 0s".to_string()),
        };
        let msg = e.to_string();
        assert!(msg.contains("rate limit exceeded (resets in 5m 0s)"));
        assert!(msg.contains("GITHUB_TOKEN"));
    }

    #[test]
    fn rate_limit_message_without_hint() {
        let e = Error::RateLimitExceeded { hint: None };
        assert!(e.to_string().starts_with("GitHub API rate limit exceeded. Wait"));
    }
}
