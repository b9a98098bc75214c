/// Errors that can occur while building or issuing a render request.
#[derive(Debug, thiserror::Error)]
pub enum GifError {
    /// The rendering service answered with a non-200 status. The response
    /// body is left unread.
    #[error("upstream rendering service responded with status {status}")]
    UpstreamStatus { status: u16 },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// The initial position string could not be parsed.
    #[error("invalid FEN: {fen}")]
    InvalidFen { fen: String },

    /// The parsed position is not playable under the requested variant.
    #[error("invalid position: {reason}")]
    InvalidPosition { reason: String },

    /// Network-level failure from the underlying transport. Propagated
    /// unwrapped; there is no retry at this layer.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = GifError::UpstreamStatus { status: 503 };
        assert_eq!(
            err.to_string(),
            "upstream rendering service responded with status 503"
        );

        let err = GifError::InvalidConfig {
            reason: "base_url must not be empty".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration: base_url must not be empty"
        );

        let err = GifError::InvalidFen {
            fen: "not a fen".into(),
        };
        assert_eq!(err.to_string(), "invalid FEN: not a fen");
    }

    #[test]
    fn errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GifError>();
    }
}
