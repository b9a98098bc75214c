use crate::error::GifError;
use crate::types::Centis;

/// Configuration for the GIF rendering client.
#[derive(Debug, Clone)]
pub struct GifConfig {
    /// Base URL of the rendering service, without a trailing slash.
    /// Default: `http://localhost:6175`.
    pub base_url: String,
    /// Board theme used when a request does not specify one. Default: "brown".
    pub theme: String,
    /// Piece set used when a request does not specify one. Default: "cburnett".
    pub piece_set: String,
    /// Frame delay applied by the renderer to frames that carry none.
    /// Default: 80 centiseconds.
    pub default_delay: Centis,
}

impl GifConfig {
    /// Validate configuration values.
    ///
    /// Checks:
    /// - `base_url` is non-empty, is an http(s) URL, and has no trailing slash
    ///   (endpoints are joined as `{base_url}/game.gif`)
    /// - `theme` and `piece_set` are non-empty
    pub fn validate(&self) -> Result<(), GifError> {
        if self.base_url.is_empty() {
            return Err(GifError::InvalidConfig {
                reason: "base_url must not be empty".to_string(),
            });
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(GifError::InvalidConfig {
                reason: format!("base_url must be an http(s) URL, got {}", self.base_url),
            });
        }
        if self.base_url.ends_with('/') {
            return Err(GifError::InvalidConfig {
                reason: "base_url must not end with a slash".to_string(),
            });
        }
        if self.theme.is_empty() {
            return Err(GifError::InvalidConfig {
                reason: "theme must not be empty".to_string(),
            });
        }
        if self.piece_set.is_empty() {
            return Err(GifError::InvalidConfig {
                reason: "piece_set must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for GifConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:6175".to_string(),
            theme: "brown".to_string(),
            piece_set: "cburnett".to_string(),
            default_delay: Centis::new(80),
        }
    }
}
