//! Render request client.
//!
//! Builds one of three request shapes (full game animation, game thumbnail,
//! raw-position thumbnail), issues exactly one outbound HTTP call per
//! operation, and hands the response to the status classifier. Name
//! preloading, when an operation needs it, is awaited before the payload is
//! shaped; the two phases are sequential within one call. No retries and no
//! deadline are applied here; callers that need a timeout wrap the returned
//! future.

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use crate::config::GifConfig;
use crate::error::GifError;
use crate::frames::{self, Frame};
use crate::metrics::GifMetrics;
use crate::namer::PlayerNamer;
use crate::replay::{self, Variant};
use crate::response::{self, ByteStream};
use crate::types::{Centis, Color, Game};

const GAME_ENDPOINT: &str = "game.gif";
const IMAGE_ENDPOINT: &str = "image.gif";

/// JSON body of a full-game animation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationRequest {
    pub white: String,
    pub black: String,
    pub comment: String,
    pub orientation: Color,
    /// Default frame delay, applied by the renderer to frames without one.
    pub delay: Centis,
    pub frames: Vec<Frame>,
    pub theme: String,
    pub piece: String,
}

/// Client for the upstream GIF rendering service.
///
/// All state is per-request; concurrent calls share nothing mutable.
pub struct GifClient {
    http: reqwest::Client,
    config: GifConfig,
    namer: Arc<dyn PlayerNamer>,
    metrics: GifMetrics,
}

impl GifClient {
    /// Create a client with a fresh HTTP connection pool and unregistered
    /// metrics.
    pub fn new(config: GifConfig, namer: Arc<dyn PlayerNamer>) -> Result<Self, GifError> {
        Self::with_transport(config, namer, reqwest::Client::new(), GifMetrics::unregistered())
    }

    /// Create a client with an externally configured transport and metrics.
    pub fn with_transport(
        config: GifConfig,
        namer: Arc<dyn PlayerNamer>,
        http: reqwest::Client,
        metrics: GifMetrics,
    ) -> Result<Self, GifError> {
        config.validate()?;
        Ok(Self {
            http,
            config,
            namer,
            metrics,
        })
    }

    /// Render a full game as an animated image sequence.
    ///
    /// Preloads display names for both participants, builds the animation
    /// body from the replayed game, and POSTs it. `initial_fen` overrides
    /// the game's own starting position; `theme`/`piece` fall back to the
    /// configured defaults.
    #[instrument(skip(self, game), fields(game_id = %game.id))]
    pub async fn game_animation(
        &self,
        game: &Game,
        initial_fen: Option<&str>,
        theme: Option<&str>,
        piece: Option<&str>,
    ) -> Result<ByteStream, GifError> {
        self.namer.preload(&game.user_ids()).await?;
        let body = self.animation_request(game, initial_fen, theme, piece)?;
        let response = self
            .http
            .post(self.endpoint(GAME_ENDPOINT))
            .json(&body)
            .send()
            .await?;
        self.finish(GAME_ENDPOINT, response)
    }

    /// Render a single frame of the game's current position.
    #[instrument(skip(self, game), fields(game_id = %game.id))]
    pub async fn game_thumbnail(
        &self,
        game: &Game,
        theme: Option<&str>,
        piece: Option<&str>,
    ) -> Result<ByteStream, GifError> {
        self.namer.preload(&game.user_ids()).await?;
        let params = self.game_thumbnail_params(game, theme, piece)?;
        let response = self
            .http
            .get(self.endpoint(IMAGE_ENDPOINT))
            .query(&params)
            .send()
            .await?;
        self.finish(IMAGE_ENDPOINT, response)
    }

    /// Render a single frame of an arbitrary position. No name lookup; the
    /// check square is re-derived under the given variant's rules.
    #[instrument(skip(self))]
    pub async fn position_thumbnail(
        &self,
        fen: &str,
        last_move: Option<&str>,
        orientation: Color,
        variant: Variant,
        theme: Option<&str>,
        piece: Option<&str>,
    ) -> Result<ByteStream, GifError> {
        let params =
            self.position_thumbnail_params(fen, last_move, orientation, variant, theme, piece)?;
        let response = self
            .http
            .get(self.endpoint(IMAGE_ENDPOINT))
            .query(&params)
            .send()
            .await?;
        self.finish(IMAGE_ENDPOINT, response)
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.config.base_url, name)
    }

    fn finish(
        &self,
        operation: &'static str,
        response: reqwest::Response,
    ) -> Result<ByteStream, GifError> {
        match response::into_stream(operation, response) {
            Ok(stream) => {
                self.metrics.rendered.with_label_values(&[operation]).inc();
                Ok(stream)
            }
            Err(err) => {
                if let GifError::UpstreamStatus { status } = &err {
                    self.metrics
                        .failed
                        .with_label_values(&[operation, &status.to_string()])
                        .inc();
                }
                Err(err)
            }
        }
    }

    fn animation_request(
        &self,
        game: &Game,
        initial_fen: Option<&str>,
        theme: Option<&str>,
        piece: Option<&str>,
    ) -> Result<AnimationRequest, GifError> {
        let initial = initial_fen.or(game.initial_fen.as_deref());
        let steps = replay::replay_while_valid(game.variant, initial, &game.moves)?;
        let frames = frames::build(steps, game.raw_move_times());
        Ok(AnimationRequest {
            white: self.namer.display(&game.white),
            black: self.namer.display(&game.black),
            comment: format!("Game {} rendered by gifcast", game.id),
            orientation: game.natural_orientation(),
            delay: self.config.default_delay,
            frames,
            theme: theme.unwrap_or(&self.config.theme).to_string(),
            piece: piece.unwrap_or(&self.config.piece_set).to_string(),
        })
    }

    fn game_thumbnail_params(
        &self,
        game: &Game,
        theme: Option<&str>,
        piece: Option<&str>,
    ) -> Result<Vec<(&'static str, String)>, GifError> {
        let steps =
            replay::replay_while_valid(game.variant, game.initial_fen.as_deref(), &game.moves)?;
        let current = steps.last().ok_or_else(|| GifError::InvalidPosition {
            reason: "replay produced no position".to_string(),
        })?;

        let mut params = vec![
            ("fen", current.fen.clone()),
            ("orientation", game.natural_orientation().to_string()),
            ("white", self.namer.display(&game.white)),
            ("black", self.namer.display(&game.black)),
        ];
        if let Some(last_move) = &current.last_move {
            params.push(("lastMove", last_move.clone()));
        }
        if let Some(check) = &current.check {
            params.push(("check", check.clone()));
        }
        params.push(("theme", theme.unwrap_or(&self.config.theme).to_string()));
        params.push(("piece", piece.unwrap_or(&self.config.piece_set).to_string()));
        Ok(params)
    }

    fn position_thumbnail_params(
        &self,
        fen: &str,
        last_move: Option<&str>,
        orientation: Color,
        variant: Variant,
        theme: Option<&str>,
        piece: Option<&str>,
    ) -> Result<Vec<(&'static str, String)>, GifError> {
        let check = replay::check_square(variant, fen)?;

        let mut params = vec![
            ("fen", fen.to_string()),
            ("orientation", orientation.to_string()),
        ];
        if let Some(last_move) = last_move {
            params.push(("lastMove", last_move.to_string()));
        }
        if let Some(check) = check {
            params.push(("check", check));
        }
        params.push(("theme", theme.unwrap_or(&self.config.theme).to_string()));
        params.push(("piece", piece.unwrap_or(&self.config.piece_set).to_string()));
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::LAST_FRAME_DELAY;
    use crate::testing::{sample_game, StubNamer};
    use crate::types::UserId;

    fn client_with(namer: Arc<StubNamer>) -> GifClient {
        GifClient::new(GifConfig::default(), namer).unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        let config = GifConfig {
            base_url: String::new(),
            ..Default::default()
        };
        let err = GifClient::new(config, Arc::new(StubNamer::new()))
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, GifError::InvalidConfig { .. }));
    }

    #[test]
    fn animation_request_shape() {
        let namer = Arc::new(StubNamer::new());
        let client = client_with(Arc::clone(&namer));
        let game = sample_game();

        let body = client.animation_request(&game, None, None, None).unwrap();
        assert_eq!(body.white, "stub:erik");
        assert_eq!(body.black, "stub:clarkey");
        assert!(body.comment.contains("9tiwlaq3"));
        assert_eq!(body.orientation, Color::White);
        assert_eq!(body.delay, Centis::new(80));
        assert_eq!(body.theme, "brown");
        assert_eq!(body.piece, "cburnett");

        // Four moves: five frames, fixed final delay, mate leaves the white
        // king checked on e1.
        assert_eq!(body.frames.len(), 5);
        assert_eq!(body.frames[4].delay, Some(LAST_FRAME_DELAY));
        assert_eq!(body.frames[4].check.as_deref(), Some("e1"));
        assert!(body.frames[0].last_move.is_none());
    }

    #[test]
    fn animation_request_json_uses_camel_case() {
        let client = client_with(Arc::new(StubNamer::new()));
        let body = client
            .animation_request(&sample_game(), None, None, None)
            .unwrap();

        let json = serde_json::to_value(&body).unwrap();
        let obj = json.as_object().unwrap();
        for key in ["white", "black", "comment", "orientation", "delay", "frames", "theme", "piece"]
        {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(obj["orientation"], "white");
        assert_eq!(obj["delay"], 80);
        assert_eq!(obj["frames"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn animation_request_honors_overrides() {
        let client = client_with(Arc::new(StubNamer::new()));
        let mut game = sample_game();
        game.flipped = true;

        let body = client
            .animation_request(&game, None, Some("blue"), Some("alpha"))
            .unwrap();
        assert_eq!(body.orientation, Color::Black);
        assert_eq!(body.theme, "blue");
        assert_eq!(body.piece, "alpha");
    }

    #[test]
    fn game_thumbnail_params_shape() {
        let client = client_with(Arc::new(StubNamer::new()));
        let game = sample_game();

        let params = client.game_thumbnail_params(&game, None, None).unwrap();
        let get = |key: &str| {
            params
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
        };
        assert!(get("fen").is_some());
        assert_eq!(get("orientation"), Some("white"));
        assert_eq!(get("white"), Some("stub:erik"));
        assert_eq!(get("lastMove"), Some("d8h4"));
        assert_eq!(get("check"), Some("e1"));
        assert_eq!(get("theme"), Some("brown"));
    }

    #[test]
    fn position_thumbnail_params_omit_absent_values() {
        let client = client_with(Arc::new(StubNamer::new()));
        let quiet = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

        let params = client
            .position_thumbnail_params(quiet, None, Color::Black, Variant::Standard, None, None)
            .unwrap();
        assert!(params.iter().all(|(k, _)| *k != "lastMove"));
        assert!(params.iter().all(|(k, _)| *k != "check"));
        assert!(params.iter().all(|(k, _)| *k != "white"));
        assert!(params
            .iter()
            .any(|(k, v)| *k == "orientation" && v == "black"));
    }

    #[test]
    fn position_thumbnail_params_derive_check() {
        let client = client_with(Arc::new(StubNamer::new()));
        let check_fen = "r1bqkbnr/ppppQppp/8/8/8/8/PPPP1PPP/RNB1KBNR b KQkq - 0 1";

        let params = client
            .position_thumbnail_params(
                check_fen,
                Some("e7f7"),
                Color::White,
                Variant::Standard,
                None,
                None,
            )
            .unwrap();
        assert!(params.iter().any(|(k, v)| *k == "check" && v == "e8"));
        assert!(params.iter().any(|(k, v)| *k == "lastMove" && v == "e7f7"));
    }

    #[tokio::test]
    async fn preload_precedes_the_request() {
        // Nothing listens on port 1: the HTTP call fails with a transport
        // error, but the preload phase must already have run.
        let namer = Arc::new(StubNamer::new());
        let config = GifConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            ..Default::default()
        };
        let client = GifClient::new(config, Arc::<StubNamer>::clone(&namer)).unwrap();

        let err = client
            .game_animation(&sample_game(), None, None, None)
            .await
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, GifError::Transport(_)));
        assert_eq!(
            namer.preloaded(),
            vec![UserId::new("erik"), UserId::new("clarkey")]
        );
    }
}
