//! Test doubles for exercising the client without a rendering service.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::GifError;
use crate::namer::PlayerNamer;
use crate::types::{Centis, Game, Player, UserId};

/// A [`PlayerNamer`] that records which ids were preloaded and formats
/// every registered player as `stub:<id>`.
#[derive(Debug, Default)]
pub struct StubNamer {
    preloaded: Mutex<Vec<UserId>>,
}

impl StubNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids passed to `preload` so far, in call order.
    pub fn preloaded(&self) -> Vec<UserId> {
        self.preloaded.lock().clone()
    }
}

#[async_trait]
impl PlayerNamer for StubNamer {
    async fn preload(&self, ids: &[UserId]) -> Result<(), GifError> {
        self.preloaded.lock().extend(ids.iter().cloned());
        Ok(())
    }

    fn display(&self, player: &Player) -> String {
        match &player.user_id {
            Some(id) => format!("stub:{id}"),
            None => "Anonymous".to_string(),
        }
    }
}

/// A four-move game ending in checkmate (fool's mate), with recorded
/// move times.
pub fn sample_game() -> Game {
    let mut game = Game::new(
        "9tiwlaq3",
        Player::registered("erik", 2105),
        Player::registered("clarkey", 1840),
    );
    game.moves = ["f2f3", "e7e5", "g2g4", "d8h4"]
        .iter()
        .map(|m| m.to_string())
        .collect();
    game.move_times = Some(vec![
        Centis::new(120),
        Centis::new(90),
        Centis::new(230),
        Centis::new(60),
    ]);
    game
}

/// Fabricate an upstream HTTP response with the given status and body.
pub fn upstream_response(status: u16, body: Vec<u8>) -> reqwest::Response {
    let response = http::Response::builder()
        .status(status)
        .body(body)
        .expect("valid response");
    reqwest::Response::from(response.map(reqwest::Body::from))
}
