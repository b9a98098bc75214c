use serde::{Deserialize, Serialize};
use std::fmt;

use crate::replay::Variant;
use crate::types::{Centis, Color};

/// Unique identifier of a registered user.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One side of a game. Anonymous players carry no user id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Player {
    /// Registered user behind this player, if any.
    pub user_id: Option<UserId>,
    /// Free-form name for anonymous players.
    pub name: Option<String>,
    pub rating: Option<u16>,
}

impl Player {
    pub fn registered(user_id: impl Into<String>, rating: u16) -> Self {
        Self {
            user_id: Some(UserId::new(user_id)),
            name: None,
            rating: Some(rating),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// A finished or in-progress game, as handed to the render client.
///
/// Value object scoped to a single render request; nothing here is shared
/// or persisted.
#[derive(Debug, Clone)]
pub struct Game {
    pub id: String,
    pub white: Player,
    pub black: Player,
    /// Played moves in UCI notation, in order.
    pub moves: Vec<String>,
    /// Raw per-move elapsed times, one entry per played move. `None` for
    /// games without recorded clock data.
    pub move_times: Option<Vec<Centis>>,
    pub variant: Variant,
    /// Starting position when the game did not begin from the variant's
    /// initial position.
    pub initial_fen: Option<String>,
    /// Whether the board is displayed from black's point of view.
    pub flipped: bool,
}

impl Game {
    pub fn new(id: impl Into<String>, white: Player, black: Player) -> Self {
        Self {
            id: id.into(),
            white,
            black,
            moves: Vec::new(),
            move_times: None,
            variant: Variant::Standard,
            initial_fen: None,
            flipped: false,
        }
    }

    /// User ids that need a display-name preload before rendering.
    pub fn user_ids(&self) -> Vec<UserId> {
        [&self.white, &self.black]
            .into_iter()
            .filter_map(|p| p.user_id.clone())
            .collect()
    }

    /// Orientation the board is naturally displayed in.
    pub fn natural_orientation(&self) -> Color {
        if self.flipped {
            Color::Black
        } else {
            Color::White
        }
    }

    pub fn raw_move_times(&self) -> &[Centis] {
        self.move_times.as_deref().unwrap_or(&[])
    }
}
