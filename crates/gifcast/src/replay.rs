//! Chess replay collaborator, backed by shakmaty.
//!
//! Move semantics are fully delegated to shakmaty; this module only walks a
//! stored move list and extracts what the renderer needs from each resulting
//! position: its FEN, the normalized move notation, and the checked king's
//! square when the side to move is in check.

use serde::{Deserialize, Serialize};
use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::variant::{Variant as Rules, VariantPosition};
use shakmaty::{CastlingMode, EnPassantMode, Position};

use crate::error::GifError;

/// Rule sets a game can be played under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Variant {
    #[default]
    Standard,
    Chess960,
    Antichess,
    Atomic,
    Crazyhouse,
    Horde,
    KingOfTheHill,
    RacingKings,
    ThreeCheck,
}

impl Variant {
    fn rules(self) -> Rules {
        match self {
            // Chess960 differs from standard only in castling rights encoding.
            Self::Standard | Self::Chess960 => Rules::Chess,
            Self::Antichess => Rules::Antichess,
            Self::Atomic => Rules::Atomic,
            Self::Crazyhouse => Rules::Crazyhouse,
            Self::Horde => Rules::Horde,
            Self::KingOfTheHill => Rules::KingOfTheHill,
            Self::RacingKings => Rules::RacingKings,
            Self::ThreeCheck => Rules::ThreeCheck,
        }
    }

    fn castling_mode(self) -> CastlingMode {
        match self {
            Self::Chess960 => CastlingMode::Chess960,
            _ => CastlingMode::Standard,
        }
    }

    /// Build the starting position, from `initial_fen` when given and from
    /// the variant's standard initial position otherwise.
    fn position(self, initial_fen: Option<&str>) -> Result<VariantPosition, GifError> {
        match initial_fen {
            Some(raw) => {
                let fen: Fen = raw.parse().map_err(|_| GifError::InvalidFen {
                    fen: raw.to_string(),
                })?;
                VariantPosition::from_setup(self.rules(), fen.into_setup(), self.castling_mode())
                    .map_err(|e| GifError::InvalidPosition {
                        reason: e.to_string(),
                    })
            }
            None => Ok(VariantPosition::new(self.rules())),
        }
    }
}

/// One displayed board state out of a replay: the initial position (no
/// move), or the position after a played move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayStep {
    /// Position in FEN notation.
    pub fen: String,
    /// Normalized UCI notation of the move that produced this position.
    /// `None` only for the initial step.
    pub last_move: Option<String>,
    /// Square of the checked king, when the side to move is in check.
    pub check: Option<String>,
}

/// Replay `moves` from the starting position, keeping every position reached
/// by a legal move.
///
/// Returns one step per applied move plus the initial step, so a clean
/// replay yields `moves.len() + 1` steps. An unparsable or illegal move
/// truncates the replay at the last valid position instead of failing: a
/// partially stored move list still renders.
pub fn replay_while_valid(
    variant: Variant,
    initial_fen: Option<&str>,
    moves: &[String],
) -> Result<Vec<ReplayStep>, GifError> {
    let mut position = variant.position(initial_fen)?;
    let mut steps = Vec::with_capacity(moves.len() + 1);
    steps.push(step_of(&position, None));

    for raw in moves {
        let Ok(uci) = raw.parse::<UciMove>() else {
            break;
        };
        let Ok(m) = uci.to_move(&position) else {
            break;
        };
        let normalized = UciMove::from_move(&m, variant.castling_mode()).to_string();
        position = match position.clone().play(&m) {
            Ok(next) => next,
            Err(_) => break,
        };
        steps.push(step_of(&position, Some(normalized)));
    }

    Ok(steps)
}

/// Derive the checked king's square for a bare position, re-deriving
/// position state under the given variant's rules.
pub fn check_square(variant: Variant, fen: &str) -> Result<Option<String>, GifError> {
    let position = variant.position(Some(fen))?;
    Ok(check_square_of(&position))
}

fn step_of(position: &VariantPosition, last_move: Option<String>) -> ReplayStep {
    ReplayStep {
        fen: Fen::from_position(position.clone(), EnPassantMode::Legal).to_string(),
        last_move,
        check: check_square_of(position),
    }
}

fn check_square_of(position: &VariantPosition) -> Option<String> {
    if position.is_check() {
        position
            .board()
            .king_of(position.turn())
            .map(|square| square.to_string())
    } else {
        None
    }
}
