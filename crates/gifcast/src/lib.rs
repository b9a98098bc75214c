//! Streaming client for a chess GIF rendering service.
//!
//! Turns a game's move list and per-move think times into an animation
//! request (an ordered frame list with per-frame delays), delegates pixel
//! rendering to an external HTTP service, and streams the rendered bytes
//! back without buffering them. Single-frame thumbnails of arbitrary
//! positions are served the same way.
//!
//! The interesting logic lives in three places:
//!
//! - [`timing`] scales raw move times into bounded, perceptually tuned
//!   frame delays
//! - [`frames`] zips replayed positions with those delays into the frame
//!   sequence
//! - [`response`] maps the upstream status to a lazy byte stream or a
//!   typed failure
//!
//! Everything else is a narrow collaborator seam: chess rules go through
//! shakmaty ([`replay`]), display names through [`namer::PlayerNamer`], and
//! the transport through reqwest.

pub mod client;
pub mod config;
pub mod error;
pub mod frames;
pub mod metrics;
pub mod namer;
pub mod replay;
pub mod response;
pub mod testing;
pub mod timing;
pub mod types;

pub use client::{AnimationRequest, GifClient};
pub use config::GifConfig;
pub use error::GifError;
pub use frames::Frame;
pub use metrics::GifMetrics;
pub use namer::{MemoryNamer, PlayerNamer};
pub use replay::Variant;
pub use response::ByteStream;
pub use types::{Centis, Color, Game, Player, UserId};
