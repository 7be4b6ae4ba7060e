//! Balloon Blaster: a single-screen terminal shooter.
//!
//! Game rules live in [`compute`] as pure state transitions; the binary
//! owns the terminal, input and rendering.

pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod tiers;
pub mod viewport;

pub use error::{GameError, Result};
