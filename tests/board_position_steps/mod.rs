//! Step definitions for board position scenarios.

mod given;
mod then;
mod when;
pub mod world;
