//! Finger Dice: everyone puts a finger on the screen, a countdown runs, then
//! one finger is picked or the fingers are split into two teams.
//!
//! The game logic lives in [`state`] and runs without a browser; [`components`]
//! and [`browser`] mount it in a Yew app.

pub mod browser;
pub mod components;
pub mod config;
pub mod error;
pub mod model;
pub mod state;
pub mod util;
