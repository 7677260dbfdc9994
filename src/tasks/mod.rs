//! Background Tasks Module
//!
//! Contains background tasks owned by a cache engine.
//!
//! # Tasks
//! - Reaper: sweeps expired and over-budget entries at the configured interval

mod reaper;

pub use reaper::Reaper;
