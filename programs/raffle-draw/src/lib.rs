//! Numbers-matching raffle draws.
//!
//! A [`Raffle`] opens a draw, sells tickets of five distinct numbers and then
//! draws a winning ticket, paying each match tier its share of the pot in
//! proportion to the winning tickets held. The [`service`] module wraps the
//! engine in the text menu used by the `raffle` binary.

pub mod error;
pub mod instructions;
pub mod logging;
pub mod service;
pub mod state;

pub use error::{ConfigError, DrawError, DrawResult};
pub use instructions::*;
pub use state::*;
