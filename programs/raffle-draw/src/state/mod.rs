pub use config::*;
pub use participant::*;
pub use raffle::*;
pub use ticket::*;

pub mod config;
pub mod participant;
pub mod raffle;
pub mod ticket;
