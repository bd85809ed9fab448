pub use buy_tickets::*;
pub use execute_draw::*;
pub use start_draw::*;

pub mod buy_tickets;
pub mod execute_draw;
pub mod start_draw;
