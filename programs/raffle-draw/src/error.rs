use std::fmt;

use anchor_lang::error_code;

use crate::state::{MAX_NUMBER, MIN_NUMBER, TICKET_SIZE};

pub type DrawResult<T> = std::result::Result<T, DrawError>;

/// Failures of the draw operations. Every variant is recoverable: the
/// aggregate is left exactly as it was before the failing call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawError {
    /// Purchases and executions need an open draw.
    DrawNotOpen,
    /// The purchase would take the participant past the per-draw limit.
    /// `remaining` is how many more tickets they may still buy.
    TicketLimitExceeded { remaining: u32, max: u32 },
    InvalidTicketCount,
    EmptyParticipantName,
    InvalidTicketNumbers,
    /// The pot or a reward would no longer be a finite amount.
    Overflow,
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::DrawNotOpen => write!(f, "Draw has not started"),
            DrawError::TicketLimitExceeded { remaining: 0, max } => write!(
                f,
                "You have already purchased the maximum number of tickets ({max}) in this draw."
            ),
            DrawError::TicketLimitExceeded { remaining, .. } => write!(
                f,
                "You can only purchase {remaining} more ticket{} in this draw.",
                if *remaining > 1 { "s" } else { "" }
            ),
            DrawError::InvalidTicketCount => {
                write!(f, "Number of tickets must be greater than zero")
            }
            DrawError::EmptyParticipantName => write!(f, "Participant name must not be empty"),
            DrawError::InvalidTicketNumbers => write!(
                f,
                "A ticket needs {TICKET_SIZE} distinct numbers between {MIN_NUMBER} and {MAX_NUMBER}"
            ),
            DrawError::Overflow => write!(f, "Pot size is too large to represent"),
        }
    }
}

impl std::error::Error for DrawError {}

#[error_code]
pub enum ConfigError {
    #[msg("Pot seed must be a finite, non-negative amount")]
    InvalidPotSeed,
    #[msg("Ticket price must be a finite amount greater than zero")]
    InvalidTicketPrice,
    #[msg("Maximum tickets per participant must be greater than zero")]
    MaxTicketsTooLow,
    #[msg("Reward shares must be finite and non-negative")]
    InvalidRewardShare,
    #[msg("Reward shares together exceed the whole pot")]
    RewardSharesExceedPot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_message_pluralizes_remaining_tickets() {
        let one = DrawError::TicketLimitExceeded { remaining: 1, max: 5 };
        let two = DrawError::TicketLimitExceeded { remaining: 2, max: 5 };

        assert_eq!(one.to_string(), "You can only purchase 1 more ticket in this draw.");
        assert_eq!(two.to_string(), "You can only purchase 2 more tickets in this draw.");
    }

    #[test]
    fn limit_message_when_nothing_remains() {
        let err = DrawError::TicketLimitExceeded { remaining: 0, max: 5 };

        assert_eq!(
            err.to_string(),
            "You have already purchased the maximum number of tickets (5) in this draw."
        );
    }
}
