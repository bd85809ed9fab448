use anchor_lang::prelude::*;
use rand::Rng;

use crate::{
    log,
    error::DrawResult,
    state::{raffle::checked_amount, Raffle, RewardSchedule},
};

/// Event emitted when a new draw opens for ticket sales
#[event]
pub struct DrawStarted {
    /// Amount added to the pot when the draw opened
    pub pot_seed: f64,
    /// Pot size after seeding, including any rollover from the previous draw
    pub pot_size: f64,
    /// Shares each tier will receive at execution
    pub rewards: RewardSchedule,
}

impl<R: Rng> Raffle<R> {
    /// Opens a new draw.
    ///
    /// Calling this while a draw is already open does nothing: the pot is not
    /// reseeded and the participants are kept.
    ///
    /// When the draw was closed:
    /// - The configured seed is added to the pot, so unpaid shares roll over
    /// - The participant roster, winning ticket and tier winners are cleared
    /// - The draw accepts purchases until it is executed
    ///
    /// # Errors
    /// - `Overflow` if seeding would push the pot past a finite amount; the
    ///   draw then stays closed and the pot is untouched
    pub fn start_draw(&mut self) -> DrawResult<()> {
        if self.open {
            log!("Draw already open, pot size: {}", self.pot_size);
            return Ok(());
        }

        self.pot_size = checked_amount(self.pot_size + self.config.pot_seed)?;
        self.open = true;
        self.participants.clear();
        self.winning_ticket = None;
        self.tier_winners = Default::default();
        self.total_rewards = 0.0;

        log!("Draw started, pot size: {}", self.pot_size);
        emit!(DrawStarted {
            pot_seed: self.config.pot_seed,
            pot_size: self.pot_size,
            rewards: self.config.rewards,
        });

        Ok(())
    }
}
