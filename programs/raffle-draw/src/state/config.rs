use anchor_lang::prelude::*;

use crate::{error::ConfigError, state::Tier};

// Defaults for a fresh draw
pub const POT_SEED: f64 = 100.0;
pub const TICKET_PRICE: f64 = 5.0;
pub const MAX_TICKETS_PER_PARTICIPANT: u32 = 5;

// Share of the pot paid out to each tier, split across its winning tickets
pub const GROUP_2_SHARE: f64 = 0.10;
pub const GROUP_3_SHARE: f64 = 0.15;
pub const GROUP_4_SHARE: f64 = 0.25;
pub const GROUP_5_SHARE: f64 = 0.50;

// Slack for shares that sum to exactly 1 in decimal but not in binary
const SHARE_TOLERANCE: f64 = 1e-9;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq)]
pub struct RewardSchedule {
    pub group_2: f64,
    pub group_3: f64,
    pub group_4: f64,
    pub group_5: f64,
}

impl RewardSchedule {
    pub fn share(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Group2 => self.group_2,
            Tier::Group3 => self.group_3,
            Tier::Group4 => self.group_4,
            Tier::Group5 => self.group_5,
        }
    }

    pub fn total(&self) -> f64 {
        Tier::ALL.iter().map(|tier| self.share(*tier)).sum()
    }
}

impl Default for RewardSchedule {
    fn default() -> Self {
        Self {
            group_2: GROUP_2_SHARE,
            group_3: GROUP_3_SHARE,
            group_4: GROUP_4_SHARE,
            group_5: GROUP_5_SHARE,
        }
    }
}

/// Economics of every draw run by one `Raffle`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaffleConfig {
    /// Added to the pot each time a draw opens.
    pub pot_seed: f64,
    pub ticket_price: f64,
    pub max_tickets_per_participant: u32,
    pub rewards: RewardSchedule,
}

impl RaffleConfig {
    /// Checks the configuration the way it will be used by the draw.
    ///
    /// # Errors
    /// - `InvalidPotSeed` if the seed is negative or not finite
    /// - `InvalidTicketPrice` if the price is not a positive, finite amount
    /// - `MaxTicketsTooLow` if participants could not buy a single ticket
    /// - `InvalidRewardShare` if any tier share is negative or not finite
    /// - `RewardSharesExceedPot` if the tiers together could pay out more than the pot
    pub fn validate(&self) -> Result<()> {
        require!(
            self.pot_seed.is_finite() && self.pot_seed >= 0.0,
            ConfigError::InvalidPotSeed
        );
        require!(
            self.ticket_price.is_finite() && self.ticket_price > 0.0,
            ConfigError::InvalidTicketPrice
        );
        require!(
            self.max_tickets_per_participant > 0,
            ConfigError::MaxTicketsTooLow
        );
        require!(
            Tier::ALL.iter().all(|tier| {
                let share = self.rewards.share(*tier);
                share.is_finite() && share >= 0.0
            }),
            ConfigError::InvalidRewardShare
        );
        require!(
            self.rewards.total() <= 1.0 + SHARE_TOLERANCE,
            ConfigError::RewardSharesExceedPot
        );

        Ok(())
    }
}

impl Default for RaffleConfig {
    fn default() -> Self {
        Self {
            pot_seed: POT_SEED,
            ticket_price: TICKET_PRICE,
            max_tickets_per_participant: MAX_TICKETS_PER_PARTICIPANT,
            rewards: RewardSchedule::default(),
        }
    }
}
