use anchor_lang::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    log,
    error::{DrawError, DrawResult},
    state::{Participant, RaffleConfig, Ticket},
};

/// Rejects amounts that overflowed to infinity or lost meaning as NaN.
pub(crate) fn checked_amount(amount: f64) -> DrawResult<f64> {
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(DrawError::Overflow)
    }
}

/// Match-count bucket that wins a share of the pot.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    Group2,
    Group3,
    Group4,
    Group5,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Group2, Tier::Group3, Tier::Group4, Tier::Group5];

    /// Tickets matching fewer than two numbers win nothing.
    pub fn from_matches(matches: usize) -> Option<Tier> {
        match matches {
            2 => Some(Tier::Group2),
            3 => Some(Tier::Group3),
            4 => Some(Tier::Group4),
            5 => Some(Tier::Group5),
            _ => None,
        }
    }

    pub fn matches(self) -> usize {
        self.index() + 2
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Group2 => "Group 2 Winners",
            Tier::Group3 => "Group 3 Winners",
            Tier::Group4 => "Group 4 Winners",
            Tier::Group5 => "Group 5 Winners (Jackpot)",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Tier::Group2 => 0,
            Tier::Group3 => 1,
            Tier::Group4 => 2,
            Tier::Group5 => 3,
        }
    }
}

/// One participant's winning tickets in a tier and what they were paid for them.
#[derive(Clone, Debug, PartialEq)]
pub struct TierWinner {
    pub participant: String,
    pub tickets: Vec<Ticket>,
    pub reward: f64,
}

/// The draw aggregate. Purchases and executions only happen while `open`.
pub struct Raffle<R = StdRng> {
    pub(crate) rng: R,
    pub(crate) config: RaffleConfig,
    pub(crate) open: bool,
    pub(crate) pot_size: f64,
    pub(crate) winning_ticket: Option<Ticket>,
    /// In order of first purchase.
    pub(crate) participants: Vec<Participant>,
    /// Indexed by `Tier::index`, empty until the draw is executed.
    pub(crate) tier_winners: [Vec<TierWinner>; 4],
    pub(crate) total_rewards: f64,
}

impl Raffle<StdRng> {
    /// Seeds the draw from the thread-local generator; the seed is logged so the session can be replayed.
    pub fn new(config: RaffleConfig) -> Result<Self> {
        let seed: u64 = rand::thread_rng().gen();
        log!("Raffle seeded with {}", seed);
        Self::with_seed(config, seed)
    }

    pub fn with_seed(config: RaffleConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Raffle<R> {
    pub fn with_rng(config: RaffleConfig, rng: R) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            rng,
            config,
            open: false,
            pot_size: 0.0,
            winning_ticket: None,
            participants: Vec::new(),
            tier_winners: Default::default(),
            total_rewards: 0.0,
        })
    }

    pub fn config(&self) -> &RaffleConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn pot_size(&self) -> f64 {
        self.pot_size
    }

    pub fn winning_ticket(&self) -> Option<&Ticket> {
        self.winning_ticket.as_ref()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name() == name)
    }

    pub fn tier_winners(&self, tier: Tier) -> &[TierWinner] {
        &self.tier_winners[tier.index()]
    }

    pub fn tier_winner(&self, tier: Tier, name: &str) -> Option<&TierWinner> {
        self.tier_winners(tier)
            .iter()
            .find(|winner| winner.participant == name)
    }

    /// Rewards paid out by the most recent execution.
    pub fn total_rewards(&self) -> f64 {
        self.total_rewards
    }
}
