use anchor_lang::prelude::*;
use rand::Rng;

use crate::{
    log,
    error::{DrawError, DrawResult},
    state::{raffle::checked_amount, Participant, Raffle, Ticket, Tier, TierWinner},
};

/// Payout summary for one tier
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct TierPayout {
    pub tier: Tier,
    /// Winning tickets across all participants in the tier
    pub winning_tickets: u32,
    /// Total paid to the tier, zero when nobody won it
    pub rewards: f64,
}

/// Event emitted when a draw is executed
#[event]
pub struct DrawExecuted {
    /// The drawn winning ticket
    pub winning_ticket: Ticket,
    /// One entry per tier, lowest tier first
    pub payouts: Vec<TierPayout>,
    /// Sum of all rewards paid out
    pub total_rewards: f64,
    /// Pot size left for the next draw
    pub pot_size: f64,
}

impl<R: Rng> Raffle<R> {
    /// Draws the winning ticket and pays out every tier.
    ///
    /// Each tier's share is taken from the pot as it stood before execution and
    /// split evenly per winning ticket, so a participant's reward is proportional
    /// to their winning tickets in that tier. A tier nobody won pays nothing and
    /// its share stays in the pot.
    ///
    /// After execution:
    /// - The winning ticket and tier winners can be read from the raffle
    /// - The pot is reduced by the total rewards paid
    /// - The draw is closed and stays closed until `start_draw`
    ///
    /// # Errors
    /// - `DrawNotOpen` if no draw is open
    /// - `Overflow` if a reward or the remaining pot is not a finite amount;
    ///   the draw then stays open with nothing paid out
    pub fn execute_draw(&mut self) -> DrawResult<()> {
        if !self.open {
            return Err(DrawError::DrawNotOpen);
        }

        let winning_ticket = Ticket::generate(&mut self.rng);
        self.settle(winning_ticket)
    }

    pub(crate) fn settle(&mut self, winning_ticket: Ticket) -> DrawResult<()> {
        let pot_size = checked_amount(self.pot_size)?;
        let mut tier_winners = group_winners(&self.participants, &winning_ticket);
        let mut payouts = Vec::with_capacity(Tier::ALL.len());
        let mut total_rewards = 0.0;

        for tier in Tier::ALL {
            let winners = std::mem::take(&mut tier_winners[tier.index()]);
            let winning_tickets = winners.iter().map(|w| w.tickets.len()).sum::<usize>() as u32;
            let tier_share = checked_amount(self.config.rewards.share(tier) * pot_size)?;

            let (winners, rewards) = distribute_rewards(winners, tier_share);
            tier_winners[tier.index()] = winners;
            total_rewards = checked_amount(total_rewards + rewards)?;
            payouts.push(TierPayout {
                tier,
                winning_tickets,
                rewards,
            });
        }

        // Nothing is committed until every amount is known to be finite
        self.pot_size = checked_amount(pot_size - total_rewards)?;
        self.total_rewards = total_rewards;
        self.tier_winners = tier_winners;
        self.open = false;

        log!(
            "Draw executed, winning ticket: {}, rewards paid: {}, pot size: {}",
            winning_ticket,
            total_rewards,
            self.pot_size
        );
        emit!(DrawExecuted {
            winning_ticket: winning_ticket.clone(),
            payouts,
            total_rewards,
            pot_size: self.pot_size,
        });

        self.winning_ticket = Some(winning_ticket);

        Ok(())
    }
}

/// Buckets every ticket by match count. Each participant appears at most once
/// per tier, with all of their winning tickets for that tier.
fn group_winners(participants: &[Participant], winning_ticket: &Ticket) -> [Vec<TierWinner>; 4] {
    let mut tier_winners: [Vec<TierWinner>; 4] = Default::default();

    for participant in participants {
        for ticket in participant.tickets() {
            let Some(tier) = Tier::from_matches(ticket.matches(winning_ticket)) else {
                continue;
            };

            // Participants are visited one at a time, so their entry is always the last one
            let winners = &mut tier_winners[tier.index()];
            match winners.last_mut() {
                Some(winner) if winner.participant == participant.name() => {
                    winner.tickets.push(ticket.clone());
                }
                _ => winners.push(TierWinner {
                    participant: participant.name().to_string(),
                    tickets: vec![ticket.clone()],
                    reward: 0.0,
                }),
            }
        }
    }

    tier_winners
}

/// Splits `tier_share` across the tier's winning tickets. Returns the paid
/// entries and the amount actually paid out.
fn distribute_rewards(winners: Vec<TierWinner>, tier_share: f64) -> (Vec<TierWinner>, f64) {
    let total_tickets: usize = winners.iter().map(|w| w.tickets.len()).sum();
    if total_tickets == 0 {
        return (winners, 0.0);
    }

    let mut paid = 0.0;
    let winners = winners
        .into_iter()
        .map(|winner| {
            let reward = tier_share / total_tickets as f64 * winner.tickets.len() as f64;
            paid += reward;
            TierWinner { reward, ..winner }
        })
        .collect();

    (winners, paid)
}

#[cfg(test)]
mod tests {
    use crate::state::{RaffleConfig, RewardSchedule, POT_SEED, TICKET_PRICE};

    use super::*;

    fn ticket(numbers: [u8; 5]) -> Ticket {
        Ticket::from_numbers(numbers).unwrap()
    }

    /// Opens a draw and hands out fixed tickets instead of generated ones.
    fn scripted_raffle(config: RaffleConfig, holdings: &[(&str, Vec<Ticket>)]) -> Raffle {
        let mut raffle = Raffle::with_seed(config, 5).unwrap();
        raffle.start_draw().unwrap();
        for (name, tickets) in holdings {
            let mut participant = Participant::new(*name);
            participant.add_tickets(tickets);
            raffle.pot_size += tickets.len() as f64 * config.ticket_price;
            raffle.participants.push(participant);
        }
        raffle
    }

    fn rewards_paid(raffle: &Raffle) -> f64 {
        Tier::ALL
            .iter()
            .flat_map(|tier| raffle.tier_winners(*tier))
            .map(|winner| winner.reward)
            .sum()
    }

    #[test]
    fn fails_before_a_draw_is_started() {
        let mut raffle = Raffle::with_seed(RaffleConfig::default(), 5).unwrap();

        assert_eq!(raffle.execute_draw().unwrap_err(), DrawError::DrawNotOpen);
        assert!(raffle.winning_ticket().is_none());
    }

    #[test]
    fn equal_holdings_split_a_tier_evenly() {
        let winning = ticket([1, 2, 3, 4, 5]);
        let mut raffle = scripted_raffle(
            RaffleConfig::default(),
            &[
                ("User1", vec![ticket([1, 2, 6, 7, 8]), ticket([9, 10, 11, 12, 13])]),
                ("User2", vec![ticket([3, 14, 4, 15, 6]), ticket([6, 7, 8, 9, 10])]),
            ],
        );
        assert_eq!(raffle.pot_size(), POT_SEED + 4.0 * TICKET_PRICE);

        raffle.settle(winning.clone()).unwrap();

        assert_eq!(raffle.winning_ticket(), Some(&winning));
        assert_eq!(raffle.tier_winners(Tier::Group2).len(), 2);
        assert!(raffle.tier_winners(Tier::Group3).is_empty());
        assert!(raffle.tier_winners(Tier::Group4).is_empty());
        assert!(raffle.tier_winners(Tier::Group5).is_empty());
        assert_eq!(raffle.tier_winner(Tier::Group2, "User1").unwrap().reward, 6.0);
        assert_eq!(raffle.tier_winner(Tier::Group2, "User2").unwrap().reward, 6.0);
        assert_eq!(raffle.pot_size(), 108.0);
        assert_eq!(raffle.total_rewards(), 12.0);
        assert!(!raffle.is_open());
    }

    #[test]
    fn rewards_follow_winning_ticket_counts() {
        let winning = ticket([1, 2, 3, 4, 5]);
        let mut raffle = scripted_raffle(
            RaffleConfig::default(),
            &[
                (
                    "Ann",
                    vec![
                        ticket([1, 2, 3, 9, 10]),
                        ticket([3, 4, 5, 11, 12]),
                        ticket([1, 13, 14, 15, 6]),
                    ],
                ),
                ("Ben", vec![ticket([2, 4, 5, 7, 8])]),
            ],
        );
        // 100 + 4 tickets at 5
        let tier_share = 0.15 * 120.0;

        raffle.settle(winning).unwrap();

        let ann = raffle.tier_winner(Tier::Group3, "Ann").unwrap();
        let ben = raffle.tier_winner(Tier::Group3, "Ben").unwrap();
        assert_eq!(ann.tickets.len(), 2);
        assert_eq!(ben.tickets.len(), 1);
        assert_eq!(ann.reward, tier_share / 3.0 * 2.0);
        assert_eq!(ben.reward, tier_share / 3.0);
        assert!(raffle.tier_winners(Tier::Group2).is_empty());
    }

    #[test]
    fn each_ticket_lands_in_exactly_one_tier() {
        let winning = ticket([1, 2, 3, 4, 5]);
        let mut raffle = scripted_raffle(
            RaffleConfig::default(),
            &[(
                "Cleo",
                vec![
                    ticket([1, 2, 10, 11, 12]),
                    ticket([1, 2, 3, 11, 12]),
                    ticket([1, 2, 3, 4, 12]),
                    ticket([5, 4, 3, 2, 1]),
                    ticket([1, 10, 11, 12, 13]),
                ],
            )],
        );
        let pot_size = raffle.pot_size();

        raffle.settle(winning).unwrap();

        for tier in Tier::ALL {
            let winners = raffle.tier_winners(tier);
            assert_eq!(winners.len(), 1, "{}", tier.label());
            assert_eq!(winners[0].tickets.len(), 1);
            for ticket in &winners[0].tickets {
                assert_eq!(ticket.matches(raffle.winning_ticket().unwrap()), tier.matches());
            }
        }
        // Every tier paid out with the default schedule, so the whole pot is gone
        assert!((raffle.pot_size() - 0.0).abs() < 1e-9 * pot_size);
    }

    #[test]
    fn unwon_tiers_pay_nothing_and_stay_in_the_pot() {
        let mut raffle = scripted_raffle(
            RaffleConfig::default(),
            &[("Dee", vec![ticket([11, 12, 13, 14, 15])])],
        );
        let pot_size = raffle.pot_size();

        raffle.settle(ticket([1, 2, 3, 4, 5])).unwrap();

        for tier in Tier::ALL {
            assert!(raffle.tier_winners(tier).is_empty());
        }
        assert_eq!(raffle.total_rewards(), 0.0);
        assert_eq!(raffle.pot_size(), pot_size);
    }

    #[test]
    fn settling_an_empty_draw_keeps_the_seed() {
        let mut raffle = scripted_raffle(RaffleConfig::default(), &[]);

        raffle.settle(ticket([1, 2, 3, 4, 5])).unwrap();

        assert_eq!(raffle.pot_size(), POT_SEED);
        assert!(!raffle.is_open());
    }

    #[test]
    fn pot_decreases_by_exactly_the_rewards_paid() {
        let config = RaffleConfig {
            rewards: RewardSchedule {
                group_2: 0.125,
                group_3: 0.25,
                group_4: 0.125,
                group_5: 0.5,
            },
            ..RaffleConfig::default()
        };
        let mut raffle = scripted_raffle(
            config,
            &[
                ("Eli", vec![ticket([1, 2, 9, 10, 11]), ticket([1, 2, 3, 10, 11])]),
                ("Fay", vec![ticket([4, 5, 12, 13, 14]), ticket([1, 2, 3, 4, 15])]),
            ],
        );
        let before = raffle.pot_size();

        raffle.settle(ticket([1, 2, 3, 4, 5])).unwrap();

        assert_eq!(rewards_paid(&raffle), before - raffle.pot_size());
        assert_eq!(raffle.total_rewards(), rewards_paid(&raffle));
    }

    #[test]
    fn infinite_pot_is_refused_without_paying_out() {
        let mut raffle = scripted_raffle(
            RaffleConfig::default(),
            &[("Hal", vec![ticket([1, 2, 9, 10, 11])])],
        );
        raffle.pot_size = f64::INFINITY;

        let err = raffle.settle(ticket([1, 2, 3, 4, 5])).unwrap_err();

        assert_eq!(err, DrawError::Overflow);
        assert!(raffle.is_open());
        assert!(raffle.winning_ticket().is_none());
        assert!(raffle.tier_winners(Tier::Group2).is_empty());
    }

    #[test]
    fn rewards_summing_past_a_finite_amount_are_an_overflow() {
        // Within the share tolerance, but a hair over the whole pot
        let config = RaffleConfig {
            pot_seed: f64::MAX,
            rewards: RewardSchedule {
                group_5: 0.5 + 5e-10,
                ..RewardSchedule::default()
            },
            ..RaffleConfig::default()
        };
        let mut raffle = scripted_raffle(
            config,
            &[(
                "Ida",
                vec![
                    ticket([1, 2, 10, 11, 12]),
                    ticket([1, 2, 3, 11, 12]),
                    ticket([1, 2, 3, 4, 12]),
                    ticket([5, 4, 3, 2, 1]),
                ],
            )],
        );

        assert_eq!(
            raffle.settle(ticket([1, 2, 3, 4, 5])).unwrap_err(),
            DrawError::Overflow
        );
        assert!(raffle.is_open());
        assert_eq!(raffle.pot_size(), f64::MAX);
    }
}
