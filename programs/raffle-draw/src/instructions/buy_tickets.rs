use anchor_lang::prelude::*;
use rand::Rng;

use crate::{
    log,
    error::{DrawError, DrawResult},
    state::{raffle::checked_amount, Participant, Raffle, Ticket},
};

/// Event emitted when tickets are purchased
#[event]
pub struct TicketsPurchased {
    /// Name of the buyer
    pub participant: String,
    /// Tickets generated by this purchase only
    pub tickets: Vec<Ticket>,
    /// Amount added to the pot
    pub payment_amount: f64,
    /// Pot size after the purchase
    pub pot_size: f64,
}

impl<R: Rng> Raffle<R> {
    /// Buys `ticket_count` freshly generated tickets for the participant called `name`.
    ///
    /// The participant is created on their first successful purchase in the
    /// current draw. Returns the participant together with the tickets from this
    /// purchase only, not their full history.
    ///
    /// # Errors
    /// - `DrawNotOpen` if no draw is open
    /// - `EmptyParticipantName` if `name` is blank
    /// - `InvalidTicketCount` if `ticket_count` is zero
    /// - `TicketLimitExceeded` if the purchase would take the participant past
    ///   the configured maximum; carries how many tickets they may still buy
    /// - `Overflow` if the payment or the new pot size is not a finite amount
    ///
    /// A failed purchase leaves the pot and the roster untouched.
    pub fn buy_tickets(
        &mut self,
        name: &str,
        ticket_count: u32,
    ) -> DrawResult<(&Participant, Vec<Ticket>)> {
        if !self.open {
            return Err(DrawError::DrawNotOpen);
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(DrawError::EmptyParticipantName);
        }
        if ticket_count == 0 {
            return Err(DrawError::InvalidTicketCount);
        }

        let index = self.participants.iter().position(|p| p.name() == name);
        let owned = index.map_or(0, |i| self.participants[i].ticket_count());

        // Check the limit before anything is generated or charged
        let max = self.config.max_tickets_per_participant;
        let exceeds = owned
            .checked_add(ticket_count)
            .map_or(true, |total| total > max);
        if exceeds {
            return Err(DrawError::TicketLimitExceeded {
                remaining: max.saturating_sub(owned),
                max,
            });
        }

        let payment_amount = checked_amount(f64::from(ticket_count) * self.config.ticket_price)?;
        let pot_size = checked_amount(self.pot_size + payment_amount)?;

        let tickets: Vec<Ticket> = (0..ticket_count)
            .map(|_| Ticket::generate(&mut self.rng))
            .collect();
        self.pot_size = pot_size;

        let index = match index {
            Some(i) => i,
            None => {
                self.participants.push(Participant::new(name));
                self.participants.len() - 1
            }
        };
        self.participants[index].add_tickets(&tickets);

        log!(
            "{} bought {} ticket(s), pot size: {}",
            name,
            ticket_count,
            self.pot_size
        );
        emit!(TicketsPurchased {
            participant: name.to_string(),
            tickets: tickets.clone(),
            payment_amount,
            pot_size: self.pot_size,
        });

        Ok((&self.participants[index], tickets))
    }
}
