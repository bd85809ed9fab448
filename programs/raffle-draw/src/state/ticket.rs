use std::fmt;

use anchor_lang::prelude::*;
use rand::Rng;

use crate::error::{DrawError, DrawResult};

pub const TICKET_SIZE: usize = 5;
pub const MIN_NUMBER: u8 = 1;
pub const MAX_NUMBER: u8 = 15;

/// Five distinct numbers in `MIN_NUMBER..=MAX_NUMBER`, kept in the order they were drawn.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    numbers: [u8; TICKET_SIZE],
}

impl Ticket {
    /// Draws numbers uniformly, rejecting duplicates until the ticket is full.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut numbers = [0u8; TICKET_SIZE];
        let mut drawn = 0;

        while drawn < TICKET_SIZE {
            let number = rng.gen_range(MIN_NUMBER..=MAX_NUMBER);
            if !numbers[..drawn].contains(&number) {
                numbers[drawn] = number;
                drawn += 1;
            }
        }

        Self { numbers }
    }

    pub fn from_numbers(numbers: [u8; TICKET_SIZE]) -> DrawResult<Self> {
        let in_range = numbers
            .iter()
            .all(|number| (MIN_NUMBER..=MAX_NUMBER).contains(number));
        let distinct = numbers
            .iter()
            .enumerate()
            .all(|(i, number)| !numbers[..i].contains(number));

        if !in_range || !distinct {
            return Err(DrawError::InvalidTicketNumbers);
        }

        Ok(Self { numbers })
    }

    pub fn numbers(&self) -> &[u8; TICKET_SIZE] {
        &self.numbers
    }

    /// Size of the intersection with the winning numbers. Both sides hold
    /// distinct numbers, so this is always in `0..=TICKET_SIZE`.
    pub fn matches(&self, winning: &Ticket) -> usize {
        self.numbers
            .iter()
            .filter(|number| winning.numbers.contains(number))
            .count()
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, number) in self.numbers.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{number}")?;
        }
        Ok(())
    }
}
