use std::{fmt, io::Write};

use rand::{rngs::StdRng, Rng};

use crate::state::{Raffle, Tier};

pub const MENU: [&str; 3] = ["[1] Start a New Draw", "[2] Buy Tickets", "[3] Run Raffle"];
pub const PURCHASE_PROMPT: &str =
    "Enter your name, number of tickets to purchase (e.g., James,1): ";

/// Entry picked from the main menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    StartDraw,
    BuyTickets,
    RunDraw,
}

/// A fully parsed request for the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    StartDraw,
    BuyTickets { name: String, count: u32 },
    RunDraw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputError {
    InvalidChoice,
    InvalidPurchaseFormat,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::InvalidChoice => write!(f, "Invalid choice. Please enter 1, 2, or 3."),
            InputError::InvalidPurchaseFormat => write!(
                f,
                "Invalid input format. Please enter name and number of tickets."
            ),
        }
    }
}

impl std::error::Error for InputError {}

pub fn parse_choice(input: &str) -> Result<MenuChoice, InputError> {
    match input.trim() {
        "1" => Ok(MenuChoice::StartDraw),
        "2" => Ok(MenuChoice::BuyTickets),
        "3" => Ok(MenuChoice::RunDraw),
        _ => Err(InputError::InvalidChoice),
    }
}

/// Parses a `name,count` purchase line. Blank names and zero counts are left
/// for the engine to reject.
pub fn parse_purchase(input: &str) -> Result<Command, InputError> {
    let mut parts = input.trim().split(',');
    let (Some(name), Some(count), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(InputError::InvalidPurchaseFormat);
    };
    let count = count
        .trim()
        .parse::<u32>()
        .map_err(|_| InputError::InvalidPurchaseFormat)?;

    Ok(Command::BuyTickets {
        name: name.trim().to_string(),
        count,
    })
}

/// Runs commands against one raffle and renders the outcome as text.
pub struct RaffleService<R = StdRng> {
    raffle: Raffle<R>,
}

impl<R: Rng> RaffleService<R> {
    pub fn new(raffle: Raffle<R>) -> Self {
        Self { raffle }
    }

    pub fn raffle(&self) -> &Raffle<R> {
        &self.raffle
    }

    pub fn status(&self) -> String {
        if self.raffle.is_open() {
            format!(
                "Draw is ongoing. Raffle pot size is ${}",
                self.raffle.pot_size()
            )
        } else {
            "Draw has not started".to_string()
        }
    }

    /// Executes `command` and writes what happened to `out`. Engine errors are
    /// written as their message; only I/O failures are returned.
    pub fn dispatch<W: Write>(&mut self, command: Command, out: &mut W) -> std::io::Result<()> {
        match command {
            Command::StartDraw => self.start_draw(out),
            Command::BuyTickets { name, count } => self.buy_tickets(&name, count, out),
            Command::RunDraw => self.run_draw(out),
        }
    }

    fn start_draw<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        if let Err(err) = self.raffle.start_draw() {
            return writeln!(out, "{err}");
        }
        writeln!(
            out,
            "New Raffle draw has been started. Initial pot size: ${}",
            self.raffle.pot_size()
        )
    }

    fn buy_tickets<W: Write>(&mut self, name: &str, count: u32, out: &mut W) -> std::io::Result<()> {
        let (participant, tickets) = match self.raffle.buy_tickets(name, count) {
            Ok(purchase) => purchase,
            Err(err) => return writeln!(out, "{err}"),
        };

        writeln!(
            out,
            "Hi {}, you have purchased {} ticket{}",
            participant.name(),
            count,
            if count > 1 { "s" } else { "" }
        )?;
        for (i, ticket) in tickets.iter().enumerate() {
            writeln!(out, "Ticket {}: {}", i + 1, ticket)?;
        }
        writeln!(out)
    }

    fn run_draw<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "Running Raffle..")?;
        if let Err(err) = self.raffle.execute_draw() {
            return writeln!(out, "{err}");
        }

        if let Some(ticket) = self.raffle.winning_ticket() {
            writeln!(out, "Winning Ticket is {ticket}")?;
        }
        for tier in Tier::ALL {
            writeln!(out, "{}:", tier.label())?;
            let winners = self.raffle.tier_winners(tier);
            if winners.is_empty() {
                writeln!(out, "Nil")?;
            }
            for winner in winners {
                writeln!(
                    out,
                    "{} with {} winning ticket(s) - ${}",
                    winner.participant,
                    winner.tickets.len(),
                    winner.reward
                )?;
            }
            writeln!(out)?;
        }

        Ok(())
    }
}
