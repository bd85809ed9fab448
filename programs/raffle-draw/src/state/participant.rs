use super::Ticket;

/// A named buyer within the current draw. Discarded when the next draw opens.
#[derive(Clone, Debug, PartialEq)]
pub struct Participant {
    name: String,
    tickets: Vec<Ticket>,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tickets: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn ticket_count(&self) -> u32 {
        self.tickets.len() as u32
    }

    pub(crate) fn add_tickets(&mut self, tickets: &[Ticket]) {
        self.tickets.extend_from_slice(tickets);
    }
}
