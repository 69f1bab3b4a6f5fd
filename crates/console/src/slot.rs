//! Single-slot request tokens.
//!
//! Each resource owns one slot. Triggering an action issues a new ticket and
//! thereby invalidates every ticket issued before it, so a response that
//! arrives after a newer action was triggered is ignored. The last action by
//! trigger order wins, regardless of completion order.

/// Proof of which trigger a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Generation counter for one resource.
#[derive(Debug, Default)]
pub struct RequestSlot {
    generation: u64,
}

impl RequestSlot {
    #[must_use]
    pub const fn new() -> Self {
        Self { generation: 0 }
    }

    /// Issue a ticket for a new trigger, superseding all earlier tickets.
    pub const fn issue(&mut self) -> Ticket {
        self.generation = self.generation.wrapping_add(1);
        Ticket(self.generation)
    }

    /// Whether `ticket` belongs to the most recent trigger.
    #[must_use]
    pub const fn is_current(&self, ticket: Ticket) -> bool {
        self.generation == ticket.0
    }
}
