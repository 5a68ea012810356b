//! Latest-wins debouncing.
//!
//! The debouncer does not own a clock. Callers arm it with a scheduling
//! closure that starts a platform timer and returns its handle; when that timer
//! fires they hand the [`Ticket`] back through [`Debouncer::fire`]. Only the
//! most recently armed ticket yields its text, so a timer that escaped
//! cancellation can never run a stale search.

/// Identifies one armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// Raw generation number, for passing through platform timer APIs.
    pub fn generation(self) -> u64 {
        self.0
    }

    /// Rebuild a ticket from a generation number.
    pub fn from_generation(generation: u64) -> Self {
        Self(generation)
    }
}

#[derive(Debug)]
struct Pending<H> {
    ticket: Ticket,
    text: String,
    handle: H,
}

/// Holds at most one pending piece of text.
#[derive(Debug)]
pub struct Debouncer<H> {
    delay_ms: u32,
    generation: u64,
    pending: Option<Pending<H>>,
}

impl<H> Debouncer<H> {
    /// Create a debouncer with a fixed delay.
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            generation: 0,
            pending: None,
        }
    }

    /// The configured delay.
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Arm a new timer for `text`, superseding any pending one.
    ///
    /// `schedule` receives the delay and the new ticket and returns the platform
    /// handle. The superseded handle, if any, is returned so the caller can
    /// cancel it.
    pub fn arm(
        &mut self,
        text: impl Into<String>,
        schedule: impl FnOnce(u32, Ticket) -> H,
    ) -> Option<H> {
        let superseded = self.cancel();

        self.generation += 1;
        let ticket = Ticket(self.generation);
        let handle = schedule(self.delay_ms, ticket);
        self.pending = Some(Pending {
            ticket,
            text: text.into(),
            handle,
        });

        superseded
    }

    /// Consume the pending text if `ticket` is the current one.
    ///
    /// Stale tickets return `None` and leave the pending entry untouched.
    pub fn fire(&mut self, ticket: Ticket) -> Option<(String, H)> {
        if !self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.ticket == ticket)
        {
            return None;
        }
        self.pending
            .take()
            .map(|pending| (pending.text, pending.handle))
    }

    /// Drop the pending entry, returning its handle for cancellation.
    pub fn cancel(&mut self) -> Option<H> {
        self.pending.take().map(|pending| pending.handle)
    }

    /// Whether a timer is outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
