//! Cancellable frame scheduling

/// Identifies one requested frame callback
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTicket(u64);

/// Holds at most one pending frame request.
///
/// The host asks `is_scheduled()` before requesting a redraw; the loop
/// consumes the ticket at the top of each frame and only schedules the
/// next one while running.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: Option<FrameTicket>,
    next_id: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the next frame, replacing any pending request
    pub fn schedule(&mut self) -> FrameTicket {
        self.next_id += 1;
        let ticket = FrameTicket(self.next_id);
        self.pending = Some(ticket);
        ticket
    }

    /// Drop the pending request, returning it if there was one
    pub fn cancel(&mut self) -> Option<FrameTicket> {
        self.pending.take()
    }

    /// Consume the pending request for the frame now running
    pub fn take(&mut self) -> Option<FrameTicket> {
        self.pending.take()
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }
}
