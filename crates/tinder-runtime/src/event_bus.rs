//! Per-frame queue of `GameEvent`s
//!
//! Simulations and the loop append; the host drains once per frame and
//! routes the batch to audio, HUD and renderer in emission order.

use crate::event::GameEvent;

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<GameEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.queue.push(event);
    }

    /// Append several events keeping their order
    pub fn push_all(&mut self, events: impl IntoIterator<Item = GameEvent>) {
        self.queue.extend(events);
    }

    /// Take the whole batch, leaving the queue empty
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.queue)
    }

    pub fn pending(&self) -> &[GameEvent] {
        &self.queue
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_keeps_emission_order() {
        let mut bus = EventBus::new();
        bus.push(GameEvent::Jumped);
        bus.push_all([GameEvent::CoinCollected { total: 1 }, GameEvent::Started]);

        assert_eq!(bus.len(), 3);
        assert_eq!(bus.pending()[0], GameEvent::Jumped);
        assert_eq!(bus.pending()[2], GameEvent::Started);

        let batch = bus.drain();
        assert_eq!(batch[1], GameEvent::CoinCollected { total: 1 });
        assert!(bus.is_empty());
        assert!(bus.drain().is_empty());
    }
}
