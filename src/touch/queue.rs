//! Hand-off from touch source threads into the single-threaded main loop.
//!
//! Stroke state is only ever mutated on the loop thread. A source running on
//! its own thread pushes [`LoopEvent`]s through a [`LoopSender`] and returns
//! at once; the loop drains the [`LoopQueue`] once per iteration.

use std::sync::mpsc::{self, Receiver, Sender};

use super::TouchEvent;

/// Events injected into the main loop from other threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoopEvent {
    /// A translated touch sample.
    Touch(TouchEvent),
    /// The source feeding this queue stopped producing events.
    SourceClosed,
}

/// Cloneable, thread-safe producer side of the loop queue.
#[derive(Debug, Clone)]
pub struct LoopSender {
    tx: Sender<LoopEvent>,
}

impl LoopSender {
    /// Enqueues an event without blocking.
    ///
    /// Returns `false` once the loop side is gone.
    pub fn send(&self, event: LoopEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Consumer side, owned by the main loop.
#[derive(Debug)]
pub struct LoopQueue {
    rx: Receiver<LoopEvent>,
}

impl LoopQueue {
    pub fn new() -> (LoopSender, LoopQueue) {
        let (tx, rx) = mpsc::channel();
        (LoopSender { tx }, LoopQueue { rx })
    }

    /// Takes everything queued so far, never blocking.
    pub fn drain(&self) -> impl Iterator<Item = LoopEvent> + '_ {
        self.rx.try_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn events_from_other_threads_arrive_in_send_order() {
        let (tx, queue) = LoopQueue::new();
        let producer = thread::spawn(move || {
            for id in 0..5 {
                assert!(tx.send(LoopEvent::Touch(TouchEvent::began(id, 0.5, 0.5))));
            }
        });
        producer.join().unwrap();

        let ids: Vec<u32> = queue
            .drain()
            .filter_map(|event| match event {
                LoopEvent::Touch(touch) => Some(touch.contact_id),
                LoopEvent::SourceClosed => None,
            })
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn drain_on_empty_queue_returns_immediately() {
        let (_tx, queue) = LoopQueue::new();
        assert_eq!(queue.drain().count(), 0);
    }

    #[test]
    fn send_reports_closed_loop() {
        let (tx, queue) = LoopQueue::new();
        drop(queue);
        assert!(!tx.send(LoopEvent::SourceClosed));
    }
}
