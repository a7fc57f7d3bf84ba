use crate::event::Event;
use crate::event::TimerKey;
use crate::EventSender;

use std::time::Duration;

use tokio::task::JoinHandle;

use tracing::trace;

/// One-shot timer that reports firing as an event carrying its key.
pub trait Timer {
    fn arm(&mut self, after: Duration, key: TimerKey);

    /// Cancel the timer armed with `key`.  Cancelling a timer that already fired, or was never
    /// armed, does nothing.
    fn cancel(&mut self, key: TimerKey);
}

/// A timer backed by a tokio task that sends [`Event::Timer`] when it expires.
#[derive(Debug)]
pub struct TokioTimer {
    tx: EventSender,
    armed: Option<(TimerKey, JoinHandle<()>)>,
}

impl TokioTimer {
    pub fn new(tx: EventSender) -> Self {
        TokioTimer { tx, armed: None }
    }
}

impl Timer for TokioTimer {
    fn arm(&mut self, after: Duration, key: TimerKey) {
        if let Some((_, handle)) = self.armed.take() {
            handle.abort();
        }

        let tx = self.tx.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(after).await;

            trace!("timer {:?} fired", key);

            let _ = tx.send(Event::Timer(key));
        });

        self.armed = Some((key, handle));
    }

    fn cancel(&mut self, key: TimerKey) {
        match self.armed.take() {
            Some((k, handle)) if k == key => handle.abort(),
            other => self.armed = other,
        }
    }
}
