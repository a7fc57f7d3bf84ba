use crate::event::Event;
use crate::provider::Provider;
use crate::provider::RequestError;
use crate::scheduler::ReportSink;
use crate::scheduler::Scheduler;
use crate::scheduler::State;
use crate::scheduler::Timer;
use crate::EventReceiver;

use std::future::Future;

use tokio::signal;

use tracing::info;
use tracing::warn;

/// Owns a scheduler and feeds it events until acquisition ends.
pub struct Session<P: Provider, T: Timer, S: ReportSink> {
    scheduler: Scheduler<P, T, S>,
    rx: EventReceiver,
}

impl<P: Provider, T: Timer, S: ReportSink> Session<P, T, S> {
    /// `rx` must receive the events produced by the scheduler's provider and timer.
    pub fn new(scheduler: Scheduler<P, T, S>, rx: EventReceiver) -> Self {
        Session { scheduler, rx }
    }

    pub fn scheduler(&self) -> &Scheduler<P, T, S> {
        &self.scheduler
    }

    /// Run until the session ends or the process is interrupted.
    pub async fn run(&mut self) -> Result<(), RequestError> {
        self.run_until(signal::ctrl_c()).await
    }

    /// Run until the session ends or `shutdown` completes.
    pub async fn run_until<F: Future>(&mut self, shutdown: F) -> Result<(), RequestError> {
        tokio::pin!(shutdown);

        if let Err(e) = self.scheduler.start() {
            self.scheduler.stop();

            return Err(e);
        }

        let mut result = Ok(());

        while !self.scheduler.state().is_terminal() {
            tokio::select! {
                event = self.rx.recv() => match event {
                    Some(Event::Fix(ticket, fix)) => self.scheduler.on_fix(ticket, fix),
                    Some(Event::Timer(key)) => {
                        if let Err(e) = self.scheduler.on_timer(key) {
                            result = Err(e);
                        }
                    }
                    None => {
                        warn!("event channel closed");
                        break;
                    }
                },
                _ = &mut shutdown => {
                    info!("shutting down");
                    break;
                }
            }
        }

        if let State::Failed(failure) = self.scheduler.state() {
            info!("acquisition ended: {:?}", failure);
        }

        self.scheduler.stop();

        result
    }
}
