use crate::display::counters;
use crate::display::summary;
use crate::display::time_line;
use crate::display::StatusDisplay;
use crate::display::TracingDisplay;
use crate::event::Ticket;
use crate::event::TimerKey;
use crate::log_sink::LogWriteError;
use crate::position::decode;
use crate::position::FixResult;
use crate::provider::Accuracy;
use crate::provider::FieldMask;
use crate::provider::Provider;
use crate::provider::RequestError;
use crate::provider::TrackingConfig;
use crate::report::ReportEncoder;
use crate::report::ReportLine;
use crate::scheduler::Failure;
use crate::scheduler::State;
use crate::scheduler::Timer;
use crate::settings::RequestType;
use crate::settings::Settings;

use std::time::Duration;

use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

/// Destination for encoded reports.
pub trait ReportSink {
    fn append(&mut self, line: &ReportLine) -> Result<(), LogWriteError>;
}

/// Drives fix requests for one session.
///
/// All transitions happen on calls from the event loop: `start`, `on_fix` when a response
/// arrives, `on_timer` when the interval timer fires, and `stop`.  At most one request is
/// outstanding at any time.
pub struct Scheduler<P: Provider, T: Timer, S: ReportSink> {
    provider: P,
    timer: T,
    sink: S,
    display: Box<dyn StatusDisplay>,
    encoder: ReportEncoder,
    settings: Settings,
    interval: Duration,
    state: State,
    armed: Option<TimerKey>,
    registration: Option<Ticket>,
    requests: u32,
    responses: u32,
    next_ticket: u64,
    next_timer: u64,
}

impl<P: Provider, T: Timer, S: ReportSink> Scheduler<P, T, S> {
    pub fn new(
        provider: P,
        timer: T,
        sink: S,
        encoder: ReportEncoder,
        settings: Settings,
        interval: Duration,
    ) -> Self {
        Scheduler {
            provider,
            timer,
            sink,
            display: Box::new(TracingDisplay::default()),
            encoder,
            settings,
            interval,
            state: State::Idle,
            armed: None,
            registration: None,
            requests: 0,
            responses: 0,
            next_ticket: 0,
            next_timer: 0,
        }
    }

    pub fn with_display(mut self, display: Box<dyn StatusDisplay>) -> Self {
        self.display = display;
        self
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn requests(&self) -> u32 {
        self.requests
    }

    pub fn responses(&self) -> u32 {
        self.responses
    }

    pub fn armed(&self) -> Option<TimerKey> {
        self.armed
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Begin acquiring according to the request type in the settings.
    ///
    /// Provider configuration is best effort.  A refused fix request fails the session and is
    /// returned.
    pub fn start(&mut self) -> Result<(), RequestError> {
        if self.state.is_busy() {
            return Ok(());
        }

        let config = match self.settings.request_type {
            RequestType::Single => TrackingConfig::single(&self.settings),
            RequestType::Repeating => TrackingConfig::network(&self.settings, self.interval),
        };

        if let Err(e) = self.provider.configure(&config) {
            warn!("provider configuration {:?} not applied: {}", config.mode, e);
        }

        info!(
            "starting {:?} acquisition, interval {:?}",
            self.settings.request_type, self.interval
        );

        self.state = State::Idle;

        self.advance()
    }

    /// Issue the next fix request unless one is already outstanding.  The registration for the
    /// previous request is cancelled first.
    pub fn advance(&mut self) -> Result<(), RequestError> {
        match self.state {
            State::Idle => (),
            State::RequestInFlight(ticket) => {
                debug!("still waiting for {:?}", ticket);

                return Ok(());
            }
            _ => return Ok(()),
        }

        let accuracy = match self.settings.request_type {
            RequestType::Single => Accuracy::Level6,
            RequestType::Repeating => Accuracy::Level1,
        };

        let fields = FieldMask::LOCATION | FieldMask::ALTITUDE | FieldMask::VELOCITY;

        if let Some(previous) = self.registration.take() {
            self.provider.cancel(previous);
        }

        self.next_ticket += 1;
        let ticket = Ticket::new(self.next_ticket);

        if let Err(e) = self.provider.request_fix(fields, accuracy, ticket) {
            error!("fix request failed: {}", e);
            self.state = State::Failed(Failure::Request(e.clone()));

            return Err(e);
        }

        self.state = State::RequestInFlight(ticket);
        self.registration = Some(ticket);
        self.requests += 1;

        self.display.print(0, 2, &format!("req : {}", self.requests));

        Ok(())
    }

    /// Handle the provider's response to `ticket`.  Responses to anything but the outstanding
    /// request are dropped.
    pub fn on_fix(&mut self, ticket: Ticket, result: FixResult) {
        match self.state {
            State::RequestInFlight(t) if t == ticket => (),
            _ => {
                debug!("dropping response for {:?} in state {:?}", ticket, self.state);

                return;
            }
        }

        self.responses += 1;
        self.state = State::Idle;

        if !result.is_usable() {
            let code = result.status.code();

            error!("fix {} unusable, status {}", result.fix_number, code);
            self.display
                .print(1, 2, &format!("error: GetGPSInfo status = {}", code));

            self.state = match self.settings.request_type {
                RequestType::Single => State::Done,
                RequestType::Repeating => State::Failed(Failure::Status(result.status)),
            };

            return;
        }

        self.state = State::Reporting;
        self.report(&result);

        match self.settings.request_type {
            RequestType::Single => self.state = State::Done,
            RequestType::Repeating => {
                self.arm();
                self.state = State::Idle;
            }
        }
    }

    /// Handle the interval timer firing.
    pub fn on_timer(&mut self, key: TimerKey) -> Result<(), RequestError> {
        if self.armed != Some(key) {
            debug!("dropping stale timer {:?}", key);

            return Ok(());
        }

        self.armed = None;

        self.advance()
    }

    /// Cancel the armed timer and the outstanding request.  Safe to call in any state.
    pub fn stop(&mut self) {
        if let Some(key) = self.armed.take() {
            self.timer.cancel(key);
        }

        if let State::RequestInFlight(ticket) = self.state {
            self.provider.cancel(ticket);
        }

        self.registration = None;

        if self.state != State::Stopped {
            info!(
                "stopped after {} requests, {} responses",
                self.requests, self.responses
            );
        }

        self.state = State::Stopped;
    }

    fn arm(&mut self) {
        self.next_timer += 1;
        let key = TimerKey::new(self.next_timer);

        self.timer.arm(self.interval, key);
        self.armed = Some(key);
    }

    fn show(&mut self, lines: &[String]) {
        self.display.clear();

        for (line, text) in lines.iter().enumerate() {
            self.display.print(line, 2, text);
        }
    }

    fn report(&mut self, result: &FixResult) {
        let record = match decode(result) {
            Ok(r) => r,
            Err(e) => {
                warn!("unable to decode fix {}: {}", result.fix_number, e);

                let mut lines = counters(self.requests, self.responses);
                lines.push(time_line(result.timestamp));
                self.show(&lines);

                return;
            }
        };

        self.show(&summary(&record, self.requests, self.responses));

        let line = self.encoder.encode(&record);

        if let Err(e) = self.sink.append(&line) {
            error!("unable to log fix {}: {}", record.fix_number, e);
        }
    }
}
