use crate::display::StatusDisplay;
use crate::event::Ticket;
use crate::event::TimerKey;
use crate::log_sink::LogWriteError;
use crate::position::FixResult;
use crate::position::FixStatus;
use crate::position::ResultCode;
use crate::provider::*;
use crate::report::ReportEncoder;
use crate::report::ReportLine;
use crate::report::TerminalMetadata;
use crate::scheduler::*;
use crate::settings::RequestType;
use crate::settings::Settings;

use chrono::TimeZone;
use chrono::Utc;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Default)]
struct FakeProvider {
    configs: Vec<TrackingConfig>,
    requests: Vec<(FieldMask, Accuracy, Ticket)>,
    cancels: Vec<Ticket>,
    config_error: Option<ConfigError>,
    request_error: Option<RequestError>,
}

impl FakeProvider {
    fn last_ticket(&self) -> Ticket {
        self.requests.last().unwrap().2
    }
}

impl Provider for FakeProvider {
    fn configure(&mut self, config: &TrackingConfig) -> Result<(), ConfigError> {
        self.configs.push(*config);

        match &self.config_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    fn request_fix(
        &mut self,
        fields: FieldMask,
        accuracy: Accuracy,
        ticket: Ticket,
    ) -> Result<(), RequestError> {
        if let Some(e) = &self.request_error {
            return Err(e.clone());
        }

        self.requests.push((fields, accuracy, ticket));

        Ok(())
    }

    fn cancel(&mut self, ticket: Ticket) {
        self.cancels.push(ticket);
    }
}

#[derive(Default)]
struct FakeTimer {
    arms: Vec<(Duration, TimerKey)>,
    cancels: Vec<TimerKey>,
}

impl Timer for FakeTimer {
    fn arm(&mut self, after: Duration, key: TimerKey) {
        self.arms.push((after, key));
    }

    fn cancel(&mut self, key: TimerKey) {
        self.cancels.push(key);
    }
}

#[derive(Default)]
struct FakeSink {
    lines: Vec<String>,
    short_writes: bool,
}

impl ReportSink for FakeSink {
    fn append(&mut self, line: &ReportLine) -> Result<(), LogWriteError> {
        if self.short_writes {
            return Err(LogWriteError::PartialWrite {
                written: 1,
                expected: line.len() + 2,
            });
        }

        self.lines.push(line.to_string());

        Ok(())
    }
}

#[derive(Clone, Default)]
struct RecordingDisplay {
    lines: Rc<RefCell<Vec<(usize, String)>>>,
}

impl StatusDisplay for RecordingDisplay {
    fn print(&mut self, line: usize, _column: usize, text: &str) {
        self.lines.borrow_mut().push((line, text.to_string()));
    }
}

type TestScheduler = Scheduler<FakeProvider, FakeTimer, FakeSink>;

fn scheduler_with(request_type: RequestType, provider: FakeProvider, sink: FakeSink) -> TestScheduler {
    let settings = Settings {
        request_type,
        ..Default::default()
    };

    let metadata = TerminalMetadata {
        terminal_id: "T001".to_string(),
        ..Default::default()
    };

    Scheduler::new(
        provider,
        FakeTimer::default(),
        sink,
        ReportEncoder::new(metadata),
        settings,
        Duration::from_secs(5),
    )
}

fn scheduler(request_type: RequestType) -> TestScheduler {
    scheduler_with(request_type, FakeProvider::default(), FakeSink::default())
}

fn fix() -> FixResult {
    FixResult {
        code: ResultCode::Success,
        status: FixStatus::NoError,
        valid: true,
        fix_number: 1,
        timestamp: Utc.ymd(2024, 3, 1).and_hms(2, 0, 0),
        latitude: Some(37.422),
        longitude: Some(-122.084),
        altitude: Some(30),
        heading: Some(90.0),
        horizontal_velocity: Some(1.2),
        vertical_velocity: None,
    }
}

fn all_fields() -> FieldMask {
    FieldMask::LOCATION | FieldMask::ALTITUDE | FieldMask::VELOCITY
}

#[test]
fn test_start_repeating() {
    let mut s = scheduler(RequestType::Repeating);

    s.start().unwrap();

    let config = s.provider().configs[0];
    assert_eq!(TrackingMode::TrackNetwork, config.mode);
    assert_eq!(Duration::from_secs(5), config.interval);
    assert_eq!(0, config.fix_count);

    assert_eq!(1, s.provider().requests.len());
    assert_eq!(all_fields(), s.provider().requests[0].0);
    assert_eq!(Accuracy::Level1, s.provider().requests[0].1);
    assert_eq!(State::RequestInFlight(s.provider().last_ticket()), *s.state());
    assert_eq!(1, s.requests());
}

#[test]
fn test_start_single() {
    let mut s = scheduler(RequestType::Single);

    s.start().unwrap();

    assert_eq!(TrackingMode::Default, s.provider().configs[0].mode);
    assert_eq!(Accuracy::Level6, s.provider().requests[0].1);
    assert!(s.is_busy());
}

#[test]
fn test_start_config_error_not_fatal() {
    let provider = FakeProvider {
        config_error: Some(ConfigError::Rejected("no network".to_string())),
        ..Default::default()
    };
    let mut s = scheduler_with(RequestType::Repeating, provider, FakeSink::default());

    s.start().unwrap();

    assert_eq!(1, s.provider().requests.len());
    assert!(s.is_busy());
}

#[test]
fn test_start_request_unsupported() {
    let provider = FakeProvider {
        request_error: Some(RequestError::Unsupported),
        ..Default::default()
    };
    let mut s = scheduler_with(RequestType::Repeating, provider, FakeSink::default());

    assert_eq!(Err(RequestError::Unsupported), s.start());
    assert_eq!(State::Failed(Failure::Request(RequestError::Unsupported)), *s.state());
    assert!(s.state().is_terminal());
    assert_eq!(0, s.requests());
}

#[test]
fn test_advance_while_in_flight() {
    let mut s = scheduler(RequestType::Repeating);
    s.start().unwrap();

    for _ in 0..3 {
        s.advance().unwrap();
        s.start().unwrap();
    }

    assert_eq!(1, s.provider().requests.len());
    assert_eq!(1, s.requests());
    assert!(s.timer().arms.is_empty());
}

#[test]
fn test_repeating_success() {
    let mut s = scheduler(RequestType::Repeating);
    s.start().unwrap();

    let ticket = s.provider().last_ticket();
    s.on_fix(ticket, fix());

    assert_eq!(
        vec!["{EHL,A,02,T001,2024-03-01 10:00:00,37.422000,-122.084000,30,1.200000,90.000000,,,,,,EHL}".to_string()],
        s.sink().lines
    );
    assert_eq!(1, s.timer().arms.len());
    assert_eq!(Duration::from_secs(5), s.timer().arms[0].0);
    assert_eq!(Some(s.timer().arms[0].1), s.armed());
    assert_eq!(State::Idle, *s.state());
    assert_eq!(1, s.responses());
}

#[test]
fn test_repeating_cycle() {
    let mut s = scheduler(RequestType::Repeating);
    s.start().unwrap();

    for cycle in 1..=3 {
        let ticket = s.provider().last_ticket();
        s.on_fix(ticket, fix());

        let key = s.armed().unwrap();
        s.on_timer(key).unwrap();

        assert_eq!(cycle + 1, s.provider().requests.len());
        assert_eq!(None, s.armed());
    }

    assert_eq!(4, s.requests());
    assert_eq!(3, s.responses());
    assert_eq!(3, s.sink().lines.len());
}

#[test]
fn test_degraded_fix_reported() {
    let mut s = scheduler(RequestType::Repeating);
    s.start().unwrap();

    let mut result = fix();
    result.status = FixStatus::InfoUnavailable;
    result.latitude = None;

    let ticket = s.provider().last_ticket();
    s.on_fix(ticket, result);

    assert_eq!(1, s.sink().lines.len());
    assert_eq!(1, s.timer().arms.len());
}

#[test]
fn test_info_unavailable_invalid_ends_session() {
    let mut s = scheduler(RequestType::Repeating);
    s.start().unwrap();

    let mut result = fix();
    result.status = FixStatus::InfoUnavailable;
    result.valid = false;

    let ticket = s.provider().last_ticket();
    s.on_fix(ticket, result);

    assert!(s.sink().lines.is_empty());
    assert!(s.timer().arms.is_empty());
    assert_eq!(
        State::Failed(Failure::Status(FixStatus::InfoUnavailable)),
        *s.state()
    );
    assert!(s.state().is_terminal());

    // a terminal session does not request more fixes
    s.advance().unwrap();
    assert_eq!(1, s.provider().requests.len());
}

#[test]
fn test_failure_status_renders_error() {
    let display = RecordingDisplay::default();
    let mut s = scheduler(RequestType::Repeating).with_display(Box::new(display.clone()));
    s.start().unwrap();

    let mut result = fix();
    result.status = FixStatus::Timeout;

    let ticket = s.provider().last_ticket();
    s.on_fix(ticket, result);

    let lines = display.lines.borrow();
    assert_eq!((0, "req : 1".to_string()), lines[0]);
    assert_eq!((1, "error: GetGPSInfo status = 2".to_string()), lines[1]);
}

#[test]
fn test_usable_fix_renders_summary() {
    let display = RecordingDisplay::default();
    let mut s = scheduler(RequestType::Repeating).with_display(Box::new(display.clone()));
    s.start().unwrap();

    let ticket = s.provider().last_ticket();
    s.on_fix(ticket, fix());

    let lines = display.lines.borrow();
    assert_eq!((1, "resp : 1".to_string()), lines[2]);
    assert_eq!((3, "Latitude = 37.422000 d".to_string()), lines[4]);
}

#[test]
fn test_single_success() {
    let mut s = scheduler(RequestType::Single);
    s.start().unwrap();

    let ticket = s.provider().last_ticket();
    s.on_fix(ticket, fix());

    assert_eq!(1, s.sink().lines.len());
    assert!(s.timer().arms.is_empty());
    assert_eq!(State::Done, *s.state());
}

#[test]
fn test_single_error() {
    let mut s = scheduler(RequestType::Single);
    s.start().unwrap();

    let mut result = fix();
    result.status = FixStatus::GeneralFailure;

    let ticket = s.provider().last_ticket();
    s.on_fix(ticket, result);

    assert!(s.sink().lines.is_empty());
    assert_eq!(State::Done, *s.state());
}

#[test]
fn test_decode_error_skips_report() {
    let mut s = scheduler(RequestType::Repeating);
    s.start().unwrap();

    let mut result = fix();
    result.code = ResultCode::PermissionDenied;

    let ticket = s.provider().last_ticket();
    s.on_fix(ticket, result);

    assert!(s.sink().lines.is_empty());
    assert_eq!(1, s.timer().arms.len());
    assert_eq!(State::Idle, *s.state());
}

#[test]
fn test_decode_error_renders_counters() {
    let display = RecordingDisplay::default();
    let mut s = scheduler(RequestType::Repeating).with_display(Box::new(display.clone()));
    s.start().unwrap();

    let mut result = fix();
    result.code = ResultCode::Failed;

    let ticket = s.provider().last_ticket();
    s.on_fix(ticket, result);

    let lines = display.lines.borrow();
    assert_eq!(4, lines.len());
    assert_eq!((0, "req : 1".to_string()), lines[1]);
    assert_eq!((1, "resp : 1".to_string()), lines[2]);
    assert_eq!(
        (2, "Time = 2024-03-01 10:00:00 GMT+8".to_string()),
        lines[3]
    );
}

#[test]
fn test_advance_cancels_previous_registration() {
    let mut s = scheduler(RequestType::Repeating);
    s.start().unwrap();

    assert!(s.provider().cancels.is_empty());

    let first = s.provider().last_ticket();
    s.on_fix(first, fix());
    let key = s.armed().unwrap();
    s.on_timer(key).unwrap();

    assert_eq!(vec![first], s.provider().cancels);

    let second = s.provider().last_ticket();
    assert_ne!(first, second);
    s.on_fix(second, fix());
    let key = s.armed().unwrap();
    s.on_timer(key).unwrap();

    assert_eq!(vec![first, second], s.provider().cancels);
}

#[test]
fn test_partial_write_continues() {
    let sink = FakeSink {
        short_writes: true,
        ..Default::default()
    };
    let mut s = scheduler_with(RequestType::Repeating, FakeProvider::default(), sink);
    s.start().unwrap();

    let ticket = s.provider().last_ticket();
    s.on_fix(ticket, fix());

    assert_eq!(State::Idle, *s.state());

    let key = s.armed().unwrap();
    s.on_timer(key).unwrap();

    assert_eq!(2, s.provider().requests.len());
}

#[test]
fn test_stale_fix_dropped() {
    let mut s = scheduler(RequestType::Repeating);
    s.start().unwrap();

    s.on_fix(Ticket::new(99), fix());

    assert_eq!(0, s.responses());
    assert!(s.is_busy());
    assert!(s.sink().lines.is_empty());
}

#[test]
fn test_duplicate_fix_dropped() {
    let mut s = scheduler(RequestType::Repeating);
    s.start().unwrap();

    let ticket = s.provider().last_ticket();
    s.on_fix(ticket, fix());
    s.on_fix(ticket, fix());

    assert_eq!(1, s.responses());
    assert_eq!(1, s.timer().arms.len());
}

#[test]
fn test_stale_timer_dropped() {
    let mut s = scheduler(RequestType::Repeating);
    s.start().unwrap();

    s.on_timer(TimerKey::new(42)).unwrap();

    assert_eq!(1, s.provider().requests.len());
}

#[test]
fn test_timer_while_in_flight() {
    let mut s = scheduler(RequestType::Repeating);
    s.start().unwrap();

    let ticket = s.provider().last_ticket();
    s.on_fix(ticket, fix());
    let key = s.armed().unwrap();

    // a manual advance beats the timer
    s.advance().unwrap();
    s.on_timer(key).unwrap();

    assert_eq!(2, s.provider().requests.len());
    assert!(s.is_busy());
}

#[test]
fn test_stop_in_flight() {
    let mut s = scheduler(RequestType::Repeating);
    s.start().unwrap();
    let ticket = s.provider().last_ticket();

    s.stop();
    s.stop();
    s.stop();

    assert_eq!(vec![ticket], s.provider().cancels);
    assert!(s.timer().cancels.is_empty());
    assert_eq!(State::Stopped, *s.state());

    // the response arriving after stop is ignored
    s.on_fix(ticket, fix());
    assert!(s.sink().lines.is_empty());
    assert_eq!(0, s.responses());
}

#[test]
fn test_stop_armed() {
    let mut s = scheduler(RequestType::Repeating);
    s.start().unwrap();

    let ticket = s.provider().last_ticket();
    s.on_fix(ticket, fix());
    let key = s.armed().unwrap();

    s.stop();
    s.stop();

    assert_eq!(vec![key], s.timer().cancels);
    assert!(s.provider().cancels.is_empty());

    // a firing that raced the cancel does nothing
    s.on_timer(key).unwrap();
    assert_eq!(1, s.provider().requests.len());
}

#[test]
fn test_stop_idle() {
    let mut s = scheduler(RequestType::Single);

    s.stop();

    assert!(s.provider().cancels.is_empty());
    assert!(s.timer().cancels.is_empty());
    assert_eq!(State::Stopped, *s.state());
}

#[test]
fn test_restart_after_failure() {
    let mut s = scheduler(RequestType::Repeating);
    s.start().unwrap();

    let mut result = fix();
    result.status = FixStatus::GeneralFailure;
    let ticket = s.provider().last_ticket();
    s.on_fix(ticket, result);
    assert!(s.state().is_terminal());

    s.start().unwrap();

    assert_eq!(2, s.provider().requests.len());
    assert_ne!(ticket, s.provider().last_ticket());
    assert!(s.is_busy());
}
