use crate::event::Ticket;
use crate::position::FixStatus;
use crate::provider::RequestError;

/// Why a session stopped acquiring.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Failure {
    Request(RequestError),
    Status(FixStatus),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum State {
    /// No request outstanding.  In repeating mode the interval timer may be armed.
    Idle,
    /// One request is outstanding.  Further requests are refused until it is answered.
    RequestInFlight(Ticket),
    /// A usable fix is being decoded, encoded and logged.
    Reporting,
    /// A single-fix session has received its response.
    Done,
    Failed(Failure),
    Stopped,
}

impl State {
    pub fn is_busy(&self) -> bool {
        matches!(self, State::RequestInFlight(_))
    }

    /// No further requests will be issued without a new `start()`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Done | State::Failed(_) | State::Stopped)
    }
}

impl Default for State {
    fn default() -> Self {
        State::Idle
    }
}
