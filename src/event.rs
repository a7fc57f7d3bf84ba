use crate::position::FixResult;

/// Correlates a fix response with the request that produced it.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Ticket(u64);

impl Ticket {
    pub fn new(id: u64) -> Self {
        Ticket(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Identifies one arming of the interval timer.  A firing whose key does not match the armed key
/// is stale and must be dropped.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimerKey(u64);

impl TimerKey {
    pub fn new(generation: u64) -> Self {
        TimerKey(generation)
    }

    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Something that happened outside the scheduler and must be handled on the next event loop turn.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Fix(Ticket, FixResult),
    Timer(TimerKey),
}
