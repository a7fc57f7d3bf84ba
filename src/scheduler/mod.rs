mod scheduler;
mod state;
mod timer;

pub use scheduler::ReportSink;
pub use scheduler::Scheduler;
pub use state::Failure;
pub use state::State;
pub use timer::Timer;
pub use timer::TokioTimer;

#[cfg(test)]
mod test;
