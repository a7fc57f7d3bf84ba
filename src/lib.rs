pub mod configuration;
pub mod display;
pub mod event;
pub mod log_sink;
pub mod position;
pub mod provider;
pub mod report;
pub mod scheduler;
pub mod session;
pub mod settings;

#[macro_use]
extern crate bitflags;

#[cfg(test)]
#[macro_use]
extern crate assert_approx_eq;

use event::Event;
use tokio::sync::mpsc;

pub type EventReceiver = mpsc::UnboundedReceiver<Event>;
pub type EventSender = mpsc::UnboundedSender<Event>;
