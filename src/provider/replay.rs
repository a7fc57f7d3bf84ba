use crate::event::Event;
use crate::event::Ticket;
use crate::position::FixResult;
use crate::provider::Accuracy;
use crate::provider::ConfigError;
use crate::provider::FieldMask;
use crate::provider::Provider;
use crate::provider::RequestError;
use crate::provider::TrackingConfig;
use crate::provider::TrackingMode;
use crate::settings::ServerDescriptor;
use crate::EventSender;

use chrono::Utc;

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::net::Ipv4Addr;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use tokio::task::JoinHandle;

use tracing::debug;
use tracing::info;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("unable to read track: {0}")]
    Io(#[from] io::Error),
    #[error("invalid track point on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse a JSON-lines track, one fix per line.  Blank lines are skipped.
pub fn parse_track(source: &str) -> Result<Vec<FixResult>, ReplayError> {
    source
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| {
            serde_json::from_str(l).map_err(|source| ReplayError::Parse { line: i + 1, source })
        })
        .collect()
}

/// Serves fixes from a recorded track.
///
/// Each request is answered after `latency` with the next point of the track.  Once the track runs
/// out every request is answered with an invalid, info-unavailable fix.
#[derive(Debug)]
pub struct ReplayProvider {
    track: VecDeque<FixResult>,
    latency: Duration,
    tx: EventSender,
    config: Option<TrackingConfig>,
    assistance: Option<(Ipv4Addr, u16)>,
    pending: Option<(Ticket, JoinHandle<()>)>,
}

impl ReplayProvider {
    pub fn new(track: Vec<FixResult>, latency: Duration, tx: EventSender) -> Self {
        ReplayProvider {
            track: track.into(),
            latency,
            tx,
            config: None,
            assistance: None,
            pending: None,
        }
    }

    pub fn load<P: AsRef<Path>>(
        path: P,
        latency: Duration,
        tx: EventSender,
    ) -> Result<Self, ReplayError> {
        let source = fs::read_to_string(path.as_ref())?;
        let track = parse_track(&source)?;

        info!(
            "loaded {} track points from {}",
            track.len(),
            path.as_ref().display()
        );

        Ok(ReplayProvider::new(track, latency, tx))
    }

    pub fn config(&self) -> Option<&TrackingConfig> {
        self.config.as_ref()
    }

    /// The configured assistance server with its port in network byte order.
    pub fn assistance(&self) -> Option<(Ipv4Addr, u16)> {
        self.assistance
    }

    pub fn remaining(&self) -> usize {
        self.track.len()
    }
}

impl Provider for ReplayProvider {
    fn configure(&mut self, config: &TrackingConfig) -> Result<(), ConfigError> {
        if config.mode != TrackingMode::Default && config.interval.is_zero() {
            return Err(ConfigError::InvalidInterval);
        }

        self.assistance = match (config.server, config.server.wire_port()) {
            (ServerDescriptor::Ip { address, .. }, Some(port)) => Some((address, port)),
            _ => None,
        };

        debug!(
            "configured replay {:?}, assistance server {:?}",
            config, self.assistance
        );

        self.config = Some(*config);

        Ok(())
    }

    fn request_fix(
        &mut self,
        fields: FieldMask,
        accuracy: Accuracy,
        ticket: Ticket,
    ) -> Result<(), RequestError> {
        if self.tx.is_closed() {
            return Err(RequestError::TransientFailure(
                "event loop has shut down".to_string(),
            ));
        }

        if let Some((_, handle)) = self.pending.take() {
            handle.abort();
        }

        let result = match self.track.pop_front() {
            Some(fix) => fix,
            None => FixResult::unavailable(Utc::now()),
        };

        debug!(
            "replaying fix {} for {:?} ({:?}, {:?})",
            result.fix_number, ticket, fields, accuracy
        );

        let tx = self.tx.clone();
        let latency = self.latency;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(latency).await;

            // the receiver is gone when the session has ended
            let _ = tx.send(Event::Fix(ticket, result));
        });

        self.pending = Some((ticket, handle));

        Ok(())
    }

    fn cancel(&mut self, ticket: Ticket) {
        match self.pending.take() {
            Some((t, handle)) if t == ticket => {
                debug!("cancelled replay fix for {:?}", ticket);
                handle.abort();
            }
            other => self.pending = other,
        }
    }
}
