//! Backend health probe.
//!
//! Each page view calls [`ConnectivityProber::probe`] once before deciding
//! between live and demo data. Results are not cached; the prober only
//! remembers the previous outcome so logs can tell "never reached" apart from
//! "connection lost".

use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use tavola_core::ConnectivityState;
use tracing::instrument;

use crate::api::ApiClient;

const UNKNOWN: u8 = 0;
const ONLINE: u8 = 1;
const OFFLINE: u8 = 2;

const fn encode(state: ConnectivityState) -> u8 {
    match state {
        ConnectivityState::Unknown => UNKNOWN,
        ConnectivityState::Online => ONLINE,
        ConnectivityState::Offline => OFFLINE,
    }
}

const fn decode(raw: u8) -> ConnectivityState {
    match raw {
        ONLINE => ConnectivityState::Online,
        OFFLINE => ConnectivityState::Offline,
        _ => ConnectivityState::Unknown,
    }
}

/// Health checker for the operations API.
#[derive(Debug)]
pub struct ConnectivityProber {
    api: ApiClient,
    timeout: Duration,
    last: AtomicU8,
}

impl ConnectivityProber {
    #[must_use]
    pub const fn new(api: ApiClient, timeout: Duration) -> Self {
        Self {
            api,
            timeout,
            last: AtomicU8::new(UNKNOWN),
        }
    }

    /// `true` iff `GET /health` answers 200 with `{"status":"healthy"}`
    /// within the timeout. Never fails.
    #[instrument(skip(self))]
    pub async fn probe(&self) -> bool {
        let online = match self.api.health(self.timeout).await {
            Ok(health) if health.is_healthy() => true,
            Ok(health) => {
                tracing::debug!(status = %health.status, "backend reported unhealthy");
                false
            }
            Err(e) => {
                tracing::debug!(error = %e, "health probe failed");
                false
            }
        };

        let now = ConnectivityState::from_probe(online);
        let previous = decode(self.last.swap(encode(now), Ordering::AcqRel));
        log_transition(previous, now);
        online
    }

    /// Outcome of the most recent probe.
    #[must_use]
    pub fn last_state(&self) -> ConnectivityState {
        decode(self.last.load(Ordering::Acquire))
    }
}

fn log_transition(previous: ConnectivityState, now: ConnectivityState) {
    use ConnectivityState::{Offline, Online, Unknown};

    match (previous, now) {
        (Unknown, Offline) => tracing::warn!("backend never reached; serving demo data"),
        (Online, Offline) => tracing::warn!("connection lost; serving demo data"),
        (Offline, Online) => tracing::info!("connection restored"),
        (Unknown, Online) => tracing::info!("backend reachable"),
        _ => {}
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, parse_api_url};

    #[test]
    fn test_state_encoding() {
        for state in [
            ConnectivityState::Unknown,
            ConnectivityState::Online,
            ConnectivityState::Offline,
        ] {
            assert_eq!(decode(encode(state)), state);
        }
        assert_eq!(decode(42), ConnectivityState::Unknown);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_offline() {
        let api = ApiClient::new(&ApiConfig {
            base_url: parse_api_url("http://127.0.0.1:9").unwrap(),
            timeout: Duration::from_millis(500),
            health_timeout: Duration::from_millis(500),
        });
        let prober = ConnectivityProber::new(api, Duration::from_millis(500));

        assert_eq!(prober.last_state(), ConnectivityState::Unknown);
        assert!(!prober.probe().await);
        assert_eq!(prober.last_state(), ConnectivityState::Offline);
    }
}
