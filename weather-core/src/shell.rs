//! Search → pick → weather interaction state.
//!
//! All state lives in a single [`ViewState`] owned by the [`Shell`]. Every
//! request the shell dispatches takes a fresh [`RequestToken`]; a completion
//! only lands if its token is still the latest one issued, so a slow earlier
//! search can never overwrite the result of a newer one.

use std::fmt;

use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::{
    backend::WeatherBackend,
    model::{LocationCandidate, WeatherReport},
};

/// User-facing failure categories. Transport and server errors are collapsed
/// into the first two; the detailed cause only goes to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    SearchFailed,
    NoLocationsFound,
    WeatherFailed,
}

impl Failure {
    pub fn message(self) -> &'static str {
        match self {
            Failure::SearchFailed => "Failed to search location. Please try again.",
            Failure::NoLocationsFound => "No locations found. Try a different search term.",
            Failure::WeatherFailed => "Failed to fetch weather data. Please try again.",
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Searching {
        term: String,
    },
    /// More than one candidate matched; none is selected yet.
    LocationAmbiguous {
        candidates: Vec<LocationCandidate>,
    },
    WeatherLoading {
        location: LocationCandidate,
    },
    WeatherLoaded {
        location: LocationCandidate,
        report: WeatherReport,
    },
    Failed {
        failure: Failure,
        /// Still set when the weather call failed after a location was picked.
        location: Option<LocationCandidate>,
    },
}

impl ViewState {
    /// The search input is disabled while a request is in flight.
    ///
    /// Front ends that prompt only after `submit_search`/`select_location`
    /// return (like the CLI loop) never observe `false` here; it matters for
    /// callers that read [`Shell::state`] while a request is running.
    pub fn accepts_input(&self) -> bool {
        !matches!(self, ViewState::Searching { .. } | ViewState::WeatherLoading { .. })
    }

    pub fn candidates(&self) -> &[LocationCandidate] {
        match self {
            ViewState::LocationAmbiguous { candidates } => candidates,
            _ => &[],
        }
    }

    pub fn selected(&self) -> Option<&LocationCandidate> {
        match self {
            ViewState::WeatherLoading { location } | ViewState::WeatherLoaded { location, .. } => {
                Some(location)
            }
            ViewState::Failed { location, .. } => location.as_ref(),
            _ => None,
        }
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        match self {
            ViewState::WeatherLoaded { report, .. } => Some(report),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<Failure> {
        match self {
            ViewState::Failed { failure, .. } => Some(*failure),
            _ => None,
        }
    }
}

/// Sequence number attached to each dispatched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

#[derive(Debug, Default)]
struct Slot {
    state: ViewState,
    latest: u64,
}

impl Slot {
    /// Replaces the whole state and hands out the next token.
    fn issue(&mut self, state: ViewState) -> RequestToken {
        self.latest += 1;
        self.state = state;
        RequestToken(self.latest)
    }

    fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}

#[derive(Debug)]
pub struct Shell<B> {
    backend: B,
    slot: Mutex<Slot>,
}

impl<B: WeatherBackend> Shell<B> {
    pub fn new(backend: B) -> Self {
        Self { backend, slot: Mutex::new(Slot::default()) }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn state(&self) -> ViewState {
        self.slot.lock().await.state.clone()
    }

    /// Runs a search and, for a single match, the weather fetch that follows.
    ///
    /// Returns the state as it stands once this call's requests have settled,
    /// which is a newer request's state if this one was superseded.
    pub async fn submit_search(&self, term: &str) -> ViewState {
        let term = term.trim();
        if term.is_empty() {
            debug!("ignoring blank search");
            return self.state().await;
        }

        let token = self
            .slot
            .lock()
            .await
            .issue(ViewState::Searching { term: term.to_string() });
        debug!(term, ?token, "search dispatched");

        let next = match self.backend.search_location(term).await {
            Err(err) => {
                error!(term, error = %err, "search failed");
                ViewState::Failed { failure: Failure::SearchFailed, location: None }
            }
            Ok(candidates) if candidates.is_empty() => {
                ViewState::Failed { failure: Failure::NoLocationsFound, location: None }
            }
            Ok(mut candidates) if candidates.len() == 1 => {
                let location = candidates.remove(0);
                return self.fetch_weather(Some(token), location).await;
            }
            Ok(candidates) => ViewState::LocationAmbiguous { candidates },
        };

        self.complete(token, next).await
    }

    /// Picks a candidate and fetches its weather.
    pub async fn select_location(&self, location: LocationCandidate) -> ViewState {
        self.fetch_weather(None, location).await
    }

    async fn fetch_weather(
        &self,
        parent: Option<RequestToken>,
        location: LocationCandidate,
    ) -> ViewState {
        let token = {
            let mut slot = self.slot.lock().await;
            if let Some(parent) = parent {
                if !slot.is_current(parent) {
                    debug!(?parent, "dropping auto-select from superseded search");
                    return slot.state.clone();
                }
            }
            slot.issue(ViewState::WeatherLoading { location: location.clone() })
        };
        debug!(name = %location.name, ?token, "weather dispatched");

        let next = match self
            .backend
            .get_weather(location.latitude, location.longitude)
            .await
        {
            Ok(report) => ViewState::WeatherLoaded { location, report },
            Err(err) => {
                error!(name = %location.name, error = %err, "weather fetch failed");
                ViewState::Failed { failure: Failure::WeatherFailed, location: Some(location) }
            }
        };

        self.complete(token, next).await
    }

    async fn complete(&self, token: RequestToken, next: ViewState) -> ViewState {
        let mut slot = self.slot.lock().await;
        if slot.is_current(token) {
            slot.state = next;
        } else {
            debug!(?token, latest = slot.latest, "discarding stale response");
        }
        slot.state.clone()
    }
}
