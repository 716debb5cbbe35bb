//! First wizard step: cover-period and plan selection, with the cascading
//! rate lookup keyed by the selected duration.

use tracing::{debug, warn};

use crate::api::{FetchRequest, RequestCounter, RequestId};
use crate::errors::QuoteError;

use super::selection::{Duration, QuoteSelection, RateQuote};

/// Owns the product selection and the duration/rate lists it displays.
///
/// Rate lookups are fire-and-forget: step validity depends only on the
/// selection fields, and completions apply last-write-wins by completion
/// order. A completion for a superseded request still overwrites the list;
/// hosts wanting strict consistency can drop responses whose request id is
/// stale before delivering them.
#[derive(Debug, Default)]
pub struct QuoteStep {
    selection: QuoteSelection,
    durations: Vec<Duration>,
    rates: Vec<RateQuote>,
    latest_rate_request: Option<RequestId>,
}

impl QuoteStep {
    pub fn new() -> Self {
        Self {
            selection: QuoteSelection::new(),
            ..Self::default()
        }
    }

    /// Queues the one-per-activation duration list load.
    pub fn activate(&mut self, ids: &mut RequestCounter) -> FetchRequest {
        FetchRequest::Durations { id: ids.next() }
    }

    pub fn selection(&self) -> &QuoteSelection {
        &self.selection
    }

    pub fn durations(&self) -> &[Duration] {
        &self.durations
    }

    pub fn rates(&self) -> &[RateQuote] {
        &self.rates
    }

    /// Settles a new duration selection and, when it is non-empty, queues the
    /// dependent rate lookup.
    pub fn set_duration(&mut self, value: &str, ids: &mut RequestCounter) -> Option<FetchRequest> {
        self.selection.duration_id = value.to_string();
        if value.trim().is_empty() {
            return None;
        }
        let id = ids.next();
        self.latest_rate_request = Some(id);
        Some(FetchRequest::Rates {
            id,
            duration_id: value.to_string(),
        })
    }

    pub fn set_plan(&mut self, value: &str) {
        self.selection.plan = value.to_string();
    }

    /// Replaces the duration list wholesale; a failed load is reported and
    /// leaves the list as it was.
    pub fn apply_durations(&mut self, result: Result<Vec<Duration>, QuoteError>) {
        match result {
            Ok(durations) => self.durations = durations,
            Err(err) => warn!(%err, "Error loading durations"),
        }
    }

    /// Applies a rate completion, last writer wins.
    pub fn apply_rates(&mut self, id: RequestId, result: Result<Vec<RateQuote>, QuoteError>) {
        match result {
            Ok(rates) => {
                if self.latest_rate_request != Some(id) {
                    debug!(
                        request = id.0,
                        "Applying rate completion for a superseded request"
                    );
                }
                self.rates = rates;
            }
            Err(err) => warn!(%err, request = id.0, "Error loading rates"),
        }
    }

    /// Advancement gate: both selection fields non-empty.
    pub fn is_valid(&self) -> bool {
        self.selection.is_complete()
    }
}
