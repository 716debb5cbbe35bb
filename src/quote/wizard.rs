//! Wizard controller: sequences the two steps, gates advancement on step
//! validity, owns the fetch outbox, and silences completions after disposal.

use chrono::NaiveDate;
use tracing::debug;

use crate::api::{FetchRequest, FetchResponse, Identity, RequestCounter};
use crate::errors::QuoteError;
use crate::validation::SanitizedInput;

use super::details_step::{ContactInfo, TravelerDetailsStep};
use super::quote_step::QuoteStep;
use super::selection::QuoteSelection;

const QUOTE_GATE_MESSAGE: &str = "Please Select Cover Period and Plan to continue...";
const DETAILS_GATE_MESSAGE: &str = "Please complete traveler details to continue...";

/// Ordered wizard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepId {
    Quote,
    TravelerDetails,
}

/// The multi-step quote/traveler wizard.
///
/// All mutation happens through this controller so outbound fetches land in
/// one outbox and every completion passes the disposal check. The host drives
/// it with field setters, drains [`QuoteWizard::take_requests`], and feeds
/// lookup outcomes back through [`QuoteWizard::complete`].
#[derive(Debug)]
pub struct QuoteWizard {
    quote: QuoteStep,
    details: TravelerDetailsStep,
    current: StepId,
    gate_message: Option<String>,
    accepted: bool,
    disposed: bool,
    ids: RequestCounter,
    outbox: Vec<FetchRequest>,
}

impl QuoteWizard {
    /// Opens the wizard: loads the duration list, applies the role policy, and
    /// settles the roster at one traveler. Client identities also queue the
    /// contact-profile prefill.
    pub fn new(identity: Identity) -> Self {
        let mut quote = QuoteStep::new();
        let mut details = TravelerDetailsStep::new();
        let mut ids = RequestCounter::default();
        let mut outbox = Vec::new();

        outbox.push(quote.activate(&mut ids));
        if let Some(request) = details.activate(identity, &mut ids, Self::today()) {
            outbox.push(request);
        }

        Self {
            quote,
            details,
            current: StepId::Quote,
            gate_message: None,
            accepted: false,
            disposed: false,
            ids,
            outbox,
        }
    }

    fn today() -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    pub fn current_step(&self) -> StepId {
        self.current
    }

    pub fn gate_message(&self) -> Option<&str> {
        self.gate_message.as_deref()
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn quote(&self) -> &QuoteStep {
        &self.quote
    }

    pub fn details(&self) -> &TravelerDetailsStep {
        &self.details
    }

    /// Drains the queued outbound fetches. Empty after disposal.
    pub fn take_requests(&mut self) -> Vec<FetchRequest> {
        if self.disposed {
            return Vec::new();
        }
        std::mem::take(&mut self.outbox)
    }

    /// Delivers a completed lookup. Silently dropped after disposal so a late
    /// callback can never mutate a torn-down wizard.
    pub fn complete(&mut self, response: FetchResponse) {
        if self.disposed {
            debug!("Dropping fetch completion delivered after disposal");
            return;
        }
        match response {
            FetchResponse::Durations { result, .. } => self.quote.apply_durations(result),
            FetchResponse::Rates { id, result } => self.quote.apply_rates(id, result),
            FetchResponse::Profile { result, .. } => self.details.apply_profile(result),
        }
    }

    /// Advances to the next step, or accepts the final step for submission.
    ///
    /// Refusal sets an advisory gate message and changes nothing else; the
    /// attempt is freely repeatable.
    pub fn advance(&mut self) -> bool {
        match self.current {
            StepId::Quote => {
                if !self.quote.is_valid() {
                    self.gate_message = Some(QUOTE_GATE_MESSAGE.to_string());
                    return false;
                }
                self.gate_message = None;
                self.current = StepId::TravelerDetails;
                true
            }
            StepId::TravelerDetails => {
                if !self.details.is_valid() {
                    self.gate_message = Some(DETAILS_GATE_MESSAGE.to_string());
                    return false;
                }
                self.gate_message = None;
                self.accepted = true;
                true
            }
        }
    }

    /// Moving back is always permitted and never gated.
    pub fn back(&mut self) {
        self.gate_message = None;
        if self.current == StepId::TravelerDetails {
            self.current = StepId::Quote;
        }
    }

    /// Hands over the fully validated aggregate for submission.
    pub fn submission(&self) -> Result<(QuoteSelection, ContactInfo), QuoteError> {
        if !self.quote.is_valid() {
            return Err(QuoteError::NotReady(QUOTE_GATE_MESSAGE.to_string()));
        }
        if !self.details.is_valid() {
            return Err(QuoteError::NotReady(DETAILS_GATE_MESSAGE.to_string()));
        }
        let info = self
            .details
            .contact_info()
            .ok_or_else(|| QuoteError::NotReady(DETAILS_GATE_MESSAGE.to_string()))?;
        Ok((self.quote.selection().clone(), info))
    }

    /// Tears the wizard down: pending requests are discarded and any late
    /// completion is silenced.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.outbox.clear();
        debug!("Quote wizard disposed");
    }

    // Field setters forwarded to the owning step.

    pub fn set_duration(&mut self, value: &str) {
        if let Some(request) = self.quote.set_duration(value, &mut self.ids) {
            self.outbox.push(request);
        }
    }

    pub fn set_plan(&mut self, value: &str) {
        self.quote.set_plan(value);
    }

    pub fn input_email(&mut self, value: &str, cursor: usize) -> SanitizedInput {
        self.details.input_email(value, cursor)
    }

    pub fn commit_email(&mut self) {
        self.details.commit_email();
    }

    pub fn input_phone(&mut self, value: &str, cursor: usize) -> SanitizedInput {
        self.details.input_phone(value, cursor)
    }

    pub fn commit_phone(&mut self) {
        self.details.commit_phone();
    }

    pub fn set_num_travelers(&mut self, raw: &str) {
        self.details.set_num_travelers(raw, Self::today());
    }

    pub fn set_winter_sports(&mut self, value: bool) {
        self.details.set_winter_sports(value);
    }

    pub fn input_traveler_name(
        &mut self,
        index: usize,
        value: &str,
        cursor: usize,
    ) -> SanitizedInput {
        self.details.input_traveler_name(index, value, cursor)
    }

    pub fn commit_traveler_name(&mut self, index: usize) {
        self.details.commit_traveler_name(index);
    }

    pub fn set_traveler_name(&mut self, index: usize, value: &str) {
        self.details.set_traveler_name(index, value);
    }

    pub fn set_traveler_dob(&mut self, index: usize, value: &str) {
        self.details.set_traveler_dob(index, value, Self::today());
    }
}
