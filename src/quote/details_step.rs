//! Second wizard step: contact details, winter-sports cover, and the dynamic
//! traveler roster, with role-conditioned field policy.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::{FetchRequest, Identity, Profile, RequestCounter, Role};
use crate::errors::QuoteError;
use crate::validation::{
    strip_all_whitespace, strip_leading_whitespace, trim_on_commit, validate_email,
    validate_no_whitespace, validate_phone, validate_required, ErrorCode, FieldError,
    SanitizedInput,
};

use super::traveler::TravelerRoster;

/// Capability flag computed once from the acting identity at activation.
///
/// Client parties get read-only, prefilled contact fields; every other party
/// edits them directly. Handlers apply the policy declaratively instead of
/// re-checking the role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPolicy {
    pub contact_editable: bool,
}

impl FieldPolicy {
    pub fn for_role(role: Role) -> Self {
        Self {
            contact_editable: role != Role::Client,
        }
    }
}

impl Default for FieldPolicy {
    fn default() -> Self {
        Self {
            contact_editable: true,
        }
    }
}

/// One traveler row of the validated submission aggregate.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TravelerRecord {
    pub full_name: String,
    pub dob: NaiveDate,
}

/// Validated contact aggregate handed to the submission collaborator.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub email: String,
    pub phone_number: String,
    pub num_travelers: u32,
    pub winter_sports: bool,
    pub travelers: Vec<TravelerRecord>,
}

/// Owns the contact fields and the traveler roster.
#[derive(Debug, Default)]
pub struct TravelerDetailsStep {
    policy: FieldPolicy,
    email: String,
    phone_number: String,
    email_errors: Vec<FieldError>,
    phone_errors: Vec<FieldError>,
    num_travelers_raw: String,
    num_travelers: u32,
    count_errors: Vec<FieldError>,
    winter_sports: bool,
    roster: TravelerRoster,
    loading_profile: bool,
}

impl TravelerDetailsStep {
    pub fn new() -> Self {
        let mut step = Self {
            num_travelers_raw: "1".to_string(),
            num_travelers: 1,
            ..Self::default()
        };
        step.revalidate_contact();
        step
    }

    /// Applies the role policy and performs the initial traveler-count settle.
    ///
    /// Returns the profile prefill request when the acting party is a client.
    pub fn activate(
        &mut self,
        identity: Identity,
        ids: &mut RequestCounter,
        today: NaiveDate,
    ) -> Option<FetchRequest> {
        self.policy = FieldPolicy::for_role(identity.role);
        self.revalidate_contact();
        self.roster.resize(self.num_travelers as usize, today);
        if self.policy.contact_editable {
            None
        } else {
            self.loading_profile = true;
            Some(FetchRequest::Profile { id: ids.next() })
        }
    }

    pub fn policy(&self) -> FieldPolicy {
        self.policy
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn email_errors(&self) -> &[FieldError] {
        &self.email_errors
    }

    pub fn phone_errors(&self) -> &[FieldError] {
        &self.phone_errors
    }

    pub fn num_travelers_raw(&self) -> &str {
        &self.num_travelers_raw
    }

    pub fn count_errors(&self) -> &[FieldError] {
        &self.count_errors
    }

    pub fn winter_sports(&self) -> bool {
        self.winter_sports
    }

    pub fn loading_profile(&self) -> bool {
        self.loading_profile
    }

    pub fn roster(&self) -> &TravelerRoster {
        &self.roster
    }

    /// Live email keystroke: strips leading whitespace, compensates the caret.
    pub fn input_email(&mut self, value: &str, cursor: usize) -> SanitizedInput {
        if !self.policy.contact_editable {
            return SanitizedInput {
                value: self.email.clone(),
                cursor,
            };
        }
        let sanitized = strip_leading_whitespace(value, cursor);
        self.email = sanitized.value.clone();
        self.revalidate_contact();
        sanitized
    }

    /// Email blur: addresses cannot contain spaces, so strip them all.
    pub fn commit_email(&mut self) {
        if !self.policy.contact_editable {
            return;
        }
        self.email = strip_all_whitespace(&self.email);
        self.revalidate_contact();
    }

    pub fn input_phone(&mut self, value: &str, cursor: usize) -> SanitizedInput {
        if !self.policy.contact_editable {
            return SanitizedInput {
                value: self.phone_number.clone(),
                cursor,
            };
        }
        let sanitized = strip_leading_whitespace(value, cursor);
        self.phone_number = sanitized.value.clone();
        self.revalidate_contact();
        sanitized
    }

    pub fn commit_phone(&mut self) {
        if !self.policy.contact_editable {
            return;
        }
        self.phone_number = trim_on_commit(&self.phone_number);
        self.revalidate_contact();
    }

    /// Settles the traveler count field.
    ///
    /// An empty, non-numeric, or below-minimum value reports a field error and
    /// leaves the roster at its last valid length; a valid count triggers at
    /// most one roster resize.
    pub fn set_num_travelers(&mut self, raw: &str, today: NaiveDate) {
        self.num_travelers_raw = raw.to_string();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.count_errors = vec![FieldError::new(
                ErrorCode::Required,
                "Number of travelers is required",
            )];
            return;
        }
        let count = match trimmed.parse::<u32>() {
            Ok(count) => count,
            Err(_) => {
                self.count_errors = vec![FieldError::new(
                    ErrorCode::FormatInvalid,
                    "Enter a whole number of travelers",
                )];
                return;
            }
        };
        if count < 1 {
            self.count_errors = vec![FieldError::new(
                ErrorCode::BelowMinimum,
                "At least one traveler is required",
            )];
            return;
        }
        self.count_errors.clear();
        self.num_travelers = count;
        if self.roster.len() != count as usize {
            self.roster.resize(count as usize, today);
        }
    }

    pub fn set_winter_sports(&mut self, value: bool) {
        self.winter_sports = value;
    }

    /// Live traveler-name keystroke with caret compensation.
    pub fn input_traveler_name(
        &mut self,
        index: usize,
        value: &str,
        cursor: usize,
    ) -> SanitizedInput {
        let sanitized = strip_leading_whitespace(value, cursor);
        self.roster.set_entry_name(index, &sanitized.value);
        sanitized
    }

    pub fn commit_traveler_name(&mut self, index: usize) {
        let Some(entry) = self.roster.entries().get(index) else {
            return;
        };
        let trimmed = trim_on_commit(entry.full_name());
        self.roster.set_entry_name(index, &trimmed);
    }

    pub fn set_traveler_name(&mut self, index: usize, value: &str) {
        self.roster.set_entry_name(index, value);
    }

    pub fn set_traveler_dob(&mut self, index: usize, value: &str, today: NaiveDate) {
        self.roster.set_entry_dob(index, value, today);
    }

    /// Applies a profile completion under the client policy.
    ///
    /// Editable contact fields are never overwritten, and a failed lookup
    /// leaves prior values with the step still usable. The loading flag always
    /// clears.
    pub fn apply_profile(&mut self, result: Result<Profile, QuoteError>) {
        self.loading_profile = false;
        match result {
            Ok(profile) if !self.policy.contact_editable => {
                self.email = profile.email_address;
                self.phone_number = profile.phone_number;
                self.revalidate_contact();
            }
            Ok(_) => debug!("Ignoring profile completion for editable contact fields"),
            Err(err) => warn!(%err, "Error loading profile"),
        }
    }

    /// Advancement gate: contact fields valid under the active policy, a valid
    /// traveler count, and a fully valid roster.
    pub fn is_valid(&self) -> bool {
        self.email_errors.is_empty()
            && self.phone_errors.is_empty()
            && self.count_errors.is_empty()
            && self.roster.is_valid()
    }

    /// Builds the submission aggregate; `None` while any entry is unparsable.
    pub fn contact_info(&self) -> Option<ContactInfo> {
        let mut travelers = Vec::with_capacity(self.roster.len());
        for entry in self.roster.entries() {
            travelers.push(TravelerRecord {
                full_name: trim_on_commit(entry.full_name()),
                dob: entry.dob_date()?,
            });
        }
        Some(ContactInfo {
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            num_travelers: self.num_travelers,
            winter_sports: self.winter_sports,
            travelers,
        })
    }

    fn revalidate_contact(&mut self) {
        if !self.policy.contact_editable {
            // Disabled fields never report errors and never block the step.
            self.email_errors.clear();
            self.phone_errors.clear();
            return;
        }
        self.email_errors = [
            validate_required(&self.email),
            validate_email(&self.email),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();
        self.phone_errors = [
            validate_required(&self.phone_number),
            validate_phone(&self.phone_number),
            validate_no_whitespace(&self.phone_number),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();
    }
}
