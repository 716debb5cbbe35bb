//! Per-traveler sub-form entries and the dynamic roster that keeps the entry
//! count synchronized with the `numTravelers` field.

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::validation::{
    find_duplicate, parse_dob, validate_dob, validate_full_name, validate_no_whitespace,
    validate_required, FieldError, FieldResult,
};

fn collect_failures(checks: impl IntoIterator<Item = FieldResult>) -> Vec<FieldError> {
    checks.into_iter().filter_map(Result::err).collect()
}

/// One insured traveler's sub-form: name, date of birth, per-field validity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelerEntry {
    /// Stable identity for UI binding; survives roster resizes.
    pub slot: Uuid,
    full_name: String,
    dob: String,
    name_errors: Vec<FieldError>,
    dob_errors: Vec<FieldError>,
}

impl TravelerEntry {
    fn new(today: NaiveDate) -> Self {
        let mut entry = Self {
            slot: Uuid::new_v4(),
            full_name: String::new(),
            dob: String::new(),
            name_errors: Vec::new(),
            dob_errors: Vec::new(),
        };
        entry.revalidate_name();
        entry.revalidate_dob(today);
        entry
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn dob(&self) -> &str {
        &self.dob
    }

    /// Parsed date of birth, when the raw value is a real calendar date.
    pub fn dob_date(&self) -> Option<NaiveDate> {
        parse_dob(&self.dob)
    }

    pub fn name_errors(&self) -> &[FieldError] {
        &self.name_errors
    }

    pub fn dob_errors(&self) -> &[FieldError] {
        &self.dob_errors
    }

    pub fn is_valid(&self) -> bool {
        self.name_errors.is_empty() && self.dob_errors.is_empty()
    }

    fn set_full_name(&mut self, value: &str) {
        self.full_name = value.to_string();
        self.revalidate_name();
    }

    fn set_dob(&mut self, value: &str, today: NaiveDate) {
        self.dob = value.to_string();
        self.revalidate_dob(today);
    }

    fn revalidate_name(&mut self) {
        self.name_errors = collect_failures([
            validate_required(&self.full_name),
            validate_full_name(&self.full_name),
            validate_no_whitespace(&self.full_name),
        ]);
    }

    fn revalidate_dob(&mut self, today: NaiveDate) {
        self.dob_errors = collect_failures([
            validate_required(&self.dob),
            validate_dob(&self.dob, today),
        ]);
    }
}

/// Ordered collection of traveler entries.
///
/// Only this roster may grow or shrink the collection: growth appends fresh
/// empty entries at the tail, shrinkage truncates from the tail and discards
/// the removed state. Every settle (resize or entry edit) runs the
/// collection-level duplicate check exactly once.
#[derive(Debug, Default)]
pub struct TravelerRoster {
    entries: Vec<TravelerEntry>,
    duplicate: Option<(usize, usize)>,
}

impl TravelerRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TravelerEntry] {
        &self.entries
    }

    /// Index pair of the first colliding traveler rows, if any.
    pub fn duplicate_indices(&self) -> Option<(usize, usize)> {
        self.duplicate
    }

    /// Collection-level error surfaced when two travelers collide.
    pub fn duplicate_error(&self) -> Option<FieldError> {
        use crate::validation::ErrorCode;
        self.duplicate.map(|(first, second)| {
            FieldError::new(
                ErrorCode::DuplicateTraveler,
                format!(
                    "Travelers {} and {} have the same name and date of birth",
                    first + 1,
                    second + 1
                ),
            )
        })
    }

    /// Synchronizes the entry count with a settled traveler count.
    ///
    /// Growing preserves existing entries untouched; shrinking discards tail
    /// entries irrecoverably. The duplicate check runs once after the resize,
    /// never per appended entry, and an equal count changes nothing else.
    pub fn resize(&mut self, count: usize, today: NaiveDate) {
        let current = self.entries.len();
        if count > current {
            debug!(from = current, to = count, "Growing traveler roster");
            for _ in current..count {
                self.entries.push(TravelerEntry::new(today));
            }
        } else if count < current {
            debug!(from = current, to = count, "Shrinking traveler roster");
            self.entries.truncate(count);
        }
        self.recheck_duplicates();
    }

    pub fn set_entry_name(&mut self, index: usize, value: &str) {
        match self.entries.get_mut(index) {
            Some(entry) => entry.set_full_name(value),
            None => {
                debug!(index, "Ignoring name edit for missing traveler entry");
                return;
            }
        }
        self.recheck_duplicates();
    }

    pub fn set_entry_dob(&mut self, index: usize, value: &str, today: NaiveDate) {
        match self.entries.get_mut(index) {
            Some(entry) => entry.set_dob(value, today),
            None => {
                debug!(index, "Ignoring dob edit for missing traveler entry");
                return;
            }
        }
        self.recheck_duplicates();
    }

    /// All entries valid, at least one entry present, no duplicate pair.
    pub fn is_valid(&self) -> bool {
        !self.entries.is_empty()
            && self.duplicate.is_none()
            && self.entries.iter().all(TravelerEntry::is_valid)
    }

    fn recheck_duplicates(&mut self) {
        let snapshot: Vec<(String, Option<NaiveDate>)> = self
            .entries
            .iter()
            .map(|entry| (entry.full_name.clone(), entry.dob_date()))
            .collect();
        self.duplicate = find_duplicate(&snapshot);
    }
}
