//! Collaborator surface shared with the hosting application.
//!
//! The wizard never talks to transport directly. It queues [`FetchRequest`]
//! values into an outbox the host drains, performs the lookups however it
//! likes, and feeds the outcomes back as [`FetchResponse`] values. All wizard
//! logic stays single-threaded and event-driven.

use serde::{Deserialize, Serialize};

use crate::errors::QuoteError;
use crate::quote::{Duration, RateQuote};

/// Party type of the acting user, derived from the backend's user-type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Client,
    Agent,
}

impl Role {
    /// Maps the backend user-type tag (`"C"` for client parties) to a role.
    pub fn from_user_type(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("c") {
            Role::Client
        } else {
            Role::Agent
        }
    }
}

/// Identity descriptor supplied by the host when the wizard opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub role: Role,
}

/// Contact profile returned by the user-details lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub phone_number: String,
    pub email_address: String,
}

/// Monotonic identifier assigned to every outbound fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

/// Allocates request identifiers in issue order.
#[derive(Debug, Default)]
pub struct RequestCounter(u64);

impl RequestCounter {
    pub fn next(&mut self) -> RequestId {
        self.0 += 1;
        RequestId(self.0)
    }
}

/// Outbound lookup the host must perform on the wizard's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    /// Load the selectable cover periods. Issued once per step activation.
    Durations { id: RequestId },
    /// Load the rate table for the given duration. Issued on every settled
    /// change of the duration selection.
    Rates { id: RequestId, duration_id: String },
    /// Load the acting client's contact profile for prefill.
    Profile { id: RequestId },
}

impl FetchRequest {
    pub fn id(&self) -> RequestId {
        match self {
            FetchRequest::Durations { id }
            | FetchRequest::Rates { id, .. }
            | FetchRequest::Profile { id } => *id,
        }
    }
}

/// Completed lookup delivered back to the wizard by the host.
#[derive(Debug)]
pub enum FetchResponse {
    Durations {
        id: RequestId,
        result: Result<Vec<Duration>, QuoteError>,
    },
    Rates {
        id: RequestId,
        result: Result<Vec<RateQuote>, QuoteError>,
    },
    Profile {
        id: RequestId,
        result: Result<Profile, QuoteError>,
    },
}
