use serde::{Deserialize, Serialize};

/// Cover period preselected when the wizard opens.
pub const DEFAULT_DURATION_ID: &str = "4";

/// Selectable cover period, fetched from the backend and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Duration {
    pub id: String,
    pub label: String,
}

/// One plan's rate for the selected cover period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RateQuote {
    pub plan: String,
    pub premium_cents: i64,
    pub currency: String,
}

/// Product selection gathered on the first wizard step.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSelection {
    pub duration_id: String,
    pub plan: String,
}

impl QuoteSelection {
    pub fn new() -> Self {
        Self {
            duration_id: DEFAULT_DURATION_ID.to_string(),
            plan: String::new(),
        }
    }

    /// Both fields must be non-empty before the wizard may advance.
    pub fn is_complete(&self) -> bool {
        !self.duration_id.trim().is_empty() && !self.plan.trim().is_empty()
    }
}

impl Default for QuoteSelection {
    fn default() -> Self {
        Self::new()
    }
}
