//! Quote wizard domain: selection and rate models, the traveler roster, the
//! two wizard steps, and the controller that sequences them.

pub mod details_step;
pub mod quote_step;
pub mod selection;
pub mod traveler;
pub mod wizard;

pub use details_step::{ContactInfo, FieldPolicy, TravelerDetailsStep, TravelerRecord};
pub use quote_step::QuoteStep;
pub use selection::{Duration, QuoteSelection, RateQuote, DEFAULT_DURATION_ID};
pub use traveler::{TravelerEntry, TravelerRoster};
pub use wizard::{QuoteWizard, StepId};
