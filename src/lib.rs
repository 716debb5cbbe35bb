#![doc(test(attr(deny(warnings))))]

//! Travel Core offers the quoting wizard state machine, traveler roster, and
//! validation primitives that power the insurance-quoting client.

pub mod api;
pub mod errors;
pub mod quote;
pub mod utils;
pub mod validation;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Travel Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
