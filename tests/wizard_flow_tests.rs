//! End-to-end wizard workflows driven the way a hosting UI would drive them:
//! field edits in, queued fetch requests out, completions fed back in.

use travel_core::api::{FetchRequest, FetchResponse, Identity, Profile, Role};
use travel_core::errors::QuoteError;
use travel_core::quote::{Duration, QuoteWizard, RateQuote, StepId};

fn agent_wizard() -> QuoteWizard {
    QuoteWizard::new(Identity { role: Role::Agent })
}

fn client_wizard() -> QuoteWizard {
    QuoteWizard::new(Identity { role: Role::Client })
}

fn rates(plan: &str) -> Vec<RateQuote> {
    vec![RateQuote {
        plan: plan.to_string(),
        premium_cents: 125_000,
        currency: "KES".to_string(),
    }]
}

fn fill_traveler_details(wizard: &mut QuoteWizard) {
    wizard.input_email("jane@example.com", 16);
    wizard.commit_email();
    wizard.input_phone("+254712345678", 13);
    wizard.commit_phone();
    wizard.set_traveler_name(0, "Jane Doe");
    wizard.set_traveler_dob(0, "1990-06-15");
}

#[test]
fn opening_queues_the_duration_load() {
    let mut wizard = agent_wizard();
    let requests = wizard.take_requests();
    assert_eq!(requests.len(), 1, "agents get no profile prefill");
    assert!(matches!(requests[0], FetchRequest::Durations { .. }));
    assert!(
        wizard.take_requests().is_empty(),
        "the outbox drains on take"
    );
}

#[test]
fn client_opening_also_queues_the_profile_prefill() {
    let mut wizard = client_wizard();
    let requests = wizard.take_requests();
    assert_eq!(requests.len(), 2);
    assert!(matches!(requests[0], FetchRequest::Durations { .. }));
    assert!(matches!(requests[1], FetchRequest::Profile { .. }));
}

#[test]
fn advance_is_rejected_until_the_selection_is_complete() {
    let mut wizard = agent_wizard();
    wizard.set_duration("");

    assert!(!wizard.advance());
    assert_eq!(wizard.current_step(), StepId::Quote);
    assert_eq!(
        wizard.gate_message(),
        Some("Please Select Cover Period and Plan to continue...")
    );

    // The refusal is advisory and repeatable.
    assert!(!wizard.advance());
    assert_eq!(wizard.current_step(), StepId::Quote);

    wizard.set_duration("4");
    wizard.set_plan("Gold");
    assert!(wizard.advance());
    assert_eq!(wizard.current_step(), StepId::TravelerDetails);
    assert_eq!(wizard.gate_message(), None);
}

#[test]
fn rate_completions_apply_last_write_wins_by_completion_order() {
    let mut wizard = agent_wizard();
    wizard.take_requests();

    wizard.set_duration("4");
    wizard.set_duration("7");
    let requests = wizard.take_requests();
    assert_eq!(requests.len(), 2, "each settled change queues one lookup");

    // The lookup for "7" resolves first; "4" lands last and wins the display.
    wizard.complete(FetchResponse::Rates {
        id: requests[1].id(),
        result: Ok(rates("Silver")),
    });
    wizard.complete(FetchResponse::Rates {
        id: requests[0].id(),
        result: Ok(rates("Gold")),
    });
    assert_eq!(wizard.quote().rates()[0].plan, "Gold");
}

#[test]
fn failed_duration_load_is_nonfatal() {
    let mut wizard = agent_wizard();
    let requests = wizard.take_requests();
    wizard.complete(FetchResponse::Durations {
        id: requests[0].id(),
        result: Err(QuoteError::Fetch("durations unavailable".into())),
    });
    assert!(wizard.quote().durations().is_empty());

    // The wizard stays usable with an empty list.
    wizard.set_plan("Gold");
    assert!(wizard.advance());
}

#[test]
fn duration_list_completion_populates_the_step() {
    let mut wizard = agent_wizard();
    let requests = wizard.take_requests();
    let durations: Vec<Duration> = serde_json::from_str(
        r#"[{"id": "4", "label": "Up to 30 days"}, {"id": "7", "label": "Up to 90 days"}]"#,
    )
    .expect("duration payload");
    wizard.complete(FetchResponse::Durations {
        id: requests[0].id(),
        result: Ok(durations),
    });
    assert_eq!(wizard.quote().durations().len(), 2);
}

#[test]
fn client_contact_fields_are_prefilled_and_locked() {
    let mut wizard = client_wizard();
    let requests = wizard.take_requests();
    wizard.complete(FetchResponse::Profile {
        id: requests[1].id(),
        result: Ok(Profile {
            phone_number: "+254712345678".into(),
            email_address: "client@example.com".into(),
        }),
    });

    assert!(!wizard.details().policy().contact_editable);
    assert_eq!(wizard.details().email(), "client@example.com");

    // Direct edits to locked fields go nowhere.
    wizard.input_email("tampered@example.com", 20);
    wizard.commit_email();
    assert_eq!(wizard.details().email(), "client@example.com");
}

#[test]
fn duplicate_travelers_block_the_final_step() {
    let mut wizard = agent_wizard();
    wizard.set_plan("Gold");
    assert!(wizard.advance());

    fill_traveler_details(&mut wizard);
    wizard.set_num_travelers("2");
    wizard.set_traveler_name(1, "  jane   DOE ");
    wizard.set_traveler_dob(1, "1990-06-15");

    assert!(!wizard.advance());
    assert_eq!(wizard.details().roster().duplicate_indices(), Some((0, 1)));
    assert!(wizard.gate_message().is_some());

    wizard.set_traveler_dob(1, "1991-06-15");
    assert!(wizard.advance());
    assert!(wizard.is_accepted());
}

#[test]
fn submission_hands_over_the_validated_aggregate() {
    let mut wizard = agent_wizard();

    assert!(
        matches!(wizard.submission(), Err(QuoteError::NotReady(_))),
        "an incomplete wizard must refuse submission"
    );

    wizard.set_plan("Gold");
    assert!(wizard.advance());
    fill_traveler_details(&mut wizard);
    wizard.set_winter_sports(true);
    assert!(wizard.advance());

    let (selection, info) = wizard.submission().expect("validated aggregate");
    assert_eq!(selection.duration_id, "4");
    assert_eq!(selection.plan, "Gold");
    assert_eq!(info.email, "jane@example.com");
    assert_eq!(info.num_travelers, 1);
    assert!(info.winter_sports);
    assert_eq!(info.travelers[0].full_name, "Jane Doe");

    let payload = serde_json::to_value(&info).expect("serializable aggregate");
    assert_eq!(payload["phoneNumber"], "+254712345678");
    assert_eq!(payload["travelers"][0]["fullName"], "Jane Doe");
}

#[test]
fn back_is_always_permitted_and_clears_the_gate_message() {
    let mut wizard = agent_wizard();
    wizard.set_plan("Gold");
    assert!(wizard.advance());

    assert!(!wizard.advance(), "empty traveler details are invalid");
    assert!(wizard.gate_message().is_some());

    wizard.back();
    assert_eq!(wizard.current_step(), StepId::Quote);
    assert_eq!(wizard.gate_message(), None);
}

#[test]
fn disposal_silences_late_completions() {
    let mut wizard = agent_wizard();
    let requests = wizard.take_requests();
    wizard.set_duration("7");

    wizard.dispose();
    assert!(wizard.take_requests().is_empty(), "pending requests drop");

    wizard.complete(FetchResponse::Durations {
        id: requests[0].id(),
        result: Ok(vec![Duration {
            id: "4".into(),
            label: "Up to 30 days".into(),
        }]),
    });
    assert!(
        wizard.quote().durations().is_empty(),
        "a late completion must not mutate a disposed wizard"
    );
}
