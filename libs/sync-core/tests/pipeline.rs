//! End-to-end pipeline tests over an in-memory client directory.

use async_trait::async_trait;
use bridge_core::directory::{ClientDirectory, ClientMatch};
use bridge_core::eligibility::INELIGIBLE_REASON;
use bridge_core::mapping::{intake, FieldMappingTable};
use bridge_core::models::{ClientId, ClientRecord};
use bridge_core::pipeline::{process_event, ProcessReport};
use bridge_core::{Error, Result};
use serde_json::{json, Value};
use std::sync::Mutex;

#[derive(Debug, Clone)]
struct StoredClient {
    id: i64,
    email: String,
    record: ClientRecord,
    tags: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CallCounts {
    searches: usize,
    creates: usize,
    updates: usize,
    tag_attaches: usize,
}

/// In-memory stand-in for the target platform.
#[derive(Default)]
struct InMemoryDirectory {
    state: Mutex<DirectoryState>,
    fail_tag_attach: bool,
    fail_writes: bool,
}

#[derive(Default)]
struct DirectoryState {
    clients: Vec<StoredClient>,
    next_id: i64,
    calls: CallCounts,
}

impl InMemoryDirectory {
    fn new() -> Self {
        Self::default()
    }

    fn with_failing_tag_attach() -> Self {
        Self {
            fail_tag_attach: true,
            ..Self::default()
        }
    }

    fn with_failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> CallCounts {
        self.state.lock().unwrap().calls.clone()
    }

    fn clients(&self) -> Vec<StoredClient> {
        self.state.lock().unwrap().clients.clone()
    }
}

#[async_trait]
impl ClientDirectory for InMemoryDirectory {
    async fn search_by_email(&self, email: &str) -> Result<Vec<ClientMatch>> {
        let mut state = self.state.lock().unwrap();
        state.calls.searches += 1;
        Ok(state
            .clients
            .iter()
            .filter(|client| client.email == email)
            .map(|client| ClientMatch {
                client_id: Some(ClientId::Number(client.id)),
            })
            .collect())
    }

    async fn create_client(&self, record: &ClientRecord) -> Result<ClientMatch> {
        let mut state = self.state.lock().unwrap();
        state.calls.creates += 1;
        if self.fail_writes {
            return Err(Error::Transport {
                status: 502,
                message: "bad gateway".to_string(),
            });
        }
        state.next_id += 1;
        let id = state.next_id;
        state.clients.push(StoredClient {
            id,
            email: record.email.to_lowercase(),
            record: record.clone(),
            tags: Vec::new(),
        });
        Ok(ClientMatch {
            client_id: Some(ClientId::Number(id)),
        })
    }

    async fn update_client(&self, id: &ClientId, record: &ClientRecord) -> Result<ClientMatch> {
        let mut state = self.state.lock().unwrap();
        state.calls.updates += 1;
        if self.fail_writes {
            return Err(Error::Transport {
                status: 502,
                message: "bad gateway".to_string(),
            });
        }
        let target = state
            .clients
            .iter_mut()
            .find(|client| ClientId::Number(client.id) == *id)
            .expect("update for unknown client id");
        target.record = record.clone();
        Ok(ClientMatch {
            client_id: Some(id.clone()),
        })
    }

    async fn attach_tag(&self, id: &ClientId, tag: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.tag_attaches += 1;
        if self.fail_tag_attach {
            return Err(Error::Transport {
                status: 500,
                message: "tag service down".to_string(),
            });
        }
        if let Some(client) = state
            .clients
            .iter_mut()
            .find(|client| ClientId::Number(client.id) == *id)
        {
            client.tags.push(tag.to_string());
        }
        Ok(())
    }
}

fn paid_direct_contact() -> Value {
    json!({
        "tags": "new,paid",
        "contact_id": "c1",
        "first_name": "A",
        "last_name": "B",
        "email": "a@b.com",
        "phone": "555",
        "Height Feet": "5",
        "Height Inches": "7",
        "Current Weight?": "150"
    })
}

async fn run(directory: &InMemoryDirectory, body: &Value) -> ProcessReport {
    process_event(directory, &FieldMappingTable::default(), body).await
}

// --- eligibility short-circuit ---

#[tokio::test]
async fn unpaid_direct_contact_is_ignored_without_outbound_calls() {
    let directory = InMemoryDirectory::new();
    let report = run(&directory, &json!({"contact_id": "c1", "tags": "new,vip"})).await;

    assert_eq!(
        report,
        ProcessReport::Ignored {
            reason: INELIGIBLE_REASON.to_string()
        }
    );
    assert_eq!(directory.calls(), CallCounts::default());
}

#[tokio::test]
async fn unpaid_tag_event_is_ignored_without_outbound_calls() {
    let directory = InMemoryDirectory::new();
    let report = run(
        &directory,
        &json!({"event": "ContactTagUpdate", "payload": {"contactId": "c1", "tagName": "vip"}}),
    )
    .await;

    assert!(matches!(report, ProcessReport::Ignored { .. }));
    assert_eq!(directory.calls(), CallCounts::default());
}

// --- missing email ---

#[tokio::test]
async fn paid_event_without_email_errors_before_any_call() {
    let directory = InMemoryDirectory::new();
    let report = run(
        &directory,
        &json!({"contact_id": "c1", "tags": "paid", "first_name": "A"}),
    )
    .await;

    match report {
        ProcessReport::Error { reason } => {
            assert!(reason.contains("email"), "unexpected reason: {reason}")
        }
        other => panic!("expected error report, got {other:?}"),
    }
    assert_eq!(directory.calls(), CallCounts::default());
}

// --- end-to-end create ---

#[tokio::test]
async fn paid_direct_contact_is_created_with_derived_bmi() {
    let directory = InMemoryDirectory::new();
    let report = run(&directory, &paid_direct_contact()).await;

    assert_eq!(
        report,
        ProcessReport::Success {
            gohighlevel_contact_id: "c1".to_string(),
            intakeq_client_id: Some(ClientId::Number(1)),
            glp1_fields_mapped: 0,
        }
    );

    let calls = directory.calls();
    assert_eq!(calls.searches, 1);
    assert_eq!(calls.creates, 1);
    assert_eq!(calls.updates, 0);

    let clients = directory.clients();
    assert_eq!(clients.len(), 1);
    let stored = &clients[0].record;
    assert_eq!(stored.first_name, "A");
    assert_eq!(stored.last_name, "B");
    assert_eq!(stored.name, "A B");
    assert_eq!(stored.email, "a@b.com");

    let bmi = stored
        .custom_fields
        .iter()
        .find(|field| field.field_id == "gcf3")
        .expect("BMI custom field missing");
    assert_eq!(bmi.value, "23.5");

    // Both comma-joined tags were attached to the new client.
    assert_eq!(clients[0].tags, vec!["new", "paid"]);
}

// --- idempotence ---

#[tokio::test]
async fn second_run_updates_the_client_created_by_the_first() {
    let directory = InMemoryDirectory::new();
    let first = run(&directory, &paid_direct_contact()).await;
    let second = run(&directory, &paid_direct_contact()).await;

    let first_id = match first {
        ProcessReport::Success {
            intakeq_client_id, ..
        } => intakeq_client_id.expect("first run must report a client id"),
        other => panic!("expected success, got {other:?}"),
    };
    match second {
        ProcessReport::Success {
            intakeq_client_id, ..
        } => assert_eq!(intakeq_client_id, Some(first_id)),
        other => panic!("expected success, got {other:?}"),
    }

    let calls = directory.calls();
    assert_eq!(calls.creates, 1, "second run must not create a duplicate");
    assert_eq!(calls.updates, 1);
    assert_eq!(directory.clients().len(), 1);
}

#[tokio::test]
async fn email_is_matched_case_insensitively() {
    let directory = InMemoryDirectory::new();
    run(&directory, &paid_direct_contact()).await;

    let mut recased = paid_direct_contact();
    recased["email"] = json!("A@B.COM");
    let report = run(&directory, &recased).await;

    assert!(matches!(report, ProcessReport::Success { .. }));
    assert_eq!(directory.clients().len(), 1);
    assert_eq!(directory.calls().updates, 1);
}

// --- ordering stability ---

#[tokio::test]
async fn custom_field_order_is_identical_across_runs() {
    let directory = InMemoryDirectory::new();
    run(&directory, &paid_direct_contact()).await;
    let after_first = directory.clients()[0].record.custom_fields.clone();

    run(&directory, &paid_direct_contact()).await;
    let after_second = directory.clients()[0].record.custom_fields.clone();

    assert_eq!(after_first, after_second);
}

// --- intake form ---

#[tokio::test]
async fn answered_intake_questions_are_counted_and_bundled() {
    let directory = InMemoryDirectory::new();
    let body = json!({
        "tags": "paid",
        "contact_id": "c9",
        "email": "glp@example.com",
        "what_brings_you_here_today": "Weight loss management",
        "any_medication_allergies": "None",
        "social_history": ""
    });
    let report = run(&directory, &body).await;

    match report {
        ProcessReport::Success {
            glp1_fields_mapped, ..
        } => assert_eq!(glp1_fields_mapped, 2),
        other => panic!("expected success, got {other:?}"),
    }

    let clients = directory.clients();
    let form = clients[0].record.form.as_ref().expect("form missing");
    assert_eq!(form.form_name, intake::FORM_NAME);
    assert_eq!(form.fields.len(), 2);
}

// --- failure branches ---

#[tokio::test]
async fn unrecognized_shape_reports_an_error() {
    let directory = InMemoryDirectory::new();
    let report = run(&directory, &json!({"unrelated": true})).await;

    match report {
        ProcessReport::Error { reason } => {
            assert!(reason.contains("shape"), "unexpected reason: {reason}")
        }
        other => panic!("expected error report, got {other:?}"),
    }
    assert_eq!(directory.calls(), CallCounts::default());
}

#[tokio::test]
async fn tag_attach_failure_does_not_fail_the_upsert() {
    let directory = InMemoryDirectory::with_failing_tag_attach();
    let report = run(&directory, &paid_direct_contact()).await;

    assert!(matches!(report, ProcessReport::Success { .. }));
    assert_eq!(directory.calls().tag_attaches, 2);
}

#[tokio::test]
async fn transport_failure_surfaces_status_and_message() {
    let directory = InMemoryDirectory::with_failing_writes();
    let report = run(&directory, &paid_direct_contact()).await;

    match report {
        ProcessReport::Error { reason } => {
            assert!(reason.contains("502"), "unexpected reason: {reason}");
            assert!(reason.contains("bad gateway"), "unexpected reason: {reason}");
        }
        other => panic!("expected error report, got {other:?}"),
    }
}

// --- report serialization contract ---

#[tokio::test]
async fn reports_serialize_to_the_listener_contract() {
    let directory = InMemoryDirectory::new();

    let success = run(&directory, &paid_direct_contact()).await;
    let success = serde_json::to_value(&success).unwrap();
    assert_eq!(success["status"], "success");
    assert_eq!(success["gohighlevel_contact_id"], "c1");
    assert_eq!(success["intakeq_client_id"], 1);
    assert_eq!(success["glp1_fields_mapped"], 0);

    let ignored = run(&directory, &json!({"contact_id": "c1", "tags": "new"})).await;
    let ignored = serde_json::to_value(&ignored).unwrap();
    assert_eq!(ignored["status"], "ignored");
    assert_eq!(ignored["reason"], "Not a paid tag");
}
