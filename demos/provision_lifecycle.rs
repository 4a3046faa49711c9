//! Provision Lifecycle
//!
//! This demo walks one node from enrollment to active and back, driven by
//! public API verbs.
//!
//! Key concepts:
//! - One machine built at startup and shared by reference
//! - Verbs mapped to events through the verb table
//! - Targets recorded while in flight and cleared at rest
//! - Rejected actions leave the node record untouched
//! - Watcher output through `tracing`
//!
//! Run with: RUST_LOG=debug cargo run --example provision_lifecycle

use provision_fsm::provisioning::{
    event_for_verb, provision_machine, ProvisionEvent, ProvisionMachine, ProvisionState,
};
use provision_fsm::record::{NodeRecord, RecordError};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

type Record = NodeRecord<ProvisionState, ProvisionEvent>;

/// Conductor-side helper: map a verb and fire its event.
fn request(machine: &ProvisionMachine, record: &Record, verb: &str) -> Result<Record, String> {
    let event = event_for_verb(verb, record.status.provision_state).map_err(|e| e.to_string())?;
    record
        .fire(machine, &event, None)
        .map_err(|e: RecordError| e.to_string())
}

/// Driver-side helper: report progress with an internal event.
fn report(machine: &ProvisionMachine, record: &Record, event: ProvisionEvent) -> Record {
    match record.fire(machine, &event, None) {
        Ok(next) => next,
        Err(e) => {
            println!("  driver event '{}' rejected: {}", event, e);
            record.clone()
        }
    }
}

fn show(record: &Record) {
    let target = record
        .status
        .target_provision_state
        .map(|t| t.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "  {:<16} target={}",
        record.status.provision_state.to_string(),
        target
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Provision Lifecycle ===\n");

    let machine = match provision_machine() {
        Ok(machine) => machine,
        Err(e) => {
            eprintln!("invalid provisioning table: {}", e);
            return;
        }
    };

    let mut record = Record::enroll(Uuid::new_v4(), &machine);
    println!("Enrolled node {}", record.node);
    show(&record);

    println!("\n1. Inspect hardware (first attempt fails)");
    record = request(&machine, &record, "inspect").unwrap_or(record);
    show(&record);
    record = report(&machine, &record, ProvisionEvent::Fail);
    show(&record);
    record = request(&machine, &record, "inspect").unwrap_or(record);
    record = report(&machine, &record, ProvisionEvent::Done);
    show(&record);

    println!("\n2. Offer for scheduling");
    record = request(&machine, &record, "provide").unwrap_or(record);
    show(&record);

    println!("\n3. Deploy, waiting for the agent callback");
    record = request(&machine, &record, "active").unwrap_or(record);
    show(&record);
    record = report(&machine, &record, ProvisionEvent::Wait);
    show(&record);
    record = report(&machine, &record, ProvisionEvent::Resume);
    record = report(&machine, &record, ProvisionEvent::Done);
    show(&record);

    println!("\n4. Actions not allowed while active");
    for verb in ["manage", "provide", "power-cycle"] {
        match request(&machine, &record, verb) {
            Ok(_) => println!("  '{}' unexpectedly accepted", verb),
            Err(e) => println!("  '{}' rejected: {}", verb, e),
        }
    }
    show(&record);

    println!("\n5. Tear down");
    record = request(&machine, &record, "deleted").unwrap_or(record);
    show(&record);
    record = report(&machine, &record, ProvisionEvent::Done);
    show(&record);

    println!("\nAllowed from {}:", record.status.provision_state);
    for event in machine.events_from(&record.status.provision_state) {
        println!("  {}", event);
    }

    println!("\nHistory:");
    for transition in record.history.transitions() {
        println!(
            "  {} --{}--> {}",
            transition.from, transition.event, transition.to
        );
    }

    match record.to_json() {
        Ok(json) => println!("\nStored record:\n{}", json),
        Err(e) => eprintln!("failed to encode record: {}", e),
    }
}
