//! The provisioning transition table.

use super::states::{ProvisionEvent, ProvisionEvent as Ev, ProvisionState, ProvisionState as St};
use crate::builder::{BuildError, MachineBuilder};
use crate::core::StateDef;
use crate::engine::StateMachine;
use crate::watcher::{LoggingWatcher, SharedWatcher, Watcher};
use std::sync::Arc;

/// The provisioning state machine.
pub type ProvisionMachine = StateMachine<ProvisionState, ProvisionEvent>;

/// States with nothing pending until new input arrives.
const STABLE: &[ProvisionState] = &[St::Manageable, St::Available, St::Active, St::Error];

/// Transitional states and the stable state each works toward.
const IN_FLIGHT: &[(ProvisionState, ProvisionState)] = &[
    (St::Deploying, St::Active),
    (St::DeployWait, St::Active),
    (St::DeployFail, St::Active),
    (St::Deleting, St::Available),
    (St::Inspecting, St::Manageable),
    (St::InspectFail, St::Manageable),
];

/// `(source, event, destination)`.
const TRANSITIONS: &[(ProvisionState, ProvisionEvent, ProvisionState)] = &[
    // leaving and entering management
    (St::Manageable, Ev::Provide, St::Available),
    (St::Available, Ev::Manage, St::Manageable),
    // inspection
    (St::Manageable, Ev::Inspect, St::Inspecting),
    (St::Inspecting, Ev::Done, St::Manageable),
    (St::Inspecting, Ev::Fail, St::InspectFail),
    (St::InspectFail, Ev::Manage, St::Manageable),
    (St::InspectFail, Ev::Inspect, St::Inspecting),
    // deployment
    (St::Available, Ev::Deploy, St::Deploying),
    (St::Deploying, Ev::Fail, St::DeployFail),
    (St::DeployFail, Ev::Rebuild, St::Deploying),
    (St::DeployFail, Ev::Deploy, St::Deploying),
    (St::Deploying, Ev::Wait, St::DeployWait),
    (St::DeployWait, Ev::Resume, St::Deploying),
    (St::DeployWait, Ev::Fail, St::DeployFail),
    (St::Deploying, Ev::Done, St::Active),
    (St::Active, Ev::Rebuild, St::Deploying),
    // teardown
    (St::Active, Ev::Delete, St::Deleting),
    (St::DeployWait, Ev::Delete, St::Deleting),
    (St::DeployFail, Ev::Delete, St::Deleting),
    (St::Deleting, Ev::Done, St::Available),
    (St::Deleting, Ev::Error, St::Error),
    // recovery from error
    (St::Error, Ev::Rebuild, St::Deploying),
    (St::Error, Ev::Delete, St::Deleting),
];

/// Build the provisioning machine with a [`LoggingWatcher`] on every state.
///
/// Call once at startup and share the result.
pub fn provision_machine() -> Result<ProvisionMachine, BuildError> {
    provision_machine_with(LoggingWatcher::new())
}

/// Build the provisioning machine with `watcher` attached to every state.
pub fn provision_machine_with<W>(watcher: W) -> Result<ProvisionMachine, BuildError>
where
    W: Watcher<ProvisionState, ProvisionEvent> + 'static,
{
    let watcher: SharedWatcher<ProvisionState, ProvisionEvent> = Arc::new(watcher);
    let mut builder = MachineBuilder::new().initial(St::Manageable);

    for &state in STABLE {
        let def = StateDef::new(state).stable();
        builder = builder.add_state(def.watched_by(Arc::clone(&watcher)))?;
    }
    for &(state, target) in IN_FLIGHT {
        let def = StateDef::new(state).target(target);
        builder = builder.add_state(def.watched_by(Arc::clone(&watcher)))?;
    }
    for &(from, event, to) in TRANSITIONS {
        builder = builder.add_transition(from, to, event)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TransitionError;

    #[test]
    fn table_builds() {
        let machine = provision_machine().unwrap();

        assert_eq!(machine.transitions().count(), TRANSITIONS.len());
        assert_eq!(machine.registry().len(), STABLE.len() + IN_FLIGHT.len());
        assert_eq!(machine.initial_state(), &ProvisionState::Manageable);
    }

    #[test]
    fn stable_states_are_exactly_the_resting_ones() {
        let machine = provision_machine().unwrap();

        for state in machine.registry().states() {
            let expected = matches!(
                state,
                St::Manageable | St::Available | St::Active | St::Error
            );
            assert_eq!(machine.is_stable(state), Ok(expected), "{state}");
        }
    }

    #[test]
    fn transitional_states_have_targets() {
        let machine = provision_machine().unwrap();

        for state in machine.registry().states() {
            let stable = machine.is_stable(state).unwrap();
            assert_eq!(machine.target_for(state).is_none(), stable, "{state}");
        }
    }

    #[test]
    fn legacy_values_are_not_registered() {
        let machine = provision_machine().unwrap();

        for legacy in [St::DeployDone, St::Deleted] {
            assert!(!machine.is_valid_state(&legacy));
            assert_eq!(
                machine.process_event(&legacy, &Ev::Delete),
                Err(TransitionError::InvalidState {
                    state: legacy.to_string()
                })
            );
        }
    }

    #[test]
    fn manage_is_not_allowed_from_active() {
        let machine = provision_machine().unwrap();

        let result = machine.process_event(&St::Active, &Ev::Manage);

        assert!(matches!(result, Err(TransitionError::InvalidEvent { .. })));
    }

    #[test]
    fn every_reference_row_reaches_its_destination() {
        let machine = provision_machine().unwrap();
        let rows = [
            ("manageable", "provide", "available"),
            ("available", "manage", "manageable"),
            ("available", "deploy", "deploying"),
            ("manageable", "inspect", "inspecting"),
            ("inspecting", "done", "manageable"),
            ("inspecting", "fail", "inspect failed"),
            ("inspect failed", "manage", "manageable"),
            ("inspect failed", "inspect", "inspecting"),
            ("deploying", "fail", "deploy failed"),
            ("deploy failed", "rebuild", "deploying"),
            ("deploy failed", "deploy", "deploying"),
            ("deploying", "wait", "wait call-back"),
            ("wait call-back", "resume", "deploying"),
            ("wait call-back", "fail", "deploy failed"),
            ("deploying", "done", "active"),
            ("active", "rebuild", "deploying"),
            ("active", "delete", "deleting"),
            ("wait call-back", "delete", "deleting"),
            ("deploy failed", "delete", "deleting"),
            ("deleting", "done", "available"),
            ("deleting", "error", "error"),
            ("error", "rebuild", "deploying"),
            ("error", "delete", "deleting"),
        ];

        for (from, event, to) in rows {
            let from = St::from_name(from).unwrap();
            let event = Ev::from_name(event).unwrap();
            let to = St::from_name(to).unwrap();
            assert_eq!(
                machine.process_event(&from, &event),
                Ok(to),
                "{from} --{event}-->"
            );
        }

        let valid = St::ALL
            .iter()
            .flat_map(|state| Ev::ALL.iter().map(move |event| (state, event)))
            .filter(|(state, event)| machine.is_valid_event(state, event))
            .count();
        assert_eq!(valid, rows.len());
    }
}
