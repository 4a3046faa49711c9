//! Provision states and events of a bare-metal node.
//!
//! Names are the strings stored in a node's `provision_state` and
//! `target_provision_state` fields.

use crate::{event_enum, state_enum};

state_enum! {
    /// Lifecycle stage of a node.
    pub enum ProvisionState {
        /// Verified manageable at least once; not yet offered for scheduling.
        Manageable => "manageable",
        /// Available for use and scheduling.
        Available => "available",
        /// Deployed and associated with an instance.
        Active => "active",
        /// Being deployed, or about to receive its deploy request.
        Deploying => "deploying",
        /// Waiting for the driver's deploy callback.
        DeployWait => "wait call-back",
        /// Deployment failed.
        DeployFail => "deploy failed",
        /// Legacy target value of older releases. Never registered.
        DeployDone => "deploy complete",
        /// Being torn down.
        Deleting => "deleting",
        /// Legacy target value of older releases. Never registered.
        Deleted => "deleted",
        /// Processing failed; see the node's last error.
        Error => "error",
        /// Hardware inspection running.
        Inspecting => "inspecting",
        /// Hardware inspection failed.
        InspectFail => "inspect failed",
    }
}

event_enum! {
    /// Internal events that drive provisioning transitions.
    pub enum ProvisionEvent {
        Provide => "provide",
        Manage => "manage",
        Deploy => "deploy",
        Inspect => "inspect",
        Done => "done",
        Fail => "fail",
        Rebuild => "rebuild",
        Wait => "wait",
        Resume => "resume",
        Delete => "delete",
        Error => "error",
    }
}
