//! The generic workflow component contract exposed to the hosting runtime.
//!
//! The runtime speaks only in these shapes: a [`StartRequest`] in, a
//! [`WorkflowReference`] out, and a [`StateResponse`] whose metadata map uses
//! the fixed keys in [`keys`]. Backends implement [`Workflow`].

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::WorkflowError;

/// Fixed key names used in request options and response metadata.
///
/// Hosts match on these strings verbatim.
pub mod keys {
    /// Request option carrying an RFC3339 start time.
    pub const START_TIME: &str = "dapr.workflow.start_time";

    pub const NAME: &str = "dapr.workflow.name";
    pub const RUNTIME_STATUS: &str = "dapr.workflow.runtime_status";
    pub const INPUT: &str = "dapr.workflow.input";
    pub const CUSTOM_STATUS: &str = "dapr.workflow.custom_status";
    pub const LAST_UPDATED: &str = "dapr.workflow.last_updated";
    pub const FAILURE_ERROR_TYPE: &str = "dapr.workflow.failure.error_type";
    pub const FAILURE_ERROR_MESSAGE: &str = "dapr.workflow.failure.error_message";
    pub const OUTPUT: &str = "dapr.workflow.output";
}

// ---------------------------------------------------------------------------
// Component metadata
// ---------------------------------------------------------------------------

/// Configuration handed to a component when the host initialises it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Name the component was registered under.
    pub name: String,

    /// Free-form component properties.
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

// ---------------------------------------------------------------------------
// Requests and responses
// ---------------------------------------------------------------------------

/// Identifies a workflow instance by its raw instance ID.
///
/// The ID may be empty when starting a workflow (the engine generates one);
/// terminate and get reject an empty ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkflowReference {
    pub instance_id: String,
}

impl WorkflowReference {
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
        }
    }
}

/// Request to start a new workflow instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StartRequest {
    /// Optional explicit instance ID; empty means "let the engine choose".
    #[serde(default)]
    pub workflow_reference: WorkflowReference,

    /// Name of the workflow to run. Required.
    pub workflow_name: String,

    /// JSON-serializable workflow input. `None` and JSON `null` both mean
    /// "no input".
    #[serde(default)]
    pub input: Option<serde_json::Value>,

    /// Additional options, e.g. [`keys::START_TIME`].
    #[serde(default)]
    pub options: HashMap<String, String>,
}

impl StartRequest {
    /// Creates a request for `workflow_name` with no ID, input, or options.
    pub fn new(workflow_name: impl Into<String>) -> Self {
        Self {
            workflow_name: workflow_name.into(),
            ..Self::default()
        }
    }

    pub fn with_instance_id(mut self, instance_id: impl Into<String>) -> Self {
        self.workflow_reference = WorkflowReference::new(instance_id);
        self
    }

    pub fn with_input(mut self, input: serde_json::Value) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Observed state of a workflow instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateResponse {
    pub wf_info: WorkflowReference,

    /// Creation time of the instance, RFC3339.
    pub start_time: String,

    /// Status fields keyed by the constants in [`keys`].
    pub metadata: HashMap<String, String>,
}

// ---------------------------------------------------------------------------
// Capability trait
// ---------------------------------------------------------------------------

/// A pluggable workflow backend.
///
/// Implementations are stateless with respect to individual instances and
/// may be called concurrently.
#[async_trait]
pub trait Workflow: Send + Sync {
    /// Initialises the component with its host-supplied metadata.
    fn init(&self, metadata: &Metadata) -> Result<(), WorkflowError>;

    /// Starts a new workflow instance and returns a reference to it.
    async fn start(&self, req: &StartRequest) -> Result<WorkflowReference, WorkflowError>;

    /// Requests termination of a workflow instance.
    async fn terminate(&self, req: &WorkflowReference) -> Result<(), WorkflowError>;

    /// Returns the current state of a workflow instance.
    async fn get(&self, req: &WorkflowReference) -> Result<StateResponse, WorkflowError>;
}
