//! Port for the external durable-orchestration client.
//!
//! The orchestration engine (task hub, replay, history persistence, worker
//! dispatch) lives outside this workspace. Infrastructure crates receive an
//! implementation of [`OrchestrationClient`] from the host and never look
//! behind it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{InstanceId, RuntimeStatus, Timestamp, WorkflowName};

// ---------------------------------------------------------------------------
// Scheduling options
// ---------------------------------------------------------------------------

/// Options for scheduling a new orchestration instance.
///
/// Every field defaults to "unset"; the engine applies its own defaults for
/// anything left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOptions {
    /// Explicit instance ID. `None` lets the engine generate one.
    pub instance_id: Option<InstanceId>,

    /// JSON-serializable orchestration input.
    pub input: Option<serde_json::Value>,

    /// Earliest time the orchestration may begin executing.
    pub start_time: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Instance metadata
// ---------------------------------------------------------------------------

/// Error information recorded by the engine for a failed orchestration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDetails {
    pub error_type: String,
    pub error_message: String,
}

/// Snapshot of an orchestration instance as reported by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationMetadata {
    pub instance_id: InstanceId,
    pub name: String,
    pub created_at: Timestamp,
    pub last_updated_at: Timestamp,

    /// Raw status code from the engine's protocol. See [`RuntimeStatus::from_code`].
    pub runtime_status: i32,

    pub serialized_input: String,
    pub serialized_output: String,
    pub serialized_custom_status: String,

    /// Present only when the orchestration failed.
    pub failure_details: Option<FailureDetails>,
}

impl OrchestrationMetadata {
    /// Returns the decoded runtime status.
    pub fn status(&self) -> RuntimeStatus {
        RuntimeStatus::from_code(self.runtime_status)
    }

    /// Returns `true` if the orchestration has reached a terminal state.
    pub fn is_complete(&self) -> bool {
        self.status().is_terminal()
    }
}

// ---------------------------------------------------------------------------
// Client errors
// ---------------------------------------------------------------------------

/// Failures reported by an [`OrchestrationClient`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestrationError {
    /// No orchestration with this instance ID exists.
    #[error("no such instance exists: {0}")]
    InstanceNotFound(InstanceId),

    /// An orchestration with the requested instance ID is already scheduled.
    #[error("an orchestration with instance ID '{0}' already exists")]
    InstanceAlreadyExists(InstanceId),

    /// Any other failure raised by the engine or its backend.
    #[error("orchestration backend error: {message}")]
    Backend {
        /// Description supplied by the engine.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Client trait
// ---------------------------------------------------------------------------

/// Handle to the external engine used to schedule, terminate, and query
/// orchestration instances.
///
/// Implementations are shared across concurrent calls, so every method takes
/// `&self`. Cancellation is dropping the returned future.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait OrchestrationClient: Send + Sync {
    /// Schedules a new instance of the named orchestration and returns its ID.
    async fn schedule_new_orchestration(
        &self,
        name: &WorkflowName,
        options: ScheduleOptions,
    ) -> Result<InstanceId, OrchestrationError>;

    /// Requests termination of a running instance.
    async fn terminate_orchestration(
        &self,
        instance_id: &InstanceId,
        reason: &str,
    ) -> Result<(), OrchestrationError>;

    /// Fetches the current metadata for an instance.
    async fn fetch_orchestration_metadata(
        &self,
        instance_id: &InstanceId,
    ) -> Result<OrchestrationMetadata, OrchestrationError>;
}
