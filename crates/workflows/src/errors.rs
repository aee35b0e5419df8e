//! Error taxonomy for workflow component operations.
//!
//! [`WorkflowError`] is what the hosting runtime sees. Failures from the
//! orchestration client are never returned bare: they are wrapped with the
//! operation (and instance ID where there is one) and kept as the error
//! source.

use thiserror::Error;

use crate::{OrchestrationError, TimestampParseError};

/// Broad class of a [`WorkflowError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required request field was missing. No client call was made.
    Validation,
    /// A request field was present but malformed. No client call was made.
    Format,
    /// The orchestration client reported a failure.
    Upstream,
}

/// Errors returned by [`crate::Workflow`] operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("a workflow name is required")]
    MissingWorkflowName,

    #[error("a workflow instance ID is required")]
    MissingInstanceId,

    /// The start-time option could not be parsed as RFC3339.
    #[error("start times must be in RFC3339 format (e.g. \"2009-11-10T23:00:00Z\")")]
    InvalidStartTime {
        /// The rejected option value.
        value: String,
        #[source]
        source: TimestampParseError,
    },

    #[error("unable to start workflow: {source}")]
    Start {
        #[source]
        source: OrchestrationError,
    },

    #[error("failed to terminate workflow {instance_id}: {source}")]
    Terminate {
        instance_id: String,
        #[source]
        source: OrchestrationError,
    },

    #[error("failed to get workflow metadata for '{instance_id}': {source}")]
    Get {
        instance_id: String,
        #[source]
        source: OrchestrationError,
    },
}

impl WorkflowError {
    /// Classifies this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingWorkflowName | Self::MissingInstanceId => ErrorKind::Validation,
            Self::InvalidStartTime { .. } => ErrorKind::Format,
            Self::Start { .. } | Self::Terminate { .. } | Self::Get { .. } => ErrorKind::Upstream,
        }
    }

    /// Returns the client error for upstream failures.
    pub fn upstream(&self) -> Option<&OrchestrationError> {
        match self {
            Self::Start { source } | Self::Terminate { source, .. } | Self::Get { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}
