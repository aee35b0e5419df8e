//! Generic workflow component contract.
//!
//! This crate defines what a pluggable workflow backend looks like to its
//! hosting runtime, and what such a backend needs from an external
//! durable-orchestration engine. Infrastructure crates implement the traits
//! defined here; they never add rules of their own to the request/response
//! shapes.
//!
//! ## Architectural Layer
//!
//! **Contract + port definitions.** This crate has no I/O dependencies.
//! [`Workflow`] is the capability the host consumes; [`OrchestrationClient`]
//! is the port a backend consumes.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`InstanceId`, `WorkflowName`) |
//! | [`types`] | Value types (`Timestamp`, `RuntimeStatus`) and timestamp parse errors |
//! | [`component`] | Host-facing requests, responses, metadata keys, the `Workflow` trait |
//! | [`orchestration`] | Engine-facing options, metadata, errors, the `OrchestrationClient` trait |
//! | [`errors`] | `WorkflowError` and its `ErrorKind` taxonomy |

pub mod component;
pub mod errors;
pub mod identifiers;
pub mod orchestration;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use component::{keys, Metadata, StartRequest, StateResponse, Workflow, WorkflowReference};
pub use errors::{ErrorKind, WorkflowError};
pub use identifiers::{InstanceId, WorkflowName};
#[cfg(any(test, feature = "testing"))]
pub use orchestration::MockOrchestrationClient;
pub use orchestration::{
    FailureDetails, OrchestrationClient, OrchestrationError, OrchestrationMetadata,
    ScheduleOptions,
};
pub use types::{RuntimeStatus, Timestamp, TimestampParseError};
