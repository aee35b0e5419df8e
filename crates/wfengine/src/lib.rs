//! Built-in workflow component.
//!
//! Implements the [`workflows::Workflow`] trait on top of an external
//! durable-orchestration engine reached through
//! [`workflows::OrchestrationClient`]. The component only translates: every
//! scheduling, persistence, retry, and replay decision belongs to the engine.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Request validation, option mapping, and response
//! shaping live here. The host sees only [`workflows::Workflow`]; the engine
//! sees only its own client API.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`component`] | `WorkflowEngineComponent`, the `Workflow` implementation |
//! | [`definition`] | Component manifest and factory used for registration |
//! | [`telemetry`] | `tracing` subscriber and OTLP exporter set-up for the host |

pub mod component;
pub mod definition;
pub mod telemetry;

pub use component::WorkflowEngineComponent;
pub use definition::{
    builtin_workflow_factory, component_definition, ComponentDefinition, MetadataItem,
    WorkflowFactory,
};
pub use telemetry::{init_telemetry, LogFormat, TelemetryConfig, TelemetryGuard};
