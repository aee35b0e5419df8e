//! Registration surface for the built-in workflow component.
//!
//! A host discovers the component through [`component_definition`] and
//! creates instances through the factory returned by
//! [`builtin_workflow_factory`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use workflows::{OrchestrationClient, Workflow};

use crate::WorkflowEngineComponent;

/// Component type the built-in workflow backend registers under.
pub const COMPONENT_TYPE: &str = "workflow.dapr";

/// Component name of the built-in workflow backend.
pub const COMPONENT_NAME: &str = "dapr";

/// Component version of the built-in workflow backend.
pub const COMPONENT_VERSION: &str = "v1";

/// One name/value entry of a component's declared metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataItem {
    pub name: String,
    pub value: String,
}

/// Declarative description of a component, in the host's manifest shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDefinition {
    pub kind: String,
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: String,
    pub version: String,
    pub metadata: Vec<MetadataItem>,
}

/// Returns the definition of the built-in workflow component.
pub fn component_definition() -> ComponentDefinition {
    ComponentDefinition {
        kind: "Component".to_string(),
        name: COMPONENT_NAME.to_string(),
        component_type: COMPONENT_TYPE.to_string(),
        version: COMPONENT_VERSION.to_string(),
        metadata: Vec::new(),
    }
}

/// Constructor the host calls each time it needs a workflow component.
pub type WorkflowFactory = Box<dyn Fn() -> Box<dyn Workflow> + Send + Sync>;

/// Returns a factory producing components that share `client`.
pub fn builtin_workflow_factory(client: Arc<dyn OrchestrationClient>) -> WorkflowFactory {
    Box::new(move || -> Box<dyn Workflow> {
        Box::new(WorkflowEngineComponent::new(Arc::clone(&client)))
    })
}
