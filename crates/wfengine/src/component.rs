//! [`WorkflowEngineComponent`]: the [`Workflow`] implementation backed by an
//! [`OrchestrationClient`].
//!
//! Every operation validates the generic request, makes at most one client
//! call, and translates the answer. Nothing is cached between calls.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument, warn};
use workflows::{
    keys, InstanceId, Metadata, OrchestrationClient, OrchestrationMetadata, ScheduleOptions,
    StartRequest, StateResponse, Timestamp, Workflow, WorkflowError, WorkflowName,
    WorkflowReference,
};

/// Workflow component that forwards to an external orchestration engine.
pub struct WorkflowEngineComponent {
    client: Arc<dyn OrchestrationClient>,
}

impl WorkflowEngineComponent {
    /// Creates a component that forwards every operation to `client`.
    pub fn new(client: Arc<dyn OrchestrationClient>) -> Self {
        Self { client }
    }
}

impl std::fmt::Debug for WorkflowEngineComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowEngineComponent").finish_non_exhaustive()
    }
}

/// Translates a [`StartRequest`] into the client's scheduling arguments.
fn schedule_options(req: &StartRequest) -> Result<(WorkflowName, ScheduleOptions), WorkflowError> {
    let name = WorkflowName::new(req.workflow_name.as_str())
        .ok_or(WorkflowError::MissingWorkflowName)?;

    let start_time = req
        .options
        .get(keys::START_TIME)
        .map(|value| {
            Timestamp::parse_rfc3339(value).map_err(|source| WorkflowError::InvalidStartTime {
                value: value.clone(),
                source,
            })
        })
        .transpose()?;

    let options = ScheduleOptions {
        instance_id: InstanceId::new(req.workflow_reference.instance_id.as_str()),
        input: req.input.clone().filter(|input| !input.is_null()),
        start_time,
    };
    Ok((name, options))
}

fn required_instance_id(req: &WorkflowReference) -> Result<InstanceId, WorkflowError> {
    InstanceId::new(req.instance_id.as_str()).ok_or(WorkflowError::MissingInstanceId)
}

/// Builds the host-facing state from engine metadata.
///
/// Failure details win over output; an in-flight instance reports neither.
fn state_response(instance_id: &InstanceId, metadata: OrchestrationMetadata) -> StateResponse {
    let mut fields = HashMap::from([
        (keys::NAME.to_string(), metadata.name.clone()),
        (keys::RUNTIME_STATUS.to_string(), metadata.status().as_str().to_string()),
        (keys::INPUT.to_string(), metadata.serialized_input.clone()),
        (keys::CUSTOM_STATUS.to_string(), metadata.serialized_custom_status.clone()),
        (keys::LAST_UPDATED.to_string(), metadata.last_updated_at.to_rfc3339()),
    ]);

    let is_complete = metadata.is_complete();
    if let Some(failure) = metadata.failure_details {
        fields.insert(keys::FAILURE_ERROR_TYPE.to_string(), failure.error_type);
        fields.insert(keys::FAILURE_ERROR_MESSAGE.to_string(), failure.error_message);
    } else if is_complete {
        fields.insert(keys::OUTPUT.to_string(), metadata.serialized_output);
    }

    StateResponse {
        wf_info: WorkflowReference::new(instance_id.as_str()),
        start_time: metadata.created_at.to_rfc3339(),
        metadata: fields,
    }
}

#[async_trait]
impl Workflow for WorkflowEngineComponent {
    fn init(&self, metadata: &Metadata) -> Result<(), WorkflowError> {
        info!(component = %metadata.name, "initializing workflow component");
        Ok(())
    }

    #[instrument(skip_all, fields(workflow_name = %req.workflow_name))]
    async fn start(&self, req: &StartRequest) -> Result<WorkflowReference, WorkflowError> {
        let (name, options) = schedule_options(req).inspect_err(|err| {
            warn!(error = %err, "rejected workflow start request");
        })?;

        let instance_id = self
            .client
            .schedule_new_orchestration(&name, options)
            .await
            .map_err(|source| {
                error!(error = %source, "orchestration client failed to schedule workflow");
                WorkflowError::Start { source }
            })?;

        info!(instance_id = %instance_id, "created new workflow instance");
        Ok(WorkflowReference::new(instance_id.into_string()))
    }

    #[instrument(skip_all, fields(instance_id = %req.instance_id))]
    async fn terminate(&self, req: &WorkflowReference) -> Result<(), WorkflowError> {
        let instance_id = required_instance_id(req).inspect_err(|err| {
            warn!(error = %err, "rejected workflow terminate request");
        })?;

        // No caller-supplied reason is carried through the generic interface.
        self.client
            .terminate_orchestration(&instance_id, "")
            .await
            .map_err(|source| {
                error!(error = %source, "orchestration client failed to terminate workflow");
                WorkflowError::Terminate {
                    instance_id: instance_id.to_string(),
                    source,
                }
            })?;

        info!("scheduled termination for workflow instance");
        Ok(())
    }

    #[instrument(skip_all, fields(instance_id = %req.instance_id))]
    async fn get(&self, req: &WorkflowReference) -> Result<StateResponse, WorkflowError> {
        let instance_id = required_instance_id(req).inspect_err(|err| {
            warn!(error = %err, "rejected workflow get request");
        })?;

        let metadata = self
            .client
            .fetch_orchestration_metadata(&instance_id)
            .await
            .map_err(|source| {
                error!(error = %source, "orchestration client failed to fetch workflow metadata");
                WorkflowError::Get {
                    instance_id: instance_id.to_string(),
                    source,
                }
            })?;

        Ok(state_response(&instance_id, metadata))
    }
}
