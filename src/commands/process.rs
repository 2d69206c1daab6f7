//! Process Commands
//!
//! Loading and saving a process, and the step endpoints that add, move and
//! remove its components.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{ProcessView, StatusResponse, Weight};
use crate::request::RequestContext;
use super::{expect_success, post_json, ApiError, ApiResult};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct ViewProcessArgs<'a> {
    uid: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessFields {
    pub uid: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveProcessArgs {
    pub process: ProcessFields,
    pub target_metrics: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateStepArgs {
    pub process_uid: String,
    pub component_uid: String,
    pub weight: Weight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditStepArgs {
    pub uid: String,
    pub old_weight: Weight,
    pub new_weight: Weight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteStepArgs {
    pub uid: String,
    pub weight: Weight,
}

/// A pending change to the component list of a process
#[derive(Debug, Clone, PartialEq)]
pub enum StepRequest {
    Create(CreateStepArgs),
    Edit(EditStepArgs),
    Delete(DeleteStepArgs),
}

impl StepRequest {
    pub fn path(&self) -> &'static str {
        match self {
            StepRequest::Create(_) => "/process/edit/createstep",
            StepRequest::Edit(_) => "/process/edit/editstep",
            StepRequest::Delete(_) => "/process/edit/deletestep",
        }
    }
}

// ========================
// Commands
// ========================

pub async fn view_process(ctx: &RequestContext, uid: &str) -> ApiResult<ProcessView> {
    let view: ProcessView = post_json(ctx, "/process/view", &ViewProcessArgs { uid }).await?;
    if !view.success {
        return Err(ApiError::Rejected(format!("loading process {}", uid)));
    }
    Ok(view)
}

pub async fn save_process(ctx: &RequestContext, args: &SaveProcessArgs) -> ApiResult<StatusResponse> {
    let status: StatusResponse = post_json(ctx, "/process/create_edit", args).await?;
    expect_success(status, "process save")
}

pub async fn submit_step(ctx: &RequestContext, step: &StepRequest) -> ApiResult<()> {
    let status: StatusResponse = match step {
        StepRequest::Create(args) => post_json(ctx, step.path(), args).await?,
        StepRequest::Edit(args) => post_json(ctx, step.path(), args).await?,
        StepRequest::Delete(args) => post_json(ctx, step.path(), args).await?,
    };
    expect_success(status, step.path())?;
    tracing::info!("[API] {} done", step.path());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parsed(step: &StepRequest) -> serde_json::Value {
        match step {
            StepRequest::Create(args) => serde_json::to_value(args).unwrap(),
            StepRequest::Edit(args) => serde_json::to_value(args).unwrap(),
            StepRequest::Delete(args) => serde_json::to_value(args).unwrap(),
        }
    }

    #[test]
    fn test_step_bodies_match_backend_fields() {
        let create = StepRequest::Create(CreateStepArgs {
            process_uid: "p".into(),
            component_uid: "c".into(),
            weight: Weight(3.0),
        });
        assert_eq!(create.path(), "/process/edit/createstep");
        assert_eq!(parsed(&create), json!({"process_uid": "p", "component_uid": "c", "weight": 3.0}));

        let edit = StepRequest::Edit(EditStepArgs {
            uid: "p".into(),
            old_weight: Weight(1.0),
            new_weight: Weight(2.5),
        });
        assert_eq!(edit.path(), "/process/edit/editstep");
        assert_eq!(parsed(&edit), json!({"uid": "p", "old_weight": 1.0, "new_weight": 2.5}));

        let delete = StepRequest::Delete(DeleteStepArgs { uid: "p".into(), weight: Weight(4.0) });
        assert_eq!(delete.path(), "/process/edit/deletestep");
        assert_eq!(parsed(&delete), json!({"uid": "p", "weight": 4.0}));
    }

    #[test]
    fn test_save_body_shape() {
        let mut targets = BTreeMap::new();
        targets.insert("loc".to_string(), 40);
        let args = SaveProcessArgs {
            process: ProcessFields {
                uid: "-1".into(),
                name: "Onboarding".into(),
                description: "Says \"hi\"".into(),
            },
            target_metrics: targets,
        };
        let value = serde_json::to_value(&args).unwrap();
        assert_eq!(
            value,
            json!({
                "process": {"uid": "-1", "name": "Onboarding", "description": "Says \"hi\""},
                "target_metrics": {"loc": 40}
            })
        );
    }
}
