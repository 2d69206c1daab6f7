//! Content Commands
//!
//! Static definitions and the component catalogue.

use crate::models::{ComponentOverview, MetricsDefinition};
use crate::request::RequestContext;
use super::{get_json, ApiResult};

pub const METRICS_DEFINITION_PATH: &str = "/content/mapping_metrics_definition.json";
pub const COMPONENT_OVERVIEW_PATH: &str = "/component/overview";

pub async fn get_metrics_definition(ctx: &RequestContext) -> ApiResult<MetricsDefinition> {
    get_json(ctx, METRICS_DEFINITION_PATH).await
}

pub async fn get_component_overview(ctx: &RequestContext) -> ApiResult<ComponentOverview> {
    get_json(ctx, COMPONENT_OVERVIEW_PATH).await
}
