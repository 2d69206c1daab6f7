//! Backend Command Wrappers
//!
//! Typed bindings to the HTTP endpoints of the process backend, organized by domain.

mod content;
mod process;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::models::StatusResponse;
use crate::request::RequestContext;

// Re-export all public items
pub use content::*;
pub use process::*;

/// Common result type for backend calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Backend call errors
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// fetch failed or no browser window
    Network(String),
    /// Non-2xx HTTP status
    Status(u16),
    /// Response body did not match the expected shape
    Decode(String),
    /// Request body could not be serialized
    Encode(String),
    /// Backend answered `success: false`
    Rejected(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Status(code) => write!(f, "HTTP status {}", code),
            ApiError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
            ApiError::Encode(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::Rejected(what) => write!(f, "Backend rejected {}", what),
        }
    }
}

impl std::error::Error for ApiError {}

fn js_error(value: JsValue) -> ApiError {
    ApiError::Network(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

/// Send one request and decode the JSON answer
async fn fetch_json<T: DeserializeOwned>(method: &str, url: &str, body: Option<String>) -> ApiResult<T> {
    let window = web_sys::window().ok_or_else(|| ApiError::Network("no browser window".to_string()))?;

    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = &body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(js_error)?;

    tracing::debug!("[API] {} {}", method, url);
    let promise: js_sys::Promise = window.fetch_with_request(&request);
    let response: Response = JsFuture::from(promise)
        .await
        .map_err(js_error)?
        .dyn_into()
        .map_err(js_error)?;

    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }

    let json = JsFuture::from(response.json().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    serde_wasm_bindgen::from_value(json).map_err(|e| ApiError::Decode(e.to_string()))
}

async fn get_json<T: DeserializeOwned>(ctx: &RequestContext, path: &str) -> ApiResult<T> {
    fetch_json("GET", &ctx.endpoint(path), None).await
}

async fn post_json<A: Serialize, T: DeserializeOwned>(ctx: &RequestContext, path: &str, args: &A) -> ApiResult<T> {
    let body = serde_json::to_string(args).map_err(|e| ApiError::Encode(e.to_string()))?;
    fetch_json("POST", &ctx.endpoint(path), Some(body)).await
}

/// Turn `success: false` into an error
fn expect_success(status: StatusResponse, what: &str) -> ApiResult<StatusResponse> {
    if status.success {
        Ok(status)
    } else {
        Err(ApiError::Rejected(what.to_string()))
    }
}
