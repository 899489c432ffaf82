//! RFC 9457 Problem Details for stack calculator failures

use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Serialize, Serializer};
use stack_calculator_sdk::StackCalculatorError;

/// Content type for Problem Details as per RFC 9457.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

/// RFC 9457 Problem Details body.
#[derive(Debug, Clone, Serialize)]
#[must_use]
pub struct Problem {
    #[serde(rename = "type")]
    pub type_url: String,
    pub title: String,
    #[serde(serialize_with = "serialize_status_code")]
    pub status: StatusCode,
    pub detail: String,
    pub instance: String,
    /// Machine-readable error code, e.g. `STACK_EMPTY`.
    pub code: String,
    /// Id of the tracing span the failure was mapped in, for log correlation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span_id: Option<String>,
}

impl Problem {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            type_url: "about:blank".to_owned(),
            title: title.into(),
            status,
            detail: detail.into(),
            instance: String::new(),
            code: String::new(),
            span_id: None,
        }
    }

    pub fn with_instance(mut self, uri: impl Into<String>) -> Self {
        self.instance = uri.into();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_span_id(mut self, id: impl Into<String>) -> Self {
        self.span_id = Some(id.into());
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = self.status;
        let mut resp = axum::Json(self).into_response();
        *resp.status_mut() = status;
        resp.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
        );
        resp
    }
}

/// Map a service error to a Problem for the request at `instance`.
pub fn error_to_problem(e: &StackCalculatorError, instance: &str) -> Problem {
    let (status, title, code) = match e {
        StackCalculatorError::UnknownSession(_) => (
            StatusCode::NOT_FOUND,
            "Unknown Session",
            "STACK_UNKNOWN_SESSION",
        ),
        StackCalculatorError::EmptyStack => (StatusCode::CONFLICT, "Empty Stack", "STACK_EMPTY"),
        StackCalculatorError::InvalidOperator(_) => (
            StatusCode::BAD_REQUEST,
            "Invalid Operator",
            "STACK_INVALID_OPERATOR",
        ),
        StackCalculatorError::ResultOverflow { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "Result Overflow",
            "STACK_RESULT_OVERFLOW",
        ),
        StackCalculatorError::Interrupted => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Interrupted",
            "STACK_INTERRUPTED",
        ),
        StackCalculatorError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                "STACK_INTERNAL",
            )
        }
    };

    let mut problem = Problem::new(status, title, e.to_string())
        .with_code(code)
        .with_instance(instance);
    if let Some(id) = tracing::Span::current().id() {
        problem = problem.with_span_id(id.into_u64().to_string());
    }
    problem
}
