//! Response taxonomy for use cases.
//!
//! Use cases return `Result<T, ResponseFailure>`: the success payload or a
//! categorised failure, never both. Failures are transport agnostic; inbound
//! adapters map [`ResponseType`] onto protocol status codes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::InvalidRequest;

/// Outcome category of a use-case invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseType {
    Success,
    ResourceError,
    ParametersError,
    SystemError,
}

/// Failure categories. A failure is never a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum FailureType {
    /// The requested resource does not exist.
    ResourceError,
    /// The caller supplied invalid parameters.
    ParametersError,
    /// A backend failed while serving the request.
    SystemError,
}

impl From<FailureType> for ResponseType {
    fn from(value: FailureType) -> Self {
        match value {
            FailureType::ResourceError => Self::ResourceError,
            FailureType::ParametersError => Self::ParametersError,
            FailureType::SystemError => Self::SystemError,
        }
    }
}

/// Categorised use-case failure.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use rentomatic::domain::{FailureType, ResponseFailure};
///
/// let failure = ResponseFailure::system_error("database down");
/// assert_eq!(failure.kind(), FailureType::SystemError);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
#[serde(try_from = "ResponseFailureDto", into = "ResponseFailureDto")]
pub struct ResponseFailure {
    #[serde(rename = "type")]
    #[schema(example = "ParametersError")]
    kind: FailureType,
    #[schema(example = "price_min: price_min must be an integer")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseFailureValidationError {
    EmptyMessage,
}

impl std::fmt::Display for ResponseFailureValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "failure message must not be empty"),
        }
    }
}

impl std::error::Error for ResponseFailureValidationError {}

impl ResponseFailure {
    /// Fallible constructor that validates the message content.
    pub fn try_new(
        kind: FailureType,
        message: impl Into<String>,
    ) -> Result<Self, ResponseFailureValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ResponseFailureValidationError::EmptyMessage);
        }
        Ok(Self {
            kind,
            message,
            details: None,
        })
    }

    /// Create a failure, substituting a generic message when `message` is
    /// blank.
    pub fn new(kind: FailureType, message: impl Into<String>) -> Self {
        Self::try_new(kind, message).unwrap_or_else(|_| Self {
            kind,
            message: default_message(kind).to_owned(),
            details: None,
        })
    }

    pub fn kind(&self) -> FailureType {
        self.kind
    }

    /// Response type for adapters mapping onto status codes.
    pub fn response_type(&self) -> ResponseType {
        self.kind.into()
    }

    /// Human-readable description.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the failure.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`FailureType::ResourceError`].
    pub fn resource_error(message: impl Into<String>) -> Self {
        Self::new(FailureType::ResourceError, message)
    }

    /// Convenience constructor for [`FailureType::ParametersError`].
    pub fn parameters_error(message: impl Into<String>) -> Self {
        Self::new(FailureType::ParametersError, message)
    }

    /// Convenience constructor for [`FailureType::SystemError`].
    pub fn system_error(message: impl Into<String>) -> Self {
        Self::new(FailureType::SystemError, message)
    }

    /// Build a parameters error listing every rejected filter.
    ///
    /// The message joins one `"<parameter>: <message>"` line per error and
    /// the details carry the structured filter errors.
    pub fn from_invalid_request(request: &InvalidRequest) -> Self {
        let message = request
            .errors()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        let failure = Self::parameters_error(message);
        match serde_json::to_value(request.errors()) {
            Ok(details) => failure.with_details(details),
            Err(_) => failure,
        }
    }
}

fn default_message(kind: FailureType) -> &'static str {
    match kind {
        FailureType::ResourceError => "resource not found",
        FailureType::ParametersError => "invalid parameters",
        FailureType::SystemError => "internal error",
    }
}

impl std::fmt::Display for ResponseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ResponseFailure {}

impl From<&InvalidRequest> for ResponseFailure {
    fn from(value: &InvalidRequest) -> Self {
        Self::from_invalid_request(value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResponseFailureDto {
    #[serde(rename = "type")]
    kind: FailureType,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<ResponseFailure> for ResponseFailureDto {
    fn from(value: ResponseFailure) -> Self {
        Self {
            kind: value.kind,
            message: value.message,
            details: value.details,
        }
    }
}

impl TryFrom<ResponseFailureDto> for ResponseFailure {
    type Error = ResponseFailureValidationError;

    fn try_from(value: ResponseFailureDto) -> Result<Self, Self::Error> {
        let ResponseFailureDto {
            kind,
            message,
            details,
        } = value;

        let mut failure = Self::try_new(kind, message)?;
        failure.details = details;
        Ok(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomListRequest;
    use rstest::rstest;
    use serde_json::json;

    fn invalid(pairs: &[(&str, &str)]) -> InvalidRequest {
        match RoomListRequest::from_filters(pairs.iter().copied()) {
            RoomListRequest::Invalid(invalid) => invalid,
            RoomListRequest::Valid(_) => panic!("expected invalid request"),
        }
    }

    #[rstest]
    #[case(FailureType::ResourceError, ResponseType::ResourceError)]
    #[case(FailureType::ParametersError, ResponseType::ParametersError)]
    #[case(FailureType::SystemError, ResponseType::SystemError)]
    fn failures_map_onto_response_types(#[case] kind: FailureType, #[case] expected: ResponseType) {
        let failure = ResponseFailure::new(kind, "boom");
        assert_eq!(failure.response_type(), expected);
        assert_ne!(failure.response_type(), ResponseType::Success);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn try_new_rejects_blank_messages(#[case] message: &str) {
        assert_eq!(
            ResponseFailure::try_new(FailureType::SystemError, message),
            Err(ResponseFailureValidationError::EmptyMessage)
        );
    }

    #[rstest]
    fn new_substitutes_a_generic_message() {
        let failure = ResponseFailure::system_error(" ");
        assert_eq!(failure.message(), "internal error");
    }

    #[rstest]
    fn invalid_requests_become_parameters_errors() {
        let failure =
            ResponseFailure::from_invalid_request(&invalid(&[("price_min", "abc"), ("colour", "red")]));

        assert_eq!(failure.kind(), FailureType::ParametersError);
        assert_eq!(
            failure.message(),
            "price_min: price_min must be an integer\ncolour: filter colour cannot be used"
        );
        assert_eq!(
            failure.details(),
            Some(&json!([
                {
                    "parameter": "price_min",
                    "code": "invalid_integer",
                    "message": "price_min must be an integer",
                },
                {
                    "parameter": "colour",
                    "code": "unknown_filter",
                    "message": "filter colour cannot be used",
                },
            ]))
        );
    }

    #[rstest]
    fn serialises_with_type_tag() {
        let failure = ResponseFailure::system_error("room repository unavailable: timed out");
        let value = serde_json::to_value(&failure).expect("failure serialises");

        assert_eq!(
            value,
            json!({
                "type": "SystemError",
                "message": "room repository unavailable: timed out",
            })
        );
    }

    #[rstest]
    fn deserialisation_validates_message() {
        let result: Result<ResponseFailure, _> =
            serde_json::from_value(json!({ "type": "ResourceError", "message": "" }));
        assert!(result.is_err());

        let failure: ResponseFailure =
            serde_json::from_value(json!({ "type": "ResourceError", "message": "missing" }))
                .expect("valid failure payload");
        assert_eq!(failure, ResponseFailure::resource_error("missing"));
    }
}
