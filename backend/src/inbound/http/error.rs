//! HTTP adapter mapping for use-case failures.
//!
//! Keeps [`ResponseFailure`] transport agnostic while letting Actix handlers
//! return it directly. Status codes follow [`ResponseType`].

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{debug, error};

use crate::domain::{ResponseFailure, ResponseType};

/// HTTP status for a response type.
pub fn status_for(response_type: ResponseType) -> StatusCode {
    match response_type {
        ResponseType::Success => StatusCode::OK,
        ResponseType::ResourceError => StatusCode::NOT_FOUND,
        ResponseType::ParametersError => StatusCode::BAD_REQUEST,
        ResponseType::SystemError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for ResponseFailure {
    fn status_code(&self) -> StatusCode {
        status_for(self.response_type())
    }

    fn error_response(&self) -> HttpResponse {
        match self.response_type() {
            ResponseType::SystemError => error!(message = self.message(), "request failed"),
            other => debug!(response_type = ?other, message = self.message(), "request rejected"),
        }
        HttpResponse::build(self.status_code()).json(self)
    }
}
