//! Status errors shared by every resource.

use marketplace_app::{domain::validation::ValidationError, policy::PolicyError};
use salvo::http::StatusError;

pub(crate) fn policy_status_error(error: PolicyError) -> StatusError {
    match error {
        PolicyError::AuthenticationRequired => {
            StatusError::unauthorized().brief("Authentication credentials were not provided.")
        }
        PolicyError::Forbidden => {
            StatusError::forbidden().brief("You do not have permission to perform this action.")
        }
    }
}

pub(crate) fn validation_status_error(error: &ValidationError) -> StatusError {
    StatusError::bad_request().brief(error.to_string())
}

pub(crate) fn invalid_page() -> StatusError {
    StatusError::not_found().brief("Invalid page.")
}
