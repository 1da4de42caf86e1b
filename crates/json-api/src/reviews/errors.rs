//! Review Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::domain::reviews::ReviewsServiceError;

use crate::errors::{policy_status_error, validation_status_error};

pub(crate) fn into_status_error(error: ReviewsServiceError) -> StatusError {
    match error {
        ReviewsServiceError::NotFound => StatusError::not_found().brief("Review not found."),
        ReviewsServiceError::AlreadyReviewed => {
            StatusError::forbidden().brief("You have already reviewed this business user.")
        }
        ReviewsServiceError::Policy(policy) => policy_status_error(policy),
        ReviewsServiceError::Validation(validation) => validation_status_error(&validation),
        ReviewsServiceError::InvalidReference
        | ReviewsServiceError::MissingRequiredData
        | ReviewsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid review payload.")
        }
        ReviewsServiceError::Sql(source) => {
            error!("review storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
