//! Offer Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::domain::offers::OffersServiceError;

use crate::errors::{invalid_page, policy_status_error, validation_status_error};

pub(crate) fn into_status_error(error: OffersServiceError) -> StatusError {
    match error {
        OffersServiceError::NotFound => StatusError::not_found().brief("Offer not found."),
        OffersServiceError::InvalidPage => invalid_page(),
        OffersServiceError::Policy(policy) => policy_status_error(policy),
        OffersServiceError::Validation(validation) => validation_status_error(&validation),
        OffersServiceError::AlreadyExists => {
            StatusError::bad_request().brief("Each tier may appear only once per offer.")
        }
        OffersServiceError::InvalidReference
        | OffersServiceError::MissingRequiredData
        | OffersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid offer payload.")
        }
        OffersServiceError::Sql(source) => {
            error!("offer storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
