//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::domain::orders::OrdersServiceError;

use crate::errors::{policy_status_error, validation_status_error};

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found."),
        OrdersServiceError::OfferDetailNotFound => {
            StatusError::not_found().brief("Offer detail not found.")
        }
        OrdersServiceError::BusinessUserNotFound => {
            StatusError::not_found().brief("Business user not found.")
        }
        OrdersServiceError::Policy(policy) => policy_status_error(policy),
        OrdersServiceError::Validation(validation) => validation_status_error(&validation),
        OrdersServiceError::AlreadyExists
        | OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload.")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
