//! Auth middleware.
//!
//! Requests without an `Authorization` header continue anonymously; the
//! policy decides later whether that is enough. A header that is present but
//! unusable is rejected here.

use std::sync::Arc;

use marketplace_app::auth::AuthServiceError;
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use crate::{extensions::*, state::State};

/// Schemes accepted in front of an API token.
const TOKEN_SCHEMES: [&str; 2] = ["bearer", "token"];

#[derive(Debug, PartialEq, Eq)]
enum Credentials<'a> {
    Anonymous,
    Token(&'a str),
    Malformed,
}

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let token = match extract_credentials(req) {
        Credentials::Anonymous => {
            ctrl.call_next(req, depot, res).await;

            return;
        }
        Credentials::Token(token) => token.to_string(),
        Credentials::Malformed => {
            res.render(StatusError::unauthorized().brief("Invalid token header."));

            return;
        }
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(status) => {
            res.render(status);

            return;
        }
    };

    let principal = match state.app.auth.authenticate_token(&token).await {
        Ok(principal) => principal,
        Err(AuthServiceError::NotFound) => {
            res.render(StatusError::unauthorized().brief("Invalid token."));

            return;
        }
        Err(AuthServiceError::Sql(source)) => {
            error!("failed to validate api token: {source}");

            res.render(StatusError::internal_server_error());

            return;
        }
        Err(AuthServiceError::Token(source)) => {
            error!("failed to process api token: {source}");

            res.render(StatusError::internal_server_error());

            return;
        }
    };

    depot.insert_principal(principal);

    ctrl.call_next(req, depot, res).await;
}

fn extract_credentials(req: &Request) -> Credentials<'_> {
    let Some(value) = req.headers().get(AUTHORIZATION) else {
        return Credentials::Anonymous;
    };

    let Ok(value) = value.to_str() else {
        return Credentials::Malformed;
    };

    let mut parts = value.trim().splitn(2, ' ');

    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().unwrap_or_default().trim();

    let known_scheme = TOKEN_SCHEMES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(scheme));

    if !known_scheme || token.is_empty() || token.contains(' ') {
        return Credentials::Malformed;
    }

    Credentials::Token(token)
}
