//! Base Info Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;

use marketplace_app::domain::stats::{StatsServiceError, records::BaseInfo};

use crate::{extensions::*, state::State};

/// Platform-wide counters
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BaseInfoResponse {
    pub review_count: u64,
    /// Mean rating over all reviews, two decimal places, 0 without reviews
    #[salvo(schema(value_type = f64))]
    pub average_rating: Decimal,
    pub business_profile_count: u64,
    pub offer_count: u64,
}

impl From<BaseInfo> for BaseInfoResponse {
    fn from(info: BaseInfo) -> Self {
        BaseInfoResponse {
            review_count: info.review_count,
            average_rating: info.average_rating,
            business_profile_count: info.business_profile_count,
            offer_count: info.offer_count,
        }
    }
}

/// Base Info Handler
///
/// Public; no authentication required.
#[endpoint(
    tags("stats"),
    summary = "Base Info",
    responses(
        (status_code = StatusCode::OK, description = "Platform counters"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<BaseInfoResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let info = state.app.stats.base_info().await.map_err(|error| match error {
        StatsServiceError::Sql(source) => {
            error!("failed to load base info: {source}");

            StatusError::internal_server_error()
        }
    })?;

    Ok(Json(info.into()))
}

#[cfg(test)]
mod tests {
    use marketplace_app::domain::stats::MockStatsService;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::stats_service;

    use super::*;

    #[tokio::test]
    async fn test_base_info_is_public() -> TestResult {
        let mut stats = MockStatsService::new();

        stats.expect_base_info().once().return_once(|| {
            Ok(BaseInfo {
                review_count: 3,
                average_rating: Decimal::new(433, 2),
                business_profile_count: 2,
                offer_count: 1,
            })
        });

        let service = stats_service(stats, Router::with_path("base-info").get(handler));

        let mut res = TestClient::get("http://example.com/base-info")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: BaseInfoResponse = res.take_json().await?;

        assert_eq!(body.review_count, 3);
        assert_eq!(body.average_rating, Decimal::new(433, 2));
        assert_eq!(body.business_profile_count, 2);
        assert_eq!(body.offer_count, 1);

        Ok(())
    }
}
