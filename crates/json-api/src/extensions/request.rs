//! Request helper extensions.

use salvo::{
    http::header::HOST,
    prelude::{Request, StatusError},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::extensions::*;

const INVALID_BODY: &str = "Invalid request body.";

/// A body that is well-formed JSON but has not been checked against a
/// request schema yet.
#[derive(Debug)]
pub(crate) struct UntypedBody(Value);

impl UntypedBody {
    /// Shape the body into `T`. Missing or mistyped fields are a 400.
    pub(crate) fn decode<T: DeserializeOwned>(self) -> Result<T, StatusError> {
        serde_json::from_value(self.0).or_400(INVALID_BODY)
    }
}

pub(crate) trait RequestExt {
    /// Decode the JSON body. Handlers call this only after the request-level
    /// permission check, so refused callers never see payload errors.
    async fn json_body<T: DeserializeOwned>(&mut self) -> Result<T, StatusError>;

    /// Read the body as JSON without applying a schema. Only broken JSON is
    /// rejected here; updates decode the fields once the caller is known to
    /// own the target.
    async fn untyped_json_body(&mut self) -> Result<UntypedBody, StatusError>;

    /// `scheme://host` the request was addressed to.
    fn base_url(&self) -> String;

    /// Relative link to `page` of the current listing, other query
    /// parameters preserved.
    fn page_link(&self, page: u32) -> String;
}

impl RequestExt for Request {
    async fn json_body<T: DeserializeOwned>(&mut self) -> Result<T, StatusError> {
        self.parse_json::<T>().await.or_400(INVALID_BODY)
    }

    async fn untyped_json_body(&mut self) -> Result<UntypedBody, StatusError> {
        self.json_body::<Value>().await.map(UntypedBody)
    }

    fn base_url(&self) -> String {
        let host = self
            .headers()
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .or_else(|| self.uri().authority().map(|authority| authority.as_str()))
            .unwrap_or("localhost");

        format!("{}://{host}", self.scheme())
    }

    fn page_link(&self, page: u32) -> String {
        let mut pairs: Vec<&str> = self
            .uri()
            .query()
            .unwrap_or_default()
            .split('&')
            .filter(|pair| !pair.is_empty() && !pair.starts_with("page="))
            .collect();

        let page = format!("page={page}");

        pairs.push(&page);

        format!("{}?{}", self.uri().path(), pairs.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[salvo::handler]
    async fn next_page(req: &mut Request, res: &mut Response) {
        res.render(req.page_link(3));
    }

    #[tokio::test]
    async fn page_link_replaces_page_and_keeps_filters() -> TestResult {
        let service = Service::new(Router::with_path("offers").get(next_page));

        let mut res = TestClient::get("http://example.com/offers?page=2&search=logo")
            .send(&service)
            .await;

        assert_eq!(res.take_string().await?, "/offers?search=logo&page=3");

        Ok(())
    }

    #[derive(Debug, serde::Deserialize)]
    struct Rating {
        rating: i32,
    }

    #[test]
    fn untyped_body_reports_mistyped_fields_as_bad_request() {
        let body = UntypedBody(serde_json::json!({ "rating": "six" }));

        let error = body.decode::<Rating>().err();

        assert_eq!(
            error.map(|error| error.code),
            Some(StatusCode::BAD_REQUEST),
            "mistyped field should be a 400"
        );
    }

    #[test]
    fn untyped_body_decodes_matching_fields() {
        let body = UntypedBody(serde_json::json!({ "rating": 4 }));

        let rating = body.decode::<Rating>().map(|rating| rating.rating).ok();

        assert_eq!(rating, Some(4));
    }

    #[tokio::test]
    async fn page_link_without_query_adds_page() -> TestResult {
        let service = Service::new(Router::with_path("offers").get(next_page));

        let mut res = TestClient::get("http://example.com/offers")
            .send(&service)
            .await;

        assert_eq!(res.take_string().await?, "/offers?page=3");

        Ok(())
    }
}
