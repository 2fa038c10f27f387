use crate::app_config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::types::{
    ChatMessage, CreateTripRequest, CreateTripResponse, Credentials, Flight, Hotel, ItineraryDay,
    JoinTripRequest, LoginResponse, SendChatRequest, TripMember, TripSummary,
};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Thin JSON wrapper around the backend REST API. One shared `reqwest::Client`
/// carries the timeout and default headers; every call goes through
/// `execute`, which maps non-2xx responses to `ApiError::Status`.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        // The deployed backend sits behind an ngrok tunnel; without this
        // header it answers with an interstitial page instead of JSON.
        headers.insert(
            "ngrok-skip-browser-warning",
            HeaderValue::from_static("true"),
        );

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.api.request_timeout_ms))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        let request = self.http.get(self.url(endpoint));
        self.execute(endpoint, request).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<T> {
        let request = self.http.post(self.url(endpoint)).json(body);
        self.execute(endpoint, request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> ApiResult<T> {
        let result = async {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ApiError::Status {
                    status: status.as_u16(),
                });
            }
            Ok(response.json::<T>().await?)
        }
        .await;

        if let Err(err) = &result {
            tracing::error!("API request failed: {} ({})", endpoint, err);
        }
        result
    }

    // ==== Typed endpoints ====

    pub async fn create_trip(&self, req: &CreateTripRequest) -> ApiResult<CreateTripResponse> {
        self.post("/trips", req).await
    }

    pub async fn trips_by_user(&self, username: &str) -> ApiResult<Vec<TripSummary>> {
        self.get(&format!("/trips/by-user/{}", username)).await
    }

    /// The signup response body is backend-defined and unused by the client.
    pub async fn signup(&self, creds: &Credentials) -> ApiResult<serde_json::Value> {
        self.post("/users/signup", creds).await
    }

    pub async fn login(&self, creds: &Credentials) -> ApiResult<LoginResponse> {
        self.post("/users/login", creds).await
    }

    pub async fn chats_by_trip(&self, trip_id: &str) -> ApiResult<Vec<ChatMessage>> {
        self.get(&format!("/chats/{}", trip_id)).await
    }

    pub async fn send_chat(&self, req: &SendChatRequest) -> ApiResult<serde_json::Value> {
        self.post("/chats", req).await
    }

    /// Joins by invite code. The code travels as a query parameter, so it is
    /// URL-encoded here rather than spliced into the path.
    pub async fn join_trip(
        &self,
        code: &str,
        req: &JoinTripRequest,
    ) -> ApiResult<serde_json::Value> {
        let request = self
            .http
            .post(self.url("/trips/join"))
            .query(&[("code", code)])
            .json(req);
        self.execute("/trips/join", request).await
    }

    pub async fn trip_members(&self, trip_id: &str) -> ApiResult<Vec<TripMember>> {
        self.get(&format!("/trips/{}/members", trip_id)).await
    }

    pub async fn trip_flights(&self, trip_id: &str) -> ApiResult<Vec<Flight>> {
        self.get(&format!("/trips/{}/flights", trip_id)).await
    }

    pub async fn trip_hotels(&self, trip_id: &str) -> ApiResult<Vec<Hotel>> {
        self.get(&format!("/trips/{}/hotels", trip_id)).await
    }

    pub async fn trip_itinerary(&self, trip_id: &str) -> ApiResult<Vec<ItineraryDay>> {
        self.get(&format!("/trips/{}/itinerary", trip_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new(&AppConfig::with_base_url("http://localhost:8000/")).unwrap();
        assert_eq!(client.url("/trips"), "http://localhost:8000/trips");
    }

    #[test]
    fn test_url_composition() {
        let client = ApiClient::new(&AppConfig::default()).unwrap();
        assert_eq!(
            client.url("/trips/by-user/maya"),
            "http://localhost:8000/trips/by-user/maya"
        );
    }
}
