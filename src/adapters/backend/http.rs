//! HTTP implementation of the backend subscription service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::BackendConfig;
use crate::domain::catalog::PlanCode;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::subscription::{PlanPeriod, SubscriptionSource, SubscriptionState};
use crate::ports::{BackendError, BackendErrorCode, SubscriptionService};

/// Fetches the subscription of record from the backend over HTTPS.
///
/// Retries transport-level and 5xx failures up to the configured bound;
/// authorization and parse failures are returned on the first attempt.
pub struct HttpSubscriptionService {
    client: reqwest::Client,
    base_url: String,
    api_token: SecretString,
    retry_attempts: u32,
}

impl HttpSubscriptionService {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                BackendError::new(
                    BackendErrorCode::ServiceError,
                    format!("Failed to build HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            retry_attempts: config.retry_attempts,
        })
    }

    async fn fetch_once(&self, url: &str) -> Result<SubscriptionState, BackendError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(self.api_token.expose_secret())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, &body));
        }

        let dto: SubscriptionDto = response.json().await.map_err(|e| {
            BackendError::invalid_response(format!(
                "Failed to parse subscription response: {}",
                e
            ))
        })?;
        dto.into_state()
    }
}

#[async_trait]
impl SubscriptionService for HttpSubscriptionService {
    async fn fetch_subscription(
        &self,
        user_id: &UserId,
    ) -> Result<SubscriptionState, BackendError> {
        let url = format!(
            "{}/api/v1/users/{}/subscription",
            self.base_url,
            user_id.as_str()
        );

        let mut attempt: u32 = 0;
        loop {
            match self.fetch_once(&url).await {
                Ok(state) => return Ok(state),
                Err(e) if e.retryable && attempt < self.retry_attempts => {
                    attempt += 1;
                    tracing::debug!(
                        attempt,
                        error = %e,
                        "Retrying subscription fetch"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> BackendError {
    if error.is_timeout() {
        BackendError::timeout(format!("Subscription fetch timed out: {}", error))
    } else {
        BackendError::network(format!("Subscription fetch failed: {}", error))
    }
}

fn map_status_error(status: StatusCode, body: &str) -> BackendError {
    let code = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendErrorCode::Unauthorized,
        StatusCode::NOT_FOUND => BackendErrorCode::NotFound,
        s if s.is_server_error() => BackendErrorCode::ServiceError,
        _ => BackendErrorCode::InvalidResponse,
    };
    BackendError::new(
        code,
        format!("Backend returned {}: {}", status.as_u16(), body),
    )
}

/// Wire shape of `GET /api/v1/users/{id}/subscription`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionDto {
    plan: PlanDto,
    period: PlanPeriod,
    #[serde(default)]
    trial_ends_at: Option<Timestamp>,
    source: SubscriptionSource,
    is_mobile_user: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanDto {
    code: String,
}

impl SubscriptionDto {
    /// `synced_at` is local receipt time, not a backend field.
    fn into_state(self) -> Result<SubscriptionState, BackendError> {
        let plan_code = PlanCode::new(self.plan.code)
            .map_err(|e| BackendError::invalid_response(format!("Invalid plan code: {}", e)))?;

        Ok(SubscriptionState {
            plan_code,
            period: self.period,
            trial_ends_at: self.trial_ends_at,
            source: self.source,
            is_mobile_user: self.is_mobile_user,
            synced_at: Timestamp::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_subscription_payload() {
        let payload = r#"{
            "plan": {
                "code": "standard",
                "tierRank": 2,
                "products": []
            },
            "period": "yearly",
            "trialEndsAt": "2026-09-10T00:00:00Z",
            "source": "store",
            "isMobileUser": true
        }"#;

        let dto: SubscriptionDto = serde_json::from_str(payload).unwrap();
        let state = dto.into_state().unwrap();

        assert_eq!(state.plan_code, PlanCode::standard());
        assert_eq!(state.period, PlanPeriod::Yearly);
        assert!(state.trial_ends_at.is_some());
        assert_eq!(state.source, SubscriptionSource::Store);
        assert!(state.is_mobile_user);
    }

    #[test]
    fn parses_a_promo_payload_without_trial() {
        let payload = r#"{
            "plan": { "code": "enterprise" },
            "period": "forever",
            "source": "promo",
            "isMobileUser": false
        }"#;

        let dto: SubscriptionDto = serde_json::from_str(payload).unwrap();
        let state = dto.into_state().unwrap();

        assert_eq!(state.source, SubscriptionSource::Promo);
        assert_eq!(state.period, PlanPeriod::Forever);
        assert_eq!(state.trial_ends_at, None);
        assert!(!state.is_mobile_user);
    }

    #[test]
    fn rejects_an_empty_plan_code() {
        let payload = r#"{
            "plan": { "code": "" },
            "period": "monthly",
            "source": "store",
            "isMobileUser": true
        }"#;

        let dto: SubscriptionDto = serde_json::from_str(payload).unwrap();
        let error = dto.into_state().unwrap_err();

        assert_eq!(error.code, BackendErrorCode::InvalidResponse);
        assert!(!error.retryable);
    }

    #[test]
    fn maps_statuses_to_error_codes() {
        let unauthorized = map_status_error(StatusCode::UNAUTHORIZED, "");
        let not_found = map_status_error(StatusCode::NOT_FOUND, "");
        let server = map_status_error(StatusCode::BAD_GATEWAY, "upstream down");
        let other = map_status_error(StatusCode::CONFLICT, "");

        assert_eq!(unauthorized.code, BackendErrorCode::Unauthorized);
        assert_eq!(not_found.code, BackendErrorCode::NotFound);
        assert_eq!(server.code, BackendErrorCode::ServiceError);
        assert!(server.retryable);
        assert_eq!(other.code, BackendErrorCode::InvalidResponse);
        assert!(!other.retryable);
    }
}
