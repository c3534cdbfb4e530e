//! Loyalty program REST API endpoints.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use brew_core::loyalty::{BirthdayStatus, LoyaltyTier, MonthDay, TierInfo};
use brew_loyalty::{
    birthday_status, compute_tier_checked, reward_description, reward_rule, LoyaltyEngine,
    RewardRule,
};
use brew_management::{ApiError, ApiPath, ApiQuery};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared state for loyalty endpoints.
#[derive(Clone)]
pub struct LoyaltyState {
    pub engine: Arc<LoyaltyEngine>,
}

/// Mount the loyalty calculators under /api/v1/loyalty.
pub fn loyalty_router(state: LoyaltyState) -> Router {
    Router::new()
        .route("/api/v1/loyalty/tier/:points", get(handle_tier))
        .route("/api/v1/loyalty/rewards/:tier", get(handle_rewards))
        .route("/api/v1/loyalty/birthday", get(handle_birthday))
        .with_state(state)
}

/// GET /api/v1/loyalty/tier/:points — tier, next tier and progress for a balance.
pub async fn handle_tier(
    State(state): State<LoyaltyState>,
    ApiPath(points): ApiPath<i64>,
) -> Result<Json<TierInfo>, ApiError> {
    let checked = compute_tier_checked(points)?;
    metrics::counter!("loyalty.api.tier").increment(1);
    Ok(Json(state.engine.tier_info(checked.points)))
}

/// GET /api/v1/loyalty/rewards/:tier — benefit lines and the raw rule for a tier.
pub async fn handle_rewards(
    ApiPath(tier): ApiPath<String>,
) -> Result<Json<RewardsResponse>, ApiError> {
    let tier: LoyaltyTier = tier.parse()?;
    Ok(Json(RewardsResponse {
        tier,
        benefits: reward_description(tier),
        rule: *reward_rule(tier),
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct BirthdayQuery {
    /// `YYYY-MM-DD` or `MM-DD`; empty means no birthday on file.
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// GET /api/v1/loyalty/birthday?birthday=..&today=.. — gift window check.
pub async fn handle_birthday(
    ApiQuery(query): ApiQuery<BirthdayQuery>,
) -> Result<Json<BirthdayStatus>, ApiError> {
    let birthday = query
        .birthday
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse::<MonthDay>)
        .transpose()?;
    let today = query.today.unwrap_or_else(|| Utc::now().date_naive());
    let status = birthday_status(birthday, today);
    if status.is_eligible_for_gift() {
        metrics::counter!("loyalty.api.birthday_gift_eligible").increment(1);
    }
    Ok(Json(status))
}

#[derive(Debug, Serialize)]
pub struct RewardsResponse {
    pub tier: LoyaltyTier,
    pub benefits: Vec<String>,
    pub rule: RewardRule,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use brew_core::config::LoyaltyConfig;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        loyalty_router(LoyaltyState {
            engine: Arc::new(LoyaltyEngine::new(&LoyaltyConfig::default())),
        })
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_tier_boundaries() {
        let (status, body) = get_json("/api/v1/loyalty/tier/99").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tier"], "bronze");
        assert_eq!(body["next_tier"], "silver");
        assert_eq!(body["points_to_next_tier"], 1);

        let (_, body) = get_json("/api/v1/loyalty/tier/10000").await;
        assert_eq!(body["tier"], "platinum");
        assert_eq!(body["next_tier"], "max");
        assert_eq!(body["points_to_next_tier"], 0);
        assert_eq!(body["progress_percentage"], 100.0);
    }

    #[tokio::test]
    async fn test_negative_points_rejected() {
        let (status, body) = get_json("/api/v1/loyalty/tier/-1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_argument");
    }

    #[tokio::test]
    async fn test_rewards_for_tier() {
        let (status, body) = get_json("/api/v1/loyalty/rewards/gold").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rule"]["cashback_percentage"], 3);
        let benefits = body["benefits"].as_array().unwrap();
        assert!(benefits.iter().any(|b| b == "Priority service"));

        let (status, _) = get_json("/api/v1/loyalty/rewards/diamond").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_birthday_window() {
        let (status, body) =
            get_json("/api/v1/loyalty/birthday?birthday=1990-01-01&today=2024-06-15").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "upcoming");
        assert_eq!(body["next_occurrence"], "2025-01-01");
        assert_eq!(body["days_until"], 200);
        assert_eq!(body["is_eligible_for_gift"], false);

        let (_, body) = get_json("/api/v1/loyalty/birthday?birthday=10-22&today=2024-10-22").await;
        assert_eq!(body["days_until"], 0);
        assert_eq!(body["is_eligible_for_gift"], true);

        let (_, body) = get_json("/api/v1/loyalty/birthday?birthday=").await;
        assert_eq!(body["status"], "no_data");
    }

    #[tokio::test]
    async fn test_malformed_birthday_rejected() {
        let (status, _) = get_json("/api/v1/loyalty/birthday?birthday=13-45").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unparseable_input_uses_error_shape() {
        let (status, body) =
            get_json("/api/v1/loyalty/birthday?birthday=10-22&today=2024-13-40").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_argument");

        let (status, body) = get_json("/api/v1/loyalty/tier/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_argument");
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    }
}
