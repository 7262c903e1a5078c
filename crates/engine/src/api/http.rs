//! HTTP routes.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use fincoach_domain::{AchievementProgress, ChoiceIndex, Consequence, Scenario, Transaction};

use crate::app::App;
use crate::infrastructure::ports::DateRange;
use crate::use_cases::chat::ChatError;
use crate::use_cases::game::{normalize_scenario, GameError};
use crate::use_cases::insights::{InsightsError, InsightsReport};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/game/new", post(new_scenario))
        .route("/api/game/choose", post(choose))
        .route("/api/game/progress", get(progress))
        .route("/api/insights", post(insights))
        .route("/api/users/{user_id}/insights", get(user_insights))
        .route("/api/prompt", post(prompt))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Decisions game
// =============================================================================

#[derive(Debug, Serialize)]
struct ScenarioResponse {
    scenario: Scenario,
}

async fn new_scenario(
    State(app): State<Arc<App>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ScenarioResponse>, ApiError> {
    let Json(body) = body?;
    let user_profile = match body.get("userProfile") {
        Some(profile) if !profile.is_null() => profile.clone(),
        _ => json!({}),
    };

    let scenario = app
        .use_cases
        .game
        .dispense
        .execute(&user_profile)
        .await?;

    tracing::info!(title = %scenario.title, "Scenario served");
    Ok(Json(ScenarioResponse { scenario }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChoiceResponse {
    consequences: Consequence,
    learning_tip: String,
    unlocked: Vec<String>,
    progress: AchievementProgress,
}

async fn choose(
    State(app): State<Arc<App>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChoiceResponse>, ApiError> {
    let Json(body) = body?;
    let (raw_scenario, raw_index) = match (body.get("scenario"), body.get("choiceIndex")) {
        (Some(s), Some(i)) if !s.is_null() && !i.is_null() => (s, i),
        _ => return Err(ApiError::BadRequest("scenario + choiceIndex required".into())),
    };

    let index = raw_index
        .as_i64()
        .ok_or_else(|| ApiError::BadRequest("choiceIndex must be an integer".into()))?;
    let choice = ChoiceIndex::new(index).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let scenario =
        normalize_scenario(raw_scenario).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let outcome = app.use_cases.game.choose.execute(&scenario, choice).await;

    Ok(Json(ChoiceResponse {
        consequences: outcome.consequence,
        learning_tip: outcome.learning_tip,
        unlocked: outcome.unlocked,
        progress: outcome.progress,
    }))
}

#[derive(Debug, Serialize)]
struct ProgressResponse {
    progress: AchievementProgress,
}

async fn progress(State(app): State<Arc<App>>) -> Json<ProgressResponse> {
    Json(ProgressResponse {
        progress: app.use_cases.game.choose.progress().await,
    })
}

// =============================================================================
// Insights
// =============================================================================

async fn insights(
    State(app): State<Arc<App>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<InsightsReport>, ApiError> {
    let Json(body) = body?;
    let raw = body
        .get("transactions")
        .filter(|t| t.is_array())
        .ok_or_else(|| ApiError::BadRequest("Transactions array is required".into()))?;

    let transactions: Vec<Transaction> = serde_json::from_value(raw.clone())
        .map_err(|e| ApiError::BadRequest(format!("Invalid transactions: {}", e)))?;

    Ok(Json(app.use_cases.insights.ops.generate(&transactions).await))
}

#[derive(Debug, Default, Deserialize)]
struct InsightsQuery {
    from: Option<String>,
    to: Option<String>,
}

async fn user_insights(
    State(app): State<Arc<App>>,
    Path(user_id): Path<String>,
    Query(query): Query<InsightsQuery>,
) -> Result<Json<InsightsReport>, ApiError> {
    let range = DateRange::new(
        parse_date_param("from", query.from.as_deref())?,
        parse_date_param("to", query.to.as_deref())?,
    );
    if !range.is_valid() {
        return Err(ApiError::BadRequest("`from` must not be after `to`".into()));
    }

    let report = app
        .use_cases
        .insights
        .ops
        .for_user(&user_id, range)
        .await?;
    Ok(Json(report))
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC).
fn parse_date_param(name: &str, raw: Option<&str>) -> Result<Option<DateTime<Utc>>, ApiError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Some(dt.and_utc()))
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid `{}` date: {}", name, raw)))
}

// =============================================================================
// Chat
// =============================================================================

#[derive(Debug, Deserialize)]
struct PromptRequest {
    #[serde(default)]
    prompt: String,
}

#[derive(Debug, Serialize)]
struct PromptResponse {
    reply: String,
}

async fn prompt(
    State(app): State<Arc<App>>,
    body: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<Json<PromptResponse>, ApiError> {
    let Json(body) = body?;
    let reply = app.use_cases.chat.ops.prompt(&body.prompt).await?;
    Ok(Json(PromptResponse { reply }))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
    BadGateway(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Unreadable or non-JSON bodies get the same `{ "error": ... }` shape.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<GameError> for ApiError {
    fn from(e: GameError) -> Self {
        tracing::error!(error = %e, timed_out = e.is_timeout(), "Scenario dispense failed");
        ApiError::Internal(e.to_string())
    }
}

impl From<InsightsError> for ApiError {
    fn from(e: InsightsError) -> Self {
        match e {
            InsightsError::UserNotFound(_) => ApiError::NotFound(e.to_string()),
            InsightsError::Store(_) => ApiError::BadGateway(e.to_string()),
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::EmptyPrompt => ApiError::BadRequest(e.to_string()),
            ChatError::Llm(_) => ApiError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::infrastructure::ports::{
        LlmError, LlmResponse, MockLlmPort, MockTransactionStorePort, TransactionStoreError,
    };
    use crate::use_cases::game::test_support::batch_output;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    fn router(scenario_llm: MockLlmPort, store: MockTransactionStorePort) -> Router {
        let chat_llm = {
            let mut llm = MockLlmPort::new();
            llm.expect_generate()
                .returning(|_| Ok(LlmResponse::text("not json")));
            llm
        };
        let app = App::new(
            Arc::new(chat_llm),
            Arc::new(scenario_llm),
            Arc::new(store),
            GameConfig::default(),
        );
        routes().with_state(Arc::new(app))
    }

    fn default_router() -> Router {
        router(MockLlmPort::new(), MockTransactionStorePort::new())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn scenario_json() -> Value {
        json!({
            "title": "Bonus",
            "description": "You got a bonus.",
            "options": ["Donate part to charity", "Invest it", "Spend it"],
            "consequences": {"0": "Warm glow", "1": {"shortTerm": "Market ups and downs", "longTerm": "Growth"}, "2": "New phone"},
            "learningTip": "Windfalls are chances."
        })
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = default_router()
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn new_game_serves_first_generated_scenario() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .times(1)
            .returning(|_| Ok(LlmResponse::text(batch_output(&["One", "Two", "Three", "Four", "Five"]))));

        let response = router(llm, MockTransactionStorePort::new())
            .oneshot(post_json("/api/game/new", json!({"userProfile": {"age": 22}})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["scenario"]["title"], "One");
        assert_eq!(body["scenario"]["consequences"]["0"]["longTerm"], "");
        assert_eq!(body["scenario"]["options"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn generation_failure_is_500_with_message() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .returning(|_| Err(LlmError::Timeout(60)));

        let response = router(llm, MockTransactionStorePort::new())
            .oneshot(post_json("/api/game/new", json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn choose_returns_consequence_unlocks_and_progress() {
        let response = default_router()
            .oneshot(post_json(
                "/api/game/choose",
                json!({"scenario": scenario_json(), "choiceIndex": 0}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["consequences"], json!({"shortTerm": "Warm glow", "longTerm": ""}));
        assert_eq!(body["learningTip"], "Windfalls are chances.");
        assert_eq!(body["unlocked"], json!(["ETHICAL DECIDER"]));
        assert_eq!(body["progress"]["ethicalChoices"], 1);
        assert_eq!(body["progress"]["smartChoices"], 0);
    }

    #[tokio::test]
    async fn choose_without_choice_index_is_400() {
        let response = default_router()
            .oneshot(post_json("/api/game/choose", json!({"scenario": scenario_json()})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "scenario + choiceIndex required");
    }

    #[tokio::test]
    async fn choose_with_out_of_range_index_is_400() {
        let response = default_router()
            .oneshot(post_json(
                "/api/game/choose",
                json!({"scenario": scenario_json(), "choiceIndex": 3}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn progress_reflects_earlier_choices() {
        let router = default_router();
        router
            .clone()
            .oneshot(post_json(
                "/api/game/choose",
                json!({"scenario": scenario_json(), "choiceIndex": 1}),
            ))
            .await
            .unwrap();

        let response = router
            .oneshot(Request::builder().uri("/api/game/progress").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["progress"]["riskyChoices"], 1);
    }

    #[tokio::test]
    async fn malformed_body_is_400_with_json_error() {
        let response = default_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/game/choose")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn missing_content_type_is_400_with_json_error() {
        let response = default_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/prompt")
                    .body(Body::from(r#"{"prompt": "hi"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn insights_require_transactions_array() {
        let response = default_router()
            .oneshot(post_json("/api/insights", json!({"transactions": "nope"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Transactions array is required");
    }

    #[tokio::test]
    async fn insights_fall_back_when_model_output_is_unusable() {
        let response = default_router()
            .oneshot(post_json(
                "/api/insights",
                json!({"transactions": [{"amount": -30.0, "category": "food", "merchant": "Deli"}]}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["analysis"]["totalExpenses"], 30.0);
        assert_eq!(body["insights"][0]["title"], "Negative Cash Flow");
    }

    #[tokio::test]
    async fn unknown_user_insights_is_404() {
        let mut store = MockTransactionStorePort::new();
        store
            .expect_list_transactions()
            .returning(|id, _| Err(TransactionStoreError::NotFound(id.to_string())));

        let response = router(MockLlmPort::new(), store)
            .oneshot(
                Request::builder()
                    .uri("/api/users/ghost/insights?from=2024-01-01")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn store_outage_is_502() {
        let mut store = MockTransactionStorePort::new();
        store
            .expect_list_transactions()
            .returning(|_, _| Err(TransactionStoreError::RequestFailed("connection refused".into())));

        let response = router(MockLlmPort::new(), store)
            .oneshot(
                Request::builder()
                    .uri("/api/users/user_1/insights")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn empty_prompt_is_400() {
        let response = default_router()
            .oneshot(post_json("/api/prompt", json!({"prompt": ""})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn prompt_relays_chat_reply() {
        let response = default_router()
            .oneshot(post_json("/api/prompt", json!({"prompt": "hi"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["reply"], "not json");
    }

    #[test]
    fn date_params_accept_rfc3339_and_plain_dates() {
        let plain = parse_date_param("from", Some("2024-02-01")).unwrap().unwrap();
        assert_eq!(plain.to_rfc3339(), "2024-02-01T00:00:00+00:00");

        let ts = parse_date_param("to", Some("2024-02-01T12:30:00Z")).unwrap().unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-02-01T12:30:00+00:00");

        assert!(parse_date_param("to", None).unwrap().is_none());
        assert!(parse_date_param("to", Some("yesterday")).is_err());
    }
}
