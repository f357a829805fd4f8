use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tracing::warn;

use super::domain::{PlanningError, UserSelection};
use super::service::{PlannerService, RecommendationRequest};

/// Router builder exposing the plan catalog and both engines.
pub fn planner_router(service: Arc<PlannerService>) -> Router {
    Router::new()
        .route("/api/v1/plans", get(plans_handler))
        .route("/api/v1/costs", post(costs_handler))
        .route("/api/v1/recommendation", post(recommendation_handler))
        .with_state(service)
}

pub(crate) async fn plans_handler(State(service): State<Arc<PlannerService>>) -> Response {
    let plans = service.plan_summaries();
    (StatusCode::OK, axum::Json(json!({ "plans": plans }))).into_response()
}

pub(crate) async fn costs_handler(
    State(service): State<Arc<PlannerService>>,
    payload: Result<axum::Json<UserSelection>, JsonRejection>,
) -> Response {
    let axum::Json(selection) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return error_response(rejected_body(rejection)),
    };
    match service.cost_report(&selection) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recommendation_handler(
    State(service): State<Arc<PlannerService>>,
    payload: Result<axum::Json<RecommendationRequest>, JsonRejection>,
) -> Response {
    let axum::Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return error_response(rejected_body(rejection)),
    };
    match service.recommend(&request) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

fn rejected_body(rejection: JsonRejection) -> PlanningError {
    PlanningError::invalid(rejection.body_text())
}

fn error_response(error: PlanningError) -> Response {
    let status = match error {
        PlanningError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    warn!(%error, status = status.as_u16(), "planning request rejected");
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    fn selection_json() -> Value {
        serde_json::to_value(UserSelection::default()).expect("selection serializes")
    }

    #[tokio::test]
    async fn plans_route_lists_both_plans() {
        let router = planner_router(Arc::new(PlannerService::standard()));
        let response = router
            .oneshot(Request::get("/api/v1/plans").body(Body::empty()).unwrap())
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let plans = body["plans"].as_array().expect("plans array");
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0]["id"], "a");
        assert_eq!(plans[1]["success_rate"], 95);
    }

    #[tokio::test]
    async fn costs_route_returns_report() {
        let router = planner_router(Arc::new(PlannerService::standard()));
        let response = router
            .oneshot(post_json("/api/v1/costs", selection_json()))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["plan"], "b");
        assert_eq!(body["projection"].as_array().map(Vec::len), Some(7));
        assert_eq!(body["first_year"]["one_time"], 156_000.0);
    }

    #[tokio::test]
    async fn costs_route_rejects_mixed_plan() {
        let router = planner_router(Arc::new(PlannerService::standard()));
        let mut selection = selection_json();
        selection["plan"] = Value::from("mixed");

        let response = router
            .oneshot(post_json("/api/v1/costs", selection))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap_or_default().contains("plan"));
    }

    #[tokio::test]
    async fn costs_route_rejects_unknown_area_with_json_error() {
        let router = planner_router(Arc::new(PlannerService::standard()));
        let mut selection = selection_json();
        selection["area"] = Value::from("lantau");

        let response = router
            .oneshot(post_json("/api/v1/costs", selection))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        let message = body["error"].as_str().expect("error message");
        assert!(message.contains("lantau"));
    }

    #[tokio::test]
    async fn recommendation_route_rejects_malformed_body() {
        let router = planner_router(Arc::new(PlannerService::standard()));
        let request = Request::post("/api/v1/recommendation")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"selection\": "))
            .unwrap();

        let response = router.oneshot(request).await.expect("router responds");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn recommendation_handler_scores_request() {
        let service = Arc::new(PlannerService::standard());
        let request = RecommendationRequest {
            selection: UserSelection::default(),
            input: Default::default(),
        };

        let response = recommendation_handler(State(service), Ok(axum::Json(request))).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["recommended"], "b");
        assert_eq!(body["confidence"], 100);
    }

    #[tokio::test]
    async fn recommendation_handler_rejects_negative_budget() {
        let service = Arc::new(PlannerService::standard());
        let mut request = RecommendationRequest {
            selection: UserSelection::default(),
            input: Default::default(),
        };
        request.input.monthly_budget = -10.0;

        let response = recommendation_handler(State(service), Ok(axum::Json(request))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
