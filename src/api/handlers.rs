use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    middleware::RequestId,
    models::RecommendationCard,
    services::recommend_with_metadata,
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct MoviesResponse {
    pub titles: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub title: String,
    pub recommendations: Vec<RecommendationCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// All catalog titles, in catalog order, for the selection control
pub async fn get_movies(State(state): State<AppState>) -> Json<MoviesResponse> {
    let titles = state.engine.catalog().titles().map(str::to_string).collect();
    Json(MoviesResponse { titles })
}

/// Movies similar to the requested title, with poster and trailer links
///
/// An unknown title answers 404 with an empty list and a readable error message;
/// a blank title is rejected with 400.
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RecommendationQuery>,
) -> Response {
    tracing::info!(
        request_id = %request_id,
        title = %query.title,
        "Processing recommendation request"
    );

    let result = if query.title.trim().is_empty() {
        Err(AppError::InvalidInput("title must not be empty".to_string()))
    } else {
        recommend_with_metadata(&state.engine, state.metadata_provider.clone(), &query.title).await
    };

    match result {
        Ok(recommendations) => {
            tracing::info!(
                request_id = %request_id,
                results = recommendations.len(),
                "Recommendations completed"
            );

            Json(RecommendationResponse {
                title: query.title,
                recommendations,
                error: None,
            })
            .into_response()
        }
        Err(AppError::NotFound(msg)) => {
            tracing::warn!(request_id = %request_id, error = %msg, "Unknown title");

            let body = RecommendationResponse {
                title: query.title,
                recommendations: Vec::new(),
                error: Some(msg),
            };
            (StatusCode::NOT_FOUND, Json(body)).into_response()
        }
        Err(e @ AppError::InvalidInput(_)) => {
            tracing::warn!(request_id = %request_id, error = %e, "Rejected recommendation request");
            e.into_response()
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Could not get recommendations");
            e.into_response()
        }
    }
}
