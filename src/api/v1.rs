use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::{api::error::ApiError, service::AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/summary", get(get_summary))
        .route("/healthz", get(healthz))
        .with_state(state)
}

pub async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub month: Option<String>,
}

/// GET /api/v1/summary?month=YYYY-MM
///
/// Computes (or serves from cache) the billing summary for the requested
/// month, defaulting to the current UTC month.
pub async fn get_summary(
    State(st): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let month = match query.month {
        Some(month) => {
            if !is_valid_month(&month) {
                return Err(ApiError::BadRequest(format!(
                    "invalid month '{month}', expected YYYY-MM"
                )));
            }
            month
        }
        None => Utc::now().format("%Y-%m").to_string(),
    };

    let response = st.service.summary_for(&month).await;
    Ok(Json(response))
}

fn is_valid_month(month: &str) -> bool {
    month.len() == 7 && NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_validation() {
        assert!(is_valid_month("2024-03"));
        assert!(is_valid_month("1999-12"));
        assert!(!is_valid_month("2024-13"));
        assert!(!is_valid_month("2024-3"));
        assert!(!is_valid_month("2024-03-01"));
        assert!(!is_valid_month("march"));
    }
}
