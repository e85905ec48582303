use axum::{extract::State, routing::get, Json, Router};

use crate::auth::RequireAdmin;
use crate::backend::Row;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// One row of museum-wide totals. Aggregates are cast so both dialects return
/// the same JSON types.
pub const TOTAL_REPORT_SQL: &str = r#"SELECT
    (SELECT COUNT(*) FROM "artworks") AS total_artworks,
    (SELECT COUNT(*) FROM "exhibitions") AS total_exhibitions,
    (SELECT COUNT(*) FROM "special_exhibitions") AS total_special_exhibitions,
    (SELECT COUNT(*) FROM "employees") AS total_employees,
    (SELECT CAST(COALESCE(SUM("Num_Tickets_Sold"), 0) AS BIGINT) FROM "exhibitions") AS total_tickets_sold,
    (SELECT CAST(COALESCE(SUM("Budget"), 0) AS DOUBLE PRECISION) FROM "exhibitions")
        + (SELECT CAST(COALESCE(SUM("Budget"), 0) AS DOUBLE PRECISION) FROM "special_exhibitions") AS total_budget"#;

pub async fn total_report(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Row>> {
    state
        .gateway
        .fetch_optional(TOTAL_REPORT_SQL, &[])
        .await
        .map_err(|e| e.in_context("Error generating report"))?
        .map(Json)
        .ok_or_else(|| AppError::Internal("Report query returned no rows".to_string()))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/total-report", get(total_report))
}
