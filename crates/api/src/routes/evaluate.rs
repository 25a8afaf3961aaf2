use axum::Json;
use sched_core::Timetable;

use super::timetables::Report;

#[utoipa::path(
    post,
    path = "/v1/evaluate",
    responses(
    (status = 200, description = "Fitness, conflicts and audit findings for a supplied timetable", body = Report)
    )
)]
pub async fn evaluate(Json(tt): Json<Timetable>) -> Json<Report> {
    Json(Report {
        evaluation: tt.evaluate(),
        findings: tt.audit(),
    })
}
