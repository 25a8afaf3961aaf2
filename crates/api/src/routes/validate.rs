use axum::Json;
use sched_core::validate_grid;
use serde::Serialize;
use types::GridSpec;

#[derive(Serialize, utoipa::ToSchema)]
pub struct ValidationReport {
    pub ok: bool,
    pub slots: usize,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[utoipa::path(
    post,
    path = "/v1/validate",
    request_body = GridSpec,
    responses(
    (status = 200, description = "Grid validation result", body = ValidationReport)
    )
)]
pub async fn validate_handler(Json(grid): Json<GridSpec>) -> Json<ValidationReport> {
    let errors = match validate_grid(&grid) {
        Ok(()) => vec![],
        Err(e) => e.errors().to_vec(),
    };
    Json(ValidationReport {
        ok: errors.is_empty(),
        slots: grid.slot_count(),
        errors,
    })
}
