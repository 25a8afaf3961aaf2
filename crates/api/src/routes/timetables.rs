use crate::{error::ApiError, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use registry::{RegistryError, SlotEdit};
use sched_core::{Evaluation, Timetable};
use serde::Serialize;
use types::{Constraint, ScheduleRequest};
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimetableCreated {
    pub timetable_id: String,
    #[schema(value_type = Object)]
    pub evaluation: Evaluation,
}

#[derive(Serialize, ToSchema)]
pub struct Report {
    #[schema(value_type = Object)]
    pub evaluation: Evaluation,
    pub findings: Vec<Constraint>,
}

#[utoipa::path(
        post,
        path = "/v1/timetables",
        request_body = ScheduleRequest,
        responses(
            (status = 200, description = "Timetable generated", body = TimetableCreated),
            (status = 400, description = "Malformed grid")
        )
    )]
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<ScheduleRequest>,
) -> Result<Json<TimetableCreated>, ApiError> {
    let (timetable_id, evaluation) = state.timetables.generate(&req)?;
    Ok(Json(TimetableCreated {
        timetable_id,
        evaluation,
    }))
}

#[utoipa::path(
        get,
        path = "/v1/timetables/{id}",
        params(("id" = String, Path, description = "Timetable ID")),
        responses(
            (status = 200, description = "Timetable with every slot"),
            (status = 404, description = "Unknown timetable")
        )
    )]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Timetable>, ApiError> {
    state
        .timetables
        .get(&id)
        .map(Json)
        .ok_or_else(|| RegistryError::NotFound(id).into())
}

#[utoipa::path(
        put,
        path = "/v1/timetables/{id}/slots",
        params(("id" = String, Path, description = "Timetable ID")),
        request_body = SlotEdit,
        responses(
            (status = 200, description = "Slot set, fresh evaluation"),
            (status = 400, description = "Unknown entity, off-grid or break slot"),
            (status = 404, description = "Unknown timetable")
        )
    )]
pub async fn set_slot(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(edit): Json<SlotEdit>,
) -> Result<Json<Evaluation>, ApiError> {
    Ok(Json(state.timetables.set_slot(&id, &edit)?))
}

#[utoipa::path(
        delete,
        path = "/v1/timetables/{id}/slots/{day}/{time}",
        params(
            ("id" = String, Path, description = "Timetable ID"),
            ("day" = String, Path, description = "Day label"),
            ("time" = String, Path, description = "Time label")
        ),
        responses(
            (status = 200, description = "Slot cleared, fresh evaluation"),
            (status = 404, description = "Unknown timetable")
        )
    )]
pub async fn remove_slot(
    State(state): State<AppState>,
    Path((id, day, time)): Path<(String, String, String)>,
) -> Result<Json<Evaluation>, ApiError> {
    Ok(Json(state.timetables.remove_slot(&id, &day, &time)?))
}

#[utoipa::path(
        get,
        path = "/v1/timetables/{id}/evaluation",
        params(("id" = String, Path, description = "Timetable ID")),
        responses(
            (status = 200, description = "Fitness, conflicts and audit findings", body = Report),
            (status = 404, description = "Unknown timetable")
        )
    )]
pub async fn evaluation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Report>, ApiError> {
    let (evaluation, findings) = state.timetables.report(&id)?;
    Ok(Json(Report {
        evaluation,
        findings,
    }))
}
