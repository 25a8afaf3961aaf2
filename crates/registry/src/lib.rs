use parking_lot::RwLock;
use sched_core::{Evaluation, GridError, ScheduleRequest, Scheduler, Slot, Timetable};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use types::{Constraint, CourseId, RoomId, TeacherId};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("timetable {0} not found")]
    NotFound(String),
    #[error("{0}")]
    Grid(#[from] GridError),
    #[error("unknown {kind} {id}")]
    UnknownEntity { kind: &'static str, id: String },
    #[error("slot {day}-{time} is not on the grid")]
    OffGrid { day: String, time: String },
    #[error("slot {day}-{time} is a break")]
    BreakSlot { day: String, time: String },
}

/// Manual placement of a course into one cell of a stored timetable.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlotEdit {
    pub day: String,
    pub time: String,
    pub course_id: CourseId,
    pub teacher_id: TeacherId,
    pub room_id: RoomId,
}

/// Generated timetables by id. Each entry is one store; the write lock
/// serializes every mutation to it.
#[derive(Clone)]
pub struct InMemTimetables<S: Scheduler> {
    inner: Arc<RwLock<HashMap<String, Timetable>>>,
    scheduler: Arc<S>,
}

impl<S: Scheduler> InMemTimetables<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            inner: Default::default(),
            scheduler: Arc::new(scheduler),
        }
    }

    /// Runs the scheduler and registers the result under a fresh id.
    /// Nothing is registered when the grid is rejected.
    pub fn generate(&self, req: &ScheduleRequest) -> Result<(String, Evaluation), RegistryError> {
        let mut tt = self.scheduler.schedule(req).map_err(|e| {
            warn!(error = %e, "grid rejected");
            e
        })?;
        let id = Uuid::new_v4().to_string();
        tt.id = id.clone();
        let evaluation = tt.evaluate();
        info!(%id, fitness = evaluation.fitness, "timetable generated");
        self.inner.write().insert(id.clone(), tt);
        Ok((id, evaluation))
    }

    pub fn get(&self, id: &str) -> Option<Timetable> {
        self.inner.read().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn set_slot(&self, id: &str, edit: &SlotEdit) -> Result<Evaluation, RegistryError> {
        let mut w = self.inner.write();
        let tt = w
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;

        if !tt.grid.days.contains(&edit.day) || !tt.grid.times.contains(&edit.time) {
            return Err(RegistryError::OffGrid {
                day: edit.day.clone(),
                time: edit.time.clone(),
            });
        }
        if tt.grid.is_break(&edit.time) {
            return Err(RegistryError::BreakSlot {
                day: edit.day.clone(),
                time: edit.time.clone(),
            });
        }

        let course = tt
            .subjects
            .iter()
            .find(|c| c.id == edit.course_id)
            .cloned()
            .ok_or_else(|| unknown("course", &edit.course_id.0))?;
        let teacher = tt
            .teachers
            .iter()
            .find(|t| t.id == edit.teacher_id)
            .cloned()
            .ok_or_else(|| unknown("teacher", &edit.teacher_id.0))?;
        let room = tt
            .rooms
            .iter()
            .find(|r| r.id == edit.room_id)
            .cloned()
            .ok_or_else(|| unknown("room", &edit.room_id.0))?;

        let kind = course.slot_kind();
        tt.slots.insert(Slot {
            day: edit.day.clone(),
            time: edit.time.clone(),
            course: Some(course),
            teacher: Some(teacher),
            room: Some(room),
            kind,
        });
        Ok(tt.evaluate())
    }

    pub fn remove_slot(&self, id: &str, day: &str, time: &str) -> Result<Evaluation, RegistryError> {
        let mut w = self.inner.write();
        let tt = w
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;
        tt.slots.remove(day, time);
        Ok(tt.evaluate())
    }

    /// Evaluation plus advisory audit findings.
    pub fn report(&self, id: &str) -> Result<(Evaluation, Vec<Constraint>), RegistryError> {
        let r = self.inner.read();
        let tt = r
            .get(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;
        Ok((tt.evaluate(), tt.audit()))
    }
}

fn unknown(kind: &'static str, id: &str) -> RegistryError {
    RegistryError::UnknownEntity {
        kind,
        id: id.to_string(),
    }
}
