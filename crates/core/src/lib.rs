pub mod audit;
pub mod conflicts;
pub mod scoring;
pub mod store;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use thiserror::Error;

pub use conflicts::detect_conflicts;
pub use store::SlotStore;
pub use types::{
    Conflict, ConflictKind, Constraint, Course, GridSpec, Room, ScheduleRequest, SessionKind, Slot,
    SlotKey, Teacher, TeacherId,
};

#[derive(Debug, Error)]
pub enum GridError {
    #[error("invalid grid: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

impl GridError {
    pub fn errors(&self) -> &[String] {
        match self {
            GridError::Invalid(errors) => errors,
        }
    }
}

/// Structural checks a grid must pass before anything is scheduled on it.
pub fn validate_grid(grid: &GridSpec) -> Result<(), GridError> {
    let mut errors: Vec<String> = Vec::new();

    if grid.days.is_empty() {
        errors.push("days is empty".into());
    }
    if grid.times.is_empty() {
        errors.push("times is empty".into());
    }

    fn chk_unique<'a>(name: &str, labels: impl Iterator<Item = &'a String>, errors: &mut Vec<String>) {
        let mut seen = HashSet::new();
        for label in labels {
            if !seen.insert(label) {
                errors.push(format!("duplicate {name} label: {label}"));
            }
        }
    }
    chk_unique("day", grid.days.iter(), &mut errors);
    chk_unique("time", grid.times.iter(), &mut errors);

    for b in &grid.breaks {
        if !grid.times.contains(b) {
            errors.push(format!("break label {b} is not a time slot"));
        }
    }

    // Store keys render as "<day>-<time>" and labels may contain '-'.
    let mut rendered: HashMap<String, (&str, &str)> = HashMap::new();
    for day in &grid.days {
        for time in &grid.times {
            let key = SlotKey::new(day, time).to_string();
            match rendered.get(&key) {
                Some(&(d, t)) if (d, t) != (day.as_str(), time.as_str()) => {
                    errors.push(format!(
                        "slot key {key} is shared by {d}/{t} and {day}/{time}"
                    ));
                }
                Some(_) => {}
                None => {
                    rendered.insert(key, (day, time));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(GridError::Invalid(errors))
    }
}

/// Produces a fully populated timetable for a request.
pub trait Scheduler: Send + Sync + 'static {
    fn schedule(&self, req: &ScheduleRequest) -> Result<Timetable, GridError>;
}

/// A slot store together with the entities and constraints it was built from.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Timetable {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub grid: GridSpec,
    #[serde(default)]
    pub slots: SlotStore,
    #[serde(default)]
    pub subjects: Vec<Course>,
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub fitness: u8,
    pub conflicts: Vec<Conflict>,
    pub violated_constraints: usize,
    /// Slots with a course, teacher and room.
    pub assigned: usize,
    /// Slots with a course but no teacher.
    pub unstaffed: usize,
    pub breaks: usize,
    pub free: usize,
}

impl Timetable {
    pub fn new(grid: GridSpec) -> Self {
        Self {
            grid,
            ..Self::default()
        }
    }

    pub fn check_conflicts(&self) -> Vec<Conflict> {
        detect_conflicts(self.slots.slots())
    }

    /// Recomputed from scratch on every call.
    pub fn fitness(&self) -> u8 {
        scoring::fitness(
            self.check_conflicts().len(),
            scoring::violated_count(&self.constraints),
        )
    }

    pub fn evaluate(&self) -> Evaluation {
        let conflicts = self.check_conflicts();
        let violated = scoring::violated_count(&self.constraints);

        let (mut assigned, mut unstaffed, mut breaks, mut free) = (0, 0, 0, 0);
        for slot in self.slots.slots() {
            if slot.is_break() {
                breaks += 1;
            } else if slot.course.is_none() {
                free += 1;
            } else if slot.teacher.is_none() {
                unstaffed += 1;
            } else {
                assigned += 1;
            }
        }

        Evaluation {
            fitness: scoring::fitness(conflicts.len(), violated),
            conflicts,
            violated_constraints: violated,
            assigned,
            unstaffed,
            breaks,
            free,
        }
    }

    pub fn slot_has_conflict(&self, day: &str, time: &str) -> bool {
        let key = SlotKey::new(day, time);
        self.check_conflicts()
            .iter()
            .any(|c| c.slots.contains(&key))
    }

    /// Sessions per teacher id across the whole week.
    pub fn teacher_load(&self) -> BTreeMap<TeacherId, u32> {
        let mut load = BTreeMap::new();
        for teacher in self.slots.slots().filter_map(|s| s.teacher.as_ref()) {
            *load.entry(teacher.id.clone()).or_insert(0) += 1;
        }
        load
    }

    pub fn audit(&self) -> Vec<Constraint> {
        audit::audit(&self.slots, &self.subjects)
    }
}
