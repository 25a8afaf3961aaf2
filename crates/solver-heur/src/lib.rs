use sched_core::{validate_grid, GridError, ScheduleRequest, Scheduler, Timetable};
use std::collections::HashMap;
use tracing::{debug, info};
use types::{Course, Room, RoomType, SessionKind, Slot, Teacher, TeacherId};

/// Hard cap on classes one teacher takes on a single day within a run.
pub const MAX_CLASSES_PER_DAY: u32 = 2;

/// Single deterministic pass over the grid, day-major then time-minor.
///
/// Subjects rotate round-robin over every non-break slot of the week (the
/// index is never reset per day). Each slot gets the first candidate
/// teacher still under [`MAX_CLASSES_PER_DAY`] for that day; when none is
/// left the course is recorded without teacher or room.
#[derive(Clone, Copy, Debug)]
pub struct RuleBasedScheduler;

impl RuleBasedScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RuleBasedScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for RuleBasedScheduler {
    fn schedule(&self, req: &ScheduleRequest) -> Result<Timetable, GridError> {
        validate_grid(&req.grid)?;
        info!(
            subjects = req.subjects.len(),
            teachers = req.teachers.len(),
            rooms = req.rooms.len(),
            slots = req.grid.slot_count(),
            "rule-based scheduling"
        );

        let mut tt = Timetable {
            grid: req.grid.clone(),
            subjects: req.subjects.clone(),
            teachers: req.teachers.clone(),
            rooms: req.rooms.clone(),
            constraints: req.constraints.clone(),
            ..Timetable::default()
        };

        // day -> teacher -> classes taken that day; local to this run.
        let mut daily: HashMap<&str, HashMap<&TeacherId, u32>> = HashMap::new();
        let mut subject_idx = 0usize;

        for day in &req.grid.days {
            for time in &req.grid.times {
                if req.grid.is_break(time) {
                    tt.slots.set_break(day, time);
                    continue;
                }
                let Some(subject) = req.subjects.get(subject_idx) else {
                    tt.slots.insert(Slot::free(day, time));
                    continue;
                };

                let counts = daily.entry(day.as_str()).or_default();
                let teacher = candidate_teachers(subject, &req.teachers)
                    .into_iter()
                    .find(|t| counts.get(&t.id).copied().unwrap_or(0) < MAX_CLASSES_PER_DAY);

                let room = match teacher {
                    Some(t) => {
                        *counts.entry(&t.id).or_insert(0) += 1;
                        let room = pick_room(subject, &req.rooms);
                        if room.is_none() {
                            debug!(%day, %time, "no room in pool");
                        }
                        room
                    }
                    None => {
                        debug!(%day, %time, subject = %subject.code, "no teacher under the daily cap");
                        None
                    }
                };

                tt.slots.insert(Slot {
                    day: day.clone(),
                    time: time.clone(),
                    course: Some(subject.clone()),
                    teacher: teacher.cloned(),
                    room: room.cloned(),
                    kind: subject.slot_kind(),
                });

                subject_idx = (subject_idx + 1) % req.subjects.len();
            }
        }

        Ok(tt)
    }
}

/// Specialists for `subject` first, then everyone else; pool order is kept
/// within both groups. Teachers without an id are never candidates.
pub fn candidate_teachers<'a>(subject: &Course, pool: &'a [Teacher]) -> Vec<&'a Teacher> {
    let (mut matching, others): (Vec<&Teacher>, Vec<&Teacher>) = pool
        .iter()
        .filter(|t| !t.id.0.is_empty())
        .partition(|t| t.specializes_in(&subject.name));
    matching.extend(others);
    matching
}

/// Computer Lab for lab subjects, Lecture Hall otherwise, falling back to
/// the first room of the pool.
pub fn pick_room<'a>(subject: &Course, rooms: &'a [Room]) -> Option<&'a Room> {
    let wanted = if is_lab(subject) {
        RoomType::ComputerLab
    } else {
        RoomType::LectureHall
    };
    rooms
        .iter()
        .find(|r| r.room_type == wanted)
        .or_else(|| rooms.first())
}

fn is_lab(subject: &Course) -> bool {
    subject.kind == SessionKind::Lab || subject.name.to_lowercase().contains("lab")
}
