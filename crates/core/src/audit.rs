use std::collections::HashSet;
use types::{Constraint, Course, Priority};

use crate::SlotStore;

pub const COURSE_UNSCHEDULED: &str = "course_unscheduled";
pub const TEACHER_AVAILABILITY: &str = "teacher_availability";

/// Advisory findings over a finished store, as violated constraints.
///
/// Nothing here is enforced by the scheduler; callers decide whether to
/// append the findings to the constraint set that fitness is scored on.
pub fn audit(store: &SlotStore, subjects: &[Course]) -> Vec<Constraint> {
    let mut findings = Vec::new();

    let scheduled: HashSet<&str> = store
        .slots()
        .filter_map(|s| s.course.as_ref())
        .map(|c| c.id.0.as_str())
        .collect();
    for course in subjects {
        if !scheduled.contains(course.id.0.as_str()) {
            findings.push(Constraint::violation(
                COURSE_UNSCHEDULED,
                format!("Course {} is not scheduled", course.name),
                Priority::High,
            ));
        }
    }

    // A day missing from the availability map is not checked.
    for slot in store.slots() {
        let Some(teacher) = &slot.teacher else {
            continue;
        };
        let Some(times) = teacher.availability.get(&slot.day) else {
            continue;
        };
        if !times.iter().any(|t| t == &slot.time) {
            findings.push(Constraint::violation(
                TEACHER_AVAILABILITY,
                format!(
                    "Teacher {} is not available on {} at {}",
                    teacher.name, slot.day, slot.time
                ),
                Priority::Medium,
            ));
        }
    }

    findings
}
