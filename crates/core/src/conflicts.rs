use std::collections::HashMap;
use tracing::debug;
use types::{Conflict, ConflictKind, Slot};

/// Reports every pair of slots that double-book a teacher or a room at the
/// same `(day, time)`.
///
/// Break slots are skipped. Two independent passes run, teachers
/// first and then rooms; each keeps the first occupant of a
/// `(resource, day, time)` key and reports every later one against it.
/// With a single-occupant [`crate::SlotStore`] the passes find nothing;
/// they still run for any slot collection handed in, e.g. one that holds
/// several rooms per cell.
pub fn detect_conflicts<'a, I>(slots: I) -> Vec<Conflict>
where
    I: IntoIterator<Item = &'a Slot>,
    I::IntoIter: Clone,
{
    let slots = slots.into_iter().filter(|s| !s.is_break());
    let mut conflicts = Vec::new();

    let mut teacher_slots: HashMap<(&str, &str, &str), &Slot> = HashMap::new();
    for slot in slots.clone() {
        let Some(teacher) = &slot.teacher else {
            continue;
        };
        let key = (teacher.id.0.as_str(), slot.day.as_str(), slot.time.as_str());
        match teacher_slots.get(&key) {
            Some(first) => conflicts.push(Conflict {
                kind: ConflictKind::TeacherConflict,
                description: format!("Teacher {} has overlapping classes", teacher.name),
                slots: vec![first.key(), slot.key()],
            }),
            None => {
                teacher_slots.insert(key, slot);
            }
        }
    }

    let mut room_slots: HashMap<(&str, &str, &str), &Slot> = HashMap::new();
    for slot in slots {
        let Some(room) = &slot.room else {
            continue;
        };
        let key = (room.id.0.as_str(), slot.day.as_str(), slot.time.as_str());
        match room_slots.get(&key) {
            Some(first) => conflicts.push(Conflict {
                kind: ConflictKind::RoomConflict,
                description: format!("Room {} has overlapping classes", room.name),
                slots: vec![first.key(), slot.key()],
            }),
            None => {
                room_slots.insert(key, slot);
            }
        }
    }

    debug!(conflicts = conflicts.len(), "conflict scan finished");
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SlotStore;
    use types::{Course, Room, SessionKind, Teacher};

    fn class(day: &str, time: &str, course: &str, teacher: &str, room: &str) -> Slot {
        Slot {
            day: day.into(),
            time: time.into(),
            course: Some(Course::new(course, course, course, 3.0)),
            teacher: Some(Teacher::new(teacher, &teacher.to_uppercase())),
            room: Some(Room::new(room, &format!("Room {room}"), 60, "Lecture Hall")),
            kind: SessionKind::Theory,
        }
    }

    #[test]
    fn empty_input_has_no_conflicts() {
        assert!(detect_conflicts(&Vec::<Slot>::new()).is_empty());
        assert!(detect_conflicts(SlotStore::new().slots()).is_empty());
    }

    #[test]
    fn store_backed_schedule_is_conflict_free() {
        let mut store = SlotStore::new();
        store.insert(class("Mon", "t1", "c1", "a", "r1"));
        store.insert(class("Mon", "t2", "c2", "a", "r1"));
        store.insert(class("Tue", "t1", "c1", "a", "r1"));
        assert!(detect_conflicts(store.slots()).is_empty());
    }

    #[test]
    fn same_teacher_same_cell_is_reported() {
        let slots = vec![
            class("Mon", "t1", "c1", "a", "r1"),
            class("Mon", "t1", "c2", "a", "r2"),
        ];
        let found = detect_conflicts(&slots);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, ConflictKind::TeacherConflict);
        assert_eq!(found[0].description, "Teacher A has overlapping classes");
        assert_eq!(found[0].slots.len(), 2);
    }

    #[test]
    fn teacher_conflicts_come_before_room_conflicts() {
        let slots = vec![
            class("Mon", "t1", "c1", "a", "r1"),
            class("Mon", "t1", "c2", "a", "r1"),
            class("Mon", "t1", "c3", "b", "r1"),
        ];
        let kinds: Vec<_> = detect_conflicts(&slots).into_iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ConflictKind::TeacherConflict,
                ConflictKind::RoomConflict,
                ConflictKind::RoomConflict
            ]
        );
    }

    #[test]
    fn breaks_and_unstaffed_slots_are_ignored() {
        let mut unstaffed = class("Mon", "t1", "c2", "a", "r1");
        unstaffed.teacher = None;
        unstaffed.room = None;
        let slots = vec![
            class("Mon", "t1", "c1", "a", "r1"),
            unstaffed,
            Slot::break_at("Mon", "t1"),
        ];
        assert!(detect_conflicts(&slots).is_empty());
    }

    #[test]
    fn rerun_is_identical() {
        let slots = vec![
            class("Mon", "t1", "c1", "a", "r1"),
            class("Mon", "t1", "c2", "b", "r1"),
            class("Tue", "t1", "c2", "b", "r2"),
        ];
        assert_eq!(detect_conflicts(&slots), detect_conflicts(&slots));
    }
}
