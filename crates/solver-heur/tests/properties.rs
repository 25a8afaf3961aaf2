use proptest::prelude::*;
use sched_core::Scheduler;
use solver_heur::{RuleBasedScheduler, MAX_CLASSES_PER_DAY};
use std::collections::HashMap;
use types::{Course, GridSpec, Room, ScheduleRequest, Teacher};

const TOPICS: [&str; 5] = ["Math", "Physics", "Networks", "DBMS", "AI"];
const ROOM_TYPES: [&str; 3] = ["Lecture Hall", "Computer Lab", "Seminar Room"];

fn arb_grid() -> impl Strategy<Value = GridSpec> {
    (1..7usize, 1..10usize, proptest::collection::vec(any::<bool>(), 9)).prop_map(
        |(days, times, brk)| {
            let days: Vec<String> = (0..days).map(|d| format!("D{d}")).collect();
            let times: Vec<String> = (0..times).map(|t| format!("T{t}")).collect();
            let breaks: Vec<String> = times
                .iter()
                .zip(&brk)
                .filter(|(_, b)| **b)
                .map(|(t, _)| t.clone())
                .collect();
            GridSpec { days, times, breaks }
        },
    )
}

fn arb_request() -> impl Strategy<Value = ScheduleRequest> {
    (
        arb_grid(),
        proptest::collection::vec((0..5usize, any::<bool>()), 0..6),
        proptest::collection::vec(proptest::collection::vec(0..5usize, 0..3), 0..5),
        proptest::collection::vec(0..3usize, 0..3),
    )
        .prop_map(|(grid, subjects, teachers, rooms)| ScheduleRequest {
            grid,
            subjects: subjects
                .into_iter()
                .enumerate()
                .map(|(i, (topic, lab))| {
                    let name = if lab {
                        format!("{} Lab", TOPICS[topic])
                    } else {
                        TOPICS[topic].to_string()
                    };
                    Course::new(&format!("c{i}"), &name, &format!("S{i}"), 3.0)
                })
                .collect(),
            teachers: teachers
                .into_iter()
                .enumerate()
                .map(|(i, specs)| {
                    let mut t = Teacher::new(&format!("t{i}"), &format!("Teacher {i}"));
                    t.specialization = specs.into_iter().map(|s| TOPICS[s].to_string()).collect();
                    t
                })
                .collect(),
            rooms: rooms
                .into_iter()
                .enumerate()
                .map(|(i, kind)| Room::new(&format!("r{i}"), &format!("Room {i}"), 40, ROOM_TYPES[kind]))
                .collect(),
            constraints: vec![],
        })
}

proptest! {
    #[test]
    fn every_grid_key_is_populated(req in arb_request()) {
        let tt = RuleBasedScheduler::new().schedule(&req).unwrap();
        prop_assert_eq!(tt.slots.len(), req.grid.days.len() * req.grid.times.len());
        for day in &req.grid.days {
            for time in &req.grid.times {
                prop_assert!(tt.slots.contains(day, time));
            }
        }
    }

    #[test]
    fn no_teacher_exceeds_the_daily_cap(req in arb_request()) {
        let tt = RuleBasedScheduler::new().schedule(&req).unwrap();
        let mut per_day: HashMap<(String, String), u32> = HashMap::new();
        for slot in tt.slots.slots() {
            if let Some(t) = &slot.teacher {
                *per_day.entry((slot.day.clone(), t.id.0.clone())).or_default() += 1;
            }
        }
        prop_assert!(per_day.values().all(|&n| n <= MAX_CLASSES_PER_DAY));
    }

    #[test]
    fn break_slots_stay_empty(req in arb_request()) {
        let tt = RuleBasedScheduler::new().schedule(&req).unwrap();
        for slot in tt.slots.slots() {
            let is_break_label = req.grid.breaks.contains(&slot.time);
            prop_assert_eq!(slot.is_break(), is_break_label);
            if is_break_label {
                prop_assert!(slot.course.is_none());
                prop_assert!(slot.teacher.is_none());
                prop_assert!(slot.room.is_none());
            }
        }
    }

    #[test]
    fn rooms_only_follow_teachers(req in arb_request()) {
        let tt = RuleBasedScheduler::new().schedule(&req).unwrap();
        for slot in tt.slots.slots() {
            if slot.teacher.is_none() {
                prop_assert!(slot.room.is_none());
            } else {
                prop_assert_eq!(slot.room.is_some(), !req.rooms.is_empty());
            }
        }
    }

    #[test]
    fn scheduler_output_scores_clean(req in arb_request()) {
        let tt = RuleBasedScheduler::new().schedule(&req).unwrap();
        let ev = tt.evaluate();
        prop_assert!(ev.conflicts.is_empty());
        prop_assert_eq!(ev.fitness, 100);
        prop_assert_eq!(ev.conflicts, tt.check_conflicts());
    }
}
