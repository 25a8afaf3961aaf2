use registry::InMemTimetables;
use solver_heur::RuleBasedScheduler;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub timetables: Arc<InMemTimetables<RuleBasedScheduler>>,
}

impl AppState {
    pub fn new_default() -> Self {
        let timetables = InMemTimetables::new(RuleBasedScheduler::new());
        Self {
            timetables: Arc::new(timetables),
        }
    }
}
