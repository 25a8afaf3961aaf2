use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use utoipa::ToSchema;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq, Hash, Ord,
            PartialOrd,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}
id_newtype!(TeacherId);
id_newtype!(RoomId);
id_newtype!(CourseId);

/// Minutes per scheduled session.
pub const SESSION_MINUTES: u32 = 60;

pub const DEFAULT_MAX_STUDENTS: u32 = 50;
pub const DEFAULT_MAX_HOURS_PER_WEEK: u32 = 40;

/// Weekday name -> time labels the entity is available in. Advisory only.
pub type Availability = BTreeMap<String, Vec<String>>;

fn default_max_students() -> u32 {
    DEFAULT_MAX_STUDENTS
}

fn default_max_hours() -> u32 {
    DEFAULT_MAX_HOURS_PER_WEEK
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Default, Eq, PartialEq, Hash)]
pub enum SessionKind {
    #[default]
    Theory,
    Lab,
    Break,
    Project,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub code: String,
    pub credits: f32,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default = "default_max_students")]
    pub max_students: u32,
    #[serde(default, rename = "type")]
    pub kind: SessionKind,
}

impl Course {
    pub fn new(id: &str, name: &str, code: &str, credits: f32) -> Self {
        Self {
            id: CourseId::from(id),
            name: name.to_string(),
            code: code.to_string(),
            credits,
            department: String::new(),
            prerequisites: Vec::new(),
            max_students: DEFAULT_MAX_STUDENTS,
            kind: SessionKind::Theory,
        }
    }

    /// `ceil(credits)`, never below zero.
    pub fn sessions_per_week(&self) -> u32 {
        let n = self.credits.ceil();
        if n.is_nan() || n <= 0.0 {
            0
        } else {
            n as u32
        }
    }

    /// Tag for a slot carrying this course. A course typed `Break` is taught
    /// as Theory, since a Break slot never carries a course.
    pub fn slot_kind(&self) -> SessionKind {
        match self.kind {
            SessionKind::Break => SessionKind::Theory,
            kind => kind,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub specialization: Vec<String>,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default = "default_max_hours")]
    pub max_hours_per_week: u32,
}

impl Teacher {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: TeacherId::from(id),
            name: name.to_string(),
            email: String::new(),
            department: String::new(),
            specialization: Vec::new(),
            availability: Availability::new(),
            max_hours_per_week: DEFAULT_MAX_HOURS_PER_WEEK,
        }
    }

    /// Case-insensitive substring match in either direction between any
    /// specialization entry and `subject`.
    pub fn specializes_in(&self, subject: &str) -> bool {
        let subject = subject.to_lowercase();
        self.specialization.iter().any(|spec| {
            let spec = spec.to_lowercase();
            subject.contains(&spec) || spec.contains(&subject)
        })
    }
}

/// Open room-type enum; unknown strings are kept verbatim.
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(from = "String", into = "String")]
pub enum RoomType {
    LectureHall,
    Laboratory,
    ComputerLab,
    SeminarRoom,
    ConferenceRoom,
    Other(String),
}

impl RoomType {
    pub fn as_str(&self) -> &str {
        match self {
            RoomType::LectureHall => "Lecture Hall",
            RoomType::Laboratory => "Laboratory",
            RoomType::ComputerLab => "Computer Lab",
            RoomType::SeminarRoom => "Seminar Room",
            RoomType::ConferenceRoom => "Conference Room",
            RoomType::Other(s) => s,
        }
    }
}

impl From<String> for RoomType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Lecture Hall" => RoomType::LectureHall,
            "Laboratory" => RoomType::Laboratory,
            "Computer Lab" => RoomType::ComputerLab,
            "Seminar Room" => RoomType::SeminarRoom,
            "Conference Room" => RoomType::ConferenceRoom,
            _ => RoomType::Other(s),
        }
    }
}

impl From<&str> for RoomType {
    fn from(s: &str) -> Self {
        RoomType::from(s.to_string())
    }
}

impl From<RoomType> for String {
    fn from(t: RoomType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    #[serde(default)]
    pub capacity: u32,
    #[serde(rename = "type")]
    #[schema(value_type = String)]
    #[schemars(with = "String")]
    pub room_type: RoomType,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub availability: Availability,
}

impl Room {
    pub fn new(id: &str, name: &str, capacity: u32, room_type: impl Into<RoomType>) -> Self {
        Self {
            id: RoomId::from(id),
            name: name.to_string(),
            capacity,
            room_type: room_type.into(),
            equipment: Vec::new(),
            availability: Availability::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Default, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

/// Penalty source for fitness scoring. Only `violated` is interpreted.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq)]
pub struct Constraint {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub violated: bool,
}

impl Constraint {
    pub fn new(kind: &str, description: impl Into<String>, priority: Priority) -> Self {
        Self {
            kind: kind.to_string(),
            description: description.into(),
            priority,
            violated: false,
        }
    }

    pub fn violation(kind: &str, description: impl Into<String>, priority: Priority) -> Self {
        Self {
            violated: true,
            ..Self::new(kind, description, priority)
        }
    }
}

pub const REFERENCE_DAYS: [&str; 6] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub const REFERENCE_TIMES: [&str; 9] = [
    "9:30-10:25",
    "10:25-11:20",
    "11:20-11:30",
    "11:30-12:25",
    "12:25-1:20",
    "1:20-2:20",
    "2:20-3:15",
    "3:15-4:10",
    "4:10-5:05",
];

pub const REFERENCE_BREAKS: [&str; 2] = ["11:20-11:30", "1:20-2:20"];

/// Weekly grid: ordered day labels × ordered time labels, with the time
/// labels in `breaks` recurring as non-schedulable slots every day.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq, Eq)]
pub struct GridSpec {
    pub days: Vec<String>,
    pub times: Vec<String>,
    #[serde(default)]
    pub breaks: Vec<String>,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            days: REFERENCE_DAYS.iter().map(|d| d.to_string()).collect(),
            times: REFERENCE_TIMES.iter().map(|t| t.to_string()).collect(),
            breaks: REFERENCE_BREAKS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl GridSpec {
    pub fn new<D: ToString, T: ToString>(days: &[D], times: &[T]) -> Self {
        Self {
            days: days.iter().map(|d| d.to_string()).collect(),
            times: times.iter().map(|t| t.to_string()).collect(),
            breaks: Vec::new(),
        }
    }

    pub fn with_breaks<B: ToString>(mut self, breaks: &[B]) -> Self {
        self.breaks = breaks.iter().map(|b| b.to_string()).collect();
        self
    }

    pub fn is_break(&self, time: &str) -> bool {
        self.breaks.iter().any(|b| b == time)
    }

    pub fn slot_count(&self) -> usize {
        self.days.len() * self.times.len()
    }
}

/// Everything a scheduling run consumes.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    #[serde(default)]
    pub grid: GridSpec,
    #[serde(default)]
    pub subjects: Vec<Course>,
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

/// Composite store key. Renders as `"<Day>-<TimeLabel>"`.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SlotKey {
    pub day: String,
    pub time: String,
}

impl SlotKey {
    pub fn new(day: &str, time: &str) -> Self {
        Self {
            day: day.to_string(),
            time: time.to_string(),
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.day, self.time)
    }
}

/// Contents of one grid cell. A slot without a course is free; a
/// `Break` slot never carries course, teacher or room.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq)]
pub struct Slot {
    pub day: String,
    pub time: String,
    #[serde(default)]
    pub course: Option<Course>,
    #[serde(default)]
    pub teacher: Option<Teacher>,
    #[serde(default)]
    pub room: Option<Room>,
    #[serde(rename = "type", default)]
    pub kind: SessionKind,
}

impl Slot {
    pub fn free(day: &str, time: &str) -> Self {
        Self {
            day: day.to_string(),
            time: time.to_string(),
            course: None,
            teacher: None,
            room: None,
            kind: SessionKind::Theory,
        }
    }

    pub fn break_at(day: &str, time: &str) -> Self {
        Self {
            kind: SessionKind::Break,
            ..Self::free(day, time)
        }
    }

    pub fn key(&self) -> SlotKey {
        SlotKey::new(&self.day, &self.time)
    }

    pub fn is_break(&self) -> bool {
        self.kind == SessionKind::Break
    }

    pub fn is_free(&self) -> bool {
        !self.is_break() && self.course.is_none()
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    TeacherConflict,
    RoomConflict,
}

/// Two slots improperly sharing a teacher or room; `slots` is
/// `[first occupant, second occupant]`.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq)]
pub struct Conflict {
    #[serde(rename = "type")]
    pub kind: ConflictKind,
    pub description: String,
    pub slots: Vec<SlotKey>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_take_defaults() {
        let c: Course = serde_json::from_value(serde_json::json!({
            "id": "c1", "name": "Data Structures", "code": "CS201", "credits": 3
        }))
        .unwrap();
        assert_eq!(c.max_students, 50);
        assert_eq!(c.kind, SessionKind::Theory);
        assert!(c.prerequisites.is_empty());

        let t: Teacher =
            serde_json::from_value(serde_json::json!({"id": "t1", "name": "A"})).unwrap();
        assert_eq!(t.max_hours_per_week, 40);
        assert!(t.availability.is_empty());
    }

    #[test]
    fn sessions_per_week_rounds_up() {
        assert_eq!(Course::new("c", "n", "C", 3.0).sessions_per_week(), 3);
        assert_eq!(Course::new("c", "n", "C", 2.5).sessions_per_week(), 3);
        assert_eq!(Course::new("c", "n", "C", -1.0).sessions_per_week(), 0);
    }

    #[test]
    fn break_typed_course_is_slotted_as_theory() {
        let mut c = Course::new("c", "n", "C", 1.0);
        c.kind = SessionKind::Lab;
        assert_eq!(c.slot_kind(), SessionKind::Lab);
        c.kind = SessionKind::Break;
        assert_eq!(c.slot_kind(), SessionKind::Theory);
    }

    #[test]
    fn room_type_keeps_unknown_labels() {
        let r: Room = serde_json::from_value(serde_json::json!({
            "id": "r1", "name": "Studio", "capacity": 20, "type": "Drawing Studio"
        }))
        .unwrap();
        assert_eq!(r.room_type, RoomType::Other("Drawing Studio".into()));

        let r: Room = serde_json::from_value(serde_json::json!({
            "id": "r2", "name": "Lab 1", "type": "Computer Lab"
        }))
        .unwrap();
        assert_eq!(r.room_type, RoomType::ComputerLab);
        assert_eq!(serde_json::to_value(&r).unwrap()["type"], "Computer Lab");
    }

    #[test]
    fn specialization_matches_both_directions() {
        let mut t = Teacher::new("t1", "A");
        t.specialization = vec!["Machine Learning".into()];
        assert!(t.specializes_in("machine learning lab"));
        assert!(t.specializes_in("Learning"));
        assert!(!t.specializes_in("Physics"));
    }

    #[test]
    fn reference_grid_shape() {
        let g = GridSpec::default();
        assert_eq!(g.slot_count(), 54);
        assert!(g.is_break("1:20-2:20"));
        assert!(!g.is_break("9:30-10:25"));
    }

    #[test]
    fn slot_key_renders_day_dash_time() {
        assert_eq!(SlotKey::new("Monday", "9:30-10:25").to_string(), "Monday-9:30-10:25");
    }
}
