use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use types::{Course, Room, SessionKind, Slot, SlotKey, Teacher};

/// `(day, time) -> Slot`. At most one slot per key; writes overwrite.
///
/// No locking: one store belongs to one owner, and concurrent writers must
/// be serialized by the caller.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SlotStore {
    slots: BTreeMap<SlotKey, Slot>,
}

impl SlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a Theory session at `(day, time)`, replacing whatever was there.
    pub fn set(
        &mut self,
        day: &str,
        time: &str,
        course: Course,
        teacher: Teacher,
        room: Room,
    ) -> Option<Slot> {
        self.insert(Slot {
            day: day.to_string(),
            time: time.to_string(),
            course: Some(course),
            teacher: Some(teacher),
            room: Some(room),
            kind: SessionKind::Theory,
        })
    }

    /// Stores `slot` under its own key, returning the previous occupant.
    pub fn insert(&mut self, slot: Slot) -> Option<Slot> {
        self.slots.insert(slot.key(), slot)
    }

    pub fn set_break(&mut self, day: &str, time: &str) -> Option<Slot> {
        self.insert(Slot::break_at(day, time))
    }

    pub fn get(&self, day: &str, time: &str) -> Option<&Slot> {
        self.slots.get(&SlotKey::new(day, time))
    }

    pub fn remove(&mut self, day: &str, time: &str) -> Option<Slot> {
        self.slots.remove(&SlotKey::new(day, time))
    }

    pub fn contains(&self, day: &str, time: &str) -> bool {
        self.slots.contains_key(&SlotKey::new(day, time))
    }

    /// Every stored `(key, slot)` pair. Order is not part of the contract.
    pub fn iter(&self) -> impl Iterator<Item = (&SlotKey, &Slot)> + Clone + '_ {
        self.slots.iter()
    }

    pub fn slots(&self) -> impl Iterator<Item = &Slot> + Clone + '_ {
        self.slots.values()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl FromIterator<Slot> for SlotStore {
    fn from_iter<I: IntoIterator<Item = Slot>>(iter: I) -> Self {
        let mut store = SlotStore::new();
        for slot in iter {
            store.insert(slot);
        }
        store
    }
}

impl Serialize for SlotStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for (key, slot) in &self.slots {
            map.serialize_entry(&key.to_string(), slot)?;
        }
        map.end()
    }
}

// Keys are rebuilt from each slot's own day/time; the map keys are labels.
impl<'de> Deserialize<'de> for SlotStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: BTreeMap<String, Slot> = BTreeMap::deserialize(deserializer)?;
        Ok(raw.into_values().collect())
    }
}
