//! Resource model.
//!
//! A resource is anything tasks compete for: a room, a machine, a crew.
//! Capacity is per time slot — how many tasks may occupy the resource
//! concurrently during a single time unit.

use serde::{Deserialize, Serialize};

/// A schedulable resource with per-slot capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Unique resource identifier.
    #[serde(rename = "resourceId")]
    pub id: String,
    /// Maximum concurrent tasks per time slot. Must be >= 1.
    pub capacity_per_slot: i32,
    /// Seat capacity (e.g., how many students the room holds). Only
    /// consulted by the seat-sufficiency check; `None` = unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat_capacity: Option<i32>,
}

impl Resource {
    /// Creates a new resource.
    pub fn new(id: impl Into<String>, capacity_per_slot: i32) -> Self {
        Self {
            id: id.into(),
            capacity_per_slot,
            seat_capacity: None,
        }
    }

    /// Sets the seat capacity.
    pub fn with_seats(mut self, seat_capacity: i32) -> Self {
        self.seat_capacity = Some(seat_capacity);
        self
    }

    /// Whether only one task may occupy this resource per slot.
    pub fn is_exclusive(&self) -> bool {
        self.capacity_per_slot == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_builder() {
        let r = Resource::new("R1", 2).with_seats(30);
        assert_eq!(r.id, "R1");
        assert_eq!(r.capacity_per_slot, 2);
        assert_eq!(r.seat_capacity, Some(30));
        assert!(!r.is_exclusive());
        assert!(Resource::new("R2", 1).is_exclusive());
    }

    #[test]
    fn test_resource_wire_names() {
        let r = Resource::new("Lab", 1).with_seats(20);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["resourceId"], "Lab");
        assert_eq!(json["capacityPerSlot"], 1);
        assert_eq!(json["seatCapacity"], 20);

        let bare = serde_json::to_value(Resource::new("R1", 3)).unwrap();
        assert!(bare.get("seatCapacity").is_none());
    }

    #[test]
    fn test_resource_deserialize_without_seats() {
        let r: Resource =
            serde_json::from_str(r#"{"resourceId": "R1", "capacityPerSlot": 2}"#).unwrap();
        assert_eq!(r.capacity_per_slot, 2);
        assert!(r.seat_capacity.is_none());
    }
}
