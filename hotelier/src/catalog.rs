//! Room catalog types: room types, rooms, and room status.
//!
//! Rooms reference a [`RoomType`] that carries the nightly rate and guest
//! capacity shared by every room of that type. Queries return rooms with a
//! detached snapshot of their type rather than a live object graph, so the
//! derived rate and capacity are always safe to read.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::reservation::ValidationError;

/// Operational status of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomStatus {
    /// Available for booking.
    Free,
    /// A guest is currently staying in the room.
    Occupied,
    /// Temporarily unavailable for housekeeping or repairs.
    Maintenance,
    /// Withdrawn from the bookable inventory.
    OutOfService,
}

impl RoomStatus {
    /// Returns the string representation stored in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "FREE",
            Self::Occupied => "OCCUPIED",
            Self::Maintenance => "MAINTENANCE",
            Self::OutOfService => "OUT_OF_SERVICE",
        }
    }

    /// Parses a status from its stored string representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a known status.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "FREE" => Ok(Self::Free),
            "OCCUPIED" => Ok(Self::Occupied),
            "MAINTENANCE" => Ok(Self::Maintenance),
            "OUT_OF_SERVICE" => Ok(Self::OutOfService),
            _ => Err(ValidationError {
                field: "status".into(),
                message: format!("unknown room status: {s}"),
            }),
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A class of rooms sharing a rate, capacity, and label.
///
/// # Examples
///
/// ```
/// use hotelier::RoomType;
///
/// let standard = RoomType::new("STD", "Standard", 25_000.0, 2).unwrap();
/// assert_eq!(standard.code(), "STD");
/// assert_eq!(standard.capacity(), 2);
///
/// // Rates cannot be negative
/// assert!(RoomType::new("STD", "Standard", -1.0, 2).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    id: Option<i64>,
    code: String,
    label: String,
    nightly_rate: f64,
    capacity: u32,
    description: Option<String>,
}

impl RoomType {
    /// Creates a new room type.
    ///
    /// The code is normalized to uppercase; it feeds room-number generation.
    ///
    /// # Errors
    ///
    /// Returns an error if the code or label is empty, the nightly rate is
    /// negative or not finite, or the capacity is zero.
    pub fn new(
        code: &str,
        label: &str,
        nightly_rate: f64,
        capacity: u32,
    ) -> Result<Self, ValidationError> {
        let code = code.trim().to_uppercase();
        if code.is_empty() {
            return Err(ValidationError {
                field: "code".into(),
                message: "room type code must be non-empty".into(),
            });
        }
        let label = label.trim();
        if label.is_empty() {
            return Err(ValidationError {
                field: "label".into(),
                message: "room type label must be non-empty".into(),
            });
        }
        if !nightly_rate.is_finite() || nightly_rate < 0.0 {
            return Err(ValidationError {
                field: "nightly_rate".into(),
                message: "nightly rate must be a non-negative amount".into(),
            });
        }
        if capacity == 0 {
            return Err(ValidationError {
                field: "capacity".into(),
                message: "capacity must be at least 1".into(),
            });
        }

        Ok(Self {
            id: None,
            code,
            label: label.to_string(),
            nightly_rate,
            capacity,
            description: None,
        })
    }

    /// Sets the persisted identifier, consuming and returning the type.
    #[must_use]
    pub const fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the persisted identifier, if any.
    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    /// Returns the unique short code (uppercase).
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the nightly rate.
    #[must_use]
    pub const fn nightly_rate(&self) -> f64 {
        self.nightly_rate
    }

    /// Returns the guest capacity.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the free-text description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A bookable room.
///
/// The `room_type` field is a detached snapshot taken when the room was
/// loaded; the effective capacity and nightly rate derive from it and fall
/// back to zero when the snapshot is absent.
///
/// # Examples
///
/// ```
/// use hotelier::{Room, RoomStatus, RoomType};
///
/// let std_type = RoomType::new("STD", "Standard", 25_000.0, 2).unwrap().with_id(1);
/// let room = Room::builder(1)
///     .number("CH-STD-01-001")
///     .floor(1)
///     .room_type(std_type)
///     .build()
///     .unwrap();
///
/// assert_eq!(room.status(), RoomStatus::Free);
/// assert_eq!(room.effective_capacity(), 2);
/// assert_eq!(room.nightly_rate(), 25_000.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    id: Option<i64>,
    number: Option<String>,
    room_type_id: i64,
    room_type: Option<RoomType>,
    floor: i32,
    air_conditioning: bool,
    balcony: bool,
    ocean_view: bool,
    last_renovated: Option<NaiveDate>,
    created_at: Option<NaiveDate>,
    status: RoomStatus,
}

impl Room {
    /// Creates a new room builder for the given room type identifier.
    #[must_use]
    pub const fn builder(room_type_id: i64) -> RoomBuilder {
        RoomBuilder {
            id: None,
            number: None,
            room_type_id,
            room_type: None,
            floor: 0,
            air_conditioning: false,
            balcony: false,
            ocean_view: false,
            last_renovated: None,
            created_at: None,
            status: RoomStatus::Free,
        }
    }

    /// Returns the persisted identifier, if any.
    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    /// Returns the room number, if assigned.
    ///
    /// A room without a number receives a generated one when added to the
    /// catalog.
    #[must_use]
    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    /// Returns the identifier of the referenced room type.
    #[must_use]
    pub const fn room_type_id(&self) -> i64 {
        self.room_type_id
    }

    /// Returns the detached room-type snapshot, if loaded.
    #[must_use]
    pub const fn room_type(&self) -> Option<&RoomType> {
        self.room_type.as_ref()
    }

    /// Returns the floor number.
    #[must_use]
    pub const fn floor(&self) -> i32 {
        self.floor
    }

    /// Whether the room has air conditioning.
    #[must_use]
    pub const fn air_conditioning(&self) -> bool {
        self.air_conditioning
    }

    /// Whether the room has a balcony.
    #[must_use]
    pub const fn balcony(&self) -> bool {
        self.balcony
    }

    /// Whether the room has an ocean view.
    #[must_use]
    pub const fn ocean_view(&self) -> bool {
        self.ocean_view
    }

    /// Returns the last renovation date, if recorded.
    #[must_use]
    pub const fn last_renovated(&self) -> Option<NaiveDate> {
        self.last_renovated
    }

    /// Returns the catalog creation date, if persisted.
    #[must_use]
    pub const fn created_at(&self) -> Option<NaiveDate> {
        self.created_at
    }

    /// Returns the operational status.
    #[must_use]
    pub const fn status(&self) -> RoomStatus {
        self.status
    }

    /// Guest capacity derived from the room type; zero when the type
    /// snapshot is absent.
    #[must_use]
    pub fn effective_capacity(&self) -> u32 {
        self.room_type.as_ref().map_or(0, RoomType::capacity)
    }

    /// Nightly rate derived from the room type; zero when the type snapshot
    /// is absent.
    #[must_use]
    pub fn nightly_rate(&self) -> f64 {
        self.room_type.as_ref().map_or(0.0, RoomType::nightly_rate)
    }
}

impl std::fmt::Display for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.number {
            Some(number) => write!(f, "room {number}"),
            None => write!(f, "unnumbered room"),
        }
    }
}

/// Builder for creating [`Room`] instances.
#[derive(Debug)]
pub struct RoomBuilder {
    id: Option<i64>,
    number: Option<String>,
    room_type_id: i64,
    room_type: Option<RoomType>,
    floor: i32,
    air_conditioning: bool,
    balcony: bool,
    ocean_view: bool,
    last_renovated: Option<NaiveDate>,
    created_at: Option<NaiveDate>,
    status: RoomStatus,
}

impl RoomBuilder {
    /// Sets the persisted identifier (used when loading from the database).
    #[must_use]
    pub const fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the room number.
    #[must_use]
    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    /// Attaches a detached room-type snapshot.
    #[must_use]
    pub fn room_type(mut self, room_type: RoomType) -> Self {
        self.room_type = Some(room_type);
        self
    }

    /// Sets the floor number.
    #[must_use]
    pub const fn floor(mut self, floor: i32) -> Self {
        self.floor = floor;
        self
    }

    /// Sets the air-conditioning flag.
    #[must_use]
    pub const fn air_conditioning(mut self, value: bool) -> Self {
        self.air_conditioning = value;
        self
    }

    /// Sets the balcony flag.
    #[must_use]
    pub const fn balcony(mut self, value: bool) -> Self {
        self.balcony = value;
        self
    }

    /// Sets the ocean-view flag.
    #[must_use]
    pub const fn ocean_view(mut self, value: bool) -> Self {
        self.ocean_view = value;
        self
    }

    /// Sets the last renovation date.
    #[must_use]
    pub const fn last_renovated(mut self, date: NaiveDate) -> Self {
        self.last_renovated = Some(date);
        self
    }

    /// Sets the catalog creation date.
    #[must_use]
    pub const fn created_at(mut self, date: NaiveDate) -> Self {
        self.created_at = Some(date);
        self
    }

    /// Sets the operational status.
    #[must_use]
    pub const fn status(mut self, status: RoomStatus) -> Self {
        self.status = status;
        self
    }

    /// Builds the room.
    ///
    /// # Errors
    ///
    /// Returns an error if the floor is negative, or if a number was
    /// supplied but is empty after trimming.
    pub fn build(self) -> Result<Room, ValidationError> {
        if self.floor < 0 {
            return Err(ValidationError {
                field: "floor".into(),
                message: "floor must not be negative".into(),
            });
        }
        let number = match self.number {
            Some(n) => {
                let trimmed = n.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError {
                        field: "number".into(),
                        message: "room number must be non-empty when supplied".into(),
                    });
                }
                Some(trimmed.to_string())
            }
            None => None,
        };

        Ok(Room {
            id: self.id,
            number,
            room_type_id: self.room_type_id,
            room_type: self.room_type,
            floor: self.floor,
            air_conditioning: self.air_conditioning,
            balcony: self.balcony,
            ocean_view: self.ocean_view,
            last_renovated: self.last_renovated,
            created_at: self.created_at,
            status: self.status,
        })
    }
}
