//! Catalog operations: guarded create/update/delete for rooms and types.
//!
//! Rooms with upcoming, non-cancelled reservations can be neither edited
//! nor deleted, and a room type stays undeletable while any room references
//! it. Both guards run inside the same transaction as the mutation.

use chrono::{Local, NaiveDateTime};

use crate::catalog::Room;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::numbering::generate_room_number;

/// Adds a room to the catalog at the current instant.
///
/// See [`add_room_at`] for the full contract.
///
/// # Errors
///
/// Propagates every error described on [`add_room_at`].
pub fn add_room(db: &mut Database, room: &Room) -> Result<Room> {
    add_room_at(db, room, Local::now().naive_local())
}

/// Adds a room to the catalog at an explicit instant.
///
/// A room without a number receives a generated one, scoped to its type
/// code and floor. The room's status defaults to `Free` at construction.
///
/// # Errors
///
/// - [`Error::Validation`] when the referenced room type does not exist
///   (a number cannot be generated without its code);
/// - [`Error::Conflict`] via the unique constraint when a supplied number
///   already exists (surfaced as a database error);
/// - [`Error::Database`] for underlying store failures.
pub fn add_room_at(db: &mut Database, room: &Room, now: NaiveDateTime) -> Result<Room> {
    let tx = db
        .connection_mut()
        .transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;

    let room_to_insert = if room.number().is_some() {
        room.clone()
    } else {
        let room_type =
            Database::get_room_type(&tx, room.room_type_id())?.ok_or_else(|| Error::Validation {
                field: "room_type".into(),
                message: format!(
                    "room type {} does not exist; a type is required to generate a room number",
                    room.room_type_id()
                ),
            })?;
        let existing = Database::list_room_numbers(&tx)?;
        let number = generate_room_number(&existing, room_type.code(), room.floor())?;
        let mut builder = Room::builder(room.room_type_id())
            .number(number)
            .floor(room.floor())
            .air_conditioning(room.air_conditioning())
            .balcony(room.balcony())
            .ocean_view(room.ocean_view())
            .status(room.status());
        if let Some(date) = room.last_renovated() {
            builder = builder.last_renovated(date);
        }
        builder.build()?
    };

    let inserted = Database::insert_room_tx(&tx, &room_to_insert, now.date())?;
    tx.commit()?;

    log::debug!("added {inserted}");
    Ok(inserted)
}

/// Updates a room at the current instant.
///
/// See [`update_room_at`] for the full contract.
///
/// # Errors
///
/// Propagates every error described on [`update_room_at`].
pub fn update_room(db: &mut Database, room: &Room) -> Result<()> {
    update_room_at(db, room, Local::now().naive_local())
}

/// Updates a room at an explicit instant.
///
/// The update is refused while the room has upcoming, non-cancelled
/// reservations.
///
/// # Errors
///
/// - [`Error::NotFound`] for an unknown room;
/// - [`Error::Conflict`] when future reservations exist;
/// - [`Error::Validation`] when the room carries no identifier;
/// - [`Error::Database`] for underlying store failures.
pub fn update_room_at(db: &mut Database, room: &Room, now: NaiveDateTime) -> Result<()> {
    let id = room.id().ok_or_else(|| Error::Validation {
        field: "id".into(),
        message: "a persisted identifier is required to update a room".into(),
    })?;

    let tx = db
        .connection_mut()
        .transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;

    let existing = Database::get_room(&tx, id)?.ok_or_else(|| Error::NotFound {
        resource: format!("room {id}"),
    })?;

    let upcoming = Database::count_future_active_for_room(&tx, id, now)?;
    if upcoming > 0 {
        return Err(Error::Conflict {
            details: format!(
                "{existing} has {upcoming} upcoming reservation(s) and cannot be edited"
            ),
        });
    }

    Database::update_room_tx(&tx, room)?;
    tx.commit()?;
    Ok(())
}

/// Deletes a room at the current instant.
///
/// See [`delete_room_at`] for the full contract.
///
/// # Errors
///
/// Propagates every error described on [`delete_room_at`].
pub fn delete_room(db: &mut Database, room_id: i64) -> Result<()> {
    delete_room_at(db, room_id, Local::now().naive_local())
}

/// Deletes a room at an explicit instant.
///
/// The delete is refused while the room has upcoming, non-cancelled
/// reservations.
///
/// # Errors
///
/// - [`Error::NotFound`] for an unknown room;
/// - [`Error::Conflict`] when future reservations exist;
/// - [`Error::Database`] for underlying store failures.
pub fn delete_room_at(db: &mut Database, room_id: i64, now: NaiveDateTime) -> Result<()> {
    let tx = db
        .connection_mut()
        .transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;

    let existing = Database::get_room(&tx, room_id)?.ok_or_else(|| Error::NotFound {
        resource: format!("room {room_id}"),
    })?;

    let upcoming = Database::count_future_active_for_room(&tx, room_id, now)?;
    if upcoming > 0 {
        return Err(Error::Conflict {
            details: format!(
                "{existing} has {upcoming} upcoming reservation(s) and cannot be deleted"
            ),
        });
    }

    Database::delete_room_tx(&tx, room_id)?;
    tx.commit()?;

    log::debug!("deleted {existing}");
    Ok(())
}

/// Deletes a room type, refusing while any room references it.
///
/// No cascade runs; the rooms of a type must be deleted or re-typed first.
///
/// # Errors
///
/// - [`Error::NotFound`] for an unknown type;
/// - [`Error::Conflict`] while rooms reference the type;
/// - [`Error::Database`] for underlying store failures.
pub fn delete_room_type(db: &mut Database, room_type_id: i64) -> Result<()> {
    let tx = db
        .connection_mut()
        .transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;

    let existing =
        Database::get_room_type(&tx, room_type_id)?.ok_or_else(|| Error::NotFound {
            resource: format!("room type {room_type_id}"),
        })?;

    let referencing = Database::count_rooms_of_type(&tx, room_type_id)?;
    if referencing > 0 {
        return Err(Error::Conflict {
            details: format!(
                "room type '{}' is referenced by {referencing} room(s) and cannot be deleted",
                existing.code()
            ),
        });
    }

    Database::delete_room_type_tx(&tx, room_type_id)?;
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{
        create_test_database, seed_reservation, seed_room, seed_room_type,
    };
    use crate::catalog::RoomStatus;
    use crate::reservation::ReservationStatus;
    use chrono::NaiveDate;

    fn dt(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_add_room_generates_number() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);

        let room = Room::builder(room_type.id().unwrap()).floor(1).build().unwrap();
        let added = add_room_at(&mut db, &room, dt(1, 9)).unwrap();
        assert_eq!(added.number(), Some("CH-STD-01-001"));
        assert_eq!(added.status(), RoomStatus::Free);

        let second = Room::builder(room_type.id().unwrap()).floor(1).build().unwrap();
        let added = add_room_at(&mut db, &second, dt(1, 9)).unwrap();
        assert_eq!(added.number(), Some("CH-STD-01-002"));
    }

    #[test]
    fn test_add_room_keeps_supplied_number() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);

        let room = Room::builder(room_type.id().unwrap())
            .number("CH-STD-09-042")
            .floor(9)
            .build()
            .unwrap();
        let added = add_room_at(&mut db, &room, dt(1, 9)).unwrap();
        assert_eq!(added.number(), Some("CH-STD-09-042"));
    }

    #[test]
    fn test_add_room_unknown_type_rejected() {
        let mut db = create_test_database();
        let room = Room::builder(999).floor(1).build().unwrap();
        let err = add_room_at(&mut db, &room, dt(1, 9)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_update_room_without_future_reservations() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        let room = seed_room(&mut db, &room_type, "CH-STD-01-001", 1);

        let edited = Room::builder(room_type.id().unwrap())
            .id(room.id().unwrap())
            .number("CH-STD-01-001")
            .floor(1)
            .ocean_view(true)
            .build()
            .unwrap();
        update_room_at(&mut db, &edited, dt(1, 9)).unwrap();

        let loaded = Database::get_room(db.connection(), room.id().unwrap())
            .unwrap()
            .unwrap();
        assert!(loaded.ocean_view());
    }

    #[test]
    fn test_update_room_with_future_reservation_refused() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        let room = seed_room(&mut db, &room_type, "CH-STD-01-001", 1);
        seed_reservation(
            &mut db,
            &room,
            "RSV-20250601-001",
            dt(10, 14),
            dt(12, 12),
            ReservationStatus::Confirmed,
        );

        let edited = Room::builder(room_type.id().unwrap())
            .id(room.id().unwrap())
            .number("CH-STD-01-001")
            .floor(2)
            .build()
            .unwrap();
        let err = update_room_at(&mut db, &edited, dt(1, 9)).unwrap_err();
        assert!(err.is_conflict());

        // The edit did not land
        let loaded = Database::get_room(db.connection(), room.id().unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(loaded.floor(), 1);
    }

    #[test]
    fn test_update_room_cancelled_future_reservation_allowed() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        let room = seed_room(&mut db, &room_type, "CH-STD-01-001", 1);
        seed_reservation(
            &mut db,
            &room,
            "RSV-20250601-001",
            dt(10, 14),
            dt(12, 12),
            ReservationStatus::Cancelled,
        );

        let edited = Room::builder(room_type.id().unwrap())
            .id(room.id().unwrap())
            .number("CH-STD-01-001")
            .floor(2)
            .build()
            .unwrap();
        update_room_at(&mut db, &edited, dt(1, 9)).unwrap();
    }

    #[test]
    fn test_delete_room_guard() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        let room = seed_room(&mut db, &room_type, "CH-STD-01-001", 1);
        seed_reservation(
            &mut db,
            &room,
            "RSV-20250601-001",
            dt(10, 14),
            dt(12, 12),
            ReservationStatus::Confirmed,
        );

        let err = delete_room_at(&mut db, room.id().unwrap(), dt(1, 9)).unwrap_err();
        assert!(err.is_conflict());

        // Past the stay the room can go
        delete_room_at(&mut db, room.id().unwrap(), dt(20, 9)).unwrap();
        assert!(Database::get_room(db.connection(), room.id().unwrap())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_delete_unknown_room() {
        let mut db = create_test_database();
        let err = delete_room_at(&mut db, 999, dt(1, 9)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_room_type_guard() {
        let mut db = create_test_database();
        let room_type = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        let room = seed_room(&mut db, &room_type, "CH-STD-01-001", 1);

        let err = delete_room_type(&mut db, room_type.id().unwrap()).unwrap_err();
        assert!(err.is_conflict());

        // After the referencing room is gone, the type can go too
        delete_room_at(&mut db, room.id().unwrap(), dt(1, 9)).unwrap();
        delete_room_type(&mut db, room_type.id().unwrap()).unwrap();
        assert!(
            Database::get_room_type(db.connection(), room_type.id().unwrap())
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_delete_unknown_room_type() {
        let mut db = create_test_database();
        let err = delete_room_type(&mut db, 999).unwrap_err();
        assert!(err.is_not_found());
    }
}
