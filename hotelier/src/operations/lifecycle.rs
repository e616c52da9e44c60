//! Reservation lifecycle transitions: check-in, check-out, cancellation.
//!
//! Transitions follow the state machine
//! `Confirmed -> InProgress -> Completed`, with `Cancelled` reachable from
//! `Confirmed`. A transition attempted from the wrong source state (or on
//! the wrong day) is a no-op returning `false`, never an error — duplicate
//! operator clicks must be harmless. Room status is kept in sync: check-in
//! marks the room `Occupied`, check-out marks it `Free`.

use chrono::{Local, NaiveDateTime};

use crate::catalog::RoomStatus;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::{Reservation, ReservationStatus};

/// Checks a reservation in at the current instant.
///
/// See [`check_in_at`] for the full contract.
///
/// # Errors
///
/// Propagates every error described on [`check_in_at`].
pub fn check_in(db: &mut Database, reservation_id: i64) -> Result<bool> {
    check_in_at(db, reservation_id, Local::now().naive_local())
}

/// Checks a reservation in at an explicit instant.
///
/// The transition fires only when the reservation is `Confirmed` and today
/// is its arrival date; the reservation becomes `InProgress` and its room
/// `Occupied`, atomically. Anything else is a no-op returning `false`.
///
/// # Errors
///
/// Returns [`Error::NotFound`] for an unknown reservation, or a database
/// error if the transaction fails.
pub fn check_in_at(db: &mut Database, reservation_id: i64, now: NaiveDateTime) -> Result<bool> {
    let tx = db
        .connection_mut()
        .transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;

    let reservation = Database::get_reservation(&tx, reservation_id)?.ok_or_else(|| {
        Error::NotFound {
            resource: format!("reservation {reservation_id}"),
        }
    })?;

    let eligible = reservation.status() == ReservationStatus::Confirmed
        && reservation.arrival_date() == now.date();
    if eligible {
        Database::update_reservation_status_tx(&tx, reservation_id, ReservationStatus::InProgress)?;
        Database::update_room_status_tx(&tx, reservation.room_id(), RoomStatus::Occupied)?;
        log::debug!(
            "checked in {}",
            reservation.number().unwrap_or("?")
        );
    }

    tx.commit()?;
    Ok(eligible)
}

/// Checks a reservation out at the current instant.
///
/// See [`check_out_at`] for the full contract.
///
/// # Errors
///
/// Propagates every error described on [`check_out_at`].
pub fn check_out(db: &mut Database, reservation_id: i64) -> Result<bool> {
    check_out_at(db, reservation_id, Local::now().naive_local())
}

/// Checks a reservation out at an explicit instant.
///
/// The transition fires only when the reservation is `InProgress` and today
/// is its departure date; the reservation becomes `Completed` and its room
/// `Free`, atomically. Anything else is a no-op returning `false`.
///
/// # Errors
///
/// Returns [`Error::NotFound`] for an unknown reservation, or a database
/// error if the transaction fails.
pub fn check_out_at(db: &mut Database, reservation_id: i64, now: NaiveDateTime) -> Result<bool> {
    let tx = db
        .connection_mut()
        .transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;

    let reservation = Database::get_reservation(&tx, reservation_id)?.ok_or_else(|| {
        Error::NotFound {
            resource: format!("reservation {reservation_id}"),
        }
    })?;

    let eligible = reservation.status() == ReservationStatus::InProgress
        && reservation.departure_date() == now.date();
    if eligible {
        Database::update_reservation_status_tx(&tx, reservation_id, ReservationStatus::Completed)?;
        Database::update_room_status_tx(&tx, reservation.room_id(), RoomStatus::Free)?;
        log::debug!(
            "checked out {}",
            reservation.number().unwrap_or("?")
        );
    }

    tx.commit()?;
    Ok(eligible)
}

/// Cancels a confirmed reservation.
///
/// Only `Confirmed` reservations can be cancelled; the state is terminal
/// and the reservation stops blocking its room's calendar. Any other source
/// state is a no-op returning `false`.
///
/// # Errors
///
/// Returns [`Error::NotFound`] for an unknown reservation, or a database
/// error if the transaction fails.
pub fn cancel(db: &mut Database, reservation_id: i64) -> Result<bool> {
    let tx = db
        .connection_mut()
        .transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;

    let reservation = Database::get_reservation(&tx, reservation_id)?.ok_or_else(|| {
        Error::NotFound {
            resource: format!("reservation {reservation_id}"),
        }
    })?;

    let eligible = reservation.status() == ReservationStatus::Confirmed;
    if eligible {
        Database::update_reservation_status_tx(&tx, reservation_id, ReservationStatus::Cancelled)?;
        log::debug!("cancelled {}", reservation.number().unwrap_or("?"));
    }

    tx.commit()?;
    Ok(eligible)
}

/// Lists confirmed reservations arriving today.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn arrivals_today(db: &Database) -> Result<Vec<Reservation>> {
    arrivals_on(db, Local::now().naive_local())
}

/// Lists confirmed reservations arriving on the given instant's date.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn arrivals_on(db: &Database, now: NaiveDateTime) -> Result<Vec<Reservation>> {
    Database::list_arrivals_on(db.connection(), now.date(), ReservationStatus::Confirmed)
}

/// Lists in-progress reservations departing today.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn departures_today(db: &Database) -> Result<Vec<Reservation>> {
    departures_on(db, Local::now().naive_local())
}

/// Lists in-progress reservations departing on the given instant's date.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn departures_on(db: &Database, now: NaiveDateTime) -> Result<Vec<Reservation>> {
    Database::list_departures_on(db.connection(), now.date(), ReservationStatus::InProgress)
}
