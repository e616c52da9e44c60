//! Booking engine: validates, prices, and commits reservation drafts.
//!
//! The whole of [`book`] runs inside a single `Immediate` transaction. Every
//! check — temporal validation, room resolution, capacity, the commit-time
//! overlap re-check, deposit bounds — happens between `BEGIN` and `COMMIT`,
//! and any failure rolls the transaction back, so partial state is never
//! observable.

use chrono::{Local, NaiveDateTime, NaiveTime, Timelike};

use crate::catalog::RoomStatus;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::numbering::generate_reservation_number;
use crate::reservation::{night_count, Reservation, ReservationStatus};

/// Check-in/check-out time policy applied to midnight-only stay timestamps.
///
/// A draft whose arrival or departure carries no time of day (midnight) is
/// normalized to the configured check-in or check-out hour before temporal
/// validation.
///
/// # Examples
///
/// ```
/// use hotelier::operations::BookingPolicy;
///
/// let policy = BookingPolicy::default();
/// assert_eq!(policy.check_in_hour(), 14);
/// assert_eq!(policy.check_out_hour(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPolicy {
    check_in_hour: u32,
    check_out_hour: u32,
}

impl BookingPolicy {
    /// Creates a policy with explicit check-in and check-out hours.
    ///
    /// # Errors
    ///
    /// Returns an error if either hour is outside `0..=23`.
    pub fn new(check_in_hour: u32, check_out_hour: u32) -> Result<Self> {
        if check_in_hour > 23 {
            return Err(Error::Validation {
                field: "check_in_hour".into(),
                message: format!("must be an hour between 0 and 23, got {check_in_hour}"),
            });
        }
        if check_out_hour > 23 {
            return Err(Error::Validation {
                field: "check_out_hour".into(),
                message: format!("must be an hour between 0 and 23, got {check_out_hour}"),
            });
        }
        Ok(Self {
            check_in_hour,
            check_out_hour,
        })
    }

    /// Returns the check-in hour applied to midnight-only arrivals.
    #[must_use]
    pub const fn check_in_hour(&self) -> u32 {
        self.check_in_hour
    }

    /// Returns the check-out hour applied to midnight-only departures.
    #[must_use]
    pub const fn check_out_hour(&self) -> u32 {
        self.check_out_hour
    }

    /// Normalizes a midnight-only arrival to the check-in hour.
    #[must_use]
    pub fn normalize_arrival(&self, arrival: NaiveDateTime) -> NaiveDateTime {
        normalize_midnight(arrival, self.check_in_hour)
    }

    /// Normalizes a midnight-only departure to the check-out hour.
    #[must_use]
    pub fn normalize_departure(&self, departure: NaiveDateTime) -> NaiveDateTime {
        normalize_midnight(departure, self.check_out_hour)
    }
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            check_in_hour: 14,
            check_out_hour: 12,
        }
    }
}

fn normalize_midnight(value: NaiveDateTime, hour: u32) -> NaiveDateTime {
    if value.time() == NaiveTime::MIN {
        value
            .with_hour(hour)
            .unwrap_or(value)
    } else {
        value
    }
}

/// Books a reservation draft, stamping the booking at the current instant.
///
/// See [`book_at`] for the full contract.
///
/// # Errors
///
/// Propagates every error described on [`book_at`].
pub fn book(db: &mut Database, policy: &BookingPolicy, draft: &Reservation) -> Result<Reservation> {
    book_at(db, policy, draft, Local::now().naive_local())
}

/// Books a reservation draft at an explicit instant.
///
/// The draft carries the guest, room, stay window, party size, and deposit.
/// Guest fields were validated when the [`crate::Guest`] was constructed.
/// Inside a single transaction this function:
///
/// 1. normalizes midnight-only stay timestamps per the policy, then
///    validates that the arrival is not in the past and the departure is
///    strictly after the arrival;
/// 2. resolves the room (missing rooms are a not-found error, out-of-service
///    rooms a validation error);
/// 3. validates the party size against the room's effective capacity;
/// 4. re-checks the half-open interval overlap against every reservation of
///    the room that still blocks its calendar, failing with a conflict —
///    this closes the race between an availability query and the commit;
/// 5. computes the night count and total amount from the room's current
///    nightly rate;
/// 6. validates the deposit against `[30%, 100%]` of the total;
/// 7. assigns a reservation number when the draft has none, stamps the
///    booking timestamp, and persists with status `Confirmed`;
/// 8. marks the room `Occupied` when the stay starts today.
///
/// On any failure the transaction rolls back and nothing is persisted.
///
/// # Errors
///
/// - [`Error::Validation`] for temporal, capacity, deposit, or room-status
///   violations;
/// - [`Error::NotFound`] for an unknown room;
/// - [`Error::Conflict`] when the stay overlaps an existing reservation;
/// - [`Error::Database`] for underlying store failures.
pub fn book_at(
    db: &mut Database,
    policy: &BookingPolicy,
    draft: &Reservation,
    now: NaiveDateTime,
) -> Result<Reservation> {
    let tx = db
        .connection_mut()
        .transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;
    let booked = execute_booking(&tx, policy, draft, now)?;
    tx.commit()?;

    log::debug!(
        "booked {} for {} {} ({} night(s), total {})",
        booked.number().unwrap_or("?"),
        booked.guest().name(),
        booked.guest().surname(),
        booked.nights(),
        booked.total_amount()
    );

    Ok(booked)
}

/// The transactional body of [`book_at`]; errors abort the caller's
/// transaction.
fn execute_booking(
    conn: &rusqlite::Connection,
    policy: &BookingPolicy,
    draft: &Reservation,
    now: NaiveDateTime,
) -> Result<Reservation> {
    let arrival = policy.normalize_arrival(draft.arrival());
    let departure = policy.normalize_departure(draft.departure());

    if arrival < now {
        return Err(Error::Validation {
            field: "arrival".into(),
            message: "arrival must not be in the past".into(),
        });
    }
    if departure <= arrival {
        return Err(Error::Validation {
            field: "departure".into(),
            message: "departure must be strictly after arrival".into(),
        });
    }

    let room = Database::get_room(conn, draft.room_id())?.ok_or_else(|| Error::NotFound {
        resource: format!("room {}", draft.room_id()),
    })?;
    let room_id = draft.room_id();

    if room.status() == RoomStatus::OutOfService {
        return Err(Error::Validation {
            field: "room".into(),
            message: format!("{room} is out of service"),
        });
    }

    let capacity = room.effective_capacity();
    if draft.party_size() == 0 || draft.party_size() > capacity {
        return Err(Error::Validation {
            field: "party_size".into(),
            message: format!(
                "party size must be between 1 and {capacity} for {room}"
            ),
        });
    }

    let overlapping = Database::count_blocking_overlaps(conn, room_id, arrival, departure)?;
    if overlapping > 0 {
        return Err(Error::Conflict {
            details: format!("{room} is already reserved over [{arrival} .. {departure})"),
        });
    }

    let nights = night_count(arrival, departure);
    #[allow(clippy::cast_precision_loss)]
    let total_amount = nights as f64 * room.nightly_rate();

    if draft.deposit() < total_amount * 0.3 || draft.deposit() > total_amount {
        return Err(Error::Validation {
            field: "deposit".into(),
            message: format!(
                "deposit must be between 30% and 100% of the total amount ({total_amount})"
            ),
        });
    }

    let number = match draft.number() {
        Some(number) => number.to_string(),
        None => {
            let booked_today = Database::count_booked_on(conn, now.date())?;
            generate_reservation_number(now.date(), booked_today)
        }
    };

    let reservation = Reservation::builder(draft.guest().clone(), room_id, arrival, departure)
        .number(number)
        .booked_at(now)
        .party_size(draft.party_size())
        .nights(nights)
        .total_amount(total_amount)
        .deposit(draft.deposit())
        .status(ReservationStatus::Confirmed)
        .build()?;

    let persisted = Database::insert_reservation_tx(conn, &reservation)?;

    // Room status mirrors the stay when it starts today
    if arrival.date() == now.date() {
        Database::update_room_status_tx(conn, room_id, RoomStatus::Occupied)?;
    }

    Ok(persisted)
}
