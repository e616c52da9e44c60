//! Availability engine: which rooms are free for a stay.

use chrono::NaiveDateTime;

use crate::catalog::{Room, RoomStatus};
use crate::database::Database;
use crate::error::Result;

/// Finds rooms available for the given stay and party size.
///
/// A room is available when:
/// - its status is `Free`;
/// - none of its reservations that still block the calendar (status
///   `Confirmed` or `InProgress`) overlaps `[arrival, departure)` under the
///   half-open test, so exact back-to-back turnover is allowed;
/// - its effective capacity covers the party size.
///
/// A degenerate range (`departure <= arrival`) yields an empty list rather
/// than an error. The result is ordered by room number; the operation is
/// read-only.
///
/// # Errors
///
/// Returns an error only if the underlying queries fail.
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use hotelier::database::{Database, DatabaseConfig};
/// use hotelier::operations::find_available_rooms;
///
/// let db = Database::open(DatabaseConfig::new("/tmp/hotelier.db")).unwrap();
/// let arrival = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap().and_hms_opt(10, 0, 0).unwrap();
/// let departure = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap().and_hms_opt(10, 0, 0).unwrap();
///
/// let rooms = find_available_rooms(&db, arrival, departure, 2).unwrap();
/// for room in rooms {
///     println!("{room}");
/// }
/// ```
pub fn find_available_rooms(
    db: &Database,
    arrival: NaiveDateTime,
    departure: NaiveDateTime,
    party_size: u32,
) -> Result<Vec<Room>> {
    if departure <= arrival {
        return Ok(Vec::new());
    }

    let conn = db.connection();
    let candidates = Database::filter_rooms(conn, None, Some(RoomStatus::Free))?;

    let mut available = Vec::with_capacity(candidates.len());
    for room in candidates {
        if room.effective_capacity() < party_size {
            continue;
        }
        let Some(room_id) = room.id() else { continue };
        let overlapping = Database::count_blocking_overlaps(conn, room_id, arrival, departure)?;
        if overlapping == 0 {
            available.push(room);
        }
    }

    log::debug!(
        "availability query [{arrival} .. {departure}) for {party_size} guest(s): {} room(s)",
        available.len()
    );

    Ok(available)
}
