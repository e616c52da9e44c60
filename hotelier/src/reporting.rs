//! Reporting aggregator: derived statistics over a date range.
//!
//! Every function here is a pure read over the reservation ledger and room
//! catalog. Ranges are inclusive calendar-date ranges `[start, end]`,
//! implemented with an exclusive upper bound of `end + 1 day`. Empty data
//! never raises a domain error: sums and rates come back as zero, rankings
//! as `None`.
//!
//! Cancelled reservations count as inactive: they are excluded from the
//! occupancy rate and room/type rankings, while raw revenue and volume
//! figures follow the ledger as written.

use chrono::{Local, NaiveDate};
use rusqlite::params;

use crate::database::Database;
use crate::error::Result;

/// Formats the half-open datetime bounds for an inclusive date range.
fn range_bounds(start: NaiveDate, end: NaiveDate) -> (String, String) {
    let upper = end.succ_opt().unwrap_or(end);
    (
        format!("{} 00:00:00", start.format("%Y-%m-%d")),
        format!("{} 00:00:00", upper.format("%Y-%m-%d")),
    )
}

/// Total revenue for reservations arriving in the range.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn revenue_between(db: &Database, start: NaiveDate, end: NaiveDate) -> Result<f64> {
    let (lo, hi) = range_bounds(start, end);
    let total: f64 = db.connection().query_row(
        "SELECT COALESCE(SUM(total_amount), 0) FROM reservations
         WHERE arrival >= ? AND arrival < ?",
        params![lo, hi],
        |row| row.get(0),
    )?;
    Ok(total)
}

/// Total revenue for reservations arriving on one date.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn revenue_on(db: &Database, date: NaiveDate) -> Result<f64> {
    revenue_between(db, date, date)
}

/// Total revenue for reservations arriving today.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn revenue_today(db: &Database) -> Result<f64> {
    revenue_on(db, Local::now().date_naive())
}

/// Occupancy rate over the range, as a percentage.
///
/// The rate is the sum of night counts of active (non-cancelled)
/// reservations arriving in the range, divided by the total room count
/// times the number of days in the range. Zero rooms or an empty range
/// yield 0 rather than an error.
///
/// # Errors
///
/// Returns an error if the query fails.
#[allow(clippy::cast_precision_loss)]
pub fn occupancy_rate(db: &Database, start: NaiveDate, end: NaiveDate) -> Result<f64> {
    let rooms = Database::count_rooms(db.connection())?;
    let days = (end - start).num_days() + 1;
    if rooms == 0 || days <= 0 {
        return Ok(0.0);
    }

    let (lo, hi) = range_bounds(start, end);
    let nights: i64 = db.connection().query_row(
        "SELECT COALESCE(SUM(nights), 0) FROM reservations
         WHERE status <> 'CANCELLED' AND arrival >= ? AND arrival < ?",
        params![lo, hi],
        |row| row.get(0),
    )?;

    Ok(nights as f64 / (rooms * days) as f64 * 100.0)
}

/// Occupancy rate bucketed per `YYYY-MM` month within the range.
///
/// Each month's rate divides the active nights arriving that month by the
/// room count times the number of days of that month falling inside the
/// range. Months without reservations are omitted.
///
/// # Errors
///
/// Returns an error if the query fails.
#[allow(clippy::cast_precision_loss)]
pub fn monthly_occupancy(
    db: &Database,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<(String, f64)>> {
    let rooms = Database::count_rooms(db.connection())?;
    if rooms == 0 || end < start {
        return Ok(Vec::new());
    }

    let (lo, hi) = range_bounds(start, end);
    let mut stmt = db.connection().prepare(
        "SELECT strftime('%Y-%m', arrival) AS month, SUM(nights)
         FROM reservations
         WHERE status <> 'CANCELLED' AND arrival >= ? AND arrival < ?
         GROUP BY month
         ORDER BY month",
    )?;
    let monthly_nights = stmt
        .query_map(params![lo, hi], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    let mut rates = Vec::with_capacity(monthly_nights.len());
    for (month, nights) in monthly_nights {
        let days = days_of_month_in_range(&month, start, end);
        if days > 0 {
            rates.push((month, nights as f64 / (rooms * days) as f64 * 100.0));
        }
    }
    Ok(rates)
}

/// Number of days of the `YYYY-MM` month that fall inside `[start, end]`.
fn days_of_month_in_range(month: &str, start: NaiveDate, end: NaiveDate) -> i64 {
    let Some((year, month_number)) = month.split_once('-') else {
        return 0;
    };
    let (Ok(year), Ok(month_number)) = (year.parse::<i32>(), month_number.parse::<u32>()) else {
        return 0;
    };
    let Some(first) = NaiveDate::from_ymd_opt(year, month_number, 1) else {
        return 0;
    };
    let next_month = if month_number == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month_number + 1, 1)
    };
    let Some(next_month) = next_month else {
        return 0;
    };
    let last = next_month.pred_opt().unwrap_or(first);

    let lo = first.max(start);
    let hi = last.min(end);
    (hi - lo).num_days() + 1
}

/// The room with the most active reservations arriving in the range.
///
/// Returns the room number and its reservation count, or `None` when the
/// catalog is empty.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn most_reserved_room(
    db: &Database,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Option<(String, i64)>> {
    room_ranking(db, start, end, "DESC")
}

/// The room with the fewest active reservations arriving in the range.
///
/// Rooms without any reservation count as zero, so a freshly added room can
/// rank first. Returns `None` when the catalog is empty.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn least_reserved_room(
    db: &Database,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Option<(String, i64)>> {
    room_ranking(db, start, end, "ASC")
}

fn room_ranking(
    db: &Database,
    start: NaiveDate,
    end: NaiveDate,
    order: &str,
) -> Result<Option<(String, i64)>> {
    let (lo, hi) = range_bounds(start, end);
    let sql = format!(
        "SELECT r.number, COUNT(res.id) AS cnt
         FROM rooms r
         LEFT JOIN reservations res
           ON res.room_id = r.id
          AND res.status <> 'CANCELLED'
          AND res.arrival >= ? AND res.arrival < ?
         GROUP BY r.id
         ORDER BY cnt {order}, r.number
         LIMIT 1"
    );
    let mut stmt = db.connection().prepare(&sql)?;
    let result = stmt
        .query_map(params![lo, hi], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?
        .next()
        .transpose()?;
    Ok(result)
}

/// The room type with the most active reservations arriving in the range.
///
/// Returns the type label and its reservation count, or `None` when no
/// reservation falls in the range.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn most_requested_room_type(
    db: &Database,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Option<(String, i64)>> {
    let (lo, hi) = range_bounds(start, end);
    let mut stmt = db.connection().prepare(
        "SELECT t.label, COUNT(res.id) AS cnt
         FROM reservations res
         JOIN rooms r ON r.id = res.room_id
         JOIN room_types t ON t.id = r.room_type_id
         WHERE res.status <> 'CANCELLED' AND res.arrival >= ? AND res.arrival < ?
         GROUP BY t.id
         ORDER BY cnt DESC, t.label
         LIMIT 1",
    )?;
    let result = stmt
        .query_map(params![lo, hi], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?
        .next()
        .transpose()?;
    Ok(result)
}

/// The client with the most reservations arriving in the range.
///
/// Clients are keyed by their name/surname pair; the result is
/// `"name surname"` plus the reservation count, or `None` when no
/// reservation falls in the range.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn most_frequent_client(
    db: &Database,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Option<(String, i64)>> {
    let (lo, hi) = range_bounds(start, end);
    let mut stmt = db.connection().prepare(
        "SELECT name || ' ' || surname, COUNT(*) AS cnt
         FROM reservations
         WHERE arrival >= ? AND arrival < ?
         GROUP BY surname, name
         ORDER BY cnt DESC, surname
         LIMIT 1",
    )?;
    let result = stmt
        .query_map(params![lo, hi], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?
        .next()
        .transpose()?;
    Ok(result)
}

/// Mean stay length in nights over reservations arriving in the range.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn average_stay(db: &Database, start: NaiveDate, end: NaiveDate) -> Result<f64> {
    let (lo, hi) = range_bounds(start, end);
    let avg: f64 = db.connection().query_row(
        "SELECT COALESCE(AVG(nights), 0) FROM reservations
         WHERE arrival >= ? AND arrival < ?",
        params![lo, hi],
        |row| row.get(0),
    )?;
    Ok(avg)
}

/// Number of cancelled reservations arriving in the range.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn cancellation_count(db: &Database, start: NaiveDate, end: NaiveDate) -> Result<i64> {
    let (lo, hi) = range_bounds(start, end);
    let count: i64 = db.connection().query_row(
        "SELECT COUNT(*) FROM reservations
         WHERE status = 'CANCELLED' AND arrival >= ? AND arrival < ?",
        params![lo, hi],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Total nights sold over reservations arriving in the range.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn nights_sold(db: &Database, start: NaiveDate, end: NaiveDate) -> Result<i64> {
    let (lo, hi) = range_bounds(start, end);
    let nights: i64 = db.connection().query_row(
        "SELECT COALESCE(SUM(nights), 0) FROM reservations
         WHERE arrival >= ? AND arrival < ?",
        params![lo, hi],
        |row| row.get(0),
    )?;
    Ok(nights)
}

/// Reservation count per `YYYY-MM` month of arrival, sorted by month.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn reservations_by_month(
    db: &Database,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<(String, i64)>> {
    let (lo, hi) = range_bounds(start, end);
    let mut stmt = db.connection().prepare(
        "SELECT strftime('%Y-%m', arrival) AS month, COUNT(*)
         FROM reservations
         WHERE arrival >= ? AND arrival < ?
         GROUP BY month
         ORDER BY month",
    )?;
    let counts = stmt
        .query_map(params![lo, hi], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{
        create_test_database, seed_room, seed_room_type, seed_reservation,
    };
    use crate::database::Database as Db;
    use crate::reservation::{Guest, Reservation, ReservationStatus};
    use chrono::NaiveDateTime;

    fn dt(month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn d(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    /// Two rooms (25 000 and 45 000 per night). Reservations:
    /// - June 2-4 on the standard room (2 nights, 50 000), by Awa Diop
    /// - June 10-13 on the deluxe room (3 nights, 135 000), by Awa Diop
    /// - July 1-2 on the standard room (1 night, 25 000), cancelled
    fn seed_ledger() -> Database {
        let mut db = create_test_database();
        let standard = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        let deluxe = seed_room_type(&mut db, "DLX", "Deluxe", 45_000.0, 3);
        let std_room = seed_room(&mut db, &standard, "CH-STD-01-001", 1);
        let dlx_room = seed_room(&mut db, &deluxe, "CH-DLX-01-001", 1);

        seed_reservation(
            &mut db,
            &std_room,
            "RSV-20250601-001",
            dt(6, 2, 14),
            dt(6, 4, 12),
            ReservationStatus::Confirmed,
        );
        seed_reservation(
            &mut db,
            &dlx_room,
            "RSV-20250601-002",
            dt(6, 10, 14),
            dt(6, 13, 12),
            ReservationStatus::Confirmed,
        );
        seed_reservation(
            &mut db,
            &std_room,
            "RSV-20250601-003",
            dt(7, 1, 14),
            dt(7, 2, 12),
            ReservationStatus::Cancelled,
        );
        db
    }

    #[test]
    fn test_revenue_between() {
        let db = seed_ledger();
        // June only: 50 000 + 135 000
        assert_eq!(revenue_between(&db, d(6, 1), d(6, 30)).unwrap(), 185_000.0);
        // July: the cancelled stay still appears in the raw ledger sum
        assert_eq!(revenue_between(&db, d(7, 1), d(7, 31)).unwrap(), 25_000.0);
        // Outside any stay
        assert_eq!(revenue_between(&db, d(1, 1), d(1, 31)).unwrap(), 0.0);
    }

    #[test]
    fn test_revenue_on_single_day() {
        let db = seed_ledger();
        assert_eq!(revenue_on(&db, d(6, 2)).unwrap(), 50_000.0);
        assert_eq!(revenue_on(&db, d(6, 3)).unwrap(), 0.0);
    }

    #[test]
    fn test_occupancy_rate() {
        let db = seed_ledger();
        // June: 2 + 3 = 5 active nights, 2 rooms x 30 days
        let rate = occupancy_rate(&db, d(6, 1), d(6, 30)).unwrap();
        let expected = 5.0 / 60.0 * 100.0;
        assert!((rate - expected).abs() < 1e-9);

        // July: only a cancelled stay, so zero
        assert_eq!(occupancy_rate(&db, d(7, 1), d(7, 31)).unwrap(), 0.0);
    }

    #[test]
    fn test_occupancy_rate_zero_rooms() {
        let db = create_test_database();
        assert_eq!(occupancy_rate(&db, d(6, 1), d(6, 30)).unwrap(), 0.0);
    }

    #[test]
    fn test_occupancy_rate_inverted_range() {
        let db = seed_ledger();
        assert_eq!(occupancy_rate(&db, d(6, 30), d(6, 1)).unwrap(), 0.0);
    }

    #[test]
    fn test_monthly_occupancy() {
        let db = seed_ledger();
        let monthly = monthly_occupancy(&db, d(6, 1), d(7, 31)).unwrap();
        // July's only stay is cancelled, so only June appears
        assert_eq!(monthly.len(), 1);
        assert_eq!(monthly[0].0, "2025-06");
        let expected = 5.0 / 60.0 * 100.0;
        assert!((monthly[0].1 - expected).abs() < 1e-9);
    }

    #[test]
    fn test_most_and_least_reserved_room() {
        let db = seed_ledger();
        // June + July: the standard room has 1 active arrival, deluxe 1;
        // narrow to the first June week so only the standard room counts
        let most = most_reserved_room(&db, d(6, 1), d(6, 7)).unwrap().unwrap();
        assert_eq!(most.0, "CH-STD-01-001");
        assert_eq!(most.1, 1);

        let least = least_reserved_room(&db, d(6, 1), d(6, 7)).unwrap().unwrap();
        assert_eq!(least.0, "CH-DLX-01-001");
        assert_eq!(least.1, 0);
    }

    #[test]
    fn test_room_rankings_empty_catalog() {
        let db = create_test_database();
        assert!(most_reserved_room(&db, d(6, 1), d(6, 30)).unwrap().is_none());
        assert!(least_reserved_room(&db, d(6, 1), d(6, 30)).unwrap().is_none());
    }

    #[test]
    fn test_most_requested_room_type() {
        let db = seed_ledger();
        let top = most_requested_room_type(&db, d(6, 1), d(6, 30))
            .unwrap()
            .unwrap();
        // One active arrival each; the label tiebreak favors Deluxe
        assert_eq!(top.0, "Deluxe");

        assert!(most_requested_room_type(&db, d(1, 1), d(1, 31))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_most_frequent_client() {
        let db = seed_ledger();
        let top = most_frequent_client(&db, d(6, 1), d(6, 30)).unwrap().unwrap();
        assert_eq!(top.0, "Awa Diop");
        assert_eq!(top.1, 2);

        assert!(most_frequent_client(&db, d(1, 1), d(1, 31)).unwrap().is_none());
    }

    #[test]
    fn test_average_stay() {
        let db = seed_ledger();
        // June: (2 + 3) / 2
        let avg = average_stay(&db, d(6, 1), d(6, 30)).unwrap();
        assert!((avg - 2.5).abs() < 1e-9);

        assert_eq!(average_stay(&db, d(1, 1), d(1, 31)).unwrap(), 0.0);
    }

    #[test]
    fn test_cancellation_count() {
        let db = seed_ledger();
        assert_eq!(cancellation_count(&db, d(6, 1), d(7, 31)).unwrap(), 1);
        assert_eq!(cancellation_count(&db, d(6, 1), d(6, 30)).unwrap(), 0);
    }

    #[test]
    fn test_nights_sold() {
        let db = seed_ledger();
        assert_eq!(nights_sold(&db, d(6, 1), d(6, 30)).unwrap(), 5);
        // The ledger sum includes the cancelled July night
        assert_eq!(nights_sold(&db, d(6, 1), d(7, 31)).unwrap(), 6);
    }

    #[test]
    fn test_reservations_by_month() {
        let db = seed_ledger();
        let by_month = reservations_by_month(&db, d(6, 1), d(7, 31)).unwrap();
        assert_eq!(
            by_month,
            vec![("2025-06".to_string(), 2), ("2025-07".to_string(), 1)]
        );
    }

    #[test]
    fn test_range_is_inclusive_of_end_date() {
        let mut db = create_test_database();
        let standard = seed_room_type(&mut db, "STD", "Standard", 25_000.0, 2);
        let room = seed_room(&mut db, &standard, "CH-STD-01-001", 1);

        // Arrival late on the end date still counts
        let guest = Guest::new("Diop", "Awa", "771234567", None).unwrap();
        let late = Reservation::builder(guest, room.id().unwrap(), dt(6, 30, 23), dt(7, 2, 12))
            .number("RSV-20250601-009")
            .booked_at(dt(6, 1, 9))
            .nights(2)
            .total_amount(50_000.0)
            .deposit(50_000.0)
            .build()
            .unwrap();
        Db::insert_reservation_tx(db.connection(), &late).unwrap();

        assert_eq!(revenue_between(&db, d(6, 1), d(6, 30)).unwrap(), 50_000.0);
    }

    #[test]
    fn test_days_of_month_in_range() {
        assert_eq!(days_of_month_in_range("2025-06", d(6, 1), d(6, 30)), 30);
        assert_eq!(days_of_month_in_range("2025-06", d(6, 15), d(7, 15)), 16);
        assert_eq!(days_of_month_in_range("2025-02", d(1, 1), d(12, 31)), 28);
        assert_eq!(days_of_month_in_range("garbage", d(1, 1), d(12, 31)), 0);
    }
}
