//! Reservation types for tracking room bookings.
//!
//! This module provides the reservation domain model: guest details with
//! field validation, the reservation status state machine, and the interval
//! arithmetic (half-open overlap test, night count) that the booking engine
//! and availability engine are built on.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Lifecycle status of a reservation.
///
/// A reservation is created `Confirmed`, moves to `InProgress` on check-in,
/// and to `Completed` on check-out. `Cancelled` is a terminal state reachable
/// from `Confirmed`; cancelled reservations no longer block their room and
/// are excluded from "active" statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReservationStatus {
    /// Booked and awaiting arrival.
    Confirmed,
    /// Guest has checked in; the stay is underway.
    InProgress,
    /// Guest has checked out.
    Completed,
    /// Cancelled before check-in.
    Cancelled,
}

impl ReservationStatus {
    /// Returns the string representation stored in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Parses a status from its stored string representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a known status.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "CONFIRMED" => Ok(Self::Confirmed),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(ValidationError {
                field: "status".into(),
                message: format!("unknown reservation status: {s}"),
            }),
        }
    }

    /// Whether this reservation counts as active for statistics.
    ///
    /// Cancelled reservations are inactive; everything else is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Whether a reservation in this status blocks its room's calendar.
    ///
    /// Completed and cancelled reservations no longer participate in the
    /// overlap check.
    #[must_use]
    pub const fn blocks_room(&self) -> bool {
        matches!(self, Self::Confirmed | Self::InProgress)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Client details attached to a reservation.
///
/// Construction validates every field, so a `Guest` value is always
/// well-formed.
///
/// # Examples
///
/// ```
/// use hotelier::Guest;
///
/// let guest = Guest::new("Diop", "Awa", "771234567", Some("awa@example.sn".into())).unwrap();
/// assert_eq!(guest.surname(), "Diop");
///
/// // Phone prefixes outside 70/75/76/77/78 are rejected
/// assert!(Guest::new("Diop", "Awa", "691234567", None).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    surname: String,
    name: String,
    phone: String,
    email: Option<String>,
}

impl Guest {
    /// Creates a new guest, validating every field.
    ///
    /// Rules:
    /// - surname and first name: at least 2 characters, letters (accented
    ///   Latin included), spaces, hyphens and apostrophes only;
    /// - phone: exactly 9 digits, prefix in {70, 75, 76, 77, 78};
    /// - email: optional; when present and non-empty it must be shaped
    ///   `local@domain.tld`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first offending field.
    pub fn new(
        surname: &str,
        name: &str,
        phone: &str,
        email: Option<String>,
    ) -> Result<Self, ValidationError> {
        let surname = surname.trim();
        let name = name.trim();
        validate_person_name("surname", surname)?;
        validate_person_name("name", name)?;
        validate_phone(phone)?;

        let email = match email {
            Some(e) => {
                let trimmed = e.trim().to_string();
                if trimmed.is_empty() {
                    None
                } else {
                    validate_email(&trimmed)?;
                    Some(trimmed)
                }
            }
            None => None,
        };

        Ok(Self {
            surname: surname.to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
            email,
        })
    }

    /// Returns the guest's surname.
    #[must_use]
    pub fn surname(&self) -> &str {
        &self.surname
    }

    /// Returns the guest's first name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the guest's phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Returns the guest's email, if any.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

/// Validates a person-name field: minimum 2 characters, letters (any
/// alphabet, which covers accented Latin), spaces, hyphens and apostrophes.
fn validate_person_name(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < 2 {
        return Err(ValidationError {
            field: field.into(),
            message: "must be at least 2 characters".into(),
        });
    }
    if !value
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'')
    {
        return Err(ValidationError {
            field: field.into(),
            message: "may only contain letters, spaces, hyphens and apostrophes".into(),
        });
    }
    Ok(())
}

/// Local mobile prefixes accepted for guest phone numbers.
const PHONE_PREFIXES: [&str; 5] = ["70", "75", "76", "77", "78"];

/// Validates a 9-digit local mobile number with an accepted prefix.
fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let valid = value.len() == 9
        && value.chars().all(|c| c.is_ascii_digit())
        && PHONE_PREFIXES.iter().any(|p| value.starts_with(p));
    if valid {
        Ok(())
    } else {
        Err(ValidationError {
            field: "phone".into(),
            message: "must be 9 digits starting with 70, 75, 76, 77 or 78".into(),
        })
    }
}

/// Validates a basic `local@domain.tld` email shape.
fn validate_email(value: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError {
        field: "email".into(),
        message: "must be shaped local@domain.tld".into(),
    };

    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().ok_or_else(invalid)?;

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-');

    let (host, tld) = match domain.rsplit_once('.') {
        Some((h, t)) => (h, t),
        None => return Err(invalid()),
    };
    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());

    if local_ok && host_ok && tld_ok && !domain.contains('@') {
        Ok(())
    } else {
        Err(invalid())
    }
}

/// Half-open interval overlap test used for booking conflicts.
///
/// Two stays `[a_start, a_end)` and `[b_start, b_end)` overlap when
/// `a_start < b_end && b_start < a_end`. Exact back-to-back turnover (one
/// stay departing at the instant another arrives) does not overlap.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hotelier::overlaps;
///
/// let d = |day: u32, hour: u32| {
///     NaiveDate::from_ymd_opt(2025, 6, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
/// };
///
/// assert!(overlaps(d(1, 14), d(3, 12), d(2, 10), d(5, 10)));
/// // Back-to-back: departure at 12:00, next arrival at 12:00
/// assert!(!overlaps(d(1, 14), d(3, 12), d(3, 12), d(5, 10)));
/// ```
#[must_use]
pub fn overlaps(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Number of billable nights between two stay timestamps.
///
/// The count is the calendar-day difference between the arrival and
/// departure dates, with a minimum of one night (a same-day stay still
/// bills one night).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hotelier::night_count;
///
/// let arrival = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(14, 0, 0).unwrap();
/// let departure = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// assert_eq!(night_count(arrival, departure), 2);
///
/// // Same-day stay bills a single night
/// let departure = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(18, 0, 0).unwrap();
/// assert_eq!(night_count(arrival, departure), 1);
/// ```
#[must_use]
pub fn night_count(arrival: NaiveDateTime, departure: NaiveDateTime) -> i64 {
    (departure.date() - arrival.date()).num_days().max(1)
}

/// A room reservation with guest, stay, and pricing details.
///
/// A freshly built reservation is a draft: it has no identifier, number, or
/// booking timestamp, and its night count and total amount are unset. The
/// booking engine fills those in when it commits the draft.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hotelier::{Guest, Reservation};
///
/// let guest = Guest::new("Ndiaye", "Moussa", "781234567", None).unwrap();
/// let arrival = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(14, 0, 0).unwrap();
/// let departure = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap().and_hms_opt(12, 0, 0).unwrap();
///
/// let draft = Reservation::builder(guest, 1, arrival, departure)
///     .party_size(2)
///     .deposit(30_000.0)
///     .build()
///     .unwrap();
/// assert_eq!(draft.party_size(), 2);
/// assert!(draft.number().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    id: Option<i64>,
    number: Option<String>,
    booked_at: Option<NaiveDateTime>,
    guest: Guest,
    arrival: NaiveDateTime,
    departure: NaiveDateTime,
    party_size: u32,
    nights: i64,
    total_amount: f64,
    deposit: f64,
    status: ReservationStatus,
    room_id: i64,
}

impl Reservation {
    /// Creates a new reservation builder for the given guest, room, and stay.
    #[must_use]
    pub fn builder(
        guest: Guest,
        room_id: i64,
        arrival: NaiveDateTime,
        departure: NaiveDateTime,
    ) -> ReservationBuilder {
        ReservationBuilder {
            id: None,
            number: None,
            booked_at: None,
            guest,
            arrival,
            departure,
            party_size: 1,
            nights: 0,
            total_amount: 0.0,
            deposit: 0.0,
            status: ReservationStatus::Confirmed,
            room_id,
        }
    }

    /// Returns the persisted identifier, if any.
    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    /// Returns the reservation number, if assigned.
    #[must_use]
    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    /// Returns the booking timestamp, if the reservation was committed.
    #[must_use]
    pub const fn booked_at(&self) -> Option<NaiveDateTime> {
        self.booked_at
    }

    /// Returns the guest details.
    #[must_use]
    pub const fn guest(&self) -> &Guest {
        &self.guest
    }

    /// Returns the arrival timestamp.
    #[must_use]
    pub const fn arrival(&self) -> NaiveDateTime {
        self.arrival
    }

    /// Returns the departure timestamp.
    #[must_use]
    pub const fn departure(&self) -> NaiveDateTime {
        self.departure
    }

    /// Returns the arrival calendar date.
    #[must_use]
    pub fn arrival_date(&self) -> NaiveDate {
        self.arrival.date()
    }

    /// Returns the departure calendar date.
    #[must_use]
    pub fn departure_date(&self) -> NaiveDate {
        self.departure.date()
    }

    /// Returns the party size.
    #[must_use]
    pub const fn party_size(&self) -> u32 {
        self.party_size
    }

    /// Returns the billed night count (0 on an unpriced draft).
    #[must_use]
    pub const fn nights(&self) -> i64 {
        self.nights
    }

    /// Returns the total amount (0 on an unpriced draft).
    #[must_use]
    pub const fn total_amount(&self) -> f64 {
        self.total_amount
    }

    /// Returns the deposit amount.
    #[must_use]
    pub const fn deposit(&self) -> f64 {
        self.deposit
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Returns the identifier of the reserved room.
    #[must_use]
    pub const fn room_id(&self) -> i64 {
        self.room_id
    }

    /// Whether this reservation's stay overlaps the given half-open interval.
    #[must_use]
    pub fn overlaps_interval(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        overlaps(self.arrival, self.departure, start, end)
    }
}

/// Builder for creating [`Reservation`] instances.
#[derive(Debug)]
pub struct ReservationBuilder {
    id: Option<i64>,
    number: Option<String>,
    booked_at: Option<NaiveDateTime>,
    guest: Guest,
    arrival: NaiveDateTime,
    departure: NaiveDateTime,
    party_size: u32,
    nights: i64,
    total_amount: f64,
    deposit: f64,
    status: ReservationStatus,
    room_id: i64,
}

impl ReservationBuilder {
    /// Sets the persisted identifier (used when loading from the database).
    #[must_use]
    pub const fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the reservation number.
    #[must_use]
    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    /// Sets the booking timestamp.
    #[must_use]
    pub const fn booked_at(mut self, booked_at: NaiveDateTime) -> Self {
        self.booked_at = Some(booked_at);
        self
    }

    /// Sets the party size.
    #[must_use]
    pub const fn party_size(mut self, party_size: u32) -> Self {
        self.party_size = party_size;
        self
    }

    /// Sets the billed night count.
    #[must_use]
    pub const fn nights(mut self, nights: i64) -> Self {
        self.nights = nights;
        self
    }

    /// Sets the total amount.
    #[must_use]
    pub const fn total_amount(mut self, total_amount: f64) -> Self {
        self.total_amount = total_amount;
        self
    }

    /// Sets the deposit amount.
    #[must_use]
    pub const fn deposit(mut self, deposit: f64) -> Self {
        self.deposit = deposit;
        self
    }

    /// Sets the lifecycle status.
    #[must_use]
    pub const fn status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Builds the reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the departure is not strictly after the arrival;
    /// - the party size is zero;
    /// - the deposit is negative or not finite.
    pub fn build(self) -> Result<Reservation, ValidationError> {
        if self.departure <= self.arrival {
            return Err(ValidationError {
                field: "departure".into(),
                message: "departure must be strictly after arrival".into(),
            });
        }
        if self.party_size == 0 {
            return Err(ValidationError {
                field: "party_size".into(),
                message: "party size must be at least 1".into(),
            });
        }
        if !self.deposit.is_finite() || self.deposit < 0.0 {
            return Err(ValidationError {
                field: "deposit".into(),
                message: "deposit must be a non-negative amount".into(),
            });
        }

        Ok(Reservation {
            id: self.id,
            number: self.number,
            booked_at: self.booked_at,
            guest: self.guest,
            arrival: self.arrival,
            departure: self.departure,
            party_size: self.party_size,
            nights: self.nights,
            total_amount: self.total_amount,
            deposit: self.deposit,
            status: self.status,
            room_id: self.room_id,
        })
    }
}
