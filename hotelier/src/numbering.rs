//! Room and reservation number generation.
//!
//! Both schemes derive the next sequence number from existing data instead
//! of a persisted counter: room numbers scan the catalog for the highest
//! sequence in their `(prefix, type code, floor)` scope, and reservation
//! numbers count the reservations already booked on the same day. The
//! functions here are pure; the storage layer supplies the existing numbers
//! or counts.

use chrono::NaiveDate;

use crate::reservation::ValidationError;

/// Fixed prefix for generated room numbers.
pub const ROOM_NUMBER_PREFIX: &str = "CH";

/// Fixed prefix for generated reservation numbers.
pub const RESERVATION_NUMBER_PREFIX: &str = "RSV";

/// Generates the next room number for a type code and floor.
///
/// The format is `CH-<TYPECODE>-<FLOOR:02>-<SEQ:03>`, e.g. `CH-STD-02-001`.
/// The sequence is scoped to the `(prefix, type code, floor)` triple and is
/// computed as the maximum sequence found in `existing_numbers` plus one.
/// Numbers that do not match the scheme, belong to another scope, or carry
/// an unparsable sequence are ignored, so legacy or hand-entered numbers
/// never break generation.
///
/// # Errors
///
/// Returns an error if the type code is empty after trimming.
///
/// # Examples
///
/// ```
/// use hotelier::numbering::generate_room_number;
///
/// let existing = vec![
///     "CH-STD-01-001".to_string(),
///     "CH-STD-01-002".to_string(),
///     "CH-DLX-01-001".to_string(),
/// ];
/// assert_eq!(generate_room_number(&existing, "STD", 1).unwrap(), "CH-STD-01-003");
/// // Each (type, floor) scope has its own sequence
/// assert_eq!(generate_room_number(&existing, "DLX", 2).unwrap(), "CH-DLX-02-001");
/// ```
pub fn generate_room_number(
    existing_numbers: &[String],
    type_code: &str,
    floor: i32,
) -> Result<String, ValidationError> {
    let type_code = type_code.trim().to_uppercase();
    if type_code.is_empty() {
        return Err(ValidationError {
            field: "room_type".into(),
            message: "a room type with a code is required to generate a room number".into(),
        });
    }

    let scope = format!("{ROOM_NUMBER_PREFIX}-{type_code}-{floor:02}-");
    let max_seq = existing_numbers
        .iter()
        .filter_map(|number| number.strip_prefix(&scope))
        .filter_map(|seq| seq.parse::<u32>().ok())
        .max()
        .unwrap_or(0);

    Ok(format!("{scope}{:03}", max_seq + 1))
}

/// Generates a reservation number for a booking date.
///
/// The format is `RSV-<YYYYMMDD>-<SEQ:03>` where the sequence is the count
/// of reservations already booked on that date plus one. Uniqueness is
/// best-effort within a single-operator workflow; the column's unique
/// constraint catches the rare collision.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hotelier::numbering::generate_reservation_number;
///
/// let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// assert_eq!(generate_reservation_number(date, 0), "RSV-20250601-001");
/// assert_eq!(generate_reservation_number(date, 1), "RSV-20250601-002");
/// ```
#[must_use]
pub fn generate_reservation_number(booking_date: NaiveDate, booked_today: u32) -> String {
    format!(
        "{RESERVATION_NUMBER_PREFIX}-{}-{:03}",
        booking_date.format("%Y%m%d"),
        booked_today + 1
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_number_in_scope() {
        let existing: Vec<String> = Vec::new();
        assert_eq!(
            generate_room_number(&existing, "STD", 1).unwrap(),
            "CH-STD-01-001"
        );
    }

    #[test]
    fn test_sequence_increments_within_scope() {
        let existing = vec!["CH-STD-01-001".to_string(), "CH-STD-01-002".to_string()];
        assert_eq!(
            generate_room_number(&existing, "STD", 1).unwrap(),
            "CH-STD-01-003"
        );
    }

    #[test]
    fn test_sequences_independent_per_scope() {
        let existing = vec!["CH-STD-01-001".to_string(), "CH-STD-01-002".to_string()];
        // Different type, same floor
        assert_eq!(
            generate_room_number(&existing, "DLX", 1).unwrap(),
            "CH-DLX-01-001"
        );
        // Same type, different floor
        assert_eq!(
            generate_room_number(&existing, "STD", 2).unwrap(),
            "CH-STD-02-001"
        );
    }

    #[test]
    fn test_gaps_are_tolerated() {
        // A deleted room leaves a gap; generation continues after the max
        let existing = vec!["CH-STD-01-001".to_string(), "CH-STD-01-007".to_string()];
        assert_eq!(
            generate_room_number(&existing, "STD", 1).unwrap(),
            "CH-STD-01-008"
        );
    }

    #[test]
    fn test_malformed_numbers_ignored() {
        let existing = vec![
            "CH-STD-01-abc".to_string(),
            "LEGACY-42".to_string(),
            "CH-STD-01-002".to_string(),
        ];
        assert_eq!(
            generate_room_number(&existing, "STD", 1).unwrap(),
            "CH-STD-01-003"
        );
    }

    #[test]
    fn test_type_code_normalized() {
        let existing = vec!["CH-STD-01-004".to_string()];
        assert_eq!(
            generate_room_number(&existing, "std", 1).unwrap(),
            "CH-STD-01-005"
        );
    }

    #[test]
    fn test_empty_type_code_rejected() {
        let err = generate_room_number(&[], "  ", 1).unwrap_err();
        assert_eq!(err.field, "room_type");
    }

    #[test]
    fn test_floor_zero_padded() {
        assert_eq!(
            generate_room_number(&[], "STD", 3).unwrap(),
            "CH-STD-03-001"
        );
        assert_eq!(
            generate_room_number(&[], "STD", 12).unwrap(),
            "CH-STD-12-001"
        );
    }

    #[test]
    fn test_reservation_number_format() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(generate_reservation_number(date, 0), "RSV-20251231-001");
        assert_eq!(generate_reservation_number(date, 41), "RSV-20251231-042");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // A generated number always parses back into its own scope with
            // a sequence strictly greater than every existing one.
            #[test]
            fn prop_generated_number_extends_scope(
                seqs in proptest::collection::vec(1u32..999, 0..20),
                floor in 0i32..100,
            ) {
                let existing: Vec<String> = seqs
                    .iter()
                    .map(|s| format!("CH-STD-{floor:02}-{s:03}"))
                    .collect();
                let generated = generate_room_number(&existing, "STD", floor).unwrap();

                let scope = format!("CH-STD-{floor:02}-");
                let seq: u32 = generated.strip_prefix(&scope).unwrap().parse().unwrap();
                let max_existing = seqs.iter().copied().max().unwrap_or(0);
                prop_assert_eq!(seq, max_existing + 1);
            }

            // Numbers from other scopes never influence the sequence.
            #[test]
            fn prop_foreign_scopes_ignored(
                foreign in proptest::collection::vec("[A-Z]{2,4}", 0..10),
            ) {
                let existing: Vec<String> = foreign
                    .iter()
                    .filter(|code| code.as_str() != "STD")
                    .map(|code| format!("CH-{code}-01-050"))
                    .collect();
                let generated = generate_room_number(&existing, "STD", 1).unwrap();
                prop_assert_eq!(generated, "CH-STD-01-001".to_string());
            }
        }
    }
}
