use domain_shared::student::{StudentKey, StudentName};
use std::collections::HashMap;
use tracing::instrument;

/// Roster row for one student, keyed by normalized name in the roster map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub pin: String,
    pub active: bool,
}

pub type Roster = HashMap<StudentKey, RosterEntry>;

/// Canonical PIN form: digits only, last four, left-padded with zeros.
/// "123456" becomes "3456", "7" becomes "0007".
pub fn normalize_pin(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let start = digits.len().saturating_sub(4);
    let last4: String = digits[start..].iter().collect();
    format!("{:0>4}", last4)
}

/// PIN gate. The student must be on the roster, marked active, and the
/// submitted PIN must match the stored one after both are normalized.
#[instrument(level = "debug", skip(roster, pin))]
pub fn verify_pin(roster: &Roster, student: &StudentName, pin: &str) -> bool {
    match roster.get(&student.key()) {
        Some(entry) => entry.active && normalize_pin(&entry.pin) == normalize_pin(pin),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_with(first: &str, last: &str, pin: &str, active: bool) -> Roster {
        let mut roster = Roster::new();
        roster.insert(
            StudentName::new(first, last).key(),
            RosterEntry {
                pin: pin.into(),
                active,
            },
        );
        roster
    }

    #[test]
    fn normalization_keeps_last_four_digits_zero_padded() {
        assert_eq!(normalize_pin("123456"), "3456");
        assert_eq!(normalize_pin("7"), "0007");
        assert_eq!(normalize_pin("12-34"), "1234");
        assert_eq!(normalize_pin(" 0042 "), "0042");
        assert_eq!(normalize_pin("no digits"), "0000");
    }

    #[test]
    fn accepts_matching_active_student() {
        let roster = roster_with("Alice", "Smith", "004217", true);
        let alice = StudentName::new(" alice", "SMITH ");
        assert!(verify_pin(&roster, &alice, "4217"));
    }

    #[test]
    fn rejects_inactive_unknown_or_mismatched() {
        let alice = StudentName::new("Alice", "Smith");
        assert!(!verify_pin(&roster_with("Alice", "Smith", "4217", false), &alice, "4217"));
        assert!(!verify_pin(&roster_with("Bob", "Jones", "4217", true), &alice, "4217"));
        assert!(!verify_pin(&roster_with("Alice", "Smith", "4217", true), &alice, "9999"));
    }
}
