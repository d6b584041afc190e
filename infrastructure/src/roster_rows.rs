use crate::sheets::columns::resolve_columns;
use domain::roster::{Roster, RosterEntry};
use domain_shared::student::StudentName;

/// Layout shared by the roster CSV and the roster sheet tab.
pub const ROSTER_HEADER: [&str; 4] = ["First Name", "Last Name", "PIN", "Active"];

fn parse_active(raw: &str) -> bool {
    // A missing or blank Active column means enrolled.
    matches!(
        raw.trim().to_lowercase().as_str(),
        "" | "1" | "true" | "yes" | "y" | "active"
    )
}

/// Builds the keyed roster map from raw rows (header first). Rows with no
/// name at all are skipped; later duplicates of a name overwrite earlier
/// ones, so a re-enrolled student's newest row wins.
pub fn roster_from_rows(rows: &[Vec<String>]) -> Roster {
    let Some((header, data)) = rows.split_first() else {
        return Roster::new();
    };
    let indices = resolve_columns(header, &ROSTER_HEADER);
    let cell = |row: &[String], i: usize| row.get(indices[i]).cloned().unwrap_or_default();

    let mut roster = Roster::new();
    for row in data {
        let first = cell(row, 0);
        let last = cell(row, 1);
        if first.trim().is_empty() && last.trim().is_empty() {
            continue;
        }
        roster.insert(
            StudentName::new(first, last).key(),
            RosterEntry {
                pin: cell(row, 2),
                active: parse_active(&cell(row, 3)),
            },
        );
    }
    roster
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn builds_the_keyed_map_and_skips_nameless_rows() {
        let rows = vec![
            row(&["First Name", "Last Name", "PIN", "Active"]),
            row(&["Alice", "Smith", "004217", "yes"]),
            row(&["Bob", "Jones", "1111", "no"]),
            row(&["", "", "", ""]),
        ];
        let roster = roster_from_rows(&rows);
        assert_eq!(roster.len(), 2);

        let alice = roster.get(&StudentName::new("ALICE", "smith").key()).unwrap();
        assert!(alice.active);
        assert_eq!(alice.pin, "004217");
        assert!(!roster.get(&StudentName::new("Bob", "Jones").key()).unwrap().active);
    }

    #[test]
    fn missing_active_column_means_enrolled() {
        let rows = vec![
            row(&["First Name", "Last Name", "PIN"]),
            row(&["Alice", "Smith", "4217"]),
        ];
        let roster = roster_from_rows(&rows);
        assert!(roster.get(&StudentName::new("Alice", "Smith").key()).unwrap().active);
    }

    #[test]
    fn truthy_spellings_of_active() {
        for raw in ["1", "TRUE", "Yes", " y ", "Active", ""] {
            assert!(parse_active(raw), "{raw:?} should be active");
        }
        for raw in ["0", "false", "No", "withdrawn"] {
            assert!(!parse_active(raw), "{raw:?} should be inactive");
        }
    }
}
