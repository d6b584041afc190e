use domain::pass::pass_record::PassRecord;

/// Column order the sheet is supposed to have. Real sheets drift: names get
/// retyped, columns reordered, headers duplicated. Resolution is by name
/// first (trimmed, case-insensitive, first occurrence wins), falling back to
/// the canonical position for anything missing.
pub const CANONICAL_HEADER: [&str; 7] = [
    "First Name",
    "Last Name",
    "Period",
    "Teacher",
    "Reason",
    "Time Out",
    "Time In",
];

/// Name-or-position resolution for an arbitrary canonical column list.
pub fn resolve_columns(header: &[String], canonical: &[&str]) -> Vec<usize> {
    canonical
        .iter()
        .enumerate()
        .map(|(default_index, name)| {
            header
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .unwrap_or(default_index)
        })
        .collect()
}

/// Resolved cell positions for the seven pass columns.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    indices: Vec<usize>,
}

impl ColumnMap {
    pub fn resolve(header: &[String]) -> Self {
        Self {
            indices: resolve_columns(header, &CANONICAL_HEADER),
        }
    }

    pub fn time_in(&self) -> usize {
        self.indices[6]
    }

    /// Builds a record from one row, reading missing cells as empty.
    pub fn record_from_row(&self, row: &[String]) -> PassRecord {
        let cell = |i: usize| row.get(self.indices[i]).cloned().unwrap_or_default();
        PassRecord {
            first_name: cell(0),
            last_name: cell(1),
            period: cell(2),
            teacher: cell(3),
            reason: cell(4),
            time_out: cell(5),
            time_in: cell(6),
        }
    }

    /// Lays a record out in the sheet's actual column order.
    pub fn row_from_record(&self, record: &PassRecord) -> Vec<String> {
        let width = self.indices.iter().max().copied().unwrap_or(0) + 1;
        let mut row = vec![String::new(); width];
        let values = [
            &record.first_name,
            &record.last_name,
            &record.period,
            &record.teacher,
            &record.reason,
            &record.time_out,
            &record.time_in,
        ];
        for (i, value) in values.iter().enumerate() {
            row[self.indices[i]] = (*value).clone();
        }
        row
    }
}

/// 0-based column offset to the A1 letter form (0 = A, 26 = AA).
pub fn column_letter(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).expect("ascii letters")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn canonical_header_resolves_positionally() {
        let map = ColumnMap::resolve(&header(&CANONICAL_HEADER));
        assert_eq!(map.indices, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn reordered_and_retyped_headers_resolve_by_name() {
        let map = ColumnMap::resolve(&header(&[
            "time in ",
            "Last Name",
            "first name",
            "Teacher",
            "Reason",
            "Period",
            "TIME OUT",
        ]));
        let record = map.record_from_row(&[
            "".into(),
            "Smith".into(),
            "Alice".into(),
            "J. Clark".into(),
            "Restroom".into(),
            "Period 2".into(),
            "2025-08-10 09:00:00".into(),
        ]);
        assert_eq!(record.first_name, "Alice");
        assert_eq!(record.time_out, "2025-08-10 09:00:00");
        assert!(record.is_open());
    }

    #[test]
    fn missing_headers_fall_back_to_position() {
        // Header row is entirely unrelated: every column lands at its
        // canonical position.
        let map = ColumnMap::resolve(&header(&["a", "b"]));
        assert_eq!(map.indices, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn duplicate_headers_use_the_first_occurrence() {
        let map = ColumnMap::resolve(&header(&[
            "First Name",
            "First Name",
            "Period",
            "Teacher",
            "Reason",
            "Time Out",
            "Time In",
        ]));
        // "Last Name" is absent; its canonical position (1) is the second
        // "First Name" column, which is the best available guess.
        assert_eq!(map.indices[0], 0);
        assert_eq!(map.indices[1], 1);
    }

    #[test]
    fn short_rows_read_as_empty_cells() {
        let map = ColumnMap::resolve(&header(&CANONICAL_HEADER));
        let record = map.record_from_row(&["Alice".into(), "Smith".into()]);
        assert_eq!(record.first_name, "Alice");
        assert_eq!(record.time_out, "");
        assert!(record.is_open());
    }

    #[test]
    fn column_letters_cover_the_double_letter_range() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(6), "G");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
    }
}
