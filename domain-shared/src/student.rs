use serde::{Deserialize, Serialize};

/// Student identity as entered on the form. There is no student id in the
/// system; the (first, last) pair is the identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentName {
    pub first: String,
    pub last: String,
}

/// Case-insensitive, whitespace-trimmed form of a student name, usable as a
/// map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StudentKey(pub String, pub String);

impl StudentName {
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
        }
    }

    /// Splits a "First Last" string on the first whitespace gap. Everything
    /// after the first token is the last name.
    pub fn parse_full(full_name: &str) -> Option<Self> {
        let full_name = full_name.trim();
        let (first, last) = full_name.split_once(char::is_whitespace)?;
        let last = last.trim();
        if first.is_empty() || last.is_empty() {
            return None;
        }
        Some(Self::new(first, last))
    }

    pub fn key(&self) -> StudentKey {
        StudentKey(
            self.first.trim().to_lowercase(),
            self.last.trim().to_lowercase(),
        )
    }

    pub fn matches(&self, first: &str, last: &str) -> bool {
        self.first.trim().eq_ignore_ascii_case(first.trim())
            && self.last.trim().eq_ignore_ascii_case(last.trim())
    }

    pub fn display(&self) -> String {
        format!("{} {}", self.first.trim(), self.last.trim())
    }
}
