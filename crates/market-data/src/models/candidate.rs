use std::fmt;

/// A symbol worth trying against the provider.
///
/// Always trimmed and upper-cased, never blank. Candidates live for one
/// request only.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Candidate(String);

impl Candidate {
    /// Normalize `raw` into a candidate, or `None` if it is blank.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let normalized = raw.as_ref().trim().to_uppercase();
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Candidate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
