/// Predicate deciding whether a span of text carries a role marker.
///
/// A role marker is a fixed sentinel token (e.g. a role-namespace prefix such as
/// `ROLE_MBAA`) embedded in role identifiers like `"ROLE_MBAA.ADMIN"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleMarker {
    sentinel: String,
}

impl RoleMarker {
    pub fn new(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: sentinel.into(),
        }
    }

    /// Returns true if `text` contains the sentinel at least once.
    ///
    /// An empty sentinel never matches.
    pub fn matches(&self, text: &str) -> bool {
        !self.sentinel.is_empty() && text.contains(&self.sentinel)
    }

    /// The sentinel escaped for embedding inside a regex pattern.
    pub fn pattern(&self) -> String {
        regex::escape(&self.sentinel)
    }
}
