use std::fmt;

use uuid::Uuid;

/// Correlation ID that follows a monitor loop or a single fetch cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First hyphen-delimited group; enough to tell cycles apart in logs.
    pub fn short(&self) -> String {
        let full = self.0.as_hyphenated().to_string();
        full.split('-').next().unwrap_or_default().to_string()
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_is_prefix_of_full_id() {
        let id = TraceId::new();
        let full = id.to_string();

        assert_eq!(id.short().len(), 8);
        assert!(full.starts_with(&id.short()));
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(TraceId::new(), TraceId::new());
    }
}
