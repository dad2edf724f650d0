//! Permission Records

use rustc_hash::FxHashSet;

/// Read access to ideas, granted at registration.
pub const IDEAS_READ: &str = "ideas:read";

/// Write access to ideas, granted at activation.
pub const IDEAS_WRITE: &str = "ideas:write";

/// The set of permission codes held by one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Permissions(FxHashSet<String>);

impl Permissions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact membership test; codes carry no hierarchy.
    #[must_use]
    pub fn includes(&self, code: &str) -> bool {
        self.0.contains(code)
    }

    pub fn insert(&mut self, code: impl Into<String>) -> bool {
        self.0.insert(code.into())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Codes in sorted order, for display.
    #[must_use]
    pub fn sorted(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.0.iter().map(String::as_str).collect();

        codes.sort_unstable();

        codes
    }
}

impl<S: Into<String>> FromIterator<S> for Permissions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_is_exact_membership() {
        let permissions = Permissions::from_iter([IDEAS_READ]);

        assert!(permissions.includes(IDEAS_READ));
        assert!(!permissions.includes(IDEAS_WRITE));
        assert!(!permissions.includes("ideas"));
        assert!(!permissions.includes("ideas:read "));
    }

    #[test]
    fn empty_set_includes_nothing() {
        let permissions = Permissions::new();

        assert!(permissions.is_empty());
        assert!(!permissions.includes(IDEAS_READ));
    }

    #[test]
    fn insert_is_idempotent() {
        let mut permissions = Permissions::new();

        assert!(permissions.insert(IDEAS_WRITE));
        assert!(!permissions.insert(IDEAS_WRITE));
        assert_eq!(permissions.len(), 1);
        assert_eq!(permissions.sorted(), vec![IDEAS_WRITE]);
    }
}
