//! Configuration for reading and writing documents.

/// Controls how a [`Database`](crate::Database) is opened and saved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentConfig {
    /// Pretty-print JSON on save.
    pub pretty: bool,

    /// Open a missing file as an empty database instead of failing.
    pub create_missing: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            create_missing: false,
        }
    }
}

impl DocumentConfig {
    /// Creates a configuration writing single-line JSON.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Self::default()
        }
    }

    /// Builder method to enable/disable pretty-printing.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Builder method to enable/disable opening missing files as empty.
    #[must_use]
    pub fn with_create_missing(mut self, create: bool) -> Self {
        self.create_missing = create;
        self
    }
}
