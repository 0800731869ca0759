//! ID generation utilities.

use ulid::Ulid;

/// Length of a generated identifier.
pub const ID_LENGTH: usize = 26;

/// ID generator for entities.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    _private: (),
}

impl IdGenerator {
    /// Create a new ID generator.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Generate a new ULID-based ID.
    ///
    /// ULIDs are lexicographically sortable by creation time, which keeps
    /// `ORDER BY id` consistent with `ORDER BY created_at` for tie-breaking.
    #[must_use]
    pub fn generate(&self) -> String {
        Ulid::new().to_string().to_lowercase()
    }
}
