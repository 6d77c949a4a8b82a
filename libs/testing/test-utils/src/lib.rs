//! Shared test utilities for the indexer
//!
//! - `TestQdrant`: Qdrant container with automatic cleanup (feature: "qdrant")
//! - `TestDataBuilder`: Deterministic index names, filenames and section ids
//! - `assertions`: Custom assertion helpers
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestQdrant};
//!
//! #[tokio::test]
//! async fn my_qdrant_test() {
//!     let qdrant = TestQdrant::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let index_name = builder.index_name("main");
//!     let filename = builder.filename("report", "pdf");
//! }
//! ```

use uuid::Uuid;

#[cfg(feature = "qdrant")]
mod qdrant;

#[cfg(feature = "qdrant")]
pub use qdrant::TestQdrant;

/// Builder for test data with deterministic randomization
///
/// Tests sharing a Qdrant instance stay isolated because every name carries
/// the seed.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_add_to_index");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Collection name unique to this test
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.index_name("main"), "test-index-7-main");
    /// ```
    pub fn index_name(&self, suffix: &str) -> String {
        format!("test-index-{}-{}", self.seed, suffix)
    }

    /// Source filename unique to this test
    pub fn filename(&self, stem: &str, extension: &str) -> String {
        format!("{}-{}.{}", stem, self.seed, extension)
    }

    /// Deterministic UUID section id for the `n`th section of `filename`
    pub fn section_id(&self, filename: &str, n: usize) -> String {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&self.seed.to_le_bytes());
        bytes[8..].copy_from_slice(&(n as u64).to_le_bytes());
        Uuid::new_v5(&Uuid::from_bytes(bytes), filename.as_bytes()).to_string()
    }
}

/// Test assertion helpers
pub mod assertions {
    use std::collections::BTreeSet;

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert two id collections hold the same ids, ignoring order
    pub fn assert_same_ids<I, S>(actual: I, expected: &[&str], context: &str)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let actual: BTreeSet<String> = actual.into_iter().map(Into::into).collect();
        let expected: BTreeSet<String> = expected.iter().map(|s| s.to_string()).collect();
        assert_eq!(actual, expected, "{}: id sets differ", context);
    }
}
