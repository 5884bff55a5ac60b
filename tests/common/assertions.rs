//! Domain-specific assertion macros for pantry harnesses.
//!
//! These wrap `pretty_assertions` and name the record or list that broke
//! the expectation.

/// Assert the ids of a record list, in order.
///
/// ```rust
/// assert_ids!(records, ["10", "9"]);
/// ```
#[macro_export]
macro_rules! assert_ids {
    ($records:expr, [$($id:expr),* $(,)?]) => {{
        let records = &$records;
        let actual: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        let expected: Vec<&str> = vec![$($id),*];
        pretty_assertions::assert_eq!(actual, expected, "record ids differ");
    }};
}

/// Assert that no record in a list is marked favorite except `ids`.
#[macro_export]
macro_rules! assert_favorites {
    ($records:expr, [$($id:expr),* $(,)?]) => {{
        let records = &$records;
        let mut actual: Vec<&str> = records
            .iter()
            .filter(|r| r.is_favorite)
            .map(|r| r.id.as_str())
            .collect();
        actual.sort();
        let mut expected: Vec<&str> = vec![$($id),*];
        expected.sort();
        pretty_assertions::assert_eq!(actual, expected, "favorite projection differs");
    }};
}
