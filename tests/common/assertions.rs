//! Domain-specific assertion macros for cmm harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear which record or projection field was wrong.

// ---------------------------------------------------------------------------
// Record assertions
// ---------------------------------------------------------------------------

/// Assert the sequence, temperature and status of a parsed record.
///
/// ```rust
/// assert_record!(store[0], "3C8A01", 21.4, "0");
/// ```
#[macro_export]
macro_rules! assert_record {
    ($record:expr, $sequence:expr, $temperature:expr, $status:expr) => {{
        let record: &cmm_core::RealtimeRecord = &$record;
        let expected: (&str, f64, &str) = ($sequence, $temperature, $status);
        let actual = (
            record.sequence.as_str(),
            record.temperature,
            record.status.as_str(),
        );
        if actual != expected {
            panic!(
                "assert_record! failed:\n  expected: {:?}\n  actual:   {:?}\n  raw: {:?}",
                expected, actual, record.raw
            );
        }
    }};
}

/// Assert that the sequences of a record slice match, in order.
#[macro_export]
macro_rules! assert_sequences {
    ($records:expr, [$($seq:expr),* $(,)?]) => {{
        let actual: Vec<&str> = $records.iter().map(|r| r.sequence.as_str()).collect();
        let expected: Vec<&str> = vec![$($seq),*];
        pretty_assertions::assert_eq!(actual, expected, "record sequences differ");
    }};
}

// ---------------------------------------------------------------------------
// Numeric assertions
// ---------------------------------------------------------------------------

/// Assert two floats are within `1e-9` of each other (or a given tolerance).
#[macro_export]
macro_rules! assert_close {
    ($actual:expr, $expected:expr) => {
        $crate::assert_close!($actual, $expected, 1e-9)
    };
    ($actual:expr, $expected:expr, $tolerance:expr) => {{
        let actual: f64 = $actual;
        let expected: f64 = $expected;
        if (actual - expected).abs() > $tolerance {
            panic!(
                "assert_close! failed: {} = {}, expected {} (±{})",
                stringify!($actual),
                actual,
                expected,
                $tolerance
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// JSON assertions
// ---------------------------------------------------------------------------

/// Assert the value at a JSON pointer.
///
/// ```rust
/// assert_json_at!(body, "/stats/devices", 123);
/// ```
#[macro_export]
macro_rules! assert_json_at {
    ($json:expr, $pointer:expr, $($value:tt)+) => {{
        let json: &serde_json::Value = &$json;
        let expected = serde_json::json!($($value)+);
        match json.pointer($pointer) {
            Some(actual) => pretty_assertions::assert_eq!(
                actual,
                &expected,
                "JSON value at {} differs",
                $pointer
            ),
            None => panic!("assert_json_at! failed: nothing at {}\n  body: {}", $pointer, json),
        }
    }};
}
