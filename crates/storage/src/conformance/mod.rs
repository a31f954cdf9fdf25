//! Conformance test suite for `KeyValueStore` implementations.
//!
//! This module provides a backend-agnostic test suite that any
//! `KeyValueStore` implementation can run to verify correctness. The suite
//! covers:
//!
//! - **Reads**: missing keys, reads after writes, repeated reads
//! - **Writes**: wholesale replacement, key independence, empty values
//! - **Payloads**: Arabic text, JSON documents, large blobs
//!
//! # Usage
//!
//! Backend crates call [`run_conformance_suite`] with a factory function that
//! creates a fresh, empty store for each test:
//!
//! ```ignore
//! use tafweed_storage::conformance::run_conformance_suite;
//!
//! #[test]
//! fn file_store_conformance() {
//!     let report = run_conformance_suite(|| FileStore::new(fresh_dir()));
//!     assert!(report.is_clean(), "{report}");
//! }
//! ```

mod payload;
mod read;
mod write;

use std::fmt;

use crate::KeyValueStore;

/// A check name paired with what it observed.
type Outcome = (&'static str, Result<(), String>);

/// Which part of the store contract a check exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    Read,
    Write,
    Payload,
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Area::Read => "read",
            Area::Write => "write",
            Area::Payload => "payload",
        })
    }
}

/// A check the backend did not satisfy.
#[derive(Debug, Clone)]
pub struct Failure {
    pub area: Area,
    pub check: &'static str,
    pub reason: String,
}

/// What a suite run found. Only failures are kept.
#[derive(Debug, Clone, Default)]
pub struct ConformanceReport {
    pub checked: usize,
    pub failures: Vec<Failure>,
}

impl ConformanceReport {
    fn record(&mut self, area: Area, outcomes: Vec<Outcome>) {
        self.checked += outcomes.len();
        self.failures.extend(outcomes.into_iter().filter_map(|(check, r)| {
            r.err().map(|reason| Failure {
                area,
                check,
                reason,
            })
        }));
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failures in one area, in run order.
    pub fn failures_in(&self, area: Area) -> impl Iterator<Item = &Failure> {
        self.failures.iter().filter(move |f| f.area == area)
    }
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return write!(f, "store conforms ({} checks)", self.checked);
        }
        writeln!(
            f,
            "store broke {} of {} checks:",
            self.failures.len(),
            self.checked
        )?;
        for x in &self.failures {
            writeln!(f, "  {}::{}: {}", x.area, x.check, x.reason)?;
        }
        Ok(())
    }
}

/// Run the full conformance suite against a storage backend.
///
/// `factory` is called once per check and must return a fresh, empty store.
pub fn run_conformance_suite<S, F>(factory: F) -> ConformanceReport
where
    S: KeyValueStore,
    F: Fn() -> S,
{
    let mut report = ConformanceReport::default();
    report.record(Area::Read, read::run_read_tests(&factory));
    report.record(Area::Write, write::run_write_tests(&factory));
    report.record(Area::Payload, payload::run_payload_tests(&factory));
    report
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn expect_value<S: KeyValueStore>(store: &S, key: &str, expected: &str) -> Result<(), String> {
    match store.get(key) {
        Ok(Some(v)) if v == expected => Ok(()),
        Ok(Some(v)) => Err(format!(
            "key '{}': expected {:?}, got {:?}",
            key,
            truncate(expected),
            truncate(&v)
        )),
        Ok(None) => Err(format!("key '{}': expected a value, got None", key)),
        Err(e) => Err(format!("key '{}': get failed: {}", key, e)),
    }
}

fn put<S: KeyValueStore>(store: &mut S, key: &str, value: &str) -> Result<(), String> {
    store
        .set(key, value)
        .map_err(|e| format!("set '{}' failed: {}", key, e))
}

fn truncate(s: &str) -> String {
    if s.chars().count() <= 40 {
        s.to_string()
    } else {
        let head: String = s.chars().take(40).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStore, StorageError};

    /// Accepts writes but never returns them.
    struct Forgetful;

    impl KeyValueStore for Forgetful {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn memory_store_is_clean() {
        let report = run_conformance_suite(MemoryStore::new);
        assert!(report.is_clean(), "{report}");
        assert!(report.checked > 0);
        assert!(report.to_string().starts_with("store conforms"));
    }

    #[test]
    fn forgetful_store_fails_by_area() {
        let report = run_conformance_suite(|| Forgetful);
        assert!(!report.is_clean());
        assert!(report.failures.len() < report.checked);
        // A missing key still reads as None.
        assert!(report
            .failures_in(Area::Read)
            .all(|f| f.check != "missing_key_reads_none"));
        assert!(report.failures_in(Area::Write).count() > 0);
        assert!(report.failures_in(Area::Payload).count() > 0);
        let text = report.to_string();
        assert!(text.contains("payload::arabic_text_round_trips"), "{text}");
    }
}
