//! Sensitive-data detection
//!
//! Pattern-based scanning of raw log text into per-category match counts.
//! The catalog ([`catalog`]) declares the rules; the engine ([`engine`])
//! compiles them once and aggregates counts per category. Scanning is pure
//! and deterministic, and never mutates shared state.

pub mod catalog;
pub mod engine;

pub use catalog::{default_catalog, PatternRule, SensitiveCategory};
pub use engine::{PiiFinding, Scanner};
