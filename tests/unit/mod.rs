/// Engine unit test suite
///
/// Covers the ledger's testable properties: rollover idempotence and
/// conservation, date-key uniqueness, streak continuity and the analytics
/// edge cases.

mod analytics_tests;
mod rollover_tests;
