//! Property-based tests for registry invariants.
