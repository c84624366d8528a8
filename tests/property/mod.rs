//! Property-based tests
//!
//! Random operation sequences driven through the contact service.

mod lock_proptest;
