//! Test suite for ContactHub
//!
//! This module organizes all tests. Everything here drives the in-memory
//! stores, so no database is needed.

#![cfg(feature = "ssr")]

pub mod integration;
pub mod property;
