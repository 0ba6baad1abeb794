//! Shared test utilities for metvocab integration harnesses.
//!
//! Import via `mod common; use common::*;` at the top of each harness file.

#![allow(dead_code)]

pub mod fake_registry;
pub mod fixtures;

pub use fake_registry::FakeRegistry;
pub use fixtures::*;
