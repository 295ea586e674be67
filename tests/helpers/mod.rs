//! Shared helpers for integration tests.
#![allow(dead_code)]

pub mod doc_assertions;
pub mod fixtures;
