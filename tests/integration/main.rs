//! Integration tests for Procurement-Scout
//!
//! These tests use wiremock to stand in for a procurement portal and drive
//! the reference adapter and the engine end-to-end.

mod common;
mod engine_tests;
mod gpr_tests;
