//! Typed view integration tests
//!
//! Tests are organized by accessor family, plus end-to-end scenarios over the
//! book model from the shared helpers.

mod fault_tests;
mod list_tests;
mod object_tests;
mod value_tests;
