//! Tests for explorer service components
//!
//! The HTTP client is exercised against a local wiremock server standing in
//! for the scoring service.
