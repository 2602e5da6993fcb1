//! Explorer service implementations

pub mod http_service;

#[cfg(test)]
pub mod tests;

pub use http_service::*;
