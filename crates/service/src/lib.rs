//! Service layer for the restaurant-chain back office.
//! - Business entities live in `domain`; persisted rows in the `models` crate.
//! - `mapper` converts between the two; services never touch SQL.
//! - Repository traits are the seam between services and storage.

pub mod errors;
pub mod domain;
pub mod projection;
pub mod mapper;
pub mod repository;
pub mod repo;
pub mod services;
#[cfg(test)]
pub mod test_support;
