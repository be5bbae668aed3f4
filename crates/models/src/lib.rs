//! Persistence model: one sea-orm entity per table, owned by the repository tier.
//!
//! Every entity is a structural mirror of its business counterpart in the
//! `service` crate; conversion between the two lives in `service::mapper`.

pub mod db;
pub mod family;
pub mod establishment;
pub mod employee;
pub mod order;
pub mod product;
