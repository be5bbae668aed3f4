//! Entity services: precondition checks, mapping and repository calls.

pub mod establishment_service;
pub mod family_service;
pub mod order_service;
pub mod product_service;

pub use establishment_service::EstablishmentService;
pub use family_service::FamilyService;
pub use order_service::OrderService;
pub use product_service::ProductService;

/// Render an optional surrogate id for error messages.
fn show_id(id: Option<i64>) -> String {
    id.map(|v| v.to_string()).unwrap_or_else(|| "null".to_string())
}
