//! Fitness-coaching metrics backend.
//!
//! A JSON-over-HTTP service recording personal records, workout plans and
//! completions, nutrition check-ins, and an XP/leveling layer, backed by
//! PostgreSQL. The crate follows a hexagonal layout: `domain` holds the
//! business rules and store ports, `outbound` the Diesel adapters, and
//! `inbound` the Actix handlers.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
