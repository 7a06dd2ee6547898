//! `buildops-core` — shared building blocks for the back-office crates.
//!
//! This crate contains **pure** primitives (no infrastructure concerns).

pub mod error;
pub mod guard;
pub mod id;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::{EquipmentId, ProjectId, TenantId};
pub use value_object::ValueObject;
