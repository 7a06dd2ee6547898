//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. Every snapshot fed
/// to the analytics engine and every result it returns is a value object: two
/// snapshots with the same fields are interchangeable, and the engine never
/// mutates one it was handed.
///
/// The trait requires:
/// - **Clone**: values are cheap to copy
/// - **PartialEq**: compared by attribute values
/// - **Debug**: useful in logs and test failures
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct AgingBuckets { current: f64, days30: f64, days60: f64, days90_plus: f64 }
///
/// impl ValueObject for AgingBuckets {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
