//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are domain objects that are **immutable** and **compared by
/// value**. They represent concepts where identity doesn't matter - only the
/// values matter. To "modify" a value object, create a new one with the new
/// values.
///
/// Example:
/// - `Money::from_minor(100)` is a value object
/// - `Product { id: ProductId(...), .. }` is an entity
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
