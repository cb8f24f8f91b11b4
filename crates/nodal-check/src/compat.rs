//! Field-type compatibility rules.
//!
//! Defines which (source, target) field-type pairs may be wired together.
//! The rules encode subtyping over the collection shapes, polymorphic
//! base-kind unification, and a short list of implicit scalar conversions:
//!
//! - exact structural match
//! - collection-item <-> scalar widening/narrowing
//! - polymorphic targets accept any shape of their base kind
//! - the generic collection widens to / narrows from specific collections
//! - Integer -> Float, Integer -> String, Float -> String (never reversed)
//! - the `Any` target accepts everything

use nodal_core::field::{FieldType, FieldTypeName};

/// Returns `true` if a value of type `source` may flow into a field of type
/// `target`.
///
/// Pure and total; safe to call at arbitrary rate (it runs once per
/// candidate field on every pointer frame during a connect gesture). The
/// rules are ordered and the first match wins -- they are not independent.
pub fn is_compatible(source: &FieldType, target: &FieldType) -> bool {
    // The runtime cannot yet execute a collect-style output wired directly
    // into an iterate-style input, so generic-to-generic collection wiring
    // is rejected outright. Standing exclusion, not a type rule; remove it
    // once the execution engine handles that topology.
    if source.is_generic_collection() && target.is_generic_collection() {
        return false;
    }

    if source == target {
        return true;
    }

    // A single extracted element flows into any non-collection input.
    if source.is_generic_collection_item() && !target.is_collection() {
        return true;
    }

    // Any bare scalar can bind where "one collection element" is expected.
    if target.is_generic_collection_item() && !source.is_collection() && !source.is_polymorphic() {
        return true;
    }

    // A polymorphic input accepts a scalar or a collection of its base kind.
    if target.is_polymorphic() && source.name() == target.name() {
        return true;
    }

    // The generic collection widens into any collection or polymorphic.
    if source.is_generic_collection() && (target.is_collection() || target.is_polymorphic()) {
        return true;
    }

    // Any collection narrows into the generic collection.
    if target.is_generic_collection() && source.is_collection() {
        return true;
    }

    // Implicit scalar conversions, lossless direction only.
    if source.is_scalar() && target.is_scalar() {
        if let (FieldTypeName::Integer, FieldTypeName::Float)
        | (FieldTypeName::Integer, FieldTypeName::String)
        | (FieldTypeName::Float, FieldTypeName::String) = (source.name(), target.name())
        {
            return true;
        }
    }

    // Universal sink.
    target.is_any()
}
