//! The field type vocabulary.
//!
//! Every input and output slot on a workflow node carries a [`FieldType`]:
//! a base kind from the closed [`FieldTypeName`] enumeration plus two shape
//! flags (`is_collection`, `is_polymorphic`). The shape flags are never both
//! true; the constructors make that state unrepresentable.
//!
//! Three marker names get dedicated constants:
//! - [`FieldType::COLLECTION`]: the generic, untyped collection ("any
//!   sequence"), shaped as a collection with no fixed base kind.
//! - [`FieldType::COLLECTION_ITEM`]: "one element extracted from some
//!   collection", scalar-shaped.
//! - [`FieldType::ANY`]: the universal sink, scalar-shaped.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Base kind of a field type. Closed enumeration: adding a new kind forces
/// every match over field types through the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldTypeName {
    Integer,
    Float,
    String,
    Boolean,
    Image,
    Color,
    /// Marker for the generic, untyped collection.
    Collection,
    /// Marker for a single element extracted from some collection.
    CollectionItem,
    /// Marker for the universal sink that accepts anything.
    Any,
}

impl fmt::Display for FieldTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldTypeName::Integer => "integer",
            FieldTypeName::Float => "float",
            FieldTypeName::String => "string",
            FieldTypeName::Boolean => "boolean",
            FieldTypeName::Image => "image",
            FieldTypeName::Color => "color",
            FieldTypeName::Collection => "collection",
            FieldTypeName::CollectionItem => "collection item",
            FieldTypeName::Any => "any",
        };
        write!(f, "{s}")
    }
}

/// The type of a field: base kind plus collection/polymorphic shape.
///
/// Equality is structural -- two values are equal iff the name and both
/// shape flags match. Fields are private so that every value goes through
/// a constructor; `is_collection` and `is_polymorphic` cannot both be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldType {
    name: FieldTypeName,
    is_collection: bool,
    is_polymorphic: bool,
}

impl FieldType {
    /// The generic, untyped collection ("any sequence").
    pub const COLLECTION: FieldType = FieldType {
        name: FieldTypeName::Collection,
        is_collection: true,
        is_polymorphic: false,
    };

    /// One element extracted from some collection.
    pub const COLLECTION_ITEM: FieldType = FieldType {
        name: FieldTypeName::CollectionItem,
        is_collection: false,
        is_polymorphic: false,
    };

    /// The universal sink type; any source may connect to it.
    pub const ANY: FieldType = FieldType {
        name: FieldTypeName::Any,
        is_collection: false,
        is_polymorphic: false,
    };

    /// A plain scalar of the given base kind.
    pub fn scalar(name: FieldTypeName) -> Self {
        FieldType {
            name,
            is_collection: false,
            is_polymorphic: false,
        }
    }

    /// A homogeneous ordered sequence of the given base kind.
    ///
    /// `collection(FieldTypeName::Collection)` is the generic collection,
    /// identical to [`FieldType::COLLECTION`].
    pub fn collection(name: FieldTypeName) -> Self {
        FieldType {
            name,
            is_collection: true,
            is_polymorphic: false,
        }
    }

    /// "Any of {scalar, collection} of the given base kind" -- used for
    /// inputs that accept both a single value and a sequence of it.
    pub fn polymorphic(name: FieldTypeName) -> Self {
        FieldType {
            name,
            is_collection: false,
            is_polymorphic: true,
        }
    }

    /// The base kind of this type.
    pub fn name(&self) -> FieldTypeName {
        self.name
    }

    /// Returns `true` if this type denotes a sequence (including the
    /// generic collection).
    pub fn is_collection(&self) -> bool {
        self.is_collection
    }

    /// Returns `true` if this type accepts either a scalar or a collection
    /// of its base kind.
    pub fn is_polymorphic(&self) -> bool {
        self.is_polymorphic
    }

    /// Returns `true` if this type is neither a collection nor polymorphic.
    ///
    /// The marker types `COLLECTION_ITEM` and `ANY` are scalar-shaped and
    /// count as scalars here.
    pub fn is_scalar(&self) -> bool {
        !self.is_collection && !self.is_polymorphic
    }

    /// Returns `true` if this is the generic, untyped collection.
    pub fn is_generic_collection(&self) -> bool {
        self.name == FieldTypeName::Collection
    }

    /// Returns `true` if this is the generic collection-item type.
    pub fn is_generic_collection_item(&self) -> bool {
        self.name == FieldTypeName::CollectionItem
    }

    /// Returns `true` if this is the universal sink type.
    pub fn is_any(&self) -> bool {
        self.name == FieldTypeName::Any
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_generic_collection() {
            write!(f, "collection")
        } else if self.is_collection {
            write!(f, "{} collection", self.name)
        } else if self.is_polymorphic {
            write!(f, "{} polymorphic", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}
