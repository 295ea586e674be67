//! Flag words classifying semantic types.
//!
//! The host type-checking service describes each type with two bit sets:
//! [`TypeFlags`] for the primitive classification and [`ObjectFlags`] for
//! the object-type sub-classification. The kind classifier in `doc::build`
//! reads these words in a fixed priority order.

// ============================================================================
// TYPE FLAGS
// ============================================================================

/// Primitive classification bits for a semantic type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TypeFlags(pub u32);

impl TypeFlags {
    pub const NONE: TypeFlags = TypeFlags(0);
    pub const ANY: TypeFlags = TypeFlags(1 << 0);
    pub const UNKNOWN: TypeFlags = TypeFlags(1 << 1);
    pub const STRING: TypeFlags = TypeFlags(1 << 2);
    pub const NUMBER: TypeFlags = TypeFlags(1 << 3);
    pub const BOOLEAN: TypeFlags = TypeFlags(1 << 4);
    pub const BIGINT: TypeFlags = TypeFlags(1 << 5);
    pub const SYMBOL: TypeFlags = TypeFlags(1 << 6);
    pub const VOID: TypeFlags = TypeFlags(1 << 7);
    pub const UNDEFINED: TypeFlags = TypeFlags(1 << 8);
    pub const NULL: TypeFlags = TypeFlags(1 << 9);
    pub const NEVER: TypeFlags = TypeFlags(1 << 10);
    pub const STRING_LITERAL: TypeFlags = TypeFlags(1 << 11);
    pub const NUMBER_LITERAL: TypeFlags = TypeFlags(1 << 12);
    pub const BOOLEAN_LITERAL: TypeFlags = TypeFlags(1 << 13);
    pub const BIGINT_LITERAL: TypeFlags = TypeFlags(1 << 14);
    pub const UNIQUE_SYMBOL: TypeFlags = TypeFlags(1 << 15);
    pub const OBJECT: TypeFlags = TypeFlags(1 << 16);
    pub const UNION: TypeFlags = TypeFlags(1 << 17);
    pub const INTERSECTION: TypeFlags = TypeFlags(1 << 18);
    pub const TYPE_PARAMETER: TypeFlags = TypeFlags(1 << 19);

    /// Members dropped by the non-nullable union projection.
    pub const NULLABLE: TypeFlags = TypeFlags(Self::NULL.0 | Self::UNDEFINED.0);

    /// Returns true if any bit of `other` is set in `self`.
    pub fn intersects(self, other: TypeFlags) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns true if every bit of `other` is set in `self`.
    pub fn contains(self, other: TypeFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if no bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for TypeFlags {
    type Output = TypeFlags;

    fn bitor(self, rhs: TypeFlags) -> TypeFlags {
        TypeFlags(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for TypeFlags {
    fn bitor_assign(&mut self, rhs: TypeFlags) {
        self.0 |= rhs.0;
    }
}

// ============================================================================
// OBJECT FLAGS
// ============================================================================

/// Sub-classification bits for object-flagged types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ObjectFlags(pub u32);

impl ObjectFlags {
    pub const NONE: ObjectFlags = ObjectFlags(0);
    /// Declared with a class declaration.
    pub const CLASS: ObjectFlags = ObjectFlags(1 << 0);
    /// Declared with an interface declaration.
    pub const INTERFACE: ObjectFlags = ObjectFlags(1 << 1);
    /// An instantiation of a generic target type.
    pub const REFERENCE: ObjectFlags = ObjectFlags(1 << 2);
    /// The target shape of a tuple reference.
    pub const TUPLE: ObjectFlags = ObjectFlags(1 << 3);
    /// An inline type literal with no declaration of its own.
    pub const ANONYMOUS: ObjectFlags = ObjectFlags(1 << 4);

    pub const CLASS_OR_INTERFACE: ObjectFlags = ObjectFlags(Self::CLASS.0 | Self::INTERFACE.0);

    /// Returns true if any bit of `other` is set in `self`.
    pub fn intersects(self, other: ObjectFlags) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns true if every bit of `other` is set in `self`.
    pub fn contains(self, other: ObjectFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for ObjectFlags {
    type Output = ObjectFlags;

    fn bitor(self, rhs: ObjectFlags) -> ObjectFlags {
        ObjectFlags(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for ObjectFlags {
    fn bitor_assign(&mut self, rhs: ObjectFlags) {
        self.0 |= rhs.0;
    }
}
