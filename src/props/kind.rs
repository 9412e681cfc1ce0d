//! Property type registry.
//!
//! Maps the type tag of a property record (token 1) to the value kind it
//! decodes to and the number of tokens a well-formed record carries.

use std::fmt;

/// Index of the first value token in a property record.
pub const FIRST_VALUE_TOKEN: usize = 4;

/// Kind of value a property record decodes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyKind {
    /// UTF-8 string
    String,
    /// Boolean (stored as integer, non-zero = true)
    Bool,
    /// Signed 32-bit integer, also used for enums
    Int32,
    /// Unsigned 64-bit integer
    UInt64,
    /// Signed 64-bit time count (FBX ticks)
    Int64Time,
    /// 32-bit floating point
    Float32,
    /// Three floats (vectors, RGB colors, local transforms)
    Vector3,
    /// Four floats (RGBA color)
    ColorRGBA,
}

/// Every recognized type tag with the kind it decodes to.
///
/// Tags are case-sensitive; several historical spellings share a kind.
pub const TYPE_TAGS: &[(&str, PropertyKind)] = &[
    ("KString", PropertyKind::String),
    ("bool", PropertyKind::Bool),
    ("Bool", PropertyKind::Bool),
    ("int", PropertyKind::Int32),
    ("Int", PropertyKind::Int32),
    ("enum", PropertyKind::Int32),
    ("Enum", PropertyKind::Int32),
    ("Integer", PropertyKind::Int32),
    ("ULongLong", PropertyKind::UInt64),
    ("KTime", PropertyKind::Int64Time),
    ("Vector3D", PropertyKind::Vector3),
    ("ColorRGB", PropertyKind::Vector3),
    ("Vector", PropertyKind::Vector3),
    ("Color", PropertyKind::Vector3),
    ("Lcl Translation", PropertyKind::Vector3),
    ("Lcl Rotation", PropertyKind::Vector3),
    ("Lcl Scaling", PropertyKind::Vector3),
    ("double", PropertyKind::Float32),
    ("Number", PropertyKind::Float32),
    ("float", PropertyKind::Float32),
    ("Float", PropertyKind::Float32),
    ("FieldOfView", PropertyKind::Float32),
    ("UnitScaleFactor", PropertyKind::Float32),
    ("ColorAndAlpha", PropertyKind::ColorRGBA),
];

impl PropertyKind {
    /// Look up the kind for a type tag. `None` for unrecognized tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        TYPE_TAGS
            .iter()
            .find(|(name, _)| *name == tag)
            .map(|(_, kind)| *kind)
    }

    /// Number of value tokens this kind reads.
    #[inline]
    pub const fn arity(self) -> usize {
        match self {
            Self::Vector3 => 3,
            Self::ColorRGBA => 4,
            _ => 1,
        }
    }

    /// Minimum token count of a well-formed record of this kind.
    #[inline]
    pub const fn min_tokens(self) -> usize {
        FIRST_VALUE_TOKEN + self.arity()
    }

    /// Returns the name of this kind.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Bool => "Bool",
            Self::Int32 => "Int32",
            Self::UInt64 => "UInt64",
            Self::Int64Time => "Int64Time",
            Self::Float32 => "Float32",
            Self::Vector3 => "Vector3",
            Self::ColorRGBA => "ColorRGBA",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
