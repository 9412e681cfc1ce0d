//! Decoded property values.

use super::PropertyKind;
use crate::util::{Color4, Vec3};
use std::fmt;

/// An immutable, decoded property value.
#[derive(Clone, Debug, PartialEq)]
pub enum TypedValue {
    String(String),
    Bool(bool),
    Int32(i32),
    UInt64(u64),
    /// Time in FBX ticks
    Int64Time(i64),
    Float32(f32),
    Vector3(Vec3),
    ColorRGBA(Color4),
}

impl TypedValue {
    /// Kind of this value.
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::String(_) => PropertyKind::String,
            Self::Bool(_) => PropertyKind::Bool,
            Self::Int32(_) => PropertyKind::Int32,
            Self::UInt64(_) => PropertyKind::UInt64,
            Self::Int64Time(_) => PropertyKind::Int64Time,
            Self::Float32(_) => PropertyKind::Float32,
            Self::Vector3(_) => PropertyKind::Vector3,
            Self::ColorRGBA(_) => PropertyKind::ColorRGBA,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::UInt64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<i64> {
        match self {
            Self::Int64Time(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Float32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            Self::Vector3(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color4(&self) -> Option<Color4> {
        match self {
            Self::ColorRGBA(c) => Some(*c),
            _ => None,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{:?}", s),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Int32(v) => write!(f, "{}", v),
            Self::UInt64(v) => write!(f, "{}", v),
            Self::Int64Time(v) => write!(f, "{}t", v),
            Self::Float32(v) => write!(f, "{}", v),
            Self::Vector3(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
            Self::ColorRGBA(c) => write!(f, "rgba({}, {}, {}, {})", c.r, c.g, c.b, c.a),
        }
    }
}

/// Conversion from a decoded value to a concrete Rust type.
///
/// Conversions are strict: a value only converts to the type of its own
/// variant, there is no numeric widening.
pub trait FromTypedValue: Sized {
    fn from_typed(value: &TypedValue) -> Option<Self>;
}

impl FromTypedValue for String {
    fn from_typed(value: &TypedValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromTypedValue for bool {
    fn from_typed(value: &TypedValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromTypedValue for i32 {
    fn from_typed(value: &TypedValue) -> Option<Self> {
        value.as_i32()
    }
}

impl FromTypedValue for u64 {
    fn from_typed(value: &TypedValue) -> Option<Self> {
        value.as_u64()
    }
}

impl FromTypedValue for i64 {
    fn from_typed(value: &TypedValue) -> Option<Self> {
        value.as_time()
    }
}

impl FromTypedValue for f32 {
    fn from_typed(value: &TypedValue) -> Option<Self> {
        value.as_f32()
    }
}

impl FromTypedValue for Vec3 {
    fn from_typed(value: &TypedValue) -> Option<Self> {
        value.as_vec3()
    }
}

impl FromTypedValue for Color4 {
    fn from_typed(value: &TypedValue) -> Option<Self> {
        value.as_color4()
    }
}
