//! Decoding of single property records.

use super::{PropertyKind, TypedValue, FIRST_VALUE_TOKEN};
use crate::dom::{Element, Token};
use crate::util::{Color4, Error, Result, Vec3};

/// Decode a property record into a typed value.
///
/// Returns `Ok(None)` when the record is too short to carry a type tag or
/// when the tag is not recognized. Fails when the tag is recognized but the
/// record is shorter than the tag requires, or a value token cannot be
/// rendered as the required type.
pub fn decode(element: &Element) -> Result<Option<TypedValue>> {
    let tokens = element.tokens();
    if tokens.len() < 2 {
        return Ok(None);
    }

    let type_token = &tokens[1];
    let tag = type_token.parse_string()?;
    let Some(kind) = PropertyKind::from_tag(&tag) else {
        tracing::trace!(tag = %tag, "unrecognized property type");
        return Ok(None);
    };

    check_token_count(tokens, kind, &tag)?;
    let values = &tokens[FIRST_VALUE_TOKEN..];

    let value = match kind {
        PropertyKind::String => TypedValue::String(values[0].parse_string()?),
        PropertyKind::Bool => TypedValue::Bool(values[0].parse_int()? != 0),
        PropertyKind::Int32 => TypedValue::Int32(values[0].parse_int()?),
        PropertyKind::UInt64 => TypedValue::UInt64(values[0].parse_id()?),
        PropertyKind::Int64Time => TypedValue::Int64Time(values[0].parse_int64()?),
        PropertyKind::Float32 => TypedValue::Float32(values[0].parse_float()?),
        PropertyKind::Vector3 => {
            let [x, y, z] = read_floats::<3>(values)?;
            TypedValue::Vector3(Vec3::new(x, y, z))
        }
        PropertyKind::ColorRGBA => {
            let [r, g, b, a] = read_floats::<4>(values)?;
            TypedValue::ColorRGBA(Color4::new(r, g, b, a))
        }
    };
    Ok(Some(value))
}

/// Read the name of a property record without decoding it.
///
/// `None` if the record has fewer than four tokens or the name token does
/// not render as a non-empty string.
pub fn peek_name(element: &Element) -> Option<String> {
    let tokens = element.tokens();
    if tokens.len() < FIRST_VALUE_TOKEN {
        return None;
    }
    tokens[0].parse_string().ok().filter(|name| !name.is_empty())
}

fn check_token_count(tokens: &[Token], kind: PropertyKind, tag: &str) -> Result<()> {
    if tokens.len() < kind.min_tokens() {
        return Err(Error::InsufficientTokens {
            declared_type: tag.to_string(),
            location: tokens[1].location(),
        });
    }
    Ok(())
}

fn read_floats<const N: usize>(values: &[Token]) -> Result<[f32; N]> {
    let mut out = [0.0f32; N];
    for (slot, token) in out.iter_mut().zip(values) {
        *slot = token.parse_float()?;
    }
    Ok(out)
}
