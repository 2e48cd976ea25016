//! Canonical byte encoding.
//!
//! The bytes a node hashes and verifies are defined by an ordered field list
//! per transaction type. Each variant declares that list as a static
//! [`FieldSpec`] table next to its struct; [`encode`] walks the table and
//! appends each field in turn. Nothing else goes in: no separators, no
//! version byte, no timestamp of our own.
//!
//! Reordering a table changes every signature and id produced from it.
//! The node will not be sympathetic.
//!
//! ## Encoding rules
//!
//! | Kind | Bytes |
//! |---|---|
//! | Integer (8/16/32/64-bit) | big-endian, fixed width |
//! | `Text(Base58Fixed)` | decoded Base58, no prefix |
//! | `Text(Base58LengthPrefixed)` | `u16` big-endian length, then decoded Base58 |
//! | `Text(RawUtf8)` | UTF-8, no prefix |

use tracing::trace;

use crate::error::SerializationError;

/// How a text field becomes bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    RawUtf8,
    Base58Fixed,
    Base58LengthPrefixed,
}

/// The declared semantic type of a schema entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Text(TextEncoding),
}

/// A field's current value as read off a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Text(&'a str),
}

/// One entry of a canonical schema: a name for error messages, how to
/// encode it, and how to read it from the record.
///
/// `read` returns `None` when the record has no value for the field.
pub struct FieldSpec<T> {
    pub name: &'static str,
    pub kind: FieldKind,
    pub read: fn(&T) -> Option<FieldValue<'_>>,
}

/// Records that have a canonical byte form.
pub trait BytesSerializable {
    /// The canonical bytes: what gets signed and what the id is hashed from.
    fn to_bytes(&self) -> Result<Vec<u8>, SerializationError>;
}

/// Length-prefix width for [`TextEncoding::Base58LengthPrefixed`].
const LENGTH_PREFIX_MAX: usize = u16::MAX as usize;

/// Encodes `record` by walking `schema` in order.
pub fn encode<T>(record: &T, schema: &[FieldSpec<T>]) -> Result<Vec<u8>, SerializationError> {
    let mut buf = Vec::with_capacity(128);
    for field in schema {
        let value = (field.read)(record).ok_or(SerializationError::MissingValue {
            field: field.name,
        })?;
        encode_field(&mut buf, field.name, field.kind, value)?;
    }
    trace!(fields = schema.len(), len = buf.len(), "encoded canonical bytes");
    Ok(buf)
}

fn encode_field(
    buf: &mut Vec<u8>,
    name: &'static str,
    kind: FieldKind,
    value: FieldValue<'_>,
) -> Result<(), SerializationError> {
    match (kind, value) {
        (FieldKind::Integer, FieldValue::I8(v)) => buf.extend_from_slice(&v.to_be_bytes()),
        (FieldKind::Integer, FieldValue::I16(v)) => buf.extend_from_slice(&v.to_be_bytes()),
        (FieldKind::Integer, FieldValue::I32(v)) => buf.extend_from_slice(&v.to_be_bytes()),
        (FieldKind::Integer, FieldValue::I64(v)) => buf.extend_from_slice(&v.to_be_bytes()),
        (FieldKind::Integer, FieldValue::U8(v)) => buf.push(v),
        (FieldKind::Integer, FieldValue::U16(v)) => buf.extend_from_slice(&v.to_be_bytes()),
        (FieldKind::Integer, FieldValue::U32(v)) => buf.extend_from_slice(&v.to_be_bytes()),
        (FieldKind::Integer, FieldValue::U64(v)) => buf.extend_from_slice(&v.to_be_bytes()),
        (FieldKind::Text(TextEncoding::RawUtf8), FieldValue::Text(s)) => {
            buf.extend_from_slice(s.as_bytes())
        }
        (FieldKind::Text(TextEncoding::Base58Fixed), FieldValue::Text(s)) => {
            buf.extend_from_slice(&decode_base58(name, s)?)
        }
        (FieldKind::Text(TextEncoding::Base58LengthPrefixed), FieldValue::Text(s)) => {
            let bytes = decode_base58(name, s)?;
            if bytes.len() > LENGTH_PREFIX_MAX {
                return Err(SerializationError::FieldTooLong {
                    field: name,
                    len: bytes.len(),
                    max: LENGTH_PREFIX_MAX,
                });
            }
            buf.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
            buf.extend_from_slice(&bytes);
        }
        _ => return Err(SerializationError::UnsupportedValue { field: name }),
    }
    Ok(())
}

fn decode_base58(name: &'static str, s: &str) -> Result<Vec<u8>, SerializationError> {
    bs58::decode(s)
        .into_vec()
        .map_err(|e| SerializationError::InvalidBase58 {
            field: name,
            reason: e.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
