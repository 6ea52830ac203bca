//! The generic layout interpreter.
//!
//! Three walks over a layout, all strictly in declaration order:
//!
//! - [`size`] sums each field's encoded size from the record alone, without
//!   producing any bytes;
//! - [`encode`] writes each field, deriving every count and size prefix from
//!   the collection it describes;
//! - [`decode`] reads each field, using previously decoded count and size
//!   fields to bound the variable ones.
//!
//! Count and size fields are never taken from the record on encode. A
//! decoded record still contains them (later fields need them); typed bodies
//! ignore them and generic bodies drop them with [`strip_prefixes`].

use tracing::debug;

use super::field::{FieldKind, FieldSpec, UnionArm};
use super::value::{Record, Value};
use crate::config::ReservedPolicy;
use crate::error::{CodecError, CodecResult};
use crate::io::{IntWidth, Reader, Writer};
use crate::registry::DecodeContext;
use crate::transaction::aggregate;

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// Encoded size of `record` under `layout`.
///
/// Missing variable fields count as empty; [`encode`] is what rejects them.
pub fn size(layout: &[FieldSpec], record: &Record) -> usize {
    layout.iter().map(|spec| field_size(spec, record)).sum()
}

fn field_size(spec: &FieldSpec, record: &Record) -> usize {
    if let Some(n) = spec.fixed_size() {
        return n;
    }
    match (&spec.kind, record.get(spec.name)) {
        (FieldKind::Buffer { .. }, Some(Value::Bytes(bytes))) => bytes.len(),
        (FieldKind::Array { element, .. }, Some(Value::Array(items)))
        | (FieldKind::TrailingArray { element }, Some(Value::Array(items))) => {
            items.iter().map(|item| size(element, item)).sum()
        }
        (FieldKind::Embedded { .. }, Some(Value::Embedded(txs))) => txs.iter().map(|tx| tx.size()).sum(),
        _ => 0,
    }
}

// ---------------------------------------------------------------------------
// Encode
// ---------------------------------------------------------------------------

/// Writes `record` under `layout`.
///
/// # Errors
///
/// - [`CodecError::LengthOverflow`] when a collection is too long for the
///   width of its count or size field.
/// - [`CodecError::SchemaMismatch`] when the record is missing a field or a
///   value has the wrong shape.
/// - [`CodecError::InvalidConditionalFields`] when a union has zero or
///   several arms present.
pub fn encode(layout: &[FieldSpec], record: &Record, writer: &mut Writer) -> CodecResult<()> {
    for spec in layout {
        match spec.kind {
            FieldKind::Int(width) => {
                let value = expect_int(record, spec.name)?;
                check_width(spec.name, value, width)?;
                writer.write_uint(width, value);
            }
            FieldKind::Fixed(len) => match record.get(spec.name) {
                Some(Value::Fixed(bytes)) if bytes.len() == len => writer.write_bytes(bytes),
                Some(_) => return Err(mismatch(spec.name, "expected fixed-width bytes of the declared length")),
                None => return Err(missing(spec.name)),
            },
            FieldKind::Reserved(width) => writer.write_zeros(width.bytes()),
            FieldKind::Count { target, width } => {
                let len = collection_len(record, target)?;
                write_prefix(writer, target, len, width)?;
            }
            FieldKind::ByteSize { target, width } => {
                let target_spec = layout
                    .iter()
                    .find(|s| s.name == target)
                    .ok_or_else(|| mismatch(spec.name, "size field names no field in this layout"))?;
                let len = field_size(target_spec, record);
                write_prefix(writer, target, len, width)?;
            }
            FieldKind::Buffer { .. } => match record.get(spec.name) {
                Some(Value::Bytes(bytes)) => writer.write_bytes(bytes),
                Some(_) => return Err(mismatch(spec.name, "expected a byte buffer")),
                None => return Err(missing(spec.name)),
            },
            FieldKind::Array { element, .. } | FieldKind::TrailingArray { element } => {
                match record.get(spec.name) {
                    Some(Value::Array(items)) => {
                        for item in items {
                            encode(element, item, writer)?;
                        }
                    }
                    Some(_) => return Err(mismatch(spec.name, "expected an array")),
                    None => return Err(missing(spec.name)),
                }
            }
            FieldKind::Embedded { .. } => match record.get(spec.name) {
                Some(Value::Embedded(txs)) => {
                    for tx in txs {
                        tx.write(writer)?;
                    }
                }
                Some(_) => return Err(mismatch(spec.name, "expected embedded transactions")),
                None => return Err(missing(spec.name)),
            },
            FieldKind::Union { selector, width, arms } => {
                let arm = present_arm(record, arms)?;
                if let Some(selected) = record.int(selector) {
                    if selected != arm.selector_value {
                        return Err(mismatch(selector, "selector disagrees with the populated union arm"));
                    }
                }
                let value = expect_int(record, arm.name)?;
                check_width(arm.name, value, width)?;
                writer.write_uint(width, value);
            }
        }
    }
    Ok(())
}

fn write_prefix(writer: &mut Writer, target: &'static str, len: usize, width: IntWidth) -> CodecResult<()> {
    let max = width.max_value();
    if len as u64 > max {
        return Err(CodecError::LengthOverflow { field: target, len, max });
    }
    writer.write_uint(width, len as u64);
    Ok(())
}

fn check_width(field: &'static str, value: u64, width: IntWidth) -> CodecResult<()> {
    if value > width.max_value() {
        return Err(mismatch(field, "integer exceeds field width"));
    }
    Ok(())
}

fn collection_len(record: &Record, target: &'static str) -> CodecResult<usize> {
    match record.get(target) {
        Some(Value::Array(items)) => Ok(items.len()),
        Some(Value::Embedded(txs)) => Ok(txs.len()),
        Some(Value::Bytes(bytes)) => Ok(bytes.len()),
        Some(_) => Err(mismatch(target, "count target is not a collection")),
        None => Err(missing(target)),
    }
}

fn expect_int(record: &Record, field: &'static str) -> CodecResult<u64> {
    match record.get(field) {
        Some(Value::Int(v)) => Ok(*v),
        Some(_) => Err(mismatch(field, "expected an integer")),
        None => Err(missing(field)),
    }
}

fn present_arm(record: &Record, arms: &'static [UnionArm]) -> CodecResult<&'static UnionArm> {
    let mut present = arms.iter().filter(|arm| record.contains(arm.name));
    match (present.next(), present.next()) {
        (Some(arm), None) => Ok(arm),
        _ => Err(CodecError::InvalidConditionalFields {
            field_a: arms.first().map_or("", |a| a.name),
            field_b: arms.get(1).map_or("", |a| a.name),
        }),
    }
}

// ---------------------------------------------------------------------------
// Decode
// ---------------------------------------------------------------------------

/// Reads one structure laid out by `layout` from the front of `reader`.
///
/// # Errors
///
/// - [`CodecError::Truncated`] when any field runs past the input.
/// - [`CodecError::NonZeroReserved`] under [`ReservedPolicy::RequireZero`].
/// - [`CodecError::InvalidEnumValue`] when a union selector matches no arm.
/// - Anything the aggregate layer raises for an `Embedded` field.
pub fn decode(layout: &[FieldSpec], reader: &mut Reader<'_>, ctx: &DecodeContext<'_>) -> CodecResult<Record> {
    let mut record = Record::new();
    let mut unions: Vec<(&FieldSpec, u64)> = Vec::new();

    for spec in layout {
        match spec.kind {
            FieldKind::Int(width) | FieldKind::Count { width, .. } | FieldKind::ByteSize { width, .. } => {
                let value = reader.read_uint(spec.name, width)?;
                record.insert(spec.name, Value::Int(value));
            }
            FieldKind::Fixed(len) => {
                record.insert(spec.name, Value::Fixed(reader.read_bytes(spec.name, len)?));
            }
            FieldKind::Reserved(width) => {
                let value = reader.read_uint(spec.name, width)?;
                if value != 0 {
                    match ctx.config.reserved_policy {
                        ReservedPolicy::RequireZero => {
                            return Err(CodecError::NonZeroReserved { field: spec.name, value });
                        }
                        ReservedPolicy::Ignore => {
                            debug!(field = spec.name, value, "ignoring non-zero reserved field");
                        }
                    }
                }
            }
            FieldKind::Buffer { size } => {
                let len = prefix_value(&record, size)?;
                record.insert(spec.name, Value::Bytes(reader.read_bytes(spec.name, len)?));
            }
            FieldKind::Array { count, element } => {
                let count = prefix_value(&record, count)?;
                // Never trust a count for the allocation size.
                let mut items = Vec::with_capacity(count.min(reader.remaining()));
                for _ in 0..count {
                    items.push(decode(element, reader, ctx)?);
                }
                record.insert(spec.name, Value::Array(items));
            }
            FieldKind::TrailingArray { element } => {
                let mut items = Vec::new();
                while !reader.is_empty() {
                    items.push(decode(element, reader, ctx)?);
                }
                record.insert(spec.name, Value::Array(items));
            }
            FieldKind::Embedded { size } => {
                let payload_size = prefix_value(&record, size)?;
                let txs = aggregate::decode_embedded_block(reader, payload_size, ctx)?;
                record.insert(spec.name, Value::Embedded(txs));
            }
            FieldKind::Union { width, .. } => {
                let raw = reader.read_uint(spec.name, width)?;
                unions.push((spec, raw));
            }
        }
    }

    // Union selectors may follow the slot they select, so resolve last.
    for (spec, raw) in unions {
        if let FieldKind::Union { selector, arms, .. } = spec.kind {
            let selected = record
                .int(selector)
                .ok_or_else(|| mismatch(selector, "union selector is not an integer field of this layout"))?;
            let arm = arms
                .iter()
                .find(|arm| arm.selector_value == selected)
                .ok_or(CodecError::InvalidEnumValue {
                    field: selector,
                    value: selected,
                })?;
            record.insert(arm.name, Value::Int(raw));
        }
    }

    Ok(record)
}

/// Removes every count and size field from `record`, inside array elements
/// too. The result encodes to the same bytes.
pub fn strip_prefixes(layout: &[FieldSpec], mut record: Record) -> Record {
    for spec in layout {
        match spec.kind {
            FieldKind::Count { .. } | FieldKind::ByteSize { .. } => {
                record.remove(spec.name);
            }
            FieldKind::Array { element, .. } | FieldKind::TrailingArray { element } => {
                if let Some(Value::Array(items)) = record.get_mut(spec.name) {
                    let stripped = std::mem::take(items)
                        .into_iter()
                        .map(|item| strip_prefixes(element, item))
                        .collect();
                    *items = stripped;
                }
            }
            _ => {}
        }
    }
    record
}

fn prefix_value(record: &Record, field: &'static str) -> CodecResult<usize> {
    record
        .int(field)
        .map(|v| v as usize)
        .ok_or_else(|| mismatch(field, "count or size field must precede the field it describes"))
}

fn mismatch(field: &'static str, reason: &'static str) -> CodecError {
    CodecError::SchemaMismatch { field, reason }
}

fn missing(field: &'static str) -> CodecError {
    mismatch(field, "field is missing from the record")
}
