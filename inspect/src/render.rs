//! Plain-text rendering of decoded transactions.
//!
//! JSON output comes straight from the library's `Serialize` impls. This is
//! the other format: indented `name: value` lines meant for a terminal.

use catbuf_protocol::schema::{Record, Value};
use catbuf_protocol::{EmbeddedTransaction, Transaction, TransactionBody};

const INDENT: &str = "  ";

pub fn transaction(tx: &Transaction) -> String {
    let mut lines = vec![
        format!("{} ({}), {} bytes", tx.body().name(), tx.entity_type(), tx.size()),
        field(1, "signature", tx.signature().to_hex()),
        field(1, "signer_public_key", tx.signer_public_key().to_hex()),
        field(1, "version", tx.version()),
        field(1, "network", tx.network()),
        field(1, "fee", tx.fee().0),
        field(1, "deadline", tx.deadline().0),
    ];
    body(&mut lines, 1, tx.body());
    lines.join("\n")
}

pub fn embedded(tx: &EmbeddedTransaction) -> String {
    let mut lines = Vec::new();
    embedded_into(&mut lines, 0, tx);
    lines.join("\n")
}

pub fn bare_body(value: &TransactionBody) -> String {
    let mut lines = vec![format!("{} ({}) body, {} bytes", value.name(), value.entity_type(), value.size())];
    body(&mut lines, 1, value);
    lines.join("\n")
}

fn embedded_into(lines: &mut Vec<String>, depth: usize, tx: &EmbeddedTransaction) {
    lines.push(format!(
        "{}{} ({}), {} bytes, embedded",
        INDENT.repeat(depth),
        tx.body().name(),
        tx.entity_type(),
        tx.size()
    ));
    lines.push(field(depth + 1, "signer_public_key", tx.signer_public_key().to_hex()));
    lines.push(field(depth + 1, "version", tx.version()));
    lines.push(field(depth + 1, "network", tx.network()));
    body(lines, depth + 1, tx.body());
}

fn body(lines: &mut Vec<String>, depth: usize, body: &TransactionBody) {
    record(lines, depth, &body.to_record());
}

fn record(lines: &mut Vec<String>, depth: usize, record: &Record) {
    for (name, value) in record.iter() {
        match value {
            Value::Array(items) => {
                lines.push(field(depth, name, format!("{} item(s)", items.len())));
                for item in items {
                    let inline: Vec<String> = item.iter().map(|(n, v)| format!("{}={}", n, scalar(v))).collect();
                    lines.push(format!("{}- {}", INDENT.repeat(depth + 1), inline.join(", ")));
                }
            }
            Value::Embedded(transactions) => {
                lines.push(field(depth, name, format!("{} transaction(s)", transactions.len())));
                for tx in transactions {
                    embedded_into(lines, depth + 1, tx);
                }
            }
            other => lines.push(field(depth, name, scalar(other))),
        }
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Int(v) => v.to_string(),
        Value::Fixed(bytes) => hex::encode(bytes),
        Value::Bytes(bytes) if !bytes.is_empty() && bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') => {
            format!("{} ({:?})", hex::encode(bytes), String::from_utf8_lossy(bytes))
        }
        Value::Bytes(bytes) => hex::encode(bytes),
        Value::Array(items) => format!("[{} item(s)]", items.len()),
        Value::Embedded(transactions) => format!("[{} transaction(s)]", transactions.len()),
    }
}

fn field(depth: usize, name: &str, value: impl std::fmt::Display) -> String {
    format!("{}{}: {}", INDENT.repeat(depth), name, value)
}
