// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # catbuf Inspector
//!
//! Entry point for the `catbuf-inspect` binary. Parses CLI arguments,
//! initializes logging, and runs one subcommand against the standard
//! transaction registry.
//!
//! - `decode`  — hex payload to JSON or text
//! - `layout`  — field table of a kind
//! - `kinds`   — every registered kind
//! - `sample`  — deterministic sample payload as hex
//! - `version` — print build version information

mod cli;
mod logging;
mod render;
mod sample;

use std::io::Read;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use catbuf_protocol::envelope::{EMBEDDED_HEADER_LAYOUT, TRANSACTION_HEADER_LAYOUT};
use catbuf_protocol::io::Reader;
use catbuf_protocol::schema::{fixed_layout_size, FieldSpec};
use catbuf_protocol::{
    CodecConfig, DecodeContext, EmbeddedTransaction, Registry, RegistryEntry, Transaction, TransactionBody,
};

use cli::{Commands, DecodeArgs, InspectCli, KindsArgs, LayoutArgs, OutputFormat, SampleArgs};

fn main() -> Result<()> {
    let cli = InspectCli::parse();
    logging::init_logging("catbuf_inspect=info,catbuf_protocol=warn", cli.log_format);

    match cli.command {
        Commands::Decode(args) => decode(args),
        Commands::Layout(args) => layout(args),
        Commands::Kinds(args) => kinds(args),
        Commands::Sample(args) => sample(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

fn find_kind(name: &str) -> Result<&'static RegistryEntry> {
    Registry::standard()
        .find_by_name(name)
        .ok_or_else(|| anyhow!("unknown transaction kind `{}` (see `catbuf-inspect kinds`)", name))
}

// ---------------------------------------------------------------------------
// decode
// ---------------------------------------------------------------------------

/// Reads the payload from the argument, the file, or stdin, in that order.
fn read_payload(args: &DecodeArgs) -> Result<Vec<u8>> {
    let text = match (&args.payload, &args.file) {
        (Some(payload), _) => payload.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read payload from {}", path.display()))?,
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read payload from stdin")?;
            buf
        }
    };
    parse_hex(&text)
}

fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.split_whitespace().collect();
    let digits = compact
        .strip_prefix("0x")
        .or_else(|| compact.strip_prefix("0X"))
        .unwrap_or(&compact);
    if digits.is_empty() {
        bail!("empty payload");
    }
    hex::decode(digits).context("payload is not valid hex")
}

/// What `decode` produced, kept typed until it is printed.
enum Decoded {
    Standalone(Transaction),
    Embedded(EmbeddedTransaction),
    Body(TransactionBody),
}

fn decode(args: DecodeArgs) -> Result<()> {
    let bytes = read_payload(&args)?;
    let config = if args.strict_reserved {
        CodecConfig::strict()
    } else {
        CodecConfig::default()
    };
    let ctx = DecodeContext::with_config(config);
    let mut reader = Reader::new(&bytes);

    let decoded = if let Some(kind) = &args.body {
        let entry = find_kind(kind)?;
        let body = TransactionBody::read(entry.entity_type(), &mut reader, &ctx)
            .with_context(|| format!("failed to decode {} body", entry.name()))?;
        Decoded::Body(body)
    } else if args.embedded {
        let tx = EmbeddedTransaction::read(&mut reader, &ctx).context("failed to decode embedded transaction")?;
        Decoded::Embedded(tx)
    } else {
        let tx = Transaction::read(&mut reader, &ctx).context("failed to decode transaction")?;
        Decoded::Standalone(tx)
    };

    if args.allow_trailing {
        if !reader.is_empty() {
            tracing::warn!(trailing = reader.remaining(), "ignoring bytes after the decoded structure");
        }
    } else {
        reader.finish().context("payload has bytes after the decoded structure")?;
    }
    tracing::info!(consumed = reader.position(), total = bytes.len(), "payload decoded");

    let output = match (args.output, &decoded) {
        (OutputFormat::Json, Decoded::Standalone(tx)) => serde_json::to_string_pretty(tx)?,
        (OutputFormat::Json, Decoded::Embedded(tx)) => serde_json::to_string_pretty(tx)?,
        (OutputFormat::Json, Decoded::Body(body)) => serde_json::to_string_pretty(body)?,
        (OutputFormat::Text, Decoded::Standalone(tx)) => render::transaction(tx),
        (OutputFormat::Text, Decoded::Embedded(tx)) => render::embedded(tx),
        (OutputFormat::Text, Decoded::Body(body)) => render::bare_body(body),
    };
    println!("{}", output);
    Ok(())
}

// ---------------------------------------------------------------------------
// layout / kinds
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct LayoutRow {
    name: &'static str,
    kind: String,
    size: Option<usize>,
    header: bool,
}

fn layout_rows(layout: &[FieldSpec], header: bool) -> impl Iterator<Item = LayoutRow> + '_ {
    layout.iter().map(move |spec| LayoutRow {
        name: spec.name,
        kind: spec.kind.to_string(),
        size: spec.fixed_size(),
        header,
    })
}

fn layout(args: LayoutArgs) -> Result<()> {
    let entry = find_kind(&args.kind)?;
    if args.with_header && args.embedded && !entry.embeddable() {
        bail!("{} cannot be embedded", entry.name());
    }

    let header: &[FieldSpec] = match (args.with_header, args.embedded) {
        (false, _) => &[],
        (true, false) => TRANSACTION_HEADER_LAYOUT,
        (true, true) => EMBEDDED_HEADER_LAYOUT,
    };
    let rows: Vec<LayoutRow> = layout_rows(header, true)
        .chain(layout_rows(entry.layout(), false))
        .collect();

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Text => {
            println!("{} ({}), version {}", entry.name(), entry.entity_type(), entry.version());
            let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);
            let mut offset = Some(0usize);
            for row in &rows {
                let at = offset.map_or_else(|| "?".to_string(), |o| o.to_string());
                println!("  {:>5}  {:<width$}  {}", at, row.name, row.kind, width = width);
                offset = offset.zip(row.size).map(|(o, s)| o + s);
            }
            match fixed_layout_size(entry.layout()) {
                Some(size) => println!("  body size: {} bytes", size),
                None => println!("  body size: variable"),
            }
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct KindRow {
    name: &'static str,
    entity_type: String,
    version: u8,
    embeddable: bool,
}

fn kinds(args: KindsArgs) -> Result<()> {
    let rows: Vec<KindRow> = Registry::standard()
        .entries()
        .map(|entry| KindRow {
            name: entry.name(),
            entity_type: entry.entity_type().to_string(),
            version: entry.version(),
            embeddable: entry.embeddable(),
        })
        .collect();

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Text => {
            for row in &rows {
                println!(
                    "{}  v{}  {:<32} {}",
                    row.entity_type,
                    row.version,
                    row.name,
                    if row.embeddable { "" } else { "(standalone only)" }
                );
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// sample / version
// ---------------------------------------------------------------------------

fn sample(args: SampleArgs) -> Result<()> {
    let entry = find_kind(&args.kind)?;
    let bytes = sample::sample_bytes(entry.entity_type(), args.embedded)
        .with_context(|| format!("failed to encode a {} sample", entry.name()))?;
    tracing::info!(kind = entry.name(), size = bytes.len(), "sample encoded");
    println!("{}", hex::encode_upper(bytes));
    Ok(())
}

fn print_version() {
    println!("catbuf-inspect {}", env!("CARGO_PKG_VERSION"));
    println!("kinds           {}", Registry::standard().len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_accepts_prefix_and_whitespace() {
        assert_eq!(parse_hex("0x01 02\n0A").unwrap(), vec![1, 2, 10]);
        assert_eq!(parse_hex("ff").unwrap(), vec![0xFF]);
    }

    #[test]
    fn hex_rejects_garbage() {
        assert!(parse_hex("").is_err());
        assert!(parse_hex("0x").is_err());
        assert!(parse_hex("xyz").is_err());
        assert!(parse_hex("abc").is_err());
    }

    #[test]
    fn kind_lookup_ignores_case() {
        assert_eq!(find_kind("TRANSFER").unwrap().name(), "transfer");
        assert!(find_kind("teleport").is_err());
    }

    #[test]
    fn header_rows_come_first() {
        let rows: Vec<LayoutRow> = layout_rows(EMBEDDED_HEADER_LAYOUT, true)
            .chain(layout_rows(find_kind("transfer").unwrap().layout(), false))
            .collect();
        assert_eq!(rows[0].name, "size");
        assert!(rows[0].header);
        let first_body = rows.iter().position(|r| !r.header).unwrap();
        assert_eq!(rows[first_body].name, "recipient_address");
    }
}
