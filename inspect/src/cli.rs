//! # CLI Interface
//!
//! Defines the command-line argument structure for `catbuf-inspect` using
//! `clap` derive. Five subcommands: `decode`, `layout`, `kinds`, `sample`
//! and `version`.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Inspector for catbuf transaction payloads.
///
/// Decodes hex payloads into readable form, prints the wire layout of any
/// registered transaction kind, and generates deterministic sample payloads
/// for test fixtures.
#[derive(Parser, Debug)]
#[command(
    name = "catbuf-inspect",
    about = "Decode and describe catbuf transaction payloads",
    version,
    propagate_version = true
)]
pub struct InspectCli {
    /// Log output format. Logs always go to stderr.
    #[arg(long, global = true, env = "CATBUF_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a hex payload.
    Decode(DecodeArgs),
    /// Print the field layout of a transaction kind.
    Layout(LayoutArgs),
    /// List every registered transaction kind.
    Kinds(KindsArgs),
    /// Encode a deterministic sample transaction of a kind.
    Sample(SampleArgs),
    /// Print version information and exit.
    Version,
}

/// How decoded data is printed.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Hex payload, with or without a `0x` prefix. Read from `--file` or
    /// stdin when omitted.
    pub payload: Option<String>,

    /// Read the hex payload from a file.
    #[arg(long, short = 'f', conflicts_with = "payload")]
    pub file: Option<PathBuf>,

    /// Decode an embedded transaction (no signature, fee or deadline).
    #[arg(long, conflicts_with = "body")]
    pub embedded: bool,

    /// Decode a bare body of the named kind, without any envelope.
    #[arg(long, value_name = "KIND")]
    pub body: Option<String>,

    /// Reject non-zero reserved padding.
    #[arg(long, env = "CATBUF_STRICT_RESERVED")]
    pub strict_reserved: bool,

    /// Accept bytes left over after the decoded structure.
    #[arg(long)]
    pub allow_trailing: bool,

    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,
}

#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// Kind name, as listed by `kinds`.
    pub kind: String,

    /// Include the envelope header fields before the body.
    #[arg(long)]
    pub with_header: bool,

    /// Use the embedded header with `--with-header`.
    #[arg(long, requires = "with_header")]
    pub embedded: bool,

    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(Args, Debug)]
pub struct KindsArgs {
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Kind name, as listed by `kinds`.
    pub kind: String,

    /// Wrap the body in an embedded envelope instead of a standalone one.
    #[arg(long)]
    pub embedded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        InspectCli::command().debug_assert();
    }

    #[test]
    fn decode_defaults_to_json() {
        let cli = InspectCli::parse_from(["catbuf-inspect", "decode", "0x00"]);
        match cli.command {
            Commands::Decode(args) => {
                assert_eq!(args.payload.as_deref(), Some("0x00"));
                assert_eq!(args.output, OutputFormat::Json);
                assert!(!args.embedded);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn embedded_and_body_conflict() {
        let result = InspectCli::try_parse_from(["catbuf-inspect", "decode", "--embedded", "--body", "transfer", "00"]);
        assert!(result.is_err());
    }
}
