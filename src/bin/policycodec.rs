// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Policycodec CLI
//!
//! Command-line tool for transcoding policy configuration messages.
//!
//! ## Usage
//!
//! ```sh
//! # Binary wire file to JSON on stdout
//! policycodec decode Handler handler.bin
//!
//! # JSON file to binary wire format
//! policycodec encode Instance instance.json -o instance.bin
//!
//! # Registry contents
//! policycodec schema list
//! policycodec schema show AttributeManifest
//! ```

use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use policycodec::schema::FieldKind;
use policycodec::{decode_json, decode_with, DecodeOptions, MessageKind, SchemaRegistry};

/// Policycodec - policy configuration transcoding toolkit
///
/// Converts configuration messages between the binary wire format and
/// their human-authored JSON form.
#[derive(Parser, Clone)]
#[command(name = "policycodec")]
#[command(about = "Policy configuration codec for binary and JSON forms", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Decode a binary wire file to JSON
    Decode {
        /// Message kind (short or full name, e.g. Handler)
        kind: String,

        /// Input file containing wire bytes
        file: PathBuf,

        /// Reject wire-level duplicate map keys
        #[arg(long)]
        strict: bool,

        /// Emit compact instead of pretty-printed JSON
        #[arg(long)]
        compact: bool,
    },

    /// Encode a JSON file to the binary wire format
    Encode {
        /// Message kind (short or full name, e.g. Instance)
        kind: String,

        /// Input file containing the JSON form
        file: PathBuf,

        /// Output file for wire bytes; hex on stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Schema registry operations
    #[command(subcommand)]
    Schema(SchemaCmd),
}

/// Schema registry inspection
#[derive(Subcommand, Clone)]
enum SchemaCmd {
    /// List all registered message names
    List,

    /// Show the fields of one message shape
    Show {
        /// Message name (short or full)
        name: String,
    },
}

fn parse_kind(name: &str) -> Result<MessageKind> {
    name.parse::<MessageKind>()
        .with_context(|| format!("unknown message kind '{name}'"))
}

fn run_decode(kind: &str, file: &PathBuf, strict: bool, compact: bool) -> Result<()> {
    let kind = parse_kind(kind)?;
    let data = fs::read(file).with_context(|| format!("reading {}", file.display()))?;

    let opts = if strict {
        DecodeOptions::strict()
    } else {
        DecodeOptions::default()
    };
    let message = decode_with(kind, &data, &opts)
        .with_context(|| format!("decoding {} as {kind}", file.display()))?;

    let json = if compact {
        message.to_json()?
    } else {
        message.to_json_pretty()?
    };
    println!("{json}");
    Ok(())
}

fn run_encode(kind: &str, file: &PathBuf, output: Option<&PathBuf>) -> Result<()> {
    let kind = parse_kind(kind)?;
    let json = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;

    let message =
        decode_json(kind, &json).with_context(|| format!("parsing {} as {kind}", file.display()))?;
    let bytes = message.encode_to_vec();

    match output {
        Some(path) => {
            fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
            eprintln!("wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
            println!("{hex}");
        }
    }
    Ok(())
}

fn run_schema(cmd: &SchemaCmd) -> Result<()> {
    let registry = SchemaRegistry::global();
    match cmd {
        SchemaCmd::List => {
            for name in registry.full_names() {
                println!("{name}");
            }
        }
        SchemaCmd::Show { name } => {
            let desc = registry
                .get(name)
                .with_context(|| format!("unknown message name '{name}'"))?;
            println!("{}", desc.full_name);
            for field in desc.fields {
                let kind = match field.kind {
                    FieldKind::String => "string".to_string(),
                    FieldKind::Enum => "enum".to_string(),
                    FieldKind::Struct => "struct".to_string(),
                    FieldKind::Message(name) => name.to_string(),
                    FieldKind::Map(name) => format!("map<string, {name}>"),
                };
                let label = if field.repeated { "repeated " } else { "" };
                println!("  {} = {}: {label}{kind}", field.name, field.number);
            }
        }
    }
    Ok(())
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Decode {
            kind,
            file,
            strict,
            compact,
        } => run_decode(kind, file, *strict, *compact),
        Commands::Encode { kind, file, output } => run_encode(kind, file, output.as_ref()),
        Commands::Schema(cmd) => run_schema(cmd),
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
