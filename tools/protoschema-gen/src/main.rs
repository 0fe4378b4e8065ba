// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! protoschema-gen CLI
//!
//! # Usage
//!
//! ```bash
//! # Field table for every message
//! protoschema-gen resolve --manifest types.toml
//!
//! # One message as JSON
//! protoschema-gen resolve --manifest types.toml --type shop::Item --format json
//!
//! # Write a .proto file
//! protoschema-gen proto --manifest types.toml --package shop --output shop.proto
//!
//! # Check every message resolves
//! protoschema-gen validate --manifest types.toml
//! ```

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use protoschema_gen::{OutputFormat, DEFAULT_LOG_LEVEL};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Protobuf schema resolution tool
#[derive(Parser, Debug)]
#[command(name = "protoschema-gen")]
#[command(about = "Resolve, validate and render protobuf schemas from a TOML manifest")]
#[command(version)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = DEFAULT_LOG_LEVEL, global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the resolved field layout
    Resolve {
        /// Manifest file path
        #[arg(short, long)]
        manifest: PathBuf,

        /// Only this message
        #[arg(short = 't', long = "type")]
        type_name: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Render a proto2 file
    Proto {
        /// Manifest file path
        #[arg(short, long)]
        manifest: PathBuf,

        /// Package declaration
        #[arg(short, long)]
        package: Option<String>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that every message resolves
    Validate {
        /// Manifest file path
        #[arg(short, long)]
        manifest: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_level)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Commands::Resolve {
            manifest,
            type_name,
            format,
        } => cmd_resolve(manifest, type_name.as_deref(), format),
        Commands::Proto {
            manifest,
            package,
            output,
        } => cmd_proto(manifest, package.as_deref(), output),
        Commands::Validate { manifest } => cmd_validate(manifest),
    }
}

fn cmd_resolve(path: PathBuf, type_name: Option<&str>, format: OutputFormat) -> Result<()> {
    let manifest = protoschema_gen::load_manifest(&path)?;
    let schemas = protoschema_gen::resolve(&manifest, type_name)?;
    match format {
        OutputFormat::Table => print!("{}", protoschema_gen::render_table(&schemas)),
        OutputFormat::Json => println!("{}", protoschema_gen::render_json(&schemas)?),
    }
    Ok(())
}

fn cmd_proto(path: PathBuf, package: Option<&str>, output: Option<PathBuf>) -> Result<()> {
    let manifest = protoschema_gen::load_manifest(&path)?;
    let text = protoschema_gen::render_proto(&manifest, package)?;
    match output {
        Some(output) => {
            std::fs::write(&output, text)?;
            tracing::info!("wrote {}", output.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn cmd_validate(path: PathBuf) -> Result<()> {
    println!("Validating manifest: {}", path.display());
    let manifest = protoschema_gen::load_manifest(&path)?;

    let entries = protoschema_gen::validate(&manifest)?;
    let mut failures = 0usize;
    for entry in &entries {
        match &entry.outcome {
            Ok(fields) => println!("  [OK]    {} ({fields} field(s))", entry.message),
            Err(e) => {
                failures += 1;
                println!("  [ERROR] {}: {e}", entry.message);
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} message(s) failed to resolve", entries.len());
    }
    println!("Manifest is valid ({} message(s))", entries.len());
    Ok(())
}
