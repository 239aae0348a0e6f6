//! `sprig` CLI — format, diff, patch, and convert sprig documents.
//!
//! ## Usage
//!
//! ```sh
//! # Canonicalize a document (stdin → stdout)
//! cat notes.sprig | sprig fmt
//!
//! # Structural diff of two documents
//! sprig diff -a old.sprig -b new.sprig
//!
//! # Order-only diff
//! sprig diff -a old.sprig -b new.sprig --order
//!
//! # Apply a diff
//! sprig patch -i old.sprig -d changes.sprig -o patched.sprig
//!
//! # JSON bridge
//! echo '{"name":"Alice","age":30}' | sprig from-json
//! sprig to-json -i data.sprig
//!
//! # Document statistics
//! sprig stats -i data.sprig
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sprig_core::{shape_index, Node, Value};
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "sprig", version, about = "sprig tree notation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and re-serialize it in canonical form
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Emit the diff that transforms document A into document B
    Diff {
        /// The source document
        #[arg(short = 'a', long)]
        from: String,
        /// The target document
        #[arg(short = 'b', long)]
        to: String,
        /// Diff entry ordering instead of content
        #[arg(long)]
        order: bool,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Apply a diff to a document
    Patch {
        /// The document to patch (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// The diff to apply
        #[arg(short, long)]
        diff: String,
        /// Apply as an order diff instead of a content diff
        #[arg(long)]
        order: bool,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Build a sprig document from JSON
    FromJson {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Project a sprig document onto pretty-printed JSON
    ToJson {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Show entry, leaf, depth, and shape counts for a document
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fmt { input, output } => {
            let text = read_input(input.as_deref())?;
            let node = sprig_core::parse(&text);
            write_output(output.as_deref(), &node.to_text())?;
        }
        Commands::Diff {
            from,
            to,
            order,
            output,
        } => {
            let a = read_document(&from)?;
            let b = read_document(&to)?;
            let changes = if order {
                sprig_core::diff_order(&a, &b)
            } else {
                sprig_core::diff(&a, &b)
            };
            write_output(output.as_deref(), &changes.to_text())?;
        }
        Commands::Patch {
            input,
            diff,
            order,
            output,
        } => {
            let text = read_input(input.as_deref())?;
            let mut node = sprig_core::parse(&text);
            let changes = read_document(&diff)?;
            if order {
                let outcome = sprig_core::patch_order(&mut node, &changes);
                for path in &outcome.skipped {
                    eprintln!("warning: order mismatch at {path}, level left unchanged");
                }
            } else {
                sprig_core::patch(&mut node, &changes);
            }
            write_output(output.as_deref(), &node.to_text())?;
        }
        Commands::FromJson { input, output } => {
            let json = read_input(input.as_deref())?;
            let node =
                sprig_core::from_json_str(&json).context("Failed to build a tree from JSON")?;
            write_output(output.as_deref(), &node.to_text())?;
        }
        Commands::ToJson { input, output } => {
            let text = read_input(input.as_deref())?;
            let node = sprig_core::parse(&text);
            let json = sprig_core::to_json(&node);
            let pretty = serde_json::to_string_pretty(&json)?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Stats { input } => {
            let text = read_input(input.as_deref())?;
            let mut node = sprig_core::parse(&text);
            let (entries, leaves, depth) = tree_stats(&node);
            let shapes = shape_index(&mut node).len();
            println!("entries:  {entries}");
            println!("leaves:   {leaves}");
            println!("subtrees: {}", entries - leaves);
            println!("depth:    {depth}");
            println!("shapes:   {shapes}");
        }
    }

    Ok(())
}

/// Recursive entry/leaf/depth counts.
fn tree_stats(node: &Node) -> (usize, usize, usize) {
    let mut entries = 0;
    let mut leaves = 0;
    let mut depth = 0;
    for (_, value) in node.entries() {
        entries += 1;
        match value {
            Value::Leaf(_) => {
                leaves += 1;
                depth = depth.max(1);
            }
            Value::Tree(child) => {
                let (e, l, d) = tree_stats(child);
                entries += e;
                leaves += l;
                depth = depth.max(d + 1);
            }
        }
    }
    (entries, leaves, depth)
}

fn read_document(path: &str) -> Result<Node> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    Ok(sprig_core::parse(&text))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {path}"))?;
        }
        None => {
            print!("{content}");
        }
    }
    Ok(())
}
