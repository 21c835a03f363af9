//! A small inspection binary for the `rill-json-ast` library.
//!
//! Reads a JSON document from a file (or stdin) and prints either its
//! token stream or its syntax tree.
//!
//! ```text
//! rill-json-ast data.json
//! rill-json-ast --tokens < data.json
//! RUST_LOG=rill_json_ast=trace rill-json-ast data.json
//! ```

use anyhow::{bail, Context};
use clap::Parser;
use rill_json_ast::{parse_with, tokenize, ParseOptions, TokenKind, Value, DEFAULT_MAX_DEPTH};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Print the tokens or the raw syntax tree of a JSON document")]
struct Args {
    /// The JSON file to read. Reads stdin when omitted.
    file: Option<PathBuf>,

    /// Print the token stream instead of the syntax tree.
    #[arg(long)]
    tokens: bool,

    /// Reject documents nested deeper than this.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

fn read_input(file: Option<&PathBuf>) -> anyhow::Result<Vec<u8>> {
    match file {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut input = Vec::new();
            std::io::stdin()
                .read_to_end(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Prints one node per line, indented by depth. Lexemes are shown lossily,
/// since string contents need not be UTF-8.
fn print_tree(value: &Value, label: &str, depth: usize) {
    let indent = "  ".repeat(depth);
    match value {
        Value::Object(object) => {
            println!("{indent}{label}Object ({} elements)", object.len());
            for element in object.iter() {
                let key = format!("{}: ", String::from_utf8_lossy(&element.key));
                print_tree(&element.value, &key, depth + 1);
            }
        }
        Value::Array(array) => {
            println!("{indent}{label}Array ({} values)", array.len());
            for item in array.iter() {
                print_tree(item, "", depth + 1);
            }
        }
        Value::Literal(literal) => {
            println!(
                "{indent}{label}{:?} {}",
                literal.kind,
                String::from_utf8_lossy(literal.text())
            );
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let input = read_input(args.file.as_ref())?;

    if args.tokens {
        for token in tokenize(&input) {
            println!("{}:{}\t{}", token.line, token.column, token);
            if token.kind == TokenKind::Illegal {
                bail!("lexical error at line {}, column {}", token.line, token.column);
            }
        }
        return Ok(());
    }

    let options = ParseOptions {
        max_depth: args.max_depth,
        ..ParseOptions::default()
    };
    match parse_with(&input, &options) {
        Ok(document) => {
            print_tree(&document.root, "", 0);
            Ok(())
        }
        Err(e) => bail!("{} at line {}, column {}", e, e.line, e.column),
    }
}
