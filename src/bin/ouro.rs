//! Command-line interface for ouro
//! This binary tokenizes Ouroboros source files and renders them for humans and tooling.
//!
//! Usage:
//!   ouro tokens `<path>` [--format `<format>`]                    - Dump the token stream (text, json, yaml)
//!   ouro highlight `<path>` [--format `<format>`] [--output `<path>`] - Render a highlighted file (html, ansi)
//!   ouro categories                                           - List the token categories and their display aliases

use clap::{Arg, Command};
use ouro::ouro::render::{render_highlight, serialize_tokens};
use ouro::ouro::scanner::tokenize;
use ouro::ouro::token::TokenCategory;
use std::path::Path;

fn main() {
    let matches = Command::new("ouro")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tokenizer and syntax highlighter for the Ouroboros language")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokens")
                .about("Dump the token stream of a source file")
                .arg(
                    Arg::new("path")
                        .help("Path to the Ouroboros source file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('text', 'json', 'yaml')")
                        .default_value("text"),
                ),
        )
        .subcommand(
            Command::new("highlight")
                .about("Render a source file with syntax highlighting")
                .arg(
                    Arg::new("path")
                        .help("Path to the Ouroboros source file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('html', 'ansi')")
                        .default_value("html"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write the rendered output to a file instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("categories").about("List the token categories and their display aliases"),
        )
        .get_matches();

    // Handle subcommands
    match matches.subcommand() {
        Some(("tokens", tokens_matches)) => {
            let path = tokens_matches.get_one::<String>("path").unwrap();
            let format = tokens_matches.get_one::<String>("format").unwrap();
            handle_tokens_command(path, format);
        }
        Some(("highlight", highlight_matches)) => {
            let path = highlight_matches.get_one::<String>("path").unwrap();
            let format = highlight_matches.get_one::<String>("format").unwrap();
            let output = highlight_matches.get_one::<String>("output");
            handle_highlight_command(path, format, output);
        }
        Some(("categories", _)) => {
            handle_categories_command();
        }
        _ => unreachable!(),
    }
}

/// Handle the tokens command
fn handle_tokens_command(path: &str, format: &str) {
    let tokens = tokenize(&read_source(path));
    let output = serialize_tokens(&tokens, format).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    print!("{}", output);
}

/// Handle the highlight command
fn handle_highlight_command(path: &str, format: &str, output_path: Option<&String>) {
    let title = Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    let tokens = tokenize(&read_source(path));
    let rendered = render_highlight(&tokens, format, &title).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    match output_path {
        Some(output_path) => {
            std::fs::write(output_path, rendered).unwrap_or_else(|e| {
                eprintln!("Error writing file: {}", e);
                std::process::exit(1);
            });
        }
        None => print!("{}", rendered),
    }
}

/// Handle the categories command
fn handle_categories_command() {
    println!("Token categories (display alias in parentheses where one applies):\n");
    for category in TokenCategory::ALL {
        match category.alias() {
            Some(alias) => println!("  {} ({})", category, alias),
            None => println!("  {}", category),
        }
    }
}

fn read_source(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    })
}
