// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Parascope Team

//! Parascope CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use parascope::{io, parse_script, PreviewSession, DEFAULT_SCRIPT};
use std::path::Path;

#[derive(Parser)]
#[command(name = "parascope")]
#[command(about = "Parascope - sandboxed JSCAD-style script previewer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input script file (omit to use the built-in example)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Output STL file
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a script and export it as ASCII STL
    Render {
        /// Input script file (omit to use the built-in example)
        input: Option<String>,

        /// Output STL file
        #[arg(short, long)]
        output: String,
    },

    /// Run the pipeline without writing output
    Check {
        /// Input script file
        input: String,
    },

    /// Parse a script and print its AST as JSON
    Parse {
        /// Input script file
        input: String,

        /// Output JSON file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Render { input, output }) => {
            render_command(input.as_deref(), output, cli.verbose)?;
        }
        Some(Commands::Check { input }) => {
            check_command(input, cli.verbose)?;
        }
        Some(Commands::Parse { input, output }) => {
            parse_command(input, output.as_deref())?;
        }
        Some(Commands::Version) => {
            println!("Parascope v{}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            // Default behavior: render input to output
            if let Some(output) = &cli.output {
                render_command(cli.input.as_deref(), output, cli.verbose)?;
            } else {
                eprintln!("Error: Output file required");
                eprintln!("Usage: parascope [INPUT] --output <OUTPUT>");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn load_session(input: Option<&str>, verbose: bool) -> PreviewSession {
    let mut session = PreviewSession::new();
    match input {
        Some(input) => {
            if let Err(e) = session.load_file(Path::new(input)) {
                // Load failures fall back to the built-in example.
                eprintln!("{} {e}", "Warning:".yellow());
                eprintln!("Falling back to the built-in example script");
            } else if verbose {
                println!("Loaded: {input}");
            }
        }
        None => {
            if verbose {
                println!("No input given; using the built-in example script");
            }
        }
    }
    session
}

fn render_command(input: Option<&str>, output: &str, verbose: bool) -> Result<()> {
    let session = load_session(input, verbose);

    // One pipeline run: the exported mesh is the rendered mesh.
    let start = std::time::Instant::now();
    let mesh = match parascope::render(session.script()) {
        Ok(mesh) => mesh,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            std::process::exit(1);
        }
    };
    let triangles = mesh.triangle_count();
    if verbose {
        println!("Rendered in {:.2?}", start.elapsed());
        println!("Triangles: {triangles}");
    }

    let name = Path::new(output)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("preview");
    let text = io::serialize_mesh(&mesh, name)?;
    std::fs::write(output, text)?;

    if verbose {
        println!("Output: {output}");
    } else {
        println!(
            "{} {} -> {} ({} triangles)",
            "Rendered".green(),
            input.unwrap_or("<built-in example>"),
            output,
            triangles
        );
    }
    Ok(())
}

fn check_command(input: &str, verbose: bool) -> Result<()> {
    let source = io::load_script_file(Path::new(input))?;
    match parascope::render(&source) {
        Ok(mesh) => {
            if verbose {
                println!("Triangles: {}", mesh.triangle_count());
            }
            println!("{} {input}", "OK".green());
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            std::process::exit(1);
        }
    }
}

fn parse_command(input: &str, output: Option<&str>) -> Result<()> {
    let source = if input == "-" {
        DEFAULT_SCRIPT.to_string()
    } else {
        io::load_script_file(Path::new(input))?
    };
    let program = parse_script(&source)?;
    let json = serde_json::to_string_pretty(&program)?;
    match output {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}
