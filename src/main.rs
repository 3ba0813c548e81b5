use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use ucle::ast::Decl;
use ucle::{interner, parser, typechecker};

/// UCLE type checker
#[derive(Parser)]
#[command(name = "ucle", version, about)]
struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Type-check a UCLE source file and print the inferred top-level types
    Check {
        /// Path to the source file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    match cli.command {
        Commands::Check { file } => {
            let source = match std::fs::read_to_string(&file) {
                Ok(source) => source,
                Err(err) => {
                    eprintln!("[error] {}: {err}", file.display());
                    process::exit(1);
                }
            };

            let program = match parser::parse(&source) {
                Ok(program) => program,
                Err(err) => {
                    eprintln!("[error] {err}");
                    process::exit(1);
                }
            };
            log::debug!("parsed {} declarations", program.decls.len());

            match typechecker::infer(&program) {
                Ok(result) => {
                    for decl in &program.decls {
                        if let Decl::Let { name, .. } = decl {
                            if let Some(scheme) = result.env.lookup_scheme(name.value) {
                                println!(
                                    "{} : {}",
                                    interner::resolve(name.value).unwrap_or_default(),
                                    scheme.ty
                                );
                            }
                        }
                    }
                }
                Err(err) => {
                    eprintln!("[error] {err}");
                    process::exit(1);
                }
            }
        }
    }
}
