//! CLI tool to inspect and validate Tern source files.

use std::fs;
use std::process::ExitCode;

use tern_syntax::{Lexer, dump_ast, dump_tokens};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("Usage: ternc <command> [files...]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  tokens    Dump the token stream of each file");
        eprintln!("  ast       Dump the AST of each file");
        eprintln!("  validate  Check that each file parses");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  ternc tokens main.tern");
        eprintln!("  ternc ast main.tern");
        eprintln!("  ternc validate main.tern");
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    let files = &args[2..];

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        match command {
            "tokens" => {
                let mut lexer = Lexer::from_buffer(&content, path);
                println!("{}", dump_tokens(&mut lexer));
                // Lexical diagnostics are non-fatal to the dump.
                for diag in lexer.diagnostics() {
                    eprintln!("{path}: {diag}");
                }
            }
            "ast" => match tern_syntax::parse_str(&content, path) {
                Ok(module) => {
                    print!("{}", dump_ast(&module));
                }
                Err(e) => {
                    eprintln!("{path}: {e}");
                    had_error = true;
                }
            },
            "validate" => match tern_syntax::parse_str(&content, path) {
                Ok(module) => {
                    let functions = module.functions.len();
                    eprintln!("{path}: valid ({functions} function(s))");
                }
                Err(e) => {
                    eprintln!("{path}: {e}");
                    had_error = true;
                }
            },
            _ => {
                eprintln!("Unknown command: {command}");
                return ExitCode::from(2);
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
