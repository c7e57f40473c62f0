//! Lexer, parser, and AST for the Tern expression language.
//!
//! The front end of a small statically-typed expression language:
//! a hand-written pull-based tokenizer with one token of lookahead,
//! and a recursive-descent parser with precedence climbing for binary
//! expressions. The produced [`Module`] AST is handed to a downstream
//! code-generation stage; nothing here type-checks or executes.
//!
//! # Quick start
//!
//! ## Parse a module
//!
//! ```
//! use tern_syntax::parse_str;
//!
//! let input = "def main() {\n\tvar x = 1 + 2;\n\tprint(x);\n}\n";
//! let module = parse_str(input, "main.tern").unwrap();
//! assert_eq!(module.functions.len(), 1);
//! assert_eq!(module.functions[0].prototype.name, "main");
//! ```
//!
//! ## Dump the token stream
//!
//! ```
//! use tern_syntax::{Lexer, dump_tokens};
//!
//! let mut lexer = Lexer::from_buffer("var x = 1 + 2;", "main.tern");
//! assert_eq!(dump_tokens(&mut lexer), "var x = 1 + 2 ;");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod diag;
pub mod dump;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{Expr, ExprKind, Function, Module, Prototype, VarType};
pub use diag::{Diagnostic, Diagnostics};
pub use dump::{dump_ast, dump_tokens};
pub use lexer::{BufferSource, Lexer, LineSource};
pub use parser::{ParseError, Parser};
pub use token::{SourceLocation, Token};

/// Lex and parse a source string in one step.
///
/// Lexical diagnostics are non-fatal and not returned here; a malformed
/// lexeme surfaces as the syntax error it causes. Build a [`Lexer`] and
/// [`Parser`] directly to inspect the diagnostic sink.
pub fn parse_str(input: &str, filename: &str) -> Result<Module, ParseError> {
    let lexer = Lexer::from_buffer(input, filename);
    Parser::new(lexer).parse_module()
}
