#![allow(dead_code)]

use tern_syntax::{Diagnostic, Expr, Lexer, Module, ParseError, Parser, Token};

/// Lex the whole input, returning the tokens before end-of-stream and
/// the accumulated diagnostics.
pub fn lex_all(input: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    let mut lexer = Lexer::from_buffer(input, "test.tern");
    let mut tokens = Vec::new();
    loop {
        let token = lexer.advance().clone();
        if token.is_eof() {
            break;
        }
        tokens.push(token);
    }
    let diagnostics = lexer.take_diagnostics().into_iter().collect();
    (tokens, diagnostics)
}

pub fn parse_input(input: &str) -> Result<Module, ParseError> {
    tern_syntax::parse_str(input, "test.tern")
}

pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
    let lexer = Lexer::from_buffer(input, "test.tern");
    Parser::new(lexer).parse_expression()
}

pub fn parse_declaration(input: &str) -> Result<Expr, ParseError> {
    let lexer = Lexer::from_buffer(input, "test.tern");
    Parser::new(lexer).parse_declaration()
}

/// Helper: the identifier token for `text`.
pub fn ident(text: &str) -> Token {
    Token::Identifier(text.to_string())
}
