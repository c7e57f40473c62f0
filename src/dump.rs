//! Textual dumps of the front end's two products: the token stream and
//! the AST.
//!
//! The token dump is a stable, space-joined rendering used to check the
//! lexer in isolation; the AST dump is an indented tree of a `Module`.

use std::fmt::Write as _;

use crate::ast::{Expr, ExprKind, Function, Module};
use crate::lexer::{Lexer, LineSource};

/// Render every token of a fresh lexer, space-joined, in source order.
///
/// Identifier text appears verbatim, numbers drop any trailing decimal
/// point or zeros, keywords appear as their spelling, punctuation as
/// its character, and malformed tokens as `ERROR_TOKEN`. End of stream
/// terminates the dump without being printed. Lexical diagnostics stay
/// in the lexer's sink.
pub fn dump_tokens<'src, S: LineSource<'src>>(lexer: &mut Lexer<'src, S>) -> String {
    let mut out = String::new();
    loop {
        let token = lexer.advance();
        if token.is_eof() {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        let _ = write!(out, "{token}");
    }
    out
}

/// Render a module as an indented textual tree.
#[must_use]
pub fn dump_ast(module: &Module) -> String {
    let mut out = String::new();
    out.push_str("Module:\n");
    for function in &module.functions {
        dump_function(&mut out, function, 1);
    }
    out
}

fn dump_function(out: &mut String, function: &Function, indent: usize) {
    let proto = &function.prototype;
    push_line(
        out,
        indent,
        &format!("Function '{}' @{}", proto.name, proto.location),
    );
    push_line(
        out,
        indent + 1,
        &format!("Params: [{}]", proto.params.join(", ")),
    );
    push_line(out, indent + 1, "Block {");
    for expr in &function.body {
        dump_expr(out, expr, indent + 2);
    }
    push_line(out, indent + 1, "} // Block");
}

fn dump_expr(out: &mut String, expr: &Expr, indent: usize) {
    match &expr.kind {
        ExprKind::Number(value) => {
            push_line(out, indent, &format!("Number: {value} @{}", expr.location));
        }
        ExprKind::Variable(name) => {
            push_line(out, indent, &format!("Variable: {name} @{}", expr.location));
        }
        ExprKind::VarDecl { name, ty, init } => {
            let annotation = ty.clone().unwrap_or_default();
            push_line(
                out,
                indent,
                &format!("VarDecl {name}{annotation} @{}", expr.location),
            );
            dump_expr(out, init, indent + 1);
        }
        ExprKind::Call { callee, args } => {
            push_line(out, indent, &format!("Call '{callee}' @{}", expr.location));
            for arg in args {
                dump_expr(out, arg, indent + 1);
            }
        }
        ExprKind::Print(arg) => {
            push_line(out, indent, &format!("Print @{}", expr.location));
            dump_expr(out, arg, indent + 1);
        }
        ExprKind::Binary { op, lhs, rhs } => {
            push_line(out, indent, &format!("BinOp: {op} @{}", expr.location));
            dump_expr(out, lhs, indent + 1);
            dump_expr(out, rhs, indent + 1);
        }
        ExprKind::Return(value) => {
            push_line(out, indent, &format!("Return @{}", expr.location));
            if let Some(value) = value {
                dump_expr(out, value, indent + 1);
            }
        }
    }
}

fn push_line(out: &mut String, indent: usize, text: &str) {
    for _ in 0..indent {
        out.push_str("  ");
    }
    out.push_str(text);
    out.push('\n');
}
