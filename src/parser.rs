use crate::ast::{Expr, ExprKind, Function, Module, Prototype, VarType};
use crate::diag::{Diagnostic, Diagnostics};
use crate::lexer::{Lexer, LineSource};
use crate::token::{SourceLocation, Token};

/// Error produced during parsing.
///
/// Parsing is fail-fast: the first syntax error aborts the enclosing
/// parse with no recovery point.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected} {context} at line {}, column {}", location.line, location.column)]
pub struct ParseError {
    pub expected: String,
    pub context: String,
    pub location: SourceLocation,
}

/// Recursive-descent parser over a [`Lexer`], one token of lookahead.
///
/// Binary expressions use precedence climbing: `+` and `-` bind at
/// level 20, `*` and `@` at level 40 (higher binds tighter).
pub struct Parser<'src, S: LineSource<'src>> {
    lexer: Lexer<'src, S>,
}

impl<'src, S: LineSource<'src>> Parser<'src, S> {
    /// Wrap a lexer and prime its token stream.
    pub fn new(mut lexer: Lexer<'src, S>) -> Self {
        lexer.advance();
        Self { lexer }
    }

    /// Parse a full module: `definition* EOF`.
    pub fn parse_module(&mut self) -> Result<Module, ParseError> {
        let mut functions = Vec::new();
        while !self.lexer.current().is_eof() {
            functions.push(self.parse_definition()?);
        }
        Ok(Module { functions })
    }

    /// Parse one function declaration: `def` prototype block.
    pub fn parse_definition(&mut self) -> Result<Function, ParseError> {
        let prototype = self.parse_prototype()?;
        let body = self.parse_block()?;
        Ok(Function { prototype, body })
    }

    /// Parse a `var` declaration. The type annotation is optional and
    /// may appear before or after the name.
    pub fn parse_declaration(&mut self) -> Result<Expr, ParseError> {
        let location = self.lexer.location().clone();
        if *self.lexer.current() != Token::Var {
            return Err(self.error("'var'", "in variable declaration"));
        }
        self.lexer.advance();

        let name;
        let mut ty = None;
        if let Some(id) = self.lexer.identifier() {
            name = id.to_string();
            self.lexer.advance();
            if *self.lexer.current() == Token::Punct('<') {
                ty = Some(self.parse_type()?);
            }
        } else if *self.lexer.current() == Token::Punct('<') {
            ty = Some(self.parse_type()?);
            let Some(id) = self.lexer.identifier() else {
                return Err(self.error("identifier", "in variable declaration"));
            };
            name = id.to_string();
            self.lexer.advance();
        } else {
            return Err(self.error("identifier or type", "in variable declaration"));
        }

        self.expect_punct('=', "in variable declaration")?;
        let init = self.parse_expression()?;
        Ok(Expr::new(
            ExprKind::VarDecl {
                name,
                ty,
                init: Box::new(init),
            },
            location,
        ))
    }

    /// Parse an expression, climbing binary-operator precedence.
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.parse_primary()?;
        self.parse_bin_op_rhs(0, lhs)
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.lexer.diagnostics()
    }

    /// Take the accumulated diagnostics, leaving the sink empty.
    pub fn take_diagnostics(&mut self) -> Diagnostics {
        self.lexer.take_diagnostics()
    }

    fn parse_prototype(&mut self) -> Result<Prototype, ParseError> {
        let location = self.lexer.location().clone();
        if *self.lexer.current() != Token::Def {
            return Err(self.error("'def'", "in prototype"));
        }
        self.lexer.advance();

        let Some(name) = self.lexer.identifier() else {
            return Err(self.error("function name", "in prototype"));
        };
        let name = name.to_string();
        self.lexer.advance();

        self.expect_punct('(', "in prototype")?;
        let mut params = Vec::new();
        if *self.lexer.current() != Token::Punct(')') {
            loop {
                let Some(param) = self.lexer.identifier() else {
                    return Err(self.error("parameter name", "in prototype"));
                };
                params.push(param.to_string());
                self.lexer.advance();
                if *self.lexer.current() == Token::Punct(')') {
                    break;
                }
                self.expect_punct(',', "between parameters")?;
            }
        }
        self.lexer.expect(&Token::Punct(')'));

        Ok(Prototype {
            name,
            params,
            location,
        })
    }

    /// Parse `'{' (block_expr ';')* '}'`. Stray semicolons between
    /// expressions are tolerated.
    fn parse_block(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.expect_punct('{', "to begin block")?;

        let mut exprs = Vec::new();
        self.skip_semicolons();
        while *self.lexer.current() != Token::Punct('}') && !self.lexer.current().is_eof() {
            let expr = match self.lexer.current() {
                Token::Var => self.parse_declaration()?,
                Token::Return => self.parse_return()?,
                _ => self.parse_expression()?,
            };
            exprs.push(expr);

            self.expect_punct(';', "after expression")?;
            self.skip_semicolons();
        }
        self.expect_punct('}', "to close block")?;
        Ok(exprs)
    }

    fn parse_return(&mut self) -> Result<Expr, ParseError> {
        let location = self.lexer.location().clone();
        self.lexer.expect(&Token::Return);
        let value = if *self.lexer.current() == Token::Punct(';') {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        Ok(Expr::new(ExprKind::Return(value), location))
    }

    /// Parse `'<' (identifier | number (',' number)*)? '>'`.
    #[allow(clippy::cast_possible_truncation)]
    fn parse_type(&mut self) -> Result<VarType, ParseError> {
        self.expect_punct('<', "to begin type annotation")?;

        let mut ty = VarType::default();
        while *self.lexer.current() != Token::Punct('>') {
            if let Some(value) = self.lexer.number() {
                ty.shape.push(value as i64);
                self.lexer.advance();
            } else if ty.name.is_none() && self.lexer.identifier().is_some() {
                ty.name = self.lexer.identifier().map(str::to_string);
                self.lexer.advance();
            } else {
                return Err(self.error("identifier or shape dimension", "in type annotation"));
            }
            if *self.lexer.current() == Token::Punct(',') {
                self.lexer.advance();
            } else {
                break;
            }
        }
        self.expect_punct('>', "to close type annotation")?;
        Ok(ty)
    }

    /// Loop consuming `op primary` pairs as long as the operator binds
    /// at least as tightly as `min_prec`, recursing when the operator
    /// after the right-hand side binds tighter than the one just
    /// consumed.
    fn parse_bin_op_rhs(&mut self, min_prec: i32, mut lhs: Expr) -> Result<Expr, ParseError> {
        loop {
            let tok_prec = self.current_precedence();
            if tok_prec < min_prec {
                return Ok(lhs);
            }

            let op = match self.lexer.current() {
                Token::Punct(c) => *c,
                _ => return Ok(lhs),
            };
            let location = self.lexer.location().clone();
            self.lexer.advance();

            let mut rhs = self.parse_primary()?;

            let next_prec = self.current_precedence();
            if next_prec > tok_prec {
                rhs = self.parse_bin_op_rhs(tok_prec + 1, rhs)?;
            }

            lhs = Expr::new(
                ExprKind::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                location,
            );
        }
    }

    /// Precedence of the current token; non-operators sit at -1, which
    /// terminates every climbing loop.
    fn current_precedence(&self) -> i32 {
        match self.lexer.current() {
            Token::Punct('+' | '-') => 20,
            Token::Punct('*' | '@') => 40,
            _ => -1,
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.lexer.current() {
            Token::Identifier(_) => self.parse_identifier_expr(),
            Token::Number(_) => self.parse_number_expr(),
            Token::Punct('(') => self.parse_paren_expr(),
            _ => Err(self.error("expression", "in primary")),
        }
    }

    /// Parse a bare variable reference or, when the identifier is
    /// immediately followed by `(`, a call. The identifier `print` with
    /// exactly one argument becomes the print builtin.
    fn parse_identifier_expr(&mut self) -> Result<Expr, ParseError> {
        let location = self.lexer.location().clone();
        let Some(name) = self.lexer.identifier() else {
            return Err(self.error("identifier", "in expression"));
        };
        let name = name.to_string();

        if *self.lexer.advance() != Token::Punct('(') {
            return Ok(Expr::new(ExprKind::Variable(name), location));
        }
        self.lexer.expect(&Token::Punct('('));

        let mut args = Vec::new();
        if *self.lexer.current() != Token::Punct(')') {
            loop {
                args.push(self.parse_expression()?);
                if *self.lexer.current() == Token::Punct(')') {
                    break;
                }
                if *self.lexer.current() != Token::Punct(',') {
                    return Err(self.error("')' or ','", "to close function call"));
                }
                self.lexer.advance();
            }
        }
        self.lexer.expect(&Token::Punct(')'));

        if name == "print" {
            if args.len() != 1 {
                return Err(self.error("one argument", "for print statement"));
            }
            let arg = args.remove(0);
            return Ok(Expr::new(ExprKind::Print(Box::new(arg)), location));
        }

        Ok(Expr::new(ExprKind::Call { callee: name, args }, location))
    }

    fn parse_number_expr(&mut self) -> Result<Expr, ParseError> {
        let location = self.lexer.location().clone();
        let Some(value) = self.lexer.number() else {
            return Err(self.error("number literal", "in expression"));
        };
        self.lexer.advance();
        Ok(Expr::new(ExprKind::Number(value), location))
    }

    fn parse_paren_expr(&mut self) -> Result<Expr, ParseError> {
        self.lexer.expect(&Token::Punct('('));
        let expr = self.parse_expression()?;
        self.expect_punct(')', "to close parenthesised expression")?;
        Ok(expr)
    }

    fn skip_semicolons(&mut self) {
        while *self.lexer.current() == Token::Punct(';') {
            self.lexer.advance();
        }
    }

    /// Consume the expected punctuation or fail with a positioned
    /// syntax error.
    fn expect_punct(&mut self, c: char, context: &str) -> Result<(), ParseError> {
        if *self.lexer.current() == Token::Punct(c) {
            self.lexer.advance();
            Ok(())
        } else {
            Err(self.error(format!("'{c}'"), context))
        }
    }

    /// Build a syntax error at the current location and mirror it into
    /// the diagnostic sink.
    fn error(&mut self, expected: impl Into<String>, context: &str) -> ParseError {
        let expected = expected.into();
        let location = self.lexer.location().clone();
        self.lexer
            .report_at(format!("expected {expected} {context}"), &location);
        ParseError {
            expected,
            context: context.to_string(),
            location,
        }
    }
}
