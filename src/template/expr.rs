//! The expression language used inside template tags.
//! A tag body is tokenized, parsed into a small expression tree and
//! evaluated against whatever function surface the expansion run exposes.
//! Values are strings and booleans only; every type mismatch is an error
//! rather than a coercion.

use crate::error::{Error, Result};

/// A value produced by evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Bool(bool),
}

impl Value {
    /// The text this value splices into expanded output.
    pub fn render(&self) -> String {
        match self {
            Value::Str(value) => value.clone(),
            Value::Bool(value) => value.to_string(),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
        }
    }
}

/// The function surface an expression may call into.
///
/// Arguments arrive eagerly evaluated, left to right. The evaluator knows
/// no function names itself; what `ask`, `env` and friends mean is decided
/// entirely by the implementation behind this trait.
pub trait Functions {
    fn call(&mut self, name: &str, args: Vec<Value>) -> Result<Value>;
}

/// A parsed tag-body expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Str(String),
    Bool(bool),
    Not(Box<Expr>),
    Binary { op: BinaryOp, left: Box<Expr>, right: Box<Expr> },
    Ternary { condition: Box<Expr>, then: Box<Expr>, otherwise: Box<Expr> },
    Call { name: String, args: Vec<Expr> },
}

/// Binary operators, in no particular precedence order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinaryOp {
    Concat,
    Eq,
    Ne,
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Str(String),
    Ident(String),
    LeftParen,
    RightParen,
    Comma,
    Question,
    Colon,
    Bang,
    Plus,
    EqEq,
    BangEq,
    AndAnd,
    OrOr,
}

fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' | '\r' | '\n' => {
                chars.next();
            }
            '\'' | '"' => {
                chars.next();
                tokens.push(Token::Str(lex_string(&mut chars, c)?));
            }
            '(' => {
                chars.next();
                tokens.push(Token::LeftParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RightParen);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '?' => {
                chars.next();
                tokens.push(Token::Question);
            }
            ':' => {
                chars.next();
                tokens.push(Token::Colon);
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '!' => {
                chars.next();
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::BangEq);
                } else {
                    tokens.push(Token::Bang);
                }
            }
            '=' => {
                chars.next();
                if chars.next() != Some('=') {
                    return Err(Error::SyntaxError("expected '=='".to_string()));
                }
                tokens.push(Token::EqEq);
            }
            '&' => {
                chars.next();
                if chars.next() != Some('&') {
                    return Err(Error::SyntaxError("expected '&&'".to_string()));
                }
                tokens.push(Token::AndAnd);
            }
            '|' => {
                chars.next();
                if chars.next() != Some('|') {
                    return Err(Error::SyntaxError("expected '||'".to_string()));
                }
                tokens.push(Token::OrOr);
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut ident = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        ident.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident));
            }
            c => {
                return Err(Error::SyntaxError(format!("unexpected character '{}'", c)));
            }
        }
    }

    Ok(tokens)
}

fn lex_string(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    quote: char,
) -> Result<String> {
    let mut value = String::new();

    loop {
        match chars.next() {
            Some(c) if c == quote => return Ok(value),
            Some('\\') => match chars.next() {
                Some('\\') => value.push('\\'),
                Some('\'') => value.push('\''),
                Some('"') => value.push('"'),
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some(c) => {
                    return Err(Error::SyntaxError(format!(
                        "unknown escape sequence '\\{}'",
                        c
                    )));
                }
                None => {
                    return Err(Error::SyntaxError("unterminated string".to_string()));
                }
            },
            Some(c) => value.push(c),
            None => return Err(Error::SyntaxError("unterminated string".to_string())),
        }
    }
}

/// Parses a tag body into an expression tree.
///
/// The grammar, lowest precedence first:
///
/// ```text
/// expression := or ( "?" expression ":" expression )?
/// or         := and ( "||" and )*
/// and        := equality ( "&&" equality )*
/// equality   := concat ( ("==" | "!=") concat )*
/// concat     := unary ( "+" unary )*
/// unary      := "!" unary | primary
/// primary    := string | "true" | "false"
///             | name "(" arguments ")" | "(" expression ")"
/// ```
///
/// # Errors
/// * `Error::SyntaxError` for anything that does not fit the grammar
pub fn parse_expression(source: &str) -> Result<Expr> {
    let tokens = tokenize(source)?;
    let mut parser = Parser { tokens, position: 0 };

    let expr = parser.expression()?;
    if let Some(token) = parser.peek() {
        return Err(Error::SyntaxError(format!(
            "unexpected trailing input near {}",
            describe(token)
        )));
    }

    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token, context: &str) -> Result<()> {
        if self.eat(&token) {
            Ok(())
        } else {
            Err(Error::SyntaxError(format!(
                "expected {} {}",
                describe(&token),
                context
            )))
        }
    }

    fn expression(&mut self) -> Result<Expr> {
        let condition = self.or()?;
        if !self.eat(&Token::Question) {
            return Ok(condition);
        }

        let then = self.expression()?;
        self.expect(Token::Colon, "between ternary branches")?;
        let otherwise = self.expression()?;

        Ok(Expr::Ternary {
            condition: Box::new(condition),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    fn or(&mut self) -> Result<Expr> {
        let mut expr = self.and()?;
        while self.eat(&Token::OrOr) {
            let right = self.and()?;
            expr = Expr::Binary {
                op: BinaryOp::Or,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn and(&mut self) -> Result<Expr> {
        let mut expr = self.equality()?;
        while self.eat(&Token::AndAnd) {
            let right = self.equality()?;
            expr = Expr::Binary {
                op: BinaryOp::And,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr> {
        let mut expr = self.concat()?;
        loop {
            let op = if self.eat(&Token::EqEq) {
                BinaryOp::Eq
            } else if self.eat(&Token::BangEq) {
                BinaryOp::Ne
            } else {
                return Ok(expr);
            };

            let right = self.concat()?;
            expr = Expr::Binary { op, left: Box::new(expr), right: Box::new(right) };
        }
    }

    fn concat(&mut self) -> Result<Expr> {
        let mut expr = self.unary()?;
        while self.eat(&Token::Plus) {
            let right = self.unary()?;
            expr = Expr::Binary {
                op: BinaryOp::Concat,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr> {
        if self.eat(&Token::Bang) {
            let inner = self.unary()?;
            return Ok(Expr::Not(Box::new(inner)));
        }

        self.primary()
    }

    fn primary(&mut self) -> Result<Expr> {
        match self.advance() {
            Some(Token::Str(value)) => Ok(Expr::Str(value)),
            Some(Token::Ident(name)) => match name.as_str() {
                "true" => Ok(Expr::Bool(true)),
                "false" => Ok(Expr::Bool(false)),
                _ => {
                    self.expect(Token::LeftParen, &format!("after '{}'", name))?;
                    let args = self.arguments()?;
                    Ok(Expr::Call { name, args })
                }
            },
            Some(Token::LeftParen) => {
                let expr = self.expression()?;
                self.expect(Token::RightParen, "to close the group")?;
                Ok(expr)
            }
            Some(token) => Err(Error::SyntaxError(format!(
                "unexpected {}",
                describe(&token)
            ))),
            None => Err(Error::SyntaxError("unexpected end of expression".to_string())),
        }
    }

    fn arguments(&mut self) -> Result<Vec<Expr>> {
        let mut args = Vec::new();
        if self.eat(&Token::RightParen) {
            return Ok(args);
        }

        loop {
            args.push(self.expression()?);
            if !self.eat(&Token::Comma) {
                break;
            }
        }

        self.expect(Token::RightParen, "to close the argument list")?;
        Ok(args)
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Str(value) => format!("string '{}'", value),
        Token::Ident(name) => format!("'{}'", name),
        Token::LeftParen => "'('".to_string(),
        Token::RightParen => "')'".to_string(),
        Token::Comma => "','".to_string(),
        Token::Question => "'?'".to_string(),
        Token::Colon => "':'".to_string(),
        Token::Bang => "'!'".to_string(),
        Token::Plus => "'+'".to_string(),
        Token::EqEq => "'=='".to_string(),
        Token::BangEq => "'!='".to_string(),
        Token::AndAnd => "'&&'".to_string(),
        Token::OrOr => "'||'".to_string(),
    }
}

/// Evaluates an expression against the given function surface.
///
/// `&&` and `||` short-circuit, and only the taken ternary branch is
/// evaluated, so functions with side effects (prompts) run exactly when
/// their result is needed.
///
/// # Errors
/// * `Error::EvalError` on type mismatches
/// * Whatever the function surface returns for its own failures
pub fn eval(expr: &Expr, functions: &mut dyn Functions) -> Result<Value> {
    match expr {
        Expr::Str(value) => Ok(Value::Str(value.clone())),
        Expr::Bool(value) => Ok(Value::Bool(*value)),
        Expr::Not(inner) => match eval(inner, functions)? {
            Value::Bool(value) => Ok(Value::Bool(!value)),
            value => Err(Error::EvalError(format!(
                "'!' expects a boolean, got a {}",
                value.type_name()
            ))),
        },
        Expr::Binary { op, left, right } => eval_binary(*op, left, right, functions),
        Expr::Ternary { condition, then, otherwise } => {
            match eval(condition, functions)? {
                Value::Bool(true) => eval(then, functions),
                Value::Bool(false) => eval(otherwise, functions),
                value => Err(Error::EvalError(format!(
                    "'?' expects a boolean condition, got a {}",
                    value.type_name()
                ))),
            }
        }
        Expr::Call { name, args } => {
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(eval(arg, functions)?);
            }

            functions.call(name, values)
        }
    }
}

fn eval_binary(
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    functions: &mut dyn Functions,
) -> Result<Value> {
    match op {
        BinaryOp::And => match eval(left, functions)? {
            Value::Bool(false) => Ok(Value::Bool(false)),
            Value::Bool(true) => expect_bool(eval(right, functions)?, "&&"),
            value => Err(operand_error("&&", &value)),
        },
        BinaryOp::Or => match eval(left, functions)? {
            Value::Bool(true) => Ok(Value::Bool(true)),
            Value::Bool(false) => expect_bool(eval(right, functions)?, "||"),
            value => Err(operand_error("||", &value)),
        },
        BinaryOp::Concat => {
            match (eval(left, functions)?, eval(right, functions)?) {
                (Value::Str(left), Value::Str(right)) => Ok(Value::Str(left + &right)),
                (left, right) => Err(Error::EvalError(format!(
                    "'+' expects strings, got a {} and a {}",
                    left.type_name(),
                    right.type_name()
                ))),
            }
        }
        BinaryOp::Eq | BinaryOp::Ne => {
            let equal = match (eval(left, functions)?, eval(right, functions)?) {
                (Value::Str(left), Value::Str(right)) => left == right,
                (Value::Bool(left), Value::Bool(right)) => left == right,
                (left, right) => {
                    return Err(Error::EvalError(format!(
                        "cannot compare a {} with a {}",
                        left.type_name(),
                        right.type_name()
                    )));
                }
            };

            Ok(Value::Bool(if op == BinaryOp::Eq { equal } else { !equal }))
        }
    }
}

fn expect_bool(value: Value, op: &str) -> Result<Value> {
    match value {
        Value::Bool(_) => Ok(value),
        value => Err(operand_error(op, &value)),
    }
}

fn operand_error(op: &str, value: &Value) -> Error {
    Error::EvalError(format!("'{}' expects booleans, got a {}", op, value.type_name()))
}
