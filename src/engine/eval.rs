//! Arithmetic expression evaluator.
//!
//! A hand-written scanner and recursive-descent parser over the fixed
//! calculator grammar: numbers, `+ - * /`, `**` (right-associative, highest
//! precedence), unary sign, parentheses, and a closed set of named unary
//! functions. Evaluation happens during the parse; there is no AST.

use super::error::EvalError;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Power,
    OpenParen,
    CloseParen,
}

fn scan(input: &str) -> Result<Vec<Token>, EvalError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            ' ' | '\t' => i += 1,
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| EvalError::InvalidExpression)?;
                tokens.push(Token::Number(value));
            }
            'a'..='z' | 'A'..='Z' => {
                let start = i;
                // Names may carry a digit suffix (log10).
                while i < chars.len() && chars[i].is_ascii_alphanumeric() {
                    i += 1;
                }
                tokens.push(Token::Ident(chars[start..i].iter().collect()));
            }
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    tokens.push(Token::Power);
                    i += 2;
                } else {
                    tokens.push(Token::Star);
                    i += 1;
                }
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '(' => {
                tokens.push(Token::OpenParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::CloseParen);
                i += 1;
            }
            _ => return Err(EvalError::InvalidExpression),
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, token: Token) -> Result<(), EvalError> {
        if self.advance() == Some(token) {
            Ok(())
        } else {
            Err(EvalError::InvalidExpression)
        }
    }

    fn expression(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.factor()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    value *= self.factor()?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err(EvalError::DivideByZero);
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    // Unary sign. `**` binds tighter, so -2**2 is -(2**2).
    fn factor(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                self.factor()
            }
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            _ => self.power(),
        }
    }

    // Right-associative: 2**3**2 is 2**(3**2). A signed exponent is allowed.
    fn power(&mut self) -> Result<f64, EvalError> {
        let base = self.primary()?;
        if matches!(self.peek(), Some(Token::Power)) {
            self.pos += 1;
            let exponent = self.factor()?;
            Ok(base.powf(exponent))
        } else {
            Ok(base)
        }
    }

    fn primary(&mut self) -> Result<f64, EvalError> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::OpenParen) => {
                let value = self.expression()?;
                self.expect(Token::CloseParen)?;
                Ok(value)
            }
            Some(Token::Ident(name)) => {
                self.expect(Token::OpenParen)?;
                let argument = self.expression()?;
                self.expect(Token::CloseParen)?;
                apply_function(&name, argument)
            }
            _ => Err(EvalError::InvalidExpression),
        }
    }
}

fn apply_function(name: &str, argument: f64) -> Result<f64, EvalError> {
    match name {
        "sin" => Ok(argument.sin()),
        "cos" => Ok(argument.cos()),
        "tan" => Ok(argument.tan()),
        // The raw vocabulary follows the evaluator namespace: `log` is the
        // natural logarithm, `log10` is base 10.
        "log" => {
            if argument <= 0.0 {
                Err(EvalError::MathDomainError(
                    "logarithm of a non-positive number".to_string(),
                ))
            } else {
                Ok(argument.ln())
            }
        }
        "log10" => {
            if argument <= 0.0 {
                Err(EvalError::MathDomainError(
                    "logarithm of a non-positive number".to_string(),
                ))
            } else {
                Ok(argument.log10())
            }
        }
        "sqrt" => {
            if argument < 0.0 {
                Err(EvalError::MathDomainError(
                    "square root of a negative number".to_string(),
                ))
            } else {
                Ok(argument.sqrt())
            }
        }
        "factorial" => factorial(argument),
        _ => Err(EvalError::InvalidExpression),
    }
}

fn factorial(argument: f64) -> Result<f64, EvalError> {
    if argument < 0.0 || argument.fract() != 0.0 {
        return Err(EvalError::MathDomainError(
            "factorial expects a non-negative integer".to_string(),
        ));
    }
    let n = argument as u64;
    let mut product = 1.0f64;
    for k in 2..=n {
        product *= k as f64;
        if !product.is_finite() {
            return Err(EvalError::MathDomainError(
                "factorial result is out of range".to_string(),
            ));
        }
    }
    Ok(product)
}

/// Evaluate a raw expression string to a single value.
///
/// Never panics: every failure, including an empty input and a non-finite
/// result, comes back as one of the tagged [`EvalError`] kinds.
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    let tokens = scan(input)?;
    if tokens.is_empty() {
        return Err(EvalError::InvalidExpression);
    }
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expression()?;
    if parser.pos != parser.tokens.len() {
        return Err(EvalError::InvalidExpression);
    }
    if !value.is_finite() {
        return Err(EvalError::InvalidExpression);
    }
    Ok(value)
}

/// Decimal-string form of a result. Integral values print without a
/// fractional part so they can seed a chained calculation the way the
/// display shows them.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}
