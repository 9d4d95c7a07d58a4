//! The expression engine: a single state holder owning the lockstep
//! expression buffers, the calculation history and the last answer, with one
//! operation per calculator key. Presentation code calls into the engine and
//! re-renders from its state; it never mutates engine internals directly.

mod error;
mod eval;
mod state;

pub use error::EvalError;
pub use eval::format_number;
pub use state::{CalculatorState, HistoryEntry, Segment, SegmentKind};

/// The fixed function/operator vocabulary. Each key maps to a translation
/// pair: an evaluator-syntax fragment for the raw buffer and a glyph fragment
/// for the display buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKey {
    Sin,
    Cos,
    Tan,
    /// Base-10 logarithm: displayed `log(`, evaluated as `log10(`.
    Log,
    /// Natural logarithm: displayed `ln(`, evaluated as `log(`.
    Ln,
    Sqrt,
    /// Postfix square: raw `**2`, display `²`. No parenthesis.
    Square,
    Power,
    /// Prefix call in the raw buffer, postfix `!` glyph in the display. The
    /// user has to type the closing parenthesis; leaving it unclosed yields a
    /// mismatched-paren raw expression, reproduced as-is from the original.
    Factorial,
    OpenParen,
    CloseParen,
}

impl FunctionKey {
    pub fn fragments(self) -> (&'static str, &'static str) {
        match self {
            FunctionKey::Sin => ("sin(", "sin("),
            FunctionKey::Cos => ("cos(", "cos("),
            FunctionKey::Tan => ("tan(", "tan("),
            FunctionKey::Log => ("log10(", "log("),
            FunctionKey::Ln => ("log(", "ln("),
            FunctionKey::Sqrt => ("sqrt(", "\u{221a}("),
            FunctionKey::Square => ("**2", "\u{b2}"),
            FunctionKey::Power => ("**", "^"),
            FunctionKey::Factorial => ("factorial(", "!"),
            FunctionKey::OpenParen => ("(", "("),
            FunctionKey::CloseParen => (")", ")"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantKey {
    Pi,
    E,
}

impl ConstantKey {
    /// The finite-precision approximation baked in at append time. Later
    /// evaluation sees this literal, not a symbolic constant.
    pub fn value(self) -> f64 {
        match self {
            ConstantKey::Pi => std::f64::consts::PI,
            ConstantKey::E => std::f64::consts::E,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            ConstantKey::Pi => "\u{3c0}",
            ConstantKey::E => "e",
        }
    }
}

pub struct Engine {
    state: CalculatorState,
    history_limit: usize,
}

impl Engine {
    pub fn new(history_limit: usize) -> Self {
        Self {
            state: CalculatorState::new(),
            history_limit,
        }
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn raw_expression(&self) -> String {
        self.state.raw_expression()
    }

    pub fn display_expression(&self) -> String {
        self.state.display_expression()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.state.history()
    }

    /// Append digits, a decimal point, binary operators or parentheses,
    /// identically to both buffers. No syntactic validation: `**` or a
    /// leading operator is accepted and left for evaluation to reject.
    pub fn append_literal(&mut self, token: &str) {
        for ch in token.chars() {
            self.state.push(Segment::literal_char(ch));
        }
    }

    pub fn append_function(&mut self, key: FunctionKey) {
        let (raw, display) = key.fragments();
        self.state.push(Segment {
            raw: raw.to_string(),
            display: display.to_string(),
            kind: SegmentKind::Function,
        });
    }

    pub fn append_constant(&mut self, key: ConstantKey) {
        self.state.push(Segment {
            raw: format!("{}", key.value()),
            display: key.glyph().to_string(),
            kind: SegmentKind::Constant,
        });
    }

    /// Evaluate the raw buffer. On success the result is recorded in history
    /// and becomes the seed for a chained calculation; on any error both
    /// buffers reset to empty. Always returns a tagged result, never panics.
    pub fn evaluate(&mut self) -> Result<f64, EvalError> {
        let raw = self.state.raw_expression();
        match eval::evaluate(&raw) {
            Ok(value) => {
                let snapshot = self.state.display_expression();
                self.state
                    .record_result(snapshot, value, self.history_limit);
                self.seed_result(value);
                Ok(value)
            }
            Err(err) => {
                self.state.clear_expression();
                Err(err)
            }
        }
    }

    /// Remove the trailing logical token from both buffers. One keypress
    /// undoes one append, so a function fragment like `sqrt(` disappears as a
    /// whole and the buffers stay structurally aligned. No-op when empty.
    pub fn backspace(&mut self) {
        self.state.pop();
    }

    /// Reset both buffers to empty. Idempotent. History and the last answer
    /// survive a clear.
    pub fn clear(&mut self) {
        self.state.clear_expression();
    }

    /// Negate the trailing numeric literal: the longest run of digits with an
    /// optional single interior decimal point, matched right-anchored against
    /// the raw buffer. No-op when the expression is empty, does not end in a
    /// digit, or when the trailing digits belong to a constant expansion or a
    /// recalled answer rather than typed literals.
    pub fn negate_last_number(&mut self) {
        let segments = self.state.segments();
        let mut start = segments.len();
        while start > 0 && segments[start - 1].is_numeric_char() {
            start -= 1;
        }

        let tail: String = segments[start..].iter().map(|s| s.raw.as_str()).collect();
        let Some(literal) = trailing_numeric_literal(&tail) else {
            return;
        };

        let value: f64 = match literal.parse() {
            Ok(value) => value,
            Err(_) => return,
        };
        let negated = format_number(-value);

        // The matched literal is made of single-character segments, so its
        // byte length is the number of segments to replace.
        for _ in 0..literal.len() {
            self.state.pop();
        }
        for ch in negated.chars() {
            self.state.push(Segment::literal_char(ch));
        }
    }

    /// Append the most recent result. The raw buffer gains the numeric
    /// literal; the display buffer gains the marker text `Ans`. No-op before
    /// the first successful evaluation.
    pub fn recall_last_answer(&mut self) {
        if let Some(value) = self.state.last_result() {
            self.state.push(Segment {
                raw: format_number(value),
                display: "Ans".to_string(),
                kind: SegmentKind::Answer,
            });
        }
    }

    /// Best-effort live evaluation of the in-progress expression for the
    /// display layer. Suppresses every error and mutates nothing.
    pub fn preview(&self) -> Option<String> {
        if self.state.is_empty() {
            return None;
        }
        eval::evaluate(&self.state.raw_expression())
            .ok()
            .map(format_number)
    }

    fn seed_result(&mut self, value: f64) {
        self.state.clear_expression();
        for ch in format_number(value).chars() {
            self.state.push(Segment::literal_char(ch));
        }
    }
}

/// Right-anchored numeric-literal match: digits, optionally preceded by more
/// digits and a single decimal point. Returns `None` unless the input ends in
/// a digit.
fn trailing_numeric_literal(tail: &str) -> Option<&str> {
    let bytes = tail.as_bytes();
    let mut i = bytes.len();
    if i == 0 || !bytes[i - 1].is_ascii_digit() {
        return None;
    }
    while i > 0 && bytes[i - 1].is_ascii_digit() {
        i -= 1;
    }
    if i > 1 && bytes[i - 1] == b'.' && bytes[i - 2].is_ascii_digit() {
        i -= 1;
        while i > 0 && bytes[i - 1].is_ascii_digit() {
            i -= 1;
        }
    }
    Some(&tail[i..])
}
