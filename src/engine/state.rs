//! Calculator state: the lockstep expression buffers, the result history and
//! the last answer.
//!
//! The two buffers are never stored as independent strings. Every user-facing
//! operation appends one *segment* carrying both the evaluable raw fragment
//! and the human-facing display fragment, and the buffers are derived by
//! concatenation. Structural alignment between the two forms therefore holds
//! by construction: no sequence of operations can remove from one buffer
//! without removing the corresponding piece of the other.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// A digit, decimal point, operator or parenthesis, spelled identically
    /// in both buffers.
    Literal,
    /// A function or operator fragment from the translation table.
    Function,
    /// A named constant, expanded to a decimal literal in the raw buffer.
    Constant,
    /// A recalled answer: numeric in the raw buffer, `Ans` in the display.
    Answer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub raw: String,
    pub display: String,
    pub kind: SegmentKind,
}

impl Segment {
    pub fn literal_char(ch: char) -> Self {
        Self {
            raw: ch.to_string(),
            display: ch.to_string(),
            kind: SegmentKind::Literal,
        }
    }

    /// Single-character literal holding exactly a digit or a decimal point.
    /// Only these participate in trailing-number negation.
    pub fn is_numeric_char(&self) -> bool {
        if self.kind != SegmentKind::Literal {
            return false;
        }
        let mut chars = self.raw.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => ch.is_ascii_digit() || ch == '.',
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Display-form snapshot taken at evaluation time.
    pub expression: String,
    pub value: f64,
}

#[derive(Debug, Default)]
pub struct CalculatorState {
    segments: Vec<Segment>,
    history: Vec<HistoryEntry>,
    last_result: Option<f64>,
}

impl CalculatorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn pop(&mut self) -> Option<Segment> {
        self.segments.pop()
    }

    pub fn clear_expression(&mut self) {
        self.segments.clear();
    }

    pub fn raw_expression(&self) -> String {
        self.segments.iter().map(|s| s.raw.as_str()).collect()
    }

    pub fn display_expression(&self) -> String {
        self.segments.iter().map(|s| s.display.as_str()).collect()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn last_result(&self) -> Option<f64> {
        self.last_result
    }

    /// Record a successful evaluation, dropping the oldest entries once the
    /// cap is reached.
    pub fn record_result(&mut self, expression: String, value: f64, history_limit: usize) {
        self.history.push(HistoryEntry { expression, value });
        if self.history.len() > history_limit {
            let excess = self.history.len() - history_limit;
            self.history.drain(0..excess);
        }
        self.last_result = Some(value);
    }
}
