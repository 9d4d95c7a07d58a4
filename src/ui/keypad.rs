//! Keypad model: the button grid, its labels and tooltips, and the focus
//! cursor moved with the arrow keys. Rows mirror the original button layout,
//! digits and operators at the bottom, the scientific rows above.

use crate::engine::{ConstantKey, FunctionKey};

/// Identity of a calculator key, shared between the keypad grid and the
/// keyboard shortcuts. The app mode maps each press onto one engine call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyId {
    Digit(char),
    Dot,
    Operator(char),
    Function(FunctionKey),
    Constant(ConstantKey),
    Equals,
    Backspace,
    Clear,
    Negate,
    Ans,
    History,
}

#[derive(Clone, Copy, Debug)]
pub struct Key {
    pub id: KeyId,
    pub label: &'static str,
    pub tooltip: &'static str,
}

const fn key(id: KeyId, label: &'static str, tooltip: &'static str) -> Key {
    Key { id, label, tooltip }
}

pub static KEYPAD: &[&[Key]] = &[
    &[
        key(KeyId::Function(FunctionKey::Sin), "sin", "sine, radians (s)"),
        key(KeyId::Function(FunctionKey::Cos), "cos", "cosine, radians (c)"),
        key(KeyId::Function(FunctionKey::Tan), "tan", "tangent, radians (t)"),
        key(KeyId::Function(FunctionKey::Log), "log", "base-10 logarithm (g)"),
        key(KeyId::Function(FunctionKey::Ln), "ln", "natural logarithm (n)"),
    ],
    &[
        key(KeyId::Function(FunctionKey::Sqrt), "\u{221a}", "square root (r)"),
        key(KeyId::Function(FunctionKey::Square), "x\u{b2}", "square"),
        key(KeyId::Function(FunctionKey::Power), "x^y", "power (^)"),
        key(KeyId::Function(FunctionKey::Factorial), "x!", "factorial (!)"),
        key(KeyId::Constant(ConstantKey::Pi), "\u{3c0}", "pi (p)"),
    ],
    &[
        key(KeyId::Function(FunctionKey::OpenParen), "(", "open parenthesis"),
        key(KeyId::Function(FunctionKey::CloseParen), ")", "close parenthesis"),
        key(KeyId::Constant(ConstantKey::E), "e", "Euler's number (e)"),
        key(KeyId::Ans, "Ans", "recall last answer (a)"),
        key(KeyId::History, "hist", "calculation history (h)"),
    ],
    &[
        key(KeyId::Digit('7'), "7", "digit 7"),
        key(KeyId::Digit('8'), "8", "digit 8"),
        key(KeyId::Digit('9'), "9", "digit 9"),
        key(KeyId::Operator('/'), "\u{f7}", "divide (/)"),
        key(KeyId::Clear, "C", "clear expression (esc)"),
    ],
    &[
        key(KeyId::Digit('4'), "4", "digit 4"),
        key(KeyId::Digit('5'), "5", "digit 5"),
        key(KeyId::Digit('6'), "6", "digit 6"),
        key(KeyId::Operator('*'), "\u{d7}", "multiply (*)"),
        key(KeyId::Backspace, "\u{2190}", "backspace"),
    ],
    &[
        key(KeyId::Digit('1'), "1", "digit 1"),
        key(KeyId::Digit('2'), "2", "digit 2"),
        key(KeyId::Digit('3'), "3", "digit 3"),
        key(KeyId::Operator('-'), "-", "subtract (-)"),
        key(KeyId::Negate, "\u{b1}", "negate last number (m)"),
    ],
    &[
        key(KeyId::Digit('0'), "0", "digit 0"),
        key(KeyId::Dot, ".", "decimal point"),
        key(KeyId::Equals, "=", "evaluate (enter)"),
        key(KeyId::Operator('+'), "+", "add (+)"),
    ],
];

/// Focused cell on the keypad grid. Movement clamps at the edges; moving
/// between rows of different widths clamps the column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeypadCursor {
    pub row: usize,
    pub col: usize,
}

impl KeypadCursor {
    pub fn key(&self) -> &'static Key {
        let row = KEYPAD[self.row.min(KEYPAD.len() - 1)];
        &row[self.col.min(row.len() - 1)]
    }

    pub fn move_up(&mut self) {
        self.row = self.row.saturating_sub(1);
        self.clamp_col();
    }

    pub fn move_down(&mut self) {
        self.row = (self.row + 1).min(KEYPAD.len() - 1);
        self.clamp_col();
    }

    pub fn move_left(&mut self) {
        self.clamp_col();
        self.col = self.col.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.col = (self.col + 1).min(KEYPAD[self.row].len() - 1);
    }

    fn clamp_col(&mut self) {
        self.col = self.col.min(KEYPAD[self.row].len() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_no_empty_rows() {
        assert!(!KEYPAD.is_empty());
        for row in KEYPAD {
            assert!(!row.is_empty());
        }
    }

    #[test]
    fn every_digit_is_on_the_grid() {
        for digit in '0'..='9' {
            let found = KEYPAD
                .iter()
                .flat_map(|row| row.iter())
                .any(|key| key.id == KeyId::Digit(digit));
            assert!(found, "digit {digit} missing from keypad");
        }
    }

    #[test]
    fn cursor_clamps_at_the_edges() {
        let mut cursor = KeypadCursor::default();
        cursor.move_up();
        cursor.move_left();
        assert_eq!(cursor, KeypadCursor { row: 0, col: 0 });

        for _ in 0..100 {
            cursor.move_down();
            cursor.move_right();
        }
        assert_eq!(cursor.row, KEYPAD.len() - 1);
        assert_eq!(cursor.col, KEYPAD[cursor.row].len() - 1);
    }

    #[test]
    fn cursor_clamps_column_when_changing_row_width() {
        // Bottom row is one key shorter than the rest.
        let mut cursor = KeypadCursor {
            row: KEYPAD.len() - 2,
            col: KEYPAD[KEYPAD.len() - 2].len() - 1,
        };
        cursor.move_down();
        assert_eq!(cursor.col, KEYPAD[cursor.row].len() - 1);
    }

    #[test]
    fn focused_key_lookup_matches_grid() {
        let cursor = KeypadCursor { row: 3, col: 0 };
        assert_eq!(cursor.key().id, KeyId::Digit('7'));
        assert_eq!(cursor.key().label, "7");
    }
}
