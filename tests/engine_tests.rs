use tally::engine::{ConstantKey, Engine, EvalError, FunctionKey};

fn paren_depth(text: &str) -> i32 {
    text.chars().fold(0, |depth, ch| match ch {
        '(' => depth + 1,
        ')' => depth - 1,
        _ => depth,
    })
}

#[test]
fn append_sequences_keep_buffers_aligned() {
    let mut engine = Engine::new(100);
    engine.append_literal("2");
    engine.append_function(FunctionKey::Power);
    engine.append_function(FunctionKey::OpenParen);
    engine.append_function(FunctionKey::Sin);
    engine.append_constant(ConstantKey::Pi);
    engine.append_function(FunctionKey::CloseParen);
    engine.append_literal("+");
    engine.append_literal("1");
    engine.append_function(FunctionKey::CloseParen);

    let raw = engine.raw_expression();
    let display = engine.display_expression();
    assert_eq!(raw, "2**(sin(3.141592653589793)+1)");
    assert_eq!(display, "2^(sin(\u{3c0})+1)");
    assert_eq!(paren_depth(&raw), paren_depth(&display));
}

#[test]
fn simple_sum_updates_history_and_seeds_result() {
    let mut engine = Engine::new(100);
    engine.append_literal("2+3");
    assert_eq!(engine.evaluate().unwrap(), 5.0);
    assert_eq!(engine.raw_expression(), "5");
    assert_eq!(engine.display_expression(), "5");
    assert_eq!(engine.history().len(), 1);
    assert_eq!(engine.history()[0].expression, "2+3");
    assert_eq!(engine.history()[0].value, 5.0);
}

#[test]
fn division_by_zero_resets_to_empty() {
    let mut engine = Engine::new(100);
    engine.append_literal("5/0");
    assert_eq!(engine.evaluate(), Err(EvalError::DivideByZero));
    assert_eq!(engine.raw_expression(), "");
    assert_eq!(engine.display_expression(), "");
}

#[test]
fn sqrt_button_sequence_evaluates_to_three() {
    let mut engine = Engine::new(100);
    engine.append_function(FunctionKey::Sqrt);
    engine.append_literal("9");
    engine.append_function(FunctionKey::CloseParen);
    assert_eq!(engine.evaluate().unwrap(), 3.0);
}

#[test]
fn negate_rewrites_the_trailing_literal() {
    let mut engine = Engine::new(100);
    engine.append_literal("12+7");
    engine.negate_last_number();
    assert_eq!(engine.raw_expression(), "12+-7");
    assert_eq!(engine.display_expression(), "12+-7");
}

#[test]
fn ans_shows_a_marker_but_evaluates_numerically() {
    let mut engine = Engine::new(100);
    engine.append_literal("2+3");
    engine.evaluate().unwrap();
    engine.clear();

    engine.recall_last_answer();
    assert_eq!(engine.raw_expression(), "5");
    assert_eq!(engine.display_expression(), "Ans");
}

#[test]
fn backspace_on_empty_state_is_a_noop() {
    let mut engine = Engine::new(100);
    engine.backspace();
    assert!(engine.state().is_empty());
    assert_eq!(engine.raw_expression(), "");
}

#[test]
fn double_clear_equals_single_clear() {
    let mut engine = Engine::new(100);
    engine.append_literal("1+2");
    engine.clear();
    let raw_once = engine.raw_expression();
    let display_once = engine.display_expression();
    engine.clear();
    assert_eq!(engine.raw_expression(), raw_once);
    assert_eq!(engine.display_expression(), display_once);
}
