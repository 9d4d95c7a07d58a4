use super::mode::RuntimeMode;
use crate::ui::keypad::KeyId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollAction {
    LineUp,
    LineDown,
    PageUp(usize),
    PageDown(usize),
    Home,
    End,
}

/// Discrete input events the frontend translates key presses and button
/// activations into. Each one runs to completion before the next is polled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserInputEvent {
    /// A calculator key was activated, by shortcut or via the keypad cursor.
    Press(KeyId),
    ToggleHistory,
    HistoryScroll(ScrollAction),
    CycleTheme,
    Interrupt,
}

pub trait FrontendAdapter<M: RuntimeMode> {
    fn poll_user_input(&mut self, mode: &M) -> Option<UserInputEvent>;
    fn render(&mut self, mode: &M);
    fn should_quit(&self) -> bool;
}
