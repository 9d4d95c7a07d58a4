use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tally::app::{build_runtime, CalcMode};
use tally::config::Config;
use tally::engine::{ConstantKey, FunctionKey};
use tally::runtime::frontend::{FrontendAdapter, ScrollAction, UserInputEvent};
use tally::runtime::mode::RuntimeMode;
use tally::terminal;
use tally::ui::keypad::{KeyId, KeypadCursor};
use tally::ui::layout::split_calculator_layout;
use tally::ui::render::{
    render_display, render_history_overlay, render_keypad, render_status_line,
};

const POLL_INTERVAL: Duration = Duration::from_millis(16);
const HISTORY_PAGE_STEP: usize = 8;

/// Keys handled while the history overlay is open: scrolling, closing, quit.
fn map_overlay_key(key: KeyEvent) -> Option<UserInputEvent> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(UserInputEvent::Interrupt)
        }
        KeyCode::Up => Some(UserInputEvent::HistoryScroll(ScrollAction::LineUp)),
        KeyCode::Down => Some(UserInputEvent::HistoryScroll(ScrollAction::LineDown)),
        KeyCode::PageUp => Some(UserInputEvent::HistoryScroll(ScrollAction::PageUp(
            HISTORY_PAGE_STEP,
        ))),
        KeyCode::PageDown => Some(UserInputEvent::HistoryScroll(ScrollAction::PageDown(
            HISTORY_PAGE_STEP,
        ))),
        KeyCode::Home => Some(UserInputEvent::HistoryScroll(ScrollAction::Home)),
        KeyCode::End => Some(UserInputEvent::HistoryScroll(ScrollAction::End)),
        KeyCode::Esc | KeyCode::Char('h') => Some(UserInputEvent::ToggleHistory),
        _ => None,
    }
}

/// Regular key handling: arrows move the keypad cursor, Space activates the
/// focused key, everything else is a direct shortcut. Enter always evaluates.
fn map_regular_key(cursor: &mut KeypadCursor, key: KeyEvent) -> Option<UserInputEvent> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(UserInputEvent::Interrupt)
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(UserInputEvent::Interrupt)
        }
        KeyCode::Up => {
            cursor.move_up();
            return None;
        }
        KeyCode::Down => {
            cursor.move_down();
            return None;
        }
        KeyCode::Left => {
            cursor.move_left();
            return None;
        }
        KeyCode::Right => {
            cursor.move_right();
            return None;
        }
        KeyCode::Char(' ') => return Some(UserInputEvent::Press(cursor.key().id)),
        KeyCode::Enter => return Some(UserInputEvent::Press(KeyId::Equals)),
        KeyCode::Backspace => return Some(UserInputEvent::Press(KeyId::Backspace)),
        KeyCode::Esc => return Some(UserInputEvent::Press(KeyId::Clear)),
        KeyCode::F(2) => return Some(UserInputEvent::CycleTheme),
        _ => {}
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }

    let KeyCode::Char(ch) = key.code else {
        return None;
    };
    let id = match ch {
        '0'..='9' => KeyId::Digit(ch),
        '.' => KeyId::Dot,
        '+' | '-' | '*' | '/' => KeyId::Operator(ch),
        '(' => KeyId::Function(FunctionKey::OpenParen),
        ')' => KeyId::Function(FunctionKey::CloseParen),
        '=' => KeyId::Equals,
        '^' => KeyId::Function(FunctionKey::Power),
        '!' => KeyId::Function(FunctionKey::Factorial),
        's' => KeyId::Function(FunctionKey::Sin),
        'c' => KeyId::Function(FunctionKey::Cos),
        't' => KeyId::Function(FunctionKey::Tan),
        'g' => KeyId::Function(FunctionKey::Log),
        'n' => KeyId::Function(FunctionKey::Ln),
        'r' => KeyId::Function(FunctionKey::Sqrt),
        'p' => KeyId::Constant(ConstantKey::Pi),
        'e' => KeyId::Constant(ConstantKey::E),
        'a' => KeyId::Ans,
        'm' => KeyId::Negate,
        'h' => return Some(UserInputEvent::ToggleHistory),
        _ => return None,
    };
    Some(UserInputEvent::Press(id))
}

struct ManagedTuiFrontend {
    terminal: terminal::TerminalType,
    cursor: KeypadCursor,
    quit: bool,
}

impl ManagedTuiFrontend {
    fn new() -> Result<Self> {
        Ok(Self {
            terminal: terminal::setup()?,
            cursor: KeypadCursor::default(),
            quit: false,
        })
    }

    fn idle_status(&self, mode: &CalcMode) -> String {
        format!(
            "{} | theme: {} | F2 theme  h history  ctrl+c quit",
            self.cursor.key().tooltip,
            mode.theme().name
        )
    }
}

impl Drop for ManagedTuiFrontend {
    fn drop(&mut self) {
        let _ = terminal::restore();
    }
}

impl FrontendAdapter<CalcMode> for ManagedTuiFrontend {
    fn poll_user_input(&mut self, mode: &CalcMode) -> Option<UserInputEvent> {
        if mode.quit_requested() {
            self.quit = true;
            return None;
        }

        let Ok(has_event) = event::poll(POLL_INTERVAL) else {
            self.quit = true;
            return None;
        };
        if !has_event {
            return None;
        }

        let Ok(ev) = event::read() else {
            self.quit = true;
            return None;
        };

        match ev {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Release {
                    return None;
                }
                if mode.overlay_active() {
                    map_overlay_key(key)
                } else {
                    map_regular_key(&mut self.cursor, key)
                }
            }
            _ => None,
        }
    }

    fn render(&mut self, mode: &CalcMode) {
        let theme = mode.theme();
        let status = mode
            .status_text()
            .map(str::to_string)
            .unwrap_or_else(|| self.idle_status(mode));
        let cursor = self.cursor;

        let _ = self.terminal.draw(|frame| {
            let panes = split_calculator_layout(frame.area());
            render_display(
                frame,
                panes.display,
                theme,
                mode.display_expression(),
                mode.preview_value(),
            );
            render_keypad(frame, panes.keypad, theme, cursor);
            render_status_line(frame, panes.status, theme, &status);

            if let Some((entries, scroll)) = mode.history_overlay() {
                render_history_overlay(frame, theme, entries, scroll);
            }
        });
    }

    fn should_quit(&self) -> bool {
        self.quit
    }
}

fn main() -> Result<()> {
    let config = Config::load()?;
    config.validate()?;

    let (mut runtime, mut ctx) = build_runtime(&config);
    let mut frontend = ManagedTuiFrontend::new()?;
    runtime.run(&mut frontend, &mut ctx);
    Ok(())
}
