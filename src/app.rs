use crate::config::Config;
use crate::engine::{Engine, EvalError, HistoryEntry};
use crate::runtime::context::RuntimeContext;
use crate::runtime::frontend::{ScrollAction, UserInputEvent};
use crate::runtime::mode::RuntimeMode;
use crate::runtime::r#loop::Runtime;
use crate::ui::keypad::KeyId;
use crate::ui::theme::{Theme, THEMES};
use std::time::{Duration, Instant};

const STATUS_DECAY: Duration = Duration::from_millis(2500);

struct StatusMessage {
    text: String,
    expires_at: Instant,
}

#[derive(Default)]
struct HistoryOverlay {
    scroll: usize,
}

/// TUI application state. Every UI callback is a thin adapter: it invokes one
/// engine operation, then re-renders from the engine's state. Presentation
/// code never mutates expression buffers directly.
pub struct CalcMode {
    display: String,
    preview: String,
    history_snapshot: Vec<HistoryEntry>,
    overlay: Option<HistoryOverlay>,
    status: Option<StatusMessage>,
    theme_index: usize,
    quit: bool,
}

impl CalcMode {
    pub fn new(config: &Config) -> Self {
        Self {
            display: String::new(),
            preview: String::new(),
            history_snapshot: Vec::new(),
            overlay: None,
            status: None,
            theme_index: Theme::index_of(&config.theme).unwrap_or(0),
            quit: false,
        }
    }

    pub fn theme(&self) -> &'static Theme {
        &THEMES[self.theme_index]
    }

    pub fn display_expression(&self) -> &str {
        &self.display
    }

    pub fn preview_value(&self) -> &str {
        &self.preview
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    pub fn overlay_active(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn history_overlay(&self) -> Option<(&[HistoryEntry], usize)> {
        self.overlay
            .as_ref()
            .map(|overlay| (self.history_snapshot.as_slice(), overlay.scroll))
    }

    fn press(&mut self, key: KeyId, ctx: &mut RuntimeContext) {
        if self.overlay_active() {
            // The overlay swallows everything except its own toggle.
            if key == KeyId::History {
                self.overlay = None;
            }
            return;
        }

        match key {
            KeyId::Digit(digit) => ctx.engine.append_literal(&digit.to_string()),
            KeyId::Dot => ctx.engine.append_literal("."),
            KeyId::Operator(op) => ctx.engine.append_literal(&op.to_string()),
            KeyId::Function(function) => ctx.engine.append_function(function),
            KeyId::Constant(constant) => ctx.engine.append_constant(constant),
            KeyId::Equals => match ctx.engine.evaluate() {
                Ok(_) => self.status = None,
                Err(err) => self.set_status(error_message(&err)),
            },
            KeyId::Backspace => ctx.engine.backspace(),
            KeyId::Clear => ctx.engine.clear(),
            KeyId::Negate => ctx.engine.negate_last_number(),
            KeyId::Ans => ctx.engine.recall_last_answer(),
            KeyId::History => self.toggle_history(),
        }

        self.sync_from_engine(ctx);
    }

    fn toggle_history(&mut self) {
        self.overlay = match self.overlay {
            Some(_) => None,
            None => Some(HistoryOverlay::default()),
        };
    }

    fn apply_history_scroll(&mut self, action: ScrollAction) {
        let max = self.history_snapshot.len().saturating_sub(1);
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.scroll = match action {
                ScrollAction::LineUp => overlay.scroll.saturating_sub(1),
                ScrollAction::LineDown => overlay.scroll + 1,
                ScrollAction::PageUp(step) => overlay.scroll.saturating_sub(step.max(1)),
                ScrollAction::PageDown(step) => overlay.scroll + step.max(1),
                ScrollAction::Home => 0,
                ScrollAction::End => max,
            }
            .min(max);
        }
    }

    fn set_status(&mut self, text: String) {
        self.status = Some(StatusMessage {
            text,
            expires_at: Instant::now() + STATUS_DECAY,
        });
    }

    fn sync_from_engine(&mut self, ctx: &RuntimeContext) {
        self.display = ctx.engine.display_expression();
        self.preview = ctx.engine.preview().unwrap_or_default();
        self.history_snapshot = ctx.engine.history().to_vec();
    }

    #[cfg(test)]
    fn expire_status_now(&mut self) {
        if let Some(status) = self.status.as_mut() {
            status.expires_at = Instant::now() - Duration::from_millis(1);
        }
    }
}

fn error_message(err: &EvalError) -> String {
    match err {
        EvalError::DivideByZero => "Error: division by zero".to_string(),
        EvalError::MathDomainError(message) => format!("Error: {message}"),
        EvalError::InvalidExpression => "Error: invalid expression".to_string(),
    }
}

impl RuntimeMode for CalcMode {
    fn on_frontend_event(&mut self, event: UserInputEvent, ctx: &mut RuntimeContext) {
        match event {
            UserInputEvent::Press(key) => self.press(key, ctx),
            UserInputEvent::ToggleHistory => {
                self.sync_from_engine(ctx);
                self.toggle_history();
            }
            UserInputEvent::HistoryScroll(action) => self.apply_history_scroll(action),
            UserInputEvent::CycleTheme => {
                self.theme_index = (self.theme_index + 1) % THEMES.len();
                self.set_status(format!("theme: {}", self.theme().name));
            }
            UserInputEvent::Interrupt => self.quit = true,
        }
    }

    fn on_tick(&mut self, _ctx: &mut RuntimeContext) {
        if let Some(status) = &self.status {
            if Instant::now() >= status.expires_at {
                self.status = None;
            }
        }
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

pub fn build_runtime(config: &Config) -> (Runtime<CalcMode>, RuntimeContext) {
    let mode = CalcMode::new(config);
    let ctx = RuntimeContext::new(Engine::new(config.history_limit));
    (Runtime::new(mode), ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_HISTORY_LIMIT, DEFAULT_THEME};
    use crate::engine::FunctionKey;

    fn make_mode_and_ctx() -> (CalcMode, RuntimeContext) {
        let config = Config {
            theme: DEFAULT_THEME.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        };
        let (runtime, ctx) = build_runtime(&config);
        (runtime.mode, ctx)
    }

    #[test]
    fn presses_flow_through_to_the_display() {
        let (mut mode, mut ctx) = make_mode_and_ctx();
        for key in [
            KeyId::Digit('2'),
            KeyId::Operator('+'),
            KeyId::Digit('3'),
        ] {
            mode.on_frontend_event(UserInputEvent::Press(key), &mut ctx);
        }
        assert_eq!(mode.display_expression(), "2+3");
        assert_eq!(mode.preview_value(), "5");
    }

    #[test]
    fn evaluation_error_sets_status_and_clears_display() {
        let (mut mode, mut ctx) = make_mode_and_ctx();
        for key in [
            KeyId::Digit('5'),
            KeyId::Operator('/'),
            KeyId::Digit('0'),
            KeyId::Equals,
        ] {
            mode.on_frontend_event(UserInputEvent::Press(key), &mut ctx);
        }
        assert_eq!(mode.display_expression(), "");
        assert_eq!(mode.status_text(), Some("Error: division by zero"));
    }

    #[test]
    fn status_decays_on_tick() {
        let (mut mode, mut ctx) = make_mode_and_ctx();
        mode.on_frontend_event(UserInputEvent::Press(KeyId::Equals), &mut ctx);
        assert!(mode.status_text().is_some());

        mode.on_tick(&mut ctx);
        assert!(mode.status_text().is_some(), "status must outlive one tick");

        mode.expire_status_now();
        mode.on_tick(&mut ctx);
        assert_eq!(mode.status_text(), None);
    }

    #[test]
    fn history_overlay_toggles_and_swallows_presses() {
        let (mut mode, mut ctx) = make_mode_and_ctx();
        for key in [KeyId::Digit('1'), KeyId::Operator('+'), KeyId::Digit('1'), KeyId::Equals] {
            mode.on_frontend_event(UserInputEvent::Press(key), &mut ctx);
        }

        mode.on_frontend_event(UserInputEvent::ToggleHistory, &mut ctx);
        assert!(mode.overlay_active());
        let (entries, scroll) = mode.history_overlay().expect("overlay open");
        assert_eq!(entries.len(), 1);
        assert_eq!(scroll, 0);

        // Keys other than the history toggle are ignored under the overlay.
        mode.on_frontend_event(UserInputEvent::Press(KeyId::Digit('9')), &mut ctx);
        assert_eq!(mode.display_expression(), "2");

        mode.on_frontend_event(UserInputEvent::Press(KeyId::History), &mut ctx);
        assert!(!mode.overlay_active());
    }

    #[test]
    fn history_scroll_clamps_to_entries() {
        let (mut mode, mut ctx) = make_mode_and_ctx();
        for _ in 0..3 {
            for key in [KeyId::Digit('1'), KeyId::Operator('+'), KeyId::Digit('1'), KeyId::Equals] {
                mode.on_frontend_event(UserInputEvent::Press(key), &mut ctx);
            }
            mode.on_frontend_event(UserInputEvent::Press(KeyId::Clear), &mut ctx);
        }
        mode.on_frontend_event(UserInputEvent::ToggleHistory, &mut ctx);

        mode.on_frontend_event(
            UserInputEvent::HistoryScroll(ScrollAction::PageDown(50)),
            &mut ctx,
        );
        assert_eq!(mode.history_overlay().unwrap().1, 2);

        mode.on_frontend_event(
            UserInputEvent::HistoryScroll(ScrollAction::Home),
            &mut ctx,
        );
        assert_eq!(mode.history_overlay().unwrap().1, 0);

        mode.on_frontend_event(UserInputEvent::HistoryScroll(ScrollAction::End), &mut ctx);
        assert_eq!(mode.history_overlay().unwrap().1, 2);
    }

    #[test]
    fn theme_cycle_wraps_around() {
        let (mut mode, mut ctx) = make_mode_and_ctx();
        let start = mode.theme().name;
        for _ in 0..THEMES.len() {
            mode.on_frontend_event(UserInputEvent::CycleTheme, &mut ctx);
        }
        assert_eq!(mode.theme().name, start);
    }

    #[test]
    fn function_press_uses_translation_pair() {
        let (mut mode, mut ctx) = make_mode_and_ctx();
        mode.on_frontend_event(
            UserInputEvent::Press(KeyId::Function(FunctionKey::Sqrt)),
            &mut ctx,
        );
        assert_eq!(mode.display_expression(), "\u{221a}(");
        assert_eq!(ctx.engine.raw_expression(), "sqrt(");
    }

    #[test]
    fn interrupt_requests_quit() {
        let (mut mode, mut ctx) = make_mode_and_ctx();
        assert!(!mode.quit_requested());
        mode.on_frontend_event(UserInputEvent::Interrupt, &mut ctx);
        assert!(mode.quit_requested());
    }
}
