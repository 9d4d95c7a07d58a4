use super::{context::RuntimeContext, frontend::FrontendAdapter, mode::RuntimeMode};

/// Single-threaded, strictly synchronous event loop: tick, render, poll one
/// input event, dispatch it, repeat until the frontend quits. No operation
/// suspends or spawns background work.
pub struct Runtime<M: RuntimeMode> {
    pub mode: M,
}

impl<M: RuntimeMode> Runtime<M> {
    pub fn new(mode: M) -> Self {
        Self { mode }
    }

    pub fn run<F: FrontendAdapter<M>>(&mut self, frontend: &mut F, ctx: &mut RuntimeContext) {
        loop {
            self.mode.on_tick(ctx);
            frontend.render(&self.mode);
            if frontend.should_quit() {
                break;
            }
            if let Some(event) = frontend.poll_user_input(&self.mode) {
                self.mode.on_frontend_event(event, ctx);
            }
            if frontend.should_quit() {
                break;
            }
        }
    }
}
