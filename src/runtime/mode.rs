use super::context::RuntimeContext;
use super::frontend::UserInputEvent;

pub trait RuntimeMode {
    fn on_frontend_event(&mut self, event: UserInputEvent, ctx: &mut RuntimeContext);
    fn on_tick(&mut self, _ctx: &mut RuntimeContext) {}
    fn quit_requested(&self) -> bool {
        false
    }
}
