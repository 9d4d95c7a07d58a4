pub mod context;
pub mod frontend;
pub mod r#loop;
pub mod mode;

#[cfg(test)]
mod tests {
    use crate::engine::Engine;
    use crate::runtime::context::RuntimeContext;
    use crate::runtime::frontend::{FrontendAdapter, UserInputEvent};
    use crate::runtime::mode::RuntimeMode;
    use crate::runtime::r#loop::Runtime;

    struct CountingMode {
        events: usize,
        ticks: usize,
    }

    impl RuntimeMode for CountingMode {
        fn on_frontend_event(&mut self, _event: UserInputEvent, _ctx: &mut RuntimeContext) {
            self.events += 1;
        }

        fn on_tick(&mut self, _ctx: &mut RuntimeContext) {
            self.ticks += 1;
        }
    }

    struct ScriptedFrontend {
        script: Vec<Option<UserInputEvent>>,
        renders: usize,
    }

    impl FrontendAdapter<CountingMode> for ScriptedFrontend {
        fn poll_user_input(&mut self, _mode: &CountingMode) -> Option<UserInputEvent> {
            self.script.pop().flatten()
        }

        fn render(&mut self, _mode: &CountingMode) {
            self.renders += 1;
        }

        fn should_quit(&self) -> bool {
            self.script.is_empty()
        }
    }

    #[test]
    fn runtime_dispatches_events_until_frontend_quits() {
        let mut runtime = Runtime::new(CountingMode { events: 0, ticks: 0 });
        let mut ctx = RuntimeContext::new(Engine::new(8));
        let mut frontend = ScriptedFrontend {
            script: vec![
                Some(UserInputEvent::Interrupt),
                None,
                Some(UserInputEvent::ToggleHistory),
            ],
            renders: 0,
        };

        runtime.run(&mut frontend, &mut ctx);

        assert_eq!(runtime.mode.events, 2);
        assert!(runtime.mode.ticks >= 3);
        assert!(frontend.renders >= 3);
        assert!(frontend.should_quit());
    }
}
