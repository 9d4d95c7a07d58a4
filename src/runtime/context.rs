use crate::engine::Engine;

/// Owned context passed into every `RuntimeMode` callback. The engine is the
/// only shared mutable state in the process, and only the event-dispatch loop
/// ever touches it, so no locking discipline is needed.
pub struct RuntimeContext {
    pub engine: Engine,
}

impl RuntimeContext {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }
}
