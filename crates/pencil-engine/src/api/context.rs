use crate::api::types::AnimationEvent;
use crate::scene::SceneCommand;

/// Per-frame output of the animation, drained by the embedding layer.
///
/// The controller only ever appends. Whoever owns the rendering surface
/// applies `commands` in order and forwards `events` to its callbacks.
#[derive(Debug, Default)]
pub struct AnimationContext {
    pub commands: Vec<SceneCommand>,
    pub events: Vec<AnimationEvent>,
}

impl AnimationContext {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(16),
            events: Vec::with_capacity(4),
        }
    }

    /// Queue a scene mutation for the rendering adapter.
    pub fn emit(&mut self, command: SceneCommand) {
        self.commands.push(command);
    }

    /// Queue an event for the embedding UI.
    pub fn emit_event(&mut self, event: AnimationEvent) {
        self.events.push(event);
    }

    /// Take all pending scene commands.
    pub fn drain_commands(&mut self) -> Vec<SceneCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Take all pending events.
    pub fn drain_events(&mut self) -> Vec<AnimationEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop whatever the previous frame left behind.
    pub fn clear_frame_data(&mut self) {
        self.commands.clear();
        self.events.clear();
    }
}
