use crate::command::Command;
use crate::config::CanvasConfig;
use crate::event::{CanvasEvent, EventBus};
use crate::tools::{Tool, ToolKind, ToolType};

/// Which tool is active, plus the things needed to swap it
#[derive(Debug, Clone)]
pub struct EditorState {
    active_tool: ToolType,
}

impl EditorState {
    pub fn new(initial: ToolKind, config: &CanvasConfig) -> Self {
        let mut active_tool = ToolType::new(initial, config);
        active_tool.activate();
        Self { active_tool }
    }

    pub fn active_tool(&self) -> &ToolType {
        &self.active_tool
    }

    pub fn active_tool_mut(&mut self) -> &mut ToolType {
        &mut self.active_tool
    }

    pub fn active_kind(&self) -> ToolKind {
        self.active_tool.kind()
    }

    /// Swap in a fresh tool of `kind`.
    ///
    /// Returns the command that finishes the old tool's gesture, which must be
    /// executed before any input reaches the new tool.
    pub fn set_active_tool(&mut self, kind: ToolKind, config: &CanvasConfig, event_bus: &EventBus) -> Option<Command> {
        let old = self.active_kind();
        if old == kind {
            return None;
        }

        let finish = self.active_tool.deactivate();
        let mut new_tool = ToolType::new(kind, config);
        new_tool.activate();
        self.active_tool = new_tool;

        event_bus.emit(CanvasEvent::ToolChanged { old, new: kind });
        finish
    }
}
