//! Tool palette, view modes, and keyboard shortcuts.
//!
//! | Tool | Click | Drag |
//! |------|-------|------|
//! | Select | select topmost component | — |
//! | Move | — | move the grabbed component by the drag delta |
//! | Rotate | turn the clicked component 90° | — |
//! | Delete | remove the clicked component | — |
//! | Measure | — | report distance, no mutation |

/// The active tool determines how pointer input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Move,
    Rotate,
    Delete,
    Measure,
}

impl ToolKind {
    /// Parse a tool name from the page. Unknown names select `Select`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "move" => ToolKind::Move,
            "rotate" => ToolKind::Rotate,
            "delete" => ToolKind::Delete,
            "measure" => ToolKind::Measure,
            _ => ToolKind::Select,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Move => "move",
            ToolKind::Rotate => "rotate",
            ToolKind::Delete => "delete",
            ToolKind::Measure => "measure",
        }
    }

    /// CSS cursor for the canvas while this tool is active.
    pub fn cursor(self) -> &'static str {
        match self {
            ToolKind::Select => "default",
            ToolKind::Move => "move",
            ToolKind::Rotate => "grab",
            ToolKind::Delete | ToolKind::Measure => "crosshair",
        }
    }
}

/// Which canvas is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    TwoD,
    ThreeD,
}

impl ViewMode {
    /// `"3d"` (any case) is the 3D view; everything else is 2D.
    pub fn parse(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("3d") {
            ViewMode::ThreeD
        } else {
            ViewMode::TwoD
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::TwoD => "2d",
            ViewMode::ThreeD => "3d",
        }
    }
}

// ─── Shortcuts ───────────────────────────────────────────────────────────

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Tool(ToolKind),
    Undo,
    Redo,
    /// Remove the selected component.
    Delete,
    ClearAll,
    Deselect,
    ToggleView,
}

/// Resolve a `KeyboardEvent.key` plus modifiers to an action. `ctrl` and
/// `meta` are interchangeable.
pub fn resolve_shortcut(key: &str, ctrl: bool, shift: bool, meta: bool) -> Option<ShortcutAction> {
    let cmd = ctrl || meta;

    if cmd && shift {
        return match key {
            "z" | "Z" => Some(ShortcutAction::Redo),
            _ => None,
        };
    }

    if cmd {
        return match key {
            "z" | "Z" => Some(ShortcutAction::Undo),
            "y" | "Y" => Some(ShortcutAction::Redo),
            "Delete" | "Backspace" => Some(ShortcutAction::ClearAll),
            _ => None,
        };
    }

    if shift {
        return None;
    }

    match key {
        "v" | "V" => Some(ShortcutAction::Tool(ToolKind::Select)),
        "m" | "M" => Some(ShortcutAction::Tool(ToolKind::Move)),
        "r" | "R" => Some(ShortcutAction::Tool(ToolKind::Rotate)),
        "d" | "D" => Some(ShortcutAction::Tool(ToolKind::Delete)),
        "u" | "U" => Some(ShortcutAction::Tool(ToolKind::Measure)),
        "Tab" => Some(ShortcutAction::ToggleView),
        "Delete" | "Backspace" => Some(ShortcutAction::Delete),
        "Escape" => Some(ShortcutAction::Deselect),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tools() {
        assert_eq!(ToolKind::parse("rotate"), ToolKind::Rotate);
        assert_eq!(ToolKind::parse(" Delete "), ToolKind::Delete);
        assert_eq!(ToolKind::parse("lasso"), ToolKind::Select);
    }

    #[test]
    fn cursors_per_tool() {
        assert_eq!(ToolKind::Select.cursor(), "default");
        assert_eq!(ToolKind::Move.cursor(), "move");
        assert_eq!(ToolKind::Rotate.cursor(), "grab");
        assert_eq!(ToolKind::Delete.cursor(), "crosshair");
        assert_eq!(ToolKind::Measure.cursor(), "crosshair");
    }

    #[test]
    fn parse_views() {
        assert_eq!(ViewMode::parse("3D"), ViewMode::ThreeD);
        assert_eq!(ViewMode::parse("2d"), ViewMode::TwoD);
        assert_eq!(ViewMode::parse("vr"), ViewMode::TwoD);
    }

    #[test]
    fn resolve_undo_redo() {
        assert_eq!(resolve_shortcut("z", true, false, false), Some(ShortcutAction::Undo));
        assert_eq!(resolve_shortcut("z", false, false, true), Some(ShortcutAction::Undo));
        assert_eq!(resolve_shortcut("z", false, true, true), Some(ShortcutAction::Redo));
        assert_eq!(resolve_shortcut("y", true, false, false), Some(ShortcutAction::Redo));
    }

    #[test]
    fn resolve_single_keys() {
        assert_eq!(
            resolve_shortcut("r", false, false, false),
            Some(ShortcutAction::Tool(ToolKind::Rotate))
        );
        assert_eq!(resolve_shortcut("Delete", false, false, false), Some(ShortcutAction::Delete));
        assert_eq!(resolve_shortcut("Backspace", true, false, false), Some(ShortcutAction::ClearAll));
        assert_eq!(resolve_shortcut("Escape", false, false, false), Some(ShortcutAction::Deselect));
        assert_eq!(resolve_shortcut("q", false, false, false), None);
        assert_eq!(resolve_shortcut("r", false, true, false), None);
    }
}
