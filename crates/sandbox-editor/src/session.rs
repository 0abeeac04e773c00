//! Design session: the single writer for one sandbox design.
//!
//! The session owns the design (store + ledger), the selection, the view
//! mode, the 2D surface, and the 3D scene sync. Each public mutation runs
//! to completion before returning: design updated, history recorded,
//! surface repainted, and the 3D scene updated when that view is active.
//! Callers cannot observe the design and its views out of step.

use crate::commands::{CommandStack, Edit};
use crate::tools::{ShortcutAction, ToolKind, ViewMode};
use kurbo::Point;
use sandbox_core::{
    Catalog, ComponentId, CostTotals, Design, DesignSnapshot, PlacedComponent, SandboxConfig,
};
use sandbox_render::{Renderer3d, SceneProjection, SceneSync, Surface2d, paint_design};

/// Degrees the rotate tool turns a component per click.
pub const ROTATE_STEP: i32 = 90;

/// Result of a click routed through the active tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    Selected(Option<ComponentId>),
    Removed(Option<PlacedComponent>),
    Rotated(Option<ComponentId>),
    Ignored,
}

/// Distance reported by the measure tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub from: Point,
    pub to: Point,
    /// Canvas units.
    pub length: f64,
    /// `length` in grid cells.
    pub grid_units: f64,
}

/// Result of a drag routed through the active tool.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    Moved(ComponentId),
    Measured(Measurement),
    Ignored,
}

pub struct DesignSession<S: Surface2d> {
    config: SandboxConfig,
    design: Design,
    surface: S,
    scene: SceneSync,
    history: CommandStack,
    selection: Option<ComponentId>,
    view: ViewMode,
    tool: ToolKind,
}

impl<S: Surface2d> DesignSession<S> {
    /// A session over the built-in catalog.
    pub fn new(surface: S, config: &SandboxConfig) -> Self {
        Self::with_catalog(surface, Catalog::builtin(), config)
    }

    pub fn with_catalog(surface: S, catalog: Catalog, config: &SandboxConfig) -> Self {
        let mut session = Self {
            config: config.clone(),
            design: Design::new(catalog, config),
            surface,
            scene: SceneSync::new(SceneProjection::from_config(config)),
            history: CommandStack::new(config.undo_depth),
            selection: None,
            view: ViewMode::TwoD,
            tool: ToolKind::Select,
        };
        session.redraw();
        session
    }

    // ─── Reads ───────────────────────────────────────────────────────────

    pub fn design(&self) -> &Design {
        &self.design
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface itself (resize, context swaps). The
    /// design is not reachable through this.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn selection(&self) -> Option<&PlacedComponent> {
        self.selection.and_then(|id| self.design.get(id))
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn totals(&self) -> CostTotals {
        self.design.totals()
    }

    pub fn snapshot(&self) -> DesignSnapshot {
        self.design.snapshot()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn has_renderer_3d(&self) -> bool {
        self.scene.has_renderer()
    }

    /// Replace the whole design with a saved one. History and selection
    /// are dropped; both views are rebuilt.
    pub fn load_snapshot(&mut self, snapshot: &DesignSnapshot) {
        let catalog = self.design.catalog().clone();
        self.design = Design::from_snapshot(snapshot, catalog, &self.config);
        self.history.clear();
        self.selection = None;
        self.redraw();
        if self.view == ViewMode::ThreeD {
            self.scene.activate(self.design.catalog(), self.design.components());
        }
        log::debug!("loaded design with {} components", self.design.len());
    }

    // ─── View & tool ─────────────────────────────────────────────────────

    /// Attach the 3D renderer. If the 3D view is already showing, the new
    /// renderer is filled immediately.
    pub fn attach_renderer_3d(&mut self, renderer: Box<dyn Renderer3d>) {
        self.scene.attach(renderer);
        if self.view == ViewMode::ThreeD {
            self.scene.activate(self.design.catalog(), self.design.components());
        }
    }

    pub fn detach_renderer_3d(&mut self) -> Option<Box<dyn Renderer3d>> {
        self.scene.detach()
    }

    /// Switch views. Entering 3D always rebuilds the whole scene.
    pub fn switch_view(&mut self, view: ViewMode) {
        self.view = view;
        match view {
            ViewMode::ThreeD => {
                self.scene.activate(self.design.catalog(), self.design.components());
            }
            ViewMode::TwoD => {
                self.scene.deactivate();
                self.redraw();
            }
        }
    }

    /// Select a tool and return the cursor the canvas should show.
    pub fn set_tool(&mut self, tool: ToolKind) -> &'static str {
        self.tool = tool;
        tool.cursor()
    }

    /// Repaint the 2D surface from the current design.
    pub fn redraw(&mut self) {
        paint_design(
            &mut self.surface,
            self.design.catalog(),
            self.design.components(),
            self.selection,
        );
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Drop a component of type `kind` at a raw canvas point.
    pub fn place(&mut self, kind: &str, x: f64, y: f64) -> PlacedComponent {
        let component = self.design.place(kind, x, y);
        self.history.record(Edit::Place {
            component: component.clone(),
        });
        self.redraw();
        self.scene.added(self.design.catalog(), &component);
        component
    }

    /// Remove the topmost component at a point.
    pub fn remove_at(&mut self, x: f64, y: f64) -> Option<PlacedComponent> {
        let id = self.design.find_at(x, y)?.id;
        self.remove(id)
    }

    pub fn remove_selected(&mut self) -> Option<PlacedComponent> {
        let id = self.selection?;
        self.remove(id)
    }

    fn remove(&mut self, id: ComponentId) -> Option<PlacedComponent> {
        let (index, component) = self.design.remove(id)?;
        self.history.record(Edit::Remove {
            index,
            component: component.clone(),
        });
        if self.selection == Some(id) {
            self.selection = None;
        }
        self.redraw();
        self.scene.removed(id);
        Some(component)
    }

    /// Remove everything. Returns how many components were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.design.clear();
        let count = removed.len();
        if count > 0 {
            self.history.record(Edit::Clear { components: removed });
        }
        self.selection = None;
        self.redraw();
        self.scene.cleared();
        count
    }

    /// Move a component so its top-left lands on the grid point nearest
    /// `(x, y)`. Returns `false` for an unknown id.
    pub fn move_component(&mut self, id: ComponentId, x: f64, y: f64) -> bool {
        let Some(from) = self.design.move_to(id, x, y) else {
            return false;
        };
        let Some(moved) = self.design.get(id).cloned() else {
            return false;
        };
        let to = (moved.x, moved.y);
        if to != from {
            self.history.record(Edit::Move { id, from, to });
            self.redraw();
            self.scene.changed(self.design.catalog(), &moved);
        }
        true
    }

    /// Rotate a component by `delta` degrees.
    pub fn rotate_component(&mut self, id: ComponentId, delta: i32) -> bool {
        let Some(from) = self.design.rotate(id, delta) else {
            return false;
        };
        let Some(turned) = self.design.get(id).cloned() else {
            return false;
        };
        if turned.rotation != from {
            self.history.record(Edit::Rotate {
                id,
                from,
                to: turned.rotation,
            });
            self.redraw();
            self.scene.changed(self.design.catalog(), &turned);
        }
        true
    }

    /// Select the topmost component at a point, or clear the selection.
    pub fn select_at(&mut self, x: f64, y: f64) -> Option<ComponentId> {
        self.selection = self.design.find_at(x, y).map(|c| c.id);
        self.redraw();
        self.selection
    }

    pub fn deselect(&mut self) {
        if self.selection.take().is_some() {
            self.redraw();
        }
    }

    pub fn undo(&mut self) -> Option<String> {
        let edit = self.history.undo(&mut self.design)?;
        self.after_history(&edit, true);
        Some(edit.description())
    }

    pub fn redo(&mut self) -> Option<String> {
        let edit = self.history.redo(&mut self.design)?;
        self.after_history(&edit, false);
        Some(edit.description())
    }

    /// Bring selection and both views in line after an undo/redo.
    fn after_history(&mut self, edit: &Edit, undone: bool) {
        if let Some(id) = self.selection
            && self.design.get(id).is_none()
        {
            self.selection = None;
        }
        self.redraw();

        let catalog = self.design.catalog();
        match (edit, undone) {
            (Edit::Place { component }, true) | (Edit::Remove { component, .. }, false) => {
                self.scene.removed(component.id);
            }
            (Edit::Place { component }, false) | (Edit::Remove { component, .. }, true) => {
                self.scene.added(catalog, component);
            }
            (Edit::Clear { components }, true) => {
                for c in components {
                    self.scene.added(catalog, c);
                }
            }
            (Edit::Clear { .. }, false) => self.scene.cleared(),
            (Edit::Move { id, .. } | Edit::Rotate { id, .. }, _) => {
                if let Some(c) = self.design.get(*id) {
                    self.scene.changed(catalog, c);
                }
            }
        }
    }

    /// Run a resolved keyboard shortcut.
    pub fn apply_shortcut(&mut self, action: ShortcutAction) {
        match action {
            ShortcutAction::Tool(tool) => {
                self.set_tool(tool);
            }
            ShortcutAction::Undo => {
                self.undo();
            }
            ShortcutAction::Redo => {
                self.redo();
            }
            ShortcutAction::Delete => {
                self.remove_selected();
            }
            ShortcutAction::ClearAll => {
                self.clear();
            }
            ShortcutAction::Deselect => self.deselect(),
            ShortcutAction::ToggleView => {
                let next = match self.view {
                    ViewMode::TwoD => ViewMode::ThreeD,
                    ViewMode::ThreeD => ViewMode::TwoD,
                };
                self.switch_view(next);
            }
        }
    }

    // ─── Pointer dispatch ────────────────────────────────────────────────

    /// Route a click through the active tool.
    pub fn handle_click(&mut self, x: f64, y: f64) -> ClickOutcome {
        match self.tool {
            ToolKind::Select => ClickOutcome::Selected(self.select_at(x, y)),
            ToolKind::Delete => ClickOutcome::Removed(self.remove_at(x, y)),
            ToolKind::Rotate => {
                let hit = self.design.find_at(x, y).map(|c| c.id);
                if let Some(id) = hit {
                    self.rotate_component(id, ROTATE_STEP);
                }
                ClickOutcome::Rotated(hit)
            }
            ToolKind::Move | ToolKind::Measure => ClickOutcome::Ignored,
        }
    }

    /// Route a completed drag (press at `from`, release at `to`) through
    /// the active tool.
    pub fn handle_drag(&mut self, from: (f64, f64), to: (f64, f64)) -> DragOutcome {
        match self.tool {
            ToolKind::Move => {
                let Some(grabbed) = self.design.find_at(from.0, from.1) else {
                    return DragOutcome::Ignored;
                };
                let id = grabbed.id;
                let target = (
                    grabbed.x as f64 + (to.0 - from.0),
                    grabbed.y as f64 + (to.1 - from.1),
                );
                self.selection = Some(id);
                if !self.move_component(id, target.0, target.1) {
                    return DragOutcome::Ignored;
                }
                // Selection changed even if the position did not.
                self.redraw();
                DragOutcome::Moved(id)
            }
            ToolKind::Measure => {
                let (a, b) = (Point::new(from.0, from.1), Point::new(to.0, to.1));
                let length = a.distance(b);
                DragOutcome::Measured(Measurement {
                    from: a,
                    to: b,
                    length,
                    grid_units: length / self.design.grid_size() as f64,
                })
            }
            _ => DragOutcome::Ignored,
        }
    }
}
