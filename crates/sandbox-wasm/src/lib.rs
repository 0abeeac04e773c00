//! WASM bridge for the project sandbox page.
//!
//! Compiled via `wasm-pack build --target web`. The page forwards drop,
//! pointer and keyboard events here and reads back cost totals and the
//! design snapshot as JSON. Lead submission stays on the page side: it
//! posts `snapshot_json()` to its document store.

mod canvas;

pub use canvas::{Canvas2dSurface, JsRenderer3d};

use sandbox_core::{DesignSnapshot, SandboxConfig};
use sandbox_editor::{
    ClickOutcome, DesignSession, DragOutcome, ToolKind, ViewMode, resolve_shortcut,
};
use serde_json::json;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The page-facing sandbox controller. Every call repaints the canvas
/// before it returns.
#[wasm_bindgen]
pub struct SandboxCanvas {
    session: DesignSession<Canvas2dSurface>,
}

#[wasm_bindgen]
impl SandboxCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        console_error_panic_hook_setup();
        let surface = Canvas2dSurface::new(ctx, width, height);
        Self {
            session: DesignSession::new(surface, &SandboxConfig::default()),
        }
    }

    /// Like `new`, with settings read from a JSON object. Missing fields
    /// keep their defaults.
    pub fn with_config(
        ctx: CanvasRenderingContext2d,
        width: f64,
        height: f64,
        config_json: &str,
    ) -> Result<SandboxCanvas, JsValue> {
        console_error_panic_hook_setup();
        let config =
            SandboxConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let surface = Canvas2dSurface::new(ctx, width, height);
        Ok(Self {
            session: DesignSession::new(surface, &config),
        })
    }

    /// Place a component dropped from the palette. Returns its id, which
    /// never exceeds `MAX_RAW_ID` and so survives the trip through `f64`.
    pub fn drop_component(&mut self, kind: &str, x: f64, y: f64) -> f64 {
        self.session.place(kind, x, y).id.get() as f64
    }

    /// Route a click through the active tool. Returns `true` when the
    /// design or selection changed.
    pub fn click(&mut self, x: f64, y: f64) -> bool {
        match self.session.handle_click(x, y) {
            ClickOutcome::Selected(_) => true,
            ClickOutcome::Removed(removed) => removed.is_some(),
            ClickOutcome::Rotated(hit) => hit.is_some(),
            ClickOutcome::Ignored => false,
        }
    }

    /// Route a completed drag through the active tool. Returns a JSON
    /// object: `{"moved": id}`, `{"length": px, "grid_units": n}`, or `{}`.
    pub fn drag(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> String {
        match self.session.handle_drag((x0, y0), (x1, y1)) {
            DragOutcome::Moved(id) => json!({ "moved": id.get() }),
            DragOutcome::Measured(m) => json!({
                "length": m.length,
                "grid_units": m.grid_units,
            }),
            DragOutcome::Ignored => json!({}),
        }
        .to_string()
    }

    /// Select a tool by name. Returns the CSS cursor to show.
    pub fn set_tool(&mut self, name: &str) -> String {
        self.session.set_tool(ToolKind::parse(name)).to_string()
    }

    pub fn tool(&self) -> String {
        self.session.tool().as_str().to_string()
    }

    /// `"2d"` or `"3d"`.
    pub fn switch_view(&mut self, name: &str) {
        self.session.switch_view(ViewMode::parse(name));
    }

    pub fn view(&self) -> String {
        self.session.view().as_str().to_string()
    }

    /// Hand over the page's 3D scene object.
    pub fn attach_renderer_3d(&mut self, renderer: JsValue) {
        if renderer.is_null() || renderer.is_undefined() {
            log::info!("no 3D renderer given; staying 2D only");
            self.session.detach_renderer_3d();
            return;
        }
        self.session
            .attach_renderer_3d(Box::new(JsRenderer3d::new(renderer)));
    }

    /// Undo the last edit. Returns its description, or `undefined`.
    pub fn undo(&mut self) -> Option<String> {
        self.session.undo()
    }

    pub fn redo(&mut self) -> Option<String> {
        self.session.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.session.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.session.can_redo()
    }

    /// Remove every component. Returns how many were removed.
    pub fn clear_all(&mut self) -> u32 {
        self.session.clear() as u32
    }

    pub fn delete_selected(&mut self) -> bool {
        self.session.remove_selected().is_some()
    }

    /// Handle a keydown. Returns `true` if it was a sandbox shortcut, so the
    /// page can `preventDefault()`.
    pub fn key_down(&mut self, key: &str, ctrl: bool, shift: bool, meta: bool) -> bool {
        match resolve_shortcut(key, ctrl, shift, meta) {
            Some(action) => {
                self.session.apply_shortcut(action);
                true
            }
            None => false,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.session.surface_mut().resize(width, height);
        self.session.redraw();
    }

    /// The four category totals, subtotal and grand total.
    pub fn costs_json(&self) -> String {
        serde_json::to_string(&self.session.totals()).unwrap_or_else(|_| "{}".to_string())
    }

    /// The selected component for the properties panel, or `null`.
    pub fn selection_json(&self) -> String {
        match self.session.selection() {
            Some(c) => serde_json::to_string(c).unwrap_or_else(|_| "null".to_string()),
            None => "null".to_string(),
        }
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.session
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Restore a design previously returned by `snapshot_json`.
    pub fn load_snapshot_json(&mut self, json: &str) -> Result<(), JsValue> {
        let snapshot =
            DesignSnapshot::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.session.load_snapshot(&snapshot);
        Ok(())
    }
}

/// Classify a chat message into an intent name (`"pricing"`, `"general"`, ...).
#[wasm_bindgen]
pub fn classify_message(message: &str) -> String {
    sandbox_core::classify(message).as_str().to_string()
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("sandbox WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
