//! Design → 3D scene sync.
//!
//! Maps each placed component onto a box in an external 3D renderer, keyed
//! by component id. Sync only runs while the 3D view is active; entering
//! the view always rebuilds the scene from the full component list.
//!
//! Without a renderer every call is a logged no-op and the 2D surface stays
//! the only view.

use sandbox_core::{Catalog, ComponentId, PlacedComponent, SandboxConfig, TypeName};
use serde::{Deserialize, Serialize};

/// Position and per-axis scale of one scene object. `y` is up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3d {
    pub position: [f64; 3],
    pub scale: [f64; 3],
}

/// Fixed linear map from the canvas plane to the scene's ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneProjection {
    /// Canvas units per scene unit.
    pub scale: f64,
    /// Canvas point at the scene origin.
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Default for SceneProjection {
    fn default() -> Self {
        Self::from_config(&SandboxConfig::default())
    }
}

impl SceneProjection {
    pub fn from_config(config: &SandboxConfig) -> Self {
        let scale = if config.scene_scale.is_finite() && config.scene_scale > 0.0 {
            config.scene_scale
        } else {
            1.0
        };
        Self {
            scale,
            origin_x: config.scene_origin_x,
            origin_y: config.scene_origin_y,
        }
    }

    /// Canvas x/y → scene x/z on the ground; width/height → x/z scale;
    /// `extent` is the type's fixed vertical scale.
    pub fn project(&self, c: &PlacedComponent, extent: f64) -> Transform3d {
        Transform3d {
            position: [
                (c.x as f64 - self.origin_x) / self.scale,
                0.0,
                (c.y as f64 - self.origin_y) / self.scale,
            ],
            scale: [c.width as f64 / self.scale, extent, c.height as f64 / self.scale],
        }
    }
}

/// External 3D renderer collaborator.
pub trait Renderer3d {
    fn add(&mut self, id: ComponentId, kind: TypeName, transform: Transform3d);
    fn remove(&mut self, id: ComponentId);
    fn clear_all(&mut self);
}

/// Keeps an optional [`Renderer3d`] in step with a design.
pub struct SceneSync {
    renderer: Option<Box<dyn Renderer3d>>,
    projection: SceneProjection,
    active: bool,
}

impl SceneSync {
    pub fn new(projection: SceneProjection) -> Self {
        Self {
            renderer: None,
            projection,
            active: false,
        }
    }

    pub fn with_renderer(projection: SceneProjection, renderer: Box<dyn Renderer3d>) -> Self {
        Self {
            renderer: Some(renderer),
            projection,
            active: false,
        }
    }

    /// Attach (or replace) the renderer. Takes effect on the next
    /// activation.
    pub fn attach(&mut self, renderer: Box<dyn Renderer3d>) {
        self.renderer = Some(renderer);
    }

    pub fn detach(&mut self) -> Option<Box<dyn Renderer3d>> {
        self.renderer.take()
    }

    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn projection(&self) -> SceneProjection {
        self.projection
    }

    /// The renderer, only while the 3D view is active.
    fn live(&mut self) -> Option<&mut (dyn Renderer3d + 'static)> {
        if self.active { self.renderer.as_deref_mut() } else { None }
    }

    /// Enter the 3D view: clear the scene and add every component.
    pub fn activate(&mut self, catalog: &Catalog, components: &[PlacedComponent]) {
        self.active = true;
        let projection = self.projection;
        let Some(renderer) = self.renderer.as_deref_mut() else {
            log::info!("3D renderer not available; staying 2D-only");
            return;
        };
        renderer.clear_all();
        for c in components {
            let extent = catalog.lookup_type(c.kind).extent_3d;
            renderer.add(c.id, c.kind, projection.project(c, extent));
        }
        log::debug!("3D scene resynced with {} components", components.len());
    }

    /// Leave the 3D view. The renderer keeps whatever it shows; the next
    /// activation rebuilds it.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn added(&mut self, catalog: &Catalog, c: &PlacedComponent) {
        let projection = self.projection;
        if let Some(renderer) = self.live() {
            let extent = catalog.lookup_type(c.kind).extent_3d;
            renderer.add(c.id, c.kind, projection.project(c, extent));
        }
    }

    pub fn removed(&mut self, id: ComponentId) {
        if let Some(renderer) = self.live() {
            renderer.remove(id);
        }
    }

    /// A component moved or turned: replace its scene object.
    pub fn changed(&mut self, catalog: &Catalog, c: &PlacedComponent) {
        self.removed(c.id);
        self.added(catalog, c);
    }

    pub fn cleared(&mut self) {
        if let Some(renderer) = self.live() {
            renderer.clear_all();
        }
    }
}

/// One call received by a [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCall {
    Add {
        id: ComponentId,
        kind: TypeName,
        transform: Transform3d,
    },
    Remove(ComponentId),
    ClearAll,
}

/// Headless renderer that logs calls into a shared buffer. The handle
/// returned by [`RecordingRenderer::calls`] stays readable after the
/// renderer is boxed into a [`SceneSync`].
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    calls: std::rc::Rc<std::cell::RefCell<Vec<SceneCall>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> std::rc::Rc<std::cell::RefCell<Vec<SceneCall>>> {
        self.calls.clone()
    }
}

impl Renderer3d for RecordingRenderer {
    fn add(&mut self, id: ComponentId, kind: TypeName, transform: Transform3d) {
        self.calls.borrow_mut().push(SceneCall::Add { id, kind, transform });
    }

    fn remove(&mut self, id: ComponentId) {
        self.calls.borrow_mut().push(SceneCall::Remove(id));
    }

    fn clear_all(&mut self) {
        self.calls.borrow_mut().push(SceneCall::ClearAll);
    }
}
