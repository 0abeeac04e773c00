//! View projection for the project sandbox.
//!
//! Both targets are driven by the same component list and keep no design
//! state of their own: [`paint`] turns it into 2D draw primitives,
//! [`scene`] keeps an external 3D renderer in step with it.

pub mod paint;
pub mod scene;

pub use paint::{DisplayList, DrawCommand, Surface2d, paint_design};
pub use scene::{RecordingRenderer, Renderer3d, SceneCall, SceneProjection, SceneSync, Transform3d};
