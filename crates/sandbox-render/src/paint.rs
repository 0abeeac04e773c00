//! Design → 2D draw commands.
//!
//! The projector holds no state of its own. Each redraw clears the surface
//! and repaints every component bottom-to-top, then the selection outline.

use kurbo::{Affine, Point, Rect, Size};
use sandbox_core::{Catalog, ComponentId, PlacedComponent, Color};

/// Selection outline color (gold).
pub const HIGHLIGHT_COLOR: Color = Color::from_rgb_u32(0xFFD700);
/// Gap between a component's box and its selection outline.
pub const HIGHLIGHT_OFFSET: f64 = 2.0;
pub const HIGHLIGHT_WIDTH: f64 = 2.0;
pub const HIGHLIGHT_DASH: [f64; 2] = [5.0, 5.0];

/// A 2D drawing surface the sandbox paints onto.
///
/// The surface owns its own lifecycle (size, context); the projector only
/// issues primitives.
pub trait Surface2d {
    fn clear(&mut self);

    /// Fill a `size` rectangle whose local origin is its top-left corner,
    /// placed on the canvas by `transform`, with `label` centered inside.
    fn fill_rect(&mut self, transform: Affine, size: Size, fill: Color, label: &str);

    /// Stroke an axis-aligned dashed outline.
    fn dashed_outline(&mut self, rect: Rect, stroke: Color, line_width: f64, dash: [f64; 2]);
}

/// One recorded draw primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect {
        transform: Affine,
        size: Size,
        fill: Color,
        label: String,
    },
    DashedOutline {
        rect: Rect,
        stroke: Color,
        line_width: f64,
        dash: [f64; 2],
    },
}

/// A surface that just records what it was asked to draw.
#[derive(Debug, Default, Clone)]
pub struct DisplayList {
    pub commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels of every filled rect, in paint order.
    pub fn labels(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn outlines(&self) -> impl Iterator<Item = &Rect> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::DashedOutline { rect, .. } => Some(rect),
            _ => None,
        })
    }
}

impl Surface2d for DisplayList {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, transform: Affine, size: Size, fill: Color, label: &str) {
        self.commands.push(DrawCommand::FillRect {
            transform,
            size,
            fill,
            label: label.to_string(),
        });
    }

    fn dashed_outline(&mut self, rect: Rect, stroke: Color, line_width: f64, dash: [f64; 2]) {
        self.commands.push(DrawCommand::DashedOutline {
            rect,
            stroke,
            line_width,
            dash,
        });
    }
}

/// Placement transform: rotate about the component's center.
pub fn component_transform(c: &PlacedComponent) -> Affine {
    let (cx, cy) = c.center();
    let (w, h) = (c.width as f64, c.height as f64);
    Affine::translate((cx, cy))
        * Affine::rotate((c.rotation as f64).to_radians())
        * Affine::translate((-w / 2.0, -h / 2.0))
}

/// Canvas-space corners of a component (top-left, top-right,
/// bottom-right, bottom-left in local space).
pub fn component_corners(c: &PlacedComponent) -> [Point; 4] {
    let t = component_transform(c);
    let (w, h) = (c.width as f64, c.height as f64);
    [
        t * Point::new(0.0, 0.0),
        t * Point::new(w, 0.0),
        t * Point::new(w, h),
        t * Point::new(0.0, h),
    ]
}

/// Axis-aligned selection outline, ignoring rotation.
pub fn highlight_rect(c: &PlacedComponent) -> Rect {
    let (x, y) = (c.x as f64, c.y as f64);
    Rect::new(
        x - HIGHLIGHT_OFFSET,
        y - HIGHLIGHT_OFFSET,
        x + c.width as f64 + HIGHLIGHT_OFFSET,
        y + c.height as f64 + HIGHLIGHT_OFFSET,
    )
}

/// Clear `surface` and repaint `components` plus the selection outline.
pub fn paint_design<S: Surface2d + ?Sized>(
    surface: &mut S,
    catalog: &Catalog,
    components: &[PlacedComponent],
    selected: Option<ComponentId>,
) {
    surface.clear();

    for c in components {
        let fill = catalog.lookup_type(c.kind).fill;
        surface.fill_rect(
            component_transform(c),
            Size::new(c.width as f64, c.height as f64),
            fill,
            c.kind.as_str(),
        );
    }

    if let Some(c) = selected.and_then(|id| components.iter().find(|c| c.id == id)) {
        surface.dashed_outline(highlight_rect(c), HIGHLIGHT_COLOR, HIGHLIGHT_WIDTH, HIGHLIGHT_DASH);
    }
}
