//! Canvas2D and JS-object implementations of the projector collaborators.

use kurbo::{Affine, Rect, Size};
use sandbox_core::{Color, ComponentId, TypeName};
use sandbox_render::{Renderer3d, Surface2d, Transform3d};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::CanvasRenderingContext2d;

const LABEL_FONT: &str = "12px Saira, Arial, sans-serif";
const LABEL_COLOR: &str = "#FFFFFF";
/// Baseline offset that visually centers a 12px label.
const LABEL_BASELINE_NUDGE: f64 = 4.0;

fn dash_array(dash: [f64; 2]) -> js_sys::Array {
    js_sys::Array::of2(&JsValue::from_f64(dash[0]), &JsValue::from_f64(dash[1]))
}

// ─── 2D ──────────────────────────────────────────────────────────────────

/// Paints the design onto the sandbox `<canvas>`.
pub struct Canvas2dSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl Canvas2dSurface {
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self { ctx, width, height }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }
}

impl Surface2d for Canvas2dSurface {
    fn clear(&mut self) {
        let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_rect(&mut self, transform: Affine, size: Size, fill: Color, label: &str) {
        let ctx = &self.ctx;
        let [a, b, c, d, e, f] = transform.as_coeffs();
        ctx.save();
        let _ = ctx.set_transform(a, b, c, d, e, f);

        ctx.set_fill_style_str(&fill.to_hex());
        ctx.fill_rect(0.0, 0.0, size.width, size.height);

        ctx.set_fill_style_str(LABEL_COLOR);
        ctx.set_font(LABEL_FONT);
        ctx.set_text_align("center");
        let _ = ctx.fill_text(
            label,
            size.width / 2.0,
            size.height / 2.0 + LABEL_BASELINE_NUDGE,
        );
        ctx.restore();
    }

    fn dashed_outline(&mut self, rect: Rect, stroke: Color, line_width: f64, dash: [f64; 2]) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_stroke_style_str(&stroke.to_hex());
        ctx.set_line_width(line_width);
        let _ = ctx.set_line_dash(&dash_array(dash));
        ctx.stroke_rect(rect.x0, rect.y0, rect.width(), rect.height());
        let _ = ctx.set_line_dash(&js_sys::Array::new());
        ctx.restore();
    }
}

// ─── 3D ──────────────────────────────────────────────────────────────────

/// Forwards scene calls to a page-side object exposing `addComponent`,
/// `removeComponent` and `clearAll`. A method the object lacks, or one that
/// throws, is logged and skipped.
pub struct JsRenderer3d {
    target: JsValue,
}

impl JsRenderer3d {
    pub fn new(target: JsValue) -> Self {
        Self { target }
    }

    fn call(&self, method: &str, args: &[JsValue]) {
        let func = js_sys::Reflect::get(&self.target, &JsValue::from_str(method))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
        let Some(func) = func else {
            log::info!("3D renderer has no {method}(); skipped");
            return;
        };
        let result = match args {
            [] => func.call0(&self.target),
            [a] => func.call1(&self.target, a),
            _ => func.apply(&self.target, &args.iter().collect::<js_sys::Array>()),
        };
        if let Err(err) = result {
            log::warn!("3D renderer {method}() threw: {err:?}");
        }
    }
}

/// The object handed to `addComponent`.
fn component_payload(id: ComponentId, kind: TypeName, t: &Transform3d) -> JsValue {
    let json = serde_json::json!({
        "id": id.get(),
        "type": kind.as_str(),
        "position": t.position,
        "scale": t.scale,
    });
    js_sys::JSON::parse(&json.to_string()).unwrap_or(JsValue::NULL)
}

impl Renderer3d for JsRenderer3d {
    fn add(&mut self, id: ComponentId, kind: TypeName, transform: Transform3d) {
        self.call("addComponent", &[component_payload(id, kind, &transform)]);
    }

    fn remove(&mut self, id: ComponentId) {
        self.call("removeComponent", &[JsValue::from_f64(id.get() as f64)]);
    }

    fn clear_all(&mut self) {
        self.call("clearAll", &[]);
    }
}
