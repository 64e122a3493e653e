//! JavaScript interop for Chart.js visualization.
//! Provides Rust bindings to chart helper functions defined in chart_helpers.js.

use log::warn;
use wasm_bindgen::prelude::*;

use fingerprint_console::render::PieChartSpec;

#[wasm_bindgen(module = "/chart_helpers.js")]
extern "C" {
    #[wasm_bindgen(js_name = renderPieChart)]
    fn render_pie_chart(canvas_id: &str, spec: JsValue);

    #[wasm_bindgen(js_name = destroyChart)]
    fn destroy_chart(canvas_id: &str);
}

/// Something a pie chart can be drawn on and removed from.
pub trait ChartSurface {
    fn render(&mut self, spec: &PieChartSpec);
    fn destroy(&mut self);
}

/// Chart.js instance bound to a `<canvas>` id.
pub struct CanvasChart {
    canvas_id: &'static str,
}

impl CanvasChart {
    pub fn new(canvas_id: &'static str) -> Self {
        Self { canvas_id }
    }
}

impl ChartSurface for CanvasChart {
    fn render(&mut self, spec: &PieChartSpec) {
        match serde_wasm_bindgen::to_value(spec) {
            Ok(value) => render_pie_chart(self.canvas_id, value),
            Err(e) => warn!("Could not hand chart data to JS: {}", e),
        }
    }

    fn destroy(&mut self) {
        destroy_chart(self.canvas_id);
    }
}

/// Holds at most one live chart: a new render always tears down the old one first.
pub struct ChartSlot<S: ChartSurface> {
    surface: S,
    live: bool,
}

impl<S: ChartSurface> ChartSlot<S> {
    pub fn new(surface: S) -> Self {
        Self { surface, live: false }
    }

    pub fn replace(&mut self, spec: &PieChartSpec) {
        if self.live {
            self.surface.destroy();
        }
        self.surface.render(spec);
        self.live = true;
    }
}
