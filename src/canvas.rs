// Surface implementation backed by a 2d canvas context

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::color::Color;
use crate::surface::Surface;

pub struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        CanvasSurface { ctx }
    }

    #[allow(deprecated)]
    fn fill_style(&self, color: Color) {
        self.ctx.set_fill_style(&JsValue::from_str(&color.to_css()));
    }

    #[allow(deprecated)]
    fn stroke_style(&self, color: Color) {
        self.ctx.set_stroke_style(&JsValue::from_str(&color.to_css()));
    }
}

impl<'a> Surface for CanvasSurface<'a> {
    type Error = JsValue;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.ctx.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn fill_vertical_gradient(
        &mut self,
        width: f64,
        height: f64,
        stops: &[(f64, Color)],
    ) -> Result<(), JsValue> {
        let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
        for (offset, color) in stops {
            gradient.add_color_stop(*offset as f32, &color.to_css())?;
        }
        #[allow(deprecated)]
        self.ctx.set_fill_style(&gradient);
        self.ctx.set_global_alpha(1.0);
        self.ctx.fill_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn fill_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), JsValue> {
        self.fill_style(color);
        self.ctx.set_global_alpha(alpha);
        self.ctx.fill_rect(x, y, width, height);
        self.ctx.set_global_alpha(1.0);
        Ok(())
    }

    fn fill_circle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.arc(x, y, radius.max(0.0), 0.0, PI * 2.0)?;
        self.fill_style(color);
        self.ctx.set_global_alpha(alpha);
        self.ctx.fill();
        self.ctx.set_global_alpha(1.0);
        Ok(())
    }

    fn stroke_circle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
        alpha: f64,
        line_width: f64,
    ) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.arc(x, y, radius.max(0.0), 0.0, PI * 2.0)?;
        self.stroke_style(color);
        self.ctx.set_global_alpha(alpha);
        self.ctx.set_line_width(line_width);
        self.ctx.stroke();
        self.ctx.set_global_alpha(1.0);
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: [f64; 2],
        to: [f64; 2],
        color: Color,
        alpha: f64,
        line_width: f64,
    ) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.move_to(from[0], from[1]);
        self.ctx.line_to(to[0], to[1]);
        self.stroke_style(color);
        self.ctx.set_global_alpha(alpha);
        self.ctx.set_line_width(line_width);
        self.ctx.stroke();
        self.ctx.set_global_alpha(1.0);
        Ok(())
    }
}
