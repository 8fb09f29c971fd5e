use super::color::Color;
use super::geometry::{CheckGeometry, Point};
use super::model::CheckBox;
use super::scheduler::FrameScheduler;
use cairo::{Context, LineCap, LineJoin};
use std::f64::consts::PI;

struct CheckRenderer<'a> {
    geometry: &'a CheckGeometry,
    outer_scale: f64,
    inner_scale: f64,
    ring_color: Color,
    inner_color: Color,
    tick_color: Color,
    tick: Option<Vec<Point>>,
}

impl<'a> CheckRenderer<'a> {
    fn new<S: FrameScheduler>(checkbox: &'a CheckBox<S>, geometry: &'a CheckGeometry) -> Self {
        let progress = checkbox.progress();
        let style = checkbox.style();
        Self {
            geometry,
            outer_scale: progress.outer_ring_scale,
            inner_scale: progress.inner_circle_scale,
            ring_color: checkbox.ring_color(),
            inner_color: style.inner_color,
            tick_color: style.tick_color,
            tick: checkbox.tick_polyline(),
        }
    }

    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        self.draw_circle(cr, self.ring_color, self.geometry.radius * self.outer_scale)?;
        self.draw_circle(
            cr,
            self.inner_color,
            self.geometry.inner_radius() * self.inner_scale,
        )?;
        self.draw_tick(cr)
    }

    fn draw_circle(&self, cr: &Context, color: Color, radius: f64) -> Result<(), cairo::Error> {
        if radius <= 0.0 {
            return Ok(());
        }
        let (r, g, b, a) = color.to_rgba_f64();
        cr.set_source_rgba(r, g, b, a);
        cr.arc(
            self.geometry.center.x,
            self.geometry.center.y,
            radius,
            0.0,
            2.0 * PI,
        );
        cr.fill()
    }

    fn draw_tick(&self, cr: &Context) -> Result<(), cairo::Error> {
        let Some((first, rest)) = self.tick.as_deref().and_then(|points| points.split_first()) else {
            return Ok(());
        };

        cr.save()?;
        let (r, g, b, a) = self.tick_color.to_rgba_f64();
        cr.set_source_rgba(r, g, b, a);
        cr.set_line_width(self.geometry.tick_stroke_width);
        cr.set_line_cap(LineCap::Round);
        cr.set_line_join(LineJoin::Round);

        cr.move_to(first.x, first.y);
        for point in rest {
            cr.line_to(point.x, point.y);
        }
        cr.stroke()?;
        cr.restore()
    }
}

/// Paints the ring, the inner circle and, once revealed, the tick. Without
/// geometry (empty bounds) nothing is drawn.
pub fn draw<S: FrameScheduler>(cr: &Context, checkbox: &CheckBox<S>) -> Result<(), cairo::Error> {
    match checkbox.geometry() {
        Some(geometry) => CheckRenderer::new(checkbox, geometry).draw(cr),
        None => Ok(()),
    }
}
