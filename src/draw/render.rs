//! Stroke rendering against an abstract drawing surface.
//!
//! The [`Renderer`] decides *what* to draw (full stroke or just the undrawn
//! tail) and in which primitive; a [`DrawSurface`] decides *how*. The Wayland
//! backend draws through [`CairoSurface`]; tests record calls instead.

use std::f64::consts::TAU;

use super::color::{Color, Palette};
use super::stroke::{Stroke, StrokeRegistry};
use crate::input::{DrawingMode, SessionSettings};
use crate::touch::{SurfaceSize, TouchPoint};

/// A coordinate in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DevicePoint {
    pub x: f64,
    pub y: f64,
}

impl DevicePoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Maps a normalized point onto a surface of the given size.
    pub fn from_normalized(point: TouchPoint, size: SurfaceSize) -> Self {
        Self {
            x: point.x() * f64::from(size.width),
            y: point.y() * f64::from(size.height),
        }
    }
}

/// Primitive drawing operations the renderer needs from a surface.
pub trait DrawSurface {
    /// Current size in device pixels, read on every call.
    fn size(&self) -> SurfaceSize;

    /// Strokes a connected path with round caps and joins.
    fn polyline(&mut self, points: &[DevicePoint], color: Color, width: f64);

    /// Fills a circle centred on `center`.
    fn fill_circle(&mut self, center: DevicePoint, diameter: f64, color: Color);

    /// Wipes the whole surface to `color`.
    fn clear(&mut self, color: Color);
}

/// Draws strokes using the session's mode and width and a per-contact palette.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Draws one stroke, either entirely or only its undrawn tail.
    ///
    /// The incremental range starts one point before the first undrawn one
    /// so the connecting segment is drawn. After a full draw the rendered
    /// count drops back to zero, so the next incremental call repaints the
    /// whole stroke on top of whatever the full pass left.
    pub fn draw<S: DrawSurface + ?Sized>(
        &self,
        stroke: &mut Stroke,
        surface: &mut S,
        settings: &SessionSettings,
        from_scratch: bool,
    ) {
        if !from_scratch && !stroke.has_undrawn_points() {
            return;
        }

        let start = if from_scratch || stroke.rendered_count() == 0 {
            0
        } else {
            stroke.rendered_count() - 1
        };

        let size = surface.size();
        let points: Vec<DevicePoint> = stroke.points()[start..]
            .iter()
            .map(|p| DevicePoint::from_normalized(*p, size))
            .collect();

        stroke.set_rendered_count(if from_scratch { 0 } else { stroke.len() });

        if points.is_empty() {
            return;
        }

        let color = self.palette.color_for(stroke.contact_id());
        let width = f64::from(settings.stroke_width);
        match settings.mode {
            DrawingMode::DotOnly => {
                for point in &points {
                    surface.fill_circle(*point, width, color);
                }
            }
            DrawingMode::FreeDraw | DrawingMode::PolylineOnly => {
                surface.polyline(&points, color, width);
            }
        }
    }

    /// Expose/resize repaint: wipe, then every finished stroke, then every active one.
    pub fn repaint_all<S: DrawSurface + ?Sized>(
        &self,
        registry: &mut StrokeRegistry,
        surface: &mut S,
        settings: &SessionSettings,
        background: Color,
    ) {
        surface.clear(background);
        for stroke in registry.finished_mut() {
            self.draw(stroke, surface, settings, true);
        }
        for stroke in registry.active_mut() {
            self.draw(stroke, surface, settings, true);
        }
    }

    /// Live-movement repaint: only the new tails of active strokes.
    pub fn draw_active<S: DrawSurface + ?Sized>(
        &self,
        registry: &mut StrokeRegistry,
        surface: &mut S,
        settings: &SessionSettings,
    ) {
        for stroke in registry.active_mut() {
            self.draw(stroke, surface, settings, false);
        }
    }
}

/// [`DrawSurface`] over a Cairo context.
pub struct CairoSurface<'a> {
    ctx: &'a cairo::Context,
    size: SurfaceSize,
}

impl<'a> CairoSurface<'a> {
    pub fn new(ctx: &'a cairo::Context, size: SurfaceSize) -> Self {
        Self { ctx, size }
    }
}

impl DrawSurface for CairoSurface<'_> {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn polyline(&mut self, points: &[DevicePoint], color: Color, width: f64) {
        let Some(first) = points.first() else {
            return;
        };
        self.ctx.set_source_rgba(color.r, color.g, color.b, color.a);
        self.ctx.set_line_width(width);
        self.ctx.set_line_cap(cairo::LineCap::Round);
        self.ctx.set_line_join(cairo::LineJoin::Round);

        self.ctx.move_to(first.x, first.y);
        if points.len() == 1 {
            // zero-length segment so the round cap leaves a dot
            self.ctx.line_to(first.x, first.y);
        }
        for point in &points[1..] {
            self.ctx.line_to(point.x, point.y);
        }
        let _ = self.ctx.stroke(); // Ignore errors - a failed stroke just leaves a gap
    }

    fn fill_circle(&mut self, center: DevicePoint, diameter: f64, color: Color) {
        self.ctx.set_source_rgba(color.r, color.g, color.b, color.a);
        self.ctx.new_path();
        self.ctx.arc(center.x, center.y, diameter / 2.0, 0.0, TAU);
        let _ = self.ctx.fill();
    }

    fn clear(&mut self, color: Color) {
        self.ctx.save().ok();
        self.ctx.set_operator(cairo::Operator::Source);
        self.ctx.set_source_rgba(color.r, color.g, color.b, color.a);
        let _ = self.ctx.paint();
        self.ctx.restore().ok();
    }
}
