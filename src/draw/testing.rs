//! Recording [`DrawSurface`] for unit tests.

use super::{Color, DevicePoint, DrawSurface};
use crate::touch::SurfaceSize;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Polyline(Vec<DevicePoint>, Color, f64),
    Circle(DevicePoint, f64, Color),
    Clear(Color),
}

impl Call {
    pub(crate) fn polyline_points(&self) -> Vec<(f64, f64)> {
        match self {
            Call::Polyline(points, _, _) => points.iter().map(|p| (p.x, p.y)).collect(),
            other => panic!("expected polyline, got {:?}", other),
        }
    }

    pub(crate) fn color(&self) -> Color {
        match self {
            Call::Polyline(_, color, _) | Call::Circle(_, _, color) | Call::Clear(color) => *color,
        }
    }
}

pub(crate) struct RecordingSurface {
    pub(crate) size: SurfaceSize,
    pub(crate) calls: Vec<Call>,
}

impl RecordingSurface {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            size: SurfaceSize::new(width, height),
            calls: Vec::new(),
        }
    }

    pub(crate) fn take(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn polyline(&mut self, points: &[DevicePoint], color: Color, width: f64) {
        self.calls.push(Call::Polyline(points.to_vec(), color, width));
    }

    fn fill_circle(&mut self, center: DevicePoint, diameter: f64, color: Color) {
        self.calls.push(Call::Circle(center, diameter, color));
    }

    fn clear(&mut self, color: Color) {
        self.calls.push(Call::Clear(color));
    }
}
