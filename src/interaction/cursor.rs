//! Camera-space to screen-space cursor mapping with exponential smoothing.

use nalgebra::Point2;

/// Linear interpolation of `x` from `[x0, x1]` onto `[y0, y1]`, clamped at both ends.
fn interp(x: f32, (x0, x1): (f32, f32), (y0, y1): (f32, f32)) -> f32 {
    if x <= x0 {
        return y0;
    }
    if x >= x1 {
        return y1;
    }
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Single-pole low-pass cursor. Larger `smoothening` means slower, smoother motion.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorMapper {
    width: f32,
    height: f32,
    margin: f32,
    smoothening: f32,
    position: Point2<f32>,
}

impl CursorMapper {
    pub fn new(width: f32, height: f32, margin: f32, smoothening: f32) -> Self {
        Self {
            width,
            height,
            margin,
            smoothening,
            position: Point2::origin(),
        }
    }

    /// Map a camera point from the inner sub-rectangle onto the full frame.
    pub fn map(&self, camera: Point2<f32>) -> Point2<f32> {
        let x = interp(
            camera.x,
            (self.margin, self.width - self.margin),
            (0.0, self.width),
        );
        let y = interp(
            camera.y,
            (self.margin, self.height - self.margin),
            (0.0, self.height),
        );
        Point2::new(x, y)
    }

    /// Move the cursor toward `camera` and return the smoothed position.
    pub fn track(&mut self, camera: Point2<f32>) -> Point2<f32> {
        let target = self.map(camera);
        self.position += (target - self.position) / self.smoothening;
        self.position
    }

    pub fn position(&self) -> Point2<f32> {
        self.position
    }

    pub fn reset(&mut self) {
        self.position = Point2::origin();
    }
}
