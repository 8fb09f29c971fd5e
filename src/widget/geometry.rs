use crate::widget::{
    BORDER_WIDTH_RATIO, MIN_TICK_STEP, TICK_GRID, TICK_POINTS, TICK_STEP_DIVISOR,
    TICK_STROKE_RATIO,
};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        let (dx, dy) = (other.x - self.x, other.y - self.y);
        dx.hypot(dy)
    }

    /// Point at `t` along the segment `self -> other`; `t` is not clamped.
    pub fn lerp(&self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// The checkmark polyline: start, vertex, end.
#[derive(Debug, Clone, PartialEq)]
pub struct TickPath {
    pub points: [Point; 3],
    pub left_len: f64,
    pub right_len: f64,
}

impl TickPath {
    pub fn new(points: [Point; 3]) -> Self {
        Self {
            points,
            left_len: points[0].distance(points[1]),
            right_len: points[1].distance(points[2]),
        }
    }

    /// Lays the glyph out on `TICK_GRID` units scaled to the given bounds.
    pub fn fit(width: f64, height: f64) -> Self {
        Self::new(TICK_POINTS.map(|(gx, gy)| {
            Point::new(gx * width / TICK_GRID, gy * height / TICK_GRID)
        }))
    }

    pub fn total_len(&self) -> f64 {
        self.left_len + self.right_len
    }

    /// Vertices of the stroke revealed after `distance` units, left segment first.
    pub fn polyline(&self, distance: f64) -> Vec<Point> {
        let [p0, p1, p2] = self.points;

        if distance <= 0.0 {
            Vec::new()
        } else if distance < self.left_len {
            vec![p0, p0.lerp(p1, distance / self.left_len)]
        } else if distance < self.total_len() {
            vec![p0, p1, p1.lerp(p2, (distance - self.left_len) / self.right_len)]
        } else {
            vec![p0, p1, p2]
        }
    }
}

/// Everything that depends on the widget's allocated size.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckGeometry {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    pub radius: f64,
    pub border_width: f64,
    pub tick_stroke_width: f64,
    /// Distance the tick stroke grows by on each frame of the reveal.
    pub tick_step: f64,
    pub tick: TickPath,
}

impl CheckGeometry {
    /// Returns `None` for empty or negative bounds; nothing gets drawn then.
    pub fn calculate(width: f64, height: f64) -> Option<Self> {
        if !(width > 0.0 && height > 0.0) {
            return None;
        }

        Some(Self {
            width,
            height,
            center: Point::new(width / 2.0, height / 2.0),
            radius: width.min(height) / 2.0,
            border_width: width * BORDER_WIDTH_RATIO,
            tick_stroke_width: width * TICK_STROKE_RATIO,
            tick_step: (width / TICK_STEP_DIVISOR).max(MIN_TICK_STEP),
            tick: TickPath::fit(width, height),
        })
    }

    pub fn inner_radius(&self) -> f64 {
        (self.radius - self.border_width).max(0.0)
    }
}
