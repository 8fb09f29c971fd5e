use std::time::Duration;

pub mod animation;
pub mod color;
pub mod geometry;
pub mod model;
pub mod scheduler;
pub mod view;

pub use color::{Color, blend};
pub use geometry::{CheckGeometry, Point, TickPath};
pub use model::{AnimationProgress, CheckBox, Transition};
pub use scheduler::{FrameScheduler, FrameToken};
pub use view::draw;

pub const MIN_SCALE: f64 = 0.8; // deepest point of the ring pulse
pub const FRAME_INTERVAL: Duration = Duration::from_millis(10);
pub const DEFAULT_ANIM_DURATION: Duration = Duration::from_millis(300);

// Check animation pulses for half again as long as the fade
pub const CHECK_PULSE_FACTOR: f64 = 1.5;

// Tick glyph, in units of a TICK_GRID x TICK_GRID box
pub const TICK_GRID: f64 = 24.0;
pub const TICK_POINTS: [(f64, f64); 3] = [(4.1, 12.7), (9.0, 19.0), (20.3, 6.3)];

pub const BORDER_WIDTH_RATIO: f64 = 2.0 / 44.0;
pub const TICK_STROKE_RATIO: f64 = 4.0 / 44.0;
pub const TICK_STEP_DIVISOR: f64 = 15.0;
pub const MIN_TICK_STEP: f64 = 3.0;

pub const DEFAULT_TICK_COLOR: u32 = 0xFFFFFFFF;
pub const DEFAULT_INNER_COLOR: u32 = 0xFFFFFFFF;
pub const DEFAULT_BORDER_COLOR: u32 = 0xFF949495;
pub const DEFAULT_CHECK_COLOR: u32 = 0xFFF53341;
