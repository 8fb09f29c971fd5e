use crate::config::Style;
use crate::widget::animation::Keyframes;
use crate::widget::color::{Color, blend};
use crate::widget::geometry::{CheckGeometry, Point};
use crate::widget::scheduler::{FrameScheduler, FrameToken};
use crate::widget::{CHECK_PULSE_FACTOR, FRAME_INTERVAL, MIN_SCALE};
use std::time::{Duration, Instant};
use strum::Display as StrumDisplay;

pub type CheckedChangeListener<S> = Box<dyn FnMut(&CheckBox<S>, bool)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Transition {
    Check,
    Uncheck,
}

/// The scalars a renderer samples each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationProgress {
    pub outer_ring_scale: f64,
    pub inner_circle_scale: f64,
    pub tick_draw_distance: f64,
}

impl AnimationProgress {
    /// Resting values for a widget that has just switched to `checked`.
    fn reset(checked: bool) -> Self {
        Self {
            outer_ring_scale: 1.0,
            inner_circle_scale: if checked { 0.0 } else { 1.0 },
            tick_draw_distance: 0.0,
        }
    }
}

impl Default for AnimationProgress {
    fn default() -> Self {
        Self::reset(false)
    }
}

#[derive(Debug, Clone)]
struct ActiveTransition {
    kind: Transition,
    token: FrameToken,
    started: Option<Instant>,
    pulse: Keyframes,
    fade: Keyframes,
    // check only: when the tick starts drawing
    reveal_after: Duration,
}

impl ActiveTransition {
    fn new(kind: Transition, token: FrameToken, duration: Duration) -> Self {
        let (pulse_duration, fade) = match kind {
            Transition::Check => (
                duration.mul_f64(CHECK_PULSE_FACTOR),
                Keyframes::new(&[1.0, 0.0], duration),
            ),
            Transition::Uncheck => (duration, Keyframes::new(&[0.0, 1.0], duration)),
        };

        Self {
            kind,
            token,
            started: None,
            pulse: Keyframes::new(&[1.0, MIN_SCALE, 1.0], pulse_duration),
            fade,
            reveal_after: duration,
        }
    }

    /// Finishes drawing the tick of an already checked widget; the scalars
    /// hold their checked resting values.
    fn reveal(token: FrameToken) -> Self {
        Self {
            kind: Transition::Check,
            token,
            started: None,
            pulse: Keyframes::new(&[1.0], Duration::ZERO),
            fade: Keyframes::new(&[0.0], Duration::ZERO),
            reveal_after: Duration::ZERO,
        }
    }

    fn scalars_finished(&self, elapsed: Duration) -> bool {
        self.pulse.is_finished(elapsed) && self.fade.is_finished(elapsed)
    }
}

/// A circular checkbox: pulses its ring, fades its inner circle into the
/// check color and then draws the tick stroke in, left segment first.
///
/// Time-based animation is driven from outside through `on_frame`, which the
/// scheduler is asked to trigger whenever more work remains.
pub struct CheckBox<S> {
    checked: bool,
    style: Style,
    geometry: Option<CheckGeometry>,
    progress: AnimationProgress,
    tick_revealed: bool,
    token: FrameToken,
    active: Option<ActiveTransition>,
    scheduler: S,
    listener: Option<CheckedChangeListener<S>>,
}

impl<S: FrameScheduler> CheckBox<S> {
    pub fn new(style: Style, scheduler: S) -> Self {
        Self {
            checked: false,
            style,
            geometry: None,
            progress: AnimationProgress::default(),
            tick_revealed: false,
            token: FrameToken::default(),
            active: None,
            scheduler,
            listener: None,
        }
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn toggle(&mut self) {
        self.set_checked(!self.checked);
    }

    /// Always restarts the matching animation and notifies the listener,
    /// even when `checked` equals the current state.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
        self.reset();

        let kind = if checked {
            Transition::Check
        } else {
            Transition::Uncheck
        };
        self.start(kind);
        self.notify();
    }

    pub fn set_on_checked_change_listener(
        &mut self,
        listener: impl FnMut(&CheckBox<S>, bool) + 'static,
    ) {
        self.listener = Some(Box::new(listener));
    }

    fn notify(&mut self) {
        if let Some(mut listener) = self.listener.take() {
            listener(&*self, self.checked);
            // a listener installed from inside the callback wins
            if self.listener.is_none() {
                self.listener = Some(listener);
            }
        }
    }

    fn reset(&mut self) {
        self.tick_revealed = false;
        self.progress = AnimationProgress::reset(self.checked);
    }

    fn start(&mut self, kind: Transition) {
        self.token = self.token.next();
        if let Some(old) = self.active.replace(ActiveTransition::new(
            kind,
            self.token,
            self.style.anim_duration,
        )) {
            log::debug!("{} animation superseded by {}", old.kind, kind);
        }
        log::debug!("starting {} animation ({})", kind, self.token);
        self.scheduler.schedule_frame(self.token, Duration::ZERO);
    }

    /// Resumes the tick reveal after the bounds grew under a settled,
    /// checked widget. A running animation already keeps the tick going.
    fn resume_reveal(&mut self) {
        let settled = self.checked && self.tick_revealed && self.active.is_none();
        if !settled || self.is_tick_complete() {
            return;
        }
        self.token = self.token.next();
        self.active = Some(ActiveTransition::reveal(self.token));
        log::debug!("resuming tick reveal ({})", self.token);
        self.scheduler.schedule_frame(self.token, Duration::ZERO);
    }

    /// Advances the running animation to `now`. Returns whether the widget
    /// needs a redraw.
    pub fn on_frame(&mut self, token: FrameToken, now: Instant) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if active.token != token {
            log::trace!("ignoring stale {} (current {})", token, active.token);
            return false;
        }

        let started = *active.started.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started);

        self.progress.outer_ring_scale = active.pulse.sample(elapsed);
        self.progress.inner_circle_scale = active.fade.sample(elapsed);

        let kind = active.kind;
        let scalars_finished = active.scalars_finished(elapsed);
        if kind == Transition::Check && elapsed >= active.reveal_after {
            self.tick_revealed = true;
        }

        if self.tick_revealed {
            self.advance_tick();
        }

        let done = scalars_finished && (kind == Transition::Uncheck || self.is_tick_complete());
        if done {
            log::debug!("{} animation finished ({})", kind, token);
            self.active = None;
        } else {
            self.scheduler.schedule_frame(token, FRAME_INTERVAL);
        }
        true
    }

    fn advance_tick(&mut self) {
        let (step, total) = self
            .geometry
            .as_ref()
            .map(|g| (g.tick_step, g.tick.total_len()))
            .unwrap_or_default();
        let distance = &mut self.progress.tick_draw_distance;
        *distance = (*distance + step).min(total);
    }

    fn is_tick_complete(&self) -> bool {
        self.geometry.as_ref().is_none_or(|g| {
            self.progress.tick_draw_distance >= g.tick.total_len()
        })
    }

    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.geometry = CheckGeometry::calculate(width, height);
        match &self.geometry {
            Some(g) => {
                let total = g.tick.total_len();
                self.progress.tick_draw_distance = self.progress.tick_draw_distance.min(total);
                self.resume_reveal();
            }
            None => log::debug!("ignoring empty bounds {}x{}", width, height),
        }
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn progress(&self) -> AnimationProgress {
        self.progress
    }

    pub fn is_tick_revealed(&self) -> bool {
        self.tick_revealed
    }

    pub fn geometry(&self) -> Option<&CheckGeometry> {
        self.geometry.as_ref()
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Takes effect from the next frame; a running animation keeps its duration.
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    /// Ring color, moving from border to check color as the inner circle fades.
    pub fn ring_color(&self) -> Color {
        blend(
            self.style.border_color,
            self.style.check_color,
            self.progress.inner_circle_scale,
        )
    }

    /// The visible part of the tick, if any.
    pub fn tick_polyline(&self) -> Option<Vec<Point>> {
        if !(self.checked && self.tick_revealed) {
            return None;
        }
        self.geometry
            .as_ref()
            .map(|g| g.tick.polyline(self.progress.tick_draw_distance))
            .filter(|points| points.len() >= 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct RecordingScheduler {
        requests: RefCell<Vec<(FrameToken, Duration)>>,
    }

    impl RecordingScheduler {
        fn last(&self) -> Option<(FrameToken, Duration)> {
            self.requests.borrow().last().copied()
        }

        fn count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    impl FrameScheduler for RecordingScheduler {
        fn schedule_frame(&self, token: FrameToken, delay: Duration) {
            self.requests.borrow_mut().push((token, delay));
        }
    }

    fn checkbox(size: f64) -> (CheckBox<Rc<RecordingScheduler>>, Rc<RecordingScheduler>) {
        let scheduler = Rc::new(RecordingScheduler::default());
        let mut checkbox = CheckBox::new(Style::default(), scheduler.clone());
        checkbox.on_resize(size, size);
        (checkbox, scheduler)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Feeds frames until the widget stops asking for them.
    fn run_to_end(
        checkbox: &mut CheckBox<Rc<RecordingScheduler>>,
        scheduler: &RecordingScheduler,
        t0: Instant,
    ) -> Vec<AnimationProgress> {
        let mut now = t0;
        let mut seen = Vec::new();
        for _ in 0..10_000 {
            let Some((token, delay)) = scheduler.last() else {
                break;
            };
            let before = scheduler.count();
            now += delay;
            checkbox.on_frame(token, now);
            seen.push(checkbox.progress());
            if scheduler.count() == before {
                break;
            }
        }
        seen
    }

    #[test]
    fn test_toggle_flips_state_synchronously() {
        let (mut checkbox, scheduler) = checkbox(240.0);
        assert!(!checkbox.is_checked());

        checkbox.toggle();
        assert!(checkbox.is_checked());
        assert!(checkbox.is_animating());
        assert_eq!(scheduler.last().map(|(_, d)| d), Some(Duration::ZERO));
    }

    #[test]
    fn test_double_toggle_matches_fresh_widget() {
        let (mut checkbox, _) = checkbox(240.0);
        let (fresh, _) = self::checkbox(240.0);

        checkbox.toggle();
        checkbox.toggle();

        assert!(!checkbox.is_checked());
        assert_eq!(checkbox.progress(), fresh.progress());
        assert!(!checkbox.is_tick_revealed());
        assert_eq!(checkbox.ring_color(), fresh.ring_color());
    }

    #[test]
    fn test_check_animation_runs_to_completion() {
        let (mut checkbox, scheduler) = checkbox(240.0);
        let t0 = Instant::now();

        checkbox.toggle();
        let frames = run_to_end(&mut checkbox, &scheduler, t0);

        assert!(!checkbox.is_animating());
        let end = checkbox.progress();
        let total = checkbox.geometry().unwrap().tick.total_len();
        assert_eq!(end.outer_ring_scale, 1.0);
        assert_eq!(end.inner_circle_scale, 0.0);
        assert_eq!(end.tick_draw_distance, total);
        assert_eq!(checkbox.ring_color(), checkbox.style().check_color);

        for p in &frames {
            assert!((MIN_SCALE..=1.0).contains(&p.outer_ring_scale));
            assert!((0.0..=1.0).contains(&p.inner_circle_scale));
        }
        assert!(frames
            .iter()
            .any(|p| (p.outer_ring_scale - MIN_SCALE).abs() < 0.05));
    }

    #[test]
    fn test_tick_distance_monotonic_and_bounded() {
        let (mut checkbox, scheduler) = checkbox(240.0);
        checkbox.toggle();
        let frames = run_to_end(&mut checkbox, &scheduler, Instant::now());
        let total = checkbox.geometry().unwrap().tick.total_len();

        let distances: Vec<f64> = frames.iter().map(|p| p.tick_draw_distance).collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
        assert!(distances.iter().all(|&d| d <= total));
        // tick waits for the fade before it starts
        assert_eq!(distances[0], 0.0);
    }

    #[test]
    fn test_tick_hidden_until_revealed() {
        let (mut checkbox, scheduler) = checkbox(240.0);
        let t0 = Instant::now();
        checkbox.toggle();

        let (token, _) = scheduler.last().unwrap();
        checkbox.on_frame(token, t0);
        checkbox.on_frame(token, t0 + ms(150));
        assert!(!checkbox.is_tick_revealed());
        assert!(checkbox.tick_polyline().is_none());

        checkbox.on_frame(token, t0 + ms(300));
        assert!(checkbox.is_tick_revealed());
        let points = checkbox.tick_polyline().unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], checkbox.geometry().unwrap().tick.points[0]);
    }

    #[test]
    fn test_fade_blends_ring_color() {
        let (mut checkbox, scheduler) = checkbox(240.0);
        let t0 = Instant::now();
        checkbox.toggle();

        let (token, _) = scheduler.last().unwrap();
        checkbox.on_frame(token, t0);
        assert_eq!(checkbox.ring_color(), checkbox.style().border_color);

        checkbox.on_frame(token, t0 + ms(150));
        let style = checkbox.style();
        assert_eq!(checkbox.progress().inner_circle_scale, 0.5);
        assert_eq!(
            checkbox.ring_color(),
            blend(style.border_color, style.check_color, 0.5)
        );
    }

    #[test]
    fn test_uncheck_fades_back_in() {
        let (mut checkbox, scheduler) = checkbox(240.0);
        let t0 = Instant::now();
        checkbox.toggle();
        run_to_end(&mut checkbox, &scheduler, t0);

        checkbox.toggle();
        assert!(!checkbox.is_checked());
        assert!(checkbox.tick_polyline().is_none());
        assert_eq!(checkbox.progress().tick_draw_distance, 0.0);

        let t1 = t0 + Duration::from_secs(10);
        let (token, _) = scheduler.last().unwrap();
        checkbox.on_frame(token, t1);
        assert_eq!(checkbox.progress().inner_circle_scale, 0.0);
        assert_eq!(checkbox.ring_color(), checkbox.style().check_color);

        run_to_end(&mut checkbox, &scheduler, t1);
        assert!(!checkbox.is_animating());
        assert_eq!(checkbox.progress(), AnimationProgress::default());
        assert_eq!(checkbox.ring_color(), checkbox.style().border_color);
    }

    #[test]
    fn test_stale_frames_are_ignored() {
        let (mut checkbox, scheduler) = checkbox(240.0);
        let t0 = Instant::now();

        checkbox.toggle();
        let (stale, _) = scheduler.last().unwrap();
        checkbox.on_frame(stale, t0);

        checkbox.toggle();
        let (current, _) = scheduler.last().unwrap();
        assert_ne!(stale, current);

        let before = checkbox.progress();
        let requests = scheduler.count();
        assert!(!checkbox.on_frame(stale, t0 + ms(200)));
        assert_eq!(checkbox.progress(), before);
        assert_eq!(scheduler.count(), requests);

        assert!(checkbox.on_frame(current, t0 + ms(200)));
    }

    #[test]
    fn test_listener_receives_new_state() {
        let (mut checkbox, _) = checkbox(48.0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = seen.clone();
        checkbox.set_on_checked_change_listener(move |widget, checked| {
            assert_eq!(widget.is_checked(), checked);
            sink.borrow_mut().push(checked);
        });

        checkbox.toggle();
        checkbox.toggle();
        checkbox.set_checked(false);

        assert_eq!(*seen.borrow(), vec![true, false, false]);
    }

    #[test]
    fn test_empty_bounds_finish_without_tick() {
        let (mut checkbox, scheduler) = checkbox(0.0);
        checkbox.toggle();
        run_to_end(&mut checkbox, &scheduler, Instant::now());

        assert!(!checkbox.is_animating());
        assert!(checkbox.geometry().is_none());
        assert!(checkbox.tick_polyline().is_none());
        assert_eq!(checkbox.progress().tick_draw_distance, 0.0);
    }

    #[test]
    fn test_shrinking_clamps_tick_distance() {
        let (mut checkbox, scheduler) = checkbox(240.0);
        checkbox.toggle();
        run_to_end(&mut checkbox, &scheduler, Instant::now());

        checkbox.on_resize(24.0, 24.0);
        let total = checkbox.geometry().unwrap().tick.total_len();
        assert_eq!(checkbox.progress().tick_draw_distance, total);
        assert_eq!(checkbox.tick_polyline().map(|p| p.len()), Some(3));
        assert!(!checkbox.is_animating());
    }

    #[test]
    fn test_growing_resumes_tick_reveal() {
        let (mut checkbox, scheduler) = checkbox(48.0);
        let t0 = Instant::now();
        checkbox.toggle();
        run_to_end(&mut checkbox, &scheduler, t0);
        let before = checkbox.progress().tick_draw_distance;

        checkbox.on_resize(240.0, 240.0);
        assert!(checkbox.is_animating());
        let frames = run_to_end(&mut checkbox, &scheduler, t0 + Duration::from_secs(10));

        let total = checkbox.geometry().unwrap().tick.total_len();
        assert_eq!(checkbox.progress().tick_draw_distance, total);
        assert_eq!(checkbox.tick_polyline().map(|p| p.len()), Some(3));
        assert!(!checkbox.is_animating());

        let distances: Vec<f64> = frames.iter().map(|p| p.tick_draw_distance).collect();
        assert!(distances[0] > before);
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
        assert!(frames.iter().all(|p| p.outer_ring_scale == 1.0));
        assert!(frames.iter().all(|p| p.inner_circle_scale == 0.0));
    }

    #[test]
    fn test_first_size_after_empty_check_draws_tick() {
        let (mut checkbox, scheduler) = checkbox(0.0);
        let t0 = Instant::now();
        checkbox.toggle();
        run_to_end(&mut checkbox, &scheduler, t0);
        assert!(checkbox.tick_polyline().is_none());

        checkbox.on_resize(240.0, 240.0);
        run_to_end(&mut checkbox, &scheduler, t0 + Duration::from_secs(10));

        let total = checkbox.geometry().unwrap().tick.total_len();
        assert!(checkbox.is_checked());
        assert_eq!(checkbox.progress().tick_draw_distance, total);
        assert_eq!(checkbox.tick_polyline().map(|p| p.len()), Some(3));
    }

    #[test]
    fn test_resize_leaves_unchecked_widget_idle() {
        let (mut checkbox, scheduler) = checkbox(48.0);
        checkbox.toggle();
        checkbox.toggle();
        run_to_end(&mut checkbox, &scheduler, Instant::now());
        let requests = scheduler.count();

        checkbox.on_resize(240.0, 240.0);
        assert!(!checkbox.is_animating());
        assert_eq!(scheduler.count(), requests);
    }
}
