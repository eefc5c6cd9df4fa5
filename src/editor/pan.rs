// src/editor/pan.rs

use std::time::{Duration, Instant};

use crate::utils::{Point2D, Vector2D};

/// Ticks a long frame is allowed to catch up on.
const MAX_CATCH_UP_TICKS: u32 = 8;

/// Middle-button autoscroll: while held, every timer tick scrolls toward the
/// pointer, faster the further it is from where the button went down.
#[derive(Debug, Clone)]
pub struct PanGesture {
    reference: Point2D,
    delta: Vector2D,
    held: bool,
    interval: Duration,
    next_tick: Option<Instant>,
}

impl PanGesture {
    pub fn new(interval: Duration) -> Self {
        Self {
            reference: Point2D::default(),
            delta: Vector2D::default(),
            held: false,
            // A zero interval would make `tick` spin.
            interval: interval.max(Duration::from_millis(1)),
            next_tick: None,
        }
    }

    /// Starts the gesture and its timer.
    pub fn begin(&mut self, reference: Point2D, now: Instant) {
        self.reference = reference;
        self.delta = Vector2D::default();
        self.held = true;
        self.next_tick = Some(now + self.interval);
    }

    /// Ends the gesture and cancels the timer.
    pub fn end(&mut self) {
        self.held = false;
        self.next_tick = None;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn is_timer_running(&self) -> bool {
        self.next_tick.is_some()
    }

    pub fn reference(&self) -> Point2D {
        self.reference
    }

    pub fn delta(&self) -> Vector2D {
        self.delta
    }

    pub fn track(&mut self, pointer: Point2D) {
        self.delta = pointer.offset_from(&self.reference);
    }

    /// The view scrolled underneath the gesture; keep the reference on the
    /// same spot of the screen.
    pub fn move_reference(&mut self, dx: f64, dy: f64) {
        self.reference.x += dx;
        self.reference.y += dy;
    }

    /// Fires every timer interval that elapsed up to `now` and returns the
    /// scroll step for each firing.
    pub fn tick(&mut self, now: Instant, max_speed: f64) -> Vec<Vector2D> {
        let mut steps = Vec::new();
        let Some(mut next) = self.next_tick else {
            return steps;
        };

        let mut fired = 0;
        while next <= now && fired < MAX_CATCH_UP_TICKS {
            if self.held {
                if let Some(step) = scroll_step(self.delta, max_speed) {
                    steps.push(step);
                }
            }
            next += self.interval;
            fired += 1;
        }
        if next <= now {
            // Dropped ticks; resynchronise instead of bursting next frame.
            next = now + self.interval;
        }
        self.next_tick = Some(next);
        steps
    }
}

/// Unit vector toward the pointer, scaled by half its distance and capped
/// at `max_speed`. `None` when the pointer sits on the reference.
pub fn scroll_step(delta: Vector2D, max_speed: f64) -> Option<Vector2D> {
    let length = delta.length();
    if length == 0.0 {
        return None;
    }
    let speed = max_speed.min(length / 2.0);
    Some(delta.normalize().scaled(speed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    const INTERVAL: Duration = Duration::from_millis(5);

    #[test]
    fn test_scroll_step_is_capped() {
        let step = scroll_step(Vector2D::new(300.0, 400.0), 20.0).unwrap();
        assert_approx_eq!(step.x, 12.0);
        assert_approx_eq!(step.y, 16.0);
    }

    #[test]
    fn test_scroll_step_short_distance() {
        let step = scroll_step(Vector2D::new(6.0, 8.0), 20.0).unwrap();
        assert_approx_eq!(step.length(), 5.0);
        assert_approx_eq!(step.x, 3.0);
        assert!(scroll_step(Vector2D::default(), 20.0).is_none());
    }

    #[test]
    fn test_tick_before_interval_fires_nothing() {
        let start = Instant::now();
        let mut pan = PanGesture::new(INTERVAL);
        pan.begin(Point2D::new(10.0, 10.0), start);
        pan.track(Point2D::new(30.0, 10.0));

        assert!(pan.tick(start + Duration::from_millis(2), 20.0).is_empty());
        let steps = pan.tick(start + Duration::from_millis(11), 20.0);
        assert_eq!(steps.len(), 2);
        assert_approx_eq!(steps[0].x, 10.0);
        assert_approx_eq!(steps[0].y, 0.0);
    }

    #[test]
    fn test_tick_catch_up_is_bounded() {
        let start = Instant::now();
        let mut pan = PanGesture::new(INTERVAL);
        pan.begin(Point2D::new(0.0, 0.0), start);
        pan.track(Point2D::new(0.0, 50.0));

        let late = start + Duration::from_secs(1);
        assert_eq!(pan.tick(late, 20.0).len(), MAX_CATCH_UP_TICKS as usize);
        // Resynchronised: nothing is owed at the same instant.
        assert!(pan.tick(late, 20.0).is_empty());
    }

    #[test]
    fn test_end_cancels_timer() {
        let start = Instant::now();
        let mut pan = PanGesture::new(INTERVAL);
        pan.begin(Point2D::new(0.0, 0.0), start);
        pan.track(Point2D::new(40.0, 0.0));
        assert!(pan.is_timer_running());

        pan.end();
        assert!(!pan.is_held());
        assert!(!pan.is_timer_running());
        assert!(pan.tick(start + Duration::from_millis(100), 20.0).is_empty());
    }

    #[test]
    fn test_move_reference_follows_scroll() {
        let mut pan = PanGesture::new(INTERVAL);
        pan.begin(Point2D::new(100.0, 100.0), Instant::now());
        pan.move_reference(12.0, -4.0);
        pan.track(Point2D::new(112.0, 96.0));
        assert_eq!(pan.reference(), Point2D::new(112.0, 96.0));
        assert_eq!(pan.delta(), Vector2D::default());
    }
}
