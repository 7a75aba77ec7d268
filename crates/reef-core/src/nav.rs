//! Section navigation: turns raw wheel ticks, touch swipes and header
//! clicks into debounced section changes. The controller owns the active
//! index; the camera rig and overlay follow it.

use crate::sections::SECTIONS;

/// Accumulated wheel delta (px) needed to trigger a step.
pub const WHEEL_THRESHOLD: f32 = 120.0;
/// Touch swipe distance (px) needed to trigger a step.
pub const TOUCH_THRESHOLD: f32 = 60.0;
/// Minimum time between section changes; matches the sweep plus a beat.
pub const NAV_DEBOUNCE_SEC: f64 = 1.6;

/// A committed section change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavChange {
    pub from: usize,
    pub to: usize,
}

pub struct NavController {
    active: usize,
    locked: bool,
    last_change: f64,
    wheel_accum: f32,
    touch_start_y: Option<f32>,
}

impl NavController {
    /// Starts locked; input is inert until the loader dismisses and calls
    /// [`unlock`](Self::unlock).
    pub fn new() -> NavController {
        NavController {
            active: 0,
            locked: true,
            // first change after unlock is allowed immediately
            last_change: f64::NEG_INFINITY,
            wheel_accum: 0.0,
            touch_start_y: None,
        }
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn active(&self) -> usize {
        self.active
    }

    fn debounced(&self, now: f64) -> bool {
        now - self.last_change < NAV_DEBOUNCE_SEC
    }

    fn commit(&mut self, to: usize, now: f64) -> Option<NavChange> {
        let from = self.active;
        self.active = to;
        self.last_change = now;
        self.wheel_accum = 0.0;
        Some(NavChange { from, to })
    }

    /// Step by a signed offset. Attempts past either end are ignored and do
    /// not consume the debounce window.
    pub fn step(&mut self, dir: i32, now: f64) -> Option<NavChange> {
        if self.locked || self.debounced(now) {
            return None;
        }
        let to = self.active as i64 + dir as i64;
        if to < 0 || to >= SECTIONS.len() as i64 {
            return None;
        }
        self.commit(to as usize, now)
    }

    /// Direct jump from the header. Same-section and out-of-range requests
    /// are ignored.
    pub fn request(&mut self, index: usize, now: f64) -> Option<NavChange> {
        if self.locked || index >= SECTIONS.len() || index == self.active || self.debounced(now) {
            return None;
        }
        self.commit(index, now)
    }

    /// Feed a wheel delta (positive = scroll down = forward). Deltas
    /// accumulate until the threshold is crossed; during debounce they are
    /// dropped so a long fling does not queue up extra steps.
    pub fn on_wheel(&mut self, delta_y: f32, now: f64) -> Option<NavChange> {
        if self.locked || self.debounced(now) {
            self.wheel_accum = 0.0;
            return None;
        }
        self.wheel_accum += delta_y;
        if self.wheel_accum.abs() < WHEEL_THRESHOLD {
            return None;
        }
        let dir = if self.wheel_accum > 0.0 { 1 } else { -1 };
        self.wheel_accum = 0.0;
        self.step(dir, now)
    }

    pub fn on_touch_start(&mut self, y: f32) {
        self.touch_start_y = Some(y);
    }

    /// Swipe up (finger moves up, y decreases) navigates forward.
    pub fn on_touch_end(&mut self, y: f32, now: f64) -> Option<NavChange> {
        let start = self.touch_start_y.take()?;
        let delta = start - y;
        if delta.abs() < TOUCH_THRESHOLD {
            return None;
        }
        self.step(if delta > 0.0 { 1 } else { -1 }, now)
    }
}

impl Default for NavController {
    fn default() -> Self {
        NavController::new()
    }
}
