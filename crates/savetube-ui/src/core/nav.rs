//! Scroll and navigation state (sticky header, active section, eased anchor scrolling).
//!
//! # Design
//! - Geometry arrives as plain numbers so the rules run without a DOM.
//! - A missing section is passed as `None` and skipped; nothing here can fail.

/// Tolerance added to the scroll position when comparing against section offsets.
const ACTIVE_TOLERANCE_PX: f64 = 1.0;

/// Header and navigation affordances driven by scroll position.
#[derive(Clone, Debug, PartialEq)]
pub struct NavState {
    /// Whether the header is rendered in its "stuck" style.
    pub sticky: bool,
    /// Index of the highlighted navigation entry.
    pub active: usize,
    /// Number of navigation entries.
    pub section_count: usize,
    /// Whether the collapsed mobile menu is expanded.
    pub menu_open: bool,
}

impl Default for NavState {
    fn default() -> Self {
        Self::new(crate::config::SECTION_IDS.len())
    }
}

impl NavState {
    /// Fresh state with the first entry active.
    #[must_use]
    pub const fn new(section_count: usize) -> Self {
        Self {
            sticky: false,
            active: 0,
            section_count,
            menu_open: false,
        }
    }

    /// Recompute the sticky flag from the vertical scroll offset.
    pub fn update_sticky(&mut self, scroll_y: f64) {
        self.sticky = scroll_y > 0.0;
    }

    /// Mark exactly one entry as active. Out-of-range indices are ignored.
    pub fn set_active_section(&mut self, index: usize) {
        if index < self.section_count {
            self.active = index;
        }
    }

    /// Whether the entry at `index` is the active one.
    #[must_use]
    pub const fn is_active(&self, index: usize) -> bool {
        self.active == index
    }

    /// Select the last section whose header-adjusted top is at or above `scroll_y`.
    pub fn refresh_active_by_scroll(
        &mut self,
        scroll_y: f64,
        section_tops: &[Option<f64>],
        header_offset: f64,
    ) {
        self.set_active_section(active_section_for(scroll_y, section_tops, header_offset));
    }

    /// Flip the mobile menu.
    pub const fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Collapse the mobile menu.
    pub const fn close_menu(&mut self) {
        self.menu_open = false;
    }
}

/// Index of the section that should be highlighted for `scroll_y`.
///
/// `section_tops` holds absolute document offsets in section order; `None`
/// entries (absent anchors) never qualify. Returns 0 when nothing qualifies.
#[must_use]
pub fn active_section_for(scroll_y: f64, section_tops: &[Option<f64>], header_offset: f64) -> usize {
    section_tops
        .iter()
        .enumerate()
        .filter_map(|(index, top)| top.map(|top| (index, top - header_offset)))
        .filter(|(_, top)| scroll_y + ACTIVE_TOLERANCE_PX >= *top)
        .map(|(index, _)| index)
        .last()
        .unwrap_or(0)
}

/// Fragment id referenced by an in-page link (`#section_2` -> `section_2`).
#[must_use]
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Quadratic ease-in/ease-out over `t` in `[0, 1]`.
#[must_use]
pub fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        (4.0 - 2.0 * t).mul_add(t, -1.0)
    }
}

/// Eased scroll from the current offset to a target section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollAnimation {
    start_y: f64,
    distance: f64,
    duration_ms: f64,
}

impl ScrollAnimation {
    /// Plan a scroll that lands `header_offset` pixels above `target_top`.
    #[must_use]
    pub fn new(start_y: f64, target_top: f64, header_offset: f64, duration_ms: u32) -> Self {
        Self {
            start_y,
            distance: (target_top - header_offset) - start_y,
            duration_ms: f64::from(duration_ms.max(1)),
        }
    }

    /// Scroll offset after `elapsed_ms`, and whether the animation has finished.
    #[must_use]
    pub fn position_at(&self, elapsed_ms: f64) -> (f64, bool) {
        let progress = (elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        let y = self.distance.mul_add(ease_in_out_quad(progress), self.start_y);
        (y, progress >= 1.0)
    }
}

/// What a throttled handler should do for the current event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThrottleDecision {
    /// Run the handler immediately.
    RunNow,
    /// Replace any pending trailing run with one after `delay_ms`.
    Defer {
        /// Delay until the trailing run.
        delay_ms: u32,
    },
}

/// Leading + trailing throttle bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Throttle {
    wait_ms: f64,
    last_run_ms: f64,
}

impl Throttle {
    /// Throttle that allows one run per `wait_ms`.
    #[must_use]
    pub fn new(wait_ms: u32) -> Self {
        Self {
            wait_ms: f64::from(wait_ms),
            last_run_ms: f64::NEG_INFINITY,
        }
    }

    /// Decide how to handle an event observed at `now_ms`.
    pub fn poll(&mut self, now_ms: f64) -> ThrottleDecision {
        let since = now_ms - self.last_run_ms;
        if since >= self.wait_ms {
            self.last_run_ms = now_ms;
            ThrottleDecision::RunNow
        } else {
            let remaining = (self.wait_ms - since).max(0.0).ceil();
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let delay_ms = remaining as u32;
            ThrottleDecision::Defer { delay_ms }
        }
    }

    /// Record that a deferred run fired at `now_ms`.
    pub const fn mark_run(&mut self, now_ms: f64) {
        self.last_run_ms = now_ms;
    }
}

/// Share of an element (by its viewport rect) that is inside the viewport.
#[must_use]
pub fn visible_fraction(top: f64, bottom: f64, viewport_height: f64) -> f64 {
    let height = bottom - top;
    if height <= 0.0 {
        return 0.0;
    }
    let visible = bottom.min(viewport_height) - top.max(0.0);
    (visible / height).clamp(0.0, 1.0)
}

/// Whether a timeline entry should be revealed.
#[must_use]
pub fn is_revealed(top: f64, bottom: f64, viewport_height: f64, threshold: f64) -> bool {
    visible_fraction(top, bottom, viewport_height) >= threshold
}

/// Height of the timeline progress line for a container ending at `container_bottom`.
#[must_use]
pub fn timeline_fill_height(container_bottom: f64, viewport_height: f64) -> f64 {
    viewport_height.mul_add(-0.5, container_bottom).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFSET: f64 = 75.0;

    fn tops() -> Vec<Option<f64>> {
        vec![Some(0.0), Some(900.0), Some(1800.0)]
    }

    #[test]
    fn sticky_tracks_positive_offset_only() {
        let mut nav = NavState::new(3);
        nav.update_sticky(0.0);
        assert!(!nav.sticky);
        nav.update_sticky(12.0);
        nav.update_sticky(12.0);
        assert!(nav.sticky);
        nav.update_sticky(0.0);
        assert!(!nav.sticky);
    }

    #[test]
    fn set_active_marks_single_entry() {
        let mut nav = NavState::new(3);
        nav.set_active_section(2);
        assert_eq!(
            (0..3).map(|i| nav.is_active(i)).collect::<Vec<_>>(),
            vec![false, false, true]
        );
        nav.set_active_section(7);
        assert_eq!(nav.active, 2);
    }

    #[test]
    fn scroll_zero_selects_first_section() {
        let mut nav = NavState::new(3);
        nav.set_active_section(1);
        nav.refresh_active_by_scroll(0.0, &tops(), OFFSET);
        assert_eq!(nav.active, 0);
    }

    #[test]
    fn active_index_is_monotonic_in_scroll_position() {
        let mut previous = 0;
        let mut y = 0.0;
        while y < 3000.0 {
            let index = active_section_for(y, &tops(), OFFSET);
            assert!(index >= previous, "index dropped at {y}");
            previous = index;
            y += 25.0;
        }
        assert_eq!(previous, 2);
    }

    #[test]
    fn section_boundaries_respect_header_offset_and_tolerance() {
        assert_eq!(active_section_for(823.0, &tops(), OFFSET), 0);
        assert_eq!(active_section_for(824.0, &tops(), OFFSET), 1);
        assert_eq!(active_section_for(1725.0, &tops(), OFFSET), 2);
    }

    #[test]
    fn missing_sections_are_skipped() {
        let sparse = vec![Some(0.0), None, Some(1800.0)];
        assert_eq!(active_section_for(1000.0, &sparse, OFFSET), 0);
        assert_eq!(active_section_for(1800.0, &sparse, OFFSET), 2);
        assert_eq!(active_section_for(500.0, &[None, None], OFFSET), 0);
    }

    #[test]
    fn anchor_target_requires_fragment() {
        assert_eq!(anchor_target("#section_2"), Some("section_2"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("/terms"), None);
    }

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert!(ease_in_out_quad(0.0).abs() < f64::EPSILON);
        assert!((ease_in_out_quad(0.5) - 0.5).abs() < 1e-9);
        assert!((ease_in_out_quad(1.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn scroll_animation_lands_above_target() {
        let anim = ScrollAnimation::new(100.0, 1000.0, OFFSET, 300);
        let (start, done) = anim.position_at(0.0);
        assert!((start - 100.0).abs() < 1e-9);
        assert!(!done);
        let (mid, _) = anim.position_at(150.0);
        assert!(mid > 100.0 && mid < 925.0);
        let (end, done) = anim.position_at(450.0);
        assert!((end - 925.0).abs() < 1e-9);
        assert!(done);
    }

    #[test]
    fn throttle_runs_leading_then_defers() {
        let mut throttle = Throttle::new(50);
        assert_eq!(throttle.poll(1000.0), ThrottleDecision::RunNow);
        assert_eq!(
            throttle.poll(1020.0),
            ThrottleDecision::Defer { delay_ms: 30 }
        );
        throttle.mark_run(1050.0);
        assert_eq!(
            throttle.poll(1060.0),
            ThrottleDecision::Defer { delay_ms: 40 }
        );
        assert_eq!(throttle.poll(1100.0), ThrottleDecision::RunNow);
    }

    #[test]
    fn reveal_requires_half_visibility() {
        assert!(is_revealed(100.0, 300.0, 800.0, 0.5));
        assert!(is_revealed(700.0, 900.0, 800.0, 0.5));
        assert!(!is_revealed(750.0, 950.0, 800.0, 0.5));
        assert!(!is_revealed(-500.0, -100.0, 800.0, 0.5));
        assert!(visible_fraction(10.0, 10.0, 800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn timeline_fill_never_negative() {
        assert!((timeline_fill_height(1000.0, 800.0) - 600.0).abs() < 1e-9);
        assert!(timeline_fill_height(100.0, 800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn menu_toggle_and_close() {
        let mut nav = NavState::default();
        nav.toggle_menu();
        assert!(nav.menu_open);
        nav.close_menu();
        assert!(!nav.menu_open);
    }
}
