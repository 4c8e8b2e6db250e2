//! Window scroll bindings: throttled listeners, section geometry and eased anchor scrolling.

use crate::config::UiConfig;
use crate::core::nav::{ScrollAnimation, Throttle, ThrottleDecision};
use gloo::events::EventListener;
use gloo::render::{AnimationFrame, request_animation_frame};
use gloo::utils::{document, window};
use gloo_timers::callback::Timeout;
use js_sys::Date;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::Element;

thread_local! {
    static ACTIVE_SCROLL: RefCell<Option<AnimationFrame>> = const { RefCell::new(None) };
}

/// Current vertical scroll offset.
pub(crate) fn scroll_y() -> f64 {
    window().scroll_y().unwrap_or(0.0)
}

/// Current viewport height.
pub(crate) fn viewport_height() -> f64 {
    window()
        .inner_height()
        .ok()
        .and_then(|height| height.as_f64())
        .unwrap_or(0.0)
}

/// Viewport-relative `(top, bottom)` of an element.
pub(crate) fn viewport_rect(element: &Element) -> (f64, f64) {
    let rect = element.get_bounding_client_rect();
    (rect.top(), rect.bottom())
}

/// Absolute document offsets of the given section ids; absent sections yield `None`.
pub(crate) fn section_tops(ids: &[&str]) -> Vec<Option<f64>> {
    let y = scroll_y();
    let document = document();
    ids.iter()
        .map(|id| {
            document
                .get_element_by_id(id)
                .map(|element| viewport_rect(&element).0 + y)
        })
        .collect()
}

/// Scroll listener running its handler at most once per window, plus one trailing run.
///
/// Dropping the value detaches the listener and cancels a pending trailing run.
pub(crate) struct ThrottledScroll {
    _listener: EventListener,
    _pending: Rc<RefCell<Option<Timeout>>>,
}

impl ThrottledScroll {
    pub(crate) fn new(wait_ms: u32, handler: Rc<dyn Fn()>) -> Self {
        let throttle = Rc::new(RefCell::new(Throttle::new(wait_ms)));
        let pending: Rc<RefCell<Option<Timeout>>> = Rc::default();
        let listener = EventListener::new(&window(), "scroll", {
            let pending = Rc::clone(&pending);
            move |_event| {
                let decision = throttle.borrow_mut().poll(Date::now());
                match decision {
                    ThrottleDecision::RunNow => handler(),
                    ThrottleDecision::Defer { delay_ms } => {
                        let throttle = Rc::clone(&throttle);
                        let handler = Rc::clone(&handler);
                        let trailing = Timeout::new(delay_ms, move || {
                            throttle.borrow_mut().mark_run(Date::now());
                            handler();
                        });
                        *pending.borrow_mut() = Some(trailing);
                    }
                }
            }
        });
        Self {
            _listener: listener,
            _pending: pending,
        }
    }
}

/// Ease the window to the section with `id`, leaving room for the sticky header.
///
/// Returns `false` when no such element exists so the caller can keep the default navigation.
pub(crate) fn scroll_to_section(id: &str, config: &UiConfig) -> bool {
    let Some(target) = document().get_element_by_id(id) else {
        return false;
    };
    let start_y = scroll_y();
    let top = viewport_rect(&target).0 + start_y;
    let animation = ScrollAnimation::new(
        start_y,
        top,
        config.header_offset_px,
        config.scroll_duration_ms,
    );
    schedule_frame(animation, None);
    true
}

fn schedule_frame(animation: ScrollAnimation, started_at: Option<f64>) {
    let frame = request_animation_frame(move |now| {
        let started = started_at.unwrap_or(now);
        let (y, done) = animation.position_at(now - started);
        window().scroll_to_with_x_and_y(0.0, y);
        if !done {
            schedule_frame(animation, Some(started));
        }
    });
    // A new scroll supersedes any animation still in flight.
    let previous = ACTIVE_SCROLL.with(|slot| slot.replace(Some(frame)));
    drop(previous);
}
