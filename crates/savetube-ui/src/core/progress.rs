//! Progress channel state machine: Closed -> Open -> (Reporting)* -> Closed.
//!
//! # Design
//! - At most one channel is open; `open_with` always closes the previous one first.
//! - Every open bumps a generation id so frames from a superseded stream are dropped.
//! - Malformed frames are logged and ignored; they never end the channel.
//! - There is no reconnect: a dropped stream simply leaves the channel closed.

use serde_json::Value;
use tracing::{debug, warn};

/// Decoded progress payload (`{ "progress": number, "error"?: string }`).
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressEvent {
    /// Raw percentage as sent by the server; negative signals failure.
    pub percent: f64,
    /// Optional failure description.
    pub error: Option<String>,
}

impl ProgressEvent {
    /// Decode an SSE `data` payload. A missing or non-numeric `progress` reads as 0.
    ///
    /// # Errors
    /// Returns the JSON error when the payload is not valid JSON.
    pub fn parse(data: &str) -> Result<Self, serde_json::Error> {
        let data = data.trim();
        let value: Value = serde_json::from_str(if data.is_empty() { "{}" } else { data })?;
        let percent = value.get("progress").and_then(Value::as_f64).unwrap_or(0.0);
        let error = match value.get("error") {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => Some(other.to_string()),
        };
        Ok(Self { percent, error })
    }

    /// Where this event leaves the transfer.
    #[must_use]
    pub fn phase(&self) -> ProgressPhase {
        if self.percent < 0.0 {
            ProgressPhase::Failed
        } else if self.percent >= 100.0 {
            ProgressPhase::Complete
        } else {
            ProgressPhase::Running
        }
    }
}

/// Transfer phase implied by a progress value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressPhase {
    /// Non-terminal update.
    Running,
    /// Terminal success (100).
    Complete,
    /// Terminal failure (negative).
    Failed,
}

/// Clamp a raw percentage for display.
#[must_use]
pub fn clamp_percent(percent: f64) -> f64 {
    percent.clamp(0.0, 100.0)
}

/// Text shown next to the bar (`45%`).
#[must_use]
pub fn percent_label(percent: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = clamp_percent(percent).floor() as u8;
    format!("{whole}%")
}

/// Visible state of the progress indicator.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressView {
    /// Whether the indicator is shown.
    pub visible: bool,
    /// Bar width in percent.
    pub width: f64,
    /// Percentage label.
    pub label: String,
}

impl Default for ProgressView {
    fn default() -> Self {
        Self::hidden()
    }
}

impl ProgressView {
    /// Hidden, neutral indicator.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            visible: false,
            width: 0.0,
            label: percent_label(0.0),
        }
    }

    /// Shown indicator reset to 0%.
    #[must_use]
    pub fn started() -> Self {
        Self {
            visible: true,
            ..Self::hidden()
        }
    }

    fn apply(&mut self, percent: f64) {
        self.width = clamp_percent(percent);
        self.label = percent_label(percent);
    }
}

/// Live connection backing an open channel.
pub trait ChannelHandle {
    /// Stop delivery. Must be safe to call on an already-ended stream.
    fn close(&self);
}

/// Result of feeding one frame to the channel.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameOutcome {
    /// Frame belongs to a closed or superseded channel.
    Stale,
    /// Payload could not be decoded; the channel stays open.
    Malformed,
    /// Non-terminal update.
    Progress {
        /// Clamped percentage now displayed.
        percent: f64,
    },
    /// Terminal success; the channel is closed.
    Complete,
    /// Terminal failure; the channel is closed.
    Failed {
        /// Server-supplied description, if any.
        error: Option<String>,
    },
}

/// Owner of the single progress connection and its indicator.
#[derive(Debug)]
pub struct ProgressChannel<H: ChannelHandle> {
    handle: Option<H>,
    generation: u64,
    view: ProgressView,
}

impl<H: ChannelHandle> Default for ProgressChannel<H> {
    fn default() -> Self {
        Self {
            handle: None,
            generation: 0,
            view: ProgressView::hidden(),
        }
    }
}

impl<H: ChannelHandle> ProgressChannel<H> {
    /// Close any open connection, reset the indicator to 0% and connect anew.
    ///
    /// `connect` receives the new generation id, which the transport must pass
    /// back with every frame. Returns that generation id.
    pub fn open_with(&mut self, connect: impl FnOnce(u64) -> Option<H>) -> u64 {
        self.close();
        self.generation = self.generation.wrapping_add(1);
        self.view = ProgressView::started();
        self.handle = connect(self.generation);
        if self.handle.is_none() {
            warn!(generation = self.generation, "progress stream could not be opened");
        } else {
            debug!(generation = self.generation, "progress stream opened");
        }
        self.generation
    }

    /// Close the connection if one is open. Idempotent.
    pub fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.close();
            debug!(generation = self.generation, "progress stream closed");
        }
    }

    /// Close the connection and hide the indicator, unless a newer open superseded `generation`.
    ///
    /// Returns whether the reset was applied.
    pub fn reset_for(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "skipping reset for superseded progress stream"
            );
            return false;
        }
        self.close();
        self.view = ProgressView::hidden();
        true
    }

    /// Whether a connection is currently open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Current indicator state.
    #[must_use]
    pub const fn view(&self) -> &ProgressView {
        &self.view
    }

    /// Apply one inbound frame for `generation`.
    pub fn handle_frame(&mut self, generation: u64, data: &str) -> FrameOutcome {
        if generation != self.generation || self.handle.is_none() {
            return FrameOutcome::Stale;
        }
        let event = match ProgressEvent::parse(data) {
            Ok(event) => event,
            Err(err) => {
                warn!(error = %err, payload = data, "ignoring malformed progress frame");
                return FrameOutcome::Malformed;
            }
        };
        self.view.apply(event.percent);
        match event.phase() {
            ProgressPhase::Running => FrameOutcome::Progress {
                percent: self.view.width,
            },
            ProgressPhase::Complete => {
                self.close();
                FrameOutcome::Complete
            }
            ProgressPhase::Failed => {
                self.close();
                FrameOutcome::Failed { error: event.error }
            }
        }
    }

    /// The transport for `generation` ended on its own. No reconnect is attempted.
    pub fn handle_disconnect(&mut self, generation: u64) {
        if generation == self.generation && self.handle.is_some() {
            debug!(generation, "progress stream ended before a terminal event");
            self.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Counters {
        open: Rc<Cell<usize>>,
        max_open: Rc<Cell<usize>>,
        closes: Rc<Cell<usize>>,
    }

    struct FakeHandle {
        counters: Counters,
    }

    impl ChannelHandle for FakeHandle {
        fn close(&self) {
            self.counters.open.set(self.counters.open.get() - 1);
            self.counters.closes.set(self.counters.closes.get() + 1);
        }
    }

    fn connect(counters: &Counters) -> impl FnOnce(u64) -> Option<FakeHandle> + '_ {
        move |_| {
            let open = counters.open.get() + 1;
            counters.open.set(open);
            counters.max_open.set(counters.max_open.get().max(open));
            Some(FakeHandle {
                counters: counters.clone(),
            })
        }
    }

    fn opened() -> (ProgressChannel<FakeHandle>, Counters, u64) {
        let counters = Counters::default();
        let mut channel = ProgressChannel::default();
        let generation = channel.open_with(connect(&counters));
        (channel, counters, generation)
    }

    #[test]
    fn parse_reads_progress_and_error() {
        let event = ProgressEvent::parse(r#"{"progress": -1, "error": "bad url"}"#);
        assert_eq!(
            event.ok(),
            Some(ProgressEvent {
                percent: -1.0,
                error: Some("bad url".into())
            })
        );
    }

    #[test]
    fn parse_defaults_non_numeric_progress_to_zero() {
        let event = ProgressEvent::parse(r#"{"progress": "fast"}"#).ok();
        assert_eq!(event.map(|e| e.percent), Some(0.0));
        let empty = ProgressEvent::parse("").ok();
        assert_eq!(empty.map(|e| e.percent), Some(0.0));
    }

    #[test]
    fn labels_clamp_and_floor() {
        assert_eq!(percent_label(45.7), "45%");
        assert_eq!(percent_label(-3.0), "0%");
        assert_eq!(percent_label(180.0), "100%");
    }

    #[test]
    fn open_resets_indicator() {
        let (channel, _, generation) = opened();
        assert_eq!(generation, 1);
        assert!(channel.is_open());
        assert_eq!(channel.view(), &ProgressView::started());
    }

    #[test]
    fn running_update_keeps_channel_open() {
        let (mut channel, counters, generation) = opened();
        let outcome = channel.handle_frame(generation, r#"{"progress": 45}"#);
        assert_eq!(outcome, FrameOutcome::Progress { percent: 45.0 });
        assert_eq!(channel.view().label, "45%");
        assert!((channel.view().width - 45.0).abs() < f64::EPSILON);
        assert!(channel.is_open());
        assert_eq!(counters.closes.get(), 0);
    }

    #[test]
    fn negative_progress_fails_and_closes() {
        let (mut channel, counters, generation) = opened();
        let outcome = channel.handle_frame(generation, r#"{"progress": -1, "error": "bad url"}"#);
        assert_eq!(
            outcome,
            FrameOutcome::Failed {
                error: Some("bad url".into())
            }
        );
        assert!(!channel.is_open());
        assert_eq!(counters.open.get(), 0);
        assert_eq!(channel.view().label, "0%");
    }

    #[test]
    fn hundred_completes_and_later_frames_are_stale() {
        let (mut channel, _, generation) = opened();
        assert_eq!(
            channel.handle_frame(generation, r#"{"progress": 100}"#),
            FrameOutcome::Complete
        );
        assert!(!channel.is_open());
        assert_eq!(
            channel.handle_frame(generation, r#"{"progress": 50}"#),
            FrameOutcome::Stale
        );
        assert_eq!(channel.view().label, "100%");
    }

    #[test]
    fn malformed_frames_are_ignored() {
        let (mut channel, _, generation) = opened();
        assert_eq!(
            channel.handle_frame(generation, "{not json"),
            FrameOutcome::Malformed
        );
        assert!(channel.is_open());
        assert_eq!(
            channel.handle_frame(generation, r#"{"progress": 10}"#),
            FrameOutcome::Progress { percent: 10.0 }
        );
    }

    #[test]
    fn sequential_opens_never_overlap() {
        let counters = Counters::default();
        let mut channel = ProgressChannel::default();
        let first = channel.open_with(connect(&counters));
        let second = channel.open_with(connect(&counters));
        assert_eq!(counters.max_open.get(), 1);
        assert_eq!(counters.open.get(), 1);
        assert_eq!(counters.closes.get(), 1);
        assert_eq!(
            channel.handle_frame(first, r#"{"progress": 80}"#),
            FrameOutcome::Stale
        );
        assert_eq!(
            channel.handle_frame(second, r#"{"progress": 20}"#),
            FrameOutcome::Progress { percent: 20.0 }
        );
    }

    #[test]
    fn close_is_idempotent() {
        let (mut channel, counters, generation) = opened();
        channel.close();
        channel.close();
        assert_eq!(counters.closes.get(), 1);
        assert!(channel.reset_for(generation));
        assert_eq!(channel.view(), &ProgressView::hidden());
        assert_eq!(counters.closes.get(), 1);
    }

    #[test]
    fn late_reset_leaves_newer_stream_running() {
        let counters = Counters::default();
        let mut channel = ProgressChannel::default();
        let first = channel.open_with(connect(&counters));
        let second = channel.open_with(connect(&counters));
        assert_eq!(
            channel.handle_frame(second, r#"{"progress": 30}"#),
            FrameOutcome::Progress { percent: 30.0 }
        );

        assert!(!channel.reset_for(first));
        assert!(channel.is_open());
        assert!(channel.view().visible);
        assert_eq!(channel.view().label, "30%");
        assert_eq!(counters.open.get(), 1);

        assert!(channel.reset_for(second));
        assert!(!channel.is_open());
        assert_eq!(channel.view(), &ProgressView::hidden());
    }

    #[test]
    fn disconnect_closes_without_reopening() {
        let (mut channel, counters, generation) = opened();
        channel.handle_disconnect(generation + 1);
        assert!(channel.is_open());
        channel.handle_disconnect(generation);
        assert!(!channel.is_open());
        assert_eq!(counters.max_open.get(), 1);
    }

    #[test]
    fn failed_connect_leaves_channel_closed() {
        let mut channel: ProgressChannel<FakeHandle> = ProgressChannel::default();
        let generation = channel.open_with(|_| None);
        assert!(!channel.is_open());
        assert!(channel.view().visible);
        assert_eq!(
            channel.handle_frame(generation, r#"{"progress": 10}"#),
            FrameOutcome::Stale
        );
    }
}
