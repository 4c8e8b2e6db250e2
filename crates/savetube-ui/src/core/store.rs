//! App-wide yewdux store slices.
//!
//! # Design
//! - Keep shared UI state in one store to avoid ad-hoc contexts.
//! - Use small, focused slices so reducers stay predictable.
//! - The progress connection itself lives outside the store; only its view is mirrored here.

use crate::core::download::{StatusMessage, StatusTexts};
use crate::core::metadata::MediaMetadata;
use crate::core::nav::NavState;
use crate::core::progress::{FrameOutcome, ProgressView};
use crate::i18n::LanguageState;
use yewdux::store::Store;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Store, Default)]
pub struct AppStore {
    /// Active language and its bundle.
    pub language: LanguageState,
    /// Header, active section and mobile menu state.
    pub nav: NavState,
    /// Download form, status and progress state.
    pub download: DownloadSlice,
}

/// State owned by the download flow.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct DownloadSlice {
    /// A download is in flight; the submit button is disabled.
    pub busy: bool,
    /// A preview lookup is in flight.
    pub searching: bool,
    /// Last status message, if any.
    pub status: Option<StatusMessage>,
    /// Progress indicator mirror.
    pub progress: ProgressView,
    /// Open preview dialog, if any.
    pub preview: Option<PreviewState>,
}

/// Video details shown in the preview dialog, with the link they belong to.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewState {
    /// Link the details were fetched for.
    pub url: String,
    /// Details returned by the backend.
    pub metadata: MediaMetadata,
}

impl DownloadSlice {
    /// Mark a submission as started and clear the previous status.
    pub fn begin(&mut self) {
        self.busy = true;
        self.status = None;
    }

    /// Mark the submission as settled.
    pub const fn finish(&mut self) {
        self.busy = false;
    }

    /// Replace the status message.
    pub fn show_status(&mut self, message: StatusMessage) {
        self.status = Some(message);
    }

    /// Mark a preview lookup as started and clear the previous status.
    pub fn begin_search(&mut self) {
        self.searching = true;
        self.status = None;
    }

    /// Mark the preview lookup as settled.
    pub const fn finish_search(&mut self) {
        self.searching = false;
    }

    /// Show the preview dialog for `url`.
    pub fn open_preview(&mut self, url: &str, metadata: MediaMetadata) {
        self.preview = Some(PreviewState {
            url: url.trim().to_string(),
            metadata,
        });
    }

    /// Dismiss the preview dialog.
    pub fn close_preview(&mut self) {
        self.preview = None;
    }

    /// Mirror the progress indicator.
    pub fn set_progress(&mut self, view: ProgressView) {
        self.progress = view;
    }

    /// Fold a progress frame outcome into the slice.
    pub fn apply_frame(&mut self, outcome: &FrameOutcome, view: &ProgressView, texts: &StatusTexts) {
        if matches!(outcome, FrameOutcome::Stale | FrameOutcome::Malformed) {
            return;
        }
        self.progress = view.clone();
        if let Some(message) = texts.for_frame(outcome) {
            self.status = Some(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::download::StatusKind;
    use crate::i18n::{LocaleCode, TranslationBundle};

    fn texts() -> StatusTexts {
        StatusTexts::from_bundle(&TranslationBundle::new(LocaleCode::Pt))
    }

    fn running(percent: f64) -> ProgressView {
        ProgressView {
            visible: true,
            width: percent,
            label: format!("{percent}%"),
        }
    }

    #[test]
    fn begin_clears_status_and_sets_busy() {
        let mut slice = DownloadSlice::default();
        slice.show_status(StatusMessage::error("old"));
        slice.begin();
        assert!(slice.busy);
        assert_eq!(slice.status, None);
        slice.finish();
        assert!(!slice.busy);
    }

    #[test]
    fn preview_keeps_the_trimmed_link() {
        let mut slice = DownloadSlice::default();
        let metadata = MediaMetadata {
            title: "Clip".into(),
            ..MediaMetadata::default()
        };
        slice.open_preview(" https://youtu.be/abc ", metadata.clone());
        assert_eq!(
            slice.preview,
            Some(PreviewState {
                url: "https://youtu.be/abc".into(),
                metadata
            })
        );
        slice.close_preview();
        assert_eq!(slice.preview, None);
    }

    #[test]
    fn search_flag_is_independent_of_busy() {
        let mut slice = DownloadSlice::default();
        slice.show_status(StatusMessage::error("old"));
        slice.begin_search();
        assert!(slice.searching);
        assert!(!slice.busy);
        assert_eq!(slice.status, None);
        slice.finish_search();
        assert!(!slice.searching);
    }

    #[test]
    fn progress_frames_update_the_mirror() {
        let mut slice = DownloadSlice::default();
        slice.apply_frame(&FrameOutcome::Progress { percent: 45.0 }, &running(45.0), &texts());
        assert_eq!(slice.progress, running(45.0));
        assert_eq!(slice.status, None);
    }

    #[test]
    fn stale_and_malformed_frames_are_ignored() {
        let mut slice = DownloadSlice::default();
        slice.apply_frame(&FrameOutcome::Stale, &running(80.0), &texts());
        slice.apply_frame(&FrameOutcome::Malformed, &running(80.0), &texts());
        assert_eq!(slice.progress, ProgressView::hidden());
    }

    #[test]
    fn failed_frame_sets_error_status() {
        let mut slice = DownloadSlice::default();
        slice.apply_frame(&FrameOutcome::Failed { error: None }, &running(0.0), &texts());
        let status = slice.status.as_ref().map(|s| (s.kind, s.text.as_str()));
        assert_eq!(status, Some((StatusKind::Error, "Falha no download.")));
    }

    #[test]
    fn default_store_starts_in_portuguese_on_first_section() {
        let store = AppStore::default();
        assert_eq!(store.language.locale(), LocaleCode::Pt);
        assert_eq!(store.nav.active, 0);
        assert!(!store.download.busy);
        assert!(!store.download.progress.visible);
        assert!(store.download.preview.is_none());
    }
}
