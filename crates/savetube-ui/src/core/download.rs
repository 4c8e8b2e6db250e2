//! Download orchestration: validate, open progress, request, save, reconcile.
//!
//! # Design
//! - Browser effects sit behind [`DownloadEnv`] so the flow runs under test with fakes.
//! - The progress channel is opened before the request is issued.
//! - Cleanup (close channel, hide indicator) is deferred by a fixed delay on every
//!   outcome so a late terminal progress frame can still land. It is scoped to the
//!   progress generation the attempt opened, so it never tears down a later attempt.
//! - Nothing here guards against overlapping calls; the form disables re-submission.

use crate::config::UiConfig;
use crate::core::disposition::suggested_filename;
use crate::core::metadata::MediaMetadata;
use crate::core::progress::FrameOutcome;
use crate::error::{DownloadError, DownloadResult};
use crate::i18n::TranslationBundle;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Requested output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum FileType {
    /// Audio-only (`mp3`).
    #[serde(rename = "mp3")]
    Audio,
    /// Video (`mp4`).
    #[default]
    #[serde(rename = "mp4")]
    Video,
}

impl FileType {
    /// Normalise a form value. Empty or unrecognised values mean video.
    #[must_use]
    pub fn from_input(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mp3" | "audio" => Self::Audio,
            _ => Self::Video,
        }
    }

    /// Value sent as `file_type`.
    #[must_use]
    pub const fn wire(self) -> &'static str {
        match self {
            Self::Audio => "mp3",
            Self::Video => "mp4",
        }
    }

    /// Filename used when the response does not suggest one.
    #[must_use]
    pub fn default_filename(self) -> String {
        format!("download.{}", self.wire())
    }

    /// Qualities offered in the preview dialog, best first.
    ///
    /// Audio values are bitrates in kbps, video values are maximum heights in pixels.
    #[must_use]
    pub const fn quality_options(self) -> &'static [u32] {
        match self {
            Self::Audio => &AUDIO_BITRATES_KBPS,
            Self::Video => &VIDEO_HEIGHTS_PX,
        }
    }

    /// Display label for a quality value (`192 kbps`, `720p`).
    #[must_use]
    pub fn quality_label(self, quality: u32) -> String {
        match self {
            Self::Audio => format!("{quality} kbps"),
            Self::Video => format!("{quality}p"),
        }
    }
}

/// Audio bitrates offered for MP3 extraction.
pub const AUDIO_BITRATES_KBPS: [u32; 4] = [320, 256, 192, 128];
/// Maximum video heights offered for MP4 downloads.
pub const VIDEO_HEIGHTS_PX: [u32; 4] = [1080, 720, 480, 360];

/// Body of `POST /api/main/`.
///
/// The quality fields are only sent when a quality was picked in the preview dialog,
/// so a plain form submit carries exactly `{ url, file_type }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DownloadRequest {
    /// Trimmed, non-empty source URL.
    pub url: String,
    /// Requested format.
    pub file_type: FileType,
    /// Target MP3 bitrate in kbps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_bitrate: Option<u32>,
    /// Maximum MP4 height in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_quality: Option<u32>,
}

impl DownloadRequest {
    /// Build a request, or `None` when the URL is blank.
    #[must_use]
    pub fn new(url: &str, file_type: &str) -> Option<Self> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }
        Some(Self {
            url: url.to_string(),
            file_type: FileType::from_input(file_type),
            audio_bitrate: None,
            video_quality: None,
        })
    }

    /// Attach a quality to the field matching the file type.
    #[must_use]
    pub const fn with_quality(mut self, quality: Option<u32>) -> Self {
        match self.file_type {
            FileType::Audio => self.audio_bitrate = quality,
            FileType::Video => self.video_quality = quality,
        }
        self
    }
}

/// Backend response reduced to what the flow needs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw `Content-Disposition` header, if sent.
    pub content_disposition: Option<String>,
    /// Full response body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `error` field of a JSON error body, when present and non-empty.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        #[derive(Deserialize)]
        struct ErrorBody {
            error: Option<String>,
        }
        serde_json::from_slice::<ErrorBody>(&self.body)
            .ok()
            .and_then(|body| body.error)
            .filter(|message| !message.trim().is_empty())
    }
}

/// File handed to the browser for saving.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedFile {
    /// Name the file was saved under.
    pub filename: String,
    /// Payload size in bytes.
    pub size: usize,
}

/// Tone of a status message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    /// Positive outcome.
    Success,
    /// Failure.
    Error,
}

/// Message rendered in the status area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    /// Tone.
    pub kind: StatusKind,
    /// Text shown to the user.
    pub text: String,
}

impl StatusMessage {
    /// Success message.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    /// Error message.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    /// Whether this is an error message.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

/// Localised texts used by the flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusTexts {
    /// Blank URL.
    pub invalid_url: String,
    /// Non-2xx response without a usable body, or transport failure.
    pub request_failed: String,
    /// Negative progress without an error description.
    pub transfer_failed: String,
    /// Browser refused the save.
    pub save_failed: String,
    /// Success.
    pub completed: String,
    /// Video details could not be loaded.
    pub preview_failed: String,
}

impl StatusTexts {
    /// Resolve texts from a translation bundle.
    #[must_use]
    pub fn from_bundle(bundle: &TranslationBundle) -> Self {
        Self {
            invalid_url: bundle.text("status.invalidUrl"),
            request_failed: bundle.text("status.requestFailed"),
            transfer_failed: bundle.text("status.transferFailed"),
            save_failed: bundle.text("status.saveFailed"),
            completed: bundle.text("status.completed"),
            preview_failed: bundle.text("status.previewFailed"),
        }
    }

    /// Status text for a failed download.
    #[must_use]
    pub fn for_error(&self, err: &DownloadError) -> String {
        match err {
            DownloadError::Save { .. } => self.save_failed.clone(),
            DownloadError::Transport { .. } => self.request_failed.clone(),
            DownloadError::Validation { .. } | DownloadError::Request { .. } => err
                .user_message()
                .map_or_else(|| self.request_failed.clone(), ToString::to_string),
        }
    }

    /// Status text for a failed preview lookup.
    #[must_use]
    pub fn for_preview_error(&self, err: &DownloadError) -> String {
        err.user_message()
            .map_or_else(|| self.preview_failed.clone(), ToString::to_string)
    }

    /// Status message for a progress frame, when the frame carries a failure.
    #[must_use]
    pub fn for_frame(&self, outcome: &FrameOutcome) -> Option<StatusMessage> {
        match outcome {
            FrameOutcome::Failed { error } => Some(StatusMessage::error(
                error
                    .as_deref()
                    .filter(|text| !text.trim().is_empty())
                    .unwrap_or(self.transfer_failed.as_str()),
            )),
            _ => None,
        }
    }
}

/// Browser side effects used by the orchestrator.
#[async_trait(?Send)]
pub trait DownloadEnv: Clone + 'static {
    /// Issue the download request and read the full body.
    async fn send(&self, endpoint: &str, request: &DownloadRequest) -> DownloadResult<RawResponse>;
    /// Look up title, thumbnail and duration for `url`.
    async fn fetch_metadata(&self, endpoint: &str, url: &str) -> DownloadResult<RawResponse>;
    /// Open (or re-open) the progress channel and return its generation id.
    fn open_progress(&self) -> u64;
    /// Close the progress channel and hide the indicator, unless a newer
    /// generation than `generation` has been opened since.
    fn reset_progress(&self, generation: u64);
    /// Hand the payload to the browser under `filename`.
    fn save_file(&self, payload: &[u8], filename: &str) -> DownloadResult<()>;
    /// Render a status message.
    fn show_status(&self, message: StatusMessage);
    /// Run `task` once after `delay_ms`. Not cancellable.
    fn defer(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// Drives one download attempt per call.
#[derive(Clone, Debug)]
pub struct DownloadOrchestrator<E> {
    env: E,
    endpoint: String,
    metadata_endpoint: String,
    cleanup_delay_ms: u32,
    texts: StatusTexts,
}

impl<E: DownloadEnv> DownloadOrchestrator<E> {
    /// Create an orchestrator bound to `env`.
    #[must_use]
    pub fn new(env: E, config: &UiConfig, texts: StatusTexts) -> Self {
        Self {
            env,
            endpoint: config.download_url(),
            metadata_endpoint: config.metadata_url(),
            cleanup_delay_ms: config.cleanup_delay_ms,
            texts,
        }
    }

    /// Run one download.
    ///
    /// # Errors
    /// - [`DownloadError::Validation`] for a blank URL; nothing is opened or sent.
    /// - [`DownloadError::Request`] for a non-2xx response.
    /// - [`DownloadError::Transport`] when the request or body read fails.
    /// - [`DownloadError::Save`] when the browser refuses the save.
    ///
    /// Every error is also rendered through [`DownloadEnv::show_status`].
    pub async fn start_download(&self, url: &str, file_type: &str) -> DownloadResult<SavedFile> {
        self.start_download_with(url, file_type, None).await
    }

    /// Run one download at a quality picked in the preview dialog.
    ///
    /// # Errors
    /// Same as [`Self::start_download`].
    pub async fn start_download_with(
        &self,
        url: &str,
        file_type: &str,
        quality: Option<u32>,
    ) -> DownloadResult<SavedFile> {
        let Some(request) = DownloadRequest::new(url, file_type) else {
            return Err(self.reject_blank_url());
        };
        let request = request.with_quality(quality);

        info!(
            file_type = request.file_type.wire(),
            quality = ?quality,
            "download started"
        );
        let generation = self.env.open_progress();
        let outcome = self.transfer(&request).await;
        match &outcome {
            Ok(saved) => {
                info!(filename = %saved.filename, bytes = saved.size, "download saved");
                self.env
                    .show_status(StatusMessage::success(self.texts.completed.clone()));
            }
            Err(err) => {
                warn!(error = %err, detail = ?err, "download failed");
                self.env
                    .show_status(StatusMessage::error(self.texts.for_error(err)));
            }
        }
        self.schedule_cleanup(generation);
        outcome
    }

    /// Fetch the details shown before a quality is chosen. No progress channel is opened.
    ///
    /// # Errors
    /// - [`DownloadError::Validation`] for a blank URL; nothing is sent.
    /// - [`DownloadError::Request`] for a non-2xx response.
    /// - [`DownloadError::Transport`] when the lookup fails or the body is not JSON.
    ///
    /// Every error is also rendered through [`DownloadEnv::show_status`].
    pub async fn preview(&self, url: &str) -> DownloadResult<MediaMetadata> {
        let url = url.trim();
        if url.is_empty() {
            return Err(self.reject_blank_url());
        }
        let result = self.lookup(url).await;
        if let Err(err) = &result {
            warn!(error = %err, detail = ?err, "preview lookup failed");
            self.env
                .show_status(StatusMessage::error(self.texts.for_preview_error(err)));
        }
        result
    }

    fn reject_blank_url(&self) -> DownloadError {
        let err = DownloadError::Validation {
            message: self.texts.invalid_url.clone(),
        };
        self.env.show_status(StatusMessage::error(self.texts.for_error(&err)));
        err
    }

    async fn lookup(&self, url: &str) -> DownloadResult<MediaMetadata> {
        let response = self.env.fetch_metadata(&self.metadata_endpoint, url).await?;
        if !response.is_success() {
            return Err(DownloadError::Request {
                status: response.status,
                message: response
                    .error_message()
                    .unwrap_or_else(|| self.texts.preview_failed.clone()),
            });
        }
        MediaMetadata::from_body(&response.body)
            .map_err(|err| DownloadError::transport("decode_metadata", err.to_string()))
    }

    async fn transfer(&self, request: &DownloadRequest) -> DownloadResult<SavedFile> {
        let response = self.env.send(&self.endpoint, request).await?;
        if !response.is_success() {
            return Err(DownloadError::Request {
                status: response.status,
                message: response
                    .error_message()
                    .unwrap_or_else(|| self.texts.request_failed.clone()),
            });
        }
        let filename = suggested_filename(response.content_disposition.as_deref())
            .unwrap_or_else(|| request.file_type.default_filename());
        self.env.save_file(&response.body, &filename)?;
        Ok(SavedFile {
            filename,
            size: response.body.len(),
        })
    }

    fn schedule_cleanup(&self, generation: u64) {
        let env = self.env.clone();
        self.env.defer(
            self.cleanup_delay_ms,
            Box::new(move || env.reset_progress(generation)),
        );
    }
}
