//! Static UI configuration (endpoints, timings, page layout constants).
//!
//! # Design
//! - One `UiConfig` value is built at boot and handed to the components that need it.
//! - Only the API base may be overridden at runtime, via `data-api-base` on the mount node.

/// Default API prefix served by the download backend.
pub const DEFAULT_API_BASE: &str = "/api/main";
/// Section anchors scanned by the scroll controller, top to bottom.
pub const SECTION_IDS: [&str; 3] = ["section_1", "section_2", "section_3"];

/// Runtime configuration for the page and the download flow.
#[derive(Clone, Debug, PartialEq)]
pub struct UiConfig {
    /// API prefix without a trailing slash.
    pub api_base: String,
    /// Path (relative to `api_base`) of the download endpoint.
    pub download_path: &'static str,
    /// Path (relative to `api_base`) of the progress event stream.
    pub progress_path: &'static str,
    /// Path (relative to `api_base`) of the video details lookup.
    pub metadata_path: &'static str,
    /// Delay before the progress channel is torn down after a download settles.
    pub cleanup_delay_ms: u32,
    /// Duration of the eased anchor scroll.
    pub scroll_duration_ms: u32,
    /// Height of the sticky header subtracted from section offsets.
    pub header_offset_px: f64,
    /// Minimum spacing between two scroll handler runs.
    pub scroll_throttle_ms: u32,
    /// Interval between hero headline words.
    pub hero_rotate_ms: u32,
    /// Fraction of a timeline entry that must be visible to reveal it.
    pub reveal_threshold: f64,
    /// Ordered section anchors.
    pub section_ids: &'static [&'static str],
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            download_path: "/",
            progress_path: "/download-progress",
            metadata_path: "/metadata",
            cleanup_delay_ms: 600,
            scroll_duration_ms: 300,
            header_offset_px: 75.0,
            scroll_throttle_ms: 50,
            hero_rotate_ms: 2500,
            reveal_threshold: 0.5,
            section_ids: &SECTION_IDS,
        }
    }
}

impl UiConfig {
    /// Build the configuration, applying the mount node's `data-api-base` override when present.
    #[must_use]
    pub fn from_root_dataset(api_base: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(base) = api_base {
            let trimmed = base.trim().trim_end_matches('/');
            if !trimmed.is_empty() {
                config.api_base = trimmed.to_string();
            }
        }
        config
    }

    /// Absolute path of the download endpoint.
    #[must_use]
    pub fn download_url(&self) -> String {
        format!("{}{}", self.api_base, self.download_path)
    }

    /// Absolute path of the progress event stream.
    #[must_use]
    pub fn progress_url(&self) -> String {
        format!("{}{}", self.api_base, self.progress_path)
    }

    /// Absolute path of the video details lookup.
    #[must_use]
    pub fn metadata_url(&self) -> String {
        format!("{}{}", self.api_base, self.metadata_path)
    }
}
