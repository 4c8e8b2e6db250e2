//! Browser implementation of the download environment.

use crate::app::api::{get_metadata, post_download};
use crate::app::progress::ProgressHub;
use crate::app::save::save_bytes;
use crate::core::download::{DownloadEnv, DownloadRequest, RawResponse, StatusMessage};
use crate::core::store::AppStore;
use crate::error::DownloadResult;
use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use yewdux::prelude::Dispatch;

/// Wires the orchestrator to fetch, the progress hub, file saving and the store.
#[derive(Clone)]
pub(crate) struct BrowserEnv {
    progress: ProgressHub,
    dispatch: Dispatch<AppStore>,
}

impl BrowserEnv {
    pub(crate) fn new(progress: ProgressHub, dispatch: Dispatch<AppStore>) -> Self {
        Self { progress, dispatch }
    }
}

#[async_trait(?Send)]
impl DownloadEnv for BrowserEnv {
    async fn send(&self, endpoint: &str, request: &DownloadRequest) -> DownloadResult<RawResponse> {
        post_download(endpoint, request).await
    }

    async fn fetch_metadata(&self, endpoint: &str, url: &str) -> DownloadResult<RawResponse> {
        get_metadata(endpoint, url).await
    }

    fn open_progress(&self) -> u64 {
        self.progress.open()
    }

    fn reset_progress(&self, generation: u64) {
        self.progress.reset(generation);
    }

    fn save_file(&self, payload: &[u8], filename: &str) -> DownloadResult<()> {
        save_bytes(payload, filename)
    }

    fn show_status(&self, message: StatusMessage) {
        self.dispatch
            .reduce_mut(|store| store.download.show_status(message));
    }

    fn defer(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        yew::platform::spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            task();
        });
    }
}
