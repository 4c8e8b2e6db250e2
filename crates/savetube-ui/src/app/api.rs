//! HTTP client for the download and metadata endpoints.
//!
//! # Design
//! - Issue a single request and read the whole body as bytes, success or not.
//! - Status interpretation belongs to the orchestrator; this layer only reports transport failures.

use crate::core::download::{DownloadRequest, RawResponse};
use crate::error::{DownloadError, DownloadResult};
use gloo_net::http::{Request, Response};

const ACCEPT: &str = "application/octet-stream,application/json;q=0.9,*/*;q=0.8";

/// POST the download request and collect status, disposition header and body.
pub(crate) async fn post_download(
    endpoint: &str,
    request: &DownloadRequest,
) -> DownloadResult<RawResponse> {
    let response = Request::post(endpoint)
        .header("Content-Type", "application/json")
        .header("X-Requested-With", "fetch")
        .header("Accept", ACCEPT)
        .json(request)
        .map_err(|err| DownloadError::transport("encode_request", err.to_string()))?
        .send()
        .await
        .map_err(|err| DownloadError::transport("send_request", err.to_string()))?;
    collect(response).await
}

/// GET the video details for `url`.
pub(crate) async fn get_metadata(endpoint: &str, url: &str) -> DownloadResult<RawResponse> {
    let target = format!("{endpoint}?url={}", urlencoding::encode(url));
    let response = Request::get(&target)
        .header("Accept", "application/json")
        .header("X-Requested-With", "fetch")
        .send()
        .await
        .map_err(|err| DownloadError::transport("send_metadata", err.to_string()))?;
    collect(response).await
}

async fn collect(response: Response) -> DownloadResult<RawResponse> {
    let status = response.status();
    let content_disposition = response.headers().get("Content-Disposition");
    let body = response
        .binary()
        .await
        .map_err(|err| DownloadError::transport("read_body", err.to_string()))?;
    Ok(RawResponse {
        status,
        content_disposition,
        body,
    })
}
