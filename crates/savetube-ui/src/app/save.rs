//! Hand a downloaded payload to the browser as a file.

use crate::error::{DownloadError, DownloadResult};
use gloo::file::{Blob, ObjectUrl};
use gloo::utils::document;
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

/// Save `payload` under `filename` through a temporary object URL and anchor click.
///
/// The object URL is revoked when it goes out of scope.
pub(crate) fn save_bytes(payload: &[u8], filename: &str) -> DownloadResult<()> {
    let url = ObjectUrl::from(Blob::new(payload));
    let document = document();
    let anchor = document
        .create_element("a")
        .map_err(|err| DownloadError::save(format!("anchor create failed: {err:?}")))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| DownloadError::save("anchor cast failed"))?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    let body = document
        .body()
        .ok_or_else(|| DownloadError::save("document body unavailable"))?;
    body.append_child(&anchor)
        .map_err(|err| DownloadError::save(format!("anchor attach failed: {err:?}")))?;
    anchor.click();
    anchor.remove();
    Ok(())
}
