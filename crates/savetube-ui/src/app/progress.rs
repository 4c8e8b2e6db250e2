//! Progress stream runner and the shared channel owner.
//!
//! # Design
//! - Use fetch streaming with an `AbortController` so the stream can be cancelled.
//! - Frames carry the generation id they were opened with; the channel drops stale ones.
//! - A single attempt per open: when the stream ends or errors, it stays closed.

use crate::core::download::StatusTexts;
use crate::core::progress::{ChannelHandle, ProgressChannel};
use crate::core::sse::{SseFrame, SseParser};
use crate::core::store::AppStore;
use gloo::console;
use js_sys::{Reflect, Uint8Array};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AbortController, AbortSignal, Headers, ReadableStream, ReadableStreamDefaultReader, Request,
    RequestInit, RequestMode, Response, TextDecoder,
};
use yew::Callback;
use yewdux::prelude::Dispatch;

/// Active progress stream handle for cancellation.
pub(crate) struct StreamHandle {
    controller: AbortController,
}

impl ChannelHandle for StreamHandle {
    fn close(&self) {
        self.controller.abort();
    }
}

/// Spawn a progress stream reader and return a cancellable handle.
fn connect_progress(
    url: String,
    generation: u64,
    on_frame: Callback<(u64, SseFrame)>,
    on_end: Callback<u64>,
) -> Option<StreamHandle> {
    let controller = AbortController::new().ok()?;
    let signal = controller.signal();
    yew::platform::spawn_local(async move {
        if let Err(err) = run_stream(&url, generation, &signal, &on_frame).await {
            if !signal.aborted() {
                console::warn!("progress stream failed", err.to_string());
            }
        }
        if !signal.aborted() {
            on_end.emit(generation);
        }
    });
    Some(StreamHandle { controller })
}

async fn run_stream(
    url: &str,
    generation: u64,
    signal: &AbortSignal,
    on_frame: &Callback<(u64, SseFrame)>,
) -> Result<(), StreamError> {
    let response = fetch_stream(url, signal).await?;
    let mut reader = stream_reader(&response)?;
    let decoder = TextDecoder::new().map_err(|_| StreamError::Decoder)?;
    let mut parser = SseParser::default();
    loop {
        if signal.aborted() {
            return Ok(());
        }
        let Some(bytes) = read_chunk(&mut reader).await? else {
            break;
        };
        let text = decoder
            .decode_with_js_u8_array(&bytes)
            .map_err(|_| StreamError::Decode)?;
        for frame in parser.push(&text) {
            on_frame.emit((generation, frame));
        }
    }
    if let Some(frame) = parser.finish() {
        on_frame.emit((generation, frame));
    }
    Ok(())
}

async fn fetch_stream(url: &str, signal: &AbortSignal) -> Result<Response, StreamError> {
    let window = web_sys::window().ok_or(StreamError::Window)?;
    let init = RequestInit::new();
    init.set_method("GET");
    init.set_mode(RequestMode::SameOrigin);
    init.set_signal(Some(signal));
    let headers = Headers::new().map_err(|_| StreamError::Headers)?;
    if let Err(err) = headers.set("Accept", "text/event-stream") {
        console::error!("request header set failed", "Accept", err);
    }
    init.set_headers(&headers);

    let request = Request::new_with_str_and_init(url, &init).map_err(|_| StreamError::Request)?;
    let resp = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| StreamError::Fetch)?;
    let response: Response = resp.dyn_into().map_err(|_| StreamError::Fetch)?;
    if !response.ok() {
        return Err(StreamError::Status(response.status()));
    }
    Ok(response)
}

fn stream_reader(response: &Response) -> Result<ReadableStreamDefaultReader, StreamError> {
    let stream: ReadableStream = response.body().ok_or(StreamError::Body)?;
    stream
        .get_reader()
        .dyn_into::<ReadableStreamDefaultReader>()
        .map_err(|_| StreamError::Reader)
}

async fn read_chunk(
    reader: &mut ReadableStreamDefaultReader,
) -> Result<Option<Uint8Array>, StreamError> {
    let chunk = JsFuture::from(reader.read())
        .await
        .map_err(|_| StreamError::Read)?;
    let done = Reflect::get(&chunk, &JsValue::from_str("done"))
        .map_err(|_| StreamError::Read)?
        .as_bool()
        .unwrap_or(false);
    if done {
        return Ok(None);
    }
    let value = Reflect::get(&chunk, &JsValue::from_str("value")).map_err(|_| StreamError::Read)?;
    Ok(Some(Uint8Array::new(&value)))
}

#[derive(Debug, Error)]
enum StreamError {
    #[error("window unavailable")]
    Window,
    #[error("headers unavailable")]
    Headers,
    #[error("request build failed")]
    Request,
    #[error("fetch failed")]
    Fetch,
    #[error("http {0}")]
    Status(u16),
    #[error("progress response missing body")]
    Body,
    #[error("progress stream reader unavailable")]
    Reader,
    #[error("progress stream read failed")]
    Read,
    #[error("text decoder unavailable")]
    Decoder,
    #[error("progress chunk decode failed")]
    Decode,
}

/// Shared owner of the progress channel, mirroring its view into the store.
#[derive(Clone)]
pub(crate) struct ProgressHub {
    channel: Rc<RefCell<ProgressChannel<StreamHandle>>>,
    url: Rc<str>,
    dispatch: Dispatch<AppStore>,
}

impl ProgressHub {
    pub(crate) fn new(url: &str, dispatch: Dispatch<AppStore>) -> Self {
        Self {
            channel: Rc::new(RefCell::new(ProgressChannel::default())),
            url: Rc::from(url),
            dispatch,
        }
    }

    /// Close any open stream, show the indicator at 0% and start a new stream.
    ///
    /// Returns the generation id of the new stream.
    pub(crate) fn open(&self) -> u64 {
        let on_frame = {
            let hub = self.clone();
            Callback::from(move |(generation, frame): (u64, SseFrame)| {
                hub.on_frame(generation, &frame);
            })
        };
        let on_end = {
            let hub = self.clone();
            Callback::from(move |generation: u64| hub.on_end(generation))
        };
        let url = self.url.to_string();
        let (generation, view) = {
            let mut channel = self.channel.borrow_mut();
            let generation = channel
                .open_with(|generation| connect_progress(url, generation, on_frame, on_end));
            (generation, channel.view().clone())
        };
        self.dispatch
            .reduce_mut(|store| store.download.set_progress(view));
        generation
    }

    /// Close the stream opened as `generation` and hide the indicator.
    /// A newer stream is left untouched.
    pub(crate) fn reset(&self, generation: u64) {
        let view = {
            let mut channel = self.channel.borrow_mut();
            if !channel.reset_for(generation) {
                return;
            }
            channel.view().clone()
        };
        self.dispatch
            .reduce_mut(|store| store.download.set_progress(view));
    }

    /// Close the stream when the page goes away.
    pub(crate) fn close(&self) {
        self.channel.borrow_mut().close();
    }

    fn on_frame(&self, generation: u64, frame: &SseFrame) {
        let (outcome, view) = {
            let mut channel = self.channel.borrow_mut();
            let outcome = channel.handle_frame(generation, &frame.data);
            (outcome, channel.view().clone())
        };
        self.dispatch.reduce_mut(|store| {
            let texts = StatusTexts::from_bundle(store.language.bundle());
            store.download.apply_frame(&outcome, &view, &texts);
        });
    }

    fn on_end(&self, generation: u64) {
        debug!(generation, "progress stream ended");
        self.channel.borrow_mut().handle_disconnect(generation);
    }
}
