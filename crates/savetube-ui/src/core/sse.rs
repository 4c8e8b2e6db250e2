//! SSE parser helpers (transport-only).
//!
//! # Design
//! - Accept partial chunks and emit complete SSE frames when a blank line is received.
//! - Keep this module DOM-free so it can run in tests and non-wasm contexts.
//! - Payload decoding belongs to the consumer; frames carry raw `data` text.
//! - Only `data` fields are kept. The progress stream is never resumed, so `id` and
//!   `retry` have no use, and every frame is a progress update regardless of `event`.

/// Parsed SSE frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SseFrame {
    /// Concatenated data payload.
    pub data: String,
}

/// Incremental SSE parser for streamed chunks.
#[derive(Debug, Default)]
pub struct SseParser {
    line: String,
    pending_cr: bool,
    has_data: bool,
    builder: SseFrame,
}

impl SseParser {
    /// Feed a decoded text chunk and collect every frame it completes.
    pub fn push(&mut self, chunk: &str) -> Vec<SseFrame> {
        let mut frames = Vec::new();
        for ch in chunk.chars() {
            if self.pending_cr {
                self.pending_cr = false;
                if ch == '\n' {
                    continue;
                }
            }
            match ch {
                '\n' => self.finish_line(&mut frames),
                '\r' => {
                    self.pending_cr = true;
                    self.finish_line(&mut frames);
                }
                _ => self.line.push(ch),
            }
        }
        frames
    }

    /// Flush a trailing frame when the stream ends without a blank line.
    pub fn finish(&mut self) -> Option<SseFrame> {
        if !self.line.is_empty() {
            self.finish_line(&mut Vec::new());
        }
        self.take_frame()
    }

    fn finish_line(&mut self, frames: &mut Vec<SseFrame>) {
        let line = std::mem::take(&mut self.line);
        if line.is_empty() {
            if let Some(frame) = self.take_frame() {
                frames.push(frame);
            }
            return;
        }
        if line.starts_with(':') {
            return;
        }
        let (field, value) = line
            .split_once(':')
            .map_or((line.as_str(), ""), |(field, value)| {
                (field, value.strip_prefix(' ').unwrap_or(value))
            });
        self.apply_field(field, value);
    }

    fn apply_field(&mut self, field: &str, value: &str) {
        if field != "data" {
            return;
        }
        if self.has_data {
            self.builder.data.push('\n');
        }
        self.builder.data.push_str(value);
        self.has_data = true;
    }

    fn take_frame(&mut self) -> Option<SseFrame> {
        let frame = std::mem::take(&mut self.builder);
        std::mem::take(&mut self.has_data).then_some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_emits_frames_on_blank_lines() {
        let mut parser = SseParser::default();
        let input = "event: test\ndata: hello\n\nid: 42\nretry: 500\ndata: world\n\n";
        let frames = parser.push(input);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].data, "hello");
        assert_eq!(frames[1].data, "world");
    }

    #[test]
    fn frames_without_data_are_dropped() {
        let mut parser = SseParser::default();
        assert!(parser.push("event: ping\nid: 7\n\n").is_empty());
        let frames = parser.push("data:\n\n");
        assert_eq!(frames, vec![SseFrame::default()]);
    }

    #[test]
    fn parser_joins_multi_line_data() {
        let mut parser = SseParser::default();
        let frames = parser.push("data: line1\ndata: line2\n\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data, "line1\nline2");
    }

    #[test]
    fn parser_handles_split_chunks_and_crlf() {
        let mut parser = SseParser::default();
        assert!(parser.push("data: {\"progr").is_empty());
        let frames = parser.push("ess\": 45}\r\n\r\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data, "{\"progress\": 45}");
    }

    #[test]
    fn comments_are_skipped_and_finish_flushes() {
        let mut parser = SseParser::default();
        assert!(parser.push(": keep-alive\n\ndata: 100").is_empty());
        let frame = parser.finish();
        assert_eq!(frame.map(|f| f.data), Some("100".to_string()));
        assert!(parser.finish().is_none());
    }
}
