//! Serializes HTTP/2 frames onto an async byte sink.
//!
//! [`FrameWriter`] owns the connection's output stream and is the only place
//! frame headers are produced, so every frame it emits respects the peer's
//! SETTINGS_MAX_FRAME_SIZE by construction: header blocks are encoded one
//! frame's worth at a time and DATA payloads are chunked.

use bytes::BytesMut;
use http::StatusCode;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::block::{self, BlockResult};
use crate::enumerator::HeaderEnumerator;
use crate::error::{Error, Result};
use crate::frame::{
    flags, ErrorCode, FrameHeader, FrameType, SettingsId, DEFAULT_MAX_FRAME_SIZE,
    FRAME_HEADER_SIZE, MAX_FRAME_SIZE,
};
use crate::headers::ResponseHeaderMap;
use crate::hpack::DynamicTableEncoder;

/// Writes HTTP/2 frames for one connection.
pub struct FrameWriter<S> {
    stream: S,
    max_frame_size: usize,
}

impl<S: AsyncWrite + Unpin> FrameWriter<S> {
    /// Wrap an output stream, using the default 16KB max frame size until the
    /// peer's SETTINGS says otherwise.
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE as usize,
        }
    }

    /// Adopt the peer's SETTINGS_MAX_FRAME_SIZE. Takes effect for frames
    /// written after this call.
    pub fn update_max_frame_size(&mut self, size: u32) -> Result<()> {
        if !(DEFAULT_MAX_FRAME_SIZE..=MAX_FRAME_SIZE).contains(&size) {
            return Err(Error::InvalidMaxFrameSize(size));
        }
        debug!(max_frame_size = size, "updating max frame size");
        self.max_frame_size = size as usize;
        Ok(())
    }

    /// Flush buffered bytes to the underlying stream.
    pub async fn flush(&mut self) -> Result<()> {
        self.stream.flush().await?;
        Ok(())
    }

    /// Unwrap the underlying stream.
    pub fn into_inner(self) -> S {
        self.stream
    }

    /// Write a WINDOW_UPDATE frame (RFC 9113 Section 6.9).
    ///
    /// `stream_id` zero targets the connection window. The increment's
    /// reserved high bit is cleared; a zero increment is a caller bug and is
    /// rejected rather than sent.
    pub async fn write_window_update(&mut self, stream_id: u32, increment: u32) -> Result<()> {
        let increment = increment & 0x7fffffff;
        if increment == 0 {
            return Err(Error::InvalidWindowIncrement);
        }
        self.write_frame(
            FrameType::WindowUpdate,
            0,
            stream_id,
            &increment.to_be_bytes(),
        )
        .await
    }

    /// Write a GOAWAY frame (RFC 9113 Section 6.8) on stream 0.
    pub async fn write_go_away(
        &mut self,
        last_stream_id: u32,
        error_code: ErrorCode,
        debug_data: &[u8],
    ) -> Result<()> {
        debug!(last_stream_id, ?error_code, "writing GOAWAY");
        let mut payload = Vec::with_capacity(8 + debug_data.len());
        payload.extend_from_slice(&(last_stream_id & 0x7fffffff).to_be_bytes());
        payload.extend_from_slice(&(error_code as u32).to_be_bytes());
        payload.extend_from_slice(debug_data);
        self.write_frame(FrameType::GoAway, 0, 0, &payload).await
    }

    /// Write a PING frame (RFC 9113 Section 6.7) on stream 0.
    pub async fn write_ping(&mut self, ack: bool, payload: [u8; 8]) -> Result<()> {
        let flags = if ack { flags::ACK } else { 0 };
        self.write_frame(FrameType::Ping, flags, 0, &payload).await
    }

    /// Write an RST_STREAM frame (RFC 9113 Section 6.4).
    pub async fn write_rst_stream(&mut self, stream_id: u32, error_code: ErrorCode) -> Result<()> {
        debug!(stream_id, ?error_code, "writing RST_STREAM");
        self.write_frame(
            FrameType::RstStream,
            0,
            stream_id,
            &(error_code as u32).to_be_bytes(),
        )
        .await
    }

    /// Write a SETTINGS frame (RFC 9113 Section 6.5); wire order follows the
    /// slice order.
    pub async fn write_settings(&mut self, settings: &[(SettingsId, u32)]) -> Result<()> {
        let mut payload = Vec::with_capacity(settings.len() * 6);
        for (id, value) in settings {
            payload.extend_from_slice(&u16::from(*id).to_be_bytes());
            payload.extend_from_slice(&value.to_be_bytes());
        }
        self.write_frame(FrameType::Settings, 0, 0, &payload).await
    }

    /// Acknowledge a received SETTINGS frame.
    pub async fn write_settings_ack(&mut self) -> Result<()> {
        self.write_frame(FrameType::Settings, flags::ACK, 0, &[]).await
    }

    /// Write `data` as one or more DATA frames (RFC 9113 Section 6.1),
    /// chunked to the max frame size. END_STREAM goes on the final frame.
    pub async fn write_data(&mut self, stream_id: u32, data: &[u8], end_stream: bool) -> Result<()> {
        if data.is_empty() {
            let flags = if end_stream { flags::END_STREAM } else { 0 };
            return self.write_frame(FrameType::Data, flags, stream_id, &[]).await;
        }
        let mut chunks = data.chunks(self.max_frame_size).peekable();
        while let Some(chunk) = chunks.next() {
            let last = chunks.peek().is_none();
            let flags = if last && end_stream { flags::END_STREAM } else { 0 };
            self.write_frame(FrameType::Data, flags, stream_id, chunk)
                .await?;
        }
        Ok(())
    }

    /// Write a response header block as a HEADERS frame plus any needed
    /// CONTINUATION frames (RFC 9113 Sections 6.2, 6.10).
    ///
    /// Exactly one frame carries END_HEADERS (the final one); END_STREAM is
    /// set on the HEADERS frame when `end_stream` is true.
    pub async fn write_response_headers(
        &mut self,
        stream_id: u32,
        status: StatusCode,
        headers: &ResponseHeaderMap,
        encoder: &mut DynamicTableEncoder,
        end_stream: bool,
    ) -> Result<()> {
        let data_flags = if end_stream { flags::END_STREAM } else { 0 };
        self.write_header_block(stream_id, Some(status.as_u16()), headers, encoder, data_flags)
            .await
    }

    /// Write trailing headers (RFC 9110 Section 6.5) as the stream's final
    /// HEADERS frame. Trailers always end the stream and carry no
    /// pseudo-headers.
    pub async fn write_response_trailers(
        &mut self,
        stream_id: u32,
        trailers: &ResponseHeaderMap,
        encoder: &mut DynamicTableEncoder,
    ) -> Result<()> {
        self.write_header_block(stream_id, None, trailers, encoder, flags::END_STREAM)
            .await
    }

    async fn write_header_block(
        &mut self,
        stream_id: u32,
        status: Option<u16>,
        headers: &ResponseHeaderMap,
        encoder: &mut DynamicTableEncoder,
        first_frame_flags: u8,
    ) -> Result<()> {
        let mut fragment = vec![0u8; self.max_frame_size];
        let mut enumerator = HeaderEnumerator::new(headers);

        let (mut result, mut len) =
            block::begin_encode_headers(status, encoder, &mut enumerator, &mut fragment);
        let mut frame_type = FrameType::Headers;
        let mut frames = 0u32;

        loop {
            if result == BlockResult::BufferTooSmall {
                let size_hint = enumerator
                    .current()
                    .map(|field| field.name.len() + field.value.len())
                    .unwrap_or(0);
                return Err(Error::field_too_large(size_hint, self.max_frame_size));
            }

            let mut frame_flags = if frame_type == FrameType::Headers {
                first_frame_flags
            } else {
                0
            };
            if result == BlockResult::Done {
                frame_flags |= flags::END_HEADERS;
            }
            self.write_frame(frame_type, frame_flags, stream_id, &fragment[..len])
                .await?;
            frames += 1;

            if result == BlockResult::Done {
                break;
            }
            frame_type = FrameType::Continuation;
            (result, len) = block::continue_encode_headers(encoder, &mut enumerator, &mut fragment);
        }

        debug!(stream_id, frames, "wrote response header block");
        Ok(())
    }

    async fn write_frame(
        &mut self,
        frame_type: FrameType,
        frame_flags: u8,
        stream_id: u32,
        payload: &[u8],
    ) -> Result<()> {
        let mut header = BytesMut::with_capacity(FRAME_HEADER_SIZE);
        FrameHeader {
            length: payload.len() as u32,
            frame_type,
            flags: frame_flags,
            stream_id,
        }
        .serialize(&mut header);
        self.stream.write_all(&header).await?;
        if !payload.is_empty() {
            self.stream.write_all(payload).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_window_update_rejects_zero_increment() {
        let mut writer = FrameWriter::new(Vec::new());
        let err = writer.write_window_update(0, 0).await.unwrap_err();
        assert!(matches!(err, Error::InvalidWindowIncrement));
        // The reserved bit alone is not an increment.
        let err = writer.write_window_update(0, 0x80000000).await.unwrap_err();
        assert!(matches!(err, Error::InvalidWindowIncrement));
        assert!(writer.into_inner().is_empty());
    }

    #[tokio::test]
    async fn test_max_frame_size_bounds() {
        let mut writer = FrameWriter::new(Vec::new());
        assert!(matches!(
            writer.update_max_frame_size(16383),
            Err(Error::InvalidMaxFrameSize(16383))
        ));
        assert!(matches!(
            writer.update_max_frame_size(1 << 24),
            Err(Error::InvalidMaxFrameSize(_))
        ));
        writer.update_max_frame_size(16384).unwrap();
        writer.update_max_frame_size((1 << 24) - 1).unwrap();
    }

    #[tokio::test]
    async fn test_data_chunked_to_max_frame_size() {
        let mut writer = FrameWriter::new(Vec::new());
        let data = vec![0xAB; 16384 + 100];
        writer.write_data(1, &data, true).await.unwrap();
        let out = writer.into_inner();

        // First frame: full 16384-byte DATA without END_STREAM.
        assert_eq!(&out[..5], &[0x00, 0x40, 0x00, 0x00, 0x00]);
        // Second frame starts after header + payload.
        let second = &out[FRAME_HEADER_SIZE + 16384..];
        assert_eq!(&second[..5], &[0x00, 0x00, 0x64, 0x00, 0x01]);
        assert_eq!(second.len(), FRAME_HEADER_SIZE + 100);
    }

    #[tokio::test]
    async fn test_settings_payload_order() {
        let mut writer = FrameWriter::new(Vec::new());
        writer
            .write_settings(&[
                (SettingsId::MaxConcurrentStreams, 100),
                (SettingsId::InitialWindowSize, 65535),
            ])
            .await
            .unwrap();
        let out = writer.into_inner();
        assert_eq!(out[3], 0x04);
        assert_eq!(&out[9..11], &[0x00, 0x03]);
        assert_eq!(&out[11..15], &100u32.to_be_bytes());
        assert_eq!(&out[15..17], &[0x00, 0x04]);
    }
}
