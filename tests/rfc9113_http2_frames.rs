//! RFC 9113 HTTP/2 Frame Serialization Tests
//!
//! https://www.rfc-editor.org/rfc/rfc9113
//!
//! The writer's output sink is a plain `Vec<u8>`, so each test asserts the
//! exact wire bytes.

use bytes::BytesMut;
use h2press::frame::{flags, FRAME_HEADER_SIZE};
use h2press::{
    DynamicTableEncoder, Error, ErrorCode, FrameHeader, FrameType, FrameWriter, ResponseHeaderMap,
    SettingsId,
};
use http::StatusCode;

#[test]
fn test_frame_header_serialization() {
    let header = FrameHeader {
        length: 100,
        frame_type: FrameType::Data,
        flags: 0x1, // END_STREAM
        stream_id: 5,
    };

    let mut buf = BytesMut::new();
    header.serialize(&mut buf);
    let bytes = buf.freeze();

    assert_eq!(bytes.len(), 9);
    // Length: 24 bits = 100 (0x64) -> 00 00 64
    assert_eq!(&bytes[..3], &[0x00, 0x00, 0x64]);
    // Type: 0 (Data)
    assert_eq!(bytes[3], 0);
    // Flags: 1
    assert_eq!(bytes[4], 1);
    // Stream ID: 31 bits = 5 -> 00 00 00 05 (reserved bit 0)
    assert_eq!(&bytes[5..9], &[0x00, 0x00, 0x00, 0x05]);
}

#[tokio::test]
async fn test_window_update_rfc9113_section_6_9() {
    let mut writer = FrameWriter::new(Vec::new());
    writer.write_window_update(1, 1).await.unwrap();
    let out = writer.into_inner();

    assert_eq!(
        out,
        vec![
            0x00, 0x00, 0x04, // length 4
            0x08, // type WINDOW_UPDATE
            0x00, // flags
            0x00, 0x00, 0x00, 0x01, // stream 1
            0x00, 0x00, 0x00, 0x01, // increment 1
        ]
    );
}

#[tokio::test]
async fn test_window_update_clears_reserved_bit() {
    let mut writer = FrameWriter::new(Vec::new());
    writer
        .write_window_update(0, 0x8000_0001) // reserved bit set on input
        .await
        .unwrap();
    let out = writer.into_inner();
    assert_eq!(&out[9..], &[0x00, 0x00, 0x00, 0x01]);
}

#[tokio::test]
async fn test_goaway_rfc9113_section_6_8() {
    let mut writer = FrameWriter::new(Vec::new());
    writer
        .write_go_away(5, ErrorCode::EnhanceYourCalm, b"slow down")
        .await
        .unwrap();
    let out = writer.into_inner();

    assert_eq!(&out[..3], &[0x00, 0x00, 0x11]); // 8 + 9 debug bytes
    assert_eq!(out[3], 0x07); // type GOAWAY
    assert_eq!(&out[5..9], &[0x00; 4]); // stream 0
    assert_eq!(&out[9..13], &[0x00, 0x00, 0x00, 0x05]); // last stream id
    assert_eq!(&out[13..17], &[0x00, 0x00, 0x00, 0x0B]); // ENHANCE_YOUR_CALM
    assert_eq!(&out[17..], b"slow down");
}

#[tokio::test]
async fn test_ping_rfc9113_section_6_7() {
    let mut writer = FrameWriter::new(Vec::new());
    let payload = [1, 2, 3, 4, 5, 6, 7, 8];
    writer.write_ping(false, payload).await.unwrap();
    writer.write_ping(true, payload).await.unwrap();
    let out = writer.into_inner();

    assert_eq!(&out[..3], &[0x00, 0x00, 0x08]);
    assert_eq!(out[3], 0x06); // type PING
    assert_eq!(out[4], 0x00);
    assert_eq!(&out[9..17], &payload);
    // Second frame is the ACK.
    assert_eq!(out[17 + 4], flags::ACK);
    assert_eq!(&out[17 + 9..], &payload);
}

#[tokio::test]
async fn test_rst_stream_rfc9113_section_6_4() {
    let mut writer = FrameWriter::new(Vec::new());
    writer
        .write_rst_stream(7, ErrorCode::Cancel)
        .await
        .unwrap();
    let out = writer.into_inner();

    assert_eq!(&out[..3], &[0x00, 0x00, 0x04]);
    assert_eq!(out[3], 0x03); // type RST_STREAM
    assert_eq!(&out[5..9], &[0x00, 0x00, 0x00, 0x07]);
    assert_eq!(&out[9..], &[0x00, 0x00, 0x00, 0x08]); // CANCEL
}

#[tokio::test]
async fn test_settings_and_ack_rfc9113_section_6_5() {
    let mut writer = FrameWriter::new(Vec::new());
    writer
        .write_settings(&[(SettingsId::HeaderTableSize, 4096)])
        .await
        .unwrap();
    writer.write_settings_ack().await.unwrap();
    let out = writer.into_inner();

    assert_eq!(out[3], 0x04); // type SETTINGS
    assert_eq!(&out[9..11], &[0x00, 0x01]);
    assert_eq!(&out[11..15], &4096u32.to_be_bytes());

    let ack = &out[FRAME_HEADER_SIZE + 6..];
    assert_eq!(ack.len(), FRAME_HEADER_SIZE); // empty payload
    assert_eq!(&ack[..3], &[0x00; 3]);
    assert_eq!(ack[4], flags::ACK);
}

#[tokio::test]
async fn test_headers_frame_flags() {
    let mut writer = FrameWriter::new(Vec::new());
    let mut encoder = DynamicTableEncoder::new();
    let headers = ResponseHeaderMap::new();

    writer
        .write_response_headers(1, StatusCode::NO_CONTENT, &headers, &mut encoder, true)
        .await
        .unwrap();
    let out = writer.into_inner();

    assert_eq!(&out[..3], &[0x00, 0x00, 0x01]); // :status 204 is one octet
    assert_eq!(out[3], 0x01); // type HEADERS
    assert_eq!(out[4], flags::END_HEADERS | flags::END_STREAM);
    assert_eq!(&out[5..9], &[0x00, 0x00, 0x00, 0x01]);
    assert_eq!(out[9], 0x80 | 9); // static entry 9
}

#[tokio::test]
async fn test_trailers_end_stream() {
    let mut writer = FrameWriter::new(Vec::new());
    let mut encoder = DynamicTableEncoder::new();
    let mut trailers = ResponseHeaderMap::new();
    trailers.append("grpc-status", "0");

    writer
        .write_response_trailers(3, &trailers, &mut encoder)
        .await
        .unwrap();
    let out = writer.into_inner();

    assert_eq!(out[3], 0x01); // type HEADERS
    assert_eq!(out[4], flags::END_HEADERS | flags::END_STREAM);
    // No pseudo-header: the block opens with the literal grpc-status field.
    assert_eq!(out[9], 0x40);
    assert_eq!(out[10], 11);
    assert_eq!(&out[11..22], b"grpc-status");
}

#[tokio::test]
async fn test_invalid_max_frame_size_rejected() {
    let mut writer = FrameWriter::new(Vec::new());
    match writer.update_max_frame_size(1 << 24) {
        Err(Error::InvalidMaxFrameSize(size)) => assert_eq!(size, 1 << 24),
        other => panic!("expected InvalidMaxFrameSize, got {other:?}"),
    }
}
