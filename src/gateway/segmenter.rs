// ABOUTME: Pure segmentation of oversized payloads into SMPP concatenated message parts
// ABOUTME: Produces ordered segments carrying the 6-byte 8-bit-reference UDH concatenation header

use crate::gateway::error::SegmentationError;
use bytes::{BufMut, Bytes, BytesMut};

/// Maximum payload bytes per concatenated segment: 160 octets of GSM short
/// message minus the 6-byte concatenation header, expressed over the
/// byte-oriented model this gateway uses.
pub const MAX_SEGMENT_PAYLOAD: usize = 153;

/// Length of the 8-bit-reference concatenation UDH.
pub const CONCAT_HEADER_LEN: usize = 6;

/// Maximum number of parts a concatenated message can carry; the UDH total
/// and index fields are single bytes.
pub const MAX_SEGMENTS: usize = u8::MAX as usize;

/// Fixed 8-bit concatenation reference. The source system tags every long
/// message with reference 0x01; handsets reassemble by (reference, index).
const CONCAT_REFERENCE: u8 = 0x01;

/// One ordered part of a segmented message.
///
/// `body` is the payload slice without any header; [`encode`](Self::encode)
/// produces the wire form, prefixing the concatenation UDH when the message
/// has more than one part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSegment {
    /// 1-based position of this part
    pub index: u8,
    /// Total number of parts in the message
    pub total: u8,
    /// Payload slice carried by this part, header excluded
    pub body: Bytes,
}

impl MessageSegment {
    /// Wire payload for this part.
    ///
    /// Single-part messages are passed through unmodified; multi-part
    /// messages are prefixed with `[0x05, 0x00, 0x03, reference, total,
    /// index]`.
    pub fn encode(&self) -> Bytes {
        if self.total == 1 {
            return self.body.clone();
        }
        let mut wire = BytesMut::with_capacity(CONCAT_HEADER_LEN + self.body.len());
        wire.put_u8(0x05); // UDH length
        wire.put_u8(0x00); // IEI: concatenated short message, 8-bit reference
        wire.put_u8(0x03); // IE length
        wire.put_u8(CONCAT_REFERENCE);
        wire.put_u8(self.total);
        wire.put_u8(self.index);
        wire.put_slice(&self.body);
        wire.freeze()
    }
}

/// Splits `payload` into ordered message segments.
///
/// Payloads of at most [`MAX_SEGMENT_PAYLOAD`] bytes come back as a single
/// segment whose wire form is the unmodified input. Longer payloads are cut
/// into `ceil(len / 153)` slices in transmission order. The split is purely
/// byte-oriented; multi-byte characters sitting on a slice boundary are not
/// kept together.
pub fn split(payload: Bytes) -> Result<Vec<MessageSegment>, SegmentationError> {
    if payload.len() <= MAX_SEGMENT_PAYLOAD {
        return Ok(vec![MessageSegment {
            index: 1,
            total: 1,
            body: payload,
        }]);
    }

    let count = payload.len().div_ceil(MAX_SEGMENT_PAYLOAD);
    if count > MAX_SEGMENTS {
        return Err(SegmentationError::TooManySegments {
            segments: count,
            max: MAX_SEGMENTS,
        });
    }

    let mut segments = Vec::with_capacity(count);
    for i in 0..count {
        let start = i * MAX_SEGMENT_PAYLOAD;
        let end = usize::min(start + MAX_SEGMENT_PAYLOAD, payload.len());
        segments.push(MessageSegment {
            index: (i + 1) as u8,
            total: count as u8,
            body: payload.slice(start..end),
        });
    }
    Ok(segments)
}
