//! Wire format of a single sensor frame.
//!
//! ```text
//! offset  size  field        encoding
//! 0       1     counter      u8
//! 1       4     measurement  i32, little-endian
//! 5       2     marker       0xC0DE, big-endian
//! 7       1     checksum     XOR of bytes 0..7
//! ```

use crate::error::FrameError;

/// Length of every frame on the wire.
pub const PACKET_LEN: usize = 8;

/// Alignment marker carried in bytes 5-6.
pub const MARKER: u16 = 0xC0DE;

const CHECKSUM_OFFSET: usize = PACKET_LEN - 1;

/// One decoded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    pub counter: u8,
    pub measurement: i32,
}

impl Packet {
    pub fn new(counter: u8, measurement: i32) -> Self {
        Self {
            counter,
            measurement,
        }
    }

    /// Encodes the frame, appending the XOR checksum.
    pub fn to_bytes(&self) -> [u8; PACKET_LEN] {
        let mut bytes = [0u8; PACKET_LEN];

        bytes[0] = self.counter;
        bytes[1..5].copy_from_slice(&self.measurement.to_le_bytes());
        bytes[5..7].copy_from_slice(&MARKER.to_be_bytes());
        bytes[CHECKSUM_OFFSET] = checksum(&bytes[..CHECKSUM_OFFSET]);

        bytes
    }

    /// Decodes and validates the first [`PACKET_LEN`] bytes of `bytes`.
    ///
    /// Trailing bytes beyond one frame are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() < PACKET_LEN {
            return Err(FrameError::InsufficientData {
                needed: PACKET_LEN,
                available: bytes.len(),
            });
        }

        let marker = u16::from_be_bytes([bytes[5], bytes[6]]);
        if marker != MARKER {
            return Err(FrameError::MarkerMismatch(marker));
        }

        let expected = checksum(&bytes[..CHECKSUM_OFFSET]);
        let actual = bytes[CHECKSUM_OFFSET];
        if expected != actual {
            return Err(FrameError::ChecksumMismatch { expected, actual });
        }

        Ok(Self {
            counter: bytes[0],
            measurement: i32::from_le_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]),
        })
    }
}

/// Builds the raw frame for `counter` and `measurement`.
pub fn build_packet(counter: u8, measurement: i32) -> [u8; PACKET_LEN] {
    Packet::new(counter, measurement).to_bytes()
}

/// XOR of all bytes, in order.
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |acc, b| acc ^ b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_reference_packet() {
        let packet = build_packet(0, 12345);
        assert_eq!(packet, [0x00, 0x39, 0x30, 0x00, 0x00, 0xC0, 0xDE, 0x17]);
    }

    #[test]
    fn builds_packet_for_negative_measurement() {
        // 0xFF ^ 0xFF ^ 0xFF ^ 0xFF ^ 0xFF ^ 0xC0 ^ 0xDE
        let packet = build_packet(255, -1);
        assert_eq!(packet, [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xC0, 0xDE, 0xE1]);
    }

    #[test]
    fn measurement_is_little_endian() {
        let packet = build_packet(7, 0x1234_5678);
        assert_eq!(&packet[1..5], &[0x78, 0x56, 0x34, 0x12]);
        let packet = build_packet(7, i32::MIN);
        assert_eq!(&packet[1..5], &[0x00, 0x00, 0x00, 0x80]);
    }

    #[test]
    fn every_packet_has_marker_and_valid_checksum() {
        let measurements = [0, 1, -1, 12345, -12345, i32::MAX, i32::MIN, 0x00C0_DE00];
        for counter in 0..=u8::MAX {
            for &measurement in &measurements {
                let packet = build_packet(counter, measurement);
                assert_eq!(packet.len(), PACKET_LEN);
                assert_eq!(packet[0], counter);
                assert_eq!(&packet[5..7], &[0xC0, 0xDE]);
                assert_eq!(packet[7], checksum(&packet[..7]));
            }
        }
    }

    #[test]
    fn build_is_pure() {
        assert_eq!(build_packet(42, -98765), build_packet(42, -98765));
    }

    #[test]
    fn checksum_of_empty_slice_is_zero() {
        assert_eq!(checksum(&[]), 0);
        assert_eq!(checksum(&[0xAA, 0xAA]), 0);
    }

    #[test]
    fn decodes_valid_frame() {
        let bytes = build_packet(200, -4096);
        assert_eq!(Packet::from_bytes(&bytes), Ok(Packet::new(200, -4096)));
    }

    #[test]
    fn decode_rejects_short_frame() {
        let bytes = build_packet(1, 1);
        assert_eq!(
            Packet::from_bytes(&bytes[..5]),
            Err(FrameError::InsufficientData {
                needed: 8,
                available: 5
            })
        );
    }

    #[test]
    fn decode_rejects_bad_marker() {
        let mut bytes = build_packet(1, 1);
        bytes[6] = 0xAD;
        assert_eq!(
            Packet::from_bytes(&bytes),
            Err(FrameError::MarkerMismatch(0xC0AD))
        );
    }

    #[test]
    fn decode_rejects_corrupted_payload() {
        let mut bytes = build_packet(0, 12345);
        bytes[2] ^= 0x01;
        assert_eq!(
            Packet::from_bytes(&bytes),
            Err(FrameError::ChecksumMismatch {
                expected: 0x16,
                actual: 0x17
            })
        );
    }
}
