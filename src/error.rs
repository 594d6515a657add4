use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while validating a received frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Fewer bytes than a full frame.
    #[error("frame needs {needed} bytes, only {available} available")]
    InsufficientData { needed: usize, available: usize },
    /// Bytes 5-6 do not hold the 0xC0DE marker.
    #[error("invalid frame marker 0x{0:04X}")]
    MarkerMismatch(u16),
    /// The trailing byte does not match the XOR of the frame.
    #[error("checksum mismatch: expected 0x{expected:02X}, got 0x{actual:02X}")]
    ChecksumMismatch { expected: u8, actual: u8 },
}

/// Fatal emitter failures. None of these are recovered locally.
#[derive(Debug, Error)]
pub enum EmitterError {
    #[error("failed to open serial port '{path}'")]
    Open {
        path: String,
        #[source]
        source: serialport::Error,
    },
    #[error("failed to enumerate serial ports")]
    Enumerate(#[source] serialport::Error),
    #[error("failed to register shutdown signal handlers")]
    Signal(#[source] io::Error),
    #[error("failed to write packet to stream")]
    Write(#[from] io::Error),
}

/// Errors raised while loading or validating the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}
