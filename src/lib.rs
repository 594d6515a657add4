//! # Water Sensor Simulator Library
//!
//! This library emulates a water sensor that streams fixed-format binary
//! frames over a serial line. It builds each 8-byte frame, writes it to the
//! output stream and keeps the wrapping packet counter, so a receiving
//! system can be developed without the real hardware attached.

pub mod config;
pub mod emitter;
pub mod error;
pub mod measurement;
pub mod packet;
pub mod serial;
pub mod shutdown;

pub use config::{Config, EmitterConfig, MeasurementConfig, SerialConfig};
pub use emitter::{simulate, Emitter, IntervalPacer, Pacer, RunSummary, DEFAULT_INTERVAL};
pub use error::{ConfigError, EmitterError, FrameError};
pub use measurement::{Constant, MeasurementSource, Ramp, DEFAULT_MEASUREMENT};
pub use packet::{build_packet, checksum, Packet, MARKER, PACKET_LEN};
