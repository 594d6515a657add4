//! Serial port collaborator: opening the configured device and listing ports
//! for the operator.

use serialport::{DataBits, FlowControl, Parity, SerialPort, SerialPortInfo, StopBits};
use tracing::info;

use crate::config::SerialConfig;
use crate::error::EmitterError;

/// Opens the configured device with 8N1 framing and no flow control.
pub fn open(config: &SerialConfig) -> Result<Box<dyn SerialPort>, EmitterError> {
    let port = serialport::new(&config.path, config.baud_rate)
        .timeout(config.timeout())
        .data_bits(DataBits::Eight)
        .stop_bits(StopBits::One)
        .parity(Parity::None)
        .flow_control(FlowControl::None)
        .open()
        .map_err(|source| EmitterError::Open {
            path: config.path.clone(),
            source,
        })?;

    info!(
        port = %config.path,
        baud_rate = config.baud_rate,
        "Opened serial port"
    );
    Ok(port)
}

/// Serial ports currently visible to the OS.
pub fn list_ports() -> Result<Vec<SerialPortInfo>, EmitterError> {
    serialport::available_ports().map_err(EmitterError::Enumerate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_reports_missing_device() {
        let config = SerialConfig {
            path: "/dev/this-port-does-not-exist".to_string(),
            ..SerialConfig::default()
        };

        match open(&config) {
            Err(EmitterError::Open { path, .. }) => {
                assert_eq!(path, "/dev/this-port-does-not-exist")
            }
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("opened a port that should not exist"),
        }
    }
}
