//! Interrupt handling for the emit loop.
//!
//! Handlers are installed when [`ShutdownSignal::register`] returns, not when
//! the listener is first polled, so a signal that arrives while the port is
//! still opening is queued instead of killing the process.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::EmitterError;

#[cfg(unix)]
use tokio::signal::unix::{signal, Signal, SignalKind};

/// Registered Ctrl+C (and, on Unix, SIGTERM) listeners.
pub struct ShutdownSignal {
    #[cfg(unix)]
    interrupt: Signal,
    #[cfg(unix)]
    terminate: Signal,
    #[cfg(windows)]
    ctrl_c: tokio::signal::windows::CtrlC,
}

impl ShutdownSignal {
    /// Installs the handlers. Must be called inside a tokio runtime.
    #[cfg(unix)]
    pub fn register() -> Result<Self, EmitterError> {
        Ok(Self {
            interrupt: signal(SignalKind::interrupt()).map_err(EmitterError::Signal)?,
            terminate: signal(SignalKind::terminate()).map_err(EmitterError::Signal)?,
        })
    }

    /// Installs the handlers. Must be called inside a tokio runtime.
    #[cfg(windows)]
    pub fn register() -> Result<Self, EmitterError> {
        Ok(Self {
            ctrl_c: tokio::signal::windows::ctrl_c().map_err(EmitterError::Signal)?,
        })
    }

    /// Waits for the next signal and returns its name.
    #[cfg(unix)]
    pub async fn recv(&mut self) -> &'static str {
        tokio::select! {
            _ = self.interrupt.recv() => "SIGINT",
            _ = self.terminate.recv() => "SIGTERM",
        }
    }

    /// Waits for the next signal and returns its name.
    #[cfg(windows)]
    pub async fn recv(&mut self) -> &'static str {
        self.ctrl_c.recv().await;
        "Ctrl+C"
    }
}

/// Spawns a task that cancels `cancel` on the first shutdown signal.
pub fn cancel_on_shutdown(mut signal: ShutdownSignal, cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        let name = signal.recv().await;
        info!(signal = name, "Received shutdown signal, shutting down...");
        cancel.cancel();
    })
}
