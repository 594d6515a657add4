use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::error::EmitterError;
use crate::measurement::MeasurementSource;
use crate::packet::Packet;

/// Default delay between two packets.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(50);

/// Waits between two emitted packets.
///
/// The emit loop only asks the pacer to wait; swapping the implementation
/// lets tests drive the loop without a real clock.
#[async_trait]
pub trait Pacer: Send {
    async fn wait(&mut self);
}

/// Fixed-period pacer backed by a tokio interval.
pub struct IntervalPacer {
    interval: Interval,
}

impl IntervalPacer {
    /// Creates a pacer whose first wait lasts one full `period`.
    ///
    /// Must be called inside a tokio runtime. Panics if `period` is zero.
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        // A stalled write pushes the schedule back instead of bursting to catch up.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }
}

#[async_trait]
impl Pacer for IntervalPacer {
    async fn wait(&mut self) {
        self.interval.tick().await;
    }
}

/// Totals reported when the emit loop stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub packets_sent: u64,
    pub next_counter: u8,
}

/// The simulated sensor: owns the packet counter and the measurement source.
pub struct Emitter<S> {
    counter: u8,
    source: S,
}

impl<S: MeasurementSource> Emitter<S> {
    /// Creates an emitter whose first packet carries counter 0.
    pub fn new(source: S) -> Self {
        Self { counter: 0, source }
    }

    /// Counter value the next packet will carry.
    pub fn counter(&self) -> u8 {
        self.counter
    }

    /// Builds one packet, writes it to `stream` and advances the counter.
    pub fn emit<W: Write + ?Sized>(&mut self, stream: &mut W) -> Result<Packet, EmitterError> {
        let packet = Packet::new(self.counter, self.source.next_measurement());
        let bytes = packet.to_bytes();

        stream.write_all(&bytes)?;
        stream.flush()?;

        debug!(
            counter = packet.counter,
            measurement = packet.measurement,
            bytes = ?bytes,
            "Sent packet"
        );

        self.counter = self.counter.wrapping_add(1);
        Ok(packet)
    }

    /// Emits a packet, then waits on `pacer`, until `cancel` fires.
    ///
    /// The first packet goes out immediately. Cancellation is observed only
    /// between packets, so a packet is never cut short. A write failure ends
    /// the loop with [`EmitterError::Write`].
    pub async fn run<W, P>(
        &mut self,
        stream: &mut W,
        pacer: &mut P,
        cancel: &CancellationToken,
    ) -> Result<RunSummary, EmitterError>
    where
        W: Write + ?Sized,
        P: Pacer + ?Sized,
    {
        let mut packets_sent = 0u64;
        info!(counter = self.counter, "Emitter started");

        while !cancel.is_cancelled() {
            if let Err(e) = self.emit(&mut *stream) {
                error!(error = %e, packets_sent, "Emitter stopped by write failure");
                return Err(e);
            }
            packets_sent += 1;

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = pacer.wait() => {}
            }
        }

        info!(packets_sent, next_counter = self.counter, "Emitter stopped");
        Ok(RunSummary {
            packets_sent,
            next_counter: self.counter,
        })
    }
}

/// Runs a fresh emitter over `stream` until `cancel` fires or a write fails.
///
/// Takes ownership of the stream and closes it before returning, on the
/// interrupted path and the failed path alike.
pub async fn simulate<W, S, P>(
    mut stream: W,
    source: S,
    pacer: &mut P,
    cancel: &CancellationToken,
) -> Result<RunSummary, EmitterError>
where
    W: Write,
    S: MeasurementSource,
    P: Pacer + ?Sized,
{
    let mut emitter = Emitter::new(source);
    let result = emitter.run(&mut stream, pacer, cancel).await;

    drop(stream);
    info!("Output stream closed");

    result
}
