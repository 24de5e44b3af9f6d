use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::{
    display::DisplaySink,
    error::StorageError,
    sample::PositionSample,
    sink::LogFile,
    source::{Fix, PositionSource, SubscriptionRequest},
};

/// Proof that the host environment granted access to location data.
/// `LocationLogger::start` cannot be called without one, which keeps the
/// "never subscribe unauthorized" rule out of runtime error handling.
#[derive(Debug, Clone, Copy)]
pub struct Authorization(());

impl Authorization {
    /// Minted by whichever collaborator ran the consent flow.
    pub fn granted() -> Self {
        Authorization(())
    }
}

/// Bridges position-source notifications to the log file and the display.
/// All log-file mutation happens on the single task driving `run` and
/// `clear_log`, so no further synchronization is needed.
pub struct LocationLogger<S, D> {
    source: S,
    sink: LogFile,
    display: D,
    subscription: Option<mpsc::Receiver<Fix>>,
    active: bool,
    latest: Option<PositionSample>,
}

impl<S: PositionSource, D: DisplaySink> LocationLogger<S, D> {
    pub fn new(source: S, sink: LogFile, display: D) -> Self {
        Self {
            source,
            sink,
            display,
            subscription: None,
            active: false,
            latest: None,
        }
    }

    /// Registers for updates. Non-blocking; fixes arrive on a channel that
    /// `run` consumes.
    pub fn start(&mut self, _auth: Authorization, request: SubscriptionRequest) -> Result<()> {
        let rx = self.source.subscribe(request)?;
        self.subscription = Some(rx);
        self.active = true;
        info!(
            interval_ms = request.min_interval.as_millis() as u64,
            accuracy = ?request.accuracy,
            "position updates started"
        );
        Ok(())
    }

    /// Cancels the subscription. Safe to call any number of times, including
    /// before `start`.
    pub fn stop(&mut self) {
        if self.active {
            self.source.cancel();
            self.subscription = None;
            self.active = false;
            info!("position updates stopped");
        }
    }

    /// Records one reading: the display sees it first, then it goes to the
    /// file. A failed write is reported and dropped; the next sample is
    /// attempted independently and the subscription keeps running.
    pub fn on_sample(&mut self, sample: PositionSample) {
        let entry = sample.entry();
        self.display.push(&entry);
        self.latest = Some(sample);
        if let Err(e) = self.sink.append(&entry) {
            error!(error = %e, "dropping log entry");
        }
    }

    /// Truncates the log and clears the display. On failure the file's prior
    /// content is intact and the display is left alone.
    pub fn clear_log(&mut self) -> Result<(), StorageError> {
        self.sink.clear()?;
        self.display.clear();
        self.latest = None;
        info!("location log cleared");
        Ok(())
    }

    /// The most recent reading, if any arrived since the last clear.
    pub fn latest(&self) -> Option<PositionSample> {
        self.latest
    }

    /// Drains the subscription, stamping each fix at receipt. Returns when
    /// the source ends the stream or if `start` was never called.
    pub async fn run(&mut self) {
        let Some(mut rx) = self.subscription.take() else {
            return;
        };
        while let Some(fix) = rx.recv().await {
            self.on_sample(PositionSample::received_now(fix.latitude, fix.longitude));
        }
    }
}
