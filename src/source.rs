use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Result;
use serde::Deserialize;
use tokio::{sync::mpsc, task::JoinHandle};

/// Accuracy tiers of the host environment's fused position provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyTier {
    High,
    Balanced,
    LowPower,
    Passive,
}

/// What the logger asks of the source: fixes no more often than
/// `min_interval` apart, at the given tier.
#[derive(Debug, Clone, Copy)]
pub struct SubscriptionRequest {
    pub min_interval: Duration,
    pub accuracy: AccuracyTier,
}

/// A raw reading from the source, before receipt stamping.
#[derive(Debug, Clone, Copy)]
pub struct Fix {
    pub latitude: f64,
    pub longitude: f64,
}

/// External capability producing periodic fixes. The consent flow is the
/// implementor's responsibility; `subscribe` is only called once access has
/// been granted.
pub trait PositionSource {
    fn subscribe(&mut self, request: SubscriptionRequest) -> Result<mpsc::Receiver<Fix>>;

    /// Cancels the active subscription, if any. Must be safe to call at any
    /// time, any number of times.
    fn cancel(&mut self);
}

#[derive(Debug, Deserialize)]
struct TrackRecord {
    timestamp_ms: u64,
    lat: f64,
    lon: f64,
    accuracy: f64,
    speed: f64,
}

fn load(path: &Path) -> Result<Vec<Fix>> {
    let mut output = Vec::new();
    let mut reader = csv::Reader::from_path(path)?;
    for result in reader.deserialize() {
        let record: TrackRecord = result?;
        output.push(Fix {
            latitude: record.lat,
            longitude: record.lon,
        });
    }

    Ok(output)
}

/// Replays a recorded CSV track (`timestamp_ms,lat,lon,accuracy,speed`) at
/// the requested interval, standing in for a live positioning device.
pub struct CsvSource {
    path: PathBuf,
    task: Option<JoinHandle<()>>,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            task: None,
        }
    }
}

impl PositionSource for CsvSource {
    fn subscribe(&mut self, request: SubscriptionRequest) -> Result<mpsc::Receiver<Fix>> {
        let fixes = load(&self.path)?;
        let (tx, rx) = mpsc::channel(16);
        let interval = request.min_interval;
        self.task = Some(tokio::spawn(async move {
            for fix in fixes {
                if tx.send(fix).await.is_err() {
                    break;
                }
                tokio::time::sleep(interval).await;
            }
        }));
        Ok(rx)
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn track_file(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timestamp_ms,lat,lon,accuracy,speed").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file
    }

    #[tokio::test]
    async fn replays_fixes_in_file_order() {
        let file = track_file(&[
            "1700000000000,37.422,-122.084,5.0,0.0",
            "1700000004000,37.423,-122.085,5.0,1.2",
        ]);
        let mut source = CsvSource::new(file.path());
        let mut rx = source
            .subscribe(SubscriptionRequest {
                min_interval: Duration::from_millis(1),
                accuracy: AccuracyTier::High,
            })
            .unwrap();

        let first = rx.recv().await.unwrap();
        assert_eq!(first.latitude, 37.422);
        assert_eq!(first.longitude, -122.084);
        let second = rx.recv().await.unwrap();
        assert_eq!(second.latitude, 37.423);
        // Track exhausted, channel closes.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn cancel_stops_delivery() {
        let file = track_file(&[
            "1,0.0,0.0,1.0,0.0",
            "2,1.0,1.0,1.0,0.0",
            "3,2.0,2.0,1.0,0.0",
        ]);
        let mut source = CsvSource::new(file.path());
        let mut rx = source
            .subscribe(SubscriptionRequest {
                min_interval: Duration::from_secs(60),
                accuracy: AccuracyTier::LowPower,
            })
            .unwrap();
        rx.recv().await.unwrap();
        source.cancel();
        source.cancel();
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn missing_track_file_is_an_error() {
        let mut source = CsvSource::new("/nonexistent/track.csv");
        assert!(source
            .subscribe(SubscriptionRequest {
                min_interval: Duration::from_secs(4),
                accuracy: AccuracyTier::High,
            })
            .is_err());
    }
}
