use chrono::Utc;

/// One position reading, stamped when it arrived rather than when it was
/// measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSample {
    /// Seconds since epoch at receipt time.
    pub timestamp: i64,
    pub latitude: f64,
    pub longitude: f64,
}

impl PositionSample {
    pub fn received_now(latitude: f64, longitude: f64) -> Self {
        Self {
            timestamp: Utc::now().timestamp(),
            latitude,
            longitude,
        }
    }

    /// Renders the legacy log entry, byte-for-byte: a leading newline, then
    /// `timestamp, latitude, longitude`, then a newline. Coordinates use the
    /// native float rendering so existing log files stay compatible.
    pub fn entry(&self) -> String {
        format!("\n{}, {}, {}\n", self.timestamp, self.latitude, self.longitude)
    }
}
