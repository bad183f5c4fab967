//! Documented ranges for numeric values interpolated into generated text.

/// Inclusive range a value is snapped into before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericRange {
    pub min: u64,
    pub max: u64,
}

impl NumericRange {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Values at or below `min` snap to `min`, values above `max` snap to `max`.
    pub fn clamp(&self, value: u64) -> u64 {
        if value <= self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

/// Private key size in bits.
pub const KEY_SIZE_BITS: NumericRange = NumericRange::new(256, 8192);

/// Certificate expiry in hours (up to 100 years).
pub const KEY_EXPIRY_HOURS: NumericRange = NumericRange::new(1, 876_000);

/// Operator backup snapshot interval in seconds.
pub const SNAPSHOT_INTERVAL_SECS: NumericRange = NumericRange::new(30, 86_400);

/// Operator backup retention count.
pub const MAX_SNAPSHOTS: NumericRange = NumericRange::new(1, 100);

/// Operator backup persistent volume size in megabytes.
pub const BACKUP_VOLUME_MB: NumericRange = NumericRange::new(128, 102_400);

/// Supported cluster member counts.
pub const CLUSTER_SIZE: NumericRange = NumericRange::new(1, 7);
