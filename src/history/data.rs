//! Net-worth samples supplied by the persistence layer

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// A recorded net-worth figure at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetWorthSample {
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

impl NetWorthSample {
    pub fn new(amount: f64, timestamp: DateTime<Utc>) -> Self {
        Self { amount, timestamp }
    }

    pub fn year(&self) -> i32 {
        self.timestamp.year()
    }
}

/// Read-only view over a person's net-worth history.
///
/// Samples may arrive in any order; the reader collaborator usually hands
/// them over newest-first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetWorthHistory {
    samples: Vec<NetWorthSample>,
}

impl NetWorthHistory {
    pub fn new(samples: Vec<NetWorthSample>) -> Self {
        Self { samples }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn samples(&self) -> &[NetWorthSample] {
        &self.samples
    }

    /// Most recent sample by timestamp; the projection anchor.
    /// Ties keep the first sample encountered.
    pub fn latest(&self) -> Option<&NetWorthSample> {
        self.samples.iter().fold(None, |best: Option<&NetWorthSample>, s| match best {
            Some(b) if b.timestamp >= s.timestamp => Some(b),
            _ => Some(s),
        })
    }
}

impl From<Vec<NetWorthSample>> for NetWorthHistory {
    fn from(samples: Vec<NetWorthSample>) -> Self {
        Self::new(samples)
    }
}
