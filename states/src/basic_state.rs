use chrono::{DateTime, Utc};

use crate::snapshot_state;

/// Wall-clock "now" as seen by the UI.
///
/// The app refreshes it once per frame; tests pin it to a fixed instant so
/// relative timestamps render deterministically.
#[derive(Debug, Clone, Default)]
pub struct Time {
    virt: DateTime<Utc>,
}

impl Time {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { virt: now }
    }
}

snapshot_state!(Time);

impl AsMut<DateTime<Utc>> for Time {
    fn as_mut(&mut self) -> &mut DateTime<Utc> {
        &mut self.virt
    }
}

impl AsRef<DateTime<Utc>> for Time {
    fn as_ref(&self) -> &DateTime<Utc> {
        &self.virt
    }
}
