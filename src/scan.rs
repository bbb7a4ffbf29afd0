//! QR scan intake
//!
//! The camera integration decodes strings at arbitrary times and only
//! holds a [`ScanSource`] to push them through. The desk drains the
//! channel synchronously, one decode per tick, so no table-open race is
//! possible on the single event-handling thread.

use tokio::sync::mpsc;

/// Producer handle handed to the decode callback
#[derive(Debug, Clone)]
pub struct ScanSource {
    tx: mpsc::UnboundedSender<String>,
}

impl ScanSource {
    /// Deliver a raw decoded payload. Dropped silently if the desk is
    /// gone.
    pub fn push(&self, raw: impl Into<String>) {
        let _ = self.tx.send(raw.into());
    }
}

/// Consumer side, owned by the desk
#[derive(Debug)]
pub(crate) struct ScanIntake {
    rx: mpsc::UnboundedReceiver<String>,
}

impl ScanIntake {
    /// Next pending decode, if any. Never blocks.
    pub fn try_next(&mut self) -> Option<String> {
        self.rx.try_recv().ok()
    }
}

pub(crate) fn scan_channel() -> (ScanSource, ScanIntake) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ScanSource { tx }, ScanIntake { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_drain_in_delivery_order() {
        let (source, mut intake) = scan_channel();
        source.push("07");
        source.push("12");

        assert_eq!(intake.try_next().as_deref(), Some("07"));
        assert_eq!(intake.try_next().as_deref(), Some("12"));
        assert_eq!(intake.try_next(), None);
    }
}
