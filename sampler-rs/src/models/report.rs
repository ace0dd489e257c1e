/// Result of one transmission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Endpoint answered with a 2xx status
    Delivered(u16),
    /// Record had no location, nothing was sent
    SkippedNoLocation,
    /// Endpoint answered with a non 2xx status
    Rejected(u16),
    TimedOut,
    TransportError(String),
}

impl SendOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, SendOutcome::Delivered(_))
    }
}

/// Published once per tick, after the tick's send has resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub timestamp: String,
    pub outcome: SendOutcome,
}
