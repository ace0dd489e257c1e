use chrono::{DateTime, SecondsFormat, Utc};

/// Wall clock used to stamp records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Clock(DateTime<Utc>);

impl Clock {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T10:20:30.123Z`
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn now_iso8601() -> String {
        Self::now().to_iso8601()
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for Clock {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}
