use chrono::{DateTime, Local, NaiveDate};

/// Represents an entity responsible for providing dates across application. This can allow it to
/// be used for testing
pub trait Clock {
    fn time(&self) -> DateTime<Local>;

    /// Local calendar date. Trackers key their records by local dates.
    fn today(&self) -> NaiveDate {
        self.time().date_naive()
    }
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock frozen at a single moment.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn time(&self) -> DateTime<Local> {
        self.0
    }
}
