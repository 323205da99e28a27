use chrono::NaiveDate;

/// Errors raised while building, normalizing or emitting a timeline.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("invalid calendar date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    #[error("phase '{phase}' mixes month-fraction and calendar-date boundaries")]
    MixedBoundaries { phase: String },

    #[error("phase '{phase}' ends before it starts")]
    ReversedPhase { phase: String },

    #[error("shifting {date} by {months} months leaves the supported date range")]
    DateOutOfRange { date: NaiveDate, months: i32 },

    #[error("unknown league '{0}' (expected one of NBA, NHL, NFL, MLB)")]
    UnknownLeague(String),

    #[error("invalid color '{0}' (expected #RRGGBB)")]
    InvalidColor(String),

    #[error("failed to render chart: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, TimelineError>;
