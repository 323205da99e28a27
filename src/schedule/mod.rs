//! Season schedules: live sources and the hardcoded fallback.

pub mod mlb;

use tracing::{debug, info, warn};

use crate::error::TimelineError;
use crate::model::{League, LeagueSchedule, Phase};

pub use mlb::MlbStatsApi;

/// Why a live schedule could not be used.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("unexpected response from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no {league} season {year} in the response")]
    NoSeason { league: League, year: i32 },

    #[error("no live schedule source for {0}")]
    Unsupported(League),

    /// The response was well formed but carried a bad date.
    #[error(transparent)]
    Data(#[from] TimelineError),
}

/// Something that can look up a league's phases for a season year.
pub trait ScheduleSource {
    fn fetch_schedule(&self, league: League, year: i32) -> Result<Vec<Phase>, FetchError>;
}

/// A source that never answers; every league uses its default table.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSource;

impl ScheduleSource for OfflineSource {
    fn fetch_schedule(&self, league: League, _year: i32) -> Result<Vec<Phase>, FetchError> {
        Err(FetchError::Unsupported(league))
    }
}

/// Schedules for every league, live where possible and hardcoded otherwise.
///
/// Network, HTTP and response-shape failures fall back to the default table.
/// Malformed dates inside an otherwise valid response are returned as errors.
pub fn get_league_data(
    source: &dyn ScheduleSource,
    current_year: i32,
) -> Result<Vec<LeagueSchedule>, TimelineError> {
    let mut schedules = Vec::with_capacity(League::ALL.len());
    for league in League::ALL {
        let schedule = match source.fetch_schedule(league, current_year) {
            Ok(phases) if !phases.is_empty() => {
                info!(%league, phases = phases.len(), "using live schedule");
                LeagueSchedule::live(league, phases)
            }
            Ok(_) => {
                warn!(%league, "live schedule was empty, using fallback data");
                LeagueSchedule::fallback(league)
            }
            Err(FetchError::Unsupported(_)) => {
                debug!(%league, "no live source, using fallback data");
                LeagueSchedule::fallback(league)
            }
            Err(FetchError::Data(e)) => return Err(e),
            Err(e) => {
                warn!(%league, error = %e, "live schedule unavailable, using fallback data");
                LeagueSchedule::fallback(league)
            }
        };
        schedules.push(schedule);
    }
    Ok(schedules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScheduleOrigin;

    struct FailingSource;

    impl ScheduleSource for FailingSource {
        fn fetch_schedule(&self, league: League, year: i32) -> Result<Vec<Phase>, FetchError> {
            Err(FetchError::NoSeason { league, year })
        }
    }

    struct LiveMlb;

    impl ScheduleSource for LiveMlb {
        fn fetch_schedule(&self, league: League, _year: i32) -> Result<Vec<Phase>, FetchError> {
            match league {
                League::Mlb => Ok(vec![Phase::from_iso_dates(
                    "World Series",
                    "2024-10-01",
                    "2024-10-30",
                )?]),
                other => Err(FetchError::Unsupported(other)),
            }
        }
    }

    #[test]
    fn failing_source_falls_back_for_every_league() {
        let schedules = get_league_data(&FailingSource, 2024).unwrap();
        assert_eq!(schedules.len(), 4);
        for s in &schedules {
            assert_eq!(s.origin, ScheduleOrigin::Fallback);
            assert_eq!(s.phases, s.league.default_phases());
        }
    }

    #[test]
    fn live_phases_replace_only_the_supported_league() {
        let schedules = get_league_data(&LiveMlb, 2024).unwrap();
        let mlb = schedules.iter().find(|s| s.league == League::Mlb).unwrap();
        assert_eq!(mlb.origin, ScheduleOrigin::Live);
        assert_eq!(mlb.phases[0].name, "World Series");
        assert!(schedules
            .iter()
            .filter(|s| s.league != League::Mlb)
            .all(|s| s.origin == ScheduleOrigin::Fallback));
    }

    #[test]
    fn offline_source_keeps_display_order() {
        let leagues: Vec<_> = get_league_data(&OfflineSource, 2024)
            .unwrap()
            .into_iter()
            .map(|s| s.league)
            .collect();
        assert_eq!(leagues, League::ALL.to_vec());
    }
}
