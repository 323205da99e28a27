use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::TimelineError;
use crate::model::{League, Phase};
use crate::schedule::{FetchError, ScheduleSource};

pub const DEFAULT_BASE_URL: &str = "https://statsapi.mlb.com";

/// Response of `/api/v1/seasons`.
#[derive(Debug, Deserialize)]
struct SeasonsResponse {
    #[serde(default)]
    seasons: Vec<MlbSeason>,
}

/// The season fields we draw; anything missing is skipped.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MlbSeason {
    pub spring_start_date: Option<String>,
    pub spring_end_date: Option<String>,
    pub regular_season_start_date: Option<String>,
    pub last_date1st_half: Option<String>,
    pub all_star_date: Option<String>,
    pub first_date2nd_half: Option<String>,
    pub regular_season_end_date: Option<String>,
    pub post_season_start_date: Option<String>,
    pub post_season_end_date: Option<String>,
}

impl MlbSeason {
    /// Phases in chronological order. The All-Star Game is a one-day phase.
    pub fn phases(&self) -> Result<Vec<Phase>, TimelineError> {
        let pairs = [
            ("Spring Training", &self.spring_start_date, &self.spring_end_date),
            (
                "Regular Season (1st Half)",
                &self.regular_season_start_date,
                &self.last_date1st_half,
            ),
            ("All-Star Game", &self.all_star_date, &self.all_star_date),
            (
                "Regular Season (2nd Half)",
                &self.first_date2nd_half,
                &self.regular_season_end_date,
            ),
            (
                "World Series",
                &self.post_season_start_date,
                &self.post_season_end_date,
            ),
        ];

        let mut phases = Vec::new();
        for (name, start, end) in pairs {
            if let (Some(start), Some(end)) = (start, end) {
                phases.push(Phase::from_iso_dates(name, start, end)?);
            }
        }
        Ok(phases)
    }
}

/// Client for the public MLB Stats API.
#[derive(Debug, Clone)]
pub struct MlbStatsApi {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl MlbStatsApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let base_url = base_url.into();
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("sports-timeline/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| FetchError::Network {
                url: base_url.clone(),
                source,
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn seasons_url(&self, year: i32) -> String {
        format!("{}/api/v1/seasons?sportId=1&season={}", self.base_url, year)
    }

    fn fetch_season(&self, year: i32) -> Result<MlbSeason, FetchError> {
        let url = self.seasons_url(year);
        debug!(%url, "requesting MLB season");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| FetchError::Network {
                url: url.clone(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }
        let body = response.text().map_err(|source| FetchError::Network {
            url: url.clone(),
            source,
        })?;

        parse_seasons(&body).map_err(|e| match e {
            ParseFailure::Json(source) => FetchError::Json { url, source },
            ParseFailure::Empty => FetchError::NoSeason {
                league: League::Mlb,
                year,
            },
        })
    }
}

impl ScheduleSource for MlbStatsApi {
    fn fetch_schedule(&self, league: League, year: i32) -> Result<Vec<Phase>, FetchError> {
        if league != League::Mlb {
            return Err(FetchError::Unsupported(league));
        }
        Ok(self.fetch_season(year)?.phases()?)
    }
}

#[derive(Debug)]
enum ParseFailure {
    Json(serde_json::Error),
    Empty,
}

fn parse_seasons(body: &str) -> Result<MlbSeason, ParseFailure> {
    let response: SeasonsResponse = serde_json::from_str(body).map_err(ParseFailure::Json)?;
    response.seasons.into_iter().next().ok_or(ParseFailure::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEASON_2024: &str = r#"{
        "copyright": "Copyright 2024 MLB Advanced Media, L.P.",
        "seasons": [{
            "seasonId": "2024",
            "springStartDate": "2024-02-22",
            "springEndDate": "2024-03-26",
            "regularSeasonStartDate": "2024-03-20",
            "lastDate1stHalf": "2024-07-14",
            "allStarDate": "2024-07-16",
            "firstDate2ndHalf": "2024-07-19",
            "regularSeasonEndDate": "2024-09-30",
            "postSeasonStartDate": "2024-10-01",
            "postSeasonEndDate": "2024-10-30"
        }]
    }"#;

    #[test]
    fn full_season_maps_to_five_phases() {
        let season = parse_seasons(SEASON_2024).unwrap();
        let phases = season.phases().unwrap();
        let names: Vec<_> = phases.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Spring Training",
                "Regular Season (1st Half)",
                "All-Star Game",
                "Regular Season (2nd Half)",
                "World Series",
            ]
        );
        assert_eq!(phases[2].start, phases[2].end);
    }

    #[test]
    fn missing_pairs_are_skipped() {
        let season = MlbSeason {
            post_season_start_date: Some("2024-10-01".into()),
            post_season_end_date: Some("2024-10-30".into()),
            spring_start_date: Some("2024-02-22".into()),
            ..Default::default()
        };
        let phases = season.phases().unwrap();
        assert_eq!(phases.len(), 1);
        assert_eq!(phases[0].name, "World Series");
    }

    #[test]
    fn empty_and_malformed_bodies_are_distinguished() {
        assert!(matches!(
            parse_seasons(r#"{"seasons": []}"#),
            Err(ParseFailure::Empty)
        ));
        assert!(matches!(
            parse_seasons("<html>busy</html>"),
            Err(ParseFailure::Json(_))
        ));
    }

    #[test]
    fn bad_date_in_response_is_a_data_error() {
        let season = MlbSeason {
            all_star_date: Some("2024-07-32".into()),
            ..Default::default()
        };
        assert!(matches!(
            season.phases(),
            Err(TimelineError::InvalidDate { .. })
        ));
    }

    #[test]
    fn other_leagues_are_unsupported() {
        let api = MlbStatsApi::new(DEFAULT_BASE_URL, Duration::from_secs(1)).unwrap();
        assert!(matches!(
            api.fetch_schedule(League::Nfl, 2024),
            Err(FetchError::Unsupported(League::Nfl))
        ));
    }

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let api = MlbStatsApi::new("http://localhost:9/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            api.seasons_url(2025),
            "http://localhost:9/api/v1/seasons?sportId=1&season=2025"
        );
    }
}
