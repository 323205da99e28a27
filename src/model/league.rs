use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};
use crate::model::phase::{Phase, PhaseBoundary};

/// Months added to a phase boundary that falls in the calendar year after the
/// season starts.
const NEXT_YEAR: f64 = 12.0;

/// The leagues shown on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum League {
    Nba,
    Nhl,
    Nfl,
    Mlb,
}

/// Marketing copy for a league's card on the static site.
#[derive(Debug, Clone, Copy)]
pub struct LeagueCard {
    pub icon: &'static str,
    pub blurb: &'static str,
    pub projects: [&'static str; 4],
}

impl League {
    /// Top-to-bottom display order.
    pub const ALL: [League; 4] = [League::Nba, League::Nhl, League::Nfl, League::Mlb];

    pub fn abbreviation(self) -> &'static str {
        match self {
            League::Nba => "NBA",
            League::Nhl => "NHL",
            League::Nfl => "NFL",
            League::Mlb => "MLB",
        }
    }

    /// Default display color as `#RRGGBB`.
    pub fn color(self) -> &'static str {
        match self {
            League::Nba => "#C98613",
            League::Nhl => "#A2AAAD",
            League::Nfl => "#82CD32",
            League::Mlb => "#217EE1",
        }
    }

    /// Hardcoded phase table, used whenever no live schedule is available.
    pub fn default_phases(self) -> Vec<Phase> {
        let table: Vec<(&str, f64, f64)> = match self {
            League::Nba => vec![
                ("Pre Season", 10.0, 10.5),
                ("Regular Season", 10.5, 4.25 + NEXT_YEAR),
                ("The Finals", 4.5 + NEXT_YEAR, 6.5 + NEXT_YEAR),
            ],
            League::Nhl => vec![
                ("Pre Season", 9.75, 10.2),
                ("Regular Season", 10.2, 4.5 + NEXT_YEAR),
                ("Stanley Cup", 4.5 + NEXT_YEAR, 6.5 + NEXT_YEAR),
            ],
            League::Nfl => vec![
                ("Pre Season", 8.0, 9.0),
                ("Regular Season", 9.0, 1.2 + NEXT_YEAR),
                ("Super Bowl", 1.5 + NEXT_YEAR, 2.5 + NEXT_YEAR),
            ],
            League::Mlb => vec![
                ("Spring Training", 2.75, 4.0),
                ("Regular Season", 4.0, 10.25),
                ("World Series", 10.0, 11.25),
            ],
        };
        table
            .into_iter()
            .map(|(name, start, end)| Phase {
                name: name.to_string(),
                start: PhaseBoundary::MonthFraction(start),
                end: PhaseBoundary::MonthFraction(end),
            })
            .collect()
    }

    pub fn card(self) -> LeagueCard {
        match self {
            League::Mlb => LeagueCard {
                icon: "⚾",
                blurb: "Exploring baseball analytics, player statistics, and game predictions for Major League Baseball.",
                projects: [
                    "📈 Player Performance Analytics",
                    "🎯 Win Probability Calculator",
                    "📊 Team Statistics Dashboard",
                    "🔮 Season Predictions Model",
                ],
            },
            League::Nba => LeagueCard {
                icon: "🏀",
                blurb: "Basketball analytics covering player efficiency, shot analysis, and championship predictions.",
                projects: [
                    "🎯 Shot Chart Visualization",
                    "📊 Player Efficiency Rating",
                    "🏆 Playoff Bracket Predictor",
                    "📈 Real-time Game Analytics",
                ],
            },
            League::Nfl => LeagueCard {
                icon: "🏈",
                blurb: "Football analytics including game simulations, fantasy predictions, and team performance metrics.",
                projects: [
                    "🎮 Game Outcome Simulator",
                    "👤 Fantasy Football Optimizer",
                    "📊 Offensive vs Defensive Stats",
                    "🏆 Super Bowl Predictions",
                ],
            },
            League::Nhl => LeagueCard {
                icon: "🏒",
                blurb: "Hockey analytics with goalie performance tracking, team comparisons, and playoff forecasting.",
                projects: [
                    "🥅 Goalie Performance Tracker",
                    "📊 Team Power Rankings",
                    "🔥 Hot Streak Analyzer",
                    "🏆 Stanley Cup Predictor",
                ],
            },
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for League {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self> {
        League::ALL
            .into_iter()
            .find(|l| l.abbreviation().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TimelineError::UnknownLeague(s.to_string()))
    }
}

/// Where a league's phases came from on this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleOrigin {
    Live,
    Fallback,
}

/// A league's ordered phases together with its display color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSchedule {
    pub league: League,
    /// `#RRGGBB`.
    pub color: String,
    pub phases: Vec<Phase>,
    pub origin: ScheduleOrigin,
}

impl LeagueSchedule {
    pub fn fallback(league: League) -> Self {
        Self {
            league,
            color: league.color().to_string(),
            phases: league.default_phases(),
            origin: ScheduleOrigin::Fallback,
        }
    }

    pub fn live(league: League, phases: Vec<Phase>) -> Self {
        Self {
            league,
            color: league.color().to_string(),
            phases,
            origin: ScheduleOrigin::Live,
        }
    }
}

/// Parse `#RRGGBB` into its components.
pub fn parse_hex_color(hex: &str) -> Result<(u8, u8, u8)> {
    let invalid = || TimelineError::InvalidColor(hex.to_string());
    let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
    Ok((channel(0)?, channel(2)?, channel(4)?))
}
