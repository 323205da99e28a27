use crate::error::Result;
use crate::model::league::parse_hex_color;
use crate::model::{
    normalize, League, LeagueSchedule, NormalizedInterval, ScheduleOrigin, SeasonSlot, TimelineAxis,
};

pub const TITLE: &str = "Sports League Timeline";

/// One phase of one league drawn for one season slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub league: League,
    pub phase: String,
    pub slot: SeasonSlot,
    pub interval: NormalizedInterval,
    /// `#RRGGBB`.
    pub color: String,
    pub rgb: (u8, u8, u8),
    pub opacity: f64,
}

/// Everything a renderer needs, independent of the output format.
#[derive(Debug, Clone)]
pub struct TimelineFigure {
    pub title: String,
    pub axis: TimelineAxis,
    /// Leagues top to bottom.
    pub leagues: Vec<League>,
    /// Leagues whose phases came from a live source.
    pub live: Vec<League>,
    pub bars: Vec<Bar>,
}

impl TimelineFigure {
    /// Row index of a league, 0 being the top row.
    pub fn row_of(&self, league: League) -> Option<usize> {
        self.leagues.iter().position(|&l| l == league)
    }

    /// Bar color of a league, its built-in color if it has no bars.
    pub fn color_of(&self, league: League) -> &str {
        self.bars_for(league)
            .next()
            .map(|b| b.color.as_str())
            .unwrap_or(league.color())
    }

    /// Bar color of a league as RGB, `None` if it has no bars.
    pub fn rgb_of(&self, league: League) -> Option<(u8, u8, u8)> {
        self.bars_for(league).next().map(|b| b.rgb)
    }

    pub fn bars_for(&self, league: League) -> impl Iterator<Item = &Bar> {
        self.bars.iter().filter(move |b| b.league == league)
    }

    /// Bars containing month coordinate `x` in the given league's row.
    pub fn bars_at(&self, league: League, x: f64) -> impl Iterator<Item = &Bar> {
        self.bars_for(league).filter(move |b| b.interval.contains(x))
    }
}

/// Normalize every phase of every schedule into the three season slots.
pub fn build_figure(schedules: &[LeagueSchedule], axis: &TimelineAxis) -> Result<TimelineFigure> {
    let reference_year = axis.reference_year();
    let mut bars = Vec::with_capacity(schedules.len() * 3 * SeasonSlot::ALL.len());

    for schedule in schedules {
        let rgb = parse_hex_color(&schedule.color)?;
        for slot in SeasonSlot::ALL {
            for phase in &schedule.phases {
                let interval = normalize(phase, slot.offset(), reference_year)?;
                bars.push(Bar {
                    league: schedule.league,
                    phase: phase.name.clone(),
                    slot,
                    interval,
                    color: schedule.color.clone(),
                    rgb,
                    opacity: slot.opacity(),
                });
            }
        }
    }

    Ok(TimelineFigure {
        title: TITLE.to_string(),
        axis: *axis,
        leagues: schedules.iter().map(|s| s.league).collect(),
        live: schedules
            .iter()
            .filter(|s| s.origin == ScheduleOrigin::Live)
            .map(|s| s.league)
            .collect(),
        bars,
    })
}
