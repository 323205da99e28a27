//! Schedules in, figure out: the steps shared by the CLI and the viewer.

use tracing::info;

use crate::chart::{build_figure, TimelineFigure};
use crate::config::Settings;
use crate::error::Result;
use crate::model::{LeagueSchedule, TimelineAxis};
use crate::schedule::{get_league_data, ScheduleSource};

/// Loaded schedules and the figure built from them.
#[derive(Debug, Clone)]
pub struct Timeline {
    pub schedules: Vec<LeagueSchedule>,
    pub figure: TimelineFigure,
}

/// Fetch every league (falling back where needed), apply color overrides and
/// normalize all phases onto the axis.
pub fn load_timeline(
    source: &dyn ScheduleSource,
    settings: &Settings,
    axis: &TimelineAxis,
) -> Result<Timeline> {
    let mut schedules = get_league_data(source, axis.current_year())?;
    settings.apply_colors(&mut schedules)?;
    let figure = build_figure(&schedules, axis)?;
    info!(
        bars = figure.bars.len(),
        live = figure.live.len(),
        today_x = axis.today_x(),
        "built timeline"
    );
    Ok(Timeline { schedules, figure })
}
