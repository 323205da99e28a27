use chrono::{Datelike, NaiveDate};

use crate::model::clock::Clock;
use crate::model::normalize::date_to_offset;
use crate::model::phase::month_abbr;

/// First and last month coordinates of the rolling three-year axis.
pub const AXIS_START: f64 = 1.0;
pub const AXIS_END: f64 = 37.0;
pub const MONTHS_ON_AXIS: u32 = 36;

/// Which of the three seasons drawn per league a bar belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeasonSlot {
    Previous,
    Current,
    Next,
}

impl SeasonSlot {
    pub const ALL: [SeasonSlot; 3] = [SeasonSlot::Previous, SeasonSlot::Current, SeasonSlot::Next];

    /// Season offset in months requested from the normalizer.
    pub fn offset(self) -> i32 {
        match self {
            SeasonSlot::Previous => 0,
            SeasonSlot::Current => 12,
            SeasonSlot::Next => 24,
        }
    }

    pub fn opacity(self) -> f64 {
        match self {
            SeasonSlot::Previous => 0.3,
            SeasonSlot::Current => 0.7,
            SeasonSlot::Next => 0.5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SeasonSlot::Previous => "Previous Season",
            SeasonSlot::Current => "Current Season",
            SeasonSlot::Next => "Next Season",
        }
    }
}

/// The three-year month axis anchored on one "today".
///
/// Month 1 is January of the year before `today`, month 13 January of the
/// current year and month 25 January of the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineAxis {
    today: NaiveDate,
}

impl TimelineAxis {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn from_clock(clock: &dyn Clock) -> Self {
        Self::new(clock.today())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn current_year(&self) -> i32 {
        self.today.year()
    }

    /// Calendar year at the left edge of the axis.
    pub fn reference_year(&self) -> i32 {
        self.current_year() - 1
    }

    /// Axis coordinate of today's date; always within the middle year.
    pub fn today_x(&self) -> f64 {
        date_to_offset(self.today, self.reference_year())
    }

    /// `"Today: October 19"`.
    pub fn today_label(&self) -> String {
        format!("Today: {}", self.today.format("%B %-d"))
    }

    /// Positions of the two New Year lines and the year each one starts.
    pub fn year_boundaries(&self) -> [(f64, i32); 2] {
        [
            (13.0, self.current_year()),
            (25.0, self.current_year() + 1),
        ]
    }

    /// One tick per month, labelled with the month abbreviation.
    pub fn month_ticks(&self) -> Vec<(f64, &'static str)> {
        (1..=MONTHS_ON_AXIS)
            .map(|m| (f64::from(m), month_abbr((m - 1) % 12 + 1)))
            .collect()
    }

    /// `"Years 2025, 2026, 2027"`.
    pub fn title(&self) -> String {
        let y = self.current_year();
        format!("Years {}, {}, {}", y - 1, y, y + 1)
    }
}

/// Manages the visible portion of the axis in the viewer.
#[derive(Debug, Clone)]
pub struct TimelineViewport {
    /// The leftmost visible month coordinate.
    pub start: f64,
    /// The rightmost visible month coordinate.
    pub end: f64,
    /// Pixels per month (controls zoom level).
    pub pixels_per_month: f32,
}

impl Default for TimelineViewport {
    fn default() -> Self {
        Self::new(AXIS_START, AXIS_END)
    }
}

impl TimelineViewport {
    pub const MIN_PIXELS_PER_MONTH: f32 = 20.0;
    pub const MAX_PIXELS_PER_MONTH: f32 = 400.0;

    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            pixels_per_month: 60.0,
        }
    }

    /// Convert a month coordinate to an x-pixel offset from the viewport start.
    pub fn month_to_x(&self, month: f64) -> f32 {
        ((month - self.start) as f32) * self.pixels_per_month
    }

    /// Convert an x-pixel offset back to a month coordinate.
    pub fn x_to_month(&self, x: f32) -> f64 {
        self.start + f64::from(x / self.pixels_per_month)
    }

    /// Total width in pixels for the visible range.
    pub fn total_width(&self) -> f32 {
        self.month_to_x(self.end)
    }

    pub fn zoom_in(&mut self) {
        self.pixels_per_month = (self.pixels_per_month * 1.2).min(Self::MAX_PIXELS_PER_MONTH);
    }

    pub fn zoom_out(&mut self) {
        self.pixels_per_month = (self.pixels_per_month / 1.2).max(Self::MIN_PIXELS_PER_MONTH);
    }

    /// Scroll by a number of months, staying inside the axis.
    pub fn scroll_months(&mut self, months: f64) {
        let span = self.span();
        let start = (self.start + months).clamp(AXIS_START, (AXIS_END - span).max(AXIS_START));
        self.start = start;
        self.end = start + span;
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Resize the visible window to `width` pixels at the current zoom.
    pub fn fit_width(&mut self, width: f32) {
        let span = f64::from(width / self.pixels_per_month).min(AXIS_END - AXIS_START);
        self.end = self.start + span;
        self.scroll_months(0.0);
    }

    /// Put `month` in the middle of the visible window.
    pub fn center_on(&mut self, month: f64) {
        let offset = month - (self.start + self.span() / 2.0);
        self.scroll_months(offset);
    }
}
