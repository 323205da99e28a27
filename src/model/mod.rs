pub mod clock;
pub mod league;
pub mod normalize;
pub mod phase;
pub mod timeline;

pub use clock::{Clock, FixedClock, SystemClock};
pub use league::{League, LeagueSchedule, ScheduleOrigin};
pub use normalize::normalize;
pub use phase::{DateLabel, NormalizedInterval, Phase, PhaseBoundary};
pub use timeline::{SeasonSlot, TimelineAxis, TimelineViewport};
