//! Persisted settings (lives in the OS config directory).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::io::write_text;
use crate::model::league::parse_hex_color;
use crate::model::{League, LeagueSchedule};
use crate::schedule::mlb::DEFAULT_BASE_URL;

const APP_NAME: &str = "sports-timeline";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where `build` writes the site and image.
    pub output_dir: PathBuf,
    /// Static image file name inside `output_dir`.
    pub image_file: String,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    /// Skip live sources entirely.
    pub offline: bool,
    /// League abbreviation → `#RRGGBB`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub league_colors: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("site"),
            image_file: "sports_leagues_timeline.svg".into(),
            api_base_url: DEFAULT_BASE_URL.into(),
            request_timeout_secs: 10,
            offline: false,
            league_colors: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// `settings.json` in the platform config directory, or the working
    /// directory when none can be determined.
    pub fn default_path() -> PathBuf {
        match directories::ProjectDirs::from("", "", APP_NAME) {
            Some(dirs) => dirs.config_dir().join(SETTINGS_FILE),
            None => PathBuf::from(SETTINGS_FILE),
        }
    }

    /// Load settings from `path`, writing the defaults there on first run.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let settings: Settings = serde_json::from_str(&contents)?;
                settings.validate()?;
                debug!(path = %path.display(), "loaded settings");
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let settings = Settings::default();
                settings.save(path)?;
                info!(path = %path.display(), "wrote default settings");
                Ok(settings)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_text(path, &serde_json::to_string_pretty(self)?)
    }

    /// Reject unknown leagues and malformed colors.
    pub fn validate(&self) -> Result<()> {
        self.color_overrides().map(|_| ())
    }

    pub fn color_overrides(&self) -> Result<Vec<(League, String)>> {
        self.league_colors
            .iter()
            .map(|(name, color)| {
                let league = League::from_str(name)?;
                parse_hex_color(color)?;
                Ok((league, color.clone()))
            })
            .collect()
    }

    /// Replace the built-in colors of the given schedules with any overrides.
    pub fn apply_colors(&self, schedules: &mut [LeagueSchedule]) -> Result<()> {
        for (league, color) in self.color_overrides()? {
            for schedule in schedules.iter_mut().filter(|s| s.league == league) {
                schedule.color = color.clone();
            }
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }

    pub fn image_path(&self) -> PathBuf {
        self.output_dir.join(&self.image_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimelineError;

    #[test]
    fn first_run_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);

        let settings = Settings::load_or_init(&path).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(path.is_file());

        let again = Settings::load_or_init(&path).unwrap();
        assert_eq!(again, settings);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r##"{ "offline": true, "league_colors": { "nba": "#112233" } }"##)
            .unwrap();

        let settings = Settings::load_or_init(&path).unwrap();
        assert!(settings.offline);
        assert_eq!(settings.request_timeout_secs, 10);
        assert_eq!(settings.image_path(), PathBuf::from("site/sports_leagues_timeline.svg"));

        let mut schedules: Vec<_> = League::ALL.into_iter().map(LeagueSchedule::fallback).collect();
        settings.apply_colors(&mut schedules).unwrap();
        assert_eq!(schedules[0].color, "#112233");
        assert_eq!(schedules[3].color, League::Mlb.color());
    }

    #[test]
    fn unknown_league_is_rejected() {
        let mut settings = Settings::default();
        settings.league_colors.insert("MLS".into(), "#000000".into());
        assert!(matches!(settings.validate(), Err(TimelineError::UnknownLeague(_))));
    }

    #[test]
    fn bad_color_is_rejected() {
        let mut settings = Settings::default();
        settings.league_colors.insert("NHL".into(), "grey".into());
        assert!(matches!(settings.validate(), Err(TimelineError::InvalidColor(_))));
    }
}
