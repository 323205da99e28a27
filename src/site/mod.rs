//! Static site bundle: `index.html`, `styles.css`, `script.js`, `timeline-data.js`.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::chart::{to_plotly_json, TimelineFigure};
use crate::error::Result;
use crate::io::write_text;
use crate::model::League;

const INDEX_TEMPLATE: &str = include_str!("templates/index.html");
const STYLES_TEMPLATE: &str = include_str!("templates/styles.css");
const SCRIPT: &str = include_str!("templates/script.js");
const DATA_TEMPLATE: &str = include_str!("templates/timeline-data.js");

pub const INDEX_FILE: &str = "index.html";
pub const STYLES_FILE: &str = "styles.css";
pub const SCRIPT_FILE: &str = "script.js";
pub const DATA_FILE: &str = "timeline-data.js";

/// Write the four site files into `dir` and return their paths.
pub fn emit_site(dir: &Path, figure: &TimelineFigure) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let files = [
        (INDEX_FILE, render_index(figure)),
        (STYLES_FILE, render_styles(figure)),
        (SCRIPT_FILE, SCRIPT.to_string()),
        (DATA_FILE, render_data(figure)?),
    ];

    let mut written = Vec::with_capacity(files.len());
    for (name, contents) in files {
        let path = dir.join(name);
        write_text(&path, &contents)?;
        info!(path = %path.display(), bytes = contents.len(), "wrote site file");
        written.push(path);
    }
    Ok(written)
}

/// Leagues in the order their cards and nav links appear.
fn card_order(figure: &TimelineFigure) -> Vec<League> {
    let mut leagues = figure.leagues.clone();
    leagues.sort_by_key(|l| l.abbreviation());
    leagues
}

pub fn render_index(figure: &TimelineFigure) -> String {
    let leagues = card_order(figure);
    let mut nav = String::new();
    let mut cards = String::new();
    for league in &leagues {
        nav.push_str(&format!(
            "            <a href=\"#{}\">{}</a>\n",
            css_class(*league),
            league.abbreviation()
        ));
        cards.push_str(&league_card(*league));
    }

    let phases: usize = figure
        .leagues
        .iter()
        .map(|&l| figure.bars_for(l).count())
        .sum::<usize>()
        / 3;

    INDEX_TEMPLATE
        .replace("{{nav_links}}", nav.trim_end())
        .replace("{{league_cards}}", cards.trim_end())
        .replace("{{league_count}}", &figure.leagues.len().to_string())
        .replace("{{phase_count}}", &phases.to_string())
        .replace("{{live_count}}", &figure.live.len().to_string())
        .replace("{{year}}", &figure.axis.current_year().to_string())
        .replace(
            "{{generated}}",
            &figure.axis.today().format("%B %-d, %Y").to_string(),
        )
}

fn league_card(league: League) -> String {
    let card = league.card();
    let class = css_class(league);
    let abbr = league.abbreviation();
    let projects: String = card
        .projects
        .iter()
        .map(|project| format!("                            <li>{project}</li>\n"))
        .collect();

    format!(
        "                    <div class=\"league-card {class}\" id=\"{class}\">
                        <h3>
                            <span class=\"league-icon\">{icon}</span>
                            {abbr} Projects
                        </h3>
                        <p>{blurb}</p>
                        <ul class=\"project-list\">
{projects}                        </ul>
                        <a href=\"#\" class=\"btn\">View {abbr} Projects →</a>
                    </div>
",
        icon = card.icon,
        blurb = card.blurb,
    )
}

pub fn render_styles(figure: &TimelineFigure) -> String {
    let mut rules = String::new();
    for league in card_order(figure) {
        let class = css_class(league);
        let color = figure.color_of(league);
        rules.push_str(&format!(
            ".league-card.{class} {{\n    border-top-color: {color};\n}}\n\n\
             .{class} .league-icon {{\n    background: {color};\n}}\n\n"
        ));
    }
    STYLES_TEMPLATE.replace("{{league_rules}}", rules.trim_end())
}

pub fn render_data(figure: &TimelineFigure) -> Result<String> {
    let json = serde_json::to_string(&to_plotly_json(figure))?;
    Ok(DATA_TEMPLATE
        .replace("{{figure_json}}", &json)
        .replace("{{today_x}}", &format!("{:.4}", figure.axis.today_x())))
}

fn css_class(league: League) -> String {
    league.abbreviation().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::build_figure;
    use crate::model::{LeagueSchedule, TimelineAxis};
    use chrono::NaiveDate;

    fn figure() -> TimelineFigure {
        let schedules: Vec<_> = League::ALL.into_iter().map(LeagueSchedule::fallback).collect();
        let axis = TimelineAxis::new(NaiveDate::from_ymd_opt(2024, 10, 19).unwrap());
        build_figure(&schedules, &axis).unwrap()
    }

    #[test]
    fn index_lists_cards_alphabetically() {
        let html = render_index(&figure());
        let pos = |needle: &str| html.find(needle).unwrap();
        assert!(pos("id=\"mlb\"") < pos("id=\"nba\""));
        assert!(pos("id=\"nba\"") < pos("id=\"nfl\""));
        assert!(pos("id=\"nfl\"") < pos("id=\"nhl\""));
        assert!(html.contains("<h4>2024</h4>"));
        assert!(html.contains("<h4>0</h4>"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn league_card_lists_every_project() {
        let html = league_card(League::Mlb);
        let projects = League::Mlb.card().projects;
        assert_eq!(html.matches("<li>").count(), projects.len());
        assert!(html.contains(&format!(
            "<ul class=\"project-list\">\n                            <li>{}</li>",
            projects[0]
        )));
        assert!(html.contains("View MLB Projects →</a>\n                    </div>\n"));
    }

    #[test]
    fn styles_use_league_colors() {
        let css = render_styles(&figure());
        assert!(css.contains(".league-card.mlb {\n    border-top-color: #217EE1;"));
        assert!(css.contains(".nba .league-icon {\n    background: #C98613;"));
        assert!(css.contains("#217EE1;\n}\n\n.mlb .league-icon"));
        assert!(!css.contains("{{"));
    }

    #[test]
    fn data_script_embeds_figure_and_today() {
        let js = render_data(&figure()).unwrap();
        assert!(js.starts_with("const timelineData = {\"data\":["));
        // October 19: 10 + 18/30 + 12
        assert!(js.contains("const todayX = 22.6000;"));
    }

    #[test]
    fn emits_all_four_files() {
        let dir = tempfile::tempdir().unwrap();
        let written = emit_site(dir.path(), &figure()).unwrap();
        assert_eq!(written.len(), 4);
        for name in [INDEX_FILE, STYLES_FILE, SCRIPT_FILE, DATA_FILE] {
            assert!(dir.path().join(name).is_file(), "missing {name}");
        }
    }
}
