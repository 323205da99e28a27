use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sports_timeline::app::TimelineApp;
use sports_timeline::chart::svg;
use sports_timeline::config::Settings;
use sports_timeline::model::{Clock, FixedClock, SystemClock, TimelineAxis};
use sports_timeline::pipeline::{load_timeline, Timeline};
use sports_timeline::schedule::{MlbStatsApi, OfflineSource, ScheduleSource};
use sports_timeline::{io, site};

#[derive(Parser, Debug)]
#[command(name = "sports-timeline", version, about = "League season timelines on a three-year axis")]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the static site and the timeline image
    Build {
        /// Output directory (overrides the settings file)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Do not write the SVG image
        #[arg(long)]
        no_image: bool,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Open the interactive viewer
    View {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Export every normalized phase as CSV
    Csv {
        /// Output file
        #[arg(long, default_value = "sports_timeline.csv")]
        out: PathBuf,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Use the built-in schedules only
    #[arg(long)]
    offline: bool,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("{s}: {e}"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let settings_path = cli.config.clone().unwrap_or_else(Settings::default_path);
    let settings = Settings::load_or_init(&settings_path)
        .with_context(|| format!("failed to load settings from {}", settings_path.display()))?;

    match cli.command {
        Command::Build { out, no_image, common } => {
            let out_dir = out.unwrap_or_else(|| settings.output_dir.clone());
            let timeline = prepare(&settings, &common)?;

            println!("Generating sports timeline...");
            let mut files = site::emit_site(&out_dir, &timeline.figure)
                .with_context(|| format!("failed to write site to {}", out_dir.display()))?;
            if !no_image {
                let image = out_dir.join(&settings.image_file);
                svg::render_svg(&timeline.figure, &image, svg::DEFAULT_SIZE)
                    .with_context(|| format!("failed to render {}", image.display()))?;
                files.push(image);
            }

            println!("\nFiles generated:");
            for file in &files {
                println!("  {}", file.display());
            }
            println!(
                "\nOpen {} in your browser to view the timeline.",
                out_dir.join(site::INDEX_FILE).display()
            );
        }
        Command::View { common } => {
            let source = source_for(&settings, common.offline)?;
            let axis = TimelineAxis::from_clock(clock_for(&common).as_ref());
            let options = eframe::NativeOptions {
                viewport: egui::ViewportBuilder::default()
                    .with_inner_size([1280.0, 520.0])
                    .with_min_inner_size([800.0, 400.0])
                    .with_title("Sports Timeline"),
                ..Default::default()
            };
            eframe::run_native(
                "Sports Timeline",
                options,
                Box::new(move |cc| {
                    Ok(Box::new(TimelineApp::new(cc, settings, settings_path, source, axis)))
                }),
            )
            .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))?;
        }
        Command::Csv { out, common } => {
            let timeline = prepare(&settings, &common)?;
            let rows = io::export_csv(&timeline.figure, &out)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Exported {} phases to {}", rows, out.display());
        }
    }

    Ok(())
}

fn clock_for(common: &CommonArgs) -> Box<dyn Clock> {
    match common.today {
        Some(date) => Box::new(FixedClock(date)),
        None => Box::new(SystemClock),
    }
}

fn source_for(settings: &Settings, offline: bool) -> Result<Box<dyn ScheduleSource>> {
    if offline || settings.offline {
        info!("offline: using built-in schedules");
        return Ok(Box::new(OfflineSource));
    }
    let api = MlbStatsApi::new(settings.api_base_url.clone(), settings.request_timeout())
        .context("failed to set up the MLB Stats API client")?;
    Ok(Box::new(api))
}

fn prepare(settings: &Settings, common: &CommonArgs) -> Result<Timeline> {
    let source = source_for(settings, common.offline)?;
    let axis = TimelineAxis::from_clock(clock_for(common).as_ref());
    info!(today = %axis.today(), reference_year = axis.reference_year(), "building timeline");
    load_timeline(source.as_ref(), settings, &axis).context("failed to build the timeline")
}
