use std::{path::PathBuf, thread, time::Duration};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use wayline::{
    date, LabelRequest, LatLng, MapSurface, MarkerPresenter, MarkerRequest, MarkerStyles,
    QueueScheduler, Sequencer,
};

#[derive(Parser, Debug)]
#[command(name = "wayline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the built timeline in date order.
    Timeline(DataArgs),
    /// Print the year markers for the scrubber axis.
    Markers(DataArgs),
    /// Play the timeline in the terminal, one marker per tick.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct DataArgs {
    /// Input location data JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input location data JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Delay between marker reveals in milliseconds.
    #[arg(long, default_value_t = 1000)]
    speed_ms: u64,

    /// Zoom level used when panning to an entry.
    #[arg(long, default_value_t = wayline::surface::REVEAL_ZOOM)]
    zoom: u8,
}

/// Map surface that narrates every call to stdout.
#[derive(Debug, Default)]
struct ConsoleSurface;

impl MapSurface for ConsoleSurface {
    fn set_view(&mut self, center: LatLng, zoom: u8) {
        println!("  pan -> ({:.4}, {:.4}) zoom {zoom}", center.lat, center.lng);
    }

    fn place_marker(&mut self, marker: MarkerRequest) {
        println!("  marker {} at ({:.4}, {:.4})", marker.icon_url, marker.position.lat, marker.position.lng);
    }

    fn place_label(&mut self, label: LabelRequest) {
        println!("  label (dwell {}ms)", label.dwell.as_millis());
    }

    fn clear_markers(&mut self) {
        println!("  clear markers");
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Timeline(args) => cmd_timeline(args),
        Command::Markers(args) => cmd_markers(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn load_timeline(path: &PathBuf) -> anyhow::Result<Vec<wayline::TimelineEntry>> {
    let records = wayline::data::load_records(path)
        .with_context(|| format!("loading {}", path.display()))?;
    Ok(wayline::timeline::build(&records))
}

fn cmd_timeline(args: DataArgs) -> anyhow::Result<()> {
    for (i, entry) in load_timeline(&args.in_path)?.iter().enumerate() {
        println!(
            "{i:>3}  {:<14} {:<5} {}",
            date::format_month_year(entry.date),
            entry.category.as_str(),
            entry.location.city
        );
    }
    Ok(())
}

fn cmd_markers(args: DataArgs) -> anyhow::Result<()> {
    let timeline = load_timeline(&args.in_path)?;
    for marker in wayline::year_markers(&timeline) {
        println!("{}  {:6.2}%", marker.year, marker.position);
    }
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let timeline = load_timeline(&args.in_path)?;
    if timeline.is_empty() {
        println!("nothing to play");
        return Ok(());
    }

    let presenter =
        MarkerPresenter::with_zoom(ConsoleSurface, MarkerStyles::default(), args.zoom);
    let mut seq = Sequencer::with_speed(
        timeline,
        QueueScheduler::new(),
        presenter,
        Duration::from_millis(args.speed_ms),
    );

    seq.play();
    while let Some((token, delay)) = seq.scheduler_mut().take_due() {
        thread::sleep(delay);
        seq.on_timer(token);
        if let Some(i) = seq.state().current {
            let entry = &seq.timeline()[i];
            println!(
                "[{:>5.1}%] {} {}",
                seq.state().progress,
                date::format_month_year(entry.date),
                entry.location.city
            );
        }
    }
    println!("done");
    Ok(())
}
