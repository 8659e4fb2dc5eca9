use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use quakemap::{data::datasets::load_feed, prelude::*};

/// Earthquake world map renderer and viewer
#[derive(Parser)]
#[command(name = "quakemap", version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one feed window to a PNG file
    Render {
        /// Time window to draw: hour, day, week or month
        #[arg(short, long, default_value = "day")]
        window: FeedWindow,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Open a window with one button per feed window
    View {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Feed location: URL prefix or directory holding all_<window>.csv
    #[arg(long)]
    feed: Option<String>,

    /// Basemap image URL or file path
    #[arg(long, conflicts_with = "mapbox_token")]
    basemap: Option<String>,

    /// Mapbox access token used to request the static basemap
    #[arg(long)]
    mapbox_token: Option<String>,

    /// Marker size profile: compact or expanded
    #[arg(long)]
    profile: Option<MarkerProfile>,

    /// Header row handling: auto, skip or keep
    #[arg(long)]
    header: Option<HeaderPolicy>,

    /// Cap marker diameters at the profile ceiling
    #[arg(long)]
    clamp_magnitude: bool,

    /// JSON settings file with map and render options
    #[arg(long)]
    config: Option<PathBuf>,
}

impl SourceArgs {
    fn settings(&self) -> anyhow::Result<MapSettings> {
        let mut settings = match &self.config {
            Some(path) => MapSettings::load(path)
                .with_context(|| format!("reading settings from {}", path.display()))?,
            None => MapSettings::default(),
        };

        if let Some(profile) = &self.profile {
            settings.render.marker = profile.resolve();
        }
        if let Some(header) = self.header {
            settings.render.header = header;
        }
        if self.clamp_magnitude {
            settings.render.marker.scaling = MagnitudeScaling::Clamp;
        }
        Ok(settings)
    }

    fn feed_source(&self) -> FeedSource {
        self.feed.as_deref().map(FeedSource::new).unwrap_or_default()
    }

    fn basemap_source(&self) -> anyhow::Result<Box<dyn BasemapSource>> {
        match (&self.basemap, &self.mapbox_token) {
            (Some(location), _) => Ok(Box::new(FixedBasemap(location.clone()))),
            (None, Some(token)) => Ok(Box::new(MapboxStaticSource::new(token.clone()))),
            (None, None) => bail!("no basemap: pass --basemap <url|path> or --mapbox-token <token>"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    match cli.command {
        Command::Render {
            window,
            output,
            source,
        } => render(window, &output, &source),
        Command::View { source } => view(&source),
    }
}

fn render(window: FeedWindow, output: &std::path::Path, args: &SourceArgs) -> anyhow::Result<()> {
    let settings = args.settings()?;
    let loader = ResourceLoader::new();
    let basemap = args.basemap_source()?;

    let location = args.feed_source().url(window);
    let report = load_feed(&loader, &location, settings.render.header)
        .with_context(|| format!("loading {} feed", window))?;

    let mut datasets = DatasetStore::new();
    datasets.insert(window, report.events);

    let map = QuakeMap::load(settings.map, settings.render, &loader, basemap.as_ref(), datasets)?;
    let outcome = map.render_window(window);

    Canvas::from_image(outcome.image)
        .save_png(output)
        .with_context(|| format!("writing {}", output.display()))?;

    if let Some(error) = outcome.error {
        bail!("rendered error frame to {}: {}", output.display(), error);
    }
    println!(
        "{} markers drawn ({} skipped) -> {}",
        outcome.markers_drawn,
        outcome.markers_skipped,
        output.display()
    );
    Ok(())
}

fn view(args: &SourceArgs) -> anyhow::Result<()> {
    let settings = args.settings()?;
    let loader = ResourceLoader::new();
    let basemap = args.basemap_source()?;

    // The blocking HTTP client must not run on a runtime thread, so the
    // runtime only lives for the concurrent feed preload.
    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    let (datasets, failures) = runtime.block_on(DatasetStore::preload_async(
        loader.clone(),
        args.feed_source(),
        settings.render.header,
    ));
    drop(runtime);
    for (window, error) in &failures {
        log::warn!("{} feed unavailable: {}", window, error);
    }

    let map = QuakeMap::load(settings.map, settings.render, &loader, basemap.as_ref(), datasets)?;
    let size = [
        map.options().canvas_width as f32,
        map.options().canvas_height as f32 + 48.0,
    ];

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(size)
            .with_title("Quakemap - Earthquake Viewer"),
        ..Default::default()
    };

    eframe::run_native(
        "quakemap-app",
        options,
        Box::new(|_cc| Box::new(QuakemapApp::new(map))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {}", e))
}

/// Viewer state: the map plus the most recently finished frame.
struct QuakemapApp {
    map: QuakeMap,
    pending: Option<Action>,
    view: FrameView,
}

impl QuakemapApp {
    fn new(map: QuakeMap) -> Self {
        Self {
            map,
            pending: Some(Action::ShowDay),
            view: FrameView::new(),
        }
    }

    fn run_pending(&mut self, ctx: &egui::Context) {
        let Some(action) = self.pending.take() else {
            return;
        };
        match self.map.handle(action) {
            Ok(outcome) => self.view.present(ctx, action, &outcome),
            Err(e) => self.view.report(e.to_string()),
        }
    }
}

impl eframe::App for QuakemapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.run_pending(ctx);

        egui::TopBottomPanel::top("triggers").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for action in self.map.dispatcher().actions() {
                    if ui
                        .selectable_label(self.view.shown() == Some(action), action.label())
                        .clicked()
                    {
                        self.pending = Some(action);
                    }
                }
                ui.separator();
                ui.label(self.view.status());
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.view.show(ui));

        if self.pending.is_some() {
            ctx.request_repaint();
        }
    }
}
