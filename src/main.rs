use scrubline::cli::Args;
use scrubline::config::{self, AppSettings};
use scrubline::core::event_bus::{EventBus, SliderEmitter, downcast_event};
use scrubline::core::slider_events::{
    HeightUpdatedEvent, KeyPressEvent, SelectionChangedEvent, ValueChangedEvent,
};
use scrubline::logging;
use scrubline::widgets::slider::{
    HashPalette, MarkKind, SuggestedFrame, SuggestionKind, TrackOccupancy, VideoSlider, video_slider,
};

use clap::Parser;
use eframe::egui;
use log::{debug, error, info, warn};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main application state
struct ScrublineApp {
    slider: VideoSlider,
    event_bus: EventBus,
    settings: AppSettings,
    settings_path: PathBuf,
    last_selection: (i64, i64),
    status: String,
}

impl ScrublineApp {
    fn new(args: &Args, settings: AppSettings, settings_path: PathBuf) -> Self {
        let event_bus = EventBus::new();
        event_bus.subscribe::<ValueChangedEvent, _>(|e| debug!("value -> {}", e.0));
        event_bus.subscribe::<SelectionChangedEvent, _>(|e| {
            info!("selection -> [{}, {})", e.start, e.end)
        });

        let (min, max) = if args.min <= args.max {
            (args.min, args.max)
        } else {
            warn!("--min {} > --max {}, swapping", args.min, args.max);
            (args.max, args.min)
        };
        let mut slider = VideoSlider::new(min, max, args.value, settings.slider.clone())
            .with_emitter(SliderEmitter::from_emitter(event_bus.emitter()));

        if args.demo {
            Self::load_demo(&mut slider, min, max);
        }
        if !args.marks.is_empty() {
            Self::add_cli_marks(&mut slider, &args.marks);
        }
        if let Some((start, end)) = args.zoom_range() {
            slider.set_zoom_range(start as f64, end as f64);
        }

        Self {
            slider,
            event_bus,
            settings,
            settings_path,
            last_selection: (0, 0),
            status: String::new(),
        }
    }

    /// Synthetic tracks, suggestions and header series across the range.
    fn load_demo(slider: &mut VideoSlider, min: i64, max: i64) {
        let span = (max - min).max(1);
        let tracks: Vec<TrackOccupancy> = (0..6)
            .map(|i| {
                let ranges = (0..4)
                    .map(|k| {
                        let start = min + (span * (k * 6 + i)) / 26;
                        (start, start + span / 30 + 1)
                    })
                    .collect();
                TrackOccupancy::new(format!("track_{i}"), ranges)
            })
            .collect();
        let untracked = [(min + span / 2, min + span / 2 + 5)];
        let suggestions: Vec<SuggestedFrame> = (1..10)
            .map(|k| SuggestedFrame {
                frame: min + span * k / 10,
                kind: match k % 3 {
                    0 => SuggestionKind::UserLabeled,
                    1 => SuggestionKind::Predicted,
                    _ => SuggestionKind::Unlabeled,
                },
            })
            .collect();
        slider.set_tracks_from(&tracks, &untracked, &suggestions, &HashPalette::default());

        let series: BTreeMap<i64, f64> = (0..=max.max(0))
            .map(|f| (f, ((f as f64) / 25.0).sin().abs() * 10.0))
            .collect();
        slider.set_header_series(series);
    }

    /// Merge `--mark` frames into the current marks. Ticks are regenerated by
    /// `set_marks`; column markers are kept.
    fn add_cli_marks(slider: &mut VideoSlider, frames: &[i64]) {
        let mut marks = slider
            .get_marks(None)
            .into_iter()
            .filter(|(_, m)| m.kind != MarkKind::Tick)
            .map(|(_, m)| m)
            .collect::<Vec<_>>();
        marks.extend(frames.iter().map(|&v| v.into()));
        slider.set_marks(marks);
    }

    /// Process all events from the event bus
    fn handle_events(&mut self) {
        for event in self.event_bus.poll() {
            if let Some(e) = downcast_event::<SelectionChangedEvent>(&event) {
                self.last_selection = (e.start, e.end);
            } else if let Some(e) = downcast_event::<KeyPressEvent>(&event) {
                self.handle_key(&e.0.key);
            } else if downcast_event::<HeightUpdatedEvent>(&event).is_some() {
                debug!("slider height -> {:?}", self.slider.min_max_heights());
            }
        }
    }

    fn handle_key(&mut self, key: &str) {
        match key {
            "Left" | "ArrowLeft" => self.slider.set_value(self.slider.value() - 1),
            "Right" | "ArrowRight" => self.slider.set_value(self.slider.value() + 1),
            "Home" => self.slider.set_value(self.slider.minimum()),
            "End" => self.slider.set_value(self.slider.maximum()),
            "Escape" => {
                self.slider.clear_selection();
                self.last_selection = (0, 0);
            }
            "Z" => self.slider.reset_zoom(),
            _ => {}
        }
    }

    fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Reset zoom").clicked() {
                self.slider.reset_zoom();
            }
            if ui.button("Clear selection").clicked() {
                self.slider.clear_selection();
                self.last_selection = (0, 0);
            }
            if ui.button("Zoom to selection").clicked() && self.slider.has_selection() {
                let (start, end) = self.slider.get_selection();
                self.slider.set_zoom_range(start as f64, end as f64);
            }
            let mut enabled = self.slider.enabled();
            if ui.checkbox(&mut enabled, "Enabled").changed() {
                self.slider.set_enabled(enabled);
            }
        });
    }
}

impl eframe::App for ScrublineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(if self.settings.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.render_toolbar(ui));

        if self.settings.show_status {
            egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
                let (start, end) = self.last_selection;
                self.status = format!(
                    "Frame {} / [{}, {}]  Selection [{}, {})  Zoom {:.2}x",
                    self.slider.value(),
                    self.slider.minimum(),
                    self.slider.maximum(),
                    start,
                    end,
                    self.slider.zoom_factor(),
                );
                ui.label(&self.status);
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label("Drag: scrub  |  Shift+drag: select  |  Alt+drag: zoom  |  Shift+double-click: select run");
            ui.separator();
            egui::ScrollArea::vertical().show(ui, |ui| {
                if video_slider(ui, &mut self.slider).changed() {
                    ctx.request_repaint();
                }
            });
        });

        self.handle_events();
    }

    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        self.settings.slider = self.slider.config().clone();
        if let Err(e) = self.settings.save(&self.settings_path) {
            error!("{:#}", e);
        } else {
            debug!("Saved settings to {}", self.settings_path.display());
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let path_config = config::PathConfig::from_env_and_cli(args.config_dir.clone());
    if let Err(e) = config::ensure_dirs(&path_config) {
        eprintln!("Warning: Failed to create application directories: {:#}", e);
    }

    logging::init_logger(args.verbosity, args.log_file.as_ref(), config::LOG_FILE, &path_config)?;

    info!("Scrubline starting...");
    debug!("Command-line args: {:?}", args);

    let settings_path = config::config_file(config::SETTINGS_FILE, &path_config);
    info!("Config path: {}", settings_path.display());
    let settings = AppSettings::load(&settings_path).unwrap_or_else(|e| {
        warn!("{:#}, using defaults", e);
        AppSettings::default()
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("Scrubline v{}", env!("CARGO_PKG_VERSION")))
            .with_inner_size([900.0, 320.0])
            .with_resizable(true),
        persist_window: true,
        persistence_path: Some(config::config_file("scrubline_window.ron", &path_config)),
        ..Default::default()
    };

    eframe::run_native(
        "Scrubline",
        native_options,
        Box::new(move |_cc| Ok(Box::new(ScrublineApp::new(&args, settings, settings_path)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(argv: &[&str]) -> ScrublineApp {
        let args = Args::parse_from(argv);
        ScrublineApp::new(&args, AppSettings::default(), PathBuf::from("unused.json"))
    }

    fn count(app: &ScrublineApp, kind: MarkKind) -> usize {
        app.slider.get_marks(Some(kind)).len()
    }

    /// Test: --mark keeps the demo's column markers and ticks
    #[test]
    fn test_cli_marks_keep_columns() {
        let demo = app(&["scrubline", "--demo"]);
        let with_marks = app(&["scrubline", "--demo", "-m", "3", "-m", "7"]);

        assert!(count(&demo, MarkKind::TickColumn) > 0);
        assert_eq!(count(&with_marks, MarkKind::TickColumn), count(&demo, MarkKind::TickColumn));
        assert_eq!(count(&with_marks, MarkKind::Tick), count(&demo, MarkKind::Tick));
        assert_eq!(count(&with_marks, MarkKind::Simple), count(&demo, MarkKind::Simple) + 2);
    }

    /// Test: Escape clears the shown selection too
    #[test]
    fn test_escape_resets_status_selection() {
        let mut app = app(&["scrubline"]);
        app.slider.set_selection(10, 20);
        app.handle_events();
        assert_eq!(app.last_selection, (10, 20));

        app.handle_key("Escape");
        assert!(!app.slider.has_selection());
        assert_eq!(app.last_selection, (0, 0));
    }
}
