//! phyllo - TUI and CLI for sunflower spirals and ring lattices
//!
//! Usage:
//!   phyllo [options]                 Launch TUI
//!   phyllo generate [options]        Emit SVG markup or JSON points
//!   phyllo stats [options]           Print nearest-neighbor stats
//!   phyllo render -o out.png         Rasterize to an image
//!   phyllo benchmark [options]       Time generation and stats
//!   phyllo modes                     List generation modes
//!   phyllo settings [--current]      Print example or resolved settings

mod cli;

use std::env;
use std::fs;
use std::io::{self, stdout};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use ratatui_image::{picker::{Picker, ProtocolType}, protocol::StatefulProtocol, StatefulImage};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use phyllo::{Mode, Scene};

use cli::{
    cmd_benchmark, cmd_generate, cmd_render, cmd_stats, drawing_to_image, stats_report,
    common::{fail, parse_settings_args, SETTINGS_OPTIONS_HELP},
    settings::EXAMPLE_YAML,
    Settings,
};

/// Side of the preview image in pixels
const IMAGE_PIXELS: u32 = 1200;

/// Where the `x` key writes the current markup
const EXPORT_PATH: &str = "phyllo.svg";

const ATTRIBUTION: &str = "after H. Vogel, \"A better way to construct the sunflower head\" (1979)";

/// Result from background scene generation
struct SceneResult {
    scene: Scene,
    svg: String,
    gen_time_ms: f64,
}

/// One row of the parameter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Mode,
    Count,
    Alpha,
    Layers,
    PerLayer,
    Twist,
    Size,
    Radius,
    AdjustSize,
    Center,
    Crosshair,
    Svg,
}

impl Field {
    fn all() -> &'static [Field] {
        &[
            Field::Mode,
            Field::Count,
            Field::Alpha,
            Field::Layers,
            Field::PerLayer,
            Field::Twist,
            Field::Size,
            Field::Radius,
            Field::AdjustSize,
            Field::Center,
            Field::Crosshair,
            Field::Svg,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            Field::Mode => "mode",
            Field::Count => "n",
            Field::Alpha => "alpha",
            Field::Layers => "layers",
            Field::PerLayer => "nPerLayer",
            Field::Twist => "twist",
            Field::Size => "size",
            Field::Radius => "radius",
            Field::AdjustSize => "fit radius",
            Field::Center => "center",
            Field::Crosshair => "crosshair",
            Field::Svg => "svg",
        }
    }

    fn value(&self, s: &Settings) -> String {
        let on_off = |b: bool| (if b { "on" } else { "off" }).to_string();
        match self {
            Field::Mode => s.mode.name().to_string(),
            Field::Count => s.n.to_string(),
            Field::Alpha => format!("{:.2}", s.alpha),
            Field::Layers => s.layers.to_string(),
            Field::PerLayer => format!("{:.1}", s.n_per_layer),
            Field::Twist => format!("{:.2}", s.twist),
            Field::Size => format!("{:.0}", s.size),
            Field::Radius => format!("{:.1}", s.radius),
            Field::AdjustSize => on_off(s.adjust_size_to_fit_radius),
            Field::Center => on_off(s.center),
            Field::Crosshair => on_off(s.crosshair),
            Field::Svg => on_off(s.svg),
        }
    }

    /// Smallest slider step; coarse steps are ten of these.
    fn fine_step(&self) -> f64 {
        match self {
            Field::Count | Field::Size => 10.0,
            Field::Alpha => 0.05,
            Field::PerLayer | Field::Radius => 0.5,
            Field::Twist => 0.01,
            _ => 1.0,
        }
    }

    /// Move this control by `steps` fine steps. Toggles flip on any step.
    fn adjust(&self, s: &mut Settings, steps: f64) {
        let delta = steps * self.fine_step();
        let bump = |v: f64| ((v + delta) / self.fine_step()).round() * self.fine_step();
        let bump_count = |v: usize| bump(v as f64).max(0.0) as usize;

        match self {
            Field::Mode => s.mode = if steps > 0.0 { s.mode.next() } else { s.mode.prev() },
            Field::Count => s.n = bump_count(s.n),
            Field::Alpha => s.alpha = bump(s.alpha),
            Field::Layers => s.layers = bump_count(s.layers),
            Field::PerLayer => s.n_per_layer = bump(s.n_per_layer),
            Field::Twist => s.twist = bump(s.twist),
            Field::Size => s.size = bump(s.size),
            Field::Radius => s.radius = bump(s.radius),
            Field::AdjustSize => s.adjust_size_to_fit_radius = !s.adjust_size_to_fit_radius,
            Field::Center => s.center = !s.center,
            Field::Crosshair => s.crosshair = !s.crosshair,
            Field::Svg => s.svg = !s.svg,
        }
        *s = s.clamped();
    }

    /// Whether this control has any effect in `mode`.
    fn applies_to(&self, mode: Mode) -> bool {
        let meta = mode.metadata();
        match self {
            Field::Alpha => meta.uses_alpha,
            Field::Layers | Field::PerLayer | Field::Twist => meta.uses_rings,
            _ => true,
        }
    }

    /// Whether changing this control needs a new scene.
    fn regenerates(&self) -> bool {
        !matches!(self, Field::Svg)
    }
}

/// Application state for TUI
struct App {
    /// Current control values
    settings: Settings,
    /// Selected parameter row
    field_state: ListState,
    /// Latest finished scene (points, stats and drawing together)
    scene: Option<Scene>,
    /// Markup of `scene`
    svg: String,
    /// Last generation time
    gen_time_ms: f64,
    /// Should exit
    should_quit: bool,
    /// Is scene generation in progress?
    is_loading: bool,
    /// Flag to regenerate after current generation completes
    needs_regenerate: bool,
    /// Channel to receive scene results
    result_rx: Receiver<SceneResult>,
    /// Sender cloned into each worker thread
    result_tx: Sender<SceneResult>,
    /// Animation frame counter for spinner
    spinner_frame: usize,
    /// Image picker for terminal protocol detection
    picker: Picker,
    /// Current rendered image protocol state
    image_state: Option<Box<dyn StatefulProtocol>>,
    /// Flag to indicate image needs re-rendering
    needs_image_update: bool,
    /// First visible line of the markup view
    markup_scroll: u16,
    /// One-line message for the user (export result, render errors)
    status: Option<String>,
}

impl App {
    fn new(settings: Settings) -> Self {
        let mut field_state = ListState::default();
        field_state.select(Some(0));

        let (result_tx, result_rx) = mpsc::channel();

        // Initialize image picker - force Sixel protocol
        let mut picker = Picker::from_termios()
            .unwrap_or_else(|_| Picker::new((8, 16)));
        picker.protocol_type = ProtocolType::Sixel;

        let mut app = App {
            settings,
            field_state,
            scene: None,
            svg: String::new(),
            gen_time_ms: 0.0,
            should_quit: false,
            is_loading: false,
            needs_regenerate: false,
            result_rx,
            result_tx,
            spinner_frame: 0,
            picker,
            image_state: None,
            needs_image_update: true,
            markup_scroll: 0,
            status: None,
        };

        app.regenerate_scene();
        app
    }

    fn selected_field(&self) -> Field {
        Field::all()[self.field_state.selected().unwrap_or(0)]
    }

    fn regenerate_scene(&mut self) {
        // Skip if already loading - mark for regeneration after completion
        if self.is_loading {
            self.needs_regenerate = true;
            return;
        }

        self.needs_regenerate = false;
        let settings = self.settings.clone();
        let tx = self.result_tx.clone();

        self.is_loading = true;

        thread::spawn(move || {
            let start = Instant::now();
            let scene = settings.scene();
            let svg = scene.to_svg();
            let gen_time_ms = start.elapsed().as_secs_f64() * 1000.0;
            let _ = tx.send(SceneResult { scene, svg, gen_time_ms });
        });
    }

    fn check_scene_result(&mut self) {
        // Drain all pending results, keep only the latest
        let mut latest: Option<SceneResult> = None;
        while let Ok(result) = self.result_rx.try_recv() {
            latest = Some(result);
        }

        if let Some(result) = latest {
            debug!(points = result.scene.points.len(), ms = result.gen_time_ms, "scene received");
            self.scene = Some(result.scene);
            self.svg = result.svg;
            self.gen_time_ms = result.gen_time_ms;
            self.is_loading = false;
            self.needs_image_update = true;

            // If user changed settings while we were generating, regenerate now
            if self.needs_regenerate {
                self.regenerate_scene();
            }
        }
    }

    fn update_image(&mut self) {
        if !self.needs_image_update || self.is_loading || self.settings.svg {
            return;
        }
        let Some(scene) = &self.scene else {
            return;
        };

        match drawing_to_image(&scene.drawing, IMAGE_PIXELS) {
            Ok(img) => self.image_state = Some(self.picker.new_resize_protocol(img)),
            Err(e) => self.status = Some(e.to_string()),
        }
        self.needs_image_update = false;
    }

    fn next_field(&mut self) {
        let i = match self.field_state.selected() {
            Some(i) => (i + 1) % Field::all().len(),
            None => 0,
        };
        self.field_state.select(Some(i));
    }

    fn prev_field(&mut self) {
        let i = match self.field_state.selected() {
            Some(i) => {
                if i == 0 { Field::all().len() - 1 } else { i - 1 }
            }
            None => 0,
        };
        self.field_state.select(Some(i));
    }

    fn adjust_setting(&mut self, steps: f64) {
        let field = self.selected_field();
        field.adjust(&mut self.settings, steps);

        if field.regenerates() {
            self.regenerate_scene();
        } else {
            self.needs_image_update = true;
            self.markup_scroll = 0;
        }
    }

    fn scroll_markup(&mut self, delta: i32) {
        let lines = self.svg.lines().count() as i32;
        let next = (self.markup_scroll as i32 + delta).clamp(0, (lines - 1).max(0));
        self.markup_scroll = next as u16;
    }

    fn export_markup(&mut self) {
        self.status = Some(match fs::write(EXPORT_PATH, &self.svg) {
            Ok(()) => {
                info!(path = EXPORT_PATH, "exported markup");
                format!("Wrote {}", EXPORT_PATH)
            }
            Err(e) => format!("Failed to write {}: {}", EXPORT_PATH, e),
        });
    }
}

/// Install the log subscriber. `RUST_LOG` wins over `default_filter`.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt().with_env_filter(filter).with_writer(io::stderr).with_target(true).init();
}

fn main() {
    let args: Vec<String> = env::args().collect();

    // Check for CLI subcommands
    if args.len() >= 2 {
        match args[1].as_str() {
            "generate" => {
                init_tracing("warn");
                cmd_generate(&args[2..]);
                return;
            }
            "stats" => {
                init_tracing("warn");
                cmd_stats(&args[2..]);
                return;
            }
            "render" => {
                init_tracing("warn");
                cmd_render(&args[2..]);
                return;
            }
            "benchmark" => {
                init_tracing("warn");
                cmd_benchmark(&args[2..]);
                return;
            }
            "modes" => {
                cmd_modes();
                return;
            }
            "settings" => {
                cmd_settings(&args[2..]);
                return;
            }
            "help" | "--help" | "-h" => {
                print_usage(&args[0]);
                return;
            }
            "tui" => {
                launch_tui(&args[2..]);
                return;
            }
            arg if !arg.starts_with('-') => {
                eprintln!("Unknown command: {}", arg);
                print_usage(&args[0]);
                std::process::exit(1);
            }
            _ => {}
        }
    }

    // Launch TUI
    launch_tui(&args[1..]);
}

fn launch_tui(args: &[String]) {
    // Log lines would tear the alternate screen; stay silent unless asked
    init_tracing("off");

    let parsed = parse_settings_args(args).unwrap_or_else(|e| fail(&e));
    if let Some(extra) = parsed.rest.first() {
        fail(&format!("Unknown option: {}", extra));
    }

    if let Err(e) = run_tui(parsed.settings) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_tui(settings: Settings) -> Result<(), String> {
    // Initialize terminal
    enable_raw_mode().map_err(|e| e.to_string())?;
    stdout().execute(EnterAlternateScreen).map_err(|e| e.to_string())?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))
        .map_err(|e| e.to_string())?;

    // Create app
    let mut app = App::new(settings);

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().map_err(|e| e.to_string())?;
    stdout().execute(LeaveAlternateScreen).map_err(|e| e.to_string())?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<(), String> {
    loop {
        // Check for completed scene generation (non-blocking)
        app.check_scene_result();

        // Update the rendered image if needed
        app.update_image();

        // Animate spinner while loading
        if app.is_loading {
            app.spinner_frame = (app.spinner_frame + 1) % 8;
        }

        terminal.draw(|frame| ui(frame, app)).map_err(|_| "Draw error".to_string())?;

        if event::poll(Duration::from_millis(50)).map_err(|e| e.to_string())? {
            if let Event::Key(key) = event::read().map_err(|e| e.to_string())? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => {
                            app.should_quit = true;
                        }
                        KeyCode::Up | KeyCode::Char('k') => {
                            app.prev_field();
                        }
                        KeyCode::Down | KeyCode::Char('j') => {
                            app.next_field();
                        }
                        KeyCode::Left | KeyCode::Char('h') => {
                            app.adjust_setting(-1.0);
                        }
                        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') | KeyCode::Enter => {
                            app.adjust_setting(1.0);
                        }
                        KeyCode::Char('[') => {
                            app.adjust_setting(-10.0);
                        }
                        KeyCode::Char(']') => {
                            app.adjust_setting(10.0);
                        }
                        KeyCode::Char('v') => {
                            Field::Svg.adjust(&mut app.settings, 1.0);
                            app.needs_image_update = true;
                            app.markup_scroll = 0;
                        }
                        KeyCode::PageDown | KeyCode::Char('J') => {
                            app.scroll_markup(10);
                        }
                        KeyCode::PageUp | KeyCode::Char('K') => {
                            app.scroll_markup(-10);
                        }
                        KeyCode::Char('x') => {
                            app.export_markup();
                        }
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let top_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(34),
            Constraint::Min(40),
        ])
        .split(main_layout[0]);

    // Split left sidebar into parameter list and stats
    let sidebar_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(Field::all().len() as u16 + 2),
            Constraint::Min(8),
        ])
        .split(top_layout[0]);

    // Parameter list
    let items: Vec<ListItem> = Field::all()
        .iter()
        .map(|f| {
            let item = ListItem::new(format!("{:<11}{}", f.label(), f.value(&app.settings)));
            if f.applies_to(app.settings.mode) {
                item
            } else {
                item.style(Style::default().fg(Color::DarkGray))
            }
        })
        .collect();

    let list = List::new(items)
        .block(Block::default()
            .title(" Parameters ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)))
        .highlight_style(Style::default()
            .bg(Color::DarkGray)
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD))
        .highlight_symbol("► ");

    frame.render_stateful_widget(list, sidebar_layout[0], &mut app.field_state);

    // Stats panel
    let stats_text = match &app.scene {
        Some(scene) => {
            let report = stats_report(scene).unwrap_or_else(|e| e);
            format!("Gen: {:.1}ms\n{}", app.gen_time_ms, report)
        }
        None => "waiting for first scene".to_string(),
    };
    let stats = Paragraph::new(stats_text)
        .block(Block::default()
            .title(" Stats ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)))
        .style(Style::default().fg(Color::White));

    frame.render_widget(stats, sidebar_layout[1]);

    // Spinner animation frames
    let spinner_chars = ['|', '/', '-', '\\', '|', '/', '-', '\\'];
    let spinner = spinner_chars[app.spinner_frame % spinner_chars.len()];

    let preview_title = if app.is_loading {
        format!(" [{}] Generating... ", spinner)
    } else if app.settings.svg {
        format!(" Markup ({} lines) ", app.svg.lines().count())
    } else {
        format!(" {} ", app.settings.mode.metadata().description)
    };

    let border_color = if app.is_loading { Color::Yellow } else { Color::Green };

    let preview_block = Block::default()
        .title(preview_title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    if app.settings.svg {
        // Read-only markup, scrollable with PgUp/PgDn
        let markup = Paragraph::new(app.svg.as_str())
            .block(preview_block)
            .scroll((app.markup_scroll, 0));
        frame.render_widget(markup, top_layout[1]);
    } else {
        let inner_area = preview_block.inner(top_layout[1]);
        frame.render_widget(preview_block, top_layout[1]);

        if app.settings.mode == Mode::Unknown {
            frame.render_widget(Paragraph::new("unrecognized mode: nothing to draw"), inner_area);
        } else if let Some(ref mut image_state) = app.image_state {
            let image_widget = StatefulImage::new(None);
            frame.render_stateful_widget(image_widget, inner_area, image_state);
        }
    }

    // Help
    let status = app.status.as_deref().unwrap_or(ATTRIBUTION);
    let help = Paragraph::new(format!(
        "↑↓ select  ←→ adjust  [ ] coarse  space toggle  v markup  PgUp/PgDn scroll  x export  q quit\n{}",
        status
    ))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, main_layout[1]);
}

fn print_usage(prog: &str) {
    eprintln!("phyllo - sunflower spirals and ring lattices inside a circle");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} [options]                      Launch TUI", prog);
    eprintln!("  {} generate [options]             SVG markup or JSON points", prog);
    eprintln!("  {} stats [options]                Nearest-neighbor stats", prog);
    eprintln!("  {} render -o <out.png> [options]  Rasterize", prog);
    eprintln!("  {} benchmark [options]", prog);
    eprintln!("  {} modes", prog);
    eprintln!("  {} settings [--current [options]] Print example or resolved settings", prog);
    eprintln!();
    eprintln!("Options (all commands):");
    eprintln!("{}", SETTINGS_OPTIONS_HELP);
    eprintln!();
    eprintln!("TUI Controls:");
    eprintln!("  ↑/↓ or j/k    Select parameter");
    eprintln!("  ←/→ or h/l    Adjust parameter (fine)");
    eprintln!("  [ / ]         Adjust parameter (coarse)");
    eprintln!("  space         Toggle / next mode");
    eprintln!("  v             Switch between picture and markup");
    eprintln!("  x             Write markup to {}", EXPORT_PATH);
    eprintln!("  q / Esc       Quit");
    eprintln!();
    eprintln!("Set RUST_LOG=debug to see generation logs on stderr.");
}

/// Print the example file, or with `--current` the settings the given
/// options resolve to.
fn cmd_settings(args: &[String]) {
    if !args.iter().any(|a| a == "--current") {
        print!("{}", EXAMPLE_YAML);
        return;
    }

    let parsed = parse_settings_args(args).unwrap_or_else(|e| fail(&e));
    if let Some(extra) = parsed.rest.iter().find(|a| *a != "--current") {
        fail(&format!("Unknown option: {}", extra));
    }
    let yaml = parsed.settings.to_yaml().unwrap_or_else(|e| fail(&e.to_string()));
    print!("{}", yaml);
}

fn cmd_modes() {
    println!("Available modes:");
    for mode in Mode::all() {
        println!("  {:<18} {}", mode.name(), mode.metadata().description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fine_steps_move_one_notch() {
        let mut s = Settings::default();
        Field::Alpha.adjust(&mut s, 1.0);
        assert!((s.alpha - 2.05).abs() < 1e-9);

        Field::Count.adjust(&mut s, -10.0);
        assert_eq!(s.n, 400);
    }

    #[test]
    fn adjustments_respect_ui_bounds() {
        let mut s = Settings { twist: 0.49, ..Default::default() };
        Field::Twist.adjust(&mut s, 10.0);
        assert_eq!(s.twist, 0.5);

        let mut s = Settings { n: 5, ..Default::default() };
        Field::Count.adjust(&mut s, -10.0);
        assert_eq!(s.n, 1);
    }

    #[test]
    fn toggles_flip() {
        let mut s = Settings::default();
        Field::Crosshair.adjust(&mut s, -1.0);
        assert!(s.crosshair);
        Field::Crosshair.adjust(&mut s, 1.0);
        assert!(!s.crosshair);
    }

    #[test]
    fn mode_cycles_both_ways() {
        let mut s = Settings::default();
        Field::Mode.adjust(&mut s, 1.0);
        assert_eq!(s.mode, Mode::SunflowerGeodesic);
        Field::Mode.adjust(&mut s, -1.0);
        Field::Mode.adjust(&mut s, -1.0);
        assert_eq!(s.mode, Mode::Lattice);
    }

    #[test]
    fn ring_controls_only_apply_to_lattice() {
        assert!(Field::Layers.applies_to(Mode::Lattice));
        assert!(!Field::Layers.applies_to(Mode::Sunflower));
        assert!(!Field::Alpha.applies_to(Mode::Lattice));
        assert!(Field::Alpha.applies_to(Mode::SunflowerGeodesic));
        assert!(Field::Radius.applies_to(Mode::Sunflower));
    }

    #[test]
    fn only_markup_toggle_skips_regeneration() {
        for field in Field::all() {
            assert_eq!(field.regenerates(), *field != Field::Svg);
        }
    }
}
