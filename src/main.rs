use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use arcgauge::render::segment_colors;
use arcgauge::{Canvas, Color, GaugeConfig, GaugeConfigurator};
use clap::Parser;
use pixels::{Pixels, SurfaceTexture};
use rand::Rng;
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

const START_COLOR: Color = Color::new(0x33, 0xcc, 0x33);
const END_COLOR: Color = Color::new(0xff, 0x47, 0x1a);
const LERP_FACTOR: f64 = 0.1;

/// Preview a gauge configuration in a window, or dump its ring as SVG.
#[derive(Parser, Debug)]
#[command(name = "arcgauge", version, about)]
struct Cli {
    /// JSON gauge configuration (camelCase keys)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Value range, overriding the configuration
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
    range: Option<Vec<f64>>,

    /// Window title
    #[arg(long, default_value = "Gauge")]
    title: String,

    /// Width of the border ring; 0 disables it
    #[arg(long, default_value_t = 2.0)]
    border_width: f64,

    /// Print the ring segments as an SVG document and exit
    #[arg(long)]
    svg: bool,

    #[arg(long, default_value_t = 60.0)]
    max_framerate: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GaugeConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => GaugeConfig::default(),
    };
    if let Some(range) = &cli.range {
        config.min_value = range[0].min(range[1]);
        config.max_value = range[0].max(range[1]);
    }
    config.validate()?;

    if cli.svg {
        println!("{}", svg_document(&config, cli.border_width)?);
        return Ok(());
    }

    run_window(config, &cli)
}

fn svg_document(config: &GaugeConfig, border_width: f64) -> arcgauge::Result<String> {
    let mut gauge = GaugeConfigurator::new();
    let arc = gauge.configure_arc(config)?;
    let colors = segment_colors(arc.len(), START_COLOR, END_COLOR);
    let r = config.radius();

    let mut out = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{w}\" viewBox=\"{min} {min} {w} {w}\">\n",
        w = config.width,
        min = -r,
    );
    for (path, color) in arc.paths().iter().zip(&colors) {
        out.push_str(&format!(
            "  <path d=\"{}\" fill=\"#{:02x}{:02x}{:02x}\"/>\n",
            path.to_svg(),
            color.r,
            color.g,
            color.b
        ));
    }
    if border_width > 0.0 {
        let border = gauge.border_arc(config, 0.0, 0.0, border_width)?;
        for path in border.paths() {
            out.push_str(&format!("  <path d=\"{}\" fill=\"#000\"/>\n", path.to_svg()));
        }
    }
    for tick in gauge.configure_ticks(config)? {
        let angle = gauge.needle_angle(config, tick)?;
        let (x, y) = polar(angle, r - config.ring_inset - config.ring_width - 12.0);
        out.push_str(&format!(
            "  <text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"middle\" font-size=\"10\">{tick}</text>\n"
        ));
    }
    out.push_str("</svg>");
    Ok(out)
}

/// Point at `radius` along a dial angle (zero at 12 o'clock, clockwise).
fn polar(angle: f64, radius: f64) -> (f64, f64) {
    (angle.sin() * radius, -angle.cos() * radius)
}

/// Copy of `config` with every radial size scaled to a `size`-pixel square.
fn fit(config: &GaugeConfig, size: usize) -> GaugeConfig {
    let factor = size as f64 / config.width;
    GaugeConfig {
        width: size as f64,
        ring_width: config.ring_width * factor,
        ring_inset: config.ring_inset * factor,
        corner_radius: config.corner_radius * factor,
        ..config.clone()
    }
}

struct Needle {
    value: f64,
    target: f64,
}

impl Needle {
    fn new(config: &GaugeConfig) -> Self {
        Self {
            value: config.min_value,
            target: config.min_value,
        }
    }

    // Wander towards a new random target now and then.
    fn update(&mut self, config: &GaugeConfig) {
        let mut rng = rand::rng();
        if rng.random_range(0.0..1.0) < 0.01 {
            self.target = rng.random_range(config.min_value..config.max_value);
        }
        self.value += (self.target - self.value) * LERP_FACTOR;
    }
}

fn render_gauge(
    canvas: &mut Canvas,
    gauge: &mut GaugeConfigurator,
    config: &GaugeConfig,
    needle: &Needle,
    border_width: f64,
) -> arcgauge::Result<()> {
    canvas.clear(Color::WHITE);
    let size = canvas.width().min(canvas.height());
    let border_width = border_width * size as f64 / config.width;
    let config = fit(config, size);
    let origin = (canvas.width() as f64 / 2.0, canvas.height() as f64 / 2.0);

    let arc = gauge.configure_arc(&config)?;
    let colors = segment_colors(arc.len(), START_COLOR, END_COLOR);
    for (path, color) in arc.paths().iter().zip(colors) {
        canvas.fill_path(path, origin, color);
    }

    if border_width > 0.0 {
        let border = gauge.border_arc(&config, 0.0, 0.0, border_width)?;
        for path in border.paths() {
            canvas.fill_path(&path, origin, Color::BLACK);
        }
    }

    let angle = gauge.needle_angle(&config, needle.value)?;
    let length = config.radius() - config.ring_inset - config.ring_width / 2.0;
    let (tx, ty) = polar(angle, length);
    canvas.draw_tapered_line(origin, (origin.0 + tx, origin.1 + ty), 6.0, Color::BLACK);
    canvas.draw_circle(origin, 6.0, Color::BLACK);
    Ok(())
}

fn run_window(config: GaugeConfig, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(&cli.title)
        .with_inner_size(LogicalSize::new(config.width, config.width))
        .with_resizable(false)
        .build(&event_loop)?;

    let window = Arc::new(window);
    let window_clone = window.clone();
    let size = window.inner_size();
    let mut fb_width = size.width as usize;
    let mut fb_height = size.height as usize;
    let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
    let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

    let mut gauge = GaugeConfigurator::new();
    let mut needle = Needle::new(&config);
    let border_width = cli.border_width;

    let frame_duration = std::time::Duration::from_secs_f64(1.0 / cli.max_framerate.max(1.0));
    let mut last_frame = Instant::now();

    event_loop.run(move |event, window_target| {
        window_target.set_control_flow(ControlFlow::Poll);
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    fb_width = new_size.width as usize;
                    fb_height = new_size.height as usize;
                    let _ = pixels.resize_buffer(new_size.width, new_size.height);
                    let _ = pixels.resize_surface(new_size.width, new_size.height);
                }
                WindowEvent::RedrawRequested => {
                    needle.update(&config);
                    let frame = pixels.frame_mut();
                    let mut canvas = Canvas::new(frame, fb_width, fb_height);
                    if let Err(e) = render_gauge(&mut canvas, &mut gauge, &config, &needle, border_width) {
                        tracing::error!(error = %e, "failed to render gauge");
                        window_target.exit();
                    }
                    let _ = pixels.render();
                }
                _ => {}
            },
            Event::AboutToWait => {
                if last_frame.elapsed() >= frame_duration {
                    window_clone.request_redraw();
                    last_frame = Instant::now();
                }
            }
            _ => {}
        }
    })?;

    Ok(())
}
