mod config;
mod demos;
mod display;
mod geometry;
mod logging;
mod math3d;
mod selection;
mod texture;
mod util;

use anyhow::Context;
use config::{print_usage, AppConfig, CliAction, DemoKind};
use demos::{load_texture, CircleDemo, ClipDemo, CubeDemo, Demo};
use display::{Display, InputEvent, PixelBuffer, RenderTarget};
use geometry::Viewport;
use logging::{init_logging, LoggingConfig};
use sdl2::keyboard::Keycode;
use util::FpsCounter;

/// Seconds between FPS log lines while FPS logging is on
const FPS_LOG_INTERVAL: f32 = 1.0;

fn print_controls(config: &AppConfig) {
    println!("=== rasterlab ===");
    println!("Resolution: {}x{}", config.width, config.height);
    if config.vsync {
        println!("VSync: ON. Use --no-vsync for uncapped.");
    } else {
        println!("VSync: OFF (uncapped framerate)");
    }
    println!("Use --help for command line options.");
    println!("Controls:");
    println!("  1 / 2 / 3   - Clipping / Circle / Cube");
    println!("  Left/Right  - Cycle through demos");
    println!("  F           - Toggle FPS logging");
    println!("  Escape / Q  - Quit");
    println!();
    println!("Clipping:");
    println!("  Left click  - Rectangle corners, then polygon vertices");
    println!("  Right click - Close polygon and clip");
    println!("  Backspace   - Undo last point");
    println!("  R           - Start over");
    println!("  S / L       - Save / load session ({})", config.session_path.display());
    println!();
    println!("Circle:");
    println!("  Up/Down     - Grow / shrink radius");
    println!("  Left click  - Move center");
    println!();
    println!("Cube:");
    println!("  Space       - Toggle spin");
    println!("  T           - Texture / vertex colors");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match AppConfig::from_args(&args) {
        CliAction::Help => {
            print_usage();
            return Ok(());
        },
        CliAction::Run(config) => config,
    };

    init_logging(LoggingConfig::with_filter(config.log_filter.as_deref()));
    for warning in &config.warnings {
        log::warn!("ignoring argument: {}", warning);
    }

    run(config)
}

fn run(config: AppConfig) -> anyhow::Result<()> {
    let (mut display, texture_creator) =
        Display::with_options("rasterlab", config.width, config.height, config.vsync)
            .map_err(anyhow::Error::msg)
            .context("failed to open window")?;
    log::info!("window opened at {}x{}", display.width(), display.height());
    let mut target = RenderTarget::with_size(&texture_creator, config.width, config.height)
        .map_err(anyhow::Error::msg)
        .context("failed to create render target")?;
    // Every demo shares one buffer; only the cube reads the depth plane
    let mut buffer = PixelBuffer::with_depth(config.width, config.height);
    let mut viewport = Viewport::new(config.width, config.height);

    // Order matches DemoKind::index
    let mut demos: Vec<Box<dyn Demo>> = vec![
        Box::new(ClipDemo::new(viewport, config.session_path.clone())),
        Box::new(CircleDemo::new(viewport, config.radius, config.point_size)),
        Box::new(CubeDemo::new(
            viewport,
            load_texture(config.texture_path.as_deref()),
        )),
    ];
    let mut current = config.demo.index();

    let mut fps_counter = FpsCounter::new(60);
    let mut log_fps = false;
    let mut fps_timer = 0.0;

    print_controls(&config);

    let mut title_for = usize::MAX;

    'main: loop {
        let (dt, _avg_fps) = fps_counter.tick();

        for event in display.poll_events() {
            match &event {
                InputEvent::Quit => break 'main,
                InputEvent::KeyDown(Keycode::Escape | Keycode::Q) => break 'main,
                InputEvent::KeyDown(Keycode::Num1) => current = DemoKind::Clip.index(),
                InputEvent::KeyDown(Keycode::Num2) => current = DemoKind::Circle.index(),
                InputEvent::KeyDown(Keycode::Num3) => current = DemoKind::Cube.index(),
                InputEvent::KeyDown(Keycode::Left) => {
                    current = (current + demos.len() - 1) % demos.len();
                },
                InputEvent::KeyDown(Keycode::Right) => {
                    current = (current + 1) % demos.len();
                },
                InputEvent::KeyDown(Keycode::F) => {
                    log_fps = !log_fps;
                    fps_timer = 0.0;
                },
                InputEvent::Resized { width, height } => {
                    if (*width, *height) == (buffer.width(), buffer.height()) {
                        continue;
                    }
                    log::debug!("resized to {}x{}", width, height);
                    target = RenderTarget::with_size(&texture_creator, *width, *height)
                        .map_err(anyhow::Error::msg)
                        .context("failed to recreate render target")?;
                    buffer.resize(*width, *height);
                    viewport = Viewport::new(*width, *height);
                    for demo in demos.iter_mut() {
                        demo.resize(viewport);
                    }
                },
                _ => demos[current].handle_event(&event),
            }
        }

        if title_for != current {
            title_for = current;
            let name = demos[current].name();
            log::info!("demo: {}", name);
            display.set_title(&format!("rasterlab - {}", name));
        }

        let demo = &mut demos[current];
        demo.update(dt);
        demo.render(&mut buffer);

        if log_fps {
            fps_timer += dt;
            if fps_timer >= FPS_LOG_INTERVAL {
                fps_timer = 0.0;
                log::info!("{}", fps_counter.summary());
            }
        }

        display
            .present(&mut target, &buffer)
            .map_err(anyhow::Error::msg)?;
    }

    Ok(())
}
