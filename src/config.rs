//! Command-line configuration

use crate::display::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::geometry::MAX_RADIUS;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_RADIUS: i32 = 100;
pub const DEFAULT_POINT_SIZE: u32 = 4;
pub const DEFAULT_SESSION_PATH: &str = "session.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoKind {
    Clip,
    Circle,
    Cube,
}

impl DemoKind {
    pub const ALL: [DemoKind; 3] = [DemoKind::Clip, DemoKind::Circle, DemoKind::Cube];

    pub fn index(self) -> usize {
        match self {
            DemoKind::Clip => 0,
            DemoKind::Circle => 1,
            DemoKind::Cube => 2,
        }
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DemoKind::Clip => "clip",
            DemoKind::Circle => "circle",
            DemoKind::Cube => "cube",
        };
        f.write_str(name)
    }
}

impl FromStr for DemoKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.to_ascii_lowercase();
        DemoKind::ALL
            .into_iter()
            .find(|kind| kind.to_string() == name)
            .ok_or_else(|| format!("unknown demo '{}'", name))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub demo: DemoKind,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub radius: i32,
    pub point_size: u32,
    pub session_path: PathBuf,
    pub texture_path: Option<PathBuf>,
    pub log_filter: Option<String>,
    /// Problems found while parsing, logged once the logger is up
    pub warnings: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            demo: DemoKind::Clip,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            vsync: true,
            radius: DEFAULT_RADIUS,
            point_size: DEFAULT_POINT_SIZE,
            session_path: PathBuf::from(DEFAULT_SESSION_PATH),
            texture_path: None,
            log_filter: None,
            warnings: Vec::new(),
        }
    }
}

/// What the command line asks for
#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    Run(AppConfig),
    Help,
}

/// Parse a `WxH` resolution such as `1920x1080`
fn parse_resolution(s: &str) -> Option<(u32, u32)> {
    let (w, h) = s.split_once(['x', 'X'])?;
    let w = w.parse::<u32>().ok()?;
    let h = h.parse::<u32>().ok()?;
    (w > 0 && h > 0).then_some((w, h))
}

impl AppConfig {
    /// Parse arguments, excluding the program name.
    ///
    /// Malformed values keep the default and unknown flags are skipped;
    /// both are recorded in `warnings`.
    pub fn from_args(args: &[String]) -> CliAction {
        let mut config = AppConfig::default();

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            let value = args.get(i + 1).map(String::as_str);

            let takes_value = matches!(
                flag,
                "--demo"
                    | "-d"
                    | "--width"
                    | "-w"
                    | "--height"
                    | "-h"
                    | "--resolution"
                    | "-r"
                    | "--radius"
                    | "--point-size"
                    | "--session"
                    | "--texture"
                    | "--log"
            );
            if takes_value && value.is_none() {
                config.warnings.push(format!("{} needs a value", flag));
                i += 1;
                continue;
            }

            match (flag, value) {
                ("--help", _) => return CliAction::Help,
                ("--no-vsync", _) => config.vsync = false,
                ("--demo" | "-d", Some(v)) => match v.parse() {
                    Ok(demo) => config.demo = demo,
                    Err(e) => config.warnings.push(e),
                },
                ("--width" | "-w", Some(v)) => match v.parse::<u32>() {
                    Ok(w) if w > 0 => config.width = w,
                    _ => config.warnings.push(format!("bad width '{}'", v)),
                },
                ("--height" | "-h", Some(v)) => match v.parse::<u32>() {
                    Ok(h) if h > 0 => config.height = h,
                    _ => config.warnings.push(format!("bad height '{}'", v)),
                },
                ("--resolution" | "-r", Some(v)) => match parse_resolution(v) {
                    Some((w, h)) => {
                        config.width = w;
                        config.height = h;
                    },
                    None => config.warnings.push(format!("bad resolution '{}'", v)),
                },
                ("--radius", Some(v)) => match v.parse::<i32>() {
                    Ok(r) if (0..=MAX_RADIUS).contains(&r) => config.radius = r,
                    _ => config.warnings.push(format!("bad radius '{}'", v)),
                },
                ("--point-size", Some(v)) => match v.parse::<u32>() {
                    Ok(s) if s > 0 => config.point_size = s,
                    _ => config.warnings.push(format!("bad point size '{}'", v)),
                },
                ("--session", Some(v)) => config.session_path = PathBuf::from(v),
                ("--texture", Some(v)) => config.texture_path = Some(PathBuf::from(v)),
                ("--log", Some(v)) => config.log_filter = Some(v.to_owned()),
                (other, _) => {
                    config.warnings.push(format!("unknown argument '{}'", other));
                    i += 1;
                    continue;
                },
            }
            i += if takes_value { 2 } else { 1 };
        }

        CliAction::Run(config)
    }
}

pub fn print_usage() {
    println!("Usage: rasterlab [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --demo NAME, -d NAME      Start demo: clip, circle or cube (default: clip)");
    println!(
        "  --width W, -w W           Set window width (default: {})",
        DEFAULT_WIDTH
    );
    println!(
        "  --height H, -h H          Set window height (default: {})",
        DEFAULT_HEIGHT
    );
    println!("  --resolution WxH, -r WxH  Set resolution (e.g., 800x600)");
    println!("  --no-vsync                Disable VSync for uncapped framerate");
    println!(
        "  --radius R                Circle radius in pixels (default: {})",
        DEFAULT_RADIUS
    );
    println!(
        "  --point-size N            Circle point size (default: {})",
        DEFAULT_POINT_SIZE
    );
    println!(
        "  --session PATH            Clip session file (default: {})",
        DEFAULT_SESSION_PATH
    );
    println!("  --texture PATH            Cube texture image (png or jpeg)");
    println!("  --log FILTER              Log filter, e.g. debug (default: RUST_LOG or info)");
    println!("  --help                    Show this help message");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliAction {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        AppConfig::from_args(&args)
    }

    fn run(args: &[&str]) -> AppConfig {
        match parse(args) {
            CliAction::Run(config) => config,
            CliAction::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn test_defaults() {
        let config = run(&[]);
        assert_eq!(config, AppConfig::default());
        assert_eq!((config.width, config.height), (600, 600));
        assert_eq!(config.radius, 100);
        assert!(config.vsync);
    }

    #[test]
    fn test_all_flags() {
        let config = run(&[
            "--demo",
            "cube",
            "--width",
            "800",
            "-h",
            "480",
            "--no-vsync",
            "--radius",
            "42",
            "--point-size",
            "2",
            "--session",
            "/tmp/s.json",
            "--texture",
            "wall.jpg",
            "--log",
            "debug",
        ]);
        assert_eq!(config.demo, DemoKind::Cube);
        assert_eq!((config.width, config.height), (800, 480));
        assert!(!config.vsync);
        assert_eq!(config.radius, 42);
        assert_eq!(config.point_size, 2);
        assert_eq!(config.session_path, PathBuf::from("/tmp/s.json"));
        assert_eq!(config.texture_path, Some(PathBuf::from("wall.jpg")));
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn test_resolution() {
        let config = run(&["-r", "1024x768"]);
        assert_eq!((config.width, config.height), (1024, 768));
        assert_eq!(parse_resolution("0x10"), None);
        assert_eq!(parse_resolution("640"), None);
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let config = run(&["--width", "wide", "--radius", "-3", "--demo", "teapot"]);
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.radius, DEFAULT_RADIUS);
        assert_eq!(config.demo, DemoKind::Clip);
        assert_eq!(config.warnings.len(), 3);
    }

    #[test]
    fn test_radius_above_max_keeps_default() {
        let too_big = (MAX_RADIUS + 1).to_string();
        let config = run(&["--radius", too_big.as_str()]);
        assert_eq!(config.radius, DEFAULT_RADIUS);
        assert_eq!(config.warnings.len(), 1);
    }

    #[test]
    fn test_unknown_and_missing_values() {
        let config = run(&["--bogus", "--demo", "circle", "--radius"]);
        assert_eq!(config.demo, DemoKind::Circle);
        assert_eq!(config.warnings.len(), 2);
        assert!(config.warnings[0].contains("--bogus"));
        assert!(config.warnings[1].contains("--radius"));
    }

    #[test]
    fn test_help() {
        assert_eq!(parse(&["--width", "10", "--help"]), CliAction::Help);
    }

    #[test]
    fn test_demo_kind_round_trip() {
        for kind in DemoKind::ALL {
            assert_eq!(kind.to_string().parse::<DemoKind>(), Ok(kind));
            assert_eq!(DemoKind::ALL[kind.index()], kind);
        }
        assert_eq!("CUBE".parse::<DemoKind>(), Ok(DemoKind::Cube));
    }
}
