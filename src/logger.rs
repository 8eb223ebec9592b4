use chrono::Local;
use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::fs;

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "jsprr.log";

/// Initializes the global logger. Call once at the top of `main`.
///
/// The level comes from `RUST_LOG` (defaulting to `info`). Output goes to the
/// console with colored levels and, when the directory is writable, to
/// `logs/jsprr.log` without colors.
pub fn init() {
    let level = std::env::var("RUST_LOG").ok().and_then(|level| level.parse::<LevelFilter>().ok()).unwrap_or(LevelFilter::Info);

    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::BrightBlack);

    let console = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .chain(std::io::stderr());

    let mut root = Dispatch::new().level(level).chain(console);

    match fs::create_dir_all(LOG_DIR).and_then(|_| fern::log_file(format!("{}/{}", LOG_DIR, LOG_FILE))) {
        Ok(file) => {
            let file_sink = Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "[{} {} {}] {}",
                        Local::now().format("%Y-%m-%d %H:%M:%S"),
                        record.level(),
                        record.target(),
                        message
                    ))
                })
                .chain(file);
            root = root.chain(file_sink);
        }
        Err(e) => eprintln!("Failed to open log file in '{}': {}", LOG_DIR, e),
    }

    if let Err(e) = root.apply() {
        eprintln!("Failed to apply logger configuration: {}", e);
    }
}
