use std::{
    fmt::{self, Display},
    fs::File,
    io::{self, Write},
};

use env_logger::{Builder, Target};
use log::{Level, LevelFilter};

use crate::options::{LogFormat, OptimizerOptions};
use crate::{Error, Result};

/// Crates whose records follow `--log-level`. Everything else is capped at warn.
const ROUTE_TARGETS: [&str; 2] = ["fleet_route", "fleet_route_core"];

/// Installs the global logger described by the logging options.
///
/// Fails if a logger is already installed or the log file cannot be created.
pub fn init_logger(options: &OptimizerOptions) -> Result<()> {
    let format = options.log_format;
    let timestamp = options.log_timestamp;

    let mut builder = Builder::new();
    apply_filters(&mut builder, options.log_level.to_filter());
    builder
        .write_style(env_logger::WriteStyle::Never)
        .target(open_target(options)?)
        .format(move |buf, record| {
            let stamp = timestamp.then(|| buf.timestamp_millis());
            write_line(
                buf,
                format,
                stamp,
                record.level(),
                record.target(),
                record.args(),
            )
        });

    builder
        .try_init()
        .map_err(|e| Error::other(format!("logger init failed: {e}")))
}

fn apply_filters(builder: &mut Builder, level: LevelFilter) {
    builder.filter_level(level.min(LevelFilter::Warn));
    for target in ROUTE_TARGETS {
        builder.filter_module(target, level);
    }
}

fn open_target(options: &OptimizerOptions) -> Result<Target> {
    let Some(path) = options.log_output_path() else {
        return Ok(Target::Stderr);
    };
    let file = File::create(path).map_err(|e| {
        Error::other(format!(
            "failed to create log output file {}: {e}",
            path.display()
        ))
    })?;
    Ok(Target::Pipe(Box::new(file)))
}

/// `fleet_route_core::comparison` logs as `comparison`; foreign targets stay whole.
fn short_target(target: &str) -> &str {
    ROUTE_TARGETS
        .iter()
        .find_map(|krate| target.strip_prefix(krate)?.strip_prefix("::"))
        .unwrap_or(target)
}

fn write_line(
    out: &mut impl Write,
    format: LogFormat,
    stamp: Option<impl Display>,
    level: Level,
    target: &str,
    args: &fmt::Arguments<'_>,
) -> io::Result<()> {
    if let Some(stamp) = stamp {
        write!(out, "{stamp} ")?;
    }
    match format {
        LogFormat::Compact => writeln!(out, "{} {args}", level.as_str()),
        LogFormat::Pretty => writeln!(
            out,
            "{:<5} [{}] {args}",
            level.as_str(),
            short_target(target)
        ),
    }
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::{init_logger, short_target, write_line};
    use crate::options::{LogFormat, OptimizerOptions};

    fn render(format: LogFormat, stamp: Option<&str>, target: &str) -> String {
        let mut out = Vec::new();
        write_line(
            &mut out,
            format,
            stamp,
            Level::Warn,
            target,
            &format_args!("budget exhausted"),
        )
        .expect("write to vec");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn compact_lines_carry_level_and_message() {
        assert_eq!(
            render(LogFormat::Compact, None, "fleet_route_core::comparison"),
            "WARN budget exhausted\n"
        );
    }

    #[test]
    fn pretty_lines_pad_level_and_shorten_route_targets() {
        assert_eq!(
            render(
                LogFormat::Pretty,
                Some("2026-10-16T08:00:00.000Z"),
                "fleet_route_core::algo::nearest_neighbor"
            ),
            "2026-10-16T08:00:00.000Z WARN  [algo::nearest_neighbor] budget exhausted\n"
        );
    }

    #[test]
    fn foreign_targets_are_left_whole() {
        assert_eq!(short_target("rayon_core::registry"), "rayon_core::registry");
        assert_eq!(short_target("fleet_route_core"), "fleet_route_core");
        assert_eq!(short_target("fleet_route::main"), "main");
    }

    #[test]
    fn init_logger_reports_unwritable_log_file() {
        let options = OptimizerOptions {
            log_output: "/nonexistent-dir/fleet-route/run.log".to_string(),
            ..OptimizerOptions::default()
        };
        let err = init_logger(&options).expect_err("log file cannot be created");
        assert!(err.to_string().contains("failed to create log output file"));
    }
}
