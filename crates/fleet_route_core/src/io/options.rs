use std::{env, path::Path};

use fleet_route_derive::{CliOptions, CliValue, KvDisplay};
use log::LevelFilter;

use crate::{Error, MetricsConfig, Result, RouteOptimizer, RouteShape, VehicleClass};

/// Command-line configuration for a single optimization run.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct OptimizerOptions {
    /// Average travel speed in km/h.
    #[cli(long = "average-speed-kmh")]
    pub average_speed_kmh: f64,
    /// Minutes spent at every stop.
    #[cli(long = "per-stop-dwell-minutes")]
    pub per_stop_dwell_minutes: f64,
    /// Overrides the vehicle class fuel efficiency (km per liter).
    #[cli(long = "fuel-efficiency-km-per-liter")]
    #[kv(fmt = "opt")]
    pub fuel_efficiency_km_per_liter: Option<f64>,
    /// Fuel price per liter in the reporting currency.
    #[cli(long = "fuel-price-per-liter")]
    pub fuel_price_per_liter: f64,
    #[cli(long = "vehicle-class", parse_with = "VehicleClass::parse")]
    pub vehicle_class: VehicleClass,
    /// Id of the stop the optimized route starts from. Defaults to the first stop.
    #[cli(long = "anchor")]
    #[kv(fmt = "opt")]
    pub anchor: Option<String>,
    #[cli(long = "route-shape", parse_with = "RouteShape::parse")]
    pub route_shape: RouteShape,
    /// Maximum distance evaluations for the nearest-neighbor pass. 0 is unlimited.
    #[cli(long = "evaluation-budget")]
    pub evaluation_budget: usize,
    /// Stop list path. Empty or `-` means stdin.
    #[cli(long = "input")]
    pub input: String,
    /// Stop list format. Inferred from the input extension when unset.
    #[cli(long = "input-format", parse_with = "InputFormat::parse")]
    #[kv(fmt = "opt")]
    pub input_format: Option<InputFormat>,
    /// Comparison report path. Empty or `-` means stdout.
    #[cli(long = "output")]
    pub output: String,
    /// Pretty-print the JSON report.
    #[cli(flag = "pretty")]
    pub pretty: bool,
    #[cli(long = "log-level", parse_with = "LogLevel::parse")]
    pub log_level: LogLevel,
    #[cli(long = "log-format", parse_with = "LogFormat::parse")]
    pub log_format: LogFormat,
    #[cli(flag = "log-timestamp")]
    pub log_timestamp: bool,
    /// Log file path. Empty or `-` means stderr.
    #[cli(long = "log-output")]
    pub log_output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-level")]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-format")]
pub enum LogFormat {
    Compact,
    Pretty,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "input-format")]
pub enum InputFormat {
    Csv,
    Json,
}

impl Default for OptimizerOptions {
    fn default() -> Self {
        let metrics = MetricsConfig::default();
        Self {
            average_speed_kmh: metrics.average_speed_kmh,
            per_stop_dwell_minutes: metrics.per_stop_dwell_minutes,
            fuel_efficiency_km_per_liter: None,
            fuel_price_per_liter: metrics.fuel_price_per_liter,
            vehicle_class: VehicleClass::default(),
            anchor: None,
            route_shape: RouteShape::default(),
            evaluation_budget: 0,
            input: String::new(),
            input_format: None,
            output: String::new(),
            pretty: false,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
        }
    }
}

impl OptimizerOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    pub fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = Self::split_arg(raw_name, &mut args);
            if !options.apply_cli_option(&name, value)? {
                return Err(Error::invalid_input(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }

        options.metrics_config().validate()?;
        Ok(options)
    }

    pub fn usage() -> String {
        format!(
            concat!(
                "Usage:\n",
                "  fleet-route [options] [--input stops.csv]\n",
                "  fleet-route [options] < stops.csv\n\n",
                "Options:\n",
                "  --average-speed-kmh <f64>\n",
                "  --per-stop-dwell-minutes <f64>\n",
                "  --fuel-efficiency-km-per-liter <f64>\n",
                "  --fuel-price-per-liter <f64>\n",
                "  --vehicle-class <{}>\n",
                "  --anchor <stop id>\n",
                "  --route-shape <{}>\n",
                "  --evaluation-budget <usize>\n",
                "  --input <path>\n",
                "  --input-format <{}>\n",
                "  --output <path>\n",
                "  --pretty[=<bool>]\n",
                "  --no-pretty\n",
                "  --log-level <{}>\n",
                "  --log-format <{}>\n",
                "  --log-timestamp[=<bool>]\n",
                "  --no-log-timestamp\n",
                "  --log-output <path>\n",
                "  --help\n",
                "\n",
                "Input:\n",
                "  csv with header id,label,latitude,longitude,load (label and load optional)\n",
                "  json array of {{\"id\",\"label\",\"latitude\",\"longitude\",\"load\"}} objects\n",
                "\n",
                "Examples:\n",
                "  fleet-route --input stops.csv --pretty\n",
                "  fleet-route --vehicle-class van --route-shape round-trip < stops.csv\n",
                "  fleet-route --anchor garage --fuel-price-per-liter 5.79 --input stops.json\n",
                "  fleet-route --log-level=info --log-output run.log --output report.json < stops.csv\n",
            ),
            VehicleClass::expected(),
            RouteShape::expected(),
            InputFormat::expected(),
            LogLevel::expected(),
            LogFormat::expected(),
        )
    }

    pub fn metrics_config(&self) -> MetricsConfig {
        let fuel_efficiency = self
            .fuel_efficiency_km_per_liter
            .unwrap_or_else(|| self.vehicle_class.fuel_efficiency_km_per_liter());
        MetricsConfig::for_vehicle_class(self.vehicle_class)
            .with_average_speed_kmh(self.average_speed_kmh)
            .with_per_stop_dwell_minutes(self.per_stop_dwell_minutes)
            .with_fuel_efficiency_km_per_liter(fuel_efficiency)
            .with_fuel_price_per_liter(self.fuel_price_per_liter)
    }

    pub fn optimizer(&self) -> RouteOptimizer {
        let optimizer = RouteOptimizer::new(self.metrics_config())
            .with_shape(self.route_shape)
            .with_evaluation_budget(self.evaluation_budget);
        match &self.anchor {
            Some(anchor) => optimizer.with_anchor(anchor.clone()),
            None => optimizer,
        }
    }

    /// Explicit `--input-format`, else `json` for `.json` inputs, else `csv`.
    pub fn resolved_input_format(&self) -> InputFormat {
        if let Some(format) = self.input_format {
            return format;
        }
        match self
            .input_path()
            .and_then(|path| path.extension())
            .and_then(|ext| ext.to_str())
        {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Csv,
        }
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        non_stdio_path(&self.log_output)
    }

    pub fn output_path(&self) -> Option<&Path> {
        non_stdio_path(&self.output)
    }

    pub fn input_path(&self) -> Option<&Path> {
        non_stdio_path(&self.input)
    }
}

fn non_stdio_path(raw: &str) -> Option<&Path> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        None
    } else {
        Some(Path::new(raw))
    }
}

#[cfg(test)]
mod tests {
    use log::LevelFilter;

    use super::{InputFormat, LogFormat, LogLevel, OptimizerOptions};
    use crate::{MetricsConfig, RouteShape, VehicleClass};

    #[test]
    fn log_level_maps_to_expected_filter() {
        assert_eq!(LogLevel::Error.to_filter(), LevelFilter::Error);
        assert_eq!(LogLevel::Warn.to_filter(), LevelFilter::Warn);
        assert_eq!(LogLevel::Info.to_filter(), LevelFilter::Info);
        assert_eq!(LogLevel::Debug.to_filter(), LevelFilter::Debug);
        assert_eq!(LogLevel::Trace.to_filter(), LevelFilter::Trace);
        assert_eq!(LogLevel::Off.to_filter(), LevelFilter::Off);
        assert_eq!(LogLevel::parse("WARNING").expect("alias"), LogLevel::Warn);
    }

    #[test]
    fn defaults_match_metrics_config_defaults() {
        let options = OptimizerOptions::default();
        assert_eq!(options.metrics_config(), MetricsConfig::default());
        assert_eq!(options.route_shape, RouteShape::Open);
        assert!(options.anchor.is_none());
        assert!(!options.pretty);
        assert!(options.log_timestamp);
    }

    #[test]
    fn parse_from_iter_applies_known_cli_options() {
        let options = OptimizerOptions::parse_from_iter([
            "--average-speed-kmh=55.5",
            "--per-stop-dwell-minutes",
            "4",
            "--fuel-efficiency-km-per-liter=7.25",
            "--fuel-price-per-liter=5.79",
            "--vehicle-class=van",
            "--anchor",
            "garage",
            "--route-shape=round-trip",
            "--evaluation-budget=500",
            "--input=stops.csv",
            "--input-format=json",
            "--output=report.json",
            "--pretty",
            "--log-level=debug",
            "--log-format=pretty",
            "--log-timestamp=false",
            "--log-output=run.log",
        ])
        .expect("parse options");

        assert_eq!(options.average_speed_kmh, 55.5);
        assert_eq!(options.per_stop_dwell_minutes, 4.0);
        assert_eq!(options.fuel_efficiency_km_per_liter, Some(7.25));
        assert_eq!(options.fuel_price_per_liter, 5.79);
        assert_eq!(options.vehicle_class, VehicleClass::Van);
        assert_eq!(options.anchor.as_deref(), Some("garage"));
        assert_eq!(options.route_shape, RouteShape::RoundTrip);
        assert_eq!(options.evaluation_budget, 500);
        assert_eq!(options.input, "stops.csv");
        assert_eq!(options.input_format, Some(InputFormat::Json));
        assert_eq!(options.output, "report.json");
        assert!(options.pretty);
        assert_eq!(options.log_level, LogLevel::Debug);
        assert_eq!(options.log_format, LogFormat::Pretty);
        assert!(!options.log_timestamp);
        assert_eq!(options.log_output, "run.log");
    }

    #[test]
    fn explicit_fuel_efficiency_overrides_vehicle_class() {
        let options = OptimizerOptions::parse_from_iter([
            "--vehicle-class=van",
            "--fuel-efficiency-km-per-liter=3.5",
        ])
        .expect("parse options");
        assert_eq!(options.metrics_config().fuel_efficiency_km_per_liter, 3.5);

        let options =
            OptimizerOptions::parse_from_iter(["--vehicle-class=van"]).expect("parse options");
        assert_eq!(options.metrics_config().fuel_efficiency_km_per_liter, 6.0);
    }

    #[test]
    fn empty_anchor_value_clears_anchor() {
        let options = OptimizerOptions::parse_from_iter(["--anchor=garage", "--anchor="])
            .expect("parse options");
        assert!(options.anchor.is_none());
        assert!(options.optimizer().anchor().is_none());
    }

    #[test]
    fn optimizer_carries_anchor_shape_and_config() {
        let options = OptimizerOptions::parse_from_iter([
            "--anchor=depot",
            "--route-shape=closed",
            "--average-speed-kmh=30",
        ])
        .expect("parse options");
        let optimizer = options.optimizer();
        assert_eq!(optimizer.anchor(), Some("depot"));
        assert_eq!(optimizer.shape(), RouteShape::RoundTrip);
        assert_eq!(optimizer.config().average_speed_kmh, 30.0);
    }

    #[test]
    fn parse_from_iter_accepts_negated_flags() {
        let options = OptimizerOptions::parse_from_iter(["--pretty", "--no-pretty", "--no-log-timestamp"])
            .expect("parse options");
        assert!(!options.pretty);
        assert!(!options.log_timestamp);
    }

    #[test]
    fn parse_from_iter_rejects_negated_flag_with_value() {
        let err = OptimizerOptions::parse_from_iter(["--no-pretty=true"])
            .expect_err("expected flag value rejection");
        assert!(err.to_string().contains("does not take a value"));
    }

    #[test]
    fn parse_from_iter_rejects_bad_boolean() {
        let err = OptimizerOptions::parse_from_iter(["--pretty=maybe"])
            .expect_err("invalid bool should fail");
        assert!(err.to_string().contains("Invalid boolean for --pretty: maybe"));
    }

    #[test]
    fn parse_from_iter_rejects_unknown_option() {
        let err = OptimizerOptions::parse_from_iter(["--genetic=1"])
            .expect_err("expected unknown option error");
        assert!(err.to_string().contains("Unknown option: --genetic"));
    }

    #[test]
    fn parse_from_iter_rejects_unexpected_positional_argument() {
        let err = OptimizerOptions::parse_from_iter(["stops.csv"])
            .expect_err("expected positional error");
        assert!(err.to_string().contains("Unexpected argument: stops.csv"));
    }

    #[test]
    fn parse_from_iter_requires_value_for_numeric_option() {
        let err = OptimizerOptions::parse_from_iter(["--average-speed-kmh"])
            .expect_err("missing value should fail");
        assert!(err.to_string().contains("Missing value for --average-speed-kmh"));
    }

    #[test]
    fn parse_from_iter_rejects_non_numeric_value() {
        let err = OptimizerOptions::parse_from_iter(["--evaluation-budget=lots"])
            .expect_err("non-numeric should fail");
        assert!(err.to_string().contains("Invalid value for --evaluation-budget: lots"));
    }

    #[test]
    fn parse_from_iter_rejects_invalid_metrics() {
        let err = OptimizerOptions::parse_from_iter(["--average-speed-kmh=0"])
            .expect_err("zero speed should fail");
        assert!(err.to_string().contains("average_speed_kmh must be > 0"));
    }

    #[test]
    fn parse_from_iter_help_returns_usage_error() {
        let err =
            OptimizerOptions::parse_from_iter(["--help"]).expect_err("help should short-circuit");
        let message = err.to_string();
        assert!(message.contains("Usage:"));
        assert!(message.contains("--route-shape <open|round-trip>"));
        assert!(message.contains("--vehicle-class <bus|van>"));
    }

    #[test]
    fn input_format_is_inferred_from_extension() {
        let options = OptimizerOptions {
            input: "in/stops.JSON".to_string(),
            ..OptimizerOptions::default()
        };
        assert_eq!(options.resolved_input_format(), InputFormat::Json);

        let options = OptimizerOptions {
            input: "in/stops.txt".to_string(),
            ..OptimizerOptions::default()
        };
        assert_eq!(options.resolved_input_format(), InputFormat::Csv);

        let options = OptimizerOptions {
            input: "in/stops.json".to_string(),
            input_format: Some(InputFormat::Csv),
            ..OptimizerOptions::default()
        };
        assert_eq!(options.resolved_input_format(), InputFormat::Csv);
    }

    #[test]
    fn stdio_paths_treat_empty_and_dash_as_none() {
        let options = OptimizerOptions::default();
        assert!(options.input_path().is_none());
        assert!(options.output_path().is_none());
        assert!(options.log_output_path().is_none());

        let options = OptimizerOptions {
            input: "-".to_string(),
            output: " - ".to_string(),
            log_output: "out/run.log".to_string(),
            ..OptimizerOptions::default()
        };
        assert!(options.input_path().is_none());
        assert!(options.output_path().is_none());
        assert_eq!(
            options.log_output_path().expect("path should exist"),
            std::path::Path::new("out/run.log")
        );
    }

    #[test]
    fn display_lists_options_as_key_value_block() {
        let rendered = OptimizerOptions::default().to_string();
        assert!(rendered.contains("anchor"));
        assert!(rendered.contains("= -"));
        assert!(rendered.contains("route_shape"));
        assert!(rendered.contains("= open"));

        let anchored = OptimizerOptions {
            anchor: Some("garage".to_string()),
            ..OptimizerOptions::default()
        }
        .to_string();
        let anchor_line = anchored
            .lines()
            .find(|line| line.trim_start().starts_with("anchor "))
            .expect("anchor line");
        assert!(anchor_line.ends_with("= garage"));
        let widest = "fuel_efficiency_km_per_liter";
        let value_column = anchor_line.find('=').expect("separator");
        assert_eq!(value_column, 1 + widest.len() + 1);
    }
}
