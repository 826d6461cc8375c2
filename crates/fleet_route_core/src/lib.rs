//! Stop sequencing for fleet routes.
//!
//! Scores a stop list in its given order, reorders it with a greedy
//! nearest-neighbor pass from a fixed anchor, and converts both orders into
//! distance, time, fuel and cost so they can be compared side by side.

mod algo;
mod comparison;
mod constants;
mod error;
mod geo;
mod io;
pub mod logging;
mod metrics;
mod route;
mod stop;

pub(crate) use io::options;

pub use algo::nearest_neighbor::{NearestNeighbor, NearestNeighborTour};
pub use comparison::{RouteComparison, RouteOptimizer, RouteSummary, Savings, optimize_route};
pub use error::{Error, Result};
pub use geo::distance::{compute_closed_route_distance, compute_route_distance, haversine_km};
pub use io::input::{parse_stops, read_stops};
pub use io::options::{InputFormat, LogFormat, LogLevel, OptimizerOptions};
pub use io::output::{write_comparison, write_report};
pub use metrics::{MetricsConfig, RouteMetrics, VehicleClass};
pub use route::{Route, RouteShape};
pub use stop::Stop;
