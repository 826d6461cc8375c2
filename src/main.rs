use std::time::Instant;

use log::{info, warn};

use fleet_route_core::{OptimizerOptions, Result, logging, read_stops, write_comparison};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = OptimizerOptions::from_args()?;
    logging::init_logger(&options)?;

    info!("options: {options}");

    let stops = read_stops(&options)?;
    info!("input: n={}", stops.len());

    let comparison = options.optimizer().optimize(&stops)?;
    for warning in &comparison.warnings {
        warn!("{warning}");
    }

    write_comparison(&comparison, &options)?;

    info!(
        "output: n={} original_km={:.3} optimized_km={:.3} saved_km={:.3} saved_pct={:.2} saved_cost={:.2} time={:.3}s",
        comparison.optimized.order.len(),
        comparison.original.metrics.distance_km,
        comparison.optimized.metrics.distance_km,
        comparison.savings.distance_km,
        comparison.savings.percent_saved,
        comparison.savings.cost_currency,
        now.elapsed().as_secs_f32()
    );

    Ok(())
}
