use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    Error, MetricsConfig, Result, Route, RouteMetrics, RouteShape, Stop,
    algo::nearest_neighbor::NearestNeighbor,
};

/// One side of a comparison: the visiting order and what it costs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub order: Vec<Stop>,
    #[serde(flatten)]
    pub metrics: RouteMetrics,
}

/// Original minus optimized. Negative values mean the optimized order is worse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Savings {
    pub distance_km: f64,
    pub percent_saved: f64,
    pub fuel_liters: f64,
    pub cost_currency: f64,
    pub time_minutes: i64,
}

impl Savings {
    pub fn between(original: &RouteMetrics, optimized: &RouteMetrics) -> Self {
        let distance_km = original.distance_km - optimized.distance_km;
        let percent_saved = if original.distance_km > 0.0 {
            distance_km / original.distance_km * 100.0
        } else {
            0.0
        };

        Self {
            distance_km,
            percent_saved,
            fuel_liters: original.fuel_liters - optimized.fuel_liters,
            cost_currency: original.cost_currency - optimized.cost_currency,
            time_minutes: original.time_minutes as i64 - optimized.time_minutes as i64,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteComparison {
    pub original: RouteSummary,
    pub optimized: RouteSummary,
    pub savings: Savings,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Scores a stop list as given against its nearest-neighbor reordering.
///
/// Inputs are never mutated; every call allocates its own routes, so one
/// optimizer can serve any number of threads.
#[derive(Clone, Debug, Default)]
pub struct RouteOptimizer {
    config: MetricsConfig,
    anchor: Option<String>,
    shape: RouteShape,
    builder: NearestNeighbor,
}

impl RouteOptimizer {
    pub fn new(config: MetricsConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Starts the optimized route at the stop with this id instead of the first stop.
    pub fn with_anchor(mut self, id: impl Into<String>) -> Self {
        self.anchor = Some(id.into());
        self
    }

    pub fn with_shape(mut self, shape: RouteShape) -> Self {
        self.shape = shape;
        self
    }

    /// Caps distance evaluations per optimization; `0` means unlimited.
    pub fn with_evaluation_budget(mut self, budget: usize) -> Self {
        self.builder = self.builder.with_evaluation_budget(budget);
        self
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    pub fn shape(&self) -> RouteShape {
        self.shape
    }

    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    pub fn optimize(&self, stops: &[Stop]) -> Result<RouteComparison> {
        self.config.validate()?;
        if stops.is_empty() {
            return Err(Error::EmptyRoute);
        }

        let original = Route::new(stops.to_vec())?;
        let anchor = match &self.anchor {
            Some(id) => original
                .position(id)
                .ok_or_else(|| Error::UnknownAnchor(id.clone()))?,
            None => 0,
        };

        let tour = self.builder.build(original.stops(), anchor);
        let mut warnings = Vec::new();
        if !tour.complete {
            warnings.push(format!(
                "evaluation budget of {} exhausted after {} distance evaluations; the last {} stops keep their input order",
                self.builder.evaluation_budget().unwrap_or_default(),
                tour.evaluations,
                tour.order.len() - tour.placed,
            ));
        }
        let optimized = Route::from_validated(tour.order);

        let original = self.summarize(original);
        let optimized = self.summarize(optimized);
        let savings = Savings::between(&original.metrics, &optimized.metrics);

        log::info!(
            "optimize: n={} shape={} original_km={:.3} optimized_km={:.3} saved_pct={:.2}",
            stops.len(),
            self.shape,
            original.metrics.distance_km,
            optimized.metrics.distance_km,
            savings.percent_saved
        );
        log::debug!(
            "optimize: evaluations={} anchor={} order={}",
            tour.evaluations,
            optimized.order[0].id,
            optimized
                .order
                .iter()
                .map(|stop| stop.id.as_str())
                .collect::<Vec<_>>()
                .join(",")
        );
        if log::log_enabled!(log::Level::Trace) {
            for (position, stop) in optimized.order.iter().enumerate() {
                log::trace!("optimize: stop #{position} {stop}");
            }
        }

        Ok(RouteComparison {
            original,
            optimized,
            savings,
            warnings,
        })
    }

    /// Optimizes independent stop lists in parallel. Results keep input order.
    pub fn optimize_batch(&self, batches: &[Vec<Stop>]) -> Vec<Result<RouteComparison>> {
        log::debug!(
            "optimize_batch: routes={} threads={}",
            batches.len(),
            rayon::current_num_threads()
        );
        batches
            .par_iter()
            .map(|stops| self.optimize(stops))
            .collect()
    }

    fn summarize(&self, route: Route) -> RouteSummary {
        let metrics = self
            .config
            .measure(route.distance_km(self.shape), route.len());
        RouteSummary {
            order: route.into_stops(),
            metrics,
        }
    }
}

/// Compares `stops` as given with the nearest-neighbor order from `stops[0]`.
///
/// An empty list is an error ([`Error::EmptyRoute`]); use
/// [`compute_route_distance`](crate::compute_route_distance) when a zero distance is the desired answer.
pub fn optimize_route(stops: &[Stop], config: &MetricsConfig) -> Result<RouteComparison> {
    RouteOptimizer::new(*config).optimize(stops)
}
