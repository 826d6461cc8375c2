use fleet_route_derive::CliValue;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    constants::{
        BUS_FUEL_EFFICIENCY_KM_PER_LITER, DEFAULT_AVERAGE_SPEED_KMH, DEFAULT_FUEL_PRICE_PER_LITER,
        DEFAULT_PER_STOP_DWELL_MINUTES, MINUTES_PER_HOUR, VAN_FUEL_EFFICIENCY_KM_PER_LITER,
    },
};

/// Vehicle class used to pick a default fuel efficiency.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize, CliValue)]
#[serde(rename_all = "kebab-case")]
#[cli_value(option = "vehicle-class")]
pub enum VehicleClass {
    #[default]
    Bus,
    #[cli(alias = "minibus")]
    Van,
}

impl VehicleClass {
    pub fn fuel_efficiency_km_per_liter(self) -> f64 {
        match self {
            Self::Bus => BUS_FUEL_EFFICIENCY_KM_PER_LITER,
            Self::Van => VAN_FUEL_EFFICIENCY_KM_PER_LITER,
        }
    }
}

/// Conversion factors from distance and stop count to time, fuel and cost.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsConfig {
    pub average_speed_kmh: f64,
    pub per_stop_dwell_minutes: f64,
    pub fuel_efficiency_km_per_liter: f64,
    pub fuel_price_per_liter: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self::for_vehicle_class(VehicleClass::default())
    }
}

impl MetricsConfig {
    pub fn for_vehicle_class(class: VehicleClass) -> Self {
        Self {
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
            per_stop_dwell_minutes: DEFAULT_PER_STOP_DWELL_MINUTES,
            fuel_efficiency_km_per_liter: class.fuel_efficiency_km_per_liter(),
            fuel_price_per_liter: DEFAULT_FUEL_PRICE_PER_LITER,
        }
    }

    pub fn with_average_speed_kmh(mut self, average_speed_kmh: f64) -> Self {
        self.average_speed_kmh = average_speed_kmh;
        self
    }

    pub fn with_per_stop_dwell_minutes(mut self, per_stop_dwell_minutes: f64) -> Self {
        self.per_stop_dwell_minutes = per_stop_dwell_minutes;
        self
    }

    pub fn with_fuel_efficiency_km_per_liter(mut self, fuel_efficiency_km_per_liter: f64) -> Self {
        self.fuel_efficiency_km_per_liter = fuel_efficiency_km_per_liter;
        self
    }

    pub fn with_fuel_price_per_liter(mut self, fuel_price_per_liter: f64) -> Self {
        self.fuel_price_per_liter = fuel_price_per_liter;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("average_speed_kmh", self.average_speed_kmh, false),
            ("per_stop_dwell_minutes", self.per_stop_dwell_minutes, true),
            (
                "fuel_efficiency_km_per_liter",
                self.fuel_efficiency_km_per_liter,
                false,
            ),
            ("fuel_price_per_liter", self.fuel_price_per_liter, true),
        ];
        for (name, value, zero_ok) in checks {
            if !value.is_finite() {
                return Err(Error::invalid_config(format!("{name} must be finite, got {value}")));
            }
            if value < 0.0 || (!zero_ok && value == 0.0) {
                let bound = if zero_ok { ">= 0" } else { "> 0" };
                return Err(Error::invalid_config(format!(
                    "{name} must be {bound}, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Converts a route's distance and stop count into [`RouteMetrics`].
    ///
    /// Time is rounded up to whole minutes.
    pub fn measure(&self, distance_km: f64, stop_count: usize) -> RouteMetrics {
        let travel_minutes = distance_km / self.average_speed_kmh * MINUTES_PER_HOUR;
        let dwell_minutes = stop_count as f64 * self.per_stop_dwell_minutes;
        let fuel_liters = distance_km / self.fuel_efficiency_km_per_liter;

        RouteMetrics {
            distance_km,
            time_minutes: (travel_minutes + dwell_minutes).ceil() as u64,
            fuel_liters,
            cost_currency: fuel_liters * self.fuel_price_per_liter,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMetrics {
    pub distance_km: f64,
    pub time_minutes: u64,
    pub fuel_liters: f64,
    pub cost_currency: f64,
}
