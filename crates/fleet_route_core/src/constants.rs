/// Mean Earth radius used by the haversine distance.
pub(crate) const EARTH_RADIUS_KM: f64 = 6_371.0;

pub(crate) const MAX_LATITUDE: f64 = 90.0;
pub(crate) const MAX_LONGITUDE: f64 = MAX_LATITUDE * 2.0;

pub(crate) const MINUTES_PER_HOUR: f64 = 60.0;

pub(crate) const DEFAULT_AVERAGE_SPEED_KMH: f64 = 40.0;
pub(crate) const DEFAULT_PER_STOP_DWELL_MINUTES: f64 = 3.0;
pub(crate) const DEFAULT_FUEL_PRICE_PER_LITER: f64 = 6.0;
pub(crate) const BUS_FUEL_EFFICIENCY_KM_PER_LITER: f64 = 5.0;
pub(crate) const VAN_FUEL_EFFICIENCY_KM_PER_LITER: f64 = 6.0;
