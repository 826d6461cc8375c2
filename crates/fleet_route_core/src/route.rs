use std::collections::HashSet;

use fleet_route_derive::CliValue;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result, Stop,
    geo::distance::{compute_closed_route_distance, compute_route_distance},
};

/// Whether a route ends at its last stop or returns to the anchor.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize, CliValue)]
#[serde(rename_all = "kebab-case")]
#[cli_value(option = "route-shape")]
pub enum RouteShape {
    #[default]
    Open,
    #[cli(alias = "closed")]
    RoundTrip,
}

impl RouteShape {
    pub fn distance_km(self, stops: &[Stop]) -> f64 {
        match self {
            Self::Open => compute_route_distance(stops),
            Self::RoundTrip => compute_closed_route_distance(stops),
        }
    }
}

/// Ordered stop sequence with valid coordinates and unique ids.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Route {
    stops: Vec<Stop>,
}

impl Route {
    pub fn new(stops: Vec<Stop>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(stops.len());
        for stop in &stops {
            stop.validate()?;
            if !seen.insert(stop.id.as_str()) {
                return Err(Error::DuplicateStopId(stop.id.clone()));
            }
        }
        Ok(Self { stops })
    }

    /// Caller guarantees `stops` is a reordering of an already validated route.
    pub(crate) fn from_validated(stops: Vec<Stop>) -> Self {
        Self { stops }
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn into_stops(self) -> Vec<Stop> {
        self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.stops.iter().position(|stop| stop.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.stops.iter().map(|stop| stop.id.as_str())
    }

    pub fn distance_km(&self, shape: RouteShape) -> f64 {
        shape.distance_km(&self.stops)
    }
}
