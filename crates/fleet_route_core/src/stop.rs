use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    constants::{MAX_LATITUDE, MAX_LONGITUDE},
    geo::distance,
};

/// One geographic point a vehicle has to visit.
///
/// `latitude`/`longitude` are WGS-84 decimal degrees. `label` and `load`
/// travel with the stop through every reordering but never affect distance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load: Option<u32>,
}

impl Stop {
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            latitude,
            longitude,
            load: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_load(mut self, load: u32) -> Self {
        self.load = Some(load);
        self
    }

    /// Great-circle distance to `rhs` in kilometers.
    pub fn dist(&self, rhs: &Self) -> f64 {
        distance::haversine_km(self.latitude, self.longitude, rhs.latitude, rhs.longitude)
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-MAX_LATITUDE..=MAX_LATITUDE).contains(&self.latitude)
            && (-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&self.longitude)
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::InvalidStop {
                id: self.id.clone(),
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut b1 = ryu::Buffer::new();
        let mut b2 = ryu::Buffer::new();
        write!(
            f,
            "{},{},{}",
            self.id,
            b1.format(self.latitude),
            b2.format(self.longitude)
        )
    }
}
