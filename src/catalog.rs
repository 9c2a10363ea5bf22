//! The static vehicle catalog and listing filters.

use std::collections::HashSet;
use std::io::Read;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::pricing::{PricingError, Rates};
use crate::{FEATURED_LIMIT, Review, UnavailableSet};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Malformed catalog data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Vehicle {id} has invalid pricing: {source}")]
    Pricing {
        id:     String,
        #[source]
        source: PricingError,
    },

    #[error("Duplicate vehicle id: {0}")]
    DuplicateId(String),

    #[error("Unknown vehicle: {0}")]
    UnknownVehicle(String),
}

/// One rentable vehicle as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id:                String,
    pub name:              String,
    #[serde(rename = "type")]
    pub vehicle_type:      String,
    #[serde(default)]
    pub year:              Option<u16>,
    pub seats:             u8,
    pub transmission:      String,
    pub fuel_type:         String,
    pub price_per_day:     Decimal,
    pub price_per_week:    Decimal,
    #[serde(default)]
    pub deposit:           Decimal,
    #[serde(default)]
    pub description:       String,
    #[serde(default)]
    pub features:          Vec<String>,
    #[serde(default)]
    pub featured:          bool,
    #[serde(default)]
    pub reviews:           Vec<Review>,
    #[serde(default)]
    pub unavailable_dates: UnavailableSet,
}

impl Vehicle {
    /// # Errors
    /// Returns `PricingError` if either listed rate is negative.
    pub fn rates(&self) -> Result<Rates, PricingError> {
        Rates::new(self.price_per_day, self.price_per_week)
    }

    /// Booking form option text, e.g. "Model 3 - $89/day".
    pub fn option_label(&self) -> String {
        format!("{} - ${}/day", self.name, self.price_per_day.normalize())
    }
}

/// Checkbox selections on the listings page.
///
/// A facet with nothing selected matches every vehicle; facets combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VehicleFilter {
    pub types:         Vec<String>,
    pub transmissions: Vec<String>,
    pub fuel_types:    Vec<String>,
}

impl VehicleFilter {
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        let facet = |selected: &[String], value: &str| {
            selected.is_empty() || selected.iter().any(|s| s == value)
        };
        facet(&self.types, &vehicle.vehicle_type)
            && facet(&self.transmissions, &vehicle.transmission)
            && facet(&self.fuel_types, &vehicle.fuel_type)
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.transmissions.is_empty() && self.fuel_types.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub cars:               Vec<Vehicle>,
    #[serde(default)]
    pub vehicle_types:      Vec<String>,
    #[serde(default)]
    pub transmission_types: Vec<String>,
    #[serde(default)]
    pub fuel_types:         Vec<String>,
}

impl Catalog {
    /// Parses and validates catalog JSON.
    ///
    /// # Errors
    /// Returns `CatalogError` on malformed JSON, bad dates or ratings, negative
    /// rates or a repeated vehicle id.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validated()
    }

    /// # Errors
    /// Same as [`from_json`](Self::from_json).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_reader(reader)?;
        catalog.validated()
    }

    fn validated(self) -> Result<Self, CatalogError> {
        {
            let mut seen = HashSet::with_capacity(self.cars.len());
            for car in &self.cars {
                if !seen.insert(car.id.as_str()) {
                    return Err(CatalogError::DuplicateId(car.id.clone()));
                }
                car.rates().map_err(|source| CatalogError::Pricing {
                    id: car.id.clone(),
                    source,
                })?;
            }
        }
        info!(vehicles = self.cars.len(), "loaded vehicle catalog");
        Ok(self)
    }

    pub fn vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.cars.iter().find(|car| car.id == id)
    }

    /// # Errors
    /// Returns `CatalogError::UnknownVehicle` if no car has this id.
    pub fn require(&self, id: &str) -> Result<&Vehicle, CatalogError> {
        self.vehicle(id)
            .ok_or_else(|| CatalogError::UnknownVehicle(id.to_owned()))
    }

    /// Landing-page picks: the first few featured cars in catalog order.
    pub fn featured(&self) -> impl Iterator<Item = &Vehicle> {
        self.cars
            .iter()
            .filter(|car| car.featured)
            .take(FEATURED_LIMIT)
    }

    pub fn filter<'a>(&'a self, filter: &'a VehicleFilter) -> impl Iterator<Item = &'a Vehicle> {
        debug!(?filter, "filtering catalog");
        self.cars.iter().filter(move |car| filter.matches(car))
    }
}

/// Listing header text, e.g. "3 vehicles found".
pub fn results_label(count: usize) -> String {
    let noun = if count == 1 { "vehicle" } else { "vehicles" };
    format!("{count} {noun} found")
}
