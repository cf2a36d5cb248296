//! Pure filtering of the provider collection into the visible subset.

use crate::geo::{distance_meters, LatLng};
use crate::providers::{Provider, ServiceKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceFilter {
    All,
    Only(ServiceKind),
}

impl ServiceFilter {
    /// Parses a dropdown value; `"all"` (or empty) means no service filter.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            ServiceFilter::All
        } else {
            ServiceFilter::Only(ServiceKind::from(trimmed))
        }
    }

    fn admits(&self, service: &ServiceKind) -> bool {
        match self {
            ServiceFilter::All => true,
            ServiceFilter::Only(kind) => kind == service,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub service: ServiceFilter,
    pub min_rating: f64,
    pub radius_km: f64,
    /// Free-text search. When non-blank it overrides every other criterion.
    pub search_text: String,
}

impl FilterCriteria {
    #[must_use]
    pub fn with_radius(radius_km: f64) -> Self {
        Self {
            service: ServiceFilter::All,
            min_rating: 0.0,
            radius_km,
            search_text: String::new(),
        }
    }

    fn search_term(&self) -> Option<String> {
        let trimmed = self.search_text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
    }
}

/// Returns the providers visible under `criteria`, in store order.
///
/// With blank search text a provider is kept when its service, rating and
/// distance from `center` all pass. With search text, only a case-insensitive
/// substring match on name or service is applied.
#[must_use]
pub fn apply(all: &[Provider], criteria: &FilterCriteria, center: LatLng) -> Vec<Provider> {
    if let Some(term) = criteria.search_term() {
        return all
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&term)
                    || p.service.as_str().to_lowercase().contains(&term)
            })
            .cloned()
            .collect();
    }

    let max_meters = criteria.radius_km * 1000.0;
    all.iter()
        .filter(|p| criteria.service.admits(&p.service))
        .filter(|p| p.rating >= criteria.min_rating)
        .filter(|p| distance_meters(p.location(), center) <= max_meters)
        .cloned()
        .collect()
}
