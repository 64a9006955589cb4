//! Site availability resolution
//!
//! `resolve` is a pure filter over the fetched site-status list; input
//! order is preserved and nothing is ranked. The advisory suggestion list
//! is ranked by the matching service upstream and passed through as-is.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{SiteAvailability, SiteClass, SiteFilters, SiteSuggestion},
    upstream::DynCampgroundApi,
};

/// Apply the active filters to a site-status list
pub fn resolve(
    sites: &[SiteAvailability],
    classes: &[SiteClass],
    filters: &SiteFilters,
) -> Vec<SiteAvailability> {
    let compatibility = filters
        .rig_type
        .and_then(|rig| rig.compatible_site_types());

    sites
        .iter()
        .filter(|site| {
            if filters.available_only && !site.status.is_available() {
                return false;
            }
            if let Some(site_type) = filters.site_type {
                if site.site_type != site_type {
                    return false;
                }
            }
            if let Some(class_id) = filters.site_class_id {
                if site.class_id != Some(class_id) {
                    return false;
                }
            }
            if let Some(allowed) = compatibility {
                if !allowed.contains(&site.site_type) {
                    return false;
                }
            }
            if let (Some(rig_length), Some(rig)) = (filters.rig_length_ft, filters.rig_type) {
                if rig.is_rv() {
                    if let Some(ceiling) = rig_ceiling(site, classes) {
                        if ceiling < rig_length {
                            return false;
                        }
                    }
                }
            }
            true
        })
        .cloned()
        .collect()
}

/// Site-specific rig length ceiling, falling back to the class default
fn rig_ceiling(site: &SiteAvailability, classes: &[SiteClass]) -> Option<u32> {
    site.rig_max_length_ft.or_else(|| {
        site.class_id
            .and_then(|class_id| classes.iter().find(|class| class.id == class_id))
            .and_then(|class| class.rig_max_length_ft)
    })
}

pub struct AvailabilityService {
    api: DynCampgroundApi,
}

impl AvailabilityService {
    pub fn new(api: DynCampgroundApi) -> Self {
        Self { api }
    }

    /// Fetch the site-status list for a date range and apply filters
    pub async fn sites_for(
        &self,
        campground_id: Uuid,
        arrival_date: NaiveDate,
        departure_date: NaiveDate,
        filters: &SiteFilters,
    ) -> AppResult<Vec<SiteAvailability>> {
        let (sites, classes) = tokio::join!(
            self.api
                .get_sites_with_status(campground_id, arrival_date, departure_date),
            self.api.get_site_classes(campground_id),
        );

        // Failed reads degrade to an empty list; the desk shows no sites
        // rather than crashing the flow.
        let sites = sites.unwrap_or_else(|e| {
            tracing::warn!("Failed to fetch site availability: {}", e);
            Vec::new()
        });
        // Class lookup only feeds the rig-length fallback; an empty list
        // just skips that fallback.
        let classes = classes.unwrap_or_else(|e| {
            tracing::warn!("Failed to fetch site classes: {}", e);
            Vec::new()
        });

        Ok(resolve(&sites, &classes, filters))
    }

    /// Advisory guest-to-site matches, ranked upstream (score 0-100)
    pub async fn suggestions(
        &self,
        campground_id: Uuid,
        guest_id: Uuid,
    ) -> AppResult<Vec<SiteSuggestion>> {
        self.api.get_matched_sites(campground_id, guest_id).await
    }
}
