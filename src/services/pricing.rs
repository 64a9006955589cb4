//! Pricing estimation
//!
//! A remote quote is authoritative when available. Without one the desk
//! shows a rate-times-nights estimate; rate resolution walks site rate,
//! class rate by id, then class rate by name (case-insensitive).

use crate::{
    error::AppResult,
    models::{BookingDraft, PriceBreakdown, Quote, SiteAvailability, SiteClass},
    upstream::DynCampgroundApi,
};

/// Nightly rate for a site, by priority: site default rate, class default
/// rate by id, class default rate by name.
pub fn resolve_nightly_rate(site: &SiteAvailability, classes: &[SiteClass]) -> Option<i64> {
    if let Some(rate) = site.default_rate_cents {
        return Some(rate);
    }

    if let Some(class) = site
        .class_id
        .and_then(|class_id| classes.iter().find(|class| class.id == class_id))
    {
        if let Some(rate) = class.default_rate_cents {
            return Some(rate);
        }
    }

    site.class_name.as_deref().and_then(|name| {
        classes
            .iter()
            .find(|class| class.name.eq_ignore_ascii_case(name))
            .and_then(|class| class.default_rate_cents)
    })
}

/// Derive the displayed price breakdown for a selection
pub fn estimate(
    site: Option<&SiteAvailability>,
    classes: &[SiteClass],
    nights: Option<i64>,
    quote: Option<&Quote>,
    lock_fee_cents: i64,
) -> PriceBreakdown {
    if let Some(quote) = quote {
        return PriceBreakdown {
            subtotal_cents: Some(quote.base_subtotal_cents),
            rules_delta_cents: Some(quote.rules_delta_cents),
            total_cents: Some(quote.total_cents + lock_fee_cents),
            lock_fee_cents,
            is_estimate: false,
        };
    }

    let rate = site.and_then(|site| resolve_nightly_rate(site, classes));
    match (rate, nights) {
        (Some(rate), Some(nights)) if nights > 0 => {
            let subtotal = rate * nights;
            PriceBreakdown {
                subtotal_cents: Some(subtotal),
                rules_delta_cents: None,
                total_cents: Some(subtotal + lock_fee_cents),
                lock_fee_cents,
                is_estimate: true,
            }
        }
        _ => PriceBreakdown::unavailable(lock_fee_cents),
    }
}

/// Total used to gate submission: the derived total, else a manually
/// entered payment amount. Never feeds back into the displayed breakdown.
pub fn gating_total(draft: &BookingDraft, breakdown: &PriceBreakdown) -> Option<i64> {
    breakdown.total_cents.or(draft.payment_amount_cents)
}

#[derive(Clone)]
pub struct PricingService {
    api: DynCampgroundApi,
    lock_fee_cents: i64,
}

impl PricingService {
    pub fn new(api: DynCampgroundApi, lock_fee_cents: i64) -> Self {
        Self {
            api,
            lock_fee_cents,
        }
    }

    /// Price the draft's current selection. Quote failures degrade to the
    /// estimate path; they are never fatal.
    pub async fn price_draft(
        &self,
        draft: &BookingDraft,
    ) -> AppResult<(PriceBreakdown, Option<SiteAvailability>)> {
        let lock_fee = if draft.site_locked {
            self.lock_fee_cents
        } else {
            0
        };

        let (site_id, arrival, departure) =
            match (draft.site_id, draft.arrival_date, draft.departure_date) {
                (Some(site_id), Some(arrival), Some(departure)) if departure > arrival => {
                    (site_id, arrival, departure)
                }
                _ => return Ok((PriceBreakdown::unavailable(lock_fee), None)),
            };

        let campground_id = draft.campground_id;
        let (sites, classes, quote) = tokio::join!(
            self.api
                .get_sites_with_status(campground_id, arrival, departure),
            self.api.get_site_classes(campground_id),
            self.api.get_quote(campground_id, site_id, arrival, departure),
        );

        let sites = sites.unwrap_or_else(|e| {
            tracing::warn!("Failed to fetch sites for pricing: {}", e);
            Vec::new()
        });
        let classes = classes.unwrap_or_else(|e| {
            tracing::warn!("Failed to fetch site classes for pricing: {}", e);
            Vec::new()
        });
        let quote = match quote {
            Ok(quote) => Some(quote),
            Err(e) => {
                tracing::warn!(site_id = %site_id, "Quote unavailable, using estimate: {}", e);
                None
            }
        };

        let site = sites.into_iter().find(|site| site.id == site_id);
        let breakdown = estimate(site.as_ref(), &classes, draft.nights(), quote.as_ref(), lock_fee);

        Ok((breakdown, site))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SiteStatus, SiteType};
    use uuid::Uuid;

    fn rv_site(rate: Option<i64>) -> SiteAvailability {
        SiteAvailability {
            id: Uuid::new_v4(),
            name: "R1".to_string(),
            number: "R1".to_string(),
            site_type: SiteType::Rv,
            class_id: None,
            class_name: None,
            status: SiteStatus::Available,
            default_rate_cents: rate,
            rig_max_length_ft: None,
        }
    }

    fn class(name: &str, rate: Option<i64>) -> SiteClass {
        SiteClass {
            id: Uuid::new_v4(),
            name: name.to_string(),
            default_rate_cents: rate,
            rig_max_length_ft: None,
        }
    }

    #[test]
    fn quote_is_authoritative() {
        let quote = Quote {
            base_subtotal_cents: 12000,
            rules_delta_cents: -1000,
            total_cents: 11000,
        };
        let site = rv_site(Some(5000));

        let breakdown = estimate(Some(&site), &[], Some(3), Some(&quote), 2000);
        assert_eq!(breakdown.subtotal_cents, Some(12000));
        assert_eq!(breakdown.rules_delta_cents, Some(-1000));
        assert_eq!(breakdown.total_cents, Some(13000));
        assert!(!breakdown.is_estimate);
    }

    #[test]
    fn missing_quote_falls_back_to_rate_times_nights() {
        let site = rv_site(Some(5000));

        let breakdown = estimate(Some(&site), &[], Some(3), None, 2000);
        assert_eq!(breakdown.subtotal_cents, Some(15000));
        assert_eq!(breakdown.rules_delta_cents, None);
        assert_eq!(breakdown.total_cents, Some(17000));
        assert!(breakdown.is_estimate);
    }

    #[test]
    fn rate_resolution_walks_site_then_class_id_then_class_name() {
        let by_id = class("Pull-through", Some(6500));
        let by_name = class("Lakeside", Some(7000));
        let classes = vec![by_id.clone(), by_name.clone()];

        let mut site = rv_site(None);
        site.class_id = Some(by_id.id);
        assert_eq!(resolve_nightly_rate(&site, &classes), Some(6500));

        let mut site = rv_site(None);
        site.class_name = Some("LAKESIDE".to_string());
        assert_eq!(resolve_nightly_rate(&site, &classes), Some(7000));

        let site = rv_site(Some(4200));
        assert_eq!(resolve_nightly_rate(&site, &classes), Some(4200));
    }

    #[test]
    fn no_rate_means_no_total() {
        let site = rv_site(None);

        let breakdown = estimate(Some(&site), &[], Some(3), None, 0);
        assert_eq!(breakdown.total_cents, None);
        assert!(breakdown.is_estimate);

        let breakdown = estimate(None, &[], None, None, 500);
        assert_eq!(breakdown.total_cents, None);
        assert_eq!(breakdown.lock_fee_cents, 500);
    }

    #[test]
    fn manual_amount_gates_only_when_no_total_derivable() {
        let mut draft = BookingDraft::new(Uuid::new_v4());
        draft.payment_amount_cents = Some(9900);

        let unavailable = PriceBreakdown::unavailable(0);
        assert_eq!(gating_total(&draft, &unavailable), Some(9900));

        let derived = PriceBreakdown {
            subtotal_cents: Some(15000),
            rules_delta_cents: None,
            total_cents: Some(15000),
            lock_fee_cents: 0,
            is_estimate: true,
        };
        assert_eq!(gating_total(&draft, &derived), Some(15000));
    }
}
