//! Validation gate for the booking draft
//!
//! Every rule is evaluated independently so the desk can highlight all
//! offending sections at once; no rule short-circuits another.

use crate::models::{BookingDraft, PaymentMethod, ValidationReport, ValidationSection};

/// Check required-field and cross-field invariants before submission
pub fn validate(draft: &BookingDraft) -> ValidationReport {
    let mut report = ValidationReport::default();

    if draft.guest_id.is_none() {
        report.add(ValidationSection::Guest, "Select or create a guest");
    }

    match (draft.arrival_date, draft.departure_date) {
        (Some(arrival), Some(departure)) if departure > arrival => {}
        _ => report.add(
            ValidationSection::Dates,
            "Departure must be after arrival and both dates are required",
        ),
    }

    if draft.site_id.is_none() {
        report.add(ValidationSection::Site, "Select a site");
    }

    if draft.payment_collection {
        if let Some(message) = payment_error(draft) {
            report.add(ValidationSection::Payment, message);
        }
    }

    report.finish()
}

fn payment_error(draft: &BookingDraft) -> Option<&'static str> {
    let amount = match draft.payment_amount_cents {
        Some(amount) if amount > 0 => amount,
        _ => return Some("Payment amount must be a positive number"),
    };

    let method = match draft.payment_method {
        Some(method) => method,
        None => return Some("Select a payment method"),
    };

    if method == PaymentMethod::Cash && draft.cash_received_cents.unwrap_or(0) < amount {
        return Some("Cash received is less than the payment amount");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn complete_draft() -> BookingDraft {
        let mut draft = BookingDraft::new(Uuid::new_v4());
        draft.guest_id = Some(Uuid::new_v4());
        draft.site_id = Some(Uuid::new_v4());
        draft.arrival_date = Some(date("2025-06-01"));
        draft.departure_date = Some(date("2025-06-03"));
        draft
    }

    #[test]
    fn complete_draft_is_valid() {
        let report = validate(&complete_draft());
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn missing_guest_site_and_dates_are_reported_together() {
        let draft = BookingDraft::new(Uuid::new_v4());
        let report = validate(&draft);
        assert!(!report.is_valid);
        assert!(report.error_for(ValidationSection::Guest).is_some());
        assert!(report.error_for(ValidationSection::Dates).is_some());
        assert!(report.error_for(ValidationSection::Site).is_some());
        assert!(report.error_for(ValidationSection::Payment).is_none());
    }

    #[test]
    fn departure_not_after_arrival_is_a_dates_error() {
        let mut draft = complete_draft();
        draft.departure_date = draft.arrival_date;
        let report = validate(&draft);
        assert!(report.error_for(ValidationSection::Dates).is_some());
    }

    #[test]
    fn collecting_payment_requires_positive_amount_and_method() {
        let mut draft = complete_draft();
        draft.payment_collection = true;
        let report = validate(&draft);
        assert!(report.error_for(ValidationSection::Payment).is_some());

        draft.payment_amount_cents = Some(0);
        assert!(validate(&draft)
            .error_for(ValidationSection::Payment)
            .is_some());

        draft.payment_amount_cents = Some(5000);
        assert!(validate(&draft)
            .error_for(ValidationSection::Payment)
            .is_some());

        draft.payment_method = Some(PaymentMethod::Check);
        assert!(validate(&draft).is_valid);
    }

    #[test]
    fn cash_shortfall_blocks_until_covered() {
        let mut draft = complete_draft();
        draft.payment_collection = true;
        draft.payment_amount_cents = Some(5000);
        draft.payment_method = Some(PaymentMethod::Cash);
        draft.cash_received_cents = Some(4000);

        let report = validate(&draft);
        assert!(!report.is_valid);
        assert!(report.error_for(ValidationSection::Payment).is_some());

        draft.cash_received_cents = Some(5000);
        let report = validate(&draft);
        assert!(report.is_valid);
        assert!(report.error_for(ValidationSection::Payment).is_none());
    }

    #[test]
    fn card_payment_does_not_require_cash_received() {
        let mut draft = complete_draft();
        draft.payment_collection = true;
        draft.payment_amount_cents = Some(5000);
        draft.payment_method = Some(PaymentMethod::Card);
        assert!(validate(&draft).is_valid);
    }
}
