//! Submission orchestration
//!
//! The one place in the flow where ordering is a correctness requirement:
//! the guest address sync must land before the reservation is created, and
//! the reservation must exist before a payment can be scoped to it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        BookingDraft, Hold, NewHold, NewReservation, PaymentMethod, Reservation,
        ReservationStatus, StaffClaims, UpdateGuest,
    },
    store::{DeadLetterEntry, DynDeadLetterSink},
    upstream::DynCampgroundApi,
};

use super::{drafts::DraftService, pricing, pricing::PricingService, validation};

/// Result of a successful submission, branched by payment mode
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// Not collecting now: the invoice goes out with the reservation
    InvoiceSent {
        reservation: Reservation,
        redirect_to: String,
    },
    /// Card: the desk opens a payment modal scoped to the new
    /// reservation's balance
    AwaitingCardPayment {
        reservation: Reservation,
        balance_cents: i64,
    },
    /// Cash, check or folio collected at the desk
    Receipt {
        reservation: Reservation,
        receipt: DeskReceipt,
        redirect_to: String,
    },
}

/// In-app receipt for immediately collected payments
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeskReceipt {
    pub guest_name: String,
    pub site_name: Option<String>,
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
    pub amount_cents: i64,
    pub payment_method: PaymentMethod,
    pub cash_received_cents: Option<i64>,
    pub change_due_cents: i64,
}

pub struct BookingService {
    api: DynCampgroundApi,
    drafts: DraftService,
    pricing: PricingService,
    dead_letters: DynDeadLetterSink,
    default_hold_minutes: u32,
}

impl BookingService {
    pub fn new(
        api: DynCampgroundApi,
        drafts: DraftService,
        pricing: PricingService,
        dead_letters: DynDeadLetterSink,
        default_hold_minutes: u32,
    ) -> Self {
        Self {
            api,
            drafts,
            pricing,
            dead_letters,
            default_hold_minutes,
        }
    }

    /// Submit the draft as a reservation.
    ///
    /// Steps run strictly in order; the only fatal remote step before
    /// creation is the guest address write-back. On creation failure the
    /// draft is left untouched so the desk can retry.
    pub async fn submit(
        &self,
        draft: BookingDraft,
        session: &StaffClaims,
    ) -> AppResult<SubmissionOutcome> {
        let report = validation::validate(&draft);
        if !report.is_valid {
            return Err(AppError::DraftInvalid(report));
        }

        let (breakdown, site) = self.pricing.price_draft(&draft).await?;

        // Site-lock fees and estimated pricing need a justified,
        // approved override before anything is written.
        let (override_reason, override_approved_by) = if draft.site_locked || breakdown.is_estimate
        {
            let reason = draft
                .override_reason
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .ok_or_else(|| {
                    AppError::OverrideApproval("Override justification required".to_string())
                })?;
            let approver = session.override_approver()?;
            (Some(reason.to_string()), Some(approver))
        } else {
            (None, None)
        };

        let guest_id = draft
            .guest_id
            .ok_or_else(|| AppError::Internal("Validated draft lost its guest".to_string()))?;
        let site_id = draft
            .site_id
            .ok_or_else(|| AppError::Internal("Validated draft lost its site".to_string()))?;
        let (arrival_date, departure_date) = match (draft.arrival_date, draft.departure_date) {
            (Some(arrival), Some(departure)) => (arrival, departure),
            _ => return Err(AppError::Internal("Validated draft lost its dates".to_string())),
        };

        let guest = self.api.get_guest(guest_id).await?;
        if !draft.address.is_empty() && draft.address != guest.address {
            self.api
                .update_guest(
                    guest_id,
                    UpdateGuest {
                        address: draft.address.clone(),
                    },
                )
                .await?;
        }

        let collecting = draft.payment_collection;
        let card = draft.payment_method == Some(PaymentMethod::Card);
        let paid_amount_cents = if !collecting || card {
            0
        } else {
            draft.payment_amount_cents.unwrap_or(0)
        };
        let status = if !collecting || card {
            ReservationStatus::Pending
        } else {
            ReservationStatus::Confirmed
        };

        let total_amount_cents = pricing::gating_total(&draft, &breakdown).unwrap_or(0);
        let balance_amount_cents = total_amount_cents - paid_amount_cents;

        let payload = NewReservation {
            campground_id: session.campground_id,
            guest_id,
            site_id,
            arrival_date,
            departure_date,
            adults: draft.adults,
            children: draft.children,
            pets: draft.pets,
            rig_type: draft.rig_type,
            rig_length_ft: draft.rig_length_ft,
            notes: draft.notes.clone(),
            referral_source: draft.referral_source.clone(),
            stay_reason: draft.stay_reason.clone(),
            total_amount_cents,
            paid_amount_cents,
            balance_amount_cents,
            status,
            payment_method: draft.payment_method,
            payment_notes: draft.payment_notes.clone(),
            site_locked: draft.site_locked,
            override_reason,
            override_approved_by,
        };

        let created = self.api.create_reservation(payload).await?;

        tracing::info!(
            reservation_id = %created.id,
            status = %created.status,
            "Reservation created"
        );

        self.drafts
            .clear_silent(session.campground_id, session.staff_id)
            .await;

        let redirect_to = format!("/reservations/{}", created.id);

        if !collecting {
            return Ok(SubmissionOutcome::InvoiceSent {
                reservation: created,
                redirect_to,
            });
        }

        if card {
            let balance_cents = created.balance_amount_cents;
            return Ok(SubmissionOutcome::AwaitingCardPayment {
                reservation: created,
                balance_cents,
            });
        }

        let method = draft
            .payment_method
            .ok_or_else(|| AppError::Internal("Collected payment without a method".to_string()))?;
        let change_due_cents = if method == PaymentMethod::Cash {
            (draft.cash_received_cents.unwrap_or(0) - paid_amount_cents).max(0)
        } else {
            0
        };

        let receipt = DeskReceipt {
            guest_name: guest.full_name(),
            site_name: site.map(|site| site.name),
            arrival_date,
            departure_date,
            amount_cents: paid_amount_cents,
            payment_method: method,
            cash_received_cents: draft.cash_received_cents,
            change_due_cents,
        };

        Ok(SubmissionOutcome::Receipt {
            reservation: created,
            receipt,
            redirect_to,
        })
    }

    /// Card payment completed: advance the reservation to confirmed
    pub async fn complete_card_payment(&self, reservation_id: Uuid) -> AppResult<Reservation> {
        self.api
            .update_reservation_status(reservation_id, ReservationStatus::Confirmed)
            .await
    }

    /// Card payment abandoned: best-effort cancellation of the
    /// just-created reservation. A failed cancel is not retried and not
    /// surfaced to the caller; it lands in the dead-letter log for
    /// operator review.
    pub async fn abandon_card_payment(&self, reservation_id: Uuid) {
        match self.api.cancel_reservation(reservation_id).await {
            Ok(()) => {
                tracing::info!(reservation_id = %reservation_id, "Abandoned reservation cancelled");
            }
            Err(e) => {
                tracing::warn!(
                    reservation_id = %reservation_id,
                    "Failed to cancel abandoned reservation: {}",
                    e
                );
                let entry = DeadLetterEntry::cancellation_failed(reservation_id, e.to_string());
                if let Err(record_error) = self.dead_letters.record(entry).await {
                    tracing::error!("Failed to record dead letter: {}", record_error);
                }
            }
        }
    }

    /// Place a temporary hold on a site prior to full booking
    pub async fn place_hold(
        &self,
        session: &StaffClaims,
        site_id: Uuid,
        arrival_date: NaiveDate,
        departure_date: NaiveDate,
    ) -> AppResult<Hold> {
        self.api
            .create_hold(NewHold {
                campground_id: session.campground_id,
                site_id,
                arrival_date,
                departure_date,
                hold_minutes: self.default_hold_minutes,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Guest, GuestAddress, Quote, SiteAvailability, SiteStatus, SiteType,
    };
    use crate::store::memory::{MemoryDeadLetterSink, MemoryDraftStore};
    use crate::store::DraftStore;
    use crate::upstream::MockCampgroundApi;
    use std::sync::Arc;

    const CAMPGROUND: Uuid = Uuid::from_u128(1);
    const GUEST: Uuid = Uuid::from_u128(2);
    const SITE: Uuid = Uuid::from_u128(3);
    const STAFF: Uuid = Uuid::from_u128(4);
    const RESERVATION: Uuid = Uuid::from_u128(5);

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn claims(can_approve_overrides: bool) -> StaffClaims {
        StaffClaims {
            sub: "dana@campreserv.test".to_string(),
            staff_id: STAFF,
            name: "Dana".to_string(),
            campground_id: CAMPGROUND,
            can_approve_overrides,
            exp: 2_000_000_000,
            iat: 1_700_000_000,
        }
    }

    fn guest() -> Guest {
        Guest {
            id: GUEST,
            first_name: "Rosa".to_string(),
            last_name: "Alvarez".to_string(),
            email: Some("rosa@example.com".to_string()),
            phone: None,
            address: GuestAddress::default(),
        }
    }

    fn site() -> SiteAvailability {
        SiteAvailability {
            id: SITE,
            name: "Riverside 12".to_string(),
            number: "12".to_string(),
            site_type: SiteType::Rv,
            class_id: None,
            class_name: None,
            status: SiteStatus::Available,
            default_rate_cents: Some(5000),
            rig_max_length_ft: None,
        }
    }

    fn quote() -> Quote {
        Quote {
            base_subtotal_cents: 15000,
            rules_delta_cents: 0,
            total_cents: 15000,
        }
    }

    fn created(status: ReservationStatus, paid: i64) -> Reservation {
        Reservation {
            id: RESERVATION,
            campground_id: CAMPGROUND,
            guest_id: GUEST,
            site_id: SITE,
            arrival_date: date("2025-06-01"),
            departure_date: date("2025-06-04"),
            status,
            total_amount_cents: 15000,
            paid_amount_cents: paid,
            balance_amount_cents: 15000 - paid,
        }
    }

    fn draft() -> BookingDraft {
        let mut draft = BookingDraft::new(CAMPGROUND);
        draft.guest_id = Some(GUEST);
        draft.site_id = Some(SITE);
        draft.arrival_date = Some(date("2025-06-01"));
        draft.departure_date = Some(date("2025-06-04"));
        draft
    }

    fn expect_pricing(mock: &mut MockCampgroundApi, quote_result: AppResult<Quote>) {
        mock.expect_get_sites_with_status()
            .returning(|_, _, _| Ok(vec![site()]));
        mock.expect_get_site_classes().returning(|_| Ok(Vec::new()));
        let mut quote_result = Some(quote_result);
        mock.expect_get_quote()
            .returning(move |_, _, _, _| quote_result.take().expect("quote fetched once"));
    }

    struct Harness {
        service: BookingService,
        store: Arc<MemoryDraftStore>,
        dead_letters: Arc<MemoryDeadLetterSink>,
    }

    fn harness(mock: MockCampgroundApi) -> Harness {
        let api: DynCampgroundApi = Arc::new(mock);
        let store = Arc::new(MemoryDraftStore::new());
        let dead_letters = Arc::new(MemoryDeadLetterSink::new());
        let service = BookingService::new(
            api.clone(),
            DraftService::new(store.clone()),
            PricingService::new(api, 2000),
            dead_letters.clone(),
            15,
        );
        Harness {
            service,
            store,
            dead_letters,
        }
    }

    #[tokio::test]
    async fn invoice_path_creates_pending_reservation_and_clears_draft() {
        let mut mock = MockCampgroundApi::new();
        expect_pricing(&mut mock, Ok(quote()));
        mock.expect_get_guest().returning(|_| Ok(guest()));
        mock.expect_update_guest().times(0);
        mock.expect_create_reservation()
            .withf(|payload| {
                payload.status == ReservationStatus::Pending
                    && payload.paid_amount_cents == 0
                    && payload.total_amount_cents == 15000
                    && payload.balance_amount_cents == 15000
                    && payload.override_reason.is_none()
            })
            .returning(|_| Ok(created(ReservationStatus::Pending, 0)));

        let h = harness(mock);
        h.store.save(STAFF, &draft()).await.unwrap();

        let outcome = h.service.submit(draft(), &claims(false)).await.unwrap();
        match outcome {
            SubmissionOutcome::InvoiceSent { redirect_to, .. } => {
                assert_eq!(redirect_to, format!("/reservations/{}", RESERVATION));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        assert!(h.store.load(CAMPGROUND, STAFF).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn cash_path_confirms_and_returns_receipt_with_change() {
        let mut mock = MockCampgroundApi::new();
        expect_pricing(&mut mock, Ok(quote()));
        mock.expect_get_guest().returning(|_| Ok(guest()));
        mock.expect_create_reservation()
            .withf(|payload| {
                payload.status == ReservationStatus::Confirmed
                    && payload.paid_amount_cents == 15000
            })
            .returning(|_| Ok(created(ReservationStatus::Confirmed, 15000)));

        let mut draft = draft();
        draft.payment_collection = true;
        draft.payment_method = Some(PaymentMethod::Cash);
        draft.payment_amount_cents = Some(15000);
        draft.cash_received_cents = Some(20000);

        let h = harness(mock);
        let outcome = h.service.submit(draft, &claims(false)).await.unwrap();
        match outcome {
            SubmissionOutcome::Receipt { receipt, .. } => {
                assert_eq!(receipt.guest_name, "Rosa Alvarez");
                assert_eq!(receipt.site_name.as_deref(), Some("Riverside 12"));
                assert_eq!(receipt.amount_cents, 15000);
                assert_eq!(receipt.change_due_cents, 5000);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn card_path_stays_pending_and_awaits_payment() {
        let mut mock = MockCampgroundApi::new();
        expect_pricing(&mut mock, Ok(quote()));
        mock.expect_get_guest().returning(|_| Ok(guest()));
        mock.expect_create_reservation()
            .withf(|payload| {
                payload.status == ReservationStatus::Pending && payload.paid_amount_cents == 0
            })
            .returning(|_| Ok(created(ReservationStatus::Pending, 0)));

        let mut draft = draft();
        draft.payment_collection = true;
        draft.payment_method = Some(PaymentMethod::Card);
        draft.payment_amount_cents = Some(15000);

        let h = harness(mock);
        let outcome = h.service.submit(draft, &claims(false)).await.unwrap();
        match outcome {
            SubmissionOutcome::AwaitingCardPayment { balance_cents, .. } => {
                assert_eq!(balance_cents, 15000);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn changed_address_is_written_back_before_creation() {
        let mut mock = MockCampgroundApi::new();
        expect_pricing(&mut mock, Ok(quote()));
        mock.expect_get_guest().returning(|_| Ok(guest()));
        mock.expect_update_guest()
            .withf(|guest_id, update| {
                *guest_id == GUEST && update.address.city.as_deref() == Some("Bend")
            })
            .times(1)
            .returning(|_, _| Ok(guest()));
        mock.expect_create_reservation()
            .returning(|_| Ok(created(ReservationStatus::Pending, 0)));

        let mut draft = draft();
        draft.address.line1 = Some("450 NW Greenwood Ave".to_string());
        draft.address.city = Some("Bend".to_string());

        let h = harness(mock);
        h.service.submit(draft, &claims(false)).await.unwrap();
    }

    #[tokio::test]
    async fn estimate_pricing_requires_justified_approved_override() {
        // Quote unavailable: pricing degrades to an estimate, which makes
        // the override guard structural.
        let mut mock = MockCampgroundApi::new();
        expect_pricing(&mut mock, Err(AppError::Upstream("quote down".to_string())));
        mock.expect_create_reservation().times(0);

        let h = harness(mock);
        let result = h.service.submit(draft(), &claims(true)).await;
        match result {
            Err(AppError::OverrideApproval(message)) => {
                assert!(message.contains("justification"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn override_without_approver_is_a_hard_stop() {
        let mut mock = MockCampgroundApi::new();
        expect_pricing(&mut mock, Err(AppError::Upstream("quote down".to_string())));
        mock.expect_create_reservation().times(0);

        let mut draft = draft();
        draft.override_reason = Some("Walk-in, POS offline".to_string());

        let h = harness(mock);
        let result = h.service.submit(draft, &claims(false)).await;
        match result {
            Err(AppError::OverrideApproval(message)) => {
                assert_eq!(message, "Override approval required");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn approved_override_carries_reason_and_approver() {
        let mut mock = MockCampgroundApi::new();
        expect_pricing(&mut mock, Err(AppError::Upstream("quote down".to_string())));
        mock.expect_get_guest().returning(|_| Ok(guest()));
        mock.expect_create_reservation()
            .withf(|payload| {
                payload.override_reason.as_deref() == Some("Walk-in, POS offline")
                    && payload.override_approved_by == Some(STAFF)
                    && payload.total_amount_cents == 15000
            })
            .returning(|_| Ok(created(ReservationStatus::Pending, 0)));

        let mut draft = draft();
        draft.override_reason = Some("Walk-in, POS offline".to_string());

        let h = harness(mock);
        h.service.submit(draft, &claims(true)).await.unwrap();
    }

    #[tokio::test]
    async fn creation_failure_surfaces_message_and_keeps_draft() {
        let mut mock = MockCampgroundApi::new();
        expect_pricing(&mut mock, Ok(quote()));
        mock.expect_get_guest().returning(|_| Ok(guest()));
        mock.expect_create_reservation()
            .returning(|_| Err(AppError::Upstream("Site is no longer available".to_string())));

        let h = harness(mock);
        h.store.save(STAFF, &draft()).await.unwrap();

        let result = h.service.submit(draft(), &claims(false)).await;
        match result {
            Err(AppError::Upstream(message)) => {
                assert_eq!(message, "Site is no longer available");
            }
            other => panic!("unexpected result: {:?}", other),
        }

        assert!(h.store.load(CAMPGROUND, STAFF).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn invalid_draft_is_rejected_with_section_errors() {
        let mut mock = MockCampgroundApi::new();
        mock.expect_create_reservation().times(0);

        let h = harness(mock);
        let result = h
            .service
            .submit(BookingDraft::new(CAMPGROUND), &claims(false))
            .await;
        match result {
            Err(AppError::DraftInvalid(report)) => {
                assert!(report.errors.contains_key("guest"));
                assert!(report.errors.contains_key("site"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn abandoned_payment_cancel_failure_lands_in_dead_letter_log() {
        let mut mock = MockCampgroundApi::new();
        mock.expect_cancel_reservation()
            .returning(|_| Err(AppError::Upstream("cancel timed out".to_string())));

        let h = harness(mock);
        h.service.abandon_card_payment(RESERVATION).await;

        let entries = h.dead_letters.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].reservation_id, Some(RESERVATION));
        assert_eq!(entries[0].kind, "reservation_cancellation_failed");
    }

    #[tokio::test]
    async fn abandoned_payment_cancel_success_records_nothing() {
        let mut mock = MockCampgroundApi::new();
        mock.expect_cancel_reservation().returning(|_| Ok(()));

        let h = harness(mock);
        h.service.abandon_card_payment(RESERVATION).await;

        assert!(h.dead_letters.entries().is_empty());
    }
}
