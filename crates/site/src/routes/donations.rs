//! Donation submission route handler.
//!
//! The donation wizard runs client-side, but the authoritative intake state
//! machine runs here: a submission is replayed through
//! details -> payment -> settlement, so nothing that fails validation can
//! settle regardless of what the client rendered.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use doggiedon_core::{Country, Currency};

use crate::donation::{
    CardBrand, DetailsForm, DonationIntake, PaymentMethod, SETTLEMENT_DELAY, Settlement,
};
use crate::error::Result;
use crate::state::AppState;

/// Donation submission body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequest {
    /// Cart total, taken as-is; the server does not recompute it.
    pub amount: Decimal,
    pub currency: Currency,
    /// Optional; defaults to the currency's first allowed country.
    #[serde(default)]
    pub country: Option<Country>,
    pub details: DetailsForm,
    pub payment: PaymentRequest,
}

/// Payment instrument wire form, tagged by method.
#[derive(Debug, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum PaymentRequest {
    Card {
        card_number: String,
        expiry: String,
        cvv: String,
    },
    Upi {
        upi_id: String,
    },
}

/// Settlement response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationResponse {
    pub status: &'static str,
    pub card_brand: Option<CardBrand>,
    #[serde(flatten)]
    pub settlement: Settlement,
}

impl From<PaymentRequest> for PaymentMethod {
    fn from(req: PaymentRequest) -> Self {
        match req {
            PaymentRequest::Card {
                card_number,
                expiry,
                cvv,
            } => Self::Card {
                number: card_number,
                expiry,
                cvv,
            },
            PaymentRequest::Upi { upi_id } => Self::Upi { id: upi_id },
        }
    }
}

/// `POST /api/donations`
///
/// Runs the full intake. Validation failures answer 400 with the failing
/// fields; success waits out the simulated settlement latency and returns
/// the settlement receipt.
pub async fn submit(
    State(_state): State<AppState>,
    Json(req): Json<DonationRequest>,
) -> Result<Json<DonationResponse>> {
    let mut intake = DonationIntake::new(req.amount, req.currency);
    if let Some(country) = req.country {
        intake.set_country(country)?;
    }

    intake.submit_details(req.details)?;
    intake.submit_payment(req.payment.into())?;

    let card_brand = intake.card_brand();
    let settlement = intake.settle_after(SETTLEMENT_DELAY).await?;

    tracing::info!(
        amount = %settlement.amount,
        currency = %settlement.currency,
        "donation settled"
    );

    Ok(Json(DonationResponse {
        status: "settled",
        card_brand,
        settlement,
    }))
}
