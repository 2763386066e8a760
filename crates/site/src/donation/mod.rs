//! Donation payment-intake state machine.
//!
//! A donation moves through four states, forward only:
//!
//! ```text
//! CollectingDetails -> CollectingPayment -> Processing -> Settled
//! ```
//!
//! The first transition is gated by donor detail validation, the second by
//! payment instrument validation; settlement is unconditional after a fixed
//! simulated delay (no gateway exists in this design). Validation failures
//! are field-scoped and non-fatal: they block the responsible transition and
//! nothing else. Nothing is persisted; dropping the intake before
//! settlement discards all entered data.
//!
//! The cart total arrives as an opaque amount from the caller; the machine
//! never recomputes it from donation-category metadata.

pub mod validate;

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use doggiedon_core::{Country, Currency, Email};

/// Simulated settlement latency.
pub const SETTLEMENT_DELAY: Duration = Duration::from_secs(2);

/// Intake progression. Transitions only ever move rightward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeState {
    /// Waiting for donor contact and identity details.
    CollectingDetails,
    /// Details accepted; waiting for a payment instrument.
    CollectingPayment,
    /// Instrument accepted; simulated settlement in flight.
    Processing,
    /// Done. Terminal.
    Settled,
}

/// A form field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Email,
    Phone,
    FullName,
    Pan,
    Pincode,
    Amount,
    Country,
    CardNumber,
    Expiry,
    Cvv,
    UpiId,
}

/// A single field-scoped validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// The field that failed.
    pub field: Field,
    /// Donor-facing reason.
    pub reason: &'static str,
}

/// Errors from driving the intake.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// The requested operation is not legal in the current state.
    #[error("operation not valid in the {0:?} state")]
    InvalidTransition(IntakeState),

    /// One or more fields failed validation; the transition is blocked.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),
}

/// Raw donor details as submitted from the first wizard step.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsForm {
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub full_name: String,
    #[serde(default)]
    pub pan: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub pincode: String,
}

/// Validated donor details held by the intake after the first transition.
#[derive(Debug, Clone)]
pub struct DonorDetails {
    pub email: Email,
    pub full_name: String,
    pub phone: Option<String>,
    /// Normalized to uppercase.
    pub pan: Option<String>,
    pub address: Option<String>,
    pub pincode: String,
}

/// A payment instrument as submitted from the second wizard step.
#[derive(Debug, Clone)]
pub enum PaymentMethod {
    /// Card payment; number may contain grouping spaces.
    Card {
        number: String,
        expiry: String,
        cvv: String,
    },
    /// UPI payment by collect-request id.
    Upi { id: String },
}

/// Card brand, inferred from the first digit for display purposes only.
/// Never affects validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Rupay,
    Discover,
}

impl CardBrand {
    /// Infer a brand from the leading digit. A `6` prefix reads as `RuPay`
    /// for Indian donors and Discover elsewhere.
    #[must_use]
    pub fn detect(number: &str, country: Country) -> Option<Self> {
        let first = number.trim_start().chars().next()?;
        match first {
            '4' => Some(Self::Visa),
            '5' => Some(Self::Mastercard),
            '3' => Some(Self::Amex),
            '6' if country == Country::India => Some(Self::Rupay),
            '6' => Some(Self::Discover),
            _ => None,
        }
    }
}

/// The success event emitted when an intake settles; the hosting layer uses
/// it to clear the cart and notify the donor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub amount: Decimal,
    pub currency: Currency,
    pub country: Country,
    pub donor_email: Email,
}

/// One donation moving through the intake wizard.
///
/// Runs entirely within a single donor interaction; there is no shared
/// state and no concurrency concern beyond the settlement delay, which is a
/// plain async sleep. Dropping the future before it elapses cancels the
/// timer and leaves the intake in `Processing` with no side effects.
#[derive(Debug)]
pub struct DonationIntake {
    state: IntakeState,
    amount: Decimal,
    currency: Currency,
    country: Country,
    details: Option<DonorDetails>,
    payment: Option<PaymentMethod>,
}

impl DonationIntake {
    /// Start an intake for the given cart total. The country starts at the
    /// currency's default.
    #[must_use]
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            state: IntakeState::CollectingDetails,
            amount,
            currency,
            country: currency.default_country(),
            details: None,
            payment: None,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> IntakeState {
        self.state
    }

    /// The opaque cart total this intake was opened with.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Selected currency.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Selected country.
    #[must_use]
    pub const fn country(&self) -> Country {
        self.country
    }

    /// Validated donor details, present once past `CollectingDetails`.
    #[must_use]
    pub const fn details(&self) -> Option<&DonorDetails> {
        self.details.as_ref()
    }

    /// Display brand of the submitted card, if a card was submitted.
    #[must_use]
    pub fn card_brand(&self) -> Option<CardBrand> {
        match &self.payment {
            Some(PaymentMethod::Card { number, .. }) => CardBrand::detect(number, self.country),
            _ => None,
        }
    }

    /// Switch currency. When the previously selected country is not in the
    /// new currency's allowed set, the country resets to the new currency's
    /// first allowed value.
    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
        if !currency.allows(self.country) {
            self.country = currency.default_country();
        }
    }

    /// Select a country, which must be allowed for the current currency.
    ///
    /// # Errors
    ///
    /// Returns a field-scoped validation error if the country is outside
    /// the currency's allowed set.
    pub fn set_country(&mut self, country: Country) -> Result<(), IntakeError> {
        if !self.currency.allows(country) {
            return Err(IntakeError::Validation(vec![FieldError {
                field: Field::Country,
                reason: "Country is not available for the selected currency",
            }]));
        }
        self.country = country;
        Ok(())
    }

    /// Transition `CollectingDetails -> CollectingPayment`.
    ///
    /// All failing fields are reported together; optional fields left blank
    /// do not block.
    ///
    /// # Errors
    ///
    /// `IntakeError::InvalidTransition` outside `CollectingDetails`;
    /// `IntakeError::Validation` listing every failing field otherwise.
    pub fn submit_details(&mut self, form: DetailsForm) -> Result<(), IntakeError> {
        if self.state != IntakeState::CollectingDetails {
            return Err(IntakeError::InvalidTransition(self.state));
        }

        let mut errors = Vec::new();

        let email = match Email::parse(&form.email) {
            Ok(email) => Some(email),
            Err(_) => {
                errors.push(FieldError {
                    field: Field::Email,
                    reason: "Please enter a valid email address",
                });
                None
            }
        };

        let phone = normalize_optional(form.phone);
        if let Some(phone) = &phone {
            if !validate::is_valid_phone(phone) {
                errors.push(FieldError {
                    field: Field::Phone,
                    reason: "Please enter a valid 10-digit phone number",
                });
            }
        }

        let full_name = form.full_name.trim().to_owned();
        if full_name.is_empty() {
            errors.push(FieldError {
                field: Field::FullName,
                reason: "Full name is required",
            });
        }

        let pan = normalize_optional(form.pan).map(|pan| pan.to_uppercase());
        if let Some(pan) = &pan {
            if !validate::is_valid_pan(pan) {
                errors.push(FieldError {
                    field: Field::Pan,
                    reason: "Please enter a valid PAN number",
                });
            }
        }

        if !validate::is_valid_pincode(&form.pincode) {
            errors.push(FieldError {
                field: Field::Pincode,
                reason: "Please enter a valid 6-digit pincode",
            });
        }

        if self.amount <= Decimal::ZERO {
            errors.push(FieldError {
                field: Field::Amount,
                reason: "Please enter a valid amount",
            });
        }

        if !errors.is_empty() {
            return Err(IntakeError::Validation(errors));
        }

        // A parse failure pushed an error above, so this branch cannot be
        // taken once the error check has passed.
        let Some(email) = email else {
            return Err(IntakeError::Validation(vec![FieldError {
                field: Field::Email,
                reason: "Please enter a valid email address",
            }]));
        };

        self.details = Some(DonorDetails {
            email,
            full_name,
            phone,
            pan,
            address: normalize_optional(form.address),
            pincode: form.pincode,
        });
        self.state = IntakeState::CollectingPayment;

        Ok(())
    }

    /// Transition `CollectingPayment -> Processing`.
    ///
    /// # Errors
    ///
    /// `IntakeError::InvalidTransition` outside `CollectingPayment`;
    /// `IntakeError::Validation` listing every failing field otherwise.
    pub fn submit_payment(&mut self, method: PaymentMethod) -> Result<(), IntakeError> {
        if self.state != IntakeState::CollectingPayment {
            return Err(IntakeError::InvalidTransition(self.state));
        }

        let mut errors = Vec::new();

        match &method {
            PaymentMethod::Card {
                number,
                expiry,
                cvv,
            } => {
                if !validate::is_valid_card_number(number) {
                    errors.push(FieldError {
                        field: Field::CardNumber,
                        reason: "Invalid card number",
                    });
                }
                if !validate::is_valid_expiry(expiry) {
                    errors.push(FieldError {
                        field: Field::Expiry,
                        reason: "Invalid expiry date",
                    });
                }
                if !validate::is_valid_cvv(cvv) {
                    errors.push(FieldError {
                        field: Field::Cvv,
                        reason: "Invalid CVV",
                    });
                }
            }
            PaymentMethod::Upi { id } => {
                if !validate::is_valid_upi_id(id) {
                    errors.push(FieldError {
                        field: Field::UpiId,
                        reason: "Please enter a valid UPI ID",
                    });
                }
            }
        }

        if !errors.is_empty() {
            return Err(IntakeError::Validation(errors));
        }

        self.payment = Some(method);
        self.state = IntakeState::Processing;

        Ok(())
    }

    /// Transition `Processing -> Settled` after the standard simulated
    /// settlement latency.
    ///
    /// # Errors
    ///
    /// `IntakeError::InvalidTransition` outside `Processing`.
    pub async fn settle(&mut self) -> Result<Settlement, IntakeError> {
        self.settle_after(SETTLEMENT_DELAY).await
    }

    /// Transition `Processing -> Settled` after an explicit delay.
    ///
    /// The state flips only after the sleep completes; dropping the future
    /// mid-delay leaves the intake in `Processing`.
    ///
    /// # Errors
    ///
    /// `IntakeError::InvalidTransition` outside `Processing`.
    pub async fn settle_after(&mut self, delay: Duration) -> Result<Settlement, IntakeError> {
        if self.state != IntakeState::Processing {
            return Err(IntakeError::InvalidTransition(self.state));
        }

        tokio::time::sleep(delay).await;

        let Some(details) = &self.details else {
            // Unreachable: Processing implies details were accepted.
            return Err(IntakeError::InvalidTransition(self.state));
        };

        self.state = IntakeState::Settled;

        Ok(Settlement {
            amount: self.amount,
            currency: self.currency,
            country: self.country,
            donor_email: details.email.clone(),
        })
    }
}

/// Treat blank optional fields as absent.
fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_details() -> DetailsForm {
        DetailsForm {
            email: "donor@example.com".to_owned(),
            phone: Some("9876543210".to_owned()),
            full_name: "Asha Rao".to_owned(),
            pan: Some("abcde1234f".to_owned()),
            address: Some("12 Shelter Lane".to_owned()),
            pincode: "560001".to_owned(),
        }
    }

    fn valid_card() -> PaymentMethod {
        PaymentMethod::Card {
            number: "4539 5787 6362 1486".to_owned(),
            expiry: "12/99".to_owned(),
            cvv: "123".to_owned(),
        }
    }

    fn intake() -> DonationIntake {
        DonationIntake::new(Decimal::from(500), Currency::Inr)
    }

    #[tokio::test]
    async fn test_happy_path_card() {
        let mut intake = intake();
        assert_eq!(intake.state(), IntakeState::CollectingDetails);

        intake.submit_details(valid_details()).unwrap();
        assert_eq!(intake.state(), IntakeState::CollectingPayment);

        intake.submit_payment(valid_card()).unwrap();
        assert_eq!(intake.state(), IntakeState::Processing);
        assert_eq!(intake.card_brand(), Some(CardBrand::Visa));

        let settlement = intake.settle_after(Duration::ZERO).await.unwrap();
        assert_eq!(intake.state(), IntakeState::Settled);
        assert_eq!(settlement.amount, Decimal::from(500));
        assert_eq!(settlement.currency, Currency::Inr);
        assert_eq!(settlement.donor_email.as_str(), "donor@example.com");
    }

    #[tokio::test]
    async fn test_happy_path_upi() {
        let mut intake = intake();
        intake.submit_details(valid_details()).unwrap();
        intake
            .submit_payment(PaymentMethod::Upi {
                id: "asha@okbank".to_owned(),
            })
            .unwrap();

        let settlement = intake.settle_after(Duration::ZERO).await.unwrap();
        assert_eq!(settlement.country, Country::India);
    }

    #[test]
    fn test_details_normalizes_pan_and_blank_optionals() {
        let mut intake = intake();
        let mut form = valid_details();
        form.phone = Some("   ".to_owned());
        form.address = None;
        intake.submit_details(form).unwrap();

        let details = intake.details().unwrap();
        assert_eq!(details.pan.as_deref(), Some("ABCDE1234F"));
        assert_eq!(details.phone, None);
        assert_eq!(details.address, None);
    }

    #[test]
    fn test_details_blocked_by_bad_fields() {
        let mut intake = intake();
        let form = DetailsForm {
            email: "not-an-email".to_owned(),
            phone: Some("12345".to_owned()),
            full_name: "   ".to_owned(),
            pan: Some("BADPAN".to_owned()),
            address: None,
            pincode: "12345".to_owned(),
        };

        let Err(IntakeError::Validation(errors)) = intake.submit_details(form) else {
            panic!("expected validation failure");
        };

        let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                Field::Email,
                Field::Phone,
                Field::FullName,
                Field::Pan,
                Field::Pincode
            ]
        );
        assert_eq!(intake.state(), IntakeState::CollectingDetails);
    }

    #[test]
    fn test_zero_amount_blocks_details() {
        let mut intake = DonationIntake::new(Decimal::ZERO, Currency::Inr);
        let Err(IntakeError::Validation(errors)) = intake.submit_details(valid_details()) else {
            panic!("expected validation failure");
        };
        assert_eq!(errors, vec![FieldError {
            field: Field::Amount,
            reason: "Please enter a valid amount",
        }]);
    }

    #[test]
    fn test_luhn_invalid_card_blocks_payment() {
        let mut intake = intake();
        intake.submit_details(valid_details()).unwrap();

        let result = intake.submit_payment(PaymentMethod::Card {
            number: "4539578763621487".to_owned(),
            expiry: "12/99".to_owned(),
            cvv: "123".to_owned(),
        });

        let Err(IntakeError::Validation(errors)) = result else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.first().unwrap().field, Field::CardNumber);
        assert_eq!(intake.state(), IntakeState::CollectingPayment);
    }

    #[test]
    fn test_bad_upi_id_blocks_payment() {
        let mut intake = intake();
        intake.submit_details(valid_details()).unwrap();

        let result = intake.submit_payment(PaymentMethod::Upi {
            id: "not-a-upi".to_owned(),
        });
        assert!(matches!(result, Err(IntakeError::Validation(_))));
    }

    #[test]
    fn test_no_state_skipping() {
        // Payment before details
        let mut intake = intake();
        assert!(matches!(
            intake.submit_payment(valid_card()),
            Err(IntakeError::InvalidTransition(IntakeState::CollectingDetails))
        ));

        // Details twice (no backwards transition)
        intake.submit_details(valid_details()).unwrap();
        assert!(matches!(
            intake.submit_details(valid_details()),
            Err(IntakeError::InvalidTransition(IntakeState::CollectingPayment))
        ));
    }

    #[tokio::test]
    async fn test_settle_requires_processing() {
        let mut intake = intake();
        assert!(matches!(
            intake.settle_after(Duration::ZERO).await,
            Err(IntakeError::InvalidTransition(IntakeState::CollectingDetails))
        ));
    }

    #[tokio::test]
    async fn test_settled_is_terminal() {
        let mut intake = intake();
        intake.submit_details(valid_details()).unwrap();
        intake.submit_payment(valid_card()).unwrap();
        intake.settle_after(Duration::ZERO).await.unwrap();

        assert!(matches!(
            intake.settle_after(Duration::ZERO).await,
            Err(IntakeError::InvalidTransition(IntakeState::Settled))
        ));
    }

    #[tokio::test]
    async fn test_dropped_settlement_future_leaves_processing() {
        let mut intake = intake();
        intake.submit_details(valid_details()).unwrap();
        intake.submit_payment(valid_card()).unwrap();

        {
            let fut = intake.settle_after(Duration::from_secs(60));
            drop(fut);
        }
        assert_eq!(intake.state(), IntakeState::Processing);
    }

    #[test]
    fn test_currency_change_resets_disallowed_country() {
        let mut intake = intake();
        assert_eq!(intake.country(), Country::India);

        intake.set_currency(Currency::Eur);
        assert_eq!(intake.country(), Country::Germany);

        intake.set_country(Country::Spain).unwrap();
        intake.set_currency(Currency::Usd);
        assert_eq!(intake.country(), Country::UnitedStates);
    }

    #[test]
    fn test_currency_change_keeps_allowed_country() {
        let mut intake = DonationIntake::new(Decimal::from(50), Currency::Usd);
        intake.set_country(Country::Canada).unwrap();

        // Canada stays allowed under USD; re-selecting USD must not reset it
        intake.set_currency(Currency::Usd);
        assert_eq!(intake.country(), Country::Canada);
    }

    #[test]
    fn test_set_country_outside_allowed_set() {
        let mut intake = intake();
        let result = intake.set_country(Country::Germany);
        assert!(matches!(result, Err(IntakeError::Validation(_))));
        assert_eq!(intake.country(), Country::India);
    }

    #[test]
    fn test_card_brand_detection() {
        assert_eq!(
            CardBrand::detect("4111", Country::India),
            Some(CardBrand::Visa)
        );
        assert_eq!(
            CardBrand::detect("5500", Country::India),
            Some(CardBrand::Mastercard)
        );
        assert_eq!(
            CardBrand::detect("3400", Country::India),
            Some(CardBrand::Amex)
        );
        assert_eq!(
            CardBrand::detect("6011", Country::India),
            Some(CardBrand::Rupay)
        );
        assert_eq!(
            CardBrand::detect("6011", Country::UnitedStates),
            Some(CardBrand::Discover)
        );
        assert_eq!(CardBrand::detect("9999", Country::India), None);
        assert_eq!(CardBrand::detect("", Country::India), None);
    }
}
