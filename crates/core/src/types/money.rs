//! Currency and country types for donation intake.
//!
//! A donation is denominated in one of three currencies, and each currency
//! restricts which countries can be selected alongside it. The allowed
//! country lists are ordered; the first entry is the default used when a
//! currency change makes the previously selected country invalid.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Donation currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Indian Rupee.
    #[default]
    Inr,
    /// US Dollar.
    Usd,
    /// Euro.
    Eur,
}

/// Donor country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    India,
    #[serde(rename = "United States")]
    UnitedStates,
    Canada,
    Germany,
    France,
    Italy,
    Spain,
}

impl Currency {
    /// Display symbol shown next to amounts.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Inr => "\u{20b9}",
            Self::Usd => "$",
            Self::Eur => "\u{20ac}",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Inr => "INR",
            Self::Usd => "USD",
            Self::Eur => "EUR",
        }
    }

    /// Countries selectable for this currency, in display order.
    #[must_use]
    pub const fn allowed_countries(self) -> &'static [Country] {
        match self {
            Self::Inr => &[Country::India],
            Self::Usd => &[Country::UnitedStates, Country::Canada],
            Self::Eur => &[
                Country::Germany,
                Country::France,
                Country::Italy,
                Country::Spain,
            ],
        }
    }

    /// The default country for this currency (first allowed entry).
    #[must_use]
    pub const fn default_country(self) -> Country {
        match self {
            Self::Inr => Country::India,
            Self::Usd => Country::UnitedStates,
            Self::Eur => Country::Germany,
        }
    }

    /// Whether `country` may be selected together with this currency.
    #[must_use]
    pub fn allows(self, country: Country) -> bool {
        self.allowed_countries().contains(&country)
    }
}

impl Country {
    /// Human-readable country name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::India => "India",
            Self::UnitedStates => "United States",
            Self::Canada => "Canada",
            Self::Germany => "Germany",
            Self::France => "France",
            Self::Italy => "Italy",
            Self::Spain => "Spain",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_inr_allows_only_india() {
        assert!(Currency::Inr.allows(Country::India));
        assert!(!Currency::Inr.allows(Country::UnitedStates));
        assert!(!Currency::Inr.allows(Country::Germany));
    }

    #[test]
    fn test_usd_allows_us_and_canada() {
        assert!(Currency::Usd.allows(Country::UnitedStates));
        assert!(Currency::Usd.allows(Country::Canada));
        assert!(!Currency::Usd.allows(Country::India));
    }

    #[test]
    fn test_eur_allows_four_countries() {
        for country in [
            Country::Germany,
            Country::France,
            Country::Italy,
            Country::Spain,
        ] {
            assert!(Currency::Eur.allows(country));
        }
        assert!(!Currency::Eur.allows(Country::Canada));
    }

    #[test]
    fn test_default_country_is_first_allowed() {
        for currency in [Currency::Inr, Currency::Usd, Currency::Eur] {
            assert_eq!(
                currency.default_country(),
                *currency.allowed_countries().first().unwrap()
            );
        }
    }

    #[test]
    fn test_serde_codes() {
        assert_eq!(serde_json::to_string(&Currency::Inr).unwrap(), "\"INR\"");
        assert_eq!(
            serde_json::to_string(&Country::UnitedStates).unwrap(),
            "\"United States\""
        );
        let c: Currency = serde_json::from_str("\"EUR\"").unwrap();
        assert_eq!(c, Currency::Eur);
    }
}
