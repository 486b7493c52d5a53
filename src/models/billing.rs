//! Subscription plans and balance top-ups
//!
//! No payment is processed here; these types only compute what the billing
//! screens display and validate the top-up form.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Billing period toggle on the subscription page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    /// Pay every month
    #[default]
    Monthly,
    /// Pay for twelve months at a 20% discount
    Yearly,
}

impl BillingPeriod {
    /// Switch to the other period
    pub const fn toggle(self) -> Self {
        match self {
            Self::Monthly => Self::Yearly,
            Self::Yearly => Self::Monthly,
        }
    }
}

/// A subscription plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Plan key
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Monthly price in roubles
    pub monthly_price: u32,
    /// Who the plan is for
    pub description: &'static str,
    /// Feature bullet points
    pub features: &'static [&'static str],
    /// Highlighted as the most popular plan
    pub popular: bool,
}

impl Plan {
    /// Price for the given period
    pub fn price(&self, period: BillingPeriod) -> u32 {
        match period {
            BillingPeriod::Monthly => self.monthly_price,
            BillingPeriod::Yearly => {
                let yearly = f64::from(self.monthly_price) * 0.8 * 12.0;
                yearly.round() as u32
            }
        }
    }

    /// Free plans have no price
    pub const fn is_free(&self) -> bool {
        self.monthly_price == 0
    }
}

/// All plans, cheapest first
pub const PLANS: &[Plan] = &[
    Plan {
        id: "free",
        name: "Free",
        monthly_price: 0,
        description: "Try the platform",
        features: &["10 generations a day", "Basic models", "Watermark", "Standard speed"],
        popular: false,
    },
    Plan {
        id: "starter",
        name: "Starter",
        monthly_price: 490,
        description: "For personal use",
        features: &[
            "100 generations a day",
            "All models",
            "No watermark",
            "Priority queue",
            "Generation history",
        ],
        popular: false,
    },
    Plan {
        id: "pro",
        name: "Pro",
        monthly_price: 990,
        description: "For professionals",
        features: &[
            "500 generations a day",
            "All models including Premium",
            "No watermark",
            "Top priority",
            "API access",
            "AI assistants",
            "Priority support",
        ],
        popular: true,
    },
    Plan {
        id: "business",
        name: "Business",
        monthly_price: 2990,
        description: "For teams and companies",
        features: &[
            "Unlimited generations",
            "All Premium features",
            "Team access (up to 10 people)",
            "Dedicated server",
            "Personal manager",
            "99.9% SLA",
            "Custom integrations",
        ],
        popular: false,
    },
];

/// Payment method for a top-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Bank card
    #[default]
    Card,
    /// Faster Payments System
    Sbp,
    /// `YooMoney` wallet
    YooMoney,
}

impl PaymentMethod {
    /// Get the display label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Card => "Bank card",
            Self::Sbp => "SBP",
            Self::YooMoney => "YooMoney",
        }
    }
}

/// Preset amounts and the gems they buy (bonus included)
pub const TOP_UP_PRESETS: &[(u32, u32)] = &[(100, 100), (500, 550), (1000, 1150), (5000, 6000)];

/// A validated top-up request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopUp {
    /// Amount charged
    pub amount: u32,
    /// Gems credited
    pub gems: u32,
    /// How it is paid
    pub method: PaymentMethod,
}

impl TopUp {
    /// Top up by preset number (0-based), with the preset's bonus gems
    pub fn preset(index: usize, method: PaymentMethod) -> Result<Self> {
        let &(amount, gems) = TOP_UP_PRESETS
            .get(index)
            .ok_or_else(|| Error::validation(format!("no top-up preset #{}", index + 1)))?;
        Ok(Self { amount, gems, method })
    }

    /// Parse a custom amount typed by the user; custom amounts buy one gem per unit
    pub fn custom(input: &str, method: PaymentMethod) -> Result<Self> {
        let amount: u32 = input
            .trim()
            .parse()
            .map_err(|_| Error::validation(format!("not a valid amount: '{}'", input.trim())))?;
        if amount == 0 {
            return Err(Error::validation("amount must be positive"));
        }
        Ok(Self {
            amount,
            gems: amount,
            method,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yearly_price() {
        let pro = PLANS.iter().find(|p| p.id == "pro").unwrap();
        assert_eq!(pro.price(BillingPeriod::Monthly), 990);
        assert_eq!(pro.price(BillingPeriod::Yearly), 9504);
        assert_eq!(PLANS[0].price(BillingPeriod::Yearly), 0);
        assert!(PLANS[0].is_free());
    }

    #[test]
    fn test_preset_bonus() {
        assert_eq!(TopUp::preset(2, PaymentMethod::Card).unwrap().gems, 1150);
        assert_eq!(TopUp::preset(0, PaymentMethod::Card).unwrap().gems, 100);
        assert!(TopUp::preset(4, PaymentMethod::Card).is_err());
    }

    #[test]
    fn test_custom_amount_has_no_bonus() {
        let top_up = TopUp::custom("500", PaymentMethod::Sbp).unwrap();
        assert_eq!((top_up.amount, top_up.gems), (500, 500));
        assert_eq!(TopUp::custom("777", PaymentMethod::Sbp).unwrap().gems, 777);
    }

    #[test]
    fn test_custom_amount_validation() {
        assert!(TopUp::custom("0", PaymentMethod::Card).is_err());
        assert!(TopUp::custom("abc", PaymentMethod::Card).is_err());
        assert_eq!(TopUp::custom(" 250 ", PaymentMethod::YooMoney).unwrap().amount, 250);
    }
}
