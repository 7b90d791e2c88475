use serde::{Deserialize, Serialize};

/// Display currencies supported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "INR")]
    Inr,
    #[serde(rename = "GBP")]
    Gbp,
    #[serde(rename = "JPY")]
    Jpy,
    #[serde(rename = "CAD")]
    Cad,
}

impl Currency {
    /// All supported currencies, in the order the settings dropdown
    /// presents them.
    pub const ALL: [Currency; 6] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Inr,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Cad,
    ];

    /// The three-letter wire code (e.g. "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Inr => "INR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Cad => "CAD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Inr => "₹",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
            Currency::Cad => "C$",
        }
    }

    /// Human label shown in the settings dropdown.
    pub fn display_name(&self) -> &'static str {
        match self {
            Currency::Usd => "US Dollar ($)",
            Currency::Eur => "Euro (€)",
            Currency::Inr => "Indian Rupee (₹)",
            Currency::Gbp => "British Pound (£)",
            Currency::Jpy => "Japanese Yen (¥)",
            Currency::Cad => "Canadian Dollar (C$)",
        }
    }

    /// Parse a wire code. Matching is exact — the backend only ever
    /// stores the six uppercase codes.
    pub fn from_code(code: &str) -> Option<Currency> {
        Currency::ALL.iter().copied().find(|c| c.code() == code)
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Usd
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Symbol for a raw currency code. Total: unknown codes fall back to `$`.
pub fn symbol_for(code: &str) -> &'static str {
    Currency::from_code(code).map_or("$", |c| c.symbol())
}

/// Anything [`format_amount`] accepts as an amount. Numbers and numeric
/// strings coerce to the same value; an unparsable string coerces to 0.0
/// so formatting stays a total function.
pub trait IntoAmount {
    fn into_amount(self) -> f64;
}

impl IntoAmount for f64 {
    fn into_amount(self) -> f64 {
        self
    }
}

impl IntoAmount for &str {
    fn into_amount(self) -> f64 {
        self.trim().parse().unwrap_or(0.0)
    }
}

impl IntoAmount for &String {
    fn into_amount(self) -> f64 {
        self.as_str().into_amount()
    }
}

/// Render an amount as `symbol` + value fixed to two decimals, e.g.
/// `format_amount(12.5, "INR")` → `"₹12.50"`. No thousands separators.
pub fn format_amount<A: IntoAmount>(amount: A, code: &str) -> String {
    format!("{}{:.2}", symbol_for(code), amount.into_amount())
}
