//! Linear market models.
//!
//! Constructors validate their parameters, so a value of any of these types is always
//! economically meaningful.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Qd(P) = a − bP, with a > 0 and b > 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearDemand {
    a: f64,
    b: f64,
}

impl LinearDemand {
    pub fn new(a: f64, b: f64) -> Result<Self, DomainError> {
        if !(a > 0.0) {
            return Err(DomainError::InvalidParameter(
                "Demand parameter 'a' must be > 0.".into(),
            ));
        }
        if !(b > 0.0) {
            return Err(DomainError::InvalidParameter(
                "Demand parameter 'b' must be > 0.".into(),
            ));
        }
        Ok(Self { a, b })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn quantity(&self, price: f64) -> f64 {
        self.a - self.b * price
    }
}

/// Qs(P) = c + dP, with d > 0. `c` may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearSupply {
    c: f64,
    d: f64,
}

impl LinearSupply {
    pub fn new(c: f64, d: f64) -> Result<Self, DomainError> {
        if !c.is_finite() {
            return Err(DomainError::InvalidParameter(
                "Supply parameter 'c' must be finite.".into(),
            ));
        }
        if !(d > 0.0) {
            return Err(DomainError::InvalidParameter(
                "Supply parameter 'd' must be > 0.".into(),
            ));
        }
        Ok(Self { c, d })
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    pub fn d(&self) -> f64 {
        self.d
    }

    pub fn quantity(&self, price: f64) -> f64 {
        self.c + self.d * price
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyMode {
    None,
    Tax,
    Subsidy,
}

impl FromStr for PolicyMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(PolicyMode::None),
            "tax" => Ok(PolicyMode::Tax),
            "subsidy" => Ok(PolicyMode::Subsidy),
            _ => Err(DomainError::InvalidParameter(
                "Policy mode must be 'none', 'tax', or 'subsidy'.".into(),
            )),
        }
    }
}

impl fmt::Display for PolicyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PolicyMode::None => "none",
            PolicyMode::Tax => "tax",
            PolicyMode::Subsidy => "subsidy",
        };
        f.write_str(s)
    }
}

/// A per-unit wedge `t` between the price consumers pay and the price producers receive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketPolicy {
    mode: PolicyMode,
    t: f64,
}

impl MarketPolicy {
    /// `t` must be non-negative, and exactly zero when `mode` is [`PolicyMode::None`].
    pub fn new(mode: PolicyMode, t: f64) -> Result<Self, DomainError> {
        if !(t >= 0.0) || !t.is_finite() {
            return Err(DomainError::InvalidParameter(
                "Policy parameter 't' must be >= 0.".into(),
            ));
        }
        if mode == PolicyMode::None && t != 0.0 {
            return Err(DomainError::InvalidParameter(
                "For mode='none', parameter 't' must be 0.".into(),
            ));
        }
        Ok(Self { mode, t })
    }

    pub fn none() -> Self {
        Self {
            mode: PolicyMode::None,
            t: 0.0,
        }
    }

    pub fn mode(&self) -> PolicyMode {
        self.mode
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn producer_price(&self, consumer_price: f64) -> f64 {
        match self.mode {
            PolicyMode::None => consumer_price,
            PolicyMode::Tax => consumer_price - self.t,
            PolicyMode::Subsidy => consumer_price + self.t,
        }
    }
}
