use crate::error::DomainError;
use crate::models::{LinearDemand, LinearSupply, MarketPolicy, PolicyMode};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Equilibrium {
    pub p: f64,
    pub q: f64,
}

/// Solves Qd(P) = Qs(producer_price(P)) for the consumer price P.
///
/// With a − bP = c + d·(P ∓ t) this gives
/// - none: P = (a − c) / (b + d)
/// - tax: P = (a − c + d·t) / (b + d)
/// - subsidy: P = (a − c − d·t) / (b + d)
///
/// and Q = a − bP. The task family only admits equilibria with P > 0 and Q > 0.
pub fn compute_equilibrium(
    demand: &LinearDemand,
    supply: &LinearSupply,
    policy: &MarketPolicy,
) -> Result<Equilibrium, DomainError> {
    let (a, b) = (demand.a(), demand.b());
    let (c, d) = (supply.c(), supply.d());
    let t = policy.t();

    let p = match policy.mode() {
        PolicyMode::None => (a - c) / (b + d),
        PolicyMode::Tax => (a - c + d * t) / (b + d),
        PolicyMode::Subsidy => (a - c - d * t) / (b + d),
    };
    let q = demand.quantity(p);

    if !(p > 0.0 && q > 0.0) {
        return Err(DomainError::NoEquilibrium(
            "Equilibrium must satisfy P*>0 and Q*>0 for this task family.".into(),
        ));
    }

    Ok(Equilibrium { p, q })
}
