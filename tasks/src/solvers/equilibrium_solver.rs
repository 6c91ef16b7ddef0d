use crate::equilibrium::compute_equilibrium;
use crate::error::DomainError;
use crate::models::{LinearDemand, LinearSupply, MarketPolicy, PolicyMode};
use judge::traits::oracle::OracleError;
use util::task_spec::{NumericResult, Params, param_f64, param_str};

fn number(params: &Params, name: &str) -> Result<f64, DomainError> {
    param_f64(params, name).ok_or_else(|| {
        DomainError::InvalidParameter(format!("Parameter '{name}' must be a number."))
    })
}

/// Oracle for `equilibrium_linear_v1`.
///
/// Reads `a`, `b`, `c`, `d`, `mode` and an optional `t` (default 0, ignored when
/// `mode = "none"`) and returns `p_eq`, `q_eq`.
pub fn solve_equilibrium_linear(params: &Params) -> Result<NumericResult, OracleError> {
    let demand = LinearDemand::new(number(params, "a")?, number(params, "b")?)?;
    let supply = LinearSupply::new(number(params, "c")?, number(params, "d")?)?;

    let mode: PolicyMode = param_str(params, "mode")
        .ok_or_else(|| DomainError::InvalidParameter("Parameter 'mode' must be a string.".into()))?
        .parse()?;
    let t = match (mode, params.get("t")) {
        (PolicyMode::None, _) | (_, None) => 0.0,
        (_, Some(_)) => number(params, "t")?,
    };
    let policy = MarketPolicy::new(mode, t)?;

    let eq = compute_equilibrium(&demand, &supply, &policy)?;

    let mut result = NumericResult::new();
    result.insert("p_eq", eq.p);
    result.insert("q_eq", eq.q);
    Ok(result)
}
