//! Closed-form evaluators.
//!
//! Both formulas are pure and deterministic. Every intermediate value the
//! explanation shows is kept on the solution so the renderer never
//! recomputes anything.

use stepwise_common::{ProblemType, Result, StepwiseError};

use crate::format::{fixed, round2};
use crate::inputs::{CompoundInterestInputs, Problem, PythagoreanInputs};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PythagoreanSolution {
    pub a: f64,
    pub b: f64,
    pub a_squared: f64,
    pub b_squared: f64,
    pub c_squared: f64,
    /// Hypotenuse, rounded to 2 decimals.
    pub c: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompoundInterestSolution {
    pub principal: f64,
    pub amount: f64,
    pub time: f64,
    /// A / P
    pub ratio: f64,
    /// 1 / t
    pub time_inverse: f64,
    /// (A / P)^(1/t)
    pub rate_factor: f64,
    /// rate_factor - 1
    pub rate_decimal: f64,
    /// Annual rate in percent, rounded to 2 decimals.
    pub rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Solution {
    Pythagorean(PythagoreanSolution),
    CompoundInterest(CompoundInterestSolution),
}

impl Solution {
    pub fn problem_type(&self) -> ProblemType {
        match self {
            Solution::Pythagorean(_)      => ProblemType::Pythagorean,
            Solution::CompoundInterest(_) => ProblemType::CompoundInterest,
        }
    }

    /// Final answer with 2 decimals, without units.
    pub fn answer(&self) -> String {
        match self {
            Solution::Pythagorean(s)      => fixed(s.c, 2),
            Solution::CompoundInterest(s) => fixed(s.rate, 2),
        }
    }
}

pub fn evaluate(problem: &Problem) -> Result<Solution> {
    match problem {
        Problem::Pythagorean(p)      => pythagorean(p).map(Solution::Pythagorean),
        Problem::CompoundInterest(c) => compound_interest(c).map(Solution::CompoundInterest),
    }
}

/// c = sqrt(a² + b²)
pub fn pythagorean(inputs: &PythagoreanInputs) -> Result<PythagoreanSolution> {
    let PythagoreanInputs { a, b } = *inputs;
    if !is_positive(a) || !is_positive(b) {
        return Err(StepwiseError::InvalidInput(
            "Invalid inputs for Pythagorean theorem. Sides must be positive numbers.".to_string(),
        ));
    }

    let a_squared = a * a;
    let b_squared = b * b;
    let c_squared = a_squared + b_squared;
    ensure_finite(c_squared)?;

    Ok(PythagoreanSolution {
        a,
        b,
        a_squared,
        b_squared,
        c_squared,
        c: round2(c_squared.sqrt()),
    })
}

/// r = 100 · ((A / P)^(1/t) − 1)
pub fn compound_interest(inputs: &CompoundInterestInputs) -> Result<CompoundInterestSolution> {
    let CompoundInterestInputs { principal, amount, time } = *inputs;
    if !is_positive(principal) || !is_positive(amount) || !is_positive(time) {
        return Err(StepwiseError::InvalidInput(
            "Invalid inputs for compound interest. All values must be positive numbers.".to_string(),
        ));
    }

    let ratio = amount / principal;
    let time_inverse = 1.0 / time;
    let rate_factor = ratio.powf(time_inverse);
    ensure_finite(ratio)?;
    ensure_finite(rate_factor)?;
    let rate_decimal = rate_factor - 1.0;
    let rate = round2(100.0 * rate_decimal);
    ensure_finite(rate)?;

    Ok(CompoundInterestSolution {
        principal,
        amount,
        time,
        ratio,
        time_inverse,
        rate_factor,
        rate_decimal,
        rate,
    })
}

// NaN fails the comparison as well.
fn is_positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

fn ensure_finite(x: f64) -> Result<()> {
    if x.is_finite() {
        Ok(())
    } else {
        Err(StepwiseError::InvalidInput("inputs are too large to evaluate".to_string()))
    }
}
