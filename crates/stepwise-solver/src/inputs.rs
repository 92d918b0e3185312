//! Extraction of typed problem inputs from the raw request map.
//!
//! Values may be JSON numbers or numeric strings (HTML forms submit strings).
//! Range checks (`> 0`) belong to the evaluator; this layer only decides
//! whether a parameter is present and numeric.

use serde_json::{Map, Value};
use stepwise_common::{InputMap, ProblemType, Result, StepwiseError};

/// Inputs exactly as posted by the client.
pub type RawInputs = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PythagoreanInputs {
    pub a: f64,
    pub b: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompoundInterestInputs {
    pub principal: f64,
    pub amount: f64,
    pub time: f64,
}

/// A problem whose parameters are all present and numeric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Problem {
    Pythagorean(PythagoreanInputs),
    CompoundInterest(CompoundInterestInputs),
}

/// Alternative spellings accepted for a canonical key.
fn aliases(canonical: &str) -> &'static [&'static str] {
    match canonical {
        "principal" => &["p"],
        "amount"    => &["A"],
        "time"      => &["t"],
        _           => &[],
    }
}

impl Problem {
    /// Reads the keys `problem_type.required_keys()` names, in that order.
    pub fn from_raw(problem_type: ProblemType, raw: &RawInputs) -> Result<Self> {
        let values = problem_type
            .required_keys()
            .iter()
            .map(|key| require(raw, key))
            .collect::<Result<Vec<f64>>>()?;

        match (problem_type, values.as_slice()) {
            (ProblemType::Pythagorean, &[a, b]) => {
                Ok(Problem::Pythagorean(PythagoreanInputs { a, b }))
            }
            (ProblemType::CompoundInterest, &[principal, amount, time]) => {
                Ok(Problem::CompoundInterest(CompoundInterestInputs { principal, amount, time }))
            }
            _ => Err(StepwiseError::InvalidInput(format!(
                "unexpected parameters for {}",
                problem_type
            ))),
        }
    }

    pub fn problem_type(&self) -> ProblemType {
        match self {
            Problem::Pythagorean(_)      => ProblemType::Pythagorean,
            Problem::CompoundInterest(_) => ProblemType::CompoundInterest,
        }
    }

    /// Values in `required_keys()` order.
    fn values(&self) -> Vec<f64> {
        match self {
            Problem::Pythagorean(p)      => vec![p.a, p.b],
            Problem::CompoundInterest(c) => vec![c.principal, c.amount, c.time],
        }
    }

    /// Inputs under their canonical keys, as persisted.
    pub fn inputs(&self) -> InputMap {
        self.problem_type()
            .required_keys()
            .iter()
            .zip(self.values())
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }
}

fn require(raw: &RawInputs, canonical: &str) -> Result<f64> {
    let value = std::iter::once(canonical)
        .chain(aliases(canonical).iter().copied())
        .find_map(|k| raw.get(k))
        .ok_or_else(|| StepwiseError::InvalidInput(format!("missing value for '{}'", canonical)))?;

    numeric(value).ok_or_else(|| {
        StepwiseError::InvalidInput(format!("'{}' must be a number, got {}", canonical, value))
    })
}

/// Interpret a JSON value as a finite number.
pub fn numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(v: Value) -> RawInputs {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn test_pythagorean_from_numbers_and_strings() {
        let p = Problem::from_raw(ProblemType::Pythagorean, &raw(json!({"a": 3, "b": "4"}))).unwrap();
        assert_eq!(p, Problem::Pythagorean(PythagoreanInputs { a: 3.0, b: 4.0 }));
    }

    #[test]
    fn test_compound_interest_accepts_short_keys() {
        // the browser form posts p / amount / t
        let p = Problem::from_raw(
            ProblemType::CompoundInterest,
            &raw(json!({"p": 5000, "amount": 6050, "t": 2})),
        )
        .unwrap();
        let inputs = p.inputs();
        assert_eq!(inputs["principal"], 5000.0);
        assert_eq!(inputs["amount"], 6050.0);
        assert_eq!(inputs["time"], 2.0);
        assert_eq!(inputs.len(), 3);
    }

    #[test]
    fn test_canonical_key_wins_over_alias() {
        let p = Problem::from_raw(
            ProblemType::CompoundInterest,
            &raw(json!({"principal": 100, "p": 999, "amount": 200, "time": 1})),
        )
        .unwrap();
        assert_eq!(p.inputs()["principal"], 100.0);
    }

    #[test]
    fn test_missing_and_non_numeric_rejected() {
        let missing = Problem::from_raw(ProblemType::Pythagorean, &raw(json!({"a": 3})));
        assert!(matches!(missing, Err(StepwiseError::InvalidInput(_))));

        for bad in [json!(null), json!("abc"), json!(true), json!([1]), json!("")] {
            let r = Problem::from_raw(ProblemType::Pythagorean, &raw(json!({"a": 3, "b": bad})));
            assert!(matches!(r, Err(StepwiseError::InvalidInput(_))), "accepted {:?}", r);
        }
    }

    #[test]
    fn test_persisted_keys_are_the_required_keys() {
        let problems = [
            Problem::Pythagorean(PythagoreanInputs { a: 3.0, b: 4.0 }),
            Problem::CompoundInterest(CompoundInterestInputs { principal: 1.0, amount: 2.0, time: 3.0 }),
        ];
        for problem in problems {
            let keys: Vec<String> = problem.inputs().into_keys().collect();
            let mut expected: Vec<&str> = problem.problem_type().required_keys().to_vec();
            expected.sort_unstable();
            assert_eq!(keys, expected);
            let stored = raw(serde_json::to_value(problem.inputs()).unwrap());
            assert_eq!(Problem::from_raw(problem.problem_type(), &stored).unwrap(), problem);
        }
    }

    #[test]
    fn test_non_finite_strings_rejected() {
        assert_eq!(numeric(&json!("NaN")), None);
        assert_eq!(numeric(&json!("inf")), None);
        assert_eq!(numeric(&json!(" 2.5 ")), Some(2.5));
    }
}
