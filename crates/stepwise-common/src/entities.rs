//! Core entity types shared by the solver, the store and the web layer.
//! `SolutionRecord` mirrors the persisted `solutions` table.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StepwiseError;

/// Canonical, numeric problem inputs keyed by parameter name.
pub type InputMap = BTreeMap<String, f64>;

// ---------------------------------------------------------------------------
// Problem type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ProblemType {
    Pythagorean,
    CompoundInterest,
}

impl ProblemType {
    pub const ALL: [ProblemType; 2] = [ProblemType::Pythagorean, ProblemType::CompoundInterest];

    /// Wire name, as accepted by the API and stored in the DB.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemType::Pythagorean      => "pythagorean",
            ProblemType::CompoundInterest => "compoundInterest",
        }
    }

    /// Human-readable label for the history list.
    pub fn label(&self) -> &'static str {
        match self {
            ProblemType::Pythagorean      => "Pythagorean Theorem",
            ProblemType::CompoundInterest => "Compound Interest Rate",
        }
    }

    /// File name of the HTML template that explains this problem.
    pub fn template_name(&self) -> &'static str {
        match self {
            ProblemType::Pythagorean      => "pythagorean.html",
            ProblemType::CompoundInterest => "compound_interest.html",
        }
    }

    /// Canonical input keys this problem requires.
    pub fn required_keys(&self) -> &'static [&'static str] {
        match self {
            ProblemType::Pythagorean      => &["a", "b"],
            ProblemType::CompoundInterest => &["principal", "amount", "time"],
        }
    }
}

impl FromStr for ProblemType {
    type Err = StepwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pythagorean"      => Ok(ProblemType::Pythagorean),
            "compoundInterest" => Ok(ProblemType::CompoundInterest),
            other              => Err(StepwiseError::UnknownProblemType(other.to_string())),
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Solution record
// ---------------------------------------------------------------------------

/// A solved problem. Immutable once created; never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SolutionRecord {
    pub id: Uuid,
    pub problem_type: ProblemType,
    pub inputs: InputMap,
    pub solution_html: String,
    pub created_at: DateTime<Utc>,
}

impl SolutionRecord {
    pub fn new(problem_type: ProblemType, inputs: InputMap, solution_html: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            problem_type,
            inputs,
            solution_html,
            created_at: Utc::now(),
        }
    }
}
