//! stepwise-solver: closed-form evaluators and step-by-step HTML rendering.
//!
//! A submission flows through three stages:
//!   - `inputs`    raw JSON inputs → typed, validated [`Problem`]
//!   - `evaluator` [`Problem`] → [`Solution`] with every intermediate value
//!   - `renderer`  [`Solution`] → HTML explanation from a static template

pub mod inputs;
pub mod evaluator;
pub mod format;
pub mod renderer;
pub mod solver;

pub use inputs::{Problem, RawInputs, PythagoreanInputs, CompoundInterestInputs};
pub use evaluator::{evaluate, Solution, PythagoreanSolution, CompoundInterestSolution};
pub use renderer::TemplateRenderer;
pub use solver::{Solver, SolvedProblem};
