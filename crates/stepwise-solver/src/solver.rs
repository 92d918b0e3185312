//! The full solve pipeline: extract → evaluate → render.

use stepwise_common::{InputMap, ProblemType, Result};
use tracing::debug;

use crate::evaluator::evaluate;
use crate::inputs::{Problem, RawInputs};
use crate::renderer::TemplateRenderer;

/// Output of a successful solve, ready to be persisted.
#[derive(Debug, Clone)]
pub struct SolvedProblem {
    pub problem_type: ProblemType,
    /// Inputs under canonical keys.
    pub inputs: InputMap,
    /// Final answer, 2 decimals.
    pub answer: String,
    pub solution_html: String,
}

pub struct Solver {
    renderer: TemplateRenderer,
}

impl Solver {
    pub fn new(renderer: TemplateRenderer) -> Self {
        Self { renderer }
    }

    pub fn solve(&self, problem_type: ProblemType, raw: &RawInputs) -> Result<SolvedProblem> {
        let problem = Problem::from_raw(problem_type, raw)?;
        let solution = evaluate(&problem)?;
        debug!("Solved {} → {}", problem_type, solution.answer());

        let solution_html = self.renderer.render(&solution)?;

        Ok(SolvedProblem {
            problem_type,
            inputs: problem.inputs(),
            answer: solution.answer(),
            solution_html,
        })
    }
}
