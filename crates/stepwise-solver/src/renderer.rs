//! Step-by-step HTML rendering.
//!
//! Each problem type has one static HTML document under the templates
//! directory. Computed values are substituted into its named slots; the
//! document itself is never generated in code.

use std::path::Path;

use minijinja::{context, Environment, ErrorKind, UndefinedBehavior, Value};
use stepwise_common::{Result, StepwiseError};

use crate::evaluator::{CompoundInterestSolution, PythagoreanSolution, Solution};
use crate::format::{fixed, plain};

pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

pub struct TemplateRenderer {
    env: Environment<'static>,
    currency_symbol: String,
}

impl TemplateRenderer {
    /// Renderer that loads templates from `dir` on first use.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(dir.as_ref().to_path_buf()));
        // A slot the template names but we never fill is a template bug.
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        Self {
            env,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn render(&self, solution: &Solution) -> Result<String> {
        let name = solution.problem_type().template_name();
        let template = self.env.get_template(name).map_err(|e| {
            let reason = match e.kind() {
                ErrorKind::TemplateNotFound => "not found".to_string(),
                _ => e.to_string(),
            };
            tracing::error!("Error reading template {}: {}", name, reason);
            StepwiseError::TemplateLoad(format!("{} ({})", name, reason))
        })?;

        let ctx = match solution {
            Solution::Pythagorean(s)      => pythagorean_slots(s),
            Solution::CompoundInterest(s) => compound_interest_slots(s, &self.currency_symbol),
        };

        template
            .render(ctx)
            .map_err(|e| StepwiseError::TemplateLoad(format!("{}: {}", name, e)))
    }
}

fn pythagorean_slots(s: &PythagoreanSolution) -> Value {
    context! {
        a => plain(s.a),
        b => plain(s.b),
        a_squared => plain(s.a_squared),
        b_squared => plain(s.b_squared),
        c_squared => plain(s.c_squared),
        c_final => fixed(s.c, 2),
    }
}

fn compound_interest_slots(s: &CompoundInterestSolution, currency: &str) -> Value {
    context! {
        currency => currency,
        principal => plain(s.principal),
        amount => plain(s.amount),
        time => plain(s.time),
        ratio => fixed(s.ratio, 4),
        time_inverse => fixed(s.time_inverse, 2),
        rate_factor => fixed(s.rate_factor, 4),
        rate_decimal => fixed(s.rate_decimal, 4),
        rate_final => fixed(s.rate, 2),
    }
}
