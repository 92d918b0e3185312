//! Solver page: problem form, rendered solution and history browser.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Form,
};
use minijinja::HtmlEscape;
use serde::Deserialize;
use serde_json::Value;
use stepwise_common::{ProblemType, SolutionRecord, StepwiseError};
use stepwise_solver::RawInputs;
use uuid::Uuid;

use crate::handlers::solve::submit;
use crate::handlers::NAV_HTML;
use crate::state::SharedState;

#[derive(Deserialize, Default)]
pub struct PageQuery {
    #[serde(rename = "type")]
    pub problem_type: Option<String>,
}

/// Fields of the solver form. Both input groups are always posted; the
/// selected problem type decides which ones are read.
#[derive(Deserialize, Default)]
pub struct SolveForm {
    pub problem_type: Option<String>,
    pub a: Option<String>,
    pub b: Option<String>,
    pub p: Option<String>,
    pub amount: Option<String>,
    pub t: Option<String>,
}

struct FormValues {
    a: String,
    b: String,
    p: String,
    amount: String,
    t: String,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            a: "3".into(),
            b: "4".into(),
            p: "5000".into(),
            amount: "6050".into(),
            t: "2".into(),
        }
    }
}

impl SolveForm {
    fn values(&self) -> FormValues {
        let d = FormValues::default();
        let pick = |v: &Option<String>, default: String| v.clone().unwrap_or(default);
        FormValues {
            a: pick(&self.a, d.a),
            b: pick(&self.b, d.b),
            p: pick(&self.p, d.p),
            amount: pick(&self.amount, d.amount),
            t: pick(&self.t, d.t),
        }
    }

    /// Non-empty fields as raw solver inputs.
    fn raw_inputs(&self) -> RawInputs {
        [("a", &self.a), ("b", &self.b), ("p", &self.p), ("amount", &self.amount), ("t", &self.t)]
            .into_iter()
            .filter_map(|(k, v)| {
                let v = v.as_deref()?.trim();
                (!v.is_empty()).then(|| (k.to_string(), Value::String(v.to_string())))
            })
            .collect()
    }
}

struct PageView<'a> {
    problem_type: ProblemType,
    values: FormValues,
    solution_html: Option<&'a str>,
    error: Option<String>,
    history: &'a [SolutionRecord],
    active: Option<Uuid>,
}

/// GET /
pub async fn index_page(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let problem_type = query
        .problem_type
        .and_then(|t| t.parse().ok())
        .unwrap_or(ProblemType::Pythagorean);
    let history = load_history(&state).await;

    Html(render_page(PageView {
        problem_type,
        values: FormValues::default(),
        solution_html: None,
        error: None,
        history: &history,
        active: None,
    }))
}

/// POST /solve
pub async fn solve_form(
    State(state): State<SharedState>,
    Form(form): Form<SolveForm>,
) -> (StatusCode, Html<String>) {
    let requested = form.problem_type.clone().unwrap_or_default();
    let outcome = submit(&state, &requested, &form.raw_inputs()).await;
    let history = load_history(&state).await;
    let problem_type = requested.parse().unwrap_or(ProblemType::Pythagorean);

    let (status, record, error) = match outcome {
        Ok(record) => (StatusCode::OK, Some(record), None),
        Err(e) if e.is_client_error() => (StatusCode::BAD_REQUEST, None, Some(e.to_string())),
        Err(e) => {
            tracing::error!("Error solving problem: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, None, Some(e.to_string()))
        }
    };

    let html = render_page(PageView {
        problem_type,
        values: form.values(),
        solution_html: record.as_ref().map(|r| r.solution_html.as_str()),
        error,
        history: &history,
        active: record.as_ref().map(|r| r.id),
    });
    (status, Html(html))
}

/// GET /history/{id}
pub async fn history_page(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> (StatusCode, Html<String>) {
    let (status, record, error) = match state.store.find_by_id(id).await {
        Ok(Some(record)) => (StatusCode::OK, Some(record), None),
        Ok(None) => (StatusCode::NOT_FOUND, None, Some(format!("No solution with id {}", id))),
        Err(e) => {
            let e = StepwiseError::from(e);
            tracing::error!("Error loading solution {}: {}", id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, None, Some(e.to_string()))
        }
    };
    let history = load_history(&state).await;

    let html = render_page(PageView {
        problem_type: record.as_ref().map(|r| r.problem_type).unwrap_or(ProblemType::Pythagorean),
        values: record.as_ref().map(values_from_record).unwrap_or_default(),
        solution_html: record.as_ref().map(|r| r.solution_html.as_str()),
        error,
        history: &history,
        active: record.as_ref().map(|r| r.id),
    });
    (status, Html(html))
}

/// The sidebar degrades to an empty list when the store is unavailable.
async fn load_history(state: &SharedState) -> Vec<SolutionRecord> {
    state.store.list_all().await.unwrap_or_else(|e| {
        tracing::error!("Error fetching history: {}", e);
        Vec::new()
    })
}

fn values_from_record(record: &SolutionRecord) -> FormValues {
    let mut values = FormValues::default();
    let get = |k: &str| record.inputs.get(k).map(|v| v.to_string());
    match record.problem_type {
        ProblemType::Pythagorean => {
            values.a = get("a").unwrap_or(values.a);
            values.b = get("b").unwrap_or(values.b);
        }
        ProblemType::CompoundInterest => {
            values.p = get("principal").unwrap_or(values.p);
            values.amount = get("amount").unwrap_or(values.amount);
            values.t = get("time").unwrap_or(values.t);
        }
    }
    values
}

fn render_history(history: &[SolutionRecord], active: Option<Uuid>) -> String {
    if history.is_empty() {
        return r#"<p class="text-muted">No history yet.</p>"#.to_string();
    }

    history.iter().map(|r| {
        let inputs = r.inputs.iter()
            .map(|(k, v)| format!("{} = {}", k, v))
            .collect::<Vec<_>>()
            .join(", ");
        format!(r#"
        <a href="/history/{}" class="history-item{}">
            <p class="fw-bold">{}</p>
            <p class="small text-muted">{}</p>
            <p class="small">{}</p>
        </a>"#,
        r.id,
        if active == Some(r.id) { " active" } else { "" },
        r.problem_type.label(),
        HtmlEscape(&inputs),
        r.created_at.format("%Y-%m-%d %H:%M:%S UTC"))
    }).collect()
}

fn render_page(view: PageView<'_>) -> String {
    let selected = |pt: ProblemType| if view.problem_type == pt { "selected" } else { "" };
    let hidden = |pt: ProblemType| if view.problem_type == pt { "" } else { "hidden" };

    let error_html = view.error.as_deref().map(|e| format!(
        r#"<div class="alert alert-danger">{}</div>"#, HtmlEscape(e)
    )).unwrap_or_default();

    let solution_html = match view.solution_html {
        Some(doc) => format!(
            r#"<iframe class="solution-frame" title="Solution" srcdoc="{}"></iframe>"#,
            HtmlEscape(doc)
        ),
        None => r#"<div class="placeholder">Here is the solution</div>"#.to_string(),
    };

    let v = &view.values;
    format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Stepwise · Solution Generator</title>
    <link rel="stylesheet" href="/static/css/main.css">
</head>
<body>
{}
<main class="main-content">
    <div class="page-header">
        <h1 class="page-title">Solution Generator</h1>
        <p class="text-muted">Solving Math Problems</p>
    </div>

    <div class="layout">
        <div class="sidebar">
            <div class="card">
                <h2>Problem Solver</h2>
                <form method="POST" action="/solve">
                    <label for="problem_type">Choose Problem Type</label>
                    <select id="problem_type" name="problem_type">
                        <option value="pythagorean" {}>Pythagorean Theorem</option>
                        <option value="compoundInterest" {}>Compound Interest Rate</option>
                    </select>

                    <fieldset data-problem="pythagorean" {}>
                        <label for="a">Side 'a'</label>
                        <input type="number" step="any" name="a" id="a" value="{}">
                        <label for="b">Side 'b'</label>
                        <input type="number" step="any" name="b" id="b" value="{}">
                    </fieldset>

                    <fieldset data-problem="compoundInterest" {}>
                        <label for="p">Principal (P)</label>
                        <input type="number" step="any" name="p" id="p" value="{}">
                        <label for="amount">Amount (A)</label>
                        <input type="number" step="any" name="amount" id="amount" value="{}">
                        <label for="t">Time (t) in years</label>
                        <input type="number" step="any" name="t" id="t" value="{}">
                    </fieldset>

                    <button type="submit" class="btn btn-primary">Get Solution</button>
                </form>
            </div>

            <div class="card">
                <h2>History</h2>
                <div id="history" class="history-list">{}</div>
            </div>
        </div>

        <div class="card solution-panel">
            {}
            {}
        </div>
    </div>
</main>
<script src="/static/js/main.js"></script>
</body>
</html>"#,
    NAV_HTML,
    selected(ProblemType::Pythagorean), selected(ProblemType::CompoundInterest),
    hidden(ProblemType::Pythagorean),
    HtmlEscape(&v.a), HtmlEscape(&v.b),
    hidden(ProblemType::CompoundInterest),
    HtmlEscape(&v.p), HtmlEscape(&v.amount), HtmlEscape(&v.t),
    render_history(view.history, view.active),
    error_html, solution_html)
}
