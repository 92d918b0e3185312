//! Table definitions and row conversion.

use chrono::{DateTime, SecondsFormat, Utc};
use stepwise_common::{InputMap, ProblemType, SolutionRecord};
use uuid::Uuid;

use crate::error::{DbError, Result};

pub const TABLE_SOLUTIONS: &str = "solutions";

/// `seq` fixes insertion order; `created_at` alone can tie.
pub const CREATE_SOLUTIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS solutions (
    seq           INTEGER PRIMARY KEY AUTOINCREMENT,
    id            TEXT    NOT NULL UNIQUE,
    problem_type  TEXT    NOT NULL,
    inputs        TEXT    NOT NULL,
    solution_html TEXT    NOT NULL,
    created_at    TEXT    NOT NULL
)
"#;

pub const SOLUTION_COLUMNS: &str = "id, problem_type, inputs, solution_html, created_at";

/// Raw `solutions` row: (id, problem_type, inputs, solution_html, created_at).
pub type SolutionRow = (String, String, String, String, String);

/// Column values for an insert, in `SOLUTION_COLUMNS` order.
pub fn record_to_row(record: &SolutionRecord) -> Result<SolutionRow> {
    Ok((
        record.id.to_string(),
        record.problem_type.as_str().to_string(),
        serde_json::to_string(&record.inputs)?,
        record.solution_html.clone(),
        record.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
    ))
}

pub fn row_to_record(row: SolutionRow) -> Result<SolutionRecord> {
    let (id, problem_type, inputs, solution_html, created_at) = row;

    let id = Uuid::parse_str(&id)
        .map_err(|e| DbError::InvalidRecord(format!("bad id '{}': {}", id, e)))?;
    let problem_type: ProblemType = problem_type
        .parse()
        .map_err(|e| DbError::InvalidRecord(format!("{}", e)))?;
    let inputs: InputMap = serde_json::from_str(&inputs)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| DbError::InvalidRecord(format!("bad created_at '{}': {}", created_at, e)))?
        .with_timezone(&Utc);

    Ok(SolutionRecord { id, problem_type, inputs, solution_html, created_at })
}
