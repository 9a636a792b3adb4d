//! Human-readable rendering of a search run.
//!
//! The report is observational: it is derived entirely from the trace and
//! node registry and never feeds back into any digest.

use std::collections::HashMap;
use std::fmt;

use octile_kernel::carrier::grid_state::GridStateV1;
use octile_search::search::SearchResult;
use octile_search::trace::{ChildOutcomeV1, ChildRecordV1, ExpansionRecordV1, TerminationReasonV1};

const SEPARATOR: &str = "==========================";

/// Render a whole run: every expansion in order, then the outcome.
#[must_use]
pub fn render_trace(result: &SearchResult) -> String {
    TraceReport(result).to_string()
}

/// Render one state as three rows, `_` for the blank, ending in a newline.
#[must_use]
pub fn render_grid(state: &GridStateV1) -> String {
    format!("{state}\n")
}

/// `Display` adapter behind [`render_trace`].
pub struct TraceReport<'a>(pub &'a SearchResult);

impl fmt::Display for TraceReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        writeln!(f, "OCTILE SEARCH EXPANSION TRACE")?;
        writeln!(f)?;
        let expanded_at: HashMap<u64, u64> = result
            .trace
            .expansions
            .iter()
            .map(|e| (e.node_id, e.expansion_index))
            .collect();
        for record in &result.trace.expansions {
            write_expansion(f, record, &expanded_at)?;
        }
        write_outcome(f, result)
    }
}

fn write_expansion(
    f: &mut fmt::Formatter<'_>,
    record: &ExpansionRecordV1,
    expanded_at: &HashMap<u64, u64>,
) -> fmt::Result {
    let n = record.expansion_index;
    writeln!(f, "{SEPARATOR}")?;
    writeln!(f, "Expansion #{n}")?;
    writeln!(
        f,
        "State: (expansion_order={n}, g={:.2}, h={:.2}, f={:.2})",
        record.g,
        record.h,
        record.f()
    )?;
    writeln!(f, "{}", record.state)?;
    writeln!(f)?;

    if record.children.is_empty() {
        writeln!(f, "  Children: None")?;
    } else {
        writeln!(f, "  Children:")?;
        for child in &record.children {
            write_child(f, child, expanded_at)?;
        }
    }
    writeln!(f)
}

/// Children that got a node also say whether that node was expanded later.
fn write_child(
    f: &mut fmt::Formatter<'_>,
    child: &ChildRecordV1,
    expanded_at: &HashMap<u64, u64>,
) -> fmt::Result {
    write!(
        f,
        "    -> {} g={:.2} h={:.2} f={:.2} (",
        child.mv,
        child.g,
        child.h,
        child.f()
    )?;
    match child.outcome {
        ChildOutcomeV1::Queued { .. } => f.write_str("queued")?,
        ChildOutcomeV1::Superseded { previous_g, .. } => write!(f, "superseded g={previous_g:.2}")?,
        ChildOutcomeV1::AlreadyQueued { existing_g } => {
            write!(f, "already queued g={existing_g:.2}")?;
        }
        ChildOutcomeV1::AlreadyClosed { closed_g } => {
            write!(f, "already finalized g={closed_g:.2}")?;
        }
    }
    if let Some(node_id) = child.outcome.node_id() {
        match expanded_at.get(&node_id) {
            Some(k) => write!(f, ", expanded #{k}")?,
            None => f.write_str(", not expanded yet")?,
        }
    }
    writeln!(f, ")")
}

fn write_outcome(f: &mut fmt::Formatter<'_>, result: &SearchResult) -> fmt::Result {
    match result.trace.metadata.termination_reason {
        TerminationReasonV1::GoalReached { .. } => {
            writeln!(f, "Goal was reached within the expansion limit!")?;
        }
        TerminationReasonV1::ExpansionLimitReached { limit } => {
            writeln!(f, "Goal NOT reached within the expansion limit ({limit}).")?;
        }
        TerminationReasonV1::FrontierExhausted => {
            writeln!(f, "Goal NOT reached: frontier exhausted.")?;
        }
        TerminationReasonV1::FrontierInvariantViolation => {
            writeln!(f, "Search aborted: frontier invariant violation.")?;
        }
    }

    let Some(goal) = &result.goal_node else {
        return Ok(());
    };
    let moves = result.solution_moves();
    writeln!(f)?;
    writeln!(
        f,
        "Solution: {} moves, cost {:.2}",
        moves.len(),
        goal.g
    )?;
    if !moves.is_empty() {
        let names: Vec<&str> = moves.iter().map(|m| m.as_str()).collect();
        writeln!(f, "  {}", names.join(" "))?;
    }
    Ok(())
}
