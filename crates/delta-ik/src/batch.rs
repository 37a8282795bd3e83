//! Solving a list of targets, one per line.
//!
//! Each non-empty line holds `x y z` separated by whitespace and/or commas.
//! Everything after a `#` is ignored.

use crate::report::{Format, SolveReport};
use anyhow::{Context, Result};
use delta_ik_core::{Coord, DeltaTripod, StepperMap};
use std::io::Write;

/// Counts from one batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub solved: usize,
    pub failed: usize,
}

/// Parse one input line. Returns `None` for blank and comment-only lines.
pub fn parse_target(line: &str) -> Result<Option<Coord>> {
    let line = line.split('#').next().unwrap_or_default();
    let fields: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();

    if fields.is_empty() {
        return Ok(None);
    }
    let [x, y, z] = fields[..] else {
        anyhow::bail!("expected 3 coordinates, found {}", fields.len());
    };

    let parse = |name: &str, raw: &str| -> Result<f64> {
        raw.parse::<f64>()
            .with_context(|| format!("invalid {name} coordinate '{raw}'"))
    };
    Ok(Some(Coord::new(parse("x", x)?, parse("y", y)?, parse("z", z)?)))
}

/// Solve every target in `input`, writing one result line each to `out`.
///
/// Unreachable targets are reported in the output and counted; malformed
/// lines abort the run.
pub fn run_batch<W: Write>(
    input: &str,
    tripod: &DeltaTripod,
    stepper: &StepperMap,
    format: Format,
    precision: usize,
    out: &mut W,
) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let Some(target) = parse_target(line).with_context(|| format!("line {line_no}"))? else {
            continue;
        };

        let result = tripod.solve(target);
        if let Err(err) = &result {
            tracing::warn!(line = line_no, "no solution: {err}");
            summary.failed += 1;
        } else {
            summary.solved += 1;
        }

        let report = SolveReport::new(target, &result, stepper);
        let rendered = report.render(format, precision)?;
        writeln!(out, "{rendered}").context("failed to write batch output")?;
    }

    tracing::info!(
        solved = summary.solved,
        failed = summary.failed,
        "batch complete"
    );
    Ok(summary)
}
