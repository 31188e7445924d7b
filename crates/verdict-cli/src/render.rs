//! Plain-text rendering for terminal output.

use std::fmt::{self, Write};

use verdict_core::report::{DimensionReview, HistoryEntry, ReviewSummary, TaskReview};
use verdict_core::{flag_info, Dimension, MetricResult, OutputVerdict, FLAG_CATALOG};

const RULE: &str = "────────────────────────────────────────";

/// One raw output: headline, color and structured decode.
pub fn render_verdict(out: &mut impl Write, verdict: &OutputVerdict) -> fmt::Result {
    write!(out, "Score: {}", verdict.presentation.label)?;
    if let Some(color) = verdict.presentation.color {
        write!(out, "  [{}]", color)?;
    }
    writeln!(out)?;

    let Some(parsed) = &verdict.parsed else {
        return writeln!(out, "(no structured payload)");
    };

    if let Some(pass) = parsed.overall_pass {
        writeln!(out, "Overall pass: {}", if pass { "yes" } else { "no" })?;
    }
    if let Some(summary) = &parsed.summary {
        writeln!(out, "Summary: {}", summary)?;
    }
    if !parsed.flags.is_empty() {
        writeln!(out, "Flags: {}", parsed.flags.join(", "))?;
    }
    for metric in &parsed.metrics {
        render_metric(out, metric)?;
    }
    Ok(())
}

fn render_metric(out: &mut impl Write, metric: &MetricResult) -> fmt::Result {
    writeln!(out, "  {}: {}", metric.label, metric.score)?;
    if let Some(reasoning) = &metric.reasoning {
        writeln!(out, "    {}", reasoning)?;
    }
    for run in &metric.misclassified_runs {
        writeln!(
            out,
            "    misclassified {}: claimed {}, actual {}",
            run.run_id.as_deref().unwrap_or("?"),
            run.claimed.as_deref().unwrap_or("?"),
            run.actual.as_deref().unwrap_or("?"),
        )?;
    }
    for fake in &metric.fake_passes_detected {
        writeln!(out, "    fake pass: {}", fake)?;
    }
    Ok(())
}

fn render_dimension(out: &mut impl Write, review: &DimensionReview) -> fmt::Result {
    writeln!(out, "{} [{}]", review.dimension.name(), review.dimension.alias())?;
    if let Some(error) = &review.error {
        writeln!(out, "  error: {}", error)?;
    }

    if review.verdict.parsed.is_some() {
        let mut body = String::new();
        render_verdict(&mut body, &review.verdict)?;
        for line in body.lines() {
            writeln!(out, "  {}", line)?;
        }
    } else {
        writeln!(out, "  Score: {}", review.verdict.presentation.label)?;
        // Undecodable payloads are shown as-is
        for line in review.raw_text.lines() {
            writeln!(out, "  | {}", line)?;
        }
    }
    Ok(())
}

/// A full task review with flags and per-dimension detail.
pub fn render_review(out: &mut impl Write, review: &TaskReview) -> fmt::Result {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Task: {}", review.task_id.as_deref().unwrap_or("unknown"))?;
    if let Some(at) = &review.reviewed_at {
        writeln!(out, "Reviewed: {}", at)?;
    }
    if let Some(email) = &review.reviewer_email {
        writeln!(out, "Reviewer: {}", email)?;
    }

    let cards: Vec<_> = review
        .dimensions
        .iter()
        .map(|d| format!("{}: {}", d.dimension.alias(), d.verdict.presentation.label))
        .collect();
    writeln!(out, "{}", cards.join(" | "))?;

    if !review.detected_flags.is_empty() {
        writeln!(out, "Detected flags:")?;
        for flag in &review.detected_flags {
            let name = flag_info(&flag.flag_type).map_or(flag.flag_type.as_str(), |f| f.name);
            writeln!(out, "  {}", name)?;
            for line in flag.details.lines() {
                writeln!(out, "    - {}", line)?;
            }
        }
    }

    for dimension in &review.dimensions {
        writeln!(out)?;
        render_dimension(out, dimension)?;
    }
    Ok(())
}

pub fn render_summary(out: &mut impl Write, summary: &ReviewSummary) -> fmt::Result {
    writeln!(out, "Tasks: {}", summary.task_count)?;
    if let (Some(first), Some(last)) = (summary.earliest_review, summary.latest_review) {
        writeln!(out, "Reviewed: {} .. {}", first, last)?;
    }

    for dimension in &summary.dimensions {
        let name = dimension.dimension.map_or("?", |d| d.name());
        writeln!(out, "{}", name)?;
        match (dimension.mean, dimension.min, dimension.max) {
            (Some(mean), Some(min), Some(max)) => writeln!(
                out,
                "  numeric {}: mean {:.2}, min {}, max {}",
                dimension.numeric_count, mean, min, max
            )?,
            _ => writeln!(out, "  numeric 0")?,
        }
        writeln!(
            out,
            "  pass {}, fail {}, n/a {}",
            dimension.pass_count, dimension.fail_count, dimension.unknown_count
        )?;
    }

    if !summary.flag_counts.is_empty() {
        writeln!(out, "Flags:")?;
        for (flag_type, count) in &summary.flag_counts {
            writeln!(out, "  {}: {}", flag_type, count)?;
        }
    }
    Ok(())
}

pub fn render_history(out: &mut impl Write, entries: &[HistoryEntry]) -> fmt::Result {
    if entries.is_empty() {
        return writeln!(out, "No reviews stored.");
    }
    for entry in entries {
        writeln!(
            out,
            "{:>4}  {:<24} {:<28} flags: {}",
            entry.index, entry.task_id, entry.reviewed_at, entry.flags_count
        )?;
    }
    Ok(())
}

/// The dimension and flag catalogues.
pub fn render_catalog(out: &mut impl Write) -> fmt::Result {
    writeln!(out, "Dimensions:")?;
    for dimension in Dimension::ALL {
        writeln!(out, "  {} ({}, key {})", dimension.name(), dimension.alias(), dimension.key())?;
        writeln!(out, "    {}", dimension.description())?;
        for check in dimension.sub_checks() {
            writeln!(out, "    - {}", check)?;
        }
    }

    writeln!(out, "Flags:")?;
    for flag in FLAG_CATALOG.iter() {
        writeln!(out, "  {} ({}): {}", flag.name, flag.flag_type, flag.description)?;
    }
    Ok(())
}
