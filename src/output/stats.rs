//! Statistics reporting.

use std::time::Duration;

use console::style;

use crate::download::{ParentReport, RunSummary};

/// Print statistics for a single parent.
pub fn print_parent_report(report: &ParentReport) {
    let verb = if report.dry_run { "Enumerated" } else { "Downloaded" };

    println!();
    println!("{}", style(format!("Statistics for {}:", report.parent)).bold());
    println!("  Directory: {}", report.directory.display());
    println!("  {}: {} of {}", verb, report.succeeded(), report.total);
    if report.already_present > 0 {
        println!("  Skipped:    {} (already on disk)", report.already_present);
    }
    if report.failed > 0 {
        println!("  Failed:     {}", style(report.failed).red());
    }
}

/// Print statistics across all parents.
pub fn print_run_summary(summary: &RunSummary, elapsed: Duration) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Run Summary:").bold());
    println!("  Parents processed: {}", summary.parents_processed);
    if summary.parents_failed > 0 {
        println!("  Parents failed:    {}", style(summary.parents_failed).red());
    }
    println!(
        "  Items:             {} of {} succeeded",
        style(summary.items_succeeded).green(),
        summary.items_total
    );
    if summary.already_present > 0 {
        println!("  Already on disk:   {}", summary.already_present);
    }
    if summary.items_failed > 0 {
        println!("  Failed items:      {}", style(summary.items_failed).red());
    }
    println!("  Completed in {:.2} seconds", elapsed.as_secs_f64());
    println!("{}", style("═".repeat(50)).dim());
}
