//! Display logic for the domainer CLI.
//!
//! This module handles all human-readable output: the domain list, filter
//! headers, run summaries, and the analysis block. Uses only the `console`
//! crate (already a dependency). JSON output lives in main.rs.

use chrono::NaiveDate;
use console::style;
use domainer_lib::DomainRecord;

/// Print a header line before a date-filtered listing.
pub fn print_filter_header(date: NaiveDate) {
    println!(
        "{}",
        style(format!("Domains available on or before {}:", date)).bold()
    );
}

/// Print the domain list, one record per line, dates dimmed.
pub fn print_records(records: &[DomainRecord]) {
    for record in records {
        match record.available_on {
            Some(date) => {
                println!(
                    "{}  {}",
                    record.domain,
                    style(date.format("%Y-%m-%d")).dim()
                );
            }
            None => println!("{}", record.domain),
        }
    }
}

/// Print the "nothing matched" message for a date filter.
pub fn print_no_matches(date: NaiveDate) {
    println!("No domains available on or before {}.", date);
}

/// Print the run summary line.
pub fn print_summary(count: usize, filter_date: Option<NaiveDate>) {
    println!();
    match filter_date {
        Some(date) => {
            println!(
                "{} {} domain{} available on or before {}",
                style("Summary:").bold(),
                style(count).green().bold(),
                if count == 1 { "" } else { "s" },
                date,
            );
        }
        None => {
            println!(
                "{} {} domain{} fetched and sorted",
                style("Summary:").bold(),
                style(count).green().bold(),
                if count == 1 { "" } else { "s" },
            );
        }
    }
}

/// Print the analysis response with a separator frame.
pub fn print_analysis(records: &[DomainRecord], analysis: &str) {
    let bar = "-".repeat(50);

    println!();
    println!(
        "{}",
        style(format!(
            "ChatGPT analysis of {} domain{}:",
            records.len(),
            if records.len() == 1 { "" } else { "s" }
        ))
        .bold()
    );
    println!("{}", style(&bar).dim());
    println!("{}", analysis);
    println!("{}", style(&bar).dim());
}
