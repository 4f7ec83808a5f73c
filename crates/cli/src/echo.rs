use owo_colors::OwoColorize;

use lowtide_core::{LocationFailure, ScrapeReport};

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "lowtide".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Daylight low tides for your beaches\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Print one line per location that could not be scraped
pub fn print_failures(failures: &[LocationFailure]) {
    for failure in failures {
        print_error(&format!("{}: {}", failure.location.bright_white(), failure.error));
    }
}

/// Print a per-location summary of the report
pub fn print_report_summary(report: &ScrapeReport, elapsed: std::time::Duration) {
    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Scrape Summary".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());

    for (location, result) in report.results.iter() {
        match &result.low_tides {
            Some(low_tides) => eprintln!(
                "  {} {}",
                format!("{}:", location).dimmed(),
                format!("{} daylight low tides", low_tides.len()).bright_white()
            ),
            None => eprintln!("  {} {}", format!("{}:", location).dimmed(), "no tide table".bright_yellow()),
        }
    }
    for failure in &report.failures {
        eprintln!("  {} {}", format!("{}:", failure.location).dimmed(), "failed".bright_red());
    }

    eprintln!(
        "  {} {:>8.2}ms\n",
        format!("{}:", "Total").bold().dimmed(),
        elapsed.as_secs_f64() * 1000.0
    );
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
