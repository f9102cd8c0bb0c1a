//! Text output formatting with progress bars and colors.

use chrono::Local;
use xfusage_core::UsageSnapshot;

use super::SensorReport;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

// Progress bar characters
const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    bar_width: usize,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            bar_width: 10,
        }
    }

    /// Formats a sensor report.
    pub fn format_report(&self, report: &SensorReport) -> String {
        let mut lines = vec![self.bold(&report.name)];

        match &report.snapshot {
            Some(snapshot) => lines.extend(self.format_snapshot(snapshot)),
            None => lines.push(self.dim("No usage data yet")),
        }

        if let Some(err) = &report.last_error {
            lines.push(format!("{} - {}", self.red("Last refresh failed"), err));
            if let Some(attempt) = report.last_attempt {
                let attempt = attempt.with_timezone(&Local);
                lines.push(self.dim(&format!("Attempted: {}", attempt.format("%Y-%m-%d %H:%M"))));
            }
        }

        lines.join("\n")
    }

    fn format_snapshot(&self, snapshot: &UsageSnapshot) -> Vec<String> {
        let unit = &snapshot.unit;
        let mut lines = vec![format!(
            "Used:      {} {unit} of {} {unit}",
            format_amount(snapshot.total_usage),
            format_amount(snapshot.allowed_usage),
        )];

        let remaining = format!("{} {unit}", format_amount(snapshot.remaining_usage));
        match snapshot.used_percent() {
            Some(used) => {
                let left = (100.0 - used).clamp(0.0, 100.0);
                lines.push(format!(
                    "Remaining: {} {}",
                    self.color_for_percent(left, &remaining),
                    self.progress_bar(left)
                ));
            }
            None => lines.push(format!("Remaining: {remaining}")),
        }

        if snapshot.is_over_limit() {
            lines.push(self.red("Over allowance"));
        }

        if let (Some(start), Some(end)) = (&snapshot.start_date, &snapshot.end_date) {
            lines.push(format!("Period:    {start} - {end}"));
        }

        let updated = snapshot.updated_at.with_timezone(&Local);
        lines.push(self.dim(&format!("Updated:   {}", updated.format("%Y-%m-%d %H:%M"))));

        lines
    }

    /// Formats a progress bar.
    pub fn progress_bar(&self, percent_remaining: f64) -> String {
        let filled = ((percent_remaining.clamp(0.0, 100.0) / 100.0) * self.bar_width as f64)
            .round() as usize;
        let empty = self.bar_width.saturating_sub(filled);

        let bar = format!(
            "{}{}",
            BAR_FULL.to_string().repeat(filled),
            BAR_EMPTY.to_string().repeat(empty)
        );

        self.color_for_percent(percent_remaining, &bar)
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn color_for_percent(&self, percent: f64, text: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }

        if percent < 20.0 {
            self.red(text)
        } else if percent < 50.0 {
            self.yellow(text)
        } else {
            self.green(text)
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Whole numbers print without decimals, everything else with one.
pub(super) fn format_amount(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        format!("{n:.1}")
    }
}
