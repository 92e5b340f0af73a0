//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::puzzles::{Outcome, Puzzle, PuzzleReport};

/// Format puzzle reports for display
pub struct ReportFormatter;

impl ReportFormatter {
    /// One line per report: status, name and answer
    pub fn format_report(report: &PuzzleReport) -> String {
        let name = format!("{:<15}", report.puzzle.name());
        match &report.outcome {
            Outcome::Solved(result) => {
                format!("{} {} {}", ColorOutput::success("✔"), name, result)
            }
            Outcome::NoSolution => {
                format!("{} {} {}", ColorOutput::warning("∅"), name, "no solution")
            }
            Outcome::Failed { kind, message } => format!(
                "{} {} {}",
                ColorOutput::error("✘"),
                name,
                ColorOutput::error(&format!("{:?}: {}", kind, message))
            ),
        }
    }

    /// Totals and timing over a whole run
    pub fn format_summary(reports: &[PuzzleReport]) -> String {
        let solved = reports.iter().filter(|r| r.is_solved()).count();
        let unsolved = reports
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::NoSolution))
            .count();
        let failed = reports.len() - solved - unsolved;
        let total_ms: u128 = reports.iter().map(|r| r.elapsed.as_millis()).sum();

        let mut output = String::new();
        output.push_str("Puzzle          | Status      | Time(ms)\n");
        output.push_str("----------------|-------------|---------\n");
        for report in reports {
            let status = match report.outcome {
                Outcome::Solved(_) => "solved",
                Outcome::NoSolution => "no solution",
                Outcome::Failed { .. } => "failed",
            };
            output.push_str(&format!(
                "{:15} | {:11} | {:8}\n",
                report.puzzle.name(),
                status,
                report.elapsed.as_millis()
            ));
        }
        output.push_str(&format!(
            "\n{} solved, {} without solution, {} failed in {}ms\n",
            solved, unsolved, failed, total_ms
        ));
        output
    }

    /// Render reports in the configured output format
    pub fn render(reports: &[PuzzleReport], format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Text => Ok(reports
                .iter()
                .map(Self::format_report)
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Json => serde_json::to_string_pretty(reports),
        }
    }

    pub fn format_puzzle_list() -> String {
        Puzzle::all()
            .iter()
            .map(|puzzle| format!("{:15} {}", puzzle.name(), puzzle.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::puzzles::{Point, PuzzleResult};
    use std::time::Duration;

    fn reports() -> Vec<PuzzleReport> {
        vec![
            PuzzleReport {
                puzzle: Puzzle::InsideFence,
                outcome: Outcome::Solved(PuzzleResult::Point(Point { x: 7, y: 20 })),
                elapsed: Duration::from_millis(3),
            },
            PuzzleReport {
                puzzle: Puzzle::Mushroom,
                outcome: Outcome::NoSolution,
                elapsed: Duration::from_millis(1),
            },
            PuzzleReport {
                puzzle: Puzzle::Signs,
                outcome: Outcome::Failed {
                    kind: FailureKind::Indeterminate,
                    message: "solver could not decide constraint set `signs`".to_string(),
                },
                elapsed: Duration::from_millis(2),
            },
        ]
    }

    #[test]
    fn test_report_formatting() {
        let reports = reports();
        assert!(ReportFormatter::format_report(&reports[0]).contains("(7, 20)"));
        assert!(ReportFormatter::format_report(&reports[1]).contains("no solution"));
        assert!(ReportFormatter::format_report(&reports[2]).contains("Indeterminate"));
    }

    #[test]
    fn test_summary() {
        let summary = ReportFormatter::format_summary(&reports());
        assert!(summary.contains("1 solved, 1 without solution, 1 failed in 6ms"));
        assert!(summary.contains("inside_fence"));
    }

    #[test]
    fn test_json_rendering() {
        let json = ReportFormatter::render(&reports(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["puzzle"], "inside_fence");
        assert_eq!(parsed[2]["outcome"]["kind"], "indeterminate");
    }

    #[test]
    fn test_puzzle_list() {
        let list = ReportFormatter::format_puzzle_list();
        assert_eq!(list.lines().count(), Puzzle::all().len());
        assert!(list.starts_with("range_demo"));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        // Should either be colored or plain text
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
