//! Report writers: the colored terminal checklist plus JSON and
//! markdown renderings of the same [`Report`].

use crate::formatting::{FormattingConfig, Styler};
use crate::report::{bar_fill, ManifestScore, Report, Verdict};
use crate::rubric::CheckResult;
use std::io::Write;

#[derive(Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait ReportWriter {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()>;
}

pub fn create_writer(
    writer: Box<dyn Write>,
    format: OutputFormat,
    formatting: FormattingConfig,
) -> Box<dyn ReportWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, formatting)),
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_summary(report)?;
        for score in &report.scores {
            self.write_manifest_section(score)?;
        }
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &Report) -> anyhow::Result<()> {
        writeln!(self.writer, "# Kubernetes Challenge Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &Report) -> anyhow::Result<()> {
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Manifest | Score | Status |")?;
        writeln!(self.writer, "|----------|-------|--------|")?;
        for score in &report.scores {
            writeln!(
                self.writer,
                "| {} | {}/{} | {} |",
                score.display_name,
                score.outcome.points,
                score.outcome.max_points,
                if score.outcome.is_perfect() {
                    "complete"
                } else {
                    "in progress"
                }
            )?;
        }
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "**Total: {}/{} ({}%)** - {}",
            report.total_points,
            report.total_max,
            report.percent,
            verdict_message(report.verdict()),
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_manifest_section(&mut self, score: &ManifestScore) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "## {} ({}/{})",
            score.display_name, score.outcome.points, score.outcome.max_points
        )?;
        writeln!(self.writer)?;
        for check in &score.outcome.checks {
            let marker = if check.passed { "x" } else { " " };
            if check.detail.is_empty() {
                writeln!(self.writer, "- [{}] {}", marker, check.name)?;
            } else {
                writeln!(self.writer, "- [{}] {} - {}", marker, check.name, check.detail)?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

fn verdict_message(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Complete => "all manifests complete",
        Verdict::AlmostThere => "almost there",
        Verdict::KeepGoing => "keep going",
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
    styler: Styler,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, formatting: FormattingConfig) -> Self {
        Self {
            writer,
            styler: Styler::new(formatting),
        }
    }
}

impl<W: Write> ReportWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        self.write_banner()?;
        for score in &report.scores {
            self.write_manifest_section(score)?;
        }
        self.write_score_block(report)?;
        self.write_verdict(report)?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn write_banner(&mut self) -> anyhow::Result<()> {
        let ruler = "=".repeat(60);
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", self.styler.info(&ruler))?;
        writeln!(
            self.writer,
            "{}",
            self.styler
                .banner(&format!("  {}Kubernetes Basics Challenge", self.styler.wheel()))
        )?;
        writeln!(self.writer, "{}", self.styler.info(&ruler))?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "  {}",
            self.styler.bold("Checking your Kubernetes manifests...")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_manifest_section(&mut self, score: &ManifestScore) -> anyhow::Result<()> {
        let icon = if score.outcome.is_perfect() {
            self.styler.section_done()
        } else {
            self.styler.section_pending()
        };
        writeln!(
            self.writer,
            "  {} {} ({}/{} points)",
            icon,
            self.styler.bold(&score.display_name),
            score.outcome.points,
            score.outcome.max_points
        )?;

        for check in &score.outcome.checks {
            self.write_check_line(check)?;
        }

        writeln!(self.writer)?;
        Ok(())
    }

    fn write_check_line(&mut self, check: &CheckResult) -> anyhow::Result<()> {
        let icon = if check.passed {
            self.styler.check_pass()
        } else {
            self.styler.check_fail()
        };
        let detail = if check.detail.is_empty() {
            String::new()
        } else {
            format!(" - {}", check.detail)
        };
        writeln!(self.writer, "      {} {}{}", icon, check.name, detail)?;
        Ok(())
    }

    fn write_score_block(&mut self, report: &Report) -> anyhow::Result<()> {
        let (filled, empty) = bar_fill(report.percent);
        let (fill_cell, empty_cell) = self.styler.bar_cells();
        let bar = format!(
            "{}{}",
            fill_cell.repeat(filled as usize),
            empty_cell.repeat(empty as usize)
        );
        let bar = if report.percent >= 80 {
            self.styler.success(&bar)
        } else {
            self.styler.warning(&bar)
        };

        writeln!(self.writer, "  {}", self.styler.bold("Score:"))?;
        writeln!(
            self.writer,
            "  {} {}/{} points ({}%)",
            bar, report.total_points, report.total_max, report.percent
        )?;
        Ok(())
    }

    fn write_verdict(&mut self, report: &Report) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        match report.verdict() {
            Verdict::Complete => {
                writeln!(
                    self.writer,
                    "  {}",
                    self.styler.success(&format!(
                        "{}All manifests complete!",
                        self.styler.celebrate()
                    ))
                )?;
                writeln!(
                    self.writer,
                    "  {}",
                    self.styler
                        .info("Run 'kubegrade deploy' to test in a real cluster!")
                )?;
            }
            Verdict::AlmostThere => {
                writeln!(
                    self.writer,
                    "  {}",
                    self.styler.success(&format!(
                        "Almost there! Check the items marked with {}",
                        self.styler.emoji("✗", "[ ]")
                    ))
                )?;
            }
            Verdict::KeepGoing => {
                writeln!(
                    self.writer,
                    "  {}",
                    self.styler.info("Keep going! See README.md for guidance.")
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ManifestSource;
    use crate::report::grade;
    use crate::rubric::ManifestKind;

    fn empty_report() -> Report {
        grade(
            ManifestKind::ALL
                .iter()
                .map(|kind| (*kind, ManifestSource::Absent)),
        )
    }

    fn render(format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        match format {
            OutputFormat::Json => JsonWriter::new(&mut buffer)
                .write_report(&empty_report())
                .unwrap(),
            OutputFormat::Markdown => MarkdownWriter::new(&mut buffer)
                .write_report(&empty_report())
                .unwrap(),
            OutputFormat::Terminal => {
                TerminalWriter::new(&mut buffer, FormattingConfig::plain())
                    .write_report(&empty_report())
                    .unwrap()
            }
        }
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_json_round_trips() {
        let rendered = render(OutputFormat::Json);
        let parsed: Report = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed.total_max, 75);
        assert_eq!(parsed.scores.len(), 4);
        assert_eq!(parsed.scores[0].display_name, "Deployment");
    }

    #[test]
    fn test_markdown_has_summary_table() {
        let rendered = render(OutputFormat::Markdown);
        assert!(rendered.contains("| Manifest | Score | Status |"));
        assert!(rendered.contains("| Deployment | 0/25 | in progress |"));
        assert!(rendered.contains("**Total: 0/75 (0%)** - keep going"));
    }

    #[test]
    fn test_terminal_plain_output_lists_every_kind() {
        let rendered = render(OutputFormat::Terminal);
        assert!(rendered.contains("Kubernetes Basics Challenge"));
        assert!(rendered.contains("[TODO] Deployment (0/25 points)"));
        assert!(rendered.contains("[ ] Deployment file exists - File not found"));
        assert!(rendered.contains("0/75 points (0%)"));
        assert!(rendered.contains("Keep going! See README.md for guidance."));
    }

    #[test]
    fn test_terminal_bar_is_20_cells() {
        let rendered = render(OutputFormat::Terminal);
        assert!(rendered.contains(&"-".repeat(20)));
    }
}
