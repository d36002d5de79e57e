use std::fmt::{self, Write as _};

use openhours::corpus::Survey;
use openhours::{DaysHours, Editor, Rule, WEEK, WeekdaySet, weekday_code};

/// Lines of a survey section shown before the rest is summarized.
const SAMPLE_LIMIT: usize = 10;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(input: &str, editor: &Editor, color: bool) {
    let mut out = String::new();
    match write_run(&mut out, input, editor, &ansi::Palette::new(color)) {
        Ok(()) => print!("{out}"),
        Err(err) => eprintln!("error: failed to render report: {err}"),
    }
}

pub fn print_survey(source: &str, survey: &Survey, color: bool) {
    let mut out = String::new();
    match write_survey(&mut out, source, survey, &ansi::Palette::new(color)) {
        Ok(()) => print!("{out}"),
        Err(err) => eprintln!("error: failed to render report: {err}"),
    }
}

fn write_run(out: &mut impl fmt::Write, input: &str, editor: &Editor, palette: &ansi::Palette) -> fmt::Result {
    writeln!(out, "\n{}", palette.bold(palette.paint(format!("⚙  Parsing: {input:?}"), ansi::CYAN)))?;

    writeln!(out, "\n{}", palette.paint("━━━ Rules ━━━", ansi::GRAY))?;
    let rules = &editor.rule_list().rules;
    if rules.is_empty() {
        writeln!(out, "{}", palette.dim("  No rules"))?;
    }
    for (idx, rule) in rules.iter().enumerate() {
        write_rule(out, idx, rule, palette)?;
    }

    match editor.failure_marker() {
        Some(marker) => {
            writeln!(out, "\n{}", palette.paint("━━━ Failure ━━━", ansi::GRAY))?;
            let position = editor.failure_position().unwrap_or_default();
            writeln!(out, "  {}", palette.paint(format!("✗ stopped at character {position}"), ansi::RED))?;
            for line in marker.lines() {
                writeln!(out, "    {}", palette.paint(line, ansi::YELLOW))?;
            }
            if !rules.is_empty() {
                writeln!(out, "  {}", palette.dim("The rules above are the last tree that parsed."))?;
            }
        }
        None => {
            writeln!(out, "\n{}", palette.paint("━━━ Canonical ━━━", ansi::GRAY))?;
            writeln!(out, "  {}", palette.bold(palette.paint(editor.text(), ansi::GREEN)))?;
        }
    }
    writeln!(out)
}

fn write_rule(out: &mut impl fmt::Write, idx: usize, rule: &Rule, palette: &ansi::Palette) -> fmt::Result {
    writeln!(out, "  {} {}", palette.paint(format!("[{idx}]"), ansi::GRAY), palette.bold(rule.to_string()))?;
    if !rule.months.is_empty() {
        let months = rule.months.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        writeln!(out, "      {} {}", palette.dim("months:"), palette.paint(months, ansi::BLUE))?;
    }
    if !rule.weeks.is_empty() {
        let weeks = rule.weeks.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        writeln!(out, "      {} {}", palette.dim("weeks:"), palette.paint(weeks, ansi::BLUE))?;
    }
    for (group_idx, group) in rule.days_hours.iter().enumerate() {
        write_group(out, group_idx, group, palette)?;
    }
    if !rule.days_hours.is_empty() {
        writeln!(out, "      {} {}", palette.dim("days:"), week_strip(rule.defined_days(), palette))?;
    }
    if let Some(modifier) = rule.modifier {
        writeln!(out, "      {} {}", palette.dim("modifier:"), palette.paint(modifier.keyword(), ansi::YELLOW))?;
    }
    if let Some(comment) = &rule.comment {
        writeln!(out, "      {} {}", palette.dim("comment:"), palette.paint(comment.to_string(), ansi::CYAN))?;
    }
    Ok(())
}

fn write_group(out: &mut impl fmt::Write, idx: usize, group: &DaysHours, palette: &ansi::Palette) -> fmt::Result {
    let days = [&group.holiday_filter, &group.holidays]
        .into_iter()
        .flatten()
        .map(ToString::to_string)
        .chain(group.weekdays.iter().map(ToString::to_string))
        .collect::<Vec<_>>()
        .join(",");
    let hours = group.hours.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
    writeln!(
        out,
        "      {} {} {} {}",
        palette.dim(format!("group {idx}:")),
        palette.paint(if days.is_empty() { "-".to_string() } else { days }, ansi::BLUE),
        palette.dim("│"),
        palette.paint(if hours.is_empty() { "-".to_string() } else { hours }, ansi::GREEN),
    )
}

fn week_strip(days: WeekdaySet, palette: &ansi::Palette) -> String {
    WEEK.into_iter()
        .map(|day| {
            if days.contains(WeekdaySet::day(day)) {
                palette.paint(weekday_code(day), ansi::GREEN)
            } else {
                palette.dim("··")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_survey(out: &mut impl fmt::Write, source: &str, survey: &Survey, palette: &ansi::Palette) -> fmt::Result {
    writeln!(out, "\n{}", palette.bold(palette.paint(format!("⚙  Corpus: {source}"), ansi::CYAN)))?;

    writeln!(out, "\n{}", palette.paint("━━━ Summary ━━━", ansi::GRAY))?;
    writeln!(
        out,
        "  Lines: {}  │  Parsed: {}  │  Rate: {}",
        palette.paint(survey.entries.len().to_string(), ansi::BLUE),
        palette.paint(survey.accepted().to_string(), ansi::GREEN),
        palette.bold(format!("{:.1}%", survey.success_rate() * 100.0)),
    )?;

    let failures: Vec<_> = survey.failures().collect();
    if !failures.is_empty() {
        writeln!(out, "\n{}", palette.paint("━━━ Failures ━━━", ansi::GRAY))?;
        for (input, err) in failures.iter().take(SAMPLE_LIMIT) {
            writeln!(
                out,
                "  {} {} {}",
                palette.paint(format!("@{}", err.position()), ansi::RED),
                palette.dim("│"),
                input
            )?;
        }
        if failures.len() > SAMPLE_LIMIT {
            writeln!(out, "  {}", palette.dim(format!("... +{} more", failures.len() - SAMPLE_LIMIT)))?;
        }
    }

    let reworded: Vec<_> = survey.reworded().collect();
    if !reworded.is_empty() {
        writeln!(out, "\n{}", palette.paint("━━━ Rewritten ━━━", ansi::GRAY))?;
        for (input, accepted) in reworded.iter().take(SAMPLE_LIMIT) {
            writeln!(out, "  {}", palette.dim(input))?;
            writeln!(out, "  {} {}", palette.dim("→"), palette.paint(&accepted.canonical, ansi::GREEN))?;
        }
        if reworded.len() > SAMPLE_LIMIT {
            writeln!(out, "  {}", palette.dim(format!("... +{} more", reworded.len() - SAMPLE_LIMIT)))?;
        }
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_run(input: &str, editor: &Editor, color: bool) -> String {
        let mut out = String::new();
        write_run(&mut out, input, editor, &ansi::Palette::new(color)).unwrap();
        out
    }

    fn render_survey(source: &str, survey: &Survey, color: bool) -> String {
        let mut out = String::new();
        write_survey(&mut out, source, survey, &ansi::Palette::new(color)).unwrap();
        out
    }

    #[test]
    fn run_report_shows_tree_and_canonical_text() {
        let editor = Editor::from_text("Apr-Oct: Sa-Su 10:00-18:00 \"summer\"");
        let report = render_run("Apr-Oct: Sa-Su 10:00-18:00 \"summer\"", &editor, false);
        assert!(report.contains("[0] Apr-Oct: Sa-Su 10:00-18:00 \"summer\""), "{report}");
        assert!(report.contains("months: Apr-Oct"), "{report}");
        assert!(report.contains("group 0: Sa-Su │ 10:00-18:00"), "{report}");
        assert!(report.contains("days: ·· ·· ·· ·· ·· Sa Su"), "{report}");
        assert!(report.contains("━━━ Canonical ━━━"), "{report}");
        assert!(!report.contains('\x1b'), "{report}");
    }

    #[test]
    fn run_report_marks_the_failure() {
        let editor = Editor::from_text("Mo-Fr 10:00-18:00 xyz");
        let report = render_run("Mo-Fr 10:00-18:00 xyz", &editor, false);
        assert!(report.contains("stopped at character 17"), "{report}");
        assert!(report.contains("-----------------^"), "{report}");
        assert!(!report.contains("━━━ Canonical ━━━"), "{report}");
    }

    #[test]
    fn survey_report_lists_failures_and_rewrites() {
        let survey = openhours::corpus::survey(["Mo-Fr 9am-5pm", "Mo-Fr ??", "24/7"]);
        let report = render_survey("inline", &survey, false);
        assert!(report.contains("Lines: 3  │  Parsed: 2  │  Rate: 66.7%"), "{report}");
        assert!(report.contains("@5 │ Mo-Fr ??"), "{report}");
        assert!(report.contains("→ Mo-Fr 09:00-17:00"), "{report}");
    }

    #[test]
    fn color_wraps_text_in_escapes() {
        let report = render_survey("inline", &openhours::corpus::survey(["24/7"]), true);
        assert!(report.contains(ansi::RESET));
    }
}
