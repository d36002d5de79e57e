//! Parse-rate survey over a list of real-world strings.
//!
//! The library never reads files; callers hand in the lines (the CLI reads
//! them from `--corpus <file>`).

use crate::api::{parse, serialize};
use crate::error::ParseError;
use crate::model::RuleList;

/// A line that parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Accepted {
    pub rules: RuleList,
    pub canonical: String,
    /// The canonical text says the same as the input once spacing and rule
    /// separators are ignored.
    pub equivalent: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub input: String,
    pub outcome: Result<Accepted, ParseError>,
}

#[derive(Debug, Clone, Default)]
pub struct Survey {
    pub entries: Vec<Entry>,
}

impl Survey {
    pub fn accepted(&self) -> usize {
        self.entries.iter().filter(|entry| entry.outcome.is_ok()).count()
    }

    /// Share of entries that parsed, `0.0` for an empty survey.
    pub fn success_rate(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        self.accepted() as f64 / self.entries.len() as f64
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &ParseError)> {
        self.entries.iter().filter_map(|entry| entry.outcome.as_ref().err().map(|err| (entry.input.as_str(), err)))
    }

    /// Accepted entries whose canonical text reads differently from the input.
    pub fn reworded(&self) -> impl Iterator<Item = (&str, &Accepted)> {
        self.entries.iter().filter_map(|entry| match &entry.outcome {
            Ok(accepted) if !accepted.equivalent => Some((entry.input.as_str(), accepted)),
            Ok(_) | Err(_) => None,
        })
    }
}

/// Parse every non-blank line; lines starting with `#` are comments.
pub fn survey<'a>(lines: impl IntoIterator<Item = &'a str>) -> Survey {
    let entries: Vec<Entry> = lines
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| Entry { input: line.to_string(), outcome: accept(line) })
        .collect();
    let survey = Survey { entries };
    tracing::info!(total = survey.entries.len(), accepted = survey.accepted(), "surveyed opening hours corpus");
    survey
}

fn accept(line: &str) -> Result<Accepted, ParseError> {
    let rules = parse(line)?;
    let canonical = serialize(&rules);
    let equivalent = is_equivalent(line, &canonical);
    Ok(Accepted { rules, canonical, equivalent })
}

/// Compare two texts ignoring whitespace and the `;`/`,` rule separator choice.
pub fn is_equivalent(input: &str, canonical: &str) -> bool {
    normalize(input) == normalize(canonical)
}

fn normalize(text: &str) -> String {
    regex!(r"\s+").replace_all(text, "").replace(';', ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> impl Iterator<Item = &'static str> {
        include_str!("../data/sample.txt").lines()
    }

    #[test]
    fn every_sample_line_parses() {
        let survey = survey(sample());
        let failures: Vec<_> = survey.failures().collect();
        assert!(failures.is_empty(), "{failures:?}");
        assert_eq!(survey.success_rate(), 1.0);
    }

    #[test]
    fn canonical_text_is_a_fixed_point() {
        for entry in survey(sample()).entries {
            let canonical = entry.outcome.unwrap().canonical;
            let again = serialize(&parse(&canonical).unwrap());
            assert_eq!(again, canonical, "from {:?}", entry.input);
        }
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let survey = survey(["# header", "", "   ", "24/7", "Mo-Fr ??"]);
        assert_eq!(survey.entries.len(), 2);
        assert_eq!(survey.accepted(), 1);
        assert_eq!(survey.success_rate(), 0.5);
        let failures: Vec<_> = survey.failures().map(|(input, err)| (input, err.position())).collect();
        assert_eq!(failures, vec![("Mo-Fr ??", 5)]);
    }

    #[test]
    fn empty_survey_has_zero_rate() {
        assert_eq!(survey(Vec::<&str>::new()).success_rate(), 0.0);
    }

    #[test]
    fn equivalence_ignores_spacing_and_separators() {
        assert!(is_equivalent("Mo-Fr 10:00-18:00 ;Sa 10:00-12:00", "Mo-Fr 10:00-18:00; Sa 10:00-12:00"));
        assert!(is_equivalent("Mo-Fr 10:00-18:00, Sa 10:00-12:00", "Mo-Fr 10:00-18:00; Sa 10:00-12:00"));
        assert!(!is_equivalent("Mo-Fr 9:00-18:00", "Mo-Fr 09:00-18:00"));
    }

    #[test]
    fn reworded_lines_are_reported() {
        let survey = survey(["Mo-Fr 9am-5pm", "Mo-Fr 09:00-17:00"]);
        let reworded: Vec<_> = survey.reworded().map(|(input, accepted)| (input, accepted.canonical.as_str())).collect();
        assert_eq!(reworded, vec![("Mo-Fr 9am-5pm", "Mo-Fr 09:00-17:00")]);
    }
}
