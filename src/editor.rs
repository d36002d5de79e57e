//! The editing controller: one rule tree, its text, and the last parse failure.
//!
//! ```text
//!              set_text(ok)            set_text(err)
//!   Valid  ───────────────►  Valid  ───────────────►  Invalid
//!     ▲                                                  │
//!     └─────────── set_text(ok) or any edit ─────────────┘
//! ```
//!
//! While valid, [`Editor::text`] is the canonical form of the tree. While
//! invalid, it is exactly what was written and [`Editor::failure_position`]
//! says where parsing stopped; the last good tree stays available and edits
//! keep working on it.

use std::fmt;

use chrono::Weekday;

use crate::api::{Options, parse_with, serialize};
use crate::error::{EditError, ParseError};
use crate::model::{DaysHours, HourRange, MonthDayRange, Rule, RuleList, WEEK};

type ChangeHook = Box<dyn Fn(&str) + Send + Sync>;

pub struct Editor {
    rules: RuleList,
    text: String,
    failure: Option<usize>,
    options: Options,
    on_change: Option<ChangeHook>,
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("rules", &self.rules)
            .field("text", &self.text)
            .field("failure", &self.failure)
            .field("options", &self.options)
            .field("on_change", &self.on_change.as_ref().map(|_| "<function>"))
            .finish()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Editor::new()
    }
}

impl Editor {
    /// An editor holding an empty rule list.
    pub fn new() -> Self {
        Editor::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        Editor { rules: RuleList::default(), text: String::new(), failure: None, options, on_change: None }
    }

    /// An editor loaded with `text`; a parse failure leaves it invalid with an empty tree.
    pub fn from_text(text: &str) -> Self {
        let mut editor = Editor::new();
        // The failure is recorded on the editor itself.
        let _ = editor.set_text(text);
        editor
    }

    /// Register a hook called with the new text after each successful change.
    ///
    /// The hook runs on the caller's thread before the mutating call returns.
    /// Hosts that render elsewhere should forward the text (for example over a
    /// channel) rather than block in it.
    pub fn on_change(&mut self, hook: impl Fn(&str) + Send + Sync + 'static) {
        self.on_change = Some(Box::new(hook));
    }

    // --- Text ----------------------------------------------------------------

    /// Canonical text while valid; the text exactly as written while invalid.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rule_list(&self) -> &RuleList {
        &self.rules
    }

    pub fn is_valid(&self) -> bool {
        self.failure.is_none()
    }

    /// Character offset where the last write stopped parsing.
    pub fn failure_position(&self) -> Option<usize> {
        self.failure
    }

    /// The invalid text with a caret line under the failure offset. The caret
    /// line follows the line that holds the offset.
    ///
    /// ```text
    /// Mo-Fr 10:00-18:00 xyz
    /// -----------------^
    /// ```
    pub fn failure_marker(&self) -> Option<String> {
        let position = self.failure?;
        let text = self.text.as_str();
        let at = text.char_indices().nth(position).map_or(text.len(), |(byte, _)| byte);
        let line_start = text[..at].rfind('\n').map_or(0, |byte| byte + 1);
        let line_end = text[at..].find('\n').map_or(text.len(), |byte| at + byte);
        let column = text[line_start..at].chars().count();
        Some(format!("{}\n{}^{}", &text[..line_end], "-".repeat(column), &text[line_end..]))
    }

    /// Replace the text, re-parsing from scratch.
    ///
    /// On failure the tree is left as it was and the raw text is kept for
    /// display.
    pub fn set_text(&mut self, text: &str) -> Result<(), ParseError> {
        match parse_with(text, &self.options) {
            Ok(parsed) => {
                tracing::debug!(text = %parsed.text, rules = parsed.rules.rules.len(), "accepted opening hours");
                self.rules = parsed.rules;
                self.text = parsed.text;
                self.failure = None;
                self.notify();
                Ok(())
            }
            Err(err) => {
                tracing::debug!(position = err.position(), text, "rejected opening hours");
                self.text = text.to_string();
                self.failure = Some(err.position());
                Err(err)
            }
        }
    }

    // --- Edits ---------------------------------------------------------------

    /// Append a `Mo-Su 10:00-18:00` rule.
    pub fn add_rule(&mut self) -> Result<(), EditError> {
        self.rules.push_starter_rule();
        self.commit("add_rule")
    }

    pub fn remove_rule(&mut self, rule: usize) -> Result<(), EditError> {
        self.rule_mut(rule)?;
        self.rules.rules.remove(rule);
        self.commit("remove_rule")
    }

    /// Append a day/hours group covering the weekdays the rule does not name yet.
    pub fn add_days_hours_group(&mut self, rule: usize) -> Result<(), EditError> {
        self.rule_mut(rule)?.add_days_hours();
        self.commit("add_days_hours_group")
    }

    pub fn remove_days_hours_group(&mut self, rule: usize, group: usize) -> Result<(), EditError> {
        let groups = &mut self.rule_mut(rule)?.days_hours;
        check_index(group, groups.len(), |index, len| EditError::GroupOutOfRange { index, len })?;
        groups.remove(group);
        self.commit("remove_days_hours_group")
    }

    /// Append a `Jan-Dec` month range.
    pub fn add_month_range(&mut self, rule: usize) -> Result<(), EditError> {
        self.rule_mut(rule)?.months.push(MonthDayRange::default());
        self.commit("add_month_range")
    }

    pub fn remove_month_range(&mut self, rule: usize, index: usize) -> Result<(), EditError> {
        let months = &mut self.rule_mut(rule)?.months;
        check_index(index, months.len(), |index, len| EditError::MonthRangeOutOfRange { index, len })?;
        months.remove(index);
        self.commit("remove_month_range")
    }

    /// Append a `10:00-18:00` hour range.
    pub fn add_hour_range(&mut self, rule: usize, group: usize) -> Result<(), EditError> {
        self.group_mut(rule, group)?.hours.push(HourRange::default());
        self.commit("add_hour_range")
    }

    pub fn remove_hour_range(&mut self, rule: usize, group: usize, index: usize) -> Result<(), EditError> {
        let hours = &mut self.group_mut(rule, group)?.hours;
        check_index(index, hours.len(), |index, len| EditError::HourRangeOutOfRange { index, len })?;
        hours.remove(index);
        self.commit("remove_hour_range")
    }

    /// Flip one weekday (0 = Monday ... 6 = Sunday) in a group.
    pub fn toggle_weekday(&mut self, rule: usize, group: usize, day: u8) -> Result<(), EditError> {
        let weekday: Weekday = *WEEK.get(usize::from(day)).ok_or(EditError::InvalidWeekday { day })?;
        self.group_mut(rule, group)?.toggle_day(weekday);
        self.commit("toggle_weekday")
    }

    // --- Internals -------------------------------------------------------------

    fn rule_mut(&mut self, rule: usize) -> Result<&mut Rule, EditError> {
        let len = self.rules.rules.len();
        self.rules.rules.get_mut(rule).ok_or(EditError::RuleOutOfRange { index: rule, len })
    }

    fn group_mut(&mut self, rule: usize, group: usize) -> Result<&mut DaysHours, EditError> {
        let groups = &mut self.rule_mut(rule)?.days_hours;
        let len = groups.len();
        groups.get_mut(group).ok_or(EditError::GroupOutOfRange { index: group, len })
    }

    /// Re-derive the text after an edit and notify.
    fn commit(&mut self, operation: &'static str) -> Result<(), EditError> {
        self.rules.tidy();
        self.text = serialize(&self.rules);
        self.failure = None;
        tracing::trace!(operation, text = %self.text, "edited opening hours");
        self.notify();
        Ok(())
    }

    fn notify(&self) {
        if let Some(hook) = &self.on_change {
            hook(&self.text);
        }
    }
}

fn check_index(index: usize, len: usize, error: impl FnOnce(usize, usize) -> EditError) -> Result<(), EditError> {
    if index < len { Ok(()) } else { Err(error(index, len)) }
}
