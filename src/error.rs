//! Error types for parsing and tree editing.

/// Returned when a string is not a complete opening_hours value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Returned when the rule-list parser stops before the end of the input.
    #[error("unparseable input at character {position}")]
    UnparseableInput {
        /// Character offset where the parser could make no further progress.
        position: usize,
    },
}

impl ParseError {
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnparseableInput { position } => *position,
        }
    }
}

/// Returned when an editing operation is given an argument that does not
/// address anything in the current tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// Returned when the rule index is past the end of the rule list.
    #[error("rule index {index} out of range for {len} rules")]
    RuleOutOfRange {
        /// The requested rule index.
        index: usize,
        /// Number of rules.
        len: usize,
    },

    /// Returned when the day/hours group index is past the end of the rule's groups.
    #[error("day/hours group index {index} out of range for {len} groups")]
    GroupOutOfRange {
        /// The requested group index.
        index: usize,
        /// Number of groups in the rule.
        len: usize,
    },

    /// Returned when the month range index is past the end of the rule's month ranges.
    #[error("month range index {index} out of range for {len} month ranges")]
    MonthRangeOutOfRange {
        /// The requested month range index.
        index: usize,
        /// Number of month ranges in the rule.
        len: usize,
    },

    /// Returned when the hour range index is past the end of the group's hour ranges.
    #[error("hour range index {index} out of range for {len} hour ranges")]
    HourRangeOutOfRange {
        /// The requested hour range index.
        index: usize,
        /// Number of hour ranges in the group.
        len: usize,
    },

    /// Returned when a weekday index is outside 0 (Monday) ..= 6 (Sunday).
    #[error("weekday index must be in 0..=6, got {day}")]
    InvalidWeekday {
        /// The invalid day index.
        day: u8,
    },
}
