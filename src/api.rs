use crate::error::ParseError;
use crate::grammar::parse_rule_list;
use crate::model::RuleList;

/// Options that affect how parsed text is presented.
#[derive(Debug, Clone)]
pub struct Options {
    /// Replace accepted text with its canonical serialization. When off, the
    /// caller's spelling is kept as the displayed text; the tree is the same.
    pub canonicalize: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { canonicalize: true }
    }
}

/// Result from [`parse_with`].
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    /// The rule tree.
    pub rules: RuleList,
    /// Text to display for the tree: canonical, or the input when
    /// [`Options::canonicalize`] is off.
    pub text: String,
}

/// Parse an opening_hours string into a rule tree.
///
/// Parsing never panics; input that is not a complete rule list yields
/// [`ParseError::UnparseableInput`] with the character offset where the parser
/// stopped.
///
/// ```
/// let rules = openhours::parse("Mo-Fr 9:00-18:00").unwrap();
/// assert_eq!(openhours::serialize(&rules), "Mo-Fr 09:00-18:00");
/// assert_eq!(openhours::parse("Mo-Fr ???").unwrap_err().position(), 5);
/// ```
pub fn parse(text: &str) -> Result<RuleList, ParseError> {
    parse_rule_list(text).map_err(|position| ParseError::UnparseableInput { position })
}

/// Parse with explicit options.
pub fn parse_with(text: &str, options: &Options) -> Result<Parsed, ParseError> {
    let rules = parse(text)?;
    let text = if options.canonicalize { serialize(&rules) } else { text.to_string() };
    Ok(Parsed { rules, text })
}

/// Canonical text of a rule tree.
pub fn serialize(rules: &RuleList) -> String {
    rules.to_string()
}
