//! Generic range and list productions.

use super::scanner::Scanner;

/// `T`, optionally followed by a dash and a second `T`.
///
/// A dash that is not followed by a second item is left unconsumed and the
/// range collapses to `(first, first)`.
pub(crate) fn parse_range<T: Clone>(
    s: &mut Scanner<'_>,
    scan: impl Fn(&mut Scanner<'_>) -> Option<T>,
) -> Option<(T, T)> {
    let first = scan(s)?;
    let second = s.attempt(|s| if s.scan_dash() { scan(s) } else { None });
    let second = second.unwrap_or_else(|| first.clone());
    Some((first, second))
}

/// One or more `T` separated by `delimiter`.
///
/// The cursor right after the last parsed item is the only safe stopping
/// point: a delimiter that is not followed by another item is given back to
/// the caller. An empty delimiter means items follow each other directly.
pub(crate) fn parse_list<T>(
    s: &mut Scanner<'_>,
    mut scan: impl FnMut(&mut Scanner<'_>) -> Option<T>,
    delimiter: &str,
) -> Option<Vec<T>> {
    let mut items = vec![scan(s)?];
    loop {
        let safe = s.cursor();
        if !delimiter.is_empty() && !s.scan_str(delimiter) {
            break;
        }
        match scan(s) {
            Some(item) if s.cursor() > safe => items.push(item),
            Some(_) | None => {
                s.rewind(safe);
                break;
            }
        }
    }
    Some(items)
}

/// Comma-separated list of ranges.
pub(crate) fn parse_list_range<T: Clone>(
    s: &mut Scanner<'_>,
    scan: impl Fn(&mut Scanner<'_>) -> Option<T>,
) -> Option<Vec<(T, T)>> {
    parse_list(s, |s| parse_range(s, &scan), ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(s: &mut Scanner<'_>) -> Option<u32> {
        s.scan_uint()
    }

    #[test]
    fn range_with_and_without_end() {
        assert_eq!(parse_range(&mut Scanner::new("1-5"), number), Some((1, 5)));
        assert_eq!(parse_range(&mut Scanner::new("7"), number), Some((7, 7)));
    }

    #[test]
    fn dangling_dash_is_given_back() {
        let mut s = Scanner::new("3-x");
        assert_eq!(parse_range(&mut s, number), Some((3, 3)));
        assert_eq!(s.rest(), "-x");
    }

    #[test]
    fn list_rewinds_past_trailing_delimiter() {
        let mut s = Scanner::new("1, 2 ,3, Mo");
        assert_eq!(parse_list(&mut s, number, ","), Some(vec![1, 2, 3]));
        assert_eq!(s.rest(), ", Mo");
    }

    #[test]
    fn list_needs_a_first_item() {
        let mut s = Scanner::new("Mo, 1");
        assert_eq!(parse_list(&mut s, number, ","), None);
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn list_without_delimiter() {
        let mut s = Scanner::new("1 2 3x");
        assert_eq!(parse_list(&mut s, number, ""), Some(vec![1, 2, 3]));
        assert_eq!(s.rest(), "x");
    }

    #[test]
    fn list_of_ranges() {
        let mut s = Scanner::new("1-5,8,10-12");
        assert_eq!(parse_list_range(&mut s, number), Some(vec![(1, 5), (8, 8), (10, 12)]));
        assert!(s.is_at_end());
    }
}
