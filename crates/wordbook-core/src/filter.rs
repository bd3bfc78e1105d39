use crate::composite::Composite;
use crate::dictionary::Dictionary;

/// Which dictionary fields a query is matched against.
///
/// An empty scope (all flags off) matches against every field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchScope {
    pub id: bool,
    pub short: bool,
    pub long: bool,
}

impl MatchScope {
    pub fn all() -> Self {
        Self {
            id: true,
            short: true,
            long: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.id && !self.short && !self.long
    }

    fn effective(self) -> Self {
        if self.is_empty() { Self::all() } else { self }
    }
}

/// Select the dictionaries matching `query`, keeping input order.
///
/// Quote characters are removed from the query first. A field matches when
/// it equals the query, or when one of its sides equals the query:
///
/// - `"swe"` matches either side,
/// - `"-eng"` matches the destination side,
/// - `"swe-"` (or `"s-we"`) matches the source side against the query with
///   its dashes removed.
///
/// Short and long names additionally match on a case-insensitive substring;
/// ids never do.
pub fn filter<'a>(records: &'a [Dictionary], query: &str, scope: MatchScope) -> Vec<&'a Dictionary> {
    let query = strip_quotes(query);
    let scope = scope.effective();

    records
        .iter()
        .filter(|dict| {
            (scope.id && field_matches(dict.id(), &query, false))
                || (scope.short && field_matches(dict.short(), &query, true))
                || (scope.long && field_matches(dict.long(), &query, true))
        })
        .collect()
}

/// Outcome of resolving free text to a single dictionary
#[derive(Debug, PartialEq)]
pub enum Resolution<'a> {
    /// Nothing matched; callers fall back to all dictionaries
    NoMatch,
    Unique(&'a Dictionary),
    Ambiguous(Vec<&'a Dictionary>),
}

/// Resolve user supplied text such as `"2-1"`, `"swe-eng"` or `"Swedish-"`
/// to one dictionary, matching against every field.
pub fn resolve<'a>(records: &'a [Dictionary], text: &str) -> Resolution<'a> {
    let mut matches = filter(records, text, MatchScope::default());
    match matches.len() {
        0 => Resolution::NoMatch,
        1 => Resolution::Unique(matches.remove(0)),
        _ => Resolution::Ambiguous(matches),
    }
}

fn strip_quotes(query: &str) -> String {
    query.replace(['"', '\''], "")
}

fn field_matches(field: &Composite, query: &str, substring: bool) -> bool {
    if field.as_str() == query {
        return true;
    }

    let contains = || substring && contains_ignore_case(field.as_str(), query);

    match query.find('-') {
        None => field.source() == query || field.destination() == query || contains(),
        Some(pos) => {
            let bare = query.replace('-', "");
            let side = if pos == 0 {
                field.destination()
            } else {
                field.source()
            };
            side == bare || contains()
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.to_lowercase().contains(&needle.to_lowercase())
}
