use std::env;

use rustc_hash::FxHashMap;

use crate::{
    CaseSensitivity, FilterError, FilterSense, PathFilter, PatternFilter, PatternKind, join, trace,
};

/// Callback consulted for `--key=value` options the collector does not own.
///
/// Returning `false` declines the option: it is dropped instead of being
/// recorded in the option map. The token itself stays in the argument list
/// either way.
pub type OptionFallback<'a> = dyn FnMut(&str, &str) -> bool + 'a;

/// Outcome of scanning an argument list for filter flags.
#[derive(Debug)]
pub struct CollectedFilters {
    /// `--key=value` options observed but not owned by the collector, keyed
    /// by lowercase name, last occurrence winning.
    pub options: FxHashMap<String, String>,
    /// All filter flags folded into a single filter, in their original
    /// left-to-right order. An empty composite when no flags were present.
    pub filter: PathFilter,
}

/// Extracts ordered `--include`/`--exclude` flags from raw CLI tokens.
///
/// Regular option parsing is position-ignorant, but filter precedence is
/// determined by flag order, so filter flags are pulled out of the raw token
/// list before any other option handling sees them.
#[derive(Clone, Copy, Debug, Default)]
pub struct FilterCollector {
    case: CaseSensitivity,
}

impl FilterCollector {
    /// Creates a collector compiling patterns under the given sensitivity.
    #[must_use]
    pub const fn new(case: CaseSensitivity) -> Self {
        Self { case }
    }

    /// Scans `args`, consuming filter flags and folding them into one filter.
    ///
    /// Recognized filter keys (case-insensitive, the leading `--` is
    /// mandatory): `--include=`, `--exclude=`, `--include-regexp=`,
    /// `--exclude-regexp=`. Each occurrence is removed from `args`, its
    /// value unwrapped from one optional pair of double quotes and expanded
    /// for environment variables, then compiled into an atomic rule. Rule
    /// order equals flag order, include/exclude interleavings included, and
    /// the rules are folded left-to-right with [`join`].
    ///
    /// Every other `--key=value` token is left in `args` and offered to
    /// `fallback`; a declined option is dropped. Without a callback such
    /// options are recorded in the returned map, last occurrence winning.
    ///
    /// Malformed patterns fail here, at construction time, never on first
    /// match.
    pub fn collect(
        &self,
        args: &mut Vec<String>,
        mut fallback: Option<&mut OptionFallback<'_>>,
    ) -> Result<CollectedFilters, FilterError> {
        let mut options = FxHashMap::default();
        let mut folded: Option<PathFilter> = None;
        let mut index = 0;
        while index < args.len() {
            let Some((key, value)) = split_option(&args[index]) else {
                index += 1;
                continue;
            };
            if let Some((sense, kind)) = filter_key(key) {
                let pattern = expand_env(strip_quotes(value));
                let atom = match kind {
                    PatternKind::Glob => PatternFilter::glob(sense, pattern, self.case)?,
                    PatternKind::Regex => PatternFilter::regex(sense, pattern, self.case)?,
                };
                trace::rule_collected(
                    atom.pattern(),
                    sense.is_include(),
                    matches!(kind, PatternKind::Regex),
                );
                folded = join(folded.take(), Some(PathFilter::Pattern(atom)));
                args.remove(index);
            } else {
                let record = match &mut fallback {
                    Some(callback) => callback(key, value),
                    None => true,
                };
                if record {
                    options.insert(key.to_ascii_lowercase(), value.to_owned());
                }
                index += 1;
            }
        }
        Ok(CollectedFilters {
            options,
            filter: folded.unwrap_or_else(PathFilter::empty),
        })
    }
}

/// Splits a `--key=value` token; anything else is not an option.
fn split_option(token: &str) -> Option<(&str, &str)> {
    let body = token.strip_prefix("--")?;
    let (key, value) = body.split_once('=')?;
    if key.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Maps recognized filter keys onto their sense and pattern kind.
fn filter_key(key: &str) -> Option<(FilterSense, PatternKind)> {
    if key.eq_ignore_ascii_case("include") {
        Some((FilterSense::Include, PatternKind::Glob))
    } else if key.eq_ignore_ascii_case("exclude") {
        Some((FilterSense::Exclude, PatternKind::Glob))
    } else if key.eq_ignore_ascii_case("include-regexp") {
        Some((FilterSense::Include, PatternKind::Regex))
    } else if key.eq_ignore_ascii_case("exclude-regexp") {
        Some((FilterSense::Exclude, PatternKind::Regex))
    } else {
        None
    }
}

/// Strips one matching pair of wrapping double quotes.
fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(value)
}

/// Expands `$NAME`, `${NAME}`, and `%NAME%` references against the process
/// environment. Unknown variables are left untouched.
fn expand_env(value: &str) -> String {
    expand_with(value, |name| env::var(name).ok())
}

fn expand_with<F>(value: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while !rest.is_empty() {
        if let Some(remaining) = expand_at(rest, &mut out, &mut lookup) {
            rest = remaining;
            continue;
        }
        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            out.push(ch);
            rest = chars.as_str();
        }
    }
    out
}

/// Tries to expand a variable reference at the head of `rest`; on success
/// appends the expansion and returns the remaining input.
fn expand_at<'a, F>(rest: &'a str, out: &mut String, lookup: &mut F) -> Option<&'a str>
where
    F: FnMut(&str) -> Option<String>,
{
    if let Some(body) = rest.strip_prefix("${") {
        let end = body.find('}')?;
        let expansion = named(&body[..end], lookup)?;
        out.push_str(&expansion);
        return Some(&body[end + 1..]);
    }
    if let Some(body) = rest.strip_prefix('%') {
        let end = body.find('%')?;
        let expansion = named(&body[..end], lookup)?;
        out.push_str(&expansion);
        return Some(&body[end + 1..]);
    }
    if let Some(body) = rest.strip_prefix('$') {
        let len = body
            .chars()
            .take_while(|ch| ch.is_ascii_alphanumeric() || *ch == '_')
            .count();
        if len == 0 {
            return None;
        }
        let expansion = named(&body[..len], lookup)?;
        out.push_str(&expansion);
        return Some(&body[len..]);
    }
    None
}

fn named<F>(name: &str, lookup: &mut F) -> Option<String>
where
    F: FnMut(&str) -> Option<String>,
{
    if name.is_empty() {
        return None;
    }
    lookup(name)
}
