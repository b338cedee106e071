//! Precompiled matcher over declared package names and globs.

use regex::Regex;

/// What: Single compiled predicate answering "was this package intended?".
///
/// Inputs: Declared names where `*` matches any substring.
///
/// Output: `is_intentional(name)` is true when `name` matches one declared
/// pattern in full.
///
/// Details:
/// - All patterns are folded into one anchored alternation at construction so
///   each lookup is one regex match.
/// - Every character other than `*` is matched literally.
#[derive(Debug, Clone)]
pub struct IntentMatcher {
    /// The anchored alternation built from all patterns.
    regex: Regex,
}

impl IntentMatcher {
    /// What: Compile `patterns` into one matcher.
    ///
    /// # Errors
    /// - Returns `Err(Error::Pattern)` if the generated expression exceeds the
    ///   regex engine's size limits.
    pub fn new<I, S>(patterns: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let regex = Regex::new(&glob_expression(patterns))?;
        Ok(Self { regex })
    }

    /// Whether `name` matches at least one declared pattern.
    #[must_use]
    pub fn is_intentional(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// The compiled expression, for debugging output.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Whether `pattern` contains a wildcard.
#[must_use]
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains('*')
}

/// What: Translate globs into a single anchored regular expression.
///
/// Details:
/// - `a*b` becomes `a.*b`; the alternation is wrapped in `^(...)$` so an empty
///   set only matches the empty string, which is never a package name.
fn glob_expression<I, S>(patterns: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let alternatives: Vec<String> = patterns
        .into_iter()
        .map(|glob| {
            glob.as_ref()
                .split('*')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(".*")
        })
        .collect();
    format!("^({})$", alternatives.join("|"))
}
