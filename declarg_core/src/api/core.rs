use std::cell::OnceCell;
use std::env;

use crate::api::ParseResult;
use crate::definition::{ConfigError, Vocabulary};
use crate::matcher::{TokenMatcher, Violation};

/// The declarative command line parser.
///
/// Declare the accepted vocabulary with [`Options::define`], then query.
/// The arguments are parsed once, on the first query (or [`Options::parse`]), and the result is kept for every later query.
///
/// ### Example
/// ```
/// # use declarg_core as declarg;
/// use declarg::Options;
///
/// let options = Options::new(["program", "-v", "--after", "2008-01-01", "notes.txt"])
///     .define(["--after=2009-01-01", "-v,--verbose", "--flag", ":file"])
///     .unwrap();
///
/// assert!(options.has("--verbose"));
/// assert!(!options.has("--flag"));
/// assert_eq!(options.value("--after"), Some("2008-01-01"));
/// assert_eq!(options.value(":file"), Some("notes.txt"));
/// assert!(options.errors().is_empty());
/// ```
#[derive(Debug)]
pub struct Options {
    tokens: Vec<String>,
    vocabulary: Vocabulary,
    result: OnceCell<ParseResult>,
}

impl Options {
    /// Create a parser over a full argument vector.
    ///
    /// The first element (the program) is discarded.
    pub fn new<I, S>(arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: arguments.into_iter().skip(1).map(Into::into).collect(),
            vocabulary: Vocabulary::default(),
            result: OnceCell::new(),
        }
    }

    /// Create a parser over the Cli [`env::args`].
    pub fn from_env() -> Self {
        Self::new(env::args())
    }

    /// Declare options and positional parameters.
    /// May be repeated; positional order follows the overall declaration order.
    ///
    /// Declarations take the form `names[marker][=default][marker]`:
    /// * `-v`, `--verbose`, `-v,--verbose`: a flag, which never carries a value.
    /// * `--after=2009-01-01`: an option taking a value, with a default (`--after=` for none).
    /// * `-I*=`: a repeatable option, accumulating every value.
    /// * `--name+`: a required option.
    /// * `:file`: a positional parameter; `:files+` claims every remaining bare value.
    ///
    /// ### Example
    /// ```
    /// # use declarg_core as declarg;
    /// use declarg::{ConfigError, Options};
    ///
    /// let error = Options::new(["program"])
    ///     .define(["-v", "--verbose,-v"])
    ///     .unwrap_err();
    ///
    /// assert_eq!(error, ConfigError::DuplicateName("-v".to_string()));
    /// ```
    pub fn define<I, S>(mut self, declarations: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.result.get().is_some() {
            return Err(ConfigError::AlreadyParsed);
        }

        for declaration in declarations {
            self.vocabulary.define(declaration.as_ref())?;
        }

        Ok(self)
    }

    /// Parse the arguments, if not already done.
    pub fn parse(self) -> Self {
        self.result();
        self
    }

    /// The memoized parse result.
    pub fn result(&self) -> &ParseResult {
        self.result.get_or_init(|| {
            let mut token_matcher = TokenMatcher::new(self.vocabulary.clone());

            for token in &self.tokens {
                token_matcher.feed(token);
            }

            token_matcher.close()
        })
    }

    /// See [`ParseResult::has`].
    pub fn has(&self, name: &str) -> bool {
        self.result().has(name)
    }

    /// See [`ParseResult::has_any`].
    pub fn has_any(&self, names: &[&str]) -> bool {
        self.result().has_any(names)
    }

    /// See [`ParseResult::value`].
    pub fn value(&self, name: &str) -> Option<&str> {
        self.result().value(name)
    }

    /// See [`ParseResult::values`].
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.result().values(name)
    }

    /// See [`ParseResult::fetch`].
    pub fn fetch<'a>(&'a self, name: &str, fallback: &'a str) -> &'a str {
        self.result().fetch(name, fallback)
    }

    /// See [`ParseResult::count`].
    pub fn count(&self, name: &str) -> usize {
        self.result().count(name)
    }

    /// See [`ParseResult::errors`].
    pub fn errors(&self) -> Vec<String> {
        self.result().errors()
    }

    /// See [`ParseResult::violations`].
    pub fn violations(&self) -> &[Violation] {
        self.result().violations()
    }

    /// See [`ParseResult::unclaimed`].
    pub fn unclaimed(&self) -> &[String] {
        self.result().unclaimed()
    }
}
