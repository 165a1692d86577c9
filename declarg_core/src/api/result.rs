use crate::definition::Vocabulary;
use crate::matcher::Violation;
use crate::model::*;

/// The bound state of one parse: every definition with its binding, the unclaimed bare values, and the collected violations.
///
/// Immutable once produced.
/// Querying an undeclared name is not an error; it answers as an absent definition without a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    vocabulary: Vocabulary,
    bindings: Vec<BindingRecord>,
    unclaimed: Vec<String>,
    violations: Vec<Violation>,
}

impl ParseResult {
    pub(crate) fn new(
        vocabulary: Vocabulary,
        bindings: Vec<BindingRecord>,
        unclaimed: Vec<String>,
        violations: Vec<Violation>,
    ) -> Self {
        Self {
            vocabulary,
            bindings,
            unclaimed,
            violations,
        }
    }

    fn lookup(&self, name: &str) -> Option<(&OptionDefinition, &BindingRecord)> {
        let index = self.vocabulary.resolve(name)?;
        Some((
            self.vocabulary.definitions().get(index)?,
            self.bindings.get(index)?,
        ))
    }

    /// The definition and binding declared under `name` (by any alias).
    pub fn binding(&self, name: &str) -> Option<(&OptionDefinition, &BindingRecord)> {
        self.lookup(name)
    }

    /// Whether the definition named `name` was observed.
    pub fn has(&self, name: &str) -> bool {
        self.lookup(name)
            .map(|(_, binding)| binding.present())
            .unwrap_or(false)
    }

    /// Whether any of the definitions in `names` was observed.
    pub fn has_any(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.has(name))
    }

    /// The first bound value, else the declared default.
    ///
    /// Always `None` for flags and for positional parameters declared after a greedy one.
    pub fn value(&self, name: &str) -> Option<&str> {
        let (definition, binding) = self.lookup(name)?;

        if !definition.takes_value() || binding.shadowed() {
            return None;
        }

        binding
            .collected()
            .first()
            .map(String::as_str)
            .or_else(|| definition.default_value())
    }

    /// All bound values, else the declared default as a single value.
    ///
    /// Always empty for flags and for positional parameters declared after a greedy one.
    pub fn values(&self, name: &str) -> Vec<&str> {
        let Some((definition, binding)) = self.lookup(name) else {
            return Vec::default();
        };

        if !definition.takes_value() || binding.shadowed() {
            return Vec::default();
        }

        if binding.collected().is_empty() {
            definition.default_value().into_iter().collect()
        } else {
            binding.collected().iter().map(String::as_str).collect()
        }
    }

    /// The value of `name` when it was observed, else `fallback`.
    ///
    /// Unlike [`ParseResult::value`], the declared default is not consulted for an absent definition.
    pub fn fetch<'a>(&'a self, name: &str, fallback: &'a str) -> &'a str {
        if self.has(name) {
            self.value(name).unwrap_or(fallback)
        } else {
            fallback
        }
    }

    /// How many times `name` was observed (for positional parameters, how many values they claimed).
    pub fn count(&self, name: &str) -> usize {
        self.lookup(name)
            .map(|(_, binding)| binding.occurrences())
            .unwrap_or(0)
    }

    /// The collected violations, rendered as messages.
    pub fn errors(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    /// The collected violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// The bare values no positional parameter claimed.
    pub fn unclaimed(&self) -> &[String] {
        &self.unclaimed
    }
}
