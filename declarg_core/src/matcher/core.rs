use std::collections::VecDeque;

use crate::api::ParseResult;
use crate::definition::Vocabulary;
use crate::matcher::model::*;
use crate::matcher::positional::allocate;
use crate::model::*;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Single pass, left to right binder of raw tokens against a [`Vocabulary`].
#[derive(Debug)]
pub(crate) struct TokenMatcher {
    vocabulary: Vocabulary,
    bindings: Vec<BindingRecord>,
    queue: VecDeque<String>,
    violations: Vec<Violation>,
    // The value taking option still waiting for the next token.
    buffer: Option<usize>,
}

impl TokenMatcher {
    pub(crate) fn new(vocabulary: Vocabulary) -> Self {
        let bindings = vec![BindingRecord::default(); vocabulary.len()];

        Self {
            vocabulary,
            bindings,
            queue: VecDeque::default(),
            violations: Vec::default(),
            buffer: None,
        }
    }

    pub(crate) fn feed(&mut self, token: &str) {
        // A pending value is taken unconditionally, even when it looks like an option (ex: '-3months').
        if let Some(index) = self.buffer.take() {
            self.bind(index, token);
            return;
        }

        // 1. Find a 'long' option, such as:
        //  --after
        //  --after ..
        //  --after=..
        // 2. Find 'short' option(s), such as (both -v and -r are example short options):
        //  -v
        //  -vr
        //  -vr ..
        //  -vr=..
        // 3. Queue a bare value for the positional parameters (including '-' and '-=..').
        if let Some(body) = token.strip_prefix("--") {
            self.match_option(split_equals_delimiter(body));
        } else if let Some(body) = token
            .strip_prefix('-')
            .filter(|body| !body.is_empty() && !body.starts_with('='))
        {
            self.match_option_short(token, split_equals_delimiter(body));
        } else {
            self.queue.push_back(token.to_string());
        }
    }

    fn match_option(&mut self, (option_name, single_argument): (&str, Option<&str>)) {
        match self.vocabulary.resolve(&format!("--{option_name}")) {
            Some(index) => self.occur(index, single_argument),
            None => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Ignoring unknown option '--{option_name}'.");
                }
            }
        }
    }

    fn match_option_short(
        &mut self,
        token: &str,
        (short_option_name, single_argument): (&str, Option<&str>),
    ) {
        let length = short_option_name.chars().count();

        for (position, single) in short_option_name.chars().enumerate() {
            let Some(index) = self.vocabulary.resolve(&format!("-{single}")) else {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Ignoring unknown short option '-{single}' in '{token}'.");
                }

                continue;
            };
            let terminal = position + 1 == length;

            if terminal {
                // Only the final option may accept values.
                self.occur(index, single_argument);
            } else if self.definition(index).takes_value() {
                let name = self.definition(index).canonical().to_string();

                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Rejecting the remainder of '{token}' at value taking option {name}.");
                }

                self.violations.push(Violation::InvalidAggregate {
                    name,
                    token: token.to_string(),
                });
                return;
            } else {
                self.occur(index, None);
            }
        }
    }

    fn occur(&mut self, index: usize, single_argument: Option<&str>) {
        self.bindings[index].mark();

        if self.definition(index).takes_value() {
            match single_argument {
                Some(value) => self.bind(index, value),
                // Take the next token as the value.
                None => self.update_buffer(Some(index)),
            }
        } else if let Some(_value) = single_argument {
            #[cfg(feature = "tracing_debug")]
            {
                debug!(
                    "Discarding value '{_value}' given to flag {}.",
                    self.definition(index).canonical()
                );
            }
        }
    }

    fn bind(&mut self, index: usize, value: &str) {
        let multi = self.definition(index).multi();

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Bound '{value}' to {}.",
                self.definition(index).canonical()
            );
        }

        self.bindings[index].bind(value, multi);
    }

    fn update_buffer(&mut self, next_buffer: Option<usize>) {
        let _previous_buffer = std::mem::replace(&mut self.buffer, next_buffer);

        #[cfg(feature = "tracing_debug")]
        {
            if let Some(index) = _previous_buffer {
                debug!(
                    "Option {} received no value.",
                    self.definition(index).canonical()
                );
            }
        }
    }

    fn definition(&self, index: usize) -> &OptionDefinition {
        &self.vocabulary.definitions()[index]
    }

    pub(crate) fn close(mut self) -> ParseResult {
        // A value taking option at the very end stays present without a value.
        self.update_buffer(None);

        let TokenMatcher {
            vocabulary,
            mut bindings,
            queue,
            mut violations,
            ..
        } = self;
        let unclaimed = allocate(vocabulary.definitions(), &mut bindings, queue);

        for (definition, binding) in vocabulary.definitions().iter().zip(bindings.iter()) {
            if definition.required() && !binding.present() {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Required option {} is absent.", definition.canonical());
                }

                violations.push(Violation::Required(definition.canonical().to_string()));
            }
        }

        ParseResult::new(vocabulary, bindings, unclaimed, violations)
    }
}

fn split_equals_delimiter(token: &str) -> (&str, Option<&str>) {
    match token.split_once('=') {
        Some((n, v)) => (n, Some(v)),
        None => (token, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn matcher(declarations: &[&str]) -> TokenMatcher {
        let mut vocabulary = Vocabulary::default();

        for declaration in declarations {
            vocabulary.define(declaration).unwrap();
        }

        TokenMatcher::new(vocabulary)
    }

    fn run(declarations: &[&str], tokens: &[&str]) -> ParseResult {
        let mut tm = matcher(declarations);

        for token in tokens {
            tm.feed(token);
        }

        tm.close()
    }

    #[rstest]
    #[case("after", ("after", None))]
    #[case("after=", ("after", Some("")))]
    #[case("after=1=2", ("after", Some("1=2")))]
    #[case("", ("", None))]
    fn split(#[case] token: &str, #[case] expected: (&str, Option<&str>)) {
        assert_eq!(split_equals_delimiter(token), expected);
    }

    #[rstest]
    #[case(vec!["--after", "2008-01-01"])]
    #[case(vec!["--after=2008-01-01"])]
    #[case(vec!["-a", "2008-01-01"])]
    #[case(vec!["-a=2008-01-01"])]
    #[case(vec!["-va", "2008-01-01"])]
    #[case(vec!["-va=2008-01-01"])]
    fn option_value(#[case] tokens: Vec<&str>) {
        // Execute
        let result = run(&["-a,--after=2009-01-01", "-v"], &tokens);

        // Verify
        assert!(result.has("--after"));
        assert_eq!(result.value("-a"), Some("2008-01-01"));
        assert!(result.unclaimed().is_empty());
        assert!(result.errors().is_empty());
    }

    #[rstest]
    #[case("-3months")]
    #[case("--after")]
    #[case("plain")]
    fn option_value_taken_unconditionally(#[case] value: &str) {
        let result = run(&["-a=", "--after"], &["-a", value]);

        assert_eq!(result.value("-a"), Some(value));
        assert!(!result.has("--after"));
        assert!(result.unclaimed().is_empty());
    }

    #[rstest]
    #[case(false, vec!["3"])]
    #[case(true, vec!["1", "2", "3"])]
    fn option_repeat(#[case] multi: bool, #[case] expected: Vec<&str>) {
        // Setup
        let declaration = if multi { "--level*=" } else { "--level=" };

        // Execute
        let result = run(&[declaration], &["--level", "1", "--level=2", "--level", "3"]);

        // Verify
        assert_eq!(result.values("--level"), expected);
        assert_eq!(result.count("--level"), 3);
        assert!(result.errors().is_empty());
    }

    #[test]
    fn option_missing_trailing_value() {
        let result = run(&["--after=2009-01-01"], &["--after"]);

        assert!(result.has("--after"));
        assert_eq!(result.value("--after"), Some("2009-01-01"));
        assert!(result.errors().is_empty());
    }

    #[rstest]
    #[case(vec!["--flag=x"])]
    #[case(vec!["-f=x"])]
    #[case(vec!["-gf=x"])]
    fn flag_discards_inline_value(#[case] tokens: Vec<&str>) {
        let result = run(&["-f,--flag", "-g", ":rest"], &tokens);

        assert!(result.has("--flag"));
        assert_eq!(result.value("--flag"), None);
        assert!(!result.has(":rest"));
        assert!(result.unclaimed().is_empty());
    }

    #[rstest]
    #[case("--nope")]
    #[case("--nope=1")]
    #[case("--")]
    #[case("-q")]
    #[case("-3")]
    fn unknown_is_ignored(#[case] token: &str) {
        // Execute
        let result = run(&["-v", ":file"], &[token, "value"]);

        // Verify
        assert!(!result.has("-v"));
        assert_eq!(result.value(":file"), Some("value"));
        assert!(result.errors().is_empty());
    }

    #[test]
    fn unknown_short_inside_aggregate_is_skipped() {
        let result = run(&["-v", "-z"], &["-vqz"]);

        assert!(result.has("-v"));
        assert!(result.has("-z"));
        assert!(result.errors().is_empty());
    }

    #[rstest]
    #[case("-")]
    #[case("-=val")]
    #[case("-=")]
    fn dash_without_short_options_is_bare(#[case] token: &str) {
        // Execute
        let result = run(&[":first", ":second", "-v"], &[token, "a"]);

        // Verify
        assert_eq!(result.value(":first"), Some(token));
        assert_eq!(result.value(":second"), Some("a"));
        assert!(!result.has("-v"));
        assert!(result.errors().is_empty());
    }

    #[test]
    fn aggregate_flags() {
        let result = run(&["-v", "-x", "-z", "-q"], &["-vz", "-q"]);

        assert!(result.has("-v"));
        assert!(result.has("-z"));
        assert!(result.has("-q"));
        assert!(!result.has("-x"));
        assert!(result.errors().is_empty());
    }

    #[test]
    fn aggregate_counts_repeats() {
        let result = run(&["-v"], &["-vvv", "-v"]);

        assert_eq!(result.count("-v"), 4);
    }

    #[rstest]
    #[case(vec!["-vrz"], "-vrz")]
    #[case(vec!["-vrz=1"], "-vrz=1")]
    fn aggregate_rejected(#[case] tokens: Vec<&str>, #[case] token: &str) {
        // Execute
        let result = run(&["-v", "-r=", "-z"], &tokens);

        // Verify
        assert!(result.has("-v"));
        assert!(!result.has("-r"));
        assert!(!result.has("-z"));
        assert_eq!(result.value("-r"), None);
        assert_eq!(
            result.violations(),
            &[Violation::InvalidAggregate {
                name: "-r".to_string(),
                token: token.to_string(),
            }]
        );
    }

    #[test]
    fn aggregate_rejected_does_not_consume() {
        let result = run(&["-r=", "-z", ":file"], &["-rz", "name"]);

        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.value(":file"), Some("name"));
    }

    #[test]
    fn aggregate_rejected_once_per_token() {
        let result = run(&["-a=", "-b="], &["-ab", "-ba"]);

        assert_eq!(
            result.errors(),
            vec![
                "Parameter -a takes a value and cannot be aggregated in '-ab'",
                "Parameter -b takes a value and cannot be aggregated in '-ba'",
            ]
        );
    }

    #[test]
    fn required_in_declaration_order() {
        // Execute
        let result = run(&["--blargh+", "-v", "--second=+", "-t+"], &["-v", "-t"]);

        // Verify
        assert_eq!(
            result.errors(),
            vec![
                "Parameter --blargh is required",
                "Parameter --second is required",
            ]
        );
    }

    #[test]
    fn required_reported_after_aggregate() {
        let result = run(&["-a=", "-b", "--need+"], &["-ab"]);

        assert_matches!(result.violations(), [Violation::InvalidAggregate { .. }, Violation::Required(name)] => {
            assert_eq!(name, "--need");
        });
    }

    #[test]
    fn positional_after_options() {
        let result = run(
            &["-v", ":source", ":targets+"],
            &["a", "-v", "b", "--unknown", "c"],
        );

        assert!(result.has("-v"));
        assert_eq!(result.value(":source"), Some("a"));
        assert_eq!(result.values(":targets"), vec!["b", "c"]);
    }
}
