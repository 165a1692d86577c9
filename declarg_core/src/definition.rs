use std::collections::HashMap;
use thiserror::Error;

use crate::model::*;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A mistake in the declared option vocabulary.
///
/// These are programming errors, so they are returned immediately from `Options::define` rather than collected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The declaration has no recognizable name, or an otherwise invalid shape.
    #[error("Malformed declaration '{0}'.")]
    Malformed(String),

    /// The declaration mixes positional (`:`) and named (`-`) identifiers.
    #[error("Declaration '{0}' mixes positional and named identifiers.")]
    MixedKinds(String),

    /// The identifier was already declared.
    #[error("Cannot duplicate the parameter '{0}'.")]
    DuplicateName(String),

    /// Definitions may not be added once the arguments have been parsed.
    #[error("Cannot define parameters after parsing.")]
    AlreadyParsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Required,
    Multi,
}

fn strip_marker(text: &str) -> (&str, Option<Marker>) {
    if let Some(rest) = text.strip_suffix('+') {
        (rest, Some(Marker::Required))
    } else if let Some(rest) = text.strip_suffix('*') {
        (rest, Some(Marker::Multi))
    } else {
        (text, None)
    }
}

fn is_identifier(ident: &str) -> bool {
    !ident.is_empty()
        && ident
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

fn is_short(single: char) -> bool {
    !single.is_whitespace() && !matches!(single, '-' | '=' | ',' | '+' | '*' | ':')
}

fn name_kind(name: &str) -> Option<Kind> {
    if let Some(ident) = name.strip_prefix(':') {
        is_identifier(ident).then_some(Kind::Positional)
    } else if let Some(ident) = name.strip_prefix("--") {
        (is_identifier(ident) && !ident.starts_with('-')).then_some(Kind::Named)
    } else if let Some(rest) = name.strip_prefix('-') {
        let mut chars = rest.chars();

        match (chars.next(), chars.next()) {
            (Some(single), None) if is_short(single) => Some(Kind::Named),
            _ => None,
        }
    } else {
        None
    }
}

/// Compile a single declaration string into an [`OptionDefinition`].
///
/// ```text
/// decl     := namelist marker? ('=' default)? marker?
/// namelist := name (',' name)*
/// name     := ':' identifier | '-' char | '--' identifier
/// marker   := '+' | '*'
/// ```
pub fn compile(declaration: &str) -> Result<OptionDefinition, ConfigError> {
    let malformed = || ConfigError::Malformed(declaration.to_string());
    let (head, tail) = match declaration.split_once('=') {
        Some((h, t)) => (h, Some(t)),
        None => (declaration, None),
    };
    let (namelist, mut marker) = strip_marker(head);

    if strip_marker(namelist).1.is_some() {
        return Err(malformed());
    }

    let default = match tail {
        // A marker may trail the default, but only when none preceded the '='.
        Some(text) if marker.is_none() => {
            let (text, trailing) = strip_marker(text);
            marker = trailing;
            Some(text)
        }
        Some(text) => Some(text),
        None => None,
    };

    let mut names = Vec::default();
    let mut kind: Option<Kind> = None;

    for name in namelist.split(',') {
        let name_kind = name_kind(name).ok_or_else(malformed)?;

        match kind {
            Some(k) if k != name_kind => {
                return Err(ConfigError::MixedKinds(declaration.to_string()));
            }
            _ => {
                kind.replace(name_kind);
            }
        }

        names.push(name.to_string());
    }

    let class = match (kind.ok_or_else(malformed)?, marker) {
        (Kind::Named, _) if default.is_some() => Class::Valued,
        (Kind::Named, _) => Class::Flag,
        (Kind::Positional, Some(Marker::Required)) => Class::Greedy,
        (Kind::Positional, _) => Class::Positional,
    };
    let required = class.kind() == Kind::Named && marker == Some(Marker::Required);
    let multi = marker == Some(Marker::Multi);
    // An empty default still makes the option take a value, but answers nothing when absent.
    let default = default
        .filter(|text| !text.is_empty())
        .map(ToString::to_string);

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Compiled '{declaration}' into {class} {names:?} (multi: {multi}, required: {required}, default: {default:?}).");
    }

    Ok(OptionDefinition::new(names, class, multi, required, default))
}

/// The ordered set of definitions, with one resolution table keyed by every identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    definitions: Vec<OptionDefinition>,
    lookup: HashMap<String, usize>,
}

impl Vocabulary {
    /// Compile and register a declaration.
    ///
    /// Nothing is registered if any of its names is already taken.
    pub fn define(&mut self, declaration: &str) -> Result<(), ConfigError> {
        let definition = compile(declaration)?;
        let index = self.definitions.len();

        for (position, name) in definition.names().iter().enumerate() {
            if self.lookup.contains_key(name) || definition.names()[..position].contains(name) {
                return Err(ConfigError::DuplicateName(name.clone()));
            }
        }

        for name in definition.names() {
            self.lookup.insert(name.clone(), index);
        }

        self.definitions.push(definition);
        Ok(())
    }

    /// The index of the definition declaring `name`, if any.
    pub fn resolve(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    /// The definition declaring `name`, if any.
    pub fn get(&self, name: &str) -> Option<&OptionDefinition> {
        self.resolve(name)
            .and_then(|index| self.definitions.get(index))
    }

    /// All definitions, in declaration order.
    pub fn definitions(&self) -> &[OptionDefinition] {
        &self.definitions
    }

    /// The number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether nothing has been defined.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
