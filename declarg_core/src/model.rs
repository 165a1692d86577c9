/// Whether a definition is addressed by a dash-prefixed switch or by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `-x` or `--name`.
    Named,
    /// `:name`.
    Positional,
}

/// The closed set of definition shapes.
///
/// Matching and querying dispatch on this tag alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    /// A named switch which never carries a value (declared without `=`).
    Flag,
    /// A named option which binds a value (declared with `=`, possibly an empty default).
    Valued,
    /// A positional parameter which claims at most one bare value.
    Positional,
    /// A positional parameter (`+`) which claims every remaining bare value.
    Greedy,
}

impl Class {
    /// The kind of identifiers this class is declared with.
    pub fn kind(&self) -> Kind {
        match self {
            Class::Flag | Class::Valued => Kind::Named,
            Class::Positional | Class::Greedy => Kind::Positional,
        }
    }
}

impl std::fmt::Display for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One compiled declaration, such as `-s,--long=llamas` or `:files+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDefinition {
    names: Vec<String>,
    class: Class,
    multi: bool,
    required: bool,
    default: Option<String>,
}

impl OptionDefinition {
    pub(crate) fn new(
        names: Vec<String>,
        class: Class,
        multi: bool,
        required: bool,
        default: Option<String>,
    ) -> Self {
        Self {
            names,
            class,
            multi,
            required,
            default,
        }
    }

    /// All aliases, in declaration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The first declared alias, used when reporting errors.
    pub fn canonical(&self) -> &str {
        // A definition is never compiled without at least one name.
        self.names.first().map(String::as_str).unwrap_or_default()
    }

    /// The shape of this definition.
    pub fn class(&self) -> Class {
        self.class
    }

    /// Shorthand for `self.class().kind()`.
    pub fn kind(&self) -> Kind {
        self.class.kind()
    }

    /// Whether occurrences of this definition bind values.
    ///
    /// Flags never do.
    /// Positional parameters always do; for them `=` only introduces a default.
    pub fn takes_value(&self) -> bool {
        !matches!(self.class, Class::Flag)
    }

    /// Whether repeated occurrences accumulate (`*`) instead of overwriting.
    pub fn multi(&self) -> bool {
        self.multi
    }

    /// Whether absence of this named option is reported (`+`).
    pub fn required(&self) -> bool {
        self.required
    }

    /// Whether this positional parameter claims every remaining bare value (`+`).
    pub fn greedy(&self) -> bool {
        matches!(self.class, Class::Greedy)
    }

    /// The declared default, if a non-empty one was given.
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }
}

/// The mutable result of matching, one per [`OptionDefinition`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingRecord {
    present: bool,
    occurrences: usize,
    collected: Vec<String>,
    shadowed: bool,
}

impl BindingRecord {
    /// Whether the definition was explicitly observed on the command line.
    pub fn present(&self) -> bool {
        self.present
    }

    /// How many times the definition was explicitly observed.
    pub fn occurrences(&self) -> usize {
        self.occurrences
    }

    /// The values bound to the definition, in order.
    pub fn collected(&self) -> &[String] {
        &self.collected
    }

    /// Whether a greedy positional parameter declared earlier left nothing for this one.
    ///
    /// A shadowed definition answers no values at all, not even its default.
    pub fn shadowed(&self) -> bool {
        self.shadowed
    }

    pub(crate) fn mark(&mut self) {
        self.present = true;
        self.occurrences += 1;
    }

    pub(crate) fn bind(&mut self, value: impl Into<String>, multi: bool) {
        if !multi {
            // Last occurrence wins.
            self.collected.clear();
        }

        self.collected.push(value.into());
    }

    pub(crate) fn claim(&mut self, values: impl IntoIterator<Item = String>) {
        for value in values {
            self.mark();
            self.collected.push(value);
        }
    }

    pub(crate) fn shadow(&mut self) {
        self.shadowed = true;
    }
}
