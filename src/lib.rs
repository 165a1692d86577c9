//! `declarg` is a declarative command line parser for Rust.
//!
//! The caller declares the vocabulary of the program with short specification strings, then hands over the raw argument vector.
//! Every token is classified, values are bound to the declared options, defaults are filled in, and unmet requirements are reported as soft errors.
//! `declarg` never prints, never reads files and never exits the process; that is left to the caller.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/backup.rs")]
//! ```
//!
//! ```console
//! $ backup -vz --since -3days -t /mnt/backup home etc var
//! verbose: true, compress: true
//! since: -3days
//! destination: /mnt/backup
//! sources: ["home", "etc", "var"]
//!
//! $ backup -v home
//! Parse error: Parameter -t is required
//! ```
//!
//! # Declarations
//! A declaration names one or more aliases, optionally followed by a marker and a default:
//! ```text
//! decl     := namelist marker? ('=' default)? marker?
//! namelist := name (',' name)*
//! name     := ':' identifier | '-' char | '--' identifier
//! marker   := '+' | '*'
//! ```
//!
//! | Declaration | Meaning |
//! |---|---|
//! | `-v` / `--flag` | A flag; it is present or not, and never carries a value. |
//! | `-s,--long` | Aliases; any of them may be used on the Cli or in queries. |
//! | `--after=2009-01-01` | An option taking a value, defaulting to `2009-01-01`. |
//! | `--after=` | An option taking a value, without a default. |
//! | `-I*=` | Every occurrence appends a value (otherwise, the last occurrence wins). |
//! | `--target+=` | A required option; its absence is reported by [`Options::errors`]. |
//! | `:file` | A positional parameter, claiming one bare value in declaration order. |
//! | `:files+` | A greedy positional parameter, claiming every remaining bare value. |
//!
//! # Tokens
//! * `--name`, `--name=value`: a long option.
//! A value taking option without `=value` takes the next token, whatever it looks like (ex: `--since -3days`).
//! * `-abc`, `-abc=value`: an aggregate of short options.
//! Only the final short option may take a value; otherwise the remainder of the token is rejected with an error.
//! * Anything else, including a lone `-` or a token starting with `-=`, is a bare value for the positional parameters.
//!
//! Unknown options are ignored.
//!
//! # Features
//! * `tracing_debug`: Emit `tracing` debug events describing how each token is matched.
//!
//! # Errors
//! Mistakes in the declarations are programming errors: [`Options::define`] returns them immediately as a [`ConfigError`].
//! Mistakes in the arguments are collected, in order, and available from [`Options::errors`].
pub use declarg_core::*;
