use log::{info, warn};
use std::fmt;

/// Why a name was refused by the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameViolation {
    /// The name does not match the scalar or array-element naming pattern.
    Pattern,
    /// The name contains a keyword or function name.
    ReservedWord(&'static str),
}

impl fmt::Display for NameViolation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NameViolation::Pattern => write!(f, "names must contain a letter and only letters, digits or '_'"),
            NameViolation::ReservedWord(word) => write!(f, "names may not contain the reserved word '{}'", word),
        }
    }
}

/// A side-channel event raised by the environment while a script runs.
///
/// Array elements are named by their synthesized key, e.g. `A$3`.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    Created { name: String, value: f32 },
    Updated { name: String, value: f32 },
    InvalidName { name: String, reason: NameViolation },
    UndefinedReference { name: String },
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Diagnostic::InvalidName { .. } | Diagnostic::UndefinedReference { .. }
        )
    }

    pub fn name(&self) -> &str {
        match self {
            Diagnostic::Created { name, .. }
            | Diagnostic::Updated { name, .. }
            | Diagnostic::InvalidName { name, .. }
            | Diagnostic::UndefinedReference { name } => name,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Diagnostic::Created { name, value } => {
                write!(f, "added new variable {} with value {}", name, value)
            }
            Diagnostic::Updated { name, value } => {
                write!(f, "updated variable {} with value {}", name, value)
            }
            Diagnostic::InvalidName { name, reason } => {
                write!(f, "invalid variable name '{}': {}", name, reason)
            }
            Diagnostic::UndefinedReference { name } => {
                write!(f, "undefined variable '{}', using 0", name)
            }
        }
    }
}

/// Receiver for diagnostics. Emission is fire-and-forget.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            warn!("{}", diagnostic);
        } else {
            info!("{}", diagnostic);
        }
    }
}

/// Records every diagnostic, for hosts and tests that inspect them.
impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
