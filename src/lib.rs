// Minterp: a minimal embeddable scripting interpreter.
//
// A host hands it a script, the script runs to completion, and the host
// reads back the scalars and sparse arrays it left behind.

pub mod ast;
pub mod builtins;
pub mod config;
pub mod diagnostics;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod interpreter;
pub mod lexer;
pub mod normalize;
pub mod parser;
pub mod runner;

pub use ast::{Condition, Expr, Program, Stmt};
pub use config::Config;
pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink, NameViolation};
pub use environment::Environment;
pub use error::{ErrorKind, ScriptError, Span};
pub use evaluator::Evaluator;
pub use interpreter::{parse_program, Interpreter};
pub use lexer::{Lexer, Token, TokenType};
pub use parser::Parser;

pub use runner::run;
