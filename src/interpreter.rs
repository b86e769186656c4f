use crate::ast::Program;
use crate::config::Config;
use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::environment::Environment;
use crate::error::ScriptError;
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;
use log::debug;

/// Lex and parse a whole script into its block tree.
pub fn parse_program(source: &str) -> Result<Program, ScriptError> {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.scan_tokens()?;
    let mut parser = Parser::new(tokens);
    parser.parse()
}

/// A script that has been run to completion, and the variables it left
/// behind.
///
/// Constructing an interpreter parses and executes the whole program before
/// returning; the host then reads or writes values through the accessors.
/// Each instance owns its environment, so independent scripts never share
/// state.
pub struct Interpreter<S = LogSink> {
    evaluator: Evaluator<S>,
}

impl Interpreter<LogSink> {
    /// Run `source` with no execution limits, logging diagnostics.
    pub fn new(source: &str) -> Result<Self, ScriptError> {
        Self::with_sink(source, Config::default(), LogSink)
    }

    pub fn with_config(source: &str, config: Config) -> Result<Self, ScriptError> {
        Self::with_sink(source, config, LogSink)
    }
}

impl<S: DiagnosticSink> Interpreter<S> {
    /// Run `source`, sending diagnostics to `sink`.
    pub fn with_sink(source: &str, config: Config, sink: S) -> Result<Self, ScriptError> {
        let program = parse_program(source)?;
        let mut evaluator = Evaluator::new(Environment::new(sink), config);
        evaluator.evaluate_program(&program)?;
        debug!("script ran to completion");
        Ok(Self { evaluator })
    }

    /// Returns `false` if the name was refused.
    pub fn set_variable(&mut self, name: &str, value: f32) -> bool {
        self.evaluator.environment_mut().set(name, value, false)
    }

    /// Unset names read as 0.
    pub fn get_variable(&mut self, name: &str) -> f32 {
        self.evaluator.environment_mut().get(name)
    }

    /// Copy host data into array `name`, at indices `0..values.len()`.
    pub fn initialise_array(&mut self, name: &str, values: &[f32]) {
        self.evaluator.environment_mut().load_array(name, values);
    }

    pub fn update_array(&mut self, name: &str, index: usize, value: f32) -> bool {
        self.evaluator
            .environment_mut()
            .set_element(name, index, value)
    }

    pub fn get_array_item(&mut self, name: &str, index: usize) -> f32 {
        self.evaluator.environment_mut().get_element(name, index)
    }

    /// Evaluate a single arithmetic expression against the current variables.
    pub fn evaluate(&mut self, expression: &str) -> Result<f32, ScriptError> {
        let tokens = Lexer::new(expression).scan_tokens()?;
        let expr = Parser::new(tokens).parse_expression()?;
        self.evaluator.evaluate_expression(&expr)
    }

    /// Evaluate a condition such as `x > 1 && y != 2`.
    pub fn evaluate_condition(&mut self, condition: &str) -> Result<bool, ScriptError> {
        let tokens = Lexer::new(condition).scan_tokens()?;
        let condition = Parser::new(tokens).parse_condition()?;
        self.evaluator.evaluate_condition(&condition)
    }

    pub fn environment(&self) -> &Environment<S> {
        self.evaluator.environment()
    }

    pub fn sink(&self) -> &S {
        self.evaluator.environment().sink()
    }

    pub fn into_sink(self) -> S {
        self.evaluator.into_environment().into_sink()
    }
}
