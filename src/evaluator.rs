use crate::ast::{BinaryOp, CompareOp, Condition, Expr, LogicalOp, Program, Stmt, Target};
use crate::config::Config;
use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::environment::Environment;
use crate::error::{ScriptError, Span};
use log::{debug, trace};
use std::time::Instant;

struct Budget {
    iterations: u64,
    started: Instant,
}

impl Budget {
    fn start() -> Self {
        Self {
            iterations: 0,
            started: Instant::now(),
        }
    }
}

/// Walks the block tree, evaluating expressions and conditions against the
/// environment it owns.
pub struct Evaluator<S = LogSink> {
    environment: Environment<S>,
    config: Config,
    budget: Budget,
}

impl<S: DiagnosticSink> Evaluator<S> {
    pub fn new(environment: Environment<S>, config: Config) -> Self {
        Self {
            environment,
            config,
            budget: Budget::start(),
        }
    }

    pub fn environment(&self) -> &Environment<S> {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut Environment<S> {
        &mut self.environment
    }

    pub fn into_environment(self) -> Environment<S> {
        self.environment
    }

    pub fn evaluate_program(&mut self, program: &Program) -> Result<(), ScriptError> {
        self.budget = Budget::start();
        self.execute_block(&program.statements)?;
        debug!(
            "program finished after {} loop iterations",
            self.budget.iterations
        );
        Ok(())
    }

    fn execute_block(&mut self, statements: &[Stmt]) -> Result<(), ScriptError> {
        for statement in statements {
            self.execute_statement(statement)?;
        }
        Ok(())
    }

    fn execute_statement(&mut self, stmt: &Stmt) -> Result<(), ScriptError> {
        match stmt {
            Stmt::Assign { target, value, .. } => {
                let value = self.evaluate_expression(value)?;
                self.assign(target, value)
            }
            Stmt::Block { statements, .. } => self.execute_block(statements),
            Stmt::If {
                branches,
                else_branch,
                ..
            } => {
                for branch in branches {
                    if self.evaluate_condition(&branch.condition)? {
                        return self.execute_block(&branch.body);
                    }
                }
                if let Some(body) = else_branch {
                    self.execute_block(body)?;
                }
                Ok(())
            }
            Stmt::While {
                condition, body, ..
            } => {
                while self.evaluate_condition(condition)? {
                    self.charge_iteration(condition.span())?;
                    self.execute_block(body)?;
                }
                Ok(())
            }
        }
    }

    fn assign(&mut self, target: &Target, value: f32) -> Result<(), ScriptError> {
        match target {
            Target::Variable { name, .. } => {
                self.environment.set(name, value, false);
            }
            Target::Element { name, index, .. } => {
                let index = self.evaluate_index(index)?;
                self.environment.set_element(name, index, value);
            }
        }
        Ok(())
    }

    pub fn evaluate_expression(&mut self, expr: &Expr) -> Result<f32, ScriptError> {
        match expr {
            Expr::Number { value, .. } => Ok(*value),
            Expr::Variable { name, .. } => Ok(self.environment.get(name)),
            Expr::Element { name, index, .. } => {
                let index = self.evaluate_index(index)?;
                Ok(self.environment.get_element(name, index))
            }
            Expr::Binary {
                left,
                operator,
                right,
                ..
            } => {
                let left_val = self.evaluate_expression(left)?;
                let right_val = self.evaluate_expression(right)?;
                Ok(evaluate_binary_op(*operator, left_val, right_val))
            }
            Expr::Negate { operand, .. } => Ok(-self.evaluate_expression(operand)?),
            Expr::Call {
                function, argument, ..
            } => {
                let argument = self.evaluate_expression(argument)?;
                Ok(function.apply(argument))
            }
            Expr::Grouping { expr, .. } => self.evaluate_expression(expr),
        }
    }

    pub fn evaluate_condition(&mut self, condition: &Condition) -> Result<bool, ScriptError> {
        match condition {
            Condition::Compare {
                left,
                operator,
                right,
                ..
            } => {
                let left_val = self.evaluate_expression(left)?;
                let right_val = self.evaluate_expression(right)?;
                Ok(compare(*operator, left_val, right_val))
            }
            Condition::Logical {
                left,
                operator,
                right,
                ..
            } => {
                // No short-circuit: the right side runs even when the left
                // already decides the result.
                let left_val = self.evaluate_condition(left)?;
                let right_val = self.evaluate_condition(right)?;
                Ok(match operator {
                    LogicalOp::And => left_val && right_val,
                    LogicalOp::Or => left_val || right_val,
                })
            }
        }
    }

    /// Indices are truncated toward zero.
    fn evaluate_index(&mut self, index: &Expr) -> Result<usize, ScriptError> {
        let value = self.evaluate_expression(index)?;
        let truncated = value.trunc();
        if !truncated.is_finite() || truncated < 0.0 {
            return Err(ScriptError::runtime_error_with_help(
                *index.span(),
                format!("Invalid array index: {}", value),
                "Array indices must be finite and not negative; fractions are truncated.".to_string(),
            ));
        }
        Ok(truncated as usize)
    }

    fn charge_iteration(&mut self, span: &Span) -> Result<(), ScriptError> {
        self.budget.iterations += 1;
        trace!("loop iteration {}", self.budget.iterations);

        if let Some(limit) = self.config.max_loop_iterations {
            if self.budget.iterations > limit {
                return Err(ScriptError::runtime_error_with_help(
                    *span,
                    format!("Loop iteration limit of {} exceeded", limit),
                    "The loop condition may never become false. Raise the limit with --max-iterations if the script needs more iterations.".to_string(),
                ));
            }
        }

        if let Some(timeout) = self.config.timeout {
            if self.budget.started.elapsed() > timeout {
                return Err(ScriptError::runtime_error_with_help(
                    *span,
                    format!("Time limit of {} ms exceeded", timeout.as_millis()),
                    "The loop condition may never become false. Raise the limit with --timeout-ms if the script needs more time.".to_string(),
                ));
            }
        }

        Ok(())
    }
}

fn evaluate_binary_op(operator: BinaryOp, left: f32, right: f32) -> f32 {
    match operator {
        BinaryOp::Add => left + right,
        BinaryOp::Subtract => left - right,
        BinaryOp::Multiply => left * right,
        BinaryOp::Divide => left / right,
        BinaryOp::Power => left.powf(right),
    }
}

fn compare(operator: CompareOp, left: f32, right: f32) -> bool {
    match operator {
        CompareOp::Less => left < right,
        CompareOp::Greater => left > right,
        CompareOp::Equal => left == right,
        CompareOp::NotEqual => left != right,
    }
}
