use crate::ast::{BinaryOp, Branch, CompareOp, Condition, Expr, LogicalOp, Program, Stmt, Target};
use crate::error::{ScriptError, Span};
use crate::lexer::{Token, TokenType};
use log::debug;

/// Deepest nesting of blocks, brackets, signs, function applications and
/// chained operators a script may use.
pub const MAX_NESTING: usize = 256;

const TOO_DEEP: &str = "Too deeply nested";

/// Builds the block tree from the token stream.
///
/// Statements are line based: each assignment or control header ends at a
/// `Newline`, and block markers always sit on lines of their own. Blocks are
/// matched here once, so the evaluator never has to search for a closing
/// brace.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            current: 0,
            depth: 0,
        }
    }

    pub fn parse(&mut self) -> Result<Program, ScriptError> {
        let mut statements = Vec::new();

        loop {
            self.skip_newlines();
            if self.is_at_end() {
                break;
            }
            if let Some(statement) = self.statement()? {
                statements.push(statement);
            }
        }

        debug!("parsed {} top-level statements", statements.len());
        Ok(Program { statements })
    }

    /// Parse input holding exactly one arithmetic expression.
    pub fn parse_expression(&mut self) -> Result<Expr, ScriptError> {
        self.skip_newlines();
        let expr = self.expression()?;
        self.finish_input("expression")?;
        Ok(expr)
    }

    /// Parse input holding exactly one condition, without the surrounding
    /// parentheses of a control header.
    pub fn parse_condition(&mut self) -> Result<Condition, ScriptError> {
        self.skip_newlines();
        let condition = self.condition()?;
        self.finish_input("condition")?;
        Ok(condition)
    }

    fn finish_input(&mut self, what: &str) -> Result<(), ScriptError> {
        self.skip_newlines();
        if self.is_at_end() {
            return Ok(());
        }
        let token = self.peek();
        Err(ScriptError::parse_error_with_help(
            token.span,
            format!("Unexpected '{}' after {}", token.lexeme, what),
            format!("Only a single {} can be evaluated here.", what),
        ))
    }

    fn statement(&mut self) -> Result<Option<Stmt>, ScriptError> {
        let token_type = self.peek().token_type;
        match token_type {
            TokenType::If => {
                self.advance();
                self.if_statement().map(Some)
            }
            TokenType::While => {
                self.advance();
                self.while_statement().map(Some)
            }
            TokenType::LeftBrace => {
                let open = self.advance().span;
                let (statements, span) = self.block_body(open)?;
                Ok(Some(Stmt::Block { statements, span }))
            }
            TokenType::Elif | TokenType::Else => {
                let token = self.peek();
                Err(ScriptError::parse_error_with_help(
                    token.span,
                    format!("'{}' without a preceding 'if'", token.lexeme),
                    "'elif' and 'else' must directly follow the closing '}' of an 'if' or 'elif' block.".to_string(),
                ))
            }
            TokenType::RightBrace => Err(ScriptError::parse_error_with_help(
                self.peek().span,
                "Unmatched '}'".to_string(),
                "Found '}' without matching '{'. Check for unbalanced braces.".to_string(),
            )),
            _ => self.line_statement(),
        }
    }

    fn if_statement(&mut self) -> Result<Stmt, ScriptError> {
        let start = self.previous().span;

        let condition = self.header_condition("if")?;
        let (body, mut end) = self.block("if condition")?;
        let mut branches = vec![Branch { condition, body }];
        let mut else_branch = None;

        loop {
            self.skip_newlines();
            if self.match_types(&[TokenType::Elif]) {
                let condition = self.header_condition("elif")?;
                let (body, span) = self.block("elif condition")?;
                branches.push(Branch { condition, body });
                end = span;
            } else if self.match_types(&[TokenType::Else]) {
                self.end_of_line("'else'")?;
                let (body, span) = self.block("'else'")?;
                else_branch = Some(body);
                end = span;
                break;
            } else {
                break;
            }
        }

        Ok(Stmt::If {
            branches,
            else_branch,
            span: start.to(&end),
        })
    }

    fn while_statement(&mut self) -> Result<Stmt, ScriptError> {
        let start = self.previous().span;

        let condition = self.header_condition("while")?;
        let (body, end) = self.block("while condition")?;

        Ok(Stmt::While {
            condition,
            body,
            span: start.to(&end),
        })
    }

    fn header_condition(&mut self, keyword: &str) -> Result<Condition, ScriptError> {
        self.consume_with_help(
            TokenType::LeftParen,
            &format!("Expected '(' after '{}'", keyword),
            format!("Conditions must be enclosed in parentheses: {}(x > 0) {{ ... }}", keyword),
        )?;
        let condition = self.condition()?;
        self.consume_with_help(
            TokenType::RightParen,
            &format!("Expected ')' after {} condition", keyword),
            "A condition is one or more comparisons joined by '&&' or '||', closed with ')'.".to_string(),
        )?;
        self.end_of_line(&format!("{} condition", keyword))?;
        Ok(condition)
    }

    /// Expect a `{` on the following line and parse through its matching `}`.
    fn block(&mut self, after: &str) -> Result<(Vec<Stmt>, Span), ScriptError> {
        self.skip_newlines();
        let open = self
            .consume_with_help(
                TokenType::LeftBrace,
                &format!("Expected '{{' after {}", after),
                "Bodies of 'if', 'elif', 'else' and 'while' must be enclosed in braces: { ... }".to_string(),
            )?
            .span;
        self.block_body(open)
    }

    fn block_body(&mut self, open: Span) -> Result<(Vec<Stmt>, Span), ScriptError> {
        self.nested(|parser| parser.block_statements(open))
    }

    fn block_statements(&mut self, open: Span) -> Result<(Vec<Stmt>, Span), ScriptError> {
        let mut statements = Vec::new();

        loop {
            self.skip_newlines();
            if self.is_at_end() {
                return Err(ScriptError::parse_error_with_help(
                    open,
                    "Expected '}' after block".to_string(),
                    "Block statements must be closed with '}' after the opening '{'.".to_string(),
                ));
            }
            if self.check(&TokenType::RightBrace) {
                let close = self.advance().span;
                return Ok((statements, open.to(&close)));
            }
            if let Some(statement) = self.statement()? {
                statements.push(statement);
            }
        }
    }

    /// Lines without a bare `=` that are not control statements do nothing;
    /// they are skipped without being evaluated.
    fn line_statement(&mut self) -> Result<Option<Stmt>, ScriptError> {
        if self.line_has_assignment() {
            return self.assignment().map(Some);
        }

        debug!("ignoring line {}: no assignment", self.peek().line);
        while !self.check(&TokenType::Newline) && !self.is_at_end() {
            self.advance();
        }
        Ok(None)
    }

    fn line_has_assignment(&self) -> bool {
        self.tokens[self.current..]
            .iter()
            .take_while(|token| !matches!(token.token_type, TokenType::Newline | TokenType::Eof))
            .any(|token| token.token_type == TokenType::Equal)
    }

    fn assignment(&mut self) -> Result<Stmt, ScriptError> {
        let target = self.assignment_target()?;
        self.consume_with_help(
            TokenType::Equal,
            "Expected '=' after assignment target",
            "Assignments have the form 'name = expression' or 'name[index] = expression'.".to_string(),
        )?;
        let value = self.expression()?;
        self.end_of_line("assignment")?;

        let start = match &target {
            Target::Variable { span, .. } | Target::Element { span, .. } => *span,
        };
        let span = start.to(value.span());

        Ok(Stmt::Assign {
            target,
            value,
            span,
        })
    }

    /// The target name is every word-like token up to `=` or `[`, joined
    /// back together. The lexer splits words at function names (`Login`
    /// lexes as `Log` `in`), and a name the environment refuses must reach it
    /// whole so the refusal is a diagnostic, not a parse failure.
    fn assignment_target(&mut self) -> Result<Target, ScriptError> {
        if !is_name_part(self.peek().token_type) {
            return Err(ScriptError::parse_error_with_help(
                self.peek().span,
                "Invalid assignment target".to_string(),
                "Only variables and array elements can be assigned to. Examples: 'x = 10' or 'A[2] = 5'".to_string(),
            ));
        }

        let first = self.advance();
        let mut name = first.lexeme.clone();
        let mut name_span = first.span;
        while is_name_part(self.peek().token_type) {
            let part = self.advance();
            name.push_str(&part.lexeme);
            name_span = name_span.to(&part.span);
        }

        if self.match_types(&[TokenType::LeftBracket]) {
            let index = self.expression()?;
            let close = self.consume_with_help(
                TokenType::RightBracket,
                "Expected ']' after array index",
                "Array elements are written as name[index], e.g. A[i + 1].".to_string(),
            )?;
            let span = name_span.to(&close.span);
            return Ok(Target::Element { name, index, span });
        }

        Ok(Target::Variable {
            name,
            span: name_span,
        })
    }

    fn end_of_line(&mut self, after: &str) -> Result<(), ScriptError> {
        if self.is_at_end() || self.match_types(&[TokenType::Newline]) {
            return Ok(());
        }
        let token = self.peek();
        Err(ScriptError::parse_error_with_help(
            token.span,
            format!("Unexpected '{}' after {}", token.lexeme, after),
            "Each statement must be on its own line or separated by ';'.".to_string(),
        ))
    }

    fn condition(&mut self) -> Result<Condition, ScriptError> {
        self.or()
    }

    fn or(&mut self) -> Result<Condition, ScriptError> {
        let mut condition = self.and()?;

        while self.match_types(&[TokenType::OrOr]) {
            let right = self.and()?;
            let span = condition.span().to(right.span());

            condition = Condition::Logical {
                left: Box::new(condition),
                operator: LogicalOp::Or,
                right: Box::new(right),
                span,
            };
        }

        Ok(condition)
    }

    fn and(&mut self) -> Result<Condition, ScriptError> {
        let mut condition = self.comparison()?;

        while self.match_types(&[TokenType::AndAnd]) {
            let right = self.comparison()?;
            let span = condition.span().to(right.span());

            condition = Condition::Logical {
                left: Box::new(condition),
                operator: LogicalOp::And,
                right: Box::new(right),
                span,
            };
        }

        Ok(condition)
    }

    fn comparison(&mut self) -> Result<Condition, ScriptError> {
        let left = self.expression()?;

        if !self.match_types(&[
            TokenType::Less,
            TokenType::Greater,
            TokenType::EqualEqual,
            TokenType::BangEqual,
        ]) {
            return Err(ScriptError::parse_error_with_help(
                self.peek().span,
                "Expected comparison operator".to_string(),
                "Conditions compare two expressions with '<', '>', '==' or '!='.".to_string(),
            ));
        }

        let operator_token = self.previous().clone();
        let operator = match operator_token.token_type {
            TokenType::Less => CompareOp::Less,
            TokenType::Greater => CompareOp::Greater,
            TokenType::EqualEqual => CompareOp::Equal,
            TokenType::BangEqual => CompareOp::NotEqual,
            _ => unreachable!(),
        };

        let right = self.expression().map_err(|error| {
            operand_error(
                error,
                operator_token.span,
                format!("Expected expression after '{}'", operator_token.lexeme),
                "Comparison operators like '<', '>', '==' and '!=' require expressions on both sides.",
            )
        })?;
        let span = left.span().to(right.span());

        Ok(Condition::Compare {
            left,
            operator,
            right,
            span,
        })
    }

    fn expression(&mut self) -> Result<Expr, ScriptError> {
        self.term()
    }

    fn term(&mut self) -> Result<Expr, ScriptError> {
        let mut expr = self.factor()?;
        let mut chained = 0;

        while self.match_types(&[TokenType::Minus, TokenType::Plus]) {
            self.descend()?;
            chained += 1;
            let operator_token = self.previous().clone();
            let operator = match operator_token.token_type {
                TokenType::Minus => BinaryOp::Subtract,
                TokenType::Plus => BinaryOp::Add,
                _ => unreachable!(),
            };

            let right = self.factor().map_err(|error| {
                operand_error(
                    error,
                    operator_token.span,
                    format!("Expected expression after '{}'", operator_token.lexeme),
                    "Arithmetic operators like '+' and '-' require expressions on both sides.",
                )
            })?;
            let span = expr.span().to(right.span());

            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
                span,
            };
        }

        self.depth -= chained;
        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr, ScriptError> {
        let mut expr = self.unary()?;
        let mut chained = 0;

        while self.match_types(&[TokenType::Slash, TokenType::Star]) {
            self.descend()?;
            chained += 1;
            let operator_token = self.previous().clone();
            let operator = match operator_token.token_type {
                TokenType::Slash => BinaryOp::Divide,
                TokenType::Star => BinaryOp::Multiply,
                _ => unreachable!(),
            };

            let right = self.unary().map_err(|error| {
                operand_error(
                    error,
                    operator_token.span,
                    format!("Expected expression after '{}'", operator_token.lexeme),
                    "Multiplication and division operators require expressions on both sides.",
                )
            })?;
            let span = expr.span().to(right.span());

            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
                span,
            };
        }

        self.depth -= chained;
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr, ScriptError> {
        self.nested(Self::negation)
    }

    fn negation(&mut self) -> Result<Expr, ScriptError> {
        if self.match_types(&[TokenType::Minus]) {
            let start = self.previous().span;
            let operand = self.unary()?;
            let span = start.to(operand.span());

            return Ok(Expr::Negate {
                operand: Box::new(operand),
                span,
            });
        }

        self.power()
    }

    /// `^` binds tighter than unary minus on its left (`-2^2 == -4`) and is
    /// right-associative (`2^3^2 == 2^9`).
    fn power(&mut self) -> Result<Expr, ScriptError> {
        let base = self.call()?;

        if self.match_types(&[TokenType::Caret]) {
            let operator_token = self.previous().clone();
            let exponent = self.unary().map_err(|error| {
                operand_error(
                    error,
                    operator_token.span,
                    "Expected expression after '^'".to_string(),
                    "The power operator requires expressions on both sides, e.g. 2^3.",
                )
            })?;
            let span = base.span().to(exponent.span());

            return Ok(Expr::Binary {
                left: Box::new(base),
                operator: BinaryOp::Power,
                right: Box::new(exponent),
                span,
            });
        }

        Ok(base)
    }

    /// A function name applies to the operand written right after it:
    /// `Sqrt(9)`, `Sqrt9`, `Sqrt x`, `Sqrt A[2]`.
    fn call(&mut self) -> Result<Expr, ScriptError> {
        let Some(function) = self.peek().token_type.function() else {
            return self.primary();
        };

        let name_token = self.advance().clone();
        let argument = self.nested(Self::call).map_err(|error| {
            operand_error(
                error,
                name_token.span,
                format!("Expected operand after '{}'", name_token.lexeme),
                &format!(
                    "Functions take a single operand, e.g. {}(x) or {}2. Wrap negative operands in parentheses: {}(-x).",
                    function, function, function
                ),
            )
        })?;
        let span = name_token.span.to(argument.span());

        Ok(Expr::Call {
            function,
            argument: Box::new(argument),
            span,
        })
    }

    fn primary(&mut self) -> Result<Expr, ScriptError> {
        if self.check(&TokenType::Newline) || self.is_at_end() {
            return Err(ScriptError::parse_error_with_help(
                self.peek().span,
                "Unexpected end of line".to_string(),
                "Expected an expression here. Check for unmatched parentheses, brackets, or incomplete statements.".to_string(),
            ));
        }

        let token = self.advance().clone();

        match token.token_type {
            TokenType::Number => {
                let value = token.lexeme.parse::<f32>().map_err(|_| {
                    ScriptError::parse_error(token.span, format!("Invalid number: {}", token.lexeme))
                })?;
                Ok(Expr::Number {
                    value,
                    span: token.span,
                })
            }
            TokenType::Identifier => {
                if !self.match_types(&[TokenType::LeftBracket]) {
                    return Ok(Expr::Variable {
                        name: token.lexeme,
                        span: token.span,
                    });
                }

                let index = self.expression()?;
                let close = self.consume_with_help(
                    TokenType::RightBracket,
                    "Expected ']' after array index",
                    "Array elements are written as name[index], e.g. A[i + 1].".to_string(),
                )?;
                let span = token.span.to(&close.span);
                Ok(Expr::Element {
                    name: token.lexeme,
                    index: Box::new(index),
                    span,
                })
            }
            TokenType::LeftParen => {
                let start_span = token.span;

                if self.check(&TokenType::RightParen) {
                    return Err(ScriptError::parse_error_with_help(
                        start_span.to(&self.peek().span),
                        "Empty parentheses are not allowed".to_string(),
                        "Parentheses must contain an expression, e.g. (x + 1).".to_string(),
                    ));
                }

                let expr = self.expression()?;
                let end_token = self.consume_with_help(
                    TokenType::RightParen,
                    "Expected ')' after expression",
                    "Every opening parenthesis '(' must have a matching closing parenthesis ')'.".to_string(),
                )?;
                let span = start_span.to(&end_token.span);
                Ok(Expr::Grouping {
                    expr: Box::new(expr),
                    span,
                })
            }
            _ => {
                let help_msg = match token.token_type {
                    TokenType::RightParen => "Found ')' without matching '('. Check for unbalanced parentheses.",
                    TokenType::RightBracket => "Found ']' without matching '['. Check for unbalanced brackets.",
                    TokenType::If | TokenType::Elif | TokenType::Else | TokenType::While => {
                        "Keywords cannot be used inside expressions."
                    }
                    _ => "Expected a number, variable, array element, function or parenthesized expression here.",
                };

                Err(ScriptError::parse_error_with_help(
                    token.span,
                    format!("Expected expression, found '{}'", token.lexeme),
                    help_msg.to_string(),
                ))
            }
        }
    }

    fn descend(&mut self) -> Result<(), ScriptError> {
        if self.depth >= MAX_NESTING {
            return Err(ScriptError::parse_error_with_help(
                self.peek().span,
                TOO_DEEP.to_string(),
                format!(
                    "Scripts may nest at most {} levels of blocks, brackets, signs, functions and chained operators.",
                    MAX_NESTING
                ),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ScriptError>,
    ) -> Result<T, ScriptError> {
        self.descend()?;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn skip_newlines(&mut self) {
        while self.match_types(&[TokenType::Newline]) {}
    }

    fn match_types(&mut self, types: &[TokenType]) -> bool {
        for token_type in types {
            if self.check(token_type) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn check(&self, token_type: &TokenType) -> bool {
        if self.is_at_end() {
            false
        } else {
            &self.peek().token_type == token_type
        }
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().token_type == TokenType::Eof
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    fn consume_with_help(
        &mut self,
        token_type: TokenType,
        message: &str,
        help: String,
    ) -> Result<&Token, ScriptError> {
        if self.check(&token_type) {
            Ok(self.advance())
        } else {
            Err(ScriptError::parse_error_with_help(
                self.peek().span,
                message.to_string(),
                help,
            ))
        }
    }
}

fn is_name_part(token_type: TokenType) -> bool {
    matches!(
        token_type,
        TokenType::Identifier
            | TokenType::Number
            | TokenType::If
            | TokenType::Elif
            | TokenType::Else
            | TokenType::While
    ) || token_type.function().is_some()
}

/// Replace a failed operand's error with `message`, except when the operand
/// hit the nesting limit, which is reported as is.
fn operand_error(error: ScriptError, span: Span, message: String, help: &str) -> ScriptError {
    if error.message == TOO_DEEP {
        return error;
    }
    ScriptError::parse_error_with_help(span, message, help.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse(source: &str) -> Result<Program, ScriptError> {
        let tokens = Lexer::new(source).scan_tokens()?;
        Parser::new(tokens).parse()
    }

    fn expression(source: &str) -> Expr {
        let tokens = Lexer::new(source).scan_tokens().unwrap();
        Parser::new(tokens).parse_expression().unwrap()
    }

    #[test]
    fn if_elif_else_is_one_statement() {
        let program = parse("if(x>1){y=1}elif(x>0){y=2}else{y=3}").unwrap();
        assert_eq!(program.statements.len(), 1);
        match &program.statements[0] {
            Stmt::If {
                branches,
                else_branch,
                ..
            } => {
                assert_eq!(branches.len(), 2);
                assert!(else_branch.is_some());
            }
            other => panic!("expected if chain, got {:?}", other),
        }
    }

    #[test]
    fn nested_blocks_build_a_tree() {
        let program = parse("while(i<3){\n if(i==1){\n y=1\n }\n i=i+1\n}").unwrap();
        match &program.statements[0] {
            Stmt::While { body, .. } => {
                assert_eq!(body.len(), 2);
                assert!(matches!(body[0], Stmt::If { .. }));
                assert!(matches!(body[1], Stmt::Assign { .. }));
            }
            other => panic!("expected while loop, got {:?}", other),
        }
    }

    #[test]
    fn subtraction_is_left_associative() {
        match expression("8-3-2") {
            Expr::Binary {
                left, operator, ..
            } => {
                assert_eq!(operator, BinaryOp::Subtract);
                assert!(matches!(
                    *left,
                    Expr::Binary {
                        operator: BinaryOp::Subtract,
                        ..
                    }
                ));
            }
            other => panic!("expected binary expression, got {:?}", other),
        }
    }

    #[test]
    fn power_is_right_associative() {
        match expression("2^3^2") {
            Expr::Binary { right, .. } => assert!(matches!(
                *right,
                Expr::Binary {
                    operator: BinaryOp::Power,
                    ..
                }
            )),
            other => panic!("expected binary expression, got {:?}", other),
        }
    }

    #[test]
    fn function_binds_to_following_operand() {
        match expression("Sqrt9+1") {
            Expr::Binary { left, .. } => assert!(matches!(*left, Expr::Call { .. })),
            other => panic!("expected binary expression, got {:?}", other),
        }
    }

    #[test]
    fn lines_without_assignment_are_skipped() {
        let program = parse("x+1\ny==2\nz=3").unwrap();
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn split_words_are_rejoined_into_one_target() {
        let program = parse("Login=5\nSign_x[2]=1\n_1=3").unwrap();
        let names: Vec<&str> = program
            .statements
            .iter()
            .map(|statement| match statement {
                Stmt::Assign {
                    target: Target::Variable { name, .. } | Target::Element { name, .. },
                    ..
                } => name.as_str(),
                other => panic!("expected assignment, got {:?}", other),
            })
            .collect();
        assert_eq!(names, vec!["Login", "Sign_x", "_1"]);
    }

    #[test]
    fn nesting_is_limited() {
        let deep = format!("x={}1{}", "(".repeat(MAX_NESTING + 1), ")".repeat(MAX_NESTING + 1));
        assert_eq!(parse(&deep).unwrap_err().message, TOO_DEEP);

        let negations = format!("x=1+{}1", "-".repeat(MAX_NESTING + 1));
        assert_eq!(parse(&negations).unwrap_err().message, TOO_DEEP);

        let blocks = format!("{}x=1{}", "{".repeat(MAX_NESTING + 1), "}".repeat(MAX_NESTING + 1));
        assert_eq!(parse(&blocks).unwrap_err().message, TOO_DEEP);

        let within = format!("x={}1{}", "(".repeat(100), ")".repeat(100));
        assert!(parse(&within).is_ok());
    }

    #[test]
    fn structural_errors() {
        let cases = [
            ("while(x<1){x=x+1", "Expected '}' after block"),
            ("x=1}", "Unmatched '}'"),
            ("else{x=1}", "'else' without a preceding 'if'"),
            ("if(x<1)\nx=2", "Expected '{' after if condition"),
            ("if(x){y=1}", "Expected comparison operator"),
            ("if[x<1]{y=1}", "Expected '(' after 'if'"),
            ("(x)=1", "Invalid assignment target"),
            ("-x=1", "Invalid assignment target"),
            ("x=y=3", "Unexpected '=' after assignment"),
            ("x=()", "Empty parentheses are not allowed"),
            ("x=A[1", "Expected ']' after array index"),
        ];
        for (source, message) in cases {
            let error = parse(source).unwrap_err();
            assert!(
                error.message.contains(message),
                "{:?}: got '{}', expected '{}'",
                source,
                error.message,
                message
            );
        }
    }
}
