use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::fmt;
use std::io;

/// A stretch of the original, un-normalized source in character offsets,
/// together with the logical line it was lexed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize) -> Self {
        Self { start, end, line }
    }

    /// One-character span, used for line breaks and end of input.
    pub fn at(pos: usize, line: usize) -> Self {
        Self::new(pos, pos + 1, line)
    }

    /// Smallest span covering both `self` and `other`; it belongs to the
    /// earlier of the two lines.
    pub fn to(&self, other: &Span) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: self.line.min(other.line),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    LexError,
    ParseError,
    RuntimeError,
}

impl ErrorKind {
    fn title(self) -> &'static str {
        match self {
            ErrorKind::LexError => "Lexical Error",
            ErrorKind::ParseError => "Parse Error",
            ErrorKind::RuntimeError => "Runtime Error",
        }
    }

    fn color(self) -> Color {
        match self {
            ErrorKind::LexError => Color::Red,
            ErrorKind::ParseError => Color::Yellow,
            ErrorKind::RuntimeError => Color::Magenta,
        }
    }
}

/// A failure that stops a script.
///
/// Bad names and reads of unset names are not errors: they go out on the
/// diagnostic channel and the script keeps running.
#[derive(Debug, Clone)]
pub struct ScriptError {
    pub kind: ErrorKind,
    pub span: Span,
    pub message: String,
    pub help: Option<String>,
}

impl ScriptError {
    fn with_help(kind: ErrorKind, span: Span, message: String, help: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: Some(help),
        }
    }

    pub fn lex_error_with_help(span: Span, message: String, help: String) -> Self {
        Self::with_help(ErrorKind::LexError, span, message, help)
    }

    pub fn parse_error(span: Span, message: String) -> Self {
        Self {
            kind: ErrorKind::ParseError,
            span,
            message,
            help: None,
        }
    }

    pub fn parse_error_with_help(span: Span, message: String, help: String) -> Self {
        Self::with_help(ErrorKind::ParseError, span, message, help)
    }

    pub fn runtime_error_with_help(span: Span, message: String, help: String) -> Self {
        Self::with_help(ErrorKind::RuntimeError, span, message, help)
    }

    /// Render the error against `source` on stderr.
    pub fn report(&self, source: &str, filename: Option<&str>) -> io::Result<()> {
        let filename = filename.unwrap_or("<script>");
        let color = self.kind.color();

        // Clamp so a span at end of input still lands inside the source.
        let len = source.chars().count();
        let start = self.span.start.min(len);
        let end = self.span.end.min(len).max(start);

        let mut report = Report::build(ReportKind::Error, filename, start)
            .with_message(format!("{}: {}", self.kind.title().fg(color), self.message))
            .with_label(
                Label::new((filename, start..end))
                    .with_message(&self.message)
                    .with_color(color),
            )
            .with_note(format!("in logical line {}", self.span.line + 1));

        if let Some(help) = &self.help {
            report = report.with_help(help);
        }

        report.finish().eprint((filename, Source::from(source)))
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} in logical line {}: {}",
            self.kind.title(),
            self.span.line + 1,
            self.message
        )
    }
}

impl std::error::Error for ScriptError {}
