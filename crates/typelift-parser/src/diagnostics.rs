//! Diagnostic rendering for lexer and parser errors
//!
//! Wraps errors in structured diagnostics with source context, error
//! codes, and an optional JSON representation for tooling.

use codespan_reporting::diagnostic::{Diagnostic as CsDiagnostic, Label, Severity};
use codespan_reporting::files::{Files, SimpleFiles};
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::lexer::LexError;
use crate::parser::{ParseError, ParseErrorKind};
use crate::token::Span;

/// Error code for a diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCode(pub &'static str);

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        self.0
    }
}

/// A diagnostic message with source code context
pub struct Diagnostic {
    /// The underlying codespan diagnostic
    inner: CsDiagnostic<usize>,
    /// Error code (e.g., "E1001")
    code: Option<ErrorCode>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            inner: CsDiagnostic::new(severity).with_message(message),
            code: None,
        }
    }

    /// Create an error diagnostic
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Create a note diagnostic
    pub fn note(message: impl Into<String>) -> Self {
        Self::new(Severity::Note, message)
    }

    /// Set the error code
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code.clone());
        self.inner = self.inner.with_code(code.0);
        self
    }

    /// Add a primary label (main error location)
    pub fn with_primary_label(
        mut self,
        file_id: usize,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        let label = Label::primary(file_id, span.start..span.end).with_message(message);
        self.inner = self.inner.with_labels(vec![label]);
        self
    }

    /// Add a secondary label (related location)
    pub fn with_secondary_label(
        mut self,
        file_id: usize,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        let label = Label::secondary(file_id, span.start..span.end).with_message(message);
        self.inner = self.inner.with_labels(vec![label]);
        self
    }

    /// Add a note (additional context)
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.inner.notes.push(note.into());
        self
    }

    /// Add a help suggestion
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.inner.notes.push(format!("help: {}", help.into()));
        self
    }

    /// Create a diagnostic from a LexError
    pub fn from_lex_error(error: &LexError, file_id: usize) -> Self {
        use LexError::*;

        match error {
            UnexpectedCharacter { char, span } => {
                Diagnostic::error(format!("Unexpected character '{}'", char))
                    .with_code(lex_error_code(error))
                    .with_primary_label(file_id, *span, "not valid here")
            }

            UnterminatedTemplate { span } => {
                Diagnostic::error("Unterminated template literal")
                    .with_code(lex_error_code(error))
                    .with_primary_label(file_id, *span, "template starts here")
                    .with_help("Close the template with a backtick")
            }

            TemplateInterpolation { span } => {
                Diagnostic::error("Template literal interpolation is not supported")
                    .with_code(lex_error_code(error))
                    .with_primary_label(file_id, *span, "interpolation starts here")
                    .with_help("Use string concatenation instead of ${...}")
            }

            InvalidNumber { text, span } => {
                Diagnostic::error(format!("Invalid numeric literal '{}'", text))
                    .with_code(lex_error_code(error))
                    .with_primary_label(file_id, *span, "cannot be parsed as a number")
            }
        }
    }

    /// Create a diagnostic from a ParseError
    pub fn from_parse_error(error: &ParseError, file_id: usize) -> Self {
        let label = match &error.kind {
            ParseErrorKind::UnexpectedToken { .. } => "unexpected token",
            ParseErrorKind::UnexpectedEof { .. } => "unexpected end of input",
            ParseErrorKind::InvalidSyntax { .. } => "invalid syntax",
            ParseErrorKind::UnsupportedFeature { .. } => "outside the supported subset",
            ParseErrorKind::ParserLimitExceeded { .. } => "limit exceeded here",
        };

        let mut diag = Diagnostic::error(error.message.clone())
            .with_code(parse_error_code(&error.kind))
            .with_primary_label(file_id, error.span, label);

        if let Some(ref suggestion) = error.suggestion {
            diag = diag.with_help(suggestion.clone());
        }

        diag
    }

    /// Emit the diagnostic to stderr with colors
    pub fn emit(
        &self,
        files: &SimpleFiles<String, String>,
    ) -> Result<(), codespan_reporting::files::Error> {
        let mut writer = StandardStream::stderr(ColorChoice::Auto);
        let config = codespan_reporting::term::Config::default();
        term::emit(&mut writer, &config, files, &self.inner)
    }

    /// Get the underlying codespan diagnostic (for testing/custom rendering)
    pub fn inner(&self) -> &CsDiagnostic<usize> {
        &self.inner
    }

    /// Convert to JSON representation for IDE integration
    pub fn to_json(&self, files: &SimpleFiles<String, String>) -> Result<String, serde_json::Error> {
        let json_diag = JsonDiagnostic::from_diagnostic(self, files);
        serde_json::to_string_pretty(&json_diag)
    }
}

/// JSON representation of a diagnostic for IDE integration
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonDiagnostic {
    /// Error code (e.g., "E1001")
    pub code: Option<String>,
    /// Severity level
    pub severity: String,
    /// Main error message
    pub message: String,
    /// Source locations with labels
    pub labels: Vec<JsonLabel>,
    /// Additional notes and help
    pub notes: Vec<String>,
}

/// JSON representation of a diagnostic label
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonLabel {
    /// File path
    pub file: String,
    /// Start line (1-indexed)
    pub start_line: usize,
    /// Start column (1-indexed)
    pub start_column: usize,
    /// End line (1-indexed)
    pub end_line: usize,
    /// End column (1-indexed)
    pub end_column: usize,
    /// Label message
    pub message: Option<String>,
    /// Label style (primary or secondary)
    pub style: String,
}

impl JsonDiagnostic {
    /// Convert a Diagnostic to JSON representation
    pub fn from_diagnostic(diag: &Diagnostic, files: &SimpleFiles<String, String>) -> Self {
        let severity = match diag.inner.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
            Severity::Help => "help",
            Severity::Bug => "bug",
        };

        let labels = diag
            .inner
            .labels
            .iter()
            .filter_map(|label| {
                let file_id = label.file_id;
                let file_name = files.get(file_id).ok()?.name().to_string();

                let start = label.range.start;
                let end = label.range.end;

                let start_location = files.get(file_id).ok()?.location((), start).ok()?;
                let end_location = files.get(file_id).ok()?.location((), end).ok()?;

                Some(JsonLabel {
                    file: file_name,
                    start_line: start_location.line_number,
                    start_column: start_location.column_number,
                    end_line: end_location.line_number,
                    end_column: end_location.column_number,
                    message: Some(label.message.clone()),
                    style: match label.style {
                        codespan_reporting::diagnostic::LabelStyle::Primary => "primary",
                        codespan_reporting::diagnostic::LabelStyle::Secondary => "secondary",
                    }
                    .to_string(),
                })
            })
            .collect();

        JsonDiagnostic {
            code: diag.code.as_ref().map(|c| c.0.to_string()),
            severity: severity.to_string(),
            message: diag.inner.message.clone(),
            labels,
            notes: diag.inner.notes.clone(),
        }
    }
}

/// Get the error code for a LexError
pub fn lex_error_code(error: &LexError) -> ErrorCode {
    use LexError::*;

    match error {
        UnexpectedCharacter { .. } => ErrorCode("E0001"),
        UnterminatedTemplate { .. } => ErrorCode("E0002"),
        TemplateInterpolation { .. } => ErrorCode("E0003"),
        InvalidNumber { .. } => ErrorCode("E0004"),
    }
}

/// Get the error code for a ParseError
pub fn parse_error_code(kind: &ParseErrorKind) -> ErrorCode {
    match kind {
        ParseErrorKind::UnexpectedToken { .. } => ErrorCode("E1001"),
        ParseErrorKind::UnexpectedEof { .. } => ErrorCode("E1002"),
        ParseErrorKind::InvalidSyntax { .. } => ErrorCode("E1003"),
        ParseErrorKind::UnsupportedFeature { .. } => ErrorCode("E1004"),
        ParseErrorKind::ParserLimitExceeded { .. } => ErrorCode("E1005"),
    }
}

/// Helper to create a SimpleFiles instance from source code
pub fn create_files(
    path: impl Into<PathBuf>,
    source: impl Into<String>,
) -> SimpleFiles<String, String> {
    let mut files = SimpleFiles::new();
    files.add(path.into().display().to_string(), source.into());
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_error_diagnostic() {
        let diag = Diagnostic::error("Test error message");
        assert_eq!(diag.inner.severity, Severity::Error);
    }

    #[test]
    fn test_diagnostic_with_code() {
        let diag = Diagnostic::error("Test error").with_code(ErrorCode("E1001"));

        assert_eq!(diag.code, Some(ErrorCode("E1001")));
    }

    #[test]
    fn test_from_parse_error() {
        let source = "let x: = 1;";
        let parser = crate::parser::Parser::new(source).unwrap();
        let errors = parser.parse().unwrap_err();

        let diag = Diagnostic::from_parse_error(&errors[0], 0);
        assert_eq!(diag.inner.severity, Severity::Error);
        assert!(diag.code.is_some());
    }

    #[test]
    fn test_from_lex_error_has_interpolation_help() {
        let source = "let x = `hello ${name}`;";
        let errors = crate::lexer::Lexer::new(source).tokenize().unwrap_err();

        let diag = Diagnostic::from_lex_error(&errors[0], 0);
        assert_eq!(diag.code, Some(ErrorCode("E0003")));
        assert!(diag.inner.notes.iter().any(|n| n.contains("concatenation")));
    }

    #[test]
    fn test_json_output() {
        let source = "let x = @;";
        let parser = crate::parser::Parser::new(source).unwrap();
        let errors = parser.parse().unwrap_err();

        let diag = Diagnostic::from_parse_error(&errors[0], 0);
        let files = create_files("model.ts", source);

        let json = diag.to_json(&files).unwrap();

        assert!(json.contains("\"code\""));
        assert!(json.contains("\"severity\""));
        assert!(json.contains("\"error\""));
        assert!(json.contains("\"labels\""));
        assert!(json.contains("\"start_line\""));
    }
}
