use crate::ast::Span;
use std::fmt;

/// Which stage of the pipeline produced the diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    Parse,
    Runtime,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::Parse => "parse",
            DiagnosticKind::Runtime => "runtime",
        }
    }
}

/// An error message with location and context
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub span: Span,
    pub filename: String,
    pub notes: Vec<String>,
    pub help: Option<String>,
    /// Human-friendly suggestions that don't imply an automatic edit
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, message: String, span: Span, filename: String) -> Self {
        Self {
            kind,
            message,
            span,
            filename,
            notes: Vec::new(),
            help: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }

    pub fn with_help(mut self, help: String) -> Self {
        self.help = Some(help);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Format the diagnostic with source code snippet
    pub fn format(&self, source: &str) -> String {
        let line_index = LineIndex::new(source);
        let formatter = DiagnosticFormatter {
            diagnostic: self,
            source,
            line_index: &line_index,
        };
        formatter.format()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} error: {} at {}:{}:{}",
            self.kind.as_str(),
            self.message,
            self.filename,
            self.span.start,
            self.span.end
        )
    }
}

/// Offset to line/column conversion.
///
/// `\n`, `\r\n` and a lone `\r` each end a line, the same rule the lexer
/// uses. Columns count characters, not bytes.
#[derive(Debug)]
pub struct LineIndex {
    /// Byte range of each line, line terminator excluded
    lines: Vec<(usize, usize)>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut lines = Vec::new();
        let mut start = 0;
        let mut chars = source.char_indices().peekable();
        while let Some((i, ch)) = chars.next() {
            match ch {
                '\n' => {
                    lines.push((start, i));
                    start = i + 1;
                }
                '\r' => {
                    lines.push((start, i));
                    if let Some((_, '\n')) = chars.peek() {
                        chars.next();
                        start = i + 2;
                    } else {
                        start = i + 1;
                    }
                }
                _ => {}
            }
        }
        lines.push((start, source.len()));
        Self { lines }
    }

    /// Convert byte offset to (line, column) (both 1-indexed)
    pub fn line_col(&self, source: &str, offset: usize) -> (usize, usize) {
        let line = self
            .lines
            .partition_point(|&(start, _)| start <= offset)
            .saturating_sub(1);
        let (start, end) = self.lines[line];
        let offset = offset.min(end.max(start));
        let col = source
            .get(start..offset)
            .map_or(offset - start, |text| text.chars().count());
        (line + 1, col + 1)
    }

    /// Byte range for a given line (1-indexed), terminator excluded
    pub fn line_range(&self, line: usize) -> Option<(usize, usize)> {
        line.checked_sub(1).and_then(|i| self.lines.get(i)).copied()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

struct DiagnosticFormatter<'a> {
    diagnostic: &'a Diagnostic,
    source: &'a str,
    line_index: &'a LineIndex,
}

impl DiagnosticFormatter<'_> {
    fn format(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("error: {}\n", self.diagnostic.message));

        let (start_line, start_col) = self
            .line_index
            .line_col(self.source, self.diagnostic.span.start);
        let (end_line, end_col) = self
            .line_index
            .line_col(self.source, self.diagnostic.span.end);

        output.push_str(&format!(
            "  --> {}:{}:{}\n",
            self.diagnostic.filename, start_line, start_col
        ));

        output.push_str(&self.format_snippet(start_line, start_col, end_line, end_col));

        for note in &self.diagnostic.notes {
            output.push_str(&format!("note: {note}\n"));
        }
        if let Some(help) = &self.diagnostic.help {
            output.push_str(&format!("help: {help}\n"));
        }
        for suggestion in &self.diagnostic.suggestions {
            output.push_str(&format!("suggestion: {suggestion}\n"));
        }

        output
    }

    fn format_snippet(
        &self,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> String {
        let mut output = String::new();

        let line_num_width = end_line.max(start_line).to_string().len();

        // One line of context either side
        let context_start = start_line.saturating_sub(1).max(1);
        let context_end = (end_line + 1).min(self.line_index.line_count());

        output.push_str(&format!("{:width$} |\n", "", width = line_num_width));

        for line_num in context_start..=context_end {
            let Some((line_start, line_end)) = self.line_index.line_range(line_num) else {
                continue;
            };
            let line_text = self.source.get(line_start..line_end).unwrap_or_default();
            output.push_str(&format!("{line_num:line_num_width$} | {line_text}\n"));

            if line_num < start_line || line_num > end_line {
                continue;
            }

            let span_start = if line_num == start_line { start_col - 1 } else { 0 };
            let span_end = if line_num == end_line {
                end_col - 1
            } else {
                line_text.chars().count()
            };
            let span_width = span_end.saturating_sub(span_start).max(1);

            output.push_str(&format!("{:width$} | ", "", width = line_num_width));
            output.push_str(&" ".repeat(span_start));
            output.push('^');
            output.push_str(&"~".repeat(span_width - 1));
            output.push('\n');
        }

        output.push_str(&format!("{:width$} |\n", "", width = line_num_width));

        output
    }
}
