//! Bits and pieces for pointing at places in the notation.

use std::fmt::{self, Write};
use std::ops::Range;

/// Position inside a text in a form that's useful for human readers.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Pos {
    /// Line number, starting at 1
    pub line: usize,
    /// Position within the line, in characters, starting at 1
    pub column: usize,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A data structure for mapping byte offsets to line/column based positions.
pub struct LineMap<'a> {
    /// Ordered vector of the position of line breaks (`\n`)
    line_offsets: Vec<usize>,
    /// The original string, needed for obtaining the column indices.
    source: &'a str,
}

impl<'a> LineMap<'a> {
    pub fn new(s: &'a str) -> Self {
        Self {
            line_offsets: s
                .char_indices()
                .filter_map(|(pos, ch)| if ch == '\n' { Some(pos) } else { None })
                .collect(),
            source: s,
        }
    }

    /// # Examples
    ///
    /// ```
    /// # use syn_mml::mml::span::{LineMap, Pos};
    /// let s = "c4\nd4 ä\ne4";
    /// let m = LineMap::new(s);
    /// assert_eq!(m.offset_to_pos(0), Pos { line: 1, column: 1 });
    /// assert_eq!(m.offset_to_pos(2), Pos { line: 1, column: 3 });
    /// assert_eq!(m.offset_to_pos(3), Pos { line: 2, column: 1 });
    /// assert_eq!(m.offset_to_pos(8), Pos { line: 2, column: 5 });
    /// assert_eq!(m.offset_to_pos(9), Pos { line: 3, column: 1 });
    /// ```
    pub fn offset_to_pos(&self, offset: usize) -> Pos {
        // a line break itself belongs to the line it terminates
        let line = match self.line_offsets.binary_search(&offset) {
            Ok(line) | Err(line) => line,
        };
        let line_start = self.line_start(line + 1);
        let column = self.source[line_start..offset].chars().count() + 1;
        Pos {
            line: line + 1,
            column,
        }
    }

    /// Byte offset where the given line (starting at 1) begins.
    fn line_start(&self, line: usize) -> usize {
        if line <= 1 {
            0
        } else if line - 2 >= self.line_offsets.len() {
            self.source.len()
        } else {
            self.line_offsets[line - 2] + 1
        }
    }

    /// Return the extends of the given line (starting at 1), without the line break.
    pub fn line_span(&self, line: usize) -> Range<usize> {
        let begin = self.line_start(line);
        let end = if line >= 1 && line - 1 < self.line_offsets.len() {
            self.line_offsets[line - 1]
        } else {
            self.source.len()
        };
        begin..end
    }

    /// Print the line containing `offset` and the one before it with line numbers,
    /// marking the character at `offset` with a `^` below it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use syn_mml::mml::span::*;
    /// let m = LineMap::new("t4 c4\nd4 x4\ne4");
    /// assert_eq!(
    ///   m.highlight(9, false),
    /// r#"   1|t4 c4
    ///    2|d4 x4
    ///         ^
    /// "#
    /// )
    /// ```
    pub fn highlight(&self, offset: usize, colored: bool) -> String {
        let red = "\x1b[31;1m";
        let reset = "\x1b[0m";

        let pos = self.offset_to_pos(offset);
        let mut out = String::new();
        for line in 1.max(pos.line - 1)..=pos.line {
            let span = self.line_span(line);
            let line_str = &self.source[span];
            if colored && line == pos.line {
                write!(&mut out, "{}{:4}|{}", red, line, reset).unwrap();
            } else {
                write!(&mut out, "{:4}|", line).unwrap();
            }
            out.push_str(line_str);
            out.push('\n');
        }

        out.push_str("     ");
        for _ in 1..pos.column {
            out.push(' ');
        }
        if colored {
            write!(&mut out, "{}^{}", red, reset).unwrap();
        } else {
            out.push('^');
        }
        out.push('\n');
        out
    }
}
