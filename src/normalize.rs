pub const BLOCK_OPEN: char = '{';
pub const BLOCK_CLOSE: char = '}';
pub const STATEMENT_SEPARATOR: char = ';';

/// One statement-sized unit of source after whitespace removal.
///
/// Every kept character remembers its character offset in the original
/// source so that later stages can point diagnostics at what was written.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub index: usize,
    pub text: String,
    offsets: Vec<usize>,
    end: usize,
}

impl Line {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Source offset of the `pos`-th character of `text`; positions past the
    /// end map to the end of the line.
    pub fn offset(&self, pos: usize) -> usize {
        self.offsets.get(pos).copied().unwrap_or(self.end)
    }

    pub fn end(&self) -> usize {
        self.end
    }
}

#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line>,
    text: String,
    offsets: Vec<usize>,
}

impl LineBuilder {
    fn push(&mut self, c: char, offset: usize) {
        self.text.push(c);
        self.offsets.push(offset);
    }

    fn finish(&mut self, break_offset: usize) {
        let mut chars: Vec<(char, usize)> = self
            .text
            .drain(..)
            .zip(self.offsets.drain(..))
            .collect();

        while chars.last().is_some_and(|(c, _)| c.is_whitespace()) {
            chars.pop();
        }
        let leading = chars.iter().take_while(|(c, _)| c.is_whitespace()).count();
        chars.drain(..leading);

        let end = chars.last().map_or(break_offset, |&(_, offset)| offset + 1);
        let (text, offsets) = chars.into_iter().unzip();

        self.lines.push(Line {
            index: self.lines.len(),
            text,
            offsets,
            end,
        });
    }
}

/// Split raw source into logical lines.
///
/// Spaces and tabs are dropped everywhere, each block marker is isolated on
/// its own line, and the text is split on `\r\n`, `\r`, `\n` and `;`. Empty
/// lines are kept so that line indices stay stable.
pub fn logical_lines(source: &str) -> Vec<Line> {
    let mut builder = LineBuilder::default();
    let mut chars = source.chars().enumerate().peekable();
    let mut length = 0;

    while let Some((pos, c)) = chars.next() {
        length = pos + 1;
        match c {
            ' ' | '\t' => {}
            '\r' => {
                if let Some(&(next, '\n')) = chars.peek() {
                    length = next + 1;
                    chars.next();
                }
                builder.finish(pos);
            }
            '\n' | STATEMENT_SEPARATOR => builder.finish(pos),
            BLOCK_OPEN | BLOCK_CLOSE => {
                builder.finish(pos);
                builder.push(c, pos);
                builder.finish(pos + 1);
            }
            _ => builder.push(c, pos),
        }
    }

    builder.finish(length);
    builder.lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<String> {
        logical_lines(source)
            .into_iter()
            .filter(|line| !line.is_empty())
            .map(|line| line.text)
            .collect()
    }

    #[test]
    fn strips_spaces_and_tabs() {
        assert_eq!(texts("x = 1 +\t2"), vec!["x=1+2"]);
    }

    #[test]
    fn isolates_block_markers() {
        assert_eq!(
            texts("x=5; if(x>3){y=1} else {y=2}"),
            vec!["x=5", "if(x>3)", "{", "y=1", "}", "else", "{", "y=2", "}"]
        );
    }

    #[test]
    fn splits_on_every_line_break_flavour() {
        assert_eq!(texts("a=1\r\nb=2\rc=3\nd=4;e=5"), vec!["a=1", "b=2", "c=3", "d=4", "e=5"]);
    }

    #[test]
    fn keeps_empty_lines_for_stable_indices() {
        let lines = logical_lines("a=1\n\nb=2");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].is_empty());
        assert_eq!(lines[2].index, 2);
    }

    #[test]
    fn offsets_point_into_original_source() {
        let lines = logical_lines("  x = 10");
        let line = &lines[0];
        assert_eq!(line.text, "x=10");
        assert_eq!(line.offset(0), 2);
        assert_eq!(line.offset(1), 4);
        assert_eq!(line.offset(2), 6);
        assert_eq!(line.end(), 8);
    }

    #[test]
    fn empty_source_is_one_empty_line() {
        let lines = logical_lines("");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_empty());
    }
}
