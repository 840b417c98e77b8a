use std::io::{self, Write};
use crate::TurtleError;

/// Pretty-print a TurtleError, with caret positioning for parse errors.
/// If `program` is `Some("turtle")`, prefix messages with "turtle: ...".
pub fn print_turtle_error(program: Option<&str>, source: &str, err: &TurtleError) {
    let prefix_program = |msg: &str| {
        if let Some(p) = program {
            format!("{p}: {msg}")
        } else {
            msg.to_string()
        }
    };

    match err {
        TurtleError::Parse { offset, snippet } => {
            let msg = prefix_program(&format!("Parse error: unrecognized instruction '{snippet}'"));
            print_error_with_context(&msg, source, *offset);
        }
        other => {
            eprintln!("{}", prefix_program(&other.to_string()));
            let _ = io::stderr().flush();
        }
    }
}

/// Print a concise error with character offset and a caret context window,
/// working with UTF-8 by slicing using char indices.
pub fn print_error_with_context(prefix: &str, source: &str, pos: usize) {
    eprintln!("{prefix} at offset {pos}");
    for line in context_lines(source, pos) {
        eprintln!("  {line}");
    }
    let _ = io::stderr().flush();
}

/// The line containing char offset `pos` (clipped to a window around it) and
/// a caret line pointing at the offset.
pub fn context_lines(source: &str, pos: usize) -> [String; 2] {
    const WINDOW_CHARS: usize = 32;

    let chars: Vec<char> = source.chars().collect();
    let pos = pos.min(chars.len());
    let line_start = chars[..pos]
        .iter()
        .rposition(|&c| c == '\n')
        .map_or(0, |i| i + 1);
    let line_end = chars[pos..]
        .iter()
        .position(|&c| c == '\n' || c == '\r')
        .map_or(chars.len(), |i| pos + i);

    let start = line_start.max(pos.saturating_sub(WINDOW_CHARS));
    let end = line_end.min(pos + WINDOW_CHARS + 1);
    let slice: String = chars[start..end].iter().collect();

    let mut underline = " ".repeat(pos - start);
    underline.push('^');
    [slice, underline]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_points_into_the_offending_line() {
        let [line, caret] = context_lines("E_SET\nE_FWD BOGUS\nE_ROR", 12);
        assert_eq!(line, "E_FWD BOGUS");
        assert_eq!(caret, "      ^");
    }

    #[test]
    fn offset_at_end_of_text_is_clamped() {
        let [line, caret] = context_lines("E_SET E_", 6);
        assert_eq!(line, "E_SET E_");
        assert_eq!(caret, "      ^");
    }
}
