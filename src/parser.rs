//! Turns instruction-language text into a [`Program`].
//!
//! Tokens are fixed-width: after skipping whitespace the parser compares the
//! next five characters against the keyword table and advances by exactly
//! five. Nothing checks that a keyword is followed by whitespace, so
//! `E_FWDE_SET` is two instructions, while a window shifted by stray
//! characters is rejected.

use std::fs;
use std::path::Path;

use crate::error::TurtleError;
use crate::instruction::{Instruction, KEYWORD_WIDTH, Program};

/// Shortest non-empty remainder the parser will try to match.
const MIN_TOKEN_CHARS: usize = 3;

/// Longest excerpt of source text carried in a parse error.
const SNIPPET_CHARS: usize = 16;

/// Parse `text` into a program terminated by a single [`Instruction::End`].
pub fn parse(text: &str) -> Result<Program, TurtleError> {
    let chars: Vec<char> = text.chars().collect();
    let mut program = Program::new();
    let mut pos = 0;

    loop {
        while pos < chars.len() && chars[pos].is_whitespace() {
            pos += 1;
        }

        let remaining = chars.len() - pos;
        if remaining == 0 {
            program.push(Instruction::End);
            break;
        }
        if remaining < MIN_TOKEN_CHARS {
            return Err(parse_error(&chars, pos));
        }

        let end = (pos + KEYWORD_WIDTH).min(chars.len());
        let window: String = chars[pos..end].iter().collect();
        let instr = Instruction::from_keyword(&window);
        if instr == Instruction::Error {
            return Err(parse_error(&chars, pos));
        }

        program.push(instr);
        pos += KEYWORD_WIDTH;
    }

    tracing::debug!(instructions = program.len(), "parsed turtle program");
    Ok(program)
}

/// Read an instruction file as UTF-8.
pub fn read_source(path: impl AsRef<Path>) -> Result<String, TurtleError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| TurtleError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read `path` as UTF-8 and parse it.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Program, TurtleError> {
    parse(&read_source(path)?)
}

fn parse_error(chars: &[char], offset: usize) -> TurtleError {
    let snippet = chars[offset..]
        .iter()
        .take_while(|&&c| c != '\n' && c != '\r')
        .take(SNIPPET_CHARS)
        .collect();
    tracing::warn!(offset, "unrecognized instruction");
    TurtleError::Parse { offset, snippet }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::KEYWORDS;
    use proptest::prelude::*;

    fn collect(program: Program) -> Vec<Instruction> {
        program.into_iter().collect()
    }

    #[test]
    fn empty_text_yields_single_end() {
        assert_eq!(collect(parse("").unwrap()), vec![Instruction::End]);
        assert_eq!(collect(parse(" \n\t ").unwrap()), vec![Instruction::End]);
    }

    #[test]
    fn parses_every_keyword_in_order() {
        let program = parse("E_ROR E_ROL\nE_FWD\tE_SET  E_CLR\n").unwrap();
        assert_eq!(
            collect(program),
            vec![
                Instruction::RotateRight,
                Instruction::RotateLeft,
                Instruction::MoveForward,
                Instruction::SetCell,
                Instruction::ClearCell,
                Instruction::End,
            ]
        );
    }

    #[test]
    fn adjacent_keywords_without_whitespace_parse() {
        let program = parse("E_FWDE_SET").unwrap();
        assert_eq!(
            collect(program),
            vec![Instruction::MoveForward, Instruction::SetCell, Instruction::End]
        );
    }

    #[test]
    fn unknown_keyword_reports_offset_and_text() {
        let err = parse("E_FWD E_JMP E_SET").unwrap_err();
        match err {
            TurtleError::Parse { offset, snippet } => {
                assert_eq!(offset, 6);
                assert_eq!(snippet, "E_JMP E_SET");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert!(matches!(parse("e_fwd"), Err(TurtleError::Parse { offset: 0, .. })));
    }

    #[test]
    fn shifted_window_is_rejected() {
        // A stray character inside the token shifts the window.
        assert!(matches!(parse("E_FW D"), Err(TurtleError::Parse { .. })));
        assert!(matches!(parse("E_FWDX E_SET"), Err(TurtleError::Parse { offset: 5, .. })));
    }

    #[test]
    fn short_trailing_fragment_is_rejected() {
        assert!(matches!(parse("E_SET E_"), Err(TurtleError::Parse { offset: 6, .. })));
        assert!(matches!(parse("E_SET E_F"), Err(TurtleError::Parse { offset: 6, .. })));
        assert!(matches!(parse("x"), Err(TurtleError::Parse { offset: 0, .. })));
    }

    #[test]
    fn terminator_mnemonic_is_not_source_syntax() {
        assert!(matches!(parse("E_END"), Err(TurtleError::Parse { .. })));
        assert!(matches!(parse("E_ERR"), Err(TurtleError::Parse { .. })));
    }

    #[test]
    fn snippet_stops_at_line_end() {
        let err = parse("E_SET\nBOGUS\nE_FWD").unwrap_err();
        assert!(matches!(err, TurtleError::Parse { ref snippet, offset: 6 } if snippet == "BOGUS"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_file(dir.path().join("missing.tur")).unwrap_err();
        assert!(matches!(err, TurtleError::Io { .. }));
    }

    fn keyword() -> impl Strategy<Value = &'static str> {
        prop::sample::select(KEYWORDS.iter().map(|(kw, _)| *kw).collect::<Vec<_>>())
    }

    fn whitespace() -> impl Strategy<Value = String> {
        prop::collection::vec(prop::sample::select(vec![' ', '\t', '\n', '\r']), 0..4)
            .prop_map(|v| v.into_iter().collect())
    }

    proptest! {
        #[test]
        fn valid_sequences_end_with_exactly_one_end(
            words in prop::collection::vec((whitespace(), keyword()), 0..32),
            trailing in whitespace(),
        ) {
            let mut text = String::new();
            for (ws, kw) in &words {
                text.push_str(ws);
                text.push_str(kw);
            }
            text.push_str(&trailing);

            let parsed = collect(parse(&text).unwrap());
            prop_assert_eq!(parsed.len(), words.len() + 1);
            prop_assert_eq!(parsed.last().copied(), Some(Instruction::End));
            prop_assert_eq!(parsed.iter().filter(|i| **i == Instruction::End).count(), 1);
            prop_assert!(!parsed.contains(&Instruction::Error));
        }

        #[test]
        fn non_keyword_window_fails(
            prefix in prop::collection::vec(keyword(), 0..8),
            bad in "[A-Z_]{5}",
        ) {
            prop_assume!(Instruction::from_keyword(&bad) == Instruction::Error);
            let mut text = prefix.join(" ");
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&bad);
            let parse_error = matches!(parse(&text), Err(TurtleError::Parse { .. }));
            prop_assert!(parse_error);
        }
    }
}
