use std::collections::VecDeque;
use std::fmt;

/// A single turtle instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// Turn one step clockwise.
    RotateRight,
    /// Turn one step counter-clockwise.
    RotateLeft,
    /// Move one cell in the current heading.
    MoveForward,
    /// Mark the cell under the turtle.
    SetCell,
    /// Clear the cell under the turtle.
    ClearCell,
    /// Terminator. Executes as a no-op.
    End,
    /// Sentinel for a failed token; never present in a parsed program.
    Error,
}

/// Keywords accepted in source text, in lookup order.
pub const KEYWORDS: &[(&str, Instruction)] = &[
    ("E_ROR", Instruction::RotateRight),
    ("E_ROL", Instruction::RotateLeft),
    ("E_FWD", Instruction::MoveForward),
    ("E_SET", Instruction::SetCell),
    ("E_CLR", Instruction::ClearCell),
];

/// Width of every keyword in characters.
pub const KEYWORD_WIDTH: usize = 5;

impl Instruction {
    /// Look up a keyword. Anything outside [`KEYWORDS`] maps to `Error`.
    pub fn from_keyword(word: &str) -> Instruction {
        KEYWORDS
            .iter()
            .find(|(kw, _)| *kw == word)
            .map(|(_, instr)| *instr)
            .unwrap_or(Instruction::Error)
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Instruction::RotateRight => "E_ROR",
            Instruction::RotateLeft => "E_ROL",
            Instruction::MoveForward => "E_FWD",
            Instruction::SetCell => "E_SET",
            Instruction::ClearCell => "E_CLR",
            Instruction::End => "E_END",
            Instruction::Error => "E_ERR",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// An owned, ordered instruction sequence consumed from the front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    instructions: VecDeque<Instruction>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a program from raw instructions. No terminator is added.
    pub fn from_instructions<I>(instructions: I) -> Self
    where
        I: IntoIterator<Item = Instruction>,
    {
        Self {
            instructions: instructions.into_iter().collect(),
        }
    }

    pub fn push(&mut self, instr: Instruction) {
        self.instructions.push_back(instr);
    }

    /// Remove and return the head instruction.
    pub fn take_first(&mut self) -> Option<Instruction> {
        self.instructions.pop_front()
    }

    pub fn peek(&self) -> Option<Instruction> {
        self.instructions.front().copied()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl IntoIterator for Program {
    type Item = Instruction;
    type IntoIter = std::collections::vec_deque::IntoIter<Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup_is_exact() {
        assert_eq!(Instruction::from_keyword("E_FWD"), Instruction::MoveForward);
        assert_eq!(Instruction::from_keyword("e_fwd"), Instruction::Error);
        assert_eq!(Instruction::from_keyword("E_FW"), Instruction::Error);
    }

    #[test]
    fn terminator_and_sentinel_are_not_keywords() {
        assert_eq!(Instruction::from_keyword("E_END"), Instruction::Error);
        assert_eq!(Instruction::from_keyword("E_ERR"), Instruction::Error);
    }

    #[test]
    fn take_first_shrinks_in_order() {
        let mut program = Program::from_instructions([Instruction::SetCell, Instruction::End]);
        assert_eq!(program.len(), 2);
        assert_eq!(program.take_first(), Some(Instruction::SetCell));
        assert_eq!(program.peek(), Some(Instruction::End));
        assert_eq!(program.take_first(), Some(Instruction::End));
        assert!(program.is_empty());
        assert_eq!(program.take_first(), None);
    }
}
