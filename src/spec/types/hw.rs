use static_assertions::const_assert;
use std::{fmt::Display, str::FromStr};

pub type Word = u16;

pub const WORD_WIDTH: usize = 16;
pub const WORD_MAX: Word = 0xFFFF;
pub const ADDRESS_MASK: Word = 0x7FFF;

pub const OPCODE_WIDTH: usize = 3;
pub const COMP_WIDTH: usize = 7;
pub const DEST_WIDTH: usize = 3;
pub const JUMP_WIDTH: usize = 3;

const_assert!(OPCODE_WIDTH + COMP_WIDTH + DEST_WIDTH + JUMP_WIDTH == WORD_WIDTH);

// Leading bits of every compute-instruction. Address-instructions only pin the MSB to `0`.
pub const COMPUTE_OPCODE: &str = "111";

// First data-memory address handed out to a variable.
pub const VARIABLE_BASE: Word = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedCodeword(pub String);

impl Display for MalformedCodeword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' is not a codeword, expected exactly {} binary digits",
            self.0, WORD_WIDTH
        )
    }
}

/// One assembled instruction. Always renders as exactly `WORD_WIDTH` binary digits,
/// most significant bit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Codeword(Word);

impl Codeword {
    pub const fn new(word: Word) -> Self {
        Codeword(word)
    }

    pub const fn word(self) -> Word {
        self.0
    }

    pub fn is_address(self) -> bool {
        self.0 & ADDRESS_MASK == self.0
    }
}

impl From<Word> for Codeword {
    fn from(word: Word) -> Self {
        Codeword(word)
    }
}

impl Display for Codeword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:0width$b}", self.0, width = WORD_WIDTH)
    }
}

impl FromStr for Codeword {
    type Err = MalformedCodeword;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.len() != WORD_WIDTH || !raw.chars().all(|c| c == '0' || c == '1') {
            return Err(MalformedCodeword(raw.to_owned()));
        }

        Word::from_str_radix(raw, 2)
            .map(Codeword)
            .map_err(|_| MalformedCodeword(raw.to_owned()))
    }
}

pub fn codewords_to_text(code: &[Codeword]) -> String {
    code.iter().map(|cw| format!("{}\n", cw)).collect()
}
