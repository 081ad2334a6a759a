use super::phases::{
    classify::{DEST_SEP, JUMP_SEP},
    types::{Loc, Located},
};
use crate::spec::{
    defs::fields::{Field, Tables},
    types::hw::{
        Codeword, MalformedCodeword, Word, COMPUTE_OPCODE, COMP_WIDTH, DEST_WIDTH, OPCODE_WIDTH,
    },
};
use std::fmt::Display;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MalformedCodeword(MalformedCodeword),
    InvalidOpcode(Word),
    UnknownBits(Field, String),
}

impl From<MalformedCodeword> for Error {
    fn from(err: MalformedCodeword) -> Self {
        Error::MalformedCodeword(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MalformedCodeword(err) => write!(f, "{}", err),
            Error::InvalidOpcode(raw) => write!(f, "Invalid Opcode: {:#06X}", raw),
            Error::UnknownBits(field, bits) => write!(f, "Unknown {} bits '{}'", field, bits),
        }
    }
}

fn decode(field: Field, bits: &str) -> Result<Option<&'static str>, Error> {
    Tables::get()
        .table(field)
        .decode(bits)
        .ok_or_else(|| Error::UnknownBits(field, bits.to_owned()))
}

/// Renders one codeword as assembly. Symbols cannot be recovered, so address-instructions
/// always come out numeric.
pub fn disassemble_one(cw: Codeword) -> Result<String, Error> {
    if cw.is_address() {
        return Ok(format!("@{}", cw.word()));
    }

    let bits = cw.to_string();
    let (opcode, rest) = bits.split_at(OPCODE_WIDTH);
    if opcode != COMPUTE_OPCODE {
        return Err(Error::InvalidOpcode(cw.word()));
    }

    let (comp, rest) = rest.split_at(COMP_WIDTH);
    let (dest, jump) = rest.split_at(DEST_WIDTH);

    let comp = decode(Field::Comp, comp)?
        .ok_or_else(|| Error::UnknownBits(Field::Comp, comp.to_owned()))?;

    let mut text = String::new();
    if let Some(dest) = decode(Field::Dest, dest)? {
        text.push_str(dest);
        text.push(DEST_SEP);
    }
    text.push_str(comp);
    if let Some(jump) = decode(Field::Jump, jump)? {
        text.push(JUMP_SEP);
        text.push_str(jump);
    }

    Ok(text)
}

pub fn disassemble(code: &[Codeword]) -> Result<Vec<String>, Located<Error>> {
    code.iter()
        .enumerate()
        .map(|(idx, cw)| {
            Located::with_loc(Loc::new(idx + 1), *cw)
                .map_result(disassemble_one)
                .map(Located::value)
        })
        .collect()
}

/// Parses the textual codeword format written by the assembler, one codeword per line.
/// Blank lines are skipped.
pub fn read_codewords(text: &str) -> Result<Vec<Codeword>, Located<Error>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            Located::with_loc(Loc::new(idx + 1), line.trim())
                .map_result(|line| line.parse::<Codeword>().map_err(Error::from))
                .map(Located::value)
        })
        .collect()
}
