use super::classify::{Line, DEST_SEP, JUMP_SEP};
use super::types::Located;
use crate::assembler::symbols::{SymbolName, SymbolTable};
use crate::common;
use crate::spec::{
    defs::fields::{Field, Tables},
    types::hw::{Codeword, MalformedCodeword, Word, COMPUTE_OPCODE},
};
use log::{debug, trace};
use std::fmt::Display;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    UnknownMnemonic(Field, String),
    MalformedCompute(String),
    MissingComputation(String),
    AddressOutOfRange(String),
    IllegalSymbol(String),
    AddressSpaceExhausted(SymbolName),
    MalformedCodeword(MalformedCodeword),
}

impl From<MalformedCodeword> for Error {
    fn from(err: MalformedCodeword) -> Self {
        Error::MalformedCodeword(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnknownMnemonic(field, mnemonic) => {
                write!(f, "Unknown {} mnemonic '{}'", field, mnemonic)
            }
            Error::MalformedCompute(raw) => write!(
                f,
                "Malformed compute-instruction '{}': expected at most one '{}' and one '{}'",
                raw, DEST_SEP, JUMP_SEP
            ),
            Error::MissingComputation(raw) => {
                write!(f, "Compute-instruction '{}' has no computation", raw)
            }
            Error::AddressOutOfRange(raw) => {
                write!(f, "Address '{}' does not fit in a 16-bit word", raw)
            }
            Error::IllegalSymbol(raw) => write!(f, "'{}' is not a legal symbol name", raw),
            Error::AddressSpaceExhausted(name) => write!(
                f,
                "No data memory left to allocate variable '{}'",
                name
            ),
            // Only reachable through a defect in the bit-field tables.
            Error::MalformedCodeword(err) => write!(f, "Internal encoder error: {}", err),
        }
    }
}

/// The three fields of a compute-instruction, upper-cased. `None` is an absent field.
#[derive(Debug, PartialEq, Eq)]
struct Compute<'a> {
    dest: Option<&'a str>,
    comp: &'a str,
    jump: Option<&'a str>,
}

impl<'a> Compute<'a> {
    fn split(content: &'a str) -> Result<Self, Error> {
        let malformed = || Error::MalformedCompute(content.to_owned());

        // Without a `=` the whole instruction is read as `=content`.
        let (dest, rest) = content.split_once(DEST_SEP).unwrap_or(("", content));
        if rest.contains(DEST_SEP) {
            return Err(malformed());
        }

        let (comp, jump) = rest.split_once(JUMP_SEP).unwrap_or((rest, ""));
        if jump.contains(JUMP_SEP) {
            return Err(malformed());
        }

        if comp.is_empty() {
            return Err(Error::MissingComputation(content.to_owned()));
        }

        Ok(Compute {
            dest: common::non_empty(dest),
            comp,
            jump: common::non_empty(jump),
        })
    }

    fn lookup(field: Field, mnemonic: Option<&str>) -> Result<&'static str, Error> {
        Tables::get()
            .table(field)
            .encode(mnemonic)
            .ok_or_else(|| Error::UnknownMnemonic(field, mnemonic.unwrap_or("").to_owned()))
    }

    fn encode(&self) -> Result<Codeword, Error> {
        let bits = [
            COMPUTE_OPCODE,
            Compute::lookup(Field::Comp, Some(self.comp))?,
            Compute::lookup(Field::Dest, self.dest)?,
            Compute::lookup(Field::Jump, self.jump)?,
        ]
        .concat();

        Ok(bits.parse::<Codeword>()?)
    }
}

fn is_numeric(operand: &str) -> bool {
    !operand.is_empty() && operand.chars().all(|c| c.is_ascii_digit())
}

pub fn encode_address(operand: &str, table: &mut SymbolTable) -> Result<Codeword, Error> {
    let value = if is_numeric(operand) {
        operand
            .parse::<Word>()
            .map_err(|_| Error::AddressOutOfRange(operand.to_owned()))?
    } else {
        let name =
            SymbolName::new(operand).ok_or_else(|| Error::IllegalSymbol(operand.to_owned()))?;
        table
            .resolve_or_allocate(name.clone())
            .ok_or(Error::AddressSpaceExhausted(name))?
    };

    Ok(Codeword::new(value))
}

pub fn encode_compute(content: &str) -> Result<Codeword, Error> {
    Compute::split(&content.to_ascii_uppercase())?.encode()
}

/// Pass 2: emits one codeword per instruction, in source order. Variables are bound in
/// `table` the first time they are seen.
pub fn encode(
    lines: &[Located<Line>],
    table: &mut SymbolTable,
) -> Result<Vec<Codeword>, Located<Error>> {
    let mut code = Vec::new();
    for line in lines {
        let cw = match line.value_ref() {
            Line::Ignored | Line::Label(_) => continue,
            Line::Address(operand) => encode_address(operand, table),
            Line::Compute(content) => encode_compute(content),
        }
        .map_err(|err| line.attach(err))?;

        trace!("{:?} -> {}", line.value_ref(), cw);
        code.push(cw);
    }

    debug!("encoding pass emitted {} codewords", code.len());
    Ok(code)
}
