use super::{classify::Line, types::Located};
use crate::assembler::symbols::SymbolTable;
use crate::spec::types::hw::{Word, WORD_MAX};
use log::debug;
use std::convert::TryFrom;
use std::fmt::Display;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    ProgramTooLong,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ProgramTooLong => write!(
                f,
                "Program does not fit in instruction memory ({} words)",
                WORD_MAX as usize + 1
            ),
        }
    }
}

/// Pass 1: binds every label to the address of the instruction which follows it. Labels take
/// up no instruction memory of their own.
pub fn resolve(
    lines: &[Located<Line>],
    mut table: SymbolTable,
) -> Result<SymbolTable, Located<Error>> {
    let mut pc: usize = 0;
    for line in lines {
        if let Line::Ignored = line.value_ref() {
            continue;
        }

        let addr = Word::try_from(pc).map_err(|_| line.attach(Error::ProgramTooLong))?;
        match line.value_ref() {
            Line::Label(name) => {
                table.bind_label(name.clone(), addr);
            }
            _ => pc += 1,
        }
    }

    debug!("resolution pass saw {} instructions", pc);
    Ok(table)
}
