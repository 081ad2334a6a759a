pub mod disasm;
pub mod phases;
pub mod symbols;

pub use phases::types::{Error, Loc, Located};

use crate::spec::types::hw::Codeword;
use log::debug;
use symbols::SymbolTable;

/// The result of assembling one program: its code, plus every symbol bound along the way.
#[derive(Debug)]
pub struct Program {
    pub code: Vec<Codeword>,
    pub symbols: SymbolTable,
}

/// Assembles a single program. Every call starts from a fresh symbol table holding only the
/// predefined symbols, so no label or variable can leak from one program into the next.
pub fn assemble_program<I, S>(lines: I) -> Result<Program, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let lines = phases::classify_lines(lines)?;
    let mut symbols = phases::resolve(&lines, SymbolTable::new())?;
    let code = phases::encode(&lines, &mut symbols)?;

    debug!(
        "assembled {} source lines into {} codewords",
        lines.len(),
        code.len()
    );
    Ok(Program { code, symbols })
}

pub fn assemble<I, S>(lines: I) -> Result<Vec<Codeword>, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(assemble_program(lines)?.code)
}

pub fn assemble_source(source: &str) -> Result<Vec<Codeword>, Error> {
    assemble(source.lines())
}
