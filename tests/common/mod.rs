#![allow(dead_code)]

#[macro_use]
pub mod macros;

use hasm::assembler;

pub fn assemble_text(src: &str) -> Vec<String> {
    assembler::assemble_source(src)
        .expect("test program should assemble")
        .iter()
        .map(ToString::to_string)
        .collect()
}

pub fn assemble_err(src: &str) -> assembler::Error {
    assembler::assemble_source(src).expect_err("test program should not assemble")
}

pub fn word(n: u16) -> String {
    format!("{:016b}", n)
}
