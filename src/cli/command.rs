use super::suite;
use crate::assembler::{self, disasm, Program};
use crate::assets;
use crate::spec::types::hw;
use ansi_term::Color::{Green, Red};
use anyhow::{anyhow, Context, Result};
use itertools::Itertools;
use log::info;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use structopt::StructOpt;

#[cfg(windows)]
pub fn terminal_init() {
    if ansi_term::enable_ansi_support().is_err() {
        log::warn!("could not enable terminal ANSI support");
    }
}

#[cfg(not(windows))]
pub fn terminal_init() {}

#[derive(StructOpt, Debug)]
#[structopt(name = "hasm")]
pub enum CommandRoot {
    Asm(SubcommandAsm),
    Disasm(SubcommandDisasm),
    Suite(SubcommandSuite),
}

#[derive(StructOpt, Debug)]
pub struct SubcommandAsm {
    #[structopt(name = "in.asm", parse(from_os_str))]
    in_src: PathBuf,

    #[structopt(name = "out.hack", parse(from_os_str))]
    out_bin: Option<PathBuf>,

    /// Print every label and variable with its address
    #[structopt(short, long)]
    symbols: bool,
}

#[derive(StructOpt, Debug)]
pub struct SubcommandDisasm {
    #[structopt(name = "in.hack", parse(from_os_str))]
    in_bin: PathBuf,

    #[structopt(name = "out.asm", parse(from_os_str))]
    out_src: Option<PathBuf>,
}

#[derive(StructOpt, Debug)]
pub struct SubcommandSuite {
    #[structopt(name = "suite/dir", parse(from_os_str))]
    suite_dir: Option<PathBuf>,

    #[structopt(short = "o", long, parse(from_os_str))]
    only: Option<OsString>,
}

pub fn assemble_path(path: &Path) -> Result<Program> {
    let prog_src = std::fs::read_to_string(path)
        .with_context(|| format!("could not read '{}'", path.display()))?;
    Ok(assembler::assemble_program(prog_src.lines())?)
}

pub fn disassemble_path(path: &Path) -> Result<Vec<String>> {
    let prog_bin = std::fs::read_to_string(path)
        .with_context(|| format!("could not read '{}'", path.display()))?;
    let code = disasm::read_codewords(&prog_bin)?;
    Ok(disasm::disassemble(&code)?)
}

/// `foo/bar.asm` becomes `bar.<ext>` in the working directory.
pub fn default_output(input: &Path, ext: &str) -> Result<PathBuf> {
    input
        .file_stem()
        .map(|stem| PathBuf::from(stem).with_extension(ext))
        .ok_or_else(|| anyhow!("'{}' has no file name", input.display()))
}

pub fn root(cmd: CommandRoot) -> ! {
    let result = match cmd {
        CommandRoot::Asm(scmd) => asm(scmd),
        CommandRoot::Disasm(scmd) => disasm(scmd),
        CommandRoot::Suite(scmd) => suite(scmd),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            eprintln!("{}: {:#}", Red.bold().paint("error"), err);
            std::process::exit(1);
        }
    }
}

fn print_symbols(prog: &Program) {
    println!("{}", Green.bold().paint("Symbols:"));
    for (name, sym) in prog.symbols.user_symbols() {
        println!("{:>6}  {:<8}  {}", sym.addr, sym.kind.to_string(), name);
    }
}

pub fn asm(cmd: SubcommandAsm) -> Result<()> {
    let prog = assemble_path(&cmd.in_src)?;

    let out_name = match cmd.out_bin {
        Some(outfile) => outfile,
        None => default_output(&cmd.in_src, assets::DEFAULT_BINARY_EXT)?,
    };

    std::fs::write(&out_name, hw::codewords_to_text(&prog.code))
        .with_context(|| format!("could not write '{}'", out_name.display()))?;
    info!(
        "assembled '{}' into '{}' ({} instructions)",
        cmd.in_src.display(),
        out_name.display(),
        prog.code.len()
    );

    if cmd.symbols {
        print_symbols(&prog);
    }

    Ok(())
}

pub fn disasm(cmd: SubcommandDisasm) -> Result<()> {
    let lines = disassemble_path(&cmd.in_bin)?;

    let out_name = match cmd.out_src {
        Some(outfile) => outfile,
        None => default_output(&cmd.in_bin, assets::DEFAULT_SOURCE_EXT)?,
    };

    let mut text = lines.iter().join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    std::fs::write(&out_name, text)
        .with_context(|| format!("could not write '{}'", out_name.display()))?;
    info!(
        "disassembled '{}' into '{}' ({} instructions)",
        cmd.in_bin.display(),
        out_name.display(),
        lines.len()
    );

    Ok(())
}

pub fn suite(cmd: SubcommandSuite) -> Result<()> {
    let success = suite::run_suite(
        &cmd.suite_dir.unwrap_or_else(assets::default_suite_dir),
        cmd.only.as_deref(),
    )?;

    if success {
        Ok(())
    } else {
        Err(anyhow!("suite failed"))
    }
}
