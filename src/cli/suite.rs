use super::command;
use crate::assets;
use crate::spec::types::hw::Codeword;
use ansi_term::Color::{Green, Red};
use anyhow::{anyhow, Context, Result};
use derive_more::Constructor;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

#[derive(Constructor)]
struct Unit {
    name: OsString,
    src: PathBuf,
    expected: PathBuf,
}

enum Outcome {
    Pass(usize),
    Mismatch(usize, String, String),
    WrongLength(usize, usize),
}

impl Unit {
    fn check(&self) -> Result<Outcome> {
        let actual = command::assemble_path(&self.src)?
            .code
            .iter()
            .map(Codeword::to_string)
            .collect::<Vec<_>>();

        let expected = std::fs::read_to_string(&self.expected)
            .with_context(|| format!("could not read '{}'", self.expected.display()))?;
        let expected = expected
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect::<Vec<_>>();

        let mismatch = expected
            .iter()
            .zip(actual.iter())
            .position(|(e, a)| e != a);
        if let Some(idx) = mismatch {
            return Ok(Outcome::Mismatch(
                idx + 1,
                expected[idx].clone(),
                actual[idx].clone(),
            ));
        }

        if expected.len() != actual.len() {
            return Ok(Outcome::WrongLength(expected.len(), actual.len()));
        }

        Ok(Outcome::Pass(actual.len()))
    }
}

pub fn run_suite(suite_dir: &Path, only_this: Option<&OsStr>) -> Result<bool> {
    let all_units = find_units(suite_dir)?;

    let mut selected_units = match only_this {
        None => all_units,
        Some(only_this) => vec![all_units
            .into_iter()
            .find(|unit| unit.name.as_os_str() == only_this)
            .ok_or_else(|| anyhow!("no unit named '{}'", only_this.to_string_lossy()))?],
    };

    selected_units.sort_unstable_by(|unit1, unit2| unit1.name.cmp(&unit2.name));

    Ok(run_units(&suite_dir.to_string_lossy(), &selected_units))
}

fn find_file_unit(path: &Path) -> Option<Unit> {
    if !path
        .extension()
        .map_or(false, |ext| ext == assets::DEFAULT_SOURCE_EXT)
    {
        return None;
    }

    let expected = path.with_extension(assets::DEFAULT_BINARY_EXT);
    if !expected.exists() {
        return None;
    }

    Some(Unit::new(
        path.file_stem()?.to_owned(),
        PathBuf::from(path),
        expected,
    ))
}

fn find_units(suite_dir: &Path) -> Result<Vec<Unit>> {
    let mut units = Vec::new();
    for entry in suite_dir
        .read_dir()
        .with_context(|| format!("could not open suite '{}'", suite_dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() {
            units.extend(find_file_unit(&path));
        }
    }
    Ok(units)
}

fn run_units(name: &str, units: &[Unit]) -> bool {
    let name_pad = units.iter().map(|unit| unit.name.len()).max().unwrap_or(0);

    println!("Running suite: '{}' ({} units)", name, units.len());
    println!("{:-<line_len$}", "", line_len = name_pad + 45);

    let passes = units
        .iter()
        .enumerate()
        .filter(|(num, unit)| run_unit(unit, num + 1, name_pad))
        .count();
    let success = passes == units.len();

    println!("{:-<line_len$}", "", line_len = name_pad + 45);
    println!(
        "Suite Result: {}, {}/{} passes",
        if success {
            Green.bold().paint("SUCCESS")
        } else {
            Red.bold().paint("FAILED")
        },
        passes,
        units.len()
    );

    success
}

fn run_unit(unit: &Unit, num: usize, name_pad: usize) -> bool {
    let (success, msg) = match unit.check() {
        Err(err) => (
            false,
            format!(
                "{}:\n\t{}",
                Red.bold().paint("FAIL: ASSEMBLY ERROR"),
                format!("{:#}", err).replace("\n", "\n\t")
            ),
        ),
        Ok(Outcome::Pass(len)) => (
            true,
            format!("{} {:6} instructions", Green.bold().paint("PASS"), len),
        ),
        Ok(Outcome::Mismatch(line, expected, actual)) => (
            false,
            format!(
                "{} at instruction {}: expected {}, got {}",
                Red.bold().paint("FAIL: MISMATCH"),
                line,
                expected,
                actual
            ),
        ),
        Ok(Outcome::WrongLength(expected, actual)) => (
            false,
            format!(
                "{}: expected {} instructions, got {}",
                Red.bold().paint("FAIL: LENGTH"),
                expected,
                actual
            ),
        ),
    };

    println!(
        "Unit {:2 }: {} {}{}",
        num,
        unit.name.to_string_lossy(),
        " ".repeat(name_pad - unit.name.len()),
        msg
    );

    success
}
