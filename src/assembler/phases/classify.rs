use super::types::{Loc, Located};
use crate::assembler::symbols::SymbolName;
use crate::common;
use std::fmt::Display;

pub const COMMENT: &str = "//";
pub const ADDRESS_PREFIX: &str = "@";
pub const LABEL_OPEN: &str = "(";
pub const LABEL_CLOSE: &str = ")";
pub const DEST_SEP: char = '=';
pub const JUMP_SEP: char = ';';

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    Unclassifiable(String),
    MalformedLabel(String),
    EmptyOperand,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Unclassifiable(raw) => write!(
                f,
                "'{}' is not a label, an address-instruction or a compute-instruction",
                raw
            ),
            Error::MalformedLabel(name) => write!(f, "Malformed label name '{}'", name),
            Error::EmptyOperand => write!(f, "Address-instruction is missing its operand"),
        }
    }
}

/// One source line, sorted by shape. Instruction contents are kept as text; they are only
/// interpreted by the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Ignored,
    Label(SymbolName),
    Address(String),
    Compute(String),
}

enum Shape<'a> {
    Starting(&'a str),
    Wrapped(&'a str, &'a str),
    Containing(char),
}

impl<'a> Shape<'a> {
    fn matches<'b>(&self, s: &'b str) -> Option<&'b str> {
        match self {
            Shape::Starting(open) => s.strip_prefix(*open),
            Shape::Wrapped(open, close) => s.strip_prefix(*open)?.strip_suffix(*close),
            Shape::Containing(c) => {
                if s.contains(*c) {
                    Some(s)
                } else {
                    None
                }
            }
        }
    }
}

type ShapeHandler = (Shape<'static>, fn(&str) -> Result<Line, Error>);

impl Line {
    // Order matters: a label or address operand may itself contain `=` or `;`, in which case
    // its handler rejects it rather than letting it fall through to a compute-instruction.
    const SHAPES: [ShapeHandler; 4] = [
        (Shape::Wrapped(LABEL_OPEN, LABEL_CLOSE), Line::parse_label),
        (Shape::Starting(ADDRESS_PREFIX), Line::parse_address),
        (Shape::Containing(DEST_SEP), Line::parse_compute),
        (Shape::Containing(JUMP_SEP), Line::parse_compute),
    ];

    fn parse_label(raw: &str) -> Result<Self, Error> {
        let name = raw.trim();
        SymbolName::new(name)
            .map(Line::Label)
            .ok_or_else(|| Error::MalformedLabel(name.to_owned()))
    }

    fn parse_address(raw: &str) -> Result<Self, Error> {
        match raw.trim() {
            "" => Err(Error::EmptyOperand),
            operand => Ok(Line::Address(operand.to_owned())),
        }
    }

    fn parse_compute(raw: &str) -> Result<Self, Error> {
        Ok(Line::Compute(common::strip_whitespace(raw)))
    }

    pub fn is_instruction(&self) -> bool {
        match self {
            Line::Ignored | Line::Label(_) => false,
            Line::Address(_) | Line::Compute(_) => true,
        }
    }
}

fn strip_comment(raw: &str) -> &str {
    match raw.find(COMMENT) {
        Some(idx) => &raw[..idx],
        None => raw,
    }
}

pub fn classify(raw: &str) -> Result<Line, Error> {
    let content = strip_comment(raw).trim();
    if content.is_empty() {
        return Ok(Line::Ignored);
    }

    for (shape, handler) in Line::SHAPES.iter() {
        if let Some(inner) = shape.matches(content) {
            return handler(inner);
        }
    }

    Err(Error::Unclassifiable(content.to_owned()))
}

/// Classifies a whole program, numbering lines from 1. Ignored lines are kept so that
/// locations stay attached to the source they came from.
pub fn classify_lines<I, S>(lines: I) -> Result<Vec<Located<Line>>, Located<Error>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| {
            Located::with_loc(Loc::new(idx + 1), raw).map_result(|raw| classify(raw.as_ref()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::types::{Loc, Located};
    use super::{classify, classify_lines, Error, Line};
    use crate::assembler::symbols::SymbolName;

    fn label(name: &str) -> Line {
        Line::Label(SymbolName::new(name).unwrap())
    }

    #[test]
    fn ignorable_lines() {
        assert_eq!(classify(""), Ok(Line::Ignored));
        assert_eq!(classify("   \t "), Ok(Line::Ignored));
        assert_eq!(classify("// just a comment"), Ok(Line::Ignored));
        assert_eq!(classify("    //indented"), Ok(Line::Ignored));
    }

    #[test]
    fn labels() {
        assert_eq!(classify("(LOOP)"), Ok(label("LOOP")));
        assert_eq!(classify("  (END) // done"), Ok(label("END")));
        assert_eq!(classify("( spaced )"), Ok(label("SPACED")));
        assert_eq!(classify("()"), Err(Error::MalformedLabel(String::new())));
        assert_eq!(
            classify("(1abc)"),
            Err(Error::MalformedLabel(String::from("1abc")))
        );
        assert_eq!(
            classify("(a=b)"),
            Err(Error::MalformedLabel(String::from("a=b")))
        );
    }

    #[test]
    fn address_instructions() {
        assert_eq!(classify("@2"), Ok(Line::Address(String::from("2"))));
        assert_eq!(
            classify("  @i   // counter"),
            Ok(Line::Address(String::from("i")))
        );
        assert_eq!(classify("@"), Err(Error::EmptyOperand));
        assert_eq!(classify("@ // nothing"), Err(Error::EmptyOperand));
    }

    #[test]
    fn compute_instructions() {
        assert_eq!(classify("D=D+1"), Ok(Line::Compute(String::from("D=D+1"))));
        assert_eq!(
            classify(" AM = M - 1 // pop"),
            Ok(Line::Compute(String::from("AM=M-1")))
        );
        assert_eq!(classify("0;JMP"), Ok(Line::Compute(String::from("0;JMP"))));
    }

    #[test]
    fn trailing_comment_is_stripped_before_classification() {
        assert_eq!(
            classify("D // =;"),
            Err(Error::Unclassifiable(String::from("D")))
        );
    }

    #[test]
    fn unclassifiable() {
        assert_eq!(
            classify("hello"),
            Err(Error::Unclassifiable(String::from("hello")))
        );
        assert_eq!(
            classify("(LOOP"),
            Err(Error::Unclassifiable(String::from("(LOOP")))
        );
    }

    #[test]
    fn lines_are_numbered_from_one() {
        let lines = classify_lines(vec!["// header", "@1", "", "D=A"]).unwrap();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1].loc(), Some(&Loc::new(2)));
        assert_eq!(
            classify_lines(vec!["@1", "nonsense"]),
            Err(Located::with_loc(
                Loc::new(2),
                Error::Unclassifiable(String::from("nonsense"))
            ))
        );
    }
}
