use crate::common;
use crate::spec::types::hw::{COMP_WIDTH, DEST_WIDTH, JUMP_WIDTH};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use strum_macros::{Display, EnumIter};

static STORAGE: Lazy<Tables> = Lazy::new(Tables::new);

// The `a` bit followed by `c1..c6`.
pub const COMP: [(&str, &str); 28] = [
    ("0", "0101010"),
    ("1", "0111111"),
    ("-1", "0111010"),
    ("D", "0001100"),
    ("A", "0110000"),
    ("!D", "0001101"),
    ("!A", "0110001"),
    ("-D", "0001111"),
    ("-A", "0110011"),
    ("D+1", "0011111"),
    ("A+1", "0110111"),
    ("D-1", "0001110"),
    ("A-1", "0110010"),
    ("D+A", "0000010"),
    ("D-A", "0010011"),
    ("A-D", "0000111"),
    ("D&A", "0000000"),
    ("D|A", "0010101"),
    ("M", "1110000"),
    ("!M", "1110001"),
    ("-M", "1110011"),
    ("M+1", "1110111"),
    ("M-1", "1110010"),
    ("D+M", "1000010"),
    ("D-M", "1010011"),
    ("M-D", "1000111"),
    ("D&M", "1000000"),
    ("D|M", "1010101"),
];

pub const DEST: [(&str, &str); 7] = [
    ("M", "001"),
    ("D", "010"),
    ("MD", "011"),
    ("A", "100"),
    ("AM", "101"),
    ("AD", "110"),
    ("AMD", "111"),
];

pub const JUMP: [(&str, &str); 7] = [
    ("JGT", "001"),
    ("JEQ", "010"),
    ("JGE", "011"),
    ("JLT", "100"),
    ("JNE", "101"),
    ("JLE", "110"),
    ("JMP", "111"),
];

// Encoding of an absent destination or jump.
pub const NULL_BITS: &str = "000";

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Field {
    #[strum(serialize = "comp")]
    Comp,
    #[strum(serialize = "dest")]
    Dest,
    #[strum(serialize = "jump")]
    Jump,
}

impl Field {
    pub const fn width(self) -> usize {
        match self {
            Field::Comp => COMP_WIDTH,
            Field::Dest => DEST_WIDTH,
            Field::Jump => JUMP_WIDTH,
        }
    }

    fn entries(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Field::Comp => &COMP,
            Field::Dest => &DEST,
            Field::Jump => &JUMP,
        }
    }

    fn null_bits(self) -> Option<&'static str> {
        match self {
            Field::Comp => None,
            Field::Dest | Field::Jump => Some(NULL_BITS),
        }
    }
}

pub struct Table {
    field: Field,
    forward: HashMap<&'static str, &'static str>,
    reverse: HashMap<&'static str, &'static str>,
    null: Option<&'static str>,
}

impl Table {
    fn new(field: Field) -> Self {
        let mut table = Table {
            field,
            forward: HashMap::new(),
            reverse: HashMap::new(),
            null: field.null_bits(),
        };

        assert!(
            common::slice_pairwise_ordered(field.entries())
                .all(|(u, v)| u.0 != v.0 && u.1 != v.1),
            "duplicate entry in the {} table",
            field
        );

        for &(mnemonic, bits) in field.entries() {
            table.register(mnemonic, bits);
        }

        table
    }

    fn register(&mut self, mnemonic: &'static str, bits: &'static str) {
        assert_eq!(
            bits.len(),
            self.field.width(),
            "{} '{}' has the wrong width",
            self.field,
            mnemonic
        );
        assert_ne!(
            Some(bits),
            self.null,
            "{} '{}' shadows the null encoding",
            self.field,
            mnemonic
        );

        self.forward.insert(mnemonic, bits);
        self.reverse.insert(bits, mnemonic);
    }

    pub fn field(&self) -> Field {
        self.field
    }

    /// Counts the null entry, if the field has one.
    pub fn len(&self) -> usize {
        self.forward.len() + if self.null.is_some() { 1 } else { 0 }
    }

    /// `None` as the mnemonic asks for the encoding of an absent field, which only
    /// exists for `dest` and `jump`.
    pub fn encode(&self, mnemonic: Option<&str>) -> Option<&'static str> {
        match mnemonic {
            None => self.null,
            Some(mnemonic) => self.forward.get(mnemonic).copied(),
        }
    }

    /// The outer `None` means the bits are unknown; `Some(None)` is the absent field.
    pub fn decode(&self, bits: &str) -> Option<Option<&'static str>> {
        if self.null == Some(bits) {
            return Some(None);
        }

        self.reverse.get(bits).map(|mnemonic| Some(*mnemonic))
    }

    pub fn mnemonics(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.forward.keys().copied()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.reverse.keys().copied().chain(self.null)
    }
}

pub struct Tables {
    comp: Table,
    dest: Table,
    jump: Table,
}

impl Tables {
    fn new() -> Self {
        Tables {
            comp: Table::new(Field::Comp),
            dest: Table::new(Field::Dest),
            jump: Table::new(Field::Jump),
        }
    }

    pub fn get() -> &'static Tables {
        Lazy::force(&STORAGE)
    }

    pub fn table(&self, field: Field) -> &Table {
        match field {
            Field::Comp => &self.comp,
            Field::Dest => &self.dest,
            Field::Jump => &self.jump,
        }
    }
}
