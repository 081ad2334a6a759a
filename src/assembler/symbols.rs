use crate::spec::{
    defs::predef::PREDEFINED,
    types::hw::{Word, VARIABLE_BASE},
};
use derive_more::{Constructor, Display};
use log::debug;
use std::collections::HashMap;

const EXTRA_SYMBOL_CHARS: [char; 4] = ['_', '.', '$', ':'];

/// A symbol name in canonical (upper) case. Lookups are case-insensitive because every
/// name passes through `SymbolName::new` exactly once.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolName(String);

impl SymbolName {
    fn is_symbol_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || EXTRA_SYMBOL_CHARS.contains(&c)
    }

    pub fn is_legal(raw: &str) -> bool {
        let mut cs = raw.chars();
        match cs.next() {
            Some(first) if !first.is_ascii_digit() && SymbolName::is_symbol_char(first) => {
                cs.all(SymbolName::is_symbol_char)
            }
            _ => false,
        }
    }

    pub fn new(raw: &str) -> Option<Self> {
        if SymbolName::is_legal(raw) {
            Some(SymbolName(raw.to_ascii_uppercase()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    #[display(fmt = "predefined")]
    Predefined,
    #[display(fmt = "label")]
    Label,
    #[display(fmt = "variable")]
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Constructor)]
pub struct Symbol {
    pub addr: Word,
    pub kind: Kind,
}

/// Per-program translation state: every binding made so far plus the next free
/// variable address. `None` once the variable space has been used up.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    entries: HashMap<SymbolName, Symbol>,
    next_variable: Option<Word>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        let entries = PREDEFINED
            .iter()
            .map(|&(name, addr)| {
                (
                    SymbolName(name.to_owned()),
                    Symbol::new(addr, Kind::Predefined),
                )
            })
            .collect();

        SymbolTable {
            entries,
            next_variable: Some(VARIABLE_BASE),
        }
    }

    pub fn get(&self, name: &SymbolName) -> Option<Word> {
        self.entries.get(name).map(|sym| sym.addr)
    }

    pub fn contains(&self, name: &SymbolName) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns whether the label was bound. The first declaration of a name wins, later
    /// ones (and names that are already predefined) leave the table untouched.
    pub fn bind_label(&mut self, name: SymbolName, addr: Word) -> bool {
        if self.entries.contains_key(&name) {
            debug!("label '{}' already bound, ignoring redeclaration", name);
            return false;
        }

        debug!("label '{}' -> {}", name, addr);
        self.entries.insert(name, Symbol::new(addr, Kind::Label));
        true
    }

    /// Looks up `name`, binding it as a fresh variable on first sight. Returns `None` only
    /// when a new variable is needed and no address is left to give it.
    pub fn resolve_or_allocate(&mut self, name: SymbolName) -> Option<Word> {
        if let Some(addr) = self.get(&name) {
            return Some(addr);
        }

        let addr = self.next_variable?;
        self.next_variable = addr.checked_add(1);

        debug!("variable '{}' -> {}", name, addr);
        self.entries.insert(name, Symbol::new(addr, Kind::Variable));
        Some(addr)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SymbolName, &Symbol)> {
        self.entries.iter()
    }

    /// Every label and variable, ordered by kind then address.
    pub fn user_symbols(&self) -> Vec<(&SymbolName, Symbol)> {
        let mut syms = self
            .entries
            .iter()
            .filter(|(_, sym)| sym.kind != Kind::Predefined)
            .map(|(name, sym)| (name, *sym))
            .collect::<Vec<_>>();
        syms.sort_by_key(|(name, sym)| (sym.kind == Kind::Variable, sym.addr, (*name).clone()));
        syms
    }
}
