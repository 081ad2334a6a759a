use super::{classify, encode, resolve};
use derive_more::Constructor;
use std::fmt::{Debug, Display};

/*
    Phases:

        1.  Classification: Each source line has its trailing comment stripped and is sorted into
            exactly one `Line` shape: ignored (blank or comment only), a label declaration, an
            address-instruction, or a compute-instruction. Nothing is looked up yet.

        2.  Resolution: The classified lines are walked once with a running instruction counter.
            Every label declaration binds its name to the address of the next real instruction,
            so by the end of this phase every label in the program is known.

        3.  Encoding: The same lines are walked again. Address operands are resolved through the
            symbol table (allocating variables on first sight), compute fields go through the
            bit-field tables, and one `Codeword` is emitted per instruction.

    All three phases share one `SymbolTable`, created fresh for every program.
*/

#[derive(Debug, PartialEq, Clone, Eq, Constructor)]
pub struct Loc {
    line: usize,
}

impl Loc {
    pub fn line(&self) -> usize {
        self.line
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Located<T: Sized> {
    loc: Option<Loc>,
    val: T,
}

impl Display for Loc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(line: {})", self.line)
    }
}

impl<T: Display> Display for Located<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.loc {
            None => write!(f, "@<unknown location>: {}", self.val),
            Some(loc) => write!(f, "@{}: {}", loc, self.val),
        }
    }
}

impl<T: Debug + Display> std::error::Error for Located<T> {}

impl<T> Located<T> {
    fn new(loc: Option<Loc>, val: T) -> Self {
        Located { loc, val }
    }

    pub fn with_loc(loc: Loc, val: T) -> Self {
        Located::new(Some(loc), val)
    }

    pub fn loc(&self) -> Option<&Loc> {
        self.loc.as_ref()
    }

    pub fn value(self) -> T {
        self.val
    }

    pub fn value_ref(&self) -> &T {
        &self.val
    }

    pub fn map<S, F>(self, f: F) -> Located<S>
    where
        F: FnOnce(T) -> S,
    {
        Located::new(self.loc, f(self.val))
    }

    pub fn map_result<S, E, F>(self, f: F) -> Result<Located<S>, Located<E>>
    where
        F: FnOnce(T) -> Result<S, E>,
    {
        match f(self.val) {
            Ok(s) => Ok(Located::new(self.loc, s)),
            Err(err) => Err(Located::new(self.loc, err)),
        }
    }

    /// Places `s` at the same location as `self`.
    pub fn attach<S>(&self, s: S) -> Located<S> {
        Located::new(self.loc.clone(), s)
    }
}

impl<T> From<T> for Located<T> {
    fn from(val: T) -> Self {
        Located { loc: None, val }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    Classify(Located<classify::Error>),
    Resolve(Located<resolve::Error>),
    Encode(Located<encode::Error>),
}

impl From<Located<classify::Error>> for Error {
    fn from(err: Located<classify::Error>) -> Self {
        Error::Classify(err)
    }
}

impl From<Located<resolve::Error>> for Error {
    fn from(err: Located<resolve::Error>) -> Self {
        Error::Resolve(err)
    }
}

impl From<Located<encode::Error>> for Error {
    fn from(err: Located<encode::Error>) -> Self {
        Error::Encode(err)
    }
}

impl Error {
    pub fn loc(&self) -> Option<&Loc> {
        match self {
            Error::Classify(err) => err.loc(),
            Error::Resolve(err) => err.loc(),
            Error::Encode(err) => err.loc(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Assembly Error (in ")?;
        match self {
            Error::Classify(_) => write!(f, "Classifier"),
            Error::Resolve(_) => write!(f, "Resolver"),
            Error::Encode(_) => write!(f, "Encoder"),
        }?;
        write!(f, "): ")?;
        match self {
            Error::Classify(err) => write!(f, "{}", err),
            Error::Resolve(err) => write!(f, "{}", err),
            Error::Encode(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {}
