//! Comparison operators

use crate::ConfigError;
use regex::Regex;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

/// Every spelling a comparison operator may have.
pub const SYMBOL_PATTERN: &str = "=[A-Za-z]*=|[><]=?|!=";

fn symbol_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(&format!("^(?:{})$", SYMBOL_PATTERN)).expect("operator symbol pattern is valid")
    })
}

/// Check whether `symbol` is a spelling the lexer can recognize as an operator
pub fn is_valid_symbol(symbol: &str) -> bool {
    symbol_regex().is_match(symbol)
}

/// A comparison operator such as `==` or `=in=`.
///
/// An operator has one or more spellings; the first one is canonical. Registries match query
/// tokens against it and rendering writes it. Equality and hashing only look at the canonical symbol, so
/// `=ge=` with alternate `>=` equals a bare `=ge=`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "OperatorDefinition", into = "OperatorDefinition")
)]
pub struct ComparisonOperator {
    symbols: Vec<String>,
    multi_value: bool,
}

impl ComparisonOperator {
    /// Create an operator with a single spelling
    pub fn from_symbol(symbol: impl Into<String>, multi_value: bool) -> Result<Self, ConfigError> {
        Self::from_symbol_list(vec![symbol.into()], multi_value)
    }

    /// Create an operator with a canonical and an alternative spelling
    pub fn from_symbols(
        symbol: impl Into<String>,
        alt_symbol: impl Into<String>,
        multi_value: bool,
    ) -> Result<Self, ConfigError> {
        Self::from_symbol_list(vec![symbol.into(), alt_symbol.into()], multi_value)
    }

    /// Create an operator from any number of spellings, the first being canonical.
    ///
    /// Fails if the list is empty or any spelling does not match [`SYMBOL_PATTERN`].
    pub fn from_symbol_list<I, S>(symbols: I, multi_value: bool) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();
        if symbols.is_empty() {
            return Err(ConfigError::EmptySymbols);
        }
        if let Some(bad) = symbols.iter().find(|s| !is_valid_symbol(s)) {
            return Err(ConfigError::InvalidSymbol(bad.clone()));
        }
        Ok(Self { symbols, multi_value })
    }

    // Spellings here are literals known to match SYMBOL_PATTERN.
    fn builtin(symbols: &[&str], multi_value: bool) -> Self {
        debug_assert!(symbols.iter().all(|s| is_valid_symbol(s)));
        Self {
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
            multi_value,
        }
    }

    /// `==`
    pub fn equal() -> Self {
        Self::builtin(&["=="], false)
    }

    /// `!=`
    pub fn not_equal() -> Self {
        Self::builtin(&["!="], false)
    }

    /// `=gt=` or `>`
    pub fn greater_than() -> Self {
        Self::builtin(&["=gt=", ">"], false)
    }

    /// `=ge=` or `>=`
    pub fn greater_than_or_equal() -> Self {
        Self::builtin(&["=ge=", ">="], false)
    }

    /// `=lt=` or `<`
    pub fn less_than() -> Self {
        Self::builtin(&["=lt=", "<"], false)
    }

    /// `=le=` or `<=`
    pub fn less_than_or_equal() -> Self {
        Self::builtin(&["=le=", "<="], false)
    }

    /// `=in=`, multi-valued
    pub fn in_list() -> Self {
        Self::builtin(&["=in="], true)
    }

    /// `=out=`, multi-valued
    pub fn not_in_list() -> Self {
        Self::builtin(&["=out="], true)
    }

    /// The canonical spelling
    pub fn symbol(&self) -> &str {
        &self.symbols[0]
    }

    /// All spellings, canonical first
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Whether this operator accepts more than one argument
    pub fn is_multi_value(&self) -> bool {
        self.multi_value
    }
}

impl PartialEq for ComparisonOperator {
    fn eq(&self, other: &Self) -> bool {
        self.symbol() == other.symbol()
    }
}

impl Eq for ComparisonOperator {}

impl Hash for ComparisonOperator {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.symbol().hash(state);
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Operator definition as it appears in configuration files
#[cfg(feature = "serde")]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct OperatorDefinition {
    /// Spellings, canonical first
    pub symbols: Vec<String>,
    /// Whether more than one argument is accepted
    #[serde(default)]
    pub multi_value: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<OperatorDefinition> for ComparisonOperator {
    type Error = ConfigError;

    fn try_from(def: OperatorDefinition) -> Result<Self, Self::Error> {
        Self::from_symbol_list(def.symbols, def.multi_value)
    }
}

#[cfg(feature = "serde")]
impl From<ComparisonOperator> for OperatorDefinition {
    fn from(op: ComparisonOperator) -> Self {
        Self {
            symbols: op.symbols,
            multi_value: op.multi_value,
        }
    }
}
