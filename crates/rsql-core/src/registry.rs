//! Operator registry
//!
//! The registry is the set of comparison operators a parser accepts. It is immutable once
//! built and meant to be shared (behind an `Arc`) between parsers and threads.

use crate::ast::ComparisonOperator;
use crate::ConfigError;
use std::collections::HashMap;

/// A non-empty set of comparison operators with lookup by canonical symbol
///
/// Alternate spellings are carried by the operators but never accepted in a query: a registry
/// holding `=ge=`/`>=` accepts `a=ge=1` and rejects `a>=1`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<ComparisonOperator>", into = "Vec<ComparisonOperator>")
)]
pub struct OperatorRegistry {
    operators: Vec<ComparisonOperator>,
    /// Canonical symbol -> index into `operators`
    by_symbol: HashMap<String, usize>,
}

impl OperatorRegistry {
    /// Build a registry from a set of operators.
    ///
    /// Operators sharing a canonical symbol are considered the same operator and only the
    /// first one is kept.
    pub fn new<I>(operators: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = ComparisonOperator>,
    {
        let mut kept: Vec<ComparisonOperator> = Vec::new();
        let mut by_symbol = HashMap::new();

        for operator in operators {
            if by_symbol.contains_key(operator.symbol()) {
                tracing::warn!("Dropping duplicate comparison operator: {}", operator);
                continue;
            }
            by_symbol.insert(operator.symbol().to_string(), kept.len());
            kept.push(operator);
        }

        if kept.is_empty() {
            return Err(ConfigError::EmptyOperators);
        }

        tracing::debug!("Built operator registry with {} operators", kept.len());
        Ok(Self {
            operators: kept,
            by_symbol,
        })
    }

    /// Every standard RSQL operator: `==`, `!=`, `=gt=`/`>`, `=ge=`/`>=`, `=lt=`/`<`,
    /// `=le=`/`<=`, `=in=` and `=out=`
    pub fn standard() -> Self {
        Self::from_builtin(vec![
            ComparisonOperator::equal(),
            ComparisonOperator::not_equal(),
            ComparisonOperator::greater_than(),
            ComparisonOperator::greater_than_or_equal(),
            ComparisonOperator::less_than(),
            ComparisonOperator::less_than_or_equal(),
            ComparisonOperator::in_list(),
            ComparisonOperator::not_in_list(),
        ])
    }

    // Builtin sets are non-empty with distinct canonical symbols.
    fn from_builtin(operators: Vec<ComparisonOperator>) -> Self {
        let by_symbol = operators
            .iter()
            .enumerate()
            .map(|(index, op)| (op.symbol().to_string(), index))
            .collect();
        Self {
            operators,
            by_symbol,
        }
    }

    /// Find the operator whose canonical symbol is `symbol`
    pub fn get(&self, symbol: &str) -> Option<&ComparisonOperator> {
        self.by_symbol.get(symbol).map(|&index| &self.operators[index])
    }

    /// Check whether `symbol` is the canonical symbol of a registered operator
    pub fn contains(&self, symbol: &str) -> bool {
        self.by_symbol.contains_key(symbol)
    }

    /// Operators in registration order
    pub fn iter(&self) -> std::slice::Iter<'_, ComparisonOperator> {
        self.operators.iter()
    }

    /// Number of operators
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Always false: construction rejects empty sets
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

/// `==` and the multi-valued `=in=`
impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::from_builtin(vec![ComparisonOperator::equal(), ComparisonOperator::in_list()])
    }
}

impl TryFrom<Vec<ComparisonOperator>> for OperatorRegistry {
    type Error = ConfigError;

    fn try_from(operators: Vec<ComparisonOperator>) -> Result<Self, Self::Error> {
        Self::new(operators)
    }
}

impl From<OperatorRegistry> for Vec<ComparisonOperator> {
    fn from(registry: OperatorRegistry) -> Self {
        registry.operators
    }
}

impl<'a> IntoIterator for &'a OperatorRegistry {
    type Item = &'a ComparisonOperator;
    type IntoIter = std::slice::Iter<'a, ComparisonOperator>;

    fn into_iter(self) -> Self::IntoIter {
        self.operators.iter()
    }
}
