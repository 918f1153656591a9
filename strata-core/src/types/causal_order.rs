//! Causal order: node indices listed causes-first.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{OrderError, ShapeError};

/// Ordered sequence of distinct node indices.
///
/// Textual form is `[0, 1, 2]`; parsing also accepts a bare `0,1,2` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CausalOrder(Vec<usize>);

impl CausalOrder {
    pub fn new(nodes: Vec<usize>) -> Self {
        Self(nodes)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Position of `node` in the order, if present.
    pub fn position(&self, node: usize) -> Option<usize> {
        self.0.iter().position(|&n| n == node)
    }

    /// Check every index is `< n` and appears once.
    pub fn validate(&self, n: usize) -> Result<(), ShapeError> {
        validate_nodes(&self.0, n)
    }

    /// Whether the order lists every node of `0..n` exactly once.
    pub fn is_complete(&self, n: usize) -> bool {
        self.0.len() == n && self.validate(n).is_ok()
    }
}

/// Range and distinctness check shared by every order-consuming API.
pub fn validate_nodes(nodes: &[usize], n: usize) -> Result<(), ShapeError> {
    let mut seen = vec![false; n];
    for &node in nodes {
        if node >= n {
            return Err(ShapeError::NodeOutOfRange { node, n });
        }
        if std::mem::replace(&mut seen[node], true) {
            return Err(ShapeError::DuplicateNode { node });
        }
    }
    Ok(())
}

impl From<Vec<usize>> for CausalOrder {
    fn from(nodes: Vec<usize>) -> Self {
        Self(nodes)
    }
}

impl AsRef<[usize]> for CausalOrder {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for CausalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, node) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{node}")?;
        }
        f.write_str("]")
    }
}

impl FromStr for CausalOrder {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .trim();
        if inner.is_empty() {
            return Ok(Self::default());
        }
        inner
            .split(',')
            .map(|token| {
                token.trim().parse::<usize>().map_err(|_| OrderError::Parse {
                    token: token.trim().to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse_agree() {
        let order = CausalOrder::new(vec![3, 0, 2, 1]);
        let text = order.to_string();
        assert_eq!(text, "[3, 0, 2, 1]");
        assert_eq!(text.parse::<CausalOrder>().unwrap(), order);
        assert_eq!(" 3,0 , 2,1\n".parse::<CausalOrder>().unwrap(), order);
        assert_eq!("[]".parse::<CausalOrder>().unwrap(), CausalOrder::default());
    }

    #[test]
    fn parse_reports_bad_token() {
        assert_eq!(
            "[0, x, 2]".parse::<CausalOrder>(),
            Err(OrderError::Parse {
                token: "x".to_string()
            })
        );
        assert!("[0, -1]".parse::<CausalOrder>().is_err());
    }

    #[test]
    fn validate_catches_range_and_duplicates() {
        assert_eq!(
            CausalOrder::new(vec![0, 3]).validate(3),
            Err(ShapeError::NodeOutOfRange { node: 3, n: 3 })
        );
        assert_eq!(
            CausalOrder::new(vec![1, 0, 1]).validate(3),
            Err(ShapeError::DuplicateNode { node: 1 })
        );
        assert!(CausalOrder::new(vec![2, 0]).validate(3).is_ok());
        assert!(!CausalOrder::new(vec![2, 0]).is_complete(3));
        assert!(CausalOrder::new(vec![2, 0, 1]).is_complete(3));
    }

    #[test]
    fn serializes_as_plain_array() {
        let order = CausalOrder::new(vec![1, 0]);
        assert_eq!(serde_json::to_string(&order).unwrap(), "[1,0]");
        let back: CausalOrder = serde_json::from_str("[1,0]").unwrap();
        assert_eq!(back, order);
    }
}
