//! Hierarchy tree for statement sections.
//!
//! The parser encodes the income/COGS/asset subtrees as nested maps with
//! `children`, `values`, and a legacy `parent` marker on aggregation rows.
//! In-memory we hold an explicit two-variant tree instead: a [`Branch`] is
//! structurally never summed and a [`Leaf`] always is, so the double-counting
//! guard holds by construction rather than by a runtime flag check.
//!
//! [`Branch`]: AccountNode::Branch
//! [`Leaf`]: AccountNode::Leaf

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawNode", into = "RawNode")]
pub enum AccountNode {
    Branch {
        name: Option<String>,
        children: Vec<AccountNode>,
    },
    Leaf {
        name: Option<String>,
        values: BTreeMap<String, f64>,
    },
}

impl AccountNode {
    pub fn branch(name: impl Into<String>, children: Vec<AccountNode>) -> Self {
        AccountNode::Branch {
            name: Some(name.into()),
            children,
        }
    }

    pub fn leaf<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        AccountNode::Leaf {
            name: Some(name.into()),
            values: values.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            AccountNode::Branch { name, .. } | AccountNode::Leaf { name, .. } => name.as_deref(),
        }
    }

    /// Accumulate every leaf's per-period values into `totals`.
    ///
    /// Branch nodes only recurse; they never contribute amounts themselves.
    pub fn sum_leaves_into(&self, totals: &mut BTreeMap<String, f64>) {
        match self {
            AccountNode::Branch { children, .. } => {
                for child in children {
                    child.sum_leaves_into(totals);
                }
            }
            AccountNode::Leaf { values, .. } => {
                for (period, value) in values {
                    *totals.entry(period.clone()).or_insert(0.0) += value;
                }
            }
        }
    }

    pub fn sum_leaves(&self) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        self.sum_leaves_into(&mut totals);
        totals
    }

    /// First leaf values map in depth-first order, used to discover the
    /// declared period labels of a statement.
    pub fn first_values(&self) -> Option<&BTreeMap<String, f64>> {
        match self {
            AccountNode::Leaf { values, .. } => Some(values),
            AccountNode::Branch { children, .. } => {
                children.iter().find_map(AccountNode::first_values)
            }
        }
    }

    /// Depth-first search for a node by name, including this node itself.
    pub fn find(&self, target: &str) -> Option<&AccountNode> {
        if self.name() == Some(target) {
            return Some(self);
        }
        match self {
            AccountNode::Branch { children, .. } => {
                children.iter().find_map(|child| child.find(target))
            }
            AccountNode::Leaf { .. } => None,
        }
    }
}

/// Wire form of a hierarchy node as produced by the parser.
///
/// A node carries `children` (aggregation) or `values` (leaf); a value-bearing
/// node flagged `parent` is a legacy aggregation marker and must stay out of
/// sums, so it converts to a childless `Branch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<RawNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    values: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    parent: bool,
}

impl From<RawNode> for AccountNode {
    fn from(raw: RawNode) -> Self {
        if let Some(children) = raw.children {
            AccountNode::Branch {
                name: raw.name,
                children: children.into_iter().map(Into::into).collect(),
            }
        } else if let Some(values) = raw.values {
            if raw.parent {
                AccountNode::Branch {
                    name: raw.name,
                    children: Vec::new(),
                }
            } else {
                AccountNode::Leaf {
                    name: raw.name,
                    values,
                }
            }
        } else {
            AccountNode::Branch {
                name: raw.name,
                children: Vec::new(),
            }
        }
    }
}

impl From<AccountNode> for RawNode {
    fn from(node: AccountNode) -> Self {
        match node {
            AccountNode::Branch { name, children } => RawNode {
                name,
                children: Some(children.into_iter().map(Into::into).collect()),
                values: None,
                parent: false,
            },
            AccountNode::Leaf { name, values } => RawNode {
                name,
                children: None,
                values: Some(values),
                parent: false,
            },
        }
    }
}
