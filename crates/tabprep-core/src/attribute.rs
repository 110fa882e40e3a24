use serde::{Deserialize, Serialize};

use crate::error::{PrepError, PrepResult};

/// What kind of values an attribute holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeKind {
    /// Ordered, append-only list of named values; cells are indices into it.
    Discrete { values: Vec<String> },
    /// Real-valued measurements.
    Continuous,
}

/// A named column of a domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub kind: AttributeKind,
}

impl Attribute {
    /// A discrete attribute with the given value names.
    pub fn discrete(name: impl Into<String>, values: &[&str]) -> Self {
        Attribute {
            name: name.into(),
            kind: AttributeKind::Discrete {
                values: values.iter().map(|v| v.to_string()).collect(),
            },
        }
    }

    /// A continuous attribute.
    pub fn continuous(name: impl Into<String>) -> Self {
        Attribute {
            name: name.into(),
            kind: AttributeKind::Continuous,
        }
    }

    pub fn is_discrete(&self) -> bool {
        matches!(self.kind, AttributeKind::Discrete { .. })
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self.kind, AttributeKind::Continuous)
    }

    /// Number of values of a discrete attribute; 0 for continuous.
    pub fn n_values(&self) -> usize {
        match &self.kind {
            AttributeKind::Discrete { values } => values.len(),
            AttributeKind::Continuous => 0,
        }
    }

    /// Name of the i-th value of a discrete attribute.
    pub fn value_name(&self, index: usize) -> PrepResult<&str> {
        match &self.kind {
            AttributeKind::Discrete { values } => {
                values.get(index).map(String::as_str).ok_or_else(|| {
                    PrepError::InvalidParameter {
                        name: "value index",
                        reason: format!(
                            "index {} out of range for attribute '{}' with {} values",
                            index,
                            self.name,
                            values.len()
                        ),
                    }
                })
            }
            AttributeKind::Continuous => Err(PrepError::SchemaError {
                attribute: self.name.clone(),
                expected: "discrete attribute",
            }),
        }
    }

    /// Append a value to a discrete attribute's value list.
    ///
    /// The list is append-only: existing indices stay valid.
    pub fn add_value(&mut self, value: impl Into<String>) -> PrepResult<usize> {
        match &mut self.kind {
            AttributeKind::Discrete { values } => {
                values.push(value.into());
                Ok(values.len() - 1)
            }
            AttributeKind::Continuous => Err(PrepError::SchemaError {
                attribute: self.name.clone(),
                expected: "discrete attribute",
            }),
        }
    }
}
