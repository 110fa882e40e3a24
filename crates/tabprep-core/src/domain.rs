use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;
use crate::error::{PrepError, PrepResult};

/// An ordered attribute schema plus a distinguished class attribute.
///
/// Domains are immutable once built: a transformation that changes the
/// schema constructs a new `Domain` and leaves the old one untouched for
/// any other consumer still holding it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    attributes: Vec<Attribute>,
    class_attr: Attribute,
}

impl Domain {
    pub fn new(attributes: Vec<Attribute>, class_attr: Attribute) -> Self {
        Domain {
            attributes,
            class_attr,
        }
    }

    /// Input attributes, in order (class excluded).
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn class_attr(&self) -> &Attribute {
        &self.class_attr
    }

    /// Number of input attributes.
    pub fn n_attributes(&self) -> usize {
        self.attributes.len()
    }

    /// Row position of the class value (last cell).
    pub fn class_position(&self) -> usize {
        self.attributes.len()
    }

    /// Attribute at a row position; the class sits at `class_position()`.
    pub fn attribute(&self, position: usize) -> PrepResult<&Attribute> {
        if position == self.class_position() {
            Ok(&self.class_attr)
        } else {
            self.attributes.get(position).ok_or_else(|| {
                PrepError::InvalidParameter {
                    name: "position",
                    reason: format!(
                        "position {} out of range for domain with {} attributes",
                        position,
                        self.attributes.len()
                    ),
                }
            })
        }
    }

    /// Look up a row position by attribute name, class included.
    pub fn position(&self, name: &str) -> PrepResult<usize> {
        if let Some(i) = self.attributes.iter().position(|a| a.name == name) {
            Ok(i)
        } else if self.class_attr.name == name {
            Ok(self.class_position())
        } else {
            Err(PrepError::MissingAttribute(name.to_string()))
        }
    }
}
