use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::Domain;
use crate::value::Value;

/// Identifier of an out-of-band weight column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeightId(pub u32);

impl WeightId {
    /// The reserved id meaning "every row weighs 1.0".
    pub const UNIFORM: WeightId = WeightId(0);
}

/// One row, positionally aligned to a domain's attribute order.
///
/// The class value occupies the last cell. Rows are logically immutable:
/// transformations clone a row and modify the copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    values: Vec<Value>,
}

impl Example {
    pub fn new(values: Vec<Value>) -> Self {
        Example { values }
    }

    pub fn get(&self, position: usize) -> Value {
        self.values[position]
    }

    pub fn set(&mut self, position: usize, value: Value) {
        self.values[position] = value;
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// True if any cell (class included) is missing.
    pub fn has_missing(&self) -> bool {
        self.values.iter().any(Value::is_missing)
    }
}

/// Rows bound to a domain, plus any number of weight columns.
///
/// Weight columns live out of band, keyed by `WeightId`. Reading a column
/// that was never written yields 1.0, so `WeightId::UNIFORM` needs no
/// storage at all.
#[derive(Debug, Clone)]
pub struct ExampleTable {
    domain: Arc<Domain>,
    rows: Vec<Example>,
    weights: BTreeMap<u32, Vec<f64>>,
}

impl ExampleTable {
    pub fn new(domain: Arc<Domain>) -> Self {
        ExampleTable {
            domain,
            rows: Vec::new(),
            weights: BTreeMap::new(),
        }
    }

    pub fn domain(&self) -> &Arc<Domain> {
        &self.domain
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> &Example {
        &self.rows[index]
    }

    pub fn rows(&self) -> &[Example] {
        &self.rows
    }

    /// Append a row; existing weight columns extend with 1.0 for it.
    pub fn push(&mut self, example: Example) {
        assert_eq!(
            example.values().len(),
            self.domain.n_attributes() + 1,
            "row length must match domain"
        );
        self.rows.push(example);
        for column in self.weights.values_mut() {
            column.push(1.0);
        }
    }

    /// The weight of a row under a column id; 1.0 for `UNIFORM` or an
    /// absent column.
    pub fn weight(&self, row: usize, id: WeightId) -> f64 {
        match self.weights.get(&id.0) {
            Some(column) => column[row],
            None => 1.0,
        }
    }

    /// Next unused weight-column id (never `UNIFORM`).
    pub fn alloc_weight_id(&self) -> WeightId {
        WeightId(self.weights.keys().max().map_or(1, |k| k + 1))
    }

    /// Create a column under `id`, filled with 1.0.
    pub fn add_weight_column(&mut self, id: WeightId) {
        assert!(id != WeightId::UNIFORM, "the uniform id is reserved");
        self.weights.insert(id.0, vec![1.0; self.rows.len()]);
    }

    pub fn set_weight(&mut self, row: usize, id: WeightId, weight: f64) {
        let column = self
            .weights
            .get_mut(&id.0)
            .expect("weight column must be added before writing");
        column[row] = weight;
    }

    /// Copy every weight column of `other` into this table.
    ///
    /// For row-count-preserving transforms that rebuild rows into a fresh
    /// table and still must carry the caller's columns.
    pub fn copy_weight_columns(&mut self, other: &ExampleTable) {
        assert_eq!(
            self.rows.len(),
            other.rows.len(),
            "weight columns require matching row counts"
        );
        for (&id, column) in &other.weights {
            self.weights.insert(id, column.clone());
        }
    }

    /// A new table with the rows at `keep` (in that order) and every weight
    /// column restricted to them.
    pub fn select(&self, keep: &[usize]) -> ExampleTable {
        let rows = keep.iter().map(|&i| self.rows[i].clone()).collect();
        let weights = self
            .weights
            .iter()
            .map(|(&id, column)| (id, keep.iter().map(|&i| column[i]).collect()))
            .collect();
        ExampleTable {
            domain: Arc::clone(&self.domain),
            rows,
            weights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Attribute;

    fn small_table() -> ExampleTable {
        let domain = Arc::new(Domain::new(
            vec![Attribute::discrete("a", &["a0", "a1"])],
            Attribute::discrete("c", &["no", "yes"]),
        ));
        let mut table = ExampleTable::new(domain);
        table.push(Example::new(vec![Value::Discrete(0), Value::Discrete(1)]));
        table.push(Example::new(vec![Value::Discrete(1), Value::Discrete(0)]));
        table
    }

    #[test]
    fn test_uniform_weight() {
        let table = small_table();
        assert_eq!(table.weight(0, WeightId::UNIFORM), 1.0);
        assert_eq!(table.weight(1, WeightId(7)), 1.0);
    }

    #[test]
    fn test_weight_column_roundtrip() {
        let mut table = small_table();
        let id = table.alloc_weight_id();
        assert_ne!(id, WeightId::UNIFORM);

        table.add_weight_column(id);
        table.set_weight(0, id, 0.25);
        assert_eq!(table.weight(0, id), 0.25);
        assert_eq!(table.weight(1, id), 1.0);

        // A fresh allocation must not collide.
        assert_ne!(table.alloc_weight_id(), id);
    }

    #[test]
    fn test_push_extends_columns() {
        let mut table = small_table();
        let id = table.alloc_weight_id();
        table.add_weight_column(id);
        table.set_weight(0, id, 0.5);

        table.push(Example::new(vec![Value::DontKnow, Value::Discrete(1)]));
        assert_eq!(table.weight(2, id), 1.0);
        assert_eq!(table.weight(0, id), 0.5);
    }

    #[test]
    fn test_select_carries_weights() {
        let mut table = small_table();
        let id = table.alloc_weight_id();
        table.add_weight_column(id);
        table.set_weight(1, id, 0.125);

        let picked = table.select(&[1]);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked.row(0).get(0), Value::Discrete(1));
        assert_eq!(picked.weight(0, id), 0.125);
    }
}
