use tabprep_core::{ExampleTable, PrepError, PrepResult, Value, WeightId};

use crate::preprocessor::Preprocessor;

/// Reweight rows by class: explicit per-class factors, optional
/// equalization of class weight masses, or both (factors multiply).
///
/// Allocates one new weight column; rows with a missing class keep
/// factor 1.
#[derive(Debug)]
pub struct AddClassWeight {
    class_weights: Vec<f64>,
    equalize: bool,
}

impl AddClassWeight {
    pub fn new(class_weights: Vec<f64>, equalize: bool) -> PrepResult<Self> {
        for &w in &class_weights {
            if w < 0.0 {
                return Err(PrepError::InvalidParameter {
                    name: "class_weights",
                    reason: format!("negative class weight {}", w),
                });
            }
        }
        Ok(AddClassWeight {
            class_weights,
            equalize,
        })
    }
}

impl Preprocessor for AddClassWeight {
    fn apply(
        &mut self,
        table: &ExampleTable,
        weight: WeightId,
    ) -> PrepResult<(ExampleTable, WeightId)> {
        let domain = table.domain();
        let class = domain.class_attr();
        if !class.is_discrete() {
            return Err(PrepError::SchemaError {
                attribute: class.name.clone(),
                expected: "discrete class attribute",
            });
        }
        let n_classes = class.n_values();
        if n_classes == 0 {
            return Err(PrepError::EmptyDomain(class.name.clone()));
        }
        if !self.class_weights.is_empty() && self.class_weights.len() != n_classes {
            return Err(PrepError::InvalidParameter {
                name: "class_weights",
                reason: format!(
                    "{} weights given for {} classes",
                    self.class_weights.len(),
                    n_classes
                ),
            });
        }

        let position = domain.class_position();
        let mut factors = if self.class_weights.is_empty() {
            vec![1.0; n_classes]
        } else {
            self.class_weights.clone()
        };

        if self.equalize {
            let mut masses = vec![0.0; n_classes];
            for i in 0..table.len() {
                if let Value::Discrete(c) = table.row(i).get(position) {
                    masses[c] += table.weight(i, weight);
                }
            }
            let present = masses.iter().filter(|&&m| m > 0.0).count();
            let total: f64 = masses.iter().sum();
            for (factor, &mass) in factors.iter_mut().zip(&masses) {
                if mass > 0.0 {
                    *factor *= total / (present as f64 * mass);
                }
            }
        }

        let new_id = table.alloc_weight_id();
        let mut out = table.clone();
        out.add_weight_column(new_id);
        for i in 0..table.len() {
            let factor = match table.row(i).get(position) {
                Value::Discrete(c) => factors[c],
                _ => 1.0,
            };
            out.set_weight(i, new_id, table.weight(i, weight) * factor);
        }
        Ok((out, new_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::Arc;
    use tabprep_core::{Attribute, Domain, Example};

    fn table(class_counts: &[usize]) -> ExampleTable {
        let domain = Arc::new(Domain::new(
            vec![Attribute::continuous("x")],
            Attribute::discrete("c", &["c0", "c1"]),
        ));
        let mut table = ExampleTable::new(domain);
        for (class, &count) in class_counts.iter().enumerate() {
            for _ in 0..count {
                table.push(Example::new(vec![
                    Value::Continuous(0.0),
                    Value::Discrete(class),
                ]));
            }
        }
        table
    }

    #[test]
    fn test_explicit_factors() {
        let table = table(&[2, 2]);
        let mut step = AddClassWeight::new(vec![2.0, 0.5], false).unwrap();
        let (out, id) = step.apply(&table, WeightId::UNIFORM).unwrap();

        assert_ne!(id, WeightId::UNIFORM);
        assert_eq!(out.weight(0, id), 2.0);
        assert_eq!(out.weight(3, id), 0.5);
    }

    #[test]
    fn test_equalize_balances_masses() {
        // 6 rows of c0, 2 of c1: equalized masses must match.
        let table = table(&[6, 2]);
        let mut step = AddClassWeight::new(Vec::new(), true).unwrap();
        let (out, id) = step.apply(&table, WeightId::UNIFORM).unwrap();

        let mass0: f64 = (0..6).map(|i| out.weight(i, id)).sum();
        let mass1: f64 = (6..8).map(|i| out.weight(i, id)).sum();
        assert_relative_eq!(mass0, mass1);
        // Total mass is conserved.
        assert_relative_eq!(mass0 + mass1, 8.0);
    }

    #[test]
    fn test_wrong_weight_count_rejected() {
        let mut step = AddClassWeight::new(vec![1.0], false).unwrap();
        assert!(matches!(
            step.apply(&table(&[1, 1]), WeightId::UNIFORM).unwrap_err(),
            PrepError::InvalidParameter { .. }
        ));
    }

    #[test]
    fn test_negative_weight_rejected() {
        assert!(matches!(
            AddClassWeight::new(vec![-1.0, 1.0], false).unwrap_err(),
            PrepError::InvalidParameter { .. }
        ));
    }
}
