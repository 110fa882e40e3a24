use std::collections::HashMap;
use std::sync::Arc;

use tabprep_core::{ExampleTable, MissingKind, PrepResult, RandomGenerator, WeightId};

use crate::noise::resolve_per_attribute;
use crate::preprocessor::Preprocessor;

/// Blank out values with a configurable missing flavor, per-attribute
/// probability with a default. Applies to input attributes of any kind.
pub struct AddMissing {
    proportions: HashMap<String, f64>,
    default_proportion: f64,
    kind: MissingKind,
    rng: RandomGenerator,
}

impl AddMissing {
    pub fn new(
        proportions: HashMap<String, f64>,
        default_proportion: f64,
        kind: MissingKind,
        rng: RandomGenerator,
    ) -> Self {
        AddMissing {
            proportions: proportions
                .into_iter()
                .map(|(name, p)| (name, p.clamp(0.0, 1.0)))
                .collect(),
            default_proportion: default_proportion.clamp(0.0, 1.0),
            kind,
            rng,
        }
    }
}

impl Preprocessor for AddMissing {
    fn apply(
        &mut self,
        table: &ExampleTable,
        weight: WeightId,
    ) -> PrepResult<(ExampleTable, WeightId)> {
        let domain = table.domain();
        let probs =
            resolve_per_attribute(domain, &self.proportions, self.default_proportion, None)?;

        let mut out = ExampleTable::new(Arc::clone(domain));
        for row in table.rows() {
            let mut row = row.clone();
            for (i, &p) in probs.iter().enumerate() {
                if p > 0.0 && self.rng.uniform() < p {
                    row.set(i, self.kind.into());
                }
            }
            out.push(row);
        }
        out.copy_weight_columns(table);
        Ok((out, weight))
    }
}

/// `AddMissing` restricted to the class value, single proportion.
pub struct AddMissingClasses {
    proportion: f64,
    kind: MissingKind,
    rng: RandomGenerator,
}

impl AddMissingClasses {
    pub fn new(proportion: f64, kind: MissingKind, rng: RandomGenerator) -> Self {
        AddMissingClasses {
            proportion: proportion.clamp(0.0, 1.0),
            kind,
            rng,
        }
    }
}

impl Preprocessor for AddMissingClasses {
    fn apply(
        &mut self,
        table: &ExampleTable,
        weight: WeightId,
    ) -> PrepResult<(ExampleTable, WeightId)> {
        let position = table.domain().class_position();

        let mut out = ExampleTable::new(Arc::clone(table.domain()));
        for row in table.rows() {
            let mut row = row.clone();
            if self.proportion > 0.0 && self.rng.uniform() < self.proportion {
                row.set(position, self.kind.into());
            }
            out.push(row);
        }
        out.copy_weight_columns(table);
        Ok((out, weight))
    }
}
