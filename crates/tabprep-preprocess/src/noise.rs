use std::collections::HashMap;
use std::sync::Arc;

use tabprep_core::{
    Domain, ExampleTable, PrepError, PrepResult, RandomGenerator, Value, WeightId,
};

use crate::preprocessor::Preprocessor;

fn clamp01(p: f64) -> f64 {
    p.clamp(0.0, 1.0)
}

/// Resolve a per-attribute parameter map against a domain.
///
/// Explicit entries must name an input attribute of the required kind
/// (`None` = any kind); unlisted attributes of that kind get `default`,
/// everything else 0.
pub(crate) fn resolve_per_attribute(
    domain: &Domain,
    explicit: &HashMap<String, f64>,
    default: f64,
    discrete: Option<bool>,
) -> PrepResult<Vec<f64>> {
    let mut resolved = vec![0.0; domain.n_attributes()];
    for (i, attr) in domain.attributes().iter().enumerate() {
        if discrete.map_or(true, |d| attr.is_discrete() == d) {
            resolved[i] = default;
        }
    }
    for (name, &value) in explicit {
        let position = domain.position(name)?;
        if position == domain.class_position() {
            return Err(PrepError::SchemaError {
                attribute: name.clone(),
                expected: "input attribute",
            });
        }
        if let Some(d) = discrete {
            if domain.attributes()[position].is_discrete() != d {
                return Err(PrepError::SchemaError {
                    attribute: name.clone(),
                    expected: if d {
                        "discrete attribute"
                    } else {
                        "continuous attribute"
                    },
                });
            }
        }
        resolved[position] = value;
    }
    Ok(resolved)
}

/// Replace discrete values with uniformly random ones from the same
/// attribute, per-attribute probability with a default.
///
/// No redraw-until-different: the replacement may equal the original.
pub struct AddNoise {
    proportions: HashMap<String, f64>,
    default_proportion: f64,
    rng: RandomGenerator,
}

impl AddNoise {
    pub fn new(
        proportions: HashMap<String, f64>,
        default_proportion: f64,
        rng: RandomGenerator,
    ) -> Self {
        AddNoise {
            proportions: proportions
                .into_iter()
                .map(|(name, p)| (name, clamp01(p)))
                .collect(),
            default_proportion: clamp01(default_proportion),
            rng,
        }
    }
}

impl Preprocessor for AddNoise {
    fn apply(
        &mut self,
        table: &ExampleTable,
        weight: WeightId,
    ) -> PrepResult<(ExampleTable, WeightId)> {
        let domain = table.domain();
        let probs = resolve_per_attribute(
            domain,
            &self.proportions,
            self.default_proportion,
            Some(true),
        )?;
        for (i, attr) in domain.attributes().iter().enumerate() {
            if probs[i] > 0.0 && attr.n_values() == 0 {
                return Err(PrepError::EmptyDomain(attr.name.clone()));
            }
        }

        let mut out = ExampleTable::new(Arc::clone(domain));
        for row in table.rows() {
            let mut row = row.clone();
            for (i, &p) in probs.iter().enumerate() {
                if p <= 0.0 || row.get(i).is_missing() {
                    continue;
                }
                if self.rng.uniform() < p {
                    let n = domain.attributes()[i].n_values();
                    row.set(i, Value::Discrete(self.rng.below(n)));
                }
            }
            out.push(row);
        }
        out.copy_weight_columns(table);
        Ok((out, weight))
    }
}

/// Add zero-mean Gaussian perturbations to continuous values,
/// per-attribute deviation with a default.
#[derive(Debug)]
pub struct AddGaussianNoise {
    deviations: HashMap<String, f64>,
    default_deviation: f64,
    rng: RandomGenerator,
}

impl AddGaussianNoise {
    pub fn new(
        deviations: HashMap<String, f64>,
        default_deviation: f64,
        rng: RandomGenerator,
    ) -> PrepResult<Self> {
        for (name, &dev) in &deviations {
            if dev < 0.0 {
                return Err(PrepError::InvalidParameter {
                    name: "deviation",
                    reason: format!("negative deviation {} for attribute '{}'", dev, name),
                });
            }
        }
        if default_deviation < 0.0 {
            return Err(PrepError::InvalidParameter {
                name: "deviation",
                reason: format!("negative default deviation {}", default_deviation),
            });
        }
        Ok(AddGaussianNoise {
            deviations,
            default_deviation,
            rng,
        })
    }
}

impl Preprocessor for AddGaussianNoise {
    fn apply(
        &mut self,
        table: &ExampleTable,
        weight: WeightId,
    ) -> PrepResult<(ExampleTable, WeightId)> {
        let domain = table.domain();
        let devs = resolve_per_attribute(
            domain,
            &self.deviations,
            self.default_deviation,
            Some(false),
        )?;

        let mut out = ExampleTable::new(Arc::clone(domain));
        for row in table.rows() {
            let mut row = row.clone();
            for (i, &dev) in devs.iter().enumerate() {
                if dev <= 0.0 {
                    continue;
                }
                if let Value::Continuous(v) = row.get(i) {
                    row.set(i, Value::Continuous(v + self.rng.gaussian(0.0, dev)));
                }
            }
            out.push(row);
        }
        out.copy_weight_columns(table);
        Ok((out, weight))
    }
}

/// `AddNoise` restricted to the class attribute, single proportion.
pub struct AddClassNoise {
    proportion: f64,
    rng: RandomGenerator,
}

impl AddClassNoise {
    pub fn new(proportion: f64, rng: RandomGenerator) -> Self {
        AddClassNoise {
            proportion: clamp01(proportion),
            rng,
        }
    }
}

impl Preprocessor for AddClassNoise {
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
        if self.proportion > 0.0 && class.n_values() == 0 {
            return Err(PrepError::EmptyDomain(class.name.clone()));
        }
        let position = domain.class_position();
        let n = class.n_values();

        let mut out = ExampleTable::new(Arc::clone(domain));
        for row in table.rows() {
            let mut row = row.clone();
            if self.proportion > 0.0
                && !row.get(position).is_missing()
                && self.rng.uniform() < self.proportion
            {
                row.set(position, Value::Discrete(self.rng.below(n)));
            }
            out.push(row);
        }
        out.copy_weight_columns(table);
        Ok((out, weight))
    }
}

/// `AddGaussianNoise` restricted to a continuous class attribute.
#[derive(Debug)]
pub struct AddGaussianClassNoise {
    deviation: f64,
    rng: RandomGenerator,
}

impl AddGaussianClassNoise {
    pub fn new(deviation: f64, rng: RandomGenerator) -> PrepResult<Self> {
        if deviation < 0.0 {
            return Err(PrepError::InvalidParameter {
                name: "deviation",
                reason: format!("negative class deviation {}", deviation),
            });
        }
        Ok(AddGaussianClassNoise { deviation, rng })
    }
}

impl Preprocessor for AddGaussianClassNoise {
    fn apply(
        &mut self,
        table: &ExampleTable,
        weight: WeightId,
    ) -> PrepResult<(ExampleTable, WeightId)> {
        let domain = table.domain();
        let class = domain.class_attr();
        if !class.is_continuous() {
            return Err(PrepError::SchemaError {
                attribute: class.name.clone(),
                expected: "continuous class attribute",
            });
        }
        let position = domain.class_position();

        let mut out = ExampleTable::new(Arc::clone(domain));
        for row in table.rows() {
            let mut row = row.clone();
            if self.deviation > 0.0 {
                if let Value::Continuous(v) = row.get(position) {
                    row.set(
                        position,
                        Value::Continuous(v + self.rng.gaussian(0.0, self.deviation)),
                    );
                }
            }
            out.push(row);
        }
        out.copy_weight_columns(table);
        Ok((out, weight))
    }
}
