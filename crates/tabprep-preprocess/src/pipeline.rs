use tabprep_core::{ExampleTable, PrepResult, WeightId};

use crate::preprocessor::Preprocessor;

/// An ordered chain of preprocessors.
///
/// Each step consumes the previous step's table and weight id. The first
/// error aborts the run; no partial table escapes.
pub struct Pipeline {
    steps: Vec<Box<dyn Preprocessor>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Pipeline { steps: Vec::new() }
    }

    /// Append a step.
    pub fn add_step(mut self, step: Box<dyn Preprocessor>) -> Self {
        self.steps.push(step);
        self
    }

    /// Apply every step in order.
    pub fn run(
        &mut self,
        table: &ExampleTable,
        weight: WeightId,
    ) -> PrepResult<(ExampleTable, WeightId)> {
        let mut current = table.clone();
        let mut weight = weight;
        for step in &mut self.steps {
            let (next, next_weight) = step.apply(&current, weight)?;
            current = next;
            weight = next_weight;
        }
        Ok((current, weight))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::censor::{AddCensorWeight, CensorMethod};
    use crate::noise::AddClassNoise;
    use crate::preprocessor::DropMissing;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tabprep_core::{Attribute, Domain, Example, RandomGenerator, Value};

    fn survival_table() -> ExampleTable {
        let domain = Arc::new(Domain::new(
            vec![
                Attribute::discrete("a", &["a0", "a1"]),
                Attribute::continuous("time"),
            ],
            Attribute::discrete("outcome", &["event", "censored"]),
        ));
        let mut table = ExampleTable::new(domain);
        table.push(Example::new(vec![
            Value::Discrete(0),
            Value::Continuous(2.0),
            Value::Discrete(1),
        ]));
        table.push(Example::new(vec![
            Value::DontKnow,
            Value::Continuous(1.0),
            Value::Discrete(0),
        ]));
        table.push(Example::new(vec![
            Value::Discrete(1),
            Value::Continuous(3.0),
            Value::Discrete(0),
        ]));
        table
    }

    #[test]
    fn test_steps_chain_table_and_weight() {
        let table = survival_table();
        let mut pipeline = Pipeline::new()
            .add_step(Box::new(DropMissing))
            .add_step(Box::new(
                AddCensorWeight::new("outcome", "time", 0, CensorMethod::Linear, 4.0)
                    .unwrap()
                    .add_complementary(true),
            ));

        let (out, id) = pipeline.run(&table, WeightId::UNIFORM).unwrap();
        // The missing row is gone before weighting; the censored row
        // splits into its pair.
        assert_eq!(out.len(), 3);
        assert_ne!(id, WeightId::UNIFORM);
        assert_eq!(out.weight(0, id), 0.5);
        assert_eq!(out.weight(1, id), 1.0);
        assert_eq!(out.weight(2, id), 0.5);
    }

    #[test]
    fn test_first_error_aborts() {
        let table = survival_table();
        let mut pipeline = Pipeline::new()
            .add_step(Box::new(crate::noise::AddNoise::new(
                HashMap::from([("missing_attr".to_string(), 0.5)]),
                0.0,
                RandomGenerator::new(1),
            )))
            .add_step(Box::new(AddClassNoise::new(
                0.5,
                RandomGenerator::new(2),
            )));

        assert!(pipeline.run(&table, WeightId::UNIFORM).is_err());
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let table = survival_table();
        let (out, id) = Pipeline::new().run(&table, WeightId::UNIFORM).unwrap();
        assert_eq!(out.rows(), table.rows());
        assert_eq!(id, WeightId::UNIFORM);
    }
}
