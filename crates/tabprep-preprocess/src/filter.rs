use tabprep_core::{Domain, Example, PrepError, PrepResult, Value};

/// Predicate over a row, composable by conjunction or disjunction.
pub trait Filter {
    fn accepts(&self, example: &Example) -> bool;
}

/// Matches a discrete cell against a set of accepted value indices.
///
/// Missing values never match.
#[derive(Debug)]
pub struct ValueFilter {
    position: usize,
    accepted: Vec<usize>,
}

impl ValueFilter {
    /// Positional constructor; the caller guarantees the position is in
    /// range for the rows this filter will see.
    pub fn new(position: usize, accepted: Vec<usize>) -> Self {
        ValueFilter { position, accepted }
    }

    /// Build against a domain by attribute name (class allowed), with the
    /// position and accepted indices validated up front.
    pub fn for_attribute(
        domain: &Domain,
        name: &str,
        accepted: Vec<usize>,
    ) -> PrepResult<Self> {
        let position = domain.position(name)?;
        let attr = domain.attribute(position)?;
        if !attr.is_discrete() {
            return Err(PrepError::SchemaError {
                attribute: attr.name.clone(),
                expected: "discrete attribute",
            });
        }
        if let Some(&bad) = accepted.iter().find(|&&v| v >= attr.n_values()) {
            return Err(PrepError::InvalidParameter {
                name: "accepted",
                reason: format!(
                    "value index {} out of range for attribute '{}' with {} values",
                    bad,
                    attr.name,
                    attr.n_values()
                ),
            });
        }
        Ok(ValueFilter { position, accepted })
    }
}

impl Filter for ValueFilter {
    fn accepts(&self, example: &Example) -> bool {
        match example.get(self.position) {
            Value::Discrete(v) => self.accepted.contains(&v),
            _ => false,
        }
    }
}

/// Conjunction: accepts a row every inner filter accepts.
pub struct AllOf(pub Vec<Box<dyn Filter>>);

impl Filter for AllOf {
    fn accepts(&self, example: &Example) -> bool {
        self.0.iter().all(|f| f.accepts(example))
    }
}

/// Disjunction: accepts a row any inner filter accepts.
pub struct AnyOf(pub Vec<Box<dyn Filter>>);

impl Filter for AnyOf {
    fn accepts(&self, example: &Example) -> bool {
        self.0.iter().any(|f| f.accepts(example))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(a: Value, b: Value) -> Example {
        Example::new(vec![a, b, Value::Discrete(0)])
    }

    #[test]
    fn test_value_filter() {
        let filter = ValueFilter::new(0, vec![1, 2]);
        assert!(filter.accepts(&row(Value::Discrete(1), Value::Discrete(0))));
        assert!(!filter.accepts(&row(Value::Discrete(0), Value::Discrete(0))));
        assert!(!filter.accepts(&row(Value::DontKnow, Value::Discrete(0))));
    }

    #[test]
    fn test_for_attribute_validates_against_domain() {
        use tabprep_core::Attribute;

        let domain = Domain::new(
            vec![
                Attribute::discrete("a", &["a0", "a1"]),
                Attribute::continuous("t"),
            ],
            Attribute::discrete("c", &["no", "yes"]),
        );

        let filter = ValueFilter::for_attribute(&domain, "a", vec![1]).unwrap();
        assert!(filter.accepts(&row(Value::Discrete(1), Value::Continuous(0.0))));

        assert_eq!(
            ValueFilter::for_attribute(&domain, "nope", vec![0]).unwrap_err(),
            PrepError::MissingAttribute("nope".into())
        );
        assert!(matches!(
            ValueFilter::for_attribute(&domain, "t", vec![0]).unwrap_err(),
            PrepError::SchemaError { .. }
        ));
        assert!(matches!(
            ValueFilter::for_attribute(&domain, "a", vec![9]).unwrap_err(),
            PrepError::InvalidParameter { .. }
        ));
    }

    #[test]
    fn test_conjunction_disjunction() {
        let both = AllOf(vec![
            Box::new(ValueFilter::new(0, vec![1])),
            Box::new(ValueFilter::new(1, vec![0])),
        ]);
        let either = AnyOf(vec![
            Box::new(ValueFilter::new(0, vec![1])),
            Box::new(ValueFilter::new(1, vec![0])),
        ]);

        let hit_one = row(Value::Discrete(1), Value::Discrete(1));
        assert!(!both.accepts(&hit_one));
        assert!(either.accepts(&hit_one));

        let hit_both = row(Value::Discrete(1), Value::Discrete(0));
        assert!(both.accepts(&hit_both));
        assert!(either.accepts(&hit_both));
    }
}
