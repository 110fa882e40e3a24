use std::sync::Arc;

use tabprep_core::{Attribute, Domain, Example, PrepError, PrepResult, Value};

use crate::classifier::Classifier;

/// Builds one synthetic discrete attribute enumerating the Cartesian
/// product of a domain's input attributes.
///
/// Mixed-radix encoding: the last attribute has multiplier 1 and every
/// earlier one the product of the sizes after it, so the dot product of a
/// row's value indices with the multipliers is a unique index in
/// `[0, Π sizes)`. The synthetic attribute's i-th value is the `_`-joined
/// label of the i-th digit combination in odometer order (first attribute
/// slowest, last fastest), which makes label index and linear index agree.
#[derive(Debug)]
pub struct CartesianCombiner {
    domain: Arc<Domain>,
    mults: Vec<usize>,
    class_attr: Attribute,
}

impl CartesianCombiner {
    /// Build the encoding table for `domain`. Fails if any input attribute
    /// is continuous or has no values, naming the offending attribute.
    pub fn new(domain: Arc<Domain>) -> PrepResult<Self> {
        let (mults, class_attr) = build_encoding(&domain)?;
        Ok(CartesianCombiner {
            domain,
            mults,
            class_attr,
        })
    }

    /// Recompute multipliers and labels for a replacement domain.
    ///
    /// The owner must call this whenever it swaps the referenced domain;
    /// nothing is rebuilt per row. On error the combiner is unchanged.
    pub fn rebuild(&mut self, domain: Arc<Domain>) -> PrepResult<()> {
        let (mults, class_attr) = build_encoding(&domain)?;
        self.domain = domain;
        self.mults = mults;
        self.class_attr = class_attr;
        Ok(())
    }

    pub fn domain(&self) -> &Arc<Domain> {
        &self.domain
    }

    /// Mixed-radix digit weights, one per combined attribute.
    pub fn multipliers(&self) -> &[usize] {
        &self.mults
    }

    /// The synthetic discrete attribute, one value per combination.
    pub fn class_attr(&self) -> &Attribute {
        &self.class_attr
    }

    /// An immutable classifier decoding rows into combined indices.
    pub fn classifier(&self) -> CartesianClassifier {
        CartesianClassifier {
            mults: self.mults.clone(),
            class_attr: self.class_attr.clone(),
        }
    }
}

fn build_encoding(domain: &Domain) -> PrepResult<(Vec<usize>, Attribute)> {
    let attrs = domain.attributes();

    let mut sizes = Vec::with_capacity(attrs.len());
    for attr in attrs {
        if !attr.is_discrete() {
            return Err(PrepError::SchemaError {
                attribute: attr.name.clone(),
                expected: "discrete attribute",
            });
        }
        if attr.n_values() == 0 {
            return Err(PrepError::EmptyDomain(attr.name.clone()));
        }
        sizes.push(attr.n_values());
    }

    // multiplier[last] = 1, multiplier[i] = multiplier[i+1] * sizes[i+1]
    let mut mults = vec![1usize; attrs.len()];
    for i in (0..attrs.len().saturating_sub(1)).rev() {
        mults[i] = mults[i + 1] * sizes[i + 1];
    }

    let total: usize = sizes.iter().product();
    let name = attrs
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join("_");
    let mut class_attr = Attribute::discrete(name, &[]);

    // Odometer over the digit vector, last digit fastest.
    let mut digits = vec![0usize; attrs.len()];
    for _ in 0..total {
        let mut label = String::new();
        for (attr, &digit) in attrs.iter().zip(&digits) {
            if !label.is_empty() {
                label.push('_');
            }
            label.push_str(attr.value_name(digit)?);
        }
        class_attr.add_value(label)?;

        for k in (0..digits.len()).rev() {
            digits[k] += 1;
            if digits[k] < sizes[k] {
                break;
            }
            digits[k] = 0;
        }
    }

    Ok((mults, class_attr))
}

/// Decodes a row back into its Cartesian index.
pub struct CartesianClassifier {
    mults: Vec<usize>,
    class_attr: Attribute,
}

impl CartesianClassifier {
    pub fn class_attr(&self) -> &Attribute {
        &self.class_attr
    }
}

impl Classifier for CartesianClassifier {
    /// `DontKnow` if any combined attribute is missing on the row,
    /// otherwise the combined index. No allocation.
    fn classify(&self, example: &Example) -> Value {
        let mut index = 0;
        for (position, mult) in self.mults.iter().enumerate() {
            match example.get(position) {
                Value::Discrete(v) => index += mult * v,
                _ => return Value::DontKnow,
            }
        }
        Value::Discrete(index)
    }
}
