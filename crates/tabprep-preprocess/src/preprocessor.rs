use std::sync::Arc;

use tabprep_core::{Domain, Example, ExampleTable, PrepError, PrepResult, WeightId};

use crate::filter::Filter;

/// The transformation contract: a stream of weighted rows in, a stream of
/// weighted rows out.
///
/// Implementations never mutate the input table; a schema-changing step
/// builds a new `Domain` and new rows. Given the same input, weight id and
/// generator seed, the output is identical. Output rows keep the input's
/// relative order.
pub trait Preprocessor {
    fn apply(
        &mut self,
        table: &ExampleTable,
        weight: WeightId,
    ) -> PrepResult<(ExampleTable, WeightId)>;
}

fn input_position(domain: &Domain, name: &str) -> PrepResult<usize> {
    let position = domain.position(name)?;
    if position == domain.class_position() {
        return Err(PrepError::SchemaError {
            attribute: name.to_string(),
            expected: "input attribute",
        });
    }
    Ok(position)
}

fn project(table: &ExampleTable, keep: &[usize]) -> ExampleTable {
    let domain = table.domain();
    let attributes = keep
        .iter()
        .map(|&i| domain.attributes()[i].clone())
        .collect();
    let new_domain = Arc::new(Domain::new(attributes, domain.class_attr().clone()));

    let mut out = ExampleTable::new(new_domain);
    let class_position = domain.class_position();
    for row in table.rows() {
        let mut values: Vec<_> = keep.iter().map(|&i| row.get(i)).collect();
        values.push(row.get(class_position));
        out.push(Example::new(values));
    }
    out.copy_weight_columns(table);
    out
}

/// Keep only the named input attributes (class always kept).
pub struct SelectAttributes {
    names: Vec<String>,
}

impl SelectAttributes {
    pub fn new(names: Vec<String>) -> Self {
        SelectAttributes { names }
    }
}

impl Preprocessor for SelectAttributes {
    fn apply(
        &mut self,
        table: &ExampleTable,
        weight: WeightId,
    ) -> PrepResult<(ExampleTable, WeightId)> {
        let mut keep = Vec::with_capacity(self.names.len());
        for name in &self.names {
            keep.push(input_position(table.domain(), name)?);
        }
        Ok((project(table, &keep), weight))
    }
}

/// Drop the named input attributes, keep the rest.
pub struct IgnoreAttributes {
    names: Vec<String>,
}

impl IgnoreAttributes {
    pub fn new(names: Vec<String>) -> Self {
        IgnoreAttributes { names }
    }
}

impl Preprocessor for IgnoreAttributes {
    fn apply(
        &mut self,
        table: &ExampleTable,
        weight: WeightId,
    ) -> PrepResult<(ExampleTable, WeightId)> {
        let domain = table.domain();
        let mut dropped = vec![false; domain.n_attributes()];
        for name in &self.names {
            dropped[input_position(domain, name)?] = true;
        }
        let keep: Vec<usize> = (0..domain.n_attributes()).filter(|&i| !dropped[i]).collect();
        Ok((project(table, &keep), weight))
    }
}

fn filter_rows<F>(table: &ExampleTable, keep_if: F) -> ExampleTable
where
    F: Fn(&Example) -> bool,
{
    let keep: Vec<usize> = (0..table.len())
        .filter(|&i| keep_if(table.row(i)))
        .collect();
    table.select(&keep)
}

/// Keep rows the filter accepts.
pub struct TakeRows {
    filter: Box<dyn Filter>,
}

impl TakeRows {
    pub fn new(filter: Box<dyn Filter>) -> Self {
        TakeRows { filter }
    }
}

impl Preprocessor for TakeRows {
    fn apply(
        &mut self,
        table: &ExampleTable,
        weight: WeightId,
    ) -> PrepResult<(ExampleTable, WeightId)> {
        Ok((filter_rows(table, |row| self.filter.accepts(row)), weight))
    }
}

/// Drop rows the filter accepts.
pub struct DropRows {
    filter: Box<dyn Filter>,
}

impl DropRows {
    pub fn new(filter: Box<dyn Filter>) -> Self {
        DropRows { filter }
    }
}

impl Preprocessor for DropRows {
    fn apply(
        &mut self,
        table: &ExampleTable,
        weight: WeightId,
    ) -> PrepResult<(ExampleTable, WeightId)> {
        Ok((filter_rows(table, |row| !self.filter.accepts(row)), weight))
    }
}

/// Merge duplicate rows, keeping the first occurrence.
///
/// The duplicates' weight accumulates into the kept row, in one newly
/// allocated weight column; the input column survives for the caller to
/// discard.
pub struct RemoveDuplicates;

impl Preprocessor for RemoveDuplicates {
    fn apply(
        &mut self,
        table: &ExampleTable,
        weight: WeightId,
    ) -> PrepResult<(ExampleTable, WeightId)> {
        let mut keep: Vec<usize> = Vec::new();
        let mut sums: Vec<f64> = Vec::new();
        for i in 0..table.len() {
            let row = table.row(i);
            match keep.iter().position(|&k| table.row(k) == row) {
                Some(j) => sums[j] += table.weight(i, weight),
                None => {
                    keep.push(i);
                    sums.push(table.weight(i, weight));
                }
            }
        }

        let new_id = table.alloc_weight_id();
        let mut out = table.select(&keep);
        out.add_weight_column(new_id);
        for (j, &sum) in sums.iter().enumerate() {
            out.set_weight(j, new_id, sum);
        }
        Ok((out, new_id))
    }
}

/// Drop rows with any missing value (class included).
pub struct DropMissing;

impl Preprocessor for DropMissing {
    fn apply(
        &mut self,
        table: &ExampleTable,
        weight: WeightId,
    ) -> PrepResult<(ExampleTable, WeightId)> {
        Ok((filter_rows(table, |row| !row.has_missing()), weight))
    }
}

/// Keep only rows with at least one missing value.
pub struct TakeMissing;

impl Preprocessor for TakeMissing {
    fn apply(
        &mut self,
        table: &ExampleTable,
        weight: WeightId,
    ) -> PrepResult<(ExampleTable, WeightId)> {
        Ok((filter_rows(table, Example::has_missing), weight))
    }
}

/// Drop rows whose class value is missing.
pub struct DropMissingClasses;

impl Preprocessor for DropMissingClasses {
    fn apply(
        &mut self,
        table: &ExampleTable,
        weight: WeightId,
    ) -> PrepResult<(ExampleTable, WeightId)> {
        let class_position = table.domain().class_position();
        Ok((
            filter_rows(table, |row| !row.get(class_position).is_missing()),
            weight,
        ))
    }
}

/// Keep only rows whose class value is missing.
pub struct TakeMissingClasses;

impl Preprocessor for TakeMissingClasses {
    fn apply(
        &mut self,
        table: &ExampleTable,
        weight: WeightId,
    ) -> PrepResult<(ExampleTable, WeightId)> {
        let class_position = table.domain().class_position();
        Ok((
            filter_rows(table, |row| row.get(class_position).is_missing()),
            weight,
        ))
    }
}
