use serde::{Deserialize, Serialize};
use tabprep_core::{ExampleTable, PrepError, PrepResult, Value, WeightId};

use crate::preprocessor::Preprocessor;

/// How censored mass is redistributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CensorMethod {
    /// Fraction of the horizon survived counts toward "no event".
    Linear,
    /// Product-limit (Kaplan–Meier) conditional survival to the cap.
    KaplanMeier,
    /// Laplace-smoothed empirical survival ratio.
    Bayes,
}

/// Kaplan–Meier product-limit step function built from (time, is_event)
/// pairs. `S(t)` multiplies `1 - d_i/n_i` over event times `t_i <= t`,
/// with `d_i` events and `n_i` rows still at risk at `t_i`.
struct KaplanMeier {
    steps: Vec<(f64, f64)>,
}

impl KaplanMeier {
    fn fit(pairs: &[(f64, bool)]) -> Self {
        let mut sorted = pairs.to_vec();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let n = sorted.len();
        let mut steps = Vec::new();
        let mut survival = 1.0;
        let mut i = 0;
        while i < n {
            let t = sorted[i].0;
            let at_risk = n - i;
            let mut events = 0;
            while i < n && sorted[i].0 == t {
                if sorted[i].1 {
                    events += 1;
                }
                i += 1;
            }
            if events > 0 {
                survival *= 1.0 - events as f64 / at_risk as f64;
                steps.push((t, survival));
            }
        }
        KaplanMeier { steps }
    }

    fn survival(&self, t: f64) -> f64 {
        let mut survival = 1.0;
        for &(time, s) in &self.steps {
            if time <= t {
                survival = s;
            } else {
                break;
            }
        }
        survival
    }
}

/// Laplace-smoothed empirical survival: `(#{t_i > t} + 1) / (n + 2)`.
struct SmoothedSurvival {
    times: Vec<f64>,
}

impl SmoothedSurvival {
    fn fit(pairs: &[(f64, bool)]) -> Self {
        let mut times: Vec<f64> = pairs.iter().map(|p| p.0).collect();
        times.sort_by(f64::total_cmp);
        SmoothedSurvival { times }
    }

    fn survival(&self, t: f64) -> f64 {
        let beyond = self.times.len() - self.times.partition_point(|&ti| ti <= t);
        (beyond as f64 + 1.0) / (self.times.len() as f64 + 2.0)
    }
}

/// Convert right-censored (outcome, time) survival rows into weights for
/// ordinary learners.
///
/// Event rows keep factor 1 under every method. A row censored at
/// `t >= cap` counts fully as "no event". A row censored earlier gets the
/// chosen estimator's probability of reaching the cap event-free; with
/// `add_complementary` it also emits an event-marked duplicate carrying
/// the complementary factor, so the pair's mass still sums to the row's
/// input weight. Factors multiply the input weight and land in one newly
/// allocated weight column.
///
/// The Kaplan–Meier and Bayes estimators are two-pass: the first pass
/// collects every (time, outcome) pair, the second assigns weights, so a
/// row's weight depends on the whole dataset.
#[derive(Debug)]
pub struct AddCensorWeight {
    outcome: String,
    time: String,
    event_value: usize,
    method: CensorMethod,
    max_time: f64,
    add_complementary: bool,
}

impl AddCensorWeight {
    /// `max_time` of 0 means "cap at the largest observed time".
    pub fn new(
        outcome: impl Into<String>,
        time: impl Into<String>,
        event_value: usize,
        method: CensorMethod,
        max_time: f64,
    ) -> PrepResult<Self> {
        if max_time < 0.0 {
            return Err(PrepError::InvalidParameter {
                name: "max_time",
                reason: format!("negative time cap {}", max_time),
            });
        }
        Ok(AddCensorWeight {
            outcome: outcome.into(),
            time: time.into(),
            event_value,
            method,
            max_time,
            add_complementary: false,
        })
    }

    /// Also emit event-marked duplicates for censored rows.
    pub fn add_complementary(mut self, add: bool) -> Self {
        self.add_complementary = add;
        self
    }
}

/// Estimator state built from the first pass, queried per censored row.
enum FittedEstimator {
    Linear,
    KaplanMeier(KaplanMeier),
    Bayes(SmoothedSurvival),
}

impl FittedEstimator {
    fn fit(method: CensorMethod, pairs: &[(f64, bool)]) -> Self {
        match method {
            CensorMethod::Linear => FittedEstimator::Linear,
            CensorMethod::KaplanMeier => FittedEstimator::KaplanMeier(KaplanMeier::fit(pairs)),
            CensorMethod::Bayes => FittedEstimator::Bayes(SmoothedSurvival::fit(pairs)),
        }
    }

    fn censored_factor(&self, t: f64, cap: f64) -> f64 {
        match self {
            FittedEstimator::Linear => 1.0 - t / cap,
            FittedEstimator::KaplanMeier(km) => {
                let at_t = km.survival(t);
                if at_t > 0.0 {
                    (km.survival(cap) / at_t).clamp(0.0, 1.0)
                } else {
                    1.0
                }
            }
            FittedEstimator::Bayes(smoothed) => {
                (smoothed.survival(cap) / smoothed.survival(t)).min(1.0)
            }
        }
    }
}

impl Preprocessor for AddCensorWeight {
    fn apply(
        &mut self,
        table: &ExampleTable,
        weight: WeightId,
    ) -> PrepResult<(ExampleTable, WeightId)> {
        let domain = table.domain();

        let outcome_pos = domain.position(&self.outcome)?;
        let outcome_attr = domain.attribute(outcome_pos)?;
        if !outcome_attr.is_discrete() {
            return Err(PrepError::SchemaError {
                attribute: outcome_attr.name.clone(),
                expected: "discrete outcome attribute",
            });
        }
        if self.event_value >= outcome_attr.n_values() {
            return Err(PrepError::InvalidParameter {
                name: "event_value",
                reason: format!(
                    "event value {} out of range for attribute '{}' with {} values",
                    self.event_value,
                    outcome_attr.name,
                    outcome_attr.n_values()
                ),
            });
        }
        let time_pos = domain.position(&self.time)?;
        if !domain.attribute(time_pos)?.is_continuous() {
            return Err(PrepError::SchemaError {
                attribute: self.time.clone(),
                expected: "continuous time attribute",
            });
        }

        // First pass: every (time, is_event) pair with both values present.
        let mut pairs = Vec::with_capacity(table.len());
        for row in table.rows() {
            if let (Value::Discrete(o), Value::Continuous(t)) =
                (row.get(outcome_pos), row.get(time_pos))
            {
                pairs.push((t, o == self.event_value));
            }
        }

        let cap = if self.max_time > 0.0 {
            self.max_time
        } else {
            pairs.iter().map(|p| p.0).fold(0.0, f64::max)
        };

        let estimator = FittedEstimator::fit(self.method, &pairs);

        // Second pass: assign factors, collect complementary duplicates.
        let new_id = table.alloc_weight_id();
        let mut out = table.clone();
        out.add_weight_column(new_id);

        let mut complementary = Vec::new();
        for i in 0..table.len() {
            let row = table.row(i);
            let input_weight = table.weight(i, weight);
            let factor = match (row.get(outcome_pos), row.get(time_pos)) {
                (Value::Discrete(o), Value::Continuous(t))
                    if o != self.event_value && cap > 0.0 && t < cap =>
                {
                    let factor = estimator.censored_factor(t, cap);
                    if self.add_complementary {
                        let mut duplicate = row.clone();
                        duplicate.set(outcome_pos, Value::Discrete(self.event_value));
                        complementary.push((duplicate, input_weight * (1.0 - factor)));
                    }
                    factor
                }
                // Events, censoring at or past the cap, missing values.
                _ => 1.0,
            };
            out.set_weight(i, new_id, input_weight * factor);
        }

        for (duplicate, w) in complementary {
            out.push(duplicate);
            out.set_weight(out.len() - 1, new_id, w);
        }
        Ok((out, new_id))
    }
}
