//! # tabprep
//!
//! Preprocessing pipelines for weighted, attribute-based tabular data.
//!
//! ## Modules
//!
//! - **core** — Data model: values with two missing flavors, discrete and
//!   continuous attributes, immutable domains, example tables with
//!   out-of-band weight columns, a seeded random generator
//! - **classify** — Row classifiers: Cartesian combination of discrete
//!   attributes (mixed-radix encode/decode), classifier-from-attribute,
//!   missing-value imputation wrapper
//! - **preprocess** — The preprocessor family: attribute projection, row
//!   filters, value/Gaussian/class noise, missing-value injection, class
//!   weighting, censor weighting (linear, Kaplan–Meier, Bayes), and the
//!   `Pipeline` that chains them

/// Data model: attributes, domains, examples, weights.
pub use tabprep_core as core;

/// Row classifiers: Cartesian combination, imputation.
pub use tabprep_classify as classify;

/// Preprocessors and pipelines.
pub use tabprep_preprocess as preprocess;
