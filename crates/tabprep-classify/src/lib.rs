pub mod cartesian;
pub mod classifier;

pub use cartesian::{CartesianClassifier, CartesianCombiner};
pub use classifier::{Classifier, ClassifierFromAttribute, ImputeClassifier};
