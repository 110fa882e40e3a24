use tabprep_core::{Example, Value};

/// Maps a row to a predicted value.
pub trait Classifier {
    fn classify(&self, example: &Example) -> Value;
}

/// Returns the row's own value at a fixed position.
pub struct ClassifierFromAttribute {
    position: usize,
}

impl ClassifierFromAttribute {
    pub fn new(position: usize) -> Self {
        ClassifierFromAttribute { position }
    }
}

impl Classifier for ClassifierFromAttribute {
    fn classify(&self, example: &Example) -> Value {
        example.get(self.position)
    }
}

/// Substitutes a learned prediction for a missing value.
///
/// Returns the attribute's own value when present; only when that value is
/// missing does the fallback model get asked. Holds the two collaborators
/// and nothing else — no retraining happens here.
pub struct ImputeClassifier {
    from_attribute: ClassifierFromAttribute,
    imputer: Box<dyn Classifier>,
}

impl ImputeClassifier {
    pub fn new(position: usize, imputer: Box<dyn Classifier>) -> Self {
        ImputeClassifier {
            from_attribute: ClassifierFromAttribute::new(position),
            imputer,
        }
    }
}

impl Classifier for ImputeClassifier {
    fn classify(&self, example: &Example) -> Value {
        let value = self.from_attribute.classify(example);
        if value.is_missing() {
            self.imputer.classify(example)
        } else {
            value
        }
    }
}
