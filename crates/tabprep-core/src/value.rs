use serde::{Deserialize, Serialize};

/// A single cell of an example, aligned to one attribute of a domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Index into a discrete attribute's value list.
    Discrete(usize),
    /// A continuous measurement.
    Continuous(f64),
    /// Missing: the value is irrelevant ("don't care").
    DontCare,
    /// Missing: the value is unknown ("don't know").
    DontKnow,
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::DontCare | Value::DontKnow)
    }

    /// The discrete index, if this is a discrete value.
    pub fn as_discrete(&self) -> Option<usize> {
        match self {
            Value::Discrete(i) => Some(*i),
            _ => None,
        }
    }

    /// The continuous number, if this is a continuous value.
    pub fn as_continuous(&self) -> Option<f64> {
        match self {
            Value::Continuous(v) => Some(*v),
            _ => None,
        }
    }
}

/// Which missing flavor an injector writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingKind {
    DontCare,
    DontKnow,
}

impl From<MissingKind> for Value {
    fn from(kind: MissingKind) -> Self {
        match kind {
            MissingKind::DontCare => Value::DontCare,
            MissingKind::DontKnow => Value::DontKnow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing() {
        assert!(Value::DontCare.is_missing());
        assert!(Value::DontKnow.is_missing());
        assert!(!Value::Discrete(0).is_missing());
        assert!(!Value::Continuous(0.0).is_missing());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Discrete(3).as_discrete(), Some(3));
        assert_eq!(Value::Continuous(1.5).as_continuous(), Some(1.5));
        assert_eq!(Value::DontKnow.as_discrete(), None);
        assert_eq!(Value::Discrete(3).as_continuous(), None);
    }
}
