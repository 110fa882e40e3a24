pub mod attribute;
pub mod domain;
pub mod error;
pub mod example;
pub mod random;
pub mod value;

pub use attribute::{Attribute, AttributeKind};
pub use domain::Domain;
pub use error::{PrepError, PrepResult};
pub use example::{Example, ExampleTable, WeightId};
pub use random::RandomGenerator;
pub use value::{MissingKind, Value};
