pub mod censor;
pub mod class_weight;
pub mod filter;
pub mod missing;
pub mod noise;
pub mod pipeline;
pub mod preprocessor;

pub use censor::{AddCensorWeight, CensorMethod};
pub use class_weight::AddClassWeight;
pub use filter::{AllOf, AnyOf, Filter, ValueFilter};
pub use missing::{AddMissing, AddMissingClasses};
pub use noise::{AddClassNoise, AddGaussianClassNoise, AddGaussianNoise, AddNoise};
pub use pipeline::Pipeline;
pub use preprocessor::{
    DropMissing, DropMissingClasses, DropRows, IgnoreAttributes, Preprocessor, RemoveDuplicates,
    SelectAttributes, TakeMissing, TakeMissingClasses, TakeRows,
};
