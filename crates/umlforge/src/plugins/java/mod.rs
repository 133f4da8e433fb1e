//! Java class source plugin
//!
//! Emits one `.java` compilation unit per class of the model.

mod constructor;
mod fields;
mod synthesizer;

pub use constructor::{ConstructorParameter, ConstructorPlan};
pub use fields::{association_fields, AssociationField};
pub use synthesizer::{ClassSource, JavaSynthesizer, METHOD_BODY};
