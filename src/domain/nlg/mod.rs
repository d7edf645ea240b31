//! Response generation from the template catalog.
//!
//! Two entry points are provided:
//! - [`NaturalLanguageGenerator::generate`] renders every variant of a
//!   language-keyed response, requiring a `language` override
//! - [`TemplatedGenerator::resolve_by_slots`] renders one randomly chosen
//!   variant of a channel-keyed response, honouring channel precedence

mod chooser;
mod generator;
mod variables;

pub use chooser::{FixedChooser, RandomChooser, SeededChooser, VariantChooser};
pub use generator::{GeneratorError, GeneratorResult, NaturalLanguageGenerator, TemplatedGenerator};
pub use variables::{merge_variables, requested_language, TrackerState, VariableSource, LANGUAGE_KEY};
