//! Back-translation leveler
//!
//! Shows how a reference English sentence degrades when it is pushed through
//! repeated machine-translation round trips. The language chain for a run is
//! derived from a seed and an example id, so identical parameters always take
//! the same route, and every translation, round trip and full run is memoized.
//!
//! ```ignore
//! use std::sync::Arc;
//! use leveler::{Leveler, mt::{MockMode, MockTranslator}};
//!
//! #[tokio::main]
//! async fn main() {
//!     let leveler = Leveler::new(Arc::new(MockTranslator::new(MockMode::Tag)));
//!     leveler.add_example("The cat sat on the mat.");
//!     let report = leveler.degrade_all(3, "poc-seed").await;
//!     println!("{}", serde_json::to_string_pretty(&report).unwrap());
//! }
//! ```

pub mod config;
pub mod examples;
pub mod leveler;
pub mod mt;

pub use config::Settings;
pub use examples::{Example, ExampleStore, builtin_examples};
pub use leveler::{
    AddExampleResponse, DegradeReport, DegradedExample, Leveler, normalize_hops,
};
pub use mt::{Degradation, DegradationEngine, MtError, MtResult, select_chain};
