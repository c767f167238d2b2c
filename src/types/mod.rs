//! Request and response types

mod generation;
mod request;

pub use generation::{AnalysisResult, Content, GenerateContentRequest, GenerationConfig, Part};
pub use request::RequestSpec;
