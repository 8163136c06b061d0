pub mod document;
pub mod generation;
pub mod template;
pub mod topic;

pub use document::Document;
pub use generation::{label_block, GenerationRequest, GenerationResult};
pub use template::{AnswerKey, Template};
pub use topic::Topic;
