pub mod generator;
pub mod models;

pub use generator::TextGenerator;
pub use models::{
    Generation, GenerationPlan, Mode, QueryRecord, QueryType, RecordIssue, QUERY_TYPES,
};
