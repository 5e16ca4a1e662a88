// Re-export main components
pub mod document;
pub mod engine;
pub mod error;
pub mod index;
pub mod query;
pub mod source;
pub mod tokenizer;

// Re-export commonly used types
pub use document::Document;
pub use engine::RetrievalEngine;
pub use error::EngineError;
pub use index::{IndexSnapshot, WeightMatrix};
pub use query::BooleanOp;
pub use source::SourceRecord;
pub use tokenizer::{LexicalFilter, Stem};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_workflow() -> Result<(), EngineError> {
        let mut engine = RetrievalEngine::new(LexicalFilter::passthrough());

        engine.add_document("doc1", "sol lua sol")?;
        engine.add_document("doc2", "lua estrela")?;

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.vocabulary, vec!["estrela", "lua", "sol"]);

        let result = engine.boolean_query("sol OR estrela")?;
        assert_eq!(result.len(), 2);

        Ok(())
    }
}
