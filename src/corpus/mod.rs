pub mod parser;

pub use parser::{load_corpus, one_hot, parse_corpus, CorpusError, Sample};
