//! oncorec-corpus — Loading and validation of the static treatment corpus
//! plus the vocabulary term lists used for input assistance.

pub mod loader;
pub mod vocabulary;

pub use loader::Corpus;
pub use vocabulary::TermList;
