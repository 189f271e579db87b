use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The source is not syntactically valid Python. Fatal to the whole
    /// extraction call; no records are produced.
    #[error("invalid python source near line {line}")]
    Parse { line: usize },

    #[error("failed to load the python grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
}
