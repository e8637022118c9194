use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{count} channel ids exceed the single-lookup limit of {max}")]
    TooManyChannels { count: usize, max: usize },

    #[error("translation returned {got} result(s) for {expected} input(s)")]
    TranslationCountMismatch { expected: usize, got: usize },

    #[error("translation for slot {index} came back empty (source {source_text:?})")]
    EmptyTranslation { index: usize, source_text: String },

    #[error("{count} video title(s) left untranslated")]
    Untranslated { count: usize },

    #[error("feed {feed} item belongs to {got}, expected {expected}")]
    FeedChannelMismatch { feed: String, expected: String, got: String },

    #[error("record handle {0} does not resolve against the record tree")]
    DanglingHandle(String),

    #[error("wave task failed: {0}")]
    TaskPanicked(String),
}
