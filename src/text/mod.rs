// Text pipeline: normalize -> score -> select.

pub mod frequency;
pub mod normalize;
pub mod select;
pub mod stopwords;

pub use frequency::{score, score_texts, FrequencyTable, ScoredWord};
pub use normalize::{join_texts, normalize};
pub use select::{select_top, SelectionOrder};
pub use stopwords::{StopwordLanguage, StopwordSet};
