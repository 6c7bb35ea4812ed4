// Renderer trait: the seam between the word counter and the image backend.

use std::path::Path;

use super::spec::WordCloudSpec;
use crate::error::Result;
use crate::text::{normalize, score, select_top, FrequencyTable, SelectionOrder, StopwordSet};

pub trait Renderer {
    /// Draw `table` per `spec` and write the image to `path`.
    ///
    /// Every word in `table` is drawn; `spec.max_words` is left to the caller.
    ///
    /// Implementations fail with `Render` when there is nothing to draw or
    /// the file can't be written, and with `Configuration` when the font is
    /// missing.
    fn render_frequencies(
        &self,
        table: &FrequencyTable,
        spec: &WordCloudSpec,
        path: &Path,
    ) -> Result<()>;

    /// Score cleaned text, keep the `spec.max_words` most prominent words and
    /// render them.
    ///
    /// This is the one place the `max_words` truncation happens.
    ///
    /// A cloud always wants its biggest words, so this selects
    /// `HighestFirst` regardless of the word counter's default order.
    fn render_text(
        &self,
        text: &str,
        stopwords: &StopwordSet,
        spec: &WordCloudSpec,
        path: &Path,
    ) -> Result<()> {
        let table = score(&normalize(text), stopwords);
        let top = select_top(&table, spec.max_words, SelectionOrder::HighestFirst);
        self.render_frequencies(&top, spec, path)
    }
}
