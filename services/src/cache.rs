use std::sync::Arc;

use tracing::debug;

use crate::{
    load,
    Dataset,
    LoadError,
    Source,
    SourceKey,
};

/// Remembers the most recently loaded dataset.
///
/// Holds a single entry: asking for a source with a different [`SourceKey`]
/// drops the previous dataset and loads the new one.
#[derive(Debug, Default)]
pub struct DatasetCache {
    slot: Option<(SourceKey, Arc<Dataset>)>,
}

impl DatasetCache {
    pub fn new() -> Self { Self::default() }

    /// Returns the dataset for `source`, loading it only when the key changed.
    ///
    /// # Errors
    ///
    /// Propagates any [`LoadError`]. A failed load leaves the cached entry as it was.
    pub fn get_or_load(&mut self, source: &Source) -> Result<Arc<Dataset>, LoadError> {
        self.get_or_load_with(source, load)
    }

    fn get_or_load_with<F>(&mut self, source: &Source, loader: F) -> Result<Arc<Dataset>, LoadError>
    where
        F: FnOnce(&Source) -> Result<Dataset, LoadError>,
    {
        let key = source.key()?;
        if let Some((cached, data)) = &self.slot {
            if *cached == key {
                debug!(%source, "Reusing cached dataset");
                return Ok(Arc::clone(data));
            }
        }

        let data = Arc::new(loader(source)?);
        self.slot = Some((key, Arc::clone(&data)));
        Ok(data)
    }

    pub fn current(&self) -> Option<&SourceKey> { self.slot.as_ref().map(|(key, _)| key) }

    pub fn clear(&mut self) { self.slot = None; }
}
