use std::path::Path;

use crate::error::Result;
use crate::store::TaskStore;

/// Replaces `dir`'s order with `names` as given. Unknown or missing names are
/// not checked here; the next load reconciles them.
pub fn run(store: &TaskStore, dir: &Path, names: &[String]) -> Result<()> {
    store.update_order(dir, |record| {
        record.order = names.to_vec();
        true
    })?;
    tracing::info!("reordered {} ({} entries)", dir.display(), names.len());
    Ok(())
}
