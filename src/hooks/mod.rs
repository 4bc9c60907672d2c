//! Save-lifecycle hooks
//!
//! Two-phase callback contract around a cable write. `pre_write` assigns a
//! missing label in memory so it persists atomically with the rest of the
//! row; it only acts on updates, because on the first insert the identifier
//! the template may reference does not exist yet. `post_write` covers that
//! first-insert case: once the store has assigned an identifier, it renders
//! the label and writes it back through a narrow single-column update.
//!
//! A non-empty label is never overwritten, so re-saving a labeled cable is a
//! no-op for both hooks. Renderer failures propagate and abort the
//! triggering save; there is no retry.

use crate::error::{LabelError, Result};
use crate::model::{Cable, CableId};
use crate::render::LabelRenderer;

/// Narrow write-back used by the post-write hook.
///
/// Implementations must update exactly the label column and must not re-run
/// the save pipeline, otherwise `pre_write` would fire again.
pub trait LabelWriter {
    fn write_label(&self, id: CableId, label: &str) -> Result<()>;
}

/// Fires before any write reaches storage, for inserts and updates alike.
pub fn pre_write(cable: &mut Cable, renderer: &LabelRenderer) -> Result<()> {
    if cable.pk.is_some() && cable.is_unlabeled() {
        cable.label = renderer.render(cable)?;
    }
    Ok(())
}

/// Fires after a successful write; `created` is true when the write was the
/// initial insert.
pub fn post_write(
    cable: &mut Cable,
    created: bool,
    renderer: &LabelRenderer,
    writer: &dyn LabelWriter,
) -> Result<()> {
    if created && cable.is_unlabeled() {
        let id = cable.pk.ok_or(LabelError::MissingIdentifier)?;
        cable.label = renderer.render(cable)?;
        writer.write_label(id, &cable.label)?;
    }
    Ok(())
}
