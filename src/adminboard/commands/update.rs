use crate::commands::{list, CmdMessage, CmdResult, Listed};
use crate::error::{AdminError, Result};
use crate::model::Patch;
use crate::store::DataStore;
use crate::view::ListView;
use tracing::info;

/// Sets one field on an existing record. The patch is validated with the same
/// rules as the add form before it reaches the store.
pub fn run<R, S>(
    store: &mut S,
    view: &mut ListView<R::Sort>,
    id: u64,
    field: &str,
    value: &str,
) -> Result<CmdResult>
where
    R: Listed,
    S: DataStore<R>,
{
    if store.get(id).is_none() {
        return Err(AdminError::RecordNotFound(id));
    }

    let mut patch = R::Patch::default();
    patch.set_field(field, value)?;
    patch.validate()?;

    store.update(id, patch)?;
    view.invalidate();
    info!(id, field, "record updated");

    Ok(list::run(store, view).with_message(CmdMessage::success(format!(
        "Updated {} #{}",
        R::NOUN,
        id
    ))))
}
