use crate::commands::{list, CmdMessage, CmdResult, Listed};
use crate::error::Result;
use crate::store::DataStore;
use crate::view::ListView;
use tracing::info;

pub fn run<R, S>(store: &mut S, view: &mut ListView<R::Sort>, id: u64) -> Result<CmdResult>
where
    R: Listed,
    S: DataStore<R>,
{
    store.remove(id)?;
    view.invalidate();
    info!(id, noun = R::NOUN, "record removed");

    Ok(list::run(store, view).with_message(CmdMessage::success(format!(
        "Removed {} #{}",
        R::NOUN,
        id
    ))))
}
