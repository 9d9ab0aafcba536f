use crate::commands::{CmdMessage, CmdResult, Listed};
use crate::error::Result;
use crate::store::DataStore;
use crate::view::ListView;

/// Renders the current page of `view` over the store's records.
pub fn run<R, S>(store: &S, view: &mut ListView<R::Sort>) -> CmdResult
where
    R: Listed,
    S: DataStore<R>,
{
    let page = view.render(store.all()).map(Clone::clone);
    let empty = page.is_empty();
    let mut result = CmdResult::default().with_listing(R::listing(view.query(), page));
    if empty {
        result.add_message(CmdMessage::info(format!("No {}s found.", R::NOUN)));
    }
    result
}

pub fn search<R, S>(store: &S, view: &mut ListView<R::Sort>, term: &str) -> CmdResult
where
    R: Listed,
    S: DataStore<R>,
{
    view.set_search(term);
    run(store, view)
}

pub fn filter<R, S>(store: &S, view: &mut ListView<R::Sort>, value: &str) -> CmdResult
where
    R: Listed,
    S: DataStore<R>,
{
    view.set_filter(value);
    run(store, view)
}

pub fn clear_filter<R, S>(store: &S, view: &mut ListView<R::Sort>) -> CmdResult
where
    R: Listed,
    S: DataStore<R>,
{
    view.clear_filter();
    run(store, view)
}

pub fn sort<R, S>(store: &S, view: &mut ListView<R::Sort>, key: &str) -> Result<CmdResult>
where
    R: Listed,
    S: DataStore<R>,
{
    let key: R::Sort = key.parse()?;
    view.set_sort(key);
    Ok(run(store, view))
}

pub fn next_page<R, S>(store: &S, view: &mut ListView<R::Sort>) -> CmdResult
where
    R: Listed,
    S: DataStore<R>,
{
    view.next_page(store.all());
    run(store, view)
}

pub fn prev_page<R, S>(store: &S, view: &mut ListView<R::Sort>) -> CmdResult
where
    R: Listed,
    S: DataStore<R>,
{
    view.prev_page();
    run(store, view)
}

pub fn go_to_page<R, S>(store: &S, view: &mut ListView<R::Sort>, page: usize) -> CmdResult
where
    R: Listed,
    S: DataStore<R>,
{
    view.go_to(page, store.all());
    run(store, view)
}
