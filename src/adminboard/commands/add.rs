use crate::commands::{list, CmdMessage, CmdResult, DraftForm, Listed};
use crate::error::{AdminError, Result};
use crate::store::DataStore;
use crate::view::ListView;
use crate::workflow::AddRecordFlow;
use chrono::{DateTime, Utc};

fn form<R: Listed>(flow: &AddRecordFlow<R::Draft>) -> Option<DraftForm> {
    flow.draft().map(|draft| DraftForm {
        noun: R::NOUN,
        fields: R::form_fields(draft),
        error: flow.error().map(|e| e.to_string()),
    })
}

fn with_form<R: Listed>(result: CmdResult, flow: &AddRecordFlow<R::Draft>) -> CmdResult {
    match form::<R>(flow) {
        Some(f) => result.with_form(f),
        None => result,
    }
}

pub fn open<R: Listed>(flow: &mut AddRecordFlow<R::Draft>, now: DateTime<Utc>) -> CmdResult {
    flow.open(now);
    with_form::<R>(CmdResult::default(), flow)
}

pub fn edit<R: Listed>(
    flow: &mut AddRecordFlow<R::Draft>,
    field: &str,
    value: &str,
) -> Result<CmdResult> {
    flow.edit(field, value)?;
    Ok(with_form::<R>(CmdResult::default(), flow))
}

/// Commits the draft. A rejected draft is not an error here: the result
/// carries the still-open form and the first validation message.
pub fn submit<R, S>(
    flow: &mut AddRecordFlow<R::Draft>,
    store: &mut S,
    view: &mut ListView<R::Sort>,
) -> Result<CmdResult>
where
    R: Listed,
    S: DataStore<R>,
{
    match flow.submit(store, view) {
        Ok(record) => Ok(list::run(store, view).with_message(CmdMessage::success(format!(
            "Added {} #{}",
            R::NOUN,
            record.id()
        )))),
        Err(AdminError::Validation(e)) => Ok(with_form::<R>(
            CmdResult::default().with_message(CmdMessage::error(e.to_string())),
            flow,
        )),
        Err(e) => Err(e),
    }
}

pub fn cancel<R: Listed>(flow: &mut AddRecordFlow<R::Draft>) -> CmdResult {
    let was_open = flow.is_open();
    flow.cancel();
    let mut result = CmdResult::default();
    if was_open {
        result.add_message(CmdMessage::info(format!("Discarded the new {}", R::NOUN)));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Listing, MessageLevel};
    use crate::model::{Thread, ThreadSort, User, UserSort};
    use crate::store::memory::fixtures::{reference_time, StoreFixture};
    use crate::workflow::{ThreadDraft, UserDraft};

    #[test]
    fn open_shows_the_default_form() {
        let mut flow: AddRecordFlow<ThreadDraft> = AddRecordFlow::new();
        let result = open::<Thread>(&mut flow, reference_time());

        let form = result.form.unwrap();
        assert_eq!(form.noun, "thread");
        assert_eq!(form.fields[2], ("device", "Desktop".to_string()));
        assert!(form.error.is_none());
    }

    #[test]
    fn rejected_draft_reports_the_first_error() {
        let mut fixture = StoreFixture::users(25);
        let mut view: ListView<UserSort> = ListView::new(10);
        let mut flow: AddRecordFlow<UserDraft> = AddRecordFlow::new();
        open::<User>(&mut flow, reference_time());
        edit::<User>(&mut flow, "email", "someone@example.com").unwrap();

        let result = submit::<User, _>(&mut flow, &mut fixture.store, &mut view).unwrap();
        assert!(result.has_errors());
        assert_eq!(result.messages[0].content, "Name is a required field");
        assert_eq!(
            result.form.unwrap().error.as_deref(),
            Some("Name is a required field")
        );
        assert!(result.listing.is_none());
        assert_eq!(fixture.store.len(), 25);
    }

    #[test]
    fn accepted_draft_lists_page_one_with_the_new_record_first() {
        let mut fixture = StoreFixture::threads(37);
        let mut view: ListView<ThreadSort> = ListView::new(9);
        view.go_to(4, fixture.store.all());

        let mut flow: AddRecordFlow<ThreadDraft> = AddRecordFlow::new();
        open::<Thread>(&mut flow, reference_time());
        edit::<Thread>(&mut flow, "title", "Fresh").unwrap();
        edit::<Thread>(&mut flow, "content", "Body").unwrap();

        let result = submit::<Thread, _>(&mut flow, &mut fixture.store, &mut view).unwrap();
        assert!(!result.has_errors());
        assert!(result.form.is_none());
        assert_eq!(result.messages[0].content, "Added thread #38");
        match result.listing.unwrap() {
            Listing::Threads { page, .. } => {
                assert_eq!(page.page_number, 1);
                assert_eq!(page.total_items, 38);
                assert_eq!(page.items[0].title, "Fresh");
            }
            other => panic!("Expected threads, got {:?}", other),
        }
    }

    #[test]
    fn submit_without_an_open_form_is_an_error() {
        let mut fixture = StoreFixture::users(1);
        let mut view: ListView<UserSort> = ListView::new(10);
        let mut flow: AddRecordFlow<UserDraft> = AddRecordFlow::new();
        assert!(submit::<User, _>(&mut flow, &mut fixture.store, &mut view).is_err());
    }

    #[test]
    fn cancel_closes_the_form() {
        let mut flow: AddRecordFlow<UserDraft> = AddRecordFlow::new();
        open::<User>(&mut flow, reference_time());
        let result = cancel::<User>(&mut flow);
        assert!(matches!(result.messages[0].level, MessageLevel::Info));
        assert!(result.form.is_none());
        assert!(!flow.is_open());

        assert!(cancel::<User>(&mut flow).messages.is_empty());
    }
}
