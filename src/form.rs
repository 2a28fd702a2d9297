use api_client::model::BookId;
use tracing::{debug, info, warn};

use crate::{
    backend::BookBackend,
    classify::{self, FieldDetail, Verdict},
    draft::{Draft, Field},
    notification::{Notification, Notifier},
    session::SessionController,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormOptions {
    /// Show per-field validation errors when an update is rejected.
    /// Creates always show them.
    pub update_field_errors: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved,
    Rejected,
    Incomplete(Vec<Field>),
}

/// The create/edit page for a single book.
///
/// Without an identifier the form creates a new book; with one it edits the
/// book the backend holds under that identifier.
pub struct BookForm<B, S, N> {
    backend: B,
    session: S,
    notifier: N,
    options: FormOptions,
    id: Option<BookId>,
    draft: Draft,
    loading: bool,
}

impl<B, S, N> BookForm<B, S, N>
where
    B: BookBackend,
    S: SessionController,
    N: Notifier,
{
    pub fn new(backend: B, session: S, notifier: N, id: Option<BookId>) -> Self {
        Self {
            backend,
            session,
            notifier,
            options: FormOptions::default(),
            id,
            draft: Draft::default(),
            loading: true,
        }
    }

    pub fn with_options(self, options: FormOptions) -> Self {
        Self { options, ..self }
    }

    pub fn id(&self) -> Option<&BookId> {
        self.id.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// Populates the draft from the backend when editing.
    ///
    /// The draft is only written once the response is in; dropping the
    /// returned future abandons the request and leaves the draft as it was.
    pub async fn load(&mut self) {
        if let Some(id) = &self.id {
            match self.backend.read(&self.session.authorization(), id).await {
                Ok(info) => {
                    debug!(%id, "book loaded");
                    self.draft = info.into();
                }
                Err(error) => {
                    warn!(%id, %error, "loading book failed");
                    self.report(classify::classify(&error, FieldDetail::SummaryOnly));
                }
            }
        } else {
            debug!("no book id, starting from an empty draft");
        }

        self.loading = false;
    }

    /// Creates or updates the book from the current draft.
    ///
    /// Every outcome is also reported through the notifier; hosts that do
    /// not care may ignore the return value.
    pub async fn submit(&self) -> SubmitOutcome {
        let missing = self.draft.missing_fields();
        if !missing.is_empty() {
            for field in &missing {
                self.notifier
                    .notify(Notification::warning(format!("{field}: obrigatório")));
            }
            return SubmitOutcome::Incomplete(missing);
        }

        let info = self.draft.to_book_info();
        let authorization = self.session.authorization();

        let (result, detail) = match &self.id {
            None => (
                self.backend.create(&authorization, &info).await,
                FieldDetail::PerField,
            ),
            Some(id) => (
                self.backend.update(&authorization, id, &info).await,
                if self.options.update_field_errors {
                    FieldDetail::PerField
                } else {
                    FieldDetail::SummaryOnly
                },
            ),
        };

        match result {
            Ok(()) => {
                info!(id = ?self.id, "book saved");
                self.notifier.notify(Notification::success(classify::SAVED));
                SubmitOutcome::Saved
            }
            Err(error) => {
                warn!(id = ?self.id, %error, "saving book failed");
                self.report(classify::classify(&error, detail));
                SubmitOutcome::Rejected
            }
        }
    }

    fn report(
        &self,
        Verdict {
            notifications,
            invalidate_session,
        }: Verdict,
    ) {
        for notification in notifications {
            self.notifier.notify(notification);
        }

        if invalidate_session {
            self.session.invalidate();
        }
    }
}
