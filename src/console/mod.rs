//! UserConsole: owner of the list snapshot, the three forms and the
//! open modal.
//!
//! Every action settles into a notification; nothing here returns an
//! error to the caller except through the outcome enums. Each mutation is
//! followed by a full list refresh, awaited strictly after the mutation.

pub mod list;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{debug, info};

use crate::forms::{
    Form, FormAction, FormError, FormFill, Location, Modal, UnsupportedAction, UserForm,
};
use crate::models::{FormPayload, User, UserId, flatten};
use crate::notify::{Notification, Notifier};
use crate::repository::{RepositoryError, UserRepository};

pub use list::UserListState;

/// Anything that can go wrong behind a console action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Unsupported(#[from] UnsupportedAction),
}

impl ConsoleError {
    pub fn code(&self) -> Option<u16> {
        match self {
            ConsoleError::Repository(e) => e.code,
            ConsoleError::Form(_) => None,
            ConsoleError::Unsupported(_) => Some(UnsupportedAction::CODE),
        }
    }

    pub fn notification(&self) -> Notification {
        Notification::error(self.code(), &self.to_string())
    }
}

/// Result of a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form's submit control was disabled; nothing was sent.
    Busy,
    /// The repository accepted the request and returned this record.
    Completed(User),
    /// The request failed and was reported.
    Failed(ConsoleError),
}

/// Which prompt to open for a listed user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Edit,
    Delete,
}

impl PromptKind {
    pub fn action(self) -> FormAction {
        match self {
            PromptKind::Edit => FormAction::Edit,
            PromptKind::Delete => FormAction::Delete,
        }
    }
}

/// Result of opening an edit or delete prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// The record was loaded into the form and its modal opened.
    Opened(FormFill),
    /// The lookup failed; the error was reported and the list reloaded.
    Resynced(RepositoryError),
}

struct ConsoleState {
    users: UserListState,
    create: Form,
    edit: Form,
    delete: Form,
    location: Location,
}

impl ConsoleState {
    fn form(&self, action: FormAction) -> &Form {
        match action {
            FormAction::Create => &self.create,
            FormAction::Edit => &self.edit,
            FormAction::Delete => &self.delete,
        }
    }

    fn form_mut(&mut self, action: FormAction) -> &mut Form {
        match action {
            FormAction::Create => &mut self.create,
            FormAction::Edit => &mut self.edit,
            FormAction::Delete => &mut self.delete,
        }
    }
}

/// Disables a submit control for as long as it is held.
struct SubmitGuard<'a> {
    control: &'a AtomicBool,
}

impl<'a> SubmitGuard<'a> {
    /// `None` when the control is already disabled.
    fn acquire(control: &'a AtomicBool) -> Option<Self> {
        control
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { control })
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.control.store(false, Ordering::Release);
    }
}

/// Front end for one user directory.
pub struct UserConsole<R, N> {
    repository: R,
    notifier: N,
    state: Mutex<ConsoleState>,
    create_busy: AtomicBool,
    edit_busy: AtomicBool,
    delete_busy: AtomicBool,
}

impl<R: UserRepository, N: Notifier> UserConsole<R, N> {
    pub fn new(repository: R, notifier: N) -> Self {
        Self {
            repository,
            notifier,
            state: Mutex::new(ConsoleState {
                users: UserListState::default(),
                create: Form::new(FormAction::Create),
                edit: Form::new(FormAction::Edit),
                delete: Form::new(FormAction::Delete),
                location: Location::default(),
            }),
            create_busy: AtomicBool::new(false),
            edit_busy: AtomicBool::new(false),
            delete_busy: AtomicBool::new(false),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn lock(&self) -> MutexGuard<'_, ConsoleState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn control(&self, action: FormAction) -> &AtomicBool {
        match action {
            FormAction::Create => &self.create_busy,
            FormAction::Edit => &self.edit_busy,
            FormAction::Delete => &self.delete_busy,
        }
    }

    /// Whether the form's submit control is currently disabled.
    pub fn is_submitting(&self, action: FormAction) -> bool {
        self.control(action).load(Ordering::Acquire)
    }

    /// Snapshot of the listed users.
    pub fn users(&self) -> Vec<User> {
        self.lock().users.users().to_vec()
    }

    /// Number of successful list loads.
    pub fn list_generation(&self) -> u64 {
        self.lock().users.generation()
    }

    /// Copy of a form's current state.
    pub fn form(&self, action: FormAction) -> Form {
        self.lock().form(action).clone()
    }

    /// Type into a form input.
    pub fn enter(&self, action: FormAction, name: &str, value: &str) -> Result<(), FormError> {
        self.lock().form_mut(action).enter(name, value)
    }

    pub fn location(&self) -> Location {
        self.lock().location.clone()
    }

    /// Open the create modal with a blank form.
    pub fn open_create(&self) {
        let mut state = self.lock();
        state.create.reset();
        state.location.open(Modal::CreateUser);
    }

    pub fn close_modals(&self) {
        self.lock().location.close();
    }

    fn report(&self, err: &ConsoleError) {
        debug!(error = %err, code = ?err.code(), "reporting failure");
        self.notifier.notify(err.notification());
    }

    /// Reload the list and replace the snapshot.
    ///
    /// Returns the number of users loaded, or `None` after reporting a
    /// failure (the previous snapshot is kept).
    pub async fn refresh(&self) -> Option<usize> {
        match self.repository.list_users().await {
            Ok(list) => {
                let count = list.all.len();
                self.lock().users.replace(list);
                debug!(count, "user list refreshed");
                Some(count)
            }
            Err(err) => {
                self.report(&ConsoleError::from(err));
                None
            }
        }
    }

    /// Fetch one record, reporting a failure.
    pub async fn lookup(&self, id: &UserId) -> Result<User, ConsoleError> {
        self.repository.find_user(id).await.map_err(|err| {
            let err = ConsoleError::from(err);
            self.report(&err);
            err
        })
    }

    /// Submit a form by its action tag.
    ///
    /// An unknown tag is reported as unsupported and the list is still
    /// refreshed, the same as any other failed submission.
    pub async fn submit_tag(&self, tag: &str) -> SubmitOutcome {
        match tag.parse::<FormAction>() {
            Ok(action) => self.submit(action).await,
            Err(unsupported) => {
                let err = ConsoleError::from(unsupported);
                self.report(&err);
                self.refresh().await;
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Submit a form: flatten its inputs, resolve the payload, call the
    /// repository, report the outcome and refresh the list.
    ///
    /// The form's submit control stays disabled until the refresh has
    /// settled, so a second submission of the same form meanwhile returns
    /// [`SubmitOutcome::Busy`].
    pub async fn submit(&self, action: FormAction) -> SubmitOutcome {
        let Some(_guard) = SubmitGuard::acquire(self.control(action)) else {
            debug!(form = %action, "submit ignored, request already in flight");
            return SubmitOutcome::Busy;
        };

        let (payload, subject) = {
            let state = self.lock();
            let form = state.form(action);
            (flatten(form.pairs()), form.subject().cloned())
        };

        let outcome = match self.perform(action, &payload, subject.as_ref()).await {
            Ok(user) => {
                {
                    let mut state = self.lock();
                    state.form_mut(action).reset();
                    state.location.close();
                }
                info!(form = %action, id = %user.id, "submission accepted");
                self.notifier.notify(Notification::success(format!(
                    "User #{} {} {} was successfully {}.",
                    user.id,
                    user.first_name,
                    user.last_name,
                    action.past_tense()
                )));
                SubmitOutcome::Completed(user)
            }
            Err(err) => {
                self.report(&err);
                SubmitOutcome::Failed(err)
            }
        };

        self.refresh().await;
        outcome
    }

    async fn perform(
        &self,
        action: FormAction,
        payload: &FormPayload,
        subject: Option<&UserId>,
    ) -> Result<User, ConsoleError> {
        let form = UserForm::resolve(action, payload)?.bind_subject(subject);
        debug!(request = %form, "sending form");
        let user = match &form {
            UserForm::Create(p) => self.repository.add_user(&p.draft).await?,
            UserForm::Edit(p) => self.repository.edit_user(&p.id, &p.draft).await?,
            UserForm::Delete(p) => self.repository.delete_user(&p.id).await?,
        };
        Ok(user)
    }

    /// Open the edit or delete prompt for a listed user.
    ///
    /// A failed lookup usually means the record changed underneath us:
    /// it is reported once and the list is reloaded once.
    pub async fn prompt(&self, kind: PromptKind, id: &UserId) -> PromptOutcome {
        let action = kind.action();
        self.lock().form_mut(action).set_subject(id.clone());

        match self.repository.find_user(id).await {
            Ok(user) => {
                let mut state = self.lock();
                let form = state.form_mut(action);
                form.reset();
                form.set_subject(id.clone());
                let fill = form.populate(&user);
                state.location.open(Modal::for_action(action));
                PromptOutcome::Opened(fill)
            }
            Err(err) => {
                self.report(&ConsoleError::from(err.clone()));
                self.refresh().await;
                PromptOutcome::Resynced(err)
            }
        }
    }
}
