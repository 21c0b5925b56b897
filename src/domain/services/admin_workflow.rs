#[cfg(test)]
#[path = "admin_workflow_test.rs"]
mod tests;

use tokio::sync::mpsc;

use super::ProjectQuery;
use super::ProjectRepository;
use super::ScreenshotCapture;
use super::PLACEHOLDER_IMAGE;
use crate::domain::models::texts;
use crate::domain::models::Event;
use crate::domain::models::FieldError;
use crate::domain::models::NewProject;
use crate::domain::models::Notice;
use crate::domain::models::Project;
use crate::domain::models::ProjectForm;
use crate::domain::models::ProjectPatch;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { project_id: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdminState {
    Idle,
    Creating,
    Editing { project_id: String },
    Submitting { mode: FormMode },
}

impl AdminState {
    fn from_mode(mode: FormMode) -> AdminState {
        match mode {
            FormMode::Create => return AdminState::Creating,
            FormMode::Edit { project_id } => return AdminState::Editing { project_id },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteState {
    None,
    Confirming(Project),
    Deleting(Project),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    NotOpen,
    Invalid(Vec<FieldError>),
    MissingImage,
    Saved(Project),
    Failed,
    /// The dialog was closed or replaced while the request was in flight.
    Discarded,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum SubmitRequest {
    Create(NewProject),
    Update { id: String, patch: ProjectPatch },
}

/// A submission that passed every local check and is ready to go remote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingSubmit {
    generation: u64,
    request: SubmitRequest,
}

impl PendingSubmit {
    pub async fn execute(&self, repository: &ProjectRepository) -> Option<Project> {
        match &self.request {
            SubmitRequest::Create(project) => return repository.create(project).await,
            SubmitRequest::Update { id, patch } => return repository.update(id, patch).await,
        }
    }
}

/// Create, edit and delete dialogs for projects. Only one dialog is open at
/// a time; opening another one abandons whatever the previous was doing.
pub struct AdminWorkflow {
    query: ProjectQuery,
    tx: mpsc::UnboundedSender<Event>,
    state: AdminState,
    delete: DeleteState,
    form: ProjectForm,
    image_url: String,
    errors: Vec<FieldError>,
    generation: u64,
}

impl AdminWorkflow {
    pub fn new(query: ProjectQuery, tx: mpsc::UnboundedSender<Event>) -> AdminWorkflow {
        return AdminWorkflow {
            query,
            tx,
            state: AdminState::Idle,
            delete: DeleteState::None,
            form: ProjectForm::default(),
            image_url: "".to_string(),
            errors: vec![],
            generation: 0,
        };
    }

    pub fn state(&self) -> &AdminState {
        return &self.state;
    }

    #[cfg(test)]
    pub fn delete_state(&self) -> &DeleteState {
        return &self.delete;
    }

    pub fn form(&self) -> &ProjectForm {
        return &self.form;
    }

    pub fn form_mut(&mut self) -> &mut ProjectForm {
        return &mut self.form;
    }

    pub fn image_url(&self) -> &str {
        return &self.image_url;
    }

    pub fn set_image_url(&mut self, image_url: &str) {
        self.image_url = image_url.trim().to_string();
    }

    pub fn errors(&self) -> &[FieldError] {
        return &self.errors;
    }

    fn reset(&mut self, state: AdminState, form: ProjectForm, image_url: &str) {
        self.generation += 1;
        self.state = state;
        self.form = form;
        self.image_url = image_url.to_string();
        self.errors = vec![];
    }

    pub fn open_create(&mut self) {
        self.reset(AdminState::Creating, ProjectForm::default(), "");
    }

    pub fn open_edit(&mut self, project: &Project) {
        self.reset(
            AdminState::Editing {
                project_id: project.id.to_string(),
            },
            ProjectForm::from_project(project),
            &project.image_url,
        );
    }

    pub fn close(&mut self) {
        self.reset(AdminState::Idle, ProjectForm::default(), "");
    }

    fn open_mode(&self) -> Option<FormMode> {
        match &self.state {
            AdminState::Creating => return Some(FormMode::Create),
            AdminState::Editing { project_id } => {
                return Some(FormMode::Edit {
                    project_id: project_id.to_string(),
                })
            }
            _ => return None,
        }
    }

    /// Runs the local checks in order: the field constraints first, then the
    /// image precondition. Nothing remote happens here.
    pub fn begin_submit(&mut self) -> Result<PendingSubmit, SubmitOutcome> {
        let mode = match self.open_mode() {
            Some(mode) => mode,
            None => return Err(SubmitOutcome::NotOpen),
        };

        self.errors = self.form.validate();
        if !self.errors.is_empty() {
            return Err(SubmitOutcome::Invalid(self.errors.clone()));
        }

        if self.image_url.is_empty() {
            Notice::error(texts::error_title())
                .with_description(texts::image_required())
                .send(&self.tx);
            return Err(SubmitOutcome::MissingImage);
        }

        let request = match &mode {
            FormMode::Create => SubmitRequest::Create(self.form.to_new_project(&self.image_url)),
            FormMode::Edit { project_id } => SubmitRequest::Update {
                id: project_id.to_string(),
                patch: self.form.to_patch(&self.image_url),
            },
        };

        self.state = AdminState::Submitting { mode };
        return Ok(PendingSubmit {
            generation: self.generation,
            request,
        });
    }

    /// Applies the remote result. Results for a dialog that has since been
    /// closed or replaced are dropped without touching state.
    pub async fn finish_submit(
        &mut self,
        pending: PendingSubmit,
        result: Option<Project>,
    ) -> SubmitOutcome {
        let mode = match &self.state {
            AdminState::Submitting { mode } if pending.generation == self.generation => {
                mode.clone()
            }
            _ => {
                tracing::debug!(
                    generation = pending.generation,
                    current = self.generation,
                    "discarding stale submit result"
                );
                return SubmitOutcome::Discarded;
            }
        };

        let is_create = mode == FormMode::Create;
        match result {
            Some(project) => {
                let title = if is_create {
                    texts::project_created()
                } else {
                    texts::project_updated()
                };
                Notice::success(title).send(&self.tx);

                self.query.invalidate().await;
                self.close();
                return SubmitOutcome::Saved(project);
            }
            None => {
                let title = if is_create {
                    texts::project_create_failed()
                } else {
                    texts::project_update_failed()
                };
                Notice::error(title).send(&self.tx);

                self.state = AdminState::from_mode(mode);
                return SubmitOutcome::Failed;
            }
        }
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let pending = match self.begin_submit() {
            Ok(pending) => pending,
            Err(outcome) => return outcome,
        };

        let result = pending.execute(self.query.repository()).await;
        return self.finish_submit(pending, result).await;
    }

    pub fn request_delete(&mut self, project: &Project) {
        self.delete = DeleteState::Confirming(project.clone());
    }

    pub fn cancel_delete(&mut self) {
        if let DeleteState::Confirming(_) = self.delete {
            self.delete = DeleteState::None;
        }
    }

    /// Deletes the project awaiting confirmation. Returns false when nothing
    /// was awaiting confirmation or the store refused.
    pub async fn confirm_delete(&mut self) -> bool {
        let project = match &self.delete {
            DeleteState::Confirming(project) => project.clone(),
            _ => return false,
        };

        self.delete = DeleteState::Deleting(project.clone());
        let deleted = self.query.repository().delete(&project.id).await;
        self.delete = DeleteState::None;

        if deleted {
            Notice::success(texts::project_deleted()).send(&self.tx);
            self.query.invalidate().await;
        } else {
            Notice::error(texts::project_delete_failed()).send(&self.tx);
        }

        return deleted;
    }

    /// Captures the form's website and stores the image URL in the form. A
    /// failed capture still leaves the placeholder image behind.
    pub async fn capture_screenshot(&mut self, capture: &ScreenshotCapture) -> Option<String> {
        let website_url = self.form.website_url.trim().to_string();
        if website_url.is_empty() {
            Notice::error(texts::error_title())
                .with_description(texts::website_url_required())
                .send(&self.tx);
            return None;
        }

        match capture.try_capture(&website_url).await {
            Ok(image_url) => {
                Notice::success(texts::success_title())
                    .with_description(texts::screenshot_captured())
                    .send(&self.tx);
                self.image_url = image_url;
            }
            Err(err) => {
                tracing::error!(error = ?err, url = %website_url, "screenshot capture failed");
                Notice::error(texts::screenshot_failed_title())
                    .with_description(texts::screenshot_failed())
                    .send(&self.tx);
                self.image_url = PLACEHOLDER_IMAGE.to_string();
            }
        }

        return Some(self.image_url.to_string());
    }
}
