//! Generic controller shared by the projects, users and tasks views.

use super::{Collection, EventOutcome, FormData, View, ViewError, ViewEvent};
use crate::host::Host;
use crate::html::Node;
use crate::model::{Record, RecordId, ValidationError};
use crate::storage::Storage;
use log::{debug, info};

/// Per-kind behavior plugged into `EntityController`.
pub trait EntityKind {
    type Record: Record;
    /// Extra data loaded on mount (projects read the user list).
    type Context;

    /// Route name, also used in log events.
    const VIEW: &'static str;

    fn load_context(storage: &Storage) -> Self::Context;

    /// Validates add-form and edit-row values alike.
    fn parse(form: &FormData) -> Result<<Self::Record as Record>::Draft, ValidationError>;

    /// Initial values of the edit row for `record`.
    fn edit_form(record: &Self::Record, context: &Self::Context) -> FormData;

    fn render(
        records: &Collection<Self::Record>,
        context: &Self::Context,
        state: &ViewState,
    ) -> Node;

    /// Sets the done flag; kinds without one report `false`.
    fn set_done(_record: &mut Self::Record, _done: bool) -> bool {
        false
    }
}

/// Row currently in inline edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: RecordId,
    pub form: FormData,
}

/// Transient UI state of a mounted view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub query: String,
    /// Values kept in the add form after a rejected submit.
    pub add_form: FormData,
    pub editing: Option<EditSession>,
}

impl ViewState {
    pub fn is_editing(&self, id: &RecordId) -> bool {
        self.editing.as_ref().is_some_and(|session| &session.id == id)
    }
}

struct Mounted<K: EntityKind> {
    records: Collection<K::Record>,
    context: K::Context,
    state: ViewState,
}

/// Controller for one entity view. Created unmounted; mounted state is
/// built on `mount` and dropped on `unmount`.
pub struct EntityController<K: EntityKind> {
    storage: Storage,
    mounted: Option<Mounted<K>>,
}

impl<K: EntityKind> EntityController<K> {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            mounted: None,
        }
    }

    /// Mounted records in collection order.
    pub fn records(&self) -> Option<&[K::Record]> {
        self.mounted
            .as_ref()
            .map(|mounted| mounted.records.records())
    }

    pub fn state(&self) -> Option<&ViewState> {
        self.mounted.as_ref().map(|mounted| &mounted.state)
    }

    fn render_into(mounted: &Mounted<K>, host: &mut dyn Host) -> Result<(), ViewError> {
        let container = host
            .content()
            .ok_or(ViewError::MissingContainer { view: K::VIEW })?;
        container.replace(K::render(&mounted.records, &mounted.context, &mounted.state));
        Ok(())
    }

    fn submit(
        mounted: &mut Mounted<K>,
        form: FormData,
        host: &mut dyn Host,
    ) -> Result<EventOutcome, ViewError> {
        match K::parse(&form) {
            Err(err) => {
                mounted.state.add_form = form;
                Self::reject(mounted, err, host)
            }
            Ok(draft) => {
                let (id, persisted) = mounted.records.insert(draft);
                mounted.state.add_form = FormData::new();
                info!(
                    "event=record_add module=view status=ok view={} id={} persisted={}",
                    K::VIEW,
                    id,
                    persisted
                );
                Self::render_into(mounted, host)?;
                host.notices()
                    .success(format!("{} added successfully", <K::Record as Record>::KIND));
                Ok(EventOutcome::Mutated { persisted })
            }
        }
    }

    fn begin_edit(
        mounted: &mut Mounted<K>,
        id: RecordId,
        host: &mut dyn Host,
    ) -> Result<EventOutcome, ViewError> {
        if mounted.state.is_editing(&id) {
            return Ok(EventOutcome::Ignored);
        }
        let Some(record) = mounted.records.find(&id) else {
            return Ok(EventOutcome::Ignored);
        };
        mounted.state.editing = Some(EditSession {
            form: K::edit_form(record, &mounted.context),
            id,
        });
        Self::render_into(mounted, host)?;
        Ok(EventOutcome::Rendered)
    }

    fn save(mounted: &mut Mounted<K>, host: &mut dyn Host) -> Result<EventOutcome, ViewError> {
        let Some(session) = mounted.state.editing.clone() else {
            return Ok(EventOutcome::Ignored);
        };
        let draft = match K::parse(&session.form) {
            Ok(draft) => draft,
            Err(err) => return Self::reject(mounted, err, host),
        };

        mounted.state.editing = None;
        let Some(persisted) = mounted.records.update(&session.id, draft) else {
            Self::render_into(mounted, host)?;
            return Ok(EventOutcome::Ignored);
        };
        info!(
            "event=record_update module=view status=ok view={} id={} persisted={}",
            K::VIEW,
            session.id,
            persisted
        );
        Self::render_into(mounted, host)?;
        host.notices()
            .success(format!("{} updated successfully", <K::Record as Record>::KIND));
        Ok(EventOutcome::Mutated { persisted })
    }

    fn delete(
        mounted: &mut Mounted<K>,
        id: RecordId,
        host: &mut dyn Host,
    ) -> Result<EventOutcome, ViewError> {
        if mounted.records.find(&id).is_none() {
            return Ok(EventOutcome::Ignored);
        }
        let prompt = format!(
            "Are you sure you want to delete this {}?",
            <K::Record as Record>::KIND.to_lowercase()
        );
        if !host.confirm(&prompt) {
            debug!(
                "event=record_delete module=view status=declined view={} id={}",
                K::VIEW,
                id
            );
            return Ok(EventOutcome::Ignored);
        }

        let Some(persisted) = mounted.records.remove(&id) else {
            return Ok(EventOutcome::Ignored);
        };
        if mounted.state.is_editing(&id) {
            mounted.state.editing = None;
        }
        info!(
            "event=record_delete module=view status=ok view={} id={} persisted={}",
            K::VIEW,
            id,
            persisted
        );
        Self::render_into(mounted, host)?;
        host.notices()
            .success(format!("{} deleted successfully", <K::Record as Record>::KIND));
        Ok(EventOutcome::Mutated { persisted })
    }

    fn toggle(
        mounted: &mut Mounted<K>,
        id: RecordId,
        done: bool,
        host: &mut dyn Host,
    ) -> Result<EventOutcome, ViewError> {
        let Some(persisted) = mounted
            .records
            .modify(&id, |record| K::set_done(record, done))
        else {
            return Ok(EventOutcome::Ignored);
        };
        Self::render_into(mounted, host)?;
        Ok(EventOutcome::Mutated { persisted })
    }

    fn reject(
        mounted: &Mounted<K>,
        err: ValidationError,
        host: &mut dyn Host,
    ) -> Result<EventOutcome, ViewError> {
        debug!(
            "event=record_validate module=view status=rejected view={} error={}",
            K::VIEW,
            err
        );
        Self::render_into(mounted, host)?;
        host.notices().error(err.to_string());
        Ok(EventOutcome::Rejected(err))
    }
}

impl<K: EntityKind> View for EntityController<K> {
    fn name(&self) -> &'static str {
        K::VIEW
    }

    fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    fn mount(&mut self, host: &mut dyn Host) -> Result<(), ViewError> {
        if self.mounted.is_some() {
            debug!("event=view_mount module=view status=skipped view={}", K::VIEW);
            return Ok(());
        }
        if host.content().is_none() {
            return Err(ViewError::MissingContainer { view: K::VIEW });
        }

        let mounted = Mounted {
            records: Collection::load(self.storage.clone()),
            context: K::load_context(&self.storage),
            state: ViewState::default(),
        };
        Self::render_into(&mounted, host)?;
        info!(
            "event=view_mount module=view status=ok view={} records={}",
            K::VIEW,
            mounted.records.len()
        );
        self.mounted = Some(mounted);
        Ok(())
    }

    fn unmount(&mut self, host: &mut dyn Host) -> Result<(), ViewError> {
        self.mounted = None;
        let container = host
            .content()
            .ok_or(ViewError::MissingContainer { view: K::VIEW })?;
        container.clear();
        info!("event=view_unmount module=view status=ok view={}", K::VIEW);
        Ok(())
    }

    fn handle(
        &mut self,
        event: ViewEvent,
        host: &mut dyn Host,
    ) -> Result<EventOutcome, ViewError> {
        let Some(mounted) = self.mounted.as_mut() else {
            return Ok(EventOutcome::Ignored);
        };

        match event {
            ViewEvent::Search(query) => {
                mounted.state.query = query;
                Self::render_into(mounted, host)?;
                Ok(EventOutcome::Rendered)
            }
            ViewEvent::Submit(form) => Self::submit(mounted, form, host),
            ViewEvent::Edit(id) => Self::begin_edit(mounted, id, host),
            ViewEvent::EditInput { field, value } => match mounted.state.editing.as_mut() {
                Some(session) => {
                    session.form.set(field, value);
                    Self::render_into(mounted, host)?;
                    Ok(EventOutcome::Rendered)
                }
                None => Ok(EventOutcome::Ignored),
            },
            ViewEvent::Save => Self::save(mounted, host),
            ViewEvent::KeyPress(key) if key == "Enter" => Self::save(mounted, host),
            ViewEvent::KeyPress(_) => Ok(EventOutcome::Ignored),
            ViewEvent::Cancel => {
                mounted.state.editing = None;
                Self::render_into(mounted, host)?;
                Ok(EventOutcome::Rendered)
            }
            ViewEvent::Delete(id) => Self::delete(mounted, id, host),
            ViewEvent::Toggle { id, done } => Self::toggle(mounted, id, done, host),
        }
    }
}
