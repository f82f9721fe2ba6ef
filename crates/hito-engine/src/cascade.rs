//! Cascading disable.
//!
//! A selection of milestone templates, or of client-process instances, is
//! resolved into a set of template ids. Each template then gets one
//! disable-from-date command, scoped to the client. Commands run one after
//! another; a failing template does not stop the rest.
//!
//! Selecting by process disables each resolved template for the whole client
//! from the cutoff, not only inside the selected processes. Instances of the
//! same template under other client-process instances are disabled too.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use hito_core::entities::{ClientId, ClientProcessId, MilestoneTemplateId};

use crate::error::EngineError;
use crate::outcome::{BatchOutcome, BatchTarget};
use crate::store::MilestoneStore;

/// What the user picked to disable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisableSelection {
    Templates(BTreeSet<MilestoneTemplateId>),
    ProcessInstances(BTreeSet<ClientProcessId>),
}

impl DisableSelection {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Templates(ids) => ids.is_empty(),
            Self::ProcessInstances(ids) => ids.is_empty(),
        }
    }
}

/// Distinct template ids a selection stands for.
///
/// For process instances, only enabled milestone instances contribute, and
/// every selected process must belong to `client_id`.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] if a selected process belongs to
/// another client, and [`EngineError::Store`] if the processes or their
/// instances cannot be read. No command has been issued in either case.
pub async fn resolve_templates<S>(
    store: &S,
    client_id: ClientId,
    selection: &DisableSelection,
) -> Result<BTreeSet<MilestoneTemplateId>, EngineError>
where
    S: MilestoneStore + ?Sized,
{
    match selection {
        DisableSelection::Templates(ids) => Ok(ids.clone()),
        DisableSelection::ProcessInstances(ids) => {
            if ids.is_empty() {
                return Ok(BTreeSet::new());
            }
            let owned: BTreeSet<ClientProcessId> = store
                .fetch_client_processes(client_id)
                .await?
                .iter()
                .map(|cp| cp.id)
                .collect();
            let foreign: Vec<String> = ids
                .difference(&owned)
                .map(ToString::to_string)
                .collect();
            if !foreign.is_empty() {
                return Err(EngineError::Validation(format!(
                    "client process {} does not belong to client {}",
                    foreign.join(", "),
                    client_id
                )));
            }
            let ids: Vec<ClientProcessId> = ids.iter().copied().collect();
            let instances = store.fetch_milestone_instances(&ids).await?;
            Ok(instances
                .iter()
                .filter(|i| i.enabled)
                .map(|i| i.milestone_template_id)
                .collect())
        }
    }
}

/// Issue one disable command per template and aggregate the results.
pub async fn disable_templates<S>(
    store: &S,
    client_id: ClientId,
    cutoff: NaiveDate,
    templates: &BTreeSet<MilestoneTemplateId>,
) -> BatchOutcome
where
    S: MilestoneStore + ?Sized,
{
    let mut outcome = BatchOutcome::default();
    for &template_id in templates {
        tracing::debug!(
            "Disabling template {} for client {} from {}",
            template_id,
            client_id,
            cutoff
        );
        match store
            .disable_instances_by_template_from_date(template_id, cutoff, client_id)
            .await
        {
            Ok(()) => outcome.record_success(),
            Err(e) => {
                tracing::warn!("Disable failed for template {}: {}", template_id, e);
                outcome.record_failure(BatchTarget::Template(template_id), e);
            }
        }
    }
    outcome
}
