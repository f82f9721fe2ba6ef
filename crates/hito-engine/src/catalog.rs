//! Read-only reference data: templates, process links and client processes.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use hito_core::calendar::Period;
use hito_core::entities::{
    ClientProcessId, ClientProcessInstance, MilestoneTemplate, MilestoneTemplateId,
    ProcessMilestoneLink, ProcessTemplate, ProcessTemplateId,
};

/// Lookup tables over the reference data of one client.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    milestone_templates: HashMap<MilestoneTemplateId, MilestoneTemplate>,
    process_templates: HashMap<ProcessTemplateId, ProcessTemplate>,
    links: Vec<ProcessMilestoneLink>,
    client_processes: HashMap<ClientProcessId, ClientProcessInstance>,
}

impl Catalog {
    #[must_use]
    pub fn new(
        milestone_templates: Vec<MilestoneTemplate>,
        process_templates: Vec<ProcessTemplate>,
        links: Vec<ProcessMilestoneLink>,
        client_processes: Vec<ClientProcessInstance>,
    ) -> Self {
        Self {
            milestone_templates: milestone_templates
                .into_iter()
                .map(|t| (t.id, t))
                .collect(),
            process_templates: process_templates.into_iter().map(|p| (p.id, p)).collect(),
            links,
            client_processes: client_processes.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    #[must_use]
    pub fn milestone_template(&self, id: MilestoneTemplateId) -> Option<&MilestoneTemplate> {
        self.milestone_templates.get(&id)
    }

    #[must_use]
    pub fn client_process(&self, id: ClientProcessId) -> Option<&ClientProcessInstance> {
        self.client_processes.get(&id)
    }

    /// Process template behind a client-process instance.
    #[must_use]
    pub fn process_of(&self, client_process_id: ClientProcessId) -> Option<&ProcessTemplate> {
        self.client_process(client_process_id)
            .and_then(|cp| self.process_templates.get(&cp.process_template_id))
    }

    /// Display name of a milestone template, empty when unknown.
    #[must_use]
    pub fn milestone_name(&self, id: MilestoneTemplateId) -> &str {
        self.milestone_template(id).map_or("", |t| t.name.as_str())
    }

    /// Display name of the process behind a client-process instance, empty when unknown.
    #[must_use]
    pub fn process_name(&self, client_process_id: ClientProcessId) -> &str {
        self.process_of(client_process_id)
            .map_or("", |p| p.name.as_str())
    }

    /// Milestone templates a process expands into that are valid on `on`.
    #[must_use]
    pub fn templates_for_process(
        &self,
        process_template_id: ProcessTemplateId,
        on: NaiveDate,
    ) -> Vec<&MilestoneTemplate> {
        let mut templates: Vec<&MilestoneTemplate> = self
            .links
            .iter()
            .filter(|link| link.process_template_id == process_template_id)
            .filter_map(|link| self.milestone_templates.get(&link.milestone_template_id))
            .filter(|t| t.is_active_on(on))
            .collect();
        templates.sort_by_key(|t| t.id);
        templates.dedup_by_key(|t| t.id);
        templates
    }

    /// Client-process instances grouped by period.
    #[must_use]
    pub fn periods(&self) -> BTreeMap<Period, Vec<&ClientProcessInstance>> {
        let mut grouped = group_by_period(self.client_processes.values());
        for instances in grouped.values_mut() {
            instances.sort_by_key(|cp| cp.id);
        }
        grouped
    }
}

/// Group client-process instances by their year/month period.
pub fn group_by_period<'a, I>(client_processes: I) -> BTreeMap<Period, Vec<&'a ClientProcessInstance>>
where
    I: IntoIterator<Item = &'a ClientProcessInstance>,
{
    let mut grouped: BTreeMap<Period, Vec<&ClientProcessInstance>> = BTreeMap::new();
    for cp in client_processes {
        grouped.entry(cp.period()).or_default().push(cp);
    }
    grouped
}
