//! Shared test data for hito-engine unit tests.

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
    use hito_core::entities::{
        AuditRecord, ClientProcessInstance, CompletionRecord, MilestoneInstance, MilestoneTemplate,
        ProcessMilestoneLink, ProcessTemplate,
    };
    use hito_core::enums::{AuditField, LifecycleStatus, MilestoneKind, PeriodicityUnit, ReasonCode};
    use hito_core::identity::ActingUser;

    use crate::catalog::Catalog;
    use crate::memory::{InMemoryStore, Snapshot};
    use crate::row::CalendarRow;
    use crate::service::CalendarService;
    use crate::store::StaticIdentity;

    pub const CLIENT: u64 = 1;
    pub const OTHER_CLIENT: u64 = 2;

    pub const PROC_ACCOUNTING: u64 = 10;
    pub const PROC_PAYROLL: u64 = 11;

    pub const TPL_VAT: u64 = 7;
    pub const TPL_LEDGER: u64 = 8;
    pub const TPL_PAYSLIP: u64 = 9;

    pub const CP_ACCOUNTING_MARCH: u64 = 40;
    pub const CP_PAYROLL_MARCH: u64 = 41;
    pub const CP_ACCOUNTING_JUNE: u64 = 42;
    pub const CP_OTHER_CLIENT_JUNE: u64 = 43;

    /// Completed exactly at its 09:00 deadline.
    pub const INST_VAT_COMPLETED: u64 = 100;
    /// No deadline time, completed at 23:59:01.
    pub const INST_LEDGER_LATE: u64 = 101;
    pub const INST_PAYSLIP_OPEN: u64 = 102;
    pub const INST_PAYSLIP_OVERDUE: u64 = 103;
    pub const INST_VAT_DUE_TODAY: u64 = 104;
    pub const INST_LEDGER_DISABLED: u64 = 105;
    pub const INST_VAT_MAY_END: u64 = 200;
    pub const INST_VAT_JUNE_START: u64 = 201;
    pub const INST_LEDGER_JUNE: u64 = 202;
    pub const INST_OTHER_CLIENT_VAT: u64 = 300;

    pub const TODAY: NaiveDate = match NaiveDate::from_ymd_opt(2025, 3, 15) {
        Some(d) => d,
        None => panic!("invalid fixture date"),
    };

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    pub fn user() -> ActingUser {
        ActingUser {
            username: "mgarcia".into(),
            subdepartment: Some("FISC".into()),
        }
    }

    fn template(id: u64, name: &str, valid_until: Option<NaiveDate>) -> MilestoneTemplate {
        MilestoneTemplate {
            id,
            name: name.into(),
            frequency: 1,
            periodicity: PeriodicityUnit::Month,
            valid_from: date(2024, 1, 1),
            valid_until,
            description: None,
            mandatory: true,
        }
    }

    fn process(id: u64, name: &str) -> ProcessTemplate {
        ProcessTemplate {
            id,
            name: name.into(),
            periodicity: PeriodicityUnit::Month,
            frequency: 1,
            enabled: true,
        }
    }

    fn client_process(id: u64, client_id: u64, process: u64, month: u32) -> ClientProcessInstance {
        ClientProcessInstance {
            id,
            client_id,
            process_template_id: process,
            year: 2025,
            month,
            start_date: date(2025, month, 1),
        }
    }

    fn instance(
        id: u64,
        client_process_id: u64,
        template: u64,
        deadline: NaiveDate,
        time: Option<NaiveTime>,
    ) -> MilestoneInstance {
        MilestoneInstance {
            id,
            client_process_id,
            milestone_template_id: template,
            deadline_date: deadline,
            deadline_time: time,
            status: LifecycleStatus::Open,
            status_changed_at: None,
            kind: MilestoneKind::Internal,
            critical: false,
            mandatory: true,
            enabled: true,
        }
    }

    fn completed(mut instance: MilestoneInstance) -> MilestoneInstance {
        instance.status = LifecycleStatus::Completed;
        instance.status_changed_at = Some(Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap());
        instance
    }

    fn completion(instance_id: u64, date: NaiveDate, time: NaiveTime) -> CompletionRecord {
        CompletionRecord {
            instance_id,
            date,
            time: Some(time),
            evidence: None,
        }
    }

    pub fn snapshot() -> Snapshot {
        let mut payslip_open = instance(
            INST_PAYSLIP_OPEN,
            CP_PAYROLL_MARCH,
            TPL_PAYSLIP,
            date(2025, 3, 28),
            Some(time(17, 0, 0)),
        );
        payslip_open.critical = true;

        let mut payslip_overdue = instance(
            INST_PAYSLIP_OVERDUE,
            CP_PAYROLL_MARCH,
            TPL_PAYSLIP,
            date(2025, 3, 5),
            None,
        );
        payslip_overdue.kind = MilestoneKind::Client;

        let mut vat_today = instance(
            INST_VAT_DUE_TODAY,
            CP_ACCOUNTING_MARCH,
            TPL_VAT,
            TODAY,
            None,
        );
        vat_today.kind = MilestoneKind::ThirdParty;

        let mut ledger_disabled = instance(
            INST_LEDGER_DISABLED,
            CP_ACCOUNTING_MARCH,
            TPL_LEDGER,
            date(2025, 3, 20),
            None,
        );
        ledger_disabled.enabled = false;

        Snapshot {
            milestone_templates: vec![
                template(TPL_VAT, "Declaración IVA", None),
                template(TPL_LEDGER, "Cierre libro mayor", Some(date(2026, 12, 31))),
                template(TPL_PAYSLIP, "Recibos de nómina", None),
            ],
            process_templates: vec![
                process(PROC_ACCOUNTING, "Contabilidad"),
                process(PROC_PAYROLL, "Nómina"),
            ],
            process_milestone_links: vec![
                ProcessMilestoneLink {
                    process_template_id: PROC_ACCOUNTING,
                    milestone_template_id: TPL_VAT,
                },
                ProcessMilestoneLink {
                    process_template_id: PROC_ACCOUNTING,
                    milestone_template_id: TPL_LEDGER,
                },
                ProcessMilestoneLink {
                    process_template_id: PROC_PAYROLL,
                    milestone_template_id: TPL_PAYSLIP,
                },
            ],
            client_processes: vec![
                client_process(CP_ACCOUNTING_MARCH, CLIENT, PROC_ACCOUNTING, 3),
                client_process(CP_PAYROLL_MARCH, CLIENT, PROC_PAYROLL, 3),
                client_process(CP_ACCOUNTING_JUNE, CLIENT, PROC_ACCOUNTING, 6),
                client_process(CP_OTHER_CLIENT_JUNE, OTHER_CLIENT, PROC_ACCOUNTING, 6),
            ],
            milestone_instances: vec![
                completed(instance(
                    INST_VAT_COMPLETED,
                    CP_ACCOUNTING_MARCH,
                    TPL_VAT,
                    date(2025, 3, 10),
                    Some(time(9, 0, 0)),
                )),
                completed(instance(
                    INST_LEDGER_LATE,
                    CP_ACCOUNTING_MARCH,
                    TPL_LEDGER,
                    date(2025, 3, 10),
                    None,
                )),
                payslip_open,
                payslip_overdue,
                vat_today,
                ledger_disabled,
                instance(INST_VAT_MAY_END, CP_ACCOUNTING_JUNE, TPL_VAT, date(2025, 5, 31), None),
                instance(INST_VAT_JUNE_START, CP_ACCOUNTING_JUNE, TPL_VAT, date(2025, 6, 1), None),
                instance(INST_LEDGER_JUNE, CP_ACCOUNTING_JUNE, TPL_LEDGER, date(2025, 6, 20), None),
                instance(
                    INST_OTHER_CLIENT_VAT,
                    CP_OTHER_CLIENT_JUNE,
                    TPL_VAT,
                    date(2025, 6, 15),
                    None,
                ),
            ],
            completions: vec![
                completion(INST_VAT_COMPLETED, date(2025, 3, 9), time(12, 0, 0)),
                completion(INST_VAT_COMPLETED, date(2025, 3, 10), time(9, 0, 0)),
                completion(INST_LEDGER_LATE, date(2025, 3, 10), time(23, 59, 1)),
            ],
            audit_records: Vec::new(),
        }
    }

    /// Calendar rows for every instance of [`CLIENT`], across all periods.
    pub fn rows() -> Vec<CalendarRow> {
        let snapshot = snapshot();
        let catalog = Catalog::new(
            snapshot.milestone_templates.clone(),
            snapshot.process_templates.clone(),
            snapshot.process_milestone_links.clone(),
            snapshot.client_processes.clone(),
        );
        snapshot
            .milestone_instances
            .iter()
            .filter(|i| {
                catalog
                    .client_process(i.client_process_id)
                    .is_some_and(|cp| cp.client_id == CLIENT)
            })
            .map(|i| CalendarRow {
                instance: i.clone(),
                client_id: CLIENT,
                process_name: catalog.process_name(i.client_process_id).to_owned(),
                milestone_name: catalog.milestone_name(i.milestone_template_id).to_owned(),
                last_completion: snapshot
                    .completions
                    .iter()
                    .filter(|c| c.instance_id == i.id)
                    .map(CompletionRecord::timestamp)
                    .max(),
            })
            .collect()
    }

    pub fn audit_record(instance_id: u64) -> AuditRecord {
        AuditRecord {
            id: None,
            client_id: CLIENT,
            instance_id,
            milestone_template_id: TPL_PAYSLIP,
            field: AuditField::DeadlineDate,
            previous_value: Some("2025-03-28".into()),
            new_value: Some("2025-04-02".into()),
            username: "mgarcia".into(),
            recorded_at: Utc.with_ymd_and_hms(2025, 3, 15, 10, 0, 0).unwrap(),
            reason: ReasonCode::ClientRequest,
            note: None,
            process_name: "Nómina".into(),
            milestone_name: "Recibos de nómina".into(),
            subdepartment: Some("FISC".into()),
        }
    }

    /// A service for [`CLIENT`] over the fixture snapshot, nothing loaded yet.
    pub fn service() -> CalendarService<InMemoryStore, StaticIdentity> {
        CalendarService::new(
            InMemoryStore::new(snapshot()),
            StaticIdentity::new(user()),
            CLIENT,
        )
    }
}
