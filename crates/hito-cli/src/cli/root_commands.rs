use clap::{ArgGroup, Args, Subcommand, ValueEnum};
use hito_engine::pipeline::SortKey;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List the calendar of a period, filtered, sorted and paginated.
    List(ListArgs),
    /// Count a period's milestones per compliance status.
    Summary(PeriodArgs),
    /// List the periods the client has processes in.
    Periods,
    /// Milestone templates a process template expands into, valid on --today.
    Templates(TemplatesArgs),
    /// Change the deadline date or time of a milestone instance.
    Reschedule(RescheduleArgs),
    /// Save a milestone instance without changes, leaving an audit record.
    Touch(TouchArgs),
    /// Disable milestone templates for the client from a cutoff date on.
    Disable(DisableArgs),
    /// Re-enable a single milestone instance.
    Enable(EnableArgs),
    /// Completion history of a milestone instance.
    History(HistoryArgs),
    /// Audit trail of the client.
    Audit,
}

/// Period selection shared by commands that load a calendar.
#[derive(Clone, Debug, Args)]
pub struct PeriodArgs {
    /// Period as YYYY-MM (defaults to the period of --today)
    #[arg(long)]
    pub period: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SortArg {
    Process,
    Milestone,
    Status,
    DeadlineDate,
    DeadlineTime,
    StatusChanged,
    Kind,
}

impl From<SortArg> for SortKey {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Process => Self::ProcessName,
            SortArg::Milestone => Self::MilestoneName,
            SortArg::Status => Self::Status,
            SortArg::DeadlineDate => Self::DeadlineDate,
            SortArg::DeadlineTime => Self::DeadlineTime,
            SortArg::StatusChanged => Self::StatusChangedAt,
            SortArg::Kind => Self::Kind,
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub period: PeriodArgs,
    /// Text to find in process or milestone names (accents and case ignored)
    #[arg(long)]
    pub search: Option<String>,
    /// Milestone template id
    #[arg(long)]
    pub template: Option<u64>,
    /// Exact process name (accents and case ignored)
    #[arg(long)]
    pub process: Option<String>,
    /// Compliance statuses to keep, e.g. overdue,due-today
    #[arg(long, value_delimiter = ',')]
    pub status: Vec<String>,
    /// Milestone kinds to keep: internal, client, third-party
    #[arg(long, value_delimiter = ',')]
    pub kind: Vec<String>,
    /// Earliest deadline date, inclusive
    #[arg(long)]
    pub from: Option<String>,
    /// Latest deadline date, inclusive
    #[arg(long)]
    pub to: Option<String>,
    #[arg(long, value_enum, default_value = "deadline-date")]
    pub sort: SortArg,
    /// Sort descending
    #[arg(long)]
    pub desc: bool,
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    /// Rows per page (defaults to general.page_size)
    #[arg(long)]
    pub page_size: Option<usize>,
}

#[derive(Clone, Debug, Args)]
#[command(group(
    ArgGroup::new("change")
        .required(true)
        .multiple(true)
        .args(["date", "time", "clear_time"])
))]
pub struct RescheduleArgs {
    /// Milestone instance id
    pub id: u64,
    #[command(flatten)]
    pub period: PeriodArgs,
    /// New deadline date, YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,
    /// New deadline time, HH:MM
    #[arg(long, conflicts_with = "clear_time")]
    pub time: Option<String>,
    /// Remove the deadline time (the deadline becomes end of day)
    #[arg(long)]
    pub clear_time: bool,
    /// Reason code: 1 client request, 2 regulatory change, 3 internal reschedule, 4 data correction, 5 other
    #[arg(long)]
    pub reason: Option<u8>,
    /// Free-text note stored with the audit records
    #[arg(long)]
    pub note: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct TouchArgs {
    /// Milestone instance id
    pub id: u64,
    #[command(flatten)]
    pub period: PeriodArgs,
    /// Reason code (see `hitos reschedule --help`)
    #[arg(long)]
    pub reason: Option<u8>,
    #[arg(long)]
    pub note: Option<String>,
}

#[derive(Clone, Debug, Args)]
#[command(group(
    ArgGroup::new("selection")
        .required(true)
        .args(["template", "process"])
))]
pub struct DisableArgs {
    /// Milestone template ids
    #[arg(long, value_delimiter = ',')]
    pub template: Vec<u64>,
    /// Client-process instance ids; their templates are disabled client-wide
    #[arg(long, value_delimiter = ',')]
    pub process: Vec<u64>,
    /// Cutoff date, inclusive: deadlines on or after it are disabled
    #[arg(long)]
    pub from: String,
    #[command(flatten)]
    pub period: PeriodArgs,
}

#[derive(Clone, Debug, Args)]
pub struct EnableArgs {
    /// Milestone instance id
    pub id: u64,
    #[command(flatten)]
    pub period: PeriodArgs,
}

#[derive(Clone, Debug, Args)]
pub struct TemplatesArgs {
    /// Process template id
    pub process: u64,
}

#[derive(Clone, Debug, Args)]
pub struct HistoryArgs {
    /// Milestone instance id
    pub id: u64,
    /// Max completion records to return
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}
