use std::path::PathBuf;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use hito_config::HitosConfig;
use hito_core::calendar::Period;
use hito_engine::CalendarService;
use hito_engine::memory::{InMemoryStore, Snapshot};
use hito_engine::store::StaticIdentity;

use crate::cli::GlobalFlags;

pub type Service = CalendarService<InMemoryStore, StaticIdentity>;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: Service,
    pub config: HitosConfig,
    pub snapshot_path: PathBuf,
    pub today: NaiveDate,
}

impl AppContext {
    /// Read the snapshot and build the calendar service for the selected client.
    pub fn init(flags: &GlobalFlags, config: HitosConfig) -> anyhow::Result<Self> {
        let client_id = flags
            .client
            .or(config.general.default_client_id)
            .context("no client selected: pass --client or set general.default_client_id")?;

        let snapshot_path = flags
            .snapshot
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.store.snapshot_path));
        if !snapshot_path.exists() {
            tracing::warn!(
                "Snapshot {} does not exist; starting from an empty store",
                snapshot_path.display()
            );
        }
        let snapshot = Snapshot::read_from(&snapshot_path)
            .with_context(|| format!("failed to read snapshot {}", snapshot_path.display()))?;

        let identity = StaticIdentity::new(config.identity.to_acting_user());
        let service = CalendarService::new(InMemoryStore::new(snapshot), identity, client_id);

        Ok(Self {
            service,
            config,
            snapshot_path,
            today: flags.today.unwrap_or_else(|| Utc::now().date_naive()),
        })
    }

    /// Load a period, defaulting to the one `today` falls in.
    pub async fn load(&mut self, period: Option<Period>) -> Period {
        let period = period.unwrap_or_else(|| Period::of(self.today));
        self.service.load_period(period).await;
        tracing::debug!(
            "Loaded {} row(s) of client {} for {}",
            self.service.rows().len(),
            self.service.client_id(),
            period
        );
        period
    }

    /// Write the store back to the snapshot file.
    pub async fn save(&self) -> anyhow::Result<()> {
        self.service
            .store()
            .snapshot()
            .await
            .write_to(&self.snapshot_path)
            .with_context(|| format!("failed to write snapshot {}", self.snapshot_path.display()))
    }

    /// Commands that leave audit records need a named user.
    pub fn require_identity(&self) -> anyhow::Result<()> {
        if self.config.identity.is_configured() {
            Ok(())
        } else {
            anyhow::bail!(
                "no acting user configured: set identity.username or HITOS_IDENTITY__USERNAME"
            )
        }
    }
}
