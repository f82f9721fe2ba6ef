//! Integration tests for layered configuration loading.
//!
//! Uses figment::Jail for sandboxed cwd and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use hito_config::{ConfigError, HitosConfig};
use pretty_assertions::assert_eq;

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
page_size = 50
default_client_id = 12

[store]
snapshot_path = "/var/lib/hitos/snapshot.json"

[identity]
username = "mgarcia"
subdepartment = "FISC"
"#,
        )?;

        let config: HitosConfig = Figment::from(Serialized::defaults(HitosConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.page_size, 50);
        assert_eq!(config.general.default_client_id, Some(12));
        assert_eq!(config.store.snapshot_path, "/var/lib/hitos/snapshot.json");
        assert_eq!(config.identity.username, "mgarcia");
        assert_eq!(
            config.identity.to_acting_user().subdepartment.as_deref(),
            Some("FISC")
        );
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".hitos")?;
        jail.create_file(
            ".hitos/config.toml",
            r#"
[general]
page_size = 5
"#,
        )?;

        let config = HitosConfig::load().expect("config loads");
        assert_eq!(config.general.page_size, 5);
        assert_eq!(config.store.snapshot_path, ".hitos/snapshot.json");
        Ok(())
    });
}

#[test]
fn env_beats_project_config() {
    Jail::expect_with(|jail| {
        jail.create_dir(".hitos")?;
        jail.create_file(
            ".hitos/config.toml",
            r#"
[identity]
username = "from-toml"
"#,
        )?;
        jail.set_env("HITOS_IDENTITY__USERNAME", "from-env");
        jail.set_env("HITOS_GENERAL__PAGE_SIZE", "7");

        let config = HitosConfig::load().expect("config loads");
        assert_eq!(config.identity.username, "from-env");
        assert_eq!(config.general.page_size, 7);
        Ok(())
    });
}

#[test]
fn zero_page_size_from_env_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("HITOS_GENERAL__PAGE_SIZE", "0");
        let result = HitosConfig::load();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        Ok(())
    });
}
