//! Library integration tests.

use std::fs;

use tempfile::TempDir;
use upgate::UpgateError;

#[test]
fn error_types_are_public() {
    let err = UpgateError::ClusterNotFound {
        cluster: "c9".into(),
    };
    assert!(err.to_string().contains("c9"));
    assert!(err.is_structural());

    let err = UpgateError::StoreUnavailable {
        message: "timeout".into(),
    };
    assert!(!err.is_structural());
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> upgate::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use upgate::checks::UpgradeType;
    use upgate::cli::{Cli, Commands};

    let cli = Cli::parse_from([
        "upgate",
        "check",
        "--cluster",
        "c1",
        "--stack",
        "HDP-2.6",
        "--version",
        "2.6.4.0-91",
        "--upgrade-type",
        "host-ordered",
        "--skip",
        "a,b",
    ]);

    if let Commands::Check(args) = cli.command {
        assert_eq!(args.cluster, "c1");
        assert_eq!(args.stack.to_string(), "HDP-2.6");
        assert_eq!(args.target_version, "2.6.4.0-91");
        assert_eq!(args.upgrade_type, UpgradeType::HostOrdered);
        assert_eq!(args.skip, vec!["a", "b"]);
    } else {
        panic!("Expected Check command");
    }
}

#[test]
fn config_layers_merge() {
    use upgate::config::{load_merged_config, ConfigPaths, CONFIG_DIR};
    use upgate::output::OutputFormat;

    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    fs::create_dir_all(home.path().join(CONFIG_DIR)).unwrap();
    fs::create_dir_all(project.path().join(CONFIG_DIR)).unwrap();
    fs::write(
        home.path().join(CONFIG_DIR).join("config.yml"),
        "settings:\n  default_format: json\n  max_parallel: 2\n",
    )
    .unwrap();
    fs::write(
        project.path().join(CONFIG_DIR).join("config.yml"),
        "settings:\n  max_parallel: 6\nchecks:\n  skip: [install-packages]\n",
    )
    .unwrap();
    fs::write(
        project.path().join(CONFIG_DIR).join("config.local.yml"),
        "settings:\n  strict: true\n",
    )
    .unwrap();

    let paths = ConfigPaths::discover_with_home(project.path(), Some(home.path()));
    let config = load_merged_config(&paths, project.path()).unwrap();

    assert_eq!(config.settings.default_format, OutputFormat::Json);
    assert_eq!(config.settings.max_parallel, 6);
    assert!(config.settings.strict);
    assert_eq!(config.checks.skip, vec!["install-packages"]);
}

#[test]
fn invalid_config_is_rejected() {
    use upgate::config::load_config_file;

    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.yml");
    fs::write(&path, "settings:\n  max_parallel: 0\n").unwrap();

    let err = load_config_file(&path).unwrap_err();
    assert!(matches!(err, UpgateError::ConfigValidationError { .. }));
    assert!(err.to_string().contains("max_parallel"));
}

#[test]
fn fleet_state_loads_from_yaml() {
    use upgate::model::{HostVersionState, StackId};
    use upgate::store::{FleetSnapshot, TopologyProvider, VersionStore};

    let temp = TempDir::new().unwrap();
    let path = temp.path().join("fleet.yml");
    fs::write(
        &path,
        r#"
clusters:
  c1:
    id: 7
    hosts:
      h1: {}
      h2: { maintenance: ON }
repository_versions:
  - stack: HDP-2.6
    version: 2.6.4.0-91
host_versions:
  - { cluster: c1, host: h1, stack: HDP-2.6, version: 2.6.4.0-91, state: INSTALLED }
"#,
    )
    .unwrap();

    let snapshot = FleetSnapshot::load(&path).unwrap();
    let stack = StackId::new("HDP", "2.6");

    assert_eq!(snapshot.cluster("c1").unwrap().unwrap().id, 7);
    let hosts = snapshot.hosts_for_cluster("c1").unwrap();
    assert!(hosts["h2"].maintenance_state(7).is_on());
    assert!(!hosts["h1"].maintenance_state(7).is_on());

    let repo = snapshot
        .find_repository_version(&stack, "2.6.4.0-91")
        .unwrap()
        .unwrap();
    assert!(repo.id.is_some());

    let record = snapshot
        .find_host_version("c1", &stack, "2.6.4.0-91", "h1")
        .unwrap()
        .unwrap();
    assert_eq!(record.state, HostVersionState::Installed);
    assert!(snapshot
        .find_host_version("c1", &stack, "2.6.4.0-91", "h2")
        .unwrap()
        .is_none());
}

#[test]
fn report_renders_in_both_formats() {
    use std::sync::Arc;
    use upgate::checks::{CancelToken, CheckRegistry, CheckRequest, CheckRunner};
    use upgate::model::{MaintenanceState, RepositoryVersion, StackId};
    use upgate::output::{render, OutputFormat};
    use upgate::store::FleetSnapshot;

    let snapshot = Arc::new(
        FleetSnapshot::new()
            .with_cluster("c1", 1)
            .with_host("c1", "h1", MaintenanceState::Off),
    );
    let registry = CheckRegistry::with_builtins(snapshot.clone(), snapshot.clone());
    let request = CheckRequest::new(
        "c1",
        RepositoryVersion::new(StackId::new("HDP", "2.6"), "2.6.4.0-91"),
    );
    let report = CheckRunner::new(snapshot)
        .run(&registry, &request, &CancelToken::new())
        .unwrap();

    let human = render(&report, OutputFormat::Human, false).unwrap();
    assert!(human.contains("Verdict: FAIL"));
    assert!(human.contains("hosts-repository-version [FAIL]"));

    let json: serde_json::Value =
        serde_json::from_str(&render(&report, OutputFormat::Json, false).unwrap()).unwrap();
    assert_eq!(json["verdict"], "FAIL");
    assert_eq!(json["cluster"], "c1");
}
