//! CLI parse and option-merging tests.

use super::{Cli, CliCommand, HttpArgs};
use crate::cli::commands::{build_options, SyncArgs};
use clap::Parser;
use dirmirror_core::config::MirrorConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_sync_defaults() {
    let cli = parse(&["dirmirror", "sync"]);
    assert!(!cli.log_file);
    assert!(cli.config.is_none());
    match cli.command {
        CliCommand::Sync {
            url,
            dest,
            http,
            no_prune,
            dry_run,
            prune_partial,
        } => {
            assert!(url.is_none());
            assert!(dest.is_none());
            assert!(!http.verify_tls);
            assert!(http.connect_timeout.is_none());
            assert!(http.timeout.is_none());
            assert!(!no_prune);
            assert!(!dry_run);
            assert!(!prune_partial);
        }
        _ => panic!("expected Sync"),
    }
}

#[test]
fn cli_parse_sync_positionals_and_flags() {
    let cli = parse(&[
        "dirmirror",
        "sync",
        "https://10.0.0.5/mp3/",
        "/home/mp3",
        "--verify-tls",
        "--timeout",
        "600",
        "--dry-run",
        "--log-file",
    ]);
    assert!(cli.log_file);
    match cli.command {
        CliCommand::Sync {
            url,
            dest,
            http,
            dry_run,
            ..
        } => {
            assert_eq!(url.as_deref(), Some("https://10.0.0.5/mp3/"));
            assert_eq!(dest.as_deref(), Some(Path::new("/home/mp3")));
            assert!(http.verify_tls);
            assert_eq!(http.timeout, Some(600));
            assert!(dry_run);
        }
        _ => panic!("expected Sync"),
    }
}

#[test]
fn cli_parse_global_config_after_subcommand() {
    let cli = parse(&["dirmirror", "sync", "--config", "/etc/dirmirror.toml", "--no-prune"]);
    assert_eq!(cli.config.as_deref(), Some(Path::new("/etc/dirmirror.toml")));
    match cli.command {
        CliCommand::Sync { no_prune, .. } => assert!(no_prune),
        _ => panic!("expected Sync"),
    }
}

#[test]
fn cli_parse_list() {
    match parse(&["dirmirror", "list", "http://host/pub/", "--connect-timeout", "5"]).command {
        CliCommand::List { url, http } => {
            assert_eq!(url, "http://host/pub/");
            assert_eq!(http.connect_timeout, Some(5));
        }
        _ => panic!("expected List"),
    }
}

#[test]
fn cli_parse_list_requires_url() {
    assert!(Cli::try_parse_from(["dirmirror", "list"]).is_err());
}

#[test]
fn http_args_override_config() {
    let mut cfg = MirrorConfig::default().http;
    HttpArgs {
        verify_tls: true,
        connect_timeout: Some(3),
        timeout: None,
    }
    .apply(&mut cfg);
    assert!(!cfg.accept_invalid_certs);
    assert_eq!(cfg.connect_timeout_secs, Some(3));
    assert!(cfg.timeout_secs.is_none());
}

#[test]
fn build_options_prefers_arguments() {
    let mut cfg = MirrorConfig::default();
    cfg.remote_url = Some("https://config.example/mp3/".to_string());
    cfg.local_root = Some(PathBuf::from("/from/config"));
    cfg.http.timeout_secs = Some(60);

    let opts = build_options(
        &cfg,
        SyncArgs {
            url: Some("https://cli.example/".to_string()),
            prune_partial: true,
            dry_run: true,
            ..SyncArgs::default()
        },
    )
    .unwrap();
    assert_eq!(opts.remote_url, "https://cli.example/");
    assert_eq!(opts.local_root, PathBuf::from("/from/config"));
    assert_eq!(opts.http.timeout, Some(Duration::from_secs(60)));
    assert!(opts.http.accept_invalid_certs);
    assert!(opts.prune.enabled);
    assert!(opts.prune.after_partial_sync);
    assert!(opts.prune.dry_run);
}

#[test]
fn build_options_needs_url_and_dest() {
    let cfg = MirrorConfig::default();
    assert!(build_options(&cfg, SyncArgs::default()).is_err());

    let only_url = SyncArgs {
        url: Some("https://cli.example/".to_string()),
        ..SyncArgs::default()
    };
    assert!(build_options(&cfg, only_url).is_err());
}

#[test]
fn build_options_no_prune() {
    let cfg = MirrorConfig::default();
    let opts = build_options(
        &cfg,
        SyncArgs {
            url: Some("https://cli.example/".to_string()),
            dest: Some(PathBuf::from("/tmp/m")),
            no_prune: true,
            ..SyncArgs::default()
        },
    )
    .unwrap();
    assert!(!opts.prune.enabled);
}
