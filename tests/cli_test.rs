//! Command line parsing and dispatch.

use clap::Parser;
use tempfile::TempDir;

use idnconv::cli::args::{Cli, Commands, ConfigCommands};
use idnconv::cli::commands::execute_command;
use idnconv::exitcode;
use idnconv::util::testing;

fn run(dir: &TempDir, args: &[&str]) -> i32 {
    testing::init_test_setup();
    let dir = dir.path().to_str().expect("utf-8 temp path");
    let prefix = ["idnconv", "-C", dir];
    let argv = prefix.iter().chain(args).copied();
    let cli = Cli::try_parse_from(argv).expect("valid arguments");
    execute_command(&cli).expect("command succeeds")
}

#[test]
fn given_valid_domains_when_to_ascii_then_exit_ok() {
    let dir = TempDir::new().unwrap();
    assert_eq!(run(&dir, &["to-ascii", "bücher.de", "example.com"]), exitcode::OK);
}

#[test]
fn given_invalid_domain_when_to_ascii_then_exit_invalid() {
    let dir = TempDir::new().unwrap();
    assert_eq!(run(&dir, &["to-ascii", "--", "-abc.de"]), exitcode::INVALID);
}

#[test]
fn given_relaxing_flag_when_to_ascii_then_exit_ok() {
    let dir = TempDir::new().unwrap();
    assert_eq!(
        run(&dir, &["to-ascii", "--no-check-hyphens", "--", "-abc.de"]),
        exitcode::OK
    );
}

#[test]
fn given_local_config_when_to_unicode_then_config_applies() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".idnconv.toml"),
        "[idna]\ncheck_hyphens = false\n",
    )
    .unwrap();
    assert_eq!(run(&dir, &["--json", "to-unicode", "--", "-abc.de"]), exitcode::OK);
}

#[test]
fn given_config_subcommands_when_run_then_exit_ok() {
    let dir = TempDir::new().unwrap();
    assert_eq!(run(&dir, &["config", "template"]), exitcode::OK);
    assert_eq!(run(&dir, &["config", "path"]), exitcode::OK);
}

#[test]
fn given_config_show_when_parsing_then_subcommand_selected() {
    let cli = Cli::try_parse_from(["idnconv", "config", "show"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Config {
            command: ConfigCommands::Show
        }
    ));
}

#[test]
fn given_unknown_flag_when_parsing_then_rejected() {
    assert!(Cli::try_parse_from(["idnconv", "to-ascii", "--bogus"]).is_err());
}
