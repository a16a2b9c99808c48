use clap::Parser;
use ssl_checker::cli::{Cli, Commands};
use ssl_checker::config::Settings;
use std::path::PathBuf;

#[test]
fn test_defaults_leave_settings_untouched() {
    let cli = Cli::try_parse_from(["ssl-checker"]).unwrap();
    let mut settings = Settings::default();
    cli.apply_to(&mut settings);

    assert!(cli.command.is_none());
    assert_eq!(settings.timeout, 10);
    assert!(!settings.silent);
    assert_eq!(settings.report, PathBuf::from("./report.md"));
}

#[test]
fn test_flags_override_settings() {
    let cli = Cli::try_parse_from([
        "ssl-checker",
        "-s",
        "-d",
        "-t",
        "3",
        "-o",
        "out.md",
        "--concurrency",
        "16",
    ])
    .unwrap();
    let mut settings = Settings::default();
    cli.apply_to(&mut settings);

    assert!(settings.silent);
    assert!(settings.debug);
    assert_eq!(settings.timeout, 3);
    assert_eq!(settings.report, PathBuf::from("out.md"));
    assert_eq!(settings.concurrency_limit(), Some(16));
}

#[test]
fn test_environment_filter() {
    let cli = Cli::try_parse_from(["ssl-checker", "-e", "prod, staging"]).unwrap();
    assert_eq!(
        cli.environment_filter(),
        Some(vec!["prod".to_string(), "staging".to_string()])
    );

    let cli = Cli::try_parse_from(["ssl-checker"]).unwrap();
    assert_eq!(cli.environment_filter(), None);
}

#[test]
fn test_subcommands() {
    let cli = Cli::try_parse_from(["ssl-checker", "domains", "a.example,b.example"]).unwrap();
    assert_eq!(
        cli.command,
        Some(Commands::Domains {
            list: "a.example,b.example".to_string()
        })
    );

    let cli = Cli::try_parse_from(["ssl-checker", "files", "prod.txt", "-s"]).unwrap();
    assert!(cli.silent);
    assert!(matches!(cli.command, Some(Commands::Files { .. })));

    let cli = Cli::try_parse_from(["ssl-checker", "environments"]).unwrap();
    assert_eq!(cli.command, Some(Commands::Environments));
}

#[test]
fn test_subcommand_requires_list() {
    assert!(Cli::try_parse_from(["ssl-checker", "domains"]).is_err());
}
