use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).expect("expected valid cli args")
}

#[test]
fn parses_ingest_with_view_flags() {
    let cli = parse(&[
        "brandpulse-cli",
        "ingest",
        "report.csv",
        "--search",
        "shoes",
        "--sort",
        "Cost",
        "--desc",
        "--limit",
        "10",
    ]);

    match cli.command {
        Commands::Ingest { file, view } => {
            assert_eq!(file, PathBuf::from("report.csv"));
            assert_eq!(view.search.as_deref(), Some("shoes"));
            assert_eq!(view.sort.as_deref(), Some("Cost"));
            assert!(view.desc);
            assert_eq!(view.limit, 10);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn desc_requires_sort() {
    let result = Cli::try_parse_from(["brandpulse-cli", "ingest", "report.csv", "--desc"]);
    assert!(result.is_err());
}

#[test]
fn parses_geo_command() {
    let cli = parse(&[
        "brandpulse-cli",
        "geo",
        "--brand",
        "Acme",
        "--keyword",
        "wireless earbuds",
        "--save",
    ]);

    assert!(matches!(
        cli.command,
        Commands::Geo { ref brand, ref keyword, kb: None, save: true }
            if brand == "Acme" && keyword == "wireless earbuds"
    ));
}

#[test]
fn geo_requires_keyword() {
    let result = Cli::try_parse_from(["brandpulse-cli", "geo", "--brand", "Acme"]);
    assert!(result.is_err());
}

#[test]
fn parses_repeated_keywords() {
    let cli = parse(&[
        "brandpulse-cli",
        "sem",
        "keywords",
        "--product",
        "running shoes",
        "--keyword",
        "trail shoes",
        "--keyword",
        "marathon shoes",
    ]);

    match cli.command {
        Commands::Sem {
            command: SemCommands::Keywords { keywords, .. },
        } => assert_eq!(keywords, vec!["trail shoes", "marathon shoes"]),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parses_diagnose_command() {
    let cli = parse(&["brandpulse-cli", "sem", "diagnose", "export.csv", "--kb", "acme"]);

    assert!(matches!(
        cli.command,
        Commands::Sem {
            command: SemCommands::Diagnose { ref kb, save: false, .. }
        } if kb.as_deref() == Some("acme")
    ));
}

#[test]
fn kb_delete_takes_uuid() {
    let id = "6f1c2a4e-0b7d-4a4b-9a53-3f3c1e2d4b5a";
    let cli = parse(&["brandpulse-cli", "kb", "delete", "--category", "acme", id]);

    match cli.command {
        Commands::Kb {
            command: KbCommands::Delete { category, id: parsed },
        } => {
            assert_eq!(category, "acme");
            assert_eq!(parsed.to_string(), id);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn kb_delete_rejects_malformed_id() {
    let result = Cli::try_parse_from([
        "brandpulse-cli",
        "kb",
        "delete",
        "--category",
        "acme",
        "not-a-uuid",
    ]);
    assert!(result.is_err());
}

#[test]
fn history_list_defaults_limit() {
    let cli = parse(&["brandpulse-cli", "history", "list"]);

    assert!(matches!(
        cli.command,
        Commands::History {
            command: HistoryCommands::List {
                category: None,
                limit: 20
            }
        }
    ));
}

#[test]
fn parses_config_set() {
    let cli = parse(&["brandpulse-cli", "config", "set", "industry", "audio", "Audio"]);

    assert!(matches!(
        cli.command,
        Commands::Config {
            command: ConfigCommands::Set { ref category, ref key, ref value }
        } if category == "industry" && key == "audio" && value == "Audio"
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli = parse(&["brandpulse-cli", "db", "migrate"]);

    assert!(matches!(
        cli.command,
        Commands::Db {
            command: DbCommands::Migrate
        }
    ));
}

#[test]
fn missing_command_is_an_error() {
    assert!(Cli::try_parse_from(["brandpulse-cli"]).is_err());
}
