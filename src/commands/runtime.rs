use crate::cli::{Cli, Commands};
use crate::domain::models::PackageReport;
use crate::services::fetch::{fetch_all, PackageClient};
use crate::services::output::{print_one, print_out, print_value};
use crate::services::path::{assign, resolve, split_path};
use crate::services::period::current_period_key;
use crate::services::stats::{ensure_and_load, merge_package, save};
use crate::services::storage::{audit, load_or_init_config, save_document};
use serde_json::Value;

pub fn handle_runtime_commands(cli: &Cli) -> anyhow::Result<()> {
    let mut config = load_or_init_config(&cli.config)?;

    match cli.command.clone().unwrap_or_default() {
        Commands::Update {
            package,
            concurrency,
        } => {
            let reports = run_update(cli, &config, package.as_deref(), concurrency)?;
            print_out(cli.json, &reports, |r| format!("{}\t{}", r.name, r.status))?;
        }
        Commands::Get { path } => {
            let segments = split_path(&path);
            print_value(cli.json, resolve(&config, &segments))?;
        }
        Commands::Set { path, value } => {
            let segments = split_path(&path);
            assign(&mut config, &segments, &value)?;
            save_document(&cli.config, &config)?;
            audit("set", serde_json::json!({"path": path}));
            print_one(cli.json, &path, |p| format!("set {}", p))?;
        }
    }

    Ok(())
}

/// Package names from `config.packages`, in config order. An absent or
/// empty list is a successful no-op; a `packages` value that is not an
/// array is a config error. Entries without a string `name` are skipped
/// with a notice.
fn configured_packages(config: &Value, only: Option<&str>) -> anyhow::Result<Vec<String>> {
    let entries = match config.get("packages") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(_) => anyhow::bail!("config `packages` must be an array"),
    };
    let mut names = Vec::new();
    for entry in entries {
        match entry.get("name").and_then(Value::as_str) {
            Some(name) => {
                if only.map(|o| o != name).unwrap_or(false) {
                    continue;
                }
                names.push(name.to_string());
            }
            None => eprintln!("notice: skipping package entry without a name: {}", entry),
        }
    }
    Ok(names)
}

fn run_update(
    cli: &Cli,
    config: &Value,
    only: Option<&str>,
    concurrency: usize,
) -> anyhow::Result<Vec<PackageReport>> {
    let names = configured_packages(config, only)?;
    let period = current_period_key();
    let mut stats = ensure_and_load(&cli.stats_dir, &period)?;

    let client = PackageClient::new(&cli.registry, &cli.downloads_api)?;
    let results = fetch_all(&client, &names, concurrency);

    let mut reports = Vec::new();
    for (name, result) in results {
        match result {
            Ok(info) => {
                reports.push(PackageReport {
                    name: name.clone(),
                    status: "updated".to_string(),
                    version: info.version.clone(),
                    monthly_downloads: info.monthly_downloads,
                });
                merge_package(&mut stats, info);
            }
            Err(e) => {
                eprintln!("notice: {}", e);
                reports.push(PackageReport {
                    name,
                    status: "failed".to_string(),
                    version: None,
                    monthly_downloads: None,
                });
            }
        }
    }

    // One write per invocation, after every fetch has settled.
    save(&cli.stats_dir, &period, &stats)?;
    audit(
        "update",
        serde_json::json!({
            "period": period,
            "updated": reports.iter().filter(|r| r.status == "updated").count(),
            "failed": reports.iter().filter(|r| r.status == "failed").count(),
        }),
    );
    Ok(reports)
}
