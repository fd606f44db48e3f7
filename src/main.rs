// ==========================================
// 备件查询工具 - 命令行主入口
// ==========================================
// 默认进入交互式 shell; 子命令用于脚本化的一次性操作
// ==========================================

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use spare_parts_finder::app::{
    render_lines, render_records, render_totals, AddOutcome, FsMasterStore, Shell, StockSession,
};
use spare_parts_finder::config::{config_keys, AppConfig};
use spare_parts_finder::i18n::{self, t_with_args};
use spare_parts_finder::{logging, ViewMode};
use std::path::PathBuf;
use tracing::info;

/// Spare parts stock search and request list tool.
#[derive(Parser, Debug)]
#[command(name = "spare-parts-finder", version, about)]
struct Cli {
    /// JSON config file
    #[arg(short = 'c', long = "config", global = true, env = config_keys::ENV_CONFIG_FILE)]
    config: Option<PathBuf>,

    /// Master stock file (overrides config)
    #[arg(short = 'm', long = "master-file", global = true)]
    master_file: Option<PathBuf>,

    /// UI language: en | zh-CN
    #[arg(long = "lang", global = true)]
    lang: Option<String>,

    /// Emit logs as JSON
    #[arg(long = "log-json", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive shell (default)
    Shell,

    /// Filter the master stock file and print the matches
    Search {
        query: String,

        /// Layout: compact | table
        #[arg(long, default_value = "compact")]
        view: ViewMode,
    },

    /// Build a request list from queries and export it (.xlsx or .csv)
    Export {
        /// Output file
        output: PathBuf,

        /// Query to add, optionally with a quantity: "M100 - Blade=4"
        #[arg(short = 'i', long = "item", required = true)]
        items: Vec<String>,
    },

    /// Replace the master stock file (admin)
    Replace {
        /// Replacement spreadsheet
        file: PathBuf,

        #[arg(long, env = config_keys::ENV_ADMIN_PASSWORD, hide_env_values = true)]
        password: String,
    },

    /// Show the loaded master stock file
    Info,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_json);

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(master_file) = cli.master_file {
        config.master_file = master_file;
    }
    if let Some(lang) = cli.lang {
        config.locale = lang;
    }
    i18n::set_locale(&config.locale);

    info!(
        app = spare_parts_finder::APP_NAME,
        version = spare_parts_finder::VERSION,
        master_file = %config.master_file.display(),
        "启动"
    );

    let store = FsMasterStore::new(config.master_file.clone());
    let mut session = StockSession::new(config, store);

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            let mut shell = Shell::new(session);
            println!("{}", shell.startup().await);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            shell.run(stdin, tokio::io::stdout()).await?;
        }
        Command::Search { query, view } => {
            require_master(&mut session).await?;
            let result = session.search(&query)?;
            println!("{}", render_records(&result.matches, view));
            if let Some(qty) = result.available_quantity {
                println!("{}", t_with_args("search.available", &[("qty", &qty.to_string())]));
            }
        }
        Command::Export { output, items } => {
            require_master(&mut session).await?;
            for item in &items {
                let (query, qty) = split_item(item);
                match session.add_to_list(query)? {
                    AddOutcome::Added { .. } => {
                        if let Some(qty) = qty {
                            let last = session.lines().len() - 1;
                            session.set_quantity(last, qty)?;
                        }
                    }
                    AddOutcome::NoMatch { query } => bail!("no record found for '{}'", query),
                    AddOutcome::Ambiguous { candidates } => bail!(
                        "'{}' matches {} records; narrow it with \"model - description\"",
                        query,
                        candidates.len()
                    ),
                }
            }
            session
                .export_to_path(&output)
                .with_context(|| format!("failed to export {}", output.display()))?;
            println!("{}", render_lines(session.lines(), ViewMode::Table));
            println!("{}", render_totals(&session.totals()));
        }
        Command::Replace { file, password } => {
            let file_name = file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            let info = session.replace_master(&password, &file_name, &bytes).await?;
            println!(
                "{}",
                t_with_args("master.replaced", &[("rows", &info.total_rows.to_string())])
            );
        }
        Command::Info => {
            require_master(&mut session).await?;
            if let Some(info) = session.master_info() {
                println!("{}", serde_json::to_string_pretty(info)?);
            }
        }
    }

    Ok(())
}

async fn require_master(session: &mut StockSession<FsMasterStore>) -> anyhow::Result<()> {
    if !session.load_master().await? {
        bail!(
            "master stock file not found: {}",
            session.config().master_file.display()
        );
    }
    Ok(())
}

/// "查询=数量" → (查询, 数量); 数量部分不是整数时整体视为查询
fn split_item(item: &str) -> (&str, Option<i64>) {
    match item.rsplit_once('=') {
        Some((query, qty)) => match qty.trim().parse::<i64>() {
            Ok(qty) => (query.trim(), Some(qty)),
            Err(_) => (item.trim(), None),
        },
        None => (item.trim(), None),
    }
}
