//! Command line surface.
//!
//! Without a subcommand the interactive roles screen opens. The other
//! subcommands run one controller action against the directory, print the
//! result and exit.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use parking_lot::Mutex;

use crate::config::Config;
use crate::controller::{ControllerParts, RoleListController};
use crate::directory::{HttpRoleDirectory, RoleDirectory};
use crate::export::CsvExportSink;
use crate::handoff::{EditorSeed, HandoffSlot, Navigator, Route};
use crate::roles::{PageQuery, PageSize, RoleId};
use crate::ui::roles::{ActionKind, RoleListState, COLUMNS};

/// Table columns that carry data; actions only exist on screen.
const TEXT_COLUMNS: [&str; 3] = [COLUMNS[0], COLUMNS[1], COLUMNS[2]];

#[derive(Debug, Parser)]
#[command(name = "role-console", version, about = "Browse and manage user roles")]
pub struct Cli {
    /// Path to the config file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the role service base URL
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Print one page of roles
    List {
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Rows per page: 10, 20 or 25
        #[arg(long, value_parser = parse_page_size)]
        size: Option<PageSize>,

        /// Only roles whose name matches this text
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Fetch one role as the editor would receive it
    Show { id: RoleId },
    /// Delete a role and print the refreshed first page
    Delete { id: RoleId },
    /// Export every role matching the search to a CSV sheet
    Export {
        #[arg(long, default_value = "")]
        search: String,

        /// Directory to write into (defaults to the configured one)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Open the interactive roles screen
    Browse,
}

fn parse_page_size(raw: &str) -> Result<PageSize, String> {
    let value: u32 = raw
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    PageSize::try_from(value).map_err(|e| e.to_string())
}

impl Cli {
    /// Load the config file and apply command line overrides.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
        .context("Failed to load config")?;

        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

/// Remembers the last route requested by the controller.
#[derive(Default)]
struct LastRoute(Mutex<Option<Route>>);

impl Navigator for LastRoute {
    fn navigate(&self, route: Route) {
        *self.0.lock() = Some(route);
    }
}

fn headless_controller(
    config: &Config,
    directory: Arc<dyn RoleDirectory>,
    navigator: Arc<dyn Navigator>,
    export_dir: PathBuf,
    query: PageQuery,
) -> RoleListController {
    RoleListController::new(
        ControllerParts {
            directory,
            navigator,
            exporter: Arc::new(CsvExportSink::new(export_dir)),
            handoff: HandoffSlot::new(),
            export_name: config.export.base_name.clone(),
        },
        query,
    )
}

fn fail_on_recorded_failure(state: &RoleListState) -> Result<()> {
    match &state.last_failure {
        Some(failure) => Err(anyhow!("{} failed: {}", failure.action.label(), failure.message)),
        None => Ok(()),
    }
}

/// Render one page as a plain text table with a pagination line.
pub fn format_table(state: &RoleListState) -> String {
    let rows: Vec<[String; 3]> = state
        .items
        .iter()
        .map(|role| [role.id.to_string(), role.name.clone(), role.status.to_string()])
        .collect();

    let mut widths = TEXT_COLUMNS.map(|c| c.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 3]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(TEXT_COLUMNS));
    out.push('\n');
    for row in &rows {
        out.push_str(&line([&row[0], &row[1], &row[2]]));
        out.push('\n');
    }
    if rows.is_empty() {
        out.push_str("(no roles)\n");
    }
    out.push_str(&format!(
        "Page {} | {} per page | {}\n",
        state.query.page_number(),
        state.query.page_size.get(),
        state.range_label()
    ));
    out
}

/// Execute the parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    let directory: Arc<dyn RoleDirectory> =
        Arc::new(HttpRoleDirectory::new(&config.api).context("Failed to build HTTP client")?);
    let default_export_dir = PathBuf::from(&config.export.directory);

    match cli.command.unwrap_or(Command::Browse) {
        Command::Browse => {
            crate::ui::run(&config, directory).await?;
        }
        Command::List { page, size, search } => {
            let query = PageQuery::new(size.unwrap_or(config.view.default_page_size))
                .with_search_text(search)
                .with_page_index(page - 1);
            let controller = headless_controller(
                &config,
                directory,
                Arc::new(LastRoute::default()),
                default_export_dir,
                query,
            );
            controller.refresh().await;
            let state = controller.snapshot();
            fail_on_recorded_failure(&state)?;
            print!("{}", format_table(&state));
        }
        Command::Show { id } => {
            let navigator = Arc::new(LastRoute::default());
            let controller = headless_controller(
                &config,
                directory,
                navigator.clone(),
                default_export_dir,
                PageQuery::new(config.view.default_page_size),
            );
            controller.edit(id).await?;

            let route = navigator.0.lock().take();
            let Some(Route::RoleEditor { ticket }) = route else {
                bail!("Editor was not opened for role {}", id);
            };
            match controller.handoff().take(ticket) {
                Some(EditorSeed::Edit(role)) => {
                    println!("ID      {}", role.id);
                    println!("Name    {}", role.name);
                    println!("Status  {}", role.status);
                }
                _ => bail!("Role {} was not handed over", id),
            }
        }
        Command::Delete { id } => {
            let controller = headless_controller(
                &config,
                directory,
                Arc::new(LastRoute::default()),
                default_export_dir,
                PageQuery::new(config.view.default_page_size),
            );
            controller.delete(id).await;
            let state = controller.snapshot();
            // A failed refetch must not hide that the delete went through
            let deleted = !matches!(
                &state.last_failure,
                Some(failure) if failure.action == ActionKind::Delete
            );
            if deleted {
                println!("Deleted role {}", id);
            }
            fail_on_recorded_failure(&state)?;
            print!("{}", format_table(&state));
        }
        Command::Export { search, out } => {
            let controller = headless_controller(
                &config,
                directory,
                Arc::new(LastRoute::default()),
                out.unwrap_or(default_export_dir),
                PageQuery::new(config.view.default_page_size).with_search_text(search),
            );
            // The snapshot size comes from the total count of a first page
            controller.refresh().await;
            fail_on_recorded_failure(&controller.snapshot())?;

            match controller.export().await {
                Some(path) => println!("Exported to {}", path.display()),
                None => {
                    fail_on_recorded_failure(&controller.snapshot())?;
                    bail!("Export did not complete");
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::{PageResult, Role, RoleStatus};
    use crate::ui::mvi::Reducer;
    use crate::ui::roles::{RoleListIntent, RoleListReducer};

    #[test]
    fn no_subcommand_means_browse() {
        let cli = Cli::parse_from(["role-console"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn list_flags_parse() {
        let cli = Cli::parse_from([
            "role-console",
            "--base-url",
            "http://example.test/api",
            "list",
            "--page",
            "3",
            "--size",
            "25",
            "--search",
            "adm",
        ]);
        assert_eq!(cli.base_url.as_deref(), Some("http://example.test/api"));
        assert_eq!(
            cli.command,
            Some(Command::List {
                page: 3,
                size: Some(PageSize::TwentyFive),
                search: "adm".into(),
            })
        );
    }

    #[test]
    fn unsupported_page_size_is_rejected() {
        let result = Cli::try_parse_from(["role-console", "list", "--size", "15"]);
        assert!(result.is_err());
    }

    #[test]
    fn page_zero_is_rejected() {
        let result = Cli::try_parse_from(["role-console", "list", "--page", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn table_lists_rows_and_range() {
        let mut state = RoleListReducer::reduce(RoleListState::default(), RoleListIntent::BeginFetch);
        let token = state.latest_token;
        state = RoleListReducer::reduce(
            state,
            RoleListIntent::PageLoaded {
                token,
                page: PageResult {
                    items: vec![Role {
                        id: 7,
                        name: "Auditor".into(),
                        status: RoleStatus::Inactive,
                    }],
                    total_count: 1,
                },
            },
        );

        let table = format_table(&state);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].contains("Auditor"));
        assert!(lines[1].contains("Inactive"));
        assert!(lines[2].starts_with("Page 1 | 10 per page"));
    }

    #[test]
    fn empty_table_says_so() {
        let table = format_table(&RoleListState::default());
        assert!(table.contains("(no roles)"));
    }
}
