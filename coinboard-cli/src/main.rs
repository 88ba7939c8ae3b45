//! Coinboard CLI: the ticker grid from the command line.
//!
//! Commands:
//! - `list`: fetch tickers, search/sort/paginate, print one page
//! - `export`: select rows and write `Data Stocks.csv`
//! - `top`: the highest-priced coins

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use coinboard_core::dashboard::{top_by_price, DEFAULT_TOP_N};
use coinboard_core::data::{CoinloreProvider, JsonFileSource, TickerSource};
use coinboard_core::grid::{GridError, GridRow, GridView, SortDirection};
use coinboard_core::{Config, DataGrid, Ticker, TickerColumn};

#[derive(Parser)]
#[command(name = "coinboard", about = "Coinboard CLI: cryptocurrency ticker grid")]
struct Cli {
    /// Config file. Defaults to <config_dir>/coinboard/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read tickers from a saved JSON payload instead of the endpoint.
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Search, sort and paging options shared by `list` and `export`.
#[derive(Args, Debug, Clone, Default)]
struct ViewArgs {
    /// Case-insensitive search across every field.
    #[arg(long)]
    search: Option<String>,

    /// Column key to sort by (e.g. rank, price_usd, market_cap_usd).
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending instead of ascending.
    #[arg(long, default_value_t = false)]
    desc: bool,

    /// Page number, starting at 1.
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Rows per page: 10, 20, 30, 40 or 50. Defaults to the configured size.
    #[arg(long)]
    page_size: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one page of the ticker table.
    List {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Select rows and write them to "Data Stocks.csv".
    Export {
        #[command(flatten)]
        view: ViewArgs,

        /// Ticker id to select. Repeatable.
        #[arg(long = "id")]
        ids: Vec<String>,

        /// Select every row on the chosen page.
        #[arg(long, default_value_t = false)]
        all_visible: bool,

        /// Output directory. Defaults to the configured export dir.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Print the highest-priced coins.
    Top {
        /// How many coins.
        #[arg(long, short)]
        n: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;
    let source = open_source(&config, cli.file)?;

    match cli.command {
        Commands::List { view } => run_list(source.as_ref(), &config, &view),
        Commands::Export {
            view,
            ids,
            all_visible,
            output_dir,
        } => {
            let dir = output_dir.unwrap_or_else(|| config.export.dir.clone());
            run_export(source.as_ref(), &config, &view, &ids, all_visible, &dir)
        }
        Commands::Top { n } => run_top(source.as_ref(), n.unwrap_or(config.chart.top_n)),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match Config::default_path() {
            Some(p) => p,
            None => return Ok(Config::default()),
        },
    };
    Config::load(&path).with_context(|| format!("loading config from {}", path.display()))
}

fn open_source(config: &Config, file: Option<PathBuf>) -> Result<Box<dyn TickerSource>> {
    Ok(match file {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(CoinloreProvider::new(&config.source)?),
    })
}

fn fetch(source: &dyn TickerSource) -> Result<Vec<Ticker>> {
    let tickers = source.fetch().map_err(|e| {
        warn!(source = source.name(), error = %e, "fetch failed");
        anyhow!("{}", e.user_message())
    })?;
    info!(source = source.name(), count = tickers.len(), "fetched tickers");
    Ok(tickers)
}

/// Build a grid over `tickers` and apply the search, sort and paging options.
fn prepare_grid(
    tickers: Vec<Ticker>,
    config: &Config,
    view: &ViewArgs,
) -> Result<DataGrid<Ticker>> {
    let mut grid = DataGrid::with_page_size(config.page_size()?);
    grid.set_dataset(tickers);

    if let Some(size) = view.page_size {
        grid.set_page_size(size)?;
    }
    if let Some(term) = &view.search {
        grid.set_search_term(term.as_str());
    }
    if let Some(key) = &view.sort {
        let column = TickerColumn::from_key(key).ok_or_else(|| {
            let keys: Vec<&str> = TickerColumn::ALL.iter().map(|c| c.key()).collect();
            anyhow!("unknown sort column '{key}'. Valid: {}", keys.join(", "))
        })?;
        let direction = if view.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        grid.set_sort(Some(column), direction);
    }
    grid.goto_page(view.page.saturating_sub(1));
    Ok(grid)
}

fn run_list(source: &dyn TickerSource, config: &Config, view: &ViewArgs) -> Result<()> {
    let grid = prepare_grid(fetch(source)?, config, view)?;
    print_page(&grid.view());
    Ok(())
}

fn run_export(
    source: &dyn TickerSource,
    config: &Config,
    view: &ViewArgs,
    ids: &[String],
    all_visible: bool,
    output_dir: &Path,
) -> Result<()> {
    let mut grid = prepare_grid(fetch(source)?, config, view)?;
    select(&mut grid, ids, all_visible);

    let export = match grid.export_selected() {
        Ok(export) => export,
        Err(GridError::EmptySelection) => {
            eprintln!("{}", GridError::EmptySelection);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let path = export
        .write_to(output_dir)
        .with_context(|| format!("writing export to {}", output_dir.display()))?;
    info!(rows = export.row_count, path = %path.display(), "exported selection");
    println!("Exported {} rows to {}", export.row_count, path.display());
    Ok(())
}

fn select(grid: &mut DataGrid<Ticker>, ids: &[String], all_visible: bool) {
    for id in ids {
        if grid.records().iter().any(|t| t.row_id() == id) {
            if !grid.is_selected(id) {
                grid.toggle_row_selected(id);
            }
        } else {
            warn!(%id, "no ticker with this id");
        }
    }
    if all_visible && !grid.view().all_visible_selected() {
        grid.toggle_all_visible_selected();
    }
}

fn run_top(source: &dyn TickerSource, n: usize) -> Result<()> {
    let tickers = fetch(source)?;
    let n = if n == 0 { DEFAULT_TOP_N } else { n };
    println!("{:>4} {:<8} {:<24} {:>16}", "#", "Symbol", "Name", "Price USD");
    println!("{}", "-".repeat(55));
    for (i, t) in top_by_price(&tickers, n).into_iter().enumerate() {
        println!("{:>4} {:<8} {:<24} {:>16}", i + 1, t.symbol, t.name, t.price_usd);
    }
    Ok(())
}

fn print_page(view: &GridView<'_, Ticker>) {
    let header: Vec<String> = TickerColumn::TABLE
        .iter()
        .map(|&c| {
            let marker = match view.sort {
                Some(spec) if spec.column == c => spec.direction.marker(),
                _ => "",
            };
            format!("{}{}", c.header(), marker)
        })
        .collect();
    println!("{}", header.join("\t"));

    for ticker in view.records() {
        let cells: Vec<String> = TickerColumn::TABLE
            .iter()
            .map(|&c| ticker.cell(c).render())
            .collect();
        println!("{}", cells.join("\t"));
    }

    println!();
    println!(
        "{}  ({} of {} rows, {} per page)",
        view.pager_label(),
        view.filtered_count,
        view.total_count,
        view.page_size
    );
}
