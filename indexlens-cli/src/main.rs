//! IndexLens CLI: print dashboard views for one stock index.
//!
//! Commands:
//! - `overview`: index card, trailing returns and composition breakdowns
//! - `timeline`: constituent change history, newest first
//! - `list`: searchable, sortable constituent table (optionally as CSV)
//! - `simulate`: split an investment across the largest holdings
//! - `returns`: trailing returns by horizon
//! - `prices`: price history for a period
//! - `history`: year-by-year sector (and country) composition
//! - `build`: write an index's constituents document from a market-cap CSV

mod build;
mod export;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use indexlens_core::data::DataStore;
use indexlens_core::domain::dates::format_day;
use indexlens_core::domain::IndexId;
use indexlens_core::labels::sector_label;
use indexlens_core::params::{PricePeriod, SortColumn, SortDirection, SortSpec, TypeFilter};
use indexlens_core::views::timeline::GenericLine;
use indexlens_core::views::{
    build_timeline, composition_history, format_yen, overview, query, simulate_snapshot, summarize,
    window, ChangeCard, GroupLayout, TextSegment, EMPTY_TIMELINE,
};
use indexlens_core::DashboardConfig;

const LOAD_FAILED: &str = "データの読み込みに失敗しました。しばらくしてから再度お試しください";

#[derive(Parser)]
#[command(
    name = "indexlens",
    about = "IndexLens CLI: stock index composition dashboard"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Local data directory. Overrides the config file.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Static HTTP origin serving the data documents. Overrides --data-dir.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Index: sp500, nasdaq100, nikkei225, topix, acwi, prime150.
    #[arg(long, global = true)]
    index: Option<String>,

    /// Print the view as JSON instead of text.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Index card, trailing returns and composition breakdowns.
    Overview,
    /// Constituent change history, newest first.
    Timeline {
        /// Change type: all, add, remove, rebalance.
        #[arg(long, default_value = "all")]
        filter: TypeFilter,
    },
    /// Constituent table.
    List {
        /// Case-insensitive match on ticker or company name.
        #[arg(long, default_value = "")]
        search: String,

        /// Sort column: ticker, name, sector, weight, dateAdded.
        /// Without any sort flags: weight, descending.
        #[arg(long)]
        sort: Option<SortColumn>,

        /// Sort ascending.
        #[arg(long, default_value_t = false, conflicts_with = "desc")]
        asc: bool,

        /// Sort descending.
        #[arg(long, default_value_t = false)]
        desc: bool,

        /// Maximum rows. Defaults to the configured display cap.
        #[arg(long)]
        cap: Option<usize>,

        /// Write the rows as CSV to this file (`-` for stdout).
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Split an investment across the five largest holdings.
    Simulate {
        /// Amount to invest. Defaults to the configured amount.
        #[arg(long)]
        amount: Option<f64>,
    },
    /// Trailing returns by horizon.
    Returns,
    /// Price history for a period.
    Prices {
        /// Period: 1y, 5y, 10y, 15y, all.
        #[arg(long, default_value = "all")]
        period: PricePeriod,
    },
    /// Year-by-year composition.
    History {
        /// Categories per year. Defaults to the configured top_n.
        #[arg(long)]
        top: Option<usize>,
    },
    /// Write `<data-dir>/<index>/constituents.json` from market caps.
    Build {
        /// CSV with `ticker,marketCap` and an optional `sector` column.
        #[arg(long)]
        caps: PathBuf,

        /// CSV mapping `ticker,name`. Tickers without a name keep the ticker.
        #[arg(long)]
        names: Option<PathBuf>,

        /// CSV mapping `ticker,sector`, used where the caps sector is missing
        /// or `Unknown`.
        #[arg(long)]
        sectors: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = resolve_config(&cli.global)?;
    let index = cli
        .global
        .index
        .clone()
        .unwrap_or_else(|| config.view.default_index.code().to_string());

    let load = || -> Result<DataStore> {
        let source = config.open_source().context(LOAD_FAILED)?;
        DataStore::load(source.as_ref(), &index).context(LOAD_FAILED)
    };
    let json = cli.global.json;

    match cli.command {
        Commands::Overview => run_overview(&load()?, json),
        Commands::Timeline { filter } => run_timeline(&load()?, filter, json),
        Commands::List {
            search,
            sort,
            asc,
            desc,
            cap,
            csv,
        } => {
            let cap = cap.unwrap_or(config.view.display_cap);
            run_list(&load()?, &search, resolve_sort(sort, asc, desc), cap, csv, json)
        }
        Commands::Simulate { amount } => {
            run_simulate(&load()?, amount.unwrap_or(config.view.default_amount), json)
        }
        Commands::Returns => run_returns(&load()?, json),
        Commands::Prices { period } => run_prices(&load()?, period, config.view.current_year, json),
        Commands::History { top } => run_history(&load()?, top.unwrap_or(config.view.top_n), json),
        Commands::Build { caps, names, sectors } => {
            let index: IndexId = index.parse()?;
            build::run_build(&caps, names.as_deref(), sectors.as_deref(), index, &config.data.dir)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// No flags give the default (weight, descending). A column on its own sorts
/// ascending, except weight, which keeps its descending default.
fn resolve_sort(column: Option<SortColumn>, asc: bool, desc: bool) -> SortSpec {
    let default = SortSpec::default();
    let column = column.unwrap_or(default.column);
    let direction = if desc {
        SortDirection::Desc
    } else if asc {
        SortDirection::Asc
    } else if column == default.column {
        default.direction
    } else {
        SortDirection::Asc
    };
    SortSpec { column, direction }
}

fn resolve_config(args: &GlobalArgs) -> Result<DashboardConfig> {
    let mut config = match &args.config {
        Some(path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(dir) = &args.data_dir {
        config.data.dir = dir.clone();
        config.data.base_url = None;
    }
    if let Some(url) = &args.base_url {
        config.data.base_url = Some(url.clone());
    }
    Ok(config)
}

// ── Commands ─────────────────────────────────────────────────────────

fn run_overview(store: &DataStore, json: bool) -> Result<()> {
    let view = overview(store);
    if json {
        return export::print_json(&view);
    }

    println!();
    println!("=== {} ===", view.display_name);
    println!("Updated:        {}", view.last_updated);
    println!("Constituents:   {}", view.constituent_count);
    match &view.metadata {
        Some(meta) => {
            println!("Inception:      {}", meta.inception_date);
            println!("Rebalance:      {}", meta.rebalance);
            println!();
            println!("{}", meta.description);
            if !meta.trusts.is_empty() {
                println!("Funds:          {}", meta.trusts.join(" / "));
            }
        }
        None => println!("(no metadata)"),
    }

    if !view.returns.is_empty() {
        println!();
        println!("--- Returns ---");
        for line in &view.returns {
            println!("{:<12} {:>9}", line.label, line.formatted);
        }
    }

    print_slices("Sectors", &view.sectors);
    if !view.regions.is_empty() {
        print_slices("Regions", &view.regions);
    }
    if !view.top_countries.is_empty() {
        print_slices("Countries (top 10)", &view.top_countries);
    }
    println!();
    Ok(())
}

fn print_slices(title: &str, slices: &[indexlens_core::views::Slice]) {
    println!();
    println!("--- {title} ---");
    for s in slices {
        println!("{:<28} {:>6.1}%  {}", s.label, s.weight, bar(s.weight));
    }
}

fn bar(weight: f64) -> String {
    "█".repeat((weight.max(0.0) / 2.0).round() as usize)
}

fn run_timeline(store: &DataStore, filter: TypeFilter, json: bool) -> Result<()> {
    let groups = build_timeline(
        store.changes(),
        store.events(),
        store.index(),
        filter,
        store.products(),
    );
    if json {
        return export::print_json(&groups);
    }
    if groups.is_empty() {
        println!("{EMPTY_TIMELINE}");
        return Ok(());
    }

    for group in &groups {
        println!();
        println!("■ {}", format_day(Some(group.date)));
        for event in &group.events {
            println!("  ★ {}", event.description);
            if !event.details.is_empty() {
                println!("    {}", event.details);
            }
        }
        match &group.layout {
            GroupLayout::Summary(card) => {
                println!(
                    "  定期見直し: +{} / -{}",
                    card.added_count.map_or("?".to_string(), |n| n.to_string()),
                    card.removed_count.map_or("?".to_string(), |n| n.to_string()),
                );
                if !card.description.is_empty() {
                    println!("  {}", render_segments(&card.description));
                }
                if !card.notes.is_empty() {
                    println!("  {}", render_segments(&card.notes));
                }
            }
            GroupLayout::Bulk { added, removed, note } => {
                println!("  一括入替: IN {} / OUT {}", added.len(), removed.len());
                if let Some(note) = note {
                    println!("  {note}");
                }
                for card in added.iter().chain(removed) {
                    println!("    {}", render_card(card));
                }
            }
            GroupLayout::Standard { added, removed, other } => {
                for card in added.iter().chain(removed) {
                    println!("  {}", render_card(card));
                }
                for GenericLine { label, text } in other {
                    println!("  [{label}] {text}");
                }
            }
        }
    }
    println!();
    Ok(())
}

fn render_card(card: &ChangeCard) -> String {
    let mut line = format!("{:<3} {} {} {}", card.direction.badge(), card.icon, card.ticker, card.name);
    if let Some(sector) = &card.sector {
        line.push_str(&format!(" ({})", sector_label(sector)));
    }
    if let Some(product) = &card.product {
        line.push_str(&format!(" : {product}"));
    }
    if card.japan {
        line.push_str(" 🇯🇵");
    }
    line
}

fn render_segments(segments: &[TextSegment]) -> String {
    segments
        .iter()
        .map(|s| if s.flagged { format!("【{}】", s.text) } else { s.text.clone() })
        .collect()
}

fn run_list(
    store: &DataStore,
    search: &str,
    sort: SortSpec,
    cap: usize,
    csv: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let result = query(store.constituents(), search, sort, cap);

    if let Some(path) = csv {
        return export::export_constituents(&result.rows, &path);
    }
    if json {
        return export::print_json(&result);
    }

    println!(
        "{:<10} {:<32} {:<20} {:>7} {:>12}",
        "Ticker", "Name", "Sector", "Weight", "Added"
    );
    println!("{}", "-".repeat(85));
    for row in &result.rows {
        println!(
            "{:<10} {:<32} {:<20} {:>6.2}% {:>12}",
            row.ticker,
            truncate(&row.name, 32),
            truncate(sector_label(&row.sector), 20),
            row.weight,
            format_day(row.date_added),
        );
    }
    if result.rows.is_empty() {
        println!("(no matches)");
    }
    if result.truncated_count > 0 {
        println!("… {} more", result.truncated_count);
    }
    Ok(())
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

fn run_simulate(store: &DataStore, amount: f64, json: bool) -> Result<()> {
    let sim = simulate_snapshot(amount, store.snapshot(), store.products());
    if json {
        return export::print_json(&sim);
    }

    println!();
    println!("=== {} に {} 投資すると ===", store.index().display_name(), format_yen(sim.amount));
    for h in &sim.top {
        let product = h.product.as_deref().map(|p| format!("  ({p})")).unwrap_or_default();
        println!("{:<10} {:>6.2}%  {:>14}{product}", h.ticker, h.weight, format_yen(h.invested));
    }
    println!(
        "その他 {} 社      {:>14}",
        sim.other_count,
        format_yen(sim.other_amount)
    );
    println!();
    Ok(())
}

fn run_returns(store: &DataStore, json: bool) -> Result<()> {
    let lines = store.prices().map(|p| summarize(&p.returns)).unwrap_or_default();
    if json {
        return export::print_json(&lines);
    }
    if lines.is_empty() {
        println!("(no return data)");
    }
    for line in &lines {
        println!("{:<12} {:>9}", line.label, line.formatted);
    }
    Ok(())
}

fn run_prices(store: &DataStore, period: PricePeriod, current_year: i32, json: bool) -> Result<()> {
    let Some(prices) = store.prices() else {
        println!("(no price data)");
        return Ok(());
    };
    let w = window(prices, period, current_year);
    if json {
        return export::print_json(&w);
    }

    let (lo, hi) = w.bounds().unwrap_or((0.0, 0.0));
    println!("Period {}: {} points, range {:.2} – {:.2}", period.as_str(), w.len(), lo, hi);
    for (date, value) in w.dates.iter().zip(w.values) {
        println!("{date:<10} {value:>12.2}");
    }
    Ok(())
}

fn run_history(store: &DataStore, top: usize, json: bool) -> Result<()> {
    let Some(series) = store.historical() else {
        println!("(no historical data)");
        return Ok(());
    };
    let history = composition_history(series, top);
    if json {
        return export::print_json(&history);
    }

    for year in &history {
        println!();
        println!("--- {} ---", year.year);
        for share in &year.sectors {
            println!("  {:<28} {:>6.1}%", sector_label(&share.name), share.weight);
        }
        if let Some(countries) = &year.countries {
            println!("  (countries)");
            for share in countries {
                println!("  {:<28} {:>6.1}%", share.name, share.weight);
            }
        }
        if let Some(note) = &year.note {
            println!("  ※ {note}");
        }
    }
    if let Some(note) = &series.note {
        println!();
        println!("※ {note}");
    }
    Ok(())
}
