// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tally Sheet CLI
//!
//! Create counters, tally "Getrunken" and "Bezahlt", and keep them on disk.
//! Each invocation loads the collection, applies one command and flushes the
//! write-behind queue before exiting.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tally_core::lifecycle::load_counters_async;
use tally_core::palette::{self, PaletteColor};
use tally_core::prefs::{load_prefs, save_prefs, TallyPrefs};
use tally_core::{
    render_marks, CountField, CounterId, CounterStore, JsonStore, PersistPort, StorageAdapter,
    WriteBehind,
};
use tally_store_fs::FsStorage;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Digital tally sheet: track counters with traditional tally marks",
    disable_help_subcommand = true
)]
struct Cli {
    /// Directory holding counter data (defaults to the platform data directory).
    #[arg(long, global = true, env = "TALLY_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all counters with their tally marks and the total.
    List(ListArgs),
    /// Create a counter.
    Add(AddArgs),
    /// Add to a tally.
    Inc(TallyArgs),
    /// Subtract from a tally (never below zero).
    Dec(TallyArgs),
    /// Zero one tally, or both when no field is given.
    Reset(ResetArgs),
    /// Delete a counter.
    Remove(RemoveArgs),
    /// Change a counter's color.
    Recolor(RecolorArgs),
    /// Print the sum of all tallies.
    Total,
    /// List the selectable colors.
    Palette,
    /// Draw a count as tally marks.
    Marks(MarksArgs),
    /// Show or change preferences.
    Prefs(PrefsArgs),
}

#[derive(Args)]
struct ListArgs {
    /// Print the collection as JSON in its stored shape.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct AddArgs {
    /// Counter name.
    name: String,
    /// Palette color name or value (defaults to the preferred color).
    #[arg(long)]
    color: Option<String>,
}

#[derive(Args)]
struct TallyArgs {
    /// Counter id.
    id: String,
    /// Apply to "Bezahlt" instead of "Getrunken".
    #[arg(long)]
    paid: bool,
    /// Step size.
    #[arg(long, default_value_t = 1)]
    by: u32,
}

impl TallyArgs {
    fn field(&self) -> CountField {
        if self.paid {
            CountField::Count2
        } else {
            CountField::Count1
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FieldArg {
    Getrunken,
    Bezahlt,
}

impl From<FieldArg> for CountField {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::Getrunken => Self::Count1,
            FieldArg::Bezahlt => Self::Count2,
        }
    }
}

#[derive(Args)]
struct ResetArgs {
    /// Counter id.
    id: String,
    /// Tally to reset; both when omitted.
    #[arg(long, value_enum)]
    field: Option<FieldArg>,
}

#[derive(Args)]
struct RemoveArgs {
    /// Counter id.
    id: String,
    /// Confirm the deletion.
    #[arg(long)]
    yes: bool,
}

#[derive(Args)]
struct RecolorArgs {
    /// Counter id.
    id: String,
    /// Palette color name or value.
    color: String,
}

#[derive(Args)]
struct MarksArgs {
    /// Count to draw.
    count: u64,
}

#[derive(Args)]
struct PrefsArgs {
    /// Color preselected for new counters.
    #[arg(long)]
    default_color: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let adapter: Arc<dyn StorageAdapter> = Arc::new(open_storage(cli.data_dir.as_deref())?);
    let config = JsonStore::new(Arc::clone(&adapter));
    let prefs = load_prefs(&config);

    let counters = load_counters_async(Arc::clone(&adapter)).await;
    debug!(count = counters.len(), "loaded session");
    let mut store = CounterStore::with_counters(counters, WriteBehind::spawn(adapter));

    let outcome = {
        let mut out = io::stdout().lock();
        run(cli.command, &mut store, &config, &prefs, &mut out)
    };

    let (_, port) = store.into_parts();
    port.close().await;
    outcome
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_storage(data_dir: Option<&Path>) -> Result<FsStorage> {
    match data_dir {
        Some(dir) => Ok(FsStorage::at(dir)),
        None => FsStorage::new().context("could not locate a data directory; pass --data-dir"),
    }
}

fn run<P, S, W>(
    command: Commands,
    store: &mut CounterStore<P>,
    config: &JsonStore<S>,
    prefs: &TallyPrefs,
    out: &mut W,
) -> Result<()>
where
    P: PersistPort,
    S: StorageAdapter,
    W: Write,
{
    match command {
        Commands::List(args) => {
            if args.json {
                writeln!(out, "{}", serde_json::to_string_pretty(store.counters())?)?;
            } else if store.is_empty() {
                writeln!(out, "No counters yet")?;
                writeln!(out, "Create your first counter to get started")?;
            } else {
                writeln!(out, "{}", render::counters_table(store.counters()))?;
                writeln!(out, "Total Count: {}", store.total())?;
            }
        }
        Commands::Add(args) => {
            let color = match args.color.as_deref() {
                Some(input) => resolve_color(input)?,
                None => prefs.default_palette_color(),
            };
            let Some(id) = store.add(&args.name, color.value) else {
                bail!("counter name must not be empty");
            };
            writeln!(out, "Added {} ({}) with id {id}", args.name.trim(), color.name)?;
        }
        Commands::Inc(args) => {
            let id = known_id(store, &args.id)?;
            store.update_count(&id, args.field(), i64::from(args.by));
            report_tally(store, &id, args.field(), out)?;
        }
        Commands::Dec(args) => {
            let id = known_id(store, &args.id)?;
            store.update_count(&id, args.field(), -i64::from(args.by));
            report_tally(store, &id, args.field(), out)?;
        }
        Commands::Reset(args) => {
            let id = known_id(store, &args.id)?;
            let field = args.field.map(CountField::from);
            store.reset(&id, field);
            match field {
                Some(field) => report_tally(store, &id, field, out)?,
                None => writeln!(out, "Reset both tallies of {id}")?,
            }
        }
        Commands::Remove(args) => {
            let id = known_id(store, &args.id)?;
            if !args.yes {
                bail!("refusing to delete counter {id} without --yes");
            }
            store.remove(&id);
            writeln!(out, "Deleted counter {id}")?;
        }
        Commands::Recolor(args) => {
            let id = known_id(store, &args.id)?;
            let color = resolve_color(&args.color)?;
            store.recolor(&id, color.value);
            writeln!(out, "Counter {id} is now {}", color.name)?;
        }
        Commands::Total => writeln!(out, "{}", store.total())?,
        Commands::Palette => {
            writeln!(out, "{}", render::palette_table(prefs.default_palette_color()))?;
        }
        Commands::Marks(args) => writeln!(out, "{}", render_marks(args.count))?,
        Commands::Prefs(args) => {
            let mut prefs = prefs.clone();
            if let Some(input) = args.default_color.as_deref() {
                prefs.default_color = resolve_color(input)?.value.to_owned();
                save_prefs(config, &prefs).context("could not save preferences")?;
            }
            let color = prefs.default_palette_color();
            writeln!(out, "default color: {} ({})", color.name, color.value)?;
        }
    }
    Ok(())
}

fn resolve_color(input: &str) -> Result<PaletteColor> {
    match palette::resolve(input) {
        Some(color) => Ok(color),
        None => {
            let names: Vec<_> = palette::PALETTE.iter().map(|c| c.name).collect();
            bail!("unknown color {input:?}; choose one of {}", names.join(", "))
        }
    }
}

fn known_id<P>(store: &CounterStore<P>, raw: &str) -> Result<CounterId>
where
    P: PersistPort,
{
    let id = CounterId::from(raw.trim());
    if store.get(&id).is_none() {
        bail!("no counter with id {id}");
    }
    Ok(id)
}

fn report_tally<P, W>(
    store: &CounterStore<P>,
    id: &CounterId,
    field: CountField,
    out: &mut W,
) -> Result<()>
where
    P: PersistPort,
    W: Write,
{
    if let Some(counter) = store.get(id) {
        let count = counter.count(field);
        writeln!(out, "{} {field}: {count}  {}", counter.name, render_marks(count))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{MemoryStorage, NoPersist};

    fn exec(store: &mut CounterStore<NoPersist>, argv: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("tally").chain(argv.iter().copied()))?;
        let config = JsonStore::new(MemoryStorage::new());
        let mut out = Vec::new();
        run(cli.command, store, &config, &TallyPrefs::default(), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn add_uses_preferred_color_by_default() {
        let mut store = CounterStore::in_memory();
        exec(&mut store, &["add", "Bier"]).expect("add");
        assert_eq!(store.counters()[0].color, "#2563eb");
    }

    #[test]
    fn dec_by_more_than_count_clamps() {
        let mut store = CounterStore::in_memory();
        let id = store.add("Bier", "#2563eb").expect("added");
        exec(&mut store, &["inc", id.as_str(), "--by", "3"]).expect("inc");
        let out = exec(&mut store, &["dec", id.as_str(), "--by", "10"]).expect("dec");
        assert!(out.contains("Getrunken: 0"));
        assert_eq!(store.total(), 0);
    }

    #[test]
    fn paid_flag_selects_second_tally() {
        let mut store = CounterStore::in_memory();
        let id = store.add("Bier", "#2563eb").expect("added");
        exec(&mut store, &["inc", id.as_str(), "--paid"]).expect("inc");
        assert_eq!(store.get(&id).map(|c| (c.count1, c.count2)), Some((0, 1)));
    }

    #[test]
    fn unknown_color_is_rejected() {
        let mut store = CounterStore::in_memory();
        assert!(exec(&mut store, &["add", "Bier", "--color", "mauve"]).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn remove_requires_confirmation() {
        let mut store = CounterStore::in_memory();
        let id = store.add("Bier", "#2563eb").expect("added");
        assert!(exec(&mut store, &["remove", id.as_str()]).is_err());
        assert_eq!(store.len(), 1);
        exec(&mut store, &["remove", id.as_str(), "--yes"]).expect("remove");
        assert!(store.is_empty());
    }

    #[test]
    fn reset_by_field_name() {
        let mut store = CounterStore::in_memory();
        let id = store.add("Bier", "#2563eb").expect("added");
        store.update_count(&id, CountField::Count1, 4);
        store.update_count(&id, CountField::Count2, 2);
        exec(&mut store, &["reset", id.as_str(), "--field", "bezahlt"]).expect("reset");
        assert_eq!(store.get(&id).map(|c| (c.count1, c.count2)), Some((4, 0)));
    }
}
