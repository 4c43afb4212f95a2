use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use prospect_core::{
    Backup, Balance, DEFAULT_INVENTORY_KEY, Editor, FactionLevels, ItemCatalog, MemoryStore,
    resolve_items,
};
use prospect_render::{JsonStyle, TextStyle, render_json_balance, render_json_factions,
    render_json_inventory, render_stash_sheet};

#[derive(Debug, Parser)]
#[command(version, about = "Edit a Prospect user-data collection snapshot")]
struct Cli {
    /// Collection snapshot: a JSON array of user documents.
    #[arg(value_name = "COLLECTION.json")]
    path: PathBuf,
    /// Remote item catalog document; heuristics are used when omitted.
    #[arg(long, value_name = "CATALOG.json")]
    catalog: Option<PathBuf>,
    #[arg(
        long = "inventory-key",
        env = "INVENTORY_KEY",
        default_value = DEFAULT_INVENTORY_KEY
    )]
    inventory_key: String,
    #[arg(long)]
    inventory: bool,
    #[arg(long)]
    balance: bool,
    #[arg(long)]
    factions: bool,
    #[arg(long)]
    json: bool,
    #[arg(long = "add-item", value_name = "BASE_ITEM_ID")]
    add_item: Option<String>,
    #[arg(long, default_value_t = 1, requires = "add_item")]
    quantity: i64,
    #[arg(long = "set-aurum")]
    set_aurum: Option<i64>,
    #[arg(long = "set-kmarks")]
    set_kmarks: Option<i64>,
    #[arg(long = "set-insurance")]
    set_insurance: Option<i64>,
    #[arg(long = "set-ica")]
    set_ica: Option<i64>,
    #[arg(long = "set-korolev")]
    set_korolev: Option<i64>,
    #[arg(long = "set-osiris")]
    set_osiris: Option<i64>,
    #[arg(long = "export-backup", value_name = "BACKUP.json")]
    export_backup: Option<PathBuf>,
    #[arg(long = "import-backup", value_name = "BACKUP.json")]
    import_backup: Option<PathBuf>,
    /// Where to write the mutated snapshot; defaults to rewriting the
    /// input file in place when edits were made.
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn has_balance_edit(&self) -> bool {
        self.set_aurum.is_some() || self.set_kmarks.is_some() || self.set_insurance.is_some()
    }

    fn has_faction_edit(&self) -> bool {
        self.set_ica.is_some() || self.set_korolev.is_some() || self.set_osiris.is_some()
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(error) = run(&cli) {
        eprintln!("error: {error:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let bytes = fs::read(&cli.path)
        .with_context(|| format!("failed to read {}", cli.path.display()))?;
    let store = MemoryStore::from_json_bytes(&bytes)
        .with_context(|| format!("failed to load {}", cli.path.display()))?;
    let catalog = load_catalog(cli)?;
    let mut editor = Editor::with_inventory_key(store, catalog, cli.inventory_key.clone());

    let mut mutated = false;

    if let Some(path) = &cli.import_backup {
        let backup_bytes = fs::read(path)
            .with_context(|| format!("failed to read backup {}", path.display()))?;
        let backup = Backup::from_json_bytes(&backup_bytes)?;
        editor.save_inventory(&backup.inventory)?;
        mutated = true;
    }

    if let Some(base_item_id) = &cli.add_item {
        let mut inventory = editor.load_inventory()?;
        editor.add_items(&mut inventory, base_item_id, cli.quantity);
        editor.save_inventory(&inventory)?;
        mutated = true;
    }

    if cli.has_balance_edit() {
        let mut balance: Balance = editor.load_balance()?;
        if let Some(aurum) = cli.set_aurum {
            balance.aurum = aurum;
        }
        if let Some(kmarks) = cli.set_kmarks {
            balance.kmarks = kmarks;
        }
        if let Some(insurance) = cli.set_insurance {
            balance.insurance = insurance;
        }
        editor.save_balance(&balance)?;
        mutated = true;
    }

    if cli.has_faction_edit() {
        let mut levels: FactionLevels = editor.load_faction_levels()?;
        if let Some(ica) = cli.set_ica {
            levels.ica = ica;
        }
        if let Some(korolev) = cli.set_korolev {
            levels.korolev = korolev;
        }
        if let Some(osiris) = cli.set_osiris {
            levels.osiris = osiris;
        }
        editor.save_faction_levels(&levels)?;
        mutated = true;
    }

    if let Some(path) = &cli.export_backup {
        let backup = Backup::new(editor.load_inventory()?);
        fs::write(path, backup.to_json_string_pretty()?)
            .with_context(|| format!("failed to write backup {}", path.display()))?;
    }

    if cli.inventory {
        let items = editor.load_inventory()?;
        let resolved = resolve_items(editor.catalog(), &items);
        if cli.json {
            let rendered = render_json_inventory(&resolved, JsonStyle::CanonicalV1);
            println!("{}", serde_json::to_string_pretty(&rendered)?);
        } else {
            print!("{}", render_stash_sheet(&resolved, TextStyle::StashSheet));
        }
    }

    if cli.balance {
        let balance = editor.load_balance()?;
        if cli.json {
            let rendered = render_json_balance(&balance, JsonStyle::CanonicalV1);
            println!("{}", serde_json::to_string_pretty(&rendered)?);
        } else {
            println!("AU={}", balance.aurum);
            println!("SC={}", balance.kmarks);
            println!("IN={}", balance.insurance);
        }
    }

    if cli.factions {
        let levels = editor.load_faction_levels()?;
        if cli.json {
            let rendered = render_json_factions(&levels, JsonStyle::CanonicalV1);
            println!("{}", serde_json::to_string_pretty(&rendered)?);
        } else {
            println!("ica={}", levels.ica);
            println!("korolev={}", levels.korolev);
            println!("osiris={}", levels.osiris);
        }
    }

    if mutated || cli.output.is_some() {
        let target = cli.output.as_ref().unwrap_or(&cli.path);
        let snapshot = editor.store().to_json_string_pretty()?;
        fs::write(target, snapshot)
            .with_context(|| format!("failed to write {}", target.display()))?;
    }

    Ok(())
}

fn load_catalog(cli: &Cli) -> Result<ItemCatalog> {
    match &cli.catalog {
        Some(path) => {
            let bytes = fs::read(path)
                .with_context(|| format!("failed to read catalog {}", path.display()))?;
            Ok(ItemCatalog::from_json_bytes(&bytes)?)
        }
        None => {
            log::warn!("no item catalog supplied; falling back to heuristic item configs");
            Ok(ItemCatalog::empty())
        }
    }
}
