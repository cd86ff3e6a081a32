use clap::{Parser, Subcommand};
use extended_link::fields::{self, FieldNames};
use extended_link::item::{self, Item};
use extended_link::link;
use extended_link::locale::LocaleContext;
use extended_link::navigation::{self, NavigationItem};
use extended_link::selectors::{self, SelectorUpdate};
use extended_link::{config, output};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "extended-link")]
#[command(about = "Inspect and rewrite extended CMS links")]
#[command(long_about = "\
Inspect and rewrite extended CMS links

An extended link is a base (repository path or UUID) followed by an optional
selector block, query string and anchor:

  /content/page~page=2~print~.html?lang=de#comments
  └────base────┘└──selectors──┘    └─query─┘└anchor┘

Links starting with http:// or https:// are external and never decomposed.

Run 'extended-link gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print what kind of link this is
    Classify { link: String },
    /// Split a link into base, selectors, query and anchor
    Parse {
        link: String,
        /// Print the components as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compose a link from its components
    Merge {
        #[arg(long)]
        base: Option<String>,
        #[arg(long)]
        selectors: Option<String>,
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        anchor: Option<String>,
    },
    /// Print everything except the base
    StripBase { link: String },
    /// Set or remove selectors on a link
    Selectors {
        link: String,
        /// Selector to set: key=value, or a bare key for a flag
        #[arg(long = "set", value_name = "KEY[=VALUE]")]
        set: Vec<String>,
        /// Selector key to remove
        #[arg(long = "remove", value_name = "KEY")]
        remove: Vec<String>,
    },
    /// Show how a link is stored in sibling properties
    Split {
        link: String,
        /// Name of the link field
        #[arg(long, default_value = "link")]
        field: String,
    },
    /// Sort a JSON list of {"key", "value"} items
    Sort { file: PathBuf },
    /// Sort and print a JSON navigation tree
    Nav {
        file: PathBuf,
        /// Key of the node to select
        #[arg(long)]
        select: Option<String>,
    },
    /// Resolve requested locales against the configured site locales
    Locale {
        #[arg(required = true)]
        requested: Vec<String>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Classify { link } => {
            println!("{}", link::classify(&link));
        }
        Command::Parse { link, json } => {
            let parts = link::parse(&link);
            if json {
                println!("{}", serde_json::to_string_pretty(&parts)?);
            } else {
                let kind = link::classify(&link);
                output::print_lines(&output::format_components(&link, kind, &parts));
            }
        }
        Command::Merge {
            base,
            selectors,
            query,
            anchor,
        } => {
            println!(
                "{}",
                link::merge(
                    base.as_deref(),
                    selectors.as_deref(),
                    query.as_deref(),
                    anchor.as_deref(),
                )
            );
        }
        Command::StripBase { link } => {
            println!("{}", link::strip_base(&link));
        }
        Command::Selectors { link, set, remove } => {
            let updates: Vec<SelectorUpdate> = set
                .iter()
                .map(|arg| SelectorUpdate::from_assignment(arg))
                .chain(remove.iter().map(|key| SelectorUpdate::Remove(key)))
                .collect();
            println!("{}", selectors::update_selectors(&link, &updates)?);
        }
        Command::Split { link, field } => {
            let site_config = config::load_config(&cli.config_dir)?;
            let names = FieldNames::new(&field, &site_config.fields);
            let mut store: BTreeMap<String, String> = BTreeMap::new();
            fields::write_link(&mut store, &names, &link);
            output::print_lines(&output::format_properties(&store));
            if let Some(restored) = fields::read_link(&store, &names) {
                println!("Restored: {}", restored);
            }
        }
        Command::Sort { file } => {
            let content = std::fs::read_to_string(&file)?;
            let mut items: Vec<Item> = serde_json::from_str(&content)?;
            item::sort_items(&mut items);
            output::print_lines(&output::format_items(&items));
        }
        Command::Nav { file, select } => {
            let content = std::fs::read_to_string(&file)?;
            let mut nav: Vec<NavigationItem> = serde_json::from_str(&content)?;
            navigation::sort_navigation(&mut nav);
            if let Some(key) = select {
                if !navigation::select_by_key(&mut nav, &key) {
                    log::warn!("no navigation item with key {key:?}");
                }
            }
            output::print_lines(&output::format_navigation(&nav));
            let trail = navigation::selected_trail(&nav);
            if !trail.is_empty() {
                println!("Selected: {}", output::format_trail(&trail));
            }
        }
        Command::Locale { requested } => {
            let site_config = config::load_config(&cli.config_dir)?;
            let mut locales = LocaleContext::new(site_config.locales);
            for tag in &requested {
                println!("{} → {}", tag, locales.resolve(tag));
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
