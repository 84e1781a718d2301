use std::sync::Arc;

use clap::{Arg, ArgAction, Command};
use leveler::ExampleStore;
use leveler::config::Settings;
use leveler::leveler::{DEFAULT_SEED, DegradeReport, Leveler, MAX_HOPS, normalize_hops};
use leveler::mt::{
    MachineTranslator, MockMode, MockTranslator, OpenRouterProvider, select_chain,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("leveler")
        .version("0.1.0")
        .about("Degrade example sentences through deterministic back-translation chains")
        .arg(
            Arg::new("hops")
                .long("hops")
                .short('n')
                .help(format!(
                    "Number of round trips per example (0-{}, default 2)",
                    MAX_HOPS
                )),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .short('s')
                .help("Seed that, with the example id, fixes the language chain")
                .default_value(DEFAULT_SEED),
        )
        .arg(
            Arg::new("add")
                .long("add")
                .short('a')
                .help("Add a custom example with this reference text (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use the offline mock translator instead of OpenRouter")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("chain-only")
                .long("chain-only")
                .help("Only print the language chain for each example, without translating")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log every provider call and cache hit")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let dotenv_loaded = dotenv::dotenv().is_ok();
    init_tracing(matches.get_flag("verbose"));
    if dotenv_loaded {
        info!("loaded .env");
    }

    let hops = normalize_hops(matches.get_one::<String>("hops").map(String::as_str));
    let seed = matches
        .get_one::<String>("seed")
        .map(String::as_str)
        .unwrap_or(DEFAULT_SEED);
    let custom_texts: Vec<&String> = matches
        .get_many::<String>("add")
        .map(|values| values.collect())
        .unwrap_or_default();

    if matches.get_flag("chain-only") {
        let store = ExampleStore::new();
        for text in &custom_texts {
            store.add(text)?;
        }
        for example in store.all() {
            let chain = select_chain(seed, example.id, hops);
            println!("{:>5}  {}", example.id, chain.join(" → "));
        }
        return Ok(());
    }

    let translator: Arc<dyn MachineTranslator> = if matches.get_flag("mock") {
        Arc::new(MockTranslator::new(MockMode::Tag))
    } else {
        let settings = Settings::from_env()?;
        if !settings.has_credentials() {
            warn!("OPENROUTER_API_KEY not set; use --mock to run offline");
            let report = DegradeReport::missing_credentials(hops, seed);
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }
        Arc::new(OpenRouterProvider::from_settings(&settings)?)
    };

    let leveler = Leveler::new(translator);
    for text in custom_texts {
        let response = leveler.add_example(text);
        if !response.success {
            warn!(error = ?response.error, "custom example rejected");
        }
    }

    let report = leveler.degrade_all(hops, seed).await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    let stats = leveler.stats();
    info!(
        translations = stats.translations.entries,
        round_trips = stats.round_trips.entries,
        degradations = stats.degradations.entries,
        "done"
    );

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
