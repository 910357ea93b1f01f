use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use menu_protocol::{
    CatalogOutput, ExplainOutput, PresetOutput, RecommendationOutput, ResponseEnvelope,
    ResponseMeta, TokenizeOutput,
};
use std::io;
use std::path::PathBuf;

use crate::command::{classify_error, Session};
use crate::config::{AssistantConfig, ConfigOverrides, CATALOG_ENV, CONFIG_ENV};

mod command;
mod config;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "menu-assistant")]
#[command(about = "Smart menu assistant: recommends a dish for a free-text craving", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Output a JSON envelope instead of text (implies --quiet)
    #[arg(long, global = true)]
    json: bool,

    /// Config file (defaults to <config dir>/menu-assistant/config.toml when present)
    #[arg(long, global = true, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Catalog TOML file (overrides the config file; built-in menu otherwise)
    #[arg(long, global = true, env = CATALOG_ENV)]
    catalog: Option<PathBuf>,

    /// Minimum trimmed query length for recommend/explain
    #[arg(long, global = true)]
    min_query_chars: Option<usize>,

    /// Currency prefix used in prices and order messages
    #[arg(long, global = true)]
    currency: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend the best matching dish
    Recommend(QueryArgs),

    /// Show how every dish scored against the query
    Explain(QueryArgs),

    /// Show the tokens extracted from the query
    Tokenize(QueryArgs),

    /// List dishes in menu order
    Catalog(CatalogArgs),

    /// Run the canned query for a menu category
    Preset(PresetArgs),

    /// Print JSON schemas of the response envelope and payloads
    Schema,
}

#[derive(Args)]
struct QueryArgs {
    /// Free-text query (words are joined with spaces)
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    query: Vec<String>,
}

impl QueryArgs {
    fn text(&self) -> String {
        self.query.join(" ")
    }
}

#[derive(Args)]
struct CatalogArgs {
    /// Only list dishes in this category
    #[arg(long)]
    category: Option<String>,
}

#[derive(Args)]
struct PresetArgs {
    /// Category name (e.g., spicy, vegan)
    category: String,
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet || cli.json {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let overrides = ConfigOverrides {
        config: cli.config.clone(),
        catalog: cli.catalog.clone(),
        min_query_chars: cli.min_query_chars,
        currency_prefix: cli.currency.clone(),
    };

    if matches!(cli.command, Commands::Schema) {
        return print_stdout(&serde_json::to_string_pretty(&menu_protocol::schemas()?)?);
    }

    let session = match AssistantConfig::resolve(overrides).and_then(Session::open) {
        Ok(session) => session,
        Err(err) => return fail(cli.json, &err, ResponseMeta::default()),
    };

    let outcome = match &cli.command {
        Commands::Recommend(args) => session.recommend(&args.text()).map(Outcome::Recommend),
        Commands::Explain(args) => session.explain(&args.text()).map(Outcome::Explain),
        Commands::Tokenize(args) => Ok(Outcome::Tokenize(session.tokenize(&args.text()))),
        Commands::Catalog(args) => session
            .catalog(args.category.as_deref())
            .map(Outcome::Catalog),
        Commands::Preset(args) => session.preset(&args.category).map(Outcome::Preset),
        Commands::Schema => unreachable!("handled before the catalog is loaded"),
    };

    match outcome {
        Ok(outcome) if cli.json => {
            let envelope = outcome.envelope(session.meta())?;
            print_stdout(&serde_json::to_string_pretty(&envelope)?)
        }
        Ok(outcome) => print_stdout(&outcome.render()),
        Err(err) => fail(cli.json, &err, session.meta()),
    }
}

/// Reports `err` and exits non-zero; JSON mode keeps stdout parseable
fn fail(json: bool, err: &anyhow::Error, meta: ResponseMeta) -> Result<()> {
    if json {
        let envelope = ResponseEnvelope::error(classify_error(err), meta);
        print_stdout(&serde_json::to_string_pretty(&envelope)?)?;
    } else {
        let classified = classify_error(err);
        eprintln!("Error: {}", classified.message);
        if let Some(hint) = classified.hint {
            eprintln!("Hint: {hint}");
        }
    }
    std::process::exit(1)
}

enum Outcome {
    Recommend(RecommendationOutput),
    Explain(ExplainOutput),
    Tokenize(TokenizeOutput),
    Catalog(CatalogOutput),
    Preset(PresetOutput),
}

impl Outcome {
    fn envelope(&self, meta: ResponseMeta) -> Result<ResponseEnvelope> {
        match self {
            Outcome::Recommend(out) => ResponseEnvelope::ok(out, meta),
            Outcome::Explain(out) => ResponseEnvelope::ok(out, meta),
            Outcome::Tokenize(out) => ResponseEnvelope::ok(out, meta),
            Outcome::Catalog(out) => ResponseEnvelope::ok(out, meta),
            Outcome::Preset(out) => ResponseEnvelope::ok(out, meta),
        }
    }

    fn render(&self) -> String {
        match self {
            Outcome::Recommend(out) => render_recommendation(out),
            Outcome::Explain(out) => {
                let mut lines = vec![format!("Tokens: {}", out.tokens.join(", "))];
                for score in &out.scores {
                    lines.push(format!(
                        "  #{:<3} score {:<5} (keywords {}, name {}, description {})",
                        score.item_id,
                        score.score,
                        score.keyword_hits,
                        score.name_hits,
                        score.description_hits
                    ));
                }
                if out.fallback {
                    lines.push("Chosen: fallback (no dish reached the threshold)".to_string());
                } else {
                    lines.push(format!("Chosen: #{} with score {}", out.chosen_id, out.score));
                }
                lines.join("\n")
            }
            Outcome::Tokenize(out) => out.tokens.join("\n"),
            Outcome::Catalog(out) => out
                .items
                .iter()
                .map(|item| {
                    format!(
                        "#{:<3} {:<28} {:>6}  [{}]",
                        item.id, item.name, item.price, item.category
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Outcome::Preset(out) => format!(
                "Query: {}\n{}",
                out.recommendation.query,
                render_recommendation(&out.recommendation)
            ),
        }
    }
}

fn render_recommendation(out: &RecommendationOutput) -> String {
    let mut lines = Vec::new();
    if out.fallback {
        lines.push("No close match, so here is our chef's pick:".to_string());
    }
    lines.push(format!("{}  {}", out.display_name, out.price));
    lines.push(out.item.description.clone());
    if !out.fallback {
        lines.push(format!("Score: {}", out.score));
    }
    lines.push(format!("Order: {}", out.order_message));
    lines.join("\n")
}
