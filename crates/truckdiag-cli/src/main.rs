//! Truckdiag - fault-code diagnosis assistant for heavy trucks
//!
//! The `truckdiag` command decodes MID/PID/SID/FMI fault codes and photos
//! and matches the faulty component against the OrionPart catalog.
//!
//! ## Commands
//!
//! - `decode`: Diagnose a fault code
//! - `photo`: Diagnose a dashboard, scanner or part photo
//! - `chat`: Ask the mechanic assistant
//! - `lookup`: Resolve a component name against the catalog
//! - `catalog`: List catalog parts
//! - `brands`: List brands or a brand's models
//! - `route`: Show where a search term would be handled

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{info, Level};

use truckdiag_core::{
    route_search, Catalog, CatalogPart, ChatTurn, DiagnosisComposer, EnrichedDiagnosis,
    FaultCodeData, Language, OracleConfig, PartResolver, SearchRoute, TruckBrand,
};

#[derive(Parser)]
#[command(name = "truckdiag")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Truck fault-code diagnosis with OrionPart catalog matching", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Output language (en, fr, ar)
    #[arg(long, global = true, default_value = "en")]
    lang: Language,

    /// Truck brand
    #[arg(long, global = true, default_value = "Renault")]
    brand: TruckBrand,

    /// Truck model, e.g. "Premium 460 DXi"
    #[arg(long, global = true)]
    model: Option<String>,

    /// Result format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Diagnose a fault code
    Decode {
        /// Module identifier
        #[arg(long, required_unless_present = "code")]
        mid: Option<String>,

        /// Parameter identifier
        #[arg(long, conflicts_with = "sid")]
        pid: Option<String>,

        /// Subsystem identifier
        #[arg(long)]
        sid: Option<String>,

        /// Failure mode identifier
        #[arg(long, required_unless_present = "code")]
        fmi: Option<String>,

        /// Free-text code, e.g. "MID 128 SID 232 FMI 3"
        #[arg(long, conflicts_with_all = ["mid", "pid", "sid", "fmi"])]
        code: Option<String>,
    },

    /// Diagnose a photo of a dashboard, scanner screen or spare part
    Photo {
        /// Image file (JPEG, PNG, WebP or GIF)
        path: PathBuf,
    },

    /// Ask the mechanic assistant
    Chat {
        /// Message to send
        message: String,

        /// JSON file holding prior turns; the new exchange is appended to it
        #[arg(long)]
        history: Option<PathBuf>,
    },

    /// Resolve a component name or code against the catalog
    Lookup {
        /// Search term, e.g. "oil pressure sensor" or "SID 232"
        term: String,
    },

    /// List catalog parts in resolution order
    Catalog,

    /// List supported brands, or the models of one brand
    Brands {
        /// Brand whose models to list
        #[arg(value_name = "BRAND")]
        of: Option<TruckBrand>,
    },

    /// Show where a dashboard search term is routed
    Route {
        /// Search term
        term: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    truckdiag_core::init_tracing(cli.json, level);

    let ctx = Session {
        lang: cli.lang,
        brand: cli.brand,
        model: cli.model,
        format: cli.format,
    };

    match cli.command {
        Commands::Decode {
            mid,
            pid,
            sid,
            fmi,
            code,
        } => {
            let fault = fault_code_from_args(mid, pid, sid, fmi, code.as_deref())?;
            cmd_decode(&ctx, &fault).await
        }
        Commands::Photo { path } => cmd_photo(&ctx, &path).await,
        Commands::Chat { message, history } => cmd_chat(&ctx, &message, history.as_deref()).await,
        Commands::Lookup { term } => cmd_lookup(&ctx, &term),
        Commands::Catalog => cmd_catalog(&ctx),
        Commands::Brands { of } => cmd_brands(&ctx, of),
        Commands::Route { term } => cmd_route(&ctx, &term),
    }
}

/// Selections shared by every command.
struct Session {
    lang: Language,
    brand: TruckBrand,
    model: Option<String>,
    format: OutputFormat,
}

impl Session {
    fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }
}

fn composer() -> Result<DiagnosisComposer> {
    let composer = DiagnosisComposer::from_config(OracleConfig::from_env())
        .context("Failed to set up the diagnosis oracle")?;
    if composer.is_demo() {
        eprintln!("No GEMINI_API_KEY set: running in demo mode.");
    }
    Ok(composer)
}

fn fault_code_from_args(
    mid: Option<String>,
    pid: Option<String>,
    sid: Option<String>,
    fmi: Option<String>,
    code: Option<&str>,
) -> Result<FaultCodeData> {
    if let Some(text) = code {
        return FaultCodeData::parse(text).context("Could not read fault code");
    }
    let (Some(mid), Some(fmi)) = (mid, fmi) else {
        bail!("Both --mid and --fmi are required (or pass --code)");
    };
    let mut fault = FaultCodeData::new(mid, fmi);
    fault.pid = pid;
    fault.sid = sid;
    Ok(fault)
}

async fn cmd_decode(ctx: &Session, fault: &FaultCodeData) -> Result<()> {
    info!(code = %fault, "decoding");
    let enriched = composer()?
        .diagnose_code_enriched(fault, ctx.brand, ctx.model(), ctx.lang)
        .await;
    print_diagnosis(ctx, &enriched)
}

async fn cmd_photo(ctx: &Session, path: &Path) -> Result<()> {
    let image = read_image(path)?;
    let enriched = composer()?
        .diagnose_image_enriched(image, ctx.brand, ctx.model(), ctx.lang)
        .await
        .with_context(|| format!("Photo {:?} was not analysed", path))?;
    print_diagnosis(ctx, &enriched)
}

fn read_image(path: &Path) -> Result<Vec<u8>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read image {:?}", path))?;
    if bytes.is_empty() {
        bail!("Image {:?} is empty", path);
    }
    Ok(bytes)
}

async fn cmd_chat(ctx: &Session, message: &str, history_path: Option<&Path>) -> Result<()> {
    let mut history = match history_path {
        Some(path) if path.exists() => load_history(path)?,
        _ => Vec::new(),
    };

    let reply = composer()?
        .chat(&history, message, ctx.brand, ctx.model(), ctx.lang)
        .await;
    println!("{}", reply);

    if let Some(path) = history_path {
        history.push(ChatTurn::user(message));
        history.push(ChatTurn::model(reply));
        let json = serde_json::to_string_pretty(&history)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write chat history {:?}", path))?;
    }
    Ok(())
}

fn load_history(path: &Path) -> Result<Vec<ChatTurn>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read chat history {:?}", path))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid chat history in {:?}", path))
}

fn cmd_lookup(ctx: &Session, term: &str) -> Result<()> {
    let resolver = PartResolver::orion();
    let Some(found) = resolver.resolve_with_strategy(Some(term)) else {
        match ctx.format {
            OutputFormat::Json => println!("null"),
            OutputFormat::Text => println!("No catalog part matches {:?}", term),
        }
        return Ok(());
    };

    match ctx.format {
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct Lookup<'a> {
                part: &'a CatalogPart,
                strategy: String,
            }
            print_json(&Lookup {
                part: found.part,
                strategy: found.strategy.to_string(),
            })
        }
        OutputFormat::Text => {
            println!("{}", render_part(found.part));
            println!("Matched by: {}", found.strategy);
            Ok(())
        }
    }
}

fn cmd_catalog(ctx: &Session) -> Result<()> {
    let catalog = Catalog::orion();
    match ctx.format {
        OutputFormat::Json => print_json(&catalog.parts()),
        OutputFormat::Text => {
            for part in catalog.iter() {
                println!("{:<8} {:<36} {}", part.part_number, part.name, part.model);
            }
            Ok(())
        }
    }
}

fn cmd_brands(ctx: &Session, brand: Option<TruckBrand>) -> Result<()> {
    match (brand, ctx.format) {
        (Some(brand), OutputFormat::Json) => print_json(&brand.models()),
        (Some(brand), OutputFormat::Text) => {
            for model in brand.models() {
                println!("{}", model);
            }
            Ok(())
        }
        (None, OutputFormat::Json) => print_json(&TruckBrand::ALL),
        (None, OutputFormat::Text) => {
            for brand in TruckBrand::ALL {
                println!("{:<8} {} models", brand.as_str(), brand.models().len());
            }
            Ok(())
        }
    }
}

fn cmd_route(ctx: &Session, term: &str) -> Result<()> {
    let route = route_search(term);
    match ctx.format {
        OutputFormat::Json => print_json(&route),
        OutputFormat::Text => {
            println!("{}", render_route(route.as_ref()));
            Ok(())
        }
    }
}

fn print_diagnosis(ctx: &Session, enriched: &EnrichedDiagnosis) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => print_json(enriched),
        OutputFormat::Text => {
            print!("{}", render_diagnosis(enriched));
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to encode output")?;
    println!("{}", json);
    Ok(())
}

fn render_diagnosis(enriched: &EnrichedDiagnosis) -> String {
    let d = &enriched.diagnosis;
    let mut out = String::new();
    out.push_str(&format!("System:   {}\n", d.system));
    out.push_str(&format!("Severity: {}\n", d.severity.as_str().to_uppercase()));
    out.push_str(&format!("Part:     {}\n", enriched.part_headline()));
    out.push_str(&format!("\n{}\n", d.description));

    let sections: [(&str, &[String]); 2] = [("Symptoms", &d.symptoms), ("Causes", &d.causes)];
    for (title, items) in sections {
        if items.is_empty() {
            continue;
        }
        out.push_str(&format!("\n{}:\n", title));
        for item in items {
            out.push_str(&format!("  - {}\n", item));
        }
    }

    if !d.solutions.is_empty() {
        out.push_str("\nRepair steps:\n");
        for (i, step) in d.solutions.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, step));
        }
    }
    out
}

fn render_part(part: &CatalogPart) -> String {
    format!(
        "{} (#{})\nFits:     {}\nOEM refs: {}",
        part.name,
        part.part_number,
        part.model,
        part.oem_refs.join(", ")
    )
}

fn render_route(route: Option<&SearchRoute>) -> String {
    match route {
        None => "nothing to search".to_string(),
        Some(SearchRoute::Decoder) => "decoder".to_string(),
        Some(SearchRoute::Sensors { term }) => format!("sensors: {}", term),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use truckdiag_core::{enrich, fallback_diagnosis, NO_PART_MESSAGE};

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_decode_with_global_flags() {
        let cli = Cli::try_parse_from([
            "truckdiag", "--brand", "volvo", "--lang", "fr", "decode", "--mid", "128", "--sid",
            "232", "--fmi", "3",
        ])
        .unwrap();
        assert_eq!(cli.brand, TruckBrand::Volvo);
        assert_eq!(cli.lang, Language::Fr);
        assert!(matches!(cli.command, Commands::Decode { .. }));
    }

    #[test]
    fn test_decode_rejects_pid_with_sid() {
        let result = Cli::try_parse_from([
            "truckdiag", "decode", "--mid", "128", "--pid", "100", "--sid", "232", "--fmi", "3",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_unknown_brand() {
        let result = Cli::try_parse_from(["truckdiag", "--brand", "tesla", "catalog"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_fault_code_from_fields() {
        let fault = fault_code_from_args(
            Some("128".into()),
            None,
            Some("232".into()),
            Some("3".into()),
            None,
        )
        .unwrap();
        assert_eq!(fault.code_string(), "MID 128 SID 232 FMI 3");
    }

    #[test]
    fn test_fault_code_from_text() {
        let fault = fault_code_from_args(None, None, None, None, Some("mid 136 pid 94 fmi 5"))
            .unwrap();
        assert_eq!(fault.code_string(), "MID 136 PID 94 FMI 5");
        assert!(fault_code_from_args(None, None, None, None, Some("hello")).is_err());
    }

    #[test]
    fn test_read_image_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dash.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
        assert_eq!(read_image(&path).unwrap().len(), 4);

        let empty = dir.path().join("empty.jpg");
        std::fs::write(&empty, b"").unwrap();
        assert!(read_image(&empty).is_err());
        assert!(read_image(&dir.path().join("missing.jpg")).is_err());
    }

    #[test]
    fn test_load_history_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let turns = vec![ChatTurn::user("SID 232?"), ChatTurn::model("5V supply.")];
        std::fs::write(&path, serde_json::to_string(&turns).unwrap()).unwrap();
        assert_eq!(load_history(&path).unwrap(), turns);

        std::fs::write(&path, "not json").unwrap();
        assert!(load_history(&path).is_err());
    }

    #[test]
    fn test_render_fallback_diagnosis() {
        let enriched = enrich(fallback_diagnosis(), &PartResolver::orion());
        let text = render_diagnosis(&enriched);
        assert!(text.contains("Severity: HIGH"));
        assert!(text.contains("Part:     5V SENSOR SUPPLY (ECU) (#SID232)"));
        assert!(text.contains("  1. Disconnect sensors one by one to find the short"));
    }

    #[test]
    fn test_render_without_part() {
        let mut diagnosis = fallback_diagnosis();
        diagnosis.part_name = None;
        let text = render_diagnosis(&enrich(diagnosis, &PartResolver::orion()));
        assert!(text.contains(NO_PART_MESSAGE));
    }

    #[test]
    fn test_render_route() {
        assert_eq!(render_route(route_search("MID 128").as_ref()), "decoder");
        assert_eq!(render_route(route_search("").as_ref()), "nothing to search");
    }
}
