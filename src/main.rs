/// Version injected at compile time via HREFLINK_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("HREFLINK_VERSION") {
    Some(v) => v,
    None => "dev",
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hreflink::config::Config;
use hreflink::resource::request::{SOURCE_SCHEDULE_HREF_PROPERTY, SOURCE_SCHEDULE_ID_PROPERTY};
use hreflink::tree::HREF_PROPERTY;
use hreflink::{ApiRequest, HrefAnnotator, Registry, Resource, ResourceType, TreeNode};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Annotate cluster management API result trees with hypermedia links
#[derive(Parser, Debug)]
#[command(name = "hreflink", version, about, long_about = None)]
struct Args {
    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Annotate a result tree with hrefs
    Annotate {
        /// Requested resource path, relative to the base URI (e.g. clusters/c1/requests)
        #[arg(short, long)]
        path: String,

        /// API base URI (overrides config)
        #[arg(long)]
        base_uri: Option<String>,

        /// Tree file to read (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Input format
        #[arg(long, value_enum, default_value = "auto")]
        format: InputFormat,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Rewrite a single request href
    Rewrite {
        /// Generic href of the request
        href: String,

        /// Request id
        #[arg(long)]
        id: String,

        /// Id of the schedule that created the request
        #[arg(long)]
        schedule_id: Option<String>,
    },

    /// List registered resource definitions
    Types,

    /// Show or update the saved configuration
    Config {
        /// Save a new API base URI
        #[arg(long)]
        base_uri: Option<String>,

        /// Save the pretty-print default
        #[arg(long)]
        pretty: Option<bool>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InputFormat {
    Auto,
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("hreflink {} started with log level: {:?}", VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("hreflink").join("hreflink.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".hreflink").join("hreflink.log");
    }
    PathBuf::from("hreflink.log")
}

fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    let mut config = Config::load();
    let registry = Registry::standard().context("Invalid resource definitions")?;

    match args.command {
        Command::Annotate {
            path,
            base_uri,
            input,
            format,
            pretty,
        } => {
            let base = config.effective_base_uri(base_uri.as_deref())?;
            let request = ApiRequest::resolve(&base, &path)
                .with_context(|| format!("Invalid resource path '{}'", path))?;
            tracing::info!("Annotating result of {}", request.uri());

            let mut root = read_tree(input.as_deref(), format)?;
            HrefAnnotator::new(&registry)
                .annotate(&request, &mut root)
                .context("Failed to annotate result tree")?;

            let output = if pretty || config.pretty {
                serde_json::to_string_pretty(&root)?
            } else {
                serde_json::to_string(&root)?
            };
            println!("{}", output);
        }
        Command::Rewrite {
            href,
            id,
            schedule_id,
        } => {
            let key = registry.schema().key_property_id(ResourceType::Request)?;
            let mut resource = Resource::new(ResourceType::Request).with_property(key, scalar(&id));
            if let Some(schedule_id) = schedule_id {
                resource.set_property(SOURCE_SCHEDULE_ID_PROPERTY, scalar(&schedule_id));
            }

            let mut node = TreeNode::resource(resource);
            node.set_property(HREF_PROPERTY, href.clone());
            let mut root = TreeNode::root().with_child(node);

            HrefAnnotator::new(&registry).annotate(&ApiRequest::new(href), &mut root)?;

            let node = &root.children()[0];
            for key in [HREF_PROPERTY, SOURCE_SCHEDULE_HREF_PROPERTY] {
                if let Some(value) = node.property(key) {
                    println!("{}: {}", key, value);
                }
            }
        }
        Command::Types => {
            for def in registry.definitions() {
                let subs: Vec<_> = def
                    .sub_resource_definitions()
                    .iter()
                    .map(|s| s.resource_type().to_string())
                    .collect();
                let processors: Vec<_> = def.post_processors().iter().map(|p| p.name()).collect();
                println!(
                    "{:<16} {:<18} {:<16} key={} sub=[{}] post=[{}]",
                    def.resource_type(),
                    def.plural_name(),
                    def.singular_name(),
                    registry.schema().key_property_id(def.resource_type())?,
                    subs.join(", "),
                    processors.join(", ")
                );
            }
        }
        Command::Config { base_uri, pretty } => {
            if let Some(uri) = base_uri {
                config.set_base_uri(&uri)?;
            }
            if let Some(pretty) = pretty {
                config.set_pretty(pretty)?;
            }
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

/// Numeric ids stay numbers so they render the way the API stores them
fn scalar(raw: &str) -> Value {
    raw.parse::<i64>()
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(raw))
}

fn read_tree(input: Option<&Path>, format: InputFormat) -> Result<TreeNode> {
    let content = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {:?}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let yaml = match format {
        InputFormat::Json => false,
        InputFormat::Yaml => true,
        InputFormat::Auto => input
            .and_then(|p| p.extension())
            .is_some_and(|ext| ext == "yaml" || ext == "yml"),
    };

    if yaml {
        serde_yaml::from_str(&content).context("Failed to parse YAML result tree")
    } else {
        serde_json::from_str(&content).context("Failed to parse JSON result tree")
    }
}
