//! Command-line interface for sdlschema

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::borrow::Cow;
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use indexmap::IndexMap;

#[cfg(feature = "cli")]
use sdlschema::{
    documents, grammar, Arguments, Dispatcher, EchoObserver, ElementSchema, Observer,
    ObserverResult, ParseOptions, SchemaRegistry,
};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "sdlschema")]
#[command(author, version, about = "SDL scene description parser and DTD generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the DTD of a schema, or check a published one
    Dtd {
        /// JSON schema file (defaults to the built-in SDL schema)
        #[arg(short, long, value_name = "SCHEMA")]
        schema: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Published DTD to compare with the schema
        #[arg(short, long, value_name = "DTD", conflicts_with = "output")]
        check: Option<PathBuf>,
    },

    /// Parse a document and report what it contains
    Parse {
        /// JSON schema file (defaults to the built-in SDL schema)
        #[arg(short, long, value_name = "SCHEMA")]
        schema: Option<PathBuf>,

        /// Skip content-model and undeclared-attribute checks
        #[arg(long)]
        no_validate: bool,

        /// Echo the document to stdout while parsing
        #[arg(short, long)]
        echo: bool,

        /// Path to the document
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Inspect a schema and display its elements
    Inspect {
        /// JSON schema file (defaults to the built-in SDL schema)
        #[arg(short, long, value_name = "SCHEMA")]
        schema: Option<PathBuf>,

        /// Show detailed information about a specific element
        #[arg(short, long)]
        element: Option<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

#[cfg(feature = "cli")]
fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Dtd {
            schema,
            output,
            check,
        } => cmd_dtd(schema, output, check),
        Commands::Parse {
            schema,
            no_validate,
            echo,
            file,
        } => cmd_parse(schema, no_validate, echo, file),
        Commands::Inspect {
            schema,
            element,
            json,
        } => cmd_inspect(schema, element, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn load_registry(schema: Option<PathBuf>) -> sdlschema::Result<Cow<'static, SchemaRegistry>> {
    match schema {
        Some(path) => Ok(Cow::Owned(SchemaRegistry::from_file(path)?)),
        None => Ok(Cow::Borrowed(SchemaRegistry::sdl())),
    }
}

#[cfg(feature = "cli")]
fn cmd_dtd(
    schema: Option<PathBuf>,
    output: Option<PathBuf>,
    check: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = load_registry(schema)?;

    if let Some(path) = check {
        let published = fs::read_to_string(&path)?;
        grammar::check(&registry, &published)?;
        println!("{} is up to date", path.display());
        return Ok(());
    }

    let dtd = grammar::generate(&registry);
    match output {
        Some(path) => {
            fs::write(&path, dtd.as_str())?;
            eprintln!("DTD written to {}", path.display());
        }
        None => print!("{}", dtd),
    }

    Ok(())
}

/// Counts the elements of a document by name
#[cfg(feature = "cli")]
#[derive(Debug, Default)]
struct ElementCounter {
    counts: IndexMap<String, usize>,
}

#[cfg(feature = "cli")]
impl Observer for ElementCounter {
    fn begin(&mut self, element: &ElementSchema, _args: &Arguments<'_>) -> ObserverResult {
        *self.counts.entry(element.name().to_string()).or_default() += 1;
        Ok(())
    }

    fn end(&mut self, _element: &ElementSchema) -> ObserverResult {
        Ok(())
    }
}

#[cfg(feature = "cli")]
fn cmd_parse(
    schema: Option<PathBuf>,
    no_validate: bool,
    echo: bool,
    file: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = load_registry(schema)?;
    let options = ParseOptions::new().validate(!no_validate);

    let mut echo_observer = EchoObserver::stdout();
    let mut counter = ElementCounter::default();

    let mut dispatcher = Dispatcher::with_options(&registry, options);
    if echo {
        dispatcher.add_observer(&mut echo_observer);
    }
    dispatcher.add_observer(&mut counter);
    documents::parse_file(&mut dispatcher, &file)?;
    drop(dispatcher);

    let total: usize = counter.counts.values().sum();
    eprintln!("{}: {} elements", file.display(), total);
    for (name, count) in &counter.counts {
        eprintln!("  {:<24} {}", name, count);
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_inspect(
    schema: Option<PathBuf>,
    element: Option<String>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = load_registry(schema)?;

    if let Some(name) = element {
        let decl = registry.get(&name)?;
        if json {
            let def = registry
                .to_definition()
                .elements
                .into_iter()
                .find(|def| def.name == name);
            println!("{}", serde_json::to_string_pretty(&def)?);
        } else {
            print_element_details(decl);
        }
        return Ok(());
    }

    if json {
        println!("{}", registry.to_json()?);
    } else {
        print_schema_summary(&registry);
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_schema_summary(registry: &SchemaRegistry) {
    println!("sdlschema v{}", sdlschema::VERSION);
    println!();
    println!("Schema Information:");
    println!("  Elements: {}", registry.len());
    println!();
    println!("=== Elements ===");
    for element in registry.elements() {
        println!(
            "  {} {} ({} attributes)",
            element.name(),
            grammar::content_model(element.containment()),
            element.attributes().len()
        );
    }
}

#[cfg(feature = "cli")]
fn print_element_details(element: &ElementSchema) {
    println!("Element: {}", element.name());
    println!("  Content: {}", grammar::content_model(element.containment()));

    if element.attributes().is_empty() {
        println!("  Attributes: (none)");
        return;
    }

    println!("  Attributes:");
    for spec in element.attributes() {
        println!(
            "    {:<28} {:<18} {}",
            spec.name(),
            spec.kind().to_string(),
            spec.usage()
        );
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
