use clap::{Parser, Subcommand, ValueEnum};
use sous::config::Config;
use sous::units::{
    self, format_quantity, Dimension, OptimalUnitSelector, Quantity, QuantityConverter,
    UnitCatalog, UnitFormatter,
};
use sous::validation::{self, ValidationErrorState};
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sous")]
#[command(about = "Recipe quantity conversion and validation-error tools", long_about = None)]
struct Cli {
    /// Config file (TOML)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum DimensionArg {
    Volume,
    Weight,
}

impl From<DimensionArg> for Dimension {
    fn from(arg: DimensionArg) -> Self {
        match arg {
            DimensionArg::Volume => Dimension::Volume,
            DimensionArg::Weight => Dimension::Weight,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount between two units
    Convert {
        amount: f64,
        from: String,
        /// Target unit (default: configured or optimal unit)
        to: Option<String>,
    },

    /// Show an amount in every unit of its dimension
    Table { amount: f64, unit: String },

    /// Pick the most readable unit for an amount
    Optimal { amount: f64, unit: String },

    /// Multiply an amount and re-pick the unit (e.g. doubling a recipe)
    Scale {
        amount: f64,
        unit: String,
        factor: f64,
    },

    /// Parse free text such as "1 1/2 cups"
    Parse { text: String },

    /// List the unit catalog
    Units {
        #[arg(value_enum)]
        dimension: Option<DimensionArg>,
    },

    /// Normalize a validation error payload (JSON) into the error tree
    Errors {
        /// Payload file (default: stdin)
        file: Option<String>,

        #[arg(long, default_value_t = 0)]
        ingredients: usize,

        #[arg(long, default_value_t = 0)]
        steps: usize,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(cli.command, &config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Config::load_from_file(path)?),
        None => Ok(Config::empty()),
    }
}

fn init_logging(config: &Config) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = UnitCatalog::standard();
    let converter = QuantityConverter::new(catalog);

    match command {
        Commands::Convert { amount, from, to } => {
            let dimension = dimension_of(catalog, &from)?;
            let quantity = Quantity::new(amount, from);

            let result = match to {
                Some(to) => converter.convert_quantity(&quantity, &to, dimension)?,
                None => UnitFormatter::new(converter, config.unit_preferences())
                    .resolve(&quantity, dimension, None),
            };
            println!("{}", format_quantity(&result));
        }
        Commands::Table { amount, unit } => {
            let dimension = dimension_of(catalog, &unit)?;
            let values = converter.calculate_all_units(&Quantity::new(amount, unit), dimension);
            for (code, value) in values.iter() {
                println!("{:>8}  {}", code, value);
            }
        }
        Commands::Optimal { amount, unit } => {
            let dimension = dimension_of(catalog, &unit)?;
            let optimal = OptimalUnitSelector::new(converter)
                .find_optimal_unit(&Quantity::new(amount, unit), dimension);
            println!("{}", format_quantity(&optimal));
        }
        Commands::Scale {
            amount,
            unit,
            factor,
        } => {
            if factor < 0.0 {
                return Err(format!("Scale factor must not be negative: {}", factor).into());
            }
            let dimension = dimension_of(catalog, &unit)?;
            let scaled = OptimalUnitSelector::new(converter).scale_quantity(
                &Quantity::new(amount, unit),
                factor,
                dimension,
            );
            println!("{}", format_quantity(&scaled));
        }
        Commands::Parse { text } => {
            let (quantity, dimension) = units::parse_quantity(catalog, &text)?;
            println!("{} ({})", format_quantity(&quantity), dimension);
        }
        Commands::Units { dimension } => {
            let dimensions = match dimension {
                Some(d) => vec![d.into()],
                None => vec![Dimension::Volume, Dimension::Weight],
            };
            for dimension in dimensions {
                println!("{}:", dimension);
                for unit in catalog.units(dimension) {
                    println!("  {:<8} {:<12} {}", unit.code, unit.label, unit.aliases.join(", "));
                }
            }
        }
        Commands::Errors {
            file,
            ingredients,
            steps,
        } => {
            let content = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let payload: serde_json::Value = serde_json::from_str(&content)?;

            let mut state = ValidationErrorState::new(ingredients, steps);
            validation::apply(&mut state, payload, None);

            // Print the rendered tree if any
            if state.has_errors() {
                eprintln!("{}", state);
            }
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
    }

    Ok(())
}

fn dimension_of(catalog: &UnitCatalog, code: &str) -> Result<Dimension, String> {
    catalog
        .dimension_of(code)
        .ok_or_else(|| format!("Unknown unit '{}'", code))
}
