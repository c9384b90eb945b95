use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cropcare",
    version,
    about = "Farm conditions dashboard: regional weather, soil health and crop advisory"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-run interactive setup
    Init,
    /// Validate config and test connections
    Check,
    /// List the supported regions
    Regions,
    /// Current conditions and advisory for a region
    Weather {
        /// State or union territory, e.g. "Punjab"
        region: String,
    },
    /// Seven-day forecast for a region
    Forecast { region: String },
    /// Classify a soil test against the optimal bands
    Soil {
        /// Nitrogen, mg/kg
        #[arg(long = "n")]
        nitrogen: f64,
        /// Phosphorus, mg/kg
        #[arg(long = "p")]
        phosphorus: f64,
        /// Potassium, mg/kg
        #[arg(long = "k")]
        potassium: f64,
        #[arg(long)]
        ph: f64,
    },
    /// Weather status and advisory for the given conditions
    Advise {
        /// Temperature, °C
        #[arg(long, allow_negative_numbers = true)]
        temp: f64,
        /// Rainfall, mm
        #[arg(long)]
        rainfall: f64,
        /// Relative humidity, %
        #[arg(long)]
        humidity: f64,
        /// Provider condition label, e.g. "Clear"
        #[arg(long, default_value = "")]
        condition: String,
    },
    /// Ask the crop service which crops suit these conditions
    Recommend {
        #[arg(long = "n")]
        nitrogen: f64,
        #[arg(long = "p")]
        phosphorus: f64,
        #[arg(long = "k")]
        potassium: f64,
        #[arg(long)]
        ph: f64,
        #[arg(long, allow_negative_numbers = true, required_unless_present = "region")]
        temp: Option<f64>,
        #[arg(long, required_unless_present = "region")]
        humidity: Option<f64>,
        #[arg(long, required_unless_present = "region")]
        rainfall: Option<f64>,
        /// Take temperature, humidity and rainfall from this region's current weather
        #[arg(long, conflicts_with_all = ["temp", "humidity", "rainfall"])]
        region: Option<String>,
    },
    /// Crop service suggestion for a state using its live conditions
    Regional { state: String },
    /// States the crop service knows about
    States,
    /// Growing details for a crop from the crop service
    CropInfo { crop: String },
    /// Search the pest library by name or symptom
    Pests {
        /// Empty lists every pest
        query: Option<String>,
    },
    /// Simulated pest detection for a plant photo
    Detect {
        /// Image file of the affected plant
        image: PathBuf,
    },
    /// Community feedback with the average rating
    Feedback,
    /// Market prices, optionally filtered by crop and market
    Prices {
        query: Option<String>,
        /// Exact market name, or "all"
        #[arg(long, default_value = "all")]
        market: String,
    },
    /// Ask the farming assistant a question
    Chat {
        message: String,
        /// English, Hindi, Marathi, Telugu, Tamil or Gujarati
        #[arg(long)]
        language: Option<String>,
    },
}
