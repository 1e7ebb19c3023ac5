use clap::{Parser, Subcommand, ValueEnum};
use digipin_rs::{
    CsvDigipinConfig, CsvToDigipin, DigipinCell, DigipinError, GeometryFormat, decode_digipin,
    distance_between_digipins, generate_digipin,
};
use env_logger::Env;
use log::{debug, info};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "digipin")]
#[command(about = "Encode, decode, and compute distances for India Post DIGIPIN codes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode latitude and longitude to a DIGIPIN code
    #[command(allow_negative_numbers = true)]
    Encode {
        /// Latitude in decimal degrees
        latitude: f64,
        /// Longitude in decimal degrees
        longitude: f64,
    },
    /// Decode a DIGIPIN code to the latitude and longitude of its cell centre
    Decode {
        /// DIGIPIN code, with or without hyphens
        #[arg(allow_hyphen_values = true)]
        code: String,
    },
    /// Compute the distance in km between two DIGIPIN codes
    Distance {
        /// First DIGIPIN code
        #[arg(allow_hyphen_values = true)]
        code1: String,
        /// Second DIGIPIN code
        #[arg(allow_hyphen_values = true)]
        code2: String,
    },
    /// Add DIGIPIN columns to a CSV file
    Csv {
        /// Input CSV file
        input: PathBuf,
        /// Output CSV file
        output: PathBuf,
        /// Latitude column to encode (requires --lon)
        #[arg(long, requires = "lon", conflicts_with_all = ["geometry", "code"])]
        lat: Option<String>,
        /// Longitude column to encode (requires --lat)
        #[arg(long, requires = "lat")]
        lon: Option<String>,
        /// WKT or GeoJSON geometry column to encode
        #[arg(long, conflicts_with = "code")]
        geometry: Option<String>,
        /// DIGIPIN code column to decode
        #[arg(long)]
        code: Option<String>,
        /// Columns to leave out of the output
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,
        /// Add the cell polygon in this format
        #[arg(long, value_enum)]
        cell_geometry: Option<CellGeometry>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CellGeometry {
    Wkt,
    Geojson,
}

impl From<CellGeometry> for GeometryFormat {
    fn from(value: CellGeometry) -> Self {
        match value {
            CellGeometry::Wkt => GeometryFormat::Wkt,
            CellGeometry::Geojson => GeometryFormat::GeoJson,
        }
    }
}

#[derive(Serialize)]
struct EncodeOutput<'a> {
    digipin: &'a str,
    latitude: f64,
    longitude: f64,
}

#[derive(Serialize)]
struct DecodeOutput<'a> {
    digipin: &'a str,
    latitude: f64,
    longitude: f64,
    min_latitude: f64,
    max_latitude: f64,
    min_longitude: f64,
    max_longitude: f64,
}

#[derive(Serialize)]
struct DistanceOutput<'a> {
    from: &'a str,
    to: &'a str,
    kilometers: f64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), DigipinError> {
    match cli.command {
        Commands::Encode {
            latitude,
            longitude,
        } => {
            debug!("encoding ({}, {})", latitude, longitude);
            let code = generate_digipin(latitude, longitude)?;
            if cli.json {
                print_json(&EncodeOutput {
                    digipin: &code,
                    latitude,
                    longitude,
                })?;
            } else {
                println!("{}", code);
            }
        }
        Commands::Decode { code } => {
            debug!("decoding {}", code);
            if cli.json {
                let cell = DigipinCell::from_code(&code)?;
                print_json(&DecodeOutput {
                    digipin: &cell.code,
                    latitude: cell.latitude(),
                    longitude: cell.longitude(),
                    min_latitude: cell.bounds.min().y,
                    max_latitude: cell.bounds.max().y,
                    min_longitude: cell.bounds.min().x,
                    max_longitude: cell.bounds.max().x,
                })?;
            } else {
                let coord = decode_digipin(&code)?;
                println!("{:.6}, {:.6}", coord.latitude, coord.longitude);
            }
        }
        Commands::Distance { code1, code2 } => {
            let km = distance_between_digipins(&code1, &code2)?;
            if cli.json {
                print_json(&DistanceOutput {
                    from: &code1,
                    to: &code2,
                    kilometers: km,
                })?;
            } else {
                println!("{:.2} km", km);
            }
        }
        Commands::Csv {
            input,
            output,
            lat,
            lon,
            geometry,
            code,
            exclude,
            cell_geometry,
        } => {
            let mut config = match (lat, lon, geometry, code) {
                (Some(lat), Some(lon), None, None) => CsvDigipinConfig::from_coords(lat, lon),
                (None, None, Some(geometry), None) => CsvDigipinConfig::from_geometry(geometry),
                (None, None, None, Some(code)) => CsvDigipinConfig::from_code(code),
                _ => {
                    return Err(DigipinError::CsvError(
                        "Specify one of --lat/--lon, --geometry or --code".to_string(),
                    ));
                }
            }
            .exclude(exclude);
            if let Some(format) = cell_geometry {
                config = config.with_cell_geometry(format.into());
            }

            info!("converting {} to {}", input.display(), output.display());
            let summary = input.to_digipin_csv(&output, &config)?;
            if cli.json {
                print_json(&serde_json::json!({
                    "rows": summary.rows,
                    "failures": summary.failures,
                }))?;
            } else {
                println!("{} rows written, {} failed", summary.rows, summary.failures);
            }
        }
    }
    Ok(())
}

fn print_json(value: &impl Serialize) -> Result<(), DigipinError> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| DigipinError::IoError(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
