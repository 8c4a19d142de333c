//! Inspect persisted photonic-crystal mode stores.
//!
//! ```sh
//! bandmodes summary crystal.json
//! bandmodes group crystal.json --tolerance 0.01
//! bandmodes find crystal.json --pol te --k 0.5,0,0 --freq 0.31
//! bandmodes estimate crystal.json --pol te --format json
//! bandmodes bands crystal.json --pol te -o bands.csv
//! bandmodes field crystal.json --index 3 --which e --component 2
//! ```

mod report;

use std::path::{Path, PathBuf};

use bandmodes_core::{
    config::CrystalConfig,
    lookup::ModeQuery,
    symmetry::{FieldKind, MirrorClassifier},
    view::{cone_set, field_plane, FieldQuantity},
    ModeRecord, PhotonicCrystal, Polarization,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use report::{EstimateRow, ModeRow};

type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(name = "bandmodes", about = "Post-process photonic band-solver mode stores")]
#[command(version)]
struct Cli {
    /// Only print warnings and errors (stderr)
    #[arg(long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// Print debug diagnostics (stderr)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct Output {
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,
    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FieldArg {
    E,
    H,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print settings, mode counts and band gaps.
    Summary {
        /// Crystal JSON written by `PhotonicCrystal::save`
        crystal: PathBuf,
    },
    /// Validate a crystal TOML configuration.
    Validate {
        config: PathBuf,
    },
    /// Group modes by polarization, wavevector and frequency.
    Group {
        crystal: PathBuf,
        /// Chained frequency tolerance (defaults to the stored analysis setting)
        #[arg(long)]
        tolerance: Option<f64>,
        #[command(flatten)]
        out: Output,
    },
    /// Find modes near a frequency at a wavevector.
    Find {
        crystal: PathBuf,
        #[arg(long)]
        pol: String,
        /// Wavevector as kx,ky,kz
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
        k: Vec<f64>,
        #[arg(long)]
        freq: f64,
        /// Frequency half-width (inclusive)
        #[arg(long)]
        tolerance: Option<f64>,
        /// Match wavevectors within this distance instead of exactly
        #[arg(long)]
        k_max_distance: Option<f64>,
        #[command(flatten)]
        out: Output,
    },
    /// Estimate effective parameters for stored modes.
    Estimate {
        crystal: PathBuf,
        /// Restrict to one polarization
        #[arg(long)]
        pol: Option<String>,
        #[command(flatten)]
        out: Output,
    },
    /// Export the band diagram of one polarization.
    Bands {
        crystal: PathBuf,
        #[arg(long)]
        pol: String,
        #[command(flatten)]
        out: Output,
    },
    /// Export one z-plane of a mode field component.
    Field {
        crystal: PathBuf,
        /// Mode index in store order
        #[arg(long)]
        index: usize,
        #[arg(long, value_enum, default_value_t = FieldArg::E)]
        which: FieldArg,
        #[arg(long, default_value_t = 2)]
        component: usize,
        #[arg(long, default_value_t = 0)]
        plane: usize,
        /// real, imag or abs
        #[arg(long, default_value = "real")]
        quantity: String,
        #[command(flatten)]
        out: Output,
    },
    /// Export E and H arrow data of a mode on a shared scale (JSON).
    Cones {
        crystal: PathBuf,
        #[arg(long)]
        index: usize,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Attach mirror-symmetry annotations to every mode and save in place.
    Classify {
        crystal: PathBuf,
        #[arg(long, value_enum, default_value_t = FieldArg::E)]
        which: FieldArg,
    },
}

fn main() -> CliResult {
    let cli = Cli::parse();
    let level = if cli.quiet {
        LevelFilter::Warn
    } else if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Summary { crystal } => summary(&load(&crystal)?),
        Commands::Validate { config } => {
            let parsed = CrystalConfig::from_file(&config)?;
            println!(
                "Configuration is valid: {} ({} lattice, {} bands, {} k-points after interpolation)",
                config.display(),
                parsed.crystal.lattice,
                parsed.crystal.num_bands,
                parsed.crystal.k_points_interpolated().len()
            );
            Ok(())
        }
        Commands::Group {
            crystal,
            tolerance,
            out,
        } => {
            let crystal = load(&crystal)?;
            let tolerance = tolerance.unwrap_or(crystal.analysis().frequency_tolerance);
            let summary = crystal.group_modes(tolerance)?.summary();
            log::info!("[cli] {} clusters at tolerance {tolerance}", summary.len());
            let writer = report::open_writer(out.output.as_deref())?;
            match out.format {
                Format::Csv => report::write_groups_csv(&summary, writer)?,
                Format::Json => report::write_json(&summary, writer)?,
            }
            Ok(())
        }
        Commands::Find {
            crystal,
            pol,
            k,
            freq,
            tolerance,
            k_max_distance,
            out,
        } => {
            let crystal = load(&crystal)?;
            let k_point = parse_k(&k)?;
            let mut query = ModeQuery::new(pol, k_point, freq)
                .with_freq_tolerance(tolerance.unwrap_or(crystal.analysis().freq_tolerance));
            if let Some(distance) = k_max_distance.or(crystal.analysis().k_max_distance) {
                query = query.with_k_max_distance(distance);
            }
            let rows = indexed_rows(&crystal, |mode| query.matches(mode));
            log::info!("[cli] {} matching modes", rows.len());
            let writer = report::open_writer(out.output.as_deref())?;
            match out.format {
                Format::Csv => report::write_modes_csv(&rows, writer)?,
                Format::Json => report::write_json(&rows, writer)?,
            }
            Ok(())
        }
        Commands::Estimate { crystal, pol, out } => {
            let crystal = load(&crystal)?;
            let pol = pol.map(Polarization::from);
            let rows = indexed_rows(&crystal, |mode| {
                pol.as_ref().map_or(true, |p| mode.polarization() == p)
            });
            let modes: Vec<&ModeRecord> = rows
                .iter()
                .filter_map(|row| crystal.modes().get(row.index))
                .collect();
            let params = crystal.effective_parameters(&modes);
            let rows: Vec<EstimateRow<'_>> = rows
                .into_iter()
                .zip(params)
                .map(|(mode, params)| EstimateRow { mode, params })
                .collect();
            let writer = report::open_writer(out.output.as_deref())?;
            match out.format {
                Format::Csv => report::write_estimates_csv(&rows, writer)?,
                Format::Json => report::write_json(&rows, writer)?,
            }
            Ok(())
        }
        Commands::Bands { crystal, pol, out } => {
            let crystal = load(&crystal)?;
            let series = crystal.band_series(&Polarization::from(pol))?;
            for gap in series.significant_gaps(1.0) {
                log::info!(
                    "[cli] gap {:.2}% between {:.4} and {:.4}",
                    gap.percent,
                    gap.lower,
                    gap.upper
                );
            }
            let writer = report::open_writer(out.output.as_deref())?;
            match out.format {
                Format::Csv => report::write_bands_csv(&series, writer)?,
                Format::Json => report::write_json(&series, writer)?,
            }
            Ok(())
        }
        Commands::Field {
            crystal,
            index,
            which,
            component,
            plane,
            quantity,
            out,
        } => {
            let crystal = load(&crystal)?;
            let mode = mode_at(&crystal, index)?;
            let field = match which {
                FieldArg::E => mode.e_field(),
                FieldArg::H => mode.h_field(),
            };
            let quantity: FieldQuantity = quantity.parse()?;
            let plane = field_plane(field, component, plane, quantity)?;
            let writer = report::open_writer(out.output.as_deref())?;
            match out.format {
                Format::Csv => report::write_plane_csv(&plane, writer)?,
                Format::Json => report::write_json(&plane, writer)?,
            }
            Ok(())
        }
        Commands::Cones {
            crystal,
            index,
            output,
        } => {
            let crystal = load(&crystal)?;
            let mode = mode_at(&crystal, index)?;
            let cones = cone_set([mode.e_field(), mode.h_field()])?;
            report::write_json(&cones, report::open_writer(output.as_deref())?)?;
            Ok(())
        }
        Commands::Classify { crystal: path, which } => {
            let mut crystal = load(&path)?;
            let kind = match which {
                FieldArg::E => FieldKind::Electric,
                FieldArg::H => FieldKind::Magnetic,
            };
            crystal.classify_symmetries(&MirrorClassifier::new(kind))?;
            crystal.save(&path)?;
            Ok(())
        }
    }
}

fn load(path: &Path) -> CliResult<PhotonicCrystal> {
    log::info!("[cli] loading crystal {}", path.display());
    Ok(PhotonicCrystal::load(path)?)
}

fn parse_k(values: &[f64]) -> CliResult<[f64; 3]> {
    <[f64; 3]>::try_from(values)
        .map_err(|_| format!("expected 3 wavevector components, got {}", values.len()).into())
}

fn mode_at(crystal: &PhotonicCrystal, index: usize) -> CliResult<&ModeRecord> {
    crystal.modes().get(index).ok_or_else(|| {
        format!(
            "mode index {index} out of range; the store holds {} modes",
            crystal.modes().len()
        )
        .into()
    })
}

fn indexed_rows<'a>(
    crystal: &'a PhotonicCrystal,
    keep: impl Fn(&ModeRecord) -> bool,
) -> Vec<ModeRow<'a>> {
    crystal
        .modes()
        .iter()
        .enumerate()
        .filter(|(_, mode)| keep(mode))
        .map(|(index, mode)| ModeRow::new(index, mode))
        .collect()
}

fn summary(crystal: &PhotonicCrystal) -> CliResult {
    let settings = crystal.settings();
    println!("lattice      {}", settings.lattice);
    println!("num_bands    {}", settings.num_bands);
    println!("resolution   {:?}", settings.resolution.per_axis());
    println!(
        "k-points     {} ({} interpolated)",
        crystal.k_points().len(),
        crystal.k_points_interpolated().len()
    );
    println!("modes        {}", crystal.modes().len());
    for pol in crystal.polarizations() {
        let count = crystal
            .modes()
            .iter()
            .filter(|mode| mode.polarization() == pol)
            .count();
        println!();
        println!("[{pol}] {count} modes");
        for gap in crystal.gaps(pol).unwrap_or_default() {
            println!(
                "  gap {:6.2}%  {:.4} .. {:.4}",
                gap.percent, gap.lower, gap.upper
            );
        }
    }
    Ok(())
}
