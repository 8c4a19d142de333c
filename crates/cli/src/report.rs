//! CSV and JSON writers for the CLI subcommands.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use bandmodes_core::{
    bands::BandSeries, estimator::EffectiveParameters, grouping::ClusterSummary, view::FieldPlane,
    ModeRecord,
};
use serde::Serialize;

pub fn open_writer(dest: Option<&Path>) -> io::Result<Box<dyn Write>> {
    Ok(match dest {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    })
}

pub fn write_json<T: Serialize + ?Sized>(value: &T, mut writer: Box<dyn Write>) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()
}

/// Owned row for mode listings.
#[derive(Debug, Serialize)]
pub struct ModeRow<'a> {
    pub index: usize,
    pub polarization: &'a str,
    pub band: usize,
    pub k_point: [f64; 3],
    pub freq: f64,
}

impl<'a> ModeRow<'a> {
    pub fn new(index: usize, mode: &'a ModeRecord) -> Self {
        Self {
            index,
            polarization: mode.polarization().as_str(),
            band: mode.band(),
            k_point: mode.k_point(),
            freq: mode.freq(),
        }
    }
}

pub fn write_modes_csv(rows: &[ModeRow<'_>], mut writer: Box<dyn Write>) -> io::Result<()> {
    writeln!(writer, "index,polarization,band,kx,ky,kz,freq")?;
    for row in rows {
        let [kx, ky, kz] = row.k_point;
        writeln!(
            writer,
            "{},{},{},{kx},{ky},{kz},{}",
            row.index, row.polarization, row.band, row.freq
        )?;
    }
    writer.flush()
}

pub fn write_groups_csv(summary: &[ClusterSummary], mut writer: Box<dyn Write>) -> io::Result<()> {
    writeln!(writer, "polarization,kx,ky,kz,key,count,bands,freqs")?;
    for leaf in summary {
        let [kx, ky, kz] = leaf.k_point;
        let bands: Vec<String> = leaf.bands.iter().map(usize::to_string).collect();
        let freqs: Vec<String> = leaf.freqs.iter().map(f64::to_string).collect();
        writeln!(
            writer,
            "{},{kx},{ky},{kz},{},{},{},{}",
            leaf.polarization,
            leaf.key,
            leaf.bands.len(),
            bands.join(" "),
            freqs.join(" ")
        )?;
    }
    writer.flush()
}

#[derive(Debug, Serialize)]
pub struct EstimateRow<'a> {
    #[serde(flatten)]
    pub mode: ModeRow<'a>,
    #[serde(flatten)]
    pub params: EffectiveParameters,
}

pub fn write_estimates_csv(rows: &[EstimateRow<'_>], mut writer: Box<dyn Write>) -> io::Result<()> {
    writeln!(
        writer,
        "index,polarization,band,kx,ky,kz,freq,eps_eff_x,eps_eff_y,eps_eff_z,mu_eff_x,mu_eff_y,mu_eff_z,z_eff_x,z_eff_y,z_eff_z"
    )?;
    for row in rows {
        let [kx, ky, kz] = row.mode.k_point;
        write!(
            writer,
            "{},{},{},{kx},{ky},{kz},{}",
            row.mode.index, row.mode.polarization, row.mode.band, row.mode.freq
        )?;
        let p = &row.params;
        for value in [
            p.eps_eff_x, p.eps_eff_y, p.eps_eff_z, p.mu_eff_x, p.mu_eff_y, p.mu_eff_z, p.z_eff_x,
            p.z_eff_y, p.z_eff_z,
        ] {
            match value {
                Some(v) => write!(writer, ",{v}")?,
                None => write!(writer, ",")?,
            }
        }
        writeln!(writer)?;
    }
    writer.flush()
}

pub fn write_bands_csv(series: &BandSeries, mut writer: Box<dyn Write>) -> io::Result<()> {
    let max_bands = series.bands.len();
    write!(writer, "k_index,kx,ky,kz,k_distance")?;
    for band_idx in 0..max_bands {
        write!(writer, ",band{}", band_idx + 1)?;
    }
    writeln!(writer)?;

    for (idx, k) in series.k_path.iter().enumerate() {
        let distance = series.distances.get(idx).copied().unwrap_or_default();
        write!(writer, "{idx},{},{},{},{distance}", k[0], k[1], k[2])?;
        for band in &series.bands {
            match band.get(idx).copied().filter(|f| f.is_finite()) {
                Some(freq) => write!(writer, ",{freq}")?,
                None => write!(writer, ",")?,
            }
        }
        writeln!(writer)?;
    }

    writer.flush()
}

pub fn write_plane_csv(plane: &FieldPlane, mut writer: Box<dyn Write>) -> io::Result<()> {
    writeln!(writer, "ix,iy,{}", plane.quantity)?;
    for ix in 0..plane.nx {
        for iy in 0..plane.ny {
            writeln!(writer, "{ix},{iy},{}", plane.get(ix, iy))?;
        }
    }
    writer.flush()
}
