//! Command-line batch correction of CSV velocity records
use crate::correction::instruments::InstrumentFamily;
use crate::declination::{CachedDeclination, DeclinationProvider, FixedDeclination, IgrfDeclination};
use crate::error::VelmagError;
use crate::utils::records::{correct_records, read_records, write_records};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use tracing::info;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instrument {
    /// VEL3D-B Nobska MAVS-4, velocities in cm/s
    Nobska,
    /// Nortek Vector, Aquadopp II or Aquadopp, velocities in m/s
    Nortek,
}

impl From<Instrument> for InstrumentFamily {
    fn from(value: Instrument) -> Self {
        match value {
            Instrument::Nobska => InstrumentFamily::Nobska,
            Instrument::Nortek => InstrumentFamily::Nortek,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// CSV of raw samples with columns ntp_timestamp,lat,lon,z,u,v
    #[arg()]
    pub infile: PathBuf,

    /// Output CSV path for the corrected velocities in m/s
    #[arg()]
    pub outfile: PathBuf,

    /// Instrument family that recorded the samples
    #[arg(short, long, value_enum)]
    pub instrument: Instrument,

    /// Use this declination (degrees East of true North) instead of the IGRF model
    #[arg(short, long, allow_hyphen_values = true)]
    pub declination: Option<f64>,

    /// Correct the samples in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Memoize declination lookups for repeated positions and times
    #[arg(long)]
    pub cache: bool,
}

impl Args {
    pub fn provider(&self) -> Box<dyn DeclinationProvider> {
        let provider: Box<dyn DeclinationProvider> = match self.declination {
            Some(theta) => Box::new(FixedDeclination(theta)),
            None => Box::new(IgrfDeclination),
        };
        if self.cache {
            Box::new(CachedDeclination::new(provider))
        } else {
            provider
        }
    }
}

/// Corrects every record in `args.infile` and writes them to `args.outfile`.
///
/// Returns the number of records written.
///
/// # Errors
/// Will return `Err` if either file cannot be opened, the input is malformed, or the
/// declination provider fails.
pub fn run(args: &Args) -> Result<usize, VelmagError> {
    let records = read_records(BufReader::new(File::open(&args.infile)?))?;
    let provider = args.provider();
    let corrected = correct_records(
        args.instrument.into(),
        provider.as_ref(),
        &records,
        args.parallel,
    )?;
    write_records(BufWriter::new(File::create(&args.outfile)?), &corrected)?;
    info!(
        records = corrected.len(),
        outfile = %args.outfile.display(),
        "wrote corrected velocities"
    );
    Ok(corrected.len())
}
