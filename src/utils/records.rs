//! CSV batch records of raw and corrected velocity samples
use crate::correction::instruments::InstrumentFamily;
use crate::declination::DeclinationProvider;
use crate::error::VelmagError;
use ndarray::{Array1, ArrayD};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use tracing::debug;

type Result<T> = std::result::Result<T, VelmagError>;

/// One raw sample, velocities in the instrument's native units and magnetic frame.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VelocityRecord {
    pub ntp_timestamp: f64,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub z: f64,
    pub u: f64,
    pub v: f64,
}

/// One corrected sample, velocities in m/s in the true-North frame.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CorrectedRecord {
    pub ntp_timestamp: f64,
    pub lat: f64,
    pub lon: f64,
    pub z: f64,
    pub u_cor: f64,
    pub v_cor: f64,
}

/// Reads `VelocityRecord`s from CSV with a header row.
///
/// # Errors
/// Will return `Err` if a row is missing a required column or a value is not numeric.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<VelocityRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let records = csv_reader
        .deserialize::<VelocityRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    debug!(records = records.len(), "read velocity records");
    Ok(records)
}

/// Writes `CorrectedRecord`s as CSV with a header row.
///
/// # Errors
/// Will return `Err` if writing to `writer` fails.
pub fn write_records<W: Write>(writer: W, records: &[CorrectedRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for rec in records {
        csv_writer.serialize(rec)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Corrects a batch of records taken by one instrument family.
///
/// The whole batch is one call: a single out-of-range position fills every record.
///
/// # Errors
/// Will return `Err` if the declination provider fails for any record.
pub fn correct_records<P: DeclinationProvider + ?Sized>(
    family: InstrumentFamily,
    provider: &P,
    records: &[VelocityRecord],
    parallel: bool,
) -> Result<Vec<CorrectedRecord>> {
    let column = |f: fn(&VelocityRecord) -> f64| -> ArrayD<f64> {
        records.iter().map(f).collect::<Array1<f64>>().into_dyn()
    };
    let u = column(|r| r.u);
    let v = column(|r| r.v);
    let lat = column(|r| r.lat);
    let lon = column(|r| r.lon);
    let ntp_timestamp = column(|r| r.ntp_timestamp);
    let z = column(|r| r.z);

    let corrected = if parallel {
        family.par_mag_corr(
            provider,
            u.view(),
            v.view(),
            lat.view(),
            lon.view(),
            ntp_timestamp.view(),
            z.view(),
        )?
    } else {
        family.mag_corr(
            provider,
            u.view(),
            v.view(),
            lat.view(),
            lon.view(),
            ntp_timestamp.view(),
            z.view(),
        )?
    };

    Ok(records
        .iter()
        .zip(corrected.east.iter().zip(corrected.north.iter()))
        .map(|(rec, (&u_cor, &v_cor))| CorrectedRecord {
            ntp_timestamp: rec.ntp_timestamp,
            lat: rec.lat,
            lon: rec.lon,
            z: rec.z,
            u_cor,
            v_cor,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declination::FixedDeclination;
    use crate::utils::constants::FILL_VALUE;

    const INPUT: &str = "ntp_timestamp,lat,lon,z,u,v
3597523200.0,45.0,-125.0,10.0,100.0,0.0
3597523201.0,45.0,-125.0,10.0,0.0,-50.0
";

    #[test]
    fn read_with_and_without_depth() {
        let records = read_records(INPUT.as_bytes()).expect("valid csv");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].v, -50.0);

        let no_depth = "ntp_timestamp, lat, lon, u, v\n0.0, 1.0, 2.0, 3.0, 4.0\n";
        let records = read_records(no_depth.as_bytes()).expect("z is optional");
        assert_eq!(records[0].z, 0.0);
        assert_eq!(records[0].u, 3.0);
    }

    #[test]
    fn missing_column_is_an_error() {
        let bad = "ntp_timestamp,lat,lon,u\n0.0,1.0,2.0,3.0\n";
        assert!(matches!(
            read_records(bad.as_bytes()),
            Err(VelmagError::Csv(_))
        ));
    }

    #[test]
    fn correct_and_write_batch() {
        let records = read_records(INPUT.as_bytes()).expect("valid csv");
        let corrected = correct_records(
            InstrumentFamily::Nobska,
            &FixedDeclination(0.0),
            &records,
            false,
        )
        .expect("fixed provider never fails");
        assert_eq!(corrected[0].u_cor, 1.0);
        assert_eq!(corrected[0].v_cor, 0.0);
        assert_eq!(corrected[1].v_cor, -0.5);
        assert_eq!(corrected[1].z, 10.0);

        let mut out = vec![];
        write_records(&mut out, &corrected).expect("writing to a vec");
        let text = String::from_utf8(out).expect("csv is utf-8");
        assert!(text.starts_with("ntp_timestamp,lat,lon,z,u_cor,v_cor\n"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn one_bad_position_fills_the_batch() {
        let mut records = read_records(INPUT.as_bytes()).expect("valid csv");
        records[1].lat = 91.0;
        let corrected = correct_records(
            InstrumentFamily::Nortek,
            &FixedDeclination(12.0),
            &records,
            true,
        )
        .expect("fill values are not an error");
        assert!(corrected
            .iter()
            .all(|r| r.u_cor == FILL_VALUE && r.v_cor == FILL_VALUE));
    }
}
