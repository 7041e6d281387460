use criterion::{criterion_group, criterion_main, Criterion};
use ndarray::{arr0, Array, ArrayD};
use velmag::correction::{par_vel_mag_correction, vel_mag_correction, VerticalReference};
use velmag::declination::{CachedDeclination, DeclinationProvider, IgrfDeclination};

const SAMPLES: usize = 4096;

struct Inputs {
    u: ArrayD<f64>,
    v: ArrayD<f64>,
    lat: ArrayD<f64>,
    lon: ArrayD<f64>,
    ntp_timestamp: ArrayD<f64>,
    z: ArrayD<f64>,
}

fn inputs() -> Inputs {
    Inputs {
        u: Array::linspace(-150.0, 150.0, SAMPLES).into_dyn(),
        v: Array::linspace(40.0, -40.0, SAMPLES).into_dyn(),
        lat: arr0(44.64).into_dyn(),
        lon: arr0(-124.30).into_dyn(),
        // One sample per second through early 2014
        ntp_timestamp: Array::linspace(
            3_597_523_200.0,
            3_597_523_200.0 + SAMPLES as f64 - 1.0,
            SAMPLES,
        )
        .into_dyn(),
        z: arr0(25.0).into_dyn(),
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let inputs = inputs();
    c.bench_function("IGRF correction", |b| {
        b.iter(|| correct(&inputs, false, &IgrfDeclination))
    });
    c.bench_function("Parallel IGRF correction", |b| {
        b.iter(|| correct(&inputs, true, &IgrfDeclination))
    });
    let cached = CachedDeclination::new(IgrfDeclination);
    c.bench_function("Cached IGRF correction", |b| {
        b.iter(|| correct(&inputs, false, &cached))
    });
}

fn correct<P: DeclinationProvider + ?Sized>(
    inputs: &Inputs,
    parallel: bool,
    provider: &P,
) -> (ArrayD<f64>, ArrayD<f64>) {
    let Inputs {
        u,
        v,
        lat,
        lon,
        ntp_timestamp,
        z,
    } = inputs;
    let corrected = if parallel {
        par_vel_mag_correction(
            provider,
            u.view(),
            v.view(),
            lat.view(),
            lon.view(),
            ntp_timestamp.view(),
            z.view(),
            VerticalReference::Depth,
        )
    } else {
        vel_mag_correction(
            provider,
            u.view(),
            v.view(),
            lat.view(),
            lon.view(),
            ntp_timestamp.view(),
            z.view(),
            VerticalReference::Depth,
        )
    };
    corrected.expect("2014 is inside the model epoch")
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
