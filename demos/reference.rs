use polyagamma::{Method, PolyaGamma};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt::Write as WriteTrait;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Draws `--n` Polya-Gamma samples for each of the positional command line arguments
/// (interpreted as `z` values) and writes them to a single CSV file with one column per
/// `z`. The header row holds column names like "z=0.5".
///
/// Usage: `cargo run --release --example reference -- [z1 z2 ...] [--h <f64>]
/// [--method <gamma|devroye|alternate|saddle|hybrid>] [--seed <u64>] [--n <usize>]
/// [--out <path>]`
///
/// If no `z` values are given, defaults to `[0.5, 1.0, 2.0, 3.2, 5.0]`. The CSV goes to
/// `target/pg_samples.csv` unless `--out` is given. Set `RUST_LOG=debug` to see which
/// sampler substitutions happen.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut h = 1.0;
    let mut method = Method::Hybrid;
    let mut seed: u64 = 0;
    let mut n: usize = 1_000_000;
    let mut out_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("target/pg_samples.csv");
    let mut zs = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let flag = arg.trim().to_ascii_lowercase();
        match flag.as_str() {
            "--seed" | "--h" | "--method" | "--n" | "--out" => {
                let Some(val) = args.next() else {
                    warn!("{flag} given but no value, keeping the default");
                    continue;
                };
                match flag.as_str() {
                    "--seed" => seed = val.parse()?,
                    "--h" => h = val.parse()?,
                    "--method" => method = val.parse()?,
                    "--n" => n = val.parse()?,
                    _ => out_path = PathBuf::from(val),
                }
            }
            "" => {}
            _ => match flag.parse::<f64>() {
                Ok(z) => zs.push(z),
                Err(_) => warn!("could not parse '{arg}' as f64, skipping"),
            },
        }
    }

    if zs.is_empty() {
        zs = vec![0.5, 1.0, 2.0, 3.2, 5.0];
        info!("using default z values: {zs:.1?}");
    }

    // Time only the sample generation
    let sample_start = Instant::now();
    let mut rng = StdRng::seed_from_u64(seed);
    let pg = PolyaGamma::new(h)?.with_method(method);
    let mut all_samples: Vec<Vec<f64>> = Vec::with_capacity(zs.len());
    for &z in &zs {
        let mut out = vec![0.0; n];
        pg.fill_par_deterministic(&mut rng, z, &mut out)?;
        all_samples.push(out);
    }
    info!(
        h,
        %method,
        seconds = sample_start.elapsed().as_secs_f64(),
        "cumulative sample generation time"
    );

    // Write everything into a single CSV file with columns = z values
    if let Some(dir) = out_path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let mut f = BufWriter::new(std::fs::File::create(&out_path)?);

    let mut header = String::with_capacity(zs.len() * 8);
    for (i, &z) in zs.iter().enumerate() {
        if i > 0 {
            header.push(',');
        }
        write!(header, "z={z:.1}")?;
    }
    writeln!(f, "{header}")?;

    let mut row_buf = String::with_capacity(all_samples.len() * 8);
    for row in 0..n {
        row_buf.clear();
        for (col, sample) in all_samples.iter().enumerate() {
            if col > 0 {
                row_buf.push(',');
            }
            write!(row_buf, "{}", sample[row])?;
        }
        writeln!(f, "{row_buf}")?;
    }
    f.flush()?;
    info!(path = %out_path.display(), rows = n, "wrote samples");
    Ok(())
}
