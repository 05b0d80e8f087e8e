use cricket_career_sim::{run, CliOptions, Mode};
use std::env;
use std::path::PathBuf;

fn usage() -> ! {
    eprintln!(
        "Usage: cargo run --release -- [--setup match.json] [--seed SEED] [--mode play|matrix] \
[--sims-per-cell N] [--output matrix.csv] [--events events.json]"
    );
    std::process::exit(1);
}

fn parse_args() -> anyhow::Result<CliOptions> {
    let mut setup_path = PathBuf::from("match.json");
    let mut seed = 0u64;
    let mut mode = Mode::Play;
    let mut sims_per_cell = 100usize;
    let mut output_path = PathBuf::from("matrix.csv");
    let mut events_path = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--setup" => {
                setup_path = args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--setup requires a path (e.g. --setup match.json)")
                })?;
            }
            "--seed" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--seed requires a number"))?;
                seed = val.parse()?;
            }
            "--mode" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--mode requires play or matrix"))?;
                mode = match val.to_ascii_lowercase().as_str() {
                    "play" => Mode::Play,
                    "matrix" => Mode::Matrix,
                    other => anyhow::bail!("Unknown mode {other} (use play or matrix)"),
                };
            }
            "--sims-per-cell" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--sims-per-cell requires a number"))?;
                sims_per_cell = val.parse()?;
            }
            "--output" => {
                output_path = args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--output requires a path (e.g. --output matrix.csv)")
                })?;
            }
            "--events" => {
                events_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--events requires a path (e.g. --events events.json)")
                })?);
            }
            "--help" | "-h" => usage(),
            other => return Err(anyhow::anyhow!("Unknown argument {other}")),
        }
    }

    Ok(CliOptions {
        setup_path,
        seed,
        mode,
        sims_per_cell,
        output_path,
        events_path,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = parse_args()?;
    run(opts)
}
