use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use rand::SeedableRng;
use squiggle_voronoi::{build_diagram, parse_points, presets, Params, RenderSession};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: squiggle_demo [--preset N | --input FILE] [--seed S] [--params FILE] [--out FILE] [--hide-squiggles]";

struct Args {
    preset: Option<usize>,
    input: Option<PathBuf>,
    seed: u64,
    params: PathBuf,
    out: PathBuf,
    hide_squiggles: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        preset: None,
        input: None,
        seed: 0,
        params: PathBuf::from("params.toml"),
        out: PathBuf::from("target/squiggle_voronoi.svg"),
        hide_squiggles: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        let mut value = || {
            it.next()
                .ok_or_else(|| anyhow!("missing value for {flag}\n{USAGE}"))
        };
        match flag.as_str() {
            "--preset" => args.preset = Some(value()?.parse().context("--preset expects 1-4")?),
            "--input" => args.input = Some(PathBuf::from(value()?)),
            "--seed" => args.seed = value()?.parse().context("--seed expects an integer")?,
            "--params" => args.params = PathBuf::from(value()?),
            "--out" => args.out = PathBuf::from(value()?),
            "--hide-squiggles" => args.hide_squiggles = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unknown argument {other}\n{USAGE}"),
        }
    }
    if args.preset.is_some() && args.input.is_some() {
        bail!("--preset and --input are mutually exclusive");
    }
    Ok(args)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = parse_args()?;
    let params = Params::load_or_default(&args.params)?;

    let table = match (&args.input, args.preset) {
        (Some(path), _) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, number) => {
            let number = number.unwrap_or(1);
            presets::preset(number)
                .ok_or_else(|| anyhow!("no preset #{number}; choose 1-{}", presets::PRESETS.len()))?
                .to_string()
        }
    };

    let points = parse_points(&table)?;
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(args.seed);
    let diagram = build_diagram(&points, &params, &mut rng)?;

    let mut session = RenderSession::new(params.canvas.width, params.canvas.height);
    session.render(&diagram);
    if args.hide_squiggles {
        session.toggle_squiggles();
    }
    session.save(&args.out)?;

    tracing::info!(
        points = points.len(),
        cells = session.cell_count(),
        squiggles = session.squiggle_count(),
        out = %args.out.display(),
        "SVG written"
    );
    Ok(())
}
