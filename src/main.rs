use std::path::PathBuf;

use anyhow::{bail, Context};
use printviz::{init_logging, load_request, GeometryWorker, BUILD_DATE, VERSION};
use tracing::{info, warn};

const USAGE: &str = "usage: printviz <request.json> [--params <config.json|config.toml>] [--out <response.json>]";

struct Args {
    request: PathBuf,
    params: Option<PathBuf>,
    out: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut request = None;
    let mut params = None;
    let mut out = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--params" => params = Some(args.next().context(USAGE)?.into()),
            "--out" => out = Some(args.next().context(USAGE)?.into()),
            "-h" | "--help" => bail!(USAGE),
            flag if flag.starts_with("--") => bail!("unknown option {}\n{}", flag, USAGE),
            path if request.is_none() => request = Some(PathBuf::from(path)),
            _ => bail!(USAGE),
        }
    }

    Ok(Args {
        request: request.context(USAGE)?,
        params,
        out,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;
    let args = parse_args(std::env::args().skip(1))?;
    info!("printviz {} (built {})", VERSION, BUILD_DATE);

    let (request, options) = load_request(&args.request, args.params.as_deref())?;

    let worker = GeometryWorker::spawn(options);
    let result = worker.render(request).await;
    worker.shutdown().await;
    let response = result?;

    for failure in &response.failures {
        warn!(
            "Layer {} group {}: {}",
            failure.layer_index, failure.group_index, failure.error
        );
    }
    info!(
        "{} geometries, {} vertices, {} triangles",
        response.geometries.len(),
        response.stats.vertices,
        response.stats.triangles
    );

    let json = response.to_json_pretty()?;
    match args.out {
        Some(path) => std::fs::write(&path, json)
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{}", json),
    }

    Ok(())
}
