use anyhow::{Context, Result};
use hyperplane::{config::Config, pipeline};
use log::info;

fn main() -> Result<()> {
    env_logger::init();

    let cfg = Config::from_env().context("failed to load the configuration")?;
    let summary = pipeline::run(&cfg).context("hyperplane run failed")?;

    info!(
        "{} update(s) over {} pass(es), {} frame(s) written to {}",
        summary.report.updates,
        summary.report.passes,
        summary.frames,
        summary.output.display()
    );

    Ok(())
}
