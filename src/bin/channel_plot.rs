use anyhow::Context;
use channel_plot::plot::parse_cli;
use channel_plot::{display, interrupt, Series};
use log::{debug, info, warn};

fn main() -> anyhow::Result<()> {
    let config = parse_cli();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.loglevel.to_string()),
    )
    .init();
    interrupt::install().context("could not install the interrupt handler")?;

    info!(
        "read data from {}{}",
        config.file.display(),
        match &config.save {
            Some(p) => format!(" and plot to {}", p.display()),
            None => String::new(),
        }
    );
    let series = Series::from_jsonl(&config.file)
        .with_context(|| format!("could not load {}", config.file.display()))?;
    if series.is_empty() {
        warn!("no samples in {}", config.file.display());
    }
    info!("loaded {} samples of channel {:?}", series.len(), series.title());
    debug!("{}", series);

    if let Some(fout) = &config.save {
        series
            .plot_png(fout)
            .with_context(|| format!("could not save {}", fout.display()))?;
        info!("saved plot to {}", fout.display());
    }
    if config.show {
        display::show(&series, &config.viewer).context("could not show the plot")?;
    }
    Ok(())
}
