//! Logger bootstrap.  Call [`init`] once, before the app runs.

use anyhow::Context as _;

use crate::config::LogConfig;

pub fn init(config: &LogConfig) -> anyhow::Result<()> {
    let level = config.level_filter()?;

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr());

    if let Some(path) = &config.file {
        let file = fern::log_file(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        dispatch = dispatch.chain(file);
    }

    dispatch.apply().context("logger already initialised")?;
    log::debug!("logging at level {level}");
    Ok(())
}
