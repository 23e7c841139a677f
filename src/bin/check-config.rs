use anyhow::Result;
use backend_config::{load_checked, log};
use tracing::{error, info};

pub fn main() -> Result<()> {
    let settings = match load_checked() {
        Ok(settings) => settings,
        Err(err) => {
            log::init(false);
            error!("{:#}", err);
            std::process::exit(1);
        }
    };

    log::init(settings.debug);
    info!(?settings, "configuration ok");

    Ok(())
}
