use crate::cli::ShowArgs;
use crate::config::Config;
use crate::output::display::print_session;
use crate::output::{resolve_width, SessionRecorder};
use tracing::info;

pub fn execute(args: ShowArgs) -> anyhow::Result<()> {
    info!("Loading session from {:?}", args.file);
    let session = SessionRecorder::load(&args.file)?;

    let width = args
        .width
        .unwrap_or_else(|| resolve_width(Config::default().default_width));

    print_session(&session, width);
    Ok(())
}
