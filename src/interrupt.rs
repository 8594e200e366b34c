use super::display;
use log::info;

pub const INTERRUPT_MSG: &str = "KeyboardInterrupt caught, exiting";

/// Installs the Ctrl-C (SIGINT) handler: log and exit cleanly with status 0.
/// `exit` skips destructors, the svg being shown is removed first.
pub fn install() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        info!("{}", INTERRUPT_MSG);
        display::discard_pending();
        std::process::exit(0);
    })
}
