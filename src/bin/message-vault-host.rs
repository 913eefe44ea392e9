//! Native messaging host launched by the browser.
//!
//! The browser passes the calling extension's origin (and on Windows a parent
//! window handle) as arguments; none of them change behaviour, so they are
//! ignored.

use message_vault::{commands, env_loader};

fn main() {
    env_loader::load_dotenv();

    if let Err(err) = commands::host::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
