//! Triview viewer binary. Takes an optional options TOML path.

use std::path::Path;

use triview::{options::Options, Viewer};

fn main() {
    env_logger::init();

    // Optional TOML options preset
    let options = match std::env::args().nth(1) {
        Some(arg) => match Options::load(Path::new(&arg)) {
            Ok(opts) => opts,
            Err(e) => {
                log::error!("failed to load options from {arg}: {e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    if let Err(e) = Viewer::builder().with_options(options).build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
