//! Loads an INI file and logs every entry.
//!
//! ```text
//! RUST_LOG=debug cargo run --example show -- settings.ini
//! ```

use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ini_doc=debug")),
        )
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: show <file.ini>");
        std::process::exit(2);
    };

    match ini_doc::read(&path) {
        Ok(doc) => {
            ini_doc::show(&doc);
            println!(
                "{}: {} sections, {} top-level entries",
                path,
                doc.sections().count(),
                doc.len()
            );
        }
        Err(e) => {
            eprintln!("{}: {}", path, e);
            std::process::exit(1);
        }
    }
}
