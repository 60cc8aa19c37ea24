//! Sets one value in an INI file, creating the file if it does not exist.
//!
//! ```text
//! cargo run --example edit -- settings.ini ui theme dark
//! ```

use ini_doc::{Document, Error};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [path, section, key, value] = args.as_slice() else {
        eprintln!("usage: edit <file.ini> <section> <key> <value>");
        std::process::exit(2);
    };

    if let Err(e) = run(path, section, key, value) {
        eprintln!("{}: {}", path, e);
        std::process::exit(1);
    }
}

fn run(path: &str, section: &str, key: &str, value: &str) -> Result<(), Error> {
    let mut doc = match ini_doc::read(path) {
        Ok(doc) => doc,
        Err(Error::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            Document::new()
        }
        Err(e) => return Err(e),
    };

    match doc.put(section, key, value)? {
        Some(old) => println!(
            "[{}] {}: {} -> {}",
            section,
            key,
            String::from_utf8_lossy(&old),
            value
        ),
        None => println!("[{}] {} = {}", section, key, value),
    }

    ini_doc::save(path, &doc)?;
    print!("{}", ini_doc::to_string(&doc)?);
    Ok(())
}
