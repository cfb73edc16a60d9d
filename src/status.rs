// System status display — shows the data directory, file counts per folder,
// and the most recent uniqueness output.

use anyhow::Result;

use crate::config::Config;
use crate::store::{LocalStore, RecordStore, StoreKind};

/// Display system status to the terminal.
pub async fn show(config: &Config) -> Result<()> {
    let root = &config.data_dir;
    if !root.is_dir() {
        println!("Data directory: not initialized");
        println!("\nRun `blogsift init` to set it up.");
        return Ok(());
    }
    println!("Data directory: {}", root.display());

    let store = LocalStore::open(root)?;
    for kind in StoreKind::ALL {
        let files = store.list(kind).await?;
        let total: u64 = files.iter().map(|f| f.size_bytes).sum();
        println!(
            "  {:<10} {} files ({})",
            format!("{kind}/"),
            files.len(),
            format_bytes(total)
        );
    }

    let unique = store.list(StoreKind::Unique).await?;
    match unique.iter().filter(|f| f.modified.is_some()).max_by_key(|f| f.modified) {
        Some(latest) => {
            let when = latest
                .modified
                .map(|m| m.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default();
            println!("Last output: {} ({})", latest.name, when);
        }
        None => {
            println!("Last output: none");
            println!("  Run `blogsift unique <reference> <candidate> --save` to produce one");
        }
    }

    match &config.stopwords_path {
        Some(path) => println!("Stopwords: {}", path.display()),
        None => println!("Stopwords: built-in English list"),
    }
    println!(
        "Thresholds: unique < {}, similar > {}",
        config.unique_threshold, config.similar_threshold
    );
    println!(
        "Webhook: {}",
        config.webhook_url.as_deref().unwrap_or("not configured")
    );

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
