//! Clean command - remove orphaned thumbnails

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use colored::*;

use crate::config;
use crate::processing;
use crate::ui;

pub fn run(dir: &Path, recursive: bool, auto_confirm: bool) -> Result<()> {
    ui::info(&format!("Scanning: {}", dir.display()));

    let thumb_dir = config::thumbnail_dir(dir);
    if !thumb_dir.exists() {
        ui::success("No thumbnail directory, nothing to clean");
        return Ok(());
    }

    // File names of every source image still present
    let scan = processing::scan_directory(dir, recursive, &[]);
    let current: HashSet<_> = scan
        .images
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_os_string()))
        .collect();

    let mut orphaned = Vec::new();
    for entry in fs::read_dir(&thumb_dir)? {
        let Ok(entry) = entry else { continue };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().map(|n| n.to_os_string()) else {
            continue;
        };
        if !current.contains(&name) {
            orphaned.push(path);
        }
    }

    if orphaned.is_empty() {
        ui::success("No orphaned thumbnails found");
        return Ok(());
    }

    ui::warn(&format!("Found {} orphaned thumbnails", orphaned.len()));
    for path in &orphaned {
        eprintln!("  {}", path.display().to_string().dimmed());
    }

    if !auto_confirm {
        print!("\nDelete these thumbnails? [y/N]: ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            ui::info("Cancelled");
            return Ok(());
        }
    }

    let mut deleted = 0;
    let mut errors = 0;

    for path in orphaned {
        match fs::remove_file(&path) {
            Ok(_) => {
                deleted += 1;
                ui::debug(&format!("Deleted: {}", path.display()));
            }
            Err(e) => {
                ui::error(&format!("Failed to delete {}: {}", path.display(), e));
                errors += 1;
            }
        }
    }

    ui::success(&format!("Deleted {} orphaned thumbnails", deleted));
    if errors > 0 {
        ui::warn(&format!("{} errors", errors));
    }

    Ok(())
}
