//! Ownership lock commands.

use blobdir_core::{break_lock, current_holder};
use std::path::Path;

/// Prints the holder currently owning the store.
pub fn owner(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match current_holder(path)? {
        Some(holder) => println!("owned by {holder}"),
        None => println!("unlocked"),
    }
    Ok(())
}

/// Removes the lock token, refusing unless `force` is set.
pub fn unlock(path: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let Some(holder) = current_holder(path)? else {
        println!("unlocked");
        return Ok(());
    };

    if !force {
        return Err(format!(
            "store is owned by {holder}; pass --force to remove a stale lock"
        )
        .into());
    }

    if break_lock(path)? {
        println!("removed lock held by {holder}");
    }
    Ok(())
}
