//! Verify command implementation.

use super::with_existing_store;
use blobdir_core::StoreError;
use std::path::Path;

/// Runs the verify command.
pub fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("Verifying store at {:?}", path);
    println!();

    match with_existing_store(path, |store| store.verify()) {
        Ok(summary) => {
            println!("Objects:    {}", summary.objects);
            match summary.highest_id {
                Some(id) => println!("Highest id: {id}"),
                None => println!("Highest id: (none)"),
            }
            println!();
            println!("Store is valid");
            Ok(())
        }
        Err(StoreError::Corrupted { path, reason }) => {
            println!("Corrupted entry: {} ({reason})", path.display());
            Err("store verification failed".into())
        }
        Err(e) => Err(e.into()),
    }
}
