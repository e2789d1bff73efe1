//! Single object commands.

use super::{with_existing_store, with_store};
use blobdir_core::ObjectId;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::info;

/// Stores a new object read from `file` (or stdin) and prints its id.
pub fn put(path: &Path, file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_input(file)?;
    let id = with_store(path, |store| store.create(&data))?;

    info!(%id, bytes = data.len(), "object stored");
    println!("{id}");
    Ok(())
}

/// Writes the object `id` to `output` (or stdout).
pub fn get(
    path: &Path,
    id: u64,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let blob = with_existing_store(path, |store| store.load(ObjectId::new(id)))?;

    match output {
        Some(output) => fs::write(output, &blob)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&blob)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Writes the content of `file` (or stdin) under `id`.
pub fn set(path: &Path, id: u64, file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_input(file)?;
    let id = ObjectId::new(id);
    with_store(path, |store| store.save(id, &data))?;

    info!(%id, bytes = data.len(), "object written");
    Ok(())
}

/// Deletes the object `id`.
pub fn rm(path: &Path, id: u64) -> Result<(), Box<dyn std::error::Error>> {
    let id = ObjectId::new(id);
    with_existing_store(path, |store| store.delete(id))?;

    info!(%id, "object deleted");
    Ok(())
}

fn read_input(file: Option<&Path>) -> io::Result<Vec<u8>> {
    match file {
        Some(file) => fs::read(file),
        None => {
            let mut data = Vec::new();
            io::stdin().lock().read_to_end(&mut data)?;
            Ok(data)
        }
    }
}
