//! List command implementation.

use super::with_existing_store;
use blobdir_core::Item;
use serde::Serialize;
use std::path::Path;

/// One listed object.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ObjectEntry {
    /// Object id.
    pub id: u64,
    /// Blob size in bytes.
    pub size: usize,
}

/// Listing result.
#[derive(Debug, Serialize)]
pub struct ListResult {
    /// Store path.
    pub path: String,
    /// Number of objects.
    pub count: usize,
    /// Total blob bytes.
    pub total_size: usize,
    /// Objects ordered by id.
    pub objects: Vec<ObjectEntry>,
}

/// Runs the list command.
pub fn run(path: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let items = with_existing_store(path, |store| store.load_all())?;
    let result = summarize(path, &items);

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

fn summarize(path: &Path, items: &[Item]) -> ListResult {
    let mut objects: Vec<ObjectEntry> = items
        .iter()
        .map(|item| ObjectEntry {
            id: item.id.as_u64(),
            size: item.blob.len(),
        })
        .collect();
    objects.sort_by_key(|entry| entry.id);

    ListResult {
        path: path.display().to_string(),
        count: objects.len(),
        total_size: objects.iter().map(|entry| entry.size).sum(),
        objects,
    }
}

fn print_text_output(result: &ListResult) {
    for entry in &result.objects {
        println!("{:>10}  {} bytes", entry.id, entry.size);
    }
    println!();
    println!("{} objects, {} bytes", result.count, result.total_size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use blobdir_core::ObjectId;

    #[test]
    fn summary_sorted_by_id() {
        let items = vec![
            Item::new(ObjectId::new(9), vec![0; 4]),
            Item::new(ObjectId::new(2), vec![0; 10]),
        ];

        let result = summarize(Path::new("store"), &items);

        assert_eq!(result.count, 2);
        assert_eq!(result.total_size, 14);
        assert_eq!(
            result.objects,
            vec![
                ObjectEntry { id: 2, size: 10 },
                ObjectEntry { id: 9, size: 4 },
            ]
        );
    }
}
