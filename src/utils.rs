use crate::error::Result;
use crate::log_info;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub fn save_json(data: &impl serde::Serialize, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json_string = serde_json::to_string_pretty(data)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;

    log_info!("[utils] Saved JSON to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_pretty_json_creating_parents() {
        let dir = std::env::temp_dir().join(format!("job-board-utils-{}", std::process::id()));
        let path = dir.join("nested").join("out.json");

        save_json(&serde_json::json!({ "id": "1" }), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"id\": \"1\""));
        fs::remove_dir_all(&dir).unwrap();
    }
}
