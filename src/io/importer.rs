// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Parascope Team

//! Script source loading

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read script source from disk. Load failures are non-fatal at the
/// session level; callers keep their existing buffer.
pub fn load_script_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::ScriptLoad(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_script_source() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "export const main = () => cuboid()").unwrap();
        let source = load_script_file(file.path()).unwrap();
        assert!(source.contains("main"));
    }

    #[test]
    fn missing_file_is_a_script_load_error() {
        let result = load_script_file(Path::new("/nonexistent/model.js"));
        assert!(matches!(result, Err(Error::ScriptLoad(_))));
    }
}
