use std::path::PathBuf;

pub const DEFAULT_SOURCE_EXT: &str = "asm";
pub const DEFAULT_BINARY_EXT: &str = "hack";

pub fn default_suite_dir() -> PathBuf {
    ["asm", "test"].iter().collect()
}
