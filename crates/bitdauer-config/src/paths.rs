//! Platform-specific paths for user patches.
//!
//! - Linux: `~/.config/bitdauer/patches/`
//! - macOS: `~/Library/Application Support/bitdauer/patches/`
//! - Windows: `%APPDATA%\bitdauer\patches\`

use std::path::{Path, PathBuf};

/// Application name used for directory paths.
const APP_NAME: &str = "bitdauer";

/// Subdirectory name for patches.
const PATCHES_SUBDIR: &str = "patches";

/// Returns the user-specific patches directory.
///
/// Falls back to `./bitdauer/patches` if the config directory cannot be
/// determined.
pub fn user_patches_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(PATCHES_SUBDIR)
}

/// Find a patch file by name.
///
/// `name` may be a path to an existing file, or a patch name with or
/// without the `.toml` extension that is looked up in
/// [`user_patches_dir`].
///
/// ```rust,no_run
/// use bitdauer_config::paths::find_patch;
///
/// if let Some(path) = find_patch("swell") {
///     println!("Found: {:?}", path);
/// }
/// ```
pub fn find_patch(name: &str) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    };

    let user_path = user_patches_dir().join(filename);
    user_path.is_file().then_some(user_path)
}

/// Ensure the user patches directory exists, creating it if needed.
pub fn ensure_user_patches_dir() -> Result<PathBuf, crate::ConfigError> {
    let dir = user_patches_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| crate::ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// List all patch files in the user patches directory, sorted by path.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_user_patches() -> Vec<PathBuf> {
    list_patches_in_dir(&user_patches_dir())
}

/// List the `.toml` files directly inside `dir`, sorted by path.
pub fn list_patches_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut patches: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    patches.sort();
    patches
}

/// Get the patch name from a file path (the file stem).
///
/// ```rust
/// use bitdauer_config::paths::patch_name_from_path;
/// use std::path::Path;
///
/// let name = patch_name_from_path(Path::new("/path/to/swell.toml"));
/// assert_eq!(name, Some("swell".to_string()));
/// ```
pub fn patch_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(ToString::to_string)
}
