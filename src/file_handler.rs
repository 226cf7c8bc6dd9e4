use std::path::{Path, PathBuf};

/// Extensions offered in the file dialogs
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff", "webp"];

/// Extension appended when a save path has none
pub const DEFAULT_EXTENSION: &str = "png";

/// Modal path pickers. `None` means the dialog was dismissed.
pub trait FileDialogs {
    fn pick_open_path(&mut self) -> Option<PathBuf>;

    fn pick_save_path(&mut self) -> Option<PathBuf>;
}

/// Check if a path looks like an image based on its extension
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Give extension-less save targets the default format
pub fn with_default_extension(mut path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.set_extension(DEFAULT_EXTENSION);
    }
    path
}

/// Blocking native dialogs. They run on the UI thread like the rest of file I/O.
#[derive(Debug, Default)]
pub struct NativeFileDialogs {
    last_directory: Option<PathBuf>,
}

impl NativeFileDialogs {
    pub fn new(last_directory: Option<PathBuf>) -> Self {
        Self { last_directory }
    }

    pub fn last_directory(&self) -> Option<&Path> {
        self.last_directory.as_deref()
    }

    fn dialog(&self, title: &str) -> rfd::FileDialog {
        let mut dialog = rfd::FileDialog::new()
            .set_title(title)
            .add_filter("Images", IMAGE_EXTENSIONS)
            .add_filter("PNG Files", &["png"])
            .add_filter("JPG Files", &["jpg", "jpeg"]);
        if let Some(dir) = &self.last_directory {
            dialog = dialog.set_directory(dir);
        }
        dialog
    }

    fn remember(&mut self, path: &Path) {
        self.last_directory = path.parent().map(Path::to_path_buf);
    }
}

impl FileDialogs for NativeFileDialogs {
    fn pick_open_path(&mut self) -> Option<PathBuf> {
        let path = self.dialog("Open File").pick_file()?;
        if !is_image_path(&path) {
            log::warn!("{} does not have an image extension", path.display());
        }
        self.remember(&path);
        Some(path)
    }

    fn pick_save_path(&mut self) -> Option<PathBuf> {
        let path = self
            .dialog("Save File")
            .set_file_name("untitled.png")
            .save_file()
            .map(with_default_extension)?;
        self.remember(&path);
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_path() {
        assert!(is_image_path(Path::new("a/b/photo.JPG")));
        assert!(is_image_path(Path::new("drawing.png")));
        assert!(!is_image_path(Path::new("notes.txt")));
        assert!(!is_image_path(Path::new("README")));
    }

    #[test]
    fn test_default_extension() {
        assert_eq!(
            with_default_extension(PathBuf::from("/tmp/sketch")),
            PathBuf::from("/tmp/sketch.png")
        );
        assert_eq!(
            with_default_extension(PathBuf::from("/tmp/sketch.bmp")),
            PathBuf::from("/tmp/sketch.bmp")
        );
    }
}
