//! Upload filename validation and sanitization.

use core::fmt;

use unicode_normalization::UnicodeNormalization;

/// Extension accepted for model uploads (compared case-insensitively).
pub const MODEL_EXTENSION: &str = ".glb";

/// Errors that can occur when accepting an uploaded filename.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FilenameError {
    /// No filename was supplied (empty file input).
    #[error("filename cannot be empty")]
    Empty,
    /// The filename does not end in `.glb`.
    #[error("only {MODEL_EXTENSION} files are accepted")]
    UnsupportedExtension,
    /// Nothing usable is left once unsafe characters are removed.
    #[error("filename contains no safe characters")]
    Unsafe,
}

/// Reduce an uploaded filename to a safe, flat name.
///
/// - Text is NFKD-normalized, then non-ASCII characters are dropped, so
///   accented letters keep their base letter
/// - Path separators (`/` and `\`) become whitespace
/// - Whitespace runs collapse into a single `_`
/// - Anything outside `[A-Za-z0-9_.-]` is dropped
/// - Leading and trailing `.` and `_` are trimmed
///
/// The result may be empty.
///
/// ```
/// use model_showcase_core::sanitize_filename;
///
/// assert_eq!(sanitize_filename("My Model.glb"), "My_Model.glb");
/// assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
/// assert_eq!(sanitize_filename("café Modèle.glb"), "cafe_Modele.glb");
/// ```
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let flattened: String = name
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");

    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_owned()
}

/// A sanitized filename for an accepted `.glb` upload.
///
/// The extension check runs against the name the browser sent; the stored
/// name is the sanitized form with its original letter case.
///
/// ```
/// use model_showcase_core::{FilenameError, ModelFilename};
///
/// let name = ModelFilename::from_upload("Vision Pro.GLB").unwrap();
/// assert_eq!(name.as_str(), "Vision_Pro.GLB");
///
/// assert_eq!(ModelFilename::from_upload("model.txt"), Err(FilenameError::UnsupportedExtension));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelFilename(String);

impl ModelFilename {
    /// Validate and sanitize the filename of an uploaded file part.
    ///
    /// # Errors
    ///
    /// Returns an error if the filename is empty, does not end in `.glb`
    /// (case-insensitive), or sanitizes to an empty string.
    pub fn from_upload(original: &str) -> Result<Self, FilenameError> {
        if original.is_empty() {
            return Err(FilenameError::Empty);
        }

        if !original.to_lowercase().ends_with(MODEL_EXTENSION) {
            return Err(FilenameError::UnsupportedExtension);
        }

        let sanitized = sanitize_filename(original);
        if sanitized.is_empty() {
            return Err(FilenameError::Unsafe);
        }

        Ok(Self(sanitized))
    }

    /// Returns the sanitized filename as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ModelFilename` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ModelFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModelFilename {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_plain_name_unchanged() {
        assert_eq!(sanitize_filename("chair.glb"), "chair.glb");
    }

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_filename("/var/www/chair.glb"), "var_www_chair.glb");
        assert_eq!(sanitize_filename(r"C:\models\chair.glb"), "C_models_chair.glb");
    }

    #[test]
    fn test_sanitize_drops_unsafe_characters() {
        assert_eq!(sanitize_filename("ch@ir (v2)!.glb"), "chir_v2.glb");
    }

    #[test]
    fn test_sanitize_folds_accents_to_ascii() {
        assert_eq!(sanitize_filename("café.glb"), "cafe.glb");
        assert_eq!(sanitize_filename("café Modèle.glb"), "cafe_Modele.glb");
        assert_eq!(sanitize_filename("Ｍｏｄｅｌ.glb"), "Model.glb");
    }

    #[test]
    fn test_sanitize_trims_dots_and_underscores() {
        assert_eq!(sanitize_filename("..hidden.glb"), "hidden.glb");
        assert_eq!(sanitize_filename("__init__"), "init");
    }

    #[test]
    fn test_sanitize_can_be_empty() {
        assert_eq!(sanitize_filename("日本語"), "");
        assert_eq!(sanitize_filename("../.."), "");
    }

    #[test]
    fn test_from_upload_accepts_any_case_extension() {
        assert!(ModelFilename::from_upload("a.glb").is_ok());
        assert!(ModelFilename::from_upload("a.GLB").is_ok());
        assert!(ModelFilename::from_upload("a.GlB").is_ok());
    }

    #[test]
    fn test_from_upload_preserves_case() {
        let name = ModelFilename::from_upload("Apple_Vision_Pro.GLB");
        assert_eq!(
            name.map(ModelFilename::into_inner),
            Ok("Apple_Vision_Pro.GLB".to_string())
        );
    }

    #[test]
    fn test_from_upload_rejects_other_extensions() {
        assert_eq!(
            ModelFilename::from_upload("model.txt"),
            Err(FilenameError::UnsupportedExtension)
        );
        assert_eq!(
            ModelFilename::from_upload("model.glb.zip"),
            Err(FilenameError::UnsupportedExtension)
        );
    }

    #[test]
    fn test_from_upload_rejects_empty() {
        assert_eq!(ModelFilename::from_upload(""), Err(FilenameError::Empty));
    }

    #[test]
    fn test_from_upload_keeps_extension_text_when_stem_is_unsafe() {
        assert_eq!(
            ModelFilename::from_upload("日/.glb").map(ModelFilename::into_inner),
            Ok("glb".to_string())
        );
    }
}
