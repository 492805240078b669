//! Process-wide font registration.
//!
//! Styles and tables refer to fonts by a logical name. Those names are bound to font
//! data here, once per process, and every [crate::Document] built afterwards looks
//! them up when it is laid out.
//!
//! Registration is idempotent: registering a name that is already known does nothing
//! and succeeds, so any number of documents may call [register_default] during
//! construction.
//!
//! ```
//! use invoice_gen::fonts;
//!
//! fonts::register_default().expect("bundled font is valid");
//! fonts::register_default().expect("registering twice is fine");
//! assert!(fonts::is_registered(fonts::DEFAULT_FONT));
//! ```

use crate::{Font, PDFError};
use log::debug;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

/// Logical name of the font bundled with the crate
pub const DEFAULT_FONT: &str = "DejaVuSans";

/// DejaVu Sans, which covers the Latin Extended-A characters used in the invoice
/// templates. See `assets/fonts/DejaVuSans-LICENSE.txt`.
pub const BUNDLED_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

type Registry = HashMap<String, Arc<[u8]>>;

fn registry() -> MutexGuard<'static, Registry> {
    static REGISTRY: OnceLock<Mutex<Registry>> = OnceLock::new();
    REGISTRY
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        // the map is never left half-updated, so a poisoned lock is still usable
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Register font data under `name`. The data is parsed once to make sure it is a
/// usable font before it is stored. If `name` is already registered, the existing
/// font is kept and the new data is ignored.
pub fn register_font<S: Into<String>>(name: S, data: Vec<u8>) -> Result<(), PDFError> {
    let name = name.into();
    let mut registry = registry();
    if registry.contains_key(&name) {
        debug!("font `{name}` already registered");
        return Ok(());
    }

    let font = Font::load(data)?;
    debug!(
        "registered font `{name}` ({})",
        font.name().unwrap_or_else(|| "unnamed".to_string())
    );
    registry.insert(name, Arc::from(font.face.as_slice()));
    Ok(())
}

/// Read a font file from disk and register it under `name`
pub fn register_font_file<S: Into<String>, P: AsRef<Path>>(
    name: S,
    path: P,
) -> Result<(), PDFError> {
    let name = name.into();
    if is_registered(&name) {
        return Ok(());
    }
    let data = std::fs::read(path)?;
    register_font(name, data)
}

/// Register the bundled font under [DEFAULT_FONT]
pub fn register_default() -> Result<(), PDFError> {
    if is_registered(DEFAULT_FONT) {
        return Ok(());
    }
    register_font(DEFAULT_FONT, BUNDLED_FONT.to_vec())
}

pub fn is_registered(name: &str) -> bool {
    registry().contains_key(name)
}

/// Instantiate the font registered under `name`
pub fn load(name: &str) -> Result<Font, PDFError> {
    let data = registry()
        .get(name)
        .cloned()
        .ok_or_else(|| PDFError::UnknownFont(name.to_string()))?;
    Font::load(data.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_is_idempotent() {
        register_default().expect("first registration");
        register_default().expect("second registration");
        register_font(DEFAULT_FONT, vec![1, 2, 3]).expect("existing name is left alone");
        assert!(load(DEFAULT_FONT).is_ok());
    }

    #[test]
    fn invalid_data_is_not_registered() {
        let result = register_font("fonts-test-garbage", vec![0xde, 0xad, 0xbe, 0xef]);
        assert!(matches!(result, Err(PDFError::FaceParsingError(_))));
        assert!(!is_registered("fonts-test-garbage"));
    }

    #[test]
    fn unknown_fonts_are_reported_by_name() {
        match load("fonts-test-missing") {
            Err(PDFError::UnknownFont(name)) => assert_eq!(name, "fonts-test-missing"),
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("font should not exist"),
        }
    }

    #[test]
    fn missing_font_files_are_io_errors() {
        let result = register_font_file("fonts-test-file", "/definitely/not/here.ttf");
        assert!(matches!(result, Err(PDFError::Io(_))));
    }

    #[test]
    fn fonts_register_from_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("font.ttf");
        std::fs::write(&path, BUNDLED_FONT).expect("write font");
        register_font_file("fonts-test-from-file", &path).expect("register from file");
        assert!(is_registered("fonts-test-from-file"));
    }
}
