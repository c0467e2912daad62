mod common;

use std::path::PathBuf;

use imunidade_pdf::{FontConfig, RenderOptions, VisualStyle};

const VARS: [&str; 4] = [
    "IMUNIDADE_STYLE",
    "IMUNIDADE_FONT_REGULAR",
    "IMUNIDADE_FONT_BOLD",
    "IMUNIDADE_FONT_ITALIC",
];

fn set(pairs: &[(&str, &str)]) {
    // SAFETY: this is the only test in this binary, so no other thread
    // reads the environment concurrently.
    unsafe {
        for key in VARS {
            std::env::remove_var(key);
        }
        for (key, value) in pairs {
            std::env::set_var(key, value);
        }
    }
}

#[test]
fn environment_overrides() {
    common::init_logging();

    set(&[]);
    assert_eq!(RenderOptions::from_env(), RenderOptions::default());

    set(&[("IMUNIDADE_STYLE", " Plain ")]);
    let options = RenderOptions::from_env();
    assert_eq!(options.style, VisualStyle::Plain);
    assert_eq!(options.fonts, FontConfig::Builtin);

    // Unknown style values are ignored.
    set(&[("IMUNIDADE_STYLE", "neon")]);
    assert_eq!(RenderOptions::from_env().style, VisualStyle::Decorated);

    set(&[
        ("IMUNIDADE_FONT_REGULAR", "/fonts/Sans.ttf"),
        ("IMUNIDADE_FONT_BOLD", "/fonts/Sans-Bold.ttf"),
    ]);
    assert_eq!(
        RenderOptions::from_env().fonts,
        FontConfig::TrueType {
            regular: PathBuf::from("/fonts/Sans.ttf"),
            bold: Some(PathBuf::from("/fonts/Sans-Bold.ttf")),
            italic: None,
        }
    );

    // Bold and italic alone do not switch away from the built-in family.
    set(&[
        ("IMUNIDADE_FONT_REGULAR", ""),
        ("IMUNIDADE_FONT_ITALIC", "/fonts/Sans-Oblique.ttf"),
    ]);
    assert_eq!(RenderOptions::from_env().fonts, FontConfig::Builtin);

    set(&[]);
}
