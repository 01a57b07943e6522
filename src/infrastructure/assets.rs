//! Optional sidebar icons.
//!
//! An icon is a small text file `<name>.icon` in the icons directory whose
//! first non-empty line is drawn before the entry label.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;
use unicode_width::UnicodeWidthStr;

const ICON_EXTENSION: &str = "icon";
const MAX_ICON_WIDTH: usize = 2;

/// Icons keyed by name. Missing icons are simply absent.
#[derive(Debug, Clone, Default)]
pub struct IconSet {
    icons: HashMap<String, String>,
}

impl IconSet {
    /// Loads whichever of `names` exist under `dir`. A missing directory or
    /// unreadable file yields no icon for that name.
    #[must_use]
    pub fn load<'a>(dir: Option<&Path>, names: impl IntoIterator<Item = &'a str>) -> Self {
        let Some(dir) = dir else {
            return Self::default();
        };

        let icons = names
            .into_iter()
            .filter_map(|name| {
                let path = dir.join(name).with_extension(ICON_EXTENSION);
                match fs::read_to_string(&path) {
                    Ok(content) => parse_icon(&content).map(|glyph| (name.to_string(), glyph)),
                    Err(e) => {
                        debug!(path = %path.display(), error = %e, "Icon not loaded");
                        None
                    }
                }
            })
            .collect();

        Self { icons }
    }

    /// Icon glyph for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.icons.get(name).map(String::as_str)
    }

    /// Number of icons loaded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    /// Whether no icons were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

fn parse_icon(content: &str) -> Option<String> {
    let line = content.lines().map(str::trim).find(|l| !l.is_empty())?;
    if line.width() > MAX_ICON_WIDTH {
        return None;
    }
    Some(line.to_string())
}
