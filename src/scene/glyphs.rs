use std::{collections::HashMap, fs, path::Path};

use crate::scene::error::{GlyphFileError, SceneError};

pub const REQUIRED_GLYPHS: [char; 11] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':'];

const BUILTIN: &[(char, [&str; 5])] = &[
    ('0', ["###", "#.#", "#.#", "#.#", "###"]),
    ('1', [".#.", "##.", ".#.", ".#.", "###"]),
    ('2', ["###", "..#", "###", "#..", "###"]),
    ('3', ["###", "..#", ".##", "..#", "###"]),
    ('4', ["#.#", "#.#", "###", "..#", "..#"]),
    ('5', ["###", "#..", "###", "..#", "###"]),
    ('6', ["###", "#..", "###", "#.#", "###"]),
    ('7', ["###", "..#", "..#", "..#", "..#"]),
    ('8', ["###", "#.#", "###", "#.#", "###"]),
    ('9', ["###", "#.#", "###", "..#", "###"]),
    (':', ["...", ".#.", "...", ".#.", "..."]),
];

const PLACEHOLDER: [&str; 5] = ["#.#", ".#.", "#.#", ".#.", "#.#"];

/// A monochrome bitmap; `#` marks a filled pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    rows: Vec<String>,
    placeholder: bool,
}

impl Glyph {
    fn from_rows<S: AsRef<str>>(rows: &[S]) -> Option<Self> {
        let rows: Vec<String> = rows.iter().map(|row| row.as_ref().to_string()).collect();
        let width = rows.first()?.chars().count();
        if width == 0 || rows.iter().any(|row| row.chars().count() != width) {
            return None;
        }
        Some(Self {
            rows,
            placeholder: false,
        })
    }

    fn placeholder() -> Self {
        Self {
            rows: PLACEHOLDER.iter().map(ToString::to_string).collect(),
            placeholder: true,
        }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.chars().count())
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    pub fn filled(&self, col: usize, row: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|line| line.chars().nth(col))
            .is_some_and(|ch| ch == '#')
    }
}

#[derive(Debug, Clone)]
pub struct GlyphAtlas {
    glyphs: HashMap<char, Glyph>,
    missing: Vec<char>,
}

impl Default for GlyphAtlas {
    fn default() -> Self {
        Self::builtin()
    }
}

impl GlyphAtlas {
    #[must_use]
    pub fn builtin() -> Self {
        let glyphs = BUILTIN
            .iter()
            .filter_map(|(ch, rows)| Glyph::from_rows(&rows[..]).map(|glyph| (*ch, glyph)))
            .collect();
        Self {
            glyphs,
            missing: Vec::new(),
        }
    }

    /// Loads glyph bitmaps from a JSON object of `"<char>": ["row", ...]`.
    /// Glyphs absent or malformed in the file are replaced by a placeholder
    /// so every slot still renders something.
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let wrap = |source: GlyphFileError| SceneError::GlyphFile {
            path: path.to_path_buf(),
            source,
        };
        let content = fs::read_to_string(path).map_err(|err| wrap(err.into()))?;
        let raw: HashMap<String, Vec<String>> =
            serde_json::from_str(&content).map_err(|err| wrap(err.into()))?;
        Ok(Self::from_raw(&raw))
    }

    fn from_raw(raw: &HashMap<String, Vec<String>>) -> Self {
        let mut glyphs = HashMap::new();
        let mut missing = Vec::new();
        for ch in REQUIRED_GLYPHS {
            let parsed = raw
                .get(ch.to_string().as_str())
                .and_then(|rows| Glyph::from_rows(rows.as_slice()));
            match parsed {
                Some(glyph) => {
                    glyphs.insert(ch, glyph);
                }
                None => {
                    let err = SceneError::AssetMissing { glyph: ch };
                    tracing::error!(%err, "substituting placeholder glyph");
                    missing.push(ch);
                    glyphs.insert(ch, Glyph::placeholder());
                }
            }
        }
        Self { glyphs, missing }
    }

    /// Glyphs that had to be substituted at load time.
    pub fn missing(&self) -> &[char] {
        &self.missing
    }

    /// Unknown characters also resolve to the placeholder rather than
    /// leaving a hole in the row.
    pub fn get(&self, ch: char) -> Glyph {
        self.glyphs.get(&ch).cloned().unwrap_or_else(Glyph::placeholder)
    }
}
