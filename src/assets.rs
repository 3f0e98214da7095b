//! Named drawable and audible resources.
//!
//! Sprites are terminal glyphs with colors, sounds are terminal bell patterns.
//! Both come from a built-in catalog that a JSON manifest can override.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use ratatui::style::Color;
use serde::Deserialize;

use crate::config::{asset_names, BACKGROUND_COLOR};
use crate::error::AssetError;

/// Drawable handle for one grid cell.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Sprite {
    /// Text drawn across the cell's terminal columns.
    pub glyph: String,
    pub fg: Color,
    pub bg: Option<Color>,
}

/// Audible handle for a track or one-shot cue.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SoundHandle {
    pub name: String,
    /// Number of terminal bell rings; zero is silent.
    pub bells: u8,
}

/// Resolves asset names to handles.
pub trait AssetProvider {
    fn sprite(&self, name: &str) -> Result<Sprite, AssetError>;
    fn sound(&self, name: &str) -> Result<SoundHandle, AssetError>;
}

#[derive(Debug, Deserialize)]
struct ManifestFile {
    #[serde(default)]
    sprites: HashMap<String, SpriteSpec>,
    #[serde(default)]
    sounds: HashMap<String, SoundSpec>,
}

#[derive(Debug, Deserialize)]
struct SpriteSpec {
    glyph: String,
    fg: String,
    bg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SoundSpec {
    bells: u8,
}

/// In-memory asset table.
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    sprites: HashMap<String, Sprite>,
    sounds: HashMap<String, SoundHandle>,
}

impl AssetCatalog {
    /// Returns the catalog compiled into the binary.
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::default();

        catalog.insert_sprite(
            asset_names::BACKGROUND,
            Sprite {
                glyph: "  ".to_owned(),
                fg: Color::Reset,
                bg: Some(BACKGROUND_COLOR),
            },
        );
        catalog.insert_sprite(
            asset_names::SEGMENT,
            Sprite {
                glyph: "██".to_owned(),
                fg: Color::Rgb(60, 120, 200),
                bg: None,
            },
        );
        catalog.insert_sprite(
            asset_names::FOOD,
            Sprite {
                glyph: "▐▌".to_owned(),
                fg: Color::Rgb(200, 30, 30),
                bg: None,
            },
        );

        catalog.insert_sound(asset_names::MUSIC, 0);
        catalog.insert_sound(asset_names::CUE_FOOD, 1);
        catalog.insert_sound(asset_names::CUE_CRASH, 2);

        catalog
    }

    /// Loads the built-in catalog, overlaid with `manifest` when given.
    pub fn load(manifest: Option<&Path>) -> Result<Self, AssetError> {
        let mut catalog = Self::builtin();
        if let Some(path) = manifest {
            let raw = fs::read_to_string(path).map_err(|error| AssetError::Manifest {
                path: path.to_path_buf(),
                reason: error.to_string(),
            })?;
            catalog.merge_manifest(&raw).map_err(|error| match error {
                ManifestError::Syntax(reason) => AssetError::Manifest {
                    path: path.to_path_buf(),
                    reason,
                },
                ManifestError::Asset(error) => error,
            })?;
            log::info!("loaded asset manifest {}", path.display());
        }

        Ok(catalog)
    }

    pub fn insert_sprite(&mut self, name: &str, sprite: Sprite) {
        self.sprites.insert(name.to_owned(), sprite);
    }

    pub fn insert_sound(&mut self, name: &str, bells: u8) {
        self.sounds.insert(
            name.to_owned(),
            SoundHandle {
                name: name.to_owned(),
                bells,
            },
        );
    }

    pub fn remove_sound(&mut self, name: &str) {
        self.sounds.remove(name);
    }

    fn merge_manifest(&mut self, raw: &str) -> Result<(), ManifestError> {
        let manifest: ManifestFile =
            serde_json::from_str(raw).map_err(|error| ManifestError::Syntax(error.to_string()))?;

        for (name, spec) in manifest.sprites {
            let fg = parse_color(&name, &spec.fg)?;
            let bg = spec
                .bg
                .as_deref()
                .map(|value| parse_color(&name, value))
                .transpose()?;
            self.insert_sprite(
                &name,
                Sprite {
                    glyph: spec.glyph,
                    fg,
                    bg,
                },
            );
        }

        for (name, spec) in manifest.sounds {
            self.insert_sound(&name, spec.bells);
        }

        Ok(())
    }
}

impl AssetProvider for AssetCatalog {
    fn sprite(&self, name: &str) -> Result<Sprite, AssetError> {
        self.sprites
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::MissingSprite(name.to_owned()))
    }

    fn sound(&self, name: &str) -> Result<SoundHandle, AssetError> {
        self.sounds
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::MissingSound(name.to_owned()))
    }
}

enum ManifestError {
    Syntax(String),
    Asset(AssetError),
}

impl From<AssetError> for ManifestError {
    fn from(error: AssetError) -> Self {
        Self::Asset(error)
    }
}

fn parse_color(name: &str, value: &str) -> Result<Color, AssetError> {
    Color::from_str(value).map_err(|_| AssetError::InvalidColor {
        name: name.to_owned(),
        value: value.to_owned(),
    })
}

/// Handles the game needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct GameAssets {
    pub background: Sprite,
    pub segment: Sprite,
    pub food: Sprite,
    pub music: Option<SoundHandle>,
    pub food_cue: Option<SoundHandle>,
    pub crash_cue: Option<SoundHandle>,
}

impl GameAssets {
    /// Resolves every named asset. Missing sprites are fatal, missing sounds
    /// are logged and left silent.
    pub fn resolve<P: AssetProvider + ?Sized>(provider: &P) -> Result<Self, AssetError> {
        Ok(Self {
            background: provider.sprite(asset_names::BACKGROUND)?,
            segment: provider.sprite(asset_names::SEGMENT)?,
            food: provider.sprite(asset_names::FOOD)?,
            music: optional_sound(provider, asset_names::MUSIC),
            food_cue: optional_sound(provider, asset_names::CUE_FOOD),
            crash_cue: optional_sound(provider, asset_names::CUE_CRASH),
        })
    }
}

fn optional_sound<P: AssetProvider + ?Sized>(provider: &P, name: &str) -> Option<SoundHandle> {
    match provider.sound(name) {
        Ok(handle) => Some(handle),
        Err(error) => {
            log::warn!("{error}; continuing without it");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::{AssetCatalog, AssetProvider, GameAssets};
    use crate::config::asset_names;
    use crate::error::AssetError;

    #[test]
    fn builtin_catalog_resolves_every_game_asset() {
        let assets = GameAssets::resolve(&AssetCatalog::builtin()).expect("builtin assets resolve");

        assert!(assets.music.is_some());
        assert_eq!(assets.food_cue.map(|cue| cue.bells), Some(1));
        assert_eq!(assets.crash_cue.map(|cue| cue.bells), Some(2));
    }

    #[test]
    fn missing_sprite_is_fatal() {
        let mut catalog = AssetCatalog::default();
        catalog.insert_sound(asset_names::CUE_FOOD, 1);

        assert!(matches!(
            GameAssets::resolve(&catalog),
            Err(AssetError::MissingSprite(name)) if name == asset_names::BACKGROUND
        ));
    }

    #[test]
    fn missing_sound_is_not_fatal() {
        let mut catalog = AssetCatalog::builtin();
        catalog.remove_sound(asset_names::CUE_CRASH);

        let assets = GameAssets::resolve(&catalog).expect("sprites still resolve");

        assert!(assets.crash_cue.is_none());
        assert!(assets.food_cue.is_some());
    }

    #[test]
    fn manifest_overrides_builtin_entries() {
        let mut catalog = AssetCatalog::builtin();
        let manifest = r##"{
            "sprites": { "food": { "glyph": "@@", "fg": "yellow", "bg": "#000000" } },
            "sounds": { "ding": { "bells": 3 } }
        }"##;

        assert!(catalog.merge_manifest(manifest).is_ok());

        let food = catalog.sprite(asset_names::FOOD).expect("food sprite exists");
        assert_eq!(food.glyph, "@@");
        assert_eq!(food.fg, Color::Yellow);
        assert_eq!(food.bg, Some(Color::Rgb(0, 0, 0)));
        assert_eq!(
            catalog.sound(asset_names::CUE_FOOD).map(|cue| cue.bells).ok(),
            Some(3)
        );
    }

    #[test]
    fn manifest_with_bad_color_is_rejected() {
        let mut catalog = AssetCatalog::builtin();
        let manifest = r#"{ "sprites": { "food": { "glyph": "@@", "fg": "not-a-color" } } }"#;

        assert!(catalog.merge_manifest(manifest).is_err());
    }
}
