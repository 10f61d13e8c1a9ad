use std::fs;
use std::path::Path;

use anyhow::Context;
use ottsweeper_core::{CellCount, Coord, GameConfig};
use serde::{Deserialize, Serialize};

/// Settings read from the TOML configuration file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct FileConfig {
    pub mines: CellCount,
    pub cols: Coord,
    pub rows: Coord,
    /// Built-in level, takes precedence over `mines`, `cols` and `rows` when valid.
    pub difficulty: Option<u8>,
}

impl Default for FileConfig {
    fn default() -> Self {
        let config = GameConfig::default();
        let (cols, rows) = config.size();
        Self {
            mines: config.mines(),
            cols,
            rows,
            difficulty: None,
        }
    }
}

impl FileConfig {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("Invalid configuration file")
    }

    /// Reads `path`, writing a commented default file first when it does not exist.
    pub fn load_or_create(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::warn!(
                "Failed to load configuration file {}, generating a default one",
                path.display()
            );
            fs::write(path, default_file_contents())
                .with_context(|| format!("Could not write {}", path.display()))?;
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("While loading {}", path.display()))
    }

    /// Board parameters, with `difficulty` overriding the one from the file.
    pub fn game_config(&self, difficulty: Option<u8>) -> anyhow::Result<GameConfig> {
        if let Some(level) = difficulty.or(self.difficulty) {
            match GameConfig::preset(level) {
                Some(preset) => {
                    log::info!("Set difficulty level to {}", level);
                    return Ok(preset);
                }
                None => log::error!("Invalid difficulty specified ({})", level),
            }
        }

        GameConfig::new((self.cols, self.rows), self.mines).with_context(|| {
            format!(
                "Invalid board of {} x {} with {} mines",
                self.cols, self.rows, self.mines
            )
        })
    }
}

pub(crate) fn default_file_contents() -> String {
    let defaults = FileConfig::default();
    let mut text = String::from("# Automatically generated config file for Ottsweeper\n");
    text.push_str("# Built-in difficulty levels:\n");
    for level in 0..GameConfig::preset_count() {
        if let Some(preset) = GameConfig::preset(level) {
            let (cols, rows) = preset.size();
            let mines = preset.mines();
            text.push_str(&format!("#  {level} - {cols:02} x {rows:02} ({mines} mines)\n"));
        }
    }
    text.push_str("#difficulty = 0\n");
    text.push_str(&format!("mines = {}\n", defaults.mines));
    text.push_str(&format!("cols = {}\n", defaults.cols));
    text.push_str(&format!("rows = {}\n", defaults.rows));
    text
}
