use crate::error::{Result, TaggerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use term_tagger_common::{DEFAULT_CANDIDATE_LIMIT, TOKEN_DELIMITER};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 閾値判定の前に残す上位候補数
    pub candidate_limit: usize,
    /// 既定の出力列名
    pub output_column: String,
    /// 既定の出力ファイル名の接頭辞
    pub file_prefix: String,
    /// トークン分割の区切り文字
    pub token_delimiter: char,
    /// プレビュー表示する行数
    pub preview_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            output_column: "search_result".into(),
            file_prefix: "namingconvention_output".into(),
            token_delimiter: TOKEN_DELIMITER,
            preview_rows: 20,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TaggerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("term-tagger").join("config.json"))
    }

    fn validate(&self) -> Result<()> {
        if self.candidate_limit == 0 {
            return Err(TaggerError::Config("candidate_limit は1以上にしてください".into()));
        }
        if self.output_column.trim().is_empty() {
            return Err(TaggerError::Config("output_column が空です".into()));
        }
        Ok(())
    }
}
