//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

const APP_DIR: &str = "issue-triage";
const PROJECT_FILES: [&str; 2] = ["triage.toml", ".triage.toml"];
const ENV_PREFIX: &str = "TRIAGE_";

/// Bare environment variables accepted for compatibility with existing
/// deployments, and the config keys they fill.
const LEGACY_ENV: [(&str, &str); 4] = [
    ("OPENAI_API_KEY", "llm.api_key"),
    ("GITHUB_TOKEN", "github.token"),
    ("GITHUB_OWNER", "github.owner"),
    ("GITHUB_REPO", "github.repo"),
];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Bare `OPENAI_API_KEY` / `GITHUB_TOKEN` / `GITHUB_OWNER` / `GITHUB_REPO`
    /// 2. `TRIAGE_*` variables (`TRIAGE_SERVER__BIND` → `server.bind`)
    /// 3. Explicit config path (if provided)
    /// 4. Project root: `./triage.toml` or `./.triage.toml`
    /// 5. Global: `$XDG_CONFIG_HOME/issue-triage/config.toml`
    /// 6. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::with_environment(Self::file_figment(config_path))
            .extract()
            .map_err(Box::new)
    }

    /// Load defaults plus environment, skipping every file (for --no-config)
    pub fn load_defaults() -> Result<FileConfig, Box<figment::Error>> {
        Self::with_environment(Self::base_figment())
            .extract()
            .map_err(Box::new)
    }

    /// Load a `.env` file from the working directory (or a parent) into the
    /// process environment, so the legacy variables can live there.
    ///
    /// Variables already set in the process are not overridden. Returns
    /// `Ok(None)` when there is no `.env` file.
    pub fn load_dotenv() -> Result<Option<PathBuf>, dotenv::Error> {
        match dotenv::dotenv() {
            Ok(path) => Ok(Some(path)),
            Err(e) if e.not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn base_figment() -> Figment {
        Figment::new().merge(Serialized::defaults(FileConfig::default()))
    }

    fn file_figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Self::base_figment();

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    fn with_environment(figment: Figment) -> Figment {
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Self::legacy_env())
    }

    fn legacy_env() -> Env {
        let names: Vec<&str> = LEGACY_ENV.iter().map(|(var, _)| *var).collect();
        Env::raw().only(&names).map(|key| {
            LEGACY_ENV
                .iter()
                .find(|(var, _)| key.as_str().eq_ignore_ascii_case(var))
                .map(|(_, path)| (*path).into())
                .unwrap_or_else(|| key.as_str().to_string().into())
        })
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/issue-triage/config.toml if set,
    /// otherwise falls back to ~/.config/issue-triage/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Env:     OPENAI_API_KEY, GITHUB_TOKEN, GITHUB_OWNER, GITHUB_REPO");
        println!("  [     ] Env:     {}*", ENV_PREFIX);
        println!("  [     ] Dotenv:  .env (fills unset variables)");

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./triage.toml or ./.triage.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("issue-triage"));
    }

    #[test]
    fn test_file_layers_override_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
[github]
owner = "acme"
repo = "api"

[execution]
max_tool_turns = 3
"#,
            )?;
            let path = PathBuf::from("custom.toml");
            let config: FileConfig = ConfigLoader::file_figment(Some(&path)).extract()?;
            assert_eq!(config.github.owner.as_deref(), Some("acme"));
            assert_eq!(config.execution.max_tool_turns, 3);
            assert_eq!(config.llm.model, "gpt-4o-mini");
            Ok(())
        });
    }

    #[test]
    fn test_project_file_is_discovered() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(".triage.toml", "[server]\nbind = \"127.0.0.1:9100\"\n")?;
            assert_eq!(
                ConfigLoader::project_config_path(),
                Some(PathBuf::from(".triage.toml"))
            );
            let config: FileConfig = ConfigLoader::file_figment(None).extract()?;
            assert_eq!(config.server.bind, "127.0.0.1:9100");
            Ok(())
        });
    }

    #[test]
    fn test_legacy_env_vars_fill_credentials() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("OPENAI_API_KEY", "sk-env");
            jail.set_env("GITHUB_TOKEN", "ghp_env");
            jail.set_env("GITHUB_OWNER", "acme");
            jail.set_env("GITHUB_REPO", "api");
            let config = ConfigLoader::load_defaults().map_err(|e| *e)?;
            assert_eq!(config.llm.api_key.as_deref(), Some("sk-env"));
            assert_eq!(config.github.token.as_deref(), Some("ghp_env"));
            assert_eq!(config.repository().unwrap().to_string(), "acme/api");
            Ok(())
        });
    }

    #[test]
    fn test_prefixed_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("triage.toml", "[llm]\nmodel = \"gpt-4o\"\n")?;
            jail.set_env("TRIAGE_LLM__MODEL", "gpt-4.1");
            jail.set_env("TRIAGE_EXECUTION__MAX_TOOL_TURNS", "5");
            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.llm.model, "gpt-4.1");
            assert_eq!(config.execution.max_tool_turns, 5);
            Ok(())
        });
    }

    #[test]
    fn test_dotenv_fills_unset_legacy_vars() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                ".env",
                "GITHUB_OWNER=acme\nGITHUB_REPO=api\nOPENAI_API_KEY=sk-dotenv\n",
            )?;
            jail.set_env("OPENAI_API_KEY", "sk-process");

            let path = ConfigLoader::load_dotenv().map_err(|e| e.to_string())?;
            assert!(path.is_some_and(|p| p.ends_with(".env")));

            let config = ConfigLoader::load_defaults().map_err(|e| *e)?;
            assert_eq!(config.repository().unwrap().to_string(), "acme/api");
            // The process environment wins over the file
            assert_eq!(config.llm.api_key.as_deref(), Some("sk-process"));
            Ok(())
        });
    }

    #[test]
    fn test_legacy_env_wins_over_prefixed() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TRIAGE_GITHUB__TOKEN", "ghp_prefixed");
            jail.set_env("GITHUB_TOKEN", "ghp_bare");
            let config = ConfigLoader::load_defaults().map_err(|e| *e)?;
            assert_eq!(config.github.token.as_deref(), Some("ghp_bare"));
            Ok(())
        });
    }
}
