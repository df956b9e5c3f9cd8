use crate::config::Config;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use xcommon::Color;

pub mod command;
mod config;
pub mod res;
mod task;

pub const CONFIG_FILE: &str = "icons.yaml";

/// Location of the logo inside a project.
pub fn default_logo() -> PathBuf {
    ["assets", "images", "logo.png"].iter().collect()
}

/// Location of the android resources inside a project.
pub fn default_res() -> PathBuf {
    ["android", "app", "src", "main", "res"].iter().collect()
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct IconArgs {
    /// Project root containing `assets/images/logo.png`
    #[clap(long, default_value = ".")]
    project_dir: PathBuf,
    /// Logo to generate the icons from, relative to the project root
    #[clap(long)]
    logo: Option<PathBuf>,
    /// Android `res` directory, relative to the project root
    #[clap(long)]
    res: Option<PathBuf>,
    /// Launcher icon background as `#rrggbb` or `#rrggbbaa`
    #[clap(long)]
    background: Option<Color>,
    /// Clip launcher icons to a circle
    #[clap(long)]
    round: bool,
    /// Store icons with the smallest lossless png color type
    #[clap(long)]
    optimize: bool,
    /// Use verbose output
    #[clap(long, short)]
    verbose: bool,
}

#[derive(Clone, Debug)]
pub struct IconEnv {
    logo: PathBuf,
    res_dir: PathBuf,
    background: Color,
    round: bool,
    optimize: bool,
    verbose: bool,
}

impl IconEnv {
    pub fn new(args: IconArgs) -> Result<Self> {
        let root = dunce::canonicalize(&args.project_dir).with_context(|| {
            format!("project directory not found: {}", args.project_dir.display())
        })?;
        let config = Config::parse(root.join(CONFIG_FILE))?;
        let logo = root.join(args.logo.or(config.logo).unwrap_or_else(default_logo));
        if !logo.is_file() {
            anyhow::bail!("logo not found: {}", logo.display());
        }
        let res_dir = root.join(args.res.or(config.res).unwrap_or_else(default_res));
        tracing::debug!("project root {}", root.display());
        Ok(Self {
            logo,
            res_dir,
            background: args.background.or(config.background).unwrap_or_default(),
            round: args.round || config.round,
            optimize: args.optimize || config.optimize,
            verbose: args.verbose,
        })
    }

    pub fn logo(&self) -> &Path {
        &self.logo
    }

    pub fn res_dir(&self) -> &Path {
        &self.res_dir
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn round(&self) -> bool {
        self.round
    }

    pub fn optimize(&self) -> bool {
        self.optimize
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project() -> Result<TempDir> {
        let dir = tempfile::tempdir()?;
        let logo = dir.path().join(default_logo());
        std::fs::create_dir_all(logo.parent().unwrap())?;
        std::fs::write(logo, b"")?;
        Ok(dir)
    }

    #[test]
    fn default_layout() -> Result<()> {
        let dir = project()?;
        let args = IconArgs::parse_from(["xicon", "--project-dir", dir.path().to_str().unwrap()]);
        let env = IconEnv::new(args)?;
        assert!(env.logo().ends_with(default_logo()));
        assert!(env.res_dir().ends_with(default_res()));
        assert_eq!(env.background(), Color::BLACK);
        assert!(!env.round());
        assert!(!env.optimize());
        Ok(())
    }

    #[test]
    fn args_override_config() -> Result<()> {
        let dir = project()?;
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "background: \"#ffffff\"\nres: out\noptimize: true\n",
        )?;
        let args = IconArgs::parse_from([
            "xicon",
            "--project-dir",
            dir.path().to_str().unwrap(),
            "--background",
            "#00ff00",
            "--round",
        ]);
        let env = IconEnv::new(args)?;
        assert_eq!(env.background(), Color([0, 255, 0, 255]));
        assert!(env.res_dir().ends_with("out"));
        assert!(env.round());
        assert!(env.optimize());
        Ok(())
    }

    #[test]
    fn logo_and_res_flags() -> Result<()> {
        let dir = project()?;
        let branding = dir.path().join("branding");
        std::fs::create_dir_all(&branding)?;
        std::fs::write(branding.join("icon.webp"), b"")?;
        std::fs::write(dir.path().join(CONFIG_FILE), "res: out\n")?;
        let args = IconArgs::parse_from([
            "xicon",
            "--project-dir",
            dir.path().to_str().unwrap(),
            "--logo",
            "branding/icon.webp",
            "--res",
            "generated/res",
        ]);
        let env = IconEnv::new(args)?;
        assert!(env.logo().ends_with(Path::new("branding").join("icon.webp")));
        assert!(env.res_dir().ends_with(Path::new("generated").join("res")));
        Ok(())
    }

    #[test]
    fn missing_logo_flag() -> Result<()> {
        let dir = project()?;
        let args = IconArgs::parse_from([
            "xicon",
            "--project-dir",
            dir.path().to_str().unwrap(),
            "--logo",
            "missing.png",
        ]);
        let err = IconEnv::new(args).unwrap_err().to_string();
        assert!(err.starts_with("logo not found: "));
        assert!(err.ends_with("missing.png"));
        Ok(())
    }

    #[test]
    fn missing_logo() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let args = IconArgs::parse_from(["xicon", "--project-dir", dir.path().to_str().unwrap()]);
        let err = IconEnv::new(args).unwrap_err().to_string();
        assert!(err.starts_with("logo not found: "));
        assert!(err.ends_with(&default_logo().display().to_string()));
        Ok(())
    }
}
