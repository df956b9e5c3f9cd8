use std::path::{Path, PathBuf};

pub const DPI_LABEL: [&str; 5] = ["mdpi", "hdpi", "xhdpi", "xxhdpi", "xxxhdpi"];

pub const LAUNCHER_SIZE: [u32; 5] = [48, 72, 96, 144, 192];

pub const FOREGROUND_SIZE: [u32; 5] = [108, 162, 216, 324, 432];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IconKind {
    /// Opaque legacy launcher icon.
    Launcher,
    /// Transparent foreground layer of an adaptive icon.
    Foreground,
}

impl IconKind {
    pub fn folder(self) -> &'static str {
        match self {
            Self::Launcher => "mipmap",
            Self::Foreground => "drawable",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Launcher => "ic_launcher.png",
            Self::Foreground => "ic_launcher_foreground.png",
        }
    }

    /// Share of the canvas the logo may cover.
    pub fn ratio(self) -> f64 {
        match self {
            Self::Launcher => 0.8,
            Self::Foreground => 0.6,
        }
    }

    pub fn sizes(self) -> [u32; 5] {
        match self {
            Self::Launcher => LAUNCHER_SIZE,
            Self::Foreground => FOREGROUND_SIZE,
        }
    }
}

impl std::fmt::Display for IconKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Launcher => write!(f, "launcher"),
            Self::Foreground => write!(f, "foreground"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Icon {
    pub kind: IconKind,
    pub dpi: &'static str,
    pub size: u32,
}

impl Icon {
    /// Every icon to generate, launcher icons first.
    pub fn all() -> Vec<Self> {
        [IconKind::Launcher, IconKind::Foreground]
            .into_iter()
            .flat_map(|kind| {
                DPI_LABEL
                    .into_iter()
                    .zip(kind.sizes())
                    .map(move |(dpi, size)| Self { kind, dpi, size })
            })
            .collect()
    }

    pub fn folder(&self) -> String {
        format!("{}-{}", self.kind.folder(), self.dpi)
    }

    pub fn relative_path(&self) -> PathBuf {
        Path::new(&self.folder()).join(self.kind.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_table() {
        let icons = Icon::all();
        assert_eq!(icons.len(), 10);
        assert_eq!(
            icons[0],
            Icon {
                kind: IconKind::Launcher,
                dpi: "mdpi",
                size: 48
            }
        );
        assert_eq!(
            icons[0].relative_path(),
            Path::new("mipmap-mdpi").join("ic_launcher.png")
        );
        let last = icons[9];
        assert_eq!(last.kind, IconKind::Foreground);
        assert_eq!(last.size, 432);
        assert_eq!(last.folder(), "drawable-xxxhdpi");
        assert_eq!(
            last.relative_path(),
            Path::new("drawable-xxxhdpi").join("ic_launcher_foreground.png")
        );
    }

    #[test]
    fn foreground_is_larger_than_launcher() {
        for (launcher, foreground) in LAUNCHER_SIZE.into_iter().zip(FOREGROUND_SIZE) {
            assert_eq!(foreground * 4, launcher * 9);
        }
    }
}
