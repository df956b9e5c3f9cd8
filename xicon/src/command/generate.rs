use crate::res::{Icon, IconKind};
use crate::task::TaskRunner;
use crate::IconEnv;
use anyhow::{Context, Result};
use xcommon::{Color, DynamicImage, Scaler};

/// Renders a single icon from the loaded logo.
pub fn render(env: &IconEnv, scaler: &Scaler, icon: &Icon) -> Result<DynamicImage> {
    let background = match icon.kind {
        IconKind::Launcher => env.background(),
        IconKind::Foreground => Color::TRANSPARENT,
    };
    let mut img = scaler.icon(icon.size, icon.kind.ratio(), background)?;
    if env.round() && icon.kind == IconKind::Launcher {
        xcommon::apply_circle_mask(&mut img);
    }
    Ok(if env.optimize() {
        xcommon::optimize(img)
    } else {
        DynamicImage::ImageRgba8(img)
    })
}

pub fn generate(env: &IconEnv) -> Result<()> {
    let scaler = Scaler::open(env.logo())?;
    let (width, height) = scaler.dimensions();
    tracing::info!("loaded {} ({}x{})", env.logo().display(), width, height);
    if width != height {
        tracing::warn!("logo is not square, icons will be letterboxed");
    }

    let icons = Icon::all();
    let mut runner = TaskRunner::new(icons.len() as u32, env.verbose());
    for icon in &icons {
        let path = env.res_dir().join(icon.relative_path());
        runner.start_task(format!(
            "{} ({}x{})",
            icon.relative_path().display(),
            icon.size,
            icon.size
        ));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let img = render(env, &scaler, icon)?;
        xcommon::write_png(&img, &path)?;
        tracing::debug!("wrote {} icon {}", icon.kind, path.display());
        runner.end_task();
    }
    println!(
        "generated {} icons in {}",
        runner.finished(),
        env.res_dir().display()
    );
    Ok(())
}
