//! QR codes for receiving addresses, drawn in the terminal or saved as SVG.

use anyhow::{Context, Result};
use qrcode::render::svg;
use qrcode::{Color, QrCode};
use std::path::{Path, PathBuf};

/// Light modules around the code, in modules.
const QUIET_ZONE: usize = 2;

/// Characters of the encoded data used in a saved file's name.
const FILE_STEM_CHARS: usize = 10;

fn encode(data: &str) -> Result<QrCode> {
    if data.trim().is_empty() {
        anyhow::bail!("Address is required");
    }
    QrCode::new(data.trim().as_bytes()).context("Failed to generate QR code")
}

/// Render a QR code as Unicode half blocks, two module rows per line.
pub fn render_terminal(data: &str) -> Result<String> {
    let code = encode(data)?;
    let colors = code.to_colors();
    let width = code.width();
    let total = width + QUIET_ZONE * 2;

    let is_dark = |x: usize, y: usize| -> bool {
        if x < QUIET_ZONE || y < QUIET_ZONE {
            return false;
        }
        let (x, y) = (x - QUIET_ZONE, y - QUIET_ZONE);
        x < width && y < width && colors[y * width + x] == Color::Dark
    };

    let mut lines = Vec::with_capacity(total / 2 + 1);
    for y in (0..total).step_by(2) {
        let line: String = (0..total)
            .map(|x| match (is_dark(x, y), is_dark(x, y + 1)) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            })
            .collect();
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

/// File name for a saved code: `qr_<first characters of data>.svg`.
pub fn file_name(data: &str) -> String {
    let stem: String = data
        .trim()
        .chars()
        .take(FILE_STEM_CHARS)
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("qr_{}.svg", stem)
}

/// Write the code as an SVG file in `dir` and return its path.
pub fn save_svg(data: &str, dir: &Path) -> Result<PathBuf> {
    let code = encode(data)?;
    let image = code
        .render::<svg::Color>()
        .min_dimensions(256, 256)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build();

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(file_name(data));
    std::fs::write(&path, image)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
