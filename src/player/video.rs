use std::fs;
use std::process::Command;
use tempfile::TempDir;

use crate::error::{Error, Result};

/// Assembles rendered PNG frames into a VP9 WebM through the external
/// `ffmpeg` binary. Frames are staged as `img_0000.png`… in a temporary
/// directory that is released on every exit path.
pub(crate) fn encode_webm(frames: &[Vec<u8>], frame_rate: u8) -> Result<Vec<u8>> {
    let staging = TempDir::new()?;
    for (at, frame) in frames.iter().enumerate() {
        fs::write(staging.path().join(format!("img_{:04}.png", at)), frame)?;
    }
    let out_path = staging.path().join("out.webm");

    tracing::debug!(frames = frames.len(), frame_rate, "invoking video encoder");
    let output = Command::new("ffmpeg")
        .arg("-y")
        .arg("-framerate")
        .arg(frame_rate.to_string())
        .arg("-i")
        .arg(staging.path().join("img_%04d.png"))
        .arg("-c:v")
        .arg("libvpx-vp9")
        // Keep the alpha channel.
        .arg("-pix_fmt")
        .arg("yuva420p")
        .arg(&out_path)
        .output()
        .map_err(|error| Error::EncoderFailure {
            detail: format!("failed to launch ffmpeg: {}", error),
        })?;

    if !output.status.success() {
        return Err(Error::EncoderFailure {
            detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(fs::read(&out_path)?)
}
