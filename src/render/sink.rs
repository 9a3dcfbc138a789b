use std::{
    ffi::OsString,
    io::Write,
    path::{Path, PathBuf},
    process::{Child, Command, Stdio},
};

use log::{debug, info, warn};
use plotters::prelude::*;

use crate::{config::RenderConfig, HyperplaneErr, Result};

/// A destination for rendered frames.
///
/// Frames are tightly packed RGB buffers of `width * height * 3` bytes, pushed in display order
/// between one `begin` and one `finish`.
pub trait FrameSink {
    fn begin(&mut self, width: u32, height: u32) -> Result<()>;
    fn push(&mut self, frame: &[u8]) -> Result<()>;
    fn finish(&mut self) -> Result<()>;
}

/// Fails with `OutputDir` unless the directory `path` would be written to exists.
pub fn check_output_dir(path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    if !dir.is_dir() {
        return Err(HyperplaneErr::OutputDir(dir.to_path_buf()));
    }

    Ok(())
}

/// Encodes frames into a video by piping them to an `ffmpeg` process.
#[derive(Debug)]
pub struct FfmpegSink {
    path: PathBuf,
    fps: u32,
    bitrate_kbps: u32,
    codec: String,
    child: Option<Child>,
}

impl FfmpegSink {
    /// Creates a new `FfmpegSink`, the encoder is not started until `begin`.
    ///
    /// # Arguments
    /// * `path` - The video file to write.
    /// * `fps` - The frame rate of the video.
    /// * `bitrate_kbps` - The target bitrate in kbit/s.
    /// * `codec` - The name of the ffmpeg video codec.
    pub fn new(path: impl Into<PathBuf>, fps: u32, bitrate_kbps: u32, codec: &str) -> Self {
        Self {
            path: path.into(),
            fps,
            bitrate_kbps,
            codec: codec.to_string(),
            child: None,
        }
    }

    /// Builds the ffmpeg command line reading raw RGB frames of `width`x`height` from stdin.
    pub fn args(&self, width: u32, height: u32) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "-y",
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
            "-s",
            format!("{width}x{height}").as_str(),
            "-r",
            self.fps.to_string().as_str(),
            "-i",
            "-",
            "-vcodec",
            self.codec.as_str(),
            "-b:v",
            format!("{}k", self.bitrate_kbps).as_str(),
            "-pix_fmt",
            "yuv420p",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();

        args.push(self.path.clone().into_os_string());
        args
    }
}

fn encoder_err(path: &Path, what: &str, e: impl std::fmt::Display) -> HyperplaneErr {
    HyperplaneErr::Encoder(format!("{what} '{}': {e}", path.display()))
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, width: u32, height: u32) -> Result<()> {
        check_output_dir(&self.path)?;

        debug!("spawning ffmpeg for {width}x{height} frames at {} fps", self.fps);

        let child = Command::new("ffmpeg")
            .args(self.args(width, height))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|e| encoder_err(&self.path, "cannot start ffmpeg for", e))?;

        self.child = Some(child);
        Ok(())
    }

    fn push(&mut self, frame: &[u8]) -> Result<()> {
        let path = &self.path;
        let stdin = self
            .child
            .as_mut()
            .and_then(|child| child.stdin.as_mut())
            .ok_or_else(|| HyperplaneErr::Encoder("ffmpeg is not running".into()))?;

        stdin
            .write_all(frame)
            .map_err(|e| encoder_err(path, "cannot write a frame of", e))
    }

    fn finish(&mut self) -> Result<()> {
        let Some(mut child) = self.child.take() else {
            return Err(HyperplaneErr::Encoder("ffmpeg is not running".into()));
        };

        // Closing stdin lets ffmpeg flush and exit.
        drop(child.stdin.take());

        let status = child
            .wait()
            .map_err(|e| encoder_err(&self.path, "ffmpeg did not finish", e))?;

        if !status.success() {
            return Err(encoder_err(&self.path, "ffmpeg failed to write", status));
        }

        info!("wrote {}", self.path.display());
        Ok(())
    }
}

impl Drop for FfmpegSink {
    /// Stops an encoder that was never finished, e.g. after a failed `push`.
    fn drop(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };

        warn!("stopping unfinished ffmpeg for '{}'", self.path.display());
        if let Err(e) = child.kill() {
            debug!("cannot kill ffmpeg: {e}");
        }
        if let Err(e) = child.wait() {
            debug!("cannot reap ffmpeg: {e}");
        }
    }
}

/// Encodes frames into an animated GIF.
pub struct GifSink {
    path: PathBuf,
    interval_ms: u32,
    size: (u32, u32),
    backend: Option<BitMapBackend<'static>>,
}

impl GifSink {
    /// Creates a new `GifSink`.
    ///
    /// # Arguments
    /// * `path` - The GIF file to write.
    /// * `interval_ms` - How long each frame is displayed.
    pub fn new(path: impl Into<PathBuf>, interval_ms: u32) -> Self {
        Self {
            path: path.into(),
            interval_ms,
            size: (0, 0),
            backend: None,
        }
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, width: u32, height: u32) -> Result<()> {
        check_output_dir(&self.path)?;

        let backend = BitMapBackend::gif(&self.path, (width, height), self.interval_ms)
            .map_err(HyperplaneErr::plot)?;

        self.size = (width, height);
        self.backend = Some(backend);
        Ok(())
    }

    fn push(&mut self, frame: &[u8]) -> Result<()> {
        let backend = self
            .backend
            .as_mut()
            .ok_or_else(|| HyperplaneErr::Encoder("the GIF encoder is not open".into()))?;

        backend
            .blit_bitmap((0, 0), self.size, frame)
            .map_err(HyperplaneErr::plot)?;
        backend.present().map_err(HyperplaneErr::plot)
    }

    fn finish(&mut self) -> Result<()> {
        // The file is complete once the encoder is dropped.
        self.backend.take();
        info!("wrote {}", self.path.display());
        Ok(())
    }
}

/// Keeps every frame in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub size: (u32, u32),
    pub frames: Vec<Vec<u8>>,
    pub finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSink for MemorySink {
    fn begin(&mut self, width: u32, height: u32) -> Result<()> {
        self.size = (width, height);
        Ok(())
    }

    fn push(&mut self, frame: &[u8]) -> Result<()> {
        self.frames.push(frame.to_vec());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

/// Picks the sink for the configured output, `.gif` files get a `GifSink` and anything else is
/// encoded by ffmpeg.
pub fn sink_for(cfg: &RenderConfig) -> Box<dyn FrameSink> {
    let is_gif = cfg
        .output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"));

    if is_gif {
        Box::new(GifSink::new(&cfg.output, cfg.interval_ms))
    } else {
        Box::new(FfmpegSink::new(
            &cfg.output,
            cfg.fps,
            cfg.bitrate_kbps,
            &cfg.codec,
        ))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_directories_are_reported() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("no-such-dir").join("out.mp4");
        assert!(matches!(
            check_output_dir(&path),
            Err(HyperplaneErr::OutputDir(_))
        ));

        assert!(check_output_dir(&tmp.path().join("out.mp4")).is_ok());
        assert!(check_output_dir(Path::new("bare.mp4")).is_ok());
    }

    #[test]
    fn ffmpeg_refuses_to_start_without_a_directory() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("no-such-dir").join("out.mp4");
        let mut sink = FfmpegSink::new(path, 30, 500, "libx264");

        assert!(matches!(
            sink.begin(4, 4),
            Err(HyperplaneErr::OutputDir(_))
        ));
        assert!(sink.push(&[0; 48]).is_err());
    }

    #[test]
    fn ffmpeg_command_line_follows_the_render_defaults() {
        let cfg = RenderConfig::default();
        let sink = FfmpegSink::new(&cfg.output, cfg.fps, cfg.bitrate_kbps, &cfg.codec);

        let args = sink.args(cfg.width, cfg.height);
        let expected = [
            "-y",
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
            "-s",
            "640x480",
            "-r",
            "30",
            "-i",
            "-",
            "-vcodec",
            "libx264",
            "-b:v",
            "500k",
            "-pix_fmt",
            "yuv420p",
            "./video/hyperplane.mp4",
        ];

        assert_eq!(args, expected.map(OsString::from));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn unfinished_encoder_is_reaped_on_drop() {
        let tmp = TempDir::new().unwrap();
        let mut sink = FfmpegSink::new(tmp.path().join("out.mp4"), 30, 500, "libx264");

        // Stands in for an encoder blocked on its input.
        let child = Command::new("cat")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .unwrap();
        let pid = child.id();
        sink.child = Some(child);

        sink.push(&[0; 12]).unwrap();
        drop(sink);

        assert!(!Path::new(&format!("/proc/{pid}")).exists());
    }

    #[test]
    fn extension_selects_the_encoder() {
        let gif = RenderConfig {
            output: PathBuf::from("out.GIF"),
            ..RenderConfig::default()
        };
        let mut sink = sink_for(&gif);
        assert!(sink.push(&[]).is_err());

        let mp4 = RenderConfig::default();
        assert!(sink_for(&mp4).finish().is_err());
    }

    #[test]
    fn gif_sink_writes_a_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sink.gif");
        let mut sink = GifSink::new(&path, 200);

        sink.begin(4, 2).unwrap();
        sink.push(&[255; 24]).unwrap();
        sink.push(&[0; 24]).unwrap();
        sink.finish().unwrap();

        assert!(path.metadata().unwrap().len() > 0);
    }
}
