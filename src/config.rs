use std::{
    env, fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    data::{reader, DataPaths},
    training::ObserveEvery,
    HyperplaneErr, Result,
};

/// The environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "HYPERPLANE_CONFIG";

/// Everything a run needs, every field defaults to the values the tool has always used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub training: TrainingConfig,
    pub render: RenderConfig,
}

/// Where the four data files live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub dir: PathBuf,
    pub features_train: String,
    pub features_test: String,
    pub labels_train: String,
    pub labels_test: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub learn_rate: f32,
    pub max_iterations: usize,
    pub averaged: bool,
    pub observe_every: ObserveEvery,
}

/// How the animation is drawn and encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// The video file, a `.gif` extension selects the GIF encoder.
    pub output: PathBuf,
    pub fps: u32,
    /// Display time of each GIF frame.
    pub interval_ms: u32,
    pub bitrate_kbps: u32,
    pub codec: String,
    pub width: u32,
    pub height: u32,
    /// The x values the decision line spans.
    pub x_range: (f32, f32),
    /// The amount of points the decision line is sampled at.
    pub samples: usize,
    /// Whether to draw titles, axis labels and the legend.
    pub captions: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            features_train: reader::FEATURES_TRAIN.to_string(),
            features_test: reader::FEATURES_TEST.to_string(),
            labels_train: reader::LABELS_TRAIN.to_string(),
            labels_test: reader::LABELS_TEST.to_string(),
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learn_rate: 1.0,
            max_iterations: 10,
            averaged: true,
            observe_every: ObserveEvery::Update,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("./video/hyperplane.mp4"),
            fps: 30,
            interval_ms: 200,
            bitrate_kbps: 500,
            codec: "libx264".to_string(),
            width: 640,
            height: 480,
            x_range: (-10., 10.),
            samples: 1000,
            captions: true,
        }
    }
}

impl DataConfig {
    /// Resolves the four file names against `dir`.
    pub fn paths(&self) -> DataPaths {
        DataPaths {
            features_train: self.dir.join(&self.features_train),
            features_test: self.dir.join(&self.features_test),
            labels_train: self.dir.join(&self.labels_train),
            labels_test: self.dir.join(&self.labels_test),
        }
    }
}

impl TrainingConfig {
    /// Returns the pass cap, zero is rejected by `Config::validate`.
    pub fn max_iterations(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.max_iterations)
            .ok_or_else(|| HyperplaneErr::InvalidConfig("max_iterations must be positive".into()))
    }
}

impl Config {
    /// Reads a config from a JSON file, missing fields keep their defaults.
    ///
    /// # Arguments
    /// * `path` - The JSON file.
    ///
    /// # Returns
    /// The validated config or an error if the file can't be read, parsed or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| HyperplaneErr::io(path, e))?;

        let cfg = Self::from_json(&content)?;
        info!("loaded config from {}", path.display());
        Ok(cfg)
    }

    /// Parses and validates a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Loads the file named by `HYPERPLANE_CONFIG`, or the defaults if it isn't set.
    pub fn from_env() -> Result<Self> {
        match env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Checks the values a run can't work with.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(HyperplaneErr::InvalidConfig(msg));

        let training = &self.training;
        if !training.learn_rate.is_finite() || training.learn_rate <= 0. {
            return invalid(format!(
                "learn_rate must be positive, got {}",
                training.learn_rate
            ));
        }
        training.max_iterations()?;

        let render = &self.render;
        if render.fps == 0 {
            return invalid("fps must be positive".into());
        }

        if render.width == 0 || render.height == 0 {
            return invalid(format!(
                "cannot draw {}x{} frames",
                render.width, render.height
            ));
        }

        if render.samples < 2 {
            return invalid(format!(
                "the line needs at least 2 samples, got {}",
                render.samples
            ));
        }

        let (lo, hi) = render.x_range;
        if !(lo < hi) {
            return invalid(format!("x_range [{lo}, {hi}] is empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_run() {
        let cfg = Config::default();

        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.training.learn_rate, 1.0);
        assert_eq!(cfg.training.max_iterations, 10);
        assert_eq!(cfg.render.output, PathBuf::from("./video/hyperplane.mp4"));
        assert_eq!(cfg.render.fps, 30);
        assert_eq!(cfg.render.bitrate_kbps, 500);
        assert_eq!(
            cfg.data.paths().labels_test,
            Path::new(".").join(reader::LABELS_TEST)
        );
    }

    #[test]
    fn partial_json_overrides_only_what_it_names() {
        let json = r#"{
            "training": { "max_iterations": 3, "observe_every": "pass" },
            "render": { "output": "out.gif", "captions": false }
        }"#;

        let cfg = Config::from_json(json).unwrap();

        assert_eq!(cfg.training.max_iterations, 3);
        assert_eq!(cfg.training.observe_every, ObserveEvery::Pass);
        assert_eq!(cfg.training.learn_rate, 1.0);
        assert_eq!(cfg.render.output, PathBuf::from("out.gif"));
        assert!(!cfg.render.captions);
        assert_eq!(cfg.render.width, 640);
        assert_eq!(cfg.data, DataConfig::default());
    }

    #[test]
    fn unusable_values_are_rejected() {
        let cases = [
            r#"{ "training": { "learn_rate": 0.0 } }"#,
            r#"{ "training": { "max_iterations": 0 } }"#,
            r#"{ "render": { "fps": 0 } }"#,
            r#"{ "render": { "width": 0 } }"#,
            r#"{ "render": { "samples": 1 } }"#,
            r#"{ "render": { "x_range": [5.0, 5.0] } }"#,
        ];

        for json in cases {
            assert!(
                matches!(Config::from_json(json), Err(HyperplaneErr::InvalidConfig(_))),
                "{json}"
            );
        }
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(
            Config::from_json("{ not json"),
            Err(HyperplaneErr::Json(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{ "training": { "observe_every": "epoch" } }"#),
            Err(HyperplaneErr::Json(_))
        ));
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::load(tmp.path().join("missing.json")),
            Err(HyperplaneErr::Io { .. })
        ));
    }

    #[test]
    fn config_file_round_trips_through_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("hyperplane.json");
        fs::write(&path, r#"{ "render": { "fps": 12 } }"#).unwrap();

        let cfg = Config::load(&path).unwrap();

        assert_eq!(cfg.render.fps, 12);
        assert_eq!(cfg.training, TrainingConfig::default());
    }
}
