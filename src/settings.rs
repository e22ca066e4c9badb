use log::{info, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatcherSettings {
    /// Consecutive stable frames before a Gen0 element becomes Gen1.
    /// Default 30 frames, about 0.5s at 60fps.
    #[serde(default = "BatcherSettings::default_promotion_threshold_gen1")]
    pub promotion_threshold_gen1: u32,
    /// Consecutive stable frames before a Gen1 element becomes Gen2.
    /// Default 120 frames, about 2s at 60fps.
    #[serde(default = "BatcherSettings::default_promotion_threshold_gen2")]
    pub promotion_threshold_gen2: u32,
    #[serde(default = "BatcherSettings::default_scratch_vertex_capacity")]
    pub scratch_vertex_capacity: usize,
    #[serde(default = "BatcherSettings::default_scratch_index_capacity")]
    pub scratch_index_capacity: usize,
}

impl Default for BatcherSettings {
    fn default() -> Self {
        Self {
            promotion_threshold_gen1: Self::default_promotion_threshold_gen1(),
            promotion_threshold_gen2: Self::default_promotion_threshold_gen2(),
            scratch_vertex_capacity: Self::default_scratch_vertex_capacity(),
            scratch_index_capacity: Self::default_scratch_index_capacity(),
        }
    }
}

impl BatcherSettings {
    pub fn load() -> Self {
        Self::load_from_path("batching.json")
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Self {
        use std::fs;

        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<BatcherSettings>(&contents) {
                Ok(settings) => {
                    info!("Loaded batcher settings from {:?}", path);
                    settings.validate()
                }
                Err(err) => {
                    warn!(
                        "Failed to parse {:?} ({}). Falling back to default batcher settings.",
                        path, err
                    );
                    BatcherSettings::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "Batcher settings file {:?} not found. Using default settings.",
                    path
                );
                BatcherSettings::default()
            }
            Err(err) => {
                warn!(
                    "Failed to read {:?} ({}). Falling back to default batcher settings.",
                    path, err
                );
                BatcherSettings::default()
            }
        }
    }

    fn validate(mut self) -> Self {
        if self.promotion_threshold_gen1 == 0 {
            warn!("Gen1 promotion threshold must be at least 1 frame. Using 1 instead.");
            self.promotion_threshold_gen1 = 1;
        }
        if self.promotion_threshold_gen2 == 0 {
            warn!("Gen2 promotion threshold must be at least 1 frame. Using 1 instead.");
            self.promotion_threshold_gen2 = 1;
        }
        self
    }

    fn default_promotion_threshold_gen1() -> u32 {
        30
    }

    fn default_promotion_threshold_gen2() -> u32 {
        120
    }

    fn default_scratch_vertex_capacity() -> usize {
        256
    }

    fn default_scratch_index_capacity() -> usize {
        384
    }
}
