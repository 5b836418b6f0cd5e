//! Frame time recording
//!
//! Writes one CSV row per frame to `performance_metrics_<cubes>.csv` so runs
//! with different cube counts can be compared, and keeps a short rolling
//! window of frame times for the FPS readout in the title bar.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::MetricsConfig;

/// CSV header row
pub const CSV_HEADER: &str = "Frame,FrameTime_ms,Cubes";

/// Frames averaged for the FPS readout
const ROLLING_WINDOW: usize = 60;

/// Error type for metrics output
#[derive(Debug)]
pub enum MetricsError {
    Io(io::Error),
}

impl From<io::Error> for MetricsError {
    fn from(e: io::Error) -> Self {
        MetricsError::Io(e)
    }
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Io(e) => write!(f, "Failed to write metrics: {}", e),
        }
    }
}

impl std::error::Error for MetricsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MetricsError::Io(e) => Some(e),
        }
    }
}

/// Path of the CSV file for a given cube count
pub fn csv_path<P: AsRef<Path>>(output_dir: P, cube_count: usize) -> PathBuf {
    output_dir
        .as_ref()
        .join(format!("performance_metrics_{}.csv", cube_count))
}

/// Records frame times, optionally to a CSV sink
pub struct PerformanceRecorder<W: Write = BufWriter<File>> {
    writer: Option<W>,
    cube_count: usize,
    frames: u64,
    max_samples: u64,
    recent: VecDeque<f32>,
    recent_sum: f32,
}

impl PerformanceRecorder<BufWriter<File>> {
    /// Create from configuration
    ///
    /// When metrics are disabled no file is created and only the rolling
    /// average is kept.
    pub fn from_config(config: &MetricsConfig, cube_count: usize) -> Result<Self, MetricsError> {
        if !config.enabled {
            return Ok(Self::disabled(cube_count));
        }

        std::fs::create_dir_all(&config.output_dir)?;
        let path = csv_path(&config.output_dir, cube_count);
        let file = File::create(&path)?;
        log::info!("Recording frame times to {}", path.display());

        Self::from_writer(BufWriter::new(file), cube_count, config.max_samples)
    }
}

impl<W: Write> PerformanceRecorder<W> {
    /// Record into `writer`, writing the header immediately
    pub fn from_writer(mut writer: W, cube_count: usize, max_samples: u64) -> Result<Self, MetricsError> {
        writeln!(writer, "{}", CSV_HEADER)?;
        Ok(Self {
            writer: Some(writer),
            cube_count,
            frames: 0,
            max_samples,
            recent: VecDeque::with_capacity(ROLLING_WINDOW),
            recent_sum: 0.0,
        })
    }

    /// Only track the rolling average
    pub fn disabled(cube_count: usize) -> Self {
        Self {
            writer: None,
            cube_count,
            frames: 0,
            max_samples: 0,
            recent: VecDeque::with_capacity(ROLLING_WINDOW),
            recent_sum: 0.0,
        }
    }

    /// Whether rows are still being written
    pub fn is_recording(&self) -> bool {
        self.writer.is_some()
    }

    /// Frames seen so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn cube_count(&self) -> usize {
        self.cube_count
    }

    /// Record one frame
    ///
    /// Once `max_samples` rows are written the sink is flushed and closed.
    pub fn record(&mut self, frame_time: Duration) -> Result<(), MetricsError> {
        let ms = frame_time.as_secs_f32() * 1000.0;
        self.frames += 1;

        if self.recent.len() == ROLLING_WINDOW {
            if let Some(oldest) = self.recent.pop_front() {
                self.recent_sum -= oldest;
            }
        }
        self.recent.push_back(ms);
        self.recent_sum += ms;

        if let Some(writer) = &mut self.writer {
            writeln!(writer, "{},{:.3},{}", self.frames, ms, self.cube_count)?;

            if self.max_samples > 0 && self.frames >= self.max_samples {
                writer.flush()?;
                self.writer = None;
                log::info!("Recorded {} frame samples", self.frames);
            }
        }
        Ok(())
    }

    /// Mean frame time over the rolling window in milliseconds
    pub fn average_frame_time_ms(&self) -> Option<f32> {
        if self.recent.is_empty() {
            None
        } else {
            Some(self.recent_sum / self.recent.len() as f32)
        }
    }

    /// Frames per second derived from the rolling average
    pub fn fps(&self) -> Option<f32> {
        self.average_frame_time_ms()
            .filter(|ms| *ms > 0.0)
            .map(|ms| 1000.0 / ms)
    }

    /// Flush and hand back the sink, ending the recording
    pub fn finish(mut self) -> Result<Option<W>, MetricsError> {
        match self.writer.take() {
            Some(mut writer) => {
                writer.flush()?;
                Ok(Some(writer))
            }
            None => Ok(None),
        }
    }
}

impl<W: Write> Drop for PerformanceRecorder<W> {
    fn drop(&mut self) {
        if let Some(writer) = &mut self.writer {
            if let Err(e) = writer.flush() {
                log::warn!("Failed to flush frame metrics: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn output(recorder: PerformanceRecorder<Vec<u8>>) -> String {
        let bytes = recorder.finish().unwrap().unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_header_and_rows() {
        let mut recorder = PerformanceRecorder::from_writer(Vec::new(), 10, 0).unwrap();
        recorder.record(ms(16)).unwrap();
        recorder.record(ms(20)).unwrap();

        let text = output(recorder);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![CSV_HEADER, "1,16.000,10", "2,20.000,10"]);
    }

    #[test]
    fn test_max_samples_stops_recording() {
        let mut recorder = PerformanceRecorder::from_writer(Vec::new(), 1, 2).unwrap();
        recorder.record(ms(5)).unwrap();
        assert!(recorder.is_recording());
        recorder.record(ms(5)).unwrap();
        assert!(!recorder.is_recording());
        recorder.record(ms(5)).unwrap();
        assert_eq!(recorder.frames(), 3);
        // Sink was closed after the second row
        assert!(recorder.finish().unwrap().is_none());
    }

    #[test]
    fn test_rolling_average_and_fps() {
        let mut recorder = PerformanceRecorder::<Vec<u8>>::disabled(5);
        assert_eq!(recorder.fps(), None);

        recorder.record(ms(10)).unwrap();
        recorder.record(ms(30)).unwrap();
        let avg = recorder.average_frame_time_ms().unwrap();
        assert!((avg - 20.0).abs() < 1e-3);
        assert!((recorder.fps().unwrap() - 50.0).abs() < 1e-2);
    }

    #[test]
    fn test_rolling_window_drops_old_frames() {
        let mut recorder = PerformanceRecorder::<Vec<u8>>::disabled(5);
        recorder.record(ms(1000)).unwrap();
        for _ in 0..ROLLING_WINDOW {
            recorder.record(ms(10)).unwrap();
        }
        let avg = recorder.average_frame_time_ms().unwrap();
        assert!((avg - 10.0).abs() < 1e-2, "avg = {}", avg);
    }

    #[test]
    fn test_csv_path_uses_cube_count() {
        assert_eq!(
            csv_path("out", 50),
            PathBuf::from("out").join("performance_metrics_50.csv")
        );
    }

    #[test]
    fn test_from_config_writes_file() {
        let dir = std::env::temp_dir().join("raydemo_metrics_tests");
        let config = MetricsConfig {
            enabled: true,
            output_dir: dir.clone(),
            max_samples: 0,
            title_stats: true,
        };

        {
            let mut recorder = PerformanceRecorder::from_config(&config, 7).unwrap();
            recorder.record(ms(12)).unwrap();
            // Dropped here, flushing the buffer
        }

        let path = csv_path(&dir, 7);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(CSV_HEADER));
        assert!(text.contains("1,12.000,7"));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_disabled_config_creates_no_file() {
        let config = MetricsConfig::default();
        let recorder = PerformanceRecorder::from_config(&config, 12345).unwrap();
        assert!(!recorder.is_recording());
        assert!(!csv_path(&config.output_dir, 12345).exists());
    }
}
