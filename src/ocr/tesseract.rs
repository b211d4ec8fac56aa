//! Tesseract OCR engine driven through the `tesseract` command line
//!
//! The preprocessed image is PNG-encoded and piped to
//! `tesseract stdin stdout ... tsv`; the TSV on stdout is parsed into
//! [`OcrData`]. Every call is bounded by the configured timeout and the child
//! process is killed when the call is abandoned.

use super::model::{BoundingBox, OcrData};
use super::OcrEngine;
use crate::config::OcrConfig;
use crate::domain::OcrError;
use async_trait::async_trait;
use image::{GrayImage, ImageFormat};
use std::io::Cursor;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Number of columns in a Tesseract TSV row:
/// level page_num block_num par_num line_num word_num left top width height conf text
const TSV_COLUMNS: usize = 12;

/// Tesseract invoked as a subprocess
pub struct TesseractCli {
    config: OcrConfig,
}

impl TesseractCli {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_seconds)
    }

    /// Arguments passed after the executable name
    fn args(&self) -> Vec<String> {
        let mut args = vec![
            "stdin".to_string(),
            "stdout".to_string(),
            "--oem".to_string(),
            self.config.engine_mode.to_string(),
            "--psm".to_string(),
            self.config.page_seg_mode.to_string(),
            "-l".to_string(),
            self.config.language.clone(),
        ];
        args.extend(self.config.extra_args.iter().cloned());
        args.push("tsv".to_string());
        args
    }

    async fn run(&self, png: Vec<u8>) -> Result<String, OcrError> {
        let mut child = Command::new(&self.config.command)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| OcrError::Spawn {
                command: self.config.command.clone(),
                message: e.to_string(),
            })?;

        let mut stdin = child.stdin.take().ok_or_else(|| OcrError::Spawn {
            command: self.config.command.clone(),
            message: "stdin was not captured".to_string(),
        })?;

        // Feed stdin concurrently so a large TSV on stdout can't deadlock the pipe.
        let writer = tokio::spawn(async move {
            stdin.write_all(&png).await?;
            stdin.shutdown().await
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| OcrError::InvalidOutput(format!("failed to collect output: {e}")))?;

        if let Ok(Err(e)) = writer.await {
            tracing::debug!(error = %e, "OCR engine closed stdin early");
        }

        if !output.status.success() {
            return Err(OcrError::ExitStatus {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout)
            .map_err(|e| OcrError::InvalidOutput(format!("TSV is not UTF-8: {e}")))
    }
}

#[async_trait]
impl OcrEngine for TesseractCli {
    async fn recognize(&self, image: &GrayImage) -> Result<OcrData, OcrError> {
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| OcrError::Encode(e.to_string()))?;

        let timeout = self.timeout();
        let tsv = tokio::time::timeout(timeout, self.run(png))
            .await
            .map_err(|_| OcrError::Timeout(timeout))??;

        let data = parse_tsv(&tsv);
        tracing::debug!(
            engine = self.name(),
            rows = data.len(),
            width = image.width(),
            height = image.height(),
            "OCR completed"
        );
        Ok(data)
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}

/// Parse Tesseract TSV output into parallel columns.
///
/// Every row is kept, including page/block/line rows whose text is empty, so
/// the columns line up with what the engine reported. The header and rows
/// with unparseable geometry are skipped.
pub fn parse_tsv(tsv: &str) -> OcrData {
    let mut data = OcrData::new();

    for line in tsv.lines().skip(1) {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < TSV_COLUMNS - 1 {
            continue;
        }

        let Some(bbox) = parse_bounding_box(fields[6], fields[7], fields[8], fields[9]) else {
            tracing::trace!(row = %line, "Skipping TSV row with invalid geometry");
            continue;
        };

        let text = fields.get(11).copied().unwrap_or("");
        data.push(text, fields[10], bbox);
    }

    data
}

fn parse_bounding_box(left: &str, top: &str, width: &str, height: &str) -> Option<BoundingBox> {
    Some(BoundingBox {
        left: left.trim().parse().ok()?,
        top: top.trim().parse().ok()?,
        width: width.trim().parse().ok()?,
        height: height.trim().parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::model::UNKNOWN_CONFIDENCE;

    const HEADER: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\t\
                          left\ttop\twidth\theight\tconf\ttext";

    fn config() -> OcrConfig {
        OcrConfig::default()
    }

    #[test]
    fn test_parse_tsv_keeps_all_levels() {
        let tsv = format!(
            "{HEADER}\n\
             1\t1\t0\t0\t0\t0\t0\t0\t600\t800\t-1\t\n\
             5\t1\t1\t1\t1\t1\t10\t20\t80\t30\t95.5\tPatient\n\
             5\t1\t1\t1\t1\t2\t100\t20\t60\t30\t88\tName:"
        );
        let data = parse_tsv(&tsv);
        assert_eq!(data.len(), 3);
        assert_eq!(data.text, vec!["", "Patient", "Name:"]);
        assert_eq!(data.conf, vec!["-1", "95.5", "88"]);
        assert_eq!(data.left, vec![0, 10, 100]);
        assert_eq!(data.width, vec![600, 80, 60]);

        let words = data.into_words().unwrap();
        assert_eq!(words[0].confidence, -1.0);
        assert!(words[0].is_blank());
        assert_eq!(words[1].confidence, 95.5);
    }

    #[test]
    fn test_parse_tsv_row_without_text_column() {
        let tsv = format!("{HEADER}\n2\t1\t1\t0\t0\t0\t5\t6\t7\t8\t-1");
        let data = parse_tsv(&tsv);
        assert_eq!(data.len(), 1);
        assert_eq!(data.text[0], "");
    }

    #[test]
    fn test_parse_tsv_skips_garbage_rows() {
        let tsv = format!(
            "{HEADER}\n\
             not a row\n\
             5\t1\t1\t1\t1\t1\tx\t20\t80\t30\t95\tBad\n\
             5\t1\t1\t1\t1\t2\t100\t20\t60\t30\tweird\tGood"
        );
        let data = parse_tsv(&tsv);
        assert_eq!(data.text, vec!["Good"]);

        let words = data.into_words().unwrap();
        assert_eq!(words[0].confidence, UNKNOWN_CONFIDENCE);
    }

    #[test]
    fn test_parse_tsv_empty_output() {
        assert!(parse_tsv("").is_empty());
        assert!(parse_tsv(HEADER).is_empty());
    }

    #[test]
    fn test_args_follow_config() {
        let mut cfg = config();
        cfg.engine_mode = 1;
        cfg.page_seg_mode = 4;
        cfg.language = "eng+hin".to_string();
        cfg.extra_args = vec!["--dpi".to_string(), "300".to_string()];

        let args = TesseractCli::new(cfg).args();
        assert_eq!(
            args,
            vec![
                "stdin", "stdout", "--oem", "1", "--psm", "4", "-l", "eng+hin", "--dpi", "300",
                "tsv"
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let mut cfg = config();
        cfg.command = "/nonexistent/medredact-tesseract".to_string();
        let engine = TesseractCli::new(cfg);

        let image = GrayImage::new(4, 4);
        let err = engine.recognize(&image).await.unwrap_err();
        assert!(matches!(err, OcrError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_hung_engine_times_out() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("slow-tesseract.sh");
        std::fs::write(&script, "#!/bin/sh\ncat >/dev/null\nexec sleep 30\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let mut cfg = config();
        cfg.command = script.to_string_lossy().into_owned();
        cfg.timeout_seconds = 1;
        let engine = TesseractCli::new(cfg);

        let started = std::time::Instant::now();
        let err = engine.recognize(&GrayImage::new(4, 4)).await.unwrap_err();

        assert!(matches!(err, OcrError::Timeout(d) if d == Duration::from_secs(1)));
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
