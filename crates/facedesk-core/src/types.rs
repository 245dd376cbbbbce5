use serde::{Deserialize, Serialize};
use std::path::Path;

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// A recognition model stored on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
    /// Size in bytes.
    pub size: u64,
}

/// A registered identity and how many face images the backend holds for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub image_count: u32,
}

/// Outcome of verifying a probe image against one person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    #[serde(rename = "match")]
    pub matched: bool,
    /// Confidence in [0, 100].
    pub confidence: f64,
}

/// Status of the inference accelerator attached to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceleratorStatus {
    pub installed: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub device_present: Option<bool>,
    #[serde(default)]
    pub device_info: Option<serde_json::Value>,
    #[serde(default)]
    pub temperature: Option<f64>,
}

/// A file handed over by a drop or pick gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Read a file from disk, naming it after the last path component.
    pub async fn read(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Ok(Self { name, data })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Format a byte count as megabytes with two decimals, e.g. `"10.00 MB"`.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MEGABYTE)
}

/// Format a confidence value with two decimals, e.g. `"87.50%"`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// One rendered line of the model list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRow {
    pub name: String,
    pub size: String,
}

impl From<&Model> for ModelRow {
    fn from(model: &Model) -> Self {
        Self {
            name: model.name.clone(),
            size: format_megabytes(model.size),
        }
    }
}

/// One rendered card of the face list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceRow {
    pub name: String,
    pub images: String,
}

impl From<&Person> for FaceRow {
    fn from(person: &Person) -> Self {
        Self {
            name: person.name.clone(),
            images: format!("{} images", person.image_count),
        }
    }
}

/// Visual class of the verification result panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultStyle {
    Success,
    Error,
}

/// Rendered verification result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPanel {
    pub headline: String,
    pub detail: String,
    pub style: ResultStyle,
}

impl From<&VerificationResult> for ResultPanel {
    fn from(result: &VerificationResult) -> Self {
        let (headline, style) = if result.matched {
            ("Match Found!", ResultStyle::Success)
        } else {
            ("No Match", ResultStyle::Error)
        };
        Self {
            headline: headline.to_string(),
            detail: format!("Confidence: {}", format_percent(result.confidence)),
            style,
        }
    }
}
