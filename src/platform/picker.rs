use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use super::console::Console;
use crate::error::PickError;

const FALLBACK_FILE_NAME: &str = "image.jpg";

#[derive(Debug, Clone, PartialEq)]
pub struct PickedImage {
    pub file_name: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Camera and photo-library access. `Ok(None)` means the user cancelled.
#[async_trait]
pub trait ImagePicker: Send + Sync {
    async fn request_camera_permission(&self) -> PermissionStatus;

    async fn launch_camera(&self) -> Result<Option<PickedImage>, PickError>;

    async fn launch_library(&self) -> Result<Option<PickedImage>, PickError>;
}

/// Last path segment of the picked image, or `image.jpg` when there is none.
pub fn upload_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(FALLBACK_FILE_NAME)
        .to_string()
}

/// Terminal stand-in for the device picker: the library is a prompted file
/// path and the camera is an external capture command writing JPEG to stdout.
pub struct TerminalPicker {
    console: Arc<Console>,
    camera_command: Option<String>,
}

impl TerminalPicker {
    pub fn new(console: Arc<Console>, camera_command: Option<String>) -> Self {
        Self {
            console,
            camera_command,
        }
    }
}

#[async_trait]
impl ImagePicker for TerminalPicker {
    async fn request_camera_permission(&self) -> PermissionStatus {
        if self.camera_command.is_some() {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }

    async fn launch_camera(&self) -> Result<Option<PickedImage>, PickError> {
        let Some(command) = self.camera_command.as_deref() else {
            return Err(PickError::Camera("no capture command configured".into()));
        };

        tracing::debug!(command = %command, "Running camera capture command");
        let output = tokio::process::Command::new("sh")
            .arg("-c")
            .arg(command)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PickError::Camera(format!(
                "{}: {}",
                output.status,
                stderr.trim()
            )));
        }

        if output.stdout.is_empty() {
            return Ok(None);
        }

        Ok(Some(PickedImage {
            file_name: "photo.jpg".into(),
            bytes: Bytes::from(output.stdout),
        }))
    }

    async fn launch_library(&self) -> Result<Option<PickedImage>, PickError> {
        let path = match self.console.prompt("Image path (blank to cancel): ").await? {
            Some(p) if !p.is_empty() => p,
            _ => return Ok(None),
        };

        let bytes = tokio::fs::read(&path).await?;
        Ok(Some(PickedImage {
            file_name: upload_file_name(&path),
            bytes: Bytes::from(bytes),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker(input: &'static [u8], camera_command: Option<&str>) -> TerminalPicker {
        TerminalPicker::new(
            Arc::new(Console::from_reader(input)),
            camera_command.map(str::to_owned),
        )
    }

    #[test]
    fn test_upload_file_name() {
        assert_eq!(upload_file_name("/tmp/labels/oats.jpg"), "oats.jpg");
        assert_eq!(upload_file_name("label.jpeg"), "label.jpeg");
        assert_eq!(upload_file_name("/"), "image.jpg");
        assert_eq!(upload_file_name(""), "image.jpg");
    }

    #[tokio::test]
    async fn test_camera_permission_requires_command() {
        assert_eq!(
            picker(b"", None).request_camera_permission().await,
            PermissionStatus::Denied
        );
        assert_eq!(
            picker(b"", Some("true")).request_camera_permission().await,
            PermissionStatus::Granted
        );
    }

    #[tokio::test]
    async fn test_camera_reads_command_stdout() {
        let image = picker(b"", Some("printf jpegdata"))
            .launch_camera()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(image.file_name, "photo.jpg");
        assert_eq!(&image.bytes[..], b"jpegdata");
    }

    #[tokio::test]
    async fn test_camera_empty_output_is_cancel() {
        assert!(picker(b"", Some("true")).launch_camera().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_camera_failing_command_is_error() {
        assert!(picker(b"", Some("exit 3")).launch_camera().await.is_err());
    }

    #[tokio::test]
    async fn test_library_blank_path_is_cancel() {
        assert!(picker(b"\n", None).launch_library().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_library_reads_file() {
        let path = std::env::temp_dir().join(format!("macrotrack-label-{}.jpg", std::process::id()));
        std::fs::write(&path, b"label-bytes").unwrap();
        let input: &'static [u8] = Box::leak(format!("{}\n", path.display()).into_bytes().into_boxed_slice());

        let image = picker(input, None).launch_library().await.unwrap().unwrap();
        assert_eq!(image.file_name, upload_file_name(&path.display().to_string()));
        assert_eq!(&image.bytes[..], b"label-bytes");

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_library_missing_file_is_error() {
        let err = picker(b"/definitely/not/here.jpg\n", None)
            .launch_library()
            .await
            .unwrap_err();
        assert!(matches!(err, PickError::Io(_)));
    }
}
