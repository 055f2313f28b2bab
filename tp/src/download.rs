//! Artifact downloads
//!
//! A GET against `<base><kml_path>`. The body is written to disk as-is; the
//! client never parses or validates it.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::client::{HttpPlanningClient, PlanError, PlanningService};
use crate::domain::ArtifactReference;

/// File name used when the reference has no usable last segment
const FALLBACK_FILE_NAME: &str = "trip_plan.kml";

/// Where an artifact lands when no explicit output is given
pub fn default_destination(dir: &Path, artifact: &ArtifactReference) -> PathBuf {
    dir.join(artifact.file_name().unwrap_or(FALLBACK_FILE_NAME))
}

fn io_error(path: &Path, err: std::io::Error) -> PlanError {
    PlanError::Io {
        path: path.display().to_string(),
        detail: err.to_string(),
    }
}

/// Sibling path the body is streamed into before it is moved to `dest`
fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

/// Stream the artifact to `dest`, returning the number of bytes written
///
/// `dest` only appears once the whole body has arrived. A failed transfer
/// leaves nothing behind.
pub async fn download_artifact(
    client: &HttpPlanningClient,
    artifact: &ArtifactReference,
    dest: &Path,
) -> Result<u64, PlanError> {
    let url = artifact.resolve(client.base_url());
    debug!(%url, dest = %dest.display(), "download_artifact: called");

    let response = client
        .http()
        .get(&url)
        .send()
        .await
        .map_err(PlanError::download_network)?;
    if !response.status().is_success() {
        let status = response.status().as_u16();
        warn!(status, "download_artifact: non-success status");
        return Err(PlanError::download_status(status));
    }

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| io_error(parent, e))?;
    }

    let partial = partial_path(dest);
    let written = match write_body(response, &partial).await {
        Ok(written) => written,
        Err(err) => {
            warn!(error = %err, partial = %partial.display(), "download_artifact: transfer failed, removing partial file");
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(err);
        }
    };
    tokio::fs::rename(&partial, dest).await.map_err(|e| io_error(dest, e))?;

    info!(%url, bytes = written, dest = %dest.display(), "download_artifact: saved");
    Ok(written)
}

async fn write_body(response: reqwest::Response, path: &Path) -> Result<u64, PlanError> {
    let mut file = tokio::fs::File::create(path).await.map_err(|e| io_error(path, e))?;

    let mut written = 0u64;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(PlanError::download_network)?;
        file.write_all(&chunk).await.map_err(|e| io_error(path, e))?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(|e| io_error(path, e))?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;

    #[test]
    fn test_default_destination_uses_file_name() {
        let kml = ArtifactReference::from_path(Some("/files/paris.kml".to_string())).unwrap();
        assert_eq!(
            default_destination(Path::new("/tmp/out"), &kml),
            PathBuf::from("/tmp/out/paris.kml")
        );
    }

    #[test]
    fn test_default_destination_fallback() {
        let kml = ArtifactReference::from_path(Some("/files/".to_string())).unwrap();
        assert_eq!(
            default_destination(Path::new("."), &kml),
            PathBuf::from("./trip_plan.kml")
        );
    }

    #[test]
    fn test_partial_path_is_a_sibling() {
        assert_eq!(
            partial_path(Path::new("/tmp/out/paris.kml")),
            PathBuf::from("/tmp/out/paris.kml.part")
        );
    }

    #[tokio::test]
    async fn test_truncated_body_leaves_no_file() {
        use tokio::io::AsyncReadExt;
        use tokio::net::TcpListener;

        // Promise 64 bytes, send 10, then hang up
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 64\r\n\r\n<kml>trun")
                .await;
            let _ = socket.shutdown().await;
        });

        let client = HttpPlanningClient::from_config(&ServiceConfig {
            base_url: format!("http://{}", addr),
            timeout_ms: 5_000,
        })
        .unwrap();
        let dir = tempfile::TempDir::new().unwrap();
        let dest = dir.path().join("paris.kml");
        let kml = ArtifactReference::from_path(Some("/files/paris.kml".to_string())).unwrap();

        let err = download_artifact(&client, &kml, &dest).await.unwrap_err();
        assert!(matches!(err, PlanError::Download { .. }));
        assert!(!dest.exists());
        assert!(!partial_path(&dest).exists());
    }
}
