use serde::Serialize;
use tokio::io::{AsyncWriteExt, BufWriter};

#[derive(Serialize)]
struct ExportEnvelope<'report, T> {
    generated_at: String,
    command: &'report str,
    report: &'report T,
}

/// Writes `report` as pretty JSON, tagged with the producing command and a
/// generation timestamp.
pub(crate) async fn export_json<T: Serialize>(
    path: &str,
    command: &str,
    report: &T,
) -> Result<(), std::io::Error> {
    let envelope = ExportEnvelope {
        generated_at: chrono::Utc::now().to_rfc3339(),
        command,
        report,
    };

    let file = tokio::fs::File::create(path).await?;
    let mut writer = BufWriter::new(file);
    let json = serde_json::to_vec_pretty(&envelope).map_err(std::io::Error::other)?;
    writer.write_all(&json).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
