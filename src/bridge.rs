//! Newline-delimited JSON command channel between the web view and the
//! controller. Each request line is a [`Command`] with an optional `id`; each
//! response line echoes that `id` with either `data` or `error`.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::{
    log_info, log_warn,
    navigation::{dispatch, Command, ViewController},
    services::{DataSubmitter, ImageAnalyzer},
};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    fn success(id: Option<Value>, data: Value) -> Self {
        Self {
            id,
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    fn failure(id: Option<Value>, error: String) -> Self {
        Self {
            id,
            ok: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Serves commands until the reader hits end of input.
pub async fn serve<A, S, R, W>(
    controller: &ViewController<A, S>,
    reader: R,
    mut writer: W,
) -> Result<()>
where
    A: ImageAnalyzer,
    S: DataSubmitter,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read command line")?
    {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = handle_line(controller, line).await;
        let mut encoded = serde_json::to_vec(&response).context("Failed to encode response")?;
        encoded.push(b'\n');
        writer
            .write_all(&encoded)
            .await
            .context("Failed to write response")?;
        writer.flush().await.context("Failed to flush response")?;
    }

    log_info!("Command stream closed");
    Ok(())
}

pub async fn handle_line<A, S>(controller: &ViewController<A, S>, line: &str) -> Response
where
    A: ImageAnalyzer,
    S: DataSubmitter,
{
    let mut request: Value = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(err) => {
            log_warn!("Rejected malformed request: {err}");
            return Response::failure(None, format!("invalid JSON: {err}"));
        }
    };

    let id = request.as_object_mut().and_then(|fields| fields.remove("id"));
    let command: Command = match serde_json::from_value(request) {
        Ok(command) => command,
        Err(err) => {
            log_warn!("Rejected unknown command: {err}");
            return Response::failure(id, format!("invalid command: {err}"));
        }
    };

    match dispatch(controller, command).await {
        Ok(data) => Response::success(id, data),
        Err(error) => {
            log_warn!("Command failed: {error}");
            Response::failure(id, error)
        }
    }
}
