// src/writer/async_writer.rs
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot};
use tokio::task;
use tracing::debug;

use crate::error::{Result, TankError};
use crate::writer::TankWriter;

enum WriteCommand {
    WriteRecord {
        record: Bytes,
        response: oneshot::Sender<Result<()>>,
    },
    Flush {
        response: oneshot::Sender<Result<()>>,
    },
    Close,
}

/// Tank file writer driven from async code; file I/O runs on a blocking task
pub struct AsyncTankWriter {
    command_tx: mpsc::UnboundedSender<WriteCommand>,
    handle: Arc<Mutex<Option<task::JoinHandle<Result<usize>>>>>,
}

impl AsyncTankWriter {
    pub async fn create(path: impl AsRef<Path>) -> Result<Self> {
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let writer = TankWriter::create(path)?;
        let handle = task::spawn_blocking(move || Self::writer_task(writer, command_rx));

        Ok(AsyncTankWriter {
            command_tx,
            handle: Arc::new(Mutex::new(Some(handle))),
        })
    }

    fn writer_task(
        mut writer: TankWriter<BufWriter<File>>,
        mut command_rx: mpsc::UnboundedReceiver<WriteCommand>,
    ) -> Result<usize> {
        while let Some(command) = command_rx.blocking_recv() {
            match command {
                WriteCommand::WriteRecord { record, response } => {
                    let result = writer.write_record(&record);
                    let _ = response.send(result);
                }
                WriteCommand::Flush { response } => {
                    let _ = response.send(writer.flush());
                }
                WriteCommand::Close => break,
            }
        }

        writer.flush()?;
        debug!(
            records = writer.records_written(),
            bytes = writer.bytes_written(),
            "async tank writer finished"
        );
        Ok(writer.records_written())
    }

    pub async fn write_record(&self, record: impl Into<Bytes>) -> Result<()> {
        let (response_tx, response_rx) = oneshot::channel();
        self.command_tx
            .send(WriteCommand::WriteRecord {
                record: record.into(),
                response: response_tx,
            })
            .map_err(|_| TankError::WriterClosed)?;
        response_rx.await.map_err(|_| TankError::WriterClosed)?
    }

    pub async fn flush(&self) -> Result<()> {
        let (response_tx, response_rx) = oneshot::channel();
        self.command_tx
            .send(WriteCommand::Flush {
                response: response_tx,
            })
            .map_err(|_| TankError::WriterClosed)?;
        response_rx.await.map_err(|_| TankError::WriterClosed)?
    }

    /// Flush and stop the writer task, returning the number of records written
    pub async fn close(&self) -> Result<usize> {
        self.command_tx
            .send(WriteCommand::Close)
            .map_err(|_| TankError::WriterClosed)?;

        let handle = self.handle.lock().take();
        match handle {
            Some(handle) => handle.await.map_err(|_| TankError::WriterClosed)?,
            None => Err(TankError::WriterClosed),
        }
    }
}

impl Clone for AsyncTankWriter {
    fn clone(&self) -> Self {
        AsyncTankWriter {
            command_tx: self.command_tx.clone(),
            handle: Arc::clone(&self.handle),
        }
    }
}
