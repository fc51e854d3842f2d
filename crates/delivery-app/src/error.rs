use delivery_import::ImportError;
use delivery_model::RecordId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// A rejected load; the prior dataset is left untouched.
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error("no record with id {0}")]
    UnknownRecord(RecordId),
    /// The status field only changes through the confirmation-gated status
    /// machine, never through a plain field edit.
    #[error("status changes must go through the status machine")]
    GatedStatusField,
    #[error("no data to export")]
    NoData,
    #[error("failed to write export: {0}")]
    Export(#[from] csv::Error),
}
