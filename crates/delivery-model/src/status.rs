use serde::{Deserialize, Serialize};

/// Delivery lifecycle status.
///
/// The wire tokens are the uppercase values used by the shared schedule
/// document (`PENDENTE`, `A CAMINHO`, ...). Parsing is lenient: anything that
/// is not one of the five known tokens folds into [`DeliveryStatus::Pending`],
/// matching how the aggregation layer derives its "pending" bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeliveryStatus {
    #[default]
    Pending,
    InTransit,
    Postponed,
    Delivered,
    Canceled,
}

impl DeliveryStatus {
    /// All statuses in lifecycle order. `Pending` first so it is the default
    /// selection wherever a status list is rendered.
    pub const ALL: [DeliveryStatus; 5] = [
        DeliveryStatus::Pending,
        DeliveryStatus::InTransit,
        DeliveryStatus::Postponed,
        DeliveryStatus::Delivered,
        DeliveryStatus::Canceled,
    ];

    /// Canonical document token for this status.
    pub fn token(self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "PENDENTE",
            DeliveryStatus::InTransit => "A CAMINHO",
            DeliveryStatus::Postponed => "ADIADO",
            DeliveryStatus::Delivered => "ENTREGUE",
            DeliveryStatus::Canceled => "CANCELADO",
        }
    }

    /// Strict token lookup: `Some` only for one of the five known tokens
    /// (case-insensitive, surrounding whitespace ignored).
    pub fn recognize(raw: &str) -> Option<DeliveryStatus> {
        let token = raw.trim().to_uppercase();
        Self::ALL.into_iter().find(|s| s.token() == token)
    }

    /// Lenient parse used at every ingestion boundary: empty or unrecognized
    /// input is `Pending`.
    pub fn from_raw(raw: &str) -> DeliveryStatus {
        Self::recognize(raw).unwrap_or_default()
    }

    /// `Delivered` and `Canceled` are conceptually final.
    pub fn is_terminal(self) -> bool {
        matches!(self, DeliveryStatus::Delivered | DeliveryStatus::Canceled)
    }
}

impl From<String> for DeliveryStatus {
    fn from(raw: String) -> Self {
        DeliveryStatus::from_raw(&raw)
    }
}

impl From<DeliveryStatus> for String {
    fn from(status: DeliveryStatus) -> Self {
        status.token().to_string()
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}
