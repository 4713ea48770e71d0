use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Departments offered by the client. The server stores any non-empty text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter,
)]
pub enum Department {
    #[strum(serialize = "IT")]
    #[serde(rename = "IT")]
    It,
    #[strum(serialize = "HR")]
    #[serde(rename = "HR")]
    Hr,
    Sales,
    Marketing,
    Operations,
    Admin,
}
