use serde::{Deserialize, Serialize};

/// JSON body served under `application/json`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeBody {
    /// Empty when the server omits the key.
    #[serde(default)]
    pub datetime: String,
}
