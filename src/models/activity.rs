use serde::{Deserialize, Serialize};

/// One extracurricular offering. The activity name is the directory key rather
/// than a field, so serializing the whole directory yields the name → details
/// mapping that `GET /activities` returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: usize,
    pub participants: Vec<String>,
}
