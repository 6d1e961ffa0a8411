use serde::{Deserialize, Serialize};
use validator::Validate;

/// Station codes such as `USC00519397`.
pub type StationId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Station {
    #[serde(rename = "station")]
    #[validate(length(min = 1))]
    pub id: StationId,

    #[validate(length(min = 1))]
    pub name: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    pub elevation: Option<f64>,
}

impl Station {
    pub fn new(
        id: impl Into<StationId>,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        elevation: Option<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            latitude,
            longitude,
            elevation,
        }
    }
}
