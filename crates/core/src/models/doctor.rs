use serde::{Deserialize, Serialize};

use crate::models::schedule::ScheduleRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: i64,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub registration_number: Option<String>,
    #[serde(default)]
    pub years_of_experience: i32,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub schedules: Vec<ScheduleRow>,
}

fn default_active() -> bool {
    true
}
