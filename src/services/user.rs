//! User profile and body measurement endpoints.

use crate::client::WhoopClient;
use crate::errors::WhoopResult;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

/// The user's basic profile information.
#[derive(Debug, Clone, Deserialize)]
pub struct BasicProfile {
    /// The WHOOP user identifier.
    pub user_id: i64,
    /// Email address.
    pub email: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
}

/// The user's physical body measurements.
#[derive(Debug, Clone, Deserialize)]
pub struct BodyMeasurement {
    /// Height in meters.
    pub height_meter: f64,
    /// Weight in kilograms.
    pub weight_kilogram: f64,
    /// Maximum heart rate in beats per minute.
    pub max_heart_rate: i32,
}

/// Handles communication with the user related endpoints.
#[derive(Debug, Clone)]
pub struct UserService {
    client: WhoopClient,
}

impl UserService {
    pub(crate) fn new(client: WhoopClient) -> Self {
        Self { client }
    }

    /// Fetches the athlete's basic profile.
    pub async fn get_basic_profile(
        &self,
        cancel: &CancellationToken,
    ) -> WhoopResult<BasicProfile> {
        self.client.get_json(cancel, "/user/profile/basic").await
    }

    /// Fetches the athlete's body measurements.
    pub async fn get_body_measurement(
        &self,
        cancel: &CancellationToken,
    ) -> WhoopResult<BodyMeasurement> {
        self.client.get_json(cancel, "/user/measurement/body").await
    }
}
