//! OAuth2 scopes recognized by the WHOOP developer API.

/// An OAuth2 scope required to access specific WHOOP API endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Read the user's recovery data.
    ReadRecovery,
    /// Read the user's physiological cycles.
    ReadCycles,
    /// Read the user's sleep data.
    ReadSleep,
    /// Read the user's workout data.
    ReadWorkout,
    /// Read the user's basic profile.
    ReadProfile,
    /// Read the user's body measurements.
    ReadBodyMeasurement,
}

impl Scope {
    /// The scope string as it appears in an OAuth2 authorization request.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::ReadRecovery => "read:recovery",
            Scope::ReadCycles => "read:cycles",
            Scope::ReadSleep => "read:sleep",
            Scope::ReadWorkout => "read:workout",
            Scope::ReadProfile => "read:profile",
            Scope::ReadBodyMeasurement => "read:body_measurement",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
