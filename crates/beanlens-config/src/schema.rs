use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::BeanlensConfig;

/// JSON schema for the beanlens TOML config, for editor tooling and CI validation.
#[must_use]
pub fn json_schema() -> RootSchema {
    schema_for!(BeanlensConfig)
}
