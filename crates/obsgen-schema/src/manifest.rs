use crate::{Error, prelude::*, types::Flavor, universe::TypeUniverse, validate};
use std::fmt;

///
/// Location
/// Opaque source position of a request; only echoed back in diagnostics.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Location(Option<String>);

impl Location {
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        Self(Some(location.into()))
    }

    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }

    #[must_use]
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_deref().unwrap_or("<unknown>"))
    }
}

///
/// Request
/// One resolved call site (instance) or assembly marker (static).
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Request {
    #[serde(default)]
    pub location: Location,
    pub type_id: TypeId,
}

impl Request {
    #[must_use]
    pub fn new(location: Location, type_id: impl Into<TypeId>) -> Self {
        Self {
            location,
            type_id: type_id.into(),
        }
    }
}

///
/// Manifest
///
/// Everything the host hands over for one compilation pass: the type
/// universe plus the ordered request lists per flavor.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Manifest {
    #[serde(default)]
    pub types: Vec<TypeDescriptor>,

    #[serde(default)]
    pub instance: Vec<Request>,

    #[serde(default, rename = "static")]
    pub statics: Vec<Request>,
}

impl Manifest {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn requests(&self, flavor: Flavor) -> &[Request] {
        match flavor {
            Flavor::Instance => &self.instance,
            Flavor::Static => &self.statics,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        validate::validate_manifest(self).map_err(Error::Validation)
    }

    /// Validate, then build the universe.
    pub fn universe(&self) -> Result<TypeUniverse, Error> {
        self.validate()?;

        TypeUniverse::from_types(self.types.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = r#"{
        "types": [
            {
                "namespace": "App",
                "name": "Widget",
                "events": [
                    {
                        "name": "Closed",
                        "delegate": { "kind": "named", "namespace": "System", "segments": [{ "name": "Action" }] }
                    }
                ]
            }
        ],
        "instance": [{ "location": "Program.cs(4,9)", "type_id": "App.Widget" }],
        "static": [{ "type_id": "App.Widget" }]
    }"#;

    #[test]
    fn parses_requests_per_flavor() {
        let manifest = Manifest::from_json(JSON).expect("manifest parses");

        assert_eq!(manifest.requests(Flavor::Instance).len(), 1);
        assert_eq!(
            manifest.requests(Flavor::Instance)[0].location.to_string(),
            "Program.cs(4,9)"
        );
        assert_eq!(
            manifest.requests(Flavor::Static)[0].location,
            Location::none()
        );
    }

    #[test]
    fn universe_is_built_after_validation() {
        let manifest = Manifest::from_json(JSON).expect("manifest parses");
        let universe = manifest.universe().expect("manifest is valid");

        assert!(universe.contains(&TypeId::new("App.Widget")));
    }

    #[test]
    fn universe_refuses_invalid_manifest() {
        let mut manifest = Manifest::from_json(JSON).expect("manifest parses");
        manifest.statics.push(Request::new(Location::none(), "App.Missing"));

        assert!(matches!(manifest.universe(), Err(Error::Validation(_))));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            Manifest::from_json("{ \"types\": 3 }"),
            Err(Error::Manifest(_))
        ));
    }
}
