use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::registry::RegistryError;

/// A tracked satellite: display name and NORAD catalog number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Satellite {
    pub name: String,
    pub norad_id: u32,
}

/// Ordered set of satellites read from `satellites.json`.
///
/// The file is a JSON object mapping display name to catalog number. Entry order
/// is kept because it decides trace order and marker symbols in the scene.
#[derive(Debug, Clone, Default)]
pub struct SatelliteRegistry {
    satellites: Vec<Satellite>,
}

impl SatelliteRegistry {
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> Result<Self, RegistryError> {
        let registry: SatelliteRegistry = serde_json::from_str(json)?;
        registry.validate()?;
        Ok(registry)
    }

    fn validate(&self) -> Result<(), RegistryError> {
        if self.satellites.is_empty() {
            return Err(RegistryError::Empty);
        }
        let mut seen = HashSet::new();
        for sat in &self.satellites {
            // Selections travel as a comma separated list of names.
            if sat.name.is_empty() || sat.name.contains(',') || sat.name.trim() != sat.name {
                return Err(RegistryError::InvalidName(sat.name.clone()));
            }
            if !seen.insert(sat.name.as_str()) {
                return Err(RegistryError::DuplicateName(sat.name.clone()));
            }
        }
        Ok(())
    }

    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }

    pub fn len(&self) -> usize {
        self.satellites.len()
    }

    pub fn names(&self) -> Vec<&str> {
        self.satellites.iter().map(|s| s.name.as_str()).collect()
    }

    /// Pick the named satellites, keeping registry order.
    ///
    /// Returns the selection and the requested names that are not registered.
    pub fn select(&self, names: &[String]) -> (Vec<Satellite>, Vec<String>) {
        let wanted: HashSet<&str> = names.iter().map(|n| n.trim()).collect();
        let selected: Vec<Satellite> = self
            .satellites
            .iter()
            .filter(|s| wanted.contains(s.name.as_str()))
            .cloned()
            .collect();

        let known: HashSet<&str> = self.satellites.iter().map(|s| s.name.as_str()).collect();
        let mut reported = HashSet::new();
        let unknown: Vec<String> = names
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty() && !known.contains(n) && reported.insert(*n))
            .map(String::from)
            .collect();

        (selected, unknown)
    }
}

impl<'de> Deserialize<'de> for SatelliteRegistry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RegistryVisitor;

        impl<'de> Visitor<'de> for RegistryVisitor {
            type Value = SatelliteRegistry;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of satellite name to NORAD catalog number")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut satellites = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, norad_id)) = map.next_entry::<String, u32>()? {
                    satellites.push(Satellite { name, norad_id });
                }
                Ok(SatelliteRegistry { satellites })
            }
        }

        deserializer.deserialize_map(RegistryVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SATELLITES: &str = r#"{
        "ISS (ZARYA)": 25544,
        "HUBBLE": 20580,
        "NOAA 19": 33591
    }"#;

    #[test]
    fn test_registry_keeps_file_order() {
        let registry = SatelliteRegistry::from_json_str(SATELLITES).unwrap();
        assert_eq!(registry.names(), vec!["ISS (ZARYA)", "HUBBLE", "NOAA 19"]);
        assert_eq!(registry.satellites()[1].norad_id, 20580);
    }

    #[test]
    fn test_registry_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SATELLITES.as_bytes()).unwrap();

        let registry = SatelliteRegistry::from_file(file.path()).unwrap();
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_registry_rejects_empty() {
        let err = SatelliteRegistry::from_json_str("{}").unwrap_err();
        assert!(matches!(err, RegistryError::Empty));
    }

    #[test]
    fn test_registry_rejects_duplicate_names() {
        let err =
            SatelliteRegistry::from_json_str(r#"{"ISS": 25544, "ISS": 25545}"#).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(name) if name == "ISS"));
    }

    #[test]
    fn test_registry_rejects_non_numeric_id() {
        let err = SatelliteRegistry::from_json_str(r#"{"ISS": "abc"}"#).unwrap_err();
        assert!(matches!(err, RegistryError::Json(_)));
    }

    #[test]
    fn test_select_keeps_registry_order_and_reports_unknown() {
        let registry = SatelliteRegistry::from_json_str(SATELLITES).unwrap();
        let (selected, unknown) = registry.select(&[
            "NOAA 19".to_string(),
            "ISS (ZARYA)".to_string(),
            "TIANGONG".to_string(),
        ]);

        let names: Vec<_> = selected.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["ISS (ZARYA)", "NOAA 19"]);
        assert_eq!(unknown, vec!["TIANGONG".to_string()]);
    }

    #[test]
    fn test_registry_rejects_names_that_cannot_be_selected() {
        for json in [
            r#"{"ISS, ZARYA": 25544}"#,
            r#"{" HUBBLE": 20580}"#,
            r#"{"": 1}"#,
        ] {
            let err = SatelliteRegistry::from_json_str(json).unwrap_err();
            assert!(matches!(err, RegistryError::InvalidName(_)), "{}", json);
        }
    }

    #[test]
    fn test_select_reports_each_unknown_name_once() {
        let registry = SatelliteRegistry::from_json_str(SATELLITES).unwrap();
        let (selected, unknown) = registry.select(&[
            "X".to_string(),
            "HUBBLE".to_string(),
            "Y".to_string(),
            " X ".to_string(),
        ]);

        assert_eq!(selected.len(), 1);
        assert_eq!(unknown, vec!["X".to_string(), "Y".to_string()]);
    }

    #[test]
    fn test_select_nothing() {
        let registry = SatelliteRegistry::from_json_str(SATELLITES).unwrap();
        let (selected, unknown) = registry.select(&[]);
        assert!(selected.is_empty());
        assert!(unknown.is_empty());
    }
}
