use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

use super::materials::{
    format_hex_color, parse_hex_color, MaterialDef, MaterialId, MaterialRegistry, EMPTY, EMPTY_KEY,
};

impl MaterialRegistry {
    /// Build a registry from a JSON bundle:
    ///
    /// ```json
    /// { "materials": [ { "key": "sand", "name": "Sand", "color": "#e3c078",
    ///                    "movable": true, "gravity": true } ] }
    /// ```
    ///
    /// `empty` is always id 0 and cannot be redefined by a bundle.
    pub fn from_bundle_json(json: &str) -> SimResult<Self> {
        let bundle: BundleRoot =
            serde_json::from_str(json).map_err(|e| SimError::InvalidMaterial(e.to_string()))?;

        let mut registry = Self::empty_only();
        for el in bundle.materials {
            if el.key == EMPTY_KEY {
                return Err(SimError::InvalidMaterial(
                    "the empty material is reserved and cannot be redefined".into(),
                ));
            }
            let color = parse_hex_color(&el.color).ok_or_else(|| {
                SimError::InvalidMaterial(format!("{} has a malformed color {:?}", el.key, el.color))
            })?;
            let name = el.name.unwrap_or_else(|| el.key.clone());
            let def = MaterialDef {
                key: el.key,
                name,
                color,
                movable: el.movable,
                gravity: el.gravity,
                liquid: el.liquid,
                gas: el.gas,
                explosive: el.explosive,
            };
            registry.register(def)?;
        }
        Ok(registry)
    }

    /// Palette for the presentation layer (button labels and colours).
    pub fn manifest_json(&self) -> String {
        let materials: Vec<ManifestMaterial> = self
            .iter()
            .filter(|(id, _)| *id != EMPTY)
            .map(|(id, def)| ManifestMaterial {
                id,
                key: &def.key,
                name: &def.name,
                color: format_hex_color(def.color),
            })
            .collect();
        let out = Manifest {
            format_version: 1,
            materials,
        };
        serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Manifest<'a> {
    format_version: u32,
    materials: Vec<ManifestMaterial<'a>>,
}

#[derive(Serialize)]
struct ManifestMaterial<'a> {
    id: MaterialId,
    key: &'a str,
    name: &'a str,
    color: String,
}

#[derive(Deserialize)]
struct BundleRoot {
    materials: Vec<BundleMaterial>,
}

#[derive(Deserialize)]
struct BundleMaterial {
    key: String,
    #[serde(default)]
    name: Option<String>,
    color: String,
    #[serde(default)]
    movable: bool,
    #[serde(default)]
    gravity: bool,
    #[serde(default)]
    liquid: bool,
    #[serde(default)]
    gas: bool,
    #[serde(default)]
    explosive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::materials::BehaviorKind;

    #[test]
    fn bundle_loads_in_order_after_empty() {
        let json = r##"{
            "materials": [
                { "key": "oil", "name": "Oil", "color": "#3b2f1e", "movable": true, "gravity": true, "liquid": true },
                { "key": "stone", "color": "#808080" }
            ]
        }"##;
        let registry = MaterialRegistry::from_bundle_json(json).unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.id_of("oil"), Ok(1));
        assert_eq!(registry.lookup("oil").unwrap().behavior(), BehaviorKind::Liquid);
        assert_eq!(registry.lookup("stone").unwrap().name, "stone");
        assert_eq!(registry.lookup("stone").unwrap().behavior(), BehaviorKind::Static);
    }

    #[test]
    fn bundle_rejects_bad_color_and_reserved_key() {
        let bad_color = r##"{ "materials": [ { "key": "x", "color": "red" } ] }"##;
        assert!(matches!(
            MaterialRegistry::from_bundle_json(bad_color),
            Err(SimError::InvalidMaterial(_))
        ));

        let reserved = r##"{ "materials": [ { "key": "empty", "color": "#000000" } ] }"##;
        assert!(MaterialRegistry::from_bundle_json(reserved).is_err());

        assert!(MaterialRegistry::from_bundle_json("not json").is_err());
    }

    #[test]
    fn manifest_lists_palette_without_empty() {
        let manifest = MaterialRegistry::builtin().manifest_json();
        let value: serde_json::Value = serde_json::from_str(&manifest).unwrap();
        assert_eq!(value["formatVersion"], 1);
        let materials = value["materials"].as_array().unwrap();
        assert_eq!(materials.len(), 5);
        assert_eq!(materials[0]["key"], "sand");
        assert_eq!(materials[0]["color"], "#e3c078");
        assert!(materials.iter().all(|m| m["key"] != "empty"));
    }
}
