//! Read-only passive item and weapon catalogs loaded from TOML

mod config;

pub use config::{CatalogFileConfig, TierConfig, WeaponConfig};

use crate::item::ItemDef;
use crate::types::WeaponTier;
use crate::weapon::{TierStats, WeaponDef};
use crate::CatalogError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

const BUILTIN_ITEMS: &str = include_str!("../../config/items.toml");
const BUILTIN_WEAPONS: &str = include_str!("../../config/weapons.toml");

/// Process-wide catalog instance
static CATALOGS: OnceLock<Arc<Catalogs>> = OnceLock::new();

/// Initialize the global catalogs from a directory of TOML files
///
/// Returns an error if loading fails or if the catalogs were already initialized.
pub fn init_catalogs(dir: &Path) -> Result<(), CatalogError> {
    let loaded = Catalogs::load_from_dir(dir)?;
    CATALOGS
        .set(Arc::new(loaded))
        .map_err(|_| CatalogError::Validation {
            message: "catalogs already initialized".to_string(),
            path: dir.to_path_buf(),
        })
}

/// Get the global catalogs, falling back to the built-in tables
pub fn catalogs() -> Arc<Catalogs> {
    CATALOGS
        .get_or_init(|| {
            let builtin = Catalogs::builtin().unwrap_or_else(|e| {
                tracing::error!("Built-in catalogs failed to load: {}", e);
                Catalogs::default()
            });
            Arc::new(builtin)
        })
        .clone()
}

/// Immutable item and weapon tables shared by reference
#[derive(Debug, Default)]
pub struct Catalogs {
    items: Vec<Arc<ItemDef>>,
    weapons: Vec<Arc<WeaponDef>>,
    item_index: HashMap<String, usize>,
    weapon_index: HashMap<String, usize>,
}

impl Catalogs {
    /// The catalogs shipped with the crate
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_strs(&[BUILTIN_ITEMS, BUILTIN_WEAPONS])
    }

    /// Parse catalogs from in-memory TOML documents
    pub fn from_toml_strs(docs: &[&str]) -> Result<Self, CatalogError> {
        let mut builder = CatalogBuilder::default();
        for doc in docs {
            let config: CatalogFileConfig =
                toml::from_str(doc).map_err(|e| CatalogError::Parse {
                    error: e,
                    path: PathBuf::from("<builtin>"),
                })?;
            builder.add(config, Path::new("<builtin>"))?;
        }
        builder.finish(Path::new("<builtin>"))
    }

    /// Load all catalog files from a directory (recursively)
    pub fn load_from_dir(dir: &Path) -> Result<Self, CatalogError> {
        let mut builder = CatalogBuilder::default();
        load_dir(&mut builder, dir)?;
        builder.finish(dir)
    }

    pub fn items(&self) -> &[Arc<ItemDef>] {
        &self.items
    }

    pub fn weapons(&self) -> &[Arc<WeaponDef>] {
        &self.weapons
    }

    /// Get an item by ID
    pub fn item(&self, id: &str) -> Option<&Arc<ItemDef>> {
        self.item_index.get(id).map(|&i| &self.items[i])
    }

    /// Get a weapon definition by ID
    pub fn weapon(&self, id: &str) -> Option<&Arc<WeaponDef>> {
        self.weapon_index.get(id).map(|&i| &self.weapons[i])
    }
}

fn load_dir(builder: &mut CatalogBuilder, dir: &Path) -> Result<(), CatalogError> {
    if !dir.exists() {
        return Ok(());
    }

    let entries = std::fs::read_dir(dir).map_err(|e| CatalogError::Io {
        error: e,
        path: Some(dir.to_path_buf()),
    })?;

    // Sorted so that catalog order does not depend on the filesystem
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CatalogError::Io {
            error: e,
            path: Some(dir.to_path_buf()),
        })?;
        paths.push(entry.path());
    }
    paths.sort();

    for path in paths {
        if path.is_dir() {
            load_dir(builder, &path)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            let content = std::fs::read_to_string(&path).map_err(|e| CatalogError::Io {
                error: e,
                path: Some(path.clone()),
            })?;
            let config: CatalogFileConfig =
                toml::from_str(&content).map_err(|e| CatalogError::Parse {
                    error: e,
                    path: path.clone(),
                })?;
            builder.add(config, &path)?;
        }
    }

    Ok(())
}

#[derive(Default)]
struct CatalogBuilder {
    catalogs: Catalogs,
}

impl CatalogBuilder {
    fn add(&mut self, config: CatalogFileConfig, path: &Path) -> Result<(), CatalogError> {
        let invalid = |message: String| CatalogError::Validation {
            message,
            path: path.to_path_buf(),
        };

        for item in config.items {
            if item.price == 0 {
                return Err(invalid(format!("item '{}' has zero price", item.id)));
            }
            if self.catalogs.item_index.contains_key(&item.id) {
                return Err(invalid(format!("duplicate item id '{}'", item.id)));
            }
            self.catalogs
                .item_index
                .insert(item.id.clone(), self.catalogs.items.len());
            self.catalogs.items.push(Arc::new(item));
        }

        for weapon in config.weapons {
            if self.catalogs.weapon_index.contains_key(&weapon.id) {
                return Err(invalid(format!("duplicate weapon id '{}'", weapon.id)));
            }
            let def = weapon_from_config(weapon).map_err(invalid)?;
            self.catalogs
                .weapon_index
                .insert(def.id.clone(), self.catalogs.weapons.len());
            self.catalogs.weapons.push(Arc::new(def));
        }

        Ok(())
    }

    fn finish(self, path: &Path) -> Result<Catalogs, CatalogError> {
        if self.catalogs.items.is_empty() || self.catalogs.weapons.is_empty() {
            return Err(CatalogError::Validation {
                message: "catalogs need at least one item and one weapon".to_string(),
                path: path.to_path_buf(),
            });
        }
        Ok(self.catalogs)
    }
}

fn weapon_from_config(config: WeaponConfig) -> Result<WeaponDef, String> {
    let mut slots: [Option<TierStats>; 4] = [None, None, None, None];
    for tier in config.tiers {
        if tier.price == 0 {
            return Err(format!("weapon '{}' tier {} has zero price", config.id, tier.tier));
        }
        let slot = &mut slots[tier.tier.rank() as usize];
        if slot.is_some() {
            return Err(format!("weapon '{}' repeats tier {}", config.id, tier.tier));
        }
        *slot = Some(TierStats {
            price: tier.price,
            modifiers: tier.modifiers,
        });
    }

    let [common, uncommon, rare, epic] = slots;
    let missing = |t: WeaponTier| format!("weapon '{}' is missing tier {}", config.id, t);
    let tiers = [
        common.ok_or_else(|| missing(WeaponTier::Common))?,
        uncommon.ok_or_else(|| missing(WeaponTier::Uncommon))?,
        rare.ok_or_else(|| missing(WeaponTier::Rare))?,
        epic.ok_or_else(|| missing(WeaponTier::Epic))?,
    ];

    Ok(WeaponDef::new(config.id, config.name, config.rarity_hint, tiers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ShopEffect;
    use crate::types::{ItemRarity, Stat};
    use std::io::Write;
    use tempfile::TempDir;

    fn create_catalog_file(dir: &Path, name: &str, content: &str) {
        let path = dir.join(format!("{}.toml", name));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    const ONE_WEAPON: &str = r#"
[[weapons]]
id = "pulse_core"
name = "Pulse Core"
rarity_hint = "common"

[[weapons.tiers]]
tier = "common"
price = 10
modifiers = [{ stat = "ranged_pct", amount = 6 }]

[[weapons.tiers]]
tier = "uncommon"
price = 18

[[weapons.tiers]]
tier = "rare"
price = 30

[[weapons.tiers]]
tier = "epic"
price = 48
"#;

    #[test]
    fn test_builtin_catalogs_parse() {
        let cat = Catalogs::builtin().unwrap();
        assert_eq!(cat.weapons().len(), 6);
        assert!(cat.items().len() >= 10);

        let pulse = cat.weapon("pulse_core").unwrap();
        assert_eq!(pulse.name, "Pulse Core");
        assert_eq!(pulse.price(WeaponTier::Common), 10);
        assert_eq!(pulse.price(WeaponTier::Epic), 48);
    }

    #[test]
    fn test_builtin_has_shop_effect_items() {
        let cat = Catalogs::builtin().unwrap();
        let effects: Vec<ShopEffect> = cat.items().iter().filter_map(|i| i.shop_effect).collect();
        assert!(effects.iter().any(|e| matches!(e, ShopEffect::RerollDiscount(_))));
        assert!(effects.iter().any(|e| matches!(e, ShopEffect::PriceDiscountPct(_))));
    }

    #[test]
    fn test_global_catalogs_default_to_builtin() {
        let cat = catalogs();
        assert!(cat.weapon("entropy_field").is_some());
    }

    #[test]
    fn test_load_from_dir() {
        let dir = TempDir::new().unwrap();
        create_catalog_file(dir.path(), "weapons", ONE_WEAPON);
        create_catalog_file(
            dir.path(),
            "items",
            r#"
[[items]]
id = "energy_lens"
name = "Energy Lens"
rarity = "common"
price = 10
modifiers = [{ stat = "range_points", amount = 15 }]
"#,
        );

        let cat = Catalogs::load_from_dir(dir.path()).unwrap();
        let lens = cat.item("energy_lens").unwrap();
        assert_eq!(lens.rarity, ItemRarity::Common);
        assert!(!lens.unique);
        assert_eq!(lens.modifiers[0].stat, Stat::RangePoints);
        assert_eq!(cat.weapon("pulse_core").unwrap().modifiers(WeaponTier::Common).len(), 1);
    }

    #[test]
    fn test_missing_tier_rejected() {
        let doc = r#"
[[items]]
id = "x"
name = "X"
rarity = "common"
price = 1

[[weapons]]
id = "broken"
name = "Broken"

[[weapons.tiers]]
tier = "common"
price = 10
"#;
        let err = Catalogs::from_toml_strs(&[doc]).unwrap_err();
        assert!(matches!(err, CatalogError::Validation { ref message, .. } if message.contains("missing tier")));
    }

    #[test]
    fn test_duplicate_item_rejected() {
        let doc = r#"
[[items]]
id = "dup"
name = "A"
rarity = "common"
price = 3

[[items]]
id = "dup"
name = "B"
rarity = "rare"
price = 5
"#;
        let err = Catalogs::from_toml_strs(&[doc, ONE_WEAPON]).unwrap_err();
        assert!(matches!(err, CatalogError::Validation { ref message, .. } if message.contains("duplicate item")));
    }

    #[test]
    fn test_empty_pool_rejected() {
        let err = Catalogs::from_toml_strs(&[ONE_WEAPON]).unwrap_err();
        assert!(matches!(err, CatalogError::Validation { .. }));
    }

    #[test]
    fn test_parse_error_reported() {
        let dir = TempDir::new().unwrap();
        create_catalog_file(dir.path(), "bad", "[[items]]\nid = 5\n");
        let err = Catalogs::load_from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }
}
