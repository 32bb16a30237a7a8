//! The OrionPart catalog table.
//!
//! Declaration order is part of the contract: resolution walks the table
//! top to bottom and the first matching record wins. Parts sharing a
//! category (three compressors, two tie rods) resolve to the one declared
//! first unless a query names a later one more precisely.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::CatalogError;
use crate::normalize::normalize;
use crate::rules::KeywordRule;
use crate::Result;

/// One purchasable spare part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPart {
    /// Catalog part number, unique within a catalog
    pub part_number: &'static str,
    /// Display name
    pub name: &'static str,
    /// Manufacturer reference numbers (informational, may repeat across parts)
    pub oem_refs: &'static [&'static str],
    /// Applicability label, e.g. "RENAULT PREMIUM"
    pub model: &'static str,
    /// Internal matching tag, never shown to the user
    #[serde(skip)]
    pub category: &'static str,
    /// Representative image
    pub image_url: &'static str,
}

const COMPRESSOR_IMG: &str =
    "https://images.unsplash.com/photo-1635773054098-333c1b3c7b8e?auto=format&fit=crop&q=80&w=600";
const PUMP_IMG: &str =
    "https://images.unsplash.com/photo-1635773053677-62bd1343e743?auto=format&fit=crop&q=80&w=600";
const VALVE_IMG: &str =
    "https://images.unsplash.com/photo-1615828799497-6a4a6006e00f?auto=format&fit=crop&q=80&w=600";
const MODULE_IMG: &str =
    "https://images.unsplash.com/photo-1555617984-7a39d7506664?auto=format&fit=crop&q=80&w=600";
const ENGINE_SENSOR_IMG: &str =
    "https://plus.unsplash.com/premium_photo-1663045618239-2a912e783709?q=80&w=600";
const TIE_ROD_IMG: &str = "https://images.unsplash.com/photo-1530062825238-99307738a2cb?q=80&w=600";

/// OrionPart catalog for Renault Trucks, in resolution order.
pub static ORION_CATALOG: &[CatalogPart] = &[
    // Air compressors
    CatalogPart {
        part_number: "301250",
        name: "AIR COMPRESSOR",
        oem_refs: &["7421353473", "9125140040"],
        model: "RENAULT",
        category: "compressor",
        image_url: COMPRESSOR_IMG,
    },
    CatalogPart {
        part_number: "301252",
        name: "AIR COMPRESSOR (MAGNUM)",
        oem_refs: &["5000678923", "5000693172"],
        model: "RENAULT MAGNUM",
        category: "compressor",
        image_url: COMPRESSOR_IMG,
    },
    CatalogPart {
        part_number: "301264",
        name: "AIR COMPRESSOR (PREMIUM)",
        oem_refs: &["4123520040", "7421353457"],
        model: "RENAULT PREMIUM",
        category: "compressor",
        image_url: COMPRESSOR_IMG,
    },
    // Fuel system
    CatalogPart {
        part_number: "301031",
        name: "FEED PUMP",
        oem_refs: &["5001821529", "0440008108"],
        model: "RENAULT PREMIUM",
        category: "feed_pump",
        image_url: PUMP_IMG,
    },
    CatalogPart {
        part_number: "303295",
        name: "FUEL FILTER",
        oem_refs: &["0870017560", "7701017732"],
        model: "RENAULT",
        category: "fuel_filter",
        image_url: "https://images.unsplash.com/photo-1633856269347-5800e3974008?q=80&w=600",
    },
    CatalogPart {
        part_number: "301973",
        name: "FUEL HAND PUMP",
        oem_refs: &["5001832885"],
        model: "RENAULT",
        category: "hand_pump",
        image_url: PUMP_IMG,
    },
    // Valves and brakes
    CatalogPart {
        part_number: "303070",
        name: "FOOT BRAKE VALVE",
        oem_refs: &["5021170165", "MB4630"],
        model: "RENAULT",
        category: "brake_valve",
        image_url: VALVE_IMG,
    },
    CatalogPart {
        part_number: "303216",
        name: "EBS CONTROL MODULATOR",
        oem_refs: &["5010457557", "0486203030N50"],
        model: "RENAULT",
        category: "modulator",
        image_url: VALVE_IMG,
    },
    CatalogPart {
        part_number: "301476",
        name: "CIRCUIT PROTECTION VALVE (APM)",
        oem_refs: &["5010216965", "AE4440"],
        model: "RENAULT",
        category: "apm",
        image_url: MODULE_IMG,
    },
    CatalogPart {
        part_number: "303276",
        name: "BRAKE CYLINDER",
        oem_refs: &["7421149777"],
        model: "RENAULT",
        category: "brake_cylinder",
        image_url: VALVE_IMG,
    },
    // Sensors and electrical
    CatalogPart {
        part_number: "302018",
        name: "OIL PRESSURE SENSOR",
        oem_refs: &["7420514065", "7420803650"],
        model: "RENAULT",
        category: "oil_sensor",
        image_url: ENGINE_SENSOR_IMG,
    },
    CatalogPart {
        part_number: "301441",
        name: "WHEEL SPEED SENSOR",
        oem_refs: &["5010422332", "5430041687"],
        model: "RENAULT",
        category: "speed_sensor",
        image_url: "https://images.unsplash.com/photo-1535443763820-23df21c454c5?q=80&w=600",
    },
    CatalogPart {
        part_number: "301850",
        name: "NOX SENSOR",
        oem_refs: &["7422827993", "5WK97371"],
        model: "RENAULT",
        category: "nox",
        image_url: MODULE_IMG,
    },
    CatalogPart {
        part_number: "302016",
        name: "OIL LEVEL SENSOR",
        oem_refs: &["7421521353", "7422022794"],
        model: "RENAULT",
        category: "level_sensor",
        image_url: ENGINE_SENSOR_IMG,
    },
    CatalogPart {
        part_number: "302015",
        name: "ACCELERATOR PEDAL SENSOR",
        oem_refs: &["7421059642", "7482492421"],
        model: "RENAULT",
        category: "pedal_sensor",
        image_url: ENGINE_SENSOR_IMG,
    },
    CatalogPart {
        part_number: "SID232",
        name: "5V SENSOR SUPPLY (ECU)",
        oem_refs: &["7421648908", "SID 232"],
        model: "RENAULT TRUCKS",
        category: "5v_supply",
        image_url: "https://images.unsplash.com/photo-1614851099175-e5b30eb6f696?q=80&w=600",
    },
    // Cabin and body
    CatalogPart {
        part_number: "301191",
        name: "CABIN TILTING PUMP",
        oem_refs: &["5010316436"],
        model: "RENAULT",
        category: "tilt_pump",
        image_url: "https://images.unsplash.com/photo-1603418480826-7821a403b6b8?q=80&w=600",
    },
    CatalogPart {
        part_number: "301194",
        name: "CABIN TILTING CYLINDER",
        oem_refs: &["5010629264"],
        model: "RENAULT MAGNUM",
        category: "tilt_cylinder",
        image_url: "https://images.unsplash.com/photo-1516937941348-c03e586103da?q=80&w=600",
    },
    // Cooling
    CatalogPart {
        part_number: "301080",
        name: "WATER PUMP",
        oem_refs: &["5010330029", "5001837309"],
        model: "RENAULT PREMIUM",
        category: "water_pump",
        image_url: "https://images.unsplash.com/photo-1616540310566-c644b1508e6d?q=80&w=600",
    },
    CatalogPart {
        part_number: "301390",
        name: "WATER EXPANSION TANK",
        oem_refs: &["7401676400", "7401676576"],
        model: "RENAULT",
        category: "expansion_tank",
        image_url: "https://images.unsplash.com/photo-1579633659223-c4b699c27732?auto=format&fit=crop&q=80&w=600",
    },
    // Steering and suspension
    CatalogPart {
        part_number: "301040",
        name: "SERVO PUMP",
        oem_refs: &["5010600054", "5001865396"],
        model: "RENAULT PREMIUM 400",
        category: "servo_pump",
        image_url: PUMP_IMG,
    },
    CatalogPart {
        part_number: "301236",
        name: "TIE ROD",
        oem_refs: &["5000761671", "5010104288"],
        model: "RENAULT",
        category: "tie_rod",
        image_url: TIE_ROD_IMG,
    },
    CatalogPart {
        part_number: "302398",
        name: "TIE ROD",
        oem_refs: &["7421051046"],
        model: "RENAULT",
        category: "tie_rod",
        image_url: TIE_ROD_IMG,
    },
    CatalogPart {
        part_number: "302066",
        name: "CABLE HARNESS",
        oem_refs: &["7421068284", "4213659462"],
        model: "RENAULT PREMIUM",
        category: "harness",
        image_url: "https://images.unsplash.com/photo-1558346490-a72e53ae2d4f?q=80&w=600",
    },
    CatalogPart {
        part_number: "302096",
        name: "CALIPER BRAKE ADJUSTING DUST COVER",
        oem_refs: &["5001868119", "0501316391"],
        model: "RENAULT",
        category: "caliper_kit",
        image_url: "https://images.unsplash.com/photo-1486262715619-67b85e0b08d3?q=80&w=600",
    },
];

/// Read-only, ordered view over a part table.
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    parts: &'a [CatalogPart],
}

impl Catalog<'static> {
    /// The built-in OrionPart catalog.
    pub fn orion() -> Self {
        Catalog {
            parts: ORION_CATALOG,
        }
    }
}

impl Default for Catalog<'static> {
    fn default() -> Self {
        Self::orion()
    }
}

impl<'a> Catalog<'a> {
    /// Wrap an arbitrary part table. Order is preserved as given.
    pub const fn new(parts: &'a [CatalogPart]) -> Self {
        Catalog { parts }
    }

    /// All parts in declaration order.
    pub fn parts(&self) -> &'a [CatalogPart] {
        self.parts
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a CatalogPart> {
        self.parts.iter()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Exact lookup by part number.
    pub fn get(&self, part_number: &str) -> Option<&'a CatalogPart> {
        self.parts.iter().find(|p| p.part_number == part_number)
    }

    /// Whether any part carries `category`.
    pub fn has_category(&self, category: &str) -> bool {
        self.parts.iter().any(|p| p.category == category)
    }

    /// Distinct display names in declaration order.
    pub fn part_names(&self) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        self.parts
            .iter()
            .map(|p| p.name)
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Check table integrity against a keyword rule set.
    ///
    /// Fails on the first duplicate part number, empty match key, or rule
    /// whose target category is absent from the table.
    pub fn validate(&self, rules: &[KeywordRule]) -> Result<()> {
        let mut numbers = HashSet::new();
        for part in self.parts {
            if !numbers.insert(part.part_number) {
                return Err(CatalogError::DuplicatePartNumber {
                    part_number: part.part_number.to_string(),
                });
            }
            for (field, value) in [("name", part.name), ("category", part.category)] {
                if normalize(value).is_empty() {
                    return Err(CatalogError::EmptyMatchKey {
                        part_number: part.part_number.to_string(),
                        field,
                    });
                }
            }
        }

        for rule in rules {
            if !self.has_category(rule.category) {
                return Err(CatalogError::UnknownRuleCategory {
                    category: rule.category.to_string(),
                    keywords: rule.all_of.iter().map(|k| k.to_string()).collect(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::KEYWORD_RULES;

    #[test]
    fn test_orion_catalog_is_valid() {
        assert_eq!(Catalog::orion().validate(KEYWORD_RULES), Ok(()));
    }

    #[test]
    fn test_orion_catalog_shape() {
        let catalog = Catalog::orion();
        assert_eq!(catalog.len(), 25);
        assert_eq!(catalog.parts()[0].part_number, "301250");
        assert_eq!(catalog.get("SID232").map(|p| p.category), Some("5v_supply"));
        assert!(catalog.get("999999").is_none());
    }

    #[test]
    fn test_part_names_are_deduplicated_in_order() {
        let names = Catalog::orion().part_names();
        assert_eq!(names[0], "AIR COMPRESSOR");
        assert_eq!(names.iter().filter(|n| **n == "TIE ROD").count(), 1);
    }

    #[test]
    fn test_validate_rejects_duplicate_part_number() {
        static PARTS: &[CatalogPart] = &[
            CatalogPart {
                part_number: "1",
                name: "A",
                oem_refs: &[],
                model: "",
                category: "a",
                image_url: "",
            },
            CatalogPart {
                part_number: "1",
                name: "B",
                oem_refs: &[],
                model: "",
                category: "b",
                image_url: "",
            },
        ];
        let err = Catalog::new(PARTS).validate(&[]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicatePartNumber {
                part_number: "1".to_string()
            }
        );
    }

    #[test]
    fn test_validate_rejects_symbol_only_category() {
        static PARTS: &[CatalogPart] = &[CatalogPart {
            part_number: "1",
            name: "VALVE",
            oem_refs: &[],
            model: "",
            category: "__",
            image_url: "",
        }];
        let err = Catalog::new(PARTS).validate(&[]).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::EmptyMatchKey {
                field: "category",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_rule_for_missing_category() {
        static PARTS: &[CatalogPart] = &[CatalogPart {
            part_number: "1",
            name: "VALVE",
            oem_refs: &[],
            model: "",
            category: "valve",
            image_url: "",
        }];
        let rules = [KeywordRule::new(&["turbo"], "turbo")];
        let err = Catalog::new(PARTS).validate(&rules).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownRuleCategory { .. }));
    }

    #[test]
    fn test_category_is_not_serialized() {
        let json = serde_json::to_value(Catalog::orion().parts()[0]).unwrap();
        assert_eq!(json["partNumber"], "301250");
        assert_eq!(json["oemRefs"][0], "7421353473");
        assert!(json.get("category").is_none());
    }
}
