//! Oracle prompts and the diagnosis response schema.
//!
//! The domain context carries the fault-code taxonomy of Renault Trucks
//! Standard 70 627 and the closed list of part names the oracle may use
//! for `partName`. Every name on that list except "ECU Unit" resolves to a
//! catalog part.

use serde_json::{json, Value};

use crate::domain::{Language, TruckBrand};

/// `system` value the oracle returns for an unusable photo.
pub const INVALID_IMAGE_SYSTEM: &str = "INVALID_IMAGE_ERROR";

/// `description` value the oracle returns for an unusable photo.
pub const REJECTED_DESCRIPTION: &str = "REJECTED";

/// Part names the oracle must pick from.
pub const ORACLE_PART_NAMES: [&str; 17] = [
    "Air Compressor",
    "Feed Pump",
    "Fuel Hand Pump",
    "Fuel Filter",
    "Oil Pressure Sensor",
    "Wheel Speed Sensor",
    "Foot Brake Valve",
    "EBS Control Modulator",
    "Circuit Protection Valve",
    "NOx Sensor",
    "Oil Level Sensor",
    "Cabin Tilting Pump",
    "Water Pump",
    "Servo Pump",
    "Tie Rod",
    "5V Sensor Supply",
    "ECU Unit",
];

const FAULT_CODE_REFERENCE: &str = "\
REFERENCE DOCUMENT: Renault Trucks Standard 70 627 - Norme de Reperage des Codes Defauts.
AND: OrionPart Spare Parts Catalog for Renault Trucks & Buses.

CRITICAL DEFINITIONS (SAE J1587/J1939):
1. MID (Module Identifier):
   - MID 128: Engine Control (EMS/EECU).
   - MID 136: EBS Braking System.
   - MID 144: Vehicle Control Unit (VECU).
   - MID 185: Air Production Management (APM/EAC).

2. SID/PID (Component Identifiers) - EXAMPLES:
   - SID 232: 5V Sensor Supply (Alimentation capteurs 5V). Critical: this powers multiple sensors.
   - PID 94: Fuel Delivery Pressure.
   - PID 100: Oil Pressure.
   - SID 254: Controller Internal Fault (ECU).

3. FMI (Failure Mode Identifier) - ELECTRICAL INTERPRETATION:
   - FMI 3: Voltage Above Normal (Short to Power).
   - FMI 4: Voltage Below Normal (Short to Ground).
   - FMI 5: Current Below Normal (Open Circuit).
   - FMI 9: Abnormal Update Rate (CAN Bus).
";

/// Reference block shared by the code and image prompts.
pub fn domain_context() -> String {
    let names = ORACLE_PART_NAMES
        .iter()
        .map(|name| format!("     - \"{name}\""))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "{FAULT_CODE_REFERENCE}\n\
         4. CATALOG MATCHING INSTRUCTIONS (ORION PART):\n   \
         - Identify the faulty component and match it to one of these names:\n\
         {names}\n   \
         - Use these EXACT names in the 'partName' field.\n"
    )
}

fn vehicle_label(brand: TruckBrand, model: Option<&str>) -> String {
    match model.map(str::trim).filter(|m| !m.is_empty()) {
        Some(model) => format!("{brand} {model}"),
        None => brand.to_string(),
    }
}

/// Prompt for diagnosing a rendered fault code.
pub fn code_prompt(
    code_string: &str,
    brand: TruckBrand,
    model: Option<&str>,
    lang: Language,
) -> String {
    format!(
        "ROLE: Tier 3 Master Diagnostic Technician for {vehicle} Trucks.\n\n\
         {context}\n\
         INPUT FAULT CODE: {code_string}\n\n\
         TASK:\n\
         1. REVEAL COMPONENT:\n   \
         - Identify the exact component (e.g., if SID 232, component is \"5V Sensor Supply\").\n   \
         - CRITICAL: Set 'partName' to the EXACT catalog name from the list above.\n\
         2. DEFINE COMPONENT:\n   \
         - Briefly explain what this component does (e.g., \"Supplies regulated power to pressure sensors\").\n\
         3. CORRECT THE ERROR:\n   \
         - Provide specific electrical tests based on the FMI (e.g., \"Check continuity between Pin A and B\", \"Verify voltage is 5.0V\").\n\n\
         {language}\n",
        vehicle = vehicle_label(brand, model),
        context = domain_context(),
        language = lang.instruction(),
    )
}

/// Prompt for diagnosing a dashboard, scanner screen or part photo.
pub fn image_prompt(brand: TruckBrand, model: Option<&str>, lang: Language) -> String {
    format!(
        "ROLE: Master Technician & Spare Parts Specialist for {vehicle} Trucks.\n\
         {context}\n\
         VALIDATION & ANALYSIS:\n\
         Analyze the image content. It is considered VALID if it contains:\n\
         1. A Truck Dashboard/Instrument Cluster.\n\
         2. A Diagnostic Tool Screen (Scanner) or text with Fault Codes.\n\
         3. A TRUCK SPARE PART (e.g., Compressor, Valve, Sensor, Pump, Filter, Tie Rod).\n\n\
         IF INVALID (Selfie, Food, Landscape, Animal, Random Object):\n\
         - Return JSON with 'system': \"{INVALID_IMAGE_SYSTEM}\" and 'description': \"{REJECTED_DESCRIPTION}\".\n\n\
         IF VALID:\n\
         1. Identify the Component/Fault:\n   \
         - If it's a code like \"SID 232\", identify the component \"5V Sensor Supply\".\n   \
         - If it's a physical part, identify it (e.g., \"Air Compressor\").\n   \
         - Set 'partName' to the EXACT catalog name.\n\
         2. Map to OrionPart Catalog: prioritize Orion Catalog nomenclature.\n\
         3. Provide Diagnosis: define the part and explain how to fix the error.\n\n\
         {language}\n",
        vehicle = vehicle_label(brand, model),
        context = domain_context(),
        language = lang.image_instruction(),
    )
}

/// System instruction for the assistant chat.
pub fn chat_instruction(brand: TruckBrand, model: Option<&str>, lang: Language) -> String {
    format!(
        "You are a Truck Mechanic Assistant for {vehicle} trucks. \
         Reference Renault Standard 70 627. Suggest parts from OrionPart catalog. {language}",
        vehicle = vehicle_label(brand, model),
        language = lang.instruction(),
    )
}

/// Response schema for structured diagnosis, in Gemini's OpenAPI subset.
pub fn diagnosis_schema() -> Value {
    let string_list = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
    json!({
        "type": "OBJECT",
        "properties": {
            "system": { "type": "STRING" },
            "description": { "type": "STRING" },
            "symptoms": string_list,
            "causes": string_list,
            "solutions": string_list,
            "severity": { "type": "STRING", "enum": ["low", "medium", "high"] },
            "partName": { "type": "STRING" }
        },
        "required": [
            "system",
            "description",
            "symptoms",
            "causes",
            "solutions",
            "severity",
            "partName"
        ]
    })
}

/// True when an oracle answer marks the photo as invalid subject matter.
///
/// Checked on the raw value so a rejection is recognised even when the
/// rest of the object does not satisfy the schema.
pub fn is_rejection(value: &Value) -> bool {
    value.get("system").and_then(Value::as_str) == Some(INVALID_IMAGE_SYSTEM)
        || value.get("description").and_then(Value::as_str) == Some(REJECTED_DESCRIPTION)
}
