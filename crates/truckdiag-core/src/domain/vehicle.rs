//! Vehicle and locale selections supplied by the surrounding UI.

use serde::{Deserialize, Serialize};

use crate::domain::error::DiagnosisError;

/// Supported truck manufacturers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TruckBrand {
    #[default]
    Renault,
    Volvo,
    Scania,
    #[serde(rename = "MAN")]
    Man,
    #[serde(rename = "DAF")]
    Daf,
    Iveco,
    Ford,
}

impl TruckBrand {
    pub const ALL: [TruckBrand; 7] = [
        TruckBrand::Renault,
        TruckBrand::Volvo,
        TruckBrand::Scania,
        TruckBrand::Man,
        TruckBrand::Daf,
        TruckBrand::Iveco,
        TruckBrand::Ford,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TruckBrand::Renault => "Renault",
            TruckBrand::Volvo => "Volvo",
            TruckBrand::Scania => "Scania",
            TruckBrand::Man => "MAN",
            TruckBrand::Daf => "DAF",
            TruckBrand::Iveco => "Iveco",
            TruckBrand::Ford => "Ford",
        }
    }

    /// Documented models for this brand, current ranges first.
    pub fn models(&self) -> &'static [&'static str] {
        match self {
            TruckBrand::Renault => RENAULT_MODELS,
            TruckBrand::Volvo => VOLVO_MODELS,
            TruckBrand::Scania => SCANIA_MODELS,
            TruckBrand::Man => MAN_MODELS,
            TruckBrand::Daf => DAF_MODELS,
            TruckBrand::Iveco => IVECO_MODELS,
            TruckBrand::Ford => FORD_MODELS,
        }
    }

    /// Case-insensitive membership in [`models`](Self::models).
    ///
    /// Unknown models are still accepted by the composer.
    pub fn knows_model(&self, model: &str) -> bool {
        let model = model.trim();
        self.models().iter().any(|m| m.eq_ignore_ascii_case(model))
    }
}

impl std::fmt::Display for TruckBrand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TruckBrand {
    type Err = DiagnosisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        TruckBrand::ALL
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DiagnosisError::UnknownBrand(s.to_string()))
    }
}

/// Output language for generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ar,
    #[default]
    En,
    Fr,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Ar => "ar",
            Language::En => "en",
            Language::Fr => "fr",
        }
    }

    /// Output-language line appended to every oracle prompt.
    ///
    /// Part names stay English in all languages so catalog matching works.
    pub fn instruction(&self) -> &'static str {
        match self {
            Language::En => "Output Language: English.",
            Language::Fr => {
                "Output Language: FRENCH (Français). Keep Part Names in English for catalog matching."
            }
            Language::Ar => {
                "Output Language: ARABIC (اللغة العربية). Translate technical terms accurately \
                 but keep Part Names in English for catalog matching."
            }
        }
    }

    /// Shorter language line used for photo analysis.
    pub fn image_instruction(&self) -> &'static str {
        match self {
            Language::En => "Output Language: English.",
            Language::Fr => "Output Language: FRENCH.",
            Language::Ar => "Output Language: ARABIC.",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = DiagnosisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" | "arabic" => Ok(Language::Ar),
            "en" | "english" => Ok(Language::En),
            "fr" | "french" | "francais" => Ok(Language::Fr),
            other => Err(DiagnosisError::UnknownLanguage(other.to_string())),
        }
    }
}

static RENAULT_MODELS: &[&str] = &[
    "T High 520 Evolution",
    "T High 480 Turbo Compound",
    "T 480",
    "T 460",
    "T 440",
    "T E-Tech (Electric)",
    "K 520 Xtrem",
    "K 480",
    "K 440",
    "K 380",
    "C 520",
    "C 480",
    "C 460",
    "C 380",
    "D Wide",
    "D 26",
    "D 18",
    "D 12",
    "Magnum 520 DXi",
    "Magnum 480 DXi",
    "Magnum 460 DXi",
    "Magnum 440",
    "Premium 460 DXi",
    "Premium 450 DXi",
    "Premium 440 DXi",
    "Premium 380 DXi",
    "Premium Lander",
    "Kerax 500 DXi",
    "Kerax 450 DXi",
    "Kerax 380 DXi",
    "Kerax Classic",
    "Midlum 270 DXi",
    "Midlum 220 DXi",
    "Mascott",
];

static VOLVO_MODELS: &[&str] = &[
    "FH16 780 Aero",
    "FH16 750",
    "FH16 650",
    "FH 540 I-Save",
    "FH 500 I-Save",
    "FH 460 I-Save",
    "FH 420",
    "FH Aero",
    "FH Electric",
    "FM 500",
    "FM 460",
    "FM 420",
    "FM 380",
    "FM Electric",
    "FMX 540",
    "FMX 500",
    "FMX 460",
    "FMX 420",
    "FMX 380",
    "FH12 460 (Classic)",
    "FH12 420 (Classic)",
    "FM12",
    "FM9",
    "FE 350",
    "FE 320",
    "FL 280",
    "FL 250",
];

static SCANIA_MODELS: &[&str] = &[
    "S770 V8",
    "S730 V8",
    "S660 V8",
    "S650 V8",
    "S590 V8",
    "S580 V8",
    "S560 Super",
    "S500 Super",
    "S450",
    "R770 V8",
    "R660 V8",
    "R560 Super",
    "R500 Super",
    "R450",
    "R410",
    "G500 XT",
    "G440",
    "G410",
    "P450 XT",
    "P410",
    "P360",
    "P280",
    "R620 V8 (Old Gen)",
    "R580 V8 (Old Gen)",
    "R500 (Old Gen)",
    "R420 (Old Gen)",
    "R380",
];

static MAN_MODELS: &[&str] = &[
    "TGX 18.640 Individual Lion S",
    "TGX 18.510",
    "TGX 18.470",
    "TGX 18.430",
    "TGX EfficientLine 3",
    "TGS 33.510",
    "TGS 41.480",
    "TGS 33.400",
    "TGS 26.360",
    "TGM 18.290",
    "TGM 15.290",
    "TGL 12.250",
    "TGL 8.190",
    "TGA 41.480",
    "TGA 33.400",
    "TGA 18.480",
    "TGA 18.430",
];

static DAF_MODELS: &[&str] = &[
    "XG+ 530",
    "XG+ 480",
    "XG 530",
    "XG 480",
    "XF 480 (New Gen)",
    "XF 450 (New Gen)",
    "XD 450",
    "XD 410",
    "XD 370",
    "XF 530 Super Space Cab",
    "XF 510",
    "XF 480",
    "XF 460",
    "XF 105.510",
    "XF 105.460",
    "CF 480",
    "CF 450",
    "CF 410",
    "CF 85.460",
    "CF 85.410",
    "LF 290",
    "LF 260",
    "LF 230",
];

static IVECO_MODELS: &[&str] = &[
    "S-Way 570",
    "S-Way 530",
    "S-Way 510",
    "S-Way 490",
    "S-Way 460",
    "T-Way 510",
    "T-Way 450",
    "T-Way 410",
    "X-Way 480",
    "X-Way 460",
    "Stralis Hi-Way 560",
    "Stralis Hi-Way 500",
    "Stralis 480",
    "Stralis 450",
    "Stralis 420",
    "Trakker 450",
    "Trakker 410",
    "Trakker 380",
    "Eurocargo 180",
    "Eurocargo 140",
];

static FORD_MODELS: &[&str] = &[
    "F-MAX Select",
    "F-MAX 500",
    "F-MAX L",
    "F-Line 1845T",
    "F-Line 4145",
    "F-Line 3542",
    "Cargo 1848T",
    "Cargo 1842T",
    "Cargo 1846T",
    "Cargo 4142",
    "Cargo 3542",
    "Cargo 2538",
    "Cargo 3230",
];
