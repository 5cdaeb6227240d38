//! Conventions of the supported L4 SST products.
//!
//! Products are identified by their `id` global attribute. The id decides
//! which variable holds the temperature, how water cells are flagged, and
//! whether an external ESA CCI land-sea mask is needed.

/// Sea-ice fraction at or above which a cell counts as ice covered.
pub const SEA_ICE_THRESHOLD: f64 = 0.15;

/// Kelvin to Celsius offset.
pub const KELVIN_OFFSET: f64 = 273.15;

pub const DMI_ARCTIC_ID: &str = "DMI-L4UHskin-ARC_IST-DMI_OI";
pub const CMC_02_ID: &str = "CMC0.2deg-CMC-L4-GLOB-v2.0";

/// OSTIA-based 0.05 degree products, which carry no usable `mask` flags.
pub const OSTIA_IDS: [&str; 4] = [
    "OSTIA-ESACCI-L4-GLOB-v3.0",
    "OSTIA-C3S-L4-GLOB-v3.0",
    "OSTIA-UKMO-L4-GLOB_ICDR-v3.0",
    DMI_ARCTIC_ID,
];

/// How a product marks water cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaterMask {
    /// Any cell with a positive Kelvin temperature is water.
    PositiveSst,
    /// Water where `mask & bits != 0`.
    Flags(i32),
}

/// A product id and the conventions that follow from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub water: WaterMask,
}

impl Product {
    pub fn classify(id: &str) -> Self {
        let water = if OSTIA_IDS.contains(&id) {
            WaterMask::PositiveSst
        } else if id == CMC_02_ID {
            // Lake (4) counts so the Caspian stays in; ice (8) because CMC
            // clears the water bit under ice.
            WaterMask::Flags(13)
        } else if id.contains("CMC") {
            WaterMask::Flags(9)
        } else {
            WaterMask::Flags(1)
        };
        Self {
            id: id.to_string(),
            water,
        }
    }

    pub fn is_ostia(&self) -> bool {
        self.water == WaterMask::PositiveSst
    }

    /// Variable holding the temperature in Kelvin.
    pub fn sst_variable(&self) -> &'static str {
        if self.id == DMI_ARCTIC_ID {
            "analysed_st"
        } else {
            "analysed_sst"
        }
    }

    /// File name of the matching ESA CCI land-sea mask, for products that need one.
    pub fn lsm_filename(&self) -> Option<String> {
        if self.is_ostia() {
            None
        } else {
            Some(format!("ESACCI_LSM_{}.nc", self.id))
        }
    }
}
