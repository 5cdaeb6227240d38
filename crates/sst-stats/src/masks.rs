//! Per-cell masks derived from a product's conventions.

use crate::error::{SstError, SstResult};
use crate::products::{Product, WaterMask, SEA_ICE_THRESHOLD};

/// The three cell selections every statistic is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct CellMasks {
    /// Water according to the product itself.
    pub all: Vec<bool>,
    /// Water and not ice covered.
    pub ice_free: Vec<bool>,
    /// Cells the ESA CCI land-sea mask treats as (partly) water.
    pub common: Vec<bool>,
}

impl CellMasks {
    /// Derive the masks of one time step.
    ///
    /// `sst_k` and `sea_ice` are decoded fields; `flags` is the product's
    /// `mask` variable (needed unless the product is OSTIA based) and `lsm`
    /// the land-sea mask flags (same condition).
    pub fn derive(
        product: &Product,
        sst_k: &[f64],
        sea_ice: &[f64],
        flags: Option<&[i32]>,
        lsm: Option<&[i32]>,
    ) -> SstResult<Self> {
        let n = sst_k.len();
        check_len("sea_ice_fraction", n, sea_ice.len())?;

        match product.water {
            WaterMask::PositiveSst => {
                let all: Vec<bool> = sst_k.iter().map(|k| *k > 0.0).collect();
                let ice_free = all
                    .iter()
                    .zip(sea_ice)
                    .map(|(water, ice)| *water && *ice < SEA_ICE_THRESHOLD)
                    .collect();
                Ok(Self {
                    common: all.clone(),
                    all,
                    ice_free,
                })
            }
            WaterMask::Flags(bits) => {
                let flags = flags.ok_or_else(|| SstError::MissingVariable("mask".to_string()))?;
                let lsm = lsm.ok_or_else(|| SstError::MissingVariable("land-sea mask".to_string()))?;
                check_len("mask", n, flags.len())?;
                check_len("land-sea mask", n, lsm.len())?;

                let all: Vec<bool> = flags.iter().map(|f| (f & bits) != 0).collect();
                // NaN ice counts as ice free
                let ice_free = all
                    .iter()
                    .zip(sea_ice)
                    .map(|(water, ice)| *water && !(*ice >= SEA_ICE_THRESHOLD))
                    .collect();
                let common = lsm.iter().map(|f| (f & 1) == 1).collect();
                Ok(Self { all, ice_free, common })
            }
        }
    }

    /// Element-wise `a && b`.
    pub fn both(a: &[bool], b: &[bool]) -> Vec<bool> {
        a.iter().zip(b).map(|(x, y)| *x && *y).collect()
    }
}

fn check_len(what: &str, expected: usize, found: usize) -> SstResult<()> {
    if expected != found {
        return Err(SstError::ShapeMismatch {
            what: what.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::fixtures::products;

    #[test]
    fn test_ostia_masks() {
        let product = Product::classify(products::OSTIA_ICDR);
        let sst = [280.0, f64::NAN, 271.0, 275.0];
        let ice = [0.0, f64::NAN, 0.9, f64::NAN];
        let masks = CellMasks::derive(&product, &sst, &ice, None, None).unwrap();
        assert_eq!(masks.all, vec![true, false, true, true]);
        assert_eq!(masks.ice_free, vec![true, false, false, false]);
        assert_eq!(masks.common, masks.all);
    }

    #[test]
    fn test_cmc_flag_bits() {
        let sst = [280.0; 4];
        let ice = [0.0, f64::NAN, 0.15, 0.1];
        let flags = [1, 4, 8, 2];
        let lsm = [1, 3, 2, 0];

        let cmc02 = Product::classify(products::CMC_02);
        let masks = CellMasks::derive(&cmc02, &sst, &ice, Some(&flags), Some(&lsm)).unwrap();
        assert_eq!(masks.all, vec![true, true, true, false]);
        assert_eq!(masks.ice_free, vec![true, true, false, false]);
        assert_eq!(masks.common, vec![true, true, false, false]);

        let cmc = Product::classify(products::CMC_01);
        let masks = CellMasks::derive(&cmc, &sst, &ice, Some(&flags), Some(&lsm)).unwrap();
        assert_eq!(masks.all, vec![true, false, true, false]);

        let other = Product::classify(products::OTHER);
        let masks = CellMasks::derive(&other, &sst, &ice, Some(&flags), Some(&lsm)).unwrap();
        assert_eq!(masks.all, vec![true, false, false, false]);
    }

    #[test]
    fn test_flag_products_need_lsm() {
        let product = Product::classify(products::OTHER);
        let err = CellMasks::derive(&product, &[1.0], &[0.0], Some(&[1]), None).unwrap_err();
        assert!(matches!(err, SstError::MissingVariable(_)));
    }

    #[test]
    fn test_length_mismatch() {
        let product = Product::classify(products::OSTIA_CCI);
        assert!(CellMasks::derive(&product, &[1.0, 2.0], &[0.0], None, None).is_err());
    }
}
