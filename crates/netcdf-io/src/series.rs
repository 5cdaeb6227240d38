//! Time-indexed statistics tables.
//!
//! A [`SeriesTable`] is a set of named scalar variables sharing one `time`
//! axis, the shape of every statistics file the SST job writes.

use std::path::Path;

use chrono::NaiveDateTime;
use dashboard_common::CfTimeUnits;
use tracing::debug;

use crate::attrs::Attributes;
use crate::error::{NetCdfError, NetCdfResult};
use crate::reader::GriddedDataset;

/// One named variable along the time axis.
#[derive(Debug, Clone)]
pub struct SeriesVariable {
    pub name: String,
    pub values: Vec<f64>,
    pub attrs: Attributes,
}

/// Named f64 variables over a shared time axis, plus global attributes.
#[derive(Debug, Clone, Default)]
pub struct SeriesTable {
    times: Vec<NaiveDateTime>,
    variables: Vec<SeriesVariable>,
    global_attrs: Attributes,
}

impl SeriesTable {
    pub fn new(global_attrs: Attributes) -> Self {
        Self {
            times: Vec::new(),
            variables: Vec::new(),
            global_attrs,
        }
    }

    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    pub fn variables(&self) -> &[SeriesVariable] {
        &self.variables
    }

    pub fn global_attrs(&self) -> &Attributes {
        &self.global_attrs
    }

    pub fn variable(&self, name: &str) -> Option<&SeriesVariable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn contains_time(&self, time: &NaiveDateTime) -> bool {
        self.times.contains(time)
    }

    /// Set the attributes of a variable, creating it (NaN-filled) if needed.
    pub fn set_attrs(&mut self, name: &str, attrs: Attributes) {
        let index = self.ensure_variable(name);
        self.variables[index].attrs = attrs;
    }

    /// Append one time step. Variables missing from `values` get NaN.
    pub fn push_row<'a, I>(&mut self, time: NaiveDateTime, values: I)
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        self.times.push(time);
        let len = self.times.len();
        for (name, value) in values {
            let index = self.ensure_variable(name);
            let column = &mut self.variables[index].values;
            column.resize(len - 1, f64::NAN);
            column.push(value);
        }
        for var in &mut self.variables {
            var.values.resize(len, f64::NAN);
        }
    }

    /// Concatenate `other` after this table along time.
    ///
    /// Attributes already present here win: `other`'s global attributes are
    /// only taken when this table has none. Variables only present in one
    /// table are NaN-filled in the other.
    pub fn append(&mut self, other: SeriesTable) {
        let offset = self.times.len();
        let total = offset + other.times.len();
        self.times.extend(other.times);

        for var in other.variables {
            let index = self.ensure_variable(&var.name);
            let target = &mut self.variables[index];
            if target.attrs.is_empty() {
                target.attrs = var.attrs;
            }
            target.values.resize(offset, f64::NAN);
            target.values.extend(var.values);
        }
        for var in &mut self.variables {
            var.values.resize(total, f64::NAN);
        }
        if self.global_attrs.is_empty() {
            self.global_attrs = other.global_attrs;
        }
    }

    fn ensure_variable(&mut self, name: &str) -> usize {
        if let Some(index) = self.variables.iter().position(|v| v.name == name) {
            return index;
        }
        self.variables.push(SeriesVariable {
            name: name.to_string(),
            values: vec![f64::NAN; self.times.len()],
            attrs: Attributes::new(),
        });
        self.variables.len() - 1
    }

    /// Read a table written by [`SeriesTable::write`] (or any file whose
    /// variables are 1-D over `time`).
    pub fn read<P: AsRef<Path>>(path: P) -> NetCdfResult<Self> {
        let dataset = GriddedDataset::open(path)?;
        let times = dataset.read_times()?;

        let mut variables = Vec::new();
        for name in dataset.variable_names() {
            if name == "time" || dataset.variable_dims(&name)? != ["time"] {
                continue;
            }
            let values = dataset.read_coordinate(&name)?;
            let attrs = dataset
                .variable_attributes(&name)?
                .iter()
                .filter(|(n, _)| !matches!(*n, "_FillValue" | "missing_value"))
                .map(|(n, v)| (n.to_string(), v.clone()))
                .collect();
            variables.push(SeriesVariable { name, values, attrs });
        }

        debug!(path = %dataset.path().display(), steps = times.len(), variables = variables.len(), "Read series table");
        Ok(Self {
            times,
            variables,
            global_attrs: dataset.global_attributes(),
        })
    }

    /// Write the table, replacing any existing file.
    ///
    /// Time is stored as seconds since the Unix epoch; missing values as NaN
    /// with a NaN `_FillValue`.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> NetCdfResult<()> {
        let path = path.as_ref();
        if self.times.is_empty() {
            return Err(NetCdfError::InvalidFormat("refusing to write an empty series table".to_string()));
        }

        let units = CfTimeUnits::unix_seconds();
        let encoded: Vec<f64> = self.times.iter().map(|t| units.encode(*t)).collect();

        if path.exists() {
            std::fs::remove_file(path)?;
        }
        let mut file = netcdf::create(path)?;

        for (name, value) in self.global_attrs.iter() {
            file.add_attribute(name, value.clone())?;
        }

        file.add_dimension("time", self.times.len())?;

        {
            let mut time_var = file.add_variable::<f64>("time", &["time"])?;
            time_var.put_attribute("standard_name", "time")?;
            time_var.put_attribute("units", units.to_units_string().as_str())?;
            time_var.put_attribute("calendar", "standard")?;
            time_var.put_values(&encoded, ..)?;
        }

        for var in &self.variables {
            let mut nc_var = file.add_variable::<f64>(&var.name, &["time"])?;
            nc_var.set_fill_value(f64::NAN)?;
            for (name, value) in var.attrs.iter().filter(|(n, _)| *n != "_FillValue") {
                nc_var.put_attribute(name, value.clone())?;
            }
            nc_var.put_values(&var.values, ..)?;
        }

        debug!(path = %path.display(), steps = self.times.len(), "Wrote series table");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, d).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_push_row_fills_missing_with_nan() {
        let mut table = SeriesTable::default();
        table.push_row(day(1), [("self_sst", 20.0)]);
        table.push_row(day(2), [("self_sst", 21.0), ("all_sst", 19.0)]);
        table.push_row(day(3), [("all_sst", 18.0)]);

        assert_eq!(table.len(), 3);
        let self_sst = &table.variable("self_sst").unwrap().values;
        assert_eq!(self_sst[..2], [20.0, 21.0]);
        assert!(self_sst[2].is_nan());
        let all_sst = &table.variable("all_sst").unwrap().values;
        assert!(all_sst[0].is_nan());
        assert_eq!(all_sst[1..], [19.0, 18.0]);
    }

    #[test]
    fn test_append_keeps_existing_attrs_first() {
        let mut existing = Attributes::new();
        existing.insert("id", "OSTIA-UKMO-L4-GLOB_ICDR-v3.0");
        let mut first = SeriesTable::new(existing);
        first.push_row(day(1), [("self_sst", 20.0)]);

        let mut newer = Attributes::new();
        newer.insert("id", "something-else");
        newer.insert("title", "new");
        let mut second = SeriesTable::new(newer);
        second.push_row(day(2), [("self_sst", 21.0), ("self_arctic", -1.0)]);

        first.append(second);
        assert_eq!(first.times(), &[day(1), day(2)]);
        assert_eq!(first.global_attrs().get_string("id").as_deref(), Some("OSTIA-UKMO-L4-GLOB_ICDR-v3.0"));
        assert!(!first.global_attrs().contains("title"));
        let arctic = &first.variable("self_arctic").unwrap().values;
        assert!(arctic[0].is_nan());
        assert_eq!(arctic[1], -1.0);
    }
}
