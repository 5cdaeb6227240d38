//! Attribute value helpers.

use netcdf::AttributeValue;

/// Numeric attribute as f64. Vector attributes yield their first element.
pub fn attr_as_f64(value: &AttributeValue) -> Option<f64> {
    match value {
        AttributeValue::Double(d) => Some(*d),
        AttributeValue::Float(f) => Some(*f as f64),
        AttributeValue::Schar(v) => Some(*v as f64),
        AttributeValue::Uchar(v) => Some(*v as f64),
        AttributeValue::Short(v) => Some(*v as f64),
        AttributeValue::Ushort(v) => Some(*v as f64),
        AttributeValue::Int(v) => Some(*v as f64),
        AttributeValue::Uint(v) => Some(*v as f64),
        AttributeValue::Longlong(v) => Some(*v as f64),
        AttributeValue::Ulonglong(v) => Some(*v as f64),
        AttributeValue::Doubles(v) => v.first().copied(),
        AttributeValue::Floats(v) => v.first().map(|f| *f as f64),
        AttributeValue::Schars(v) => v.first().map(|x| *x as f64),
        AttributeValue::Uchars(v) => v.first().map(|x| *x as f64),
        AttributeValue::Shorts(v) => v.first().map(|x| *x as f64),
        AttributeValue::Ushorts(v) => v.first().map(|x| *x as f64),
        AttributeValue::Ints(v) => v.first().map(|x| *x as f64),
        AttributeValue::Uints(v) => v.first().map(|x| *x as f64),
        AttributeValue::Longlongs(v) => v.first().map(|x| *x as f64),
        AttributeValue::Ulonglongs(v) => v.first().map(|x| *x as f64),
        _ => None,
    }
}

/// Text attribute as a string.
pub fn attr_as_string(value: &AttributeValue) -> Option<String> {
    match value {
        AttributeValue::Str(s) => Some(s.clone()),
        AttributeValue::Strs(v) => Some(v.join(",")),
        _ => None,
    }
}

/// Ordered attribute list, as found on a variable or on the file itself.
///
/// Insertion order is kept so that copied attributes are written back in the
/// order they were read.
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    entries: Vec<(String, AttributeValue)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any existing value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn get_string(&self, name: &str) -> Option<String> {
        self.get(name).and_then(attr_as_string)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(attr_as_f64)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl FromIterator<(String, AttributeValue)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (String, AttributeValue)>>(iter: T) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}
