use serde::{Serialize, Serializer};
use std::fmt;

/// Hard upper bound on the length of a formatted name, in characters.
pub const MAX_NAME_LENGTH: usize = 15;

/// One first-name or last-name fragment before formatting.
///
/// Any scalar can be a name part; it is coerced to its canonical text
/// through [`fmt::Display`] before the formatter touches it.
#[derive(Debug, Clone, PartialEq)]
pub enum NamePart {
    Text(String),
    Integer(i128),
    Float(f64),
    Bool(bool),
}

impl NamePart {
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl Default for NamePart {
    fn default() -> Self {
        NamePart::Text(String::new())
    }
}

impl fmt::Display for NamePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamePart::Text(text) => f.write_str(text),
            NamePart::Integer(value) => write!(f, "{}", value),
            NamePart::Float(value) => write_float(f, *value),
            NamePart::Bool(value) => write!(f, "{}", value),
        }
    }
}

// 整數值的浮點數保留 ".0"；指數小於 -4 或大於等於 16 時改用科學記號 (1e+16, 1e-05)
fn write_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        return f.write_str("nan");
    }
    if value.is_infinite() {
        return f.write_str(if value > 0.0 { "inf" } else { "-inf" });
    }

    let scientific = format!("{:e}", value);
    let Some((mantissa, exponent)) = scientific
        .split_once('e')
        .and_then(|(m, e)| e.parse::<i32>().ok().map(|e| (m, e)))
    else {
        return write!(f, "{}", value);
    };

    if (-4..16).contains(&exponent) {
        let fixed = value.to_string();
        if fixed.contains('.') {
            f.write_str(&fixed)
        } else {
            write!(f, "{}.0", fixed)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(f, "{}e{}{:02}", mantissa, sign, exponent.unsigned_abs())
    }
}

impl Serialize for NamePart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<&str> for NamePart {
    fn from(value: &str) -> Self {
        NamePart::Text(value.to_string())
    }
}

impl From<String> for NamePart {
    fn from(value: String) -> Self {
        NamePart::Text(value)
    }
}

impl From<&String> for NamePart {
    fn from(value: &String) -> Self {
        NamePart::Text(value.clone())
    }
}

impl From<bool> for NamePart {
    fn from(value: bool) -> Self {
        NamePart::Bool(value)
    }
}

impl From<f64> for NamePart {
    fn from(value: f64) -> Self {
        NamePart::Float(value)
    }
}

impl From<f32> for NamePart {
    fn from(value: f32) -> Self {
        // 以 f32 的最短表示轉換，0.1f32 顯示為 "0.1" 而非 "0.10000000149011612"
        let widened = value.to_string().parse::<f64>().unwrap_or(f64::from(value));
        NamePart::Float(widened)
    }
}

impl From<char> for NamePart {
    fn from(value: char) -> Self {
        NamePart::Text(value.to_string())
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for NamePart {
                fn from(value: $ty) -> Self {
                    NamePart::Integer(i128::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl From<u128> for NamePart {
    fn from(value: u128) -> Self {
        i128::try_from(value)
            .map(NamePart::Integer)
            .unwrap_or_else(|_| NamePart::Text(value.to_string()))
    }
}

impl From<usize> for NamePart {
    fn from(value: usize) -> Self {
        // usize 最多 64 位元
        NamePart::Integer(value as i128)
    }
}

impl From<isize> for NamePart {
    fn from(value: isize) -> Self {
        NamePart::Integer(value as i128)
    }
}

impl From<&serde_json::Value> for NamePart {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => NamePart::default(),
            serde_json::Value::Bool(b) => NamePart::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    NamePart::Integer(i128::from(i))
                } else if let Some(u) = n.as_u64() {
                    NamePart::Integer(i128::from(u))
                } else {
                    NamePart::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => NamePart::Text(s.clone()),
            other => NamePart::Text(other.to_string()),
        }
    }
}

impl From<serde_json::Value> for NamePart {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => NamePart::Text(s),
            other => NamePart::from(&other),
        }
    }
}

/// A formatted name. Never longer than [`MAX_NAME_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct FormattedName(String);

impl FormattedName {
    /// Callers must already have truncated `text`.
    pub(crate) fn new_unchecked(text: String) -> Self {
        debug_assert!(text.chars().count() <= MAX_NAME_LENGTH);
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len_chars(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for FormattedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FormattedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for FormattedName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FormattedName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<FormattedName> for String {
    fn from(value: FormattedName) -> Self {
        value.0
    }
}

/// One input row of a batch run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NameRecord {
    pub first_name: NamePart,
    pub last_name: NamePart,
}

impl NameRecord {
    pub fn new(first_name: impl Into<NamePart>, last_name: impl Into<NamePart>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// One output row of a batch run: the inputs as text plus the result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedRecord {
    pub first_name: String,
    pub last_name: String,
    pub formatted: FormattedName,
}

#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub records: Vec<FormattedRecord>,
    pub truncated: usize,
}
