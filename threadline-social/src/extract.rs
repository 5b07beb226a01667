//! Total accessors over loosely-shaped provider JSON.
//!
//! Every accessor takes a dotted path (`"author.firstName"`, `"images.0"`)
//! and falls back to a default when a key is missing, an intermediate object
//! is missing, the value is `null`, or the value has an incompatible type.
//! Nothing in here returns an error.
use serde::de::DeserializeOwned;
use serde_json::Value;

static NULL: Value = Value::Null;

#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    root: &'a Value,
}

impl<'a> Fields<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    /// Resolve `path`, treating `null` the same as absence.
    ///
    /// ```
    /// use serde_json::json;
    /// use threadline_social::extract::Fields;
    ///
    /// let raw = json!({ "author": { "firstName": "Ada" }, "images": ["a.jpg"] });
    /// let f = Fields::new(&raw);
    /// assert_eq!(f.get("author.firstName"), Some(&json!("Ada")));
    /// assert_eq!(f.get("images.0"), Some(&json!("a.jpg")));
    /// assert_eq!(f.get("author.lastName"), None);
    /// assert_eq!(f.get("stats.total_reactions"), None);
    /// ```
    pub fn get(&self, path: &str) -> Option<&'a Value> {
        let mut cur = self.root;
        for seg in path.split('.').filter(|s| !s.is_empty()) {
            cur = match cur {
                Value::Object(map) => map.get(seg)?,
                Value::Array(items) => items.get(seg.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        (!cur.is_null()).then_some(cur)
    }

    pub fn has(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// A nested record; missing or non-object paths yield an empty view.
    pub fn object(&self, path: &str) -> Fields<'a> {
        match self.get(path) {
            Some(v @ Value::Object(_)) => Fields::new(v),
            _ => Fields::new(&NULL),
        }
    }

    /// Deserialize the value at `path` into `T`, or return `default`.
    pub fn value_or<T: DeserializeOwned>(&self, path: &str, default: T) -> T {
        self.get(path)
            .and_then(|v| T::deserialize(v).ok())
            .unwrap_or(default)
    }

    /// String value at `path`. Numbers and booleans are not stringified.
    pub fn string(&self, path: &str) -> Option<String> {
        self.get(path).and_then(Value::as_str).map(str::to_string)
    }

    pub fn string_or(&self, path: &str, default: &str) -> String {
        self.string(path).unwrap_or_else(|| default.to_string())
    }

    /// Identifier at `path`: strings verbatim, integers rendered in decimal.
    pub fn id(&self, path: &str) -> Option<String> {
        match self.get(path)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
            _ => None,
        }
    }

    /// Non-negative count. Accepts native numbers and numeric strings;
    /// anything else, including negatives, yields 0.
    ///
    /// ```
    /// use serde_json::json;
    /// use threadline_social::extract::Fields;
    ///
    /// let raw = json!({ "a": "10", "b": 5, "c": "lots", "d": -3, "e": 7.9 });
    /// let f = Fields::new(&raw);
    /// assert_eq!(f.count("a"), 10);
    /// assert_eq!(f.count("b"), 5);
    /// assert_eq!(f.count("c"), 0);
    /// assert_eq!(f.count("d"), 0);
    /// assert_eq!(f.count("e"), 7);
    /// assert_eq!(f.count("missing"), 0);
    /// ```
    pub fn count(&self, path: &str) -> u64 {
        match self.get(path) {
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
                .unwrap_or(0),
            Some(Value::String(s)) => parse_count(s),
            _ => 0,
        }
    }

    /// Signed integer (epoch millis and the like). Numeric strings accepted.
    pub fn integer(&self, path: &str) -> Option<i64> {
        match self.get(path)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    pub fn flag(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(Value::as_bool)
    }

    /// Array at `path`, or an empty slice.
    pub fn list(&self, path: &str) -> &'a [Value] {
        match self.get(path) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        }
    }
}

fn parse_count(raw: &str) -> u64 {
    let s = raw.trim();
    s.parse::<u64>()
        .ok()
        .or_else(|| {
            s.parse::<f64>()
                .ok()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f as u64)
        })
        .unwrap_or(0)
}
