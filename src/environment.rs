use crate::builtins::{reserved_words, CONSTANTS};
use crate::diagnostics::{Diagnostic, DiagnosticSink, LogSink, NameViolation};
use regex::Regex;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

/// Joins an array's name to an element index in synthesized keys (`A$3`).
pub const ARRAY_DELIMITER: char = '$';

fn scalar_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9_]*[A-Za-z][A-Za-z0-9_]*$").expect("scalar name pattern compiles")
    })
}

fn element_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9_]*[A-Za-z][A-Za-z0-9_$]*$").expect("element name pattern compiles")
    })
}

/// Check `name` against the scalar or array-element naming rules.
pub fn validate_name(name: &str, is_array_element: bool) -> Result<(), NameViolation> {
    let pattern = if is_array_element {
        element_pattern()
    } else {
        scalar_pattern()
    };
    if !pattern.is_match(name) {
        return Err(NameViolation::Pattern);
    }
    match reserved_words().find(|word| name.contains(word)) {
        Some(word) => Err(NameViolation::ReservedWord(word)),
        None => Ok(()),
    }
}

pub fn element_key(name: &str, index: usize) -> String {
    format!("{}{}{}", name, ARRAY_DELIMITER, index)
}

/// Split `A$3` into `("A", 3)`. The base must itself be a valid scalar name.
pub fn split_element_key(key: &str) -> Option<(&str, usize)> {
    let (base, index) = key.rsplit_once(ARRAY_DELIMITER)?;
    if !scalar_pattern().is_match(base) {
        return None;
    }
    index.parse().ok().map(|index| (base, index))
}

/// Name-to-number storage backing one interpreter instance.
///
/// Scalars and arrays live in separate maps, so `A` and `A[0]` never clash.
/// Arrays are sparse: any index may be written, and unwritten indices read
/// like an undefined scalar.
#[derive(Debug)]
pub struct Environment<S = LogSink> {
    scalars: HashMap<String, f32>,
    arrays: HashMap<String, BTreeMap<usize, f32>>,
    sink: S,
}

impl<S: DiagnosticSink> Environment<S> {
    /// A fresh store holding only the built-in constants.
    pub fn new(sink: S) -> Self {
        let mut environment = Self {
            scalars: HashMap::new(),
            arrays: HashMap::new(),
            sink,
        };
        for (name, value) in CONSTANTS {
            environment.set(name, value, false);
        }
        environment
    }

    /// Insert or overwrite `name`. Array elements are addressed by their
    /// synthesized key. Returns `false` and leaves the store untouched if
    /// the name is refused.
    pub fn set(&mut self, name: &str, value: f32, is_array_element: bool) -> bool {
        if let Err(reason) = validate_name(name, is_array_element) {
            self.reject(name.to_string(), reason);
            return false;
        }

        if !is_array_element {
            self.insert_scalar(name, value);
            return true;
        }

        match split_element_key(name) {
            Some((base, index)) => {
                self.insert_element(base, index, value);
                true
            }
            None => {
                self.reject(name.to_string(), NameViolation::Pattern);
                false
            }
        }
    }

    /// Read `name`, falling back to 0 (with a diagnostic) when it is unset.
    pub fn get(&mut self, name: &str) -> f32 {
        if let Some((base, index)) = split_element_key(name) {
            return self.get_element(base, index);
        }
        match self.scalars.get(name).copied() {
            Some(value) => value,
            None => self.undefined(name.to_string()),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        match split_element_key(name) {
            Some((base, index)) => self
                .arrays
                .get(base)
                .is_some_and(|elements| elements.contains_key(&index)),
            None => self.scalars.contains_key(name),
        }
    }

    /// Bulk-load `values` as elements `0..values.len()` of array `name`.
    pub fn load_array(&mut self, name: &str, values: &[f32]) {
        for (index, &value) in values.iter().enumerate() {
            self.set_element(name, index, value);
        }
    }

    pub fn set_element(&mut self, name: &str, index: usize, value: f32) -> bool {
        if let Err(reason) = validate_name(name, false) {
            self.reject(element_key(name, index), reason);
            return false;
        }
        self.insert_element(name, index, value);
        true
    }

    pub fn get_element(&mut self, name: &str, index: usize) -> f32 {
        let stored = self
            .arrays
            .get(name)
            .and_then(|elements| elements.get(&index))
            .copied();
        match stored {
            Some(value) => value,
            None => self.undefined(element_key(name, index)),
        }
    }

    /// Scalars sorted by name.
    pub fn variables(&self) -> Vec<(&str, f32)> {
        let mut variables: Vec<(&str, f32)> = self
            .scalars
            .iter()
            .map(|(name, &value)| (name.as_str(), value))
            .collect();
        variables.sort_by(|a, b| a.0.cmp(b.0));
        variables
    }

    /// Arrays sorted by name, each with its elements in index order.
    pub fn arrays(&self) -> Vec<(&str, Vec<(usize, f32)>)> {
        let mut arrays: Vec<(&str, Vec<(usize, f32)>)> = self
            .arrays
            .iter()
            .map(|(name, elements)| {
                let elements = elements.iter().map(|(&index, &value)| (index, value)).collect();
                (name.as_str(), elements)
            })
            .collect();
        arrays.sort_by(|a, b| a.0.cmp(b.0));
        arrays
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn insert_scalar(&mut self, name: &str, value: f32) {
        let diagnostic = match self.scalars.entry(name.to_string()) {
            Entry::Occupied(mut entry) => {
                entry.insert(value);
                Diagnostic::Updated {
                    name: name.to_string(),
                    value,
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(value);
                Diagnostic::Created {
                    name: name.to_string(),
                    value,
                }
            }
        };
        self.sink.emit(diagnostic);
    }

    fn insert_element(&mut self, name: &str, index: usize, value: f32) {
        let elements = self.arrays.entry(name.to_string()).or_default();
        let key = element_key(name, index);
        let diagnostic = match elements.insert(index, value) {
            Some(_) => Diagnostic::Updated { name: key, value },
            None => Diagnostic::Created { name: key, value },
        };
        self.sink.emit(diagnostic);
    }

    fn reject(&mut self, name: String, reason: NameViolation) {
        self.sink.emit(Diagnostic::InvalidName { name, reason });
    }

    fn undefined(&mut self, name: String) -> f32 {
        self.sink.emit(Diagnostic::UndefinedReference { name });
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording() -> Environment<Vec<Diagnostic>> {
        Environment::new(Vec::new())
    }

    #[test]
    fn seeds_constants() {
        let mut env = recording();
        assert_eq!(env.get("pi"), std::f32::consts::PI);
        assert_eq!(env.get("e"), std::f32::consts::E);
        assert_eq!(env.sink().len(), 2);
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut env = recording();
        assert!(env.set("speed", 12.5, false));
        assert_eq!(env.get("speed"), 12.5);
    }

    #[test]
    fn overwrite_reports_update() {
        let mut env = recording();
        env.set("x", 1.0, false);
        env.set("x", 2.0, false);
        assert_eq!(env.get("x"), 2.0);
        assert_eq!(
            env.sink().last(),
            Some(&Diagnostic::Updated {
                name: "x".to_string(),
                value: 2.0
            })
        );
    }

    #[test]
    fn names_may_start_with_digits_or_underscores() {
        assert!(validate_name("2x", false).is_ok());
        assert!(validate_name("_tmp1", false).is_ok());
        assert_eq!(validate_name("_", false), Err(NameViolation::Pattern));
        assert_eq!(validate_name("12", false), Err(NameViolation::Pattern));
        assert_eq!(validate_name("a-b", false), Err(NameViolation::Pattern));
    }

    #[test]
    fn reserved_words_are_refused_as_substrings() {
        let mut env = recording();
        env.set("diff", 1.0, false);
        assert!(!env.contains("diff"));
        assert_eq!(
            env.sink().last(),
            Some(&Diagnostic::InvalidName {
                name: "diff".to_string(),
                reason: NameViolation::ReservedWord("if"),
            })
        );
        assert_eq!(
            validate_name("mySqrt", false),
            Err(NameViolation::ReservedWord("Sqrt"))
        );
    }

    #[test]
    fn undefined_read_is_zero_with_diagnostic() {
        let mut env = recording();
        assert_eq!(env.get("missing"), 0.0);
        assert_eq!(
            env.sink().last(),
            Some(&Diagnostic::UndefinedReference {
                name: "missing".to_string()
            })
        );
    }

    #[test]
    fn delimiter_only_allowed_for_array_elements() {
        let mut env = recording();
        assert!(!env.set("A$1", 4.0, false));
        assert!(env.set("A$1", 4.0, true));
        assert_eq!(env.get_element("A", 1), 4.0);
        assert_eq!(env.get("A$1"), 4.0);
        assert!(!env.set("$A1", 4.0, true));
    }

    #[test]
    fn load_array_fills_consecutive_indices() {
        let mut env = recording();
        env.load_array("A", &[1.0, 2.0, 3.0]);
        assert_eq!(env.get_element("A", 0), 1.0);
        assert_eq!(env.get_element("A", 2), 3.0);
        assert_eq!(env.get_element("A", 5), 0.0);
        assert_eq!(
            env.sink().last(),
            Some(&Diagnostic::UndefinedReference {
                name: "A$5".to_string()
            })
        );
    }

    #[test]
    fn arrays_are_sparse_and_separate_from_scalars() {
        let mut env = recording();
        env.set("A", 9.0, false);
        env.set_element("A", 10, 1.0);
        assert_eq!(env.get("A"), 9.0);
        assert_eq!(env.arrays(), vec![("A", vec![(10, 1.0)])]);
    }

    #[test]
    fn invalid_array_name_is_refused() {
        let mut env = recording();
        assert!(!env.set_element("while", 0, 1.0));
        assert!(env.arrays().is_empty());
    }

    #[test]
    fn variables_are_sorted() {
        let mut env = recording();
        env.set("zeta", 1.0, false);
        env.set("alpha", 2.0, false);
        let names: Vec<&str> = env.variables().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["alpha", "e", "pi", "zeta"]);
    }
}
