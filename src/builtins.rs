use std::f32::consts;
use std::fmt;

/// Entries seeded into every fresh environment before user code runs.
pub const CONSTANTS: [(&str, f32); 2] = [("pi", consts::PI), ("e", consts::E)];

/// Control keywords; like function names they may not appear inside a
/// variable name.
pub const KEYWORDS: [&str; 4] = ["if", "elif", "else", "while"];

/// The unary math functions callable from scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Asin,
    Sign,
    Sqrt,
    Log,
}

impl Function {
    pub const ALL: [Function; 5] = [
        Function::Asin,
        Function::Sign,
        Function::Sqrt,
        Function::Sin,
        Function::Log,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "Sin",
            Function::Asin => "Asin",
            Function::Sign => "Sign",
            Function::Sqrt => "Sqrt",
            Function::Log => "Log",
        }
    }

    /// The function whose name `word` starts with, if any.
    pub fn from_prefix(word: &str) -> Option<Function> {
        Self::ALL
            .into_iter()
            .find(|function| word.starts_with(function.name()))
    }

    /// Apply the function with IEEE semantics: out-of-domain inputs give NaN
    /// rather than an error.
    pub fn apply(self, x: f32) -> f32 {
        match self {
            Function::Sin => x.sin(),
            Function::Asin => x.asin(),
            Function::Sign => sign(x),
            Function::Sqrt => x.sqrt(),
            Function::Log => x.ln(),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

// `f32::signum` maps zero to 1.0; scripts expect 0.
fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else if x == 0.0 {
        0.0
    } else {
        f32::NAN
    }
}

/// Every word that may not occur anywhere inside a variable name.
pub fn reserved_words() -> impl Iterator<Item = &'static str> {
    KEYWORDS
        .into_iter()
        .chain(Function::ALL.into_iter().map(Function::name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqrt_and_sign() {
        assert_eq!(Function::Sqrt.apply(9.0), 3.0);
        assert_eq!(Function::Sign.apply(-5.0), -1.0);
        assert_eq!(Function::Sign.apply(7.5), 1.0);
        assert_eq!(Function::Sign.apply(0.0), 0.0);
        assert!(Function::Sign.apply(f32::NAN).is_nan());
    }

    #[test]
    fn trigonometry_is_in_radians() {
        assert!((Function::Sin.apply(consts::FRAC_PI_2) - 1.0).abs() < 1e-6);
        assert!((Function::Asin.apply(1.0) - consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn log_is_natural() {
        assert!((Function::Log.apply(consts::E) - 1.0).abs() < 1e-6);
        assert!(Function::Log.apply(-1.0).is_nan());
    }

    #[test]
    fn prefix_lookup_distinguishes_sin_and_sign() {
        assert_eq!(Function::from_prefix("Sin3"), Some(Function::Sin));
        assert_eq!(Function::from_prefix("Sign3"), Some(Function::Sign));
        assert_eq!(Function::from_prefix("Asinx"), Some(Function::Asin));
        assert_eq!(Function::from_prefix("x"), None);
    }

    #[test]
    fn reserved_words_cover_keywords_and_functions() {
        let words: Vec<&str> = reserved_words().collect();
        assert_eq!(words.len(), 9);
        assert!(words.contains(&"elif"));
        assert!(words.contains(&"Sqrt"));
    }
}
