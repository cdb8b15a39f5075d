//! Word lists and literal replacement tables

use phf::phf_map;

/// Function names that get a leading backslash (`sin` → `\sin`).
///
/// Longer names come before their prefixes so the alternation reads naturally.
pub const FUNCTION_NAMES: &[&str] = &[
    "arcsin", "arccos", "arctan", "sinh", "cosh", "tanh", "sin", "cos", "tan", "cot", "sec",
    "csc", "limsup", "liminf", "lim", "log", "ln", "exp", "det", "dim", "ker", "max", "min",
    "sup", "arg", "deg", "gcd", "Pr", "sum", "prod", "oint", "iint", "int", "sqrt",
];

/// Logic and set words that get a leading backslash (`forall` → `\forall`).
pub const LOGIC_NAMES: &[&str] = &[
    "forall", "exists", "notin", "in", "subseteq", "subset", "supseteq", "supset", "cup", "cap",
    "neg", "land", "lor", "emptyset", "nabla", "partial",
];

/// Greek letter names that get a leading backslash (`alpha` → `\alpha`).
pub const GREEK_LETTERS: &[&str] = &[
    "alpha", "beta", "gamma", "delta", "varepsilon", "epsilon", "zeta", "eta", "vartheta",
    "theta", "iota", "kappa", "lambda", "mu", "nu", "xi", "varpi", "pi", "rho", "sigma", "tau",
    "upsilon", "varphi", "phi", "chi", "psi", "omega", "Gamma", "Delta", "Theta", "Lambda", "Xi",
    "Pi", "Sigma", "Upsilon", "Phi", "Psi", "Omega",
];

/// Literal symbol replacements, applied in order.
///
/// Order matters: `<=>` must be replaced before `=>` and `<=`, `|->` before
/// `->`, and `...` before `.`.
pub const SYMBOLS: &[(&str, &str)] = &[
    ("<=>", "\\iff"),
    ("=>", "\\implies"),
    ("|->", "\\mapsto"),
    ("->", "\\to"),
    (">=", "\\ge"),
    ("<=", "\\le"),
    ("!=", "\\neq"),
    ("~=", "\\approx"),
    ("-=", "\\equiv"),
    ("xx", "\\times"),
    ("+-", "\\pm"),
    ("...", "\\cdots"),
    (".", "\\cdot"),
];

/// Decoration marker (the text inside `x(...)`) → accent command.
pub static SHAPE_COMMANDS: phf::Map<&'static str, &'static str> = phf_map! {
    "_" => "overline",
    "->" => "overrightarrow",
    "\\to" => "overrightarrow",
    "^" => "hat",
    "~" => "tilde",
    "." => "dot",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_order() {
        let pos = |s: &str| SYMBOLS.iter().position(|(k, _)| *k == s).unwrap();
        assert!(pos("<=>") < pos("=>"));
        assert!(pos("<=>") < pos("<="));
        assert!(pos("|->") < pos("->"));
        assert!(pos("...") < pos("."));
    }

    #[test]
    fn test_shape_commands() {
        assert_eq!(SHAPE_COMMANDS.get("_"), Some(&"overline"));
        assert_eq!(SHAPE_COMMANDS.get("->"), SHAPE_COMMANDS.get("\\to"));
        assert!(SHAPE_COMMANDS.get("+").is_none());
    }
}
