use anyhow::{Context, Result};
use std::fmt::Display;

/// A ground term, as written by answer set solvers in their models.
///
/// Constants are functions without arguments; tuples are functions with an empty name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    /// An integer.
    Number(i64),
    /// A quoted string (stored unescaped).
    String(String),
    /// A function symbol applied to its arguments.
    Function(String, Vec<Term>),
}

impl Term {
    /// Builds a function term.
    pub fn function(name: &str, arguments: Vec<Term>) -> Self {
        Term::Function(name.to_string(), arguments)
    }

    /// Builds a constant, i.e. a function term without arguments.
    pub fn constant(name: &str) -> Self {
        Term::Function(name.to_string(), vec![])
    }

    /// Builds a string term.
    pub fn string(s: &str) -> Self {
        Term::String(s.to_string())
    }

    /// Returns the name of the function if this term is a function.
    pub fn name(&self) -> Option<&str> {
        match self {
            Term::Function(name, _) => Some(name),
            _ => None,
        }
    }

    /// Returns the arguments of the function, or an empty slice for other terms.
    pub fn arguments(&self) -> &[Term] {
        match self {
            Term::Function(_, args) => args,
            _ => &[],
        }
    }

    /// Returns the integer value of this term if it is a number.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Term::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the content of this term if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Term::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `true` iff this term is a function with the given name and arity.
    pub fn is_function(&self, name: &str, arity: usize) -> bool {
        matches!(self, Term::Function(n, args) if n == name && args.len() == arity)
    }

    /// Parses a ground term from its textual form.
    ///
    /// # Example
    ///
    /// ```
    /// # use iggy::asp::Term;
    /// let t = Term::parse(r#"vlabel("x1",or("A"),-1)"#).unwrap();
    /// assert_eq!(Some("vlabel"), t.name());
    /// assert_eq!(Some(-1), t.arguments()[2].as_number());
    /// ```
    pub fn parse(s: &str) -> Result<Term> {
        term_grammar::term(s).with_context(|| format!(r#"while parsing term "{}""#, s))
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Number(n) => write!(f, "{}", n),
            Term::String(s) => {
                write!(f, "\"")?;
                for c in s.chars() {
                    match c {
                        '"' => write!(f, "\\\"")?,
                        '\\' => write!(f, "\\\\")?,
                        '\n' => write!(f, "\\n")?,
                        _ => write!(f, "{}", c)?,
                    }
                }
                write!(f, "\"")
            }
            Term::Function(name, args) => {
                if args.is_empty() && !name.is_empty() {
                    return write!(f, "{}", name);
                }
                write!(f, "{}(", name)?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", a)?;
                }
                if name.is_empty() && args.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
        }
    }
}

peg::parser! { grammar term_grammar() for str {

    rule _() = quiet!{[c if c.is_whitespace()]*}

    pub rule term() -> Term
        = _ t:(number() / string() / tuple() / function()) _ { t }

    rule number() -> Term
        = n:$("-"? ['0'..='9']+) {? n.parse::<i64>().map(Term::Number).or(Err("a 64 bits integer")) }

    rule string() -> Term
        = "\"" s:string_char()* "\"" { Term::String(s.into_iter().collect()) }

    rule string_char() -> char
        = "\\n" { '\n' }
        / "\\" c:[_] { c }
        / c:[^ '"' | '\\'] { c }

    rule arguments() -> Vec<Term>
        = "(" _ args:(term() ** ",") ","? _ ")" { args }

    rule tuple() -> Term
        = args:arguments() { Term::Function(String::new(), args) }

    rule identifier() -> &'input str
        = $(['_' | 'a'..='z'] ['_' | '\'' | 'a'..='z' | 'A'..='Z' | '0'..='9']*)

    rule function() -> Term
        = name:identifier() _ args:arguments()? {
            Term::Function(name.to_string(), args.unwrap_or_default())
        }
}}
