/// An enum acting like a `Result`, but producing warnings instead of errors.
///
/// As there are no error values, there is always an "ok" value, which can be associated with one or more warnings.
#[derive(Debug, PartialEq, Eq)]
pub enum WarningResult<T, W> {
    /// A value without warnings.
    Ok(T),
    /// A value associated with warnings.
    Warned(T, Vec<W>),
}

impl<T, W> WarningResult<T, W> {
    /// Builds a `WarningResult` from a value and a (possibly empty) list of warnings.
    pub fn new(t: T, warnings: Vec<W>) -> Self {
        if warnings.is_empty() {
            WarningResult::Ok(t)
        } else {
            WarningResult::Warned(t, warnings)
        }
    }

    /// Consumes the warnings, returning the underlying value.
    ///
    /// The warnings are passed to the provided callback.
    pub fn consume_warnings<F>(self, f: F) -> T
    where
        F: FnOnce(Vec<W>),
    {
        match self {
            WarningResult::Ok(t) => t,
            WarningResult::Warned(t, w) => {
                f(w);
                t
            } // kcov-ignore
        }
    }

    /// Maps the value of a `WarningResult`, keeping its warnings.
    pub fn map<U, F>(self, f: F) -> WarningResult<U, W>
    where
        F: FnOnce(T) -> U,
    {
        let (t, w) = self.into_parts();
        WarningResult::new(f(t), w)
    }

    fn into_parts(self) -> (T, Vec<W>) {
        match self {
            WarningResult::Ok(t) => (t, vec![]),
            WarningResult::Warned(t, w) => (t, w),
        }
    }
}
