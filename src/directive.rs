//! Per-field inclusion directives.
//!
//! Every field of a shape resolves to exactly one [`Directive`]. The same
//! resolution runs on both sides of the codec: the wire carries no field names,
//! so the decoder only knows which fields were written by repeating the
//! encoder's decisions in declared order.

/// Directive value that excludes a field.
pub const SKIP: &str = "-";

/// Directive value that writes a field only when it differs from its default.
pub const OMIT_EMPTY: &str = "omitempty";

/// How a field participates in the wire format.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Directive {
    /// Always written, always read.
    Include,
    /// Never written, never read; the decode target keeps its value.
    Exclude,
    /// Written only when the value is not the type's default.
    IncludeIfNonDefault,
}

impl Directive {
    /// Resolves a field's directive from its raw tag and visibility.
    ///
    /// # Arguments
    ///
    /// * `tag: Option<&str>` - The directive string attached to the field, if any.
    /// * `public: bool` - Whether the field is externally accessible.
    ///
    /// # Example
    ///
    /// ```
    /// use tinyser::directive::Directive;
    ///
    /// assert_eq!(Directive::resolve(Some("name"), true), Directive::Include);
    /// assert_eq!(Directive::resolve(Some("omitempty"), true), Directive::IncludeIfNonDefault);
    /// assert_eq!(Directive::resolve(Some("-"), true), Directive::Exclude);
    /// assert_eq!(Directive::resolve(Some(""), true), Directive::Exclude);
    /// assert_eq!(Directive::resolve(None, true), Directive::Exclude);
    /// assert_eq!(Directive::resolve(Some("name"), false), Directive::Exclude);
    /// ```
    pub const fn resolve(tag: Option<&str>, public: bool) -> Directive {
        if !public {
            return Directive::Exclude;
        }
        match tag {
            None => Directive::Exclude,
            Some(tag) => {
                if tag.is_empty() || str_eq(tag, SKIP) {
                    Directive::Exclude
                } else if str_eq(tag, OMIT_EMPTY) {
                    Directive::IncludeIfNonDefault
                } else {
                    Directive::Include
                }
            }
        }
    }

    /// Whether a field with this directive is written. `is_default` is only
    /// consulted for `IncludeIfNonDefault`.
    #[inline]
    pub fn writes<F: FnOnce() -> bool>(self, is_default: F) -> bool {
        match self {
            Directive::Include => true,
            Directive::Exclude => false,
            Directive::IncludeIfNonDefault => !is_default(),
        }
    }

    /// Whether a field with this directive is read, given how many input bytes
    /// remain.
    ///
    /// There is no presence marker on the wire, so an `IncludeIfNonDefault`
    /// field is only read while input remains.
    #[inline]
    pub fn reads(self, remaining: usize) -> bool {
        match self {
            Directive::Include => true,
            Directive::Exclude => false,
            Directive::IncludeIfNonDefault => remaining > 0,
        }
    }
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// One row of a shape's directive table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Declared field name, or its index for tuple structs.
    pub name: &'static str,
    /// The resolved directive.
    pub directive: Directive,
}

impl FieldSpec {
    /// Builds a table row, resolving the directive.
    pub const fn new(name: &'static str, tag: Option<&'static str>, public: bool) -> Self {
        FieldSpec {
            name,
            directive: Directive::resolve(tag, public),
        }
    }
}

/// A record shape with a declared directive table.
///
/// Usually derived with `#[derive(TinySerDe)]`, whose encode and decode walks
/// look up each field's row here.
pub trait Shape {
    /// Every declared field, in declared order.
    const FIELDS: &'static [FieldSpec];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_table() {
        use Directive::*;
        let cases: &[(Option<&str>, bool, Directive)] = &[
            (None, true, Exclude),
            (Some(""), true, Exclude),
            (Some("-"), true, Exclude),
            (Some("omitempty"), true, IncludeIfNonDefault),
            (Some("siblings"), true, Include),
            (Some("-x"), true, Include),
            (Some("omitempty"), false, Exclude),
            (Some("siblings"), false, Exclude),
        ];
        for (tag, public, expected) in cases {
            assert_eq!(Directive::resolve(*tag, *public), *expected, "{:?}", tag);
        }
    }

    #[test]
    fn resolves_in_const_context() {
        const ROW: FieldSpec = FieldSpec::new("spouse", Some("omitempty"), true);
        assert_eq!(ROW.directive, Directive::IncludeIfNonDefault);
    }

    #[test]
    fn write_and_read_decisions() {
        assert!(Directive::Include.writes(|| unreachable!()));
        assert!(!Directive::Exclude.writes(|| false));
        assert!(!Directive::IncludeIfNonDefault.writes(|| true));
        assert!(Directive::IncludeIfNonDefault.writes(|| false));

        assert!(Directive::Include.reads(0));
        assert!(!Directive::IncludeIfNonDefault.reads(0));
        assert!(Directive::IncludeIfNonDefault.reads(3));
    }

    struct Person;

    impl Shape for Person {
        const FIELDS: &'static [FieldSpec] = &[
            FieldSpec::new("name", Some("name"), true),
            FieldSpec::new("secret", Some("secret"), false),
            FieldSpec::new("age", Some("-"), true),
            FieldSpec::new("spouse", Some("omitempty"), true),
        ];
    }

    #[test]
    fn table_rows_resolve_in_order() {
        let wire: Vec<_> = Person::FIELDS
            .iter()
            .filter(|f| f.directive != Directive::Exclude)
            .map(|f| f.name)
            .collect();
        assert_eq!(wire, vec!["name", "spouse"]);
    }
}
